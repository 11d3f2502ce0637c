//! Lexikon Reasoner - Binary Entry Point
//!
//! Loads a JSON Lines vocabulary and runs inference or relation lookups
//! against it, printing JSON to stdout.

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lexikon_reasoner::{InMemoryStore, ReasonerConfig, ReasoningEngine};

mod cli;

use cli::{Cli, Command};

type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

fn main() {
    // Log to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config = match &cli.config {
        Some(path) => ReasonerConfig::from_file(path)?,
        None => ReasonerConfig::from_env()?,
    };

    let store = match &config.relations_file {
        Some(path) => InMemoryStore::open(path)?,
        None => {
            tracing::warn!("No relations file configured, using an empty store");
            InMemoryStore::new()
        }
    };
    let engine = ReasoningEngine::with_config(store, config);

    match cli.command {
        Command::Infer(args) => {
            // Targets deleted from the vocabulary are not reported
            let result = engine
                .infer_with_stats(&args.term_id, &args.request())?
                .resolve_targets(|id| engine.store().get_term(id).map(|term| term.name));
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Relations(args) => {
            let relations = engine.relations_of(&args.term_id, args.direction.into())?;
            println!("{}", serde_json::to_string_pretty(&relations)?);
        }
    }

    Ok(())
}
