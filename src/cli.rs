//! Command-line definitions for the reasoner binary

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use lexikon_reasoner::{Direction, InferRequest};

/// Lexikon Reasoner - ontology inference over a vocabulary graph
#[derive(Debug, Parser)]
#[command(name = "lexikon-reasoner")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// TOML configuration file; LEXIKON_* environment variables are used otherwise
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Derive implicit relations for a term
    Infer(InferArgs),

    /// List the stored relations of a term
    Relations(RelationsArgs),
}

#[derive(Debug, Parser)]
pub struct InferArgs {
    /// Seed term id
    pub term_id: String,

    /// Rule to run: transitive, symmetric, equivalence or inverse (repeatable, default all)
    #[arg(short, long = "rule")]
    pub rules: Vec<String>,

    /// Maximum traversal depth
    #[arg(short = 'd', long, allow_negative_numbers = true)]
    pub max_depth: Option<i64>,

    /// Minimum confidence of a returned relation
    #[arg(short, long, allow_negative_numbers = true)]
    pub threshold: Option<f64>,
}

impl InferArgs {
    pub fn request(&self) -> InferRequest {
        let mut request = InferRequest::new();
        if !self.rules.is_empty() {
            request = request.rules(self.rules.iter().cloned());
        }
        if let Some(max_depth) = self.max_depth {
            request = request.max_depth(max_depth);
        }
        if let Some(threshold) = self.threshold {
            request = request.confidence_threshold(threshold);
        }
        request
    }
}

#[derive(Debug, Parser)]
pub struct RelationsArgs {
    /// Term id
    pub term_id: String,

    /// Which edges to list
    #[arg(long, value_enum, default_value_t = DirectionArg::Outgoing)]
    pub direction: DirectionArg,
}

/// Edge direction argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DirectionArg {
    /// Edges leaving the term
    Outgoing,
    /// Edges arriving at the term
    Incoming,
    /// Outgoing edges, then incoming edges
    Both,
}

impl From<DirectionArg> for Direction {
    fn from(direction: DirectionArg) -> Self {
        match direction {
            DirectionArg::Outgoing => Direction::Outgoing,
            DirectionArg::Incoming => Direction::Incoming,
            DirectionArg::Both => Direction::Both,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_budget_flags() {
        let cli = Cli::parse_from([
            "lexikon-reasoner",
            "infer",
            "t1",
            "--rule",
            "transitive",
            "-r",
            "inverse",
            "--max-depth",
            "5",
            "--threshold",
            "0.6",
        ]);
        let Command::Infer(args) = cli.command else {
            panic!("Expected Infer command");
        };

        let request = args.request();
        assert_eq!(
            request.rules,
            Some(vec!["transitive".to_string(), "inverse".to_string()])
        );
        assert_eq!(request.max_depth, Some(5));
        assert_eq!(request.confidence_threshold, Some(0.6));
    }

    #[test]
    fn test_infer_defaults_leave_request_open() {
        let cli = Cli::parse_from(["lexikon-reasoner", "infer", "t1"]);
        let Command::Infer(args) = cli.command else {
            panic!("Expected Infer command");
        };

        let request = args.request();
        assert!(request.rules.is_none());
        assert!(request.max_depth.is_none());
        assert!(request.confidence_threshold.is_none());
    }

    #[test]
    fn test_negative_depth_reaches_the_engine() {
        let cli = Cli::parse_from(["lexikon-reasoner", "infer", "t1", "--max-depth", "-1"]);
        let Command::Infer(args) = cli.command else {
            panic!("Expected Infer command");
        };
        assert_eq!(args.request().max_depth, Some(-1));
    }

    #[test]
    fn test_extra_positional_is_rejected() {
        let parsed = Cli::try_parse_from(["lexikon-reasoner", "infer", "t1", "transitive"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_relations_direction() {
        let cli = Cli::parse_from([
            "lexikon-reasoner",
            "--config",
            "reasoner.toml",
            "relations",
            "t1",
            "--direction",
            "both",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("reasoner.toml")));
        let Command::Relations(args) = cli.command else {
            panic!("Expected Relations command");
        };
        assert_eq!(Direction::from(args.direction), Direction::Both);

        let cli = Cli::parse_from(["lexikon-reasoner", "relations", "t1"]);
        let Command::Relations(args) = cli.command else {
            panic!("Expected Relations command");
        };
        assert_eq!(args.direction, DirectionArg::Outgoing);
    }

    #[test]
    fn test_unknown_direction_is_rejected() {
        let parsed =
            Cli::try_parse_from(["lexikon-reasoner", "relations", "t1", "--direction", "up"]);
        assert!(parsed.is_err());
    }
}
