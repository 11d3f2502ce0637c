//! JSON Lines persistence for the reference store
//!
//! One JSON object per line: terms first, then relations. The two record kinds
//! are told apart by shape.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::warn;

use crate::error::StoreResult;
use crate::types::{Relation, Term, TermGraph};
use crate::utils::atomic_write;

/// Load a graph from a JSON Lines file
///
/// A missing file yields an empty graph. Lines that are neither a term nor a
/// relation are skipped with a warning.
pub fn load_jsonl<P: AsRef<Path>>(path: P) -> StoreResult<TermGraph> {
    let path = path.as_ref();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(TermGraph::default()),
        Err(e) => return Err(e.into()),
    };

    let mut graph = TermGraph::default();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Ok(relation) = serde_json::from_str::<Relation>(line) {
            if !relation.source_term_id.is_empty() && !relation.target_term_id.is_empty() {
                graph.relations.push(relation);
                continue;
            }
        }

        if let Ok(term) = serde_json::from_str::<Term>(line) {
            if !term.id.is_empty() {
                graph.terms.push(term);
                continue;
            }
        }

        warn!(
            file = %path.display(),
            line = line_num + 1,
            "Skipping unreadable record"
        );
    }

    Ok(graph)
}

/// Write a graph to a JSON Lines file, replacing it atomically
pub fn persist_jsonl<P: AsRef<Path>>(path: P, graph: &TermGraph) -> StoreResult<()> {
    let mut content = String::new();

    for term in &graph.terms {
        content.push_str(&serde_json::to_string(term)?);
        content.push('\n');
    }

    for relation in &graph.relations {
        content.push_str(&serde_json::to_string(relation)?);
        content.push('\n');
    }

    atomic_write(path, &content)?;
    Ok(())
}
