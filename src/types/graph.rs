//! Term graph container type

use serde::{Deserialize, Serialize};

use super::{Relation, Term};

/// Snapshot of a vocabulary: terms and the explicit relations between them
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TermGraph {
    #[serde(default)]
    pub terms: Vec<Term>,
    #[serde(default)]
    pub relations: Vec<Relation>,
}

impl TermGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph with terms and relations
    pub fn with_data(terms: Vec<Term>, relations: Vec<Relation>) -> Self {
        Self { terms, relations }
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.relations.is_empty()
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }
}
