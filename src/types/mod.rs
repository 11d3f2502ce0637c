//! Data types for the Lexikon reasoner
//!
//! This module contains all the core data structures used throughout the crate.

mod graph;
mod inference;
mod relation;
mod term;

pub use graph::TermGraph;
pub use inference::{DerivedRelation, InferRequest, InferResult, InferStats, RuleKind};
pub use relation::{Direction, NewRelation, Relation, RelationType};
pub use term::Term;

/// Default user for serde deserialization
pub fn default_user() -> String {
    "system".to_string()
}

/// Check if string is empty or "system" (for skip_serializing_if)
pub fn is_default_user(val: &str) -> bool {
    val.is_empty() || val == "system"
}

/// Check if value is zero (for skip_serializing_if)
pub fn is_zero(val: &u64) -> bool {
    *val == 0
}
