//! Relation validation
//!
//! Soft validation of relation types and hard validation of confidence values.

mod types;

pub use types::{validate_confidence, validate_relation_type, STANDARD_RELATION_TYPES};
