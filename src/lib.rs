//! Lexikon Reasoner
//!
//! Ontology reasoning over a personal vocabulary: terms connected by typed,
//! directed, confidence-weighted relations. The engine derives implicit
//! relations with four closure rules and reports each derivation with a
//! decayed confidence and its provenance.
//!
//! # Features
//!
//! - **Closure rules**: transitive, symmetric, equivalence and inverse
//! - **Bounded traversal**: depth budget and per-rule cycle guards
//! - **Confidence decay**: 0.9 per hop, inclusive threshold filter
//! - **Pluggable store**: anything implementing [`RelationStore`]
//! - **Reference store**: thread-safe, indexed, JSON Lines backed
//!
//! # Modules
//!
//! - `types`: Core data structures (Term, Relation, DerivedRelation)
//! - `store`: Relation store trait and in-memory implementation
//! - `inference`: Reasoning engine, closure rules, ranking
//! - `config`: Engine defaults and limits
//! - `validation`: Relation type and confidence validation
//! - `error`: Error types
//! - `utils`: Timestamps and authorship
//!
//! # Example
//!
//! ```
//! use lexikon_reasoner::{InMemoryStore, InferRequest, NewRelation, ReasoningEngine, Term};
//!
//! let store = InMemoryStore::new();
//! for (id, name) in [("t1", "Animal"), ("t2", "Mammal"), ("t3", "Dog")] {
//!     store.add_term(Term::new(id, name)).unwrap();
//! }
//! store.create_relation(NewRelation::new("t3", "t2", "broader", 1.0)).unwrap();
//! store.create_relation(NewRelation::new("t2", "t1", "broader", 1.0)).unwrap();
//!
//! let engine = ReasoningEngine::new(store);
//! let inferred = engine
//!     .infer("t3", &InferRequest::new().rules(["transitive"]))
//!     .unwrap();
//! assert_eq!(inferred.len(), 2);
//! assert_eq!(inferred[1].target_term_id, "t1");
//! ```

pub mod config;
pub mod error;
pub mod inference;
pub mod store;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export commonly used items at crate root
pub use config::ReasonerConfig;
pub use error::{ConfigError, InferError, StoreError, StoreResult};
pub use inference::ReasoningEngine;
pub use store::{InMemoryStore, RelationStore};
pub use types::{
    DerivedRelation, Direction, InferRequest, InferResult, InferStats, NewRelation, Relation,
    RelationType, RuleKind, Term, TermGraph,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
