//! Relation store
//!
//! The reasoning engine reads the graph only through [`RelationStore`]. The
//! crate ships [`InMemoryStore`] as a reference implementation with JSON
//! Lines persistence; [`TermGraph`] snapshots implement the trait too.

mod memory;
mod persistence;

use std::convert::Infallible;
use std::sync::Arc;

use crate::types::{Direction, Relation, RelationType, TermGraph};

pub use memory::InMemoryStore;
pub use persistence::{load_jsonl, persist_jsonl};

/// Read access to stored relations
///
/// Implementations must give read consistency for the duration of a single
/// inference call; the engine never writes through this trait.
pub trait RelationStore {
    /// Error type for store operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// All stored edges with `source_term_id == term_id`, optionally filtered by type
    fn outgoing_relations(
        &self,
        term_id: &str,
        types: Option<&[RelationType]>,
    ) -> Result<Vec<Relation>, Self::Error>;

    /// All stored edges with `target_term_id == term_id`, optionally filtered by type
    fn incoming_relations(
        &self,
        term_id: &str,
        types: Option<&[RelationType]>,
    ) -> Result<Vec<Relation>, Self::Error>;

    /// Whether the term exists at all
    ///
    /// Stores that cannot answer cheaply keep the default; an absent seed
    /// then simply has no edges.
    fn contains_term(&self, _term_id: &str) -> Result<bool, Self::Error> {
        Ok(true)
    }
}

impl<S: RelationStore + ?Sized> RelationStore for &S {
    type Error = S::Error;

    fn outgoing_relations(
        &self,
        term_id: &str,
        types: Option<&[RelationType]>,
    ) -> Result<Vec<Relation>, Self::Error> {
        (**self).outgoing_relations(term_id, types)
    }

    fn incoming_relations(
        &self,
        term_id: &str,
        types: Option<&[RelationType]>,
    ) -> Result<Vec<Relation>, Self::Error> {
        (**self).incoming_relations(term_id, types)
    }

    fn contains_term(&self, term_id: &str) -> Result<bool, Self::Error> {
        (**self).contains_term(term_id)
    }
}

impl<S: RelationStore + ?Sized> RelationStore for Arc<S> {
    type Error = S::Error;

    fn outgoing_relations(
        &self,
        term_id: &str,
        types: Option<&[RelationType]>,
    ) -> Result<Vec<Relation>, Self::Error> {
        (**self).outgoing_relations(term_id, types)
    }

    fn incoming_relations(
        &self,
        term_id: &str,
        types: Option<&[RelationType]>,
    ) -> Result<Vec<Relation>, Self::Error> {
        (**self).incoming_relations(term_id, types)
    }

    fn contains_term(&self, term_id: &str) -> Result<bool, Self::Error> {
        (**self).contains_term(term_id)
    }
}

/// Linear-scan store over a snapshot
impl RelationStore for TermGraph {
    type Error = Infallible;

    fn outgoing_relations(
        &self,
        term_id: &str,
        types: Option<&[RelationType]>,
    ) -> Result<Vec<Relation>, Self::Error> {
        Ok(self
            .relations
            .iter()
            .filter(|r| r.source_term_id == term_id && type_matches(r, types))
            .cloned()
            .collect())
    }

    fn incoming_relations(
        &self,
        term_id: &str,
        types: Option<&[RelationType]>,
    ) -> Result<Vec<Relation>, Self::Error> {
        Ok(self
            .relations
            .iter()
            .filter(|r| r.target_term_id == term_id && type_matches(r, types))
            .cloned()
            .collect())
    }

    fn contains_term(&self, term_id: &str) -> Result<bool, Self::Error> {
        Ok(self.terms.iter().any(|t| t.id == term_id))
    }
}

/// Raw explicit-edge view of a term, without inference
///
/// With [`Direction::Both`] a self-loop is reported once per side.
pub fn relations_of<S: RelationStore + ?Sized>(
    store: &S,
    term_id: &str,
    direction: Direction,
) -> Result<Vec<Relation>, S::Error> {
    match direction {
        Direction::Outgoing => store.outgoing_relations(term_id, None),
        Direction::Incoming => store.incoming_relations(term_id, None),
        Direction::Both => {
            let mut relations = store.outgoing_relations(term_id, None)?;
            relations.extend(store.incoming_relations(term_id, None)?);
            Ok(relations)
        }
    }
}

pub(crate) fn type_matches(relation: &Relation, types: Option<&[RelationType]>) -> bool {
    types.map_or(true, |types| types.contains(&relation.relation_type))
}
