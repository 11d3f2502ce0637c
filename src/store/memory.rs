//! In-memory relation store
//!
//! Terms and relations live behind a single reader/writer lock, with
//! per-term source and target indices rebuilt on deletion. A store opened on
//! a file persists after every mutation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::types::{NewRelation, Relation, RelationType, Term, TermGraph};
use crate::utils::{current_timestamp, get_current_user};
use crate::validation::{validate_confidence, validate_relation_type};

use super::{load_jsonl, persist_jsonl, type_matches, RelationStore};

#[derive(Default)]
struct StoreState {
    terms: Vec<Term>,
    term_index: HashMap<String, usize>,
    relations: Vec<Relation>,
    by_source: HashMap<String, Vec<usize>>,
    by_target: HashMap<String, Vec<usize>>,
}

impl StoreState {
    fn from_graph(graph: TermGraph) -> Self {
        let mut state = StoreState::default();
        for term in graph.terms {
            state.push_term(term);
        }
        state.relations = graph.relations;
        state.reindex_relations();
        state
    }

    fn push_term(&mut self, term: Term) {
        if self.term_index.contains_key(&term.id) {
            return;
        }
        self.term_index.insert(term.id.clone(), self.terms.len());
        self.terms.push(term);
    }

    fn push_relation(&mut self, relation: Relation) {
        let idx = self.relations.len();
        self.by_source
            .entry(relation.source_term_id.clone())
            .or_default()
            .push(idx);
        self.by_target
            .entry(relation.target_term_id.clone())
            .or_default()
            .push(idx);
        self.relations.push(relation);
    }

    fn reindex_relations(&mut self) {
        self.by_source.clear();
        self.by_target.clear();
        for (idx, relation) in self.relations.iter().enumerate() {
            self.by_source
                .entry(relation.source_term_id.clone())
                .or_default()
                .push(idx);
            self.by_target
                .entry(relation.target_term_id.clone())
                .or_default()
                .push(idx);
        }
    }

    fn collect(
        &self,
        index: &HashMap<String, Vec<usize>>,
        term_id: &str,
        types: Option<&[RelationType]>,
    ) -> Vec<Relation> {
        index
            .get(term_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&idx| &self.relations[idx])
            .filter(|r| type_matches(r, types))
            .cloned()
            .collect()
    }

    fn snapshot(&self) -> TermGraph {
        TermGraph::with_data(self.terms.clone(), self.relations.clone())
    }
}

/// Thread-safe in-memory vocabulary store
pub struct InMemoryStore {
    file_path: Option<PathBuf>,
    state: RwLock<StoreState>,
    current_user: String,
}

impl InMemoryStore {
    /// Create an empty store without a backing file
    pub fn new() -> Self {
        Self::from_graph(TermGraph::default())
    }

    /// Create a store from a snapshot, without a backing file
    pub fn from_graph(graph: TermGraph) -> Self {
        Self {
            file_path: None,
            state: RwLock::new(StoreState::from_graph(graph)),
            current_user: get_current_user(),
        }
    }

    /// Open a store backed by a JSON Lines file (created on first write)
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let graph = load_jsonl(&path)?;
        debug!(
            file = %path.display(),
            terms = graph.term_count(),
            relations = graph.relation_count(),
            "Loaded relation store"
        );

        Ok(Self {
            file_path: Some(path),
            state: RwLock::new(StoreState::from_graph(graph)),
            current_user: get_current_user(),
        })
    }

    /// Author recorded on relations created without one
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.current_user = user.into();
        self
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn current_user(&self) -> &str {
        &self.current_user
    }

    /// Add a term; an existing id keeps the stored term
    pub fn add_term(&self, mut term: Term) -> StoreResult<Term> {
        let mut state = self.state.write();
        if let Some(&idx) = state.term_index.get(&term.id) {
            return Ok(state.terms[idx].clone());
        }

        if term.created_by.is_empty() || term.created_by == "system" {
            term.created_by = self.current_user.clone();
        }
        if term.created_at == 0 {
            term.created_at = current_timestamp();
        }
        state.push_term(term.clone());

        self.persist(&state)?;
        Ok(term)
    }

    pub fn get_term(&self, term_id: &str) -> Option<Term> {
        let state = self.state.read();
        state
            .term_index
            .get(term_id)
            .map(|&idx| state.terms[idx].clone())
    }

    pub fn terms(&self) -> Vec<Term> {
        self.state.read().terms.clone()
    }

    /// Create a relation between two existing terms
    ///
    /// If `(source, target, type)` is already stored, the stored relation is
    /// returned unchanged.
    pub fn create_relation(&self, request: NewRelation) -> StoreResult<Relation> {
        validate_confidence(request.confidence).map_err(StoreError::InvalidRelation)?;

        let mut state = self.state.write();
        for term_id in [&request.source_term_id, &request.target_term_id] {
            if !state.term_index.contains_key(term_id) {
                return Err(StoreError::TermNotFound(term_id.clone()));
            }
        }

        if let Some(existing) = state.relations.iter().find(|r| {
            r.unique_key()
                == (
                    request.source_term_id.as_str(),
                    request.target_term_id.as_str(),
                    &request.relation_type,
                )
        }) {
            debug!(relation_id = %existing.id, "Relation already exists");
            return Ok(existing.clone());
        }

        if let Some(warning) = validate_relation_type(&request.relation_type) {
            warn!("{}", warning);
        }

        let created_by = if request.created_by.is_empty() {
            self.current_user.clone()
        } else {
            request.created_by
        };
        let relation = Relation {
            id: Uuid::new_v4().to_string(),
            source_term_id: request.source_term_id,
            target_term_id: request.target_term_id,
            relation_type: request.relation_type,
            confidence: request.confidence,
            created_by,
            created_at: current_timestamp(),
            metadata: request.metadata,
        };
        state.push_relation(relation.clone());

        self.persist(&state)?;
        debug!(
            relation_id = %relation.id,
            "Created relation {} --[{}]-> {}",
            relation.source_term_id,
            relation.relation_type,
            relation.target_term_id
        );
        Ok(relation)
    }

    /// Insert a relation as-is, bypassing uniqueness and endpoint checks
    ///
    /// Used to load foreign data and to model stores holding duplicate edges.
    pub fn insert_relation_unchecked(&self, relation: Relation) -> StoreResult<()> {
        let mut state = self.state.write();
        state.push_relation(relation);
        self.persist(&state)
    }

    /// Delete a relation by id, returning it
    pub fn delete_relation(&self, relation_id: &str) -> StoreResult<Relation> {
        let mut state = self.state.write();
        let position = state
            .relations
            .iter()
            .position(|r| r.id == relation_id)
            .ok_or_else(|| StoreError::RelationNotFound(relation_id.to_string()))?;

        let removed = state.relations.remove(position);
        state.reindex_relations();

        self.persist(&state)?;
        Ok(removed)
    }

    /// Clone of the current contents
    pub fn snapshot(&self) -> TermGraph {
        self.state.read().snapshot()
    }

    pub fn term_count(&self) -> usize {
        self.state.read().terms.len()
    }

    pub fn relation_count(&self) -> usize {
        self.state.read().relations.len()
    }

    /// Write the current contents to the backing file, if any
    pub fn flush(&self) -> StoreResult<()> {
        let state = self.state.read();
        self.persist(&state)
    }

    /// Expects the caller to hold the lock
    fn persist(&self, state: &StoreState) -> StoreResult<()> {
        match &self.file_path {
            Some(path) => persist_jsonl(path, &state.snapshot()),
            None => Ok(()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RelationStore for InMemoryStore {
    type Error = StoreError;

    fn outgoing_relations(
        &self,
        term_id: &str,
        types: Option<&[RelationType]>,
    ) -> Result<Vec<Relation>, Self::Error> {
        let state = self.state.read();
        Ok(state.collect(&state.by_source, term_id, types))
    }

    fn incoming_relations(
        &self,
        term_id: &str,
        types: Option<&[RelationType]>,
    ) -> Result<Vec<Relation>, Self::Error> {
        let state = self.state.read();
        Ok(state.collect(&state.by_target, term_id, types))
    }

    fn contains_term(&self, term_id: &str) -> Result<bool, Self::Error> {
        Ok(self.state.read().term_index.contains_key(term_id))
    }
}
