//! Reasoning engine
//!
//! Derives implicit relations for a seed term by running the selected closure
//! rules against a [`RelationStore`], then deduplicating and ranking their
//! candidates. Derived relations are returned, never written back.

pub mod ranking;
pub mod rules;

use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::ReasonerConfig;
use crate::error::InferError;
use crate::store::{self, RelationStore};
use crate::types::{
    DerivedRelation, Direction, InferRequest, InferResult, InferStats, Relation, RuleKind,
};

pub use ranking::dedup_and_rank;
pub use rules::{Budget, RuleOutput, CONFIDENCE_DECAY};

/// Caller-owned reasoning engine over an injected store
///
/// The engine keeps no state between calls, so one instance can serve
/// concurrent requests as long as the store allows concurrent reads.
pub struct ReasoningEngine<S> {
    store: S,
    config: ReasonerConfig,
}

impl<S: RelationStore> ReasoningEngine<S> {
    /// Create an engine with the default configuration
    pub fn new(store: S) -> Self {
        Self::with_config(store, ReasonerConfig::default())
    }

    pub fn with_config(store: S, config: ReasonerConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ReasonerConfig {
        &self.config
    }

    /// Infer relations for `seed`, ranked by confidence descending
    ///
    /// An unknown seed yields an empty list.
    pub fn infer(
        &self,
        seed: &str,
        request: &InferRequest,
    ) -> Result<Vec<DerivedRelation>, InferError<S::Error>> {
        Ok(self.infer_with_stats(seed, request)?.inferred_relations)
    }

    /// Like [`infer`](Self::infer), with the applied rules and traversal statistics
    pub fn infer_with_stats(
        &self,
        seed: &str,
        request: &InferRequest,
    ) -> Result<InferResult, InferError<S::Error>> {
        let start_time = Instant::now();
        let budget = self.resolve_budget(request)?;
        let selected = select_rules(request.rules.as_deref());

        let mut result = InferResult::new(seed);
        result.rules_applied = selected.clone();

        if !self.store.contains_term(seed).map_err(InferError::Store)? {
            debug!(term = seed, "Seed term not in store, nothing to infer");
            return Ok(result);
        }

        let mut candidates = Vec::new();
        let mut stats = InferStats::default();
        for rule in selected {
            let output =
                rules::apply(rule, &self.store, seed, budget).map_err(InferError::Store)?;
            debug!(
                term = seed,
                rule = %rule,
                candidates = output.candidates.len(),
                nodes_visited = output.stats.nodes_visited,
                "Rule finished"
            );
            stats.merge(&output.stats);
            candidates.extend(output.candidates);
        }

        result.inferred_relations = dedup_and_rank(candidates);
        result.total_inferred = result.inferred_relations.len();
        stats.execution_time_ms = start_time.elapsed().as_millis() as u64;
        result.stats = stats;

        info!(
            term = seed,
            inferred = result.total_inferred,
            candidates = result.stats.candidates_found,
            elapsed_ms = result.stats.execution_time_ms,
            "Inference completed"
        );
        Ok(result)
    }

    /// Run independent inferences for several seeds in parallel
    ///
    /// Results come back in the order of `seeds`.
    pub fn infer_batch<T>(
        &self,
        seeds: &[T],
        request: &InferRequest,
    ) -> Vec<Result<Vec<DerivedRelation>, InferError<S::Error>>>
    where
        T: AsRef<str> + Sync,
        S: Sync,
    {
        seeds
            .par_iter()
            .map(|seed| self.infer(seed.as_ref(), request))
            .collect()
    }

    /// Explicit relations of a term, without running any rule
    pub fn relations_of(
        &self,
        term_id: &str,
        direction: Direction,
    ) -> Result<Vec<Relation>, S::Error> {
        store::relations_of(&self.store, term_id, direction)
    }

    /// Validate the request against the configured limits
    fn resolve_budget(&self, request: &InferRequest) -> Result<Budget, InferError<S::Error>> {
        let max_depth = request
            .max_depth
            .unwrap_or(self.config.default_max_depth as i64);
        if max_depth < 0 {
            return Err(InferError::InvalidArgument(format!(
                "maxDepth must not be negative, got {}",
                max_depth
            )));
        }
        if max_depth as u64 > self.config.max_depth_limit as u64 {
            return Err(InferError::InvalidArgument(format!(
                "maxDepth {} exceeds the limit of {}",
                max_depth, self.config.max_depth_limit
            )));
        }

        let threshold = request
            .confidence_threshold
            .unwrap_or(self.config.default_confidence_threshold);
        if !(0.0..=1.0).contains(&threshold) {
            return Err(InferError::InvalidArgument(format!(
                "confidenceThreshold must be within [0, 1], got {}",
                threshold
            )));
        }

        Ok(Budget {
            max_depth: max_depth as usize,
            threshold,
        })
    }
}

/// Resolve rule names to rules, all rules when none are named
///
/// Unknown names are dropped; repeated names run once.
pub fn select_rules(names: Option<&[String]>) -> Vec<RuleKind> {
    let names = match names {
        Some(names) if !names.is_empty() => names,
        _ => return RuleKind::ALL.to_vec(),
    };

    let mut selected = Vec::new();
    for name in names {
        match RuleKind::from_name(name) {
            Some(rule) if !selected.contains(&rule) => selected.push(rule),
            Some(_) => {}
            None => debug!(rule = %name, "Ignoring unknown rule"),
        }
    }
    selected
}
