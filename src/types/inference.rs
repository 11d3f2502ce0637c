//! Inference types for the reasoning engine
//!
//! This module contains the request and output structures of the engine.
//! Derived relations are never persisted by the engine itself.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::RelationType;

/// Closure rules known to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Transitive,
    Symmetric,
    Equivalence,
    Inverse,
}

impl RuleKind {
    /// Every rule, in execution order
    pub const ALL: [RuleKind; 4] = [
        RuleKind::Transitive,
        RuleKind::Symmetric,
        RuleKind::Equivalence,
        RuleKind::Inverse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Transitive => "transitive",
            RuleKind::Symmetric => "symmetric",
            RuleKind::Equivalence => "equivalence",
            RuleKind::Inverse => "inverse",
        }
    }

    /// Look up a rule by name; `None` for names the engine does not know
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "transitive" => Some(RuleKind::Transitive),
            "symmetric" => Some(RuleKind::Symmetric),
            "equivalence" => Some(RuleKind::Equivalence),
            "inverse" => Some(RuleKind::Inverse),
            _ => None,
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A relation derived for a seed term, with provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRelation {
    /// Always the seed of the inference call
    #[serde(rename = "sourceTermId")]
    pub source_term_id: String,
    #[serde(rename = "targetTermId")]
    pub target_term_id: String,
    #[serde(rename = "relationType")]
    pub relation_type: RelationType,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f64,
    pub rule: RuleKind,
    /// Number of hops composing the derivation
    pub depth: usize,
    /// Display name of the target, filled in by [`InferResult::resolve_targets`]
    #[serde(
        rename = "targetTermName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub target_term_name: Option<String>,
}

/// Per-call inference parameters
///
/// Every field is optional; the engine fills gaps from its configuration.
/// `max_depth` is signed so that a negative budget coming from a caller can
/// be rejected instead of silently wrapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InferRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<String>>,
    #[serde(rename = "maxDepth", default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<i64>,
    #[serde(
        rename = "confidenceThreshold",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub confidence_threshold: Option<f64>,
}

impl InferRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rules<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules = Some(rules.into_iter().map(Into::into).collect());
        self
    }

    pub fn max_depth(mut self, max_depth: i64) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn confidence_threshold(mut self, threshold: f64) -> Self {
        self.confidence_threshold = Some(threshold);
        self
    }
}

/// Statistics about an inference operation
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InferStats {
    /// Number of vertices expanded across all rules
    #[serde(rename = "nodesVisited")]
    pub nodes_visited: usize,
    /// Candidates produced before deduplication
    #[serde(rename = "candidatesFound")]
    pub candidates_found: usize,
    /// Deepest hop count of any emitted candidate
    #[serde(rename = "maxDepthReached")]
    pub max_depth_reached: usize,
    /// Execution time in milliseconds
    #[serde(rename = "executionTimeMs")]
    pub execution_time_ms: u64,
}

impl InferStats {
    /// Fold another rule's statistics into this one
    pub fn merge(&mut self, other: &InferStats) {
        self.nodes_visited += other.nodes_visited;
        self.candidates_found += other.candidates_found;
        self.max_depth_reached = self.max_depth_reached.max(other.max_depth_reached);
    }
}

/// Result of an inference operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferResult {
    /// The seed term that was analyzed
    #[serde(rename = "termId")]
    pub term_id: String,
    #[serde(rename = "rulesApplied")]
    pub rules_applied: Vec<RuleKind>,
    #[serde(rename = "inferredRelations")]
    pub inferred_relations: Vec<DerivedRelation>,
    #[serde(rename = "totalInferred")]
    pub total_inferred: usize,
    pub stats: InferStats,
}

impl InferResult {
    /// Create an empty inference result
    pub fn new(term_id: impl Into<String>) -> Self {
        Self {
            term_id: term_id.into(),
            rules_applied: Vec::new(),
            inferred_relations: Vec::new(),
            total_inferred: 0,
            stats: InferStats::default(),
        }
    }

    /// Check if any inferences were found
    pub fn has_inferences(&self) -> bool {
        !self.inferred_relations.is_empty()
    }

    /// Get the number of inferred relations
    pub fn count(&self) -> usize {
        self.inferred_relations.len()
    }

    /// Attach target names and drop relations whose target no longer exists
    ///
    /// `lookup` returns the display name of a term, or `None` when the term
    /// is gone from the vocabulary.
    pub fn resolve_targets<F>(mut self, mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        self.inferred_relations.retain_mut(|derived| {
            match lookup(&derived.target_term_id) {
                Some(name) => {
                    derived.target_term_name = Some(name);
                    true
                }
                None => false,
            }
        });
        self.total_inferred = self.inferred_relations.len();
        self
    }
}
