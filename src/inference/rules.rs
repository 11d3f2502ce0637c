//! Closure rules
//!
//! Each rule is a pure function of the seed, the store and the budget. Rules
//! never share traversal state: every call builds its own visited map.

use std::collections::HashMap;

use crate::store::RelationStore;
use crate::types::{DerivedRelation, InferStats, RelationType, RuleKind};

/// Per-hop multiplicative decay applied by the recursive rules
pub const CONFIDENCE_DECAY: f64 = 0.9;

/// Traversal budget for one inference call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Budget {
    /// Deepest hop count the recursive rules may emit
    pub max_depth: usize,
    /// Inclusive lower bound on emitted confidence
    pub threshold: f64,
}

/// Candidates and statistics produced by a single rule
#[derive(Debug, Default)]
pub struct RuleOutput {
    pub candidates: Vec<DerivedRelation>,
    pub stats: InferStats,
}

impl RuleOutput {
    fn emit(
        &mut self,
        seed: &str,
        target: &str,
        relation_type: RelationType,
        confidence: f64,
        rule: RuleKind,
        depth: usize,
    ) {
        self.stats.candidates_found += 1;
        self.stats.max_depth_reached = self.stats.max_depth_reached.max(depth);
        self.candidates.push(DerivedRelation {
            source_term_id: seed.to_string(),
            target_term_id: target.to_string(),
            relation_type,
            confidence,
            rule,
            depth,
            target_term_name: None,
        });
    }
}

/// Run one rule for a seed
pub fn apply<S: RelationStore + ?Sized>(
    rule: RuleKind,
    store: &S,
    seed: &str,
    budget: Budget,
) -> Result<RuleOutput, S::Error> {
    match rule {
        RuleKind::Transitive => closure_walk(store, seed, RelationType::TRANSITIVE, rule, budget),
        RuleKind::Equivalence => {
            closure_walk(store, seed, &[RelationType::Equivalent], rule, budget)
        }
        RuleKind::Symmetric => symmetric(store, seed, budget),
        RuleKind::Inverse => inverse(store, seed, budget),
    }
}

/// Stored confidences outside [0, 1] are clamped so decay stays monotonic
fn edge_confidence(confidence: f64) -> f64 {
    confidence.clamp(0.0, 1.0)
}

/// Depth-first closure over outgoing edges of `types`
///
/// The seed sits at depth 1; every edge leaving a vertex at depth `k` is a
/// candidate at depth `k`. Worklist entries are `(vertex, depth, confidence)`.
/// A vertex is expanded again only when reached shallower or with higher
/// confidence than every earlier expansion, so the result does not depend on
/// the order the store returns edges in. The equivalence rule never reports
/// the seed itself.
fn closure_walk<S: RelationStore + ?Sized>(
    store: &S,
    seed: &str,
    types: &[RelationType],
    rule: RuleKind,
    budget: Budget,
) -> Result<RuleOutput, S::Error> {
    let mut output = RuleOutput::default();
    let mut visited: HashMap<String, Vec<(usize, f64)>> = HashMap::new();
    let mut stack: Vec<(String, usize, f64)> = vec![(seed.to_string(), 1, 1.0)];

    while let Some((current, depth, confidence)) = stack.pop() {
        if depth > budget.max_depth || is_dominated(&visited, &current, depth, confidence) {
            continue;
        }
        record_expansion(&mut visited, &current, depth, confidence);
        output.stats.nodes_visited += 1;

        let mut next = Vec::new();
        for relation in store.outgoing_relations(&current, Some(types))? {
            let accumulated = confidence * edge_confidence(relation.confidence) * CONFIDENCE_DECAY;

            // Confidence only decays along a path, so nothing past this edge
            // can clear the threshold either.
            if !(accumulated >= budget.threshold) {
                continue;
            }

            let target = relation.target_term_id;
            if !(rule == RuleKind::Equivalence && target == seed) {
                output.emit(seed, &target, relation.relation_type, accumulated, rule, depth);
            }

            if depth < budget.max_depth
                && !is_dominated(&visited, &target, depth + 1, accumulated)
            {
                next.push((target, depth + 1, accumulated));
            }
        }

        // Reversed so the first edge is explored first
        stack.extend(next.into_iter().rev());
    }

    Ok(output)
}

/// An earlier expansion at no greater depth and no lower confidence covers
/// everything this one could reach
fn is_dominated(
    visited: &HashMap<String, Vec<(usize, f64)>>,
    vertex: &str,
    depth: usize,
    confidence: f64,
) -> bool {
    visited
        .get(vertex)
        .map_or(false, |seen| seen.iter().any(|&(d, c)| d <= depth && c >= confidence))
}

fn record_expansion(
    visited: &mut HashMap<String, Vec<(usize, f64)>>,
    vertex: &str,
    depth: usize,
    confidence: f64,
) {
    let seen = visited.entry(vertex.to_string()).or_default();
    seen.retain(|&(d, c)| !(depth <= d && confidence >= c));
    seen.push((depth, confidence));
}

/// Mirror incoming `equivalent`/`related` edges back to their source
fn symmetric<S: RelationStore + ?Sized>(
    store: &S,
    seed: &str,
    budget: Budget,
) -> Result<RuleOutput, S::Error> {
    let mut output = RuleOutput::default();
    output.stats.nodes_visited = 1;

    for relation in store.incoming_relations(seed, Some(RelationType::SYMMETRIC))? {
        let confidence = edge_confidence(relation.confidence);
        if confidence >= budget.threshold {
            output.emit(
                seed,
                &relation.source_term_id,
                relation.relation_type,
                confidence,
                RuleKind::Symmetric,
                1,
            );
        }
    }

    Ok(output)
}

/// Report incoming directional edges under their inverse type
fn inverse<S: RelationStore + ?Sized>(
    store: &S,
    seed: &str,
    budget: Budget,
) -> Result<RuleOutput, S::Error> {
    let mut output = RuleOutput::default();
    output.stats.nodes_visited = 1;

    for relation in store.incoming_relations(seed, None)? {
        let Some(inverse_type) = relation.relation_type.inverse() else {
            continue;
        };
        let confidence = edge_confidence(relation.confidence);
        if confidence >= budget.threshold {
            output.emit(
                seed,
                &relation.source_term_id,
                inverse_type,
                confidence,
                RuleKind::Inverse,
                1,
            );
        }
    }

    Ok(output)
}
