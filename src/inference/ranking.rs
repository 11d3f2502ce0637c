//! Deduplication and ranking of candidate relations

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::types::{DerivedRelation, RelationType};

/// Collapse candidates sharing `(target, relation type)` and rank the survivors
///
/// The strongest candidate of each group wins; equal confidences fall back to
/// the lexically smaller rule name, then the shallower depth. The result is
/// ordered by confidence descending, then target id, then relation type.
pub fn dedup_and_rank(candidates: Vec<DerivedRelation>) -> Vec<DerivedRelation> {
    let mut best: HashMap<(String, RelationType), DerivedRelation> = HashMap::new();

    for candidate in candidates {
        let key = (
            candidate.target_term_id.clone(),
            candidate.relation_type.clone(),
        );
        match best.entry(key) {
            Entry::Occupied(mut slot) => {
                if outranks(&candidate, slot.get()) {
                    slot.insert(candidate);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
        }
    }

    let mut ranked: Vec<DerivedRelation> = best.into_values().collect();
    ranked.sort_by(rank_order);
    ranked
}

fn outranks(candidate: &DerivedRelation, current: &DerivedRelation) -> bool {
    match candidate.confidence.total_cmp(&current.confidence) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => {
            (candidate.rule.as_str(), candidate.depth) < (current.rule.as_str(), current.depth)
        }
    }
}

fn rank_order(a: &DerivedRelation, b: &DerivedRelation) -> Ordering {
    b.confidence
        .total_cmp(&a.confidence)
        .then_with(|| a.target_term_id.cmp(&b.target_term_id))
        .then_with(|| a.relation_type.as_str().cmp(b.relation_type.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RuleKind;

    fn candidate(
        target: &str,
        relation_type: RelationType,
        confidence: f64,
        rule: RuleKind,
        depth: usize,
    ) -> DerivedRelation {
        DerivedRelation {
            source_term_id: "seed".to_string(),
            target_term_id: target.to_string(),
            relation_type,
            confidence,
            rule,
            depth,
            target_term_name: None,
        }
    }

    #[test]
    fn test_keeps_highest_confidence() {
        let ranked = dedup_and_rank(vec![
            candidate("X", RelationType::Related, 0.6, RuleKind::Transitive, 1),
            candidate("X", RelationType::Related, 0.8, RuleKind::Symmetric, 1),
        ]);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].confidence, 0.8);
        assert_eq!(ranked[0].rule, RuleKind::Symmetric);
    }

    #[test]
    fn test_different_types_are_kept_apart() {
        let ranked = dedup_and_rank(vec![
            candidate("X", RelationType::Related, 0.6, RuleKind::Transitive, 1),
            candidate("X", RelationType::Broader, 0.7, RuleKind::Transitive, 1),
        ]);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].relation_type, RelationType::Broader);
    }

    #[test]
    fn test_ties_break_by_rule_name_then_depth() {
        let ranked = dedup_and_rank(vec![
            candidate("X", RelationType::Equivalent, 0.9, RuleKind::Symmetric, 1),
            candidate("X", RelationType::Equivalent, 0.9, RuleKind::Equivalence, 2),
            candidate("X", RelationType::Equivalent, 0.9, RuleKind::Equivalence, 1),
        ]);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].rule, RuleKind::Equivalence);
        assert_eq!(ranked[0].depth, 1);
    }

    #[test]
    fn test_sorted_by_confidence_then_target() {
        let ranked = dedup_and_rank(vec![
            candidate("B", RelationType::Related, 0.8, RuleKind::Transitive, 1),
            candidate("C", RelationType::Related, 0.95, RuleKind::Transitive, 1),
            candidate("A", RelationType::Related, 0.8, RuleKind::Transitive, 1),
        ]);

        let targets: Vec<&str> = ranked.iter().map(|c| c.target_term_id.as_str()).collect();
        assert_eq!(targets, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(dedup_and_rank(Vec::new()).is_empty());
    }
}
