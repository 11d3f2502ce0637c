//! Integration tests for the Lexikon reasoner

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use lexikon_reasoner::{
    DerivedRelation, Direction, InMemoryStore, InferError, InferRequest, NewRelation,
    ReasonerConfig, ReasoningEngine, Relation, RelationStore, RelationType, RuleKind, Term,
};

const EPS: f64 = 1e-9;

fn store_with(terms: &[&str], edges: &[(&str, &str, &str, f64)]) -> InMemoryStore {
    let store = InMemoryStore::new().with_user("tester");
    for id in terms {
        store.add_term(Term::new(*id, format!("term {}", id))).unwrap();
    }
    for (from, to, relation_type, confidence) in edges {
        store
            .create_relation(NewRelation::new(*from, *to, *relation_type, *confidence))
            .unwrap();
    }
    store
}

fn find<'a>(
    inferred: &'a [DerivedRelation],
    target: &str,
    relation_type: RelationType,
) -> Option<&'a DerivedRelation> {
    inferred
        .iter()
        .find(|d| d.target_term_id == target && d.relation_type == relation_type)
}

#[test]
fn test_transitive_broader_chain() {
    let store = store_with(
        &["A", "B", "C"],
        &[("A", "B", "broader", 0.9), ("B", "C", "broader", 0.9)],
    );
    let engine = ReasoningEngine::new(store);

    let request = InferRequest::new()
        .rules(["transitive"])
        .max_depth(3)
        .confidence_threshold(0.5);
    let inferred = engine.infer("A", &request).unwrap();

    assert_eq!(inferred.len(), 2);
    let ab = find(&inferred, "B", RelationType::Broader).unwrap();
    assert!((ab.confidence - 0.81).abs() < EPS);
    assert_eq!(ab.depth, 1);
    assert_eq!(ab.source_term_id, "A");

    let ac = find(&inferred, "C", RelationType::Broader).unwrap();
    assert!((ac.confidence - 0.6561).abs() < EPS);
    assert_eq!(ac.depth, 2);
    assert_eq!(ac.rule, RuleKind::Transitive);

    assert!(inferred.iter().all(|d| d.depth < 3));
}

#[test]
fn test_symmetric_mirror() {
    let store = store_with(&["A", "B"], &[("A", "B", "equivalent", 0.8)]);
    let engine = ReasoningEngine::new(store);

    let inferred = engine
        .infer("B", &InferRequest::new().rules(["symmetric"]))
        .unwrap();

    assert_eq!(
        inferred,
        vec![DerivedRelation {
            source_term_id: "B".to_string(),
            target_term_id: "A".to_string(),
            relation_type: RelationType::Equivalent,
            confidence: 0.8,
            rule: RuleKind::Symmetric,
            depth: 1,
            target_term_name: None,
        }]
    );
}

#[test]
fn test_inverse_round_trip() {
    let store = store_with(
        &["A", "B", "C"],
        &[("A", "B", "broader", 0.9), ("C", "B", "part_of", 0.85)],
    );
    let engine = ReasoningEngine::new(store);

    let inferred = engine
        .infer("B", &InferRequest::new().rules(["inverse"]))
        .unwrap();

    let narrower = find(&inferred, "A", RelationType::Narrower).unwrap();
    assert_eq!(narrower.confidence, 0.9);
    assert_eq!(narrower.rule, RuleKind::Inverse);
    assert_eq!(narrower.depth, 1);

    let has_part = find(&inferred, "C", RelationType::HasPart).unwrap();
    assert_eq!(has_part.confidence, 0.85);
}

#[test]
fn test_equivalence_excludes_seed() {
    let store = store_with(
        &["A", "B", "C"],
        &[
            ("A", "B", "equivalent", 1.0),
            ("B", "C", "equivalent", 1.0),
            ("C", "A", "equivalent", 1.0),
        ],
    );
    let engine = ReasoningEngine::new(store);

    let request = InferRequest::new()
        .rules(["equivalence"])
        .confidence_threshold(0.0)
        .max_depth(5);
    let inferred = engine.infer("A", &request).unwrap();

    assert!(inferred.iter().all(|d| d.target_term_id != "A"));
    assert_eq!(inferred.len(), 2);
}

#[test]
fn test_threshold_is_hard_filter_for_all_rules() {
    let store = store_with(
        &["A", "B", "C", "D", "E"],
        &[
            ("A", "B", "related", 0.95),
            ("B", "C", "related", 0.9),
            ("C", "D", "broader", 0.8),
            ("E", "A", "broader", 0.7),
            ("D", "A", "equivalent", 0.76),
            ("A", "E", "equivalent", 0.99),
        ],
    );
    let engine = ReasoningEngine::new(store);

    for threshold in [0.0, 0.5, 0.7, 0.75, 0.8, 0.9, 1.0] {
        let request = InferRequest::new().confidence_threshold(threshold).max_depth(4);
        let inferred = engine.infer("A", &request).unwrap();
        assert!(
            inferred.iter().all(|d| d.confidence >= threshold),
            "threshold {} violated",
            threshold
        );
        assert!(inferred.iter().all(|d| d.confidence <= 1.0));
    }
}

#[test]
fn test_dedup_keeps_max_across_rules() {
    // Transitive derives (A, X, related) at 0.6 * 0.9 = 0.54 on a direct edge,
    // symmetric mirrors X --related(0.8)--> A unchanged.
    let store = store_with(
        &["A", "X"],
        &[("A", "X", "related", 0.6), ("X", "A", "related", 0.8)],
    );
    let engine = ReasoningEngine::new(store);

    let request = InferRequest::new()
        .rules(["transitive", "symmetric"])
        .confidence_threshold(0.0)
        .max_depth(1);
    let inferred = engine.infer("A", &request).unwrap();

    let related: Vec<_> = inferred
        .iter()
        .filter(|d| d.target_term_id == "X" && d.relation_type == RelationType::Related)
        .collect();
    assert_eq!(related.len(), 1);
    assert_eq!(related[0].confidence, 0.8);
    assert_eq!(related[0].rule, RuleKind::Symmetric);
}

#[test]
fn test_results_sorted_descending() {
    let store = store_with(
        &["A", "B", "C", "D"],
        &[
            ("A", "B", "broader", 1.0),
            ("B", "C", "broader", 1.0),
            ("C", "D", "broader", 1.0),
            ("D", "A", "narrower", 0.77),
        ],
    );
    let engine = ReasoningEngine::new(store);

    let inferred = engine
        .infer("A", &InferRequest::new().confidence_threshold(0.0))
        .unwrap();
    assert!(inferred.len() >= 3);
    for pair in inferred.windows(2) {
        assert!(pair[0].confidence >= pair[1].confidence);
    }
}

#[test]
fn test_absent_seed_and_unknown_rules() {
    let store = store_with(&["A", "B"], &[("A", "B", "broader", 1.0)]);
    let engine = ReasoningEngine::new(store);

    assert!(engine.infer("Z", &InferRequest::new()).unwrap().is_empty());

    let inferred = engine
        .infer("A", &InferRequest::new().rules(["transitive", "hierarchy"]))
        .unwrap();
    assert_eq!(inferred.len(), 1);

    let none = engine
        .infer("A", &InferRequest::new().rules(["hierarchy"]))
        .unwrap();
    assert!(none.is_empty());
}

#[test]
fn test_rule_order_does_not_change_results() {
    let store = store_with(
        &["A", "B", "C"],
        &[
            ("A", "B", "equivalent", 1.0),
            ("B", "C", "equivalent", 1.0),
            ("B", "C", "related", 1.0),
        ],
    );
    let engine = ReasoningEngine::new(store);

    let forward = engine
        .infer(
            "A",
            &InferRequest::new().rules(["transitive", "equivalence"]),
        )
        .unwrap();
    let backward = engine
        .infer(
            "A",
            &InferRequest::new().rules(["equivalence", "transitive"]),
        )
        .unwrap();

    assert_eq!(forward, backward);
    assert!(find(&forward, "C", RelationType::Equivalent).is_some());
}

#[test]
fn test_edge_storage_order_does_not_change_results() {
    let forward = store_with(
        &["A", "B", "C", "D"],
        &[
            ("A", "B", "broader", 1.0),
            ("A", "C", "broader", 1.0),
            ("B", "C", "broader", 1.0),
            ("C", "D", "broader", 1.0),
        ],
    );
    let swapped = store_with(
        &["A", "B", "C", "D"],
        &[
            ("A", "C", "broader", 1.0),
            ("A", "B", "broader", 1.0),
            ("B", "C", "broader", 1.0),
            ("C", "D", "broader", 1.0),
        ],
    );
    let request = InferRequest::new()
        .rules(["transitive"])
        .max_depth(3)
        .confidence_threshold(0.75);

    let a = ReasoningEngine::new(forward).infer("A", &request).unwrap();
    let b = ReasoningEngine::new(swapped).infer("A", &request).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.len(), 3);
    let ad = find(&a, "D", RelationType::Broader).unwrap();
    assert!((ad.confidence - 0.81).abs() < EPS);
    assert_eq!(ad.depth, 2);
}

#[test]
fn test_duplicate_stored_edges_collapse_in_output() {
    let store = store_with(&["A", "B"], &[]);
    store
        .insert_relation_unchecked(Relation::new("r1", "A", "B", "broader", 0.85))
        .unwrap();
    store
        .insert_relation_unchecked(Relation::new("r2", "A", "B", "broader", 0.95))
        .unwrap();
    let engine = ReasoningEngine::new(store);

    let inferred = engine
        .infer("B", &InferRequest::new().rules(["inverse"]))
        .unwrap();
    assert_eq!(inferred.len(), 1);
    assert_eq!(inferred[0].confidence, 0.95);
}

#[test]
fn test_invalid_arguments_rejected() {
    let engine = ReasoningEngine::new(store_with(&["A"], &[]));

    assert!(matches!(
        engine.infer("A", &InferRequest::new().max_depth(-1)),
        Err(InferError::InvalidArgument(_))
    ));
    assert!(matches!(
        engine.infer("A", &InferRequest::new().confidence_threshold(1.01)),
        Err(InferError::InvalidArgument(_))
    ));
}

#[test]
fn test_configured_defaults_apply() {
    let store = store_with(
        &["A", "B", "C"],
        &[("A", "B", "broader", 0.9), ("B", "C", "broader", 0.9)],
    );
    let config = ReasonerConfig {
        default_max_depth: 1,
        default_confidence_threshold: 0.5,
        ..ReasonerConfig::default()
    };
    let engine = ReasoningEngine::with_config(store, config);

    let inferred = engine
        .infer("A", &InferRequest::new().rules(["transitive"]))
        .unwrap();
    assert_eq!(inferred.len(), 1);
    assert_eq!(inferred[0].target_term_id, "B");
}

#[test]
fn test_relations_of_passthrough() {
    let store = store_with(
        &["A", "B", "C"],
        &[("A", "B", "broader", 0.9), ("C", "A", "related", 0.6)],
    );
    let engine = ReasoningEngine::new(store);

    assert_eq!(engine.relations_of("A", Direction::Outgoing).unwrap().len(), 1);
    assert_eq!(engine.relations_of("A", Direction::Incoming).unwrap().len(), 1);
    assert_eq!(engine.relations_of("A", Direction::Both).unwrap().len(), 2);
}

#[test]
fn test_infer_with_stats_reports_provenance() {
    let store = store_with(
        &["A", "B", "C"],
        &[("A", "B", "broader", 1.0), ("B", "C", "broader", 1.0)],
    );
    let engine = ReasoningEngine::new(store);

    let result = engine
        .infer_with_stats("A", &InferRequest::new().rules(["transitive"]))
        .unwrap();
    assert_eq!(result.term_id, "A");
    assert_eq!(result.rules_applied, vec![RuleKind::Transitive]);
    assert_eq!(result.total_inferred, 2);
    assert_eq!(result.stats.nodes_visited, 3);
    assert_eq!(result.stats.max_depth_reached, 2);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["inferredRelations"][0]["targetTermId"], "B");
    assert_eq!(json["inferredRelations"][0]["rule"], "transitive");
    assert_eq!(json["rulesApplied"][0], "transitive");
}

#[test]
fn test_concurrent_inference_shares_engine() {
    let store = store_with(
        &["A", "B", "C", "D"],
        &[
            ("A", "B", "broader", 1.0),
            ("B", "C", "broader", 1.0),
            ("C", "D", "broader", 1.0),
        ],
    );
    let engine = Arc::new(ReasoningEngine::new(store));

    let handles: Vec<_> = ["A", "B", "C", "D"]
        .into_iter()
        .map(|seed| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                engine
                    .infer(seed, &InferRequest::new().confidence_threshold(0.0))
                    .unwrap()
                    .len()
            })
        })
        .collect();

    let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    // A: B, C, D; B: C, D, narrower A; C: D, narrower B; D: narrower C
    assert_eq!(counts, vec![3, 3, 2, 1]);

    let batch = engine.infer_batch(
        &["A", "B", "C", "D"],
        &InferRequest::new().confidence_threshold(0.0),
    );
    let batch_counts: Vec<usize> = batch.into_iter().map(|r| r.unwrap().len()).collect();
    assert_eq!(batch_counts, counts);
}

#[test]
fn test_file_backed_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vocab.jsonl");

    {
        let store = InMemoryStore::open(&path).unwrap();
        store.add_term(Term::new("A", "alpha")).unwrap();
        store.add_term(Term::new("B", "beta")).unwrap();
        store
            .create_relation(NewRelation::new("A", "B", "broader", 0.9))
            .unwrap();
    }

    let engine = ReasoningEngine::new(InMemoryStore::open(&path).unwrap());
    let inferred = engine
        .infer("B", &InferRequest::new().rules(["inverse"]))
        .unwrap();
    assert_eq!(inferred.len(), 1);
    assert_eq!(inferred[0].relation_type, RelationType::Narrower);
}

/// Store whose reads fail after a number of successful calls
struct FlakyStore {
    inner: InMemoryStore,
    remaining: AtomicUsize,
}

#[derive(Debug)]
struct Unavailable;

impl std::fmt::Display for Unavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "store unavailable")
    }
}

impl std::error::Error for Unavailable {}

impl FlakyStore {
    fn take(&self) -> Result<(), Unavailable> {
        self.remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .map(|_| ())
            .map_err(|_| Unavailable)
    }
}

impl RelationStore for FlakyStore {
    type Error = Unavailable;

    fn outgoing_relations(
        &self,
        term_id: &str,
        types: Option<&[RelationType]>,
    ) -> Result<Vec<Relation>, Self::Error> {
        self.take()?;
        Ok(self.inner.outgoing_relations(term_id, types).unwrap())
    }

    fn incoming_relations(
        &self,
        term_id: &str,
        types: Option<&[RelationType]>,
    ) -> Result<Vec<Relation>, Self::Error> {
        self.take()?;
        Ok(self.inner.incoming_relations(term_id, types).unwrap())
    }
}

#[test]
fn test_store_failure_propagates() {
    let inner = store_with(
        &["A", "B", "C"],
        &[("A", "B", "broader", 1.0), ("B", "C", "broader", 1.0)],
    );
    let engine = ReasoningEngine::new(FlakyStore {
        inner,
        remaining: AtomicUsize::new(1),
    });

    let result = engine.infer("A", &InferRequest::new().rules(["transitive"]));
    match result {
        Err(InferError::Store(Unavailable)) => {}
        other => panic!("expected store error, got {:?}", other),
    }
}
