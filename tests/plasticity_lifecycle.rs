//! End-to-end plasticity lifecycle tests.
//!
//! Each test drives the store the way a reasoning collaborator does:
//! `increment_cycle_counters()` once per cycle, then queries, then
//! activation reports, then (if the cycle validated) `consolidate_memory()`.

use hebbian_graph::{HebbianConfig, KnowledgeGraph, Query, RelationOpts};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn seed_security_graph() -> KnowledgeGraph {
    let mut kg = KnowledgeGraph::new();
    kg.add_relation(
        "System-Alpha",
        "has_vulnerability",
        "CVE-2024-1234",
        RelationOpts::default()
            .subject_kind("Software")
            .object_kind("Vulnerability")
            .confidence(0.5),
    );
    kg.add_relation(
        "System-Alpha",
        "deployed_in",
        "Production",
        RelationOpts::default().subject_kind("Software").confidence(0.9),
    );
    kg
}

// ============================================================================
// 1. Repeated use strengthens a fact, with diminishing returns
// ============================================================================

#[test]
fn test_repeated_activation_diminishing_returns() {
    let mut kg = seed_security_graph();

    let mut strengths = vec![kg.get_edge_strength("System-Alpha", "has_vulnerability", "CVE-2024-1234")];
    for _ in 0..5 {
        kg.activate_relation("System-Alpha", "has_vulnerability", "CVE-2024-1234");
        strengths.push(kg.get_edge_strength("System-Alpha", "has_vulnerability", "CVE-2024-1234"));
    }

    // Non-decreasing and bounded.
    for pair in strengths.windows(2) {
        assert!(pair[1] >= pair[0]);
        assert!(pair[1] <= 1.0);
    }
    // Strictly diminishing increments.
    let first_delta = strengths[1] - strengths[0];
    let last_delta = strengths[5] - strengths[4];
    assert!(last_delta < first_delta);
}

// ============================================================================
// 2. Full collaborator cycle: query → activate → consolidate
// ============================================================================

#[test]
fn test_reasoning_cycle_contract() {
    let mut kg = seed_security_graph();

    for cycle in 0..4 {
        kg.increment_cycle_counters();

        // Collaborator reads facts about System-Alpha...
        let facts = kg.query(&Query::new().subject("System-Alpha"));
        assert_eq!(facts.len(), 2);

        // ...reports the one it used, plus the concepts it touched...
        kg.activate_relation("System-Alpha", "has_vulnerability", "CVE-2024-1234");
        kg.activate_entities(&["System-Alpha", "CVE-2024-1234"]);

        // ...and consolidates only on even cycles (failed validation skips it).
        if cycle % 2 == 0 {
            kg.consolidate_memory();
        }
    }

    // The used fact grew; the dormant one was never touched by decay.
    assert!(kg.get_edge_strength("System-Alpha", "has_vulnerability", "CVE-2024-1234") > 0.5);
    assert_eq!(kg.get_edge_strength("System-Alpha", "deployed_in", "Production"), 0.9);
    // The co-activated pair already had an edge, so no emergent duplicate.
    assert!(kg
        .query(&Query::new().predicate("co_occurs_with"))
        .is_empty());
}

// ============================================================================
// 3. Unused activated facts decay to pruning; dormant facts survive
// ============================================================================

#[test]
fn test_forgetting_and_dormant_exemption() {
    let mut kg = KnowledgeGraph::new();
    kg.add_relation("Old", "fact", "Used", RelationOpts::default().confidence(0.3));
    kg.add_relation("Seed", "fact", "Untouched", RelationOpts::default().confidence(0.05));

    kg.activate_relation("Old", "fact", "Used");
    // 0.3 → 0.37 after one activation; then long inactivity.
    for _ in 0..200 {
        kg.increment_cycle_counters();
        kg.apply_temporal_decay();
    }

    // The activated fact decayed below min_strength and was pruned.
    assert_eq!(kg.get_edge_strength("Old", "fact", "Used"), 0.0);
    // The dormant seed fact is exempt despite confidence below the floor.
    assert_eq!(kg.get_edge_strength("Seed", "fact", "Untouched"), 0.05);
    assert_eq!(kg.relation_count(), 1);
}

// ============================================================================
// 4. Emergence through the consolidation path
// ============================================================================

#[test]
fn test_emergent_edge_via_consolidation() {
    let mut kg = KnowledgeGraph::with_config(HebbianConfig {
        emergence_threshold: 3,
        ..HebbianConfig::default()
    });
    kg.add_relation("Rust", "used_by", "Ferris", RelationOpts::default());
    kg.add_entity("Memory-Safety", "Concept", Default::default());

    for _ in 0..3 {
        kg.increment_cycle_counters();
        kg.activate_entities(&["Rust", "Memory-Safety"]);
    }

    let report = kg.consolidate_memory();
    assert_eq!(report.emergent_edges.len(), 1);
    assert_eq!(report.emergent_edges[0].subject, "Rust");
    assert_eq!(report.emergent_edges[0].object, "Memory-Safety");
    assert!((report.emergent_edges[0].strength - 0.3).abs() < 1e-12);

    // Visible through the public query surface with provenance intact.
    let hits = kg.query(&Query::new().predicate("co_occurs_with"));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].1.source.as_deref(), Some("hebbian_emergence"));
    assert_eq!(hits[0].1.version.as_deref(), Some("emergent"));
}

// ============================================================================
// 5. Strongest-edges ranking
// ============================================================================

#[test]
fn test_strongest_edges_ranking() {
    let mut kg = KnowledgeGraph::new();
    kg.add_relation("A", "p", "B", RelationOpts::default().confidence(0.9));
    kg.add_relation("C", "p", "D", RelationOpts::default().confidence(0.3));
    kg.add_relation("E", "p", "F", RelationOpts::default().confidence(0.7));

    let top = kg.get_strongest_edges(2);
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].3, 0.9);
    assert_eq!(top[1].3, 0.7);
}

// ============================================================================
// 6. Property: strengthening is monotone and bounded for any start/count
// ============================================================================

proptest! {
    #[test]
    fn prop_strengthening_monotone_and_bounded(
        start in 0.0f64..1.0,
        activations in 1usize..60,
    ) {
        let mut kg = KnowledgeGraph::new();
        kg.add_relation("A", "p", "B", RelationOpts::default().confidence(start));

        let mut prev = start;
        for _ in 0..activations {
            kg.activate_relation("A", "p", "B");
            let cur = kg.get_edge_strength("A", "p", "B");
            prop_assert!(cur >= prev);
            prop_assert!(cur <= 1.0);
            prev = cur;
        }
    }
}
