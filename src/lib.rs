//! # hebbian-graph — Adaptive Knowledge Graph with Hebbian Plasticity
//!
//! A single-process fact store whose edge weights adapt to usage:
//! "facts that fire together, wire together."
//!
//! ## Design Principles
//!
//! 1. **Pure model**: `Entity`, `Relation`, `Value` are plain data — no I/O
//! 2. **Silent plasticity**: activation reporting never fails; unknown
//!    labels and missing relations are no-ops, not errors
//! 3. **Deterministic decay**: forgetting is driven by an explicit cycle
//!    clock (`increment_cycle_counters`), not wall time
//! 4. **Single writer**: the core is synchronous; `SharedGraph` is the one
//!    mutual-exclusion boundary for concurrent callers
//!
//! ## Quick Start
//!
//! ```rust
//! use hebbian_graph::{KnowledgeGraph, Query};
//!
//! let mut kg = KnowledgeGraph::new();
//! kg.add_relation("Alice", "works_at", "TechCorp", Default::default());
//!
//! // Per reasoning cycle: advance the decay clock first...
//! kg.increment_cycle_counters();
//!
//! // ...then the collaborator reports which facts it used...
//! kg.activate_relation("Alice", "works_at", "TechCorp");
//! kg.activate_entities(&["Alice", "TechCorp"]);
//!
//! // ...and consolidates once its own validation passed.
//! let report = kg.consolidate_memory();
//! assert_eq!(report.decayed_edge_count, 0);
//!
//! let hits = kg.query(&Query::new().subject("Alice"));
//! assert_eq!(hits.len(), 1);
//! ```
//!
//! ## Lifecycle of a relation
//!
//! | State | Entered by | Leaves via |
//! |-------|-----------|------------|
//! | Dormant | `add_relation` | first `activate_relation` |
//! | Active | activation | idle cycles |
//! | Decaying | `increment_cycle_counters` | reactivation or pruning |
//! | Pruned | `apply_temporal_decay` | — |
//!
//! Dormant relations never decay and are never pruned, so seeded knowledge
//! is not silently lost even below the strength floor.

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod config;
pub mod graph;
pub mod query;
pub mod plasticity;
pub mod codec;
pub mod shared;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{Entity, EntityId, Relation, Value, PropertyMap};

// ============================================================================
// Re-exports: Store, query, plasticity
// ============================================================================

pub use config::HebbianConfig;
pub use graph::{KnowledgeGraph, RelationOpts};
pub use query::Query;
pub use plasticity::{ConsolidationReport, DecayedEdge, EmergentEdge};
pub use shared::SharedGraph;

// ============================================================================
// Error Types
// ============================================================================

/// Errors surfaced by the persistence codec.
///
/// Adaptive-learning conditions (unknown labels, weak edges, nothing to
/// decay) are deliberately not errors — see the crate docs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed graph document — invalid JSON or missing required fields.
    /// Fatal to `load`; callers decide whether to fall back to an empty store.
    #[error("malformed graph document: {0}")]
    Format(String),

    /// Filesystem failure during `save`/`load`. Not retried internally.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// An internal id reference failed to resolve. Unreachable through the
    /// public API; indicates a caller bypassing the contract.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Format(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
