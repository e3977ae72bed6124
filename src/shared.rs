//! Thread-safe handle around a [`KnowledgeGraph`].
//!
//! The core store assumes single-writer-per-cycle discipline and carries no
//! internal locking. `SharedGraph` is the one mutual-exclusion boundary for
//! processes with concurrent callers: queries take the read lock and may
//! run concurrently with each other, every plasticity call takes the write
//! lock.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::HebbianConfig;
use crate::graph::KnowledgeGraph;

/// Cloneable shared handle. All clones refer to the same store.
#[derive(Clone)]
pub struct SharedGraph {
    inner: Arc<RwLock<KnowledgeGraph>>,
}

impl SharedGraph {
    pub fn new() -> Self {
        Self::from_graph(KnowledgeGraph::new())
    }

    pub fn with_config(config: HebbianConfig) -> Self {
        Self::from_graph(KnowledgeGraph::with_config(config))
    }

    /// Wrap an existing store, e.g. one populated via [`KnowledgeGraph::load`].
    pub fn from_graph(graph: KnowledgeGraph) -> Self {
        Self { inner: Arc::new(RwLock::new(graph)) }
    }

    /// Shared read access for the query surface.
    pub fn read(&self) -> RwLockReadGuard<'_, KnowledgeGraph> {
        self.inner.read()
    }

    /// Exclusive access for mutation (insertion, activation, consolidation,
    /// load). Held for the duration of the guard — keep the critical
    /// section to one collaborator step.
    pub fn write(&self) -> RwLockWriteGuard<'_, KnowledgeGraph> {
        self.inner.write()
    }
}

impl Default for SharedGraph {
    fn default() -> Self {
        Self::new()
    }
}
