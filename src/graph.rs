//! In-memory entity and relation store.
//!
//! The store is synchronous and single-writer: one collaborator sequence
//! (read facts → report activations → consolidate) runs against a given
//! instance at a time. Wrap in [`SharedGraph`] when concurrent callers need
//! a mutual-exclusion boundary.
//!
//! [`SharedGraph`]: crate::SharedGraph

use std::fmt;

use hashbrown::HashMap;

use crate::config::HebbianConfig;
use crate::model::{Entity, EntityId, PropertyMap, Relation};
use crate::plasticity::ActivationEvent;

// ============================================================================
// RelationOpts
// ============================================================================

/// Optional arguments for [`KnowledgeGraph::add_relation`].
#[derive(Debug, Clone)]
pub struct RelationOpts {
    /// Type tag for the subject entity if it does not exist yet.
    pub subject_kind: Option<String>,
    /// Type tag for the object entity if it does not exist yet.
    pub object_kind: Option<String>,
    pub confidence: f64,
    pub source: Option<String>,
    pub version: Option<String>,
    pub metadata: PropertyMap,
}

impl Default for RelationOpts {
    fn default() -> Self {
        Self {
            subject_kind: None,
            object_kind: None,
            confidence: 1.0,
            source: None,
            version: None,
            metadata: PropertyMap::new(),
        }
    }
}

impl RelationOpts {
    pub fn subject_kind(mut self, kind: impl Into<String>) -> Self {
        self.subject_kind = Some(kind.into());
        self
    }

    pub fn object_kind(mut self, kind: impl Into<String>) -> Self {
        self.object_kind = Some(kind.into());
        self
    }

    pub fn confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn metadata(mut self, metadata: PropertyMap) -> Self {
        self.metadata = metadata;
        self
    }
}

// ============================================================================
// KnowledgeGraph
// ============================================================================

/// The adaptive fact store: entity arena, label index, insertion-ordered
/// relation list, and Hebbian plasticity state.
pub struct KnowledgeGraph {
    /// id → entity arena. Entities live for the store's lifetime.
    pub(crate) entities: HashMap<EntityId, Entity>,
    /// label → id secondary index. Label is the external dedup key.
    pub(crate) label_index: HashMap<String, EntityId>,
    /// Relations in insertion order. Queries scan linearly; order is part
    /// of the contract (stable ties, first-match activation).
    pub(crate) relations: Vec<Relation>,
    pub(crate) config: HebbianConfig,
    /// Unordered pair (sorted ascending) → co-activation count.
    pub(crate) coactivation_counts: HashMap<(EntityId, EntityId), u32>,
    /// Bounded FIFO log of recent co-activation events (max 100).
    pub(crate) activation_window: Vec<ActivationEvent>,
    pub(crate) next_entity_id: u64,
}

impl KnowledgeGraph {
    pub fn new() -> Self {
        Self::with_config(HebbianConfig::default())
    }

    pub fn with_config(config: HebbianConfig) -> Self {
        Self {
            entities: HashMap::new(),
            label_index: HashMap::new(),
            relations: Vec::new(),
            config,
            coactivation_counts: HashMap::new(),
            activation_window: Vec::new(),
            next_entity_id: 1,
        }
    }

    pub fn config(&self) -> &HebbianConfig {
        &self.config
    }

    // ========================================================================
    // Entity store
    // ========================================================================

    /// Add an entity, deduplicating by label.
    ///
    /// Returns the existing id if the label is already present — the stored
    /// kind and properties are NOT updated in that case.
    pub fn add_entity(
        &mut self,
        label: impl Into<String>,
        kind: impl Into<String>,
        properties: PropertyMap,
    ) -> EntityId {
        let label = label.into();
        if let Some(&id) = self.label_index.get(&label) {
            return id;
        }

        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;

        let mut ent = Entity::new(id, label.clone(), kind);
        ent.properties = properties;
        self.entities.insert(id, ent);
        self.label_index.insert(label, id);
        id
    }

    /// Look up an entity by label.
    pub fn entity(&self, label: &str) -> Option<&Entity> {
        self.label_index.get(label).and_then(|id| self.entities.get(id))
    }

    pub(crate) fn resolve(&self, label: &str) -> Option<EntityId> {
        self.label_index.get(label).copied()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    // ========================================================================
    // Relation store
    // ========================================================================

    /// Append a relation, resolving or creating both entities.
    ///
    /// Missing entities are created with the kinds from `opts` (default
    /// `"Thing"`). Duplicate triples are permitted by construction.
    pub fn add_relation(
        &mut self,
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
        opts: RelationOpts,
    ) -> &Relation {
        let subject_kind = opts.subject_kind.as_deref().unwrap_or("Thing").to_owned();
        let object_kind = opts.object_kind.as_deref().unwrap_or("Thing").to_owned();

        let subject_id = self.add_entity(subject, subject_kind, PropertyMap::new());
        let object_id = self.add_entity(object, object_kind, PropertyMap::new());

        let mut rel = Relation::new(subject_id, predicate, object_id)
            .with_confidence(opts.confidence);
        rel.source = opts.source;
        rel.version = opts.version;
        rel.metadata = opts.metadata;

        let idx = self.relations.len();
        self.relations.push(rel);
        &self.relations[idx]
    }

    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    /// All relations in insertion order.
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }
}

impl Default for KnowledgeGraph {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for KnowledgeGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rel in &self.relations {
            let (Some(subj), Some(obj)) = (
                self.entities.get(&rel.subject_id),
                self.entities.get(&rel.object_id),
            ) else {
                continue;
            };
            writeln!(
                f,
                "{} ({}) --{}--> {} ({}) [strength={:.2}, activations={}]",
                subj.label, subj.kind, rel.predicate, obj.label, obj.kind,
                rel.confidence, rel.activation_count,
            )?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
