//! Entity — a uniquely labeled, typed node in the fact graph.

use serde::{Deserialize, Serialize};
use super::{PropertyMap, Value};

/// Opaque entity identifier. Stable across the store's lifetime; relations
/// reference entities by id, never by label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node in the fact graph.
///
/// `label` is the external key: the store deduplicates entities by label,
/// and the label and kind are immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub label: String,
    /// Type tag, e.g. `"Person"` or `"Company"`. `"Thing"` when unspecified.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub properties: PropertyMap,
}

impl Entity {
    pub fn new(id: EntityId, label: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            kind: kind.into(),
            properties: PropertyMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}
