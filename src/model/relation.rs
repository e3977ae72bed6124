//! Relation — a directed, confidence-weighted edge between two entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, PropertyMap};

/// A directed labeled edge in the fact graph.
///
/// `confidence` doubles as the Hebbian weight: activation strengthens it
/// asymptotically toward `max_strength`, idle cycles decay it toward the
/// pruning floor. The triple `(subject_id, predicate, object_id)` identifies
/// a relation, but the store does not enforce triple uniqueness — callers
/// needing single edges check existence first (the emergence path does).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub subject_id: EntityId,
    pub predicate: String,
    pub object_id: EntityId,
    pub confidence: f64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub metadata: PropertyMap,

    // Plasticity state. A relation with `last_activated == None` is dormant:
    // exempt from decay and pruning regardless of confidence.
    #[serde(default)]
    pub activation_count: u64,
    #[serde(default)]
    pub last_activated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cycles_since_last_activation: Option<u32>,
}

impl Relation {
    pub fn new(subject_id: EntityId, predicate: impl Into<String>, object_id: EntityId) -> Self {
        Self {
            subject_id,
            predicate: predicate.into(),
            object_id,
            confidence: 1.0,
            created_at: Utc::now(),
            source: None,
            version: None,
            metadata: PropertyMap::new(),
            activation_count: 0,
            last_activated: None,
            cycles_since_last_activation: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Exact triple match.
    pub fn matches_triple(&self, subject: EntityId, predicate: &str, object: EntityId) -> bool {
        self.subject_id == subject && self.predicate == predicate && self.object_id == object
    }

    /// True if this relation touches both ids, in either direction.
    pub fn connects(&self, a: EntityId, b: EntityId) -> bool {
        (self.subject_id == a && self.object_id == b)
            || (self.subject_id == b && self.object_id == a)
    }

    /// Never activated: seeded knowledge that strengthening has not touched.
    pub fn is_dormant(&self) -> bool {
        self.last_activated.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connects_is_direction_agnostic() {
        let rel = Relation::new(EntityId(1), "knows", EntityId(2));
        assert!(rel.connects(EntityId(1), EntityId(2)));
        assert!(rel.connects(EntityId(2), EntityId(1)));
        assert!(!rel.connects(EntityId(1), EntityId(3)));
    }

    #[test]
    fn test_new_relation_is_dormant() {
        let rel = Relation::new(EntityId(1), "knows", EntityId(2));
        assert!(rel.is_dormant());
        assert_eq!(rel.activation_count, 0);
        assert_eq!(rel.cycles_since_last_activation, None);
    }
}
