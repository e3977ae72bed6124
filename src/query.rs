//! Read-only filtered traversal over the relation store.
//!
//! Queries are a linear scan in relation-insertion order. Every supplied
//! filter is a conjunctive predicate — including the metadata filter, which
//! composes with the rest like any other (it never short-circuits them).

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::graph::KnowledgeGraph;
use crate::model::{Entity, PropertyMap, Relation, Value};

// ============================================================================
// Query
// ============================================================================

/// Filter set for [`KnowledgeGraph::query`]. All supplied filters must
/// match (AND); absent filters match everything.
#[derive(Debug, Clone, Default)]
pub struct Query {
    subject: Option<String>,
    predicate: Option<String>,
    object: Option<String>,
    subject_kind: Option<String>,
    object_kind: Option<String>,
    min_confidence: Option<f64>,
    /// Inclusive lower bound on `created_at`.
    after: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `created_at`.
    before: Option<DateTime<Utc>>,
    /// Every key must be present in the relation's metadata with an equal value.
    metadata: PropertyMap,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subject(mut self, label: impl Into<String>) -> Self {
        self.subject = Some(label.into());
        self
    }

    pub fn predicate(mut self, predicate: impl Into<String>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    pub fn object(mut self, label: impl Into<String>) -> Self {
        self.object = Some(label.into());
        self
    }

    pub fn subject_kind(mut self, kind: impl Into<String>) -> Self {
        self.subject_kind = Some(kind.into());
        self
    }

    pub fn object_kind(mut self, kind: impl Into<String>) -> Self {
        self.object_kind = Some(kind.into());
        self
    }

    pub fn min_confidence(mut self, min: f64) -> Self {
        self.min_confidence = Some(min);
        self
    }

    pub fn after(mut self, after: DateTime<Utc>) -> Self {
        self.after = Some(after);
        self
    }

    pub fn before(mut self, before: DateTime<Utc>) -> Self {
        self.before = Some(before);
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    fn matches(&self, subj: &Entity, rel: &Relation, obj: &Entity) -> bool {
        if let Some(s) = &self.subject {
            if subj.label != *s {
                return false;
            }
        }
        if let Some(k) = &self.subject_kind {
            if subj.kind != *k {
                return false;
            }
        }
        if let Some(o) = &self.object {
            if obj.label != *o {
                return false;
            }
        }
        if let Some(k) = &self.object_kind {
            if obj.kind != *k {
                return false;
            }
        }
        if let Some(p) = &self.predicate {
            if rel.predicate != *p {
                return false;
            }
        }
        if let Some(min) = self.min_confidence {
            if rel.confidence < min {
                return false;
            }
        }
        if let Some(after) = self.after {
            if rel.created_at < after {
                return false;
            }
        }
        if let Some(before) = self.before {
            if rel.created_at > before {
                return false;
            }
        }
        self.metadata
            .iter()
            .all(|(k, v)| rel.metadata.get(k) == Some(v))
    }
}

// ============================================================================
// Query engine
// ============================================================================

impl KnowledgeGraph {
    /// Scan relations in insertion order, returning every
    /// `(subject, relation, object)` triple matching all filters.
    pub fn query(&self, q: &Query) -> Vec<(&Entity, &Relation, &Entity)> {
        self.relations
            .iter()
            .filter_map(|rel| {
                let subj = self.entities.get(&rel.subject_id)?;
                let obj = self.entities.get(&rel.object_id)?;
                q.matches(subj, rel, obj).then_some((subj, rel, obj))
            })
            .collect()
    }

    /// Confidence of the first relation matching the exact triple, or 0.0
    /// if either label is unknown or no relation matches.
    pub fn get_edge_strength(&self, subject: &str, predicate: &str, object: &str) -> f64 {
        let (Some(subject_id), Some(object_id)) = (self.resolve(subject), self.resolve(object))
        else {
            return 0.0;
        };

        self.relations
            .iter()
            .find(|rel| rel.matches_triple(subject_id, predicate, object_id))
            .map_or(0.0, |rel| rel.confidence)
    }

    /// The `top_k` strongest edges as `(subject, predicate, object,
    /// confidence)`, sorted by confidence descending. Ties keep relation
    /// insertion order.
    pub fn get_strongest_edges(&self, top_k: usize) -> Vec<(&str, &str, &str, f64)> {
        let mut edges: Vec<(&str, &str, &str, f64)> = self
            .relations
            .iter()
            .filter_map(|rel| {
                let subj = self.entities.get(&rel.subject_id)?;
                let obj = self.entities.get(&rel.object_id)?;
                Some((
                    subj.label.as_str(),
                    rel.predicate.as_str(),
                    obj.label.as_str(),
                    rel.confidence,
                ))
            })
            .collect();

        edges.sort_by(|a, b| b.3.partial_cmp(&a.3).unwrap_or(Ordering::Equal));
        edges.truncate(top_k);
        edges
    }
}

// ============================================================================
// Tests
// ============================================================================
