//! Hebbian plasticity — the adaptation lifecycle.
//!
//! Four mechanisms, all pure in-memory mutations that never fail:
//!
//! - **Strengthening** (`activate_relation`): used edges gain confidence
//!   asymptotically toward `max_strength` (LTP analogy)
//! - **Co-activation tracking** (`activate_entities`): entities reasoned
//!   about together accumulate pair counters
//! - **Emergence** (`form_emergent_connections`): pairs crossing the
//!   threshold with no existing edge get a `co_occurs_with` relation
//! - **Decay & pruning** (`apply_temporal_decay`): edges idle for N cycles
//!   lose confidence and are removed below `min_strength` (LTD analogy)
//!
//! Decay is clocked by `increment_cycle_counters`, which the owning
//! collaborator calls exactly once per reasoning cycle — deterministic and
//! testable, unlike wall-clock inactivity.

use chrono::{DateTime, Utc};
use smallvec::SmallVec;
use tracing::debug;

use crate::graph::KnowledgeGraph;
use crate::model::{EntityId, Relation};

/// FIFO cap on the co-activation event log.
const ACTIVATION_WINDOW_CAP: usize = 100;

/// Cycle count at which decay reaches ~63% of `decay_rate`.
const DECAY_TIME_CONSTANT: f64 = 30.0;

/// Predicate given to emergent edges.
pub const EMERGENT_PREDICATE: &str = "co_occurs_with";

const EMERGENT_SOURCE: &str = "hebbian_emergence";
const EMERGENT_VERSION: &str = "emergent";

// ============================================================================
// Event and report types
// ============================================================================

/// One co-activation event: a set of entities used in the same reasoning step.
#[derive(Debug, Clone)]
pub(crate) struct ActivationEvent {
    pub at: DateTime<Utc>,
    pub entities: SmallVec<[EntityId; 8]>,
}

/// A new edge synthesized from repeated co-activation.
#[derive(Debug, Clone, PartialEq)]
pub struct EmergentEdge {
    pub subject: String,
    pub object: String,
    pub strength: f64,
}

/// An edge that lost confidence this pass but survived pruning.
#[derive(Debug, Clone, PartialEq)]
pub struct DecayedEdge {
    pub subject: String,
    pub predicate: String,
    pub object: String,
    pub old_confidence: f64,
    pub new_confidence: f64,
}

/// Aggregate result of one consolidation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsolidationReport {
    pub emergent_edges: Vec<EmergentEdge>,
    pub decayed_edge_count: usize,
}

fn canonical_pair(a: EntityId, b: EntityId) -> (EntityId, EntityId) {
    if a <= b { (a, b) } else { (b, a) }
}

// ============================================================================
// Plasticity engine
// ============================================================================

impl KnowledgeGraph {
    /// Strengthen the first relation matching the exact triple.
    ///
    /// `c' = min(max, c + learning_rate * (max - c))` — bounded, strictly
    /// increasing below `max_strength`, with diminishing increments.
    /// Unknown labels or no matching relation: silent no-op.
    pub fn activate_relation(&mut self, subject: &str, predicate: &str, object: &str) {
        let (Some(subject_id), Some(object_id)) = (self.resolve(subject), self.resolve(object))
        else {
            return;
        };

        let cfg = self.config;
        let Some(rel) = self
            .relations
            .iter_mut()
            .find(|rel| rel.matches_triple(subject_id, predicate, object_id))
        else {
            return;
        };

        let delta = cfg.learning_rate * (cfg.max_strength - rel.confidence);
        rel.confidence = cfg.max_strength.min(rel.confidence + delta);
        rel.activation_count += 1;
        rel.last_activated = Some(Utc::now());
        rel.cycles_since_last_activation = Some(0);

        debug!(
            subject, predicate, object,
            strength = rel.confidence,
            activations = rel.activation_count,
            "strengthened edge"
        );
    }

    /// Record that a set of entities was used together in one reasoning step.
    ///
    /// Unknown labels are ignored and duplicates collapsed; fewer than two
    /// resolved entities is a no-op. Each unordered pair's co-activation
    /// counter is incremented, and the event is appended to the bounded
    /// window (oldest entries dropped past 100).
    pub fn activate_entities<S: AsRef<str>>(&mut self, labels: &[S]) {
        let mut ids: SmallVec<[EntityId; 8]> = SmallVec::new();
        for label in labels {
            if let Some(id) = self.resolve(label.as_ref()) {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }
        if ids.len() < 2 {
            return;
        }

        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                let pair = canonical_pair(ids[i], ids[j]);
                *self.coactivation_counts.entry(pair).or_insert(0) += 1;
            }
        }

        self.activation_window.push(ActivationEvent { at: Utc::now(), entities: ids });
        if self.activation_window.len() > ACTIVATION_WINDOW_CAP {
            let excess = self.activation_window.len() - ACTIVATION_WINDOW_CAP;
            self.activation_window.drain(..excess);
        }
    }

    /// Recent co-activation events, oldest first: `(timestamp, entity ids)`.
    ///
    /// Bounded at 100 entries; eviction is FIFO by insertion order.
    pub fn activation_window(&self) -> impl Iterator<Item = (DateTime<Utc>, &[EntityId])> + '_ {
        self.activation_window
            .iter()
            .map(|ev| (ev.at, ev.entities.as_slice()))
    }

    /// Advance the decay clock for every relation that has been activated
    /// at least once.
    ///
    /// The owning collaborator calls this exactly once per reasoning cycle,
    /// before any activations for that cycle. Calling it more or fewer
    /// times distorts the decay rate.
    pub fn increment_cycle_counters(&mut self) {
        for rel in &mut self.relations {
            if let Some(cycles) = &mut rel.cycles_since_last_activation {
                *cycles += 1;
            }
        }
    }

    /// Create `co_occurs_with` edges for entity pairs whose co-activation
    /// count reached the emergence threshold and which no existing relation
    /// connects in either direction.
    ///
    /// Initial strength is `min(0.5, count * 0.1)`. If at least one edge was
    /// created, ALL counters are cleared, not just the ones that fired.
    /// Pairs are processed in sorted id order so output is deterministic.
    pub fn form_emergent_connections(&mut self) -> Vec<EmergentEdge> {
        let threshold = self.config.emergence_threshold;

        let mut candidates: Vec<((EntityId, EntityId), u32)> = self
            .coactivation_counts
            .iter()
            .filter(|&(_, &count)| count >= threshold)
            .map(|(&pair, &count)| (pair, count))
            .collect();
        candidates.sort_by_key(|(pair, _)| *pair);

        let mut new_edges = Vec::new();
        for ((a, b), count) in candidates {
            if self.relations.iter().any(|rel| rel.connects(a, b)) {
                continue;
            }
            let (Some(subj), Some(obj)) = (self.entities.get(&a), self.entities.get(&b)) else {
                continue;
            };

            let strength = (count as f64 * 0.1).min(0.5);
            debug!(
                subject = %subj.label,
                object = %obj.label,
                strength,
                coactivations = count,
                "emergent edge"
            );

            new_edges.push(EmergentEdge {
                subject: subj.label.clone(),
                object: obj.label.clone(),
                strength,
            });
            self.relations.push(
                Relation::new(a, EMERGENT_PREDICATE, b)
                    .with_confidence(strength)
                    .with_source(EMERGENT_SOURCE)
                    .with_version(EMERGENT_VERSION),
            );
        }

        if !new_edges.is_empty() {
            self.coactivation_counts.clear();
        }
        new_edges
    }

    /// Weaken every activated relation that sat idle for at least one cycle,
    /// then prune activated relations whose confidence fell below
    /// `min_strength`.
    ///
    /// `decay = decay_rate * (1 - e^(-cycles / 30))` — an asymptotic
    /// approach to `decay_rate`. The subtraction is not floored; pruning
    /// handles the tail. Dormant relations are exempt from both decay and
    /// pruning so seed knowledge is never silently lost.
    pub fn apply_temporal_decay(&mut self) -> Vec<DecayedEdge> {
        let cfg = self.config;
        let entities = &self.entities;

        let mut decayed = Vec::new();
        for rel in &mut self.relations {
            if rel.is_dormant() {
                continue;
            }
            let cycles = rel.cycles_since_last_activation.unwrap_or(0);
            if cycles == 0 {
                continue;
            }

            let decay = cfg.decay_rate * (1.0 - (-(cycles as f64) / DECAY_TIME_CONSTANT).exp());
            let old_confidence = rel.confidence;
            rel.confidence -= decay;

            if rel.confidence > cfg.min_strength {
                let (Some(subj), Some(obj)) =
                    (entities.get(&rel.subject_id), entities.get(&rel.object_id))
                else {
                    continue;
                };
                decayed.push(DecayedEdge {
                    subject: subj.label.clone(),
                    predicate: rel.predicate.clone(),
                    object: obj.label.clone(),
                    old_confidence,
                    new_confidence: rel.confidence,
                });
            }
        }

        let before = self.relations.len();
        self.relations
            .retain(|rel| rel.confidence >= cfg.min_strength || rel.is_dormant());
        let pruned = before - self.relations.len();

        if !decayed.is_empty() || pruned > 0 {
            debug!(decayed = decayed.len(), pruned, "temporal decay applied");
        }
        decayed
    }

    /// Full consolidation pass: emergence first, then decay, so edges
    /// created this pass are not immediately subject to the same cycle's
    /// decay. Safe to skip for arbitrarily many cycles.
    pub fn consolidate_memory(&mut self) -> ConsolidationReport {
        let emergent_edges = self.form_emergent_connections();
        let decayed = self.apply_temporal_decay();

        debug!(
            emergent = emergent_edges.len(),
            decayed = decayed.len(),
            "memory consolidation complete"
        );

        ConsolidationReport {
            emergent_edges,
            decayed_edge_count: decayed.len(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
