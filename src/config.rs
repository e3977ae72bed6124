//! Hebbian plasticity tuning parameters.

use serde::{Deserialize, Serialize};

/// Plasticity configuration, fixed at construction.
///
/// An immutable value passed to [`KnowledgeGraph::with_config`], never a
/// shared mutable default. Loading a persisted document merges persisted
/// fields into a copy of the current config (see [`HebbianConfigOverlay`]).
///
/// [`KnowledgeGraph::with_config`]: crate::KnowledgeGraph::with_config
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HebbianConfig {
    /// Fraction of the remaining headroom gained per activation.
    pub learning_rate: f64,
    /// Asymptotic per-pass confidence loss for idle edges.
    pub decay_rate: f64,
    /// Co-activations needed before an emergent edge forms.
    pub emergence_threshold: u32,
    /// Activated edges below this confidence are pruned.
    pub min_strength: f64,
    /// Confidence ceiling for strengthening.
    pub max_strength: f64,
}

impl Default for HebbianConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            decay_rate: 0.05,
            emergence_threshold: 3,
            min_strength: 0.1,
            max_strength: 1.0,
        }
    }
}

/// Partial config as found in persisted documents.
///
/// Persisted values override the in-memory config; absent fields keep their
/// current values.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct HebbianConfigOverlay {
    pub learning_rate: Option<f64>,
    pub decay_rate: Option<f64>,
    pub emergence_threshold: Option<u32>,
    pub min_strength: Option<f64>,
    pub max_strength: Option<f64>,
}

impl HebbianConfig {
    /// Return a copy with the overlay's present fields applied.
    pub fn merged(self, overlay: &HebbianConfigOverlay) -> Self {
        Self {
            learning_rate: overlay.learning_rate.unwrap_or(self.learning_rate),
            decay_rate: overlay.decay_rate.unwrap_or(self.decay_rate),
            emergence_threshold: overlay.emergence_threshold.unwrap_or(self.emergence_threshold),
            min_strength: overlay.min_strength.unwrap_or(self.min_strength),
            max_strength: overlay.max_strength.unwrap_or(self.max_strength),
        }
    }
}
