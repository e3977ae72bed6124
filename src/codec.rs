//! Persistence codec — full-store JSON round-trip.
//!
//! The persisted document carries entities, relations (with plasticity
//! fields), the active config, and co-activation counters. The activation
//! window is transient and not persisted.
//!
//! `load` wholly replaces in-memory state; any previously held entity or
//! relation references are invalidated. Persisted config fields override
//! current values, absent fields keep them.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{HebbianConfig, HebbianConfigOverlay};
use crate::graph::KnowledgeGraph;
use crate::model::{Entity, EntityId, Relation};
use crate::{Error, Result};

// ============================================================================
// Document types
// ============================================================================

#[derive(Serialize)]
struct GraphDocument<'a> {
    entities: Vec<&'a Entity>,
    relations: &'a [Relation],
    hebbian_config: &'a HebbianConfig,
    /// Composite `"lo_hi"` keys, sorted for deterministic output.
    coactivation_counts: BTreeMap<String, u32>,
}

#[derive(Deserialize)]
struct GraphDocumentIn {
    entities: Vec<Entity>,
    relations: Vec<Relation>,
    #[serde(default)]
    hebbian_config: HebbianConfigOverlay,
    #[serde(default)]
    coactivation_counts: BTreeMap<String, u32>,
}

fn pair_key(pair: (EntityId, EntityId)) -> String {
    format!("{}_{}", pair.0.0, pair.1.0)
}

fn parse_pair_key(key: &str) -> Result<(EntityId, EntityId)> {
    let parse = |s: &str| {
        s.parse::<u64>()
            .map_err(|_| Error::Format(format!("bad co-activation key `{key}`")))
    };
    let (a, b) = key
        .split_once('_')
        .ok_or_else(|| Error::Format(format!("bad co-activation key `{key}`")))?;
    let (a, b) = (parse(a)?, parse(b)?);
    // Canonical order: smaller id first.
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    Ok((EntityId(lo), EntityId(hi)))
}

// ============================================================================
// Save / load
// ============================================================================

impl KnowledgeGraph {
    /// Write the full store to `path` as a pretty-printed JSON document.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        // Entities sorted by id so documents diff cleanly.
        let mut entities: Vec<&Entity> = self.entities.values().collect();
        entities.sort_by_key(|e| e.id);

        let doc = GraphDocument {
            entities,
            relations: &self.relations,
            hebbian_config: &self.config,
            coactivation_counts: self
                .coactivation_counts
                .iter()
                .map(|(&pair, &count)| (pair_key(pair), count))
                .collect(),
        };

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &doc)?;
        writer.flush()?;

        debug!(
            path = %path.display(),
            entities = self.entities.len(),
            relations = self.relations.len(),
            "graph saved"
        );
        Ok(())
    }

    /// Replace the in-memory store with the document at `path`.
    ///
    /// Invalid JSON, missing required fields, or relations referencing
    /// unknown entity ids fail with [`Error::Format`]; the store is left
    /// untouched in that case. Persisted config fields are merged over the
    /// current config.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let doc: GraphDocumentIn = serde_json::from_reader(BufReader::new(file))?;

        let mut entities = HashMap::with_capacity(doc.entities.len());
        let mut label_index = HashMap::with_capacity(doc.entities.len());
        let mut max_id = 0u64;
        for ent in doc.entities {
            max_id = max_id.max(ent.id.0);
            label_index.insert(ent.label.clone(), ent.id);
            entities.insert(ent.id, ent);
        }

        for rel in &doc.relations {
            for id in [rel.subject_id, rel.object_id] {
                if !entities.contains_key(&id) {
                    return Err(Error::Format(format!(
                        "relation `{}` references unknown entity id {id}",
                        rel.predicate,
                    )));
                }
            }
        }

        let mut coactivation_counts = HashMap::with_capacity(doc.coactivation_counts.len());
        for (key, count) in &doc.coactivation_counts {
            coactivation_counts.insert(parse_pair_key(key)?, *count);
        }

        // All fallible work done; commit the replacement.
        self.entities = entities;
        self.label_index = label_index;
        self.relations = doc.relations;
        self.config = self.config.merged(&doc.hebbian_config);
        self.coactivation_counts = coactivation_counts;
        self.activation_window.clear();
        self.next_entity_id = max_id + 1;

        debug!(
            path = %path.display(),
            entities = self.entities.len(),
            relations = self.relations.len(),
            "graph loaded"
        );
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
