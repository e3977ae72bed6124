//! PropertyMap — the key-value store on entities and relations.

use std::collections::BTreeMap;
use super::Value;

/// An ordered map of property names to values.
///
/// `BTreeMap` so serialization order is deterministic across runs.
pub type PropertyMap = BTreeMap<String, Value>;
