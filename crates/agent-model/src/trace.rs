//! Generation trace
//!
//! An append-only audit record of how each facet was derived. Keys are held
//! in `BTreeMap`s so a serialized trace is byte-stable for a given seed.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const TRACE_VERSION: u32 = 1;

/// How one output field was derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceEntry {
    pub value: Value,
    pub method: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub depends_on: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationTrace {
    pub version: u32,
    pub normalized_seed: String,
    /// Facet name to derived 32-bit stream seed.
    pub facet_seeds: BTreeMap<String, u32>,
    pub fields: BTreeMap<String, TraceEntry>,
    /// Notes about plausibility rules that fired.
    pub derived: BTreeMap<String, Value>,
}

impl GenerationTrace {
    pub fn new(normalized_seed: impl Into<String>) -> Self {
        Self {
            version: TRACE_VERSION,
            normalized_seed: normalized_seed.into(),
            facet_seeds: BTreeMap::new(),
            fields: BTreeMap::new(),
            derived: BTreeMap::new(),
        }
    }

    /// Records the stream seed used by a facet.
    pub fn record_facet(&mut self, facet: &str, seed: u32) {
        self.facet_seeds.insert(facet.to_string(), seed);
    }

    /// Records a derived field. The first write for a key wins.
    pub fn record_field(&mut self, key: &str, value: Value, method: &str, depends_on: Value) {
        self.fields.entry(key.to_string()).or_insert(TraceEntry {
            value,
            method: method.to_string(),
            depends_on,
        });
    }

    pub fn record_derived(&mut self, key: &str, note: Value) {
        self.derived.entry(key.to_string()).or_insert(note);
    }

    pub fn field(&self, key: &str) -> Option<&TraceEntry> {
        self.fields.get(key)
    }
}
