//! Entity state snapshots for rollback.
//!
//! A snapshot is a complete, self-contained description of everything an
//! entity needs to reconstruct its simulation-relevant state at a tick
//! boundary. The external rollback manager holds copies keyed by `Tick`;
//! loading a snapshot after saving it must reproduce identical subsequent
//! behavior, so entities must save every field that influences simulation.
//!
//! Each snapshot can produce an xxh3 checksum over its canonical encoding
//! for desync detection between peers. The backing `BTreeMap` makes that
//! encoding deterministic.

use std::collections::BTreeMap;

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::math::Vec2;

/// A single snapshot field value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub enum StateValue {
    /// Flag state (e.g. enabled)
    Bool(bool),
    /// Discrete quantity
    Int(i64),
    /// Scalar (e.g. speed)
    Float(f32),
    /// 2D value (e.g. position)
    Vec2(Vec2),
}

impl From<bool> for StateValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for StateValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for StateValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<Vec2> for StateValue {
    fn from(v: Vec2) -> Self {
        Self::Vec2(v)
    }
}

/// Opaque entity state at a tick boundary.
///
/// Owned by the entity that produced it; the rollback manager only ever
/// holds copies. Oldest-snapshot eviction is the manager's responsibility.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct StateSnapshot {
    fields: BTreeMap<String, StateValue>,
}

impl StateSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value under the same key
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<StateValue>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Builder-style `set`
    pub fn with(mut self, key: impl Into<String>, value: impl Into<StateValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Raw field lookup
    pub fn get(&self, key: &str) -> Option<&StateValue> {
        self.fields.get(key)
    }

    /// Look up a boolean field
    pub fn bool_field(&self, key: &str) -> Option<bool> {
        match self.fields.get(key) {
            Some(StateValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    /// Look up an integer field
    pub fn int_field(&self, key: &str) -> Option<i64> {
        match self.fields.get(key) {
            Some(StateValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// Look up a scalar field
    pub fn float_field(&self, key: &str) -> Option<f32> {
        match self.fields.get(key) {
            Some(StateValue::Float(v)) => Some(*v),
            _ => None,
        }
    }

    /// Look up a 2D field
    pub fn vec2_field(&self, key: &str) -> Option<Vec2> {
        match self.fields.get(key) {
            Some(StateValue::Vec2(v)) => Some(*v),
            _ => None,
        }
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if the snapshot carries no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Canonical byte encoding (wire/persistence format)
    pub fn encode(&self) -> Vec<u8> {
        bitcode::encode(self)
    }

    /// Decode a snapshot from its canonical encoding
    pub fn decode(bytes: &[u8]) -> Result<Self, bitcode::Error> {
        bitcode::decode(bytes)
    }

    /// xxh3 checksum over the canonical encoding.
    ///
    /// Peers compare these to detect desyncs: two peers that simulated the
    /// same tick from the same inputs must produce identical checksums.
    pub fn checksum(&self) -> u64 {
        xxh3_64(&self.encode())
    }
}
