//! Per-tick input values.
//!
//! One `TickInput` carries everything a simulation step needs to know about
//! control input: buttons, analog values, movement vectors. It is produced
//! exactly once per broadcaster per tick (captured locally, or predicted for
//! a remote peer) and handed to consumers by shared reference, so it cannot
//! change once published.
//!
//! The backing map is a `BTreeMap` so iteration, encoding, and checksums are
//! deterministic across peers regardless of insertion order.

use std::collections::BTreeMap;

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// A single heterogeneous input value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub enum InputValue {
    /// Button or toggle state
    Bool(bool),
    /// Discrete quantity (e.g. selected weapon slot)
    Int(i64),
    /// Analog scalar (e.g. trigger pressure)
    Float(f32),
    /// Analog 2D value (e.g. movement direction)
    Vec2(Vec2),
}

impl From<bool> for InputValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for InputValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for InputValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<Vec2> for InputValue {
    fn from(v: Vec2) -> Self {
        Self::Vec2(v)
    }
}

/// One simulation step's control input.
///
/// Key-to-value mapping with no meaningful key order. Created fresh each
/// tick and dropped after the phase sequence completes; the broadcaster
/// never retains it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct TickInput {
    values: BTreeMap<String, InputValue>,
}

impl TickInput {
    /// Create an empty input (also what `Default` yields).
    ///
    /// The empty input is the broadcaster's answer when no local input
    /// source is configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing any previous value under the same key
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<InputValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Builder-style `set`
    pub fn with(mut self, key: impl Into<String>, value: impl Into<InputValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Raw value lookup
    pub fn get(&self, key: &str) -> Option<&InputValue> {
        self.values.get(key)
    }

    /// Look up a boolean value
    pub fn bool_value(&self, key: &str) -> Option<bool> {
        match self.values.get(key) {
            Some(InputValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    /// Look up an integer value
    pub fn int_value(&self, key: &str) -> Option<i64> {
        match self.values.get(key) {
            Some(InputValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// Look up a scalar value
    pub fn float_value(&self, key: &str) -> Option<f32> {
        match self.values.get(key) {
            Some(InputValue::Float(v)) => Some(*v),
            _ => None,
        }
    }

    /// Look up a 2D value
    pub fn vec2_value(&self, key: &str) -> Option<Vec2> {
        match self.values.get(key) {
            Some(InputValue::Vec2(v)) => Some(*v),
            _ => None,
        }
    }

    /// Number of values in this input
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if this input carries no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate values in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &InputValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
