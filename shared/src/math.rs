//! Deterministic 2D math for tickcast.
//!
//! Provides a POD (Plain Old Data) vector type that is serializable and can
//! be shared across crates without pulling a full math library into the
//! shared types. Simulation code must produce bit-identical results on every
//! peer, so all operations here are plain f32 arithmetic with no platform
//! intrinsics.

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// 2D vector (POD type).
///
/// Used for entity positions, movement directions, and replicated position
/// updates. `#[repr(C)]` keeps the layout stable for wire encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
#[repr(C)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// Zero vector
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Unit vector in both axes
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };

    /// Create a vector from components
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Multiply both components by a scalar
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Linear interpolation between `a` and `b`.
    ///
    /// The endpoints are exact: `weight == 0.0` returns `a` bit-for-bit and
    /// `weight == 1.0` returns `b` bit-for-bit. Rollback interpolation
    /// contracts depend on this, so the endpoint cases short-circuit instead
    /// of trusting `a + (b - a) * w` to cancel.
    pub fn lerp(a: Self, b: Self, weight: f32) -> Self {
        if weight == 0.0 {
            a
        } else if weight == 1.0 {
            b
        } else {
            Self {
                x: a.x + (b.x - a.x) * weight,
                y: a.y + (b.y - a.y) * weight,
            }
        }
    }
}

impl core::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl core::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl core::ops::Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl core::ops::Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        self.scale(rhs)
    }
}
