//! Tick identity and fixed tick rates.
//!
//! A tick is one discrete simulation step. The external rollback manager
//! keys its snapshot history by `Tick`; simulation code derives its time
//! delta from the fixed `TickRate` instead of the wall clock, which is what
//! makes resimulation deterministic.

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// Identifies one simulation step.
///
/// Monotonically increasing from session start. Snapshots held by the
/// rollback manager are keyed by this value.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    Encode, Decode,
)]
pub struct Tick(pub u32);

impl Tick {
    /// The tick immediately after this one
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl core::fmt::Display for Tick {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "tick {}", self.0)
    }
}

/// Fixed simulation tick rate.
///
/// Must match between all peers in a session. The per-tick delta factor for
/// integration comes from `delta()`, never from measured frame time.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Encode, Decode,
)]
pub enum TickRate {
    /// 30 simulation steps per second
    Fixed30,
    /// 60 simulation steps per second
    #[default]
    Fixed60,
    /// 120 simulation steps per second
    Fixed120,
}

impl TickRate {
    /// Steps per second
    pub const fn hz(self) -> u32 {
        match self {
            Self::Fixed30 => 30,
            Self::Fixed60 => 60,
            Self::Fixed120 => 120,
        }
    }

    /// Seconds advanced by one tick
    pub fn delta(self) -> f32 {
        1.0 / self.hz() as f32
    }
}
