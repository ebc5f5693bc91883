//! Canonical remote-input predictor.
//!
//! Rollback netcode predicts missing remote input by repeating the last
//! confirmed input: most ticks, a player keeps doing what they were doing.
//! Past a configurable window the guess goes stale and repeating it makes
//! the eventual correction worse, so prediction decays to the empty input.

use tickcast_shared::TickInput;

use crate::sync::RemoteInputPredictor;

/// Hold-last-input prediction with a decay window.
///
/// Pure: the result depends only on `previous` and
/// `ticks_since_real_input`, so replaying the prediction during
/// resimulation reproduces it exactly.
#[derive(Debug, Clone, Copy)]
pub struct RepeatPredictor {
    /// How many consecutive missing ticks to keep repeating the last input
    pub hold_ticks: u32,
}

impl RepeatPredictor {
    /// Predictor that repeats the last input for `hold_ticks` missing ticks
    pub const fn new(hold_ticks: u32) -> Self {
        Self { hold_ticks }
    }
}

impl Default for RepeatPredictor {
    /// Hold for 6 ticks (100ms at 60Hz) before decaying
    fn default() -> Self {
        Self::new(6)
    }
}

impl RemoteInputPredictor for RepeatPredictor {
    fn predict_remote_input(
        &self,
        previous: &TickInput,
        ticks_since_real_input: u32,
    ) -> TickInput {
        if ticks_since_real_input <= self.hold_ticks {
            previous.clone()
        } else {
            TickInput::default()
        }
    }
}
