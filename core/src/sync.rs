//! Capability interfaces for tick-synchronized entities.
//!
//! An entity participates in the per-tick protocol by implementing
//! [`SyncReceiver`] and declaring, once, which hooks it actually supports
//! via [`Capabilities`]. Registration classifies the entity against that
//! fixed set of tags and files it into the matching phase collections; there
//! is no runtime type inspection afterwards.
//!
//! The state-transfer methods default to a hard [`SyncError::Unimplemented`]
//! failure. An entity that declares [`Capabilities::STATE_SYNC`] without
//! overriding them fails loudly the first time the rollback manager tries to
//! rewind it, which is exactly when the operator needs to find out.

use bitflags::bitflags;
use tickcast_shared::{EntityId, StateSnapshot, TickInput};

use crate::error::SyncError;

bitflags! {
    /// The closed set of capability tags a receiver can declare.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Capabilities: u8 {
        /// Hooks the pre-process phase
        const PRE_PROCESS = 1 << 0;
        /// Hooks the process phase
        const PROCESS = 1 << 1;
        /// Hooks the post-process phase
        const POST_PROCESS = 1 << 2;
        /// Implements save/load/interpolate for rollback
        const STATE_SYNC = 1 << 3;
    }
}

/// A tick-synchronized consumer entity.
///
/// Hooks receive the tick's input by shared reference and may mutate only
/// the receiver's own state. Cross-entity effects go through the explicit
/// replication push path, never through a sibling hook. Hooks must return
/// promptly: the whole simulation is single-threaded and tick-driven, so a
/// blocking hook stalls every entity.
pub trait SyncReceiver {
    /// Stable identity of this entity
    fn entity(&self) -> EntityId;

    /// Which hooks this receiver supports.
    ///
    /// Evaluated once, at registration. Changing the answer afterwards has
    /// no effect until the receiver is re-registered.
    fn capabilities(&self) -> Capabilities;

    /// Pre-process phase hook
    fn pre_process(&mut self, input: &TickInput) -> Result<(), SyncError> {
        let _ = input;
        Ok(())
    }

    /// Process phase hook
    fn process(&mut self, input: &TickInput) -> Result<(), SyncError> {
        let _ = input;
        Ok(())
    }

    /// Post-process phase hook
    fn post_process(&mut self, input: &TickInput) -> Result<(), SyncError> {
        let _ = input;
        Ok(())
    }

    /// Capture a complete snapshot of simulation-relevant state.
    ///
    /// Loading the returned snapshot later must reproduce identical
    /// subsequent behavior, so every field that influences simulation
    /// belongs in it.
    fn save_state(&self) -> Result<StateSnapshot, SyncError> {
        Err(SyncError::Unimplemented {
            entity: self.entity(),
            hook: "save_state",
        })
    }

    /// Restore state from a snapshot.
    ///
    /// Must fully overwrite every field captured by `save_state`; a partial
    /// load is a correctness bug and must fail instead.
    fn load_state(&mut self, snapshot: &StateSnapshot) -> Result<(), SyncError> {
        let _ = snapshot;
        Err(SyncError::Unimplemented {
            entity: self.entity(),
            hook: "load_state",
        })
    }

    /// Blend two authoritative snapshots into the entity's visual state.
    ///
    /// `weight == 0.0` must reproduce `old`, `weight == 1.0` must reproduce
    /// `new`. This affects render state only; it is not a substitute for
    /// `load_state` during resimulation.
    fn interpolate_state(
        &mut self,
        old: &StateSnapshot,
        new: &StateSnapshot,
        weight: f32,
    ) -> Result<(), SyncError> {
        let _ = (old, new, weight);
        Err(SyncError::Unimplemented {
            entity: self.entity(),
            hook: "interpolate_state",
        })
    }
}

/// Produces this tick's locally captured input.
///
/// Called at most once per tick, only on the one configured source.
pub trait LocalInputSource {
    /// Capture the current tick's local input
    fn local_input(&mut self) -> TickInput;
}

/// Guesses input for a remote entity whose real input has not arrived.
///
/// Must be a pure function of its arguments: resimulation replays
/// predictions, and a stateful predictor would diverge between the first
/// simulation and the replay.
pub trait RemoteInputPredictor {
    /// Predict a substitute for a missing remote input.
    ///
    /// `previous` is the last known real (or previously predicted) input.
    /// `ticks_since_real_input` starts at 1 for the first missing tick and
    /// increments until real input resumes; the caller resets it to 0, never
    /// the predictor.
    fn predict_remote_input(&self, previous: &TickInput, ticks_since_real_input: u32)
        -> TickInput;
}
