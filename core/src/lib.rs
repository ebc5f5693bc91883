//! Tickcast Core - deterministic rollback-netcode contracts
//!
//! This crate provides the per-tick machinery an external rollback/sync
//! manager builds on: input fan-out to consumer entities, the state
//! snapshot contract that makes entities rewindable, missing-input
//! prediction, and authority-gated replication.
//!
//! # Architecture
//!
//! - [`SyncReceiver`] - Capability trait implemented by consumer entities
//! - [`InputBroadcaster`] - Fans one tick's input out in three ordered phases
//! - [`RepeatPredictor`] - Canonical hold-last-input predictor
//! - [`KinematicMovement`] - Canonical consumer: deterministic motion plus
//!   replication push
//!
//! The sync manager drives each tick as `pre_process` → `process` →
//! `post_process`, saves/loads entity snapshots at tick boundaries, and
//! blends snapshots at render boundaries. Everything is single-threaded
//! and synchronous; a hook that blocks stalls the whole tick.

pub mod authority;
pub mod broadcaster;
pub mod error;
#[cfg(test)]
mod integration;
pub mod movement;
pub mod predictor;
pub mod replication;
pub mod sync;

// Re-export core traits and types
pub use authority::{Authority, FixedAuthority};
pub use broadcaster::InputBroadcaster;
pub use error::SyncError;
pub use movement::{KinematicMovement, DEFAULT_SPEED};
pub use predictor::RepeatPredictor;
pub use replication::{LocalChannel, NullSink, PositionSink};
pub use sync::{Capabilities, LocalInputSource, RemoteInputPredictor, SyncReceiver};

// Re-export shared types for convenience
pub use tickcast_shared::{
    EntityId, InputValue, PositionUpdate, StateSnapshot, StateValue, Tick, TickInput, TickRate,
    Vec2,
};
