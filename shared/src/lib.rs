//! Shared types for the tickcast rollback-netcode core.
//!
//! Everything in this crate is plain data: input values, state snapshots,
//! tick identity, deterministic 2D math, and the replication wire messages
//! exchanged between peers. The `tickcast-core` crate builds the broadcast
//! and simulation machinery on top of these types.

pub mod input;
pub mod math;
pub mod message;
pub mod state;
pub mod tick;

pub use input::{InputValue, TickInput};
pub use math::Vec2;
pub use message::{EntityId, PositionUpdate};
pub use state::{StateSnapshot, StateValue};
pub use tick::{Tick, TickRate};
