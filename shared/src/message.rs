//! Replication messages exchanged between peers.
//!
//! These are the payloads handed to the transport layer. tickcast does not
//! own the wire framing; it encodes messages with bitcode and lets the
//! transport deliver them over an unordered, unreliable channel.

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// Identity of a simulated entity.
///
/// Assigned by the host when the entity is created; stable for the entity's
/// lifetime and identical on every peer.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    Encode, Decode,
)]
pub struct EntityId(pub u64);

impl core::fmt::Display for EntityId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "entity {}", self.0)
    }
}

/// "Set absolute position" push from an entity's authority to its observers.
///
/// Delivered over an unordered, unreliable channel and applied as an
/// unconditional overwrite (last-delivered-wins). There is deliberately no
/// sequence number at this layer: observers tolerate stale or out-of-order
/// overwrites, and resimulation depends on that tolerance. Do not upgrade
/// this to a reliable or ordered channel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct PositionUpdate {
    /// Entity whose position is being replicated
    pub entity: EntityId,
    /// New absolute position
    pub position: Vec2,
}

impl PositionUpdate {
    /// Create a position push for an entity
    pub const fn new(entity: EntityId, position: Vec2) -> Self {
        Self { entity, position }
    }
}
