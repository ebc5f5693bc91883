//! Authority resolution.
//!
//! Exactly one participant is the authority (network master) for each
//! entity per tick: its locally simulated state is ground truth, and it
//! pushes that state to the puppets. The answer comes from the external
//! networking layer; this module only defines the seam.

use tickcast_shared::EntityId;

/// Resolves "is this process the network master for that entity".
///
/// Queried per tick; the networking layer may reassign authority between
/// ticks (e.g. on host migration). Shared with simulation entities via
/// `Arc`, so implementations must be `Send + Sync`.
pub trait Authority: Send + Sync {
    /// True if this process drives the entity's state this tick
    fn is_master(&self, entity: EntityId) -> bool;
}

/// Fixed authority answer for every entity.
///
/// `FixedAuthority(true)` is the single-machine/local-session case where
/// this process simulates everything; `FixedAuthority(false)` makes every
/// entity a puppet. Tests use both sides of the gate.
#[derive(Debug, Clone, Copy)]
pub struct FixedAuthority(pub bool);

impl Authority for FixedAuthority {
    fn is_master(&self, _entity: EntityId) -> bool {
        self.0
    }
}
