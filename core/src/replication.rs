//! Outbound replication seam.
//!
//! Authoritative entities push their resulting state to observers through a
//! [`PositionSink`]. The channel behind the sink is unordered, unreliable,
//! and idempotent: a push may be dropped, duplicated, or overtaken, and the
//! receiving side applies whatever arrives as an unconditional overwrite.
//! Pushes are therefore fire-and-forget and infallible at this layer;
//! sequencing, if anyone needs it, belongs to the transport.
//!
//! [`LocalChannel`] is the loopback stand-in used for tests and
//! single-machine sessions, the same role the real transport plays in a
//! networked deployment.

use hashbrown::HashMap;
use tickcast_shared::{EntityId, PositionUpdate};

/// Fire-and-forget sink for position pushes.
///
/// Semantically targeted at "all other participants"; excluding the sender
/// (and non-authorities) is the transport's filtering job, not the
/// entity's.
pub trait PositionSink {
    /// Push one position update. Never fails; delivery is not guaranteed.
    fn push(&mut self, update: PositionUpdate);
}

/// Sink that discards every push (sessions with no observers)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl PositionSink for NullSink {
    fn push(&mut self, _update: PositionUpdate) {}
}

/// In-memory loopback channel with last-value-wins delivery.
///
/// Keeps only the most recent update per entity, which is exactly what the
/// unreliable channel guarantees downstream: an observer may miss
/// intermediate positions but converges on the latest delivered one.
#[derive(Debug, Default)]
pub struct LocalChannel {
    latest: HashMap<EntityId, PositionUpdate>,
    pushed: usize,
}

impl LocalChannel {
    /// Create an empty channel
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent update for an entity, if any was delivered
    pub fn latest(&self, entity: EntityId) -> Option<PositionUpdate> {
        self.latest.get(&entity).copied()
    }

    /// Take all pending latest-value updates, clearing the channel.
    ///
    /// The observer side applies each as an unconditional overwrite.
    pub fn drain_latest(&mut self) -> Vec<PositionUpdate> {
        self.latest.drain().map(|(_, update)| update).collect()
    }

    /// Total pushes ever made, including overwritten ones
    pub fn push_count(&self) -> usize {
        self.pushed
    }
}

impl PositionSink for LocalChannel {
    fn push(&mut self, update: PositionUpdate) {
        log::trace!("push {} -> {:?}", update.entity, update.position);
        self.pushed += 1;
        self.latest.insert(update.entity, update);
    }
}

/// Shared handle to a sink.
///
/// The simulation is single-threaded and tick-driven, so entities and the
/// host can share one channel through `Rc<RefCell<_>>`: entities push into
/// it during `process`, the host drains it at the tick boundary.
impl<S: PositionSink> PositionSink for std::rc::Rc<std::cell::RefCell<S>> {
    fn push(&mut self, update: PositionUpdate) {
        self.borrow_mut().push(update);
    }
}
