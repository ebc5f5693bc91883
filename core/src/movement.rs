//! Kinematic movement entity.
//!
//! The canonical tickcast consumer: deterministic input-driven motion with
//! authority-gated replication. One `process` call per tick either does
//! nothing (disabled, or this process is not the entity's authority) or
//! advances the position by `direction * speed * delta` and pushes the
//! result to observers.
//!
//! Motion uses the fixed tick delta, never the wall clock: the same input
//! applied to the same starting position always lands on the same resulting
//! position, on every peer and on every resimulation of the tick.

use std::sync::Arc;

use tickcast_shared::{
    EntityId, PositionUpdate, StateSnapshot, StateValue, TickInput, TickRate, Vec2,
};

use crate::authority::Authority;
use crate::error::SyncError;
use crate::replication::PositionSink;
use crate::sync::{Capabilities, SyncReceiver};

/// Default speed in units per second
pub const DEFAULT_SPEED: f32 = 10.0;

fn vec2_field(snapshot: &StateSnapshot, field: &'static str) -> Result<Vec2, SyncError> {
    match snapshot.get(field) {
        Some(StateValue::Vec2(v)) => Ok(*v),
        Some(_) => Err(SyncError::TypeMismatch {
            field,
            expected: "vec2",
        }),
        None => Err(SyncError::MissingField { field }),
    }
}

fn float_field(snapshot: &StateSnapshot, field: &'static str) -> Result<f32, SyncError> {
    match snapshot.get(field) {
        Some(StateValue::Float(v)) => Ok(*v),
        Some(_) => Err(SyncError::TypeMismatch {
            field,
            expected: "float",
        }),
        None => Err(SyncError::MissingField { field }),
    }
}

fn bool_field(snapshot: &StateSnapshot, field: &'static str) -> Result<bool, SyncError> {
    match snapshot.get(field) {
        Some(StateValue::Bool(v)) => Ok(*v),
        Some(_) => Err(SyncError::TypeMismatch {
            field,
            expected: "bool",
        }),
        None => Err(SyncError::MissingField { field }),
    }
}

/// Input-driven kinematic body with authority-gated replication.
///
/// On the authority, `process` simulates and replicates. On puppets,
/// `process` is a no-op and the position is whatever the last delivered
/// [`PositionUpdate`] overwrote it with (see
/// [`apply_remote_position`](Self::apply_remote_position)).
pub struct KinematicMovement {
    entity: EntityId,
    enabled: bool,
    direction: Vec2,
    speed: f32,
    position: Vec2,
    /// Visual position blended by `interpolate_state`; never read by
    /// simulation.
    render_position: Vec2,
    tick_rate: TickRate,
    authority: Arc<dyn Authority>,
    sink: Box<dyn PositionSink>,
}

impl KinematicMovement {
    /// Create a movement entity at the origin.
    ///
    /// The authority resolver and the replication sink are injected; the
    /// entity never looks collaborators up implicitly.
    pub fn new(
        entity: EntityId,
        tick_rate: TickRate,
        authority: Arc<dyn Authority>,
        sink: Box<dyn PositionSink>,
    ) -> Self {
        Self {
            entity,
            enabled: true,
            direction: Vec2::ZERO,
            speed: DEFAULT_SPEED,
            position: Vec2::ZERO,
            render_position: Vec2::ZERO,
            tick_rate,
            authority,
            sink,
        }
    }

    /// Current authoritative position
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Current visual position (follows interpolation, not simulation)
    pub fn render_position(&self) -> Vec2 {
        self.render_position
    }

    /// Set the movement direction used when the tick input carries none
    pub fn set_direction(&mut self, direction: Vec2) {
        self.direction = direction;
    }

    /// Set the speed (units per second) used when the tick input carries none
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Enable or disable simulation for this entity
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Puppet-side overwrite from a delivered position push.
    ///
    /// Unconditional by contract: the channel is unordered and unreliable,
    /// so whatever arrives last wins, with no sequence checking here.
    pub fn apply_remote_position(&mut self, position: Vec2) {
        self.position = position;
        self.render_position = position;
    }
}

impl SyncReceiver for KinematicMovement {
    fn entity(&self) -> EntityId {
        self.entity
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::PROCESS | Capabilities::STATE_SYNC
    }

    fn process(&mut self, input: &TickInput) -> Result<(), SyncError> {
        // Gate: puppets and disabled entities neither move nor send.
        if !self.enabled || !self.authority.is_master(self.entity) {
            return Ok(());
        }

        let direction = input.vec2_value("direction").unwrap_or(self.direction);
        let speed = input.float_value("speed").unwrap_or(self.speed);

        let displacement = direction.scale(speed * self.tick_rate.delta());
        if displacement == Vec2::ZERO {
            return Ok(());
        }

        self.position += displacement;
        self.sink
            .push(PositionUpdate::new(self.entity, self.position));
        Ok(())
    }

    fn save_state(&self) -> Result<StateSnapshot, SyncError> {
        Ok(StateSnapshot::new()
            .with("position", self.position)
            .with("direction", self.direction)
            .with("speed", self.speed)
            .with("enabled", self.enabled))
    }

    fn load_state(&mut self, snapshot: &StateSnapshot) -> Result<(), SyncError> {
        // Read every field before writing any, so a bad snapshot cannot
        // leave the entity half-loaded.
        let position = vec2_field(snapshot, "position")?;
        let direction = vec2_field(snapshot, "direction")?;
        let speed = float_field(snapshot, "speed")?;
        let enabled = bool_field(snapshot, "enabled")?;

        self.position = position;
        self.direction = direction;
        self.speed = speed;
        self.enabled = enabled;
        Ok(())
    }

    fn interpolate_state(
        &mut self,
        old: &StateSnapshot,
        new: &StateSnapshot,
        weight: f32,
    ) -> Result<(), SyncError> {
        if !(0.0..=1.0).contains(&weight) {
            return Err(SyncError::BadWeight { weight });
        }
        let old_position = vec2_field(old, "position")?;
        let new_position = vec2_field(new, "position")?;
        self.render_position = Vec2::lerp(old_position, new_position, weight);
        Ok(())
    }
}
