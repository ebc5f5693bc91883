//! Error types for the tickcast core.

use tickcast_shared::EntityId;

/// Errors surfaced by capability hooks and state transfer.
///
/// Missing collaborators (no input source or predictor configured) are
/// deliberately not represented here: the broadcaster answers those with an
/// empty input instead of failing, since some sessions legitimately have no
/// remote entities to predict for. Duplicate or absent registration is also
/// not an error; `add_receiver`/`remove_receiver` report it via `bool`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyncError {
    /// A receiver declared a capability it has not implemented.
    ///
    /// Hard failure at call time: a rollback manager that depends on
    /// load/interpolate must know immediately that an entity cannot be
    /// rewound.
    #[error("{entity}: declared capability '{hook}' is not implemented")]
    Unimplemented {
        /// Receiver that failed
        entity: EntityId,
        /// Hook or contract that was invoked
        hook: &'static str,
    },

    /// A snapshot is missing a field that `load_state` must restore.
    ///
    /// Partial load is a correctness bug, so this is fatal for the load.
    #[error("snapshot missing required field '{field}'")]
    MissingField {
        /// Name of the absent field
        field: &'static str,
    },

    /// A snapshot or input field holds the wrong kind of value
    #[error("field '{field}' has wrong type (expected {expected})")]
    TypeMismatch {
        /// Name of the offending field
        field: &'static str,
        /// Expected value kind
        expected: &'static str,
    },

    /// Interpolation weight outside [0, 1]
    #[error("interpolation weight {weight} outside [0, 1]")]
    BadWeight {
        /// The rejected weight
        weight: f32,
    },

    /// A consumer hook failed during phase dispatch.
    ///
    /// The broadcaster propagates this to the tick driver unmodified
    /// (fail-fast); the driver is expected to fail the whole step rather
    /// than run a partially simulated world.
    #[error("{entity}: hook '{hook}' failed: {message}")]
    Hook {
        /// Receiver whose hook failed
        entity: EntityId,
        /// Which hook failed
        hook: &'static str,
        /// Failure description
        message: String,
    },
}
