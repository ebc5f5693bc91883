//! Per-tick input fan-out.
//!
//! The [`InputBroadcaster`] is the single point that decouples obtaining
//! input from consuming it: one configured [`LocalInputSource`] (or
//! [`RemoteInputPredictor`] for missing remote input) produces the tick's
//! input, and the broadcaster forwards it to every registered receiver in
//! three ordered phases.
//!
//! # Phase ordering
//!
//! The external sync manager calls `pre_process`, `process`, `post_process`
//! once each per tick, in that order. Each call completes the hook for every
//! member of its phase set before returning, so pre-process for all
//! receivers finishes before process starts for any receiver. Iteration
//! order *within* one phase is unspecified (the sets are unordered); hooks
//! must not depend on sibling execution order.
//!
//! # Registration during dispatch
//!
//! Phase dispatch borrows the broadcaster mutably to completion, so
//! `add_receiver`/`remove_receiver` cannot be called from inside a hook of
//! the same broadcaster. Defer registration changes to tick boundaries.

use hashbrown::{HashMap, HashSet};
use tickcast_shared::{EntityId, TickInput};

use crate::error::SyncError;
use crate::sync::{Capabilities, LocalInputSource, RemoteInputPredictor, SyncReceiver};

/// Fans one tick's input out to registered consumer entities.
///
/// Owns its receivers; the external rollback manager reaches individual
/// entities through [`receiver`](Self::receiver) /
/// [`receiver_mut`](Self::receiver_mut) for save/load/interpolate calls.
#[derive(Default)]
pub struct InputBroadcaster {
    receivers: HashMap<EntityId, Box<dyn SyncReceiver>>,
    pre_process_set: HashSet<EntityId>,
    process_set: HashSet<EntityId>,
    post_process_set: HashSet<EntityId>,
    input_source: Option<Box<dyn LocalInputSource>>,
    input_predictor: Option<Box<dyn RemoteInputPredictor>>,
}

impl InputBroadcaster {
    /// Create a broadcaster with no receivers and no collaborators
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the local input source.
    ///
    /// Supplied by the host at initialization (dependency injection; there
    /// is no implicit registry lookup). Replaces any previous source.
    pub fn set_input_source(&mut self, source: Box<dyn LocalInputSource>) {
        self.input_source = Some(source);
    }

    /// Install the remote input predictor. Replaces any previous predictor.
    pub fn set_input_predictor(&mut self, predictor: Box<dyn RemoteInputPredictor>) {
        self.input_predictor = Some(predictor);
    }

    /// Register a receiver, classifying it into phase sets once.
    ///
    /// Returns `false` without touching anything if the receiver's entity id
    /// is already registered: registration is idempotent, not additive.
    pub fn add_receiver(&mut self, receiver: Box<dyn SyncReceiver>) -> bool {
        let id = receiver.entity();
        if self.receivers.contains_key(&id) {
            log::debug!("{} already registered, ignoring", id);
            return false;
        }

        let caps = receiver.capabilities();
        if caps.contains(Capabilities::PRE_PROCESS) {
            self.pre_process_set.insert(id);
        }
        if caps.contains(Capabilities::PROCESS) {
            self.process_set.insert(id);
        }
        if caps.contains(Capabilities::POST_PROCESS) {
            self.post_process_set.insert(id);
        }
        self.receivers.insert(id, receiver);
        log::debug!("registered {} with capabilities {:?}", id, caps);
        true
    }

    /// Unregister a receiver, removing it from every phase set together.
    ///
    /// Returns `false` if the entity was not registered.
    pub fn remove_receiver(&mut self, id: EntityId) -> bool {
        if self.receivers.remove(&id).is_none() {
            return false;
        }
        self.pre_process_set.remove(&id);
        self.process_set.remove(&id);
        self.post_process_set.remove(&id);
        log::debug!("unregistered {}", id);
        true
    }

    /// Access a registered receiver
    pub fn receiver(&self, id: EntityId) -> Option<&dyn SyncReceiver> {
        self.receivers.get(&id).map(|r| r.as_ref())
    }

    /// Mutable access to a registered receiver (state transfer entry point)
    pub fn receiver_mut(&mut self, id: EntityId) -> Option<&mut dyn SyncReceiver> {
        self.receivers.get_mut(&id).map(|r| &mut **r as &mut dyn SyncReceiver)
    }

    /// True if the entity is registered
    pub fn contains(&self, id: EntityId) -> bool {
        self.receivers.contains_key(&id)
    }

    /// Number of registered receivers
    pub fn len(&self) -> usize {
        self.receivers.len()
    }

    /// True if no receivers are registered
    pub fn is_empty(&self) -> bool {
        self.receivers.is_empty()
    }

    /// This tick's locally captured input.
    ///
    /// Never fails: with no source configured the empty input is returned,
    /// since some sessions have nothing to capture.
    pub fn local_input(&mut self) -> TickInput {
        match &mut self.input_source {
            Some(source) => source.local_input(),
            None => {
                log::warn!("local_input requested but no input source configured");
                TickInput::default()
            }
        }
    }

    /// Predicted substitute for a missing remote input.
    ///
    /// Same no-collaborator policy as [`local_input`](Self::local_input).
    pub fn predict_remote_input(
        &self,
        previous: &TickInput,
        ticks_since_real_input: u32,
    ) -> TickInput {
        match &self.input_predictor {
            Some(predictor) => predictor.predict_remote_input(previous, ticks_since_real_input),
            None => {
                log::warn!("predict_remote_input requested but no predictor configured");
                TickInput::default()
            }
        }
    }

    /// Run the pre-process hook on every member of the pre-process set.
    ///
    /// Fails fast: the first hook error propagates immediately and remaining
    /// members of the phase are not invoked. The tick driver treats that as
    /// fatal for the step.
    pub fn pre_process(&mut self, input: &TickInput) -> Result<(), SyncError> {
        log::trace!("pre_process: {} receivers", self.pre_process_set.len());
        for id in &self.pre_process_set {
            if let Some(receiver) = self.receivers.get_mut(id) {
                receiver.pre_process(input)?;
            }
        }
        Ok(())
    }

    /// Run the process hook on every member of the process set (fail-fast)
    pub fn process(&mut self, input: &TickInput) -> Result<(), SyncError> {
        log::trace!("process: {} receivers", self.process_set.len());
        for id in &self.process_set {
            if let Some(receiver) = self.receivers.get_mut(id) {
                receiver.process(input)?;
            }
        }
        Ok(())
    }

    /// Run the post-process hook on every member of the post-process set
    /// (fail-fast)
    pub fn post_process(&mut self, input: &TickInput) -> Result<(), SyncError> {
        log::trace!("post_process: {} receivers", self.post_process_set.len());
        for id in &self.post_process_set {
            if let Some(receiver) = self.receivers.get_mut(id) {
                receiver.post_process(input)?;
            }
        }
        Ok(())
    }

    #[cfg(test)]
    fn phase_membership(&self, id: EntityId) -> (bool, bool, bool) {
        (
            self.pre_process_set.contains(&id),
            self.process_set.contains(&id),
            self.post_process_set.contains(&id),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use tickcast_shared::Vec2;

    use super::*;

    /// Which phase ran, for ordering assertions
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Phase {
        Pre,
        Process,
        Post,
    }

    /// Shared call log across recorder receivers
    type CallLog = Rc<RefCell<Vec<(EntityId, Phase)>>>;

    struct Recorder {
        id: EntityId,
        caps: Capabilities,
        log: CallLog,
        fail_in_process: bool,
    }

    impl Recorder {
        fn new(id: u64, caps: Capabilities, log: CallLog) -> Box<Self> {
            Box::new(Self {
                id: EntityId(id),
                caps,
                log,
                fail_in_process: false,
            })
        }
    }

    impl SyncReceiver for Recorder {
        fn entity(&self) -> EntityId {
            self.id
        }

        fn capabilities(&self) -> Capabilities {
            self.caps
        }

        fn pre_process(&mut self, _input: &TickInput) -> Result<(), SyncError> {
            self.log.borrow_mut().push((self.id, Phase::Pre));
            Ok(())
        }

        fn process(&mut self, _input: &TickInput) -> Result<(), SyncError> {
            if self.fail_in_process {
                return Err(SyncError::Hook {
                    entity: self.id,
                    hook: "process",
                    message: "boom".into(),
                });
            }
            self.log.borrow_mut().push((self.id, Phase::Process));
            Ok(())
        }

        fn post_process(&mut self, _input: &TickInput) -> Result<(), SyncError> {
            self.log.borrow_mut().push((self.id, Phase::Post));
            Ok(())
        }
    }

    fn call_log() -> CallLog {
        Rc::new(RefCell::new(Vec::new()))
    }

    #[test]
    fn test_add_receiver_classifies_by_capability() {
        let log = call_log();
        let mut broadcaster = InputBroadcaster::new();
        broadcaster.add_receiver(Recorder::new(1, Capabilities::PRE_PROCESS, log.clone()));
        broadcaster.add_receiver(Recorder::new(
            2,
            Capabilities::PROCESS | Capabilities::POST_PROCESS,
            log.clone(),
        ));
        broadcaster.add_receiver(Recorder::new(3, Capabilities::empty(), log));

        assert_eq!(broadcaster.len(), 3);
        assert_eq!(broadcaster.phase_membership(EntityId(1)), (true, false, false));
        assert_eq!(broadcaster.phase_membership(EntityId(2)), (false, true, true));
        assert_eq!(broadcaster.phase_membership(EntityId(3)), (false, false, false));
    }

    #[test]
    fn test_add_receiver_is_idempotent() {
        let log = call_log();
        let mut broadcaster = InputBroadcaster::new();
        assert!(broadcaster.add_receiver(Recorder::new(1, Capabilities::PROCESS, log.clone())));
        // Second registration under the same id: no-op, all sets unchanged.
        assert!(!broadcaster.add_receiver(Recorder::new(
            1,
            Capabilities::PRE_PROCESS | Capabilities::POST_PROCESS,
            log,
        )));
        assert_eq!(broadcaster.len(), 1);
        assert_eq!(broadcaster.phase_membership(EntityId(1)), (false, true, false));
    }

    #[test]
    fn test_remove_receiver_clears_all_phase_sets() {
        let log = call_log();
        let mut broadcaster = InputBroadcaster::new();
        broadcaster.add_receiver(Recorder::new(1, Capabilities::all(), log));

        assert!(broadcaster.remove_receiver(EntityId(1)));
        assert!(!broadcaster.contains(EntityId(1)));
        assert_eq!(broadcaster.phase_membership(EntityId(1)), (false, false, false));
        // Removing an absent entity reports a no-op.
        assert!(!broadcaster.remove_receiver(EntityId(1)));
    }

    #[test]
    fn test_phase_ordering_across_all_receivers() {
        let log = call_log();
        let mut broadcaster = InputBroadcaster::new();
        for id in 1..=4 {
            broadcaster.add_receiver(Recorder::new(id, Capabilities::all(), log.clone()));
        }

        let input = TickInput::new();
        broadcaster.pre_process(&input).unwrap();
        broadcaster.process(&input).unwrap();
        broadcaster.post_process(&input).unwrap();

        let calls = log.borrow();
        assert_eq!(calls.len(), 12);
        // Every pre-process completes before any process, and every process
        // before any post-process. Order within a phase is unspecified.
        let pre_end = calls.iter().rposition(|(_, p)| *p == Phase::Pre).unwrap();
        let process_start = calls.iter().position(|(_, p)| *p == Phase::Process).unwrap();
        let process_end = calls.iter().rposition(|(_, p)| *p == Phase::Process).unwrap();
        let post_start = calls.iter().position(|(_, p)| *p == Phase::Post).unwrap();
        assert!(pre_end < process_start);
        assert!(process_end < post_start);
    }

    #[test]
    fn test_hook_error_propagates() {
        let log = call_log();
        let mut broadcaster = InputBroadcaster::new();
        let mut failing = Recorder::new(1, Capabilities::PROCESS, log.clone());
        failing.fail_in_process = true;
        broadcaster.add_receiver(failing);

        let err = broadcaster.process(&TickInput::new()).unwrap_err();
        assert!(matches!(err, SyncError::Hook { entity, .. } if entity == EntityId(1)));
    }

    #[test]
    fn test_no_collaborators_yields_empty_input() {
        let mut broadcaster = InputBroadcaster::new();
        assert!(broadcaster.local_input().is_empty());
        let previous = TickInput::new().with("direction", Vec2::new(0.0, 1.0));
        assert!(broadcaster.predict_remote_input(&previous, 3).is_empty());
    }

    #[test]
    fn test_collaborator_delegation() {
        struct Source;
        impl LocalInputSource for Source {
            fn local_input(&mut self) -> TickInput {
                TickInput::new().with("jump", true)
            }
        }

        struct Hold;
        impl RemoteInputPredictor for Hold {
            fn predict_remote_input(&self, previous: &TickInput, _ticks: u32) -> TickInput {
                previous.clone()
            }
        }

        let mut broadcaster = InputBroadcaster::new();
        broadcaster.set_input_source(Box::new(Source));
        broadcaster.set_input_predictor(Box::new(Hold));

        assert_eq!(broadcaster.local_input().bool_value("jump"), Some(true));
        let previous = TickInput::new().with("fire", true);
        assert_eq!(broadcaster.predict_remote_input(&previous, 1), previous);
    }
}
