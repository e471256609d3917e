//! String-keyed finite state machine with ordered dispatch and hooks.

use crate::builder::MachineConfig;
use crate::checkpoint::{Checkpoint, CheckpointError, CHECKPOINT_VERSION};
use crate::core::{
    invoke, Hook, HookContext, Phase, StateDef, TransitionHistory, TransitionRecord,
};
use crate::emitter::{Emitter, Handler};
use crate::machine::error::FsmError;
use crate::machine::event::TransitionEvent;
use crate::machine::hooks::{MachineHooks, Notification};
use crate::validation::{self, ConfigViolation};
use chrono::Utc;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::{debug, warn};

/// Upper bound on triggers queued by hooks during one top-level call.
pub const MAX_DEFERRED_TRIGGERS: usize = 1024;

type Deferred = RefCell<VecDeque<String>>;

/// Finite state machine over named states.
///
/// The machine starts stopped. [`start`](Self::start) enters the configured
/// initial state, [`trigger`](Self::trigger) applies the first matching
/// transition event, and [`stop`](Self::stop) clears the run state.
///
/// Every notification phase emits the phase name, then the phase name
/// suffixed with the event or state name (`"before-start"`,
/// `"exit-home"`), then runs the machine hook, then the state or event hook.
///
/// # Example
///
/// ```rust
/// use dialog_fsm::builder::MachineBuilder;
/// use dialog_fsm::core::StateDef;
/// use dialog_fsm::machine::TransitionEvent;
///
/// let mut fsm = MachineBuilder::new()
///     .initial("home")
///     .state("home", StateDef::new())
///     .state("state2", StateDef::new())
///     .event(TransitionEvent::new("start", "home", "state2"))
///     .build();
///
/// fsm.start().unwrap();
/// assert!(fsm.is("home"));
///
/// assert!(fsm.trigger("start").unwrap());
/// assert_eq!(fsm.state(), Some("state2"));
/// assert_eq!(fsm.previous(), Some("home"));
/// ```
#[derive(Debug)]
pub struct StateMachine {
    initial: Option<String>,
    states: HashMap<String, StateDef>,
    events: Vec<TransitionEvent>,
    event_names: Vec<String>,
    hooks: MachineHooks,
    emitter: Emitter<Notification>,
    running: bool,
    state: Option<String>,
    previous: Option<String>,
    history: TransitionHistory,
}

impl StateMachine {
    /// Create a stopped machine from a configuration.
    ///
    /// Events are sorted by name (stable, so events sharing a name keep
    /// their configured order).
    pub fn new(config: MachineConfig) -> Self {
        let MachineConfig {
            initial,
            states,
            mut events,
            hooks,
        } = config;

        events.sort_by(|a, b| a.name.cmp(&b.name));
        let event_names = events.iter().map(|e| e.name.clone()).collect();

        Self {
            initial,
            states,
            events,
            event_names,
            hooks,
            emitter: Emitter::new(),
            running: false,
            state: None,
            previous: None,
            history: TransitionHistory::new(),
        }
    }

    /// Insert or replace a state definition.
    pub fn add_state(&mut self, name: impl Into<String>, state: StateDef) -> &mut Self {
        self.states.insert(name.into(), state);
        self
    }

    /// Insert a transition event, keeping events ordered by name.
    ///
    /// The event goes in front of any existing events with the same name.
    pub fn add_event(&mut self, event: TransitionEvent) -> &mut Self {
        let index = self.events.partition_point(|e| e.name < event.name);
        self.event_names.insert(index, event.name.clone());
        self.events.insert(index, event);
        self
    }

    pub fn set_initial(&mut self, initial: impl Into<String>) -> &mut Self {
        self.initial = Some(initial.into());
        self
    }

    /// Start (or restart) the machine in its initial state.
    ///
    /// A running machine is stopped first, so a restart emits `stop` before
    /// `start`. If the initial state is missing or not configured the machine
    /// is left stopped and an error describing the problem is returned.
    pub fn start(&mut self) -> Result<(), FsmError> {
        self.stop()?;

        let Some(initial) = self.initial.clone() else {
            warn!("start ignored, no initial state configured");
            return Err(FsmError::MissingInitialState);
        };
        if !self.states.contains_key(&initial) {
            warn!(initial = %initial, "start ignored, initial state is not configured");
            return Err(FsmError::UnknownInitialState { initial });
        }

        self.state = Some(initial.clone());
        self.running = true;
        self.history.clear();
        debug!(state = %initial, "machine started");

        let deferred = Deferred::default();
        self.run_start_phases(&initial, &deferred)?;
        self.drain(deferred.into_inner())
    }

    fn run_start_phases(&self, initial: &str, deferred: &Deferred) -> Result<(), FsmError> {
        let note = self.notification();

        self.emitter.emit(Phase::Start.as_str(), &note);
        let ctx = self.context(Phase::Start, None, deferred);
        invoke(self.hooks.on_start.as_ref(), &ctx).map_err(FsmError::hook(Phase::Start))?;

        self.emitter.emit(Phase::Enter.as_str(), &note);
        self.emitter.emit(&format!("{}-{initial}", Phase::Enter), &note);
        let ctx = self.context(Phase::Enter, None, deferred);
        let enter = self.states.get(initial).and_then(StateDef::enter_hook);
        invoke(enter, &ctx).map_err(FsmError::hook(Phase::Enter))
    }

    /// Stop the machine. Does nothing when already stopped.
    ///
    /// Triggers queued by the stop hook find the machine stopped and are
    /// ignored, including during the stop half of a restart.
    pub fn stop(&mut self) -> Result<(), FsmError> {
        if !self.running {
            return Ok(());
        }

        self.running = false;
        self.state = None;
        self.previous = None;
        debug!("machine stopped");

        let deferred = Deferred::default();
        self.emitter.emit(Phase::Stop.as_str(), &self.notification());
        let ctx = self.context(Phase::Stop, None, &deferred);
        invoke(self.hooks.on_stop.as_ref(), &ctx).map_err(FsmError::hook(Phase::Stop))?;
        self.drain(deferred.into_inner())
    }

    /// Fire the first event named `event_name` that can leave the current
    /// state.
    ///
    /// Returns `Ok(false)` without any notification when the machine is
    /// stopped or no event matches. Triggers queued by hooks run after this
    /// transition has completed.
    pub fn trigger(&mut self, event_name: &str) -> Result<bool, FsmError> {
        let (fired, deferred) = self.fire(event_name)?;
        self.drain(deferred)?;
        Ok(fired)
    }

    fn fire(&mut self, event_name: &str) -> Result<(bool, VecDeque<String>), FsmError> {
        if !self.running {
            warn!(event = event_name, "trigger ignored, machine is not running");
            return Ok((false, VecDeque::new()));
        }
        let Some(index) = self.find_transition(event_name) else {
            debug!(event = event_name, state = ?self.state, "no transition matches");
            return Ok((false, VecDeque::new()));
        };

        let deferred = Deferred::default();
        self.transition(index, &deferred)?;
        Ok((true, deferred.into_inner()))
    }

    fn drain(&mut self, mut queue: VecDeque<String>) -> Result<(), FsmError> {
        let mut processed = 0;
        while let Some(event_name) = queue.pop_front() {
            processed += 1;
            if processed > MAX_DEFERRED_TRIGGERS {
                return Err(FsmError::DeferredOverflow {
                    limit: MAX_DEFERRED_TRIGGERS,
                });
            }
            let (_, more) = self.fire(&event_name)?;
            queue.extend(more);
        }
        Ok(())
    }

    /// Index of the first event named `event_name` that can fire from the
    /// current state. Relies on `event_names` being sorted.
    fn find_transition(&self, event_name: &str) -> Option<usize> {
        let current = self.state.as_deref()?;
        let start = self
            .event_names
            .partition_point(|name| name.as_str() < event_name);
        self.events[start..]
            .iter()
            .take_while(|e| e.name == event_name)
            .position(|e| e.can_fire(current))
            .map(|offset| start + offset)
    }

    fn transition(&mut self, index: usize, deferred: &Deferred) -> Result<(), FsmError> {
        let Some(to) = self.events[index].target().map(str::to_string) else {
            return Ok(());
        };
        let from = self.state.replace(to.clone()).unwrap_or_default();
        self.previous = Some(from.clone());
        self.history.record(TransitionRecord::new(
            self.events[index].name.clone(),
            from.clone(),
            to.clone(),
        ));

        let event = &self.events[index];
        debug!(event = %event.name, from = %from, to = %to, "transition");

        self.notify(
            Phase::Before,
            &event.name,
            self.hooks.on_before.as_ref(),
            event.before_hook(),
            event,
            deferred,
        )?;
        self.notify(
            Phase::Exit,
            &from,
            self.hooks.on_exit.as_ref(),
            self.states.get(&from).and_then(StateDef::exit_hook),
            event,
            deferred,
        )?;
        self.notify(
            Phase::Enter,
            &to,
            self.hooks.on_enter.as_ref(),
            self.states.get(&to).and_then(StateDef::enter_hook),
            event,
            deferred,
        )?;
        self.notify(
            Phase::After,
            &event.name,
            self.hooks.on_after.as_ref(),
            event.after_hook(),
            event,
            deferred,
        )
    }

    fn notify(
        &self,
        phase: Phase,
        suffix: &str,
        machine_hook: Option<&Hook>,
        entity_hook: Option<&Hook>,
        event: &TransitionEvent,
        deferred: &Deferred,
    ) -> Result<(), FsmError> {
        let note = self.notification();
        self.emitter.emit(phase.as_str(), &note);
        self.emitter.emit(&format!("{phase}-{suffix}"), &note);

        let ctx = self.context(phase, Some(event), deferred);
        invoke(machine_hook, &ctx).map_err(FsmError::hook(phase))?;
        invoke(entity_hook, &ctx).map_err(FsmError::hook(phase))
    }

    fn notification(&self) -> Notification {
        Notification {
            previous: self.previous.clone(),
            state: self.state.clone(),
        }
    }

    fn context<'a>(
        &'a self,
        phase: Phase,
        event: Option<&'a TransitionEvent>,
        deferred: &'a Deferred,
    ) -> HookContext<'a> {
        HookContext::new(
            phase,
            event,
            self.previous.as_deref(),
            self.state.as_deref(),
            deferred,
        )
    }

    /// Whether the machine is running and currently in `name`.
    pub fn is(&self, name: &str) -> bool {
        self.state.as_deref() == Some(name)
    }

    /// Whether triggering `event_name` now would cause a transition.
    /// Always false for a stopped machine.
    pub fn valid_trigger(&self, event_name: &str) -> bool {
        self.running && self.find_transition(event_name).is_some()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    pub fn initial(&self) -> Option<&str> {
        self.initial.as_deref()
    }

    pub fn states(&self) -> &HashMap<String, StateDef> {
        &self.states
    }

    pub fn state_def(&self, name: &str) -> Option<&StateDef> {
        self.states.get(name)
    }

    /// Transition events, sorted by name.
    pub fn events(&self) -> &[TransitionEvent] {
        &self.events
    }

    /// Event names, index-aligned with [`events`](Self::events).
    pub fn event_names(&self) -> &[String] {
        &self.event_names
    }

    pub fn hooks(&self) -> &MachineHooks {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut MachineHooks {
        &mut self.hooks
    }

    pub fn history(&self) -> &TransitionHistory {
        &self.history
    }

    pub fn emitter(&self) -> &Emitter<Notification> {
        &self.emitter
    }

    /// Register an observer for an emitted name such as `"enter"` or
    /// `"after-start"`.
    pub fn on(
        &mut self,
        event_name: impl Into<String>,
        handler: Handler<Notification>,
    ) -> &mut Self {
        self.emitter.on(event_name, handler);
        self
    }

    /// Unregister observers. See [`Emitter::off`].
    pub fn off(
        &mut self,
        event_name: Option<&str>,
        handler: Option<&Handler<Notification>>,
    ) -> &mut Self {
        self.emitter.off(event_name, handler);
        self
    }

    /// Emit a custom name to this machine's observers.
    pub fn emit(&self, event_name: &str, payload: &Notification) -> &Self {
        self.emitter.emit(event_name, payload);
        self
    }

    /// Check the machine's configuration, collecting every problem found.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        validation::validate_parts(self.initial.as_deref(), &self.states, &self.events)
    }

    /// Capture the current run state.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            initial: self.initial.clone(),
            running: self.running,
            state: self.state.clone(),
            previous: self.previous.clone(),
            history: self.history.clone(),
        }
    }

    /// Install a previously captured run state without firing any
    /// notification.
    pub fn restore(&mut self, checkpoint: &Checkpoint) -> Result<(), CheckpointError> {
        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: checkpoint.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        if checkpoint.initial != self.initial {
            return Err(CheckpointError::ValidationFailed(format!(
                "checkpoint initial state {:?} does not match {:?}",
                checkpoint.initial, self.initial
            )));
        }
        if checkpoint.running != checkpoint.state.is_some() {
            return Err(CheckpointError::ValidationFailed(
                "a checkpoint has a state exactly when it is running".to_string(),
            ));
        }
        if !checkpoint.running && checkpoint.previous.is_some() {
            return Err(CheckpointError::ValidationFailed(
                "a stopped checkpoint has no previous state".to_string(),
            ));
        }
        for state in [&checkpoint.state, &checkpoint.previous]
            .into_iter()
            .flatten()
        {
            if !self.states.contains_key(state) {
                return Err(CheckpointError::ValidationFailed(format!(
                    "state '{state}' is not configured"
                )));
            }
        }

        self.running = checkpoint.running;
        self.state = checkpoint.state.clone();
        self.previous = checkpoint.previous.clone();
        self.history = checkpoint.history.clone();
        debug!(checkpoint = %checkpoint.id, state = ?self.state, "machine restored");
        Ok(())
    }
}
