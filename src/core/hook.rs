//! Lifecycle hooks.
//!
//! Hooks are user callbacks attached to the machine, to a state or to a
//! transition event. Each receives a read-only [`HookContext`] describing the
//! phase being run. Hooks cannot mutate the machine directly; a hook that
//! needs a follow-up transition queues it with [`HookContext::trigger`].

use crate::machine::TransitionEvent;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Shared hook callback.
pub type Hook = Arc<dyn Fn(&HookContext<'_>) -> Result<(), HookError> + Send + Sync>;

/// Wrap a closure as a [`Hook`].
///
/// # Example
///
/// ```rust
/// use dialog_fsm::core::{hook, Hook};
///
/// let on_enter: Hook = hook(|ctx| {
///     println!("entered {:?}", ctx.current());
///     Ok(())
/// });
/// ```
pub fn hook<F>(f: F) -> Hook
where
    F: Fn(&HookContext<'_>) -> Result<(), HookError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Error returned by a failing hook.
///
/// A failing hook aborts the remaining phases of the operation that ran it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Notification phase of a machine operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Start,
    Stop,
    Before,
    Exit,
    Enter,
    After,
}

impl Phase {
    /// Name emitted for this phase (`"before"`, `"enter"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Start => "start",
            Phase::Stop => "stop",
            Phase::Before => "before",
            Phase::Exit => "exit",
            Phase::Enter => "enter",
            Phase::After => "after",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// View of the machine handed to every hook.
pub struct HookContext<'a> {
    phase: Phase,
    event: Option<&'a TransitionEvent>,
    previous: Option<&'a str>,
    current: Option<&'a str>,
    deferred: &'a RefCell<VecDeque<String>>,
}

impl<'a> HookContext<'a> {
    pub(crate) fn new(
        phase: Phase,
        event: Option<&'a TransitionEvent>,
        previous: Option<&'a str>,
        current: Option<&'a str>,
        deferred: &'a RefCell<VecDeque<String>>,
    ) -> Self {
        Self {
            phase,
            event,
            previous,
            current,
            deferred,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The transition event being applied. `None` for start and stop.
    pub fn event(&self) -> Option<&'a TransitionEvent> {
        self.event
    }

    pub fn previous(&self) -> Option<&'a str> {
        self.previous
    }

    pub fn current(&self) -> Option<&'a str> {
        self.current
    }

    /// Queue a trigger to run once the current operation has finished all
    /// of its phases. Queued triggers run in the order they were queued.
    pub fn trigger(&self, event_name: impl Into<String>) {
        self.deferred.borrow_mut().push_back(event_name.into());
    }
}

impl fmt::Debug for HookContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookContext")
            .field("phase", &self.phase)
            .field("event", &self.event.map(|e| e.name()))
            .field("previous", &self.previous)
            .field("current", &self.current)
            .finish()
    }
}

/// Run an optional hook.
pub(crate) fn invoke(hook: Option<&Hook>, ctx: &HookContext<'_>) -> Result<(), HookError> {
    match hook {
        Some(hook) => hook(ctx),
        None => Ok(()),
    }
}
