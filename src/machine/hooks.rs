//! Machine-level hooks and the payload emitted to observers.

use crate::core::Hook;
use std::fmt;

/// Hooks attached to the machine itself.
///
/// `on_before`, `on_exit`, `on_enter` and `on_after` run on every transition,
/// ahead of the matching state or event hook. `on_enter` does not run for the
/// initial state entered by `start`.
#[derive(Clone, Default)]
pub struct MachineHooks {
    pub on_start: Option<Hook>,
    pub on_stop: Option<Hook>,
    pub on_before: Option<Hook>,
    pub on_exit: Option<Hook>,
    pub on_enter: Option<Hook>,
    pub on_after: Option<Hook>,
}

impl fmt::Debug for MachineHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineHooks")
            .field("on_start", &self.on_start.is_some())
            .field("on_stop", &self.on_stop.is_some())
            .field("on_before", &self.on_before.is_some())
            .field("on_exit", &self.on_exit.is_some())
            .field("on_enter", &self.on_enter.is_some())
            .field("on_after", &self.on_after.is_some())
            .finish()
    }
}

/// Snapshot passed to emitter handlers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Notification {
    pub previous: Option<String>,
    pub state: Option<String>,
}
