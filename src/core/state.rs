//! State definitions.
//!
//! A state is identified by its name (the key it is registered under) and
//! carries optional enter/exit hooks.

use super::hook::{hook, Hook, HookContext, HookError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Definition of a named state.
///
/// Hooks are skipped by serde, so a state loaded from JSON starts without
/// hooks and can have them attached afterwards.
///
/// # Example
///
/// ```rust
/// use dialog_fsm::core::StateDef;
///
/// let home = StateDef::new().on_enter(|ctx| {
///     println!("welcome home, coming from {:?}", ctx.previous());
///     Ok(())
/// });
/// assert!(home.enter_hook().is_some());
/// assert!(home.exit_hook().is_none());
/// ```
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct StateDef {
    #[serde(skip)]
    on_enter: Option<Hook>,
    #[serde(skip)]
    on_exit: Option<Hook>,
}

impl StateDef {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the hook run when this state is entered.
    pub fn on_enter<F>(mut self, f: F) -> Self
    where
        F: Fn(&HookContext<'_>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.on_enter = Some(hook(f));
        self
    }

    /// Attach the hook run when this state is exited.
    pub fn on_exit<F>(mut self, f: F) -> Self
    where
        F: Fn(&HookContext<'_>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.on_exit = Some(hook(f));
        self
    }

    pub fn set_enter_hook(&mut self, hook: Option<Hook>) {
        self.on_enter = hook;
    }

    pub fn set_exit_hook(&mut self, hook: Option<Hook>) {
        self.on_exit = hook;
    }

    pub fn enter_hook(&self) -> Option<&Hook> {
        self.on_enter.as_ref()
    }

    pub fn exit_hook(&self) -> Option<&Hook> {
        self.on_exit.as_ref()
    }
}

impl fmt::Debug for StateDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDef")
            .field("on_enter", &self.on_enter.is_some())
            .field("on_exit", &self.on_exit.is_some())
            .finish()
    }
}
