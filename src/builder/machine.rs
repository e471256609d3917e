//! Builder for constructing state machines.

use crate::builder::config::MachineConfig;
use crate::builder::error::ConfigError;
use crate::core::{hook, HookContext, HookError, StateDef};
use crate::machine::{StateMachine, TransitionEvent};

/// Builder for constructing state machines with a fluent API.
#[derive(Debug, Default)]
pub struct MachineBuilder {
    config: MachineConfig,
}

impl MachineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration, e.g. one loaded from JSON.
    pub fn from_config(config: MachineConfig) -> Self {
        Self { config }
    }

    /// Set the initial state.
    pub fn initial(mut self, name: impl Into<String>) -> Self {
        self.config.initial = Some(name.into());
        self
    }

    /// Add or replace a state.
    pub fn state(mut self, name: impl Into<String>, state: StateDef) -> Self {
        self.config.states.insert(name.into(), state);
        self
    }

    /// Add a transition event.
    pub fn event(mut self, event: TransitionEvent) -> Self {
        self.config.events.push(event);
        self
    }

    /// Add multiple transition events at once.
    pub fn events(mut self, events: impl IntoIterator<Item = TransitionEvent>) -> Self {
        self.config.events.extend(events);
        self
    }

    pub fn on_start<F>(mut self, f: F) -> Self
    where
        F: Fn(&HookContext<'_>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.config.hooks.on_start = Some(hook(f));
        self
    }

    pub fn on_stop<F>(mut self, f: F) -> Self
    where
        F: Fn(&HookContext<'_>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.config.hooks.on_stop = Some(hook(f));
        self
    }

    pub fn on_before<F>(mut self, f: F) -> Self
    where
        F: Fn(&HookContext<'_>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.config.hooks.on_before = Some(hook(f));
        self
    }

    pub fn on_exit<F>(mut self, f: F) -> Self
    where
        F: Fn(&HookContext<'_>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.config.hooks.on_exit = Some(hook(f));
        self
    }

    pub fn on_enter<F>(mut self, f: F) -> Self
    where
        F: Fn(&HookContext<'_>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.config.hooks.on_enter = Some(hook(f));
        self
    }

    pub fn on_after<F>(mut self, f: F) -> Self
    where
        F: Fn(&HookContext<'_>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.config.hooks.on_after = Some(hook(f));
        self
    }

    /// The configuration assembled so far.
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Build the machine. The machine is built even if the initial state is
    /// not configured; `start` reports that case.
    pub fn build(self) -> StateMachine {
        StateMachine::new(self.config)
    }

    /// Build the machine, failing with every configuration violation found.
    pub fn build_validated(self) -> Result<StateMachine, ConfigError> {
        self.config.into_validated_machine()
    }
}
