//! Transition events.

use crate::core::{hook, Hook, HookContext, HookError, Source};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named rule moving the machine from a set of source states to a target.
///
/// Several events may share a name to describe different source/target
/// pairs for the same trigger. An event without a target (absent or empty)
/// never fires.
///
/// # Example
///
/// ```rust
/// use dialog_fsm::machine::TransitionEvent;
///
/// let reset = TransitionEvent::new("reset", "*", "home");
/// assert!(reset.can_fire("anywhere"));
///
/// let next = TransitionEvent::new("next", "a,b", "c");
/// assert!(next.can_fire("b"));
/// assert!(!next.can_fire("c"));
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct TransitionEvent {
    pub name: String,
    pub from: Source,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip)]
    on_before: Option<Hook>,
    #[serde(skip)]
    on_after: Option<Hook>,
}

impl TransitionEvent {
    pub fn new(name: impl Into<String>, from: impl Into<Source>, to: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            from: from.into(),
            to: Some(to.into()),
            on_before: None,
            on_after: None,
        }
    }

    /// An event with no target. It is kept in the machine's event list but
    /// never fires.
    pub fn without_target(name: impl Into<String>, from: impl Into<Source>) -> Self {
        Self {
            name: name.into(),
            from: from.into(),
            to: None,
            on_before: None,
            on_after: None,
        }
    }

    /// Attach the hook run before the machine exits its current state.
    pub fn on_before<F>(mut self, f: F) -> Self
    where
        F: Fn(&HookContext<'_>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.on_before = Some(hook(f));
        self
    }

    /// Attach the hook run after the machine has entered the target state.
    pub fn on_after<F>(mut self, f: F) -> Self
    where
        F: Fn(&HookContext<'_>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.on_after = Some(hook(f));
        self
    }

    pub fn set_before_hook(&mut self, hook: Option<Hook>) {
        self.on_before = hook;
    }

    pub fn set_after_hook(&mut self, hook: Option<Hook>) {
        self.on_after = hook;
    }

    pub fn before_hook(&self) -> Option<&Hook> {
        self.on_before.as_ref()
    }

    pub fn after_hook(&self) -> Option<&Hook> {
        self.on_after.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target state, treating an empty name as absent.
    pub fn target(&self) -> Option<&str> {
        self.to.as_deref().filter(|to| !to.is_empty())
    }

    /// Whether this event fires from `current`.
    pub fn can_fire(&self, current: &str) -> bool {
        self.target().is_some() && self.from.matches(current)
    }
}

impl fmt::Debug for TransitionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionEvent")
            .field("name", &self.name)
            .field("from", &self.from.to_string())
            .field("to", &self.to)
            .field("on_before", &self.on_before.is_some())
            .field("on_after", &self.on_after.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_fire_matches_source_list() {
        let event = TransitionEvent::new("start", "home", "state2");
        assert!(event.can_fire("home"));
        assert!(!event.can_fire("state2"));
    }

    #[test]
    fn wildcard_fires_from_anywhere() {
        let event = TransitionEvent::new("reset", "*", "home");
        assert!(event.can_fire("home"));
        assert!(event.can_fire("somewhere-else"));
    }

    #[test]
    fn event_without_target_is_inert() {
        let event = TransitionEvent::without_target("noop", "*");
        assert_eq!(event.target(), None);
        assert!(!event.can_fire("home"));
    }

    #[test]
    fn empty_target_is_inert() {
        let event = TransitionEvent::new("noop", "*", "");
        assert_eq!(event.target(), None);
        assert!(!event.can_fire("home"));
    }

    #[test]
    fn deserializes_from_config_shape() {
        let event: TransitionEvent =
            serde_json::from_str(r#"{"name": "next", "from": "a,b", "to": "c"}"#).unwrap();
        assert_eq!(event.name(), "next");
        assert_eq!(event.from, Source::states(["a", "b"]));
        assert_eq!(event.target(), Some("c"));
        assert!(event.before_hook().is_none());
    }

    #[test]
    fn missing_target_deserializes_as_inert() {
        let event: TransitionEvent =
            serde_json::from_str(r#"{"name": "hold", "from": "*"}"#).unwrap();
        assert!(!event.can_fire("a"));
    }

    #[test]
    fn hooks_attach_through_builder_methods() {
        let event = TransitionEvent::new("go", "a", "b")
            .on_before(|_| Ok(()))
            .on_after(|_| Ok(()));
        assert!(event.before_hook().is_some());
        assert!(event.after_hook().is_some());
    }
}
