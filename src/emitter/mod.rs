//! Named event emitter.
//!
//! Handlers are registered under an event name and invoked synchronously in
//! registration order whenever that name is emitted. Each handler receives the
//! emitted name first and the payload second.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Shared emitter handler. Identity (for [`Emitter::off`]) is pointer identity
/// of the `Arc`, so keep a clone of the handler you intend to remove later.
pub type Handler<P> = Arc<dyn Fn(&str, &P) + Send + Sync>;

/// Wrap a closure as a [`Handler`].
pub fn handler<P, F>(f: F) -> Handler<P>
where
    F: Fn(&str, &P) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Mapping from event name to an ordered list of handlers.
///
/// # Example
///
/// ```rust
/// use dialog_fsm::emitter::{handler, Emitter};
/// use std::sync::{Arc, Mutex};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
///
/// let mut emitter: Emitter<u32> = Emitter::new();
/// emitter.on("tick", handler(move |name: &str, n: &u32| {
///     sink.lock().unwrap().push(format!("{name}:{n}"));
/// }));
///
/// emitter.emit("tick", &1).emit("tock", &2).emit("tick", &3);
/// assert_eq!(*seen.lock().unwrap(), ["tick:1", "tick:3"]);
/// ```
pub struct Emitter<P> {
    handlers: HashMap<String, Vec<Handler<P>>>,
}

impl<P> Emitter<P> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Append `handler` to the handlers registered under `event_name`.
    ///
    /// The same handler may be registered more than once; it then runs once
    /// per registration.
    pub fn on(&mut self, event_name: impl Into<String>, handler: Handler<P>) -> &mut Self {
        self.handlers
            .entry(event_name.into())
            .or_default()
            .push(handler);
        self
    }

    /// Unregister handlers.
    ///
    /// - no name (or an empty name): every registration is cleared
    /// - name only: every handler under that name is cleared
    /// - name and handler: the first registration of that handler under the
    ///   name is removed
    pub fn off(&mut self, event_name: Option<&str>, handler: Option<&Handler<P>>) -> &mut Self {
        match (event_name.filter(|name| !name.is_empty()), handler) {
            (None, _) => self.handlers.clear(),
            (Some(name), None) => {
                if let Some(list) = self.handlers.get_mut(name) {
                    list.clear();
                }
            }
            (Some(name), Some(handler)) => {
                if let Some(list) = self.handlers.get_mut(name) {
                    if let Some(index) = list.iter().position(|h| Arc::ptr_eq(h, handler)) {
                        list.remove(index);
                    }
                }
            }
        }
        self
    }

    /// Invoke every handler registered under `event_name`, in registration
    /// order. Emitting a name with no handlers does nothing.
    pub fn emit(&self, event_name: &str, payload: &P) -> &Self {
        let Some(list) = self.handlers.get(event_name) else {
            return self;
        };
        trace!(event = event_name, handlers = list.len(), "emit");
        for handler in list {
            handler(event_name, payload);
        }
        self
    }

    /// Number of handlers registered under `event_name`.
    pub fn handler_count(&self, event_name: &str) -> usize {
        self.handlers.get(event_name).map_or(0, Vec::len)
    }
}

impl<P> Default for Emitter<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for Emitter<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counts: Vec<(&str, usize)> = self
            .handlers
            .iter()
            .map(|(name, list)| (name.as_str(), list.len()))
            .collect();
        counts.sort_unstable();
        f.debug_struct("Emitter").field("handlers", &counts).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, Handler<i32>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let h = handler(move |name: &str, value: &i32| {
            sink.lock().unwrap().push(format!("{name}={value}"));
        });
        (log, h)
    }

    #[test]
    fn emit_calls_handlers_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut emitter = Emitter::new();
        for tag in ["a", "b", "c"] {
            let sink = Arc::clone(&log);
            emitter.on(
                "evt",
                handler(move |_: &str, _: &()| sink.lock().unwrap().push(tag)),
            );
        }

        emitter.emit("evt", &());
        assert_eq!(*log.lock().unwrap(), ["a", "b", "c"]);
    }

    #[test]
    fn handlers_receive_name_first() {
        let (log, h) = recorder();
        let mut emitter = Emitter::new();
        emitter.on("enter-home", h);

        emitter.emit("enter-home", &7);
        assert_eq!(*log.lock().unwrap(), ["enter-home=7"]);
    }

    #[test]
    fn duplicate_registration_runs_twice() {
        let (log, h) = recorder();
        let mut emitter = Emitter::new();
        emitter.on("x", Arc::clone(&h)).on("x", h);

        emitter.emit("x", &1);
        assert_eq!(log.lock().unwrap().len(), 2);
    }

    #[test]
    fn emit_unknown_name_is_noop() {
        let emitter: Emitter<i32> = Emitter::new();
        emitter.emit("nothing", &0);
        assert_eq!(emitter.handler_count("nothing"), 0);
    }

    #[test]
    fn off_without_name_clears_everything() {
        let (_, h) = recorder();
        let mut emitter = Emitter::new();
        emitter.on("a", Arc::clone(&h)).on("b", h);

        emitter.off(None, None);
        assert_eq!(emitter.handler_count("a"), 0);
        assert_eq!(emitter.handler_count("b"), 0);
    }

    #[test]
    fn off_with_empty_name_clears_everything() {
        let (_, h) = recorder();
        let mut emitter = Emitter::new();
        emitter.on("a", h);

        emitter.off(Some(""), None);
        assert_eq!(emitter.handler_count("a"), 0);
    }

    #[test]
    fn off_with_name_clears_only_that_name() {
        let (_, h) = recorder();
        let mut emitter = Emitter::new();
        emitter.on("a", Arc::clone(&h)).on("b", h);

        emitter.off(Some("a"), None);
        assert_eq!(emitter.handler_count("a"), 0);
        assert_eq!(emitter.handler_count("b"), 1);
    }

    #[test]
    fn off_with_handler_removes_first_registration_only() {
        let (log, h) = recorder();
        let (_, other) = recorder();
        let mut emitter = Emitter::new();
        emitter
            .on("a", Arc::clone(&other))
            .on("a", Arc::clone(&h))
            .on("a", Arc::clone(&h));

        emitter.off(Some("a"), Some(&h));
        assert_eq!(emitter.handler_count("a"), 2);

        emitter.emit("a", &5);
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn off_with_unregistered_handler_is_noop() {
        let (_, h) = recorder();
        let (_, stranger) = recorder();
        let mut emitter = Emitter::new();
        emitter.on("a", h);

        emitter.off(Some("a"), Some(&stranger));
        emitter.off(Some("missing"), Some(&stranger));
        assert_eq!(emitter.handler_count("a"), 1);
    }
}
