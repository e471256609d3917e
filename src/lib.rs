//! Dialog FSM: a string-keyed finite state machine for branching dialog
//!
//! States and transition events are identified by name, so a machine can be
//! described in JSON and driven by whatever triggers the game or editor
//! produces. Transitions are observable two ways: through hooks attached to
//! the machine, a state or an event, and through a named event emitter.
//!
//! # Core Concepts
//!
//! - **Transition events**: named rules from a source set (or the `*` wildcard) to a target
//! - **Phases**: every transition runs `before`, `exit`, `enter`, `after` in that order
//! - **Emitter**: observers subscribe to phase names such as `"enter"` or `"enter-home"`
//! - **Dialog**: a dialog tree is interpreted by a machine whose states are nodes
//!
//! # Example
//!
//! ```rust
//! use dialog_fsm::builder::MachineConfig;
//! use dialog_fsm::emitter::handler;
//! use dialog_fsm::machine::{Notification, StateMachine};
//! use std::sync::{Arc, Mutex};
//!
//! let config = MachineConfig::from_json(r#"{
//!     "initial": "home",
//!     "states": { "home": {}, "state2": {} },
//!     "events": [
//!         { "name": "start", "from": "home", "to": "state2" },
//!         { "name": "reset", "from": "*", "to": "home" }
//!     ]
//! }"#).unwrap();
//!
//! let mut fsm = StateMachine::new(config);
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! fsm.on("after", handler(move |_: &str, note: &Notification| {
//!     sink.lock().unwrap().push(note.state.clone());
//! }));
//!
//! fsm.start().unwrap();
//! fsm.trigger("start").unwrap();
//! fsm.trigger("reset").unwrap();
//!
//! assert!(fsm.is("home"));
//! assert_eq!(
//!     *seen.lock().unwrap(),
//!     [Some("state2".to_string()), Some("home".to_string())]
//! );
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod dialog;
pub mod emitter;
pub mod machine;
pub mod validation;

// Re-export commonly used types
pub use crate::builder::{MachineBuilder, MachineConfig};
pub use crate::core::{Hook, HookContext, HookError, Phase, Source, StateDef};
pub use crate::dialog::{DialogMachine, DialogTree};
pub use crate::emitter::{Emitter, Handler};
pub use crate::machine::{FsmError, Notification, StateMachine, TransitionEvent};
