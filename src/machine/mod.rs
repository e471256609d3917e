//! The state machine runtime.
//!
//! # Key Concepts
//!
//! - **Transition events**: named rules from a source set (or the wildcard) to a target state
//! - **State machine**: owns states, events sorted by name, and the run state
//! - **Notifications**: each phase is emitted to observers and run through hooks
//!
//! Hooks never re-enter the machine. A hook that wants another transition
//! queues it through its context and the machine runs it once the current
//! operation has finished.

mod error;
mod event;
mod fsm;
mod hooks;

pub use error::FsmError;
pub use event::TransitionEvent;
pub use fsm::{StateMachine, MAX_DEFERRED_TRIGGERS};
pub use hooks::{MachineHooks, Notification};
