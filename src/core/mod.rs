//! Core state machine building blocks.
//!
//! This module contains the data the machine is configured with:
//! - Source-state matching for transition events (wildcard or name list)
//! - State definitions with enter/exit hooks
//! - Hook types and the context handed to them
//! - Timestamped transition history

mod history;
mod hook;
mod source;
mod state;

pub use history::{TransitionHistory, TransitionRecord};
pub(crate) use hook::invoke;
pub use hook::{hook, Hook, HookContext, HookError, Phase};
pub use source::{Source, WILDCARD};
pub use state::StateDef;
