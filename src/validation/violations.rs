//! Configuration violations.

use thiserror::Error;

/// A problem found in a machine configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("Initial state not specified")]
    MissingInitialState,

    #[error("Initial state '{initial}' is not a configured state")]
    UnknownInitialState { initial: String },

    #[error("Transition event at position {index} has an empty name")]
    EmptyEventName { index: usize },

    #[error("Transition event '{event}' fires from unknown state '{state}'")]
    UnknownSourceState { event: String, state: String },

    #[error("Transition event '{event}' targets unknown state '{state}'")]
    UnknownTargetState { event: String, state: String },
}
