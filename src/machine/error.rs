//! Errors raised by machine operations.

use crate::core::{HookError, Phase};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsmError {
    #[error("Initial state not specified")]
    MissingInitialState,

    #[error("Initial state '{initial}' is not a configured state")]
    UnknownInitialState { initial: String },

    #[error("Hook failed during {phase} phase: {source}")]
    Hook {
        phase: Phase,
        #[source]
        source: HookError,
    },

    #[error("More than {limit} deferred triggers queued by hooks")]
    DeferredOverflow { limit: usize },
}

impl FsmError {
    pub(crate) fn hook(phase: Phase) -> impl FnOnce(HookError) -> Self {
        move |source| FsmError::Hook { phase, source }
    }
}
