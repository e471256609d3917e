//! Dialog errors.

use crate::machine::FsmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DialogError {
    #[error("Failed to parse dialog tree: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Machine(#[from] FsmError),
}
