//! Checkpoint and restore of a machine's run state.
//!
//! A checkpoint captures whether the machine is running, its current and
//! previous state, and its transition history. States, events and hooks are
//! not part of a checkpoint; restore into a machine built from the same
//! configuration.
//!
//! # Example
//!
//! ```rust
//! use dialog_fsm::builder::MachineBuilder;
//! use dialog_fsm::checkpoint::Checkpoint;
//! use dialog_fsm::core::StateDef;
//! use dialog_fsm::machine::TransitionEvent;
//!
//! let build = || {
//!     MachineBuilder::new()
//!         .initial("home")
//!         .state("home", StateDef::new())
//!         .state("away", StateDef::new())
//!         .event(TransitionEvent::new("leave", "home", "away"))
//!         .build()
//! };
//!
//! let mut fsm = build();
//! fsm.start().unwrap();
//! fsm.trigger("leave").unwrap();
//! let json = fsm.checkpoint().to_json().unwrap();
//!
//! let mut resumed = build();
//! resumed.restore(&Checkpoint::from_json(&json).unwrap()).unwrap();
//! assert_eq!(resumed.state(), Some("away"));
//! ```

use crate::core::TransitionHistory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a machine's run state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Configured initial state of the machine
    pub initial: Option<String>,

    pub running: bool,

    pub state: Option<String>,

    pub previous: Option<String>,

    /// Transitions applied since the machine last started
    pub history: TransitionHistory,
}

impl Checkpoint {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }
}
