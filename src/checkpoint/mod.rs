//! Checkpoint and resume for running machines.
//!
//! A checkpoint captures the current state value, the context and the
//! transition history as JSON. Actions are code and are not captured;
//! resuming pairs a checkpoint with a freshly built machine.

use crate::core::{State, StateHistory};
use crate::machine::{Interpreter, Machine, MachineState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of an interpreter.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Checkpoint<S: State> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Id of the machine the checkpoint was taken from
    pub machine_id: String,

    /// Current state value and context
    pub state: MachineState<S>,

    /// Complete transition history
    pub history: StateHistory<S>,
}

impl<S: State> Checkpoint<S> {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Parse a checkpoint, rejecting unknown format versions.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;

        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: checkpoint.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        Ok(checkpoint)
    }
}

impl<S: State> Interpreter<S> {
    /// Capture the current state, context and history.
    pub fn checkpoint(&self) -> Checkpoint<S> {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            machine_id: self.machine.id().to_string(),
            state: self.state.clone(),
            history: self.history.clone(),
        }
    }

    /// Rebuild an interpreter from a checkpoint and the machine it was
    /// taken from.
    pub fn resume(machine: Machine<S>, checkpoint: Checkpoint<S>) -> Result<Self, CheckpointError> {
        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: checkpoint.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        if checkpoint.machine_id != machine.id() {
            return Err(CheckpointError::MachineMismatch {
                expected: machine.id().to_string(),
                found: checkpoint.machine_id,
            });
        }

        debug!(machine = %machine.id(), checkpoint = %checkpoint.id, "resuming");
        Ok(Interpreter {
            machine,
            state: checkpoint.state,
            history: checkpoint.history,
        })
    }
}
