//! Checkpoint and resume of in-memory cycle states.
//!
//! A [`Checkpoint`] captures the current state of every cycle held by a
//! [`MemoryStateProvider`] so a process can stop and later continue every
//! cycle where it left off. Graphs are not part of a checkpoint: hooks and
//! triggers are code and are rebuilt by the resuming process.
//!
//! # Example
//!
//! ```rust
//! use stateflow::checkpoint::Checkpoint;
//! use stateflow::machine::{MemoryStateProvider, StateProvider};
//!
//! let provider = MemoryStateProvider::new();
//! provider.initialize_state("t1", "Fixed".to_string()).unwrap();
//!
//! let json = provider.checkpoint().to_json().unwrap();
//! let restored = MemoryStateProvider::restore(Checkpoint::from_json(&json).unwrap()).unwrap();
//!
//! assert_eq!(restored.current_state("t1").unwrap(), Some("Fixed".to_string()));
//! ```

use crate::core::State;
use crate::machine::MemoryStateProvider;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of the current state of every cycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint<S> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Current state per cycle id
    pub states: BTreeMap<String, S>,
}

impl<S: State> Checkpoint<S> {
    pub fn new(states: BTreeMap<String, S>) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            states,
        }
    }

    fn check_version(self) -> Result<Self, CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(self)
    }
}

impl<S: State + Serialize + DeserializeOwned> Checkpoint<S> {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from JSON, rejecting other format versions.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()
    }

    /// Serialize to the compact binary format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from the binary format, rejecting other format versions.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()
    }
}

impl<S: State> MemoryStateProvider<S> {
    /// Snapshot the current state of every cycle.
    pub fn checkpoint(&self) -> Checkpoint<S> {
        let states: BTreeMap<String, S> = self
            .states
            .read()
            .iter()
            .map(|(id, state)| (id.clone(), state.clone()))
            .collect();
        let checkpoint = Checkpoint::new(states);
        debug!(
            checkpoint = %checkpoint.id,
            cycles = checkpoint.states.len(),
            "Created checkpoint"
        );
        checkpoint
    }

    /// Rebuild a provider holding the states of `checkpoint`.
    pub fn restore(checkpoint: Checkpoint<S>) -> Result<Self, CheckpointError> {
        let checkpoint = checkpoint.check_version()?;
        debug!(
            checkpoint = %checkpoint.id,
            cycles = checkpoint.states.len(),
            "Restoring checkpoint"
        );
        Ok(Self {
            states: RwLock::new(checkpoint.states.into_iter().collect()),
        })
    }
}
