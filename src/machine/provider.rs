//! Storage of the current state per cycle id.

use crate::core::State;
use crate::machine::error::ProviderError;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Durable or in-memory store of "current state for id".
///
/// The cycle driver never caches states: every operation reads and writes
/// through the provider. Implementations do not need to be atomic across
/// calls: the driver locks an id around its read-compare-write itself.
pub trait StateProvider<S: State>: Send + Sync {
    /// Current state of `id`, `None` when the cycle was never started.
    fn current_state(&self, id: &str) -> Result<Option<S>, ProviderError>;

    /// Record the first state of a freshly started cycle.
    fn initialize_state(&self, id: &str, state: S) -> Result<(), ProviderError>;

    /// Overwrite the current state of `id`.
    fn set_state(&self, id: &str, state: S) -> Result<(), ProviderError>;

    /// Whether `id` is currently in `state`. False for unstarted ids.
    fn is_state(&self, id: &str, state: &S) -> Result<bool, ProviderError> {
        Ok(self.current_state(id)?.as_ref() == Some(state))
    }

    /// Whether `id` is currently in any of `states`.
    fn is_state_in(&self, id: &str, states: &[S]) -> Result<bool, ProviderError> {
        Ok(self
            .current_state(id)?
            .is_some_and(|current| states.contains(&current)))
    }
}

/// Provider keeping states in process memory.
///
/// # Example
///
/// ```rust
/// use stateflow::machine::{MemoryStateProvider, StateProvider};
///
/// let provider = MemoryStateProvider::new();
/// provider.initialize_state("t1", "Open").unwrap();
///
/// assert!(provider.is_state("t1", &"Open").unwrap());
/// assert!(provider.is_state_in("t1", &["Fixed", "Open"]).unwrap());
/// assert_eq!(provider.current_state("t2").unwrap(), None);
/// ```
pub struct MemoryStateProvider<S> {
    pub(crate) states: RwLock<HashMap<String, S>>,
}

impl<S: State> MemoryStateProvider<S> {
    pub fn new() -> Self {
        Self {
            states: RwLock::new(HashMap::new()),
        }
    }

    /// Number of started cycles.
    pub fn len(&self) -> usize {
        self.states.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.read().is_empty()
    }

    /// Forget the state of `id`, returning it.
    pub fn remove(&self, id: &str) -> Option<S> {
        self.states.write().remove(id)
    }
}

impl<S: State> Default for MemoryStateProvider<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateProvider<S> for MemoryStateProvider<S> {
    fn current_state(&self, id: &str) -> Result<Option<S>, ProviderError> {
        Ok(self.states.read().get(id).cloned())
    }

    fn initialize_state(&self, id: &str, state: S) -> Result<(), ProviderError> {
        self.states.write().insert(id.to_string(), state);
        Ok(())
    }

    fn set_state(&self, id: &str, state: S) -> Result<(), ProviderError> {
        self.states.write().insert(id.to_string(), state);
        Ok(())
    }

    fn is_state(&self, id: &str, state: &S) -> Result<bool, ProviderError> {
        Ok(self.states.read().get(id) == Some(state))
    }
}
