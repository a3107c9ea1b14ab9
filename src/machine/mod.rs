//! Cycle driver over a state provider.
//!
//! A [`StateMachine`] runs any number of independent cycles, each named by
//! a string id, over one shared [`Graph`](crate::core::Graph). The current
//! state of every cycle lives in a [`StateProvider`]; the in-memory
//! [`MemoryStateProvider`] is used unless another one is supplied.
//!
//! No lock is held while hooks run: a hook may call back into the machine
//! for its own id or any other. The new state is recorded after the hooks,
//! with a compare-and-set against the state the transition started from.

mod driver;
mod error;
mod locks;
mod provider;

pub use driver::{StateMachine, DEFAULT_ID};
pub use error::{MachineError, ProviderError};
pub use provider::{MemoryStateProvider, StateProvider};
