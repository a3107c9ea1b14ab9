//! Side-effecting hooks bound to a state and a direction.
//!
//! Hooks run when a cycle enters or exits a state. Unlike triggers they are
//! expected to have side effects, and may fail by returning an error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Error returned by a failing hook.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Direction a hook is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Runs after the cycle has entered the state
    Enter,
    /// Runs before the cycle leaves the state
    Exit,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enter => f.write_str("ENTER"),
            Self::Exit => f.write_str("EXIT"),
        }
    }
}

/// A callable run with the transition payload.
///
/// Cloning a hook is cheap, clones share the same closure.
///
/// # Example
///
/// ```rust
/// use stateflow::core::Hook;
///
/// let hook: Hook<String> = Hook::new(|payload: Option<&String>| {
///     println!("entered with {:?}", payload);
///     Ok(())
/// });
///
/// assert!(hook.execute(Some(&"hello".to_string())).is_ok());
/// ```
pub struct Hook<P> {
    callable: Arc<dyn Fn(Option<&P>) -> Result<(), HookError> + Send + Sync>,
}

impl<P> Hook<P> {
    pub fn new<F>(callable: F) -> Self
    where
        F: Fn(Option<&P>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        Self {
            callable: Arc::new(callable),
        }
    }

    /// Run the hook with the payload of the current transition.
    pub fn execute(&self, payload: Option<&P>) -> Result<(), HookError> {
        (self.callable)(payload)
    }
}

impl<P> Clone for Hook<P> {
    fn clone(&self) -> Self {
        Self {
            callable: Arc::clone(&self.callable),
        }
    }
}

impl<P> fmt::Debug for Hook<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Hook")
    }
}

/// Ordered hook lists of one state, one list per direction.
pub struct StateHookLists<P> {
    enter: Vec<Hook<P>>,
    exit: Vec<Hook<P>>,
}

impl<P> Default for StateHookLists<P> {
    fn default() -> Self {
        Self {
            enter: Vec::new(),
            exit: Vec::new(),
        }
    }
}

impl<P> StateHookLists<P> {
    pub(crate) fn push(&mut self, direction: Direction, hook: Hook<P>) {
        match direction {
            Direction::Enter => self.enter.push(hook),
            Direction::Exit => self.exit.push(hook),
        }
    }

    /// Hooks of one direction in registration order.
    pub fn get(&self, direction: Direction) -> &[Hook<P>] {
        match direction {
            Direction::Enter => &self.enter,
            Direction::Exit => &self.exit,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.enter.is_empty() && self.exit.is_empty()
    }
}
