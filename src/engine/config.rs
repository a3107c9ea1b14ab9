//! Engine configuration.

use crate::engine::error::TransitionError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Callback notified of every hook failure, silent or not.
pub type ExceptionHandler = Arc<dyn Fn(&TransitionError) + Send + Sync>;

/// Failure policy and self-loop behaviour of a transition engine.
///
/// Deserializes with per-field defaults, so a partial JSON document is a
/// valid configuration.
///
/// # Example
///
/// ```rust
/// use stateflow::engine::EngineConfig;
///
/// let config: EngineConfig =
///     serde_json::from_str(r#"{ "suppress_exit_on_self_loop": true }"#).unwrap();
///
/// assert!(config.silent);
/// assert!(config.suppress_exit_on_self_loop);
/// assert!(!config.suppress_enter_on_self_loop);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Swallow hook failures after notifying the exception handler.
    /// A failing hook still aborts the rest of its list.
    pub silent: bool,

    /// Skip ENTER hooks when a state re-enters itself
    pub suppress_enter_on_self_loop: bool,

    /// Skip EXIT hooks when a state re-enters itself
    pub suppress_exit_on_self_loop: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            silent: true,
            suppress_enter_on_self_loop: false,
            suppress_exit_on_self_loop: false,
        }
    }
}

impl EngineConfig {
    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn with_suppress_enter_on_self_loop(mut self, suppress: bool) -> Self {
        self.suppress_enter_on_self_loop = suppress;
        self
    }

    pub fn with_suppress_exit_on_self_loop(mut self, suppress: bool) -> Self {
        self.suppress_exit_on_self_loop = suppress;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_silent_without_suppression() {
        let config = EngineConfig::default();
        assert!(config.silent);
        assert!(!config.suppress_enter_on_self_loop);
        assert!(!config.suppress_exit_on_self_loop);
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn builder_methods_set_flags() {
        let config = EngineConfig::default()
            .with_silent(false)
            .with_suppress_enter_on_self_loop(true);

        assert!(!config.silent);
        assert!(config.suppress_enter_on_self_loop);
        assert!(!config.suppress_exit_on_self_loop);
    }
}
