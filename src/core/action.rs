//! Named edges of the transition graph.

use serde::{Deserialize, Serialize};

/// Name given to an initial action registered without an explicit one.
pub const DEFAULT_INITIAL_ACTION: &str = "init action";

/// A named directed edge between two states.
///
/// `from` is `None` for an initial action, which enters the graph with no
/// prior state. Actions are immutable once registered; at most one exists
/// per ordered `(from, to)` pair.
///
/// # Example
///
/// ```rust
/// use stateflow::core::Action;
///
/// let action = Action::new("Fix Issue", Some("Open"), "Fixed");
/// assert_eq!(action.name(), "Fix Issue");
/// assert!(!action.is_initial());
/// assert!(!action.is_self_loop());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action<S> {
    name: String,
    from: Option<S>,
    to: S,
}

impl<S: PartialEq> Action<S> {
    pub fn new(name: impl Into<String>, from: Option<S>, to: S) -> Self {
        Self {
            name: name.into(),
            from,
            to,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source state, `None` for the initial action.
    pub fn from(&self) -> Option<&S> {
        self.from.as_ref()
    }

    pub fn to(&self) -> &S {
        &self.to
    }

    pub fn is_initial(&self) -> bool {
        self.from.is_none()
    }

    /// A state re-entering itself.
    pub fn is_self_loop(&self) -> bool {
        self.from.as_ref() == Some(&self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_action_has_no_source() {
        let action = Action::new(DEFAULT_INITIAL_ACTION, None, "Open");
        assert!(action.is_initial());
        assert!(!action.is_self_loop());
        assert_eq!(action.from(), None);
        assert_eq!(action.to(), &"Open");
    }

    #[test]
    fn self_loop_is_detected() {
        let action = Action::new("Pay Fail", Some("Created"), "Created");
        assert!(action.is_self_loop());
        assert!(!action.is_initial());
    }

    #[test]
    fn action_serializes_correctly() {
        let action = Action::new("Deliver", Some("Paid".to_string()), "Delivered".to_string());
        let json = serde_json::to_string(&action).unwrap();
        let deserialized: Action<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(action, deserialized);
    }
}
