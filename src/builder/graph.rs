//! Builder for constructing transition graphs.

use crate::core::{
    Action, Direction, Graph, Hook, HookError, Route, State, StateHookLists,
    DEFAULT_INITIAL_ACTION,
};
use crate::trigger::SharedTrigger;
use std::collections::HashMap;

/// Builder for transition graphs with a fluent API.
///
/// Registering an edge that already exists is a no-op: the first
/// registration keeps its name and its triggers.
///
/// # Example
///
/// ```rust
/// use stateflow::builder::GraphBuilder;
///
/// let graph = GraphBuilder::<&str, String>::new()
///     .initialize("Open")
///     .action("Fix Issue", "Open", "Fixed")
///     .action_bidirectional("Retest", "Fixed", "Tested")
///     .select_state("Fixed")
///     .on_enter(|payload| {
///         println!("fixed: {:?}", payload);
///         Ok(())
///     })
///     .build();
///
/// assert!(graph.has_route(Some(&"Tested"), &"Fixed"));
/// assert!(!graph.has_route(Some(&"Open"), &"Tested"));
/// ```
pub struct GraphBuilder<S: State, P> {
    initial: Vec<Route<S, P>>,
    routes: HashMap<S, Vec<Route<S, P>>>,
    hooks: HashMap<S, StateHookLists<P>>,
}

impl<S: State, P> GraphBuilder<S, P> {
    pub fn new() -> Self {
        Self {
            initial: Vec::new(),
            routes: HashMap::new(),
            hooks: HashMap::new(),
        }
    }

    /// Register the initial action entering `state`.
    ///
    /// Registering a second initial action with a different target is
    /// tolerated here; starting a cycle without an explicit state then
    /// fails as ambiguous.
    pub fn initialize(self, state: S) -> Self {
        self.initialize_named(DEFAULT_INITIAL_ACTION, state)
    }

    /// Register a named initial action entering `state`.
    pub fn initialize_named(mut self, name: impl Into<String>, state: S) -> Self {
        self.register(name.into(), None, state, Vec::new());
        self
    }

    /// Register the edge `from -> to`.
    pub fn action(self, name: impl Into<String>, from: S, to: S) -> Self {
        self.action_with_triggers(name, from, to, Vec::new())
    }

    /// Register the edge `from -> to` with triggers watching `from`.
    pub fn action_with_triggers(
        mut self,
        name: impl Into<String>,
        from: S,
        to: S,
        triggers: Vec<SharedTrigger<P>>,
    ) -> Self {
        self.register(name.into(), Some(from), to, triggers);
        self
    }

    /// Register the self-loop `state -> state`.
    pub fn self_loop(self, name: impl Into<String>, state: S) -> Self {
        let to = state.clone();
        self.action(name, state, to)
    }

    /// Register the self-loop `state -> state` with triggers.
    pub fn self_loop_with_triggers(
        self,
        name: impl Into<String>,
        state: S,
        triggers: Vec<SharedTrigger<P>>,
    ) -> Self {
        let to = state.clone();
        self.action_with_triggers(name, state, to, triggers)
    }

    /// Register `a -> b` and `b -> a` under the same name.
    pub fn action_bidirectional(self, name: impl Into<String>, a: S, b: S) -> Self {
        self.action_bidirectional_with_triggers(name, a, b, Vec::new())
    }

    /// Register `a -> b` and `b -> a` with the same triggers.
    ///
    /// Triggers are shared, not duplicated: the same instances watch `a`
    /// and `b`.
    pub fn action_bidirectional_with_triggers(
        self,
        name: impl Into<String>,
        a: S,
        b: S,
        triggers: Vec<SharedTrigger<P>>,
    ) -> Self {
        let name = name.into();
        self.action_with_triggers(name.clone(), a.clone(), b.clone(), triggers.clone())
            .action_with_triggers(name, b, a, triggers)
    }

    /// Whether the edge `from -> to` has been registered.
    pub fn has_route(&self, from: Option<&S>, to: &S) -> bool {
        self.routes_from(from).iter().any(|route| route.to() == to)
    }

    /// Start registering hooks for `state`.
    pub fn select_state(self, state: S) -> StateHooks<S, P> {
        StateHooks {
            builder: self,
            state,
        }
    }

    /// Freeze the builder into an immutable graph.
    pub fn build(self) -> Graph<S, P> {
        Graph::from_parts(self.initial, self.routes, self.hooks)
    }

    fn routes_from(&self, from: Option<&S>) -> &[Route<S, P>] {
        match from {
            None => &self.initial,
            Some(from) => self.routes.get(from).map(Vec::as_slice).unwrap_or(&[]),
        }
    }

    fn register(&mut self, name: String, from: Option<S>, to: S, triggers: Vec<SharedTrigger<P>>) {
        if self.has_route(from.as_ref(), &to) {
            return;
        }
        let routes = match &from {
            None => &mut self.initial,
            Some(from) => self.routes.entry(from.clone()).or_default(),
        };
        routes.push(Route::new(Action::new(name, from, to), triggers));
    }

    fn add_hook(&mut self, state: S, direction: Direction, hook: Hook<P>) {
        self.hooks.entry(state).or_default().push(direction, hook);
    }
}

impl<S: State, P> Default for GraphBuilder<S, P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Hook registration for one selected state.
///
/// Returned by [`GraphBuilder::select_state`]; hooks can only be added
/// once a state has been chosen.
pub struct StateHooks<S: State, P> {
    builder: GraphBuilder<S, P>,
    state: S,
}

impl<S: State, P> StateHooks<S, P> {
    /// Append a hook run after entering the state.
    pub fn on_enter<F>(mut self, hook: F) -> Self
    where
        F: Fn(Option<&P>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.builder
            .add_hook(self.state.clone(), Direction::Enter, Hook::new(hook));
        self
    }

    /// Append a hook run before exiting the state.
    pub fn on_exit<F>(mut self, hook: F) -> Self
    where
        F: Fn(Option<&P>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.builder
            .add_hook(self.state.clone(), Direction::Exit, Hook::new(hook));
        self
    }

    /// Move on to the hooks of another state.
    pub fn select_state(self, state: S) -> StateHooks<S, P> {
        self.builder.select_state(state)
    }

    /// Return to edge registration.
    pub fn and(self) -> GraphBuilder<S, P> {
        self.builder
    }

    pub fn build(self) -> Graph<S, P> {
        self.builder.build()
    }
}
