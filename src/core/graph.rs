//! Immutable transition graph.
//!
//! A [`Graph`] is produced once by the [`GraphBuilder`](crate::builder::GraphBuilder)
//! and only read afterwards. Routes, their actions and their triggers live
//! in one adjacency structure keyed by source state, so trigger lists can
//! never drift away from the edges they belong to.

use super::action::Action;
use super::hook::{Direction, Hook, StateHookLists};
use super::state::State;
use crate::trigger::SharedTrigger;
use crate::validation::{validate_graph, GraphViolation};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// An outbound edge of a state with the triggers that fire it.
pub struct Route<S, P> {
    action: Action<S>,
    triggers: Vec<SharedTrigger<P>>,
}

impl<S: State, P> Route<S, P> {
    pub(crate) fn new(action: Action<S>, triggers: Vec<SharedTrigger<P>>) -> Self {
        Self { action, triggers }
    }

    pub fn action(&self) -> &Action<S> {
        &self.action
    }

    pub fn to(&self) -> &S {
        self.action.to()
    }

    /// Triggers in registration order.
    pub fn triggers(&self) -> &[SharedTrigger<P>] {
        &self.triggers
    }
}

/// Transition graph: routes, hooks and triggers.
pub struct Graph<S, P> {
    initial: Vec<Route<S, P>>,
    routes: HashMap<S, Vec<Route<S, P>>>,
    hooks: HashMap<S, StateHookLists<P>>,
}

impl<S: State, P> Graph<S, P> {
    pub(crate) fn from_parts(
        initial: Vec<Route<S, P>>,
        routes: HashMap<S, Vec<Route<S, P>>>,
        hooks: HashMap<S, StateHookLists<P>>,
    ) -> Self {
        Self {
            initial,
            routes,
            hooks,
        }
    }

    /// Outbound routes of `from` in registration order, the initial
    /// routes when `from` is `None`.
    pub fn routes_from(&self, from: Option<&S>) -> &[Route<S, P>] {
        match from {
            None => &self.initial,
            Some(from) => self.routes.get(from).map(Vec::as_slice).unwrap_or(&[]),
        }
    }

    /// The action registered between `from` and `to`, if any.
    pub fn action(&self, from: Option<&S>, to: &S) -> Option<&Action<S>> {
        self.routes_from(from)
            .iter()
            .find(|route| route.to() == to)
            .map(Route::action)
    }

    /// Whether an edge `from -> to` exists.
    pub fn has_route(&self, from: Option<&S>, to: &S) -> bool {
        self.action(from, to).is_some()
    }

    /// All actions entering the graph with no prior state.
    pub fn initial_actions(&self) -> impl Iterator<Item = &Action<S>> {
        self.initial.iter().map(Route::action)
    }

    /// Hooks bound to `state` for one direction, in registration order.
    pub fn hooks(&self, state: &S, direction: Direction) -> &[Hook<P>] {
        self.hooks
            .get(state)
            .map(|lists| lists.get(direction))
            .unwrap_or(&[])
    }

    /// Triggers watching `state`, each paired with its target.
    ///
    /// Evaluation order is registration order across all routes of the
    /// state.
    pub fn triggers_from<'a>(
        &'a self,
        state: &S,
    ) -> impl Iterator<Item = (&'a SharedTrigger<P>, &'a S)> + 'a {
        self.routes_from(Some(state))
            .iter()
            .flat_map(|route| route.triggers.iter().map(move |t| (t, route.to())))
    }

    /// Every state that is an endpoint of at least one action.
    pub fn states(&self) -> HashSet<&S> {
        let mut states: HashSet<&S> = self.routes.keys().collect();
        states.extend(self.initial.iter().map(Route::to));
        for routes in self.routes.values() {
            states.extend(routes.iter().map(Route::to));
        }
        states
    }

    /// States with at least one hook registered.
    pub fn hooked_states(&self) -> impl Iterator<Item = &S> {
        self.hooks
            .iter()
            .filter(|(_, lists)| !lists.is_empty())
            .map(|(state, _)| state)
    }

    pub(crate) fn sources(&self) -> impl Iterator<Item = &S> {
        self.routes.keys()
    }

    /// Check the graph, accumulating every finding.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<GraphViolation>> {
        validate_graph(self)
    }

    pub fn summary(&self) -> GraphSummary {
        let mut outbound = BTreeMap::new();
        let mut inbound: BTreeMap<String, usize> = BTreeMap::new();

        if !self.initial.is_empty() {
            outbound.insert("default".to_string(), self.initial.len());
        }
        for (from, routes) in &self.routes {
            outbound.insert(format!("{:?}", from), routes.len());
        }
        let all_routes = self.initial.iter().chain(self.routes.values().flatten());
        for route in all_routes {
            *inbound.entry(format!("{:?}", route.to())).or_default() += 1;
        }

        GraphSummary {
            states: self.states().len(),
            hooked_states: self.hooked_states().count(),
            outbound,
            inbound,
        }
    }
}

/// Shape of a graph, for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphSummary {
    /// Distinct states, initial entry excluded
    pub states: usize,
    /// States with at least one hook
    pub hooked_states: usize,
    /// Outbound edge count per source, initial entry as `"default"`
    pub outbound: BTreeMap<String, usize>,
    /// Inbound edge count per target
    pub inbound: BTreeMap<String, usize>,
}

impl fmt::Display for GraphSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- {} states defined in total and {} state has hooks.",
            self.states, self.hooked_states
        )?;
        for (from, count) in &self.outbound {
            writeln!(f, "- State {} has {} outbounds.", from, count)?;
        }
        for (to, count) in &self.inbound {
            writeln!(f, "- State {} has {} inbounds.", to, count)?;
        }
        Ok(())
    }
}
