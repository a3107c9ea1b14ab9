//! Graph checks, accumulated with `Validation`.

use crate::core::{Graph, State};
use crate::validation::violations::GraphViolation;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<GraphViolation>>;

/// Run every graph check, accumulating ALL violations.
///
/// Returns `Validation::Success(())` when the graph is sound.
pub fn validate_graph<S: State, P>(graph: &Graph<S, P>) -> Check {
    let mut checks: Vec<Check> = vec![initial_actions(graph)];
    checks.extend(hooked_states(graph));
    checks.extend(unreachable_states(graph));

    Validation::all_vec(checks).map(|_| ())
}

fn initial_actions<S: State, P>(graph: &Graph<S, P>) -> Check {
    match graph.initial_actions().count() {
        0 => Validation::fail(GraphViolation::NoInitialAction),
        1 => Validation::success(()),
        count => Validation::fail(GraphViolation::MultipleInitialActions { count }),
    }
}

fn hooked_states<S: State, P>(graph: &Graph<S, P>) -> Vec<Check> {
    let known = graph.states();
    let mut unknown: Vec<String> = graph
        .hooked_states()
        .filter(|state| !known.contains(state))
        .map(|state| format!("{:?}", state))
        .collect();
    unknown.sort();

    unknown
        .into_iter()
        .map(|state| Validation::fail(GraphViolation::HooksOnUnknownState { state }))
        .collect()
}

fn unreachable_states<S: State, P>(graph: &Graph<S, P>) -> Vec<Check> {
    let mut entered: HashSet<&S> = graph.initial_actions().map(|a| a.to()).collect();
    for source in graph.sources() {
        for route in graph.routes_from(Some(source)) {
            if route.to() != source {
                entered.insert(route.to());
            }
        }
    }

    let mut unreachable: Vec<String> = graph
        .sources()
        .filter(|source| !entered.contains(source))
        .map(|source| format!("{:?}", source))
        .collect();
    unreachable.sort();

    unreachable
        .into_iter()
        .map(|state| Validation::fail(GraphViolation::UnreachableState { state }))
        .collect()
}
