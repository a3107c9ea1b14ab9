//! Property-based tests for graphs and cycle drivers.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated graphs and inputs.

use proptest::prelude::*;
use stateflow::builder::GraphBuilder;
use stateflow::checkpoint::Checkpoint;
use stateflow::machine::{MachineError, MemoryStateProvider, StateMachine, StateProvider};
use stateflow::state_enum;
use stateflow::trigger::TriggerBuilder;
use stateflow::TransitionError;
use std::collections::{BTreeMap, HashSet};

state_enum! {
    enum TestState {
        Initial,
        Processing,
        Review,
        Complete,
        Failed,
    }
}

const ALL: [TestState; 5] = [
    TestState::Initial,
    TestState::Processing,
    TestState::Review,
    TestState::Complete,
    TestState::Failed,
];

prop_compose! {
    fn arbitrary_state()(variant in 0..5usize) -> TestState {
        ALL[variant]
    }
}

prop_compose! {
    fn arbitrary_edges()(edges in prop::collection::vec((arbitrary_state(), arbitrary_state()), 0..20))
        -> Vec<(TestState, TestState)> {
        edges
    }
}

fn build(edges: &[(TestState, TestState)]) -> stateflow::Graph<TestState, ()> {
    edges
        .iter()
        .enumerate()
        .fold(
            GraphBuilder::new().initialize(TestState::Initial),
            |builder, (n, (from, to))| builder.action(format!("edge {}", n), *from, *to),
        )
        .build()
}

proptest! {
    #[test]
    fn has_route_matches_registered_edges(
        edges in arbitrary_edges(),
        from in arbitrary_state(),
        to in arbitrary_state(),
    ) {
        let graph = build(&edges);
        let registered: HashSet<_> = edges.iter().copied().collect();

        prop_assert_eq!(graph.has_route(Some(&from), &to), registered.contains(&(from, to)));
        prop_assert_eq!(graph.has_route(None, &to), to == TestState::Initial);
    }

    #[test]
    fn first_registration_names_the_edge(edges in arbitrary_edges()) {
        let graph = build(&edges);

        for (from, to) in &edges {
            let first = edges.iter().position(|edge| edge == &(*from, *to)).unwrap();
            let action = graph.action(Some(from), to).unwrap();
            prop_assert_eq!(action.name(), format!("edge {}", first));
        }
    }

    #[test]
    fn first_accepting_trigger_wins(keys in prop::collection::vec(0u8..4, 1..8), input in 0u8..4) {
        let targets = [TestState::Processing, TestState::Review, TestState::Complete, TestState::Failed];
        let builder = keys.iter().enumerate().fold(
            GraphBuilder::<TestState, ()>::new().initialize(TestState::Initial),
            |builder, (n, key)| {
                builder.action_with_triggers(
                    format!("on {}", key),
                    TestState::Initial,
                    targets[n % targets.len()],
                    TriggerBuilder::new().ints([i32::from(*key)]).build(),
                )
            },
        );
        let graph = builder.build();
        let machine = StateMachine::new(graph);
        machine.start("p").unwrap();

        // routes registered later for an already known target are ignored
        let mut seen = HashSet::new();
        let expected = keys
            .iter()
            .enumerate()
            .filter(|(n, _)| seen.insert(targets[n % targets.len()]))
            .find(|(_, key)| **key == input)
            .map(|(n, _)| targets[n % targets.len()]);

        let accepted = machine.accept("p", &i32::from(input)).unwrap();
        prop_assert_eq!(accepted, expected.is_some());
        prop_assert_eq!(
            machine.current_state("p").unwrap(),
            Some(expected.unwrap_or(TestState::Initial))
        );
    }

    #[test]
    fn random_walk_tracks_legal_edges(
        edges in arbitrary_edges(),
        walk in prop::collection::vec(arbitrary_state(), 0..30),
    ) {
        let graph = build(&edges);
        let registered: HashSet<_> = edges.iter().copied().collect();
        let machine = StateMachine::new(graph);
        let mut expected = machine.start("walk").unwrap();

        for to in walk {
            match machine.post("walk", to) {
                Ok(()) => {
                    prop_assert!(registered.contains(&(expected, to)));
                    expected = to;
                }
                Err(MachineError::Transition(TransitionError::InvalidTransition { .. })) => {
                    prop_assert!(!registered.contains(&(expected, to)));
                }
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }
            prop_assert_eq!(machine.current_state("walk").unwrap(), Some(expected));
        }
    }

    #[test]
    fn checkpoint_restores_every_cycle(
        states in prop::collection::btree_map("[a-z]{1,8}", arbitrary_state(), 0..10),
    ) {
        let provider = MemoryStateProvider::new();
        for (id, state) in &states {
            provider.initialize_state(id, *state).unwrap();
        }

        let bytes = provider.checkpoint().to_bytes().unwrap();
        let restored = MemoryStateProvider::restore(Checkpoint::from_bytes(&bytes).unwrap()).unwrap();

        prop_assert_eq!(restored.len(), states.len());
        let snapshot: BTreeMap<String, TestState> = restored.checkpoint().states;
        prop_assert_eq!(snapshot, states);
    }
}
