//! Issue Tracker
//!
//! This example walks several issues through an Open, Fixed, Tested and
//! Closed lifecycle with one shared graph.
//!
//! Key concepts:
//! - One graph, many cycles identified by id
//! - Enter hooks receiving the transition payload
//! - Input triggers firing transitions
//! - Illegal transitions leaving the state unchanged
//!
//! Run with: cargo run --example issue_tracker

use stateflow::builder::GraphBuilder;
use stateflow::machine::StateMachine;
use stateflow::state_enum;
use stateflow::trigger::TriggerBuilder;

state_enum! {
    enum Issue {
        Open,
        Fixed,
        Tested,
        Closed,
    }
}

fn main() {
    println!("=== Issue Tracker Example ===\n");

    let graph = GraphBuilder::<Issue, String>::new()
        .initialize(Issue::Open)
        .action("Fix", Issue::Open, Issue::Fixed)
        .action("Reopen", Issue::Fixed, Issue::Open)
        .action_with_triggers(
            "Test Pass",
            Issue::Fixed,
            Issue::Tested,
            TriggerBuilder::new().strings(["pass"]).build(),
        )
        .action_with_triggers(
            "Test Fail",
            Issue::Tested,
            Issue::Open,
            TriggerBuilder::new().strings(["fail"]).build(),
        )
        .action("Close", Issue::Tested, Issue::Closed)
        .select_state(Issue::Fixed)
        .on_enter(|payload| {
            println!("  fixed: {}", payload.map_or("no note", String::as_str));
            Ok(())
        })
        .select_state(Issue::Closed)
        .on_enter(|_| {
            println!("  closed");
            Ok(())
        })
        .build();

    println!("Graph summary:\n{}", graph.summary());

    let machine = StateMachine::new(graph);

    for id in ["issue-1", "issue-2"] {
        machine.start(id).unwrap();
        println!("{} started in {}", id, machine.current_state(id).unwrap().unwrap());
    }

    println!("\nissue-1:");
    machine
        .post_with_payload("issue-1", Issue::Fixed, &"null check".to_string())
        .unwrap();
    machine.accept("issue-1", &"pass").unwrap();
    machine.post("issue-1", Issue::Closed).unwrap();

    println!("\nissue-2:");
    machine.post("issue-2", Issue::Fixed).unwrap();
    machine.accept("issue-2", &"pass").unwrap();
    machine.accept("issue-2", &"fail").unwrap();
    if let Err(err) = machine.post("issue-2", Issue::Tested) {
        println!("  rejected: {}", err);
    }

    println!();
    for id in ["issue-1", "issue-2"] {
        println!("{} is {}", id, machine.current_state(id).unwrap().unwrap());
    }

    println!("\n=== Example Complete ===");
}
