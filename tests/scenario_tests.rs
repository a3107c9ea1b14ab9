//! End-to-end scenarios driving cycles through the public API.

use parking_lot::Mutex;
use stateflow::builder::GraphBuilder;
use stateflow::machine::{StateMachine, DEFAULT_ID};
use stateflow::trigger::TriggerBuilder;
use stateflow::validation::GraphViolation;
use stateflow::{EngineConfig, Graph, HookError};
use std::sync::Arc;
use std::thread;
use stillwater::validation::Validation;

type Log = Arc<Mutex<Vec<String>>>;

fn record(log: &Log, entry: &'static str) -> impl Fn(Option<&String>) -> Result<(), HookError> {
    let log = Arc::clone(log);
    move |payload| {
        log.lock().push(format!("{} {:?}", entry, payload));
        Ok(())
    }
}

fn order_graph(log: &Log) -> Graph<&'static str, String> {
    GraphBuilder::new()
        .initialize_named("Create Order", "Created")
        .action("Pay Success", "Created", "Paid")
        .self_loop_with_triggers("Pay Fail", "Created", TriggerBuilder::new().strings(["declined"]).build())
        .action_with_triggers(
            "Deliver",
            "Paid",
            "Delivered",
            TriggerBuilder::new().strings(["shipped"]).build(),
        )
        .action("Cancel", "Paid", "Canceled")
        .select_state("Created")
        .on_enter(record(log, "enter Created"))
        .on_exit(record(log, "exit Created"))
        .select_state("Paid")
        .on_enter(record(log, "enter Paid"))
        .select_state("Delivered")
        .on_enter(record(log, "enter Delivered"))
        .build()
}

#[test]
fn order_lifecycle_runs_hooks_in_order() {
    let log = Log::default();
    let machine = StateMachine::new(order_graph(&log));
    let order = "order-7".to_string();

    machine.start_with_payload(DEFAULT_ID, &order).unwrap();
    assert!(machine.accept(DEFAULT_ID, &"declined").unwrap());
    machine.post_with_payload(DEFAULT_ID, "Paid", &order).unwrap();
    assert!(machine.accept(DEFAULT_ID, &"shipped".to_string()).unwrap());

    assert!(machine.is_state(DEFAULT_ID, &"Delivered").unwrap());
    assert_eq!(
        *log.lock(),
        vec![
            "enter Created Some(\"order-7\")",
            "exit Created None",
            "enter Created None",
            "exit Created Some(\"order-7\")",
            "enter Paid Some(\"order-7\")",
            "enter Delivered None",
        ]
    );
}

#[test]
fn self_loop_hooks_can_be_suppressed() {
    let log = Log::default();
    let config: EngineConfig =
        serde_json::from_str(r#"{ "suppress_exit_on_self_loop": true }"#).unwrap();
    assert!(config.silent);

    let machine = StateMachine::new(order_graph(&log)).with_config(config);
    machine.start(DEFAULT_ID).unwrap();
    machine.post(DEFAULT_ID, "Created").unwrap();

    assert_eq!(
        *log.lock(),
        vec!["enter Created None", "enter Created None"]
    );
}

#[test]
fn cycles_in_their_own_threads() {
    let log = Log::default();
    let machine = Arc::new(StateMachine::new(order_graph(&log)));

    let workers: Vec<_> = (0..10)
        .map(|n| {
            let machine = Arc::clone(&machine);
            thread::spawn(move || {
                let id = format!("order-{}", n);
                machine.start(&id).unwrap();
                for _ in 0..10 {
                    machine.post(&id, "Created").unwrap();
                }
                machine.post(&id, "Paid").unwrap();
                if n % 2 == 0 {
                    machine.post(&id, "Delivered").unwrap();
                } else {
                    machine.post(&id, "Canceled").unwrap();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    for n in 0..10 {
        let expected = if n % 2 == 0 { "Delivered" } else { "Canceled" };
        assert!(machine.is_state(&format!("order-{}", n), &expected).unwrap());
    }
    // per cycle: start, ten self loops and payment; delivery on even ids
    assert_eq!(log.lock().len(), 10 * (1 + 20 + 2) + 5);
}

#[test]
fn validation_reports_every_finding_without_blocking() {
    let graph = GraphBuilder::<&str, String>::new()
        .initialize("Open")
        .initialize("Draft")
        .action("Fix", "Open", "Fixed")
        .action("Archive", "Stale", "Archived")
        .select_state("Ghost")
        .on_enter(|_| Ok(()))
        .build();

    match graph.validate() {
        Validation::Failure(errors) => {
            let errors: Vec<_> = errors.iter().cloned().collect();
            assert_eq!(errors.len(), 3);
            assert!(errors.contains(&GraphViolation::MultipleInitialActions { count: 2 }));
            assert!(errors.contains(&GraphViolation::HooksOnUnknownState {
                state: "\"Ghost\"".to_string()
            }));
            assert!(errors.contains(&GraphViolation::UnreachableState {
                state: "\"Stale\"".to_string()
            }));
        }
        Validation::Success(_) => panic!("graph should not validate"),
    }

    let machine = StateMachine::new(graph);
    assert!(machine.start("t1").is_err());
    machine.start_state("t1", "Open").unwrap();
    machine.post("t1", "Fixed").unwrap();
}
