//! Property-based tests for the state machine.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use dialog_fsm::builder::MachineBuilder;
use dialog_fsm::core::StateDef;
use dialog_fsm::emitter::handler;
use dialog_fsm::machine::{Notification, StateMachine, TransitionEvent};
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const STATES: [&str; 4] = ["home", "state2", "state3", "away"];
const EVENTS: [&str; 5] = ["start", "next", "reset", "leave", "bogus"];

fn machine() -> StateMachine {
    let mut builder = MachineBuilder::new().initial("home");
    for state in STATES {
        builder = builder.state(state, StateDef::new());
    }
    builder
        .event(TransitionEvent::new("start", "home", "state2"))
        .event(TransitionEvent::new("next", "state2", "state3"))
        .event(TransitionEvent::new("next", "state3", "home"))
        .event(TransitionEvent::new("reset", "*", "home"))
        .event(TransitionEvent::new("leave", "home,state3", "away"))
        .build()
}

fn counting(fsm: &mut StateMachine, names: &[&str]) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&count);
    let h = handler(move |_: &str, _: &Notification| {
        c.fetch_add(1, Ordering::SeqCst);
    });
    for name in names {
        fsm.on(*name, Arc::clone(&h));
    }
    count
}

prop_compose! {
    fn arbitrary_event()(index in 0..EVENTS.len()) -> &'static str {
        EVENTS[index]
    }
}

proptest! {
    #[test]
    fn add_event_keeps_names_sorted(names in prop::collection::vec("[a-e]{1,3}", 0..20)) {
        let mut fsm = MachineBuilder::new().build();
        for name in &names {
            fsm.add_event(TransitionEvent::new(name.clone(), "*", "x"));
        }

        let sorted = fsm.event_names().windows(2).all(|w| w[0] <= w[1]);
        prop_assert!(sorted);
        prop_assert_eq!(fsm.event_names().len(), names.len());

        let event_names: Vec<&str> = fsm.events().iter().map(|e| e.name()).collect();
        prop_assert_eq!(event_names, fsm.event_names().to_vec());
    }

    #[test]
    fn stop_always_resets(events in prop::collection::vec(arbitrary_event(), 0..30)) {
        let mut fsm = machine();
        fsm.start().unwrap();
        for event in &events {
            fsm.trigger(event).unwrap();
        }

        fsm.stop().unwrap();
        prop_assert!(!fsm.is_running());
        prop_assert_eq!(fsm.state(), None);
        prop_assert_eq!(fsm.previous(), None);
    }

    #[test]
    fn state_present_exactly_while_running(events in prop::collection::vec(arbitrary_event(), 0..30)) {
        let mut fsm = machine();
        prop_assert_eq!(fsm.state().is_some(), fsm.is_running());

        fsm.start().unwrap();
        for event in &events {
            fsm.trigger(event).unwrap();
            prop_assert!(fsm.is_running());
            prop_assert!(fsm.state().is_some());
        }
    }

    #[test]
    fn valid_trigger_predicts_trigger(events in prop::collection::vec(arbitrary_event(), 0..30)) {
        let mut fsm = machine();
        fsm.start().unwrap();
        for event in &events {
            let expected = fsm.valid_trigger(event);
            prop_assert_eq!(fsm.trigger(event).unwrap(), expected);
        }
    }

    #[test]
    fn unmatched_trigger_emits_nothing(events in prop::collection::vec(arbitrary_event(), 0..15)) {
        let mut fsm = machine();
        fsm.start().unwrap();
        for event in &events {
            fsm.trigger(event).unwrap();
        }

        let before = fsm.state().map(str::to_string);
        let count = counting(&mut fsm, &["before", "exit", "enter", "after"]);
        fsm.trigger("bogus").unwrap();

        prop_assert_eq!(fsm.state().map(str::to_string), before);
        prop_assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn valid_trigger_is_false_while_stopped(event in arbitrary_event()) {
        let mut fsm = machine();
        prop_assert!(!fsm.valid_trigger(event));

        fsm.start().unwrap();
        fsm.stop().unwrap();
        prop_assert!(!fsm.valid_trigger(event));
    }

    #[test]
    fn is_matches_state(events in prop::collection::vec(arbitrary_event(), 0..20)) {
        let mut fsm = machine();
        fsm.start().unwrap();
        for event in &events {
            fsm.trigger(event).unwrap();
        }

        for state in STATES {
            prop_assert_eq!(fsm.is(state), fsm.state() == Some(state));
        }
    }

    #[test]
    fn each_transition_emits_four_phases(events in prop::collection::vec(arbitrary_event(), 0..20)) {
        let mut fsm = machine();
        fsm.start().unwrap();
        let count = counting(&mut fsm, &["before", "exit", "enter", "after"]);

        let mut fired = 0;
        for event in &events {
            if fsm.trigger(event).unwrap() {
                fired += 1;
            }
        }

        prop_assert_eq!(count.load(Ordering::SeqCst), fired * 4);
        prop_assert_eq!(fsm.history().len(), fired);
    }

    #[test]
    fn restart_emits_one_stop_then_one_start(restarts in 1..5usize) {
        let mut fsm = machine();
        fsm.start().unwrap();
        let stops = counting(&mut fsm, &["stop"]);
        let starts = counting(&mut fsm, &["start"]);

        for _ in 0..restarts {
            fsm.start().unwrap();
        }

        prop_assert_eq!(stops.load(Ordering::SeqCst), restarts);
        prop_assert_eq!(starts.load(Ordering::SeqCst), restarts);
    }
}
