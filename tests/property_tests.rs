//! Property-based tests for the compilation targets.
//!
//! These tests use proptest to verify properties hold across
//! many randomly shaped nested configurations.

use composite_state::compile::CompileOptions;
use composite_state::config::{
    StateConfiguration, StateMachineConfiguration, TransitionConfiguration,
};
use composite_state::core::Deferred;
use proptest::prelude::*;
use std::sync::{Arc, Mutex};

type Journal = Arc<Mutex<Vec<String>>>;
type Machine = StateMachineConfiguration<String, String>;

#[derive(Clone, Debug)]
struct Shape {
    depth: usize,
    width: usize,
    /// Levels that declare their own `up` transition.
    overrides: Vec<bool>,
}

impl Shape {
    fn deepest_override(&self) -> usize {
        (0..self.depth)
            .rev()
            .find(|&level| self.overrides[level])
            .unwrap_or(0)
    }
}

prop_compose! {
    fn arbitrary_shape()(
        depth in 1..4usize,
        width in 1..4usize,
        overrides in prop::collection::vec(any::<bool>(), 4),
    ) -> Shape {
        let mut overrides = overrides;
        overrides[0] = true;
        Shape { depth, width, overrides }
    }
}

fn note(log: &Journal, entry: String) -> Deferred {
    let log = Arc::clone(log);
    Deferred::new(move || log.lock().unwrap().push(entry.clone()))
}

/// Uniform tree: every state of a level shares the next level's machine.
fn level(shape: &Shape, at: usize, log: &Journal) -> Machine {
    let nested = (at + 1 < shape.depth).then(|| Arc::new(level(shape, at + 1, log)));

    let states = (0..shape.width)
        .map(|i| {
            let name = format!("L{at}S{i}");
            let sibling = format!("L{at}S{}", (i + 1) % shape.width);
            let mut state = StateConfiguration::new(name.clone())
                .with_on_enter(note(log, format!("enter {name}")))
                .with_on_exit(note(log, format!("exit {name}")))
                .with_transition(
                    TransitionConfiguration::new("next".to_string(), sibling)
                        .with_action(note(log, format!("next {name}"))),
                );
            if shape.overrides[at] {
                state = state.with_transition(TransitionConfiguration::new(
                    "up".to_string(),
                    format!("L{at}S0"),
                ));
            }
            if let Some(nested) = &nested {
                state = state.with_sub_state(Arc::clone(nested));
            }
            state
        })
        .collect();

    StateMachineConfiguration::new(format!("L{at}S0"), states)
}

fn drain(log: &Journal) -> Vec<String> {
    std::mem::take(&mut *log.lock().unwrap())
}

proptest! {
    #[test]
    fn every_leaf_gets_a_row(shape in arbitrary_shape()) {
        let log = Journal::default();
        let configuration = level(&shape, 0, &log);

        let table = configuration
            .to_state_transition_table(&CompileOptions::default())
            .unwrap();

        prop_assert_eq!(table.len(), shape.width.pow(shape.depth as u32));
        prop_assert!(table.states().iter().all(|row| row.state.len() == shape.depth));
        prop_assert_eq!(table.transition_count(), table.len() * 2);
    }

    #[test]
    fn deepest_declaration_wins(shape in arbitrary_shape()) {
        let log = Journal::default();
        let configuration = level(&shape, 0, &log);

        let transitions = configuration
            .to_state_transitions(&CompileOptions::default())
            .unwrap();

        let expected_rank = shape.deepest_override() + 1;
        for transition in transitions.iter().filter(|t| t.input == "up") {
            prop_assert_eq!(transition.rank, expected_rank);
            prop_assert_eq!(transition.next.len(), shape.depth);
            prop_assert_eq!(
                &transition.next[expected_rank - 1],
                &format!("L{}S0", expected_rank - 1)
            );
        }
        for transition in transitions.iter().filter(|t| t.input == "next") {
            prop_assert_eq!(transition.rank, shape.depth);
        }
    }

    #[test]
    fn chains_cross_every_level_once(shape in arbitrary_shape()) {
        let log = Journal::default();
        let configuration = level(&shape, 0, &log);

        let transitions = configuration
            .to_state_transitions(&CompileOptions::default())
            .unwrap();
        prop_assert!(drain(&log).is_empty());

        for transition in &transitions {
            transition.invoke();
            let calls = drain(&log);

            let exits: Vec<_> = calls.iter().filter(|c| c.starts_with("exit ")).collect();
            let enters: Vec<_> = calls.iter().filter(|c| c.starts_with("enter ")).collect();
            prop_assert_eq!(exits.len(), transition.state.len());
            prop_assert_eq!(enters.len(), transition.next.len());

            // Exits innermost first, enters outermost first.
            let expected_exits: Vec<String> = transition
                .state
                .iter()
                .rev()
                .map(|s| format!("exit {s}"))
                .collect();
            let expected_enters: Vec<String> = transition
                .next
                .iter()
                .map(|s| format!("enter {s}"))
                .collect();
            prop_assert_eq!(&calls[..exits.len()], &expected_exits[..]);
            prop_assert_eq!(&calls[calls.len() - enters.len()..], &expected_enters[..]);
        }
    }

    #[test]
    fn compilation_is_deterministic(shape in arbitrary_shape()) {
        let first_log = Journal::default();
        let second_log = Journal::default();
        let first = level(&shape, 0, &first_log)
            .to_state_transition_table(&CompileOptions::default())
            .unwrap();
        let second = level(&shape, 0, &second_log)
            .to_state_transition_table(&CompileOptions::default())
            .unwrap();

        prop_assert_eq!(first.layout(), second.layout());

        for (a, b) in first.states().iter().zip(second.states()) {
            for (x, y) in a.transitions().iter().zip(b.transitions()) {
                x.invoke();
                y.invoke();
                prop_assert_eq!(drain(&first_log), drain(&second_log));
            }
        }
    }

    #[test]
    fn shared_levels_compile_to_one_machine(shape in arbitrary_shape()) {
        let log = Journal::default();
        let configuration = level(&shape, 0, &log);

        let mut machine = configuration
            .to_composite_state_machine(&CompileOptions::default())
            .unwrap();

        for _ in 1..shape.depth {
            let nested: Vec<_> = machine
                .states()
                .iter()
                .map(|s| s.sub_state.clone().unwrap())
                .collect();
            prop_assert!(nested.iter().all(|m| Arc::ptr_eq(m, &nested[0])));
            machine = Arc::clone(&nested[0]);
        }
        prop_assert!(machine.states().iter().all(|s| s.sub_state.is_none()));
    }
}
