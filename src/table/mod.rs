//! Flat compilation target: a self-contained, randomly indexable table.
//!
//! Each row is one leaf state. Each transition in a row names the input it
//! reacts to, the index of the row it leads to, and the composed action to
//! invoke. Driving the table needs nothing from the original configuration:
//!
//! ```rust
//! use composite_state::compile::CompileOptions;
//! use composite_state::config::{
//!     StateConfiguration, StateMachineConfiguration, TransitionConfiguration,
//! };
//! use composite_state::symbol_enum;
//!
//! symbol_enum! {
//!     enum Light { Red, Green }
//! }
//! symbol_enum! {
//!     enum Tick { Next }
//! }
//!
//! let configuration = StateMachineConfiguration::new(
//!     Light::Red,
//!     vec![
//!         StateConfiguration::new(Light::Red)
//!             .with_transition(TransitionConfiguration::new(Tick::Next, Light::Green)),
//!         StateConfiguration::new(Light::Green)
//!             .with_transition(TransitionConfiguration::new(Tick::Next, Light::Red)),
//!     ],
//! );
//!
//! let table = configuration
//!     .to_state_transition_table(&CompileOptions::default())
//!     .unwrap();
//!
//! let mut row = table.start();
//! for _ in 0..3 {
//!     let transition = table.lookup(row, &Tick::Next).unwrap();
//!     transition.invoke();
//!     row = transition.next;
//! }
//! assert_eq!(table.row(row).unwrap().state, vec![Light::Green]);
//! ```

mod error;
mod layout;

pub use error::LayoutError;
pub use layout::{RowLayout, TableLayout, TransitionLayout, LAYOUT_VERSION};

use crate::compile::{self, CompileError, CompileOptions};
use crate::config::StateMachineConfiguration;
use crate::core::{dot_delimited, transition_label, Action, StatePath, Symbol};
use crate::linear::StateTransition;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// One entry of a table row.
#[derive(Clone)]
pub struct TransitionTuple<I: Symbol> {
    pub input: I,
    /// Index of the row this transition leads to.
    pub next: usize,
    pub output: Action,
    pub label: Option<String>,
}

impl<I: Symbol> TransitionTuple<I> {
    /// Invoke the composed output action.
    pub fn invoke(&self) {
        (self.output)()
    }
}

impl<I: Symbol> fmt::Debug for TransitionTuple<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionTuple")
            .field("input", &self.input)
            .field("next", &self.next)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// A leaf state and its resolved transitions.
#[derive(Clone, Debug)]
pub struct StateRow<S: Symbol, I: Symbol> {
    pub state: StatePath<S>,
    pub label: Option<String>,
    transitions: Vec<TransitionTuple<I>>,
    by_input: HashMap<I, usize>,
}

impl<S: Symbol, I: Symbol> StateRow<S, I> {
    /// Transitions of this row, in resolution order.
    pub fn transitions(&self) -> &[TransitionTuple<I>] {
        &self.transitions
    }

    /// Transition taken on `input`, if any.
    pub fn transition(&self, input: &I) -> Option<&TransitionTuple<I>> {
        self.by_input.get(input).map(|&i| &self.transitions[i])
    }
}

/// Compiled flat state machine.
#[derive(Clone, Debug)]
pub struct StateTransitionTable<S: Symbol, I: Symbol> {
    states: Vec<StateRow<S, I>>,
    start: usize,
    by_path: HashMap<StatePath<S>, usize>,
}

impl<S: Symbol, I: Symbol> StateTransitionTable<S, I> {
    /// Build a table from already resolved transitions.
    ///
    /// `start` is the full path of the leaf the machine starts in (see
    /// [`StateMachineConfiguration::start_path`]) and always gets row 0, even
    /// when nothing leaves it. Other rows follow the first appearance of each
    /// state as a source; targets that never appear as a source get rows
    /// after that.
    ///
    /// Fails with [`CompileError::DuplicateTransition`] if one source reacts
    /// to the same input twice.
    pub fn from_transitions(
        start: &[S],
        transitions: &[StateTransition<S, I>],
        options: &CompileOptions,
    ) -> Result<Self, CompileError> {
        let mut builder = TableBuilder::new(*options);
        let start = builder.row(start);
        for transition in transitions {
            builder.row(&transition.state);
        }
        for transition in transitions {
            builder.push(transition)?;
        }
        Ok(builder.finish(start))
    }

    /// Row entered when the machine starts.
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn states(&self) -> &[StateRow<S, I>] {
        &self.states
    }

    pub fn row(&self, row: usize) -> Option<&StateRow<S, I>> {
        self.states.get(row)
    }

    /// Index of the row for a full leaf path.
    pub fn row_of(&self, state: &[S]) -> Option<usize> {
        self.by_path.get(state).copied()
    }

    /// Transition taken from `row` on `input`.
    pub fn lookup(&self, row: usize, input: &I) -> Option<&TransitionTuple<I>> {
        self.states.get(row)?.transition(input)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn transition_count(&self) -> usize {
        self.states.iter().map(|s| s.transitions.len()).sum()
    }

    /// Action-free snapshot of this table.
    pub fn layout(&self) -> TableLayout<S, I> {
        TableLayout {
            version: LAYOUT_VERSION,
            start: self.start,
            states: self
                .states
                .iter()
                .map(|row| RowLayout {
                    state: row.state.clone(),
                    label: row.label.clone(),
                    transitions: row
                        .transitions
                        .iter()
                        .map(|t| TransitionLayout {
                            input: t.input.clone(),
                            next: t.next,
                            label: t.label.clone(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

struct TableBuilder<S: Symbol, I: Symbol> {
    options: CompileOptions,
    states: Vec<StateRow<S, I>>,
    by_path: HashMap<StatePath<S>, usize>,
}

impl<S: Symbol, I: Symbol> TableBuilder<S, I> {
    fn new(options: CompileOptions) -> Self {
        Self {
            options,
            states: Vec::new(),
            by_path: HashMap::new(),
        }
    }

    /// Index of the row for `state`, adding an empty row if needed.
    fn row(&mut self, state: &[S]) -> usize {
        if let Some(&row) = self.by_path.get(state) {
            return row;
        }

        let row = self.states.len();
        self.states.push(StateRow {
            state: state.to_vec(),
            transitions: Vec::new(),
            label: self.options.label(|| dot_delimited(state)),
            by_input: HashMap::new(),
        });
        self.by_path.insert(state.to_vec(), row);
        row
    }

    fn push(&mut self, transition: &StateTransition<S, I>) -> Result<(), CompileError> {
        let next = self.row(&transition.next);
        let row = self.row(&transition.state);
        let label = self.options.label(|| {
            transition_label(&transition.state, &transition.input, &transition.next)
        });

        let state = &mut self.states[row];
        let position = state.transitions.len();
        match state.by_input.entry(transition.input.clone()) {
            Entry::Occupied(_) => {
                return Err(CompileError::DuplicateTransition {
                    state: dot_delimited(&transition.state),
                    input: transition.input.name().to_string(),
                })
            }
            Entry::Vacant(slot) => {
                slot.insert(position);
            }
        }
        state.transitions.push(TransitionTuple {
            input: transition.input.clone(),
            next,
            output: transition.output.clone(),
            label,
        });
        Ok(())
    }

    fn finish(self, start: usize) -> StateTransitionTable<S, I> {
        let table = StateTransitionTable {
            states: self.states,
            start,
            by_path: self.by_path,
        };
        debug!(
            rows = table.len(),
            transitions = table.transition_count(),
            "built state transition table"
        );
        table
    }
}

impl<S: Symbol, I: Symbol> StateMachineConfiguration<S, I> {
    /// Compile this configuration into a flat transition table.
    ///
    /// Every reachable leaf gets a row, in unroll order, so the root start
    /// leaf is row 0 and leaves without outgoing transitions are still
    /// addressable as targets.
    pub fn to_state_transition_table(
        &self,
        options: &CompileOptions,
    ) -> Result<StateTransitionTable<S, I>, CompileError> {
        self.validate()?;
        let unrolled = compile::unroll(self)?;
        let transitions = compile::resolve(&unrolled, options)?;

        let mut builder = TableBuilder::new(*options);
        for leaf in &unrolled {
            builder.row(&leaf.state);
        }
        for transition in &transitions {
            builder.push(transition)?;
        }
        Ok(builder.finish(0))
    }
}
