//! Linear compilation target: one resolved transition per leaf and input.

use crate::compile::{self, CompileError, CompileOptions};
use crate::config::StateMachineConfiguration;
use crate::core::{Action, StatePath, Symbol};
use std::fmt;

/// A fully resolved transition between two leaf states.
///
/// `output` runs the source leaf's exit chain (innermost first), the
/// transition's own action, then the target leaf's enter chain (outermost
/// first).
#[derive(Clone)]
pub struct StateTransition<S: Symbol, I: Symbol> {
    pub state: StatePath<S>,
    pub input: I,
    pub next: StatePath<S>,
    pub output: Action,
    /// Depth of the level that declared the selected transition.
    pub rank: usize,
    /// `A.B -- X --> C`, present when debugger display is enabled.
    pub label: Option<String>,
}

impl<S: Symbol, I: Symbol> StateTransition<S, I> {
    /// Invoke the composed output action.
    pub fn invoke(&self) {
        (self.output)()
    }
}

impl<S: Symbol, I: Symbol> fmt::Debug for StateTransition<S, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateTransition")
            .field("state", &self.state)
            .field("input", &self.input)
            .field("next", &self.next)
            .field("rank", &self.rank)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl<S: Symbol, I: Symbol> StateMachineConfiguration<S, I> {
    /// Flatten this configuration into resolved leaf transitions.
    ///
    /// Transitions are ordered by source leaf (unroll order, root start leaf
    /// first) and, within a leaf, by the first appearance of each input among
    /// its inherited candidates.
    ///
    /// # Example
    ///
    /// ```rust
    /// use composite_state::compile::CompileOptions;
    /// use composite_state::config::{
    ///     StateConfiguration, StateMachineConfiguration, TransitionConfiguration,
    /// };
    /// use composite_state::symbol_enum;
    ///
    /// symbol_enum! {
    ///     enum Door { Open, Closed }
    /// }
    /// symbol_enum! {
    ///     enum Push { Shove }
    /// }
    ///
    /// let configuration = StateMachineConfiguration::new(
    ///     Door::Closed,
    ///     vec![
    ///         StateConfiguration::new(Door::Closed)
    ///             .with_transition(TransitionConfiguration::new(Push::Shove, Door::Open)),
    ///         StateConfiguration::new(Door::Open)
    ///             .with_transition(TransitionConfiguration::new(Push::Shove, Door::Closed)),
    ///     ],
    /// );
    ///
    /// let transitions = configuration
    ///     .to_state_transitions(&CompileOptions::default())
    ///     .unwrap();
    /// assert_eq!(transitions.len(), 2);
    /// assert_eq!(transitions[0].next, vec![Door::Open]);
    /// ```
    pub fn to_state_transitions(
        &self,
        options: &CompileOptions,
    ) -> Result<Vec<StateTransition<S, I>>, CompileError> {
        self.validate()?;
        let unrolled = compile::unroll(self)?;
        compile::resolve(&unrolled, options)
    }
}
