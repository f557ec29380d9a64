//! Configuration model: the tree-shaped input of the compiler.
//!
//! A configuration is authored once (usually by an external builder) and
//! never mutated afterwards. Both compilation targets read it through
//! shared references only.

mod machine;
mod state;
mod transition;

pub use machine::StateMachineConfiguration;
pub use state::StateConfiguration;
pub use transition::TransitionConfiguration;
