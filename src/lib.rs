//! Composite State: a hierarchical state machine compiler
//!
//! Configurations describe states that may themselves contain a nested
//! state machine. Nested states inherit their ancestors' transitions unless
//! they declare a more specific one for the same input. This crate compiles
//! such a tree into one of two executable forms:
//!
//! - a flat [`StateTransitionTable`](table::StateTransitionTable) where every
//!   leaf has pre-resolved transitions and composed exit/transition/enter
//!   actions, driven by row index
//! - a [`CompositeStateMachine`](composite::CompositeStateMachine) that keeps
//!   the nesting and shares each compiled sub-machine by reference
//!
//! Compilation is pure: it performs no I/O, runs no configured action, and
//! either yields a complete result or a [`CompileError`](compile::CompileError).
//!
//! # Core Concepts
//!
//! - **Symbol**: opaque identifier for states and inputs
//! - **Deferred**: an action attached to a configuration, bound once per
//!   compilation
//! - **Rank**: depth at which a transition is declared; deeper wins
//!
//! # Example
//!
//! ```rust
//! use composite_state::compile::CompileOptions;
//! use composite_state::config::{
//!     StateConfiguration, StateMachineConfiguration, TransitionConfiguration,
//! };
//! use composite_state::core::Deferred;
//! use composite_state::symbol_enum;
//! use std::sync::{Arc, Mutex};
//!
//! symbol_enum! {
//!     enum Player { Playing, Loading, Running, Stopped }
//! }
//! symbol_enum! {
//!     enum Command { Ready, Stop }
//! }
//!
//! let log = Arc::new(Mutex::new(Vec::new()));
//! let note = |entry: &'static str| {
//!     let log = Arc::clone(&log);
//!     Deferred::new(move || log.lock().unwrap().push(entry))
//! };
//!
//! let playing = Arc::new(StateMachineConfiguration::new(
//!     Player::Loading,
//!     vec![
//!         StateConfiguration::new(Player::Loading)
//!             .with_on_exit(note("exit Loading"))
//!             .with_transition(TransitionConfiguration::new(Command::Ready, Player::Running)),
//!         StateConfiguration::new(Player::Running),
//!     ],
//! ));
//! let configuration = StateMachineConfiguration::new(
//!     Player::Playing,
//!     vec![
//!         StateConfiguration::new(Player::Playing)
//!             .with_on_exit(note("exit Playing"))
//!             .with_sub_state(playing)
//!             .with_transition(TransitionConfiguration::new(Command::Stop, Player::Stopped)),
//!         StateConfiguration::new(Player::Stopped).with_on_enter(note("enter Stopped")),
//!     ],
//! );
//!
//! let table = configuration
//!     .to_state_transition_table(&CompileOptions::default())
//!     .unwrap();
//!
//! // Loading inherits Stop from Playing.
//! let stop = table.lookup(table.start(), &Command::Stop).unwrap();
//! stop.invoke();
//! assert_eq!(table.row(stop.next).unwrap().state, vec![Player::Stopped]);
//! assert_eq!(
//!     *log.lock().unwrap(),
//!     vec!["exit Loading", "exit Playing", "enter Stopped"]
//! );
//! ```

pub mod compile;
pub mod composite;
pub mod config;
pub mod core;
pub mod linear;
pub mod table;

// Re-export commonly used types
pub use crate::compile::{CompileError, CompileOptions};
pub use crate::composite::CompositeStateMachine;
pub use crate::config::{StateConfiguration, StateMachineConfiguration, TransitionConfiguration};
pub use crate::core::{Action, Deferred, Symbol};
pub use crate::table::StateTransitionTable;
