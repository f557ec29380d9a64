//! Symbolic identifiers for states and inputs.
//!
//! Configurations name their states and inputs with opaque symbols. The
//! compiler only ever compares, hashes and prints them, so any small value
//! type with total equality qualifies.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state and input identifiers.
///
/// Equality and hashing must be total and consistent: transitions are
/// grouped by input and leaves are looked up by their full state path.
///
/// # Required Traits
///
/// - `Clone`: identifiers are copied into every unrolled path
/// - `Eq` + `Hash`: grouping by input, lookup by state
/// - `Debug`: diagnostics in errors
/// - `Serialize` + `DeserializeOwned`: table layouts can be persisted
///
/// # Example
///
/// ```rust
/// use composite_state::core::Symbol;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// impl Symbol for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
/// }
///
/// assert_eq!(Door::Open.name(), "Open");
/// ```
pub trait Symbol:
    Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Get the symbol's name for labels and error messages.
    fn name(&self) -> &str;
}

impl Symbol for String {
    fn name(&self) -> &str {
        self
    }
}
