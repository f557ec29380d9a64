//! Deferred and compiled actions.
//!
//! Configurations attach *deferred* actions to states and transitions. A
//! deferred action is a binder that yields an invocable [`Action`]; the
//! compiler binds each attached slot exactly once and then only composes
//! the results, never re-binding per invocation.

use std::fmt;
use std::sync::Arc;

/// Invocable, shareable compiled action.
pub type Action = Arc<dyn Fn() + Send + Sync>;

type Binder = Arc<dyn Fn() -> Action + Send + Sync>;

/// Lazily-bound action attached to a configuration.
///
/// Instead of storing the action directly we store a binder, so that
/// configurations stay cheap to author and each compilation produces its
/// own compiled values.
///
/// # Example
///
/// ```rust
/// use composite_state::core::Deferred;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let hits = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&hits);
/// let deferred = Deferred::new(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// let action = deferred.compile();
/// action();
/// action();
/// assert_eq!(hits.load(Ordering::SeqCst), 2);
/// ```
#[derive(Clone)]
pub struct Deferred {
    binder: Binder,
}

impl Deferred {
    /// Create a deferred action from a closure.
    ///
    /// Binding shares the closure; it is not cloned per compilation.
    pub fn new<F>(action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let action: Action = Arc::new(action);
        Self {
            binder: Arc::new(move || Arc::clone(&action)),
        }
    }

    /// Create a deferred action from a custom binder.
    ///
    /// The binder runs once per compiled slot.
    pub fn lazy<B>(binder: B) -> Self
    where
        B: Fn() -> Action + Send + Sync + 'static,
    {
        Self {
            binder: Arc::new(binder),
        }
    }

    /// Bind this deferred action into its invocable form.
    pub fn compile(&self) -> Action {
        (self.binder)()
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Deferred")
    }
}

/// Action that does nothing.
pub fn noop() -> Action {
    Arc::new(|| {})
}

/// Sequence actions into a single action, invoked in order.
pub fn compose(steps: Vec<Action>) -> Action {
    match steps.len() {
        0 => noop(),
        1 => steps.into_iter().next().unwrap_or_else(noop),
        _ => Arc::new(move || {
            for step in &steps {
                step();
            }
        }),
    }
}

/// Bind an optional deferred action.
pub(crate) fn compile_optional(deferred: Option<&Deferred>) -> Option<Action> {
    deferred.map(Deferred::compile)
}
