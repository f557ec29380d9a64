//! Path resolution: entering a state means entering its start leaf.

use super::error::CompileError;
use crate::config::StateConfiguration;
use crate::core::{StatePath, Symbol};

/// Resolve `target` to the full path of the leaf it enters.
///
/// Starting at `target` within `states`, descend through each composite
/// state's start state until a leaf is reached, collecting every identifier
/// on the way. The returned path is relative to the level `states` belongs
/// to.
///
/// # Example
///
/// ```rust
/// use composite_state::compile::resolve_path;
/// use composite_state::config::{StateConfiguration, StateMachineConfiguration};
/// use std::sync::Arc;
///
/// let inner: StateMachineConfiguration<String, String> = StateMachineConfiguration::new(
///     "A1".to_string(),
///     vec![StateConfiguration::new("A1".to_string())],
/// );
/// let states = vec![StateConfiguration::new("A".to_string()).with_sub_state(Arc::new(inner))];
///
/// let path = resolve_path(&states, &"A".to_string()).unwrap();
/// assert_eq!(path, vec!["A".to_string(), "A1".to_string()]);
/// ```
pub fn resolve_path<S: Symbol, I: Symbol>(
    states: &[StateConfiguration<S, I>],
    target: &S,
) -> Result<StatePath<S>, CompileError> {
    let mut current = states
        .iter()
        .find(|s| s.state == *target)
        .ok_or_else(|| CompileError::UnknownState {
            state: target.name().to_string(),
        })?;

    let mut path = vec![current.state.clone()];
    while let Some(sub_state) = &current.sub_state {
        current = sub_state
            .find(&sub_state.start)
            .ok_or_else(|| CompileError::UnknownStart {
                start: sub_state.start.name().to_string(),
            })?;
        path.push(current.state.clone());
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StateMachineConfiguration;
    use std::sync::Arc;

    crate::symbol_enum! {
        enum St {
            A,
            A1,
            A2,
            A2a,
            B,
        }
    }

    crate::symbol_enum! {
        enum In {
            X,
        }
    }

    fn leaf(state: St) -> StateConfiguration<St, In> {
        StateConfiguration::new(state)
    }

    fn nested() -> Vec<StateConfiguration<St, In>> {
        let deepest = Arc::new(StateMachineConfiguration::new(St::A2a, vec![leaf(St::A2a)]));
        let inner = Arc::new(StateMachineConfiguration::new(
            St::A2,
            vec![leaf(St::A1), leaf(St::A2).with_sub_state(deepest)],
        ));
        vec![leaf(St::A).with_sub_state(inner), leaf(St::B)]
    }

    #[test]
    fn leaf_target_resolves_to_itself() {
        assert_eq!(resolve_path(&nested(), &St::B).unwrap(), vec![St::B]);
    }

    #[test]
    fn composite_target_descends_through_starts() {
        assert_eq!(
            resolve_path(&nested(), &St::A).unwrap(),
            vec![St::A, St::A2, St::A2a]
        );
    }

    #[test]
    fn unknown_target_is_rejected() {
        assert_eq!(
            resolve_path(&nested(), &St::A1),
            Err(CompileError::UnknownState {
                state: "A1".to_string()
            })
        );
    }

    #[test]
    fn missing_nested_start_is_rejected() {
        let broken = Arc::new(StateMachineConfiguration::new(St::A2, vec![leaf(St::A1)]));
        let states = vec![leaf(St::A).with_sub_state(broken)];

        assert!(matches!(
            resolve_path(&states, &St::A),
            Err(CompileError::UnknownStart { .. })
        ));
    }
}
