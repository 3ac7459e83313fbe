use super::intent::Intent;
use super::state::UiState;

/// The only place a state transition happens: `(State, Intent) -> State`.
pub trait Reducer {
    type State: UiState;

    type Intent: Intent;

    /// Must not have side effects.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
