use super::{event::StateTransition, PopupEvent, PopupState};

const HISTORY_LIMIT: usize = 64;

/// Hidden/Visible transition table for one popup.
///
/// Requests that would keep the current state are no-ops rather than
/// errors: dismissal watchers race each other and the loser must be
/// harmless.
#[derive(Debug)]
pub struct StateMachine {
    state: PopupState,
    transition_history: Vec<StateTransition>,
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            state: PopupState::default(),
            transition_history: Vec::new(),
        }
    }

    pub fn state(&self) -> PopupState {
        self.state
    }

    pub fn can_transition(&self, event: PopupEvent) -> bool {
        self.next_state(event).is_some()
    }

    pub fn next_state(&self, event: PopupEvent) -> Option<PopupState> {
        use PopupEvent::*;
        match (self.state, event) {
            (PopupState::Hidden, Show) => Some(PopupState::Visible),
            (PopupState::Visible, Hide) => Some(PopupState::Hidden),
            (PopupState::Visible, Dismiss(_)) => Some(PopupState::Hidden),
            _ => None,
        }
    }

    /// Applies `event`, returning the recorded transition or `None` when the
    /// event was a same-state no-op.
    pub fn transition(&mut self, event: PopupEvent) -> Option<StateTransition> {
        let Some(next) = self.next_state(event) else {
            tracing::trace!(state = ?self.state, ?event, "ignoring same-state request");
            return None;
        };
        tracing::debug!(from = ?self.state, ?event, to = ?next, "popup state transition");

        let record = StateTransition::new(self.state, event, next);
        self.state = next;
        if self.transition_history.len() == HISTORY_LIMIT {
            self.transition_history.remove(0);
        }
        self.transition_history.push(record);

        Some(record)
    }

    /// Most recent transitions, oldest first.
    pub fn history(&self) -> &[StateTransition] {
        &self.transition_history
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PopupState::{:?}", self.state)
    }
}
