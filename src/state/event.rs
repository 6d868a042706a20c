use serde::Serialize;

use super::model::PopupState;

/// Why a visible popup was dismissed without an explicit hide request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DismissReason {
    OutsidePress,
    FocusLost,
    InvokerAdded,
    InvokerMoved,
    InvokerRemoved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PopupEvent {
    Show,
    Hide,
    Dismiss(DismissReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateTransition {
    pub from: PopupState,
    pub event: PopupEvent,
    pub to: PopupState,
}

impl StateTransition {
    pub const fn new(from: PopupState, event: PopupEvent, to: PopupState) -> Self {
        Self { from, event, to }
    }
}
