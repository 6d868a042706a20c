use crate::geometry::ScreenPoint;

use super::toolkit::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainmentChange {
    Added,
    Moved,
    Removed,
}

/// Input and structure notifications a toolkit routes to registered listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// Pointer press anywhere on screen. `source` is the top-level element
    /// that received it, `None` when the press hit no element at all.
    Press {
        point: ScreenPoint,
        source: Option<ElementId>,
    },
    FocusGained {
        target: ElementId,
    },
    FocusLost {
        target: ElementId,
        opposite: Option<ElementId>,
    },
    /// `element` or one of its ancestors was added, moved or removed.
    Containment {
        element: ElementId,
        change: ContainmentChange,
    },
}
