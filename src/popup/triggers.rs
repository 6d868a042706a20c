//! Dismissal triggers. Each one turns a routed UI event into a dismissal
//! message for the controller; none of them touches controller state.

use crate::geometry::ScreenPoint;
use crate::state::DismissReason;
use crate::ui::{ancestors, ContainmentChange, ElementId, SurfaceId, Toolkit, UiEvent};

/// What the watchers compare incoming events against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerTargets {
    pub surface: SurfaceId,
    pub invoker: Option<ElementId>,
}

pub fn classify<T: Toolkit + ?Sized>(
    toolkit: &T,
    targets: TriggerTargets,
    event: &UiEvent,
) -> Option<DismissReason> {
    match *event {
        UiEvent::Press { point, source } => outside_press(toolkit, targets, point, source),
        UiEvent::FocusLost { target, .. } => focus_lost(targets, target),
        UiEvent::FocusGained { .. } => None,
        UiEvent::Containment { element, change } => invoker_changed(targets, element, change),
    }
}

/// A press dismisses unless it hit the invoker or landed inside the surface.
/// Presses on other controls of the owner count as outside.
pub fn outside_press<T: Toolkit + ?Sized>(
    toolkit: &T,
    targets: TriggerTargets,
    point: ScreenPoint,
    source: Option<ElementId>,
) -> Option<DismissReason> {
    let source = source?;
    let pressed = toolkit.deepest_element_at(point).unwrap_or(source);

    // The invoker toggles the popup through its own handler.
    if Some(pressed) == targets.invoker {
        return None;
    }
    if is_within(toolkit, pressed, targets.surface.element()) {
        return None;
    }
    Some(DismissReason::OutsidePress)
}

pub fn focus_lost(targets: TriggerTargets, target: ElementId) -> Option<DismissReason> {
    (target == targets.surface.element()).then_some(DismissReason::FocusLost)
}

pub fn invoker_changed(
    targets: TriggerTargets,
    element: ElementId,
    change: ContainmentChange,
) -> Option<DismissReason> {
    if targets.invoker != Some(element) {
        return None;
    }
    Some(match change {
        ContainmentChange::Added => DismissReason::InvokerAdded,
        ContainmentChange::Moved => DismissReason::InvokerMoved,
        ContainmentChange::Removed => DismissReason::InvokerRemoved,
    })
}

fn is_within<T: Toolkit + ?Sized>(toolkit: &T, element: ElementId, ancestor: ElementId) -> bool {
    ancestors(toolkit, element).any(|candidate| candidate == ancestor)
}
