use crate::geometry::ScreenPoint;
use crate::ui::{ancestors, ElementId, Toolkit};

/// Nearest top-level container of `invoker`, inclusive.
pub fn resolve_owner<T: Toolkit + ?Sized>(
    toolkit: &T,
    invoker: Option<ElementId>,
) -> Option<ElementId> {
    let invoker = invoker?;
    ancestors(toolkit, invoker).find(|element| toolkit.is_top_level(*element))
}

/// Converts invoker-relative offsets to screen coordinates. Without an
/// invoker, or with one that is not on screen, the offsets are used as-is.
pub fn absolute_location<T: Toolkit + ?Sized>(
    toolkit: &T,
    invoker: Option<ElementId>,
    dx: i32,
    dy: i32,
) -> ScreenPoint {
    let Some(invoker) = invoker else {
        return ScreenPoint::new(dx, dy);
    };
    match toolkit.location_on_screen(invoker) {
        Some(origin) => origin.offset(dx, dy),
        None => {
            tracing::warn!(
                ?invoker,
                "popup invoker is not on screen; using offsets as absolute coordinates"
            );
            ScreenPoint::new(dx, dy)
        }
    }
}
