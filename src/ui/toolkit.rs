use serde::Serialize;

use crate::geometry::{ScreenPoint, Size};

use super::registry::ListenerRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ElementId(u64);

impl ElementId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// A top-level popup surface. Surfaces are elements too, so ancestry walks
/// starting inside popup content pass through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SurfaceId(ElementId);

impl SurfaceId {
    pub const fn from_element(element: ElementId) -> Self {
        Self(element)
    }

    pub const fn element(self) -> ElementId {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceRequest {
    pub owner: Option<ElementId>,
    pub location: Option<ScreenPoint>,
    pub always_on_top: bool,
}

/// Windowing operations the popup controller depends on.
///
/// `parent` describes containment ancestry: for a surface it yields the
/// owning top-level, matching how owned windows chain to their owner.
pub trait Toolkit {
    fn parent(&self, element: ElementId) -> Option<ElementId>;

    /// Whether `element` is a top-level container that can own surfaces.
    fn is_top_level(&self, element: ElementId) -> bool;

    /// On-screen origin, `None` while the element is not displayed.
    fn location_on_screen(&self, element: ElementId) -> Option<ScreenPoint>;

    fn preferred_size(&self, element: ElementId) -> Size;

    fn deepest_element_at(&self, point: ScreenPoint) -> Option<ElementId>;

    /// Creates a hidden surface. Surfaces without an owner are not focusable.
    fn create_surface(&mut self, request: SurfaceRequest) -> SurfaceId;

    fn attach(&mut self, surface: SurfaceId, content: ElementId);

    /// Resizes `surface` to its content's preferred size.
    fn pack_surface(&mut self, surface: SurfaceId);

    fn set_surface_location(&mut self, surface: SurfaceId, location: ScreenPoint);

    fn set_surface_visible(&mut self, surface: SurfaceId, visible: bool);

    fn destroy_surface(&mut self, surface: SurfaceId);

    fn request_focus(&mut self, element: ElementId) -> bool;

    fn listeners(&mut self) -> &mut ListenerRegistry;
}

/// Walks containment ancestry starting at (and including) `element`.
pub fn ancestors<T: Toolkit + ?Sized>(toolkit: &T, element: ElementId) -> Ancestors<'_, T> {
    Ancestors {
        toolkit,
        next: Some(element),
    }
}

pub struct Ancestors<'a, T: ?Sized> {
    toolkit: &'a T,
    next: Option<ElementId>,
}

impl<T: Toolkit + ?Sized> Iterator for Ancestors<'_, T> {
    type Item = ElementId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.toolkit.parent(current);
        Some(current)
    }
}
