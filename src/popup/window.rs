use serde::Deserialize;

use crate::geometry::{ScreenPoint, Size};
use crate::state::{DismissReason, PopupEvent, PopupState, StateMachine, StateTransition};
use crate::ui::{Delivery, ElementId, SubscriberId, SurfaceId, SurfaceRequest, Toolkit};

use super::anchor;
use super::listeners::DismissWatchers;
use super::triggers::{self, TriggerTargets};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PopupOptions {
    pub always_on_top: bool,
}

impl Default for PopupOptions {
    fn default() -> Self {
        Self {
            always_on_top: true,
        }
    }
}

/// Popup controller. Behaves like a context menu, but the hosted content
/// can take keyboard focus.
///
/// The controller is built once and reused across show/hide cycles. Content
/// and location persist; the surface is rebuilt on every show so it is
/// always bound to the current owner. While visible the surface exists and
/// all dismissal watchers are registered; while hidden neither is true.
#[derive(Debug)]
pub struct PopupWindow {
    id: SubscriberId,
    content: ElementId,
    options: PopupOptions,
    owner: Option<ElementId>,
    invoker: Option<ElementId>,
    location: Option<ScreenPoint>,
    surface: Option<SurfaceId>,
    watchers: DismissWatchers,
    machine: StateMachine,
}

impl PopupWindow {
    pub fn new(content: ElementId) -> Self {
        Self::with_options(content, PopupOptions::default())
    }

    pub fn with_options(content: ElementId, options: PopupOptions) -> Self {
        Self {
            id: SubscriberId::next(),
            content,
            options,
            owner: None,
            invoker: None,
            location: None,
            surface: None,
            watchers: DismissWatchers::new(),
            machine: StateMachine::new(),
        }
    }

    pub fn id(&self) -> SubscriberId {
        self.id
    }

    pub fn content(&self) -> ElementId {
        self.content
    }

    pub fn owner(&self) -> Option<ElementId> {
        self.owner
    }

    pub fn invoker(&self) -> Option<ElementId> {
        self.invoker
    }

    pub fn location(&self) -> Option<ScreenPoint> {
        self.location
    }

    pub fn surface(&self) -> Option<SurfaceId> {
        self.surface
    }

    pub fn state(&self) -> PopupState {
        self.machine.state()
    }

    pub fn history(&self) -> &[StateTransition] {
        self.machine.history()
    }

    pub fn is_visible(&self) -> bool {
        self.machine.state().is_visible()
    }

    /// Displays the popup at `(dx, dy)` in the invoker's coordinate space,
    /// or at absolute `(dx, dy)` when there is no invoker.
    pub fn show<T: Toolkit + ?Sized>(
        &mut self,
        toolkit: &mut T,
        invoker: Option<ElementId>,
        dx: i32,
        dy: i32,
    ) {
        self.invoker = invoker;

        let owner = anchor::resolve_owner(toolkit, invoker);
        if owner != self.owner {
            // A live surface is bound to its owner; it cannot migrate.
            if self.surface.is_some() {
                tracing::debug!(popup = ?self.id, from = ?self.owner, to = ?owner, "popup owner changed");
                self.apply(toolkit, PopupEvent::Hide);
            }
            self.owner = owner;
        } else if self.is_visible() {
            self.watchers
                .rebind_invoker(toolkit.listeners(), self.id, invoker);
        }

        let location = anchor::absolute_location(toolkit, invoker, dx, dy);
        self.set_location(toolkit, location.x, location.y);
        self.set_visible(toolkit, true);
    }

    pub fn set_visible<T: Toolkit + ?Sized>(&mut self, toolkit: &mut T, visible: bool) {
        let event = if visible {
            PopupEvent::Show
        } else {
            PopupEvent::Hide
        };
        self.apply(toolkit, event);
    }

    pub fn set_location<T: Toolkit + ?Sized>(&mut self, toolkit: &mut T, x: i32, y: i32) {
        let location = ScreenPoint::new(x, y);
        if self.location == Some(location) {
            return;
        }
        self.location = Some(location);
        if let Some(surface) = self.surface {
            toolkit.set_surface_location(surface, location);
        }
    }

    /// Like [`PopupWindow::set_location`]; `None` keeps the current location.
    pub fn set_location_point<T: Toolkit + ?Sized>(
        &mut self,
        toolkit: &mut T,
        location: Option<ScreenPoint>,
    ) {
        match location {
            Some(point) => self.set_location(toolkit, point.x, point.y),
            None => tracing::debug!(popup = ?self.id, "ignoring empty popup location"),
        }
    }

    /// Resizes the live surface to the content's preferred size.
    pub fn pack<T: Toolkit + ?Sized>(&mut self, toolkit: &mut T) {
        if let Some(surface) = self.surface {
            toolkit.pack_surface(surface);
        }
    }

    pub fn preferred_size<T: Toolkit + ?Sized>(&self, toolkit: &T) -> Size {
        toolkit.preferred_size(self.content)
    }

    /// Forwards keyboard focus to `element` inside the popup. Fails while
    /// hidden or when the surface has no owner.
    pub fn request_focus<T: Toolkit + ?Sized>(&self, toolkit: &mut T, element: ElementId) -> bool {
        if self.surface.is_none() {
            return false;
        }
        toolkit.request_focus(element)
    }

    /// Feeds a routed event to the dismissal watchers. Deliveries for other
    /// popups, or for watchers that were uninstalled after the event was
    /// queued, are dropped.
    pub fn handle_delivery<T: Toolkit + ?Sized>(
        &mut self,
        toolkit: &mut T,
        delivery: &Delivery,
    ) -> Option<DismissReason> {
        if delivery.subscriber != self.id || !self.watchers.owns(delivery.listener) {
            return None;
        }
        let targets = TriggerTargets {
            surface: self.surface?,
            invoker: self.invoker,
        };
        let reason = triggers::classify(toolkit, targets, &delivery.event)?;
        tracing::debug!(popup = ?self.id, ?reason, "dismissing popup");
        self.apply(toolkit, PopupEvent::Dismiss(reason));
        Some(reason)
    }

    /// Hides the popup and releases every registration it holds.
    pub fn close<T: Toolkit + ?Sized>(mut self, toolkit: &mut T) {
        self.set_visible(toolkit, false);
    }

    fn apply<T: Toolkit + ?Sized>(&mut self, toolkit: &mut T, event: PopupEvent) {
        let Some(next) = self.machine.next_state(event) else {
            return;
        };
        match next {
            PopupState::Visible => self.enter_visible(toolkit),
            PopupState::Hidden => self.teardown_surface(toolkit),
        }
        self.machine.transition(event);

        debug_assert_eq!(self.is_visible(), self.surface.is_some());
        debug_assert_eq!(self.surface.is_some(), self.watchers.is_installed());
    }

    fn enter_visible<T: Toolkit + ?Sized>(&mut self, toolkit: &mut T) {
        if self.surface.is_some() {
            tracing::warn!(popup = ?self.id, "stale popup surface found; tearing it down");
            self.teardown_surface(toolkit);
        }

        let surface = self.build_surface(toolkit);
        self.surface = Some(surface);
        self.watchers
            .install(toolkit.listeners(), self.id, surface, self.invoker);
        toolkit.set_surface_visible(surface, true);
    }

    fn teardown_surface<T: Toolkit + ?Sized>(&mut self, toolkit: &mut T) {
        self.watchers.uninstall(toolkit.listeners());
        if let Some(surface) = self.surface.take() {
            toolkit.set_surface_visible(surface, false);
            toolkit.destroy_surface(surface);
        }
    }

    fn build_surface<T: Toolkit + ?Sized>(&self, toolkit: &mut T) -> SurfaceId {
        if self.owner.is_none() {
            tracing::warn!(popup = ?self.id, "popup has no owner; its surface will not be focusable");
        }
        let surface = toolkit.create_surface(SurfaceRequest {
            owner: self.owner,
            location: self.location,
            always_on_top: self.options.always_on_top,
        });
        toolkit.attach(surface, self.content);
        toolkit.pack_surface(surface);
        surface
    }
}
