use std::collections::BTreeMap;

use thiserror::Error;

use crate::geometry::{Bounds, ScreenPoint, Size};

use super::event::{ContainmentChange, UiEvent};
use super::registry::{Delivery, ListenerRegistry};
use super::toolkit::{ElementId, SurfaceId, SurfaceRequest, Toolkit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementKind {
    /// Top-level container that can own popup surfaces.
    Window,
    Widget,
    Surface,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("unknown element {0:?}")]
    UnknownElement(ElementId),
    #[error("element {0:?} is not a top-level")]
    NotTopLevel(ElementId),
    #[error("cannot move {element:?} under its own descendant {parent:?}")]
    CyclicParent {
        element: ElementId,
        parent: ElementId,
    },
    #[error("element {0:?} is a top-level and cannot be reparented")]
    TopLevel(ElementId),
}

pub type SceneResult<T> = std::result::Result<T, SceneError>;

#[derive(Debug, Clone)]
struct Node {
    kind: ElementKind,
    name: String,
    parent: Option<ElementId>,
    owner: Option<ElementId>,
    children: Vec<ElementId>,
    // Relative to the parent; screen coordinates for top-levels.
    bounds: Bounds,
    preferred: Size,
    visible: bool,
    always_on_top: bool,
    focusable: bool,
}

impl Node {
    fn new(kind: ElementKind, name: impl Into<String>, bounds: Bounds) -> Self {
        Self {
            kind,
            name: name.into(),
            parent: None,
            owner: None,
            children: Vec::new(),
            bounds,
            preferred: bounds.size(),
            visible: true,
            always_on_top: false,
            focusable: kind != ElementKind::Widget,
        }
    }

    fn is_top_level(&self) -> bool {
        matches!(self.kind, ElementKind::Window | ElementKind::Surface)
    }
}

/// In-memory retained element tree with hit testing, focus tracking and
/// listener dispatch.
///
/// Events are never delivered synchronously: they are routed through the
/// listener registry and queued until the host drains them with
/// [`Scene::take_deliveries`].
#[derive(Debug, Default)]
pub struct Scene {
    nodes: BTreeMap<ElementId, Node>,
    next_id: u64,
    // Top-levels, bottom to top.
    stacking: Vec<ElementId>,
    focused_top_level: Option<ElementId>,
    focus_owner: Option<ElementId>,
    listeners: ListenerRegistry,
    pending: Vec<Delivery>,
    surfaces_created: usize,
    surfaces_destroyed: usize,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_window(&mut self, name: impl Into<String>, bounds: Bounds) -> ElementId {
        let id = self.allocate(Node::new(ElementKind::Window, name, bounds));
        self.stacking.push(id);
        id
    }

    pub fn add_widget(
        &mut self,
        parent: ElementId,
        name: impl Into<String>,
        bounds: Bounds,
    ) -> SceneResult<ElementId> {
        self.node(parent)?;
        let id = self.allocate(Node::new(ElementKind::Widget, name, bounds));
        self.link(id, parent);
        self.emit_subtree(id, ContainmentChange::Added);
        Ok(id)
    }

    /// Creates a widget with no parent, e.g. popup content built before its
    /// first show.
    pub fn add_detached_widget(&mut self, name: impl Into<String>, bounds: Bounds) -> ElementId {
        self.allocate(Node::new(ElementKind::Widget, name, bounds))
    }

    pub fn set_preferred_size(&mut self, element: ElementId, size: Size) -> SceneResult<()> {
        self.node_mut(element)?.preferred = size;
        Ok(())
    }

    pub fn reparent(&mut self, element: ElementId, parent: ElementId) -> SceneResult<()> {
        if self.node(element)?.is_top_level() {
            return Err(SceneError::TopLevel(element));
        }
        self.node(parent)?;
        if self.is_structural_ancestor(element, parent) {
            return Err(SceneError::CyclicParent { element, parent });
        }

        self.unlink(element);
        self.link(element, parent);
        self.emit_subtree(element, ContainmentChange::Added);
        Ok(())
    }

    /// Moves `element` to `origin`, relative to its parent (screen
    /// coordinates for top-levels).
    pub fn move_element(&mut self, element: ElementId, origin: ScreenPoint) -> SceneResult<()> {
        let node = self.node_mut(element)?;
        if node.bounds.origin() == origin {
            return Ok(());
        }
        node.bounds.x = origin.x;
        node.bounds.y = origin.y;
        self.emit_subtree(element, ContainmentChange::Moved);
        Ok(())
    }

    /// Detaches `element` from its parent. The element stays alive and can
    /// be reparented later.
    pub fn remove(&mut self, element: ElementId) -> SceneResult<()> {
        let node = self.node(element)?;
        if node.parent.is_none() {
            return Ok(());
        }
        tracing::debug!(?element, name = %node.name, "removing element");
        self.emit_subtree(element, ContainmentChange::Removed);
        self.unlink(element);
        if self
            .focus_owner
            .is_some_and(|focused| self.is_structural_ancestor(element, focused))
        {
            self.focus_owner = None;
        }
        Ok(())
    }

    /// Simulates a pointer press: dispatches the press, then moves focus to
    /// the pressed top-level (or to nothing when the press hit the desktop).
    pub fn press_at(&mut self, point: ScreenPoint) -> Option<ElementId> {
        let target = self.deepest_element_at(point);
        let source = target.map(|element| self.root_of(element));
        self.emit(UiEvent::Press { point, source });

        match source {
            Some(root) if self.nodes.get(&root).is_some_and(|node| node.focusable) => {
                self.raise(root);
                self.set_focused_top_level(Some(root));
                self.focus_owner = target;
            }
            Some(_) => {}
            None => {
                self.set_focused_top_level(None);
                self.focus_owner = None;
            }
        }
        target
    }

    /// Raises and focuses a top-level, like a window manager activation.
    pub fn activate(&mut self, top_level: ElementId) -> SceneResult<()> {
        let node = self.node(top_level)?;
        if !node.is_top_level() {
            return Err(SceneError::NotTopLevel(top_level));
        }
        tracing::debug!(window = %node.name, "activating top-level");
        self.raise(top_level);
        self.set_focused_top_level(Some(top_level));
        self.focus_owner = Some(top_level);
        Ok(())
    }

    pub fn take_deliveries(&mut self) -> Vec<Delivery> {
        std::mem::take(&mut self.pending)
    }

    pub fn registry(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn focused_top_level(&self) -> Option<ElementId> {
        self.focused_top_level
    }

    pub fn focus_owner(&self) -> Option<ElementId> {
        self.focus_owner
    }

    pub fn bounds(&self, element: ElementId) -> Option<Bounds> {
        self.nodes.get(&element).map(|node| node.bounds)
    }

    pub fn contains(&self, element: ElementId) -> bool {
        self.nodes.contains_key(&element)
    }

    pub fn is_focusable(&self, element: ElementId) -> bool {
        self.nodes.get(&element).is_some_and(|node| node.focusable)
    }

    pub fn is_surface_visible(&self, surface: SurfaceId) -> bool {
        self.nodes
            .get(&surface.element())
            .is_some_and(|node| node.kind == ElementKind::Surface && node.visible)
    }

    pub fn surface_owner(&self, surface: SurfaceId) -> Option<ElementId> {
        self.nodes.get(&surface.element()).and_then(|node| node.owner)
    }

    pub fn live_surfaces(&self) -> Vec<SurfaceId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.kind == ElementKind::Surface)
            .map(|(id, _)| SurfaceId::from_element(*id))
            .collect()
    }

    pub fn surfaces_created(&self) -> usize {
        self.surfaces_created
    }

    pub fn surfaces_destroyed(&self) -> usize {
        self.surfaces_destroyed
    }

    /// Whether the element hangs off a visible top-level.
    pub fn is_displayed(&self, element: ElementId) -> bool {
        let root = self.root_of(element);
        self.nodes
            .get(&root)
            .is_some_and(|node| node.is_top_level() && node.visible)
    }

    fn allocate(&mut self, node: Node) -> ElementId {
        self.next_id += 1;
        let id = ElementId::from_raw(self.next_id);
        self.nodes.insert(id, node);
        id
    }

    fn node(&self, element: ElementId) -> SceneResult<&Node> {
        self.nodes
            .get(&element)
            .ok_or(SceneError::UnknownElement(element))
    }

    fn node_mut(&mut self, element: ElementId) -> SceneResult<&mut Node> {
        self.nodes
            .get_mut(&element)
            .ok_or(SceneError::UnknownElement(element))
    }

    fn link(&mut self, element: ElementId, parent: ElementId) {
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(element);
        }
        if let Some(node) = self.nodes.get_mut(&element) {
            node.parent = Some(parent);
        }
    }

    fn unlink(&mut self, element: ElementId) {
        let Some(parent) = self.nodes.get_mut(&element).and_then(|node| node.parent.take())
        else {
            return;
        };
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.retain(|child| *child != element);
        }
    }

    fn is_structural_ancestor(&self, ancestor: ElementId, element: ElementId) -> bool {
        let mut current = Some(element);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(&id).and_then(|node| node.parent);
        }
        false
    }

    fn root_of(&self, element: ElementId) -> ElementId {
        let mut current = element;
        while let Some(parent) = self.nodes.get(&current).and_then(|node| node.parent) {
            current = parent;
        }
        current
    }

    fn subtree(&self, element: ElementId) -> Vec<ElementId> {
        let mut collected = Vec::new();
        let mut stack = vec![element];
        while let Some(id) = stack.pop() {
            collected.push(id);
            if let Some(node) = self.nodes.get(&id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        collected
    }

    fn emit_subtree(&mut self, element: ElementId, change: ContainmentChange) {
        for id in self.subtree(element) {
            self.emit(UiEvent::Containment { element: id, change });
        }
    }

    fn emit(&mut self, event: UiEvent) {
        let deliveries = self.listeners.route(&event);
        if !deliveries.is_empty() {
            tracing::trace!(?event, count = deliveries.len(), "queueing deliveries");
        }
        self.pending.extend(deliveries);
    }

    fn raise(&mut self, top_level: ElementId) {
        self.stacking.retain(|id| *id != top_level);
        self.stacking.push(top_level);
    }

    fn set_focused_top_level(&mut self, next: Option<ElementId>) {
        if self.focused_top_level == next {
            return;
        }
        let previous = std::mem::replace(&mut self.focused_top_level, next);
        if let Some(target) = previous {
            self.emit(UiEvent::FocusLost {
                target,
                opposite: next,
            });
        }
        if let Some(target) = next {
            self.emit(UiEvent::FocusGained { target });
        }
    }

    fn deepest_in(&self, element: ElementId, point: ScreenPoint) -> ElementId {
        let Some(node) = self.nodes.get(&element) else {
            return element;
        };
        let local = ScreenPoint::new(point.x - node.bounds.x, point.y - node.bounds.y);
        node.children
            .iter()
            .rev()
            .find(|child| {
                self.nodes
                    .get(*child)
                    .is_some_and(|child| child.visible && child.bounds.contains(local))
            })
            .map_or(element, |child| self.deepest_in(*child, local))
    }

    fn stacking_top_first(&self) -> impl Iterator<Item = ElementId> + '_ {
        let on_top = |id: &ElementId| self.nodes.get(id).is_some_and(|node| node.always_on_top);
        let raised = self.stacking.iter().rev().filter(move |id| on_top(*id));
        let normal = self.stacking.iter().rev().filter(move |id| !on_top(*id));
        raised.chain(normal).copied()
    }
}

impl Toolkit for Scene {
    fn parent(&self, element: ElementId) -> Option<ElementId> {
        let node = self.nodes.get(&element)?;
        node.parent.or(node.owner)
    }

    fn is_top_level(&self, element: ElementId) -> bool {
        self.nodes
            .get(&element)
            .is_some_and(|node| node.kind == ElementKind::Window)
    }

    fn location_on_screen(&self, element: ElementId) -> Option<ScreenPoint> {
        if !self.is_displayed(element) {
            return None;
        }
        let mut location = ScreenPoint::default();
        let mut current = Some(element);
        while let Some(id) = current {
            let node = self.nodes.get(&id)?;
            location = location.offset(node.bounds.x, node.bounds.y);
            current = node.parent;
        }
        Some(location)
    }

    fn preferred_size(&self, element: ElementId) -> Size {
        let Some(node) = self.nodes.get(&element) else {
            return Size::default();
        };
        match (node.kind, node.children.first()) {
            (ElementKind::Surface, Some(content)) => self.preferred_size(*content),
            _ => node.preferred,
        }
    }

    fn deepest_element_at(&self, point: ScreenPoint) -> Option<ElementId> {
        self.stacking_top_first()
            .find(|id| {
                self.nodes
                    .get(id)
                    .is_some_and(|node| node.visible && node.bounds.contains(point))
            })
            .map(|top_level| self.deepest_in(top_level, point))
    }

    fn create_surface(&mut self, request: SurfaceRequest) -> SurfaceId {
        let origin = request.location.unwrap_or_default();
        let mut node = Node::new(
            ElementKind::Surface,
            "popup-surface",
            Bounds::new(origin.x, origin.y, 0, 0),
        );
        node.owner = request.owner;
        node.visible = false;
        node.always_on_top = request.always_on_top;
        node.focusable = request.owner.is_some();

        let id = self.allocate(node);
        self.stacking.push(id);
        self.surfaces_created += 1;
        tracing::debug!(surface = ?id, owner = ?request.owner, "surface created");
        SurfaceId::from_element(id)
    }

    fn attach(&mut self, surface: SurfaceId, content: ElementId) {
        if let Err(err) = self.reparent(content, surface.element()) {
            tracing::warn!(?surface, ?content, %err, "failed to attach popup content");
            return;
        }
        if let Some(node) = self.nodes.get_mut(&content) {
            node.bounds.x = 0;
            node.bounds.y = 0;
        }
    }

    fn pack_surface(&mut self, surface: SurfaceId) {
        let size = self.preferred_size(surface.element());
        let children = match self.nodes.get(&surface.element()) {
            Some(node) => node.children.clone(),
            None => return,
        };
        for child in children {
            let preferred = self.preferred_size(child);
            if let Some(node) = self.nodes.get_mut(&child) {
                node.bounds.width = preferred.width;
                node.bounds.height = preferred.height;
            }
        }
        if let Some(node) = self.nodes.get_mut(&surface.element()) {
            node.bounds.width = size.width;
            node.bounds.height = size.height;
        }
    }

    fn set_surface_location(&mut self, surface: SurfaceId, location: ScreenPoint) {
        if let Some(node) = self.nodes.get_mut(&surface.element()) {
            node.bounds.x = location.x;
            node.bounds.y = location.y;
        }
    }

    fn set_surface_visible(&mut self, surface: SurfaceId, visible: bool) {
        let id = surface.element();
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        if node.visible == visible {
            return;
        }
        node.visible = visible;
        let focusable = node.focusable;
        let owner = node.owner;

        if visible {
            self.raise(id);
            if focusable {
                self.set_focused_top_level(Some(id));
            }
        } else if self.focused_top_level == Some(id) {
            self.set_focused_top_level(owner);
            self.focus_owner = owner;
        }
    }

    fn destroy_surface(&mut self, surface: SurfaceId) {
        let id = surface.element();
        if self.nodes.get(&id).map(|node| node.kind) != Some(ElementKind::Surface) {
            tracing::warn!(?surface, "destroy requested for unknown surface");
            return;
        }
        self.set_surface_visible(surface, false);

        let children = self
            .nodes
            .get(&id)
            .map(|node| node.children.clone())
            .unwrap_or_default();
        for child in children {
            self.emit_subtree(child, ContainmentChange::Removed);
            self.unlink(child);
        }
        self.stacking.retain(|top_level| *top_level != id);
        self.nodes.remove(&id);
        self.surfaces_destroyed += 1;
        tracing::debug!(?surface, "surface destroyed");
    }

    fn request_focus(&mut self, element: ElementId) -> bool {
        let root = self.root_of(element);
        let focusable = self
            .nodes
            .get(&root)
            .is_some_and(|node| node.is_top_level() && node.visible && node.focusable);
        if !focusable {
            return false;
        }
        self.set_focused_top_level(Some(root));
        self.focus_owner = Some(element);
        true
    }

    fn listeners(&mut self) -> &mut ListenerRegistry {
        &mut self.listeners
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{ancestors, Interest, SubscriberId};

    struct Fixture {
        scene: Scene,
        window: ElementId,
        panel: ElementId,
        button: ElementId,
    }

    fn fixture() -> Fixture {
        let mut scene = Scene::new();
        let window = scene.add_window("main", Bounds::new(100, 100, 400, 300));
        let panel = scene
            .add_widget(window, "panel", Bounds::new(20, 20, 200, 100))
            .expect("panel should attach to window");
        let button = scene
            .add_widget(panel, "button", Bounds::new(10, 10, 80, 24))
            .expect("button should attach to panel");
        Fixture {
            scene,
            window,
            panel,
            button,
        }
    }

    #[test]
    fn location_on_screen_accumulates_parent_offsets() {
        let fixture = fixture();
        assert_eq!(
            fixture.scene.location_on_screen(fixture.button),
            Some(ScreenPoint::new(130, 130))
        );
        assert_eq!(
            fixture.scene.location_on_screen(fixture.window),
            Some(ScreenPoint::new(100, 100))
        );
    }

    #[test]
    fn detached_elements_have_no_screen_location() {
        let mut fixture = fixture();
        fixture
            .scene
            .remove(fixture.panel)
            .expect("panel removal should work");
        assert_eq!(fixture.scene.location_on_screen(fixture.button), None);
        assert!(!fixture.scene.is_displayed(fixture.panel));
    }

    #[test]
    fn deepest_element_at_descends_into_children() {
        let fixture = fixture();
        assert_eq!(
            fixture.scene.deepest_element_at(ScreenPoint::new(135, 135)),
            Some(fixture.button)
        );
        assert_eq!(
            fixture.scene.deepest_element_at(ScreenPoint::new(125, 200)),
            Some(fixture.panel)
        );
        assert_eq!(
            fixture.scene.deepest_element_at(ScreenPoint::new(125, 250)),
            Some(fixture.window)
        );
        assert_eq!(
            fixture.scene.deepest_element_at(ScreenPoint::new(5, 5)),
            None
        );
    }

    #[test]
    fn always_on_top_surface_wins_hit_test_and_chains_to_owner() {
        let mut fixture = fixture();
        let content = fixture
            .scene
            .add_detached_widget("content", Bounds::new(0, 0, 50, 50));
        let surface = fixture.scene.create_surface(SurfaceRequest {
            owner: Some(fixture.window),
            location: Some(ScreenPoint::new(120, 120)),
            always_on_top: true,
        });
        fixture.scene.attach(surface, content);
        fixture.scene.pack_surface(surface);
        fixture.scene.set_surface_visible(surface, true);
        fixture.scene.activate(fixture.window).expect("window exists");

        assert_eq!(
            fixture.scene.deepest_element_at(ScreenPoint::new(135, 135)),
            Some(content)
        );
        assert_eq!(
            ancestors(&fixture.scene, content).collect::<Vec<_>>(),
            vec![content, surface.element(), fixture.window]
        );
        assert!(!fixture.scene.is_top_level(surface.element()));
    }

    #[test]
    fn surface_without_owner_cannot_take_focus() {
        let mut scene = Scene::new();
        let content = scene.add_detached_widget("content", Bounds::new(0, 0, 10, 10));
        let surface = scene.create_surface(SurfaceRequest {
            owner: None,
            location: None,
            always_on_top: true,
        });
        scene.attach(surface, content);
        scene.set_surface_visible(surface, true);

        assert!(!scene.is_focusable(surface.element()));
        assert!(!scene.request_focus(content));
        assert_eq!(scene.focused_top_level(), None);
    }

    #[test]
    fn pack_sizes_surface_to_content_preference() {
        let mut scene = Scene::new();
        let content = scene.add_detached_widget("content", Bounds::new(0, 0, 10, 10));
        scene
            .set_preferred_size(content, Size::new(180, 240))
            .expect("content exists");
        let surface = scene.create_surface(SurfaceRequest {
            owner: None,
            location: Some(ScreenPoint::new(3, 4)),
            always_on_top: true,
        });
        scene.attach(surface, content);
        scene.pack_surface(surface);

        assert_eq!(
            scene.bounds(surface.element()),
            Some(Bounds::new(3, 4, 180, 240))
        );
        assert_eq!(scene.bounds(content), Some(Bounds::new(0, 0, 180, 240)));
    }

    #[test]
    fn structural_changes_are_routed_for_the_whole_subtree() {
        let mut fixture = fixture();
        let subscriber = SubscriberId::next();
        let listener = fixture
            .scene
            .listeners()
            .register(subscriber, Interest::Containment(fixture.button));

        fixture
            .scene
            .move_element(fixture.panel, ScreenPoint::new(30, 30))
            .expect("panel exists");
        fixture
            .scene
            .remove(fixture.panel)
            .expect("panel exists");

        let deliveries = fixture.scene.take_deliveries();
        assert_eq!(
            deliveries
                .iter()
                .map(|delivery| delivery.event)
                .collect::<Vec<_>>(),
            vec![
                UiEvent::Containment {
                    element: fixture.button,
                    change: ContainmentChange::Moved,
                },
                UiEvent::Containment {
                    element: fixture.button,
                    change: ContainmentChange::Removed,
                },
            ]
        );
        assert!(deliveries.iter().all(|delivery| delivery.listener == listener));
        assert!(fixture.scene.take_deliveries().is_empty());
    }

    #[test]
    fn press_moves_focus_and_reports_source_top_level() {
        let mut fixture = fixture();
        let subscriber = SubscriberId::next();
        fixture
            .scene
            .listeners()
            .register(subscriber, Interest::GlobalPress);
        fixture
            .scene
            .listeners()
            .register(subscriber, Interest::Focus(fixture.window));

        let target = fixture.scene.press_at(ScreenPoint::new(135, 135));
        assert_eq!(target, Some(fixture.button));
        assert_eq!(fixture.scene.focused_top_level(), Some(fixture.window));
        assert_eq!(fixture.scene.focus_owner(), Some(fixture.button));

        fixture.scene.press_at(ScreenPoint::new(0, 0));
        assert_eq!(fixture.scene.focused_top_level(), None);

        let events = fixture
            .scene
            .take_deliveries()
            .into_iter()
            .map(|delivery| delivery.event)
            .collect::<Vec<_>>();
        assert_eq!(
            events,
            vec![
                UiEvent::Press {
                    point: ScreenPoint::new(135, 135),
                    source: Some(fixture.window),
                },
                UiEvent::FocusGained {
                    target: fixture.window
                },
                UiEvent::Press {
                    point: ScreenPoint::new(0, 0),
                    source: None,
                },
                UiEvent::FocusLost {
                    target: fixture.window,
                    opposite: None,
                },
            ]
        );
    }

    #[test]
    fn reparent_rejects_cycles_and_top_levels() {
        let mut fixture = fixture();
        assert_eq!(
            fixture.scene.reparent(fixture.panel, fixture.button),
            Err(SceneError::CyclicParent {
                element: fixture.panel,
                parent: fixture.button,
            })
        );
        assert_eq!(
            fixture.scene.reparent(fixture.window, fixture.panel),
            Err(SceneError::TopLevel(fixture.window))
        );
        let missing = ElementId::from_raw(999);
        assert_eq!(
            fixture.scene.add_widget(missing, "orphan", Bounds::default()),
            Err(SceneError::UnknownElement(missing))
        );
    }

    #[test]
    fn activate_rejects_elements_that_are_not_top_levels() {
        let mut fixture = fixture();
        assert_eq!(
            fixture.scene.activate(fixture.button),
            Err(SceneError::NotTopLevel(fixture.button))
        );
        assert_eq!(fixture.scene.focused_top_level(), None);
        assert_eq!(
            SceneError::NotTopLevel(fixture.button).to_string(),
            format!("element {:?} is not a top-level", fixture.button)
        );
    }

    #[test]
    fn destroy_surface_detaches_content_and_restores_owner_focus() {
        let mut fixture = fixture();
        let content = fixture
            .scene
            .add_detached_widget("content", Bounds::new(0, 0, 50, 50));
        let surface = fixture.scene.create_surface(SurfaceRequest {
            owner: Some(fixture.window),
            location: None,
            always_on_top: true,
        });
        fixture.scene.attach(surface, content);
        fixture.scene.set_surface_visible(surface, true);
        assert_eq!(
            fixture.scene.focused_top_level(),
            Some(surface.element())
        );

        fixture.scene.destroy_surface(surface);
        assert_eq!(fixture.scene.focused_top_level(), Some(fixture.window));
        assert!(fixture.scene.contains(content));
        assert_eq!(fixture.scene.parent(content), None);
        assert!(fixture.scene.live_surfaces().is_empty());
        assert_eq!(fixture.scene.surfaces_destroyed(), 1);
    }
}
