use crate::ui::{ElementId, Interest, ListenerId, ListenerRegistry, SubscriberId, SurfaceId};

/// Registry handles for the three dismissal watchers of one visible period.
///
/// `install` and `uninstall` are strictly paired: uninstall removes exactly
/// the handles install returned, so a popup never leaves a global press
/// registration behind.
#[derive(Debug, Default)]
pub struct DismissWatchers {
    press: Option<ListenerId>,
    focus: Option<ListenerId>,
    invoker: Option<(ListenerId, ElementId)>,
}

impl DismissWatchers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(
        &mut self,
        registry: &mut ListenerRegistry,
        subscriber: SubscriberId,
        surface: SurfaceId,
        invoker: Option<ElementId>,
    ) {
        if self.is_installed() {
            tracing::warn!(?subscriber, "dismiss watchers already installed; replacing");
            self.uninstall(registry);
        }

        self.press = Some(registry.register(subscriber, Interest::GlobalPress));
        self.focus = Some(registry.register(subscriber, Interest::Focus(surface.element())));
        self.invoker = invoker.map(|invoker| {
            (
                registry.register(subscriber, Interest::Containment(invoker)),
                invoker,
            )
        });
        tracing::debug!(?subscriber, ?surface, ?invoker, "dismiss watchers installed");
    }

    pub fn uninstall(&mut self, registry: &mut ListenerRegistry) {
        let handles = [
            self.press.take(),
            self.focus.take(),
            self.invoker.take().map(|(listener, _)| listener),
        ];
        for listener in handles.into_iter().flatten() {
            registry.unregister(listener);
        }
    }

    /// Moves the structure watcher to a new invoker while visible.
    pub fn rebind_invoker(
        &mut self,
        registry: &mut ListenerRegistry,
        subscriber: SubscriberId,
        invoker: Option<ElementId>,
    ) {
        if !self.is_installed() || self.watched_invoker() == invoker {
            return;
        }
        if let Some((listener, _)) = self.invoker.take() {
            registry.unregister(listener);
        }
        self.invoker = invoker.map(|invoker| {
            (
                registry.register(subscriber, Interest::Containment(invoker)),
                invoker,
            )
        });
    }

    /// Press and focus watchers are always present while visible; the
    /// invoker watcher only exists when there is an invoker.
    pub fn is_installed(&self) -> bool {
        self.press.is_some() && self.focus.is_some()
    }

    pub fn owns(&self, listener: ListenerId) -> bool {
        self.press == Some(listener)
            || self.focus == Some(listener)
            || self.invoker.is_some_and(|(handle, _)| handle == listener)
    }

    pub fn watched_invoker(&self) -> Option<ElementId> {
        self.invoker.map(|(_, invoker)| invoker)
    }
}
