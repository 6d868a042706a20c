//! Windowing seam used by the popup controller.
//!
//! [`Toolkit`] is the contract the controller consumes; [`Scene`] is the
//! in-memory element tree shipped with the crate and used by the demo host.

mod event;
mod registry;
mod scene;
mod toolkit;

pub use event::{ContainmentChange, UiEvent};
pub use registry::{Delivery, Interest, ListenerId, ListenerRegistry, SubscriberId};
pub use scene::{Scene, SceneError, SceneResult};
pub use toolkit::{ancestors, Ancestors, ElementId, SurfaceId, SurfaceRequest, Toolkit};
