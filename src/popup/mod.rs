//! Focusable popup controller.
//!
//! A [`PopupWindow`] hosts caller-owned content on a fresh top-level surface
//! for every visible period, anchored to an invoking element. It hides
//! itself on a press outside the surface, when the surface loses focus, or
//! when the invoker is added, moved or removed.

pub mod anchor;
pub mod listeners;
pub mod triggers;
mod window;

pub use crate::state::{DismissReason, PopupState};
pub use listeners::DismissWatchers;
pub use window::{PopupOptions, PopupWindow};
