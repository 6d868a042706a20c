pub mod event;
pub mod machine;
pub mod model;

pub use event::{DismissReason, PopupEvent, StateTransition};
pub use machine::StateMachine;
pub use model::PopupState;
