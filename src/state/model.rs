use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PopupState {
    #[default]
    Hidden,
    Visible,
}

impl PopupState {
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }
}
