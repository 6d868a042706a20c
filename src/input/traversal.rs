use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Tab,
    Enter,
    Escape,
    Character(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyModifiers {
    pub const NONE: Self = Self::new(false, false, false);
    pub const CTRL: Self = Self::new(true, false, false);
    pub const SHIFT: Self = Self::new(false, true, false);
    pub const CTRL_SHIFT: Self = Self::new(true, true, false);

    pub const fn new(ctrl: bool, shift: bool, alt: bool) -> Self {
        Self { ctrl, shift, alt }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyStroke {
    pub key: Key,
    pub modifiers: KeyModifiers,
}

impl KeyStroke {
    pub const fn new(key: Key, modifiers: KeyModifiers) -> Self {
        Self { key, modifiers }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAreaAction {
    InsertTab,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAreaKeyOutcome {
    FocusNext,
    FocusPrevious,
    Action(TextAreaAction),
    /// Not bound; the text area handles the key as typed input.
    Unhandled,
}

/// Focus traversal keys and extra actions of a multi-line text area.
///
/// Multi-line editors keep plain Tab for inserting a tab character and
/// traverse focus with Ctrl+Tab / Ctrl+Shift+Tab by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextAreaKeyBindings {
    pub forward_traversal: Vec<KeyStroke>,
    pub backward_traversal: Vec<KeyStroke>,
    pub actions: HashMap<KeyStroke, TextAreaAction>,
}

impl Default for TextAreaKeyBindings {
    fn default() -> Self {
        Self {
            forward_traversal: vec![KeyStroke::new(Key::Tab, KeyModifiers::CTRL)],
            backward_traversal: vec![KeyStroke::new(Key::Tab, KeyModifiers::CTRL_SHIFT)],
            actions: HashMap::new(),
        }
    }
}

/// Makes a text area traverse focus with Tab / Shift+Tab like every other
/// control, and moves tab insertion to Ctrl+Tab.
///
/// Only applies when the bindings are exactly the multi-line defaults (one
/// Ctrl+Tab forward key, one Ctrl[+Shift]+Tab backward key); any other
/// customization is left alone. Returns whether the bindings changed.
pub fn invert_text_area_traversal(bindings: &mut TextAreaKeyBindings) -> bool {
    let ([forward], [backward]) = (
        bindings.forward_traversal.as_slice(),
        bindings.backward_traversal.as_slice(),
    ) else {
        return false;
    };

    let forward_is_ctrl_tab = forward.key == Key::Tab
        && forward.modifiers.ctrl
        && !forward.modifiers.shift
        && !forward.modifiers.alt;
    let backward_is_ctrl_shift_tab = backward.key == Key::Tab
        && (backward.modifiers.ctrl || backward.modifiers.shift)
        && !backward.modifiers.alt;
    if !forward_is_ctrl_tab || !backward_is_ctrl_shift_tab {
        return false;
    }

    bindings.forward_traversal = vec![KeyStroke::new(Key::Tab, KeyModifiers::NONE)];
    bindings.backward_traversal = vec![KeyStroke::new(Key::Tab, KeyModifiers::SHIFT)];
    bindings.actions.insert(
        KeyStroke::new(Key::Tab, KeyModifiers::CTRL),
        TextAreaAction::InsertTab,
    );
    true
}

pub fn resolve_text_area_key(
    bindings: &TextAreaKeyBindings,
    stroke: KeyStroke,
) -> TextAreaKeyOutcome {
    if bindings.forward_traversal.contains(&stroke) {
        return TextAreaKeyOutcome::FocusNext;
    }
    if bindings.backward_traversal.contains(&stroke) {
        return TextAreaKeyOutcome::FocusPrevious;
    }
    bindings
        .actions
        .get(&stroke)
        .copied()
        .map_or(TextAreaKeyOutcome::Unhandled, TextAreaKeyOutcome::Action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(modifiers: KeyModifiers) -> KeyStroke {
        KeyStroke::new(Key::Tab, modifiers)
    }

    #[test]
    fn inverted_bindings_traverse_with_plain_tab() {
        let mut bindings = TextAreaKeyBindings::default();
        assert!(invert_text_area_traversal(&mut bindings));

        assert_eq!(
            resolve_text_area_key(&bindings, tab(KeyModifiers::NONE)),
            TextAreaKeyOutcome::FocusNext
        );
        assert_eq!(
            resolve_text_area_key(&bindings, tab(KeyModifiers::SHIFT)),
            TextAreaKeyOutcome::FocusPrevious
        );
        assert_eq!(
            resolve_text_area_key(&bindings, tab(KeyModifiers::CTRL)),
            TextAreaKeyOutcome::Action(TextAreaAction::InsertTab)
        );
        assert_eq!(
            resolve_text_area_key(&bindings, KeyStroke::new(Key::Enter, KeyModifiers::NONE)),
            TextAreaKeyOutcome::Unhandled
        );
    }

    #[test]
    fn default_bindings_keep_tab_as_input() {
        let bindings = TextAreaKeyBindings::default();
        assert_eq!(
            resolve_text_area_key(&bindings, tab(KeyModifiers::NONE)),
            TextAreaKeyOutcome::Unhandled
        );
        assert_eq!(
            resolve_text_area_key(&bindings, tab(KeyModifiers::CTRL)),
            TextAreaKeyOutcome::FocusNext
        );
    }

    #[test]
    fn inverting_twice_is_a_no_op() {
        let mut bindings = TextAreaKeyBindings::default();
        assert!(invert_text_area_traversal(&mut bindings));
        let once = bindings.clone();
        assert!(!invert_text_area_traversal(&mut bindings));
        assert_eq!(bindings, once);
    }

    #[test]
    fn customized_bindings_are_left_alone() {
        let mut multiple = TextAreaKeyBindings::default();
        multiple
            .forward_traversal
            .push(KeyStroke::new(Key::Character('n'), KeyModifiers::CTRL));
        let before = multiple.clone();
        assert!(!invert_text_area_traversal(&mut multiple));
        assert_eq!(multiple, before);

        let mut alt_forward = TextAreaKeyBindings {
            forward_traversal: vec![tab(KeyModifiers::new(true, false, true))],
            ..TextAreaKeyBindings::default()
        };
        assert!(!invert_text_area_traversal(&mut alt_forward));

        let mut empty_backward = TextAreaKeyBindings {
            backward_traversal: Vec::new(),
            ..TextAreaKeyBindings::default()
        };
        assert!(!invert_text_area_traversal(&mut empty_backward));
    }
}
