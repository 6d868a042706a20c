mod traversal;

pub use traversal::{
    invert_text_area_traversal, resolve_text_area_key, Key, KeyModifiers, KeyStroke,
    TextAreaAction, TextAreaKeyBindings, TextAreaKeyOutcome,
};
