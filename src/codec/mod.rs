//! Scrambling used for passwords stored by the CVS pserver protocol
//! (`~/.cvspass`). Not encryption: the table is its own inverse.

use thiserror::Error;

const ENCODED_PREFIX: char = 'A';

#[rustfmt::skip]
const SCRAMBLE_TABLE: [u8; 127] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    114, 120, 53, 79, 0, 109, 72, 108, 70, 64, 76, 67, 116, 74, 68, 87,
    111, 52, 75, 119, 49, 34, 82, 81, 95, 65, 112, 86, 118, 110, 122, 105,
    41, 57, 83, 43, 46, 102, 40, 89, 38, 103, 45, 50, 42, 123, 91, 35,
    125, 55, 54, 66, 124, 126, 59, 47, 92, 71, 115, 78, 88, 107, 106, 56,
    0, 121, 117, 104, 101, 100, 69, 73, 99, 63, 94, 93, 39, 37, 61, 48,
    58, 113, 32, 90, 44, 98, 60, 51, 33, 97, 62, 77, 84, 80, 85,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("illegal character {character:?} at position {position}")]
    IllegalCharacter { character: char, position: usize },
}

pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// Scrambles a clear-text password into its `A`-prefixed stored form.
pub fn encode(clear_text: &str) -> CodecResult<String> {
    let mut encoded = String::with_capacity(clear_text.len() + 1);
    encoded.push(ENCODED_PREFIX);
    encoded.push_str(&scramble(clear_text)?);
    Ok(encoded)
}

/// Recovers a clear-text password. A leading `A` is stripped when present.
/// Empty input yields `Ok(None)`.
pub fn decode(encoded: &str) -> CodecResult<Option<String>> {
    if encoded.is_empty() {
        return Ok(None);
    }
    let body = encoded.strip_prefix(ENCODED_PREFIX).unwrap_or(encoded);
    scramble(body).map(Some)
}

fn scramble(text: &str) -> CodecResult<String> {
    text.chars()
        .enumerate()
        .map(|(position, character)| {
            scramble_char(character).ok_or(CodecError::IllegalCharacter {
                character,
                position,
            })
        })
        .collect()
}

fn scramble_char(character: char) -> Option<char> {
    if character == '`' || character == '$' || u32::from(character) < 32 {
        return None;
    }
    let index = usize::try_from(u32::from(character)).ok()?;
    match SCRAMBLE_TABLE.get(index).copied() {
        Some(0) | None => None,
        Some(mapped) => Some(char::from(mapped)),
    }
}
