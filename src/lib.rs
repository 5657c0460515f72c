pub mod analysis;
pub mod config;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod key;
pub mod session;
pub mod text;

/// Iterate the cipher alphabet in the fixed alphabetical order used for every
/// scan and tie-break in this crate. Hash-order iteration is never used where
/// it could leak into output.
pub fn alphabet() -> impl Iterator<Item = char> {
    'a'..='z'
}

/// Index of a lowercase ASCII letter into 26-entry tables.
pub(crate) fn letter_index(ch: char) -> usize {
    debug_assert!(ch.is_ascii_lowercase());
    (ch as u8 - b'a') as usize
}
