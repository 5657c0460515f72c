use std::path::PathBuf;

use thiserror::Error;

/// Rejection of a key table in the interchange format. Validation is all-or-
/// nothing: on any of these, no key state has been touched.
#[derive(Debug, Error)]
pub enum KeyImportError {
    #[error("key table is not a JSON object of letter-to-letter mappings: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("key table is missing cipher letters: {}", letters(.0))]
    MissingLetters(Vec<char>),

    #[error("key table has unexpected keys: {}", .0.join(", "))]
    ExtraKeys(Vec<String>),

    #[error("key table value for '{letter}' is not a single letter: {value:?}")]
    InvalidValue { letter: char, value: String },
}

fn letters(set: &[char]) -> String {
    set.iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A word list that could not be loaded. Non-fatal: the affected length's
/// lexical scoring term is disabled, everything else keeps working.
#[derive(Debug, Error)]
#[error("word list for length {length} unavailable ({path}): {source}")]
pub struct DictionaryError {
    pub length: usize,
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}
