//! Key-table interchange format.
//!
//! A key travels as a JSON object whose keys are exactly the 26 lowercase
//! letters and whose values are each a single ASCII letter (uppercase is
//! accepted and lowercased; a value equal to its key denotes explicit
//! identity). Validation happens here in full, before any key state mutates.

use std::collections::BTreeMap;

use crate::error::KeyImportError;
use crate::key::SubstitutionKey;

/// Parse and validate a serialized key table.
pub fn parse_key_table(json: &str) -> Result<SubstitutionKey, KeyImportError> {
    let raw: BTreeMap<String, String> = serde_json::from_str(json)?;

    let missing: Vec<char> = crate::alphabet()
        .filter(|ch| !raw.contains_key(&ch.to_string()))
        .collect();
    if !missing.is_empty() {
        return Err(KeyImportError::MissingLetters(missing));
    }

    let extra: Vec<String> = raw
        .keys()
        .filter(|k| !(k.len() == 1 && k.chars().all(|c| c.is_ascii_lowercase())))
        .cloned()
        .collect();
    if !extra.is_empty() {
        return Err(KeyImportError::ExtraKeys(extra));
    }

    let mut key = SubstitutionKey::identity();
    for (cipher, value) in &raw {
        let cipher = cipher.chars().next().unwrap();
        let mut chars = value.chars();
        let plain = match (chars.next(), chars.next()) {
            (Some(p), None) if p.is_ascii_alphabetic() => p.to_ascii_lowercase(),
            _ => {
                return Err(KeyImportError::InvalidValue {
                    letter: cipher,
                    value: value.clone(),
                });
            }
        };
        key.set(cipher, plain);
    }

    Ok(key)
}

/// Serialize a key to the interchange format (pretty JSON, keys in
/// alphabetical order).
pub fn to_key_table(key: &SubstitutionKey) -> String {
    let map: BTreeMap<String, String> = key
        .iter()
        .map(|(c, p)| (c.to_string(), p.to_string()))
        .collect();
    // A BTreeMap of single-letter strings cannot fail to serialize
    serde_json::to_string_pretty(&map).expect("key table serialization")
}
