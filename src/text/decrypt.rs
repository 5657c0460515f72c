use crate::key::SubstitutionKey;

/// Map ciphertext through a key, preserving case and non-letters.
///
/// Each ASCII letter is lowercased, mapped, and restored to its original
/// case; every other character passes through unchanged at the same position.
pub fn decrypt(ciphertext: &str, key: &SubstitutionKey) -> String {
    ciphertext
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphabetic() {
                let plain = key.get(ch.to_ascii_lowercase());
                if ch.is_ascii_uppercase() {
                    plain.to_ascii_uppercase()
                } else {
                    plain
                }
            } else {
                ch
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_key_is_a_noop() {
        let text = "Attack at Dawn! (signed: X)";
        assert_eq!(decrypt(text, &SubstitutionKey::identity()), text);
    }

    #[test]
    fn preserves_case_and_punctuation() {
        let mut key = SubstitutionKey::identity();
        key.set('a', 'z');
        key.set('b', 'y');
        assert_eq!(decrypt("Ab, ba!", &key), "Zy, yz!");
    }

    #[test]
    fn non_ascii_passes_through() {
        let mut key = SubstitutionKey::identity();
        key.set('e', 'x');
        assert_eq!(decrypt("é e €", &key), "é x €");
    }
}
