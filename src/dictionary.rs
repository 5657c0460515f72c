use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::DictionaryError;

const WORDS_2: &str = include_str!("../assets/words-2.txt");
const WORDS_3: &str = include_str!("../assets/words-3.txt");
const WORDS_4: &str = include_str!("../assets/words-4.txt");

/// Word lengths the lexical scoring term knows about.
pub const SUPPORTED_LENGTHS: [usize; 3] = [2, 3, 4];

/// Read-only sets of valid English words of length 2, 3, and 4.
///
/// A length can be absent; its lexical scoring term is then disabled while
/// the others keep working. Absence is a configuration fact, not an error to
/// handle per lookup.
#[derive(Clone, Debug, Default)]
pub struct WordDictionary {
    sets: [Option<HashSet<String>>; 3],
}

impl WordDictionary {
    /// A dictionary with every length disabled.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The bundled word lists.
    pub fn builtin() -> Self {
        let mut dict = Self::empty();
        dict.insert_list(2, WORDS_2);
        dict.insert_list(3, WORDS_3);
        dict.insert_list(4, WORDS_4);
        dict
    }

    /// Replace one length's set with words parsed from a newline-delimited
    /// file. Entries of the wrong length or with non-letters are skipped.
    pub fn load_file(&mut self, length: usize, path: &Path) -> Result<usize, DictionaryError> {
        let content = fs::read_to_string(path).map_err(|source| DictionaryError {
            length,
            path: path.to_path_buf(),
            source,
        })?;
        self.insert_list(length, &content);
        Ok(self.words(length).map(|s| s.len()).unwrap_or(0))
    }

    /// Replace one length's set with an explicit word collection. Intended
    /// for tests and callers that build sets themselves.
    pub fn insert_words(&mut self, length: usize, words: HashSet<String>) {
        if let Some(slot) = slot(length) {
            self.sets[slot] = Some(words);
        }
    }

    /// The word set for a length, or `None` when that length is disabled.
    pub fn words(&self, length: usize) -> Option<&HashSet<String>> {
        slot(length).and_then(|i| self.sets[i].as_ref())
    }

    fn insert_list(&mut self, length: usize, content: &str) {
        let words: HashSet<String> = content
            .lines()
            .map(|line| line.trim().to_ascii_lowercase())
            .filter(|w| w.len() == length && w.chars().all(|c| c.is_ascii_lowercase()))
            .collect();
        self.insert_words(length, words);
    }
}

fn slot(length: usize) -> Option<usize> {
    match length {
        2 => Some(0),
        3 => Some(1),
        4 => Some(2),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_lists_have_the_obvious_words() {
        let dict = WordDictionary::builtin();
        assert!(dict.words(2).unwrap().contains("of"));
        assert!(dict.words(3).unwrap().contains("the"));
        assert!(dict.words(4).unwrap().contains("that"));
    }

    #[test]
    fn builtin_lists_contain_only_exact_length_words() {
        let dict = WordDictionary::builtin();
        for length in SUPPORTED_LENGTHS {
            let set = dict.words(length).unwrap();
            assert!(!set.is_empty());
            assert!(set.iter().all(|w| w.len() == length));
        }
    }

    #[test]
    fn empty_dictionary_disables_every_length() {
        let dict = WordDictionary::empty();
        for length in SUPPORTED_LENGTHS {
            assert!(dict.words(length).is_none());
        }
    }

    #[test]
    fn load_file_filters_wrong_length_and_non_alpha() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "the\ncat\nhouse\nc4t\nAND\n  dog  ").unwrap();

        let mut dict = WordDictionary::empty();
        let count = dict.load_file(3, file.path()).unwrap();
        assert_eq!(count, 4);
        let set = dict.words(3).unwrap();
        assert!(set.contains("the"));
        assert!(set.contains("and"));
        assert!(set.contains("dog"));
        assert!(!set.contains("house"));
        assert!(!set.contains("c4t"));
    }

    #[test]
    fn missing_file_reports_length_and_path() {
        let mut dict = WordDictionary::empty();
        let err = dict
            .load_file(2, Path::new("/nonexistent/words.txt"))
            .unwrap_err();
        assert_eq!(err.length, 2);
        // The other lengths are unaffected
        assert!(dict.words(2).is_none());
    }
}
