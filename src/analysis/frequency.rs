use crate::letter_index;

/// Per-letter frequency analysis of a piece of text.
///
/// Counts ASCII letters case-insensitively and ignores everything else. The
/// ranking always holds all 26 letters, sorted by probability descending with
/// an alphabetical tie-break so that output is reproducible regardless of
/// input order.
#[derive(Clone, Debug)]
pub struct FrequencyTable {
    counts: [u32; 26],
    probabilities: [f64; 26],
    ranked: Vec<(char, f64)>,
    total_letters: usize,
}

impl FrequencyTable {
    pub fn compute(text: &str) -> Self {
        let mut counts = [0u32; 26];
        let mut total_letters = 0usize;
        for ch in text.chars() {
            if ch.is_ascii_alphabetic() {
                counts[letter_index(ch.to_ascii_lowercase())] += 1;
                total_letters += 1;
            }
        }

        let mut probabilities = [0.0f64; 26];
        if total_letters > 0 {
            for (prob, &count) in probabilities.iter_mut().zip(counts.iter()) {
                *prob = count as f64 / total_letters as f64;
            }
        }

        let mut ranked: Vec<(char, f64)> = ('a'..='z')
            .map(|ch| (ch, probabilities[letter_index(ch)]))
            .collect();
        // Descending by probability; the secondary alphabetical key makes
        // ties deterministic.
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });

        Self {
            counts,
            probabilities,
            ranked,
            total_letters,
        }
    }

    pub fn probability(&self, ch: char) -> f64 {
        self.probabilities[letter_index(ch)]
    }

    pub fn count(&self, ch: char) -> u32 {
        self.counts[letter_index(ch)]
    }

    pub fn total_letters(&self) -> usize {
        self.total_letters
    }

    /// All 26 letters with their probabilities, most frequent first.
    pub fn ranked(&self) -> &[(char, f64)] {
        &self.ranked
    }

    /// The most frequent letter, or `None` when the text had no letters.
    pub fn most_frequent(&self) -> Option<char> {
        if self.total_letters == 0 {
            None
        } else {
            Some(self.ranked[0].0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probabilities_sum_to_one() {
        let table = FrequencyTable::compute("The quick brown fox; 42 jumps!");
        let sum: f64 = ('a'..='z').map(|ch| table.probability(ch)).sum();
        assert!((sum - 1.0).abs() < 1e-9, "sum was {sum}");
    }

    #[test]
    fn empty_text_is_all_zero() {
        let table = FrequencyTable::compute("12345 ... !?");
        for ch in 'a'..='z' {
            assert_eq!(table.probability(ch), 0.0);
        }
        assert_eq!(table.total_letters(), 0);
        assert_eq!(table.most_frequent(), None);
    }

    #[test]
    fn counting_is_case_insensitive() {
        let table = FrequencyTable::compute("AaA bB");
        assert_eq!(table.count('a'), 3);
        assert_eq!(table.count('b'), 2);
        assert_eq!(table.total_letters(), 5);
    }

    #[test]
    fn ties_rank_alphabetically() {
        // z, d, and u each occur three times
        let table = FrequencyTable::compute("zdu zdu zdu");
        assert_eq!(table.most_frequent(), Some('d'));
        let top: Vec<char> = table.ranked().iter().take(3).map(|&(ch, _)| ch).collect();
        assert_eq!(top, vec!['d', 'u', 'z']);
    }

    #[test]
    fn ranking_always_has_26_entries() {
        let table = FrequencyTable::compute("a");
        assert_eq!(table.ranked().len(), 26);
        assert_eq!(table.ranked()[0], ('a', 1.0));
    }
}
