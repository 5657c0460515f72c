//! Standard English letter, digram, and trigram statistics.
//!
//! These are fixed reference tables, not something computed at runtime. The
//! digram table only carries the common digrams; everything else falls back
//! to [`DEFAULT_LOG_PROB`], the same floor used wherever a zero probability
//! would otherwise hit `ln()`.

use crate::letter_index;

/// Floor log-probability substituted for any zero or unlisted probability.
pub const DEFAULT_LOG_PROB: f64 = -15.0;

/// Relative frequency of each letter a-z in standard English text.
const LETTER_FREQUENCIES: [f64; 26] = [
    0.0817, // a
    0.0129, // b
    0.0278, // c
    0.0425, // d
    0.1270, // e
    0.0223, // f
    0.0202, // g
    0.0609, // h
    0.0697, // i
    0.0015, // j
    0.0077, // k
    0.0403, // l
    0.0241, // m
    0.0675, // n
    0.0751, // o
    0.0193, // p
    0.0010, // q
    0.0599, // r
    0.0633, // s
    0.0906, // t
    0.0276, // u
    0.0098, // v
    0.0236, // w
    0.0015, // x
    0.0197, // y
    0.0007, // z
];

/// English letters ranked by descending frequency.
const RANKED_LETTERS: [char; 26] = [
    'e', 't', 'a', 'o', 'i', 'n', 's', 'h', 'r', 'd', 'l', 'c', 'u', 'm', 'w',
    'f', 'g', 'y', 'p', 'b', 'v', 'k', 'j', 'x', 'q', 'z',
];

const COMMON_TRIGRAMS: [&str; 30] = [
    "the", "and", "ing", "her", "ere", "ent", "tha", "nth", "was", "eth",
    "for", "dth", "hat", "she", "ion", "tio", "ter", "est", "ers", "ati",
    "his", "oft", "sth", "ith", "ver", "all", "ess", "not", "are", "but",
];

/// Standard frequency of a plaintext letter, as a probability.
pub fn frequency(ch: char) -> f64 {
    LETTER_FREQUENCIES[letter_index(ch)]
}

/// The letter holding the given rank (0 = most frequent) in standard English,
/// paired with its frequency.
pub fn ranked(rank: usize) -> (char, f64) {
    let ch = RANKED_LETTERS[rank];
    (ch, frequency(ch))
}

/// Log-probability of a two-letter sequence in standard English. Digrams
/// outside the common table get the floor value.
pub fn digram_log_prob(a: char, b: char) -> f64 {
    match (a, b) {
        ('t', 'h') => -2.78,
        ('h', 'e') => -2.93,
        ('i', 'n') => -3.27,
        ('e', 'r') => -3.36,
        ('a', 'n') => -3.44,
        ('r', 'e') => -3.58,
        ('e', 's') => -3.66,
        ('o', 'n') => -3.71,
        ('s', 't') => -3.79,
        ('n', 't') => -3.83,
        ('e', 'n') => -3.92,
        ('a', 't') => -3.93,
        ('e', 'd') => -4.00,
        ('n', 'd') => -4.01,
        ('t', 'o') => -4.05,
        ('o', 'r') => -4.11,
        ('e', 'a') => -4.18,
        ('t', 'i') => -4.28,
        ('a', 'r') => -4.32,
        ('t', 'e') => -4.35,
        ('i', 's') => -4.50,
        ('o', 'u') => -4.58,
        ('i', 't') => -4.70,
        ('h', 'a') => -4.72,
        ('n', 'g') => -4.77,
        ('a', 's') => -4.80,
        ('e', 't') => -4.95,
        ('s', 'e') => -5.00,
        ('l', 'e') => -5.10,
        ('o', 'f') => -5.12,
        _ => DEFAULT_LOG_PROB,
    }
}

/// Whether a three-letter sequence belongs to the fixed common-trigram set.
pub fn is_common_trigram(a: char, b: char, c: char) -> bool {
    let trigram = [a, b, c];
    COMMON_TRIGRAMS
        .iter()
        .any(|t| t.chars().eq(trigram.iter().copied()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequencies_sum_to_one() {
        let sum: f64 = ('a'..='z').map(frequency).sum();
        assert!((sum - 1.0).abs() < 1e-9, "sum was {sum}");
    }

    #[test]
    fn ranking_is_descending_and_complete() {
        let mut seen = std::collections::BTreeSet::new();
        for rank in 0..25 {
            let (ch, freq) = ranked(rank);
            let (_, next_freq) = ranked(rank + 1);
            assert!(freq >= next_freq, "rank {rank} out of order");
            seen.insert(ch);
        }
        seen.insert(ranked(25).0);
        assert_eq!(seen.len(), 26);
    }

    #[test]
    fn e_is_most_frequent() {
        assert_eq!(ranked(0), ('e', 0.1270));
    }

    #[test]
    fn digram_lookup_falls_back_to_floor() {
        assert_eq!(digram_log_prob('t', 'h'), -2.78);
        assert_eq!(digram_log_prob('q', 'z'), DEFAULT_LOG_PROB);
    }

    #[test]
    fn trigram_membership() {
        assert!(is_common_trigram('t', 'h', 'e'));
        assert!(!is_common_trigram('z', 'z', 'z'));
    }
}
