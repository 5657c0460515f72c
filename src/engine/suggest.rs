//! Swap-suggestion scoring.
//!
//! Each candidate (cipher letter C, plain letter P) gets a composite score:
//! a frequency-fit term, a context term over confirmed neighbors, a lexical
//! term over short tokens, and a one-off bonus steering the canonical first
//! move (most frequent cipher letter → 'e'). Scoring is a pure function of
//! the inputs; nothing here mutates state.

use std::collections::BTreeSet;

use crate::analysis::english::{self, DEFAULT_LOG_PROB};
use crate::analysis::frequency::FrequencyTable;
use crate::dictionary::WordDictionary;
use crate::key::SubstitutionKey;
use crate::letter_index;
use crate::text::Token;

const CIPHER_FREQ_WEIGHT: f64 = 4.0;
const FREQ_DELTA_WEIGHT: f64 = 2.0;
const FREQ_DELTA_FLOOR: f64 = 0.01;
const DIGRAM_BONUS: f64 = 0.5;
const DIGRAM_THRESHOLD: f64 = -7.0;
const TRIGRAM_BONUS: f64 = 0.8;
const INVALID_WORD_PENALTY: f64 = -10.0;
const VALID_WORD_REWARD_BASE: f64 = 5.0;
const STANDALONE_AI_REWARD: f64 = 6.0;
const STANDALONE_OTHER_PENALTY: f64 = -9.0;
const APOSTROPHE_REWARD: f64 = 6.0;
const APOSTROPHE_LETTERS: [char; 7] = ['t', 's', 'd', 'l', 'm', 'v', 'r'];
const INITIAL_E_BONUS: f64 = 100.0;

/// Below this many ciphertext letters the statistics are too thin to rank
/// anything; suggestion output is unconditionally empty.
const MIN_SAMPLE_LETTERS: usize = 10;

/// Default number of suggestions surfaced to the caller.
pub const DEFAULT_SUGGESTION_COUNT: usize = 5;

/// A ranked candidate swap. The score is an unnormalized real number and is
/// frequently negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Suggestion {
    pub cipher: char,
    pub plain: char,
    pub score: f64,
}

/// Everything a suggestion computation reads, held fixed for its duration.
pub struct ScoringContext<'a> {
    pub key: &'a SubstitutionKey,
    pub confirmed: &'a BTreeSet<char>,
    /// Lowercased ciphertext characters.
    pub chars: &'a [char],
    /// Occurrence positions (indices into `chars`) per cipher letter.
    pub positions: &'a [Vec<usize>; 26],
    pub tokens: &'a [Token],
    pub cipher_freq: &'a FrequencyTable,
    pub dictionary: &'a WordDictionary,
}

/// Rank all eligible swaps, best first, truncated to `limit`.
///
/// Ties break alphabetically on cipher letter, then plain letter, so equal
/// scores always come out in the same order.
pub fn suggest(ctx: &ScoringContext, limit: usize) -> Vec<Suggestion> {
    if ctx.cipher_freq.total_letters() < MIN_SAMPLE_LETTERS {
        return Vec::new();
    }

    let initial_phase = initial_phase_for_e(ctx);
    let most_frequent = ctx.cipher_freq.most_frequent();

    let mut candidates = Vec::new();
    for cipher in crate::alphabet() {
        if ctx.confirmed.contains(&cipher) {
            continue;
        }
        // Letters absent from the ciphertext have nothing to score
        if ctx.positions[letter_index(cipher)].is_empty() {
            continue;
        }
        for plain in crate::alphabet() {
            if plain == cipher {
                continue;
            }
            // Skip plain letters already claimed by another non-identity
            // mapping. This also covers confirmed owners, since confirmed is
            // the derived non-identity set.
            if ctx.key.plain_claimed_by_other(plain, cipher) {
                continue;
            }

            let mut score = score_swap(ctx, cipher, plain);
            if initial_phase && most_frequent == Some(cipher) && plain == 'e' {
                score += INITIAL_E_BONUS;
            }
            candidates.push(Suggestion {
                cipher,
                plain,
                score,
            });
        }
    }

    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cipher.cmp(&b.cipher))
            .then(a.plain.cmp(&b.plain))
    });
    candidates.truncate(limit);
    candidates
}

/// The canonical-first-move window: active until some confirmed mapping
/// assigns 'e'. While active, only (most frequent cipher letter, 'e') gets
/// the bonus.
fn initial_phase_for_e(ctx: &ScoringContext) -> bool {
    let Some(top) = ctx.cipher_freq.most_frequent() else {
        return false;
    };
    if ctx.confirmed.is_empty() {
        return true;
    }
    ctx.key.get(top) != 'e'
        && !ctx
            .key
            .iter()
            .any(|(c, p)| p == 'e' && c != top && ctx.confirmed.contains(&c))
}

/// Composite score for mapping `cipher` to `plain`, without the
/// initial-phase bonus.
pub fn score_swap(ctx: &ScoringContext, cipher: char, plain: char) -> f64 {
    frequency_fit(ctx, cipher, plain)
        + context_term(ctx, cipher, plain)
        + lexical_term(ctx, cipher, plain)
        + apostrophe_term(ctx, cipher, plain)
}

fn frequency_fit(ctx: &ScoringContext, cipher: char, plain: char) -> f64 {
    let cipher_freq = ctx.cipher_freq.probability(cipher);
    let delta = (cipher_freq - english::frequency(plain)).abs().max(FREQ_DELTA_FLOOR);
    let log_cipher_freq = if cipher_freq > 0.0 {
        cipher_freq.ln()
    } else {
        DEFAULT_LOG_PROB
    };
    CIPHER_FREQ_WEIGHT * log_cipher_freq - FREQ_DELTA_WEIGHT * delta.ln()
}

/// Digram/trigram bonuses from confirmed neighbors of each occurrence of the
/// cipher letter.
fn context_term(ctx: &ScoringContext, cipher: char, plain: char) -> f64 {
    let mut bonus = 0.0;
    for &i in &ctx.positions[letter_index(cipher)] {
        let left = confirmed_neighbor(ctx, i.checked_sub(1));
        let right = confirmed_neighbor(ctx, i.checked_add(1).filter(|&j| j < ctx.chars.len()));

        if let Some(prev_plain) = left {
            if english::digram_log_prob(prev_plain, plain) > DIGRAM_THRESHOLD {
                bonus += DIGRAM_BONUS;
            }
        }
        if let Some(next_plain) = right {
            if english::digram_log_prob(plain, next_plain) > DIGRAM_THRESHOLD {
                bonus += DIGRAM_BONUS;
            }
        }
        if let (Some(prev_plain), Some(next_plain)) = (left, right) {
            if english::is_common_trigram(prev_plain, plain, next_plain) {
                bonus += TRIGRAM_BONUS;
            }
        }
    }
    bonus
}

/// The confirmed plain letter at a neighbor position, if that neighbor is a
/// letter with a confirmed mapping.
fn confirmed_neighbor(ctx: &ScoringContext, index: Option<usize>) -> Option<char> {
    let ch = *ctx.chars.get(index?)?;
    if ch.is_ascii_lowercase() && ctx.confirmed.contains(&ch) {
        Some(ctx.key.get(ch))
    } else {
        None
    }
}

/// Word-level evidence: standalone single letters, invalid-word penalties,
/// and a reward for resolving several distinct dictionary words at once.
fn lexical_term(ctx: &ScoringContext, cipher: char, plain: char) -> f64 {
    let mut hypothetical = *ctx.key;
    hypothetical.set(cipher, plain);

    let mut term = 0.0;
    let mut resolved_words: BTreeSet<String> = BTreeSet::new();

    for (idx, token) in ctx.tokens.iter().enumerate() {
        if !token.alphabetic || !token.text.contains(cipher) {
            continue;
        }
        match token.text.len() {
            1 => {
                if is_standalone(ctx.tokens, idx) {
                    term += if plain == 'a' || plain == 'i' {
                        STANDALONE_AI_REWARD
                    } else {
                        STANDALONE_OTHER_PENALTY
                    };
                }
            }
            len @ 2..=4 => {
                let Some(words) = ctx.dictionary.words(len) else {
                    continue;
                };
                let resolved: String =
                    token.text.chars().map(|c| hypothetical.get(c)).collect();
                if words.contains(&resolved) {
                    // Count the word toward the reward only when the whole
                    // token is determined by this swap plus confirmed letters
                    let fully_determined = token
                        .text
                        .chars()
                        .all(|c| c == cipher || ctx.confirmed.contains(&c));
                    if fully_determined {
                        resolved_words.insert(resolved);
                    }
                } else {
                    let others_confirmed = token
                        .text
                        .chars()
                        .filter(|&c| c != cipher)
                        .all(|c| ctx.confirmed.contains(&c));
                    if others_confirmed {
                        term += INVALID_WORD_PENALTY;
                    }
                }
            }
            _ => {}
        }
    }

    // One valid word is weak evidence; reward only multiple distinct words
    if resolved_words.len() >= 2 {
        term += resolved_words.len() as f64 * VALID_WORD_REWARD_BASE;
    }
    term
}

/// A single-letter token not adjacent to another alphabetic token. Tokens
/// alternate alphabetic/non-alphabetic, so this mainly guards the token
/// sequence's edges staying well-formed.
fn is_standalone(tokens: &[Token], idx: usize) -> bool {
    let prev_alpha = idx > 0
        && tokens[idx - 1]
            .text
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic());
    let next_alpha = tokens
        .get(idx + 1)
        .and_then(|t| t.text.chars().next())
        .is_some_and(|c| c.is_ascii_alphabetic());
    !prev_alpha && !next_alpha
}

/// Contraction endings: an occurrence right after an apostrophe and not
/// followed by another letter suggests P ∈ {t, s, d, l, m, v, r} ("don't",
/// "it's", "i'll", ...).
fn apostrophe_term(ctx: &ScoringContext, cipher: char, plain: char) -> f64 {
    if !APOSTROPHE_LETTERS.contains(&plain) {
        return 0.0;
    }
    let mut bonus = 0.0;
    for &i in &ctx.positions[letter_index(cipher)] {
        let after_apostrophe = i > 0 && ctx.chars[i - 1] == '\'';
        let followed_by_letter = ctx
            .chars
            .get(i + 1)
            .is_some_and(|c| c.is_ascii_alphabetic());
        if after_apostrophe && !followed_by_letter {
            bonus += APOSTROPHE_REWARD;
        }
    }
    bonus
}
