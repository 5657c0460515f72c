//! The single synchronous owner of a solving session.
//!
//! Holds the immutable ciphertext and everything derived from it once at
//! construction (lowercased characters, occurrence positions, tokens, the
//! cipher-side frequency table), plus the mutable key store. Every committed
//! mutation recomputes the decrypted text and the suggestion ranking before
//! returning, so readers never see stale caches.

use std::collections::BTreeSet;

use crate::analysis::english;
use crate::analysis::frequency::FrequencyTable;
use crate::dictionary::WordDictionary;
use crate::engine::suggest::{self, ScoringContext, Suggestion};
use crate::key::{ApplyOutcome, KeyStore, Proposal, SubstitutionKey};
use crate::letter_index;
use crate::text::{Token, decrypt, tokenize};

/// One row of the rank-aligned frequency comparison: the i-th most frequent
/// cipher letter (as currently mapped) next to the i-th letter of standard
/// English.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComparisonRow {
    pub cipher: char,
    /// Current plain mapping of `cipher`.
    pub mapped_plain: char,
    pub cipher_freq: f64,
    pub standard_letter: char,
    pub standard_freq: f64,
}

pub struct Session {
    ciphertext: String,
    /// Lowercased ciphertext characters.
    chars: Vec<char>,
    /// Occurrence positions per cipher letter, indexed into `chars`.
    positions: [Vec<usize>; 26],
    tokens: Vec<Token>,
    cipher_freq: FrequencyTable,
    dictionary: WordDictionary,
    suggestion_count: usize,
    store: KeyStore,
    decrypted: String,
    decrypted_freq: FrequencyTable,
    suggestions: Vec<Suggestion>,
}

impl Session {
    pub fn new(ciphertext: impl Into<String>, dictionary: WordDictionary) -> Self {
        Self::with_suggestion_count(ciphertext, dictionary, suggest::DEFAULT_SUGGESTION_COUNT)
    }

    pub fn with_suggestion_count(
        ciphertext: impl Into<String>,
        dictionary: WordDictionary,
        suggestion_count: usize,
    ) -> Self {
        let ciphertext = ciphertext.into();
        let lowered = ciphertext.to_lowercase();
        let chars: Vec<char> = lowered.chars().collect();

        let mut positions: [Vec<usize>; 26] = Default::default();
        for (i, &ch) in chars.iter().enumerate() {
            if ch.is_ascii_lowercase() {
                positions[letter_index(ch)].push(i);
            }
        }

        let mut session = Self {
            tokens: tokenize(&lowered),
            cipher_freq: FrequencyTable::compute(&ciphertext),
            decrypted: ciphertext.clone(),
            decrypted_freq: FrequencyTable::compute(&ciphertext),
            ciphertext,
            chars,
            positions,
            dictionary,
            suggestion_count,
            store: KeyStore::new(),
            suggestions: Vec::new(),
        };
        session.recompute_suggestions();
        session
    }

    // -- mutations ----------------------------------------------------------

    /// Apply a batch of mapping changes. A committed change refreshes the
    /// decrypted text and the suggestions; a no-change call that still
    /// surfaced conflicts refreshes suggestions only, since the conflict
    /// view may be new to the caller.
    pub fn apply(&mut self, proposal: &Proposal) -> ApplyOutcome {
        let outcome = self.store.apply(proposal);
        if outcome.committed {
            self.recompute_after_mutation();
        } else if !outcome.conflicts.is_empty() {
            self.recompute_suggestions();
        }
        outcome
    }

    /// Replace the key with an already-validated full mapping.
    pub fn load_key(&mut self, key: SubstitutionKey) {
        self.store.load(key);
        self.recompute_after_mutation();
    }

    pub fn undo(&mut self) -> bool {
        if !self.store.undo() {
            return false;
        }
        self.recompute_after_mutation();
        true
    }

    // -- readers ------------------------------------------------------------

    pub fn ciphertext(&self) -> &str {
        &self.ciphertext
    }

    pub fn decrypted(&self) -> &str {
        &self.decrypted
    }

    pub fn key(&self) -> &SubstitutionKey {
        self.store.key()
    }

    pub fn confirmed(&self) -> &BTreeSet<char> {
        self.store.confirmed()
    }

    pub fn last_changed(&self) -> &BTreeSet<char> {
        self.store.last_changed()
    }

    pub fn can_undo(&self) -> bool {
        self.store.can_undo()
    }

    pub fn confirmed_owner_of(&self, plain: char) -> Option<char> {
        self.store.confirmed_owner_of(plain)
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn cipher_frequencies(&self) -> &FrequencyTable {
        &self.cipher_freq
    }

    /// Frequency table of the current decrypted text, refreshed after every
    /// committed mutation.
    pub fn decrypted_frequencies(&self) -> &FrequencyTable {
        &self.decrypted_freq
    }

    /// 26 rank-aligned rows comparing the ciphertext's frequency ranking to
    /// standard English.
    pub fn frequency_comparison(&self) -> Vec<ComparisonRow> {
        self.cipher_freq
            .ranked()
            .iter()
            .enumerate()
            .map(|(rank, &(cipher, cipher_freq))| {
                let (standard_letter, standard_freq) = english::ranked(rank);
                ComparisonRow {
                    cipher,
                    mapped_plain: self.store.key().get(cipher),
                    cipher_freq,
                    standard_letter,
                    standard_freq,
                }
            })
            .collect()
    }

    // -- recomputation ------------------------------------------------------

    fn recompute_after_mutation(&mut self) {
        self.decrypted = decrypt(&self.ciphertext, self.store.key());
        self.decrypted_freq = FrequencyTable::compute(&self.decrypted);
        self.recompute_suggestions();
    }

    fn recompute_suggestions(&mut self) {
        let ctx = ScoringContext {
            key: self.store.key(),
            confirmed: self.store.confirmed(),
            chars: &self.chars,
            positions: &self.positions,
            tokens: &self.tokens,
            cipher_freq: &self.cipher_freq,
            dictionary: &self.dictionary,
        };
        self.suggestions = suggest::suggest(&ctx, self.suggestion_count);
    }
}
