use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::letter_index;

// ---------------------------------------------------------------------------
// SubstitutionKey
// ---------------------------------------------------------------------------

/// A total cipher-letter → plain-letter mapping.
///
/// Every one of the 26 letters always maps to exactly one letter; there is no
/// partial state. A letter mapping to itself doubles as "unset" and as a
/// literal identity hypothesis; the model cannot tell these apart, and no
/// third state is introduced to resolve it.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SubstitutionKey {
    map: [char; 26],
}

impl Default for SubstitutionKey {
    fn default() -> Self {
        Self::identity()
    }
}

impl SubstitutionKey {
    /// The identity key: every letter maps to itself.
    pub fn identity() -> Self {
        let mut map = ['a'; 26];
        for (i, slot) in map.iter_mut().enumerate() {
            *slot = (b'a' + i as u8) as char;
        }
        Self { map }
    }

    pub fn get(&self, cipher: char) -> char {
        self.map[letter_index(cipher)]
    }

    pub fn set(&mut self, cipher: char, plain: char) {
        debug_assert!(plain.is_ascii_lowercase());
        self.map[letter_index(cipher)] = plain;
    }

    /// (cipher, plain) pairs in alphabetical cipher-letter order.
    pub fn iter(&self) -> impl Iterator<Item = (char, char)> + '_ {
        crate::alphabet().map(move |c| (c, self.get(c)))
    }

    /// The derived confirmed set: every letter with a non-identity mapping.
    pub fn confirmed_set(&self) -> BTreeSet<char> {
        self.iter().filter(|&(c, p)| c != p).map(|(c, _)| c).collect()
    }

    /// Whether `plain` is the target of a non-identity mapping from any
    /// letter other than `except`.
    pub fn plain_claimed_by_other(&self, plain: char, except: char) -> bool {
        self.iter().any(|(c, p)| p == plain && c != except && c != p)
    }
}

impl fmt::Debug for SubstitutionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mapped: String = self.map.iter().collect();
        write!(f, "SubstitutionKey({mapped})")
    }
}

// ---------------------------------------------------------------------------
// Proposals and conflicts
// ---------------------------------------------------------------------------

/// One requested change to a single cipher letter's mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MappingChange {
    /// Map the cipher letter to this plain letter.
    Assign(char),
    /// Reset the cipher letter to identity.
    Clear,
}

/// A batch of requested mapping changes, keyed by cipher letter. BTreeMap so
/// the letters are visited alphabetically.
pub type Proposal = BTreeMap<char, MappingChange>;

/// Two cipher letters whose non-identity mappings share a plain target.
/// Advisory only: a conflicting proposal still commits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Conflict {
    /// The shared plain letter.
    pub plain: char,
    /// Alphabetically first cipher letter claiming `plain`.
    pub first: char,
    /// The later claimant.
    pub second: char,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' and '{}' both map to '{}'",
            self.first, self.second, self.plain
        )
    }
}

/// Result of [`KeyStore::apply`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// Whether the key content actually changed (and history was pushed).
    pub committed: bool,
    pub conflicts: Vec<Conflict>,
}

// ---------------------------------------------------------------------------
// KeyStore
// ---------------------------------------------------------------------------

/// Immutable capture of the key state, pushed before every accepted mutation.
#[derive(Clone, Debug)]
struct Snapshot {
    key: SubstitutionKey,
    confirmed: BTreeSet<char>,
    last_changed: BTreeSet<char>,
}

/// Owns the current substitution key, the derived confirmed set, the letters
/// touched by the most recent committed operation, and the undo stack.
#[derive(Clone, Debug, Default)]
pub struct KeyStore {
    key: SubstitutionKey,
    confirmed: BTreeSet<char>,
    last_changed: BTreeSet<char>,
    history: Vec<Snapshot>,
}

impl KeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(&self) -> &SubstitutionKey {
        &self.key
    }

    pub fn confirmed(&self) -> &BTreeSet<char> {
        &self.confirmed
    }

    /// Letters whose resolved mapping changed in the most recent committed
    /// operation, for caller-side highlighting.
    pub fn last_changed(&self) -> &BTreeSet<char> {
        &self.last_changed
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// The confirmed cipher letter whose mapping targets `plain`, if any.
    /// Alphabetically first when a conflicted key has several.
    pub fn confirmed_owner_of(&self, plain: char) -> Option<char> {
        self.key
            .iter()
            .find(|&(c, p)| p == plain && c != p)
            .map(|(c, _)| c)
    }

    /// Apply a batch of mapping changes.
    ///
    /// Conflicts are detected on the candidate key and reported, but never
    /// block the commit. When the candidate key is identical to the current
    /// key nothing is pushed or mutated, and `committed` is false.
    pub fn apply(&mut self, proposal: &Proposal) -> ApplyOutcome {
        let mut candidate = self.key;
        for (&cipher, change) in proposal {
            match *change {
                MappingChange::Assign(plain) => candidate.set(cipher, plain),
                MappingChange::Clear => candidate.set(cipher, cipher),
            }
        }

        let conflicts = find_conflicts(&candidate);

        if candidate == self.key {
            return ApplyOutcome {
                committed: false,
                conflicts,
            };
        }

        let changed: BTreeSet<char> = self
            .key
            .iter()
            .zip(candidate.iter())
            .filter(|((_, old), (_, new))| old != new)
            .map(|((c, _), _)| c)
            .collect();

        self.push_snapshot();
        self.key = candidate;
        self.last_changed = changed;
        self.confirmed = self.key.confirmed_set();

        ApplyOutcome {
            committed: true,
            conflicts,
        }
    }

    /// Replace the whole key with an already-validated 26-letter mapping.
    ///
    /// Always pushes history, even when the key is unchanged; no conflict
    /// detection is performed.
    pub fn load(&mut self, full_key: SubstitutionKey) {
        let changed: BTreeSet<char> = self
            .key
            .iter()
            .zip(full_key.iter())
            .filter(|((_, old), (_, new))| old != new)
            .map(|((c, _), _)| c)
            .collect();

        self.push_snapshot();
        self.key = full_key;
        self.last_changed = changed;
        self.confirmed = self.key.confirmed_set();
    }

    /// Restore the most recent snapshot. Returns false when there is nothing
    /// to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.pop() else {
            return false;
        };
        self.key = snapshot.key;
        self.confirmed = snapshot.confirmed;
        self.last_changed = snapshot.last_changed;
        true
    }

    fn push_snapshot(&mut self) {
        self.history.push(Snapshot {
            key: self.key,
            confirmed: self.confirmed.clone(),
            last_changed: self.last_changed.clone(),
        });
    }
}

/// Scan cipher letters alphabetically and pair up non-identity mappings that
/// share a plain target. Each plain letter's first claimant owns it; every
/// later claimant produces one conflict against that owner.
fn find_conflicts(key: &SubstitutionKey) -> Vec<Conflict> {
    let mut owner_of: BTreeMap<char, char> = BTreeMap::new();
    let mut conflicts = Vec::new();
    for (cipher, plain) in key.iter() {
        if cipher == plain {
            continue;
        }
        match owner_of.get(&plain) {
            Some(&first) => conflicts.push(Conflict {
                plain,
                first,
                second: cipher,
            }),
            None => {
                owner_of.insert(plain, cipher);
            }
        }
    }
    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assign(pairs: &[(char, char)]) -> Proposal {
        pairs
            .iter()
            .map(|&(c, p)| (c, MappingChange::Assign(p)))
            .collect()
    }

    #[test]
    fn identity_key_maps_every_letter_to_itself() {
        let key = SubstitutionKey::identity();
        for ch in 'a'..='z' {
            assert_eq!(key.get(ch), ch);
        }
        assert!(key.confirmed_set().is_empty());
    }

    #[test]
    fn apply_commits_and_updates_derived_state() {
        let mut store = KeyStore::new();
        let outcome = store.apply(&assign(&[('x', 'e'), ('y', 't')]));
        assert!(outcome.committed);
        assert!(outcome.conflicts.is_empty());
        assert_eq!(store.key().get('x'), 'e');
        assert_eq!(store.confirmed(), &BTreeSet::from(['x', 'y']));
        assert_eq!(store.last_changed(), &BTreeSet::from(['x', 'y']));
        assert!(store.can_undo());
    }

    #[test]
    fn clear_resets_to_identity() {
        let mut store = KeyStore::new();
        store.apply(&assign(&[('x', 'e')]));
        let outcome = store.apply(&Proposal::from([('x', MappingChange::Clear)]));
        assert!(outcome.committed);
        assert_eq!(store.key().get('x'), 'x');
        assert!(store.confirmed().is_empty());
        assert_eq!(store.last_changed(), &BTreeSet::from(['x']));
    }

    #[test]
    fn no_change_apply_leaves_state_untouched() {
        let mut store = KeyStore::new();
        store.apply(&assign(&[('x', 'e')]));
        let before_changed = store.last_changed().clone();

        // Re-assigning the same mapping is not a content change
        let outcome = store.apply(&assign(&[('x', 'e')]));
        assert!(!outcome.committed);
        assert_eq!(store.last_changed(), &before_changed);

        // Only the one snapshot from the first apply
        assert!(store.undo());
        assert!(!store.can_undo());
    }

    #[test]
    fn conflicting_proposal_reports_pair_but_still_commits() {
        let mut store = KeyStore::new();
        let outcome = store.apply(&assign(&[('m', 'e'), ('x', 'e')]));
        assert!(outcome.committed);
        assert_eq!(
            outcome.conflicts,
            vec![Conflict {
                plain: 'e',
                first: 'm',
                second: 'x'
            }]
        );
        // Both mappings landed despite the conflict
        assert_eq!(store.key().get('m'), 'e');
        assert_eq!(store.key().get('x'), 'e');
    }

    #[test]
    fn three_way_conflict_pairs_each_later_claimant_with_first_owner() {
        let mut store = KeyStore::new();
        let outcome = store.apply(&assign(&[('b', 'z'), ('c', 'z'), ('d', 'z')]));
        assert_eq!(
            outcome.conflicts,
            vec![
                Conflict { plain: 'z', first: 'b', second: 'c' },
                Conflict { plain: 'z', first: 'b', second: 'd' },
            ]
        );
    }

    #[test]
    fn identity_mappings_never_conflict() {
        let mut store = KeyStore::new();
        // 'e' maps to itself; 'x' -> 'e' must not conflict with it
        let outcome = store.apply(&assign(&[('x', 'e')]));
        assert!(outcome.conflicts.is_empty());
    }

    #[test]
    fn apply_then_undo_restores_exact_prior_triple() {
        let mut store = KeyStore::new();
        store.apply(&assign(&[('x', 'e')]));
        let key_before = *store.key();
        let confirmed_before = store.confirmed().clone();
        let changed_before = store.last_changed().clone();

        store.apply(&assign(&[('y', 't'), ('z', 'h')]));
        assert!(store.undo());

        assert_eq!(store.key(), &key_before);
        assert_eq!(store.confirmed(), &confirmed_before);
        assert_eq!(store.last_changed(), &changed_before);
    }

    #[test]
    fn undo_on_empty_history_returns_false() {
        let mut store = KeyStore::new();
        assert!(!store.undo());
    }

    #[test]
    fn load_pushes_history_and_derives_confirmed() {
        let mut store = KeyStore::new();
        let mut key = SubstitutionKey::identity();
        key.set('a', 'z');
        key.set('z', 'a');
        store.load(key);

        assert_eq!(store.confirmed(), &BTreeSet::from(['a', 'z']));
        assert_eq!(store.last_changed(), &BTreeSet::from(['a', 'z']));
        assert!(store.can_undo());

        assert!(store.undo());
        assert_eq!(store.key(), &SubstitutionKey::identity());
    }

    #[test]
    fn load_of_unchanged_key_still_pushes_one_entry() {
        let mut store = KeyStore::new();
        store.load(SubstitutionKey::identity());
        assert!(store.last_changed().is_empty());
        assert!(store.undo());
        assert!(!store.can_undo());
    }

    #[test]
    fn confirmed_owner_lookup() {
        let mut store = KeyStore::new();
        store.apply(&assign(&[('x', 'e')]));
        assert_eq!(store.confirmed_owner_of('e'), Some('x'));
        assert_eq!(store.confirmed_owner_of('t'), None);
        // Identity mapping of 'q' does not own 'q'
        assert_eq!(store.confirmed_owner_of('q'), None);
    }

    #[test]
    fn last_changed_tracks_resolved_values_not_proposal_keys() {
        let mut store = KeyStore::new();
        store.apply(&assign(&[('x', 'e')]));
        // Propose x->e (no-op) together with y->t (real change)
        let outcome = store.apply(&assign(&[('x', 'e'), ('y', 't')]));
        assert!(outcome.committed);
        assert_eq!(store.last_changed(), &BTreeSet::from(['y']));
    }
}
