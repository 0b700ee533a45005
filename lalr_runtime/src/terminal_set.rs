// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

use std::fmt;

use crate::token::TerminalId;

const BITS: usize = 64;

/// Dense fixed-width bitset over terminal ids, sized to the grammar's
/// terminal count. The relation engine (`lalr_core::relation`) performs a
/// large number of set unions while solving its two digraph fixpoints;
/// spec §5 mandates a bitset rather than a hashed/ordered collection for
/// exactly that reason.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TerminalSet {
    words: Vec<u64>,
}

impl TerminalSet {
    pub fn new(num_terminals: usize) -> Self {
        Self {
            words: vec![0u64; (num_terminals + BITS - 1) / BITS.max(1)],
        }
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    pub fn contains(&self, terminal: TerminalId) -> bool {
        let idx = terminal.index();
        let word = idx / BITS;
        let bit = idx % BITS;
        self.words.get(word).map_or(false, |w| w & (1 << bit) != 0)
    }

    /// Returns `true` iff the terminal was newly inserted.
    pub fn insert(&mut self, terminal: TerminalId) -> bool {
        let idx = terminal.index();
        let word = idx / BITS;
        let bit = idx % BITS;
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        let was_absent = self.words[word] & (1 << bit) == 0;
        self.words[word] |= 1 << bit;
        was_absent
    }

    pub fn remove(&mut self, terminal: TerminalId) -> bool {
        let idx = terminal.index();
        let word = idx / BITS;
        let bit = idx % BITS;
        if let Some(w) = self.words.get_mut(word) {
            let was_present = *w & (1 << bit) != 0;
            *w &= !(1 << bit);
            was_present
        } else {
            false
        }
    }

    /// In-place union; returns `true` if any new bit was added. This is the
    /// operation the digraph fixpoint calls on every edge traversal.
    pub fn union_with(&mut self, other: &TerminalSet) -> bool {
        if other.words.len() > self.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        let mut changed = false;
        for (mine, theirs) in self.words.iter_mut().zip(other.words.iter()) {
            let merged = *mine | *theirs;
            if merged != *mine {
                changed = true;
            }
            *mine = merged;
        }
        changed
    }

    pub fn intersects(&self, other: &TerminalSet) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .any(|(a, b)| a & b != 0)
    }

    pub fn difference_with(&mut self, other: &TerminalSet) {
        for (mine, theirs) in self.words.iter_mut().zip(other.words.iter()) {
            *mine &= !*theirs;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = TerminalId> + '_ {
        self.words.iter().enumerate().flat_map(|(word_idx, &word)| {
            (0..BITS).filter_map(move |bit| {
                if word & (1 << bit) != 0 {
                    Some(TerminalId((word_idx * BITS + bit) as u32))
                } else {
                    None
                }
            })
        })
    }
}

impl fmt::Display for TerminalSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let ids: Vec<String> = self.iter().map(|t| t.to_string()).collect();
        write!(f, "{{{}}}", ids.join(", "))
    }
}

impl FromIterator<TerminalId> for TerminalSet {
    fn from_iter<I: IntoIterator<Item = TerminalId>>(iter: I) -> Self {
        let mut set = TerminalSet::default();
        for t in iter {
            set.insert(t);
        }
        set
    }
}
