use crate::ranked::{BoundedRankedSet, Ranking};
use std::cmp::Ordering;

fn char_len(word: &str) -> usize {
    word.chars().count()
}

/// Length ascending, then lexicographic ascending
#[derive(Debug)]
pub struct ShortestFirst;

impl Ranking for ShortestFirst {
    type Key = str;

    fn compare(a: &str, b: &str) -> Ordering {
        char_len(a).cmp(&char_len(b)).then_with(|| a.cmp(b))
    }
}

/// Length descending, then lexicographic ascending
#[derive(Debug)]
pub struct LongestFirst;

impl Ranking for LongestFirst {
    type Key = str;

    fn compare(a: &str, b: &str) -> Ordering {
        char_len(b).cmp(&char_len(a)).then_with(|| a.cmp(b))
    }
}

/// Tracks the K shortest and K longest distinct words seen so far
#[derive(Debug)]
pub struct ExtremalWords {
    smallest: BoundedRankedSet<String, ShortestFirst>,
    largest: BoundedRankedSet<String, LongestFirst>,
}

impl ExtremalWords {
    pub fn new(k: usize) -> Self {
        Self {
            smallest: BoundedRankedSet::new(k),
            largest: BoundedRankedSet::new(k),
        }
    }

    /// Offer a word to both collections
    ///
    /// The word is only copied into a collection it actually enters.
    pub fn observe(&mut self, word: &str) {
        if self.smallest.admits(word) {
            self.smallest.insert(word.to_owned());
        }
        if self.largest.admits(word) {
            self.largest.insert(word.to_owned());
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.smallest.contains(word) || self.largest.contains(word)
    }

    /// Shortest words, shortest first
    pub fn smallest(&self) -> Vec<String> {
        self.smallest.to_vec()
    }

    /// Longest words, longest first
    pub fn largest(&self) -> Vec<String> {
        self.largest.to_vec()
    }

    pub fn capacity(&self) -> usize {
        self.smallest.capacity()
    }
}
