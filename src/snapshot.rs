use crate::extremal::ExtremalWords;
use crate::frequency::FrequencyTable;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Why a snapshot was dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// The report interval was reached
    Interval,
    /// The stream was exhausted
    Final,
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::Interval => write!(f, "interval"),
            ReportKind::Final => write!(f, "final"),
        }
    }
}

/// Copy of the cumulative statistics at the moment it was taken
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsSnapshot {
    pub kind: ReportKind,
    pub top_k: usize,
    pub total_chars: u64,
    pub total_words: u64,
    pub char_frequency: HashMap<char, u64>,
    pub word_frequency: HashMap<String, u64>,
    /// Length ascending, ties lexicographic
    pub smallest_words: Vec<String>,
    /// Length descending, ties lexicographic
    pub largest_words: Vec<String>,
}

impl StatisticsSnapshot {
    /// The `n` most frequent words, count descending then word ascending
    pub fn top_words(&self, n: usize) -> Vec<(&str, u64)> {
        let mut words: Vec<_> = self
            .word_frequency
            .iter()
            .map(|(word, count)| (word.as_str(), *count))
            .collect();
        words.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        words.truncate(n);
        words
    }

    /// All character counts, count descending then character ascending
    pub fn sorted_char_frequencies(&self) -> Vec<(char, u64)> {
        let mut chars: Vec<_> = self
            .char_frequency
            .iter()
            .map(|(c, count)| (*c, *count))
            .collect();
        chars.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        chars
    }
}

/// Live counters and tables a snapshot is derived from
///
/// Owned by a single run and mutated only by its driver.
#[derive(Debug)]
pub struct AggregationState {
    frequencies: FrequencyTable,
    extremal: ExtremalWords,
}

impl AggregationState {
    pub fn new(top_k: usize) -> Self {
        Self {
            frequencies: FrequencyTable::new(),
            extremal: ExtremalWords::new(top_k),
        }
    }

    /// Returns the number of characters in `chunk`
    pub fn record_chars(&mut self, chunk: &str) -> u64 {
        self.frequencies.record_chars(chunk)
    }

    /// Count a token and offer it to the extremal word tracker
    pub fn record_word(&mut self, word: &str) {
        self.frequencies.record_word(word);
        self.extremal.observe(word);
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    pub fn snapshot(&self, kind: ReportKind) -> StatisticsSnapshot {
        StatisticsSnapshot {
            kind,
            top_k: self.extremal.capacity(),
            total_chars: self.frequencies.total_chars(),
            total_words: self.frequencies.total_words(),
            char_frequency: self.frequencies.char_frequencies().clone(),
            word_frequency: self.frequencies.word_frequencies().clone(),
            smallest_words: self.extremal.smallest(),
            largest_words: self.extremal.largest(),
        }
    }
}
