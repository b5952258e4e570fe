use std::collections::HashMap;

/// Cumulative character and word counts for one run
///
/// Counts only ever grow; there is no removal or decay.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    total_chars: u64,
    total_words: u64,
    chars: HashMap<char, u64>,
    words: HashMap<String, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every character toward the total, and non-whitespace ones individually
    /// Returns the number of characters in `chunk`
    pub fn record_chars(&mut self, chunk: &str) -> u64 {
        let mut counted = 0;
        for c in chunk.chars() {
            counted += 1;
            if !c.is_whitespace() {
                *self.chars.entry(c).or_insert(0) += 1;
            }
        }
        self.total_chars += counted;
        counted
    }

    /// Count one occurrence of an already case-folded word
    pub fn record_word(&mut self, word: &str) {
        self.total_words += 1;
        match self.words.get_mut(word) {
            Some(count) => *count += 1,
            None => {
                self.words.insert(word.to_owned(), 1);
            }
        }
    }

    pub fn total_chars(&self) -> u64 {
        self.total_chars
    }

    pub fn total_words(&self) -> u64 {
        self.total_words
    }

    pub fn char_count(&self, c: char) -> u64 {
        self.chars.get(&c).copied().unwrap_or(0)
    }

    pub fn word_count(&self, word: &str) -> u64 {
        self.words.get(word).copied().unwrap_or(0)
    }

    pub fn char_frequencies(&self) -> &HashMap<char, u64> {
        &self.chars
    }

    pub fn word_frequencies(&self) -> &HashMap<String, u64> {
        &self.words
    }
}
