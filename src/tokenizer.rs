use serde::Deserialize;

/// How a word cut by a chunk boundary is counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Carry the trailing partial word into the next chunk
    #[default]
    Stitch,
    /// Count each side of the cut as its own token
    Split,
}

/// Word characters: alphanumeric or underscore
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lazy iterator over the lowercase words of a text
///
/// A word is a maximal run of [`is_word_char`] characters; everything else
/// separates words and is never emitted.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { rest: text }
    }
}

impl Iterator for Tokens<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let start = self.rest.find(is_word_char)?;
        let run = &self.rest[start..];
        let end = run.find(|c: char| !is_word_char(c)).unwrap_or(run.len());
        self.rest = &run[end..];
        Some(run[..end].to_lowercase())
    }
}

/// Tokenize a single chunk with no memory of neighbouring chunks
pub fn tokenize(chunk: &str) -> Tokens<'_> {
    Tokens::new(chunk)
}

/// Chunk-by-chunk tokenizer that applies a [`BoundaryPolicy`]
///
/// With [`BoundaryPolicy::Stitch`] the trailing word run of each chunk stays
/// buffered until a separator or [`WordSplitter::finish`] closes it.
#[derive(Debug, Default)]
pub struct WordSplitter {
    policy: BoundaryPolicy,
    buffer: String,
    consumed: usize,
}

impl WordSplitter {
    pub fn new(policy: BoundaryPolicy) -> Self {
        Self {
            policy,
            buffer: String::new(),
            consumed: 0,
        }
    }

    /// Append a chunk and iterate the words it completes
    pub fn feed(&mut self, chunk: &str) -> Tokens<'_> {
        self.buffer.drain(..self.consumed);
        // Under Stitch the carried text is a single word run, so only the
        // new chunk can hold the separator that closes it.
        let carried = self.buffer.len();
        self.buffer.push_str(chunk);
        self.consumed = match self.policy {
            BoundaryPolicy::Stitch => match complete_prefix_len(chunk) {
                0 => 0,
                len => carried + len,
            },
            BoundaryPolicy::Split => self.buffer.len(),
        };
        Tokens::new(&self.buffer[..self.consumed])
    }

    /// Release the buffered partial word at end of stream
    pub fn finish(&mut self) -> Tokens<'_> {
        self.buffer.drain(..self.consumed);
        self.consumed = self.buffer.len();
        Tokens::new(&self.buffer)
    }

    /// The partial word currently held back
    pub fn pending(&self) -> &str {
        &self.buffer[self.consumed..]
    }
}

/// Length of the prefix that ends outside a word run
fn complete_prefix_len(text: &str) -> usize {
    text.char_indices()
        .rev()
        .find(|&(_, c)| !is_word_char(c))
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0)
}
