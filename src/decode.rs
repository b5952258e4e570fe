/// Incremental UTF-8 decoder for byte chunks
///
/// A multi-byte sequence cut by a chunk boundary is held back until the next
/// chunk completes it. Invalid sequences decode to U+FFFD, one per maximal
/// invalid run, matching `String::from_utf8_lossy`.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
    replaced: u64,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `bytes` and append the characters to `out`
    pub fn decode(&mut self, bytes: &[u8], out: &mut String) {
        if self.pending.is_empty() {
            self.decode_slice(bytes, out);
        } else {
            let mut joined = std::mem::take(&mut self.pending);
            joined.extend_from_slice(bytes);
            self.decode_slice(&joined, out);
        }
    }

    /// Flush a dangling incomplete sequence at end of stream
    pub fn finish(&mut self, out: &mut String) {
        if !self.pending.is_empty() {
            self.pending.clear();
            self.replace(out);
        }
    }

    /// Number of replacement characters emitted so far
    pub fn replaced(&self) -> u64 {
        self.replaced
    }

    /// Bytes held back waiting for the rest of their sequence
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn decode_slice(&mut self, mut input: &[u8], out: &mut String) {
        loop {
            match std::str::from_utf8(input) {
                Ok(text) => {
                    out.push_str(text);
                    return;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&input[..valid]));
                    match e.error_len() {
                        Some(len) => {
                            self.replace(out);
                            input = &input[valid + len..];
                        }
                        None => {
                            self.pending.extend_from_slice(&input[valid..]);
                            return;
                        }
                    }
                }
            }
        }
    }

    fn replace(&mut self, out: &mut String) {
        out.push(char::REPLACEMENT_CHARACTER);
        self.replaced += 1;
    }
}
