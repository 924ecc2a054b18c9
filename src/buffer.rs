//! Bounded rolling text buffer for one connection.
//!
//! The buffer is the hand-off point between the read loop (single writer)
//! and the decode loop (single reader). Logical input is unbounded; physical
//! storage is capped, and overflow always discards the oldest prefix so the
//! most recent characters survive.

use std::sync::{Arc, Mutex};

/// Rolling accumulation of incoming characters for one connection.
///
/// Lengths are counted in characters, not bytes, to match frame lengths and
/// field offsets which are character-based.
#[derive(Debug)]
pub struct RollingBuffer {
    data: String,
    chars: usize,
    cap: usize,
}

/// Buffer shared between the read task and the decode task.
///
/// The two loops run on a multi-threaded runtime, so the single-writer /
/// single-reader pairing still needs a lock around the buffer.
pub type SharedBuffer = Arc<Mutex<RollingBuffer>>;

impl RollingBuffer {
    /// Create an empty buffer holding at most `cap` characters.
    pub fn new(cap: usize) -> Self {
        Self { data: String::new(), chars: 0, cap: cap.max(1) }
    }

    /// Create an empty shared buffer.
    pub fn shared(cap: usize) -> SharedBuffer {
        Arc::new(Mutex::new(Self::new(cap)))
    }

    /// Append a chunk, discarding the oldest characters once the cap is
    /// exceeded. A chunk larger than the cap keeps only its own tail.
    pub fn push(&mut self, chunk: &str) {
        self.data.push_str(chunk);
        self.chars += chunk.chars().count();

        if self.chars > self.cap {
            let drop = self.chars - self.cap;
            let cut = self
                .data
                .char_indices()
                .nth(drop)
                .map(|(idx, _)| idx)
                .unwrap_or(self.data.len());
            self.data.drain(..cut);
            self.chars -= drop;
        }
    }

    /// The trailing `max_chars` characters (or the whole buffer if shorter).
    pub fn tail(&self, max_chars: usize) -> &str {
        if self.chars <= max_chars {
            return &self.data;
        }
        let skip = self.chars - max_chars;
        match self.data.char_indices().nth(skip) {
            Some((idx, _)) => &self.data[idx..],
            None => "",
        }
    }

    /// The full buffered text.
    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// Discard everything.
    pub fn clear(&mut self) {
        self.data.clear();
        self.chars = 0;
    }

    /// Number of buffered characters.
    pub fn len(&self) -> usize {
        self.chars
    }

    pub fn is_empty(&self) -> bool {
        self.chars == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn push_accumulates_in_order() {
        let mut buf = RollingBuffer::new(32);
        buf.push("#A12");
        buf.push("34");
        assert_eq!(buf.as_str(), "#A1234");
        assert_eq!(buf.len(), 6);
    }

    #[test]
    fn overflow_keeps_the_most_recent_tail() {
        let mut buf = RollingBuffer::new(8);
        buf.push("abcdefgh");
        buf.push("1234");
        assert_eq!(buf.as_str(), "efgh1234");
        assert_eq!(buf.len(), 8);
    }

    #[test]
    fn oversized_chunk_keeps_its_own_tail() {
        let mut buf = RollingBuffer::new(4);
        buf.push("0123456789");
        assert_eq!(buf.as_str(), "6789");
    }

    #[test]
    fn tail_returns_trailing_window() {
        let mut buf = RollingBuffer::new(16);
        buf.push("abcdefgh");
        assert_eq!(buf.tail(3), "fgh");
        assert_eq!(buf.tail(8), "abcdefgh");
        assert_eq!(buf.tail(100), "abcdefgh");
    }

    #[test]
    fn clear_empties_the_buffer() {
        let mut buf = RollingBuffer::new(16);
        buf.push("data");
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.as_str(), "");
    }

    #[test]
    fn multibyte_characters_count_as_one() {
        let mut buf = RollingBuffer::new(4);
        buf.push("°±°±");
        buf.push("xy");
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.as_str(), "°±xy");
    }

    proptest! {
        #[test]
        fn buffer_is_always_a_suffix_of_the_input_stream(
            chunks in prop::collection::vec("[ -~]{0,64}", 0..20),
            cap in 1usize..256,
        ) {
            let mut buf = RollingBuffer::new(cap);
            let mut full = String::new();
            for chunk in &chunks {
                buf.push(chunk);
                full.push_str(chunk);
            }

            // Never exceeds the cap, and never loses the newest characters.
            prop_assert!(buf.len() <= cap);
            prop_assert!(full.ends_with(buf.as_str()));

            // Holds as much as the cap allows.
            let expected = full.chars().count().min(cap);
            prop_assert_eq!(buf.len(), expected);
        }
    }
}
