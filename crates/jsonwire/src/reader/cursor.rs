//! Cursor: the unread tail of one input buffer plus the nesting depth.
//!
//! The backing [`Bytes`] is never copied or mutated; the cursor only moves a
//! byte offset forward. Every error raised while reading is stamped with that
//! offset.
//!
//! Invariants
//! - `pos <= source.len()`.
//! - `depth` equals the number of arrays and objects currently open and is
//!   always below `max_depth`.

use bytes::Bytes;

use crate::error::{Error, ErrorSource, Schema};

#[derive(Debug, Clone)]
pub(crate) struct Cursor {
    pub(super) source: Bytes,
    pub(super) pos: usize,
    depth: usize,
    max_depth: usize,
}

#[inline]
fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

impl Cursor {
    pub(crate) fn new(source: Bytes, max_depth: usize) -> Self {
        Self {
            source,
            pos: 0,
            depth: 0,
            max_depth,
        }
    }

    #[inline]
    pub(crate) fn offset(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// Unread bytes.
    #[inline]
    pub(crate) fn remaining(&self) -> &[u8] {
        &self.source[self.pos..]
    }

    #[inline]
    pub(super) fn bytes(&self) -> &[u8] {
        &self.source
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    #[inline]
    pub(crate) fn advance(&mut self, n: usize) {
        debug_assert!(self.pos + n <= self.source.len());
        self.pos += n;
    }

    /// Skips whitespace and returns the first byte of the next token without
    /// consuming it. `None` means the input is exhausted.
    pub(crate) fn next_token(&mut self) -> Option<u8> {
        let skipped = self
            .remaining()
            .iter()
            .take_while(|&&b| is_whitespace(b))
            .count();
        self.pos += skipped;
        self.peek()
    }

    /// Consumes `byte` if it is the next token.
    pub(crate) fn eat(&mut self, byte: u8) -> bool {
        if self.next_token() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn increment_depth(&mut self) -> Result<(), Error> {
        self.depth += 1;
        if self.depth >= self.max_depth {
            return Err(self.error(Schema::MaximumDepth));
        }
        Ok(())
    }

    pub(crate) fn decrement_depth(&mut self) {
        debug_assert!(self.depth > 0, "closed a scope that was never opened");
        self.depth = self.depth.saturating_sub(1);
    }

    /// Builds an error located at the current offset.
    pub(crate) fn error(&self, source: impl Into<ErrorSource>) -> Error {
        Error::new(source, self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_token_skips_json_whitespace_only() {
        let mut cursor = Cursor::new(Bytes::from_static(b" \t\r\n [\x0b"), 100);
        assert_eq!(cursor.next_token(), Some(b'['));
        assert_eq!(cursor.offset(), 5);
        cursor.advance(1);
        assert_eq!(cursor.next_token(), Some(0x0b));
    }

    #[test]
    fn depth_limit_is_reached_not_exceeded() {
        let mut cursor = Cursor::new(Bytes::new(), 3);
        cursor.increment_depth().unwrap();
        cursor.increment_depth().unwrap();
        let err = cursor.increment_depth().unwrap_err();
        assert_eq!(err.schema(), Some(Schema::MaximumDepth));
    }
}
