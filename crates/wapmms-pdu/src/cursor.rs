//! Bounded read cursor over a PDU buffer.
//!
//! All raw byte access of the decoder goes through [`ByteCursor`]. Nested
//! length-delimited regions (a part's header block, a content type's
//! parameter block, the body of a From value) are decoded with a
//! [`ByteCursor::sub_cursor`]: the parent only advances past the region, and
//! the child cannot read outside of it.

use crate::{Error, Result};

/// Read cursor state.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    input: &'a [u8],
    pos: usize,
    /// Absolute offset of `input[0]` in the top-level buffer.
    base: usize,
}

impl<'a> ByteCursor<'a> {
    /// Creates a cursor at the start of the given input.
    #[must_use]
    pub const fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            base: 0,
        }
    }

    /// Returns the position within this cursor's own input.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the absolute offset in the top-level buffer.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.base + self.pos
    }

    /// Returns the unread input.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }

    /// Returns the number of unread bytes.
    #[must_use]
    pub const fn remaining_len(&self) -> usize {
        self.input.len() - self.pos
    }

    /// Returns true if at end of input.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Peeks at the current byte without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Advances by one byte and returns it.
    pub fn advance(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    /// Peeks at the current byte, failing at end of input.
    pub fn peek_byte(&self, context: &'static str) -> Result<u8> {
        self.peek().ok_or_else(|| self.truncated(context, 1))
    }

    /// Reads one byte, failing at end of input.
    pub fn read_byte(&mut self, context: &'static str) -> Result<u8> {
        self.advance().ok_or_else(|| self.truncated(context, 1))
    }

    /// Reads exactly `len` bytes.
    pub fn read_exact(&mut self, len: usize, context: &'static str) -> Result<&'a [u8]> {
        if len > self.remaining_len() {
            return Err(self.truncated(context, len));
        }
        let bytes = &self.input[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Reads up to and including `terminator`.
    ///
    /// The returned slice excludes the terminator. Fails without consuming
    /// anything when the terminator is missing.
    pub fn read_until(&mut self, terminator: u8, context: &'static str) -> Result<&'a [u8]> {
        let rest = self.remaining();
        let Some(end) = rest.iter().position(|&b| b == terminator) else {
            return Err(self.truncated(context, rest.len() + 1));
        };
        self.pos += end + 1;
        Ok(&rest[..end])
    }

    /// Reads `len` bytes and returns an independent cursor over them.
    pub fn sub_cursor(&mut self, len: usize, context: &'static str) -> Result<Self> {
        let base = self.offset();
        let input = self.read_exact(len, context)?;
        Ok(Self {
            input,
            pos: 0,
            base,
        })
    }

    /// Consumes and returns all unread input.
    pub fn take_rest(&mut self) -> &'a [u8] {
        let rest = self.remaining();
        self.pos = self.input.len();
        rest
    }

    /// Fails if any input is left unread.
    pub fn ensure_consumed(&self, context: &'static str) -> Result<()> {
        let remaining = self.remaining_len();
        if remaining == 0 {
            Ok(())
        } else {
            Err(Error::PendingBytes { context, remaining })
        }
    }

    /// Creates a truncation error for a read starting at the current position.
    pub(crate) fn truncated(&self, context: &'static str, wanted: usize) -> Error {
        Error::Truncated {
            context,
            offset: self.offset(),
            wanted,
            available: self.remaining_len(),
        }
    }

    /// Creates a malformed-primitive error for the byte just before the
    /// current position.
    pub(crate) fn malformed(&self, what: &'static str, value: u8) -> Error {
        Error::Malformed {
            what,
            offset: self.offset().saturating_sub(1),
            value,
        }
    }
}
