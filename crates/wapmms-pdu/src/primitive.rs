//! WSP primitive encodings (WAP-230 section 8.4.2, reused by WAP-209).
//!
//! Each reader consumes bytes from the front of a [`ByteCursor`] and fails if
//! the input ends early or the bytes do not match the primitive's grammar.

use crate::cursor::ByteCursor;
use crate::tables;
use crate::{Error, Result};

/// Value-length marker announcing a uintvar length.
pub const LENGTH_QUOTE: u8 = 31;

/// First octet value that a text-string carries behind a leading quote.
const QUOTED_TEXT_START: u8 = 128;

/// Constrained media octets below this value start an extension media text.
const SHORT_MEDIA_START: u8 = 127;

/// Charset marker of an encoded-string-value meaning "any charset".
pub const ANY_CHARSET: u8 = 127;

/// Maximum number of octets in a uintvar (35 data bits).
const MAX_VAR_UINT_OCTETS: usize = 5;

/// Maximum width of a long integer this decoder accepts.
const MAX_LONG_INTEGER_OCTETS: u8 = 8;

/// Largest short-length value.
const MAX_SHORT_LENGTH: u8 = 30;

impl ByteCursor<'_> {
    /// Reads a `Uintvar-integer`.
    ///
    /// Seven data bits per octet, most significant first; the high bit marks
    /// that another octet follows.
    pub fn var_uint(&mut self) -> Result<u64> {
        let offset = self.offset();
        let mut result: u64 = 0;
        for _ in 0..MAX_VAR_UINT_OCTETS {
            let byte = self.read_byte("var uint")?;
            result = (result << 7) | u64::from(byte & 0x7f);
            if byte & 0x80 == 0 {
                return Ok(result);
            }
        }
        Err(Error::InvalidVarUint { offset })
    }

    /// Reads a `Uintvar-integer` used as a byte count.
    pub fn var_uint_len(&mut self) -> Result<usize> {
        let offset = self.offset();
        let value = self.var_uint()?;
        usize::try_from(value).map_err(|_| Error::LengthOverflow { offset, value })
    }

    /// Reads a `Value-length`.
    ///
    /// ```text
    /// Value-length = Short-length | (Length-quote Length)
    /// Short-length = <Any octet 0-30>
    /// Length-quote = <Octet 31>
    /// ```
    pub fn value_length(&mut self) -> Result<usize> {
        let byte = self.read_byte("value length")?;
        match byte {
            0..=MAX_SHORT_LENGTH => Ok(usize::from(byte)),
            LENGTH_QUOTE => self.var_uint_len(),
            _ => Err(self.malformed("value length", byte)),
        }
    }

    /// Reads a `Short-integer`: one octet with the high bit set, returning the
    /// low seven bits.
    pub fn short_integer(&mut self) -> Result<u8> {
        let byte = self.read_byte("short integer")?;
        if byte & 0x80 == 0 {
            return Err(self.malformed("short integer", byte));
        }
        Ok(byte & 0x7f)
    }

    /// Reads a `Long-integer`: a short length followed by that many
    /// big-endian octets.
    pub fn long_integer(&mut self) -> Result<u64> {
        let offset = self.offset();
        let width = self.read_byte("long integer")?;
        if width > MAX_SHORT_LENGTH {
            return Err(self.malformed("long integer length", width));
        }
        if width > MAX_LONG_INTEGER_OCTETS {
            return Err(Error::UnsupportedLongInteger { offset, width });
        }
        let bytes = self.read_exact(usize::from(width), "long integer")?;
        Ok(bytes
            .iter()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
    }

    /// Reads an `Integer-value`: a short integer or a long integer.
    pub fn integer_value(&mut self) -> Result<u64> {
        if self.peek_byte("integer value")? >= 128 {
            return self.short_integer().map(u64::from);
        }
        self.long_integer()
    }

    /// Reads a boolean: 128 is true, 129 is false.
    pub fn boolean(&mut self) -> Result<bool> {
        match self.read_byte("boolean")? {
            128 => Ok(true),
            129 => Ok(false),
            other => Err(self.malformed("boolean", other)),
        }
    }

    /// Reads a `Text-string`.
    ///
    /// ```text
    /// Text-string = [Quote] *TEXT End-of-string
    /// ```
    ///
    /// A leading octet of 128 or above is a quote and is dropped. The
    /// terminating zero octet is consumed but not returned.
    pub fn text_string(&mut self) -> Result<String> {
        if self.peek_byte("text string")? >= QUOTED_TEXT_START {
            self.advance();
        }
        let text = self.read_until(0, "text string")?;
        Ok(String::from_utf8_lossy(text).into_owned())
    }

    /// Reads an `Encoded-string-value` (WAP-209 section 7.2.9).
    ///
    /// ```text
    /// Encoded-string-value = Text-string | Value-length Char-set Text-string
    /// ```
    ///
    /// The charset is decoded but the text is not transcoded.
    pub fn encoded_string_value(&mut self) -> Result<String> {
        if self.peek_byte("encoded string")? >= 32 {
            return self.text_string();
        }

        let offset = self.offset();
        let len = self.value_length()?;
        let mut block = self.sub_cursor(len, "encoded string")?;
        let Some(marker) = block.peek() else {
            return Err(Error::EmptyEncodedString { offset });
        };

        if marker == ANY_CHARSET {
            block.advance();
            let rest = block.take_rest();
            let text = rest.strip_suffix(&[0]).unwrap_or(rest);
            return Ok(String::from_utf8_lossy(text).into_owned());
        }

        if marker > 32 {
            // Short-integer charset or bare text; the quote rule drops the former.
            return block.text_string();
        }

        let charset = block.long_integer()?;
        tracing::trace!(charset, "encoded string charset");
        let rest = block.take_rest();
        match rest.split_last() {
            Some((_, text)) if !text.is_empty() => Ok(String::from_utf8_lossy(text).into_owned()),
            _ => Ok(String::new()),
        }
    }

    /// Reads a `Constrained-media` value.
    ///
    /// ```text
    /// Constrained-media = Extension-Media | Short-integer
    /// ```
    ///
    /// A short integer indexes the well-known content type table.
    pub fn constrained_media(&mut self) -> Result<String> {
        if self.peek_byte("constrained media")? < SHORT_MEDIA_START {
            return self.text_string();
        }
        let offset = self.offset();
        let index = self.short_integer()?;
        tables::content_type(index)
            .map(str::to_string)
            .ok_or(Error::UnknownContentType { index, offset })
    }

    /// Skips an untyped parameter value of unknown meaning.
    ///
    /// Short integers take one octet, value-length forms their declared
    /// length, and text runs to its terminator. A value that cannot be
    /// delimited consumes the rest of the input.
    pub fn skip_value(&mut self) {
        let Some(byte) = self.peek() else {
            return;
        };
        let skipped = match byte {
            0..=MAX_SHORT_LENGTH => {
                self.advance();
                self.read_exact(usize::from(byte), "parameter value").is_ok()
            }
            LENGTH_QUOTE => {
                self.advance();
                self.var_uint_len()
                    .and_then(|len| self.read_exact(len, "parameter value"))
                    .is_ok()
            }
            32..=127 => self.read_until(0, "parameter value").is_ok(),
            _ => {
                self.advance();
                true
            }
        };
        if !skipped {
            self.take_rest();
        }
    }
}
