//! Error types for MMS PDU decoding.

use thiserror::Error;

/// Result type alias for decode operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort the decoding of a PDU.
///
/// Every offset is an absolute position in the buffer handed to
/// [`crate::decode`], including failures inside a part's header block.
#[derive(Debug, Error)]
pub enum Error {
    /// The input ended in the middle of a value.
    #[error(
        "unexpected end of input reading {context} at offset {offset}: wanted {wanted} bytes, {available} available"
    )]
    Truncated {
        /// What was being read.
        context: &'static str,
        /// Offset where the read started.
        offset: usize,
        /// Bytes the read needed.
        wanted: usize,
        /// Bytes that were left.
        available: usize,
    },

    /// A byte violates the grammar of a primitive.
    #[error("invalid {what} at offset {offset}: {value:#04x}")]
    Malformed {
        /// Name of the primitive being decoded.
        what: &'static str,
        /// Offset of the offending byte.
        offset: usize,
        /// The offending byte.
        value: u8,
    },

    /// A uintvar kept its continuation bit set past five octets.
    #[error("invalid var uint at offset {offset}")]
    InvalidVarUint {
        /// Offset of the first octet.
        offset: usize,
    },

    /// A long integer is wider than 8 octets.
    #[error("unsupported long integer at offset {offset}: {width} bytes")]
    UnsupportedLongInteger {
        /// Offset of the length octet.
        offset: usize,
        /// Declared width.
        width: u8,
    },

    /// A declared length does not fit in memory on this platform.
    #[error("length {value} at offset {offset} is too large")]
    LengthOverflow {
        /// Offset of the length field.
        offset: usize,
        /// Decoded length.
        value: u64,
    },

    /// Header field tag with an unrecognised code.
    #[error("unknown mms field type {tag:#04x} at offset {offset}")]
    UnknownField {
        /// The raw tag byte (high bit set).
        tag: u8,
        /// Offset of the tag byte.
        offset: usize,
    },

    /// Constrained media index outside the well-known content type table.
    #[error("unknown short content type {index} at offset {offset}")]
    UnknownContentType {
        /// Index into the content type table.
        index: u8,
        /// Offset of the short integer.
        offset: usize,
    },

    /// Numeric part header code that is not handled.
    #[error("unknown part header {code:#04x} at offset {offset}")]
    UnknownPartHeader {
        /// The raw header code.
        code: u8,
        /// Offset of the code byte.
        offset: usize,
    },

    /// An encoded-string-value with a zero length block.
    #[error("invalid empty encoded string at offset {offset}")]
    EmptyEncodedString {
        /// Offset of the value length.
        offset: usize,
    },

    /// The From field is empty or carries an unknown address token.
    #[error("invalid from field at offset {offset}: {reason}")]
    InvalidFrom {
        /// Offset of the From value.
        offset: usize,
        /// Description of the problem.
        reason: String,
    },

    /// A delivery/expiry time token is neither absolute nor relative.
    #[error("invalid time token at offset {offset}: {token:#04x}")]
    InvalidTimeToken {
        /// Offset of the token byte.
        offset: usize,
        /// The token byte.
        token: u8,
    },

    /// A bounded block was not fully consumed by its decoder.
    #[error("{remaining} pending bytes after {context}")]
    PendingBytes {
        /// The block that was being decoded.
        context: &'static str,
        /// Bytes left over.
        remaining: usize,
    },

    /// Decoding a body part failed.
    #[error("decode part {index}: {source}")]
    Part {
        /// Zero-based index of the part.
        index: u64,
        /// The underlying failure.
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Returns true when the failure is caused by missing input rather than
    /// by an invalid byte pattern.
    #[must_use]
    pub fn is_truncation(&self) -> bool {
        match self {
            Self::Truncated { .. } => true,
            Self::Part { source, .. } => source.is_truncation(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_display() {
        let err = Error::Truncated {
            context: "part header",
            offset: 12,
            wanted: 40,
            available: 3,
        };
        assert_eq!(
            err.to_string(),
            "unexpected end of input reading part header at offset 12: wanted 40 bytes, 3 available"
        );
    }

    #[test]
    fn test_part_error_keeps_source() {
        let err = Error::Part {
            index: 1,
            source: Box::new(Error::InvalidVarUint { offset: 7 }),
        };
        assert_eq!(err.to_string(), "decode part 1: invalid var uint at offset 7");
        assert!(std::error::Error::source(&err).is_some());
        assert!(!err.is_truncation());
    }

    #[test]
    fn test_is_truncation_through_part() {
        let err = Error::Part {
            index: 0,
            source: Box::new(Error::Truncated {
                context: "part data",
                offset: 0,
                wanted: 2,
                available: 1,
            }),
        };
        assert!(err.is_truncation());
    }
}
