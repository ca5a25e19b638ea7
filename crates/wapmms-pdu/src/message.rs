//! Decoded MMS message.

use crate::content_type::Params;
use crate::cursor::ByteCursor;
use crate::field::FieldTag;
use crate::header::{decode_headers, HeaderFields};
use crate::part::{decode_body, Part};
use crate::value::{HeaderValue, MessageType};
use crate::Result;

/// A decoded MMS PDU.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Message {
    /// Header values by field, in order of appearance.
    pub headers: HeaderFields,
    /// Parameters of the top-level Content-Type.
    pub content_type_params: Params,
    /// Body parts, empty if the PDU has no body.
    pub parts: Vec<Part>,
}

impl Message {
    /// Decodes a complete MMS PDU.
    ///
    /// # Errors
    ///
    /// Returns an error if the PDU is truncated or malformed. No partial
    /// message is returned.
    pub fn decode(pdu: &[u8]) -> Result<Self> {
        decode(pdu)
    }

    /// Returns all values of a field.
    #[must_use]
    pub fn get(&self, tag: FieldTag) -> &[HeaderValue] {
        self.headers.get(&tag).map_or(&[], Vec::as_slice)
    }

    /// Returns the first value of a field.
    #[must_use]
    pub fn first(&self, tag: FieldTag) -> Option<&HeaderValue> {
        self.get(tag).first()
    }

    /// Returns the message type.
    #[must_use]
    pub fn message_type(&self) -> Option<MessageType> {
        match self.first(FieldTag::MessageType)? {
            HeaderValue::MessageType(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Returns the subject.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.first(FieldTag::Subject)?.as_text()
    }

    /// Returns the sender address.
    #[must_use]
    pub fn from(&self) -> Option<&str> {
        self.first(FieldTag::From)?.as_text()
    }

    /// Returns the transaction ID.
    #[must_use]
    pub fn transaction_id(&self) -> Option<&str> {
        self.first(FieldTag::TransactionId)?.as_text()
    }

    /// Returns the top-level content type.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.first(FieldTag::ContentType)?.as_text()
    }

    /// Returns the first text part.
    #[must_use]
    pub fn text_part(&self) -> Option<&Part> {
        self.parts.iter().find(|part| part.is_text())
    }
}

/// Decodes a complete MMS PDU: the header section followed by the body.
///
/// # Errors
///
/// Returns an error if the PDU is truncated or malformed.
pub fn decode(pdu: &[u8]) -> Result<Message> {
    let mut cursor = ByteCursor::new(pdu);
    let block = decode_headers(&mut cursor)?;
    let parts = decode_body(&mut cursor)?;

    let message = Message {
        headers: block.fields,
        content_type_params: block.content_type_params,
        parts,
    };
    tracing::debug!(
        message_type = ?message.message_type(),
        fields = message.headers.len(),
        parts = message.parts.len(),
        "decoded mms pdu"
    );
    Ok(message)
}
