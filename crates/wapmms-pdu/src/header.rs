//! MMS PDU header decoding (WAP-209 section 7).
//!
//! The header section is a sequence of `(field tag, value)` pairs. Each tag
//! selects the grammar of its value, so an unrecognised tag cannot be
//! skipped and aborts the decode. Content-Type is always the last field:
//! once it has been decoded the body follows immediately.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::content_type::{decode_content_type_value, Params};
use crate::cursor::ByteCursor;
use crate::field::FieldTag;
use crate::value::{
    HeaderValue, MessageType, Priority, ReadStatus, ReplyCharging, ResponseStatus,
    SenderVisibility, Status, TimeValue,
};
use crate::{Error, Result};

/// Decoded header fields. Repeated fields keep their order of appearance.
pub type HeaderFields = BTreeMap<FieldTag, Vec<HeaderValue>>;

/// Text recorded for a From value that asks the relay to insert the address.
pub const INSERT_ADDRESS: &str = "<insert-address-token>";

/// Result of decoding the header section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderBlock {
    /// Field values by tag.
    pub fields: HeaderFields,
    /// Parameters of the Content-Type field, if it had any.
    pub content_type_params: Params,
}

/// One step of the header loop.
enum Field {
    /// A field and its value.
    Value(FieldTag, HeaderValue),
    /// A recognised field whose value is not kept.
    Discarded(FieldTag),
    /// Content-Type, the terminal field.
    ContentType(String, Params),
    /// End of the header section.
    End,
}

/// Decodes header fields until Content-Type, a zero tag, or end of input.
///
/// End of input between two fields ends the header section normally; end of
/// input inside a value is a truncation error.
pub fn decode_headers(cursor: &mut ByteCursor<'_>) -> Result<HeaderBlock> {
    let mut block = HeaderBlock::default();

    loop {
        match next_field(cursor)? {
            Field::Value(tag, value) => {
                tracing::trace!(field = %tag, %value, "header field");
                block.fields.entry(tag).or_default().push(value);
            }
            Field::Discarded(tag) => {
                tracing::trace!(field = %tag, "header field discarded");
            }
            Field::ContentType(media_type, params) => {
                tracing::trace!(content_type = %media_type, "header section complete");
                block
                    .fields
                    .entry(FieldTag::ContentType)
                    .or_default()
                    .push(HeaderValue::Text(media_type));
                block.content_type_params = params;
                break;
            }
            Field::End => break,
        }
    }

    Ok(block)
}

/// Reads the next tag and its value.
fn next_field(cursor: &mut ByteCursor<'_>) -> Result<Field> {
    let Some(tag_byte) = cursor.peek() else {
        return Ok(Field::End);
    };
    let offset = cursor.offset();
    let code = cursor.short_integer()?;
    if code == 0 {
        return Ok(Field::End);
    }
    let tag = FieldTag::from_code(code).ok_or(Error::UnknownField {
        tag: tag_byte,
        offset,
    })?;

    let value = match tag {
        FieldTag::Bcc
        | FieldTag::Cc
        | FieldTag::ResponseText
        | FieldTag::RetrieveText
        | FieldTag::Subject
        | FieldTag::To => HeaderValue::Text(cursor.encoded_string_value()?),
        FieldTag::From => HeaderValue::Text(decode_from(cursor)?),
        FieldTag::DeliveryReport | FieldTag::ReadReply | FieldTag::ReportAllowed => {
            HeaderValue::Boolean(cursor.boolean()?)
        }
        FieldTag::ContentType => {
            let value = decode_content_type_value(cursor)?;
            return Ok(Field::ContentType(value.media_type, value.params));
        }
        FieldTag::Date => HeaderValue::AbsoluteTime(decode_date(cursor)?),
        FieldTag::DeliveryTime | FieldTag::Expiry | FieldTag::ReplyChargingDeadline => {
            HeaderValue::RelativeOrAbsoluteTime(decode_relative_or_absolute_time(cursor)?)
        }
        FieldTag::MessageSize | FieldTag::ReplyChargingSize => {
            HeaderValue::UnsignedInteger(cursor.long_integer()?)
        }
        FieldTag::MessageClass => HeaderValue::Text(decode_message_class(cursor)?),
        FieldTag::MessageId
        | FieldTag::ContentLocation
        | FieldTag::TransactionId
        | FieldTag::ReplyChargingId => HeaderValue::Text(cursor.text_string()?),
        FieldTag::MessageType => {
            HeaderValue::MessageType(MessageType::from(cursor.read_byte("message type")?))
        }
        FieldTag::MmsVersion => HeaderValue::Text(decode_version(cursor)?),
        FieldTag::Priority => HeaderValue::Priority(Priority::from(cursor.read_byte("priority")?)),
        FieldTag::ResponseStatus => {
            HeaderValue::ResponseStatus(ResponseStatus::from(cursor.read_byte("response status")?))
        }
        FieldTag::SenderVisibility => HeaderValue::SenderVisibility(SenderVisibility::from(
            cursor.read_byte("sender visibility")?,
        )),
        FieldTag::Status => HeaderValue::Status(Status::from(cursor.read_byte("status")?)),
        FieldTag::ReadStatus => {
            HeaderValue::ReadStatus(ReadStatus::from(cursor.read_byte("read status")?))
        }
        FieldTag::ReplyCharging => {
            HeaderValue::ReplyCharging(ReplyCharging::from(cursor.read_byte("reply charging")?))
        }
        FieldTag::RetrieveStatus => {
            cursor.read_byte("retrieve status")?;
            return Ok(Field::Discarded(tag));
        }
    };

    Ok(Field::Value(tag, value))
}

/// Decodes a From value (WAP-209 section 7.2.11).
///
/// ```text
/// From-value = Value-length (Address-present-token Encoded-string-value | Insert-address-token)
/// Address-present-token = <Octet 128>
/// Insert-address-token = <Octet 129>
/// ```
fn decode_from(cursor: &mut ByteCursor<'_>) -> Result<String> {
    const ADDRESS_PRESENT: u8 = 128;
    const INSERT_ADDRESS_TOKEN: u8 = 129;

    let offset = cursor.offset();
    let len = cursor.value_length()?;
    let mut block = cursor.sub_cursor(len, "from")?;
    match block.advance() {
        Some(ADDRESS_PRESENT) => block.encoded_string_value(),
        Some(INSERT_ADDRESS_TOKEN) => Ok(INSERT_ADDRESS.to_string()),
        Some(token) => Err(Error::InvalidFrom {
            offset,
            reason: format!("unknown address token {token:#04x}"),
        }),
        None => Err(Error::InvalidFrom {
            offset,
            reason: "empty value".to_string(),
        }),
    }
}

/// Decodes a `Date-value`: a long integer of seconds since the Unix epoch.
fn decode_date(cursor: &mut ByteCursor<'_>) -> Result<DateTime<Utc>> {
    let seconds = cursor.long_integer()?;
    Ok(timestamp(seconds))
}

/// Converts epoch seconds, clamping values past the calendar range to the
/// latest representable time.
fn timestamp(seconds: u64) -> DateTime<Utc> {
    i64::try_from(seconds)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(|| {
            tracing::trace!(seconds, "timestamp out of range, clamped");
            DateTime::<Utc>::MAX_UTC
        })
}

/// Decodes a Delivery-Time or Expiry value (WAP-209 section 7.2.7).
///
/// ```text
/// Delivery-time-value = Value-length (Absolute-token Date-value | Relative-token Delta-seconds-value)
/// Absolute-token = <Octet 128>
/// Relative-token = <Octet 129>
/// ```
fn decode_relative_or_absolute_time(cursor: &mut ByteCursor<'_>) -> Result<TimeValue> {
    const ABSOLUTE: u8 = 128;
    const RELATIVE: u8 = 129;

    let len = cursor.value_length()?;
    let mut block = cursor.sub_cursor(len, "time value")?;
    let token = block.read_byte("time token")?;
    let offset = block.offset() - 1;
    let value = block.long_integer()?;

    match token {
        ABSOLUTE => Ok(TimeValue::Absolute(timestamp(value))),
        RELATIVE => Ok(TimeValue::Relative(Duration::from_secs(value))),
        _ => Err(Error::InvalidTimeToken { offset, token }),
    }
}

/// Decodes a Message-Class value (WAP-209 section 7.2.12).
///
/// ```text
/// Message-class-value = Class-identifier | Token-text
/// Class-identifier = Personal | Advertisement | Informational | Auto
/// ```
fn decode_message_class(cursor: &mut ByteCursor<'_>) -> Result<String> {
    let byte = cursor.peek_byte("message class")?;
    if byte < 127 {
        return cursor.text_string();
    }
    cursor.advance();
    let class = match byte {
        128 => "personal",
        129 => "advertisement",
        130 => "informational",
        131 => "auto",
        other => return Ok(format!("unknown message class code {other}")),
    };
    Ok(class.to_string())
}

/// Decodes an MMS-Version value.
///
/// The three bits above the low nibble are the major version, the low nibble
/// the minor version; a minor of 15 means only the major version was given.
fn decode_version(cursor: &mut ByteCursor<'_>) -> Result<String> {
    let value = cursor.short_integer()?;
    let major = (value & 0x70) >> 4;
    let minor = match value & 0x0f {
        15 => 0,
        minor => minor,
    };
    Ok(format!("{major}.{minor}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> Result<HeaderBlock> {
        decode_headers(&mut ByteCursor::new(bytes))
    }

    fn single(bytes: &[u8], tag: FieldTag) -> HeaderValue {
        let block = decode(bytes).unwrap();
        block.fields[&tag][0].clone()
    }

    #[test]
    fn test_empty_input() {
        let block = decode(&[]).unwrap();
        assert!(block.fields.is_empty());
    }

    #[test]
    fn test_subject_then_end_of_input() {
        let block = decode(b"\x96Hello\0").unwrap();
        assert_eq!(block.fields.len(), 1);
        assert_eq!(
            block.fields[&FieldTag::Subject],
            vec![HeaderValue::Text("Hello".into())]
        );
    }

    #[test]
    fn test_zero_tag_ends_headers() {
        let mut cursor = ByteCursor::new(b"\x96a\0\x80\x96b\0");
        let block = decode_headers(&mut cursor).unwrap();
        assert_eq!(block.fields[&FieldTag::Subject].len(), 1);
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_content_type_is_terminal() {
        let mut cursor = ByteCursor::new(&[0x84, 0x83, 0x96, b'x', 0]);
        let block = decode_headers(&mut cursor).unwrap();
        assert_eq!(
            block.fields[&FieldTag::ContentType],
            vec![HeaderValue::Text("text/plain".into())]
        );
        assert!(!block.fields.contains_key(&FieldTag::Subject));
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_content_type_params_kept() {
        let mut bytes = vec![0x84, 0x00, 0xb3, 0x8a];
        bytes.extend_from_slice(b"<root>\0");
        bytes[1] = u8::try_from(bytes.len() - 2).unwrap();

        let block = decode(&bytes).unwrap();
        assert_eq!(
            block.content_type_params[&crate::WellKnownParam::Start],
            "<root>"
        );
    }

    #[test]
    fn test_unknown_field_is_fatal() {
        let err = decode(&[0x96, b'a', 0, 0xa5, 0x00]).unwrap_err();
        assert!(matches!(err, Error::UnknownField { tag: 0xa5, offset: 3 }));
    }

    #[test]
    fn test_tag_without_high_bit_is_fatal() {
        assert!(matches!(
            decode(&[0x16]),
            Err(Error::Malformed { value: 0x16, .. })
        ));
    }

    #[test]
    fn test_truncated_value() {
        assert!(decode(&[0x96, b'a']).unwrap_err().is_truncation());
        assert!(decode(&[0x8c]).unwrap_err().is_truncation());
    }

    #[test]
    fn test_repeated_to() {
        let block = decode(b"\x97alice\0\x97bob\0").unwrap();
        let to: Vec<_> = block.fields[&FieldTag::To]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(to, ["alice", "bob"]);
    }

    #[test]
    fn test_message_type() {
        assert_eq!(
            single(&[0x8c, 128], FieldTag::MessageType),
            HeaderValue::MessageType(MessageType::SendReq)
        );
        assert_eq!(
            single(&[0x8c, 135], FieldTag::MessageType),
            HeaderValue::MessageType(MessageType::Unknown(135))
        );
    }

    #[test]
    fn test_mms_version() {
        assert_eq!(single(&[0x8d, 0x9f], FieldTag::MmsVersion).to_string(), "1.0");
        assert_eq!(single(&[0x8d, 0x90], FieldTag::MmsVersion).to_string(), "1.0");
        assert_eq!(single(&[0x8d, 0x92], FieldTag::MmsVersion).to_string(), "1.2");
        assert!(decode(&[0x8d, 0x12]).is_err());
    }

    #[test]
    fn test_from_address_present() {
        let mut bytes = vec![0x89, 0x00, 0x80];
        bytes.extend_from_slice(b"+15551234567/TYPE=PLMN\0");
        bytes[1] = u8::try_from(bytes.len() - 2).unwrap();
        assert_eq!(
            single(&bytes, FieldTag::From).to_string(),
            "+15551234567/TYPE=PLMN"
        );
    }

    #[test]
    fn test_from_insert_address() {
        assert_eq!(
            single(&[0x89, 0x01, 0x81], FieldTag::From).to_string(),
            INSERT_ADDRESS
        );
    }

    #[test]
    fn test_from_invalid() {
        assert!(matches!(
            decode(&[0x89, 0x00]),
            Err(Error::InvalidFrom { .. })
        ));
        assert!(matches!(
            decode(&[0x89, 0x01, 0x05]),
            Err(Error::InvalidFrom { .. })
        ));
    }

    #[test]
    fn test_booleans() {
        let block = decode(&[0x86, 0x80, 0x90, 0x81]).unwrap();
        assert_eq!(block.fields[&FieldTag::DeliveryReport][0].as_bool(), Some(true));
        assert_eq!(block.fields[&FieldTag::ReadReply][0].as_bool(), Some(false));
        assert!(decode(&[0x91, 0x05]).is_err());
    }

    #[test]
    fn test_date() {
        let value = single(&[0x85, 0x04, 0x5f, 0x5e, 0x10, 0x00], FieldTag::Date);
        assert_eq!(value.to_string(), "2020-09-13T12:26:40Z");
    }

    #[test]
    fn test_date_past_calendar_range_is_clamped() {
        let bytes = [0x85, 0x08, 0xff, 0, 0, 0, 0, 0, 0, 0, 0x96, b'a', 0];
        let block = decode(&bytes).unwrap();
        assert_eq!(
            block.fields[&FieldTag::Date][0],
            HeaderValue::AbsoluteTime(DateTime::<Utc>::MAX_UTC)
        );
        assert!(block.fields.contains_key(&FieldTag::Subject));
    }

    #[test]
    fn test_delivery_time_past_calendar_range_is_clamped() {
        let bytes = [0x87, 0x0a, 0x80, 0x08, 0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff];
        assert_eq!(
            single(&bytes, FieldTag::DeliveryTime),
            HeaderValue::RelativeOrAbsoluteTime(TimeValue::Absolute(DateTime::<Utc>::MAX_UTC))
        );
    }

    #[test]
    fn test_expiry_relative() {
        let value = single(&[0x88, 0x05, 0x81, 0x03, 0x09, 0x3a, 0x80], FieldTag::Expiry);
        assert_eq!(
            value,
            HeaderValue::RelativeOrAbsoluteTime(TimeValue::Relative(Duration::from_secs(604_800)))
        );
    }

    #[test]
    fn test_delivery_time_absolute() {
        let value = single(
            &[0x87, 0x06, 0x80, 0x04, 0x5f, 0x5e, 0x10, 0x00],
            FieldTag::DeliveryTime,
        );
        assert_eq!(value.to_string(), "2020-09-13T12:26:40Z");
    }

    #[test]
    fn test_time_invalid_token() {
        assert!(matches!(
            decode(&[0x88, 0x03, 0x82, 0x01, 0x10]),
            Err(Error::InvalidTimeToken { token: 0x82, .. })
        ));
    }

    #[test]
    fn test_message_size() {
        assert_eq!(
            single(&[0x8e, 0x02, 0x30, 0x39], FieldTag::MessageSize).as_u64(),
            Some(12345)
        );
    }

    #[test]
    fn test_message_class() {
        assert_eq!(single(&[0x8a, 0x80], FieldTag::MessageClass).to_string(), "personal");
        assert_eq!(single(&[0x8a, 0x83], FieldTag::MessageClass).to_string(), "auto");
        assert_eq!(
            single(b"\x8apromo\0", FieldTag::MessageClass).to_string(),
            "promo"
        );
        assert_eq!(
            single(&[0x8a, 0x90], FieldTag::MessageClass).to_string(),
            "unknown message class code 144"
        );
    }

    #[test]
    fn test_text_fields() {
        let block = decode(b"\x98abc\0\x8bid-1\0\x83http://mmsc/1\0").unwrap();
        assert_eq!(block.fields[&FieldTag::TransactionId][0].as_text(), Some("abc"));
        assert_eq!(block.fields[&FieldTag::MessageId][0].as_text(), Some("id-1"));
        assert_eq!(
            block.fields[&FieldTag::ContentLocation][0].as_text(),
            Some("http://mmsc/1")
        );
    }

    #[test]
    fn test_enum_fields_never_fail_on_value() {
        let block = decode(&[0x8f, 0x01, 0x92, 0xff, 0x94, 0x80, 0x95, 0x86]).unwrap();
        assert_eq!(
            block.fields[&FieldTag::Priority][0],
            HeaderValue::Priority(Priority::Unknown(1))
        );
        assert_eq!(
            block.fields[&FieldTag::ResponseStatus][0],
            HeaderValue::ResponseStatus(ResponseStatus::Unknown(0xff))
        );
        assert_eq!(
            block.fields[&FieldTag::SenderVisibility][0],
            HeaderValue::SenderVisibility(SenderVisibility::Hide)
        );
        assert_eq!(
            block.fields[&FieldTag::Status][0],
            HeaderValue::Status(Status::Forwarded)
        );
    }

    #[test]
    fn test_retrieve_status_discarded() {
        let block = decode(&[0x99, 0x80, 0x96, b'a', 0]).unwrap();
        assert!(!block.fields.contains_key(&FieldTag::RetrieveStatus));
        assert!(block.fields.contains_key(&FieldTag::Subject));
    }

    #[test]
    fn test_reply_charging_fields() {
        let block = decode(&[0x9c, 0x80, 0x9f, 0x01, 0x64, 0x9b, 0x81]).unwrap();
        assert_eq!(
            block.fields[&FieldTag::ReplyCharging][0],
            HeaderValue::ReplyCharging(ReplyCharging::Requested)
        );
        assert_eq!(block.fields[&FieldTag::ReplyChargingSize][0].as_u64(), Some(100));
        assert_eq!(
            block.fields[&FieldTag::ReadStatus][0],
            HeaderValue::ReadStatus(ReadStatus::DeletedWithoutBeingRead)
        );
    }
}
