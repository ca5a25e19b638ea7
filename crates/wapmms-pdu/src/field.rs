//! MMS header field tags (WAP-209 section 7.3, Table 8).

use std::fmt;

/// Top-level MMS header field.
///
/// On the wire a field tag is a short integer: the high bit is set and the
/// low seven bits carry [`FieldTag::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FieldTag {
    /// Bcc.
    Bcc,
    /// Cc.
    Cc,
    /// X-Mms-Content-Location.
    ContentLocation,
    /// Content-Type. Always the last header field.
    ContentType,
    /// Date.
    Date,
    /// X-Mms-Delivery-Report.
    DeliveryReport,
    /// X-Mms-Delivery-Time.
    DeliveryTime,
    /// X-Mms-Expiry.
    Expiry,
    /// From.
    From,
    /// X-Mms-Message-Class.
    MessageClass,
    /// Message-ID.
    MessageId,
    /// X-Mms-Message-Type.
    MessageType,
    /// X-Mms-MMS-Version.
    MmsVersion,
    /// X-Mms-Message-Size.
    MessageSize,
    /// X-Mms-Priority.
    Priority,
    /// X-Mms-Read-Reply.
    ReadReply,
    /// X-Mms-Report-Allowed.
    ReportAllowed,
    /// X-Mms-Response-Status.
    ResponseStatus,
    /// X-Mms-Response-Text.
    ResponseText,
    /// X-Mms-Sender-Visibility.
    SenderVisibility,
    /// X-Mms-Status.
    Status,
    /// Subject.
    Subject,
    /// To.
    To,
    /// X-Mms-Transaction-Id.
    TransactionId,
    /// X-Mms-Retrieve-Status.
    RetrieveStatus,
    /// X-Mms-Retrieve-Text.
    RetrieveText,
    /// X-Mms-Read-Status.
    ReadStatus,
    /// X-Mms-Reply-Charging.
    ReplyCharging,
    /// X-Mms-Reply-Charging-Deadline.
    ReplyChargingDeadline,
    /// X-Mms-Reply-Charging-ID.
    ReplyChargingId,
    /// X-Mms-Reply-Charging-Size.
    ReplyChargingSize,
}

impl FieldTag {
    /// Looks up a field by the low seven bits of its tag byte.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        let tag = match code {
            0x01 => Self::Bcc,
            0x02 => Self::Cc,
            0x03 => Self::ContentLocation,
            0x04 => Self::ContentType,
            0x05 => Self::Date,
            0x06 => Self::DeliveryReport,
            0x07 => Self::DeliveryTime,
            0x08 => Self::Expiry,
            0x09 => Self::From,
            0x0a => Self::MessageClass,
            0x0b => Self::MessageId,
            0x0c => Self::MessageType,
            0x0d => Self::MmsVersion,
            0x0e => Self::MessageSize,
            0x0f => Self::Priority,
            0x10 => Self::ReadReply,
            0x11 => Self::ReportAllowed,
            0x12 => Self::ResponseStatus,
            0x13 => Self::ResponseText,
            0x14 => Self::SenderVisibility,
            0x15 => Self::Status,
            0x16 => Self::Subject,
            0x17 => Self::To,
            0x18 => Self::TransactionId,
            0x19 => Self::RetrieveStatus,
            0x1a => Self::RetrieveText,
            0x1b => Self::ReadStatus,
            0x1c => Self::ReplyCharging,
            0x1d => Self::ReplyChargingDeadline,
            0x1e => Self::ReplyChargingId,
            0x1f => Self::ReplyChargingSize,
            _ => return None,
        };
        Some(tag)
    }

    /// Returns the low seven bits of the tag byte.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Bcc => 0x01,
            Self::Cc => 0x02,
            Self::ContentLocation => 0x03,
            Self::ContentType => 0x04,
            Self::Date => 0x05,
            Self::DeliveryReport => 0x06,
            Self::DeliveryTime => 0x07,
            Self::Expiry => 0x08,
            Self::From => 0x09,
            Self::MessageClass => 0x0a,
            Self::MessageId => 0x0b,
            Self::MessageType => 0x0c,
            Self::MmsVersion => 0x0d,
            Self::MessageSize => 0x0e,
            Self::Priority => 0x0f,
            Self::ReadReply => 0x10,
            Self::ReportAllowed => 0x11,
            Self::ResponseStatus => 0x12,
            Self::ResponseText => 0x13,
            Self::SenderVisibility => 0x14,
            Self::Status => 0x15,
            Self::Subject => 0x16,
            Self::To => 0x17,
            Self::TransactionId => 0x18,
            Self::RetrieveStatus => 0x19,
            Self::RetrieveText => 0x1a,
            Self::ReadStatus => 0x1b,
            Self::ReplyCharging => 0x1c,
            Self::ReplyChargingDeadline => 0x1d,
            Self::ReplyChargingId => 0x1e,
            Self::ReplyChargingSize => 0x1f,
        }
    }

    /// Returns the header name without the `X-Mms-` prefix.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bcc => "Bcc",
            Self::Cc => "Cc",
            Self::ContentLocation => "Content-Location",
            Self::ContentType => "Content-Type",
            Self::Date => "Date",
            Self::DeliveryReport => "Delivery-Report",
            Self::DeliveryTime => "Delivery-Time",
            Self::Expiry => "Expiry",
            Self::From => "From",
            Self::MessageClass => "Message-Class",
            Self::MessageId => "Message-ID",
            Self::MessageType => "Message-Type",
            Self::MmsVersion => "MMS-Version",
            Self::MessageSize => "Message-Size",
            Self::Priority => "Priority",
            Self::ReadReply => "Read-Reply",
            Self::ReportAllowed => "Report-Allowed",
            Self::ResponseStatus => "Response-Status",
            Self::ResponseText => "Response-Text",
            Self::SenderVisibility => "Sender-Visibility",
            Self::Status => "Status",
            Self::Subject => "Subject",
            Self::To => "To",
            Self::TransactionId => "Transaction-ID",
            Self::RetrieveStatus => "Retrieve-Status",
            Self::RetrieveText => "Retrieve-Text",
            Self::ReadStatus => "Read-Status",
            Self::ReplyCharging => "Reply-Charging",
            Self::ReplyChargingDeadline => "Reply-Charging-Deadline",
            Self::ReplyChargingId => "Reply-Charging-ID",
            Self::ReplyChargingSize => "Reply-Charging-Size",
        }
    }
}

impl fmt::Display for FieldTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for code in 0..=0x7f {
            if let Some(tag) = FieldTag::from_code(code) {
                assert_eq!(tag.code(), code);
            }
        }
    }

    #[test]
    fn test_known_range() {
        assert_eq!(FieldTag::from_code(0x00), None);
        assert_eq!(FieldTag::from_code(0x04), Some(FieldTag::ContentType));
        assert_eq!(FieldTag::from_code(0x16), Some(FieldTag::Subject));
        assert_eq!(FieldTag::from_code(0x1f), Some(FieldTag::ReplyChargingSize));
        assert_eq!(FieldTag::from_code(0x20), None);
        assert_eq!(FieldTag::from_code(0x7f), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldTag::MessageType.to_string(), "Message-Type");
        assert_eq!(FieldTag::TransactionId.to_string(), "Transaction-ID");
        assert_eq!(FieldTag::MmsVersion.to_string(), "MMS-Version");
    }
}
