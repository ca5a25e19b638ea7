//! Decoded header values.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};

/// Value of one header field occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum HeaderValue {
    /// Text (addresses, subject, identifiers, version, class).
    Text(String),
    /// Yes/No flag.
    Boolean(bool),
    /// Unsigned quantity such as a message size.
    UnsignedInteger(u64),
    /// Calendar time.
    AbsoluteTime(DateTime<Utc>),
    /// Time given either as a date or as an offset from now.
    RelativeOrAbsoluteTime(TimeValue),
    /// X-Mms-Message-Type.
    MessageType(MessageType),
    /// X-Mms-Priority.
    Priority(Priority),
    /// X-Mms-Response-Status.
    ResponseStatus(ResponseStatus),
    /// X-Mms-Sender-Visibility.
    SenderVisibility(SenderVisibility),
    /// X-Mms-Status.
    Status(Status),
    /// X-Mms-Read-Status.
    ReadStatus(ReadStatus),
    /// X-Mms-Reply-Charging.
    ReplyCharging(ReplyCharging),
}

impl HeaderValue {
    /// Returns the text if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the flag if this is a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the number if this is an unsigned integer value.
    #[must_use]
    pub const fn as_u64(&self) -> Option<u64> {
        match self {
            Self::UnsignedInteger(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::UnsignedInteger(value) => write!(f, "{value}"),
            Self::AbsoluteTime(time) => f.write_str(&time.to_rfc3339_opts(SecondsFormat::Secs, true)),
            Self::RelativeOrAbsoluteTime(time) => write!(f, "{time}"),
            Self::MessageType(value) => write!(f, "{value}"),
            Self::Priority(value) => write!(f, "{value}"),
            Self::ResponseStatus(value) => write!(f, "{value}"),
            Self::SenderVisibility(value) => write!(f, "{value}"),
            Self::Status(value) => write!(f, "{value}"),
            Self::ReadStatus(value) => write!(f, "{value}"),
            Self::ReplyCharging(value) => write!(f, "{value}"),
        }
    }
}

/// Delivery-Time, Expiry and Reply-Charging-Deadline value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TimeValue {
    /// A point in time.
    Absolute(DateTime<Utc>),
    /// An interval counted from the time the message was received.
    Relative(Duration),
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute(time) => f.write_str(&time.to_rfc3339_opts(SecondsFormat::Secs, true)),
            Self::Relative(duration) => {
                let secs = duration.as_secs();
                let (hours, minutes, seconds) = (secs / 3600, secs % 3600 / 60, secs % 60);
                if hours > 0 {
                    write!(f, "{hours}h{minutes}m{seconds}s")
                } else if minutes > 0 {
                    write!(f, "{minutes}m{seconds}s")
                } else {
                    write!(f, "{seconds}s")
                }
            }
        }
    }
}

/// X-Mms-Message-Type values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MessageType {
    /// m-send-req
    SendReq,
    /// m-send-conf
    SendConf,
    /// m-notification-ind
    NotificationInd,
    /// m-notifyresp-ind
    NotifyRespInd,
    /// m-retrieve-conf
    RetrieveConf,
    /// m-acknowledge-ind
    AcknowledgeInd,
    /// m-delivery-ind
    DeliveryInd,
    /// Any value outside 128-134.
    Unknown(u8),
}

impl From<u8> for MessageType {
    fn from(value: u8) -> Self {
        match value {
            128 => Self::SendReq,
            129 => Self::SendConf,
            130 => Self::NotificationInd,
            131 => Self::NotifyRespInd,
            132 => Self::RetrieveConf,
            133 => Self::AcknowledgeInd,
            134 => Self::DeliveryInd,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SendReq => f.write_str("m-send-req"),
            Self::SendConf => f.write_str("m-send-conf"),
            Self::NotificationInd => f.write_str("m-notification-ind"),
            Self::NotifyRespInd => f.write_str("m-notifyresp-ind"),
            Self::RetrieveConf => f.write_str("m-retrieve-conf"),
            Self::AcknowledgeInd => f.write_str("m-acknowledge-ind"),
            Self::DeliveryInd => f.write_str("m-delivery-ind"),
            Self::Unknown(value) => write!(f, "unknown message type code {value}"),
        }
    }
}

/// X-Mms-Priority values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Priority {
    /// Low
    Low,
    /// Normal (129). Rendered "normal" as in WAP-209; some decoders print
    /// "medium" for the same code.
    Normal,
    /// High
    High,
    /// Unrecognised value.
    Unknown(u8),
}

impl From<u8> for Priority {
    fn from(value: u8) -> Self {
        match value {
            128 => Self::Low,
            129 => Self::Normal,
            130 => Self::High,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => f.write_str("low"),
            Self::Normal => f.write_str("normal"),
            Self::High => f.write_str("high"),
            Self::Unknown(value) => write!(f, "unknown priority code {value}"),
        }
    }
}

/// X-Mms-Response-Status values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ResponseStatus {
    /// Ok
    Ok,
    /// Error-unspecified
    ErrorUnspecified,
    /// Error-service-denied
    ErrorServiceDenied,
    /// Error-message-format-corrupt
    ErrorMessageFormatCorrupt,
    /// Error-sending-address-unresolved
    ErrorSendingAddressUnresolved,
    /// Error-message-not-found
    ErrorMessageNotFound,
    /// Error-network-problem
    ErrorNetworkProblem,
    /// Error-content-not-accepted
    ErrorContentNotAccepted,
    /// Error-unsupported-message
    ErrorUnsupportedMessage,
    /// Unrecognised value.
    Unknown(u8),
}

impl From<u8> for ResponseStatus {
    fn from(value: u8) -> Self {
        match value {
            128 => Self::Ok,
            129 => Self::ErrorUnspecified,
            130 => Self::ErrorServiceDenied,
            131 => Self::ErrorMessageFormatCorrupt,
            132 => Self::ErrorSendingAddressUnresolved,
            133 => Self::ErrorMessageNotFound,
            134 => Self::ErrorNetworkProblem,
            135 => Self::ErrorContentNotAccepted,
            136 => Self::ErrorUnsupportedMessage,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Ok => "Ok",
            Self::ErrorUnspecified => "Error-unspecified",
            Self::ErrorServiceDenied => "Error-service-denied",
            Self::ErrorMessageFormatCorrupt => "Error-message-format-corrupt",
            Self::ErrorSendingAddressUnresolved => "Error-sending-address-unresolved",
            Self::ErrorMessageNotFound => "Error-message-not-found",
            Self::ErrorNetworkProblem => "Error-network-problem",
            Self::ErrorContentNotAccepted => "Error-content-not-accepted",
            Self::ErrorUnsupportedMessage => "Error-unsupported-message",
            Self::Unknown(value) => return write!(f, "unknown response status code {value}"),
        };
        f.write_str(text)
    }
}

/// X-Mms-Sender-Visibility values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SenderVisibility {
    /// Hide
    Hide,
    /// Show
    Show,
    /// Unrecognised value.
    Unknown(u8),
}

impl From<u8> for SenderVisibility {
    fn from(value: u8) -> Self {
        match value {
            128 => Self::Hide,
            129 => Self::Show,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for SenderVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hide => f.write_str("hide"),
            Self::Show => f.write_str("show"),
            Self::Unknown(value) => write!(f, "unknown sender visibility code {value}"),
        }
    }
}

/// X-Mms-Status values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Status {
    /// Expired
    Expired,
    /// Retrieved
    Retrieved,
    /// Rejected
    Rejected,
    /// Deferred
    Deferred,
    /// Unrecognised
    Unrecognised,
    /// Indeterminate
    Indeterminate,
    /// Forwarded
    Forwarded,
    /// Unreachable
    Unreachable,
    /// Value outside the table.
    Unknown(u8),
}

impl From<u8> for Status {
    fn from(value: u8) -> Self {
        match value {
            128 => Self::Expired,
            129 => Self::Retrieved,
            130 => Self::Rejected,
            131 => Self::Deferred,
            132 => Self::Unrecognised,
            133 => Self::Indeterminate,
            134 => Self::Forwarded,
            135 => Self::Unreachable,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Expired => "expired",
            Self::Retrieved => "retrieved",
            Self::Rejected => "rejected",
            Self::Deferred => "deferred",
            Self::Unrecognised => "unrecognised",
            Self::Indeterminate => "indeterminate",
            Self::Forwarded => "forwarded",
            Self::Unreachable => "unreachable",
            Self::Unknown(value) => return write!(f, "unknown status code {value}"),
        };
        f.write_str(text)
    }
}

/// X-Mms-Read-Status values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ReadStatus {
    /// Read
    Read,
    /// Deleted without being read
    DeletedWithoutBeingRead,
    /// Unrecognised value.
    Unknown(u8),
}

impl From<u8> for ReadStatus {
    fn from(value: u8) -> Self {
        match value {
            128 => Self::Read,
            129 => Self::DeletedWithoutBeingRead,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for ReadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => f.write_str("read"),
            Self::DeletedWithoutBeingRead => f.write_str("deleted-without-being-read"),
            Self::Unknown(value) => write!(f, "unknown read status code {value}"),
        }
    }
}

/// X-Mms-Reply-Charging values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ReplyCharging {
    /// Requested
    Requested,
    /// Requested text only
    RequestedTextOnly,
    /// Accepted
    Accepted,
    /// Accepted text only
    AcceptedTextOnly,
    /// Unrecognised value.
    Unknown(u8),
}

impl From<u8> for ReplyCharging {
    fn from(value: u8) -> Self {
        match value {
            128 => Self::Requested,
            129 => Self::RequestedTextOnly,
            130 => Self::Accepted,
            131 => Self::AcceptedTextOnly,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for ReplyCharging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Requested => f.write_str("requested"),
            Self::RequestedTextOnly => f.write_str("requested-text-only"),
            Self::Accepted => f.write_str("accepted"),
            Self::AcceptedTextOnly => f.write_str("accepted-text-only"),
            Self::Unknown(value) => write!(f, "unknown reply charging code {value}"),
        }
    }
}
