//! # wapmms-pdu
//!
//! Decoder for binary MMS PDUs as delivered in WAP Push messages
//! (OMA/WAP-209 message encapsulation on top of the WSP encoding rules).
//!
//! ## Features
//!
//! - **Headers**: every MMS 1.1 header field with its typed value
//! - **Multipart bodies**: parts with content type, headers, filename and raw payload
//! - **WSP primitives**: uintvar, value-length, short/long integers, quoted and
//!   charset-tagged strings, well-known content types
//! - **Bounds checked**: every read is checked and errors carry absolute offsets
//!
//! ## Quick Start
//!
//! ```
//! use wapmms_pdu::{Message, MessageType};
//!
//! // m-notification-ind, transaction "abc", MMS 1.0, text/plain, no parts
//! let pdu = [0x8c, 0x82, 0x98, b'a', b'b', b'c', 0x00, 0x8d, 0x90, 0x84, 0x83, 0x00];
//!
//! let message = Message::decode(&pdu)?;
//! assert_eq!(message.message_type(), Some(MessageType::NotificationInd));
//! assert_eq!(message.transaction_id(), Some("abc"));
//! assert_eq!(message.content_type(), Some("text/plain"));
//! assert!(message.parts.is_empty());
//! # Ok::<(), wapmms_pdu::Error>(())
//! ```
//!
//! The lower-level decoders operate on a [`ByteCursor`] and can be used to
//! decode individual header values or a body on its own:
//!
//! ```
//! use wapmms_pdu::ByteCursor;
//!
//! let mut cursor = ByteCursor::new(&[0x81, 0x00]);
//! assert_eq!(cursor.var_uint()?, 128);
//! # Ok::<(), wapmms_pdu::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod content_type;
mod cursor;
mod error;
mod field;
mod header;
mod message;
mod part;
mod primitive;
mod value;

pub mod tables;

pub use content_type::{
    decode_content_type_params, decode_content_type_value, ContentTypeValue, Params,
    WellKnownParam,
};
pub use cursor::ByteCursor;
pub use error::{Error, Result};
pub use field::FieldTag;
pub use header::{decode_headers, HeaderBlock, HeaderFields, INSERT_ADDRESS};
pub use message::{decode, Message};
pub use part::{
    decode_body, Part, PartDispositionType, PartHeaderField, CONTENT_DISPOSITION, CONTENT_TYPE,
};
pub use primitive::{ANY_CHARSET, LENGTH_QUOTE};
pub use value::{
    HeaderValue, MessageType, Priority, ReadStatus, ReplyCharging, ResponseStatus,
    SenderVisibility, Status, TimeValue,
};
