//! Multipart body decoding (WAP-230 section 8.5).

use std::collections::BTreeMap;
use std::fmt;

use crate::content_type::{
    decode_content_type_params, decode_content_type_value, WellKnownParam,
};
use crate::cursor::ByteCursor;
use crate::{Error, Result};

/// Part header key for the part's content type.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Part header key for both Content-Disposition encodings.
pub const CONTENT_DISPOSITION: &str = "Content-Disposition";

/// One entry of a multipart body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Part {
    /// Filename from the Content-Disposition header, or empty.
    pub filename: String,
    /// Media type of the payload.
    pub content_type: String,
    /// Part headers by name.
    pub headers: BTreeMap<String, String>,
    /// Raw payload.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "size", serialize_with = "serialize_len")
    )]
    pub data: Vec<u8>,
}

impl Part {
    /// Returns true if the payload is text.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.content_type
            .get(..5)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("text/"))
    }

    /// Returns the payload as text, if this is a text part.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.is_text()
            .then(|| String::from_utf8_lossy(&self.data).into_owned())
    }

    /// Returns the Content-Disposition header.
    #[must_use]
    pub fn disposition(&self) -> Option<&str> {
        self.headers.get(CONTENT_DISPOSITION).map(String::as_str)
    }

    /// Returns a header by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

#[cfg(feature = "serde")]
#[allow(clippy::ptr_arg)]
fn serialize_len<S: serde::Serializer>(
    data: &Vec<u8>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(data.len() as u64)
}

/// Well-known part header field codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartHeaderField {
    /// Content-Type (0x91).
    ContentType,
    /// Content-Location (0x8E).
    ContentLocation,
    /// Content-ID (0xC0).
    ContentId,
    /// Content-Disposition, WSP 1.1 encoding (0xAE).
    DepContentDisposition,
    /// Content-Disposition (0xC5).
    ContentDisposition,
    /// Content-Transfer-Encoding (0xC8).
    ContentTransferEncoding,
    /// Any other code.
    Unknown(u8),
}

impl From<u8> for PartHeaderField {
    fn from(code: u8) -> Self {
        match code {
            0x91 => Self::ContentType,
            0x8e => Self::ContentLocation,
            0xc0 => Self::ContentId,
            0xae => Self::DepContentDisposition,
            0xc5 => Self::ContentDisposition,
            0xc8 => Self::ContentTransferEncoding,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for PartHeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContentType => f.write_str(CONTENT_TYPE),
            Self::ContentLocation => f.write_str("Content-Location"),
            Self::ContentId => f.write_str("Content-ID"),
            Self::DepContentDisposition | Self::ContentDisposition => {
                f.write_str(CONTENT_DISPOSITION)
            }
            Self::ContentTransferEncoding => f.write_str("Content-Transfer-Encoding"),
            Self::Unknown(code) => write!(f, "unknown part header code {code}"),
        }
    }
}

/// Disposition token of a Content-Disposition header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartDispositionType {
    /// Form-data (128).
    FormData,
    /// Attachment (129).
    Attachment,
    /// Inline (130).
    Inline,
    /// Any other token.
    Unknown(u8),
}

impl From<u8> for PartDispositionType {
    fn from(code: u8) -> Self {
        match code {
            128 => Self::FormData,
            129 => Self::Attachment,
            130 => Self::Inline,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for PartDispositionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FormData => f.write_str("form-data"),
            Self::Attachment => f.write_str("attachment"),
            Self::Inline => f.write_str("inline"),
            Self::Unknown(code) => write!(f, "unknown disposition code {code}"),
        }
    }
}

/// Decodes a multipart body.
///
/// ```text
/// Multipart = Entries *Entry
/// Entry = HeadersLen DataLen ContentType Headers Data
/// ```
///
/// Empty input is a body with no parts. Bytes after the last declared part
/// are ignored.
pub fn decode_body(cursor: &mut ByteCursor<'_>) -> Result<Vec<Part>> {
    if cursor.is_eof() {
        return Ok(Vec::new());
    }

    let count = cursor.var_uint()?;
    // Each entry takes at least three bytes; don't trust the count for capacity.
    let capacity = usize::try_from(count)
        .unwrap_or(usize::MAX)
        .min(cursor.remaining_len() / 3);
    let mut parts = Vec::with_capacity(capacity);

    for index in 0..count {
        let part = decode_part(cursor).map_err(|source| Error::Part {
            index,
            source: Box::new(source),
        })?;
        tracing::debug!(
            index,
            content_type = %part.content_type,
            filename = %part.filename,
            size = part.data.len(),
            "decoded part"
        );
        parts.push(part);
    }

    if !cursor.is_eof() {
        tracing::trace!(remaining = cursor.remaining_len(), "ignoring bytes after last part");
    }

    Ok(parts)
}

/// Decodes one multipart entry.
fn decode_part(cursor: &mut ByteCursor<'_>) -> Result<Part> {
    let header_len = cursor.var_uint_len()?;
    let data_len = cursor.var_uint_len()?;
    let mut headers = cursor.sub_cursor(header_len, "part header")?;
    let data = cursor.read_exact(data_len, "part data")?;

    let content_type = decode_content_type_value(&mut headers)?;
    let mut part = Part {
        content_type: content_type.media_type,
        data: data.to_vec(),
        ..Part::default()
    };

    for (param, value) in content_type.params {
        let key = match param {
            WellKnownParam::Type => CONTENT_TYPE,
            WellKnownParam::Name => "Name",
            WellKnownParam::Charset => "Character-Set",
            WellKnownParam::Start => "Start",
            _ => continue,
        };
        part.headers.insert(key.to_string(), value);
    }

    decode_part_headers(&mut headers, &mut part)?;
    Ok(part)
}

/// Decodes the headers following a part's content type.
///
/// A byte above 127 is a well-known header code; anything else starts a
/// textual name/value pair.
fn decode_part_headers(cursor: &mut ByteCursor<'_>, part: &mut Part) -> Result<()> {
    while let Some(byte) = cursor.peek() {
        if byte <= 127 {
            let name = cursor.text_string()?;
            let value = cursor.text_string()?;
            part.headers.insert(name, value);
            continue;
        }

        let offset = cursor.offset();
        cursor.advance();
        let field = PartHeaderField::from(byte);
        match field {
            PartHeaderField::ContentLocation
            | PartHeaderField::ContentId
            | PartHeaderField::ContentTransferEncoding => {
                part.headers.insert(field.to_string(), cursor.text_string()?);
            }
            PartHeaderField::ContentType => {
                let value = decode_content_type_value(cursor)?;
                part.headers
                    .entry(CONTENT_TYPE.to_string())
                    .or_insert(value.media_type);
            }
            PartHeaderField::ContentDisposition | PartHeaderField::DepContentDisposition => {
                let (disposition, filename) = decode_disposition(cursor)?;
                part.headers.insert(CONTENT_DISPOSITION.to_string(), disposition);
                if let Some(filename) = filename {
                    part.filename = filename;
                }
            }
            PartHeaderField::Unknown(code) => {
                return Err(Error::UnknownPartHeader { code, offset });
            }
        }
    }
    Ok(())
}

/// Decodes a Content-Disposition value, returning the disposition and the
/// Filename parameter.
///
/// ```text
/// Content-disposition-value = Value-length Disposition *(Parameter)
/// Disposition = Form-data | Attachment | Inline | Token-text
/// ```
fn decode_disposition(cursor: &mut ByteCursor<'_>) -> Result<(String, Option<String>)> {
    let len = cursor.value_length()?;
    let mut block = cursor.sub_cursor(len, "content disposition")?;

    let token = block.peek_byte("content disposition")?;
    let disposition = if token > 127 {
        block.advance();
        PartDispositionType::from(token).to_string()
    } else {
        block.text_string()?
    };

    let mut params = decode_content_type_params(&mut block)?;
    Ok((disposition, params.remove(&WellKnownParam::Filename)))
}
