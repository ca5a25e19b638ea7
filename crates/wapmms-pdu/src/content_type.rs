//! Content-type values and their well-known parameters.

use std::collections::BTreeMap;
use std::fmt;

use crate::cursor::ByteCursor;
use crate::tables;
use crate::Result;

/// Well-known parameter codes (WSP Assigned Numbers, Well-Known Parameters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum WellKnownParam {
    /// Q value.
    Q,
    /// Character set.
    Charset,
    /// Level.
    Level,
    /// Type.
    Type,
    /// Name (WSP 1.1 encoding).
    DepName,
    /// Filename (WSP 1.1 encoding).
    DepFilename,
    /// Differences.
    Differences,
    /// Padding.
    Padding,
    /// Type of a multipart/related message.
    CtMrType,
    /// Start (WSP 1.1 encoding).
    DepStart,
    /// Start-info (WSP 1.1 encoding).
    DepStartInfo,
    /// Comment (WSP 1.1 encoding).
    DepComment,
    /// Domain (WSP 1.1 encoding).
    DepDomain,
    /// Max-Age.
    MaxAge,
    /// Path (WSP 1.1 encoding).
    DepPath,
    /// Secure.
    Secure,
    /// SEC.
    Sec,
    /// MAC.
    Mac,
    /// Creation date.
    CreationDate,
    /// Modification date.
    ModificationDate,
    /// Read date.
    ReadDate,
    /// Size.
    Size,
    /// Name.
    Name,
    /// Filename.
    Filename,
    /// Start.
    Start,
    /// Start-info.
    StartInfo,
    /// Comment.
    Comment,
    /// Domain.
    Domain,
    /// Path.
    Path,
    /// Any other code.
    Unknown(u8),
}

impl From<u8> for WellKnownParam {
    fn from(code: u8) -> Self {
        match code {
            0x80 => Self::Q,
            0x81 => Self::Charset,
            0x82 => Self::Level,
            0x83 => Self::Type,
            0x85 => Self::DepName,
            0x86 => Self::DepFilename,
            0x87 => Self::Differences,
            0x88 => Self::Padding,
            0x89 => Self::CtMrType,
            0x8a => Self::DepStart,
            0x8b => Self::DepStartInfo,
            0x8c => Self::DepComment,
            0x8d => Self::DepDomain,
            0x8e => Self::MaxAge,
            0x8f => Self::DepPath,
            0x90 => Self::Secure,
            0x91 => Self::Sec,
            0x92 => Self::Mac,
            0x93 => Self::CreationDate,
            0x94 => Self::ModificationDate,
            0x95 => Self::ReadDate,
            0x96 => Self::Size,
            0x97 => Self::Name,
            0x98 => Self::Filename,
            0x99 => Self::Start,
            0x9a => Self::StartInfo,
            0x9b => Self::Comment,
            0x9c => Self::Domain,
            0x9d => Self::Path,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for WellKnownParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Q => "Q",
            Self::Charset => "Charset",
            Self::Level => "Level",
            Self::Type => "Type",
            Self::DepName | Self::Name => "Name",
            Self::DepFilename | Self::Filename => "Filename",
            Self::Differences => "Differences",
            Self::Padding => "Padding",
            Self::CtMrType => "Type",
            Self::DepStart | Self::Start => "Start",
            Self::DepStartInfo | Self::StartInfo => "Start-info",
            Self::DepComment | Self::Comment => "Comment",
            Self::DepDomain | Self::Domain => "Domain",
            Self::MaxAge => "Max-Age",
            Self::DepPath | Self::Path => "Path",
            Self::Secure => "Secure",
            Self::Sec => "SEC",
            Self::Mac => "MAC",
            Self::CreationDate => "Creation-date",
            Self::ModificationDate => "Modification-date",
            Self::ReadDate => "Read-date",
            Self::Size => "Size",
            Self::Unknown(code) => return write!(f, "unknown parameter code {code}"),
        };
        f.write_str(name)
    }
}

/// Decoded parameters, keyed by their canonical parameter.
pub type Params = BTreeMap<WellKnownParam, String>;

/// A decoded content-type value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTypeValue {
    /// Media type (e.g., "application/vnd.wap.multipart.related").
    pub media_type: String,
    /// Recognised parameters.
    pub params: Params,
}

impl ContentTypeValue {
    /// Returns a parameter value if present.
    #[must_use]
    pub fn param(&self, param: WellKnownParam) -> Option<&str> {
        self.params.get(&param).map(String::as_str)
    }
}

/// Decodes a `Content-type-value`.
///
/// ```text
/// Content-type-value = Constrained-media | Content-general-form
/// Content-general-form = Value-length Media-type
/// Media-type = (Well-known-media | Extension-Media) *(Parameter)
/// ```
///
/// The general form is decoded inside its own bounded block, which the
/// parameter loop must consume completely.
pub fn decode_content_type_value(cursor: &mut ByteCursor<'_>) -> Result<ContentTypeValue> {
    if cursor.peek_byte("content type")? >= 32 {
        return Ok(ContentTypeValue {
            media_type: cursor.constrained_media()?,
            params: Params::new(),
        });
    }

    let len = cursor.value_length()?;
    let mut block = cursor.sub_cursor(len, "content type")?;
    let media_type = block.constrained_media()?;
    let params = decode_content_type_params(&mut block)?;
    block.ensure_consumed("content type parameters")?;

    Ok(ContentTypeValue { media_type, params })
}

/// Decodes parameters until the cursor is exhausted.
///
/// Only Type, Start, Charset, Name and Filename are kept. Other parameters
/// are skipped together with their value.
pub fn decode_content_type_params(cursor: &mut ByteCursor<'_>) -> Result<Params> {
    let mut params = Params::new();

    while let Some(code) = cursor.advance() {
        match WellKnownParam::from(code) {
            WellKnownParam::Type | WellKnownParam::CtMrType => {
                let value = decode_constrained_type(cursor)?;
                params.insert(WellKnownParam::Type, value);
            }
            WellKnownParam::Start | WellKnownParam::DepStart => {
                params.insert(WellKnownParam::Start, cursor.text_string()?);
            }
            WellKnownParam::Charset => {
                if let Some(charset) = decode_charset(cursor)? {
                    params.insert(WellKnownParam::Charset, charset);
                }
            }
            WellKnownParam::Name | WellKnownParam::DepName => {
                params.insert(WellKnownParam::Name, cursor.text_string()?);
            }
            WellKnownParam::Filename | WellKnownParam::DepFilename => {
                params.insert(WellKnownParam::Filename, cursor.text_string()?);
            }
            other => {
                tracing::trace!(param = %other, "skipping content type parameter");
                skip_param_value(cursor, other)?;
            }
        }
    }

    Ok(params)
}

/// Skips the value of a parameter that is not kept.
///
/// Well-known parameters are skipped by their own grammar. Only codes
/// outside the table fall back to the untyped rule.
fn skip_param_value(cursor: &mut ByteCursor<'_>, param: WellKnownParam) -> Result<()> {
    match param {
        // Q-value = 1*2 OCTET, uintvar encoded
        WellKnownParam::Q => {
            cursor.var_uint()?;
        }
        WellKnownParam::Level
        | WellKnownParam::Differences
        | WellKnownParam::Padding
        | WellKnownParam::Sec => {
            if cursor.peek_byte("parameter value")? >= 128 {
                cursor.short_integer()?;
            } else {
                cursor.text_string()?;
            }
        }
        WellKnownParam::Secure => {
            let byte = cursor.read_byte("secure parameter")?;
            if byte != 0 {
                return Err(cursor.malformed("secure parameter", byte));
            }
        }
        WellKnownParam::MaxAge
        | WellKnownParam::CreationDate
        | WellKnownParam::ModificationDate
        | WellKnownParam::ReadDate
        | WellKnownParam::Size => {
            cursor.integer_value()?;
        }
        WellKnownParam::Unknown(_) => cursor.skip_value(),
        _ => {
            cursor.text_string()?;
        }
    }
    Ok(())
}

/// Decodes the value of a Type parameter.
///
/// Unlike a top-level constrained media, an index outside the table is not
/// an error here.
fn decode_constrained_type(cursor: &mut ByteCursor<'_>) -> Result<String> {
    if cursor.peek_byte("type parameter")? < 128 {
        return cursor.text_string();
    }
    let index = cursor.short_integer()?;
    Ok(tables::content_type(index).map_or_else(
        || format!("unknown content type code {index}"),
        str::to_string,
    ))
}

/// Decodes the value of a Charset parameter.
///
/// Returns `None` for an empty inline name.
fn decode_charset(cursor: &mut ByteCursor<'_>) -> Result<Option<String>> {
    let byte = cursor.peek_byte("charset")?;
    let mib_enum = match byte {
        1..=30 => cursor.long_integer()?,
        0 | 31..=126 => {
            let text = cursor.read_until(0, "charset")?;
            if text.is_empty() {
                return Ok(None);
            }
            return Ok(Some(String::from_utf8_lossy(text).into_owned()));
        }
        _ => u64::from(cursor.short_integer()?),
    };
    Ok(Some(tables::charset(mib_enum).map_or_else(
        || format!("unknown charset {mib_enum}"),
        str::to_string,
    )))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_well_known_param_codes() {
        assert_eq!(WellKnownParam::from(0x81), WellKnownParam::Charset);
        assert_eq!(WellKnownParam::from(0x89), WellKnownParam::CtMrType);
        assert_eq!(WellKnownParam::from(0x98), WellKnownParam::Filename);
        assert_eq!(WellKnownParam::from(0x84), WellKnownParam::Unknown(0x84));
    }

    #[test]
    fn test_well_known_param_display() {
        assert_eq!(WellKnownParam::Charset.to_string(), "Charset");
        assert_eq!(WellKnownParam::DepName.to_string(), "Name");
        assert_eq!(
            WellKnownParam::Unknown(0xfe).to_string(),
            "unknown parameter code 254"
        );
    }

    #[test]
    fn test_short_form() {
        let mut cursor = ByteCursor::new(&[0x9e, 0xff]);
        let value = decode_content_type_value(&mut cursor).unwrap();
        assert_eq!(value.media_type, "image/jpeg");
        assert!(value.params.is_empty());
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_short_form_text() {
        let mut cursor = ByteCursor::new(b"application/smil\0");
        let value = decode_content_type_value(&mut cursor).unwrap();
        assert_eq!(value.media_type, "application/smil");
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_general_form_multipart_related() {
        // multipart/related; type=application/smil; start=<0000>
        let mut bytes = vec![0x1b, 0xb3, 0x89];
        bytes.extend_from_slice(b"application/smil\0");
        bytes.push(0x8a);
        bytes.extend_from_slice(b"<0000>\0");
        assert_eq!(usize::from(bytes[0]), bytes.len() - 1);

        let mut cursor = ByteCursor::new(&bytes);
        let value = decode_content_type_value(&mut cursor).unwrap();
        assert_eq!(value.media_type, "application/vnd.wap.multipart.related");
        assert_eq!(value.param(WellKnownParam::Type), Some("application/smil"));
        assert_eq!(value.param(WellKnownParam::Start), Some("<0000>"));
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_general_form_charset_and_name() {
        // text/plain; charset=utf-8; name=a.txt
        let mut bytes = vec![0x0a, 0x83, 0x81, 0xea, 0x85];
        bytes.extend_from_slice(b"a.txt\0");
        bytes[0] = u8::try_from(bytes.len() - 1).unwrap();

        let value = decode_content_type_value(&mut ByteCursor::new(&bytes)).unwrap();
        assert_eq!(value.media_type, "text/plain");
        assert_eq!(value.param(WellKnownParam::Charset), Some("utf-8"));
        assert_eq!(value.param(WellKnownParam::Name), Some("a.txt"));
    }

    #[test]
    fn test_general_form_past_end() {
        let mut cursor = ByteCursor::new(&[0x05, 0x83]);
        assert!(decode_content_type_value(&mut cursor)
            .unwrap_err()
            .is_truncation());
    }

    #[test]
    fn test_params_inline_charset() {
        let mut cursor = ByteCursor::new(b"\x81us-ascii\0");
        let params = decode_content_type_params(&mut cursor).unwrap();
        assert_eq!(params.get(&WellKnownParam::Charset).unwrap(), "us-ascii");
    }

    #[test]
    fn test_params_long_charset() {
        let mut cursor = ByteCursor::new(&[0x81, 0x02, 0x03, 0xe8]);
        let params = decode_content_type_params(&mut cursor).unwrap();
        assert_eq!(
            params.get(&WellKnownParam::Charset).unwrap(),
            "iso-10646-ucs-2"
        );
    }

    #[test]
    fn test_params_unknown_charset() {
        let mut cursor = ByteCursor::new(&[0x81, 0xff]);
        let params = decode_content_type_params(&mut cursor).unwrap();
        assert_eq!(
            params.get(&WellKnownParam::Charset).unwrap(),
            "unknown charset 127"
        );
    }

    #[test]
    fn test_params_skip_q_then_name() {
        let mut bytes = vec![0x80, 0x0b, 0x97];
        bytes.extend_from_slice(b"a.txt\0");

        let params = decode_content_type_params(&mut ByteCursor::new(&bytes)).unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params.get(&WellKnownParam::Name).unwrap(), "a.txt");
    }

    #[test]
    fn test_params_skip_by_grammar() {
        // Q (two octet uintvar), Level text, Padding short, Secure no-value,
        // Size short, Max-Age long, Read-date long, then Filename
        let mut bytes = vec![0x80, 0x83, 0x31, 0x82];
        bytes.extend_from_slice(b"1.0\0");
        bytes.extend_from_slice(&[0x88, 0x82, 0x90, 0x00, 0x96, 0x8a]);
        bytes.extend_from_slice(&[0x8e, 0x02, 0x0e, 0x10]);
        bytes.extend_from_slice(&[0x95, 0x04, 0x5f, 0x5e, 0x10, 0x00]);
        bytes.push(0x98);
        bytes.extend_from_slice(b"b.jpg\0");

        let mut cursor = ByteCursor::new(&bytes);
        let params = decode_content_type_params(&mut cursor).unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params.get(&WellKnownParam::Filename).unwrap(), "b.jpg");
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_params_skip_unknown_code() {
        let mut bytes = vec![0xa0, 0x02, 0xaa, 0xbb, 0x97];
        bytes.extend_from_slice(b"c.png\0");

        let params = decode_content_type_params(&mut ByteCursor::new(&bytes)).unwrap();
        assert_eq!(params.get(&WellKnownParam::Name).unwrap(), "c.png");
    }

    #[test]
    fn test_params_secure_with_value_is_error() {
        let err = decode_content_type_params(&mut ByteCursor::new(&[0x90, 0x05])).unwrap_err();
        assert!(matches!(err, Error::Malformed { value: 0x05, .. }));
    }

    #[test]
    fn test_params_empty_inline_charset() {
        let mut cursor = ByteCursor::new(&[0x81, 0x00]);
        let params = decode_content_type_params(&mut cursor).unwrap();
        assert!(params.is_empty());
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_params_iterate_in_code_order() {
        let mut bytes = vec![0x97];
        bytes.extend_from_slice(b"n\0");
        bytes.extend_from_slice(&[0x81, 0xea, 0x89]);
        bytes.extend_from_slice(b"text/plain\0");

        let params = decode_content_type_params(&mut ByteCursor::new(&bytes)).unwrap();
        let keys: Vec<_> = params.keys().copied().collect();
        assert_eq!(
            keys,
            [WellKnownParam::Charset, WellKnownParam::Type, WellKnownParam::Name]
        );
    }

    #[test]
    fn test_params_type_short_integer_out_of_table() {
        let params = decode_content_type_params(&mut ByteCursor::new(&[0x83, 0xff])).unwrap();
        assert_eq!(
            params.get(&WellKnownParam::Type).unwrap(),
            "unknown content type code 127"
        );
    }

    #[test]
    fn test_params_truncated_value_is_error() {
        let err = decode_content_type_params(&mut ByteCursor::new(&[0x97, b'a'])).unwrap_err();
        assert!(matches!(err, Error::Truncated { .. }));
    }

    #[test]
    fn test_params_empty() {
        let params = decode_content_type_params(&mut ByteCursor::new(&[])).unwrap();
        assert!(params.is_empty());
    }
}
