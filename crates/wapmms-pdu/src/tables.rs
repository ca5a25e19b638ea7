//! WSP assigned-number tables.

/// Well-known content types, indexed by their short-integer value
/// (WSP Assigned Numbers, Content Type Assignments).
pub const CONTENT_TYPES: &[&str] = &[
    "*/*",
    "text/*",
    "text/html",
    "text/plain",
    "text/x-hdml",
    "text/x-ttml",
    "text/x-vCalendar",
    "text/x-vCard",
    "text/vnd.wap.wml",
    "text/vnd.wap.wmlscript",
    "text/vnd.wap.wta-event",
    "multipart/*",
    "multipart/mixed",
    "multipart/form-data",
    "multipart/byterantes",
    "multipart/alternative",
    "application/*",
    "application/java-vm",
    "application/x-www-form-urlencoded",
    "application/x-hdmlc",
    "application/vnd.wap.wmlc",
    "application/vnd.wap.wmlscriptc",
    "application/vnd.wap.wta-eventc",
    "application/vnd.wap.uaprof",
    "application/vnd.wap.wtls-ca-certificate",
    "application/vnd.wap.wtls-user-certificate",
    "application/x-x509-ca-cert",
    "application/x-x509-user-cert",
    "image/*",
    "image/gif",
    "image/jpeg",
    "image/tiff",
    "image/png",
    "image/vnd.wap.wbmp",
    "application/vnd.wap.multipart.*",
    "application/vnd.wap.multipart.mixed",
    "application/vnd.wap.multipart.form-data",
    "application/vnd.wap.multipart.byteranges",
    "application/vnd.wap.multipart.alternative",
    "application/xml",
    "text/xml",
    "application/vnd.wap.wbxml",
    "application/x-x968-cross-cert",
    "application/x-x968-ca-cert",
    "application/x-x968-user-cert",
    "text/vnd.wap.si",
    "application/vnd.wap.sic",
    "text/vnd.wap.sl",
    "application/vnd.wap.slc",
    "text/vnd.wap.co",
    "application/vnd.wap.coc",
    "application/vnd.wap.multipart.related",
    "application/vnd.wap.sia",
    "text/vnd.wap.connectivity-xml",
    "application/vnd.wap.connectivity-wbxml",
    "application/pkcs7-mime",
    "application/vnd.wap.hashed-certificate",
    "application/vnd.wap.signed-certificate",
    "application/vnd.wap.cert-response",
    "application/xhtml+xml",
    "application/wml+xml",
    "text/css",
    "application/vnd.wap.mms-message",
    "application/vnd.wap.rollover-certificate",
    "application/vnd.wap.locc+wbxml",
    "application/vnd.wap.loc+xml",
    "application/vnd.syncml.dm+wbxml",
    "application/vnd.syncml.dm+xml",
    "application/vnd.syncml.notification",
    "application/vnd.wap.xhtml+xml",
    "application/vnd.wv.csp.cir",
    "application/vnd.oma.dd+xml",
    "application/vnd.oma.drm.message",
    "application/vnd.oma.drm.content",
    "application/vnd.oma.drm.rights+xml",
    "application/vnd.oma.drm.rights+wbxml",
    "application/vnd.wv.csp+xml",
    "application/vnd.wv.csp+wbxml",
    "application/vnd.syncml.ds.notification",
    "audio/*",
    "video/*",
    "application/vnd.oma.dd2+xml",
    "application/mikey",
    "application/vnd.oma.dcd",
    "application/vnd.oma.dcdc",
];

/// Looks up a well-known content type by its short-integer index.
#[must_use]
pub fn content_type(index: u8) -> Option<&'static str> {
    CONTENT_TYPES.get(usize::from(index)).copied()
}

/// Looks up a character set by its IANA MIBenum number.
#[must_use]
pub const fn charset(mib_enum: u64) -> Option<&'static str> {
    let name = match mib_enum {
        0 => "*",
        3 => "us-ascii",
        4 => "iso-8859-1",
        5 => "iso-8859-2",
        6 => "iso-8859-3",
        7 => "iso-8859-4",
        8 => "iso-8859-5",
        9 => "iso-8859-6",
        10 => "iso-8859-7",
        11 => "iso-8859-8",
        12 => "iso-8859-9",
        13 => "iso-8859-10",
        17 => "shift_JIS",
        18 => "euc-jp",
        36 => "ks_c_5601-1987",
        37 => "iso-2022-kr",
        38 => "euc-kr",
        39 => "iso-2022-jp",
        40 => "iso-2022-jp-2",
        106 => "utf-8",
        109 => "iso-8859-13",
        110 => "iso-8859-14",
        111 => "iso-8859-15",
        113 => "gbk",
        114 => "gb18030",
        1000 => "iso-10646-ucs-2",
        1013 => "utf-16be",
        1014 => "utf-16le",
        1015 => "utf-16",
        2025 => "gb2312",
        2026 => "big5",
        2084 => "koi8-r",
        2252 => "windows-1252",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_lookup() {
        assert_eq!(content_type(0x03), Some("text/plain"));
        assert_eq!(content_type(0x1E), Some("image/jpeg"));
        assert_eq!(
            content_type(0x33),
            Some("application/vnd.wap.multipart.related")
        );
        assert_eq!(content_type(0x3E), Some("application/vnd.wap.mms-message"));
        assert_eq!(content_type(0x7F), None);
    }

    #[test]
    fn test_charset_lookup() {
        assert_eq!(charset(106), Some("utf-8"));
        assert_eq!(charset(3), Some("us-ascii"));
        assert_eq!(charset(1000), Some("iso-10646-ucs-2"));
        assert_eq!(charset(9999), None);
    }
}
