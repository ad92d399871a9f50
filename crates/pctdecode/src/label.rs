//! Resolution of encoding names to codecs.
//!
//! Names are matched against the WHATWG label registry, so `"UTF-8"`,
//! `"utf8"`, `"latin1"` and `"ISO-8859-1"` are all accepted and matching is
//! case-insensitive with surrounding whitespace ignored. Labels that map to
//! the WHATWG "replacement" encoding are treated as unsupported, since that
//! encoding cannot decode any non-empty input.

use alloc::string::ToString;

use encoding_rs::Encoding;

use crate::error::DecodeError;

/// Looks up the codec named by `label`.
///
/// `"ISO-8859-1"`, `"latin1"` and `"us-ascii"` resolve to windows-1252, as
/// they do in browsers. The two differ only in bytes `0x80..=0x9F`, which
/// decode to printable characters such as `€` (for `0x80`) rather than to
/// the C1 controls `U+0080..=U+009F`.
///
/// # Errors
///
/// [`DecodeError::EmptyEncodingName`] for an empty label and
/// [`DecodeError::UnsupportedEncodingName`] for a label the registry does not
/// know.
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding, DecodeError> {
    if label.is_empty() {
        return Err(DecodeError::EmptyEncodingName);
    }
    Encoding::for_label_no_replacement(label.as_bytes())
        .ok_or_else(|| DecodeError::UnsupportedEncodingName(label.to_string()))
}
