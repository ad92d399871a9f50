//! Decoding of a single `%XY` percent escape.
//!
//! A percent escape is a `%` followed by exactly two ASCII hexadecimal digits
//! (`0-9`, `A-F`, `a-f`) naming one raw byte. Digit case is irrelevant, so
//! `%2f` and `%2F` both yield `0x2F`.
//!
//! # Errors
//!
//! - Fewer than two characters after the `%` yields
//!   [`DecodeError::MalformedEscape`].
//! - Either of the two characters not being a hex digit yields
//!   [`DecodeError::MalformedEscape`].
//!
//! The offset carried by the error is always the byte offset of the `%`.

use crate::error::DecodeError;

/// Length in bytes of one `%XY` escape.
pub(crate) const ESCAPE_LEN: usize = 3;

/// Convert a single ASCII hex digit into its 0..=15 value.
#[inline]
fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Decodes the escape whose `%` sits at byte `offset` of `input`.
///
/// Only the two bytes following the `%` are inspected. Non-ASCII bytes are
/// never hex digits, so a multi-byte character after the `%` is rejected
/// without having to find its boundary.
pub(crate) fn decode_escape(input: &[u8], offset: usize) -> Result<u8, DecodeError> {
    debug_assert_eq!(input.get(offset), Some(&b'%'));

    let malformed = DecodeError::MalformedEscape { offset };
    let (Some(&hi), Some(&lo)) = (input.get(offset + 1), input.get(offset + 2)) else {
        return Err(malformed);
    };
    match (hex_val(hi), hex_val(lo)) {
        (Some(hi), Some(lo)) => Ok((hi << 4) | lo),
        _ => Err(malformed),
    }
}
