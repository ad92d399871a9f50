//! Percent and form decoding into a chosen text encoding.
//!
//! Decodes a single, already isolated token (a URL path segment or an
//! `application/x-www-form-urlencoded` field value) that may contain literal
//! characters, `%XY` escapes and, in query context, `+` placeholders for
//! spaces. Escaped bytes are collected together with the bytes of literal
//! characters and only then decoded with the target encoding, so multi-byte
//! characters survive being split across escapes.
//!
//! ```rust
//! assert_eq!(pctdecode::decode("%E4%B8%AD", "UTF-8", false).unwrap(), "\u{4e2d}");
//! assert_eq!(pctdecode::decode("a+b", "UTF-8", true).unwrap(), "a b");
//! assert_eq!(pctdecode::decode("a+b", "UTF-8", false).unwrap(), "a+b");
//! ```
//!
//! [`Decoder`] exposes the configurable form: a default encoding, the
//! encoding used for literal characters, and an optional fallback encoding
//! for mislabeled input.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod accumulator;
mod escape;
mod label;

mod decoder;
mod error;
mod options;

#[cfg(test)]
mod tests;

use alloc::borrow::Cow;

pub use decoder::{DecodeContext, Decoded, Decoder, FallbackAdvisory};
pub use encoding_rs::Encoding;
pub use error::DecodeError;
pub use label::resolve_encoding;
pub use options::{DEFAULT_FALLBACK_ENCODING, DecoderConfig, DecoderOptions, LiteralEncoding};

/// Decodes `input` into text in the encoding named by `encoding`, treating `+`
/// as a space when `is_query` is set.
///
/// Uses [`Decoder::default`]: literal characters are taken as UTF-8 and no
/// fallback is attempted. Input with nothing to decode is returned borrowed.
///
/// # Errors
///
/// See [`DecodeError`].
pub fn decode<'a>(input: &'a str, encoding: &str, is_query: bool) -> Result<Cow<'a, str>, DecodeError> {
    Decoder::default()
        .decode(input, encoding, is_query.into())
        .map(|decoded| decoded.text)
}

/// Decodes a URL path segment. `+` stays a plus sign.
///
/// # Errors
///
/// See [`DecodeError`].
pub fn decode_path<'a>(input: &'a str, encoding: &str) -> Result<Cow<'a, str>, DecodeError> {
    decode(input, encoding, false)
}

/// Decodes a form field or query value. `+` becomes a space.
///
/// # Errors
///
/// See [`DecodeError`].
pub fn decode_query<'a>(input: &'a str, encoding: &str) -> Result<Cow<'a, str>, DecodeError> {
    decode(input, encoding, true)
}
