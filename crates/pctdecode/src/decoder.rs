//! Percent and form decoding.
//!
//! Overview
//! - A token is scanned once, left to right. `%XY` escapes contribute one raw
//!   byte each, `+` contributes a space in query context, and every other
//!   character contributes its bytes in the literal encoding. All of these
//!   land in one [`ByteAccumulator`].
//! - Only after the scan are the accumulated bytes decoded with the target
//!   encoding. A multi-byte character may therefore be split across several
//!   escapes, or across escapes and literal text, and still come out whole.
//!
//! Borrowing
//! - A token with nothing to decode (no `%`, and no `+` in query context) is
//!   returned as `Cow::Borrowed` without touching the accumulator.
//! - Anything else is rebuilt from bytes and returned as `Cow::Owned`, even
//!   when the result happens to equal the input.
//!
//! Failures
//! - Every step returns its own [`DecodeError`] variant immediately; nothing
//!   is partially decoded.
//! - The one recovery path is [`DecoderOptions::fallback_encoding`]: bytes
//!   that are invalid in the target encoding are decoded with the fallback
//!   instead, and the result carries a [`FallbackAdvisory`].

use alloc::{borrow::Cow, string::String, vec::Vec};
use core::fmt;

use bstr::BString;
use encoding_rs::{Encoding, UTF_8};
use log::{debug, trace};

use crate::{
    accumulator::ByteAccumulator,
    error::DecodeError,
    escape::{ESCAPE_LEN, decode_escape},
    label::resolve_encoding,
    options::{DecoderOptions, LiteralEncoding},
};

/// Where a token came from, which decides the meaning of `+`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeContext {
    /// A URL path segment. `+` is a literal plus sign.
    #[default]
    Path,
    /// A form field or query value. `+` stands for a space.
    Query,
}

impl From<bool> for DecodeContext {
    /// `true` selects [`DecodeContext::Query`].
    fn from(is_query: bool) -> Self {
        if is_query {
            DecodeContext::Query
        } else {
            DecodeContext::Path
        }
    }
}

/// Non-fatal report that decoded bytes were invalid in the requested encoding
/// and were decoded with the fallback encoding instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackAdvisory {
    /// The encoding the caller asked for.
    pub requested: &'static Encoding,
    /// The encoding that produced the returned text.
    pub fallback: &'static Encoding,
    /// Whether the fallback itself had to insert U+FFFD replacement
    /// characters.
    pub had_replacements: bool,
}

impl fmt::Display for FallbackAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bytes were not valid {}, decoded as {}",
            self.requested.name(),
            self.fallback.name()
        )?;
        if self.had_replacements {
            f.write_str(" with replacement characters")?;
        }
        Ok(())
    }
}

/// Result of a successful decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<'a> {
    /// The decoded text. Borrowed from the input when nothing needed
    /// decoding.
    pub text: Cow<'a, str>,
    /// Set when the text was recovered with the fallback encoding.
    pub advisory: Option<FallbackAdvisory>,
}

impl<'a> Decoded<'a> {
    fn unchanged(input: &'a str) -> Self {
        Self {
            text: Cow::Borrowed(input),
            advisory: None,
        }
    }

    fn owned(text: String) -> Self {
        Self {
            text: Cow::Owned(text),
            advisory: None,
        }
    }
}

/// Percent / form decoder.
///
/// A `Decoder` holds only its [`DecoderOptions`]; every call is independent,
/// so one decoder can be shared freely across threads.
///
/// ```rust
/// use pctdecode::{DecodeContext, Decoder};
///
/// let decoder = Decoder::default();
/// let decoded = decoder.decode("caf%C3%A9+au+lait", "utf-8", DecodeContext::Query).unwrap();
/// assert_eq!(decoded.text, "caf\u{e9} au lait");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    options: DecoderOptions,
}

impl Decoder {
    /// Creates a decoder with the given options.
    #[must_use]
    pub fn new(options: DecoderOptions) -> Self {
        Self { options }
    }

    /// The options this decoder was built with.
    #[must_use]
    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Decodes `input` into text in the encoding named by `encoding`.
    ///
    /// Empty input decodes to empty text without looking at `encoding`.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::EmptyEncodingName`] / [`DecodeError::UnsupportedEncodingName`]
    ///   when `encoding` does not resolve.
    /// - Any error of [`Decoder::decode_with`].
    pub fn decode<'a>(
        &self,
        input: &'a str,
        encoding: &str,
        context: DecodeContext,
    ) -> Result<Decoded<'a>, DecodeError> {
        if input.is_empty() {
            return Ok(Decoded::unchanged(input));
        }
        let encoding = self.check(resolve_encoding(encoding))?;
        self.decode_with(input, encoding, context)
    }

    /// Decodes `input` with the configured
    /// [`default_encoding`](DecoderOptions::default_encoding).
    ///
    /// # Errors
    ///
    /// See [`Decoder::decode_with`].
    pub fn decode_default<'a>(
        &self,
        input: &'a str,
        context: DecodeContext,
    ) -> Result<Decoded<'a>, DecodeError> {
        self.decode_with(input, self.options.default_encoding, context)
    }

    /// Decodes `input` into text in `encoding`.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::MalformedEscape`] for a `%` not followed by two hex
    ///   digits.
    /// - [`DecodeError::UnencodableCharacter`] for a literal character the
    ///   literal encoding cannot represent.
    /// - [`DecodeError::InvalidEncodedText`] when the decoded bytes are not
    ///   valid in `encoding` and no fallback is configured.
    pub fn decode_with<'a>(
        &self,
        input: &'a str,
        encoding: &'static Encoding,
        context: DecodeContext,
    ) -> Result<Decoded<'a>, DecodeError> {
        trace!("decoding {input:?} as {} ({context:?})", encoding.name());
        if !needs_decoding(input, context) {
            return Ok(Decoded::unchanged(input));
        }
        let bytes = self.check(self.accumulate(input, encoding, context))?;
        self.check(self.finish(bytes, encoding))
    }

    /// Scans `input`, collecting the bytes it stands for.
    fn accumulate(
        &self,
        input: &str,
        encoding: &'static Encoding,
        context: DecodeContext,
    ) -> Result<Vec<u8>, DecodeError> {
        let literal_encoding = match self.options.literal_encoding {
            LiteralEncoding::Native(native) => native,
            LiteralEncoding::Target => encoding,
        };

        let bytes = input.as_bytes();
        let mut acc = ByteAccumulator::for_input(input);
        // Start of the pending run of literal characters. `%` and `+` are
        // ASCII, so every run boundary is a char boundary.
        let mut run_start = 0;
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'%' => {
                    acc.push_literal(&input[run_start..i], literal_encoding)?;
                    acc.push_byte(decode_escape(bytes, i)?);
                    i += ESCAPE_LEN;
                    run_start = i;
                }
                b'+' if context == DecodeContext::Query => {
                    acc.push_literal(&input[run_start..i], literal_encoding)?;
                    acc.push_byte(b' ');
                    i += 1;
                    run_start = i;
                }
                _ => i += 1,
            }
        }
        acc.push_literal(&input[run_start..], literal_encoding)?;
        Ok(acc.into_bytes())
    }

    /// Decodes the accumulated bytes, falling back if configured.
    fn finish(&self, bytes: Vec<u8>, encoding: &'static Encoding) -> Result<Decoded<'static>, DecodeError> {
        let bytes = if encoding == UTF_8 {
            match String::from_utf8(bytes) {
                Ok(text) => return Ok(Decoded::owned(text)),
                Err(err) => err.into_bytes(),
            }
        } else {
            if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(&bytes) {
                return Ok(Decoded::owned(text.into_owned()));
            }
            bytes
        };

        let Some(fallback) = self.options.fallback_encoding else {
            return Err(DecodeError::InvalidEncodedText {
                encoding: encoding.name(),
                bytes: BString::from(bytes),
            });
        };
        let (text, had_replacements) = fallback.decode_without_bom_handling(&bytes);
        debug!(
            "{} bytes are not valid {}, falling back to {}",
            bytes.len(),
            encoding.name(),
            fallback.name()
        );
        Ok(Decoded {
            text: Cow::Owned(text.into_owned()),
            advisory: Some(FallbackAdvisory {
                requested: encoding,
                fallback,
                had_replacements,
            }),
        })
    }

    #[inline]
    #[allow(clippy::unused_self)]
    fn check<T>(&self, result: Result<T, DecodeError>) -> Result<T, DecodeError> {
        #[cfg(any(test, feature = "fuzzing"))]
        if let Err(err) = &result {
            assert!(!self.options.panic_on_error, "Decode error: {err}");
        }
        result
    }
}

/// Whether `input` contains anything the scan would rewrite.
fn needs_decoding(input: &str, context: DecodeContext) -> bool {
    input
        .bytes()
        .any(|b| b == b'%' || (b == b'+' && context == DecodeContext::Query))
}
