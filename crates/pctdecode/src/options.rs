use alloc::string::String;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252_INIT};

use crate::{error::DecodeError, label::resolve_encoding};

/// Single-byte encoding used for best-effort recovery when decoded bytes are
/// not valid in the requested encoding.
pub static DEFAULT_FALLBACK_ENCODING: &Encoding = &WINDOWS_1252_INIT;

/// How literal (un-escaped) input characters are turned into bytes before the
/// accumulated bytes are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralEncoding {
    /// Encode literals with a fixed encoding, independent of the target.
    ///
    /// With the default `Native(UTF_8)`, literal text is copied through
    /// byte-for-byte.
    Native(&'static Encoding),
    /// Encode literals with the target encoding of each call.
    ///
    /// Browsers encode form fields in the encoding of the submitting page, so
    /// unescaped characters in such a field already belong to that encoding.
    Target,
}

impl Default for LiteralEncoding {
    fn default() -> Self {
        LiteralEncoding::Native(UTF_8)
    }
}

/// Configuration options for [`Decoder`](crate::Decoder).
///
/// # Examples
///
/// ```rust
/// use pctdecode::{DecodeContext, Decoder, DecoderOptions, DEFAULT_FALLBACK_ENCODING};
///
/// let decoder = Decoder::new(DecoderOptions {
///     fallback_encoding: Some(DEFAULT_FALLBACK_ENCODING),
///     ..Default::default()
/// });
/// let decoded = decoder.decode("%FF", "UTF-8", DecodeContext::Path).unwrap();
/// assert_eq!(decoded.text, "\u{ff}");
/// assert!(decoded.advisory.is_some());
/// ```
///
/// # Default
///
/// UTF-8 default and literal encodings, no fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Target encoding used by [`Decoder::decode_default`](crate::Decoder::decode_default)
    /// when the caller does not name one.
    ///
    /// # Default
    ///
    /// UTF-8
    pub default_encoding: &'static Encoding,

    /// How literal characters are converted to bytes.
    ///
    /// # Default
    ///
    /// `LiteralEncoding::Native(UTF_8)`
    pub literal_encoding: LiteralEncoding,

    /// Encoding used to reinterpret decoded bytes that are invalid in the
    /// target encoding.
    ///
    /// When `None`, invalid bytes fail the call with
    /// [`DecodeError::InvalidEncodedText`]. When set, the fallback text is
    /// returned together with a [`FallbackAdvisory`](crate::FallbackAdvisory).
    ///
    /// # Default
    ///
    /// `None`
    pub fallback_encoding: Option<&'static Encoding>,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on decode errors instead of returning them.
    ///
    /// Enabled only in test builds to produce backtraces on decode failures.
    pub panic_on_error: bool,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            default_encoding: UTF_8,
            literal_encoding: LiteralEncoding::default(),
            fallback_encoding: None,
            #[cfg(any(test, feature = "fuzzing"))]
            panic_on_error: false,
        }
    }
}

/// Label-based form of [`DecoderOptions`], suitable for configuration files.
///
/// Encoding names are WHATWG labels such as `"utf-8"` or `"latin1"`. Missing
/// fields take the [`DecoderOptions`] defaults.
///
/// ```rust
/// use pctdecode::DecoderConfig;
///
/// let options = DecoderConfig {
///     default_encoding: Some("shift_jis".into()),
///     literal_encoding: Some("target".into()),
///     fallback_encoding: Some("windows-1252".into()),
/// }
/// .into_options()
/// .unwrap();
/// assert_eq!(options.default_encoding.name(), "Shift_JIS");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct DecoderConfig {
    /// Label of the default target encoding.
    pub default_encoding: Option<String>,
    /// Label of the literal encoding, or `"target"` to encode literals with
    /// the target encoding.
    pub literal_encoding: Option<String>,
    /// Label of the fallback encoding.
    pub fallback_encoding: Option<String>,
}

/// Literal-encoding value selecting [`LiteralEncoding::Target`].
const TARGET_LITERAL: &str = "target";

impl DecoderConfig {
    /// Resolves every label into a [`DecoderOptions`].
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::EmptyEncodingName`] or
    /// [`DecodeError::UnsupportedEncodingName`] for the first label that does
    /// not resolve.
    pub fn into_options(self) -> Result<DecoderOptions, DecodeError> {
        let mut options = DecoderOptions::default();
        if let Some(label) = self.default_encoding {
            options.default_encoding = resolve_encoding(&label)?;
        }
        if let Some(label) = self.literal_encoding {
            options.literal_encoding = if label.trim().eq_ignore_ascii_case(TARGET_LITERAL) {
                LiteralEncoding::Target
            } else {
                LiteralEncoding::Native(resolve_encoding(&label)?)
            };
        }
        if let Some(label) = self.fallback_encoding {
            options.fallback_encoding = Some(resolve_encoding(&label)?);
        }
        Ok(options)
    }
}
