use alloc::string::String;

use bstr::BString;
use thiserror::Error;

/// Reasons a token could not be decoded.
///
/// Every variant except [`DecodeError::EmptyEncodingName`] describes a problem
/// with the data being decoded. `EmptyEncodingName` is a caller error; see
/// [`DecodeError::is_caller_error`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A `%` was not followed by two hexadecimal digits.
    #[error("malformed percent escape at byte offset {offset}")]
    MalformedEscape {
        /// Byte offset of the offending `%` in the input.
        offset: usize,
    },
    /// A literal character has no representation in the literal encoding.
    #[error("character {character:?} cannot be encoded as {encoding}")]
    UnencodableCharacter {
        /// The rejected character.
        character: char,
        /// Name of the encoding that rejected it.
        encoding: &'static str,
    },
    /// The decoded bytes are not valid text in the target encoding.
    #[error("decoded bytes {bytes:?} are not valid {encoding}")]
    InvalidEncodedText {
        /// Name of the target encoding.
        encoding: &'static str,
        /// The assembled bytes.
        bytes: BString,
    },
    /// The encoding label is not known to the codec registry.
    #[error("unsupported encoding name {0:?}")]
    UnsupportedEncodingName(String),
    /// The encoding label was empty.
    #[error("encoding name must not be empty")]
    EmptyEncodingName,
}

impl DecodeError {
    /// Returns `true` when the error stems from a precondition the caller
    /// violated rather than from the decoded data.
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        matches!(self, DecodeError::EmptyEncodingName)
    }
}
