//! Byte accumulator for the decode scan.
//!
//! Escapes contribute one raw byte each, `+` contributes one byte, and runs of
//! literal characters contribute their bytes in the literal encoding. The
//! accumulated bytes are only interpreted as text once the scan is complete,
//! so a character split across escapes and literals is reassembled before
//! decoding.
//!
//! Capacity is reserved up front from the input's UTF-8 length. Escapes shrink
//! three input bytes to one and UTF-8 literals copy through unchanged, so for
//! a UTF-8 literal encoding the buffer never reallocates.

use alloc::vec::Vec;

use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};

use crate::error::DecodeError;

#[derive(Debug)]
pub(crate) struct ByteAccumulator {
    bytes: Vec<u8>,
}

impl ByteAccumulator {
    /// Creates an accumulator sized for decoding `input`.
    pub fn for_input(input: &str) -> Self {
        Self {
            bytes: Vec::with_capacity(input.len()),
        }
    }

    #[inline]
    pub fn push_byte(&mut self, b: u8) {
        self.bytes.push(b);
    }

    /// Appends a run of literal characters encoded with `encoding`.
    ///
    /// Each character is encoded on its own, so stateful encoders start from
    /// their initial state for every character.
    ///
    /// UTF-16 is written by hand: `encoding_rs` has no UTF-16 encoder and
    /// would hand back UTF-8 instead.
    pub fn push_literal(&mut self, run: &str, encoding: &'static Encoding) -> Result<(), DecodeError> {
        if encoding == UTF_8 {
            self.bytes.extend_from_slice(run.as_bytes());
            return Ok(());
        }
        if encoding == UTF_16LE {
            self.bytes.extend(run.encode_utf16().flat_map(u16::to_le_bytes));
            return Ok(());
        }
        if encoding == UTF_16BE {
            self.bytes.extend(run.encode_utf16().flat_map(u16::to_be_bytes));
            return Ok(());
        }

        let mut scratch = [0u8; 4];
        for character in run.chars() {
            let (encoded, used, unmappable) = encoding.encode(character.encode_utf8(&mut scratch));
            if unmappable {
                return Err(DecodeError::UnencodableCharacter {
                    character,
                    encoding: used.name(),
                });
            }
            self.bytes.extend_from_slice(&encoded);
        }
        Ok(())
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    #[cfg(test)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }
}
