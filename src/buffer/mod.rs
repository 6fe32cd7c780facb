//! Binary cursor over byte buffers
//!
//! The cache format and everything stored inside it is big-endian with
//! single-byte (Latin-1) strings. [`ByteReader`] is the read cursor used for
//! decoded archive entries, [`ByteWriter`] is its write-mode mirror used by
//! the packer. Both expose an explicit bit mode ([`BitReader`] /
//! [`BitWriter`]) for fields packed at sub-byte granularity; leaving bit
//! mode realigns the cursor to the next byte boundary.

mod reader;
mod writer;

pub use reader::{BitReader, ByteReader};
pub use writer::{BitWriter, ByteWriter};

/// Decode Latin-1 bytes into a string, one byte per char.
pub(crate) fn latin1_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Encode one char as Latin-1, substituting `?` for anything outside it.
pub(crate) fn char_to_latin1(c: char) -> u8 {
    let code = u32::from(c);
    if code <= 0xFF { code as u8 } else { b'?' }
}
