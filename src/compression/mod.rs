//! Per-entry compression wrappers
//!
//! The archive stores which method each entry uses, so decompression must
//! exactly invert compression. Zlib and LZ4 block compression are supported;
//! both produce deterministic output for a given input, which keeps
//! re-packing byte-identical.

use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;

use crate::error::{Error, Result};

/// Compress data with zlib at the default level.
pub fn compress_zlib(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Decompress zlib data, with the expected output size as a capacity hint.
pub fn decompress_zlib(data: &[u8], expected_size: usize) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data);
    let mut decompressed = Vec::with_capacity(expected_size);
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| Error::Decompression {
            message: format!("zlib: {e}"),
        })?;
    Ok(decompressed)
}

/// Compress data with LZ4 block compression.
pub fn compress_lz4(data: &[u8]) -> Vec<u8> {
    lz4_flex::block::compress(data)
}

/// Decompress an LZ4 block of a known decompressed size.
pub fn decompress_lz4(data: &[u8], expected_size: usize) -> Result<Vec<u8>> {
    lz4_flex::block::decompress(data, expected_size).map_err(|e| Error::Decompression {
        message: format!("LZ4: {e}"),
    })
}
