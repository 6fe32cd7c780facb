//! Types shared by the archive reader and builder

use crate::error::{Error, Result};

/// Compression method used for an entry payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionMethod {
    /// Stored raw.
    None,
    /// Zlib (deflate with a zlib wrapper).
    #[default]
    Zlib,
    /// LZ4 block compression.
    Lz4,
}

impl CompressionMethod {
    /// Parse the method from a directory flags byte.
    pub fn from_flags(flags: u8) -> Result<Self> {
        match flags & 0x0f {
            0 => Ok(CompressionMethod::None),
            1 => Ok(CompressionMethod::Zlib),
            2 => Ok(CompressionMethod::Lz4),
            method => Err(Error::UnsupportedCompression { method }),
        }
    }

    /// Convert the method to a directory flags byte.
    #[must_use]
    pub fn to_flags(self) -> u8 {
        match self {
            CompressionMethod::None => 0,
            CompressionMethod::Zlib => 1,
            CompressionMethod::Lz4 => 2,
        }
    }

    /// Compress a payload with this method. [`CompressionMethod::None`]
    /// copies the input.
    pub fn compress(self, data: &[u8]) -> Result<Vec<u8>> {
        match self {
            CompressionMethod::None => Ok(data.to_vec()),
            CompressionMethod::Zlib => crate::compression::compress_zlib(data),
            CompressionMethod::Lz4 => Ok(crate::compression::compress_lz4(data)),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CompressionMethod::None => "none",
            CompressionMethod::Zlib => "zlib",
            CompressionMethod::Lz4 => "lz4",
        }
    }
}

/// One directory entry of an opened archive.
#[derive(Debug, Clone)]
pub struct EntryInfo {
    /// Case-normalized name hash (the directory key).
    pub name_hash: u32,
    /// Compression method of the stored payload.
    pub compression: CompressionMethod,
    /// Declared size after decompression.
    pub uncompressed_size: usize,
    /// Size of the payload as stored in the archive.
    pub stored_size: usize,
    /// Payload offset from the start of the archive bytes.
    pub(crate) offset: usize,
}
