//! Archive opening and entry lookup

use std::path::Path;

use super::{DIR_ENTRY_SIZE, HEADER_SIZE, MAGIC, VERSION, entry_hash};
use crate::archive::types::{CompressionMethod, EntryInfo};
use crate::buffer::ByteReader;
use crate::compression;
use crate::error::{Error, Result};

/// An opened cache archive.
///
/// The header and directory are parsed eagerly on open; entry payloads are
/// sliced (and decompressed) lazily per [`read`](Self::read) call.
#[derive(Debug, Clone)]
pub struct Archive {
    data: Vec<u8>,
    entries: Vec<EntryInfo>,
}

impl Archive {
    /// Parse an archive from its raw bytes.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArchiveMagic`], [`Error::UnsupportedArchiveVersion`],
    /// [`Error::ChecksumMismatch`], or [`Error::CorruptArchive`] when the
    /// container is not intact.
    pub fn open(data: Vec<u8>) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(Error::CorruptArchive {
                reason: format!(
                    "{} bytes is shorter than the {HEADER_SIZE}-byte header",
                    data.len()
                ),
            });
        }

        let mut buf = ByteReader::new(&data);

        let magic = buf.read_bytes(4)?;
        if magic != MAGIC {
            return Err(Error::InvalidArchiveMagic);
        }

        let version = buf.read_u16()?;
        if version != VERSION {
            return Err(Error::UnsupportedArchiveVersion { version });
        }

        let expected_crc = buf.read_u32()?;
        let actual_crc = crc32fast::hash(&data[HEADER_SIZE..]);
        if expected_crc != actual_crc {
            return Err(Error::ChecksumMismatch {
                expected: expected_crc,
                actual: actual_crc,
            });
        }

        let count = buf.read_u16()? as usize;
        let directory_len = count * DIR_ENTRY_SIZE;
        if buf.remaining() < directory_len {
            return Err(Error::CorruptArchive {
                reason: format!(
                    "directory needs {directory_len} bytes, {} remain",
                    buf.remaining()
                ),
            });
        }
        let payload_start = HEADER_SIZE + directory_len;

        let mut entries = Vec::with_capacity(count);
        let mut offset = payload_start;
        for _ in 0..count {
            let name_hash = buf.read_u32()?;
            let compression = CompressionMethod::from_flags(buf.read_u8()?)?;
            let uncompressed_size = buf.read_u24()? as usize;
            let stored_size = buf.read_u24()? as usize;
            entries.push(EntryInfo {
                name_hash,
                compression,
                uncompressed_size,
                stored_size,
                offset,
            });
            offset = offset
                .checked_add(stored_size)
                .ok_or_else(|| Error::CorruptArchive {
                    reason: "directory sizes overflow".to_string(),
                })?;
        }

        if offset != data.len() {
            return Err(Error::CorruptArchive {
                reason: format!(
                    "directory declares {} payload bytes, archive has {}",
                    offset - payload_start,
                    data.len() - payload_start.min(data.len())
                ),
            });
        }

        tracing::debug!(version, count, "opened archive");
        Ok(Self { data, entries })
    }

    /// Read and parse an archive file from disk.
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open(std::fs::read(path)?)
    }

    /// Number of entries in the directory.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Directory view, in archive order.
    #[must_use]
    pub fn entries(&self) -> &[EntryInfo] {
        &self.entries
    }

    /// True if an entry with this (case-normalized) name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        let hash = entry_hash(name);
        self.entries.iter().any(|e| e.name_hash == hash)
    }

    /// Read an entry's payload by name, decompressing it if stored
    /// compressed.
    ///
    /// # Errors
    /// Returns [`Error::EntryNotFound`] when no entry matches, or
    /// [`Error::SizeMismatch`] when the decompressed payload does not match
    /// the directory's declared size.
    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        let hash = entry_hash(name);
        let entry = self
            .entries
            .iter()
            .find(|e| e.name_hash == hash)
            .ok_or_else(|| Error::EntryNotFound {
                name: name.to_string(),
            })?;

        let stored = &self.data[entry.offset..entry.offset + entry.stored_size];
        let payload = match entry.compression {
            CompressionMethod::None => stored.to_vec(),
            CompressionMethod::Zlib => {
                compression::decompress_zlib(stored, entry.uncompressed_size)?
            }
            CompressionMethod::Lz4 => compression::decompress_lz4(stored, entry.uncompressed_size)?,
        };

        if payload.len() != entry.uncompressed_size {
            return Err(Error::SizeMismatch {
                declared: entry.uncompressed_size,
                actual: payload.len(),
            });
        }

        Ok(payload)
    }
}
