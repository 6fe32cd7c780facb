//! Archive building (pack mode)

use std::path::Path;

use indexmap::IndexMap;
use walkdir::WalkDir;

use super::{DIR_ENTRY_SIZE, HEADER_SIZE, MAGIC, MAX_ENTRY_SIZE, VERSION, entry_hash};
use crate::archive::types::CompressionMethod;
use crate::buffer::ByteWriter;
use crate::error::{Error, Result};

/// Default size below which entries are stored raw. Tiny payloads usually
/// grow under compression and are cheaper to slice directly.
pub const DEFAULT_COMPRESS_THRESHOLD: usize = 64;

/// Accumulates named blobs and serializes them into the archive layout.
///
/// Entries are kept in insertion order, and packing the same inputs with the
/// same settings produces byte-identical output.
#[derive(Debug, Clone)]
pub struct ArchiveBuilder {
    /// Entries keyed by name hash, in insertion order.
    entries: IndexMap<u32, (String, Vec<u8>)>,
    method: CompressionMethod,
    threshold: usize,
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveBuilder {
    /// Create an empty builder with the default compression policy (zlib,
    /// entries under [`DEFAULT_COMPRESS_THRESHOLD`] stored raw).
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            method: CompressionMethod::default(),
            threshold: DEFAULT_COMPRESS_THRESHOLD,
        }
    }

    /// Set the compression method for subsequent [`build`](Self::build).
    #[must_use]
    pub fn with_method(mut self, method: CompressionMethod) -> Self {
        self.method = method;
        self
    }

    /// Set the minimum payload size for compression to be attempted.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// Number of entries added so far.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Add a named blob.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateEntry`] when another entry with the same
    /// case-normalized name (hash) was already added, or
    /// [`Error::EntryTooLarge`] when the payload exceeds the 24-bit size
    /// fields.
    pub fn add(&mut self, name: &str, data: Vec<u8>) -> Result<&mut Self> {
        if data.len() > MAX_ENTRY_SIZE {
            return Err(Error::EntryTooLarge {
                name: name.to_string(),
                size: data.len(),
            });
        }
        let hash = entry_hash(name);
        if self.entries.contains_key(&hash) {
            return Err(Error::DuplicateEntry {
                name: name.to_string(),
            });
        }
        self.entries.insert(hash, (name.to_string(), data));
        Ok(self)
    }

    /// Add every file under a directory, keyed by file name.
    ///
    /// Files are visited in sorted order so the resulting archive is
    /// independent of filesystem iteration order.
    pub fn add_dir<P: AsRef<Path>>(&mut self, root: P) -> Result<&mut Self> {
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::CorruptArchive {
                reason: format!("directory walk failed: {e}"),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let data = std::fs::read(entry.path())?;
            self.add(&name, data)?;
        }
        Ok(self)
    }

    /// Serialize the accumulated entries into archive bytes.
    pub fn build(&self) -> Result<Vec<u8>> {
        let count = self.entries.len();
        if count > usize::from(u16::MAX) {
            return Err(Error::TooManyEntries { count });
        }

        // Compress payloads first; an entry falls back to raw storage when
        // compression does not shrink it.
        let mut stored: Vec<(CompressionMethod, &[u8], Vec<u8>)> = Vec::with_capacity(count);
        for (name, data) in self.entries.values() {
            let (method, bytes) = if self.method == CompressionMethod::None
                || data.len() < self.threshold
            {
                (CompressionMethod::None, data.clone())
            } else {
                let compressed = self.method.compress(data)?;
                if compressed.len() < data.len() {
                    (self.method, compressed)
                } else {
                    (CompressionMethod::None, data.clone())
                }
            };
            if bytes.len() > MAX_ENTRY_SIZE {
                return Err(Error::EntryTooLarge {
                    name: name.clone(),
                    size: bytes.len(),
                });
            }
            stored.push((method, data, bytes));
        }

        // Directory, then payloads in the same order.
        let mut body = ByteWriter::with_capacity(
            count * DIR_ENTRY_SIZE + stored.iter().map(|(_, _, b)| b.len()).sum::<usize>(),
        );
        for (&hash, (method, data, bytes)) in self.entries.keys().zip(&stored) {
            body.write_u32(hash);
            body.write_u8(method.to_flags());
            body.write_u24(data.len() as u32);
            body.write_u24(bytes.len() as u32);
        }
        for (_, _, bytes) in &stored {
            body.write_bytes(bytes);
        }

        let mut out = ByteWriter::with_capacity(HEADER_SIZE + body.len());
        out.write_bytes(&MAGIC);
        out.write_u16(VERSION);
        out.write_u32(crc32fast::hash(body.as_slice()));
        out.write_u16(count as u16);
        out.write_bytes(body.as_slice());

        tracing::debug!(count, size = out.len(), "built archive");
        Ok(out.into_vec())
    }

    /// Serialize and write the archive to disk.
    pub fn build_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.build()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::archive::Archive;

    fn sample_builder() -> ArchiveBuilder {
        let mut builder = ArchiveBuilder::new();
        builder
            .add("varp.dat", b"varp payload varp payload varp payload varp".to_vec())
            .unwrap();
        builder.add("title.dat", b"tiny".to_vec()).unwrap();
        builder
    }

    #[test]
    fn open_read_roundtrip() {
        let archive = Archive::open(sample_builder().build().unwrap()).unwrap();
        assert_eq!(archive.entry_count(), 2);
        assert!(archive.contains("VARP.DAT"));
        assert_eq!(
            archive.read("varp.dat").unwrap(),
            b"varp payload varp payload varp payload varp"
        );
        assert_eq!(archive.read("title.dat").unwrap(), b"tiny");
    }

    #[test]
    fn roundtrip_with_each_method() {
        for method in [
            CompressionMethod::None,
            CompressionMethod::Zlib,
            CompressionMethod::Lz4,
        ] {
            let mut builder = ArchiveBuilder::new().with_method(method).with_threshold(0);
            let payload = b"loc loc loc loc loc loc loc loc loc loc loc".repeat(4);
            builder.add("loc.dat", payload.clone()).unwrap();
            let archive = Archive::open(builder.build().unwrap()).unwrap();
            assert_eq!(archive.read("loc.dat").unwrap(), payload, "{method:?}");
        }
    }

    #[test]
    fn tiny_entries_are_stored_raw() {
        let archive = Archive::open(sample_builder().build().unwrap()).unwrap();
        let entry = &archive.entries()[1];
        assert_eq!(entry.compression, CompressionMethod::None);
        assert_eq!(entry.stored_size, entry.uncompressed_size);
    }

    #[test]
    fn packing_is_deterministic() {
        assert_eq!(
            sample_builder().build().unwrap(),
            sample_builder().build().unwrap()
        );
    }

    #[test]
    fn duplicate_names_collide_case_insensitively() {
        let mut builder = sample_builder();
        let err = builder.add("Varp.Dat", b"again".to_vec()).unwrap_err();
        assert!(matches!(err, Error::DuplicateEntry { .. }));
    }

    #[test]
    fn missing_entry_is_not_found() {
        let archive = Archive::open(sample_builder().build().unwrap()).unwrap();
        let err = archive.read("npc.dat").unwrap_err();
        assert!(matches!(err, Error::EntryNotFound { name } if name == "npc.dat"));
    }

    #[test]
    fn flipped_payload_byte_fails_checksum() {
        let mut bytes = sample_builder().build().unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xff;
        let err = Archive::open(bytes).unwrap_err();
        assert!(matches!(err, Error::ChecksumMismatch { .. }));
    }

    #[test]
    fn truncated_payload_is_corrupt() {
        let mut bytes = sample_builder().build().unwrap();
        bytes.truncate(bytes.len() - 2);
        // Re-stamp the crc so the truncation itself is what gets caught.
        let crc = crc32fast::hash(&bytes[HEADER_SIZE..]);
        bytes[6..10].copy_from_slice(&crc.to_be_bytes());
        let err = Archive::open(bytes).unwrap_err();
        assert!(matches!(err, Error::CorruptArchive { .. }));
    }

    #[test]
    fn file_shorter_than_header_is_corrupt() {
        let err = Archive::open(vec![b'J', b'A', b'G']).unwrap_err();
        assert!(matches!(err, Error::CorruptArchive { .. }));
    }

    #[test]
    fn truncated_directory_is_corrupt() {
        let mut bytes = sample_builder().build().unwrap();
        bytes.truncate(HEADER_SIZE + DIR_ENTRY_SIZE + 3);
        // Re-stamp the crc so the truncation itself is what gets caught.
        let crc = crc32fast::hash(&bytes[HEADER_SIZE..]);
        bytes[6..10].copy_from_slice(&crc.to_be_bytes());
        let err = Archive::open(bytes).unwrap_err();
        assert!(matches!(err, Error::CorruptArchive { .. }));
    }

    #[test]
    fn bad_magic_is_rejected() {
        let mut bytes = sample_builder().build().unwrap();
        bytes[0] = b'X';
        assert!(matches!(
            Archive::open(bytes).unwrap_err(),
            Error::InvalidArchiveMagic
        ));
    }
}
