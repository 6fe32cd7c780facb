//! Error types for `jagkit`

use thiserror::Error;

/// The error type for `jagkit` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Cursor Errors ====================
    /// A fixed-width read ran past the end of the buffer.
    #[error("read out of bounds: wanted {wanted} bytes, {remaining} remaining")]
    OutOfBounds {
        /// Number of bytes the read needed.
        wanted: usize,
        /// Number of bytes left in the buffer.
        remaining: usize,
    },

    /// A string read reached the end of the buffer without a NUL terminator.
    #[error("malformed string: no terminator before end of buffer (started at offset {offset})")]
    MalformedString {
        /// Byte offset where the string read started.
        offset: usize,
    },

    /// A bit-mode read ran past the end of the buffer.
    #[error("bit read out of bounds: wanted {wanted} bits, {remaining} remaining")]
    BitOverflow {
        /// Number of bits the read needed.
        wanted: usize,
        /// Number of bits left in the buffer.
        remaining: usize,
    },

    // ==================== Archive Errors ====================
    /// The data is not a valid cache archive (missing JAGF magic).
    #[error("invalid archive magic: expected JAGF")]
    InvalidArchiveMagic,

    /// The archive format version is not supported.
    #[error("unsupported archive version: {version}")]
    UnsupportedArchiveVersion {
        /// The version number found in the header.
        version: u16,
    },

    /// The archive checksum does not match its contents.
    #[error("archive checksum mismatch: header says {expected:#010x}, computed {actual:#010x}")]
    ChecksumMismatch {
        /// The crc32 declared in the header.
        expected: u32,
        /// The crc32 computed over the directory and payloads.
        actual: u32,
    },

    /// The archive directory is inconsistent with the data that follows it.
    #[error("corrupt archive: {reason}")]
    CorruptArchive {
        /// Description of the inconsistency.
        reason: String,
    },

    /// A decompressed entry does not match its declared uncompressed size.
    #[error("entry size mismatch: directory declares {declared} bytes, got {actual}")]
    SizeMismatch {
        /// The uncompressed size declared in the directory.
        declared: usize,
        /// The actual decompressed length.
        actual: usize,
    },

    /// The entry flags name a compression method this reader does not know.
    #[error("unsupported compression method: {method}")]
    UnsupportedCompression {
        /// The method nibble from the entry flags.
        method: u8,
    },

    /// Decompression of an entry payload failed.
    #[error("decompression failed: {message}")]
    Decompression {
        /// The error message from the decompressor.
        message: String,
    },

    /// No entry with the requested name exists in the archive.
    #[error("entry not found in archive: {name}")]
    EntryNotFound {
        /// The requested entry name.
        name: String,
    },

    /// Two entries with the same (case-normalized) name were added to a builder.
    #[error("duplicate archive entry: {name}")]
    DuplicateEntry {
        /// The colliding entry name.
        name: String,
    },

    /// An entry payload does not fit the directory's 24-bit size fields.
    #[error("archive entry too large: {name} is {size} bytes (limit 16777215)")]
    EntryTooLarge {
        /// The offending entry name.
        name: String,
        /// The payload size in bytes.
        size: usize,
    },

    /// More entries or records than a 16-bit count field can hold.
    #[error("too many entries: {count}")]
    TooManyEntries {
        /// Number of entries provided.
        count: usize,
    },

    // ==================== Config Errors ====================
    /// A registry lookup used an id outside the loaded range.
    #[error("unknown {category} id {id} (registry holds {count} records)")]
    UnknownId {
        /// The config category name.
        category: &'static str,
        /// The requested id.
        id: u16,
        /// Number of records in the registry.
        count: usize,
    },

    /// A config record contained an opcode the category's decode table does
    /// not understand. Fatal: payload widths are opcode-specific, so the
    /// cursor cannot be resynchronized for the rest of the stream.
    #[error("unrecognized {category} opcode {opcode} in record {id}")]
    UnrecognizedOpcode {
        /// The config category name.
        category: &'static str,
        /// The offending opcode byte.
        opcode: u8,
        /// Id of the record being decoded.
        id: u16,
    },
}

/// A specialized Result type for `jagkit` operations.
pub type Result<T> = std::result::Result<T, Error>;
