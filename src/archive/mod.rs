//! Cache archive container format reader/writer
//!
//! An archive is a flat container of named binary blobs ("entries"), used to
//! ship config data and other assets as a single distributed file. Layout,
//! format version 1, all integers big-endian:
//!
//! ```text
//! header:    magic "JAGF" | version u16 | crc32 u32 | entry count u16
//! directory: per entry: name hash u32 | flags u8 | uncompressed u24 | stored u24
//! payloads:  entry payloads in directory order, no padding
//! ```
//!
//! Entry names are addressed by a case-normalized hash, so lookups are
//! case-insensitive. The crc32 covers everything after the header and is
//! verified on open. The flags byte's low nibble selects the per-entry
//! compression method; an entry is stored raw when compression would not
//! shrink it. Packing is deterministic: the same inputs and settings always
//! produce a byte-identical archive.

mod reader;
mod types;
mod writer;

pub use reader::Archive;
pub use types::{CompressionMethod, EntryInfo};
pub use writer::ArchiveBuilder;

/// Archive magic bytes.
pub const MAGIC: [u8; 4] = [b'J', b'A', b'G', b'F'];

/// Current archive format version.
pub const VERSION: u16 = 1;

/// Size of the fixed header in bytes.
pub const HEADER_SIZE: usize = 12;

/// Size of one directory entry in bytes.
pub const DIR_ENTRY_SIZE: usize = 11;

/// Largest payload the directory's 24-bit size fields can describe.
pub const MAX_ENTRY_SIZE: usize = 0x00ff_ffff;

/// Hash an entry name into its directory key.
///
/// The name is ASCII-uppercased first, so `VARP.DAT` and `varp.dat` collide
/// by design.
#[must_use]
pub fn entry_hash(name: &str) -> u32 {
    let mut hash = 0u32;
    for b in name.to_ascii_uppercase().bytes() {
        hash = hash
            .wrapping_mul(61)
            .wrapping_add(u32::from(b))
            .wrapping_sub(32);
    }
    hash
}
