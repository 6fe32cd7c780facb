//! Tag-dispatch config record engine
//!
//! Every config category (variables, objects, NPCs, locations, ...) stores
//! its records in one archive entry with the same wire shape: a leading
//! `u16` record count, then `count` records, each a sequence of
//! `(opcode u8, opcode-specific payload)` pairs terminated by opcode 0.
//! Opcodes are local to a category; one category's opcode 2 has nothing to
//! do with another's. The self-describing tagging lets the format grow new
//! optional fields without breaking old data, as long as every reader
//! understands a superset of what the packer ever emitted.
//!
//! There is no generic way to skip an unrecognized opcode: payload widths
//! are opcode-specific and not declared in-line, so a single unknown opcode
//! desynchronizes the cursor for the rest of the stream. Decoding therefore
//! treats it as fatal ([`Error::UnrecognizedOpcode`]) after a loud
//! diagnostic, rather than logging and limping on.
//!
//! Categories implement [`ConfigType`]; the decode loop and the
//! count-prefixed registry framing live here and are never reimplemented per
//! category.

pub mod loc;
pub mod npc;
pub mod obj;
pub mod varp;

pub use loc::LocType;
pub use npc::NpcType;
pub use obj::ObjType;
pub use varp::VarpType;

use crate::archive::Archive;
use crate::buffer::{ByteReader, ByteWriter};
use crate::error::{Error, Result};

/// One config category's record type and decode table.
pub trait ConfigType: Sized {
    /// Category name used in diagnostics (e.g. `"varp"`).
    const CATEGORY: &'static str;

    /// Conventional archive entry holding this category (e.g. `"varp.dat"`).
    const ENTRY_NAME: &'static str;

    /// Construct an empty record. Every field starts at its category
    /// default; `decode` fills in whatever the stream carries.
    fn with_id(id: u16) -> Self;

    /// The record's dense, zero-based id.
    fn id(&self) -> u16;

    /// Read the payload of one already-consumed opcode and apply it.
    ///
    /// Implementations must return [`Self::unrecognized`] for opcodes
    /// outside their table.
    fn decode(&mut self, opcode: u8, buf: &mut ByteReader<'_>) -> Result<()>;

    /// Write this record's non-default fields as (opcode, payload) pairs.
    /// The record terminator is owned by the framing, not by `encode`.
    fn encode(&self, out: &mut ByteWriter);

    /// Build the fatal unrecognized-opcode error, logging the diagnostic
    /// (category, opcode, record id, cursor offset) on the way out.
    fn unrecognized(&self, opcode: u8, buf: &ByteReader<'_>) -> Error {
        tracing::error!(
            category = Self::CATEGORY,
            opcode,
            id = self.id(),
            offset = buf.pos(),
            "unrecognized config opcode; stream cannot be resynchronized"
        );
        Error::UnrecognizedOpcode {
            category: Self::CATEGORY,
            opcode,
            id: self.id(),
        }
    }
}

/// Decode a single record: run the category's dispatch until the zero
/// terminator. Bytes after the terminator belong to the next record.
pub fn decode_record<T: ConfigType>(id: u16, buf: &mut ByteReader<'_>) -> Result<T> {
    let mut record = T::with_id(id);
    loop {
        let opcode = buf.read_u8()?;
        if opcode == 0 {
            break;
        }
        record.decode(opcode, buf)?;
    }
    Ok(record)
}

/// An immutable, densely-indexed collection of one category's records.
///
/// Built once at startup from the category's archive entry and read-only
/// afterward; hand it by reference to whatever needs lookups. A load either
/// fully succeeds or yields nothing; no partial registry is ever published.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    records: Vec<T>,
}

impl<T: ConfigType> Registry<T> {
    /// Load a registry from a category entry's bytes: a `u16` record count,
    /// then exactly that many terminated records.
    ///
    /// # Errors
    /// Returns [`Error::CorruptArchive`] when the bytes hold fewer than
    /// `count` complete records, or more bytes than `count` records explain.
    pub fn load(data: &[u8]) -> Result<Self> {
        let mut buf = ByteReader::new(data);
        let count = buf.read_u16()?;

        let mut records = Vec::with_capacity(usize::from(count));
        for id in 0..count {
            let record = decode_record(id, &mut buf).map_err(|e| match e {
                Error::OutOfBounds { .. } | Error::MalformedString { .. } => {
                    Error::CorruptArchive {
                        reason: format!(
                            "{}: record {id} of {count} is truncated: {e}",
                            T::CATEGORY
                        ),
                    }
                }
                other => other,
            })?;
            records.push(record);
        }

        if !buf.is_empty() {
            return Err(Error::CorruptArchive {
                reason: format!(
                    "{}: {} trailing bytes after record {count}",
                    T::CATEGORY,
                    buf.remaining()
                ),
            });
        }

        tracing::debug!(category = T::CATEGORY, count, "loaded config registry");
        Ok(Self { records })
    }

    /// Locate this category's entry in an archive and load it.
    ///
    /// A missing entry surfaces as [`Error::EntryNotFound`]; whether that is
    /// fatal is the caller's category policy, not this function's.
    pub fn load_archive(archive: &Archive) -> Result<Self> {
        Self::load(&archive.read(T::ENTRY_NAME)?)
    }

    /// Bounds-checked lookup by id.
    pub fn get(&self, id: u16) -> Result<&T> {
        self.records
            .get(usize::from(id))
            .ok_or(Error::UnknownId {
                category: T::CATEGORY,
                id,
                count: self.records.len(),
            })
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the registry holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in id order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    /// All records, in id order.
    #[must_use]
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Pack-mode inverse of [`load`](Self::load): serialize records (ordered
    /// by id) into category entry bytes.
    pub fn pack(records: &[T]) -> Result<Vec<u8>> {
        if records.len() > usize::from(u16::MAX) {
            return Err(Error::TooManyEntries {
                count: records.len(),
            });
        }
        let mut out = ByteWriter::new();
        out.write_u16(records.len() as u16);
        for record in records {
            record.encode(&mut out);
            out.write_u8(0);
        }
        Ok(out.into_vec())
    }
}

impl<'a, T: ConfigType> IntoIterator for &'a Registry<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
