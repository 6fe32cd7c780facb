//! # jagkit
//!
//! A pure-Rust library for the cache archive container and config codec of
//! retro MMO game data.
//!
//! The cache ships game-definition data as archives of named binary blobs.
//! Inside each config entry, records are self-describing tagged sequences:
//! `(opcode, payload)` pairs ending in opcode 0, with a per-category opcode
//! table. Client and server both decode these bytes at startup and must
//! agree byte-for-byte, so the decoder here is the single source of truth
//! for the wire shape; the offline packer uses the matching write mode.
//!
//! ## Quick Start
//!
//! ### Reading config registries from an archive
//!
//! ```no_run
//! use jagkit::archive::Archive;
//! use jagkit::config::{Registry, VarpType};
//!
//! let archive = Archive::open_path("config.jag")?;
//! let varps = Registry::<VarpType>::load_archive(&archive)?;
//! println!("{} varps", varps.len());
//! let varp = varps.get(16)?;
//! # Ok::<(), jagkit::Error>(())
//! ```
//!
//! ### Packing an archive
//!
//! ```no_run
//! use jagkit::archive::ArchiveBuilder;
//! use jagkit::config::{ConfigType, Registry, VarpType};
//!
//! let varps = vec![VarpType::with_id(0)];
//! let mut builder = ArchiveBuilder::new();
//! builder.add("varp.dat", Registry::pack(&varps)?)?;
//! builder.build_to_path("config.jag")?;
//! # Ok::<(), jagkit::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `jagkit` command-line binary

pub mod archive;
pub mod buffer;
pub mod compression;
pub mod config;
pub mod error;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::archive::{Archive, ArchiveBuilder, CompressionMethod};
    pub use crate::buffer::{ByteReader, ByteWriter};
    pub use crate::config::{ConfigType, LocType, NpcType, ObjType, Registry, VarpType};
    pub use crate::error::{Error, Result};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
