//! CLI command: validate every known config registry in an archive
//!
//! Mirrors what a client or server boot does: locate each category's entry,
//! decode every record, and fail loudly on any corruption. A category with
//! no entry in the archive is reported and skipped; the tool has no way to
//! know whether a given deployment expects it.

use std::path::Path;

use crate::archive::Archive;
use crate::config::{ConfigType, LocType, NpcType, ObjType, Registry, VarpType};
use crate::error::Error;

/// Load all known category registries from the archive at `path`
pub fn run(path: &Path) -> anyhow::Result<()> {
    let archive = Archive::open_path(path)?;
    println!("Archive: {} ({} entries)", path.display(), archive.entry_count());

    check_category::<VarpType>(&archive)?;
    check_category::<ObjType>(&archive)?;
    check_category::<NpcType>(&archive)?;
    check_category::<LocType>(&archive)?;

    println!("OK");
    Ok(())
}

fn check_category<T: ConfigType>(archive: &Archive) -> anyhow::Result<()> {
    match Registry::<T>::load_archive(archive) {
        Ok(registry) => {
            println!("  {:<6} {} records", T::CATEGORY, registry.len());
            Ok(())
        }
        Err(Error::EntryNotFound { .. }) => {
            println!("  {:<6} (no {} entry)", T::CATEGORY, T::ENTRY_NAME);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
