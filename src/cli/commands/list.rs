//! CLI command: list archive entries

use std::path::Path;

use crate::archive::Archive;

/// Print the directory of an archive
pub fn run(path: &Path) -> anyhow::Result<()> {
    let archive = Archive::open_path(path)?;

    println!("Archive: {}", path.display());
    println!("Entries: {}", archive.entry_count());
    println!();
    println!("{:>10}  {:<6} {:>10} {:>10}  ratio", "hash", "method", "stored", "size");

    for entry in archive.entries() {
        let ratio = if entry.stored_size > 0 {
            entry.uncompressed_size as f64 / entry.stored_size as f64
        } else {
            1.0
        };
        println!(
            "{:>10x}  {:<6} {:>10} {:>10}  {ratio:.2}x",
            entry.name_hash,
            entry.compression.as_str(),
            entry.stored_size,
            entry.uncompressed_size,
        );
    }

    Ok(())
}
