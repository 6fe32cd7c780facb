//! CLI command: build an archive from a directory

use std::path::Path;

use crate::archive::{ArchiveBuilder, CompressionMethod};

/// Pack every file under `source` into an archive at `destination`
pub fn run(
    source: &Path,
    destination: &Path,
    method: CompressionMethod,
    threshold: Option<usize>,
) -> anyhow::Result<()> {
    let mut builder = ArchiveBuilder::new().with_method(method);
    if let Some(threshold) = threshold {
        builder = builder.with_threshold(threshold);
    }
    builder.add_dir(source)?;

    let bytes = builder.build()?;
    std::fs::write(destination, &bytes)?;

    println!(
        "Packed {} entries into {} ({} bytes, {})",
        builder.entry_count(),
        destination.display(),
        bytes.len(),
        method.as_str(),
    );
    Ok(())
}
