//! CLI command: extract one archive entry

use std::path::Path;

use crate::archive::Archive;

/// Extract `name` from the archive at `path`
pub fn run(path: &Path, name: &str, output: Option<&Path>) -> anyhow::Result<()> {
    let archive = Archive::open_path(path)?;
    let data = archive.read(name)?;

    let output = output.map_or_else(|| Path::new(name).to_path_buf(), Path::to_path_buf);
    std::fs::write(&output, &data)?;

    println!("Wrote {} ({} bytes)", output.display(), data.len());
    Ok(())
}
