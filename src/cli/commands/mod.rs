use std::path::PathBuf;
use std::str::FromStr;

use clap::Subcommand;

use crate::archive::CompressionMethod;

pub mod check;
pub mod list;
pub mod pack;
pub mod unpack;

/// Compression method argument for `pack`
#[derive(Debug, Clone, Copy)]
pub struct MethodArg(pub CompressionMethod);

impl FromStr for MethodArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "store" | "raw" => Ok(MethodArg(CompressionMethod::None)),
            "zlib" | "deflate" => Ok(MethodArg(CompressionMethod::Zlib)),
            "lz4" => Ok(MethodArg(CompressionMethod::Lz4)),
            _ => Err(format!(
                "Invalid method '{s}'. Valid values: none, zlib, lz4"
            )),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the entries of an archive
    List {
        /// Source archive file
        archive: PathBuf,
    },

    /// Extract one entry from an archive
    Unpack {
        /// Source archive file
        archive: PathBuf,

        /// Entry name (e.g. "varp.dat")
        name: String,

        /// Output file (defaults to the entry name in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build an archive from the files in a directory
    Pack {
        /// Source directory; each file becomes one entry, keyed by file name
        source: PathBuf,

        /// Output archive file
        destination: PathBuf,

        /// Per-entry compression method
        #[arg(long, default_value = "zlib")]
        method: MethodArg,

        /// Minimum payload size for compression to be attempted
        #[arg(long)]
        threshold: Option<usize>,
    },

    /// Load every known config registry from an archive, as a startup would
    Check {
        /// Source archive file
        archive: PathBuf,
    },
}

impl Commands {
    /// Execute the selected command
    pub fn execute(self) -> anyhow::Result<()> {
        match self {
            Commands::List { archive } => list::run(&archive),
            Commands::Unpack {
                archive,
                name,
                output,
            } => unpack::run(&archive, &name, output.as_deref()),
            Commands::Pack {
                source,
                destination,
                method,
                threshold,
            } => pack::run(&source, &destination, method.0, threshold),
            Commands::Check { archive } => check::run(&archive),
        }
    }
}
