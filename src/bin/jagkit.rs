//! jagkit command-line binary

fn main() -> anyhow::Result<()> {
    jagkit::cli::run_cli()
}
