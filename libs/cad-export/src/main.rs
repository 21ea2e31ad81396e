//! `cad-export` binary: exports or live-reloads the built-in demo models.

use std::io;

use cad_export::{cli, demo};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "cad_export=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = cli::Cli::parse();
    let registry = demo::registry(cli.params.clone())?;
    cli::run(&cli, &registry, &mut io::stdout().lock())?;
    Ok(())
}
