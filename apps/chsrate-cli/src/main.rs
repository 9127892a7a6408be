//! CHS Rate CLI binary

use std::io;

use chsrate_cli::{run, Cli};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries JSON and file paths, so logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    tracing::debug!("chsrate v{}", env!("CARGO_PKG_VERSION"));

    let stdout = io::stdout();
    run(cli, &mut stdout.lock())
}
