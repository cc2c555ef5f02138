mod cli;
mod commands;
mod display;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::commands::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("clausewise v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let mut app = App::from_cli(&cli)?;
    app.run(cli.command).await
}
