//! manitto-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! configured record store, and serves the Manitto API over HTTP.
//!
//! Every setting can also be given as a `MANITTO_*` environment variable,
//! e.g. `MANITTO_PORT=8080` or `MANITTO_STORE=sqlite`.

use std::path::PathBuf;

use clap::Parser;
use manitto_server::ServerConfig;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Manitto matching server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let config = ServerConfig::load(&cli.config)?;

  manitto_server::serve(config).await
}
