//! roster-mock server binary.
//!
//! Reads `roster-mock.toml` (or the path given with `--config`) plus
//! `ROSTER_*` environment variables and serves the mock API over HTTP.
//!
//! ```
//! cargo run -p roster-api --bin roster-mock -- --config roster-mock.toml
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use roster_api::{AppState, Directory, ServerConfig};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Roster mock API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "roster-mock.toml")]
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

  // Load configuration.
  let settings = config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 3000)?
    .set_default("seed", true)?
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("ROSTER"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let state = if server_cfg.seed {
    AppState::seeded()
  } else {
    AppState::new(Directory::new())
  };

  let app = roster_api::app(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}/api");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
