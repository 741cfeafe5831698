//! `roster`: terminal UI for the Roster user directory.
//!
//! # Usage
//!
//! ```
//! roster                                   # local list cached in ./roster.db
//! roster --remote --url http://localhost:3000/api --token abc
//! roster --config ~/.config/roster/config.toml --log /tmp/roster.log
//! ```

mod app;
mod ui;

use std::{
  io,
  path::{Path, PathBuf},
  sync::{Arc, Mutex},
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use roster_client::{ApiClient, ApiConfig};
use roster_store::SqliteKv;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_STORE: &str = "roster.db";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "roster", about = "Terminal UI for the Roster user directory")]
struct Args {
  /// Path to a TOML config file (url, token, store, remote).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the API, endpoints are appended verbatim.
  #[arg(long, env = "ROSTER_API_BASE_URL")]
  url: Option<String>,

  /// Bearer token sent with every request.
  #[arg(long, env = "ROSTER_API_TOKEN")]
  token: Option<String>,

  /// SQLite file caching the user list (default: ./roster.db).
  #[arg(long, value_name = "FILE", env = "ROSTER_STORE")]
  store: Option<PathBuf>,

  /// Mirror changes to the API instead of working only on the cache.
  #[arg(long)]
  remote: bool,

  /// Write logs to FILE. Nothing is logged otherwise.
  #[arg(long, value_name = "FILE")]
  log: Option<PathBuf>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:    String,
  #[serde(default)]
  token:  String,
  #[serde(default)]
  store:  String,
  #[serde(default)]
  remote: bool,
}

fn non_empty(s: &str) -> Option<String> {
  (!s.is_empty()).then(|| s.to_string())
}

// ─── Logging ──────────────────────────────────────────────────────────────────

/// Route tracing output to `path`; the terminal belongs to the UI.
fn init_logging(path: &Path) -> Result<()> {
  let file = std::fs::File::create(path)
    .with_context(|| format!("creating log file {}", path.display()))?;
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(Mutex::new(file))
    .with_ansi(false)
    .init();
  Ok(())
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  if let Some(path) = &args.log {
    init_logging(path)?;
  }

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let store_path = args
    .store
    .or_else(|| non_empty(&file_cfg.store).map(PathBuf::from))
    .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE));
  let store = SqliteKv::open(&store_path)
    .with_context(|| format!("opening store {}", store_path.display()))?;

  let client = if args.remote || file_cfg.remote {
    let config = args
      .url
      .or_else(|| non_empty(&file_cfg.url))
      .map(ApiConfig::new)
      .unwrap_or_default();
    let mut client = ApiClient::new(config).context("building HTTP client")?;
    if let Some(token) = args.token.or_else(|| non_empty(&file_cfg.token)) {
      client.set_auth_token(&token).context("setting auth token")?;
    }
    tracing::info!(base_url = client.base_url(), "remote mode");
    Some(client)
  } else {
    None
  };

  let mut app = App::new(Arc::new(store), client);
  app.load().await;

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event
      && !app.handle_key(key).await
    {
      break;
    }
  }

  Ok(())
}
