//! HTTP server for Manitto.
//!
//! Loads [`ServerConfig`], opens the configured record store, and serves the
//! JSON API under `/api`.

use std::{
  net::SocketAddr,
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use axum::Router;
use manitto_core::RecordStore;
use manitto_store_json::JsonFileStore;
use manitto_store_sqlite::SqliteStore;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Which record store backend to open.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
  /// `participants.json` and `matches.json` under `data_dir`.
  #[default]
  Json,
  /// A single SQLite file at `sqlite_path`.
  Sqlite,
}

/// Runtime server configuration, deserialised from `config.toml` and
/// `MANITTO_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:        String,
  pub port:        u16,
  pub store:       StoreKind,
  pub data_dir:    PathBuf,
  pub sqlite_path: PathBuf,
}

impl ServerConfig {
  /// Layer defaults, the optional config file, then the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 5000_i64)?
      .set_default("store", "json")?
      .set_default("data_dir", "data")?
      .set_default("sqlite_path", "data/manitto.db")?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("MANITTO"))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the application router for `store`, with request tracing.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: RecordStore + 'static,
{
  Router::new()
    .nest("/api", manitto_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}

// ─── Serving ──────────────────────────────────────────────────────────────────

/// Open the configured store and serve until the process is stopped.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
  let app = match config.store {
    StoreKind::Json => {
      let data_dir = expand_tilde(&config.data_dir);
      tracing::info!(path = ?data_dir, "using JSON file store");
      router(Arc::new(JsonFileStore::new(data_dir)))
    }
    StoreKind::Sqlite => {
      let path = expand_tilde(&config.sqlite_path);
      if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
          .await
          .with_context(|| format!("failed to create {parent:?}"))?;
      }
      let store = SqliteStore::open(&path)
        .await
        .with_context(|| format!("failed to open store at {path:?}"))?;
      tracing::info!(path = ?path, "using SQLite store");
      router(Arc::new(store))
    }
  };

  let address = config.address();
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  let local: SocketAddr = listener.local_addr()?;

  tracing::info!("Listening on http://{local}");
  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Tests ────────────────────────────────────────────────────────────────────
