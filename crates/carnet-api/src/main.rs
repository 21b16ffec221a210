//! carnet-api server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! store, and serves the contact-intake API over HTTP. Every key can be
//! overridden with a `CARNET_`-prefixed environment variable
//! (e.g. `CARNET_PORT=8080`).

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use carnet_api::{AppState, ServerConfig, router};
use carnet_store_sqlite::SqliteStore;

#[derive(Parser)]
#[command(author, version, about = "Carnet contact-intake server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration. The file is optional; defaults cover local use.
  let settings = config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 3000_i64)?
    .set_default("store_path", "carnet.db")?
    .set_default("environment", "production")?
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("CARNET"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Open the SQLite store.
  let store = SqliteStore::open(&server_cfg.store_path)
    .await
    .with_context(|| {
      format!("failed to open store at {:?}", server_cfg.store_path)
    })?;

  let state = AppState {
    store:  Arc::new(store.clone()),
    config: Arc::new(server_cfg.clone()),
  };

  let app = router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  // Release the storage connection before exiting.
  store.close().await.context("failed to close store")?;
  tracing::info!("shut down cleanly");

  Ok(())
}

async fn shutdown_signal() {
  if tokio::signal::ctrl_c().await.is_ok() {
    tracing::info!("shutdown signal received");
  }
}
