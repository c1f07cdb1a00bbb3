//! Solute server binary.
//!
//! Reads `solute.toml` (or `--config`) plus `SOLUTE_*` environment variables
//! for server settings, and `secrets.toml` (or `--secrets`) plus the plain
//! environment for API keys. Refuses to start without a Gemini key.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use solute_genai::{HostedBackend, HostedConfig};
use solute_store_sqlite::SqliteScoreStore;
use solute_web::{AppState, Secrets, ServerConfig};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Solute AI app hub")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "solute.toml")]
  config: PathBuf,

  /// Path to the TOML file holding API keys.
  #[arg(short, long, default_value = "secrets.toml")]
  secrets: PathBuf,
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

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("SOLUTE"))
    .build()
    .context("failed to read config file")?;
  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let secrets: Secrets = config::Config::builder()
    .add_source(config::File::from(cli.secrets).required(false))
    .build()
    .context("failed to read secrets file")?
    .try_deserialize()
    .context("failed to deserialise secrets")?;
  let secrets = secrets.with_env(|name| std::env::var(name).ok());

  let gemini_api_key = match secrets.require_gemini() {
    Ok(key) => key.to_owned(),
    Err(e) => {
      tracing::error!("{e}; set it in the secrets file or the environment");
      anyhow::bail!("{e}");
    }
  };

  let backend = HostedBackend::new(HostedConfig {
    gemini_api_key,
    gemini_model: server_cfg.gemini_model.clone(),
    replicate_token: secrets.replicate_api_token,
    removebg_key: secrets.removebg_api_key,
    timeout: None,
  })
  .context("failed to build the HTTP client")?;

  let store_path = expand_tilde(&server_cfg.store_path);
  let scores = SqliteScoreStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open score store at {store_path:?}"))?;

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  let app = solute_web::router(AppState::new(backend, scores, server_cfg));

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
