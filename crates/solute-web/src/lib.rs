//! HTTP layer for the Solute app hub.
//!
//! Exposes an axum [`Router`] serving the home page, every registered app,
//! the workspace apps, MindGames and a small JSON API, backed by any
//! [`GenerativeBackend`] and [`ScoreStore`].

pub mod cache;
pub mod error;
pub mod handlers;
pub mod render;
pub mod run;
pub mod session;

pub use error::Error;

use std::{path::PathBuf, sync::Arc, time::Duration};

use axum::{
  Router,
  extract::DefaultBodyLimit,
  middleware,
  routing::{get, post},
};
use serde::Deserialize;
use solute_core::{backend::GenerativeBackend, score::ScoreStore};
use tower_http::trace::TraceLayer;

use cache::CutoutCache;
use handlers::{api, apps, games, home, workspaces};
use session::Sessions;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `solute.toml` and
/// `SOLUTE_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:              String,
  pub port:              u16,
  pub store_path:        PathBuf,
  /// Overrides the default Gemini model when set.
  pub gemini_model:      Option<String>,
  pub max_upload_bytes:  usize,
  pub session_cookie:    String,
  /// Sessions idle this long are dropped.
  pub session_idle_secs: u64,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:              "127.0.0.1".into(),
      port:              8501,
      store_path:        PathBuf::from("scores.db"),
      gemini_model:      None,
      max_upload_bytes:  20 * 1024 * 1024,
      session_cookie:    "solute_session".into(),
      session_idle_secs: 4 * 60 * 60,
    }
  }
}

/// API credentials, read from the secrets file and the plain environment.
///
/// The file may spell keys either way, e.g. `GEMINI_API_KEY` or
/// `gemini_api_key`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Secrets {
  #[serde(alias = "GEMINI_API_KEY")]
  pub gemini_api_key:      Option<String>,
  #[serde(alias = "REPLICATE_API_TOKEN")]
  pub replicate_api_token: Option<String>,
  #[serde(alias = "REMOVEBG_API_KEY")]
  pub removebg_api_key:    Option<String>,
}

impl Secrets {
  /// Override file values with `GEMINI_API_KEY`, `REPLICATE_API_TOKEN` and
  /// `REMOVEBG_API_KEY` when `lookup` has them.
  pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
    let set = |slot: &mut Option<String>, name: &str| {
      if let Some(value) = lookup(name).filter(|v| !v.trim().is_empty()) {
        *slot = Some(value);
      }
    };
    set(&mut self.gemini_api_key, "GEMINI_API_KEY");
    set(&mut self.replicate_api_token, "REPLICATE_API_TOKEN");
    set(&mut self.removebg_api_key, "REMOVEBG_API_KEY");
    self
  }

  /// The Gemini key; every app needs it, so its absence stops startup.
  pub fn require_gemini(&self) -> Result<&str, Error> {
    self
      .gemini_api_key
      .as_deref()
      .map(str::trim)
      .filter(|k| !k.is_empty())
      .ok_or(Error::MissingSecret("GEMINI_API_KEY"))
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<B, S> {
  pub backend:  Arc<B>,
  pub scores:   Arc<S>,
  pub sessions: Arc<Sessions>,
  pub cutouts:  Arc<CutoutCache>,
  pub config:   Arc<ServerConfig>,
}

impl<B, S> AppState<B, S> {
  pub fn new(backend: B, scores: S, config: ServerConfig) -> Self {
    Self {
      backend:  Arc::new(backend),
      scores:   Arc::new(scores),
      sessions: Arc::new(Sessions::new(Duration::from_secs(config.session_idle_secs))),
      cutouts:  Arc::new(CutoutCache::default()),
      config:   Arc::new(config),
    }
  }
}

// Manual impl: `B` and `S` themselves need not be `Clone`.
impl<B, S> Clone for AppState<B, S> {
  fn clone(&self) -> Self {
    Self {
      backend:  self.backend.clone(),
      scores:   self.scores.clone(),
      sessions: self.sessions.clone(),
      cutouts:  self.cutouts.clone(),
      config:   self.config.clone(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router.
pub fn router<B, S>(state: AppState<B, S>) -> Router
where
  B: GenerativeBackend + 'static,
  S: ScoreStore + 'static,
{
  let body_limit = state.config.max_upload_bytes;

  Router::new()
    // Home
    .route("/",                                  get(home::index::<B, S>))
    .route("/favorites/{slug}",                  post(home::toggle_favorite::<B, S>))
    // Apps
    .route("/apps/{slug}",                       get(apps::show::<B, S>).post(apps::submit::<B, S>))
    .route("/apps/{slug}/result.md",             get(apps::download::<B, S>))
    // Workspaces
    .route("/workspace/notes/challenge",         post(workspaces::challenge_notes::<B, S>))
    .route("/workspace/notes/export.json",       get(workspaces::export_notes::<B, S>))
    .route("/workspace/skills/{index}/refresh",  post(workspaces::refresh_skill::<B, S>))
    .route("/workspace/skills/export.json",      get(workspaces::export_skills::<B, S>))
    .route("/workspace/tasks/{id}/apply",        post(workspaces::apply_task::<B, S>))
    .route("/workspace/surveys/{id}",            get(workspaces::show_survey::<B, S>))
    .route("/workspace/surveys/{id}/respond",    post(workspaces::respond_survey::<B, S>))
    .route("/workspace/surveys/{id}/insights",   post(workspaces::survey_insights::<B, S>))
    // MindGames
    .route("/games",                             get(games::hub::<B, S>))
    .route("/games/reset",                       post(games::reset::<B, S>))
    .route("/games/scores",                      post(games::save_score::<B, S>))
    .route("/games/{variant}",                   get(games::show::<B, S>))
    .route("/games/{variant}/begin",             post(games::begin::<B, S>))
    .route("/games/{variant}/reveal",            post(games::reveal::<B, S>))
    .route("/games/{variant}/submit",            post(games::submit::<B, S>))
    .route("/games/{variant}/next",              post(games::next::<B, S>))
    // JSON API
    .route("/api/apps",                          get(api::list_apps))
    .route("/api/scores",                        get(api::top_scores::<B, S>))
    .fallback(handlers::not_found)
    .layer(middleware::from_fn_with_state(state.clone(), session::attach::<B, S>))
    .layer(DefaultBodyLimit::max(body_limit))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

#[cfg(test)]
mod tests;
