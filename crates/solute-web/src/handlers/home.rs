//! The home page: app grid, search and favorites.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/` | Optional `?q=<query>` |
//! | `POST` | `/favorites/{slug}` | Toggles, then redirects home |

use axum::{
  Extension,
  extract::{Path, Query, State},
  response::{Html, Response},
};
use serde::Deserialize;
use solute_core::catalog;

use super::see_other;
use crate::{AppState, Error, render, session::SessionId};

#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
  #[serde(default)]
  pub q: String,
}

/// `GET /[?q=<query>]`
pub async fn index<B, S>(
  State(state): State<AppState<B, S>>,
  Extension(session): Extension<SessionId>,
  Query(params): Query<SearchParams>,
) -> Html<String> {
  let favorites = state.sessions.with(session, |s| s.favorites.clone());
  let hits = catalog::search(&params.q);

  let mut body = String::from(
    "<h1>🧪 Solute</h1><p class=\"tagline\">A hub of small AI tools. Pick one below, search, or \
     star the ones you use most.</p>",
  );

  if !favorites.is_empty() {
    body.push_str("<h2>⭐ Favorites</h2><div class=\"grid\">");
    for info in favorites.apps() {
      body.push_str(&render::app_card(info, true));
    }
    body.push_str("</div>");
  }

  let query = params.q.trim();
  if query.is_empty() {
    body.push_str("<h2>All apps</h2>");
  } else {
    body.push_str(&format!("<h2>Results for “{}”</h2>", render::escape(query)));
  }

  if hits.is_empty() {
    body.push_str(&render::alert(render::Tone::Info, "No apps found matching that search."));
  } else {
    body.push_str("<div class=\"grid\">");
    for info in hits {
      body.push_str(&render::app_card(info, favorites.contains(info.slug)));
    }
    body.push_str("</div>");
  }

  render::page("Home", &body)
}

/// `POST /favorites/{slug}`
pub async fn toggle_favorite<B, S>(
  State(state): State<AppState<B, S>>,
  Extension(session): Extension<SessionId>,
  Path(slug): Path<String>,
) -> Result<Response, Error> {
  let now_favorite = state.sessions.with(session, |s| s.favorites.toggle(&slug))?;
  tracing::debug!(%slug, now_favorite, "toggled favorite");
  Ok(see_other("/"))
}
