//! A small read-only JSON API.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/api/apps` | Optional `?q=<query>`, same matching as the home page |
//! | `GET`  | `/api/scores` | Optional `?limit=<n>`, default 10, at most 100 |

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;
use solute_core::{
  catalog::{self, AppInfo},
  score::{ScoreRecord, ScoreStore},
};

use super::home::SearchParams;
use crate::{AppState, Error};

const DEFAULT_LIMIT: usize = 10;
const MAX_LIMIT: usize = 100;

/// `GET /api/apps[?q=<query>]`
pub async fn list_apps(Query(params): Query<SearchParams>) -> Json<Vec<&'static AppInfo>> {
  Json(catalog::search(&params.q))
}

#[derive(Debug, Deserialize, Default)]
pub struct ScoreParams {
  pub limit: Option<usize>,
}

/// `GET /api/scores[?limit=<n>]`
pub async fn top_scores<B, S>(
  State(state): State<AppState<B, S>>,
  Query(params): Query<ScoreParams>,
) -> Result<Json<Vec<ScoreRecord>>, Error>
where
  S: ScoreStore,
{
  let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
  let scores = state.scores.top(limit).await.map_err(Error::store)?;
  Ok(Json(scores))
}
