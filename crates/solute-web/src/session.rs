//! Cookie-keyed, in-memory session state.
//!
//! Every request passes through [`attach`], which reads the session cookie
//! (minting a fresh id when absent or malformed) and stores the [`SessionId`]
//! in the request extensions. Nothing here survives a restart, and sessions
//! left idle longer than the configured timeout are dropped.

use std::{
  collections::HashMap,
  time::{Duration, Instant},
};

use axum::{
  extract::{Request, State},
  http::{HeaderValue, header},
  middleware::Next,
  response::Response,
};
use dashmap::DashMap;
use solute_core::{catalog::Favorites, game::GameSession, workspace::Workspaces};
use uuid::Uuid;

use crate::AppState;

/// The id of the browser session making a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

/// Everything one browser session holds.
#[derive(Debug, Clone, Default)]
pub struct Session {
  pub favorites:  Favorites,
  /// Last markdown result per app slug, for download.
  pub results:    HashMap<&'static str, String>,
  pub workspaces: Workspaces,
  pub games:      GameSession,
}

struct Entry {
  last_seen: Instant,
  session:   Session,
}

/// All live sessions.
pub struct Sessions {
  inner: DashMap<Uuid, Entry>,
  idle:  Duration,
}

impl Sessions {
  /// Sessions untouched for `idle` are evicted when a new one is created.
  pub fn new(idle: Duration) -> Self { Self { inner: DashMap::new(), idle } }

  /// Run `f` against the session, creating it on first use.
  ///
  /// The shard lock is held for the duration of `f`; never await inside.
  pub fn with<R>(&self, id: SessionId, f: impl FnOnce(&mut Session) -> R) -> R {
    self.with_at(id, Instant::now(), f)
  }

  fn with_at<R>(&self, id: SessionId, now: Instant, f: impl FnOnce(&mut Session) -> R) -> R {
    if !self.inner.contains_key(&id.0) {
      self.evict_idle(now);
    }
    let mut entry = self.inner.entry(id.0).or_insert_with(|| Entry {
      last_seen: now,
      session:   Session::default(),
    });
    entry.last_seen = now;
    f(&mut entry.session)
  }

  fn evict_idle(&self, now: Instant) {
    let before = self.inner.len();
    self
      .inner
      .retain(|_, e| now.saturating_duration_since(e.last_seen) < self.idle);
    let evicted = before.saturating_sub(self.inner.len());
    if evicted > 0 {
      tracing::debug!(evicted, "dropped idle sessions");
    }
  }

  pub fn len(&self) -> usize { self.inner.len() }

  pub fn is_empty(&self) -> bool { self.inner.is_empty() }
}

fn cookie_value<'a>(headers: &'a axum::http::HeaderMap, name: &str) -> Option<&'a str> {
  headers
    .get_all(header::COOKIE)
    .iter()
    .filter_map(|v| v.to_str().ok())
    .flat_map(|v| v.split(';'))
    .filter_map(|pair| pair.trim().split_once('='))
    .find(|(k, _)| *k == name)
    .map(|(_, v)| v)
}

/// Middleware resolving the session cookie.
pub async fn attach<B, S>(
  State(state): State<AppState<B, S>>,
  mut req: Request,
  next: Next,
) -> Response
where
  B: Send + Sync + 'static,
  S: Send + Sync + 'static,
{
  let cookie = state.config.session_cookie.as_str();
  let existing = cookie_value(req.headers(), cookie).and_then(|v| Uuid::parse_str(v).ok());
  let id = SessionId(existing.unwrap_or_else(Uuid::new_v4));
  req.extensions_mut().insert(id);

  let mut response = next.run(req).await;

  if existing.is_none() {
    let value = format!("{cookie}={}; Path=/; HttpOnly; SameSite=Lax", id.0);
    match HeaderValue::from_str(&value) {
      Ok(v) => {
        response.headers_mut().append(header::SET_COOKIE, v);
      }
      Err(e) => tracing::warn!(%e, "session cookie name is not a valid header value"),
    }
  }
  response
}
