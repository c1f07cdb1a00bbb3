//! The score log: an append-only leaderboard for MindGames.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Longest display name kept, in characters.
pub const MAX_NAME_CHARS: usize = 32;

/// One persisted leaderboard row. Never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
  /// Insertion sequence; breaks ties between equal scores.
  pub id:         i64,
  pub session_id: Uuid,
  pub name:       String,
  pub score:      u32,
  /// Server-assigned; never changes after creation.
  pub created_at: DateTime<Utc>,
}

/// Input to [`ScoreStore::record`]. `created_at` is set by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScore {
  pub session_id: Uuid,
  pub name:       String,
  pub score:      u32,
}

impl NewScore {
  /// Trim and bound the display name; blank names are rejected.
  pub fn new(session_id: Uuid, name: &str, score: u32) -> Result<Self> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
      return Err(Error::EmptyName);
    }
    let name = crate::prompt::truncate_chars(trimmed, MAX_NAME_CHARS).to_owned();
    Ok(Self { session_id, name, score })
  }
}

/// Abstraction over a score log backend.
pub trait ScoreStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Append one row and return it as stored.
  fn record(
    &self,
    entry: NewScore,
  ) -> impl Future<Output = Result<ScoreRecord, Self::Error>> + Send + '_;

  /// Up to `limit` rows, highest score first; equal scores keep insertion
  /// order.
  fn top(
    &self,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<ScoreRecord>, Self::Error>> + Send + '_;
}
