//! [`SqliteScoreStore`]: the SQLite implementation of [`ScoreStore`].

use std::path::Path;

use chrono::Utc;
use solute_core::score::{NewScore, ScoreRecord, ScoreStore};

use crate::{
  Result,
  encode::{RawScore, encode_dt, encode_uuid},
  schema::SCHEMA,
};

/// A score log backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteScoreStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteScoreStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

impl ScoreStore for SqliteScoreStore {
  type Error = crate::Error;

  async fn record(&self, entry: NewScore) -> Result<ScoreRecord> {
    let created_at = Utc::now();
    let session_str = encode_uuid(entry.session_id);
    let at_str = encode_dt(created_at);
    let name = entry.name.clone();
    let score = i64::from(entry.score);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO scores (session_id, name, score, created_at) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![session_str, name, score, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    tracing::debug!(id, name = %entry.name, score = entry.score, "recorded score");

    Ok(ScoreRecord {
      id,
      session_id: entry.session_id,
      name: entry.name,
      score: entry.score,
      created_at,
    })
  }

  async fn top(&self, limit: usize) -> Result<Vec<ScoreRecord>> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);

    let raws: Vec<RawScore> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM scores ORDER BY score DESC, id ASC LIMIT ?1",
          RawScore::COLUMNS
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![limit], RawScore::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawScore::decode).collect()
  }
}
