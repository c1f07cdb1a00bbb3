//! Conversions between domain types and SQLite column values.
//!
//! Timestamps are RFC 3339 strings; UUIDs are hyphenated lowercase strings.

use chrono::{DateTime, Utc};
use solute_core::score::ScoreRecord;
use uuid::Uuid;

use crate::{Error, Result};

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

/// A `scores` row as read from SQLite, before validation.
pub struct RawScore {
  pub id:         i64,
  pub session_id: String,
  pub name:       String,
  pub score:      i64,
  pub created_at: String,
}

impl RawScore {
  pub const COLUMNS: &'static str = "id, session_id, name, score, created_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      session_id: row.get(1)?,
      name:       row.get(2)?,
      score:      row.get(3)?,
      created_at: row.get(4)?,
    })
  }

  pub fn decode(self) -> Result<ScoreRecord> {
    Ok(ScoreRecord {
      id:         self.id,
      session_id: Uuid::parse_str(&self.session_id)?,
      name:       self.name,
      score:      u32::try_from(self.score).map_err(|_| Error::ScoreRange(self.score))?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
