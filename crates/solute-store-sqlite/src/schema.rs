//! SQL schema for the score log.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Strictly append-only: no UPDATE or DELETE is ever issued against this
-- table. `id` doubles as the insertion sequence used to break score ties.
CREATE TABLE IF NOT EXISTS scores (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id  TEXT    NOT NULL,
    name        TEXT    NOT NULL,
    score       INTEGER NOT NULL CHECK (score >= 0),
    created_at  TEXT    NOT NULL   -- ISO 8601 UTC; server-assigned
);

CREATE INDEX IF NOT EXISTS scores_rank_idx ON scores(score DESC, id ASC);

PRAGMA user_version = 1;
";
