//! Session-held collections behind the workspace apps.
//!
//! Nothing here is persisted; a workspace lives as long as the browser
//! session that created it.

pub mod notes;
pub mod skills;
pub mod survey;
pub mod tasks;

use chrono::NaiveDate;

pub use notes::Notebook;
pub use skills::SkillTracker;
pub use survey::SurveyBook;
pub use tasks::TaskBoard;

/// All workspace collections of one session.
#[derive(Debug, Clone, Default)]
pub struct Workspaces {
  pub notes:   Notebook,
  pub skills:  SkillTracker,
  pub tasks:   TaskBoard,
  pub surveys: SurveyBook,
}

/// Parse a `YYYY-MM-DD` form value; blank or malformed means `today`.
pub fn form_date(value: &str, today: NaiveDate) -> NaiveDate {
  NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").unwrap_or(today)
}
