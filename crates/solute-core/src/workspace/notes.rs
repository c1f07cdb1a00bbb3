//! ContraMind notes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
  pub date: NaiveDate,
  pub text: String,
}

impl Note {
  /// First 100 characters, for collapsed listings.
  pub fn preview(&self) -> &str { crate::prompt::truncate_chars(&self.text, 100) }
}

#[derive(Debug, Clone, Default)]
pub struct Notebook {
  notes: Vec<Note>,
}

impl Notebook {
  pub fn add(&mut self, text: &str, date: NaiveDate) {
    self.notes.push(Note { date, text: text.trim().to_owned() });
  }

  pub fn is_empty(&self) -> bool { self.notes.is_empty() }

  pub fn len(&self) -> usize { self.notes.len() }

  /// Notes ordered by date; notes on the same day keep insertion order.
  pub fn sorted(&self) -> Vec<&Note> {
    let mut notes: Vec<&Note> = self.notes.iter().collect();
    notes.sort_by_key(|n| n.date);
    notes
  }

  /// The "argue with me" prompt, or `None` with no notes.
  pub fn challenge_prompt(&self) -> Option<String> {
    if self.notes.is_empty() {
      return None;
    }
    let history = self
      .sorted()
      .iter()
      .map(|n| format!("{}: {}", n.date.format("%Y-%m-%d"), n.text))
      .collect::<Vec<_>>()
      .join("\n\n");

    Some(format!(
      "You are ContraMind, a sharp, honest thinking partner.

Here are the user's past and present thoughts, ordered by date:

{history}

Your job:
- Find direct contradictions (e.g., \"You said X, but later said not X\")
- Detect belief drift (gradual changes in opinion)
- Highlight unexamined assumptions or biases
- Point out when the user has wisely changed their mind

Be direct but kind. Use quotes from their notes.
Structure:
- Major Contradictions
- Belief Drift Over Time
- Key Insights / Growth

Speak directly: \"You believed... but now you...\""
    ))
  }

  /// Every note in insertion order, as pretty JSON.
  pub fn export_json(&self) -> Result<String> { Ok(serde_json::to_string_pretty(&self.notes)?) }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn day(d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(2024, 1, d).unwrap() }

  #[test]
  fn prompt_lists_notes_by_date() {
    let mut book = Notebook::default();
    assert!(book.challenge_prompt().is_none());

    book.add("  Remote work is best. ", day(20));
    book.add("Offices build culture.", day(3));
    let prompt = book.challenge_prompt().unwrap();
    let early = prompt.find("2024-01-03: Offices build culture.").unwrap();
    let late = prompt.find("2024-01-20: Remote work is best.").unwrap();
    assert!(early < late);
  }

  #[test]
  fn export_round_trips_through_json() {
    let mut book = Notebook::default();
    book.add("one", day(1));
    let parsed: Vec<Note> = serde_json::from_str(&book.export_json().unwrap()).unwrap();
    assert_eq!(parsed, [Note { date: day(1), text: "one".into() }]);
  }
}
