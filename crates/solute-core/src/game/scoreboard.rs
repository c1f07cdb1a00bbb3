//! Per-session score history.

use serde::Serialize;

use super::Variant;

/// Points awarded for one completed round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Award {
  pub variant: Variant,
  pub points:  u32,
  /// `(correct, total)` for graded rounds; `None` for participation rounds.
  pub graded:  Option<(u32, u32)>,
}

impl Award {
  pub fn graded(variant: Variant, points: u32, correct: u32, total: u32) -> Self {
    Self { variant, points, graded: Some((correct, total)) }
  }

  pub fn participation(variant: Variant, points: u32) -> Self {
    Self { variant, points, graded: None }
  }
}

/// The ordered history of awards. Append-only until the session is reset,
/// so [`Scoreboard::total`] never decreases.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Scoreboard {
  history: Vec<Award>,
}

impl Scoreboard {
  pub fn push(&mut self, award: Award) { self.history.push(award); }

  pub fn total(&self) -> u32 { self.history.iter().map(|a| a.points).sum() }

  pub fn history(&self) -> &[Award] { &self.history }

  pub fn is_empty(&self) -> bool { self.history.is_empty() }

  /// Running totals after each award, for the progress chart.
  pub fn running_totals(&self) -> Vec<u32> {
    self
      .history
      .iter()
      .scan(0u32, |acc, a| {
        *acc += a.points;
        Some(*acc)
      })
      .collect()
  }
}
