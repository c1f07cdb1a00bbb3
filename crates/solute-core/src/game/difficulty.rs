//! Adaptive difficulty from recent graded rounds.

use std::time::Duration;

use serde::Serialize;
use strum::{AsRefStr, Display};

use super::Scoreboard;

/// How many of the latest graded rounds are considered.
const WINDOW: usize = 5;
/// Below this many graded rounds the player stays on `Easy`.
const MIN_ROUNDS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Display, AsRefStr)]
pub enum Difficulty {
  #[default]
  Easy,
  Medium,
  Hard,
}

impl Difficulty {
  /// Accuracy over the last graded rounds; participation rounds don't count.
  pub fn from_scoreboard(board: &Scoreboard) -> Self {
    let recent: Vec<(u32, u32)> = board
      .history()
      .iter()
      .rev()
      .filter_map(|a| a.graded)
      .take(WINDOW)
      .collect();
    if recent.len() < MIN_ROUNDS {
      return Difficulty::Easy;
    }

    let (correct, total) = recent
      .iter()
      .fold((0u32, 0u32), |(c, t), (rc, rt)| (c + rc, t + rt));
    if total == 0 {
      return Difficulty::Easy;
    }

    let accuracy = f64::from(correct) / f64::from(total);
    if accuracy >= 0.8 {
      Difficulty::Hard
    } else if accuracy >= 0.5 {
      Difficulty::Medium
    } else {
      Difficulty::Easy
    }
  }

  pub fn pattern_length(self) -> usize {
    match self {
      Difficulty::Easy => 4,
      Difficulty::Medium => 6,
      Difficulty::Hard => 8,
    }
  }

  pub fn memorize_delay(self) -> Duration {
    match self {
      Difficulty::Easy => Duration::from_secs(3),
      Difficulty::Medium => Duration::from_secs(4),
      Difficulty::Hard => Duration::from_secs(5),
    }
  }

  /// Phrase appended to riddle and quiz prompts.
  pub fn prompt_hint(self) -> &'static str {
    match self {
      Difficulty::Easy => "Keep it approachable for a beginner.",
      Difficulty::Medium => "Make it moderately challenging.",
      Difficulty::Hard => "Make it genuinely hard; the player has been acing everything.",
    }
  }
}
