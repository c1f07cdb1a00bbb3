//! MindGames: the mini-game phase sequencer and its round types.
//!
//! Each variant moves through `Start → (Memorize) → Answer → Result → Start`.
//! One user action advances the phase; there are no backward transitions.
//! Points accumulate on a per-session [`Scoreboard`] that only resets when
//! the player explicitly starts a new session.

pub mod difficulty;
pub mod insight;
pub mod pattern;
pub mod quiz;
pub mod riddle;
pub mod scoreboard;
pub mod sequencer;

use std::time::Instant;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator as _};

pub use difficulty::Difficulty;
pub use scoreboard::{Award, Scoreboard};
pub use sequencer::{Answer, Outcome, Reveal, Round, Sequencer};

use crate::Result;

/// The game variants offered by MindGames.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
  Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Variant {
  Riddle,
  Quiz,
  Insight,
  Pattern,
}

impl Variant {
  pub fn title(self) -> &'static str {
    match self {
      Variant::Riddle => "Riddle Challenge",
      Variant::Quiz => "Custom Quiz Master",
      Variant::Insight => "Data Insight Puzzle",
      Variant::Pattern => "Pattern Recall",
    }
  }

  pub fn icon(self) -> &'static str {
    match self {
      Variant::Riddle => "🧠",
      Variant::Quiz => "📝",
      Variant::Insight => "📈",
      Variant::Pattern => "🎨",
    }
  }

  pub fn blurb(self) -> &'static str {
    match self {
      Variant::Riddle => "AI generates a riddle. Solve it for points!",
      Variant::Quiz => "AI creates a quiz on your topic. Test your knowledge!",
      Variant::Insight => "Random data appears. Guess the hidden story or pattern!",
      Variant::Pattern => "Memorize a colour sequence, then reproduce it from memory.",
    }
  }

  /// Whether the variant shows its content before accepting answers.
  pub fn has_memorize_phase(self) -> bool { matches!(self, Variant::Pattern) }
}

/// The phase labels of a sequencer. Exactly one is active per variant.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
  Start,
  Memorize,
  Answer,
  Result,
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// All game state for one browser session.
#[derive(Debug, Clone)]
pub struct GameSession {
  scoreboard: Scoreboard,
  riddle:     Sequencer,
  quiz:       Sequencer,
  insight:    Sequencer,
  pattern:    Sequencer,
}

impl Default for GameSession {
  fn default() -> Self {
    Self {
      scoreboard: Scoreboard::default(),
      riddle:     Sequencer::new(Variant::Riddle),
      quiz:       Sequencer::new(Variant::Quiz),
      insight:    Sequencer::new(Variant::Insight),
      pattern:    Sequencer::new(Variant::Pattern),
    }
  }
}

impl GameSession {
  pub fn scoreboard(&self) -> &Scoreboard { &self.scoreboard }

  pub fn sequencer(&self, variant: Variant) -> &Sequencer {
    match variant {
      Variant::Riddle => &self.riddle,
      Variant::Quiz => &self.quiz,
      Variant::Insight => &self.insight,
      Variant::Pattern => &self.pattern,
    }
  }

  fn sequencer_mut(&mut self, variant: Variant) -> &mut Sequencer {
    match variant {
      Variant::Riddle => &mut self.riddle,
      Variant::Quiz => &mut self.quiz,
      Variant::Insight => &mut self.insight,
      Variant::Pattern => &mut self.pattern,
    }
  }

  /// All sequencers in variant order.
  pub fn sequencers(&self) -> impl Iterator<Item = &Sequencer> {
    Variant::iter().map(|v| self.sequencer(v))
  }

  /// The difficulty the next round should be generated at.
  pub fn difficulty(&self) -> Difficulty { Difficulty::from_scoreboard(&self.scoreboard) }

  pub fn begin(&mut self, round: Round, now: Instant) -> Result<Phase> {
    self.sequencer_mut(round.variant()).begin(round, now)
  }

  pub fn reveal(&mut self, variant: Variant, now: Instant) -> Result<Reveal> {
    self.sequencer_mut(variant).reveal(now)
  }

  /// Grade `answer` and append the awarded points to the scoreboard.
  pub fn submit(&mut self, answer: Answer) -> Result<Outcome> {
    let (award, outcome) = self.sequencer_mut(answer.variant()).submit(answer)?;
    self.scoreboard.push(award);
    Ok(outcome)
  }

  pub fn next(&mut self, variant: Variant) -> Result<Phase> {
    self.sequencer_mut(variant).next()
  }

  /// Explicit "new session" action: wipe the score history and every round.
  pub fn reset(&mut self) { *self = Self::default(); }
}
