//! Pattern-recall rounds over a fixed six-symbol palette.

use std::time::Duration;

use rand::Rng;
use serde::Serialize;
use strum::{EnumIter, IntoEnumIterator as _};

use super::Difficulty;

pub const POINTS_PER_SYMBOL: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter)]
pub enum Symbol {
  Red,
  Green,
  Blue,
  Yellow,
  Purple,
  Orange,
}

impl Symbol {
  pub fn letter(self) -> char {
    match self {
      Symbol::Red => 'R',
      Symbol::Green => 'G',
      Symbol::Blue => 'B',
      Symbol::Yellow => 'Y',
      Symbol::Purple => 'P',
      Symbol::Orange => 'O',
    }
  }

  pub fn glyph(self) -> char {
    match self {
      Symbol::Red => '🟥',
      Symbol::Green => '🟩',
      Symbol::Blue => '🟦',
      Symbol::Yellow => '🟨',
      Symbol::Purple => '🟪',
      Symbol::Orange => '🟧',
    }
  }

  /// Accepts the letter (any case) or the glyph.
  pub fn from_char(c: char) -> Option<Self> {
    Symbol::iter().find(|s| s.letter() == c.to_ascii_uppercase() || s.glyph() == c)
  }
}

/// Parse a typed sequence such as `"RGBY"`, `"r g b y"` or `"🟥,🟩"`.
/// Whitespace and commas are ignored; any other unknown character fails.
pub fn parse_sequence(input: &str) -> Option<Vec<Symbol>> {
  input
    .chars()
    .filter(|c| !c.is_whitespace() && *c != ',')
    .map(Symbol::from_char)
    .collect()
}

pub fn render(sequence: &[Symbol]) -> String { sequence.iter().map(|s| s.glyph()).collect() }

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternRound {
  pub sequence: Vec<Symbol>,
  /// How long the sequence stays on screen before answers are accepted.
  pub delay:    Duration,
}

impl PatternRound {
  pub fn new(sequence: Vec<Symbol>, delay: Duration) -> Self { Self { sequence, delay } }

  /// A random sequence sized and timed for `difficulty`.
  pub fn generate<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Self {
    let palette: Vec<Symbol> = Symbol::iter().collect();
    let sequence = (0..difficulty.pattern_length())
      .map(|_| palette[rng.random_range(0..palette.len())])
      .collect();
    Self::new(sequence, difficulty.memorize_delay())
  }

  /// Whether `attempt` reproduces the whole sequence.
  pub fn matches(&self, attempt: &str) -> bool {
    parse_sequence(attempt).is_some_and(|s| s == self.sequence)
  }

  pub fn points(&self) -> u32 { POINTS_PER_SYMBOL * self.sequence.len() as u32 }
}
