//! Riddle rounds: prompt, parsing and answer matching.

use serde::Serialize;

use super::Difficulty;

pub const POINTS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Riddle {
  pub text:   String,
  pub answer: String,
  pub reason: Option<String>,
}

impl Riddle {
  /// Whether `guess` names the answer, ignoring case, surrounding
  /// punctuation and a leading article.
  pub fn is_correct(&self, guess: &str) -> bool {
    let guess = normalize(guess);
    !guess.is_empty() && guess == normalize(&self.answer)
  }
}

pub fn prompt(difficulty: Difficulty) -> String {
  format!(
    "Generate a fun, intellectual riddle with a clear answer and a short reason.\n{}\nFormat \
     exactly as:\nRiddle: <riddle>\nAnswer: <answer>\nReason: <reason>",
    difficulty.prompt_hint()
  )
}

/// Extract a riddle from generated text. `None` when either the `Riddle:` or
/// `Answer:` marker is missing or a part is empty.
pub fn parse(text: &str) -> Option<Riddle> {
  let text = text.replace("**", "");
  let (_, after_riddle) = text.split_once("Riddle:")?;
  let (riddle, after_answer) = after_riddle.split_once("Answer:")?;
  let (answer, reason) = match after_answer.split_once("Reason:") {
    Some((a, r)) => (a, Some(r.trim())),
    None => (after_answer, None),
  };

  let riddle = riddle.trim();
  let answer = answer.trim();
  if riddle.is_empty() || answer.is_empty() {
    return None;
  }

  Some(Riddle {
    text:   riddle.to_owned(),
    answer: answer.to_owned(),
    reason: reason.filter(|r| !r.is_empty()).map(str::to_owned),
  })
}

/// The built-in riddle used when generation fails or can't be parsed.
pub fn fallback() -> Riddle {
  Riddle {
    text:   "What has keys but can't open locks?".into(),
    answer: "A piano".into(),
    reason: Some("A piano has keys you play, not keys that open doors.".into()),
  }
}

/// Parse `text`, substituting [`fallback`] when it is malformed.
pub fn parse_or_fallback(text: &str) -> Riddle {
  parse(text).unwrap_or_else(|| {
    tracing::warn!("generated riddle was malformed; using the built-in riddle");
    fallback()
  })
}

fn normalize(s: &str) -> String {
  let lowered = s.trim().to_lowercase();
  let trimmed = lowered.trim_matches(|c: char| !c.is_alphanumeric());
  let words: Vec<&str> = trimmed.split_whitespace().collect();
  let words = match words.as_slice() {
    [first, rest @ ..] if !rest.is_empty() && matches!(*first, "a" | "an" | "the") => rest,
    all => all,
  };
  words.join(" ")
}
