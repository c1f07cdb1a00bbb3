//! The per-variant phase machine.

use std::time::{Duration, Instant};

use serde::Serialize;

use super::{
  Award, Phase, Variant,
  insight::{self, Dataset},
  pattern::{self, PatternRound},
  quiz::{self, Quiz},
  riddle::{self, Riddle},
};
use crate::{Error, Result};

/// The content of one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Round {
  Riddle(Riddle),
  Quiz(Quiz),
  Insight(Dataset),
  Pattern(PatternRound),
}

impl Round {
  pub fn variant(&self) -> Variant {
    match self {
      Round::Riddle(_) => Variant::Riddle,
      Round::Quiz(_) => Variant::Quiz,
      Round::Insight(_) => Variant::Insight,
      Round::Pattern(_) => Variant::Pattern,
    }
  }
}

/// A player's submission for the current round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
  Riddle(String),
  /// One chosen option index per question.
  Quiz(Vec<Option<usize>>),
  /// The player's guess and the generated explanation revealed with it.
  Insight { guess: String, insight: String },
  Pattern(String),
}

impl Answer {
  pub fn variant(&self) -> Variant {
    match self {
      Answer::Riddle(_) => Variant::Riddle,
      Answer::Quiz(_) => Variant::Quiz,
      Answer::Insight { .. } => Variant::Insight,
      Answer::Pattern(_) => Variant::Pattern,
    }
  }
}

/// The graded result shown in the `Result` phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
  pub points:  u32,
  /// `None` for participation rounds.
  pub correct: Option<bool>,
  pub summary: String,
  /// Markdown shown under the summary.
  pub detail:  Option<String>,
}

/// Result of [`Sequencer::reveal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reveal {
  /// The phase advanced to `Answer`.
  Ready,
  /// Still memorizing; the remaining display time.
  Wait(Duration),
}

#[derive(Debug, Clone)]
pub struct Sequencer {
  variant:        Variant,
  phase:          Phase,
  round:          Option<Round>,
  outcome:        Option<Outcome>,
  memorize_until: Option<Instant>,
}

impl Sequencer {
  pub fn new(variant: Variant) -> Self {
    Self { variant, phase: Phase::Start, round: None, outcome: None, memorize_until: None }
  }

  pub fn variant(&self) -> Variant { self.variant }
  pub fn phase(&self) -> Phase { self.phase }
  pub fn round(&self) -> Option<&Round> { self.round.as_ref() }
  pub fn outcome(&self) -> Option<&Outcome> { self.outcome.as_ref() }

  /// `Start → Memorize` for pattern rounds, `Start → Answer` otherwise.
  pub fn begin(&mut self, round: Round, now: Instant) -> Result<Phase> {
    self.expect(Phase::Start, "begin")?;
    if round.variant() != self.variant {
      return Err(Error::AnswerMismatch(self.variant));
    }

    self.phase = match &round {
      Round::Pattern(p) => {
        self.memorize_until = Some(now + p.delay);
        Phase::Memorize
      }
      _ => Phase::Answer,
    };
    self.round = Some(round);
    Ok(self.phase)
  }

  /// `Memorize → Answer` once the display delay has elapsed.
  pub fn reveal(&mut self, now: Instant) -> Result<Reveal> {
    self.expect(Phase::Memorize, "reveal")?;
    let until = self.memorize_until.unwrap_or(now);
    if now < until {
      return Ok(Reveal::Wait(until - now));
    }
    self.phase = Phase::Answer;
    Ok(Reveal::Ready)
  }

  /// `Answer → Result`: grade `answer` against the current round.
  pub fn submit(&mut self, answer: Answer) -> Result<(Award, Outcome)> {
    self.expect(Phase::Answer, "submit")?;
    let round = self.round.as_ref().ok_or_else(|| self.invalid("submit"))?;
    let (award, outcome) = grade(round, answer)?;

    self.outcome = Some(outcome.clone());
    self.phase = Phase::Result;
    Ok((award, outcome))
  }

  /// `Result → Start`, clearing every per-round value.
  pub fn next(&mut self) -> Result<Phase> {
    self.expect(Phase::Result, "next")?;
    self.round = None;
    self.outcome = None;
    self.memorize_until = None;
    self.phase = Phase::Start;
    Ok(self.phase)
  }

  fn expect(&self, phase: Phase, action: &'static str) -> Result<()> {
    if self.phase == phase { Ok(()) } else { Err(self.invalid(action)) }
  }

  fn invalid(&self, action: &'static str) -> Error {
    Error::InvalidTransition { variant: self.variant, phase: self.phase, action }
  }
}

fn grade(round: &Round, answer: Answer) -> Result<(Award, Outcome)> {
  let variant = round.variant();
  let graded = match (round, answer) {
    (Round::Riddle(r), Answer::Riddle(guess)) => {
      let correct = r.is_correct(&guess);
      let points = if correct { riddle::POINTS } else { 0 };
      let mut detail = format!("**Correct answer:** {}", r.answer);
      if let Some(reason) = &r.reason {
        detail.push_str(&format!("\n\n**Reason:** {reason}"));
      }
      (
        Award::graded(variant, points, u32::from(correct), 1),
        Outcome {
          points,
          correct: Some(correct),
          summary: if correct {
            format!("Correct! 🎉 +{points} points")
          } else {
            "Wrong answer ❌".to_owned()
          },
          detail: Some(detail),
        },
      )
    }
    (Round::Quiz(q), Answer::Quiz(choices)) => {
      let correct = q.correct_count(&choices);
      let total = q.questions.len() as u32;
      let points = correct * quiz::POINTS_PER_CORRECT;
      let key = q
        .questions
        .iter()
        .enumerate()
        .map(|(i, question)| {
          format!(
            "{}. {} **{}) {}**",
            i + 1,
            question.prompt,
            quiz::letter(question.answer),
            question.answer_text()
          )
        })
        .collect::<Vec<_>>()
        .join("\n");
      (
        Award::graded(variant, points, correct, total),
        Outcome {
          points,
          correct: Some(correct == total),
          summary: format!("You scored {correct}/{total}! +{points} points"),
          detail: Some(key),
        },
      )
    }
    (Round::Insight(_), Answer::Insight { insight, .. }) => (
      Award::participation(variant, insight::POINTS),
      Outcome {
        points:  insight::POINTS,
        correct: None,
        summary: format!("+{} participation points", insight::POINTS),
        detail:  Some(insight),
      },
    ),
    (Round::Pattern(p), Answer::Pattern(attempt)) => {
      let correct = p.matches(&attempt);
      let points = if correct { p.points() } else { 0 };
      (
        Award::graded(variant, points, u32::from(correct), 1),
        Outcome {
          points,
          correct: Some(correct),
          summary: if correct {
            format!("Perfect recall! +{points} points")
          } else {
            "Not quite ❌".to_owned()
          },
          detail: Some(format!("The sequence was {}", pattern::render(&p.sequence))),
        },
      )
    }
    _ => return Err(Error::AnswerMismatch(variant)),
  };
  Ok(graded)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn begin_rejects_a_round_for_another_variant() {
    let mut seq = Sequencer::new(Variant::Quiz);
    let err = seq.begin(Round::Riddle(riddle::fallback()), Instant::now()).unwrap_err();
    assert!(matches!(err, Error::AnswerMismatch(Variant::Quiz)));
    assert_eq!(seq.phase(), Phase::Start);
  }

  #[test]
  fn invalid_actions_leave_state_unchanged() {
    let mut seq = Sequencer::new(Variant::Riddle);
    assert!(seq.next().is_err());
    assert!(seq.reveal(Instant::now()).is_err());
    assert!(seq.submit(Answer::Riddle("x".into())).is_err());
    assert_eq!(seq.phase(), Phase::Start);

    seq.begin(Round::Riddle(riddle::fallback()), Instant::now()).unwrap();
    let again = seq.begin(Round::Riddle(riddle::fallback()), Instant::now());
    assert!(matches!(again, Err(Error::InvalidTransition { phase: Phase::Answer, action: "begin", .. })));
    assert_eq!(seq.phase(), Phase::Answer);
  }

  #[test]
  fn mismatched_answer_is_rejected_in_place() {
    let mut seq = Sequencer::new(Variant::Riddle);
    seq.begin(Round::Riddle(riddle::fallback()), Instant::now()).unwrap();
    assert!(matches!(seq.submit(Answer::Pattern("RGBY".into())), Err(Error::AnswerMismatch(_))));
    assert_eq!(seq.phase(), Phase::Answer);
  }

  #[test]
  fn quiz_awards_two_points_per_correct_answer() {
    let mut seq = Sequencer::new(Variant::Quiz);
    seq.begin(Round::Quiz(quiz::fallback()), Instant::now()).unwrap();
    let (award, outcome) = seq.submit(Answer::Quiz(vec![Some(1), Some(0), Some(0)])).unwrap();
    assert_eq!(outcome.points, 4);
    assert_eq!(award.graded, Some((2, 3)));
    assert_eq!(outcome.correct, Some(false));
  }

  #[test]
  fn insight_is_a_participation_round() {
    let mut seq = Sequencer::new(Variant::Insight);
    let data = Dataset { rows: vec![] };
    seq.begin(Round::Insight(data), Instant::now()).unwrap();
    let (award, outcome) = seq
      .submit(Answer::Insight { guess: "up".into(), insight: "It trends up.".into() })
      .unwrap();
    assert_eq!(award.graded, None);
    assert_eq!(outcome.points, 5);
    assert_eq!(outcome.detail.as_deref(), Some("It trends up."));
  }

  #[test]
  fn wrong_riddle_shows_answer_and_reason() {
    let mut seq = Sequencer::new(Variant::Riddle);
    seq.begin(Round::Riddle(riddle::fallback()), Instant::now()).unwrap();
    let (_, outcome) = seq.submit(Answer::Riddle("a guitar".into())).unwrap();
    assert_eq!(outcome.points, 0);
    let detail = outcome.detail.unwrap();
    assert!(detail.contains("A piano"));
    assert!(detail.contains("Reason"));
  }
}
