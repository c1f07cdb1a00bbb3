//! Error types for `solute-core`.

use thiserror::Error;

use crate::game::{Phase, Variant};

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown app: {0}")]
  UnknownApp(String),

  #[error("unknown placeholder {{{0}}} in prompt template")]
  UnknownPlaceholder(String),

  #[error("unterminated placeholder in prompt template")]
  UnterminatedPlaceholder,

  #[error("{action} is not allowed while {variant} is in the {phase} phase")]
  InvalidTransition {
    variant: Variant,
    phase:   Phase,
    action:  &'static str,
  },

  #[error("answer does not match the current {0} round")]
  AnswerMismatch(Variant),

  #[error("display name must not be empty")]
  EmptyName,

  #[error("a survey needs at least one question")]
  EmptySurvey,

  #[error("survey not found: {0}")]
  SurveyNotFound(u32),

  #[error("no item at position {0}")]
  NoSuchItem(usize),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
