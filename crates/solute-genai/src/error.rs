//! Error type for `solute-genai`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("network error: {0}")]
  Network(#[from] reqwest::Error),

  #[error("{service} error (status {status}): {message}")]
  Api {
    service: &'static str,
    status:  u16,
    message: String,
  },

  #[error("{0} returned no content")]
  Empty(&'static str),

  #[error("failed to parse {service} response: {message}")]
  Parse {
    service: &'static str,
    message: String,
  },

  #[error("{0} is not configured")]
  NotConfigured(&'static str),

  #[error("prediction {status}: {message}")]
  Prediction { status: String, message: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
