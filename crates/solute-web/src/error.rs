//! Error types and axum `IntoResponse` implementation.
//!
//! Only failures that replace the whole page live here. External service
//! failures and input warnings are rendered inline by the handlers.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::render;

#[derive(Debug, Error)]
pub enum Error {
  #[error("no app called {0:?}")]
  UnknownApp(String),
  #[error("no game called {0:?}")]
  UnknownGame(String),
  #[error("not found")]
  NotFound,
  #[error("bad request: {0}")]
  BadRequest(String),
  #[error("{0} is not configured")]
  MissingSecret(&'static str),
  #[error(transparent)]
  Core(#[from] solute_core::Error),
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Error::Store(Box::new(e))
  }

  fn status(&self) -> StatusCode {
    match self {
      Error::UnknownApp(_) | Error::UnknownGame(_) | Error::NotFound => StatusCode::NOT_FOUND,
      Error::Core(solute_core::Error::SurveyNotFound(_) | solute_core::Error::NoSuchItem(_)) => {
        StatusCode::NOT_FOUND
      }
      Error::Core(solute_core::Error::UnknownApp(_)) => StatusCode::NOT_FOUND,
      Error::BadRequest(_) => StatusCode::BAD_REQUEST,
      _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }
    let title = status.canonical_reason().unwrap_or("Error");
    let body = format!(
      "<h1>{}</h1><p>{}</p><p><a href=\"/\">Back to all apps</a></p>",
      render::escape(title),
      render::escape(&self.to_string()),
    );
    (status, render::page(title, &body)).into_response()
  }
}
