//! Error types for document extraction.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unsupported file type: {0:?}")]
  Unsupported(String),

  #[error("PDF error: {0}")]
  Pdf(#[from] lopdf::Error),

  #[error("DOCX archive error: {0}")]
  Zip(#[from] zip::result::ZipError),

  #[error("DOCX document part is larger than {limit} bytes")]
  TooLarge { limit: u64 },

  #[error("DOCX XML error: {0}")]
  Xml(String),

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
