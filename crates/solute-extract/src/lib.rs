//! Plain-text extraction from uploaded documents.
//!
//! Supports TXT (lossy UTF-8), PDF, DOCX and JSON. Pure synchronous; callers
//! on an async runtime should run [`combine`] on a blocking thread for large
//! uploads.
//!
//! ```no_run
//! use solute_extract::{Format, extract};
//!
//! let text = extract(Format::Json, br#"{"a":1}"#).unwrap();
//! assert!(text.contains("\"a\": 1"));
//! ```

pub mod error;
mod docx;
mod pdf;

use solute_core::{
  backend::{Attachment, Part},
  form::Upload,
  prompt::truncate_chars,
};
use strum::{AsRefStr, EnumString};

pub use docx::MAX_DOCUMENT_XML_BYTES;
pub use error::{Error, Result};

/// A document format recognised by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive)]
pub enum Format {
  #[strum(serialize = "txt")]
  Text,
  #[strum(serialize = "pdf")]
  Pdf,
  #[strum(serialize = "docx")]
  Docx,
  #[strum(serialize = "json")]
  Json,
}

impl Format {
  pub fn from_extension(ext: &str) -> Option<Self> { ext.parse().ok() }

  /// Upper-case label used in `[Error reading PDF]` placeholders.
  pub fn label(self) -> String { self.as_ref().to_ascii_uppercase() }
}

/// Extract the text of one document.
pub fn extract(format: Format, bytes: &[u8]) -> Result<String> {
  match format {
    Format::Text => Ok(String::from_utf8_lossy(bytes).into_owned()),
    Format::Pdf => pdf::extract(bytes),
    Format::Docx => docx::extract(bytes),
    Format::Json => {
      let value: serde_json::Value = serde_json::from_slice(bytes)?;
      Ok(serde_json::to_string_pretty(&value)?)
    }
  }
}

/// Extract `upload`, choosing the format from its extension.
pub fn extract_upload(upload: &Upload) -> Result<String> {
  let ext = upload.extension();
  let format = Format::from_extension(&ext).ok_or(Error::Unsupported(ext))?;
  extract(format, &upload.bytes)
}

// ─── Combining several uploads ───────────────────────────────────────────────

/// Character limits applied by [`combine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
  pub per_file: usize,
  pub total:    usize,
  /// Prefix each file with a `--- From name ---` line.
  pub headers:  bool,
}

/// Extract every upload and join the texts for a prompt.
///
/// A file that fails to extract contributes an `[Error reading EXT]`
/// placeholder instead of aborting the batch.
pub fn combine<'a>(uploads: impl IntoIterator<Item = &'a Upload>, limits: Limits) -> String {
  let mut out = String::new();

  for upload in uploads {
    let content = extract_upload(upload).unwrap_or_else(|err| {
      tracing::warn!(file = %upload.filename, %err, "text extraction failed");
      format!("[Error reading {}]", upload.extension().to_ascii_uppercase())
    });
    let content = truncate_chars(&content, limits.per_file);

    if limits.headers {
      out.push_str(&format!("\n\n--- From {} ---\n{content}", upload.filename));
    } else {
      if !out.is_empty() {
        out.push_str("\n\n");
      }
      out.push_str(content);
    }
  }

  truncate_chars(&out, limits.total).to_owned()
}

// ─── Vision attachments ──────────────────────────────────────────────────────

/// MIME type for files the vision model accepts inline.
pub fn inline_mime(ext: &str) -> Option<&'static str> {
  match ext.to_ascii_lowercase().as_str() {
    "png" => Some("image/png"),
    "jpg" | "jpeg" => Some("image/jpeg"),
    "webp" => Some("image/webp"),
    "pdf" => Some("application/pdf"),
    _ => None,
  }
}

/// Turn an upload into a prompt part: images and PDFs are attached as-is,
/// anything else is sent as its extracted text.
pub fn vision_part(upload: &Upload) -> Result<Part> {
  match inline_mime(&upload.extension()) {
    Some(mime) => Ok(Part::Inline(Attachment {
      mime_type: mime.to_owned(),
      data:      upload.bytes.clone(),
    })),
    None => Ok(Part::Text(extract_upload(upload)?)),
  }
}
