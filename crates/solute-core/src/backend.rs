//! The `GenerativeBackend` trait and its request types.
//!
//! Implemented by `solute-genai` over the hosted APIs. The web layer depends
//! on this abstraction so handlers can be exercised against a scripted
//! backend.

use std::future::Future;

use serde::Serialize;

/// Binary content sent alongside a prompt (an image, a PDF).
#[derive(Debug, Clone)]
pub struct Attachment {
  pub mime_type: String,
  pub data:      Vec<u8>,
}

/// One element of a multimodal prompt.
#[derive(Debug, Clone)]
pub enum Part {
  Text(String),
  Inline(Attachment),
}

/// Input to [`GenerativeBackend::generate`].
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
  pub parts: Vec<Part>,
}

impl GenerateRequest {
  /// A text-only request.
  pub fn text(prompt: impl Into<String>) -> Self {
    Self { parts: vec![Part::Text(prompt.into())] }
  }

  pub fn attach(mut self, attachment: Attachment) -> Self {
    self.parts.push(Part::Inline(attachment));
    self
  }

  pub fn push_text(mut self, text: impl Into<String>) -> Self {
    self.parts.push(Part::Text(text.into()));
    self
  }

  /// The concatenated text parts, for logging and tests.
  pub fn prompt_text(&self) -> String {
    self
      .parts
      .iter()
      .filter_map(|p| match p {
        Part::Text(t) => Some(t.as_str()),
        Part::Inline(_) => None,
      })
      .collect::<Vec<_>>()
      .join("\n")
  }

  pub fn attachment_count(&self) -> usize {
    self.parts.iter().filter(|p| matches!(p, Part::Inline(_))).count()
  }
}

/// Input to [`GenerativeBackend::generate_images`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRequest {
  pub prompt:        String,
  pub count:         u8,
  /// e.g. `"1:1"`, `"9:16"`.
  pub aspect_ratio:  &'static str,
  pub output_format: &'static str,
}

/// Which optional endpoints a backend has credentials for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
  pub image_generation:   bool,
  pub background_removal: bool,
}

/// Abstraction over the hosted generative services.
///
/// No retries happen at this layer; a failed call surfaces its error to the
/// caller, which renders it inline.
pub trait GenerativeBackend: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Send a prompt (optionally with attachments) and return the reply text.
  fn generate(
    &self,
    request: GenerateRequest,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + '_;

  /// Run an image-generation model and return the output image URLs.
  fn generate_images(
    &self,
    request: ImageRequest,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  /// Download an image produced by [`Self::generate_images`].
  fn fetch_image(
    &self,
    url: String,
  ) -> impl Future<Output = Result<Vec<u8>, Self::Error>> + Send + '_;

  /// Remove the background of `image`, returning PNG bytes.
  fn remove_background(
    &self,
    image: Vec<u8>,
    filename: String,
  ) -> impl Future<Output = Result<Vec<u8>, Self::Error>> + Send + '_;

  fn capabilities(&self) -> Capabilities;
}
