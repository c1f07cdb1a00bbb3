//! Minimal client for the Gemini `generateContent` endpoint.

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use solute_core::backend::{GenerateRequest, Part};

use crate::{Error, Result};

pub const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const SERVICE: &str = "Gemini";

#[derive(Clone)]
pub struct Gemini {
  client:   reqwest::Client,
  api_key:  String,
  model:    String,
  base_url: String,
}

impl Gemini {
  pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
    Self {
      client,
      api_key: api_key.into(),
      model: DEFAULT_MODEL.to_owned(),
      base_url: API_BASE.to_owned(),
    }
  }

  pub fn with_model(mut self, model: impl Into<String>) -> Self {
    self.model = model.into();
    self
  }

  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }

  pub fn model(&self) -> &str { &self.model }

  /// Send one prompt and return the concatenated text of the first
  /// candidate.
  pub async fn generate(&self, request: &GenerateRequest) -> Result<String> {
    let url = format!(
      "{}/models/{}:generateContent",
      self.base_url.trim_end_matches('/'),
      self.model
    );
    let body = ApiRequest::from_request(request);

    tracing::debug!(
      model = %self.model,
      attachments = request.attachment_count(),
      "calling generateContent"
    );

    let response = self
      .client
      .post(url)
      .header("x-goog-api-key", &self.api_key)
      .json(&body)
      .send()
      .await?;

    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
      return Err(Error::Api {
        service: SERVICE,
        status:  status.as_u16(),
        message: error_message(&text),
      });
    }

    let parsed: ApiResponse = serde_json::from_str(&text).map_err(|e| Error::Parse {
      service: SERVICE,
      message: e.to_string(),
    })?;
    parsed.into_text()
  }
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct ApiRequest {
  contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
  parts: Vec<ApiPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ApiPart {
  Text { text: String },
  Inline { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
  mime_type: String,
  data:      String,
}

impl ApiRequest {
  /// Attachments go first, then the instructions, matching how the vision
  /// prompts are phrased ("Analyze this chart...").
  pub(crate) fn from_request(request: &GenerateRequest) -> Self {
    let mut inline = Vec::new();
    let mut text = Vec::new();
    for part in &request.parts {
      match part {
        Part::Text(t) => text.push(ApiPart::Text { text: t.clone() }),
        Part::Inline(a) => inline.push(ApiPart::Inline {
          inline_data: InlineData {
            mime_type: a.mime_type.clone(),
            data:      STANDARD.encode(&a.data),
          },
        }),
      }
    }
    inline.extend(text);
    Self { contents: vec![Content { parts: inline }] }
  }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
  content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
  #[serde(default)]
  parts: Vec<TextPart>,
}

#[derive(Debug, Deserialize)]
struct TextPart {
  text: Option<String>,
}

impl ApiResponse {
  pub(crate) fn into_text(self) -> Result<String> {
    let text: String = self
      .candidates
      .into_iter()
      .next()
      .and_then(|c| c.content)
      .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
      .unwrap_or_default();

    if text.trim().is_empty() {
      return Err(Error::Empty(SERVICE));
    }
    Ok(text)
  }
}

/// `error.message` from a Gemini error body, or the raw body.
fn error_message(body: &str) -> String {
  #[derive(Deserialize)]
  struct Envelope {
    error: Detail,
  }
  #[derive(Deserialize)]
  struct Detail {
    message: String,
  }

  serde_json::from_str::<Envelope>(body)
    .map(|e| e.error.message)
    .unwrap_or_else(|_| body.trim().to_owned())
}
