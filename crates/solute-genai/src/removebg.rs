//! remove.bg background removal.

use serde::Deserialize;

use crate::{Error, Result};

pub const API_URL: &str = "https://api.remove.bg/v1.0/removebg";

const SERVICE: &str = "remove.bg";

#[derive(Clone)]
pub struct RemoveBg {
  client:  reqwest::Client,
  api_key: String,
  url:     String,
}

impl RemoveBg {
  pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
    Self { client, api_key: api_key.into(), url: API_URL.to_owned() }
  }

  pub fn with_url(mut self, url: impl Into<String>) -> Self {
    self.url = url.into();
    self
  }

  /// Upload `image` and return the cut-out as PNG bytes.
  pub async fn remove(&self, image: Vec<u8>, filename: String) -> Result<Vec<u8>> {
    tracing::debug!(bytes = image.len(), %filename, "calling remove.bg");

    let file = reqwest::multipart::Part::bytes(image).file_name(filename);
    let form = reqwest::multipart::Form::new()
      .part("image_file", file)
      .text("size", "auto")
      .text("format", "png")
      .text("type", "auto");

    let response = self
      .client
      .post(&self.url)
      .header("X-Api-Key", &self.api_key)
      .multipart(form)
      .send()
      .await?;

    let status = response.status();
    let body = response.bytes().await?;
    if !status.is_success() {
      return Err(Error::Api {
        service: SERVICE,
        status:  status.as_u16(),
        message: error_title(&body),
      });
    }
    if body.is_empty() {
      return Err(Error::Empty(SERVICE));
    }
    Ok(body.to_vec())
  }
}

/// The first `errors[].title` of a remove.bg error payload.
fn error_title(body: &[u8]) -> String {
  #[derive(Deserialize)]
  struct Payload {
    #[serde(default)]
    errors: Vec<ApiError>,
  }
  #[derive(Deserialize)]
  struct ApiError {
    title: Option<String>,
  }

  serde_json::from_slice::<Payload>(body)
    .ok()
    .and_then(|p| p.errors.into_iter().next())
    .and_then(|e| e.title)
    .unwrap_or_else(|| "Unknown error".to_owned())
}
