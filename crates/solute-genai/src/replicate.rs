//! Replicate predictions for the Flux image model.
//!
//! Predictions are created with `Prefer: wait` so most finish in a single
//! round trip; anything still running afterwards is polled on its `get` URL
//! a bounded number of times.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use solute_core::backend::ImageRequest;

use crate::{Error, Result};

pub const API_BASE: &str = "https://api.replicate.com/v1";
pub const FLUX_MODEL: &str = "black-forest-labs/flux-dev";

const SERVICE: &str = "Replicate";
const POLL_INTERVAL: Duration = Duration::from_secs(2);
const MAX_POLLS: usize = 60;

#[derive(Clone)]
pub struct Replicate {
  client:        reqwest::Client,
  token:         String,
  base_url:      String,
  poll_interval: Duration,
  max_polls:     usize,
}

impl Replicate {
  pub fn new(client: reqwest::Client, token: impl Into<String>) -> Self {
    Self {
      client,
      token: token.into(),
      base_url: API_BASE.to_owned(),
      poll_interval: POLL_INTERVAL,
      max_polls: MAX_POLLS,
    }
  }

  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }

  /// How often, and how many times, an unfinished prediction is polled.
  pub fn with_polling(mut self, interval: Duration, max_polls: usize) -> Self {
    self.poll_interval = interval;
    self.max_polls = max_polls;
    self
  }

  /// Run Flux and return the output image URLs.
  pub async fn run_flux(&self, request: &ImageRequest) -> Result<Vec<String>> {
    let url = format!(
      "{}/models/{FLUX_MODEL}/predictions",
      self.base_url.trim_end_matches('/')
    );
    tracing::debug!(count = request.count, aspect = request.aspect_ratio, "creating prediction");

    let response = self
      .client
      .post(url)
      .bearer_auth(&self.token)
      .header("Prefer", "wait")
      .json(&PredictionInput::from(request))
      .send()
      .await?;
    let mut prediction = parse(response).await?;

    for _ in 0..self.max_polls {
      match prediction.state() {
        State::Done(urls) => return Ok(urls),
        State::Failed(err) => return Err(err),
        State::Running => {}
      }
      let Some(get) = prediction.urls.as_ref().and_then(|u| u.get.clone()) else {
        break;
      };
      tokio::time::sleep(self.poll_interval).await;
      let response = self.client.get(get).bearer_auth(&self.token).send().await?;
      prediction = parse(response).await?;
    }

    match prediction.state() {
      State::Done(urls) => Ok(urls),
      State::Failed(err) => Err(err),
      State::Running => Err(Error::Prediction {
        status:  prediction.status,
        message: "timed out waiting for output".into(),
      }),
    }
  }

  /// Download one output image.
  pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
    let response = self.client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
      return Err(Error::Api {
        service: SERVICE,
        status:  status.as_u16(),
        message: format!("image download failed for {url}"),
      });
    }
    Ok(response.bytes().await?.to_vec())
  }
}

async fn parse(response: reqwest::Response) -> Result<Prediction> {
  let status = response.status();
  let body = response.text().await?;
  if !status.is_success() {
    return Err(Error::Api {
      service: SERVICE,
      status:  status.as_u16(),
      message: detail(&body),
    });
  }
  serde_json::from_str(&body).map_err(|e| Error::Parse {
    service: SERVICE,
    message: e.to_string(),
  })
}

fn detail(body: &str) -> String {
  #[derive(Deserialize)]
  struct Problem {
    detail: String,
  }
  serde_json::from_str::<Problem>(body)
    .map(|p| p.detail)
    .unwrap_or_else(|_| body.trim().to_owned())
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct PredictionInput<'a> {
  input: FluxInput<'a>,
}

#[derive(Debug, Serialize)]
struct FluxInput<'a> {
  prompt:        &'a str,
  num_outputs:   u8,
  aspect_ratio:  &'a str,
  output_format: &'a str,
}

impl<'a> From<&'a ImageRequest> for PredictionInput<'a> {
  fn from(r: &'a ImageRequest) -> Self {
    Self {
      input: FluxInput {
        prompt:        &r.prompt,
        num_outputs:   r.count,
        aspect_ratio:  r.aspect_ratio,
        output_format: r.output_format,
      },
    }
  }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Prediction {
  status: String,
  #[serde(default)]
  output: Option<Output>,
  #[serde(default)]
  error:  Option<serde_json::Value>,
  #[serde(default)]
  urls:   Option<Urls>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Output {
  Many(Vec<String>),
  One(String),
}

#[derive(Debug, Deserialize)]
struct Urls {
  get: Option<String>,
}

pub(crate) enum State {
  Running,
  Done(Vec<String>),
  Failed(Error),
}

impl Prediction {
  pub(crate) fn state(&self) -> State {
    match self.status.as_str() {
      "succeeded" => {
        let urls = match &self.output {
          Some(Output::Many(v)) => v.clone(),
          Some(Output::One(s)) => vec![s.clone()],
          None => Vec::new(),
        };
        if urls.is_empty() { State::Failed(Error::Empty(SERVICE)) } else { State::Done(urls) }
      }
      "failed" | "canceled" => State::Failed(Error::Prediction {
        status:  self.status.clone(),
        message: match &self.error {
          Some(serde_json::Value::String(s)) => s.clone(),
          Some(other) => other.to_string(),
          None => "no error message".into(),
        },
      }),
      _ => State::Running,
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn prediction(raw: serde_json::Value) -> Prediction {
    serde_json::from_value(raw).unwrap()
  }

  #[test]
  fn input_carries_flux_parameters() {
    let request = ImageRequest {
      prompt:        "a lion in kente".into(),
      count:         3,
      aspect_ratio:  "1:1",
      output_format: "png",
    };
    let body = serde_json::to_value(PredictionInput::from(&request)).unwrap();
    assert_eq!(
      body,
      json!({ "input": {
        "prompt": "a lion in kente",
        "num_outputs": 3,
        "aspect_ratio": "1:1",
        "output_format": "png"
      }})
    );
  }

  #[test]
  fn succeeded_prediction_yields_urls() {
    let p = prediction(json!({
      "status": "succeeded",
      "output": ["https://x/1.png", "https://x/2.png"]
    }));
    assert!(matches!(p.state(), State::Done(urls) if urls.len() == 2));

    let single = prediction(json!({ "status": "succeeded", "output": "https://x/1.png" }));
    assert!(matches!(single.state(), State::Done(urls) if urls == ["https://x/1.png"]));
  }

  #[test]
  fn succeeded_without_output_is_empty() {
    let p = prediction(json!({ "status": "succeeded", "output": [] }));
    assert!(matches!(p.state(), State::Failed(Error::Empty(_))));
  }

  #[test]
  fn failed_prediction_reports_its_error() {
    let p = prediction(json!({ "status": "failed", "error": "NSFW content detected" }));
    match p.state() {
      State::Failed(Error::Prediction { status, message }) => {
        assert_eq!(status, "failed");
        assert_eq!(message, "NSFW content detected");
      }
      _ => panic!("expected a failed prediction"),
    }
  }

  #[test]
  fn starting_prediction_is_running() {
    let p = prediction(json!({
      "status": "starting",
      "urls": { "get": "https://api.replicate.com/v1/predictions/abc" }
    }));
    assert!(matches!(p.state(), State::Running));
  }

  #[test]
  fn detail_is_extracted_from_problem_json() {
    assert_eq!(detail(r#"{"title":"Unauthenticated","detail":"Invalid token."}"#), "Invalid token.");
    assert_eq!(detail("bad gateway"), "bad gateway");
  }
}
