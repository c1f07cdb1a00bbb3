//! [`HostedBackend`]: Gemini plus the optional Replicate and remove.bg
//! clients, sharing one HTTP connection pool.

use std::time::Duration;

use solute_core::backend::{Capabilities, GenerateRequest, GenerativeBackend, ImageRequest};

use crate::{Error, Result, gemini::Gemini, removebg::RemoveBg, replicate::Replicate};

/// Credentials and model selection for [`HostedBackend::new`].
#[derive(Debug, Clone, Default)]
pub struct HostedConfig {
  pub gemini_api_key:  String,
  pub gemini_model:    Option<String>,
  pub replicate_token: Option<String>,
  pub removebg_key:    Option<String>,
  /// Per-request timeout; defaults to two minutes.
  pub timeout:         Option<Duration>,
}

/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct HostedBackend {
  gemini:    Gemini,
  replicate: Option<Replicate>,
  removebg:  Option<RemoveBg>,
}

impl HostedBackend {
  pub fn new(config: HostedConfig) -> Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(config.timeout.unwrap_or(Duration::from_secs(120)))
      .connect_timeout(Duration::from_secs(30))
      .build()?;

    let mut gemini = Gemini::new(client.clone(), config.gemini_api_key);
    if let Some(model) = config.gemini_model.filter(|m| !m.trim().is_empty()) {
      gemini = gemini.with_model(model);
    }

    let replicate = non_blank(config.replicate_token).map(|t| Replicate::new(client.clone(), t));
    let removebg = non_blank(config.removebg_key).map(|k| RemoveBg::new(client, k));

    Ok(Self { gemini, replicate, removebg })
  }

  pub fn gemini(&self) -> &Gemini { &self.gemini }
}

fn non_blank(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}

impl GenerativeBackend for HostedBackend {
  type Error = Error;

  async fn generate(&self, request: GenerateRequest) -> Result<String> {
    self.gemini.generate(&request).await
  }

  async fn generate_images(&self, request: ImageRequest) -> Result<Vec<String>> {
    let replicate = self
      .replicate
      .as_ref()
      .ok_or(Error::NotConfigured("REPLICATE_API_TOKEN"))?;
    replicate.run_flux(&request).await
  }

  async fn fetch_image(&self, url: String) -> Result<Vec<u8>> {
    let replicate = self
      .replicate
      .as_ref()
      .ok_or(Error::NotConfigured("REPLICATE_API_TOKEN"))?;
    replicate.fetch(&url).await
  }

  async fn remove_background(&self, image: Vec<u8>, filename: String) -> Result<Vec<u8>> {
    let removebg = self
      .removebg
      .as_ref()
      .ok_or(Error::NotConfigured("REMOVEBG_API_KEY"))?;
    removebg.remove(image, filename).await
  }

  fn capabilities(&self) -> Capabilities {
    Capabilities {
      image_generation:   self.replicate.is_some(),
      background_removal: self.removebg.is_some(),
    }
  }
}
