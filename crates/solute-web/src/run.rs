//! Executes an app's pipeline for one validated submission.
//!
//! [`execute`] performs every external call the pipeline needs and returns a
//! [`RunOutput`]. Failures split into three kinds: a [`RunError::Warning`]
//! means no external call was attempted, a [`RunError::Service`] is shown
//! inline under the app's failure label, and [`RunError::Internal`] becomes
//! an error page.

use std::time::Instant;

use solute_core::{
  apps::{DocumentSpec, ImageSpec, Pipeline, VisionSpec},
  backend::{GenerateRequest, GenerativeBackend, ImageRequest, Part},
  form::{FormInput, Upload},
};
use solute_extract::{Limits, combine, vision_part};

use crate::{AppState, Error, cache::content_key};

/// What a successful run produced.
#[derive(Debug, Clone)]
pub enum RunOutput {
  /// Model text, rendered as markdown.
  Text(String),
  Images(Vec<GeneratedImage>),
  Cutout(Cutout),
}

#[derive(Debug, Clone)]
pub struct GeneratedImage {
  pub url:    String,
  pub bytes:  Vec<u8>,
  pub format: &'static str,
  pub mockup: bool,
}

#[derive(Debug, Clone)]
pub struct Cutout {
  pub png:        Vec<u8>,
  /// Download name, `<stem>_no_bg.png`.
  pub filename:   String,
  /// `Some(#rrggbb)` when a replacement background was requested.
  pub background: Option<String>,
  pub cached:     bool,
}

impl RunOutput {
  /// Markdown kept for the result download.
  pub fn to_markdown(&self, heading: &str) -> String {
    match self {
      RunOutput::Text(text) => format!("# {heading}\n\n{text}\n"),
      RunOutput::Images(images) => {
        let mut out = format!("# {heading}\n\n");
        for (i, image) in images.iter().enumerate() {
          out.push_str(&format!("![Design {}]({})\n\n", i + 1, image.url));
        }
        out
      }
      RunOutput::Cutout(c) => format!("# {heading}\n\nBackground removed: {}\n", c.filename),
    }
  }
}

#[derive(Debug)]
pub enum RunError {
  Warning(String),
  Service(String),
  Internal(Error),
}

impl From<solute_core::Error> for RunError {
  fn from(e: solute_core::Error) -> Self { RunError::Internal(e.into()) }
}

fn service(e: impl std::fmt::Display) -> RunError {
  tracing::warn!(error = %e, "external call failed");
  RunError::Service(e.to_string())
}

/// Run `pipeline` (already resolved past any switch) against `input`.
pub async fn execute<B, S>(
  state: &AppState<B, S>,
  pipeline: Pipeline,
  input: &mut FormInput,
) -> Result<RunOutput, RunError>
where
  B: GenerativeBackend,
{
  match pipeline {
    Pipeline::Text(template) => {
      let prompt = template.render(input)?;
      generate(state, GenerateRequest::text(prompt)).await.map(RunOutput::Text)
    }
    Pipeline::Documents(spec) => documents(state, spec, input).await,
    Pipeline::Vision(spec) => vision(state, spec, input).await,
    Pipeline::Images(spec) => images(state, spec, input).await,
    Pipeline::BackgroundRemoval { field } => cutout(state, field, input).await,
    Pipeline::Switch { .. } | Pipeline::Workspace(_) | Pipeline::Games => Err(RunError::Internal(
      Error::BadRequest("this app has no form pipeline".into()),
    )),
  }
}

async fn generate<B: GenerativeBackend, S>(
  state: &AppState<B, S>,
  request: GenerateRequest,
) -> Result<String, RunError> {
  let started = Instant::now();
  let text = state.backend.generate(request).await.map_err(service)?;
  tracing::debug!(elapsed_ms = started.elapsed().as_millis() as u64, "generation finished");
  Ok(text)
}

async fn documents<B: GenerativeBackend, S>(
  state: &AppState<B, S>,
  spec: DocumentSpec,
  input: &mut FormInput,
) -> Result<RunOutput, RunError> {
  let uploads: Vec<Upload> = input.uploads(spec.field).cloned().collect();
  let limits = Limits { per_file: spec.per_file, total: spec.total, headers: spec.headers };

  let text = tokio::task::spawn_blocking(move || combine(&uploads, limits))
    .await
    .map_err(|e| RunError::Internal(Error::BadRequest(format!("extraction task failed: {e}"))))?;
  if text.trim().is_empty() {
    return Err(RunError::Warning(spec.empty_warning.to_owned()));
  }

  input.set("documents", text);
  let prompt = spec.template.render(input)?;
  generate(state, GenerateRequest::text(prompt)).await.map(RunOutput::Text)
}

async fn vision<B: GenerativeBackend, S>(
  state: &AppState<B, S>,
  spec: VisionSpec,
  input: &FormInput,
) -> Result<RunOutput, RunError> {
  let uploads: Vec<&Upload> = input.uploads(spec.field).collect();
  let mut parts = Vec::with_capacity(uploads.len());
  for upload in &uploads {
    let part = vision_part(upload)
      .map_err(|e| RunError::Warning(format!("Could not read {}: {e}", upload.filename)))?;
    parts.push(part);
  }

  let instructions = spec.template.render(input)?;
  if let [only] = parts.as_slice() {
    let request = GenerateRequest { parts: vec![only.clone(), Part::Text(instructions)] };
    return generate(state, request).await.map(RunOutput::Text);
  }

  let mut report = String::new();
  for (i, (upload, part)) in uploads.iter().zip(&parts).enumerate() {
    let request = GenerateRequest { parts: vec![part.clone(), Part::Text(instructions.clone())] };
    let text = generate(state, request).await?;
    report.push_str(&format!("## Chart {}: {}\n\n{text}\n\n", i + 1, upload.filename));
  }

  if let Some(compare) = spec.compare {
    let mut all = parts;
    all.push(Part::Text(compare.render(input)?));
    let text = generate(state, GenerateRequest { parts: all }).await?;
    report.push_str(&format!("## Cross-Chart Comparison\n\n{text}\n"));
  }

  Ok(RunOutput::Text(report))
}

async fn images<B: GenerativeBackend, S>(
  state: &AppState<B, S>,
  spec: ImageSpec,
  input: &FormInput,
) -> Result<RunOutput, RunError> {
  let request = ImageRequest {
    prompt:        spec.template.render(input)?,
    count:         spec.count_for(input),
    aspect_ratio:  spec.aspect_ratio,
    output_format: spec.output_format,
  };
  let urls = state.backend.generate_images(request).await.map_err(service)?;

  let mut images = Vec::with_capacity(urls.len());
  for url in urls {
    let bytes = state.backend.fetch_image(url.clone()).await.map_err(service)?;
    images.push(GeneratedImage { url, bytes, format: spec.output_format, mockup: spec.mockup });
  }
  Ok(RunOutput::Images(images))
}

async fn cutout<B: GenerativeBackend, S>(
  state: &AppState<B, S>,
  field: &'static str,
  input: &FormInput,
) -> Result<RunOutput, RunError> {
  let upload = input
    .uploads(field)
    .next()
    .ok_or_else(|| RunError::Warning("Upload an image first.".into()))?;

  let key = content_key(&upload.bytes);
  let (png, cached) = match state.cutouts.get(&key, Instant::now()) {
    Some(png) => (png.as_ref().clone(), true),
    None => {
      let png = state
        .backend
        .remove_background(upload.bytes.clone(), upload.filename.clone())
        .await
        .map_err(service)?;
      state.cutouts.insert(key, png.clone(), Instant::now());
      (png, false)
    }
  };

  let background = (input.get("mode") == "Replace background").then(|| input.get("color").to_owned());
  Ok(RunOutput::Cutout(Cutout {
    png,
    filename: format!("{}_no_bg.png", upload.stem()),
    background,
    cached,
  }))
}
