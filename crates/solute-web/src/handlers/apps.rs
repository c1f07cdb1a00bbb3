//! Per-app pages: the form, its submission and the result download.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/apps/{slug}` | Form, workspace page, or redirect to `/games` |
//! | `POST` | `/apps/{slug}` | Multipart; runs the pipeline or adds a workspace item |
//! | `GET`  | `/apps/{slug}/result.md` | Last result of this session, 404 if none |

use axum::{
  Extension,
  extract::{Multipart, Path, State},
  http::header,
  response::{Html, IntoResponse, Response},
};
use solute_core::{
  apps::{self, AppDef, Pipeline},
  backend::GenerativeBackend,
  form::FormInput,
};

use super::{read_form, see_other, workspaces};
use crate::{
  AppState, Error,
  render::{self, Tone},
  run::{self, RunError, RunOutput},
  session::SessionId,
};

pub(crate) fn lookup(slug: &str) -> Result<&'static AppDef, Error> {
  apps::find(slug).ok_or_else(|| Error::UnknownApp(slug.to_owned()))
}

/// Title block shared by every app page.
pub(crate) fn header(app: &AppDef) -> String {
  format!(
    "<h1>{} {}</h1><p class=\"tagline\">{}</p>{}",
    app.info.icon,
    render::escape(app.info.name),
    render::escape(app.info.tagline),
    render::alert(Tone::Info, app.intro),
  )
}

pub(crate) fn caption(app: &AppDef) -> String {
  format!("<p class=\"caption\">{}</p>", render::escape(app.caption))
}

/// The form page, optionally refilled and followed by `extra` (alerts or a
/// result).
fn form_page(app: &AppDef, values: Option<&FormInput>, extra: &str) -> Html<String> {
  let action = format!("/apps/{}", app.slug());
  let body = format!(
    "{}{}{extra}{}",
    header(app),
    render::form(&action, app.fields, values, app.submit_label),
    caption(app),
  );
  render::page(app.info.name, &body)
}

/// `GET /apps/{slug}`
pub async fn show<B, S>(
  State(state): State<AppState<B, S>>,
  Extension(session): Extension<SessionId>,
  Path(slug): Path<String>,
) -> Result<Response, Error>
where
  B: GenerativeBackend,
{
  let app = lookup(&slug)?;
  match app.pipeline {
    Pipeline::Games => Ok(see_other("/games")),
    Pipeline::Workspace(kind) => Ok(workspaces::page(&state, session, app, kind, "").into_response()),
    _ => {
      if let Some(reason) = app.unavailable(state.backend.capabilities()) {
        let body = format!("{}{}", header(app), render::alert(Tone::Error, reason));
        return Ok(render::page(app.info.name, &body).into_response());
      }
      Ok(form_page(app, None, "").into_response())
    }
  }
}

/// `POST /apps/{slug}`
pub async fn submit<B, S>(
  State(state): State<AppState<B, S>>,
  Extension(session): Extension<SessionId>,
  Path(slug): Path<String>,
  multipart: Multipart,
) -> Result<Response, Error>
where
  B: GenerativeBackend,
{
  let app = lookup(&slug)?;
  let mut input = read_form(multipart).await?;
  input.normalize(app.fields);

  match app.pipeline {
    Pipeline::Games => return Ok(see_other("/games")),
    Pipeline::Workspace(kind) => return workspaces::add_item(&state, session, app, kind, &input),
    _ => {}
  }

  let caps = state.backend.capabilities();
  if let Some(reason) = app.unavailable(caps) {
    let body = format!("{}{}", header(app), render::alert(Tone::Error, reason));
    return Ok(render::page(app.info.name, &body).into_response());
  }

  if let Some(warning) = app.validate(&input) {
    let extra = render::alert(Tone::Warning, warning);
    return Ok(form_page(app, Some(&input), &extra).into_response());
  }

  let mut extra: String = app
    .notices_for(&input)
    .into_iter()
    .map(|n| render::alert(Tone::Info, n))
    .collect();

  let Some((branch, pipeline)) = app.pipeline.resolve(&input) else {
    extra.push_str(&render::alert(Tone::Warning, "Choose one of the listed options."));
    return Ok(form_page(app, Some(&input), &extra).into_response());
  };
  if let Some(reason) = pipeline.missing_service(caps) {
    extra.push_str(&render::alert(Tone::Error, reason));
    return Ok(form_page(app, Some(&input), &extra).into_response());
  }

  let heading = branch
    .map(|b| b.result_heading)
    .filter(|h| !h.is_empty())
    .unwrap_or(app.result_heading);

  tracing::info!(app = app.slug(), "running app");
  match run::execute(&state, pipeline, &mut input).await {
    Ok(output) => {
      let markdown = output.to_markdown(heading);
      state.sessions.with(session, |s| s.results.insert(app.slug(), markdown));
      extra.push_str(&result_section(app, heading, &output));
    }
    Err(RunError::Warning(w)) => extra.push_str(&render::alert(Tone::Warning, &w)),
    Err(RunError::Service(msg)) => {
      extra.push_str(&render::alert(Tone::Error, &format!("{}: {msg}", app.failure_label)));
    }
    Err(RunError::Internal(e)) => return Err(e),
  }

  Ok(form_page(app, Some(&input), &extra).into_response())
}

fn result_section(app: &AppDef, heading: &str, output: &RunOutput) -> String {
  let mut out = render::alert(Tone::Success, app.success);
  out.push_str(&format!("<h2>{}</h2>", render::escape(heading)));

  match output {
    RunOutput::Text(text) => {
      out.push_str(&format!("<div class=\"result\">{}</div>", render::markdown(text)));
    }
    RunOutput::Images(images) => {
      out.push_str("<div class=\"images\">");
      for (i, image) in images.iter().enumerate() {
        let uri = render::data_uri(&format!("image/{}", image.format), &image.bytes);
        out.push_str(&format!(
          "<figure><img src=\"{uri}\" alt=\"Design {n}\"><figcaption>Design {n} · \
           <a download=\"design_{n}.{ext}\" href=\"{uri}\">Download</a></figcaption></figure>",
          n = i + 1,
          ext = image.format,
        ));
        if image.mockup {
          out.push_str(&format!(
            "<figure><div class=\"mockup\"><img src=\"{uri}\" alt=\"\"></div>\
             <figcaption>T-shirt mockup {}</figcaption></figure>",
            i + 1
          ));
        }
      }
      out.push_str("</div>");
    }
    RunOutput::Cutout(cutout) => {
      let uri = render::data_uri("image/png", &cutout.png);
      let filename = render::escape(&cutout.filename);
      out.push_str(&format!(
        "<figure><img src=\"{uri}\" alt=\"Background removed\" style=\"max-width:420px\">\
         <figcaption><a download=\"{filename}\" href=\"{uri}\">Download transparent PNG</a></figcaption></figure>"
      ));
      if let Some(color) = &cutout.background {
        out.push_str(&format!(
          "<h3>On a new background</h3><div class=\"swatch\" style=\"background:{}\">\
           <img src=\"{uri}\" alt=\"On new background\" style=\"max-width:420px\"></div>",
          render::escape(color)
        ));
      }
      if cutout.cached {
        out.push_str("<p class=\"caption\">Reused a result from the last hour.</p>");
      }
    }
  }

  if let Some(ill) = app.illustration {
    out.push_str(&render::bar_chart(ill.title, ill.bars, "%"));
    out.push_str(&format!("<p class=\"caption\">{}</p>", render::escape(ill.note)));
  }

  out.push_str(&format!(
    "<p><a href=\"/apps/{}/result.md\" download=\"{}\">⬇ Download result (.md)</a></p>",
    app.slug(),
    app.download_name(),
  ));
  out
}

/// `GET /apps/{slug}/result.md`
pub async fn download<B, S>(
  State(state): State<AppState<B, S>>,
  Extension(session): Extension<SessionId>,
  Path(slug): Path<String>,
) -> Result<Response, Error> {
  let app = lookup(&slug)?;
  let markdown = state
    .sessions
    .with(session, |s| s.results.get(app.slug()).cloned())
    .ok_or(Error::NotFound)?;

  let disposition = format!("attachment; filename=\"{}\"", app.download_name());
  Ok(
    (
      [
        (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_owned()),
        (header::CONTENT_DISPOSITION, disposition),
      ],
      markdown,
    )
      .into_response(),
  )
}
