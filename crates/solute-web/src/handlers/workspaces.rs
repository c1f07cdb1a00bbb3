//! Workspace apps: ContraMind, SkillRust, AssistForge and SurveyForge.
//!
//! Adding an item goes through `POST /apps/{slug}` like any other form; the
//! routes here run the per-collection prompts and exports.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/workspace/notes/challenge` | "Argue with me" over all notes |
//! | `GET`  | `/workspace/notes/export.json` | |
//! | `POST` | `/workspace/skills/{index}/refresh` | Refresh plan for one skill |
//! | `GET`  | `/workspace/skills/export.json` | |
//! | `POST` | `/workspace/tasks/{id}/apply` | Application suggestion |
//! | `GET`  | `/workspace/surveys/{id}` | Take a survey |
//! | `POST` | `/workspace/surveys/{id}/respond` | Form: `q0`, `q1`, … |
//! | `POST` | `/workspace/surveys/{id}/insights` | |

use std::collections::HashMap;

use axum::{
  Extension, Form,
  extract::{Path, State},
  http::header,
  response::{Html, IntoResponse, Response},
};
use chrono::{Local, NaiveDate};
use solute_core::{
  apps::{self, AppDef, WorkspaceKind},
  backend::{GenerateRequest, GenerativeBackend},
  form::{FormInput, first_unmet},
  workspace::{
    form_date,
    survey::{QuestionKind, Survey},
    tasks::NewTask,
  },
};

use super::{
  apps::{caption, header as app_header},
  see_other,
};
use crate::{
  AppState, Error,
  render::{self, Tone},
  session::{Session, SessionId},
};

fn today() -> NaiveDate { Local::now().date_naive() }

fn app_for(kind: WorkspaceKind) -> Result<&'static AppDef, Error> {
  apps::workspace(kind).ok_or(Error::NotFound)
}

// ─── Page ────────────────────────────────────────────────────────────────────

/// The workspace page: add-item form, the collection, then `extra`.
pub(crate) fn page<B, S>(
  state: &AppState<B, S>,
  session: SessionId,
  app: &AppDef,
  kind: WorkspaceKind,
  extra: &str,
) -> Html<String> {
  let listing = state.sessions.with(session, |s| listing(s, kind));
  let action = format!("/apps/{}", app.slug());
  let body = format!(
    "{}{}{listing}{extra}{}",
    app_header(app),
    render::form(&action, app.fields, None, app.submit_label),
    caption(app),
  );
  render::page(app.info.name, &body)
}

fn listing(session: &Session, kind: WorkspaceKind) -> String {
  let ws = &session.workspaces;
  match kind {
    WorkspaceKind::Notes => {
      if ws.notes.is_empty() {
        return render::alert(Tone::Info, "No thoughts yet. Add one above to begin building your second brain.");
      }
      let mut out = format!("<h2>Your thoughts ({})</h2><ul>", ws.notes.len());
      for note in ws.notes.sorted() {
        out.push_str(&format!(
          "<li><strong>{}</strong>: {}</li>",
          note.date.format("%Y-%m-%d"),
          render::escape(note.preview())
        ));
      }
      out.push_str("</ul>");
      out.push_str(&render::button("/workspace/notes/challenge", "Argue with me"));
      out.push_str("<p><a href=\"/workspace/notes/export.json\">⬇ Export notes (.json)</a></p>");
      out
    }
    WorkspaceKind::Skills => {
      if ws.skills.is_empty() {
        return render::alert(Tone::Info, "No skills tracked yet. Add one above.");
      }
      let today = today();
      let mut out = String::from("<h2>Your skills</h2>");
      let rows = ws.skills.skills().iter().map(|skill| {
        let d = skill.decay(today);
        vec![
          skill.name.clone(),
          skill.category.clone(),
          d.days_inactive.to_string(),
          format!("{:.1}%", d.percent),
          format!("{:.1}/10", d.current_level),
          d.risk.to_string(),
        ]
      });
      out.push_str(&render::table(
        &["Skill", "Category", "Days inactive", "Decay", "Level now", "Risk"],
        rows,
      ));
      for (i, skill) in ws.skills.skills().iter().enumerate() {
        out.push_str(&render::button(
          &format!("/workspace/skills/{i}/refresh"),
          &format!("Refresh plan: {}", skill.name),
        ));
      }
      out.push_str("<p><a href=\"/workspace/skills/export.json\">⬇ Export skills (.json)</a></p>");
      out
    }
    WorkspaceKind::Tasks => {
      if ws.tasks.tasks().is_empty() {
        return render::alert(Tone::Info, "No tasks posted yet. Check back soon!");
      }
      let mut out = String::from("<h2>Open tasks</h2>");
      for task in ws.tasks.tasks() {
        out.push_str(&format!(
          "<div class=\"card\"><h3>{}</h3><p>{}</p><p><strong>Skills:</strong> {} · \
           <strong>Budget:</strong> ${:.2} · <strong>Duration:</strong> {} · <strong>Posted:</strong> {}</p>{}</div>",
          render::escape(&task.title),
          render::escape(&task.description),
          render::escape(&task.skills),
          task.budget,
          render::escape(&task.duration),
          task.posted.format("%Y-%m-%d"),
          render::button(&format!("/workspace/tasks/{}/apply", task.id), "Get application suggestion"),
        ));
      }
      out
    }
    WorkspaceKind::Surveys => {
      if ws.surveys.surveys().is_empty() {
        return render::alert(Tone::Info, "No surveys yet. Create one above.");
      }
      let mut out = String::from("<h2>Your surveys</h2>");
      for survey in ws.surveys.surveys() {
        out.push_str(&format!(
          "<div class=\"card\"><h3>{}</h3><p>{} questions · {} responses · \
           <a href=\"/workspace/surveys/{id}\">Take survey</a></p>{}</div>",
          render::escape(&survey.title),
          survey.questions.len(),
          survey.responses.len(),
          render::button(&format!("/workspace/surveys/{}/insights", survey.id), "Generate insights"),
          id = survey.id,
        ));
      }
      out
    }
  }
}

// ─── Adding items ────────────────────────────────────────────────────────────

/// Handle the add-item form of a workspace app.
pub(crate) fn add_item<B, S>(
  state: &AppState<B, S>,
  session: SessionId,
  app: &AppDef,
  kind: WorkspaceKind,
  input: &FormInput,
) -> Result<Response, Error> {
  if let Some(warning) = first_unmet(app.requirements, input) {
    return Ok(page(state, session, app, kind, &render::alert(Tone::Warning, warning)).into_response());
  }

  let today = today();
  let added = state.sessions.with(session, |s| {
    let ws = &mut s.workspaces;
    match kind {
      WorkspaceKind::Notes => {
        ws.notes.add(input.get("text"), form_date(input.get("date"), today));
        Ok(())
      }
      WorkspaceKind::Skills => {
        ws.skills.add(
          input.get("name"),
          input.get("category"),
          form_date(input.get("last_practiced"), today),
          input.int("level", 1, 10, 8),
        );
        Ok(())
      }
      WorkspaceKind::Tasks => {
        ws.tasks.post(
          NewTask {
            title:       input.get("title").to_owned(),
            description: input.get("description").to_owned(),
            skills:      input.get("skills").to_owned(),
            budget:      input.get("budget").parse().unwrap_or(20.0),
            duration:    input.get("duration").to_owned(),
          },
          today,
        );
        Ok(())
      }
      WorkspaceKind::Surveys => ws
        .surveys
        .create(input.get("title"), input.get("questions"))
        .map(|_| ()),
    }
  });

  match added {
    Ok(()) => {
      tracing::debug!(app = app.slug(), "workspace item added");
      Ok(see_other(&format!("/apps/{}", app.slug())))
    }
    Err(solute_core::Error::EmptySurvey) => {
      let warning = render::alert(Tone::Warning, "A survey needs a title and at least one question.");
      Ok(page(state, session, app, kind, &warning).into_response())
    }
    Err(e) => Err(e.into()),
  }
}

// ─── Prompts ─────────────────────────────────────────────────────────────────

/// Send `prompt`, keep the reply as the app's downloadable result, and
/// render the workspace page with it.
async fn ask<B, S>(
  state: &AppState<B, S>,
  session: SessionId,
  kind: WorkspaceKind,
  prompt: String,
) -> Result<Response, Error>
where
  B: GenerativeBackend,
{
  let app = app_for(kind)?;
  let extra = match state.backend.generate(GenerateRequest::text(prompt)).await {
    Ok(text) => {
      let markdown = format!("# {}\n\n{text}\n", app.result_heading);
      state.sessions.with(session, |s| s.results.insert(app.slug(), markdown));
      format!(
        "{}<h2>{}</h2><div class=\"result\">{}</div>\
         <p><a href=\"/apps/{slug}/result.md\" download=\"{slug}.md\">⬇ Download result (.md)</a></p>",
        render::alert(Tone::Success, app.success),
        render::escape(app.result_heading),
        render::markdown(&text),
        slug = app.slug(),
      )
    }
    Err(e) => {
      tracing::warn!(error = %e, app = app.slug(), "workspace prompt failed");
      render::alert(Tone::Error, &format!("{}: {e}", app.failure_label))
    }
  };
  Ok(page(state, session, app, kind, &extra).into_response())
}

/// `POST /workspace/notes/challenge`
pub async fn challenge_notes<B, S>(
  State(state): State<AppState<B, S>>,
  Extension(session): Extension<SessionId>,
) -> Result<Response, Error>
where
  B: GenerativeBackend,
{
  let prompt = state.sessions.with(session, |s| s.workspaces.notes.challenge_prompt());
  match prompt {
    Some(prompt) => ask(&state, session, WorkspaceKind::Notes, prompt).await,
    None => {
      let app = app_for(WorkspaceKind::Notes)?;
      let warning = render::alert(Tone::Warning, "Add at least one thought first.");
      Ok(page(&state, session, app, WorkspaceKind::Notes, &warning).into_response())
    }
  }
}

/// `POST /workspace/skills/{index}/refresh`
pub async fn refresh_skill<B, S>(
  State(state): State<AppState<B, S>>,
  Extension(session): Extension<SessionId>,
  Path(index): Path<usize>,
) -> Result<Response, Error>
where
  B: GenerativeBackend,
{
  let today = today();
  let prompt = state
    .sessions
    .with(session, |s| s.workspaces.skills.get(index).map(|k| k.refresh_prompt(today)))?;
  ask(&state, session, WorkspaceKind::Skills, prompt).await
}

/// `POST /workspace/tasks/{id}/apply`
pub async fn apply_task<B, S>(
  State(state): State<AppState<B, S>>,
  Extension(session): Extension<SessionId>,
  Path(id): Path<u32>,
) -> Result<Response, Error>
where
  B: GenerativeBackend,
{
  let prompt = state
    .sessions
    .with(session, |s| s.workspaces.tasks.get(id).map(|t| t.application_prompt()))?;
  ask(&state, session, WorkspaceKind::Tasks, prompt).await
}

/// `POST /workspace/surveys/{id}/insights`
pub async fn survey_insights<B, S>(
  State(state): State<AppState<B, S>>,
  Extension(session): Extension<SessionId>,
  Path(id): Path<u32>,
) -> Result<Response, Error>
where
  B: GenerativeBackend,
{
  let prompt = state
    .sessions
    .with(session, |s| s.workspaces.surveys.get(id).and_then(Survey::insights_prompt))?;
  match prompt {
    Some(prompt) => ask(&state, session, WorkspaceKind::Surveys, prompt).await,
    None => {
      let app = app_for(WorkspaceKind::Surveys)?;
      let info = render::alert(Tone::Info, "No responses yet.");
      Ok(page(&state, session, app, WorkspaceKind::Surveys, &info).into_response())
    }
  }
}

// ─── Exports ─────────────────────────────────────────────────────────────────

fn json_download(filename: &str, body: String) -> Response {
  (
    [
      (header::CONTENT_TYPE, "application/json".to_owned()),
      (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{filename}\"")),
    ],
    body,
  )
    .into_response()
}

/// `GET /workspace/notes/export.json`
pub async fn export_notes<B, S>(
  State(state): State<AppState<B, S>>,
  Extension(session): Extension<SessionId>,
) -> Result<Response, Error> {
  let json = state.sessions.with(session, |s| s.workspaces.notes.export_json())?;
  Ok(json_download("contramind_notes.json", json))
}

/// `GET /workspace/skills/export.json`
pub async fn export_skills<B, S>(
  State(state): State<AppState<B, S>>,
  Extension(session): Extension<SessionId>,
) -> Result<Response, Error> {
  let json = state.sessions.with(session, |s| s.workspaces.skills.export_json())?;
  Ok(json_download("skillrust_skills.json", json))
}

// ─── Taking a survey ─────────────────────────────────────────────────────────

fn survey_form(survey: &Survey) -> String {
  let mut out = format!(
    "<h2>{}</h2><form class=\"app\" method=\"post\" action=\"/workspace/surveys/{}/respond\">",
    render::escape(&survey.title),
    survey.id
  );
  for (i, q) in survey.questions.iter().enumerate() {
    out.push_str(&format!("<label>{}. {}</label>", i + 1, render::escape(&q.text)));
    match &q.kind {
      QuestionKind::Text => {
        out.push_str(&format!("<textarea name=\"q{i}\" rows=\"3\"></textarea>"));
      }
      QuestionKind::Choice(options) => {
        for option in options {
          let option = render::escape(option);
          out.push_str(&format!(
            "<div><label><input type=\"radio\" name=\"q{i}\" value=\"{option}\"> {option}</label></div>"
          ));
        }
      }
    }
  }
  out.push_str("<button type=\"submit\">Submit response</button></form>");
  out
}

fn survey_page(survey: &Survey, extra: &str) -> Html<String> {
  let body = format!(
    "<p><a href=\"/apps/surveyforge\">← All surveys</a></p>{extra}{}",
    survey_form(survey)
  );
  render::page(&survey.title, &body)
}

/// `GET /workspace/surveys/{id}`
pub async fn show_survey<B, S>(
  State(state): State<AppState<B, S>>,
  Extension(session): Extension<SessionId>,
  Path(id): Path<u32>,
) -> Result<Html<String>, Error> {
  let survey = state.sessions.with(session, |s| s.workspaces.surveys.get(id).cloned())?;
  Ok(survey_page(&survey, ""))
}

/// `POST /workspace/surveys/{id}/respond`
pub async fn respond_survey<B, S>(
  State(state): State<AppState<B, S>>,
  Extension(session): Extension<SessionId>,
  Path(id): Path<u32>,
  Form(mut fields): Form<HashMap<String, String>>,
) -> Result<Html<String>, Error> {
  let survey = state.sessions.with(session, |s| -> solute_core::Result<Survey> {
    let surveys = &mut s.workspaces.surveys;
    let count = surveys.get(id)?.questions.len();
    let answers = (0..count)
      .map(|i| fields.remove(&format!("q{i}")).unwrap_or_default())
      .collect();
    surveys.respond(id, answers)?;
    surveys.get(id).cloned()
  })?;
  Ok(survey_page(&survey, &render::alert(Tone::Success, "Thank you! Response recorded.")))
}
