//! MindGames: the hub, one page per variant, and the leaderboard.
//!
//! Every action is a plain form POST followed by a redirect back to the
//! variant page. Actions that don't fit the current phase re-render the page
//! with a warning and leave the game untouched.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/games` | Scoreboard, variants and leaderboard |
//! | `POST` | `/games/reset` | New session: zero the score |
//! | `POST` | `/games/scores` | Form: `name` |
//! | `GET`  | `/games/{variant}` | `riddle`, `quiz`, `insight` or `pattern` |
//! | `POST` | `/games/{variant}/begin` | Quiz form: `topic`, `count` |
//! | `POST` | `/games/{variant}/reveal` | Pattern only |
//! | `POST` | `/games/{variant}/submit` | `answer`, `guess`, or `q0`, `q1`, … |
//! | `POST` | `/games/{variant}/next` | |

use std::{collections::HashMap, time::Instant};

use axum::{
  Extension, Form,
  extract::{Path, State},
  response::{Html, IntoResponse, Response},
};
use solute_core::{
  backend::{GenerateRequest, GenerativeBackend},
  game::{
    Answer, Difficulty, Phase, Reveal, Round, Sequencer, Variant,
    insight::{self, Dataset},
    pattern::{self, PatternRound},
    quiz, riddle,
  },
  score::{NewScore, ScoreStore},
};

use super::{apps, see_other};
use crate::{
  AppState, Error,
  render::{self, Tone},
  session::SessionId,
};

const LEADERBOARD_SIZE: usize = 10;

type Fields = HashMap<String, String>;

fn parse_variant(segment: &str) -> Result<Variant, Error> {
  segment.parse().map_err(|_| Error::UnknownGame(segment.to_owned()))
}

fn field<'a>(fields: &'a Fields, name: &str) -> &'a str {
  fields.get(name).map(String::as_str).unwrap_or_default()
}

fn variant_url(variant: Variant) -> String { format!("/games/{variant}") }

/// Turn a rejected phase transition into an inline warning; anything else
/// is a real error.
fn transition_warning(e: solute_core::Error) -> Result<String, Error> {
  match e {
    e @ solute_core::Error::InvalidTransition { .. } => {
      tracing::debug!(error = %e, "ignored out-of-phase action");
      Ok(render::alert(Tone::Warning, "That action doesn't fit this round any more. Here's where you are."))
    }
    e => Err(e.into()),
  }
}

// ─── Hub ─────────────────────────────────────────────────────────────────────

async fn hub_page<B, S>(state: &AppState<B, S>, session: SessionId, extra: &str) -> Result<Html<String>, Error>
where
  S: ScoreStore,
{
  let (total, difficulty, running, phases) = state.sessions.with(session, |s| {
    let games = &s.games;
    let phases: Vec<(Variant, Phase)> = games.sequencers().map(|q| (q.variant(), q.phase())).collect();
    (games.scoreboard().total(), games.difficulty(), games.scoreboard().running_totals(), phases)
  });
  let top = state.scores.top(LEADERBOARD_SIZE).await.map_err(Error::store)?;

  let mut body = String::new();
  if let Some(app) = solute_core::apps::find("mindgames") {
    body.push_str(&apps::header(app));
  }
  body.push_str(extra);
  body.push_str(&format!(
    "<p class=\"score\"><strong>Score:</strong> {total} · <strong>Difficulty:</strong> {difficulty}</p>"
  ));

  if !running.is_empty() {
    let labels: Vec<String> = (1..=running.len()).map(|i| format!("Round {i}")).collect();
    let bars: Vec<(&str, u32)> = labels.iter().map(String::as_str).zip(running.iter().copied()).collect();
    body.push_str(&render::bar_chart("Score progress", &bars, " pts"));
  }

  body.push_str("<div class=\"grid\">");
  for (variant, phase) in phases {
    body.push_str(&format!(
      "<div class=\"card\"><h3>{} {}</h3><p>{}</p><p class=\"caption\">Phase: {phase}</p>\
       <a href=\"{}\">Play</a></div>",
      variant.icon(),
      render::escape(variant.title()),
      render::escape(variant.blurb()),
      variant_url(variant),
    ));
  }
  body.push_str("</div>");

  body.push_str(
    "<h2>🏆 Leaderboard</h2><form class=\"app\" method=\"post\" action=\"/games/scores\">\
     <label for=\"name\">Your name</label><input type=\"text\" id=\"name\" name=\"name\" maxlength=\"32\">\
     <button type=\"submit\">Save my score</button></form>",
  );
  if top.is_empty() {
    body.push_str(&render::alert(Tone::Info, "No scores saved yet."));
  } else {
    let rows = top.iter().enumerate().map(|(i, r)| {
      vec![
        (i + 1).to_string(),
        r.name.clone(),
        r.score.to_string(),
        r.created_at.format("%Y-%m-%d %H:%M").to_string(),
      ]
    });
    body.push_str(&render::table(&["#", "Name", "Score", "Saved"], rows));
  }

  body.push_str(&render::button("/games/reset", "Start a new session"));
  Ok(render::page("MindGames", &body))
}

/// `GET /games`
pub async fn hub<B, S>(
  State(state): State<AppState<B, S>>,
  Extension(session): Extension<SessionId>,
) -> Result<Html<String>, Error>
where
  S: ScoreStore,
{
  hub_page(&state, session, "").await
}

/// `POST /games/reset`
pub async fn reset<B, S>(
  State(state): State<AppState<B, S>>,
  Extension(session): Extension<SessionId>,
) -> Response {
  state.sessions.with(session, |s| s.games.reset());
  tracing::info!(session = %session.0, "game session reset");
  see_other("/games")
}

/// `POST /games/scores`
pub async fn save_score<B, S>(
  State(state): State<AppState<B, S>>,
  Extension(session): Extension<SessionId>,
  Form(fields): Form<Fields>,
) -> Result<Response, Error>
where
  S: ScoreStore,
{
  let total = state.sessions.with(session, |s| s.games.scoreboard().total());
  let entry = match NewScore::new(session.0, field(&fields, "name"), total) {
    Ok(entry) => entry,
    Err(solute_core::Error::EmptyName) => {
      let warning = render::alert(Tone::Warning, "Enter a name to save your score.");
      return Ok(hub_page(&state, session, &warning).await?.into_response());
    }
    Err(e) => return Err(e.into()),
  };

  let record = state.scores.record(entry).await.map_err(Error::store)?;
  tracing::info!(id = record.id, score = record.score, "score saved");
  Ok(see_other("/games"))
}

// ─── Variant pages ───────────────────────────────────────────────────────────

fn game_page<B, S>(state: &AppState<B, S>, session: SessionId, variant: Variant, extra: &str) -> Html<String> {
  let (sequencer, total) =
    state.sessions.with(session, |s| (s.games.sequencer(variant).clone(), s.games.scoreboard().total()));

  let mut body = format!(
    "<p><a href=\"/games\">← All games</a> · Score: {total}</p><h1>{} {}</h1><p class=\"tagline\">{}</p>{extra}",
    variant.icon(),
    render::escape(variant.title()),
    render::escape(variant.blurb()),
  );
  body.push_str(&phase_view(&sequencer));
  render::page(variant.title(), &body)
}

fn phase_view(sequencer: &Sequencer) -> String {
  let variant = sequencer.variant();
  let url = variant_url(variant);
  match (sequencer.phase(), sequencer.round()) {
    (Phase::Start, _) => match variant {
      Variant::Quiz => format!(
        "<form class=\"app\" method=\"post\" action=\"{url}/begin\">\
         <label for=\"topic\">Quiz topic</label>\
         <input type=\"text\" id=\"topic\" name=\"topic\" placeholder=\"e.g. Space exploration\">\
         <label for=\"count\">Number of questions</label>\
         <input type=\"number\" id=\"count\" name=\"count\" min=\"{}\" max=\"{}\" value=\"{}\">\
         <button type=\"submit\">Generate Quiz</button></form>",
        quiz::MIN_QUESTIONS,
        quiz::MAX_QUESTIONS,
        quiz::DEFAULT_QUESTIONS,
      ),
      _ => render::button(&format!("{url}/begin"), "Start round"),
    },
    (Phase::Memorize, Some(Round::Pattern(p))) => format!(
      "<p>Memorize this sequence:</p><p class=\"pattern\">{}</p>{}",
      pattern::render(&p.sequence),
      render::button(&format!("{url}/reveal"), "I've memorized it"),
    ),
    (Phase::Answer, Some(round)) => answer_view(&url, round),
    (Phase::Result, _) => {
      let mut out = String::new();
      if let Some(outcome) = sequencer.outcome() {
        let tone = match outcome.correct {
          Some(true) => Tone::Success,
          Some(false) => Tone::Error,
          None => Tone::Info,
        };
        out.push_str(&render::alert(tone, &outcome.summary));
        if let Some(detail) = &outcome.detail {
          out.push_str(&format!("<div class=\"result\">{}</div>", render::markdown(detail)));
        }
      }
      out.push_str(&render::button(&format!("{url}/next"), "Next round"));
      out
    }
    // A phase past Start always carries its round.
    _ => render::button(&format!("{url}/begin"), "Start round"),
  }
}

fn answer_view(url: &str, round: &Round) -> String {
  let mut out = format!("<form class=\"app\" method=\"post\" action=\"{url}/submit\">");
  match round {
    Round::Riddle(r) => {
      out.push_str(&format!(
        "<div class=\"result\">{}</div><label for=\"answer\">Your answer</label>\
         <input type=\"text\" id=\"answer\" name=\"answer\"><button type=\"submit\">Check Answer</button>",
        render::markdown(&r.text)
      ));
    }
    Round::Quiz(q) => {
      out.push_str(&format!("<h2>Quiz: {}</h2>", render::escape(&q.topic)));
      for (i, question) in q.questions.iter().enumerate() {
        out.push_str(&format!("<fieldset><legend>{}. {}</legend>", i + 1, render::escape(&question.prompt)));
        for (j, option) in question.options.iter().enumerate() {
          out.push_str(&format!(
            "<div><label><input type=\"radio\" name=\"q{i}\" value=\"{j}\"> {}) {}</label></div>",
            quiz::letter(j),
            render::escape(option),
          ));
        }
        out.push_str("</fieldset>");
      }
      out.push_str("<button type=\"submit\">Submit Quiz</button>");
    }
    Round::Insight(dataset) => {
      out.push_str(&render::bar_chart("Total by category", &dataset.totals(), ""));
      let rows = dataset.rows.iter().map(|r| vec![r.category.to_owned(), r.value.to_string()]);
      out.push_str(&render::table(&["Category", "Value"], rows));
      out.push_str(
        "<label for=\"guess\">What story does this data tell?</label>\
         <textarea id=\"guess\" name=\"guess\" rows=\"3\"></textarea>\
         <button type=\"submit\">Reveal Insight</button>",
      );
    }
    Round::Pattern(p) => {
      out.push_str(&format!(
        "<p>Type the {} colours you saw, using letters: R G B Y P O.</p>\
         <label for=\"answer\">Sequence</label><input type=\"text\" id=\"answer\" name=\"answer\" \
         autocomplete=\"off\"><button type=\"submit\">Check Sequence</button>",
        p.sequence.len()
      ));
    }
  }
  out.push_str("</form>");
  out
}

/// `GET /games/{variant}`
pub async fn show<B, S>(
  State(state): State<AppState<B, S>>,
  Extension(session): Extension<SessionId>,
  Path(variant): Path<String>,
) -> Result<Html<String>, Error> {
  let variant = parse_variant(&variant)?;
  Ok(game_page(&state, session, variant, ""))
}

// ─── Actions ─────────────────────────────────────────────────────────────────

/// Rounds built locally, without a model call.
fn local_round(variant: Variant, difficulty: Difficulty) -> Option<Round> {
  let mut rng = rand::rng();
  match variant {
    Variant::Insight => Some(Round::Insight(Dataset::generate(&mut rng))),
    Variant::Pattern => Some(Round::Pattern(PatternRound::generate(&mut rng, difficulty))),
    Variant::Riddle | Variant::Quiz => None,
  }
}

/// `POST /games/{variant}/begin`
pub async fn begin<B, S>(
  State(state): State<AppState<B, S>>,
  Extension(session): Extension<SessionId>,
  Path(variant): Path<String>,
  Form(fields): Form<Fields>,
) -> Result<Response, Error>
where
  B: GenerativeBackend,
{
  let variant = parse_variant(&variant)?;
  let (phase, difficulty) =
    state.sessions.with(session, |s| (s.games.sequencer(variant).phase(), s.games.difficulty()));
  if phase != Phase::Start {
    let warning = render::alert(Tone::Warning, "Finish the current round first.");
    return Ok(game_page(&state, session, variant, &warning).into_response());
  }

  let round = match local_round(variant, difficulty) {
    Some(round) => round,
    None => {
      let (prompt, topic, count) = match variant {
        Variant::Quiz => {
          let topic = field(&fields, "topic").trim().to_owned();
          if topic.is_empty() {
            let warning = render::alert(Tone::Warning, "Enter a quiz topic first.");
            return Ok(game_page(&state, session, variant, &warning).into_response());
          }
          let count = field(&fields, "count")
            .trim()
            .parse::<i64>()
            .unwrap_or(quiz::DEFAULT_QUESTIONS)
            .clamp(quiz::MIN_QUESTIONS, quiz::MAX_QUESTIONS) as usize;
          (quiz::prompt(&topic, count, difficulty), topic, count)
        }
        _ => (riddle::prompt(difficulty), String::new(), 0),
      };

      let text = match state.backend.generate(GenerateRequest::text(prompt)).await {
        Ok(text) => text,
        Err(e) => {
          tracing::warn!(error = %e, %variant, "round generation failed");
          let alert = render::alert(Tone::Error, &format!("Generation failed: {e}"));
          return Ok(game_page(&state, session, variant, &alert).into_response());
        }
      };
      match variant {
        Variant::Quiz => Round::Quiz(quiz::parse_or_fallback(&topic, &text, count)),
        _ => Round::Riddle(riddle::parse_or_fallback(&text)),
      }
    }
  };

  match state.sessions.with(session, |s| s.games.begin(round, Instant::now())) {
    Ok(phase) => {
      tracing::debug!(%variant, %difficulty, %phase, "round started");
      Ok(see_other(&variant_url(variant)))
    }
    Err(e) => Ok(game_page(&state, session, variant, &transition_warning(e)?).into_response()),
  }
}

/// `POST /games/{variant}/reveal`
pub async fn reveal<B, S>(
  State(state): State<AppState<B, S>>,
  Extension(session): Extension<SessionId>,
  Path(variant): Path<String>,
) -> Result<Response, Error> {
  let variant = parse_variant(&variant)?;
  let extra = match state.sessions.with(session, |s| s.games.reveal(variant, Instant::now())) {
    Ok(Reveal::Ready) => return Ok(see_other(&variant_url(variant))),
    Ok(Reveal::Wait(left)) => {
      let secs = left.as_secs() + u64::from(left.subsec_nanos() > 0);
      render::alert(Tone::Warning, &format!("Keep memorizing: {secs} more second(s)."))
    }
    Err(e) => transition_warning(e)?,
  };
  Ok(game_page(&state, session, variant, &extra).into_response())
}

/// `POST /games/{variant}/submit`
pub async fn submit<B, S>(
  State(state): State<AppState<B, S>>,
  Extension(session): Extension<SessionId>,
  Path(variant): Path<String>,
  Form(fields): Form<Fields>,
) -> Result<Response, Error>
where
  B: GenerativeBackend,
{
  let variant = parse_variant(&variant)?;
  let answer = match variant {
    Variant::Riddle => Answer::Riddle(field(&fields, "answer").to_owned()),
    Variant::Pattern => Answer::Pattern(field(&fields, "answer").to_owned()),
    Variant::Quiz => {
      let count = state.sessions.with(session, |s| match s.games.sequencer(variant).round() {
        Some(Round::Quiz(q)) => q.questions.len(),
        _ => 0,
      });
      let choices = (0..count)
        .map(|i| fields.get(&format!("q{i}")).and_then(|v| v.trim().parse().ok()))
        .collect();
      Answer::Quiz(choices)
    }
    Variant::Insight => {
      let guess = field(&fields, "guess").to_owned();
      let dataset = state.sessions.with(session, |s| {
        let seq = s.games.sequencer(variant);
        match (seq.phase(), seq.round()) {
          (Phase::Answer, Some(Round::Insight(d))) => Some(d.clone()),
          _ => None,
        }
      });
      let insight = match dataset {
        Some(dataset) => {
          let request = GenerateRequest::text(insight::prompt(&dataset, &guess));
          match state.backend.generate(request).await {
            Ok(text) => text,
            Err(e) => {
              tracing::warn!(error = %e, "insight generation failed");
              let alert = render::alert(Tone::Error, &format!("Generation failed: {e}"));
              return Ok(game_page(&state, session, variant, &alert).into_response());
            }
          }
        }
        // Out of phase: let the sequencer reject it.
        None => String::new(),
      };
      Answer::Insight { guess, insight }
    }
  };

  match state.sessions.with(session, |s| s.games.submit(answer)) {
    Ok(outcome) => {
      tracing::info!(%variant, points = outcome.points, "round graded");
      Ok(see_other(&variant_url(variant)))
    }
    Err(e) => Ok(game_page(&state, session, variant, &transition_warning(e)?).into_response()),
  }
}

/// `POST /games/{variant}/next`
pub async fn next<B, S>(
  State(state): State<AppState<B, S>>,
  Extension(session): Extension<SessionId>,
  Path(variant): Path<String>,
) -> Result<Response, Error> {
  let variant = parse_variant(&variant)?;
  match state.sessions.with(session, |s| s.games.next(variant)) {
    Ok(_) => Ok(see_other(&variant_url(variant))),
    Err(e) => Ok(game_page(&state, session, variant, &transition_warning(e)?).into_response()),
  }
}
