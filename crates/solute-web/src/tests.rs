use std::{
  collections::VecDeque,
  sync::{Arc, Mutex},
  time::{Duration, Instant},
};

use axum::{
  body::Body,
  http::{Request, StatusCode, header},
  response::Response,
};
use solute_core::{
  backend::{Capabilities, GenerateRequest, GenerativeBackend, ImageRequest},
  score::{NewScore, ScoreRecord, ScoreStore as _},
};
use solute_store_sqlite::SqliteScoreStore;
use tower::ServiceExt as _;
use uuid::Uuid;

use super::*;

// ─── Scripted backend ────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct ScriptError(String);

/// Replays queued replies and records every text request it receives.
#[derive(Default)]
struct ScriptedBackend {
  replies:  Mutex<VecDeque<Result<String, String>>>,
  requests: Mutex<Vec<GenerateRequest>>,
  removals: Mutex<usize>,
  caps:     Capabilities,
}

impl ScriptedBackend {
  fn reply(self, text: &str) -> Self {
    self.replies.lock().unwrap().push_back(Ok(text.to_owned()));
    self
  }

  fn fail(self, message: &str) -> Self {
    self.replies.lock().unwrap().push_back(Err(message.to_owned()));
    self
  }

  fn prompts(&self) -> Vec<String> {
    self.requests.lock().unwrap().iter().map(GenerateRequest::prompt_text).collect()
  }

  /// Inline attachments per recorded request.
  fn attachments(&self) -> Vec<usize> {
    self.requests.lock().unwrap().iter().map(GenerateRequest::attachment_count).collect()
  }

  fn removals(&self) -> usize { *self.removals.lock().unwrap() }
}

impl GenerativeBackend for ScriptedBackend {
  type Error = ScriptError;

  async fn generate(&self, request: GenerateRequest) -> Result<String, ScriptError> {
    self.requests.lock().unwrap().push(request);
    match self.replies.lock().unwrap().pop_front() {
      Some(Ok(text)) => Ok(text),
      Some(Err(message)) => Err(ScriptError(message)),
      None => Ok("Scripted reply.".into()),
    }
  }

  async fn generate_images(&self, request: ImageRequest) -> Result<Vec<String>, ScriptError> {
    Ok((1..=request.count).map(|i| format!("https://images.test/{i}.png")).collect())
  }

  async fn fetch_image(&self, _url: String) -> Result<Vec<u8>, ScriptError> {
    Ok(vec![0x89, b'P', b'N', b'G'])
  }

  async fn remove_background(&self, _image: Vec<u8>, _filename: String) -> Result<Vec<u8>, ScriptError> {
    *self.removals.lock().unwrap() += 1;
    Ok(vec![1, 2, 3])
  }

  fn capabilities(&self) -> Capabilities { self.caps }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

type TestState = AppState<ScriptedBackend, SqliteScoreStore>;

const BOUNDARY: &str = "solute-test-boundary";

async fn make_state(backend: ScriptedBackend) -> TestState {
  make_state_with(backend, ServerConfig::default()).await
}

async fn make_state_with(backend: ScriptedBackend, config: ServerConfig) -> TestState {
  let scores = SqliteScoreStore::open_in_memory().await.unwrap();
  AppState::new(backend, scores, config)
}

fn new_cookie() -> String { format!("solute_session={}", Uuid::new_v4()) }

fn session_of(cookie: &str) -> session::SessionId {
  let (_, id) = cookie.split_once('=').unwrap();
  session::SessionId(Uuid::parse_str(id).unwrap())
}

async fn oneshot_raw(
  state: &TestState,
  method: &str,
  uri: &str,
  cookie: &str,
  content_type: Option<&str>,
  body: String,
) -> Response {
  let mut builder = Request::builder().method(method).uri(uri).header(header::COOKIE, cookie);
  if let Some(content_type) = content_type {
    builder = builder.header(header::CONTENT_TYPE, content_type);
  }
  let req = builder.body(Body::from(body)).unwrap();
  router(state.clone()).oneshot(req).await.unwrap()
}

async fn get(state: &TestState, uri: &str, cookie: &str) -> Response {
  oneshot_raw(state, "GET", uri, cookie, None, String::new()).await
}

fn urlencode(value: &str) -> String {
  value
    .bytes()
    .map(|b| match b {
      b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' => (b as char).to_string(),
      b' ' => "+".to_owned(),
      other => format!("%{other:02X}"),
    })
    .collect()
}

async fn post_form(state: &TestState, uri: &str, cookie: &str, fields: &[(&str, &str)]) -> Response {
  let body = fields
    .iter()
    .map(|(k, v)| format!("{}={}", urlencode(k), urlencode(v)))
    .collect::<Vec<_>>()
    .join("&");
  oneshot_raw(state, "POST", uri, cookie, Some("application/x-www-form-urlencoded"), body).await
}

async fn post_multipart(state: &TestState, uri: &str, cookie: &str, fields: &[(&str, &str)]) -> Response {
  post_files(state, uri, cookie, fields, &[]).await
}

/// Multipart POST with text fields plus `(field, filename, content)` files.
async fn post_files(
  state: &TestState,
  uri: &str,
  cookie: &str,
  fields: &[(&str, &str)],
  files: &[(&str, &str, &str)],
) -> Response {
  let mut body = String::new();
  for (name, value) in fields {
    body.push_str(&format!(
      "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
    ));
  }
  for (name, filename, content) in files {
    body.push_str(&format!(
      "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
       Content-Type: application/octet-stream\r\n\r\n{content}\r\n"
    ));
  }
  body.push_str(&format!("--{BOUNDARY}--\r\n"));
  let content_type = format!("multipart/form-data; boundary={BOUNDARY}");
  oneshot_raw(state, "POST", uri, cookie, Some(&content_type), body).await
}

async fn body_text(resp: Response) -> String {
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(resp: &Response) -> &str {
  resp.headers().get(header::LOCATION).unwrap().to_str().unwrap()
}

// ── Home ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn home_lists_apps_and_sets_a_session_cookie() {
  let state = make_state(ScriptedBackend::default()).await;
  let req = Request::builder().uri("/").body(Body::empty()).unwrap();
  let resp = router(state.clone()).oneshot(req).await.unwrap();

  assert_eq!(resp.status(), StatusCode::OK);
  let cookie = resp.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
  assert!(cookie.starts_with("solute_session="), "cookie: {cookie}");
  assert!(cookie.contains("HttpOnly"));

  let html = body_text(resp).await;
  for name in ["Verdict", "ToneBridge", "SurveyForge", "MindGames"] {
    assert!(html.contains(name), "{name} missing from home page");
  }
}

#[tokio::test]
async fn search_without_hits_says_so() {
  let state = make_state(ScriptedBackend::default()).await;
  let html = body_text(get(&state, "/?q=zzzzzz", &new_cookie()).await).await;
  assert!(html.contains("No apps found matching that search."));
}

#[tokio::test]
async fn favorites_are_remembered_per_session() {
  let state = make_state(ScriptedBackend::default()).await;
  let cookie = new_cookie();

  let resp = oneshot_raw(&state, "POST", "/favorites/verdict", &cookie, None, String::new()).await;
  assert_eq!(resp.status(), StatusCode::SEE_OTHER);
  assert_eq!(location(&resp), "/");

  let html = body_text(get(&state, "/", &cookie).await).await;
  assert!(html.contains("⭐ Favorites"));
  assert!(html.contains("★ Unfavorite"));

  // A different session has no favorites.
  let html = body_text(get(&state, "/", &new_cookie()).await).await;
  assert!(!html.contains("⭐ Favorites"));
}

#[tokio::test]
async fn cookieless_clients_do_not_pile_up_sessions() {
  let config = ServerConfig { session_idle_secs: 0, ..ServerConfig::default() };
  let state = make_state_with(ScriptedBackend::default(), config).await;
  for _ in 0..50 {
    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
    let resp = router(state.clone()).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
  }
  assert_eq!(state.sessions.len(), 1);
}

#[tokio::test]
async fn unknown_app_and_route_are_404() {
  let state = make_state(ScriptedBackend::default()).await;
  let cookie = new_cookie();
  assert_eq!(get(&state, "/apps/nope", &cookie).await.status(), StatusCode::NOT_FOUND);
  assert_eq!(get(&state, "/no/such/page", &cookie).await.status(), StatusCode::NOT_FOUND);
  assert_eq!(get(&state, "/games/chess", &cookie).await.status(), StatusCode::NOT_FOUND);
}

// ── Apps ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn blank_required_field_warns_without_a_model_call() {
  let state = make_state(ScriptedBackend::default()).await;
  let resp = post_multipart(&state, "/apps/verdict", &new_cookie(), &[("decision", "   ")]).await;

  assert_eq!(resp.status(), StatusCode::OK);
  let html = body_text(resp).await;
  assert!(html.contains("Please describe the decision."));
  assert!(state.backend.prompts().is_empty());
}

#[tokio::test]
async fn text_app_renders_the_reply_and_offers_a_download() {
  let state = make_state(ScriptedBackend::default().reply("**Reasonable** at the time.")).await;
  let cookie = new_cookie();

  let resp = post_multipart(&state, "/apps/verdict", &cookie, &[
    ("decision", "Took the job in Lisbon"),
    ("when", "2019"),
  ])
  .await;
  let html = body_text(resp).await;
  assert!(html.contains("Verdict complete"));
  assert!(html.contains("<strong>Reasonable</strong>"));

  let prompts = state.backend.prompts();
  assert_eq!(prompts.len(), 1);
  assert!(prompts[0].contains("Took the job in Lisbon"));
  assert!(prompts[0].contains("Made in: 2019"));
  assert!(prompts[0].contains("Outcome: Not specified"));

  let resp = get(&state, "/apps/verdict/result.md", &cookie).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert!(
    resp.headers()[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/markdown")
  );
  let markdown = body_text(resp).await;
  assert!(markdown.contains("**Reasonable** at the time."));
}

#[tokio::test]
async fn download_without_a_result_is_404() {
  let state = make_state(ScriptedBackend::default()).await;
  let resp = get(&state, "/apps/verdict/result.md", &new_cookie()).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn backend_failure_is_shown_inline() {
  let state = make_state(ScriptedBackend::default().fail("quota exceeded")).await;
  let resp = post_multipart(&state, "/apps/verdict", &new_cookie(), &[("decision", "Sold my car")]).await;

  assert_eq!(resp.status(), StatusCode::OK);
  let html = body_text(resp).await;
  assert!(html.contains("Analysis failed: quota exceeded"));
  // The submitted text is kept in the form.
  assert!(html.contains("Sold my car"));
}

#[tokio::test]
async fn image_apps_explain_a_missing_token() {
  let state = make_state(ScriptedBackend::default()).await;
  let html = body_text(get(&state, "/apps/afroforge", &new_cookie()).await).await;
  assert!(html.contains("REPLICATE_API_TOKEN"));
}

#[tokio::test]
async fn image_app_renders_generated_designs() {
  let backend = ScriptedBackend {
    caps: Capabilities { image_generation: true, background_removal: false },
    ..ScriptedBackend::default()
  };
  let state = make_state(backend).await;
  let resp = post_multipart(&state, "/apps/afroforge", &new_cookie(), &[("idea", "Lion at sunset")]).await;

  let html = body_text(resp).await;
  assert!(html.contains("Design 1"));
  assert!(html.contains("data:image/"));
}

#[tokio::test]
async fn document_app_puts_each_file_under_a_header() {
  let state = make_state(ScriptedBackend::default().reply("Sorry I vanished.")).await;
  let resp = post_files(
    &state,
    "/apps/ghostreply",
    &new_cookie(),
    &[("relationship", "Friend"), ("tone", "Regretful")],
    &[("history", "chat.txt", "hey, you there?"), ("history", "later.txt", "guess not")],
  )
  .await;

  let html = body_text(resp).await;
  assert!(html.contains("Message from the ghost"));
  assert!(html.contains("Sorry I vanished."));

  let prompts = state.backend.prompts();
  assert_eq!(prompts.len(), 1);
  assert!(prompts[0].contains("--- From chat.txt ---\nhey, you there?"), "{}", prompts[0]);
  assert!(prompts[0].contains("--- From later.txt ---\nguess not"));
  assert!(prompts[0].contains("Relationship: Friend"));
  assert!(prompts[0].contains("Keep tone: regretful"));
}

#[tokio::test]
async fn document_app_without_readable_text_warns() {
  let state = make_state(ScriptedBackend::default()).await;
  let resp = post_files(&state, "/apps/clearpact", &new_cookie(), &[], &[(
    "contract",
    "blank.txt",
    "  \n\t ",
  )])
  .await;

  assert_eq!(resp.status(), StatusCode::OK);
  assert!(body_text(resp).await.contains("No text extracted from file."));
  assert!(state.backend.prompts().is_empty());
}

#[tokio::test]
async fn unreadable_document_is_sent_as_a_placeholder() {
  let state = make_state(ScriptedBackend::default()).await;
  post_files(&state, "/apps/echomind", &new_cookie(), &[], &[
    ("content", "journal.txt", "Everything is pointless, lol."),
    ("content", "scan.pdf", "not really a pdf"),
  ])
  .await;

  let prompts = state.backend.prompts();
  assert_eq!(prompts.len(), 1);
  assert!(prompts[0].contains("Content from approximately 2015-2020"));
  assert!(prompts[0].contains("Everything is pointless, lol.\n\n[Error reading PDF]"), "{}", prompts[0]);
}

#[tokio::test]
async fn several_charts_get_individual_reports_and_a_comparison() {
  let backend = ScriptedBackend::default()
    .reply("Axis starts at 90.")
    .reply("Cherry-picked.")
    .reply("They conflict.");
  let state = make_state(backend).await;
  let cookie = new_cookie();
  let resp = post_files(&state, "/apps/chartskeptic", &cookie, &[], &[
    ("charts", "revenue.png", "png-one"),
    ("charts", "users.png", "png-two"),
  ])
  .await;

  let html = body_text(resp).await;
  assert!(html.contains("Chart 1: revenue.png"));
  assert!(html.contains("Chart 2: users.png"));
  assert!(html.contains("Cross-Chart Comparison"));
  assert!(html.contains("They conflict."));

  // One call per chart, then one with every chart attached.
  assert_eq!(state.backend.attachments(), [1, 1, 2]);
  assert!(state.backend.prompts()[2].contains("analyzing multiple charts together"));

  let markdown = body_text(get(&state, "/apps/chartskeptic/result.md", &cookie).await).await;
  assert!(markdown.contains("## Cross-Chart Comparison\n\nThey conflict."));
}

#[tokio::test]
async fn a_single_chart_needs_no_comparison() {
  let state = make_state(ScriptedBackend::default().reply("Looks honest.")).await;
  let html = body_text(
    post_files(&state, "/apps/chartskeptic", &new_cookie(), &[], &[("charts", "only.jpg", "jpeg")]).await,
  )
  .await;
  assert!(html.contains("Looks honest."));
  assert!(!html.contains("Cross-Chart Comparison"));
  assert_eq!(state.backend.attachments(), [1]);
}

#[tokio::test]
async fn background_removal_is_cached_by_content() {
  let backend = ScriptedBackend {
    caps: Capabilities { image_generation: false, background_removal: true },
    ..ScriptedBackend::default()
  };
  let state = make_state(backend).await;
  let cookie = new_cookie();
  let fields = [("mode", "Replace background"), ("color", "#112233")];
  let files = [("image", "portrait.png", "pixels")];

  let html = body_text(post_files(&state, "/apps/bgforge", &cookie, &fields, &files).await).await;
  assert!(html.contains("Background removed"));
  assert!(html.contains("portrait_no_bg.png"));
  assert!(html.contains("background:#112233"));
  assert!(!html.contains("Reused a result"));
  assert_eq!(state.backend.removals(), 1);

  let html = body_text(
    post_files(&state, "/apps/bgforge", &cookie, &[("mode", "Remove background only")], &files).await,
  )
  .await;
  assert!(html.contains("Reused a result from the last hour."));
  assert!(!html.contains("On a new background"));
  assert_eq!(state.backend.removals(), 1);
}

// ── Workspaces ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn notes_are_listed_and_challenged() {
  let state = make_state(ScriptedBackend::default().reply("You contradict yourself.")).await;
  let cookie = new_cookie();

  let html = body_text(get(&state, "/apps/contramind", &cookie).await).await;
  assert!(html.contains("No thoughts yet."));

  let resp = post_multipart(&state, "/apps/contramind", &cookie, &[
    ("text", "Remote work is always better"),
    ("date", "2024-03-01"),
  ])
  .await;
  assert_eq!(resp.status(), StatusCode::SEE_OTHER);

  let html = body_text(get(&state, "/apps/contramind", &cookie).await).await;
  assert!(html.contains("Remote work is always better"));
  assert!(html.contains("2024-03-01"));

  let html = body_text(
    oneshot_raw(&state, "POST", "/workspace/notes/challenge", &cookie, None, String::new()).await,
  )
  .await;
  assert!(html.contains("You contradict yourself."));
  assert!(state.backend.prompts()[0].contains("Remote work is always better"));

  let resp = get(&state, "/workspace/notes/export.json", &cookie).await;
  assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");
  let json: serde_json::Value = serde_json::from_str(&body_text(resp).await).unwrap();
  assert_eq!(json[0]["text"], "Remote work is always better");
}

#[tokio::test]
async fn challenge_without_notes_warns() {
  let state = make_state(ScriptedBackend::default()).await;
  let resp = oneshot_raw(&state, "POST", "/workspace/notes/challenge", &new_cookie(), None, String::new()).await;
  assert!(body_text(resp).await.contains("Add at least one thought first."));
  assert!(state.backend.prompts().is_empty());
}

#[tokio::test]
async fn refreshing_a_missing_skill_is_404() {
  let state = make_state(ScriptedBackend::default()).await;
  let resp = oneshot_raw(&state, "POST", "/workspace/skills/3/refresh", &new_cookie(), None, String::new()).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn survey_round_trip() {
  let state = make_state(ScriptedBackend::default().reply("Customers love it.")).await;
  let cookie = new_cookie();

  let resp = post_multipart(&state, "/apps/surveyforge", &cookie, &[
    ("title", "Cafe feedback"),
    ("questions", "How was the coffee? | Great; Fine; Poor\nAnything else?"),
  ])
  .await;
  assert_eq!(resp.status(), StatusCode::SEE_OTHER);

  let html = body_text(get(&state, "/workspace/surveys/1", &cookie).await).await;
  assert!(html.contains("How was the coffee?"));
  assert!(html.contains("name=\"q0\" value=\"Great\""));

  let resp = oneshot_raw(&state, "POST", "/workspace/surveys/1/insights", &cookie, None, String::new()).await;
  assert!(body_text(resp).await.contains("No responses yet."));
  assert!(state.backend.prompts().is_empty());

  let resp = post_form(&state, "/workspace/surveys/1/respond", &cookie, &[
    ("q0", "Great"),
    ("q1", "More seating please"),
  ])
  .await;
  assert!(body_text(resp).await.contains("Response recorded"));

  let resp = oneshot_raw(&state, "POST", "/workspace/surveys/1/insights", &cookie, None, String::new()).await;
  assert!(body_text(resp).await.contains("Customers love it."));
  let prompts = state.backend.prompts();
  assert!(prompts[0].contains("More seating please"));

  assert_eq!(get(&state, "/workspace/surveys/9", &cookie).await.status(), StatusCode::NOT_FOUND);
}

// ── Games ────────────────────────────────────────────────────────────────────

async fn win_a_riddle(state: &TestState, cookie: &str) {
  // An unparseable reply falls back to the built-in piano riddle.
  let resp = post_form(state, "/games/riddle/begin", cookie, &[]).await;
  assert_eq!(resp.status(), StatusCode::SEE_OTHER);
  let resp = post_form(state, "/games/riddle/submit", cookie, &[("answer", "a piano")]).await;
  assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn riddle_round_scores_and_saves_to_the_leaderboard() {
  let state = make_state(ScriptedBackend::default().reply("no riddle here")).await;
  let cookie = new_cookie();

  win_a_riddle(&state, &cookie).await;
  let html = body_text(get(&state, "/games/riddle", &cookie).await).await;
  assert!(html.contains("Correct!"));
  assert!(html.contains("Score: 10"));

  let resp = post_form(&state, "/games/scores", &cookie, &[("name", "  Ada  ")]).await;
  assert_eq!(resp.status(), StatusCode::SEE_OTHER);

  let resp = get(&state, "/api/scores", &cookie).await;
  let scores: Vec<ScoreRecord> = serde_json::from_str(&body_text(resp).await).unwrap();
  assert_eq!(scores.len(), 1);
  assert_eq!(scores[0].name, "Ada");
  assert_eq!(scores[0].score, 10);
}

#[tokio::test]
async fn out_of_phase_actions_warn_and_change_nothing() {
  let state = make_state(ScriptedBackend::default()).await;
  let cookie = new_cookie();

  let resp = post_form(&state, "/games/riddle/submit", &cookie, &[("answer", "piano")]).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert!(body_text(resp).await.contains("fit this round"));

  let resp = oneshot_raw(&state, "POST", "/games/pattern/reveal", &cookie, None, String::new()).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let html = body_text(get(&state, "/games", &cookie).await).await;
  assert!(html.contains("<strong>Score:</strong> 0"));
}

#[tokio::test]
async fn blank_leaderboard_name_is_rejected() {
  let state = make_state(ScriptedBackend::default()).await;
  let resp = post_form(&state, "/games/scores", &new_cookie(), &[("name", "   ")]).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert!(body_text(resp).await.contains("Enter a name to save your score."));
  assert!(state.scores.top(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn reset_zeroes_the_session_score() {
  let state = make_state(ScriptedBackend::default().reply("garbled")).await;
  let cookie = new_cookie();
  win_a_riddle(&state, &cookie).await;

  let resp = oneshot_raw(&state, "POST", "/games/reset", &cookie, None, String::new()).await;
  assert_eq!(location(&resp), "/games");
  let html = body_text(get(&state, "/games", &cookie).await).await;
  assert!(html.contains("<strong>Score:</strong> 0"));
}

#[tokio::test]
async fn quiz_needs_a_topic() {
  let state = make_state(ScriptedBackend::default()).await;
  let resp = post_form(&state, "/games/quiz/begin", &new_cookie(), &[("topic", " "), ("count", "4")]).await;
  assert!(body_text(resp).await.contains("Enter a quiz topic first."));
  assert!(state.backend.prompts().is_empty());
}

const ARITHMETIC_QUIZ: &str = "\
Question 1: What is 2 + 2?
A) 3
B) 4
Correct answer: B

Question 2: What is 3 x 3?
A) 9
B) 6
Correct answer: A
";

#[tokio::test]
async fn quiz_round_is_generated_answered_and_scored() {
  let state = make_state(ScriptedBackend::default().reply(ARITHMETIC_QUIZ)).await;
  let cookie = new_cookie();

  let resp = post_form(&state, "/games/quiz/begin", &cookie, &[("topic", "Arithmetic"), ("count", "1")]).await;
  assert_eq!(location(&resp), "/games/quiz");
  // The count is clamped up to the minimum.
  assert!(state.backend.prompts()[0].contains("Create a 3-question multiple-choice quiz on Arithmetic"));

  let html = body_text(get(&state, "/games/quiz", &cookie).await).await;
  assert!(html.contains("Quiz: Arithmetic"));
  assert!(html.contains("What is 3 x 3?"));

  let resp = post_form(&state, "/games/quiz/submit", &cookie, &[("q0", "1"), ("q1", "1")]).await;
  assert_eq!(resp.status(), StatusCode::SEE_OTHER);
  let html = body_text(get(&state, "/games/quiz", &cookie).await).await;
  assert!(html.contains("You scored 1/2! +2 points"));
  assert!(html.contains("Score: 2"));
}

#[tokio::test]
async fn unparseable_quiz_falls_back_to_the_built_in_one() {
  let state = make_state(ScriptedBackend::default().reply("Sorry, I can't make quizzes.")).await;
  let cookie = new_cookie();

  post_form(&state, "/games/quiz/begin", &cookie, &[("topic", "Rust"), ("count", "5")]).await;
  let html = body_text(get(&state, "/games/quiz", &cookie).await).await;
  assert!(html.contains("Which planet is known as the Red Planet?"));

  post_form(&state, "/games/quiz/submit", &cookie, &[("q0", "1"), ("q1", "2"), ("q2", "0")]).await;
  let html = body_text(get(&state, "/games/quiz", &cookie).await).await;
  assert!(html.contains("You scored 3/3! +6 points"));
}

#[tokio::test]
async fn insight_round_asks_the_model_about_the_guess() {
  let state = make_state(ScriptedBackend::default().reply("Sales peak every summer.")).await;
  let cookie = new_cookie();

  post_form(&state, "/games/insight/begin", &cookie, &[]).await;
  // The dataset is built locally.
  assert!(state.backend.prompts().is_empty());
  let html = body_text(get(&state, "/games/insight", &cookie).await).await;
  assert!(html.contains("What story does this data tell?"));

  let resp = post_form(&state, "/games/insight/submit", &cookie, &[("guess", "winter slump")]).await;
  assert_eq!(resp.status(), StatusCode::SEE_OTHER);

  let prompts = state.backend.prompts();
  assert_eq!(prompts.len(), 1);
  assert!(prompts[0].contains("The player's guess: winter slump"));
  let html = body_text(get(&state, "/games/insight", &cookie).await).await;
  assert!(html.contains("+5 participation points"));
  assert!(html.contains("Sales peak every summer."));
}

#[tokio::test]
async fn pattern_round_hides_the_sequence_until_the_delay_passes() {
  use solute_core::game::{Reveal, Round, Variant};

  let state = make_state(ScriptedBackend::default()).await;
  let cookie = new_cookie();

  post_form(&state, "/games/pattern/begin", &cookie, &[]).await;
  let html = body_text(get(&state, "/games/pattern", &cookie).await).await;
  assert!(html.contains("Memorize this sequence"));

  let resp = oneshot_raw(&state, "POST", "/games/pattern/reveal", &cookie, None, String::new()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert!(body_text(resp).await.contains("Keep memorizing"));

  let (reveal, sequence) = state.sessions.with(session_of(&cookie), |s| {
    let reveal = s.games.reveal(Variant::Pattern, Instant::now() + Duration::from_secs(60)).unwrap();
    let sequence: String = match s.games.sequencer(Variant::Pattern).round() {
      Some(Round::Pattern(p)) => p.sequence.iter().map(|sym| sym.letter()).collect(),
      other => panic!("unexpected round {other:?}"),
    };
    (reveal, sequence)
  });
  assert_eq!(reveal, Reveal::Ready);

  let html = body_text(get(&state, "/games/pattern", &cookie).await).await;
  assert!(html.contains("Check Sequence"));
  assert!(!html.contains("Memorize this sequence"));

  let typed = sequence.to_lowercase();
  post_form(&state, "/games/pattern/submit", &cookie, &[("answer", typed.as_str())]).await;
  let html = body_text(get(&state, "/games/pattern", &cookie).await).await;
  assert!(html.contains("Perfect recall!"), "{html}");
}

#[tokio::test]
async fn riddle_generation_failure_stays_on_start() {
  let state = make_state(ScriptedBackend::default().fail("model overloaded")).await;
  let cookie = new_cookie();
  let resp = post_form(&state, "/games/riddle/begin", &cookie, &[]).await;
  assert!(body_text(resp).await.contains("Generation failed: model overloaded"));
  let phase = state.sessions.with(session_of(&cookie), |s| {
    s.games.sequencer(solute_core::game::Variant::Riddle).phase()
  });
  assert_eq!(phase, solute_core::game::Phase::Start);
}

// ── JSON API ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn api_lists_matching_apps() {
  let state = make_state(ScriptedBackend::default()).await;
  let resp = get(&state, "/api/apps?q=survey", &new_cookie()).await;
  let apps: serde_json::Value = serde_json::from_str(&body_text(resp).await).unwrap();
  let slugs: Vec<&str> = apps.as_array().unwrap().iter().filter_map(|a| a["slug"].as_str()).collect();
  assert_eq!(slugs, ["surveyforge"]);
}

#[tokio::test]
async fn api_scores_are_ranked_and_limited() {
  let state = make_state(ScriptedBackend::default()).await;
  for (name, score) in [("low", 5), ("high", 40), ("mid", 20)] {
    state.scores.record(NewScore::new(Uuid::new_v4(), name, score).unwrap()).await.unwrap();
  }

  let resp = get(&state, "/api/scores?limit=2", &new_cookie()).await;
  let scores: Vec<ScoreRecord> = serde_json::from_str(&body_text(resp).await).unwrap();
  let names: Vec<&str> = scores.iter().map(|s| s.name.as_str()).collect();
  assert_eq!(names, ["high", "mid"]);
}

// ── Secrets ──────────────────────────────────────────────────────────────────

#[test]
fn missing_gemini_key_is_an_error() {
  let err = Secrets::default().require_gemini().unwrap_err();
  assert!(matches!(err, Error::MissingSecret("GEMINI_API_KEY")));

  let blank = Secrets { gemini_api_key: Some("  ".into()), ..Secrets::default() };
  assert!(blank.require_gemini().is_err());
}

#[test]
fn environment_overrides_the_secrets_file() {
  let file = Secrets {
    gemini_api_key: Some("from-file".into()),
    removebg_api_key: Some("bg-file".into()),
    ..Secrets::default()
  };
  let secrets = file.with_env(|name| match name {
    "GEMINI_API_KEY" => Some("from-env".into()),
    "REMOVEBG_API_KEY" => Some("".into()),
    _ => None,
  });
  assert_eq!(secrets.require_gemini().unwrap(), "from-env");
  assert_eq!(secrets.removebg_api_key.as_deref(), Some("bg-file"));
  assert_eq!(secrets.replicate_api_token, None);
}

#[test]
fn shared_state_is_cheap_to_clone() {
  let state = AppState::new(ScriptedBackend::default(), (), ServerConfig::default());
  let clone = state.clone();
  assert!(Arc::ptr_eq(&state.sessions, &clone.sessions));
}
