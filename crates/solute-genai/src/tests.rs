//! The HTTP clients against in-process stand-ins for the hosted services.

use std::{
  sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
  },
  time::Duration,
};

use axum::{
  Json, Router,
  extract::{Multipart, Path, State},
  http::{HeaderMap, StatusCode},
  response::IntoResponse,
  routing::{get, post},
};
use serde_json::{Value, json};
use solute_core::backend::{Attachment, GenerateRequest, ImageRequest};
use tokio::net::TcpListener;

use crate::{Error, gemini::Gemini, removebg::RemoveBg, replicate::Replicate};

/// Serve the router built from the server's own base URL; returns that URL.
async fn serve(build: impl FnOnce(String) -> Router) -> String {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let base = format!("http://{}", listener.local_addr().unwrap());
  let app = build(base.clone());
  tokio::spawn(async move { axum::serve(listener, app).await });
  base
}

fn client() -> reqwest::Client { reqwest::Client::new() }

// ─── Gemini ──────────────────────────────────────────────────────────────────

async fn echo_generate(
  Path(call): Path<String>,
  headers: HeaderMap,
  Json(body): Json<Value>,
) -> impl IntoResponse {
  if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some("good-key") {
    let error = json!({ "error": { "code": 400, "message": "API key not valid." } });
    return (StatusCode::BAD_REQUEST, Json(error));
  }
  let parts = body["contents"][0]["parts"].as_array().cloned().unwrap_or_default();
  let reply = format!(
    "{call} saw {} part(s); last: {}",
    parts.len(),
    parts.last().and_then(|p| p["text"].as_str()).unwrap_or("")
  );
  (StatusCode::OK, Json(json!({ "candidates": [{ "content": { "parts": [{ "text": reply }] } }] })))
}

fn gemini_router(_base: String) -> Router { Router::new().route("/models/{call}", post(echo_generate)) }

#[tokio::test]
async fn gemini_posts_to_the_model_endpoint() {
  let base = serve(gemini_router).await;
  let gemini = Gemini::new(client(), "good-key")
    .with_model("test-model")
    .with_base_url(format!("{base}/"));

  let request = GenerateRequest::text("What does this show?").attach(Attachment {
    mime_type: "image/png".into(),
    data:      vec![1, 2, 3],
  });
  let text = gemini.generate(&request).await.unwrap();
  assert_eq!(text, "test-model:generateContent saw 2 part(s); last: What does this show?");
}

#[tokio::test]
async fn gemini_error_status_carries_the_api_message() {
  let base = serve(gemini_router).await;
  let gemini = Gemini::new(client(), "bad-key").with_base_url(base);

  match gemini.generate(&GenerateRequest::text("hi")).await {
    Err(Error::Api { service, status, message }) => {
      assert_eq!(service, "Gemini");
      assert_eq!(status, 400);
      assert_eq!(message, "API key not valid.");
    }
    other => panic!("expected an API error, got {other:?}"),
  }
}

#[tokio::test]
async fn gemini_unreadable_body_is_a_parse_error() {
  let base = serve(|_| Router::new().route("/models/{call}", post(|| async { "not json" }))).await;
  let gemini = Gemini::new(client(), "k").with_base_url(base);
  assert!(matches!(
    gemini.generate(&GenerateRequest::text("hi")).await,
    Err(Error::Parse { service: "Gemini", .. })
  ));
}

// ─── Replicate ───────────────────────────────────────────────────────────────

#[derive(Clone)]
struct Flux {
  base:        String,
  polls:       Arc<AtomicUsize>,
  /// Polls answered with `processing` before the prediction succeeds.
  pending_for: usize,
}

async fn create_prediction(
  State(flux): State<Flux>,
  Path((owner, name)): Path<(String, String)>,
  headers: HeaderMap,
  Json(body): Json<Value>,
) -> impl IntoResponse {
  assert_eq!(format!("{owner}/{name}"), crate::replicate::FLUX_MODEL);
  assert_eq!(headers["authorization"], "Bearer tok");
  assert_eq!(headers["prefer"], "wait");
  assert_eq!(body["input"]["num_outputs"], 2);
  Json(json!({
    "status": "starting",
    "urls": { "get": format!("{}/predictions/p1", flux.base) }
  }))
}

async fn poll_prediction(State(flux): State<Flux>) -> Json<Value> {
  let n = flux.polls.fetch_add(1, Ordering::SeqCst);
  if n < flux.pending_for {
    return Json(json!({
      "status": "processing",
      "urls": { "get": format!("{}/predictions/p1", flux.base) }
    }));
  }
  Json(json!({
    "status": "succeeded",
    "output": [format!("{}/files/1.png", flux.base), format!("{}/files/2.png", flux.base)]
  }))
}

async fn flux_server(pending_for: usize) -> (String, Arc<AtomicUsize>) {
  let polls = Arc::new(AtomicUsize::new(0));
  let counter = polls.clone();
  let base = serve(move |base| {
    Router::new()
      .route("/models/{owner}/{name}/predictions", post(create_prediction))
      .route("/predictions/p1", get(poll_prediction))
      .route("/files/1.png", get(|| async { vec![0x89_u8, b'P', b'N', b'G'] }))
      .with_state(Flux { base, polls: counter, pending_for })
  })
  .await;
  (base, polls)
}

fn flux_request() -> ImageRequest {
  ImageRequest {
    prompt:        "a lion in kente".into(),
    count:         2,
    aspect_ratio:  "1:1",
    output_format: "png",
  }
}

fn replicate(base: &str, max_polls: usize) -> Replicate {
  Replicate::new(client(), "tok")
    .with_base_url(base)
    .with_polling(Duration::from_millis(5), max_polls)
}

#[tokio::test]
async fn replicate_polls_until_the_prediction_succeeds() {
  let (base, polls) = flux_server(2).await;
  let urls = replicate(&base, 10).run_flux(&flux_request()).await.unwrap();

  assert_eq!(urls, [format!("{base}/files/1.png"), format!("{base}/files/2.png")]);
  assert_eq!(polls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn replicate_gives_up_after_the_poll_budget() {
  let (base, polls) = flux_server(usize::MAX).await;
  match replicate(&base, 3).run_flux(&flux_request()).await {
    Err(Error::Prediction { status, message }) => {
      assert_eq!(status, "processing");
      assert_eq!(message, "timed out waiting for output");
    }
    other => panic!("expected a timeout, got {other:?}"),
  }
  assert_eq!(polls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn replicate_rejection_uses_the_problem_detail() {
  let base = serve(|_| {
    Router::new().route(
      "/models/{owner}/{name}/predictions",
      post(|| async { (StatusCode::UNAUTHORIZED, r#"{"title":"Unauthenticated","detail":"Invalid token."}"#) }),
    )
  })
  .await;

  match replicate(&base, 1).run_flux(&flux_request()).await {
    Err(Error::Api { status, message, .. }) => {
      assert_eq!(status, 401);
      assert_eq!(message, "Invalid token.");
    }
    other => panic!("expected an API error, got {other:?}"),
  }
}

#[tokio::test]
async fn replicate_fetch_downloads_output_and_reports_missing_files() {
  let (base, _) = flux_server(0).await;
  let client = replicate(&base, 1);

  assert_eq!(client.fetch(&format!("{base}/files/1.png")).await.unwrap(), b"\x89PNG");
  assert!(matches!(
    client.fetch(&format!("{base}/files/9.png")).await,
    Err(Error::Api { status: 404, .. })
  ));
}

// ─── remove.bg ───────────────────────────────────────────────────────────────

async fn cut_out(headers: HeaderMap, mut form: Multipart) -> impl IntoResponse {
  if headers.get("x-api-key").and_then(|v| v.to_str().ok()) != Some("bg-key") {
    let body = r#"{"errors":[{"title":"Insufficient credits","code":"insufficient_credits"}]}"#;
    return (StatusCode::PAYMENT_REQUIRED, body.as_bytes().to_vec());
  }

  let mut seen = Vec::new();
  while let Some(field) = form.next_field().await.unwrap() {
    let name = field.name().unwrap_or_default().to_owned();
    let file = field.file_name().map(str::to_owned);
    let bytes = field.bytes().await.unwrap();
    seen.push(match file {
      Some(file) => format!("{name}={file}:{}", bytes.len()),
      None => format!("{name}={}", String::from_utf8_lossy(&bytes)),
    });
  }
  (StatusCode::OK, seen.join("&").into_bytes())
}

fn removebg_router(_base: String) -> Router { Router::new().route("/v1.0/removebg", post(cut_out)) }

#[tokio::test]
async fn removebg_uploads_the_image_as_multipart() {
  let base = serve(removebg_router).await;
  let removebg = RemoveBg::new(client(), "bg-key").with_url(format!("{base}/v1.0/removebg"));

  let png = removebg.remove(vec![7; 16], "portrait.jpg".into()).await.unwrap();
  assert_eq!(
    String::from_utf8(png).unwrap(),
    "image_file=portrait.jpg:16&size=auto&format=png&type=auto"
  );
}

#[tokio::test]
async fn removebg_error_uses_the_first_title() {
  let base = serve(removebg_router).await;
  let removebg = RemoveBg::new(client(), "wrong").with_url(format!("{base}/v1.0/removebg"));

  match removebg.remove(vec![1], "a.png".into()).await {
    Err(Error::Api { service, status, message }) => {
      assert_eq!(service, "remove.bg");
      assert_eq!(status, 402);
      assert_eq!(message, "Insufficient credits");
    }
    other => panic!("expected an API error, got {other:?}"),
  }
}
