pub mod api;
pub mod apps;
pub mod games;
pub mod home;
pub mod workspaces;

use axum::{
  extract::Multipart,
  http::StatusCode,
  response::{IntoResponse, Redirect, Response},
};
use solute_core::form::{FormInput, Upload};

use crate::{Error, render};

/// Fallback for unmatched routes.
pub async fn not_found() -> Response {
  let body = "<h1>Not Found</h1><p>Nothing lives at this address.</p><p><a href=\"/\">Back to all apps</a></p>";
  (StatusCode::NOT_FOUND, render::page("Not Found", body)).into_response()
}

/// Post/redirect/get: send the browser back to `to` with a 303.
pub(crate) fn see_other(to: &str) -> Response { Redirect::to(to).into_response() }

/// Collect a multipart body into a [`FormInput`]. Text parts become values;
/// parts with a file name become uploads (empty file inputs are skipped).
pub(crate) async fn read_form(mut multipart: Multipart) -> Result<FormInput, Error> {
  let mut input = FormInput::new();
  while let Some(field) = multipart
    .next_field()
    .await
    .map_err(|e| Error::BadRequest(e.body_text()))?
  {
    let Some(name) = field.name().map(str::to_owned) else {
      continue;
    };
    match field.file_name().map(str::to_owned) {
      Some(filename) => {
        let content_type = field.content_type().unwrap_or("application/octet-stream").to_owned();
        let bytes = field.bytes().await.map_err(|e| Error::BadRequest(e.body_text()))?;
        if filename.is_empty() || bytes.is_empty() {
          continue;
        }
        input.push_upload(Upload { field: name, filename, content_type, bytes: bytes.to_vec() });
      }
      None => {
        let text = field.text().await.map_err(|e| Error::BadRequest(e.body_text()))?;
        input.set(&name, text);
      }
    }
  }
  Ok(input)
}
