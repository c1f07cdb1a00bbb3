//! PDF text via `lopdf`, one page after another.

use crate::Result;

pub(crate) fn extract(bytes: &[u8]) -> Result<String> {
  let doc = lopdf::Document::load_mem(bytes)?;
  let pages: Vec<String> = doc
    .get_pages()
    .keys()
    .map(|&number| {
      doc.extract_text(&[number]).unwrap_or_else(|err| {
        tracing::debug!(page = number, %err, "page has no extractable text");
        String::new()
      })
    })
    .collect();
  Ok(pages.join("\n"))
}
