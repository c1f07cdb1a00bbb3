//! DOCX text: the `w:t` runs of `word/document.xml`, one line per
//! paragraph.

use std::io::{Cursor, Read};

use quick_xml::events::Event;

use crate::{Error, Result};

/// Largest `word/document.xml` we decompress.
pub const MAX_DOCUMENT_XML_BYTES: u64 = 8 * 1024 * 1024;

pub(crate) fn extract(bytes: &[u8]) -> Result<String> {
  let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
  let entry = archive.by_name("word/document.xml")?;
  if entry.size() > MAX_DOCUMENT_XML_BYTES {
    return Err(Error::TooLarge { limit: MAX_DOCUMENT_XML_BYTES });
  }

  // The declared size can lie, so bound the read as well.
  let mut xml = String::new();
  entry.take(MAX_DOCUMENT_XML_BYTES + 1).read_to_string(&mut xml)?;
  if xml.len() as u64 > MAX_DOCUMENT_XML_BYTES {
    return Err(Error::TooLarge { limit: MAX_DOCUMENT_XML_BYTES });
  }
  paragraphs(xml.as_bytes()).map(|ps| ps.join("\n"))
}

fn local_name(name: &[u8]) -> &[u8] {
  name.rsplit(|&b| b == b':').next().unwrap_or(name)
}

pub(crate) fn paragraphs(xml: &[u8]) -> Result<Vec<String>> {
  let mut reader = quick_xml::Reader::from_reader(xml);
  let mut out = Vec::new();
  let mut current = String::new();
  let mut in_text = false;
  let mut buf = Vec::new();

  loop {
    match reader.read_event_into(&mut buf) {
      Ok(Event::Start(ref e)) => {
        if local_name(e.name().as_ref()) == b"t" {
          in_text = true;
        }
      }
      Ok(Event::Empty(ref e)) => match local_name(e.name().as_ref()) {
        b"tab" => current.push('\t'),
        b"br" | b"cr" => current.push('\n'),
        // An empty paragraph still occupies a line.
        b"p" => out.push(String::new()),
        _ => {}
      },
      Ok(Event::Text(ref e)) if in_text => {
        let text = e.unescape().map_err(|err| Error::Xml(err.to_string()))?;
        current.push_str(&text);
      }
      Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
        b"t" => in_text = false,
        b"p" => out.push(std::mem::take(&mut current)),
        _ => {}
      },
      Ok(Event::Eof) => break,
      Err(e) => return Err(Error::Xml(e.to_string())),
      _ => {}
    }
    buf.clear();
  }

  Ok(out)
}
