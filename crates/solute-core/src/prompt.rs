//! Prompt templates: fixed instructions with form values interpolated.
//!
//! Placeholder syntax:
//!
//! | Form | Meaning |
//! |------|---------|
//! | `{field}` | the value of `field` |
//! | `{field?text}` | the value, or `text` when the value is blank |
//! | `{field\|lower}` | the value lower-cased |
//! | `{{` / `}}` | literal braces |

use crate::{Error, Result, form::FormInput};

/// A static prompt template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template(pub &'static str);

impl Template {
  /// Render against `input`. Every placeholder must name a value present in
  /// `input` (possibly empty).
  pub fn render(&self, input: &FormInput) -> Result<String> {
    render(self.0, input)
  }
}

pub fn render(template: &str, input: &FormInput) -> Result<String> {
  let mut out = String::with_capacity(template.len() + 256);
  let mut rest = template;

  while let Some(pos) = rest.find(['{', '}']) {
    out.push_str(&rest[..pos]);
    let tail = &rest[pos..];

    if tail.starts_with("{{") {
      out.push('{');
      rest = &tail[2..];
      continue;
    }
    if tail.starts_with("}}") {
      out.push('}');
      rest = &tail[2..];
      continue;
    }
    if tail.starts_with('}') {
      // A lone closing brace is kept as-is.
      out.push('}');
      rest = &tail[1..];
      continue;
    }

    let close = tail.find('}').ok_or(Error::UnterminatedPlaceholder)?;
    out.push_str(&expand(&tail[1..close], input)?);
    rest = &tail[close + 1..];
  }
  out.push_str(rest);

  Ok(out)
}

fn expand(spec: &str, input: &FormInput) -> Result<String> {
  if let Some((name, fallback)) = spec.split_once('?') {
    let value = lookup(name, input)?;
    return Ok(if value.trim().is_empty() { fallback.to_owned() } else { value.to_owned() });
  }
  if let Some((name, filter)) = spec.split_once('|') {
    let value = lookup(name, input)?;
    return match filter {
      "lower" => Ok(value.to_lowercase()),
      _ => Err(Error::UnknownPlaceholder(spec.to_owned())),
    };
  }
  lookup(spec, input).map(str::to_owned)
}

fn lookup<'a>(name: &str, input: &'a FormInput) -> Result<&'a str> {
  input
    .values()
    .get(name.trim())
    .map(String::as_str)
    .ok_or_else(|| Error::UnknownPlaceholder(name.to_owned()))
}

/// Cut `text` to at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
  match text.char_indices().nth(max_chars) {
    Some((idx, _)) => &text[..idx],
    None => text,
  }
}
