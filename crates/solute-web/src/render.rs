//! HTML rendering: the page shell, forms, alerts, charts and markdown.
//!
//! Everything returns `String` fragments that handlers concatenate. All
//! user- and model-supplied text passes through [`escape`] or [`markdown`].

use std::fmt::Write as _;

use axum::response::Html;
use base64::{Engine, engine::general_purpose::STANDARD};
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};
use solute_core::{
  catalog::AppInfo,
  form::{FieldKind, FieldSpec, FormInput},
};

const STYLE: &str = "
body { font-family: system-ui, sans-serif; max-width: 960px; margin: 0 auto; padding: 1rem 1.5rem 4rem; background: #111418; color: #e6e6e6; }
a { color: #7fc8ff; }
header.top { display: flex; gap: 1rem; align-items: center; justify-content: space-between; border-bottom: 1px solid #2a2f36; padding-bottom: .75rem; margin-bottom: 1.5rem; }
header.top a.brand { font-size: 1.4rem; font-weight: 700; text-decoration: none; color: #e6e6e6; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 1rem; }
.card { background: #1a1f26; border: 1px solid #2a2f36; border-radius: 10px; padding: 1rem; }
.card h3 { margin: .2rem 0 .4rem; }
.tagline { color: #a9b1bb; }
.alert { border-radius: 8px; padding: .75rem 1rem; margin: 1rem 0; }
.alert.info { background: #15324a; }
.alert.success { background: #173a26; }
.alert.warning { background: #4a3b12; }
.alert.error { background: #4a1818; }
form.app label { display: block; margin: .8rem 0 .3rem; font-weight: 600; }
form.app input[type=text], form.app input[type=number], form.app input[type=date], form.app textarea, form.app select { width: 100%; box-sizing: border-box; padding: .5rem; background: #0d1014; color: #e6e6e6; border: 1px solid #2a2f36; border-radius: 6px; }
button { margin-top: 1rem; padding: .55rem 1.1rem; border: 0; border-radius: 6px; background: #2f7de1; color: white; cursor: pointer; }
button.link { background: none; color: #7fc8ff; padding: 0; margin: 0; }
.result { background: #161b21; border-left: 4px solid #2f7de1; padding: .5rem 1.25rem; border-radius: 6px; }
.caption { color: #8a939e; font-size: .85rem; margin-top: 2rem; }
.bars .row { display: flex; align-items: center; gap: .5rem; margin: .25rem 0; }
.bars .label { width: 10rem; text-align: right; color: #a9b1bb; }
.bars .bar { background: #2f7de1; height: 1.1rem; border-radius: 3px; }
table { border-collapse: collapse; margin: 1rem 0; }
td, th { border: 1px solid #2a2f36; padding: .3rem .6rem; }
.images { display: flex; flex-wrap: wrap; gap: 1rem; }
.images img { max-width: 420px; border-radius: 8px; }
.mockup { position: relative; width: 300px; height: 340px; background: #e9e9e9; border-radius: 40px 40px 12px 12px; display: flex; align-items: center; justify-content: center; }
.mockup img { width: 150px; max-width: 150px; }
.swatch { display: inline-block; padding: 1rem; border-radius: 8px; }
.pattern { font-size: 2.5rem; letter-spacing: .3rem; }
";

/// Wrap `body` in the shared page shell.
pub fn page(title: &str, body: &str) -> Html<String> {
  Html(format!(
    "<!doctype html>
<html lang=\"en\">
<head>
<meta charset=\"utf-8\">
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">
<title>{title} · Solute</title>
<style>{STYLE}</style>
</head>
<body>
<header class=\"top\">
  <a class=\"brand\" href=\"/\">🧪 Solute</a>
  <form method=\"get\" action=\"/\"><input type=\"search\" name=\"q\" placeholder=\"Search apps\"></form>
</header>
<main>
{body}
</main>
</body>
</html>",
    title = escape(title),
  ))
}

pub fn escape(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for c in text.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      c => out.push(c),
    }
  }
  out
}

/// Whether a link target is relative or uses http, https or mailto.
fn is_safe_url(url: &str) -> bool {
  let url = url.trim();
  match url.find(':') {
    // A colon after `/`, `?` or `#` is not a scheme separator.
    Some(i) if !url[..i].contains(['/', '?', '#']) => {
      ["http", "https", "mailto"].iter().any(|s| url[..i].eq_ignore_ascii_case(s))
    }
    _ => true,
  }
}

fn neutralize(url: CowStr<'_>) -> CowStr<'_> {
  if is_safe_url(&url) { url } else { CowStr::Borrowed("#") }
}

/// Render model output as HTML. Raw HTML in the source is shown as text, and
/// link or image targets with other schemes become `#`.
pub fn markdown(text: &str) -> String {
  let mut options = Options::empty();
  options.insert(Options::ENABLE_TABLES);
  options.insert(Options::ENABLE_STRIKETHROUGH);

  let parser = Parser::new_ext(text, options).map(|event| match event {
    Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
    Event::Start(Tag::Link { link_type, dest_url, title, id }) => {
      Event::Start(Tag::Link { link_type, dest_url: neutralize(dest_url), title, id })
    }
    Event::Start(Tag::Image { link_type, dest_url, title, id }) => {
      Event::Start(Tag::Image { link_type, dest_url: neutralize(dest_url), title, id })
    }
    other => other,
  });
  let mut out = String::with_capacity(text.len() * 3 / 2);
  html::push_html(&mut out, parser);
  out
}

// ─── Alerts ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub enum Tone {
  Info,
  Success,
  Warning,
  Error,
}

impl Tone {
  fn class(self) -> &'static str {
    match self {
      Tone::Info => "info",
      Tone::Success => "success",
      Tone::Warning => "warning",
      Tone::Error => "error",
    }
  }
}

pub fn alert(tone: Tone, message: &str) -> String {
  format!("<div class=\"alert {}\">{}</div>", tone.class(), escape(message))
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

/// One app tile with its favorite toggle.
pub fn app_card(info: &AppInfo, favorite: bool) -> String {
  let star = if favorite { "★ Unfavorite" } else { "☆ Favorite" };
  format!(
    "<div class=\"card\">
  <h3>{icon} <a href=\"/apps/{slug}\">{name}</a></h3>
  <div class=\"tagline\">{tagline}</div>
  <form method=\"post\" action=\"/favorites/{slug}\"><button class=\"link\">{star}</button></form>
</div>",
    icon = info.icon,
    slug = info.slug,
    name = escape(info.name),
    tagline = escape(info.tagline),
  )
}

// ─── Forms ───────────────────────────────────────────────────────────────────

/// A multipart form for `fields`, pre-filled from `values` where present.
pub fn form(action: &str, fields: &[FieldSpec], values: Option<&FormInput>, submit: &str) -> String {
  let mut out = format!(
    "<form class=\"app\" method=\"post\" action=\"{}\" enctype=\"multipart/form-data\">",
    escape(action)
  );
  for spec in fields {
    let value = match values {
      Some(v) if !matches!(spec.kind, FieldKind::Upload { .. }) && v.values().contains_key(spec.name) => {
        v.get(spec.name).to_owned()
      }
      _ => spec.initial_value(),
    };
    out.push_str(&field(spec, &value));
  }
  let _ = write!(out, "<button type=\"submit\">{}</button></form>", escape(submit));
  out
}

fn field(spec: &FieldSpec, value: &str) -> String {
  let name = spec.name;
  let label = format!("<label for=\"{name}\">{}</label>", escape(spec.label));
  let placeholder = escape(spec.placeholder);
  let value_attr = escape(value);

  let control = match spec.kind {
    FieldKind::Text => format!(
      "<input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{value_attr}\" placeholder=\"{placeholder}\">"
    ),
    FieldKind::TextArea { rows } => format!(
      "<textarea id=\"{name}\" name=\"{name}\" rows=\"{rows}\" placeholder=\"{placeholder}\">{value_attr}</textarea>"
    ),
    FieldKind::Select(options) => {
      let mut s = format!("<select id=\"{name}\" name=\"{name}\">");
      for option in options {
        let selected = if *option == value { " selected" } else { "" };
        let _ = write!(s, "<option{selected}>{}</option>", escape(option));
      }
      s.push_str("</select>");
      s
    }
    FieldKind::Slider { min, max, .. } => format!(
      "<input type=\"range\" id=\"{name}\" name=\"{name}\" min=\"{min}\" max=\"{max}\" value=\"{value_attr}\" \
       oninput=\"this.nextElementSibling.value=this.value\"> <output>{value_attr}</output>"
    ),
    FieldKind::Number { min, .. } => format!(
      "<input type=\"number\" id=\"{name}\" name=\"{name}\" min=\"{min}\" step=\"any\" value=\"{value_attr}\">"
    ),
    FieldKind::Date => format!("<input type=\"date\" id=\"{name}\" name=\"{name}\" value=\"{value_attr}\">"),
    FieldKind::Color { .. } => {
      format!("<input type=\"color\" id=\"{name}\" name=\"{name}\" value=\"{value_attr}\">")
    }
    FieldKind::Upload { accept, multiple } => {
      let accept = accept.iter().map(|e| format!(".{e}")).collect::<Vec<_>>().join(",");
      let multiple = if multiple { " multiple" } else { "" };
      format!("<input type=\"file\" id=\"{name}\" name=\"{name}\" accept=\"{accept}\"{multiple}>")
    }
  };
  format!("{label}{control}")
}

/// A single-button POST form.
pub fn button(action: &str, label: &str) -> String {
  format!(
    "<form method=\"post\" action=\"{}\"><button type=\"submit\">{}</button></form>",
    escape(action),
    escape(label)
  )
}

// ─── Data display ────────────────────────────────────────────────────────────

/// Horizontal bars scaled to the largest value.
pub fn bar_chart(title: &str, bars: &[(&str, u32)], unit: &str) -> String {
  let max = bars.iter().map(|(_, v)| *v).max().unwrap_or(0).max(1);
  let mut out = format!("<div class=\"bars\"><h4>{}</h4>", escape(title));
  for (label, value) in bars {
    let width = u64::from(*value) * 100 / u64::from(max);
    let _ = write!(
      out,
      "<div class=\"row\"><span class=\"label\">{}</span><span class=\"bar\" style=\"width:{width}%\"></span><span>{value}{unit}</span></div>",
      escape(label),
    );
  }
  out.push_str("</div>");
  out
}

pub fn table<R, C>(headers: &[&str], rows: R) -> String
where
  R: IntoIterator<Item = C>,
  C: IntoIterator<Item = String>,
{
  let mut out = String::from("<table><tr>");
  for h in headers {
    let _ = write!(out, "<th>{}</th>", escape(h));
  }
  out.push_str("</tr>");
  for row in rows {
    out.push_str("<tr>");
    for cell in row {
      let _ = write!(out, "<td>{}</td>", escape(&cell));
    }
    out.push_str("</tr>");
  }
  out.push_str("</table>");
  out
}

pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
  format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}
