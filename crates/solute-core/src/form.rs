//! Form field definitions, submitted values and input requirements.
//!
//! Field tables are static: every app declares its fields once in the
//! registry. Submitted values arrive as a [`FormInput`], are normalised
//! against the field table, then checked against the app's
//! [`Requirement`]s before any external call is made.

use std::collections::BTreeMap;

use serde::Serialize;

// ─── Field definitions ───────────────────────────────────────────────────────

/// The widget a field renders as, with its constraints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
  Text,
  TextArea { rows: u16 },
  /// A fixed option list; the first option is the default.
  Select(&'static [&'static str]),
  Slider { min: i64, max: i64, default: i64 },
  Number { min: f64, default: f64 },
  /// A calendar date (`YYYY-MM-DD`); blank means today.
  Date,
  /// A `#rrggbb` colour.
  Color { default: &'static str },
  /// File upload restricted to the listed lower-case extensions.
  Upload {
    accept:   &'static [&'static str],
    multiple: bool,
  },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
  pub name:        &'static str,
  pub label:       &'static str,
  pub placeholder: &'static str,
  /// Overrides the kind's default initial value when non-empty.
  pub preset:      &'static str,
  pub kind:        FieldKind,
}

impl FieldSpec {
  pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
    Self { name, label, placeholder: "", preset: "", kind }
  }

  pub const fn hint(mut self, placeholder: &'static str) -> Self {
    self.placeholder = placeholder;
    self
  }

  pub const fn preset(mut self, value: &'static str) -> Self {
    self.preset = value;
    self
  }

  /// The value a freshly rendered form shows.
  pub fn initial_value(&self) -> String {
    if !self.preset.is_empty() {
      return self.preset.to_owned();
    }
    match self.kind {
      FieldKind::Select(options) => options.first().copied().unwrap_or_default().to_owned(),
      FieldKind::Slider { default, .. } => default.to_string(),
      FieldKind::Number { default, .. } => default.to_string(),
      FieldKind::Color { default } => default.to_owned(),
      _ => String::new(),
    }
  }
}

// ─── Submitted input ─────────────────────────────────────────────────────────

/// One uploaded file.
#[derive(Debug, Clone)]
pub struct Upload {
  pub field:        String,
  pub filename:     String,
  pub content_type: String,
  pub bytes:        Vec<u8>,
}

impl Upload {
  /// Lower-cased extension of the file name, without the dot.
  pub fn extension(&self) -> String {
    self
      .filename
      .rsplit_once('.')
      .map(|(_, ext)| ext.to_ascii_lowercase())
      .unwrap_or_default()
  }

  /// File name without its extension, for download names.
  pub fn stem(&self) -> &str {
    self
      .filename
      .rsplit_once('.')
      .map(|(stem, _)| stem)
      .unwrap_or(&self.filename)
  }
}

/// The values of one form submission.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormInput {
  values:  BTreeMap<String, String>,
  #[serde(skip)]
  uploads: Vec<Upload>,
}

impl FormInput {
  pub fn new() -> Self { Self::default() }

  pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
    self.set(name, value);
    self
  }

  pub fn set(&mut self, name: &str, value: impl Into<String>) {
    self.values.insert(name.to_owned(), value.into());
  }

  /// The raw value of `name`, or `""` when absent.
  pub fn get(&self, name: &str) -> &str {
    self.values.get(name).map(String::as_str).unwrap_or("")
  }

  pub fn is_blank(&self, name: &str) -> bool { self.get(name).trim().is_empty() }

  pub fn push_upload(&mut self, upload: Upload) { self.uploads.push(upload); }

  pub fn uploads<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Upload> + 'a {
    self.uploads.iter().filter(move |u| u.field == field)
  }

  pub fn all_uploads(&self) -> &[Upload] { &self.uploads }

  pub fn values(&self) -> &BTreeMap<String, String> { &self.values }

  /// Parse `name` as an integer clamped to `min..=max`, falling back to
  /// `default` when absent or malformed.
  pub fn int(&self, name: &str, min: i64, max: i64, default: i64) -> i64 {
    self.get(name).trim().parse().unwrap_or(default).clamp(min, max)
  }

  /// Bring the submission in line with `fields`: unknown select values fall
  /// back to the first option, sliders are clamped, missing fields get their
  /// initial value, and uploads with an unaccepted extension are dropped.
  pub fn normalize(&mut self, fields: &[FieldSpec]) {
    for field in fields {
      match field.kind {
        FieldKind::Select(options) => {
          if !options.contains(&self.get(field.name)) {
            self.set(field.name, field.initial_value());
          }
        }
        FieldKind::Slider { min, max, default } => {
          let v = self.int(field.name, min, max, default);
          self.set(field.name, v.to_string());
        }
        FieldKind::Number { min, default } => {
          let v = self
            .get(field.name)
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(default)
            .max(min);
          self.set(field.name, v.to_string());
        }
        FieldKind::Color { .. } => {
          if !is_hex_color(self.get(field.name)) {
            self.set(field.name, field.initial_value());
          }
        }
        FieldKind::Upload { accept, multiple } => {
          let mut kept = 0;
          self.uploads.retain(|u| {
            if u.field != field.name {
              return true;
            }
            let ok = accept.contains(&u.extension().as_str()) && (multiple || kept == 0);
            if ok {
              kept += 1;
            }
            ok
          });
        }
        FieldKind::Text | FieldKind::TextArea { .. } | FieldKind::Date => {
          if !self.values.contains_key(field.name) {
            self.set(field.name, String::new());
          }
        }
      }
    }
  }
}

fn is_hex_color(value: &str) -> bool {
  value
    .strip_prefix('#')
    .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

// ─── Requirements ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
  /// The field must contain non-whitespace text.
  Filled(&'static str),
  /// Every listed field must be filled.
  AllOf(&'static [&'static str]),
  /// At least one listed field must be filled.
  AnyOf(&'static [&'static str]),
  /// At least one file must have been uploaded to the field.
  Upload(&'static str),
}

/// A precondition on the submission, with the warning shown when unmet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Requirement {
  pub rule:    Rule,
  pub warning: &'static str,
}

impl Requirement {
  pub const fn new(rule: Rule, warning: &'static str) -> Self { Self { rule, warning } }

  pub fn is_met(&self, input: &FormInput) -> bool {
    match self.rule {
      Rule::Filled(f) => !input.is_blank(f),
      Rule::AllOf(fs) => fs.iter().all(|f| !input.is_blank(f)),
      Rule::AnyOf(fs) => fs.iter().any(|f| !input.is_blank(f)),
      Rule::Upload(f) => input.uploads(f).next().is_some(),
    }
  }
}

/// The warning of the first unmet requirement, if any.
pub fn first_unmet(requirements: &[Requirement], input: &FormInput) -> Option<&'static str> {
  requirements.iter().find(|r| !r.is_met(input)).map(|r| r.warning)
}

/// An informational message that does not block submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notice {
  /// Shown when both fields hold the same value.
  SameValue {
    a:       &'static str,
    b:       &'static str,
    message: &'static str,
  },
}

impl Notice {
  pub fn message_for(&self, input: &FormInput) -> Option<&'static str> {
    match *self {
      Notice::SameValue { a, b, message } => (input.get(a) == input.get(b)).then_some(message),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("tone", "Tone", FieldKind::Select(&["Kind", "Blunt"])),
    FieldSpec::new("count", "Count", FieldKind::Slider { min: 1, max: 4, default: 2 }),
    FieldSpec::new("doc", "Document", FieldKind::Upload { accept: &["pdf", "txt"], multiple: false }),
    FieldSpec::new("notes", "Notes", FieldKind::TextArea { rows: 4 }),
    FieldSpec::new("to", "To", FieldKind::Select(&["Kind", "Blunt"])).preset("Blunt"),
    FieldSpec::new("bg", "Background", FieldKind::Color { default: "#00ff9d" }),
  ];

  fn upload(field: &str, name: &str) -> Upload {
    Upload {
      field:        field.into(),
      filename:     name.into(),
      content_type: "application/octet-stream".into(),
      bytes:        b"x".to_vec(),
    }
  }

  #[test]
  fn normalize_repairs_selects_and_sliders() {
    let mut input = FormInput::new().with("tone", "Sarcastic").with("count", "99");
    input.normalize(FIELDS);
    assert_eq!(input.get("tone"), "Kind");
    assert_eq!(input.get("count"), "4");
    assert_eq!(input.get("notes"), "");
    assert_eq!(input.get("to"), "Blunt");
    assert_eq!(input.get("bg"), "#00ff9d");
  }

  #[test]
  fn normalize_keeps_valid_colors_only() {
    let mut input = FormInput::new().with("bg", "#A0b1C2");
    input.normalize(FIELDS);
    assert_eq!(input.get("bg"), "#A0b1C2");

    let mut input = FormInput::new().with("bg", "red");
    input.normalize(FIELDS);
    assert_eq!(input.get("bg"), "#00ff9d");
  }

  #[test]
  fn normalize_drops_unaccepted_and_extra_uploads() {
    let mut input = FormInput::new();
    input.push_upload(upload("doc", "photo.PNG"));
    input.push_upload(upload("doc", "a.PDF"));
    input.push_upload(upload("doc", "b.txt"));
    input.normalize(FIELDS);
    let names: Vec<_> = input.uploads("doc").map(|u| u.filename.as_str()).collect();
    assert_eq!(names, ["a.PDF"]);
  }

  #[test]
  fn requirements_report_first_warning() {
    let reqs = [
      Requirement::new(Rule::AnyOf(&["a", "b"]), "need a or b"),
      Requirement::new(Rule::AllOf(&["a", "c"]), "need a and c"),
    ];
    let input = FormInput::new().with("b", "  x ");
    assert_eq!(first_unmet(&reqs, &input), Some("need a and c"));

    let blank = FormInput::new().with("a", "   ");
    assert_eq!(first_unmet(&reqs, &blank), Some("need a or b"));

    let full = FormInput::new().with("a", "1").with("c", "2");
    assert_eq!(first_unmet(&reqs, &full), None);
  }

  #[test]
  fn upload_rule_needs_a_file_on_that_field() {
    let req = Requirement::new(Rule::Upload("doc"), "upload something");
    let mut input = FormInput::new();
    input.push_upload(upload("other", "x.txt"));
    assert!(!req.is_met(&input));
    input.push_upload(upload("doc", "x.txt"));
    assert!(req.is_met(&input));
  }

  #[test]
  fn same_value_notice() {
    let notice = Notice::SameValue { a: "from", b: "to", message: "same" };
    assert_eq!(notice.message_for(&FormInput::new().with("from", "X").with("to", "X")), Some("same"));
    assert_eq!(notice.message_for(&FormInput::new().with("from", "X").with("to", "Y")), None);
  }
}
