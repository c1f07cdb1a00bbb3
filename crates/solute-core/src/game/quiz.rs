//! Multiple-choice quiz rounds.

use serde::Serialize;

use super::Difficulty;

pub const POINTS_PER_CORRECT: u32 = 2;
pub const MIN_QUESTIONS: i64 = 3;
pub const MAX_QUESTIONS: i64 = 10;
pub const DEFAULT_QUESTIONS: i64 = 5;

const LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
  pub prompt:  String,
  pub options: Vec<String>,
  /// Index into `options`.
  pub answer:  usize,
}

impl Question {
  pub fn answer_text(&self) -> &str {
    self.options.get(self.answer).map(String::as_str).unwrap_or_default()
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quiz {
  pub topic:     String,
  pub questions: Vec<Question>,
}

impl Quiz {
  /// Number of questions whose chosen option matches the answer.
  /// Missing choices count as wrong.
  pub fn correct_count(&self, choices: &[Option<usize>]) -> u32 {
    self
      .questions
      .iter()
      .zip(choices.iter().chain(std::iter::repeat(&None)))
      .filter(|(q, c)| **c == Some(q.answer))
      .count() as u32
  }
}

/// Option letter for an index, e.g. `0 → 'A'`.
pub fn letter(index: usize) -> char { LETTERS.get(index).copied().unwrap_or('?') }

pub fn prompt(topic: &str, count: usize, difficulty: Difficulty) -> String {
  format!(
    "Create a {count}-question multiple-choice quiz on {topic}.\n{hint}\nFormat each question \
     as:\nQ<n>: [question]\nA) [option1]\nB) [option2]\nC) [option3]\nD) [option4]\n\nCorrect \
     answer: [letter]\n\nMake questions intellectual and fun.",
    hint = difficulty.prompt_hint(),
  )
}

/// Parse generated quiz text, keeping at most `count` well-formed questions.
pub fn parse(text: &str, count: usize) -> Vec<Question> {
  let mut questions = Vec::new();
  let mut current: Option<Draft> = None;

  for raw in text.lines() {
    let line = strip_markdown(raw);
    if line.is_empty() {
      continue;
    }

    if is_question_start(&line) {
      if let Some(done) = current.take().and_then(Draft::finish) {
        questions.push(done);
      }
      let prompt = line
        .split_once([':', '.', ')'])
        .map(|(_, rest)| rest.trim())
        .unwrap_or(&line);
      current = Some(Draft::new(prompt));
    } else if let Some(option) = option_text(&line) {
      if let Some(draft) = current.as_mut() {
        draft.options.push(option.to_owned());
      }
    } else if let Some(letter) = answer_letter(&line) {
      if let Some(draft) = current.as_mut() {
        draft.answer = Some(letter);
      }
    }
  }
  if let Some(done) = current.and_then(Draft::finish) {
    questions.push(done);
  }

  questions.truncate(count);
  questions
}

/// Parse, or substitute the built-in quiz when nothing usable was found.
pub fn parse_or_fallback(topic: &str, text: &str, count: usize) -> Quiz {
  let questions = parse(text, count);
  if questions.is_empty() {
    tracing::warn!(topic, "generated quiz had no usable questions; using the built-in quiz");
    return fallback();
  }
  Quiz { topic: topic.to_owned(), questions }
}

/// The built-in quiz used when generation fails or can't be parsed.
pub fn fallback() -> Quiz {
  let q = |prompt: &str, options: [&str; 4], answer| Question {
    prompt: prompt.into(),
    options: options.iter().map(|o| o.to_string()).collect(),
    answer,
  };
  Quiz {
    topic:     "General knowledge".into(),
    questions: vec![
      q("Which planet is known as the Red Planet?", ["Venus", "Mars", "Jupiter", "Mercury"], 1),
      q("What is the chemical symbol for gold?", ["Ag", "Gd", "Au", "Go"], 2),
      q("How many sides does a hexagon have?", ["Six", "Five", "Eight", "Seven"], 0),
    ],
  }
}

struct Draft {
  prompt:  String,
  options: Vec<String>,
  answer:  Option<char>,
}

impl Draft {
  fn new(prompt: &str) -> Self {
    Self { prompt: prompt.to_owned(), options: Vec::new(), answer: None }
  }

  fn finish(self) -> Option<Question> {
    if self.prompt.is_empty() || self.options.len() < 2 {
      return None;
    }
    let answer = LETTERS.iter().position(|l| Some(*l) == self.answer)?;
    (answer < self.options.len()).then_some(Question {
      prompt: self.prompt,
      options: self.options,
      answer,
    })
  }
}

fn strip_markdown(line: &str) -> String {
  line
    .replace("**", "")
    .replace("__", "")
    .trim()
    .trim_start_matches('#')
    .trim()
    .to_owned()
}

/// `Q1:`, `Q 1.` or `Question 1)`, in any case.
fn is_question_start(line: &str) -> bool {
  let lower = line.to_ascii_lowercase();
  lower
    .strip_prefix("question")
    .or_else(|| lower.strip_prefix('q'))
    .is_some_and(|rest| rest.trim_start().starts_with(|c: char| c.is_ascii_digit()))
}

fn option_text(line: &str) -> Option<&str> {
  let mut chars = line.chars();
  let first = chars.next()?.to_ascii_uppercase();
  (LETTERS.contains(&first) && chars.next() == Some(')')).then(|| line[2..].trim())
}

fn answer_letter(line: &str) -> Option<char> {
  let lower = line.to_ascii_lowercase();
  let rest = lower.strip_prefix("correct answer")?;
  let rest = rest.trim_start().strip_prefix(':')?;
  rest.trim().chars().next().map(|c| c.to_ascii_uppercase())
}
