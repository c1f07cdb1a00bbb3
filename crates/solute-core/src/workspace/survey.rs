//! SurveyForge: surveys, responses and the insights prompt.
//!
//! Questions are authored one per line. A line of the form
//! `Question | first; second; third` is multiple choice.

use serde::Serialize;

use crate::{Error, Result};

pub const MAX_QUESTIONS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "options")]
pub enum QuestionKind {
  Text,
  #[serde(rename = "Multiple Choice")]
  Choice(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurveyQuestion {
  pub text: String,
  pub kind: QuestionKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Survey {
  pub id:        u32,
  pub title:     String,
  pub questions: Vec<SurveyQuestion>,
  /// One answer per question, per response.
  pub responses: Vec<Vec<String>>,
}

/// Parse authored question lines. Choice lines with fewer than two options
/// become free-text questions; at most [`MAX_QUESTIONS`] are kept.
pub fn parse_questions(text: &str) -> Vec<SurveyQuestion> {
  text
    .lines()
    .filter_map(|line| {
      let (question, options) = match line.split_once('|') {
        Some((q, opts)) => (q.trim(), Some(opts)),
        None => (line.trim(), None),
      };
      if question.is_empty() {
        return None;
      }
      let options: Vec<String> = options
        .map(|o| o.split(';').map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned).collect())
        .unwrap_or_default();
      let kind = if options.len() >= 2 { QuestionKind::Choice(options) } else { QuestionKind::Text };
      Some(SurveyQuestion { text: question.to_owned(), kind })
    })
    .take(MAX_QUESTIONS)
    .collect()
}

#[derive(Debug, Clone, Default)]
pub struct SurveyBook {
  surveys: Vec<Survey>,
}

impl SurveyBook {
  pub fn create(&mut self, title: &str, questions: &str) -> Result<&Survey> {
    let questions = parse_questions(questions);
    if questions.is_empty() {
      return Err(Error::EmptySurvey);
    }
    let id = self.surveys.len() as u32 + 1;
    self.surveys.push(Survey {
      id,
      title: title.trim().to_owned(),
      questions,
      responses: Vec::new(),
    });
    self.get(id)
  }

  pub fn surveys(&self) -> &[Survey] { &self.surveys }

  pub fn get(&self, id: u32) -> Result<&Survey> {
    self.surveys.iter().find(|s| s.id == id).ok_or(Error::SurveyNotFound(id))
  }

  /// Record one response. Answers are aligned to the questions: missing
  /// answers are blank, extras are dropped, and a choice answer that is not
  /// one of the options is blanked.
  pub fn respond(&mut self, id: u32, answers: Vec<String>) -> Result<()> {
    let survey = self
      .surveys
      .iter_mut()
      .find(|s| s.id == id)
      .ok_or(Error::SurveyNotFound(id))?;

    let mut answers = answers.into_iter();
    let aligned = survey
      .questions
      .iter()
      .map(|q| {
        let answer = answers.next().unwrap_or_default().trim().to_owned();
        match &q.kind {
          QuestionKind::Choice(opts) if !opts.contains(&answer) => String::new(),
          _ => answer,
        }
      })
      .collect();
    survey.responses.push(aligned);
    Ok(())
  }
}

impl Survey {
  /// The insights prompt, or `None` while there are no responses.
  pub fn insights_prompt(&self) -> Result<Option<String>> {
    if self.responses.is_empty() {
      return Ok(None);
    }
    let questions = serde_json::to_string(&self.questions)?;
    let mut formatted = String::new();
    for (i, response) in self.responses.iter().enumerate() {
      formatted.push_str(&format!("Response {}:\n", i + 1));
      for (q, answer) in response.iter().enumerate() {
        formatted.push_str(&format!("Q{}: {}\n", q + 1, answer));
      }
      formatted.push('\n');
    }

    Ok(Some(format!(
      "You are SurveyForge, an expert feedback analyst.

Survey: {title}
Questions: {questions}

Responses ({count} total):
{formatted}
Provide actionable insights:
- Key themes and patterns
- Positive feedback highlights
- Areas for improvement
- Sentiment overview
- Recommendations for the business

Be specific, data-driven, and constructive.",
      title = self.title,
      count = self.responses.len(),
    )))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const QUESTIONS: &str = "What did you like?\n\nRate us | Great; Fine ; Poor\nOne option | only\n";

  #[test]
  fn parses_text_and_choice_lines() {
    let qs = parse_questions(QUESTIONS);
    assert_eq!(qs.len(), 3);
    assert_eq!(qs[0].kind, QuestionKind::Text);
    assert_eq!(qs[1].kind, QuestionKind::Choice(vec!["Great".into(), "Fine".into(), "Poor".into()]));
    assert_eq!(qs[2].text, "One option");
    assert_eq!(qs[2].kind, QuestionKind::Text);
  }

  #[test]
  fn question_count_is_capped() {
    let many = (0..15).map(|i| format!("Q{i}")).collect::<Vec<_>>().join("\n");
    assert_eq!(parse_questions(&many).len(), MAX_QUESTIONS);
  }

  #[test]
  fn empty_survey_is_rejected() {
    let mut book = SurveyBook::default();
    assert!(matches!(book.create("Empty", " \n | a; b"), Err(Error::EmptySurvey)));
  }

  #[test]
  fn responses_are_aligned_and_validated() {
    let mut book = SurveyBook::default();
    let id = book.create("Feedback", QUESTIONS).unwrap().id;
    book.respond(id, vec!["Fast shipping".into(), "Amazing".into()]).unwrap();
    book.respond(id, vec!["x".into(), "Fine".into(), "y".into(), "extra".into()]).unwrap();

    let survey = book.get(id).unwrap();
    assert_eq!(survey.responses[0], ["Fast shipping", "", ""]);
    assert_eq!(survey.responses[1], ["x", "Fine", "y"]);
    assert!(matches!(book.respond(99, vec![]), Err(Error::SurveyNotFound(99))));
  }

  #[test]
  fn insights_need_responses() {
    let mut book = SurveyBook::default();
    let id = book.create("Feedback", QUESTIONS).unwrap().id;
    assert!(book.get(id).unwrap().insights_prompt().unwrap().is_none());

    book.respond(id, vec!["Great staff".into(), "Great".into()]).unwrap();
    let prompt = book.get(id).unwrap().insights_prompt().unwrap().unwrap();
    assert!(prompt.contains("Responses (1 total)"));
    assert!(prompt.contains("Q2: Great"));
    assert!(prompt.contains("\"type\":\"Multiple Choice\""));
  }
}
