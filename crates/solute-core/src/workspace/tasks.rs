//! AssistForge task board.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
  /// 1-based, in posting order.
  pub id:          u32,
  pub title:       String,
  pub description: String,
  pub skills:      String,
  pub budget:      f64,
  pub duration:    String,
  pub posted:      NaiveDate,
}

/// Input to [`TaskBoard::post`].
#[derive(Debug, Clone, Default)]
pub struct NewTask {
  pub title:       String,
  pub description: String,
  pub skills:      String,
  pub budget:      f64,
  pub duration:    String,
}

#[derive(Debug, Clone, Default)]
pub struct TaskBoard {
  tasks: Vec<Task>,
}

impl TaskBoard {
  pub fn post(&mut self, task: NewTask, today: NaiveDate) -> &Task {
    let id = self.tasks.len() as u32 + 1;
    self.tasks.push(Task {
      id,
      title: task.title.trim().to_owned(),
      description: task.description.trim().to_owned(),
      skills: task.skills.trim().to_owned(),
      budget: task.budget,
      duration: task.duration.trim().to_owned(),
      posted: today,
    });
    &self.tasks[self.tasks.len() - 1]
  }

  pub fn tasks(&self) -> &[Task] { &self.tasks }

  pub fn get(&self, id: u32) -> Result<&Task> {
    self.tasks.iter().find(|t| t.id == id).ok_or(Error::NoSuchItem(id as usize))
  }
}

impl Task {
  pub fn application_prompt(&self) -> String {
    format!(
      "You are an expert virtual assistant applying for a task.

Task: {title}
Description: {description}
Skills: {skills}
Budget/Duration: {budget}, {duration}

Write a short, professional application message (3-5 sentences) highlighting:
- Relevant experience
- Why you're a great fit
- Enthusiasm

Keep it concise and confident.",
      title = self.title,
      description = self.description,
      skills = self.skills,
      budget = self.budget,
      duration = self.duration,
    )
  }
}
