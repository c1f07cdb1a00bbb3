//! SkillRust: skill decay tracking.
//!
//! The decay model is a deliberately rough heuristic: one percent per three
//! days inactive, capped at 100, costing one proficiency point per 20%.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use crate::{Error, Result};

pub const CATEGORIES: &[&str] =
  &["Coding", "Math", "Writing", "Language", "Music", "Sport", "Other"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
  pub name:           String,
  pub category:       String,
  pub last_practiced: NaiveDate,
  /// 1..=10.
  pub initial_level:  u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Risk {
  Low,
  Medium,
  High,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Decay {
  pub days_inactive: i64,
  /// 0.0..=100.0
  pub percent:       f64,
  /// 1.0..=10.0
  pub current_level: f64,
  pub risk:          Risk,
}

impl Skill {
  pub fn decay(&self, today: NaiveDate) -> Decay {
    let days_inactive = (today - self.last_practiced).num_days().max(0);
    let percent = (days_inactive as f64 / 3.0).min(100.0);
    let current_level = (f64::from(self.initial_level) - percent / 20.0).max(1.0);
    let risk = if percent < 30.0 {
      Risk::Low
    } else if percent < 70.0 {
      Risk::Medium
    } else {
      Risk::High
    };
    Decay { days_inactive, percent, current_level, risk }
  }

  pub fn refresh_prompt(&self, today: NaiveDate) -> String {
    let decay = self.decay(today);
    format!(
      "You are SkillRust, a pragmatic skill coach.

Skill: {name} ({category})
Last practiced: {last} ({days} days ago)
Initial proficiency: {initial}/10
Estimated current level: {current:.1}/10

Create a time-optimized refresh plan to regain proficiency:
- Total time: under 5 hours spread over 1 week
- Focus on high-impact practice (not full mastery)
- Specific exercises or resources
- 3-5 short sessions

Be practical, encouraging, and realistic.",
      name = self.name,
      category = self.category,
      last = self.last_practiced.format("%Y-%m-%d"),
      days = decay.days_inactive,
      initial = self.initial_level,
      current = decay.current_level,
    )
  }
}

#[derive(Debug, Clone, Default)]
pub struct SkillTracker {
  skills: Vec<Skill>,
}

impl SkillTracker {
  /// Unknown categories become `"Other"`; the level is clamped to 1..=10.
  pub fn add(&mut self, name: &str, category: &str, last_practiced: NaiveDate, level: i64) {
    let category = if CATEGORIES.contains(&category) { category } else { "Other" };
    self.skills.push(Skill {
      name: name.trim().to_owned(),
      category: category.to_owned(),
      last_practiced,
      initial_level: level.clamp(1, 10) as u8,
    });
  }

  pub fn skills(&self) -> &[Skill] { &self.skills }

  pub fn is_empty(&self) -> bool { self.skills.is_empty() }

  pub fn get(&self, index: usize) -> Result<&Skill> {
    self.skills.get(index).ok_or(Error::NoSuchItem(index))
  }

  pub fn export_json(&self) -> Result<String> { Ok(serde_json::to_string_pretty(&self.skills)?) }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn skill(days_ago: i64, level: u8) -> (Skill, NaiveDate) {
    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let skill = Skill {
      name:           "Rust".into(),
      category:       "Coding".into(),
      last_practiced: today - chrono::Duration::days(days_ago),
      initial_level:  level,
    };
    (skill, today)
  }

  #[test]
  fn fresh_skill_has_no_decay() {
    let (s, today) = skill(0, 8);
    let d = s.decay(today);
    assert_eq!(d.percent, 0.0);
    assert_eq!(d.current_level, 8.0);
    assert_eq!(d.risk, Risk::Low);
  }

  #[test]
  fn decay_follows_the_heuristic() {
    let (s, today) = skill(120, 8);
    let d = s.decay(today);
    assert_eq!(d.days_inactive, 120);
    assert_eq!(d.percent, 40.0);
    assert_eq!(d.current_level, 6.0);
    assert_eq!(d.risk, Risk::Medium);
  }

  #[test]
  fn decay_caps_and_level_floors() {
    let (s, today) = skill(1000, 2);
    let d = s.decay(today);
    assert_eq!(d.percent, 100.0);
    assert_eq!(d.current_level, 1.0);
    assert_eq!(d.risk, Risk::High);
  }

  #[test]
  fn future_dates_count_as_today() {
    let (s, today) = skill(-5, 5);
    assert_eq!(s.decay(today).days_inactive, 0);
  }

  #[test]
  fn tracker_normalizes_input() {
    let mut t = SkillTracker::default();
    t.add(" Chess ", "Board games", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 42);
    let s = t.get(0).unwrap();
    assert_eq!(s.name, "Chess");
    assert_eq!(s.category, "Other");
    assert_eq!(s.initial_level, 10);
    assert!(matches!(t.get(3), Err(Error::NoSuchItem(3))));
  }

  #[test]
  fn refresh_prompt_mentions_current_level() {
    let (s, today) = skill(120, 8);
    assert!(s.refresh_prompt(today).contains("Estimated current level: 6.0/10"));
  }
}
