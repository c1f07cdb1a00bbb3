//! Apps backed by a session workspace, plus MindGames.
//!
//! `fields` here describe the "add an item" form; the prompts are built from
//! the whole collection in [`crate::workspace`].

use super::{AppDef, Pipeline, WorkspaceKind};
use crate::{
  catalog::AppInfo,
  form::{FieldKind, FieldSpec, Requirement, Rule},
  workspace::skills::CATEGORIES,
};

pub(super) const CONTRAMIND: AppDef = AppDef {
  info:           AppInfo {
    slug:        "contramind",
    icon:        "🧠",
    name:        "ContraMind",
    tagline:     "Your second brain that argues with you.",
    description: "Collects your thoughts over time, then challenges contradictions, flags belief \
                  drift and notes when you changed your mind.",
  },
  intro:          "Add your thoughts over time. ContraMind challenges contradictions, flags belief \
                   drift, and highlights when you've changed your mind.",
  fields:         &[
    FieldSpec::new(
      "text",
      "What do you believe or think right now?",
      FieldKind::TextArea { rows: 6 },
    ),
    FieldSpec::new("date", "When did you think this?", FieldKind::Date),
  ],
  requirements:   &[Requirement::new(Rule::Filled("text"), "Write something first.")],
  notices:        &[],
  pipeline:       Pipeline::Workspace(WorkspaceKind::Notes),
  submit_label:   "Save Thought",
  success:        "ContraMind has thoughts",
  result_heading: "ContraMind's Challenge",
  failure_label:  "Analysis failed",
  caption:        "ContraMind holds your thinking accountable. Notes live only in this session.",
  illustration:   None,
};

pub(super) const SKILLRUST: AppDef = AppDef {
  info:           AppInfo {
    slug:        "skillrust",
    icon:        "🛠️",
    name:        "SkillRust",
    tagline:     "Track decaying skills and get quick refresh plans.",
    description: "Estimates how much your unpracticed skills have decayed and builds \
                  time-efficient refresh plans.",
  },
  intro:          "Add skills you haven't practiced. SkillRust estimates decay with a simple \
                   heuristic and gives time-efficient refresh plans.",
  fields:         &[
    FieldSpec::new("name", "Skill name", FieldKind::Text).hint("e.g. Python, Calculus"),
    FieldSpec::new("category", "Category", FieldKind::Select(CATEGORIES)),
    FieldSpec::new("last_practiced", "Last practiced", FieldKind::Date),
    FieldSpec::new("level", "Initial proficiency (1-10)", FieldKind::Slider {
      min:     1,
      max:     10,
      default: 8,
    }),
  ],
  requirements:   &[Requirement::new(Rule::Filled("name"), "Enter a skill name first.")],
  notices:        &[],
  pipeline:       Pipeline::Workspace(WorkspaceKind::Skills),
  submit_label:   "Add Skill",
  success:        "Refresh plan ready",
  result_heading: "Refresh Plan",
  failure_label:  "Plan generation failed",
  caption:        "Decay is a rough heuristic: one percent per three days inactive.",
  illustration:   None,
};

pub(super) const ASSISTFORGE: AppDef = AppDef {
  info:           AppInfo {
    slug:        "assistforge",
    icon:        "🤝",
    name:        "AssistForge",
    tagline:     "Connect businesses with skilled virtual assistants.",
    description: "A small task board: businesses post email, data entry and admin tasks; \
                  assistants get a tailored application message.",
  },
  intro:          "Businesses post tasks; virtual assistants browse them and get an application \
                   suggestion.",
  fields:         &[
    FieldSpec::new("title", "Task title", FieldKind::Text)
      .hint("e.g. Email management and calendar scheduling"),
    FieldSpec::new("description", "Full description", FieldKind::TextArea { rows: 6 }),
    FieldSpec::new("skills", "Required skills", FieldKind::Text)
      .hint("e.g. Gmail, Google Calendar, Excel"),
    FieldSpec::new("budget", "Budget (USD per hour or fixed)", FieldKind::Number {
      min:     5.0,
      default: 20.0,
    }),
    FieldSpec::new("duration", "Estimated duration", FieldKind::Text)
      .hint("e.g. 10 hours/week, ongoing"),
  ],
  requirements:   &[Requirement::new(Rule::Filled("title"), "Give the task a title.")],
  notices:        &[],
  pipeline:       Pipeline::Workspace(WorkspaceKind::Tasks),
  submit_label:   "Post Task",
  success:        "Application Suggestion",
  result_heading: "Your Application",
  failure_label:  "Suggestion failed",
  caption:        "Reliable virtual assistance, globally connected.",
  illustration:   None,
};

pub(super) const SURVEYFORGE: AppDef = AppDef {
  info:           AppInfo {
    slug:        "surveyforge",
    icon:        "📋",
    name:        "SurveyForge",
    tagline:     "Automated surveys with AI-powered insights for businesses.",
    description: "Create a survey, collect responses, and get insights on customer feedback.",
  },
  intro:          "Create a survey, collect responses, and get AI insights on customer feedback. \
                   Write one question per line; add options after a bar for multiple choice, e.g. \
                   `How was it? | Great; Fine; Poor`.",
  fields:         &[
    FieldSpec::new("title", "Survey title", FieldKind::Text),
    FieldSpec::new("questions", "Questions (one per line)", FieldKind::TextArea { rows: 8 })
      .hint("What did you like most?\nHow likely are you to recommend us? | Very; Somewhat; Not at all"),
  ],
  requirements:   &[Requirement::new(
    Rule::AllOf(&["title", "questions"]),
    "A survey needs a title and at least one question.",
  )],
  notices:        &[],
  pipeline:       Pipeline::Workspace(WorkspaceKind::Surveys),
  submit_label:   "Create Survey",
  success:        "Insights generated",
  result_heading: "AI-Powered Insights",
  failure_label:  "Insights generation failed",
  caption:        "Gather feedback, unlock insights.",
  illustration:   None,
};

pub(super) const MINDGAMES: AppDef = AppDef {
  info:           AppInfo {
    slug:        "mindgames",
    icon:        "🧩",
    name:        "MindGames",
    tagline:     "Fun and intellectual games powered by AI, data, and visuals.",
    description: "Riddles, custom quizzes, data-insight puzzles and pattern recall with adaptive \
                  difficulty and a leaderboard.",
  },
  intro:          "Pick a game. Points add up across rounds until you start a new session.",
  fields:         &[],
  requirements:   &[],
  notices:        &[],
  pipeline:       Pipeline::Games,
  submit_label:   "",
  success:        "",
  result_heading: "",
  failure_label:  "Generation failed",
  caption:        "MindGames: fun and intellectual challenges.",
  illustration:   None,
};
