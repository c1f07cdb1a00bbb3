//! Apps that read uploaded files: contracts, chat histories, old writing,
//! chart screenshots.

use super::{AppDef, DocumentSpec, Pipeline, VisionSpec};
use crate::{
  catalog::AppInfo,
  form::{FieldKind, FieldSpec, Requirement, Rule},
  prompt::Template,
};

pub(super) const CLEARPACT: AppDef = AppDef {
  info:           AppInfo {
    slug:        "clearpact",
    icon:        "📄",
    name:        "ClearPact",
    tagline:     "Contracts in plain English, with risk visualized.",
    description: "Rewrites an uploaded contract in simple language, rates the risk of each \
                  section and shows who benefits most.",
  },
  intro:          "Upload any contract. ClearPact rewrites it in simple language, highlights \
                   risk zones, and shows who benefits most in each section.",
  fields:         &[FieldSpec::new("contract", "Upload contract (PDF, DOCX, TXT)", FieldKind::Upload {
    accept:   &["pdf", "docx", "txt"],
    multiple: false,
  })],
  requirements:   &[Requirement::new(Rule::Upload("contract"), "Upload a contract first.")],
  notices:        &[],
  pipeline:       Pipeline::Documents(DocumentSpec {
    field:         "contract",
    template:      Template(
      "You are ClearPact, a legal expert who translates contracts into plain English and analyzes risk.

Contract text:
{documents}

Task:
1. Rewrite the entire contract in simple, clear English (keep structure with section headings).
2. For each major section, add:
   - Risk level: Low / Medium / High
   - Who benefits most: Party A / Party B / Balanced / Unclear
   - Brief reason (1 sentence)

Output format:
- Use markdown headings for sections
- After each section, add tags like:
  **Risk: High** | **Favors: Party A** | Reason: One-sided termination rights

Be accurate, neutral, and helpful.",
    ),
    per_file:      30_000,
    total:         30_000,
    headers:       false,
    empty_warning: "No text extracted from file.",
  }),
  submit_label:   "Analyze Contract",
  success:        "Analysis complete",
  result_heading: "Plain English Contract + Risk Heatmap",
  failure_label:  "Analysis failed",
  caption:        "ClearPact uses Gemini AI. Review all outputs carefully. Not legal advice.",
  illustration:   None,
};

pub(super) const GHOSTREPLY: AppDef = AppDef {
  info:           AppInfo {
    slug:        "ghostreply",
    icon:        "👻",
    name:        "GhostReply",
    tagline:     "Get the closure message they never sent, from their probable perspective.",
    description: "Reads old messages or emails from someone who ghosted you and writes the \
                  unsent reply to help you move on.",
  },
  intro:          "This is an AI simulation for personal healing. It's not real contact and not \
                   guaranteed accurate; use it for reflection only.",
  fields:         &[
    FieldSpec::new(
      "history",
      "Conversation history (TXT, PDF, DOCX, JSON email exports)",
      FieldKind::Upload { accept: &["txt", "pdf", "docx", "json"], multiple: true },
    ),
    FieldSpec::new(
      "relationship",
      "Relationship type",
      FieldKind::Select(&[
        "Friend",
        "Romantic/Dating",
        "Colleague/Professional",
        "Family",
        "Other",
      ]),
    ),
    FieldSpec::new(
      "reason",
      "Why do you think they ghosted? (optional)",
      FieldKind::TextArea { rows: 4 },
    )
    .hint("e.g. They got busy with work, fear of confrontation, lost interest"),
    FieldSpec::new(
      "tone",
      "Desired tone of their reply",
      FieldKind::Select(&[
        "Apologetic & Kind",
        "Honest & Explanatory",
        "Neutral & Detached",
        "Regretful",
      ]),
    ),
  ],
  requirements:   &[Requirement::new(
    Rule::Upload("history"),
    "Upload at least one conversation file.",
  )],
  notices:        &[],
  pipeline:       Pipeline::Documents(DocumentSpec {
    field:         "history",
    template:      Template(
      "You are GhostReply, writing the closure message that a person who ghosted someone would send if they finally explained themselves.

Relationship: {relationship}
User's guess why ghosted: {reason?Not provided}
Desired tone: {tone}

Conversation history:
{documents}

Write the message as if from their perspective (\"I\" = the ghoster).
- Explain why they disappeared
- Acknowledge impact
- Offer closure
- Keep tone: {tone|lower}

Be realistic, human, and empathetic, not perfect or overly polished.
Keep it concise (200-400 words).",
    ),
    per_file:      15_000,
    total:         20_000,
    headers:       true,
    empty_warning: "No readable text found in files.",
  }),
  submit_label:   "Generate GhostReply",
  success:        "Message from the ghost",
  result_heading: "The Unsent Reply",
  failure_label:  "Generation failed",
  caption:        "GhostReply is a simulation for personal closure. It's not real and not \
                   guaranteed accurate.",
  illustration:   None,
};

pub(super) const ECHOMIND: AppDef = AppDef {
  info:           AppInfo {
    slug:        "echomind",
    icon:        "🧠",
    name:        "EchoMind",
    tagline:     "Understand your past self through your old words.",
    description: "Reads your old posts, journals or exports and explains why your past self \
                  thought the way you did.",
  },
  intro:          "Upload your old content: journals, posts, exports. EchoMind explains the \
                   mindset behind it.",
  fields:         &[
    FieldSpec::new(
      "content",
      "Your old content (TXT, PDF, DOCX, JSON)",
      FieldKind::Upload { accept: &["txt", "pdf", "docx", "json"], multiple: true },
    ),
    FieldSpec::new("era", "Roughly when was this written?", FieldKind::Text)
      .hint("e.g. 2015-2020"),
  ],
  requirements:   &[Requirement::new(
    Rule::Upload("content"),
    "Upload some of your old writing first.",
  )],
  notices:        &[],
  pipeline:       Pipeline::Documents(DocumentSpec {
    field:         "content",
    template:      Template(
      "You are an empathetic analyst explaining someone's past mindset.

Content from approximately {era?2015-2020}:
{documents}

Explain why they likely thought this way, considering:
- Their probable age and cognitive stage
- Cultural/trend context of the time
- Emotional tone and language patterns

Be kind, insightful, and specific.",
    ),
    per_file:      10_000,
    total:         10_000,
    headers:       false,
    empty_warning: "No readable text found in files.",
  }),
  submit_label:   "Analyze My Past Self",
  success:        "Analysis complete",
  result_heading: "Why Your Past Self Thought This Way",
  failure_label:  "Analysis failed",
  caption:        "EchoMind offers an interpretation, not a diagnosis.",
  illustration:   None,
};

pub(super) const CHARTSKEPTIC: AppDef = AppDef {
  info:           AppInfo {
    slug:        "chartskeptic",
    icon:        "📊",
    name:        "ChartSkeptic",
    tagline:     "Expose how charts mislead: intended story, hidden truths, deception tactics.",
    description: "Critically analyzes chart and dashboard screenshots, rates deception risk and \
                  compares several charts for conflicts.",
  },
  intro:          "Upload one or more chart or dashboard screenshots. ChartSkeptic analyzes each \
                   individually and, if there are several, compares them for consistency, \
                   correlation, or conflicts.",
  fields:         &[FieldSpec::new("charts", "Chart images (PNG, JPG, PDF)", FieldKind::Upload {
    accept:   &["png", "jpg", "jpeg", "pdf"],
    multiple: true,
  })],
  requirements:   &[Requirement::new(Rule::Upload("charts"), "Upload at least one chart.")],
  notices:        &[],
  pipeline:       Pipeline::Vision(VisionSpec {
    field:    "charts",
    template: Template(
      "You are ChartSkeptic, a sharp, unbiased data visualization analyst for investors, journalists, and analysts.

Analyze this chart/dashboard critically:
1. What main story or message is the creator trying to convey?
2. How could this chart be misleading (e.g., truncated axes, cherry-picked data, confusing scaling, color manipulation)?
3. What important information might be hidden or downplayed unintentionally?
4. Rate deception risk: Low / Medium / High
5. Suggest questions a skeptic should ask

Be specific, evidence-based, and neutral. Reference visible elements (axes, labels, trends).",
    ),
    compare:  Some(Template(
      "You are ChartSkeptic, analyzing multiple charts together.

Here are several charts/dashboards (uploaded as images).

Task:
1. Do these charts tell a consistent story, or are there contradictions?
2. Is there apparent correlation between trends shown (e.g., one variable driving another)?
3. Could the set of charts collectively be misleading (e.g., cherry-picking favorable views)?
4. Overall deception risk across the set: Low / Medium / High
5. Key insights or red flags when viewing them together

Be critical and specific.",
    )),
  }),
  submit_label:   "Analyze Charts",
  success:        "Analysis complete",
  result_heading: "ChartSkeptic Report",
  failure_label:  "Analysis failed",
  caption:        "ChartSkeptic uses Gemini AI vision. Always verify with raw data. Not financial \
                   advice.",
  illustration:   None,
};
