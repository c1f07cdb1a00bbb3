//! Reflection apps: decisions, tone, failures, regrets, emails, bubbles.

use super::{AppDef, Illustration, Pipeline};
use crate::{
  catalog::AppInfo,
  form::{FieldKind, FieldSpec, Notice, Requirement, Rule},
  prompt::Template,
};

const CULTURES: &[&str] = &[
  "United States",
  "Japan",
  "Germany",
  "India",
  "Brazil",
  "United Kingdom",
  "France",
  "China",
  "South Korea",
  "Mexico",
  "Netherlands",
  "Sweden",
  "Australia",
  "Canada",
  "Singapore",
  "Other",
];

pub(super) const VERDICT: AppDef = AppDef {
  info:           AppInfo {
    slug:        "verdict",
    icon:        "⚖️",
    name:        "Verdict",
    tagline:     "Evaluate the quality of your past decisions, not the outcome.",
    description: "Reconstructs what you knew at the time, flags biases and missing information, \
                  and judges whether a past decision was reasonable.",
  },
  intro:          "Verdict analyzes what you knew at the time, identifies biases and missing \
                   information, and judges if the decision was reasonable even if things went \
                   wrong.",
  fields:         &[
    FieldSpec::new("decision", "1. What was the decision?", FieldKind::TextArea { rows: 4 })
      .hint("e.g. 'I invested in crypto in 2021', 'I took that job offer'"),
    FieldSpec::new("when", "2. When did you make it?", FieldKind::Text)
      .hint("Approximate date or year, e.g. 'March 2021'"),
    FieldSpec::new("outcome", "3. What was the actual outcome?", FieldKind::TextArea { rows: 4 })
      .hint("Briefly describe what happened (good or bad)"),
    FieldSpec::new(
      "knowledge",
      "4. What did you know or believe at the time?",
      FieldKind::TextArea { rows: 6 },
    )
    .hint("Key facts, beliefs, advice you had (or 'I don't remember much')"),
    FieldSpec::new("goals", "5. What were your main goals or fears?", FieldKind::TextArea {
      rows: 4,
    })
    .hint("What were you hoping to achieve or avoid?"),
  ],
  requirements:   &[Requirement::new(Rule::Filled("decision"), "Please describe the decision.")],
  notices:        &[],
  pipeline:       Pipeline::Text(Template(
    "You are Verdict, a fair, empathetic decision analyst.

User's past decision:
- Decision: {decision}
- Made in: {when?Not specified}
- Outcome: {outcome?Not specified}
- Known at the time: {knowledge?Not specified}
- Goals/fears: {goals?Not specified}

Analyze this decision as if you are reviewing it WITHOUT hindsight.
Your job is to evaluate the QUALITY of the decision based ONLY on what was reasonably knowable at the time.

Step by step:
1. List the key assumptions the user likely made.
2. Identify information that was missing (but note if it was reasonably unknowable then).
3. Detect possible cognitive biases (e.g., overconfidence, anchoring, confirmation bias).
4. Consider personal and cultural context of that time.

Then give a clear verdict:
- Was this a reasonable decision given what was known?
- What made it strong or weak?
- One key lesson for future decisions.

Be kind, non-judgmental, and insightful. Use \"you\" to speak directly to the user.",
  )),
  submit_label:   "Get Verdict",
  success:        "Verdict complete",
  result_heading: "Your Decision Autopsy",
  failure_label:  "Analysis failed",
  caption:        "Verdict uses AI to reconstruct mindset. This is an informed reflection, not \
                   absolute truth.",
  illustration:   None,
};

pub(super) const TONEBRIDGE: AppDef = AppDef {
  info:           AppInfo {
    slug:        "tonebridge",
    icon:        "🌍",
    name:        "ToneBridge",
    tagline:     "Not language translation: cultural intent translation for global teams.",
    description: "Shows how a message lands in another culture and suggests better phrasing \
                  for remote teams.",
  },
  intro:          "Paste a message. ToneBridge shows how it lands in another culture and suggests \
                   better phrasing.",
  fields:         &[
    FieldSpec::new("sender", "Sender's cultural background", FieldKind::Select(CULTURES)),
    FieldSpec::new("receiver", "Receiver's cultural background", FieldKind::Select(CULTURES))
      .preset("Japan"),
    FieldSpec::new("message", "Message (e.g. Slack, email)", FieldKind::TextArea { rows: 6 })
      .hint("We need this done by tomorrow."),
  ],
  requirements:   &[Requirement::new(Rule::Filled("message"), "Enter a message first.")],
  notices:        &[Notice::SameValue {
    a:       "sender",
    b:       "receiver",
    message: "Same culture selected. Minimal translation needed, but here's a neutral analysis.",
  }],
  pipeline:       Pipeline::Text(Template(
    "You are ToneBridge, an expert in cross-cultural communication for global remote teams.

Message: \"{message}\"
Sent from someone in: {sender}
Received by someone in: {receiver}

Analyze:
1. How does this message likely sound to the receiver? (direct, polite, rude, passive, urgent, etc.)
2. What intent does the sender probably have?
3. Are there cultural mismatches in tone, directness, hierarchy, or urgency?
4. Suggest 2-3 rephrased versions that preserve intent but land better in receiver's culture.
5. Flag any high-risk phrases.

Be specific, empathetic, and practical. Use real cultural communication norms.",
  )),
  submit_label:   "Translate Tone",
  success:        "Cultural Translation Complete",
  result_heading: "How This Message Lands",
  failure_label:  "Analysis failed",
  caption:        "ToneBridge uses Gemini AI. Always review for nuance; it is not a substitute \
                   for cultural awareness.",
  illustration:   None,
};

pub(super) const FAILFORWARD: AppDef = AppDef {
  info:           AppInfo {
    slug:        "failforward",
    icon:        "🔥",
    name:        "FailForward",
    tagline:     "Turn your failures into your greatest strengths.",
    description: "Reframes mistakes, failures and abandoned projects as a reverse resume of \
                  learning, resilience and risk tolerance.",
  },
  intro:          "List your mistakes, failures, and abandoned projects. FailForward reframes \
                   them as learning, resilience, and risk tolerance.",
  fields:         &[
    FieldSpec::new(
      "failures",
      "Your failures & mistakes",
      FieldKind::TextArea { rows: 8 },
    )
    .hint(
      "e.g.\n- Launched a product that got 0 users\n- Invested in crypto at the peak\n- Quit a \
       stable job for an idea that flopped",
    ),
    FieldSpec::new("context", "Optional context", FieldKind::TextArea { rows: 4 })
      .hint("e.g. 2021 crypto crash: lost 80%, felt devastated but learned about market cycles"),
  ],
  requirements:   &[Requirement::new(
    Rule::Filled("failures"),
    "Please share at least one failure.",
  )],
  notices:        &[],
  pipeline:       Pipeline::Text(Template(
    "You are FailForward, a career coach for founders, creatives, and unconventional candidates.

The user has shared their failures and mistakes:
{failures}

Additional context:
{context?None provided}

Convert this into a professional 'reverse resume' that highlights:
- Key learnings and growth
- Resilience and adaptability
- Risk tolerance and bold thinking
- Pattern recognition and wisdom gained

Structure as a clean, positive resume section with:
- Bullet points
- Strong action verbs
- No judgment, only empowerment

Tone: Confident, authentic, inspiring.",
  )),
  submit_label:   "Generate Reverse Resume",
  success:        "Reverse Resume Generated",
  result_heading: "Your FailForward Profile",
  failure_label:  "Generation failed",
  caption:        "FailForward uses Gemini AI to reframe experience. This is your story, \
                   powerfully told.",
  illustration:   None,
};

pub(super) const REGRETMIRROR: AppDef = AppDef {
  info:           AppInfo {
    slug:        "regretmirror",
    icon:        "🪞",
    name:        "RegretMirror",
    tagline:     "See your life from the deathbed: what you'll regret, what you'll be proud of.",
    description: "Your future self reflects on today's priorities and habits, inspired by the \
                  real regrets of the dying.",
  },
  intro:          "This app simulates your future self at the end of life reflecting on today's \
                   choices. Use it for clarity, not fear.",
  fields:         &[
    FieldSpec::new(
      "priorities",
      "Your current priorities (what matters most right now)",
      FieldKind::TextArea { rows: 6 },
    )
    .hint("e.g. Career success, family time, health, creative projects, financial security"),
    FieldSpec::new("habits", "Your daily habits and routine", FieldKind::TextArea { rows: 6 })
      .hint("e.g. Work 10 hours/day, scroll social media 2 hours, exercise 3x/week"),
  ],
  requirements:   &[Requirement::new(
    Rule::AllOf(&["priorities", "habits"]),
    "Share both priorities and habits for a meaningful reflection.",
  )],
  notices:        &[],
  pipeline:       Pipeline::Text(Template(
    "You are RegretMirror, speaking as the user's future self on their deathbed, looking back.

Current priorities: {priorities}
Daily habits: {habits}

Reflect honestly but kindly:
- Which of today's choices will I likely regret? (reference common deathbed regrets: not living true to self, working too hard, not expressing feelings, losing touch with friends, not allowing happiness)
- Which choices will I be proud of and grateful for?
- What small adjustments today would make the biggest difference?

Speak as \"I\" (future self). Be profound, empathetic, and specific.
Structure: Opening reflection + Regrets + Pride + Gentle advice.",
  )),
  submit_label:   "Show Me the Mirror",
  success:        "Message from your future self",
  result_heading: "RegretMirror Reflection",
  failure_label:  "Reflection failed",
  caption:        "RegretMirror is inspired by Bronnie Ware's Top 5 Regrets of the Dying. This is \
                   a simulation for perspective.",
  illustration:   None,
};

pub(super) const FUTUREYOU: AppDef = AppDef {
  info:           AppInfo {
    slug:        "futureyou",
    icon:        "⏳",
    name:        "FutureYou",
    tagline:     "Before sending that risky email, see how future you might regret it.",
    description: "Simulates how you'll feel about a sensitive email draft weeks or months from \
                  now, with a regret-risk rating.",
  },
  intro:          "Paste a sensitive, emotional, or high-stakes email draft. FutureYou simulates \
                   how you'll feel reading it in the future.",
  fields:         &[
    FieldSpec::new("email", "Email draft", FieldKind::TextArea { rows: 8 })
      .hint("Paste your email here..."),
    FieldSpec::new(
      "horizon",
      "Time horizon (days)",
      FieldKind::Select(&["30", "90", "180", "365"]),
    )
    .preset("90"),
    FieldSpec::new(
      "context",
      "Optional context (relationship, stakes)",
      FieldKind::TextArea { rows: 4 },
    )
    .hint("e.g. This is to my boss after a bad review"),
  ],
  requirements:   &[Requirement::new(Rule::Filled("email"), "Paste an email draft first.")],
  notices:        &[],
  pipeline:       Pipeline::Text(Template(
    "You are FutureYou, the user's self {horizon} days from now.

The user is about to send this email:
\"{email}\"

Context: {context?None provided}

Your job:
- Imagine reading this email {horizon} days later.
- How would you feel? (regret, relief, embarrassment, pride?)
- What might have changed in that time?
- Rate regret risk: Low / Medium / High
- Suggest: send as-is, edit, or sleep on it

Be honest but kind. Speak as \"I\" (future self).",
  )),
  submit_label:   "Consult FutureYou",
  success:        "Message from FutureYou",
  result_heading: "How I'll Feel About This Email",
  failure_label:  "Connection to future self failed",
  caption:        "FutureYou is a simulation to help you pause and reflect.",
  illustration:   None,
};

pub(super) const BUBBLESCOPE: AppDef = AppDef {
  info:           AppInfo {
    slug:        "bubblescope",
    icon:        "🔍",
    name:        "BubbleScope",
    tagline:     "See the shape of your filter bubble and what is hidden beyond it.",
    description: "Maps the blind spots of your news sources and topics, with hidden viewpoints \
                  and ways to broaden your information diet.",
  },
  intro:          "Describe your main news sources and topics. BubbleScope analyzes potential \
                   blind spots, hidden viewpoints, and ways to broaden your information exposure.",
  fields:         &[
    FieldSpec::new("sources", "Your main sources and platforms", FieldKind::TextArea { rows: 4 })
      .hint("Example: Twitter (tech influencers), Reddit (r/technology), NYT"),
    FieldSpec::new("topics", "Topics you follow most", FieldKind::TextArea { rows: 4 })
      .hint("Example: AI, climate change, US politics, crypto"),
    FieldSpec::new(
      "lean",
      "Perceived political or cultural lean (optional)",
      FieldKind::Select(&[
        "Not specified",
        "Left",
        "Center-Left",
        "Center",
        "Center-Right",
        "Right",
      ]),
    ),
  ],
  requirements:   &[Requirement::new(
    Rule::AnyOf(&["sources", "topics"]),
    "Please provide at least sources or topics.",
  )],
  notices:        &[],
  pipeline:       Pipeline::Text(Template(
    "You are BubbleScope, an unbiased analyst of information ecosystems.

User information:
- Sources and platforms: {sources?Not provided}
- Main topics followed: {topics?Not provided}
- Self-described lean: {lean}

Analyze the user's information bubble:
1. Which perspectives, stories, or viewpoints are likely hidden or downranked.
2. The overall shape of their bubble (ideological skew, topic silos, diversity).
3. Five specific examples of content or viewpoints they likely never see.
4. Three concrete suggestions (sources or searches) to broaden exposure.

Be neutral, specific, and constructive. Avoid judgment.",
  )),
  submit_label:   "Scope My Bubble",
  success:        "Bubble mapped successfully",
  result_heading: "Your Filter Bubble Analysis",
  failure_label:  "Analysis failed",
  caption:        "BubbleScope uses Gemini AI. This is an educated estimate based on your inputs.",
  illustration:   Some(Illustration {
    title: "Estimated Exposure Spectrum (Illustrative)",
    bars:  &[("Far Left", 20), ("Left", 55), ("Center", 15), ("Right", 8), ("Far Right", 2)],
    note:  "This visualization is an illustrative estimate based on your inputs, not a measured \
            political profile.",
  }),
};
