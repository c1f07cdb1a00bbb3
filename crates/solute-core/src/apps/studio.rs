//! Business and reading apps: reviews, idea stress-tests, book summaries.

use super::{AppDef, Branch, Pipeline, VisionSpec};
use crate::{
  catalog::AppInfo,
  form::{FieldKind, FieldSpec, Requirement, Rule},
  prompt::Template,
};

pub(super) const AFFILIATEFORGE: AppDef = AppDef {
  info:           AppInfo {
    slug:        "affiliateforge",
    icon:        "💰",
    name:        "AffiliateForge",
    tagline:     "AI-generated product reviews for affiliate commissions.",
    description: "Writes persuasive, balanced product reviews with your affiliate link, ready \
                  for a blog, YouTube or social.",
  },
  intro:          "Describe a product and paste your affiliate link. AffiliateForge generates \
                   persuasive, balanced reviews ready for your blog, YouTube, or social.",
  fields:         &[
    FieldSpec::new("product", "Product name", FieldKind::Text),
    FieldSpec::new(
      "description",
      "Product description (features, benefits)",
      FieldKind::TextArea { rows: 6 },
    ),
    FieldSpec::new("link", "Your affiliate link", FieldKind::Text)
      .hint("e.g. https://amazon.com/dp/B123?tag=yourtag"),
    FieldSpec::new(
      "style",
      "Review style",
      FieldKind::Select(&[
        "Enthusiastic Buyer",
        "Balanced Analyst",
        "Comparative (vs competitor)",
        "Storytelling",
      ]),
    ),
    FieldSpec::new(
      "length",
      "Review length",
      FieldKind::Select(&["Short (300 words)", "Medium (600 words)", "Long (1000 words)"]),
    ),
  ],
  requirements:   &[Requirement::new(
    Rule::AllOf(&["product", "link"]),
    "Product name and affiliate link required.",
  )],
  notices:        &[],
  pipeline:       Pipeline::Text(Template(
    "You are AffiliateForge, an expert affiliate marketer writing high-converting product reviews.

Product: {product}
Description: {description?Not provided}
Affiliate link: {link}

Write a {length|lower} review in this style: {style}

Include:
- Engaging intro hook
- Key features and benefits
- Pros and cons (balanced)
- Personal \"why I love it\" touch
- Natural call-to-action with the affiliate link
- SEO-friendly (natural keywords)

Make it persuasive but honest. Format with markdown headings and bullets.",
  )),
  submit_label:   "Generate Review",
  success:        "Review Generated",
  result_heading: "Your Affiliate Review",
  failure_label:  "Generation failed",
  caption:        "Always disclose affiliate links per FTC guidelines.",
  illustration:   None,
};

pub(super) const KILLSHOT: AppDef = AppDef {
  info:           AppInfo {
    slug:        "killshot",
    icon:        "💀",
    name:        "KillShot",
    tagline:     "The anti-pitch tool that tries to destroy your startup idea.",
    description: "A ruthless investor, competitor and reality check in one: ranks the fatal \
                  flaws of a startup idea and estimates its survival odds.",
  },
  intro:          "Warning: this tool is designed to be brutal. It plays a ruthless investor, \
                   competitor, and reality itself, all trying to kill your idea.",
  fields:         &[
    FieldSpec::new("name", "Idea name (optional)", FieldKind::Text),
    FieldSpec::new(
      "description",
      "What is the idea? (be specific)",
      FieldKind::TextArea { rows: 6 },
    ),
    FieldSpec::new("target", "Who is the target customer?", FieldKind::Text),
    FieldSpec::new("pricing", "Pricing model", FieldKind::Text),
    FieldSpec::new(
      "assumption",
      "Biggest assumption you're making",
      FieldKind::TextArea { rows: 4 },
    ),
  ],
  requirements:   &[Requirement::new(Rule::Filled("description"), "Describe your idea first.")],
  notices:        &[],
  pipeline:       Pipeline::Text(Template(
    "You are KillShot, a ruthless, no-mercy startup assassin.
Your job is to DESTROY this idea with cold, realistic criticism.

Idea: {name?Unnamed}
Description: {description}
Target users: {target?Not specified}
Pricing: {pricing?Not specified}
Key assumption: {assumption?Not specified}

Attack from every angle:
- Why most users will be apathetic or ignore it
- Pricing resistance and willingness to pay
- Operational and execution failure points
- Competition and market timing
- Technical, legal, or distribution risks
- Founder blind spots

Rank the top 5 fatal flaws.
Give a survival probability (0-100%).
End with: if it somehow survives, one reason it might actually work.

Be brutal, specific, and evidence-based. No sugarcoating.",
  )),
  submit_label:   "🔫 Fire KillShot",
  success:        "Target eliminated... or is it?",
  result_heading: "KillShot Report",
  failure_label:  "KillShot jammed",
  caption:        "KillShot stress-tests ideas. Survive the critique and your idea might be \
                   bulletproof.",
  illustration:   None,
};

const SUMMARILY_SEARCH: Template = Template(
  "You are Summarily, an expert book summarizer with knowledge of published books.

Book details:
Title: {title}
Author: {author?Not provided}
Publisher: {publisher?Not provided}
Publication year: {year?Not provided}
Sample lines: {sample?None}

Provide:
- Chapter-by-chapter summary (or major sections if non-fiction)
- Key themes, quotes, and takeaways
- Overall book message

If multiple editions exist, summarize the most common one.
If unsure or author missing, note limitations and do your best.
Structure clearly with headings.",
);

const SUMMARILY_UPLOAD: Template = Template(
  "You are Summarily, an expert book summarizer.

This is a book file (PDF, DOCX, or scanned images).

Task:
- Identify chapters or major sections
- Summarize each chapter concisely (3-5 key points)
- Provide overall book summary and themes at the end
- Include key quotes if notable

Be accurate and insightful.",
);

pub(super) const SUMMARILY: AppDef = AppDef {
  info:           AppInfo {
    slug:        "summarily",
    icon:        "📚",
    name:        "Summarily",
    tagline:     "Chapter-by-chapter book summaries: upload or search.",
    description: "Summarizes a book chapter by chapter from an uploaded PDF, DOCX or scanned \
                  pages, or from its title and author.",
  },
  intro:          "Search by title and author, or upload the book itself (PDF, DOCX, or images \
                   of scanned pages).",
  fields:         &[
    FieldSpec::new(
      "mode",
      "How do you want to summarize?",
      FieldKind::Select(&["Search by details", "Upload a book file"]),
    ),
    FieldSpec::new("title", "Book title (required for search)", FieldKind::Text),
    FieldSpec::new("author", "Author name (optional)", FieldKind::Text),
    FieldSpec::new("publisher", "Publisher (optional)", FieldKind::Text),
    FieldSpec::new("year", "Publication year (optional)", FieldKind::Text),
    FieldSpec::new(
      "sample",
      "A few lines from any chapter (optional, helps accuracy)",
      FieldKind::TextArea { rows: 4 },
    ),
    FieldSpec::new("book", "Book file (PDF, DOCX, or image)", FieldKind::Upload {
      accept:   &["pdf", "docx", "jpg", "jpeg", "png"],
      multiple: false,
    }),
  ],
  requirements:   &[],
  notices:        &[],
  pipeline:       Pipeline::Switch {
    field:    "mode",
    branches: &[
      Branch {
        value:          "Search by details",
        requirements:   &[Requirement::new(Rule::Filled("title"), "Title is required.")],
        pipeline:       Pipeline::Text(SUMMARILY_SEARCH),
        result_heading: "Book Summary",
      },
      Branch {
        value:          "Upload a book file",
        requirements:   &[Requirement::new(Rule::Upload("book"), "Upload a book file first.")],
        pipeline:       Pipeline::Vision(VisionSpec {
          field:    "book",
          template: SUMMARILY_UPLOAD,
          compare:  None,
        }),
        result_heading: "Chapter-by-Chapter Summary",
      },
    ],
  },
  submit_label:   "Generate Summary",
  success:        "Summary complete",
  result_heading: "Book Summary",
  failure_label:  "Summarization failed",
  caption:        "Summaries are generated by Gemini AI and may miss details of specific editions.",
  illustration:   None,
};
