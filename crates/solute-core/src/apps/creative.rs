//! Image apps: print-on-demand designs, personal products, background removal.

use super::{AppDef, Branch, ImageCount, ImageSpec, Pipeline};
use crate::{
  catalog::AppInfo,
  form::{FieldKind, FieldSpec, Requirement, Rule},
  prompt::Template,
};

pub(super) const AFROFORGE: AppDef = AppDef {
  info:           AppInfo {
    slug:        "afroforge",
    icon:        "🌍",
    name:        "AfroForge",
    tagline:     "AI-powered Afrocentric print-on-demand designs.",
    description: "Generates Afrocentric artwork for t-shirts, hoodies and posters from a design \
                  idea, with a quick mockup preview.",
  },
  intro:          "Describe an Afrocentric design idea. AfroForge generates artwork optimized for \
                   clothing, art, and accessories.",
  fields:         &[
    FieldSpec::new("idea", "Design idea", FieldKind::TextArea { rows: 6 })
      .hint("e.g. Modern Ankara pattern t-shirt with Adinkra wisdom symbols and vibrant colors"),
    FieldSpec::new(
      "style",
      "Style vibe",
      FieldKind::Select(&[
        "Vibrant and bold",
        "Minimalist and elegant",
        "Traditional with modern twist",
        "Streetwear urban",
        "Abstract geometric",
      ]),
    ),
    FieldSpec::new("variants", "Number of variants", FieldKind::Slider {
      min:     1,
      max:     4,
      default: 2,
    }),
  ],
  requirements:   &[Requirement::new(Rule::Filled("idea"), "Enter a design idea first.")],
  notices:        &[],
  pipeline:       Pipeline::Images(ImageSpec {
    template:      Template(
      "Afrocentric print-on-demand design: {idea}. {style}. High resolution, suitable for \
       t-shirts, hoodies, posters. Rich African cultural elements, patterns, symbols.",
    ),
    count:         ImageCount::Field("variants"),
    aspect_ratio:  "1:1",
    output_format: "png",
    mockup:        true,
  }),
  submit_label:   "Forge Designs",
  success:        "Designs forged!",
  result_heading: "Your Designs",
  failure_label:  "Design generation failed",
  caption:        "AfroForge uses Flux AI via Replicate. Designs are AI-generated and \
                   royalty-free for POD use.",
  illustration:   None,
};

pub(super) const PERSONALFORGE: AppDef = AppDef {
  info:           AppInfo {
    slug:        "personalforge",
    icon:        "✨",
    name:        "PersonalForge",
    tagline:     "AI-generated personalized digital products, just for you.",
    description: "Creates a custom phone wallpaper, a 7-day planner or a short ebook tailored to \
                  your interests.",
  },
  intro:          "Choose a product, add your details, and PersonalForge creates something \
                   uniquely yours.",
  fields:         &[
    FieldSpec::new(
      "product",
      "Product type",
      FieldKind::Select(&["Custom Wallpaper", "Personalized Planner", "Short Custom Ebook"]),
    ),
    FieldSpec::new("name", "Your name (optional)", FieldKind::Text),
    FieldSpec::new(
      "interests",
      "Your interests, goals, or vibe",
      FieldKind::TextArea { rows: 4 },
    )
    .hint("e.g. motivation, nature, minimalism"),
  ],
  requirements:   &[Requirement::new(
    Rule::Filled("interests"),
    "Share your interests for better personalization.",
  )],
  notices:        &[],
  pipeline:       Pipeline::Switch {
    field:    "product",
    branches: &[
      Branch {
        value:          "Custom Wallpaper",
        requirements:   &[],
        pipeline:       Pipeline::Images(ImageSpec {
          template:      Template(
            "High-resolution phone wallpaper: {interests}. Personal touch for {name?someone \
             special}. Beautiful, aesthetic, vibrant colors, no text.",
          ),
          count:         ImageCount::Fixed(1),
          aspect_ratio:  "9:16",
          output_format: "png",
          mockup:        false,
        }),
        result_heading: "Your Personal Wallpaper",
      },
      Branch {
        value:          "Personalized Planner",
        requirements:   &[],
        pipeline:       Pipeline::Text(Template(
          "Create a simple 7-day personal planner for {name?me} with interests in {interests}.

Include:
- Daily motivation quote
- Goal section
- To-do list
- Gratitude spot
- Evening reflection

Make it encouraging and tailored.",
        )),
        result_heading: "Your Personalized Planner",
      },
      Branch {
        value:          "Short Custom Ebook",
        requirements:   &[],
        pipeline:       Pipeline::Text(Template(
          "Write a short 1000-word custom ebook/story/guide for {name?me} focused on {interests}.
Make it inspiring, personal, and valuable.
Structure with chapters and actionable advice.",
        )),
        result_heading: "Your Custom Ebook",
      },
    ],
  },
  submit_label:   "Forge My Product",
  success:        "Product forged!",
  result_heading: "Your Product",
  failure_label:  "Generation failed",
  caption:        "PersonalForge uses Gemini & Flux AI. Uniquely yours.",
  illustration:   None,
};

pub(super) const BGFORGE: AppDef = AppDef {
  info:           AppInfo {
    slug:        "bgforge",
    icon:        "🖼️",
    name:        "BgForge",
    tagline:     "Background remover & replacer.",
    description: "Removes the background of a photo with remove.bg and previews it on a new \
                  solid-color background.",
  },
  intro:          "Upload a PNG, JPG or WEBP image (about 5 MB max on the free remove.bg tier).",
  fields:         &[
    FieldSpec::new("image", "Your image (PNG/JPG/WEBP)", FieldKind::Upload {
      accept:   &["png", "jpg", "jpeg", "webp"],
      multiple: false,
    }),
    FieldSpec::new(
      "mode",
      "What would you like to do?",
      FieldKind::Select(&["Remove background only", "Replace background"]),
    ),
    FieldSpec::new("color", "New background color", FieldKind::Color { default: "#00ff9d" }),
  ],
  requirements:   &[Requirement::new(Rule::Upload("image"), "Upload an image first.")],
  notices:        &[],
  pipeline:       Pipeline::BackgroundRemoval { field: "image" },
  submit_label:   "✂️ Process Image",
  success:        "Background removed",
  result_heading: "Result",
  failure_label:  "Request failed",
  caption:        "The free remove.bg plan has limits (50 credits/month, about 625×400px max \
                   resolution).",
  illustration:   None,
};
