//! The app registry: every app's form, requirements and pipeline.
//!
//! Apps are plain data. A handler looks an app up by slug, normalises the
//! submitted form against [`AppDef::fields`], checks
//! [`AppDef::requirements`], then runs its [`Pipeline`].

mod creative;
mod documents;
mod reflect;
mod studio;
mod workspaces;

use serde::Serialize;

use crate::{
  backend::Capabilities,
  catalog::AppInfo,
  form::{FieldSpec, FormInput, Notice, Requirement, first_unmet},
  prompt::Template,
};

/// One registered app.
#[derive(Debug, Clone, Copy)]
pub struct AppDef {
  pub info:           AppInfo,
  /// The explanatory banner above the form.
  pub intro:          &'static str,
  pub fields:         &'static [FieldSpec],
  pub requirements:   &'static [Requirement],
  pub notices:        &'static [Notice],
  pub pipeline:       Pipeline,
  pub submit_label:   &'static str,
  /// Banner shown above a successful result.
  pub success:        &'static str,
  pub result_heading: &'static str,
  /// Prefix of the inline error when an external call fails.
  pub failure_label:  &'static str,
  /// Disclaimer under the result.
  pub caption:        &'static str,
  pub illustration:   Option<Illustration>,
}

impl AppDef {
  pub fn slug(&self) -> &'static str { self.info.slug }

  /// File name for the markdown download of the last result.
  pub fn download_name(&self) -> String { format!("{}.md", self.info.slug) }

  /// The first blocking problem with `input`, checking the app's own
  /// requirements and then those of the selected branch.
  pub fn validate(&self, input: &FormInput) -> Option<&'static str> {
    first_unmet(self.requirements, input).or_else(|| match self.pipeline.resolve(input) {
      Some((branch, _)) => branch.and_then(|b| first_unmet(b.requirements, input)),
      None => None,
    })
  }

  /// Informational messages for `input`.
  pub fn notices_for(&self, input: &FormInput) -> Vec<&'static str> {
    self.notices.iter().filter_map(|n| n.message_for(input)).collect()
  }

  /// Whether the form can be shown at all given the configured services.
  /// Apps that need a missing service on every path are blocked.
  pub fn unavailable(&self, caps: Capabilities) -> Option<&'static str> {
    match self.pipeline {
      Pipeline::Switch { branches, .. } => {
        let reasons: Vec<_> =
          branches.iter().filter_map(|b| b.pipeline.missing_service(caps)).collect();
        if reasons.len() == branches.len() { reasons.first().copied() } else { None }
      }
      ref other => other.missing_service(caps),
    }
  }
}

/// What an app does with a validated form.
#[derive(Debug, Clone, Copy)]
pub enum Pipeline {
  /// Render the template and send it as a text prompt.
  Text(Template),
  /// Extract text from uploads, expose it as `{documents}` and send a text
  /// prompt.
  Documents(DocumentSpec),
  /// Attach uploads inline and send them with the template.
  Vision(VisionSpec),
  /// Run the image-generation model.
  Images(ImageSpec),
  /// Strip the background of one uploaded image.
  BackgroundRemoval { field: &'static str },
  /// Pick a sub-pipeline by the value of a select field.
  Switch {
    field:    &'static str,
    branches: &'static [Branch],
  },
  /// A session-held collection with its own page.
  Workspace(WorkspaceKind),
  /// The MindGames pages.
  Games,
}

impl Pipeline {
  /// The concrete pipeline for `input`, with the branch that selected it.
  /// `None` when a switch value matches no branch.
  pub fn resolve(&self, input: &FormInput) -> Option<(Option<&'static Branch>, Pipeline)> {
    match *self {
      Pipeline::Switch { field, branches } => {
        let value = input.get(field);
        branches.iter().find(|b| b.value == value).map(|b| (Some(b), b.pipeline))
      }
      other => Some((None, other)),
    }
  }

  /// Configuration message when this pipeline needs a service that has no
  /// credentials.
  pub fn missing_service(&self, caps: Capabilities) -> Option<&'static str> {
    match self {
      Pipeline::Images(_) if !caps.image_generation => {
        Some("Replicate API token not found. Add REPLICATE_API_TOKEN to the secrets file.")
      }
      Pipeline::BackgroundRemoval { .. } if !caps.background_removal => {
        Some("remove.bg API key not found. Add REMOVEBG_API_KEY to the secrets file.")
      }
      _ => None,
    }
  }
}

/// One arm of a [`Pipeline::Switch`].
#[derive(Debug, Clone, Copy)]
pub struct Branch {
  pub value:          &'static str,
  pub requirements:   &'static [Requirement],
  pub pipeline:       Pipeline,
  /// Replaces [`AppDef::result_heading`] when non-empty.
  pub result_heading: &'static str,
}

/// Upload-to-text settings.
#[derive(Debug, Clone, Copy)]
pub struct DocumentSpec {
  pub field:         &'static str,
  pub template:      Template,
  /// Characters kept from each file.
  pub per_file:      usize,
  /// Characters kept from the combined text.
  pub total:         usize,
  /// Prefix each file with `--- From <name> ---`.
  pub headers:       bool,
  /// Warning when no file yielded any text.
  pub empty_warning: &'static str,
}

/// Inline-attachment settings.
#[derive(Debug, Clone, Copy)]
pub struct VisionSpec {
  pub field:    &'static str,
  /// Sent once per upload.
  pub template: Template,
  /// Sent once with every upload when there is more than one.
  pub compare:  Option<Template>,
}

#[derive(Debug, Clone, Copy)]
pub struct ImageSpec {
  pub template:      Template,
  pub count:         ImageCount,
  pub aspect_ratio:  &'static str,
  pub output_format: &'static str,
  /// Also show each image on a t-shirt mockup.
  pub mockup:        bool,
}

#[derive(Debug, Clone, Copy)]
pub enum ImageCount {
  Fixed(u8),
  /// Read from a slider field.
  Field(&'static str),
}

impl ImageSpec {
  pub fn count_for(&self, input: &FormInput) -> u8 {
    match self.count {
      ImageCount::Fixed(n) => n,
      ImageCount::Field(name) => input.int(name, 1, 4, 1) as u8,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WorkspaceKind {
  Notes,
  Skills,
  Tasks,
  Surveys,
}

/// A static bar chart drawn under the result.
#[derive(Debug, Clone, Copy)]
pub struct Illustration {
  pub title: &'static str,
  pub bars:  &'static [(&'static str, u32)],
  pub note:  &'static str,
}

static REGISTRY: &[AppDef] = &[
  reflect::VERDICT,
  reflect::TONEBRIDGE,
  reflect::FAILFORWARD,
  reflect::REGRETMIRROR,
  reflect::FUTUREYOU,
  reflect::BUBBLESCOPE,
  studio::AFFILIATEFORGE,
  studio::KILLSHOT,
  studio::SUMMARILY,
  documents::CLEARPACT,
  documents::GHOSTREPLY,
  documents::ECHOMIND,
  documents::CHARTSKEPTIC,
  creative::AFROFORGE,
  creative::PERSONALFORGE,
  creative::BGFORGE,
  workspaces::CONTRAMIND,
  workspaces::SKILLRUST,
  workspaces::ASSISTFORGE,
  workspaces::SURVEYFORGE,
  workspaces::MINDGAMES,
];

/// Every app in home-page order.
pub fn registry() -> &'static [AppDef] { REGISTRY }

pub fn find(slug: &str) -> Option<&'static AppDef> { REGISTRY.iter().find(|a| a.info.slug == slug) }

/// The registered app using the given workspace.
pub fn workspace(kind: WorkspaceKind) -> Option<&'static AppDef> {
  REGISTRY
    .iter()
    .find(|a| matches!(a.pipeline, Pipeline::Workspace(k) if k == kind))
}
