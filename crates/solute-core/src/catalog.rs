//! The app catalog shown on the home page: search and favorites.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, apps};

/// Listing metadata for one app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppInfo {
  /// URL segment, e.g. `"verdict"`.
  pub slug:        &'static str,
  pub icon:        &'static str,
  pub name:        &'static str,
  /// One-line pitch shown under the title.
  pub tagline:     &'static str,
  pub description: &'static str,
}

impl AppInfo {
  /// Case-insensitive substring match over name and description.
  /// `needle` must already be lower-cased.
  fn matches(&self, needle: &str) -> bool {
    self.name.to_lowercase().contains(needle)
      || self.description.to_lowercase().contains(needle)
  }
}

/// Every app in registry order.
pub fn all() -> impl Iterator<Item = &'static AppInfo> {
  apps::registry().iter().map(|def| &def.info)
}

/// Apps whose name or description contains `query`. A blank query keeps all.
pub fn search(query: &str) -> Vec<&'static AppInfo> {
  let needle = query.trim().to_lowercase();
  all().filter(|info| info.matches(&needle)).collect()
}

// ─── Favorites ───────────────────────────────────────────────────────────────

/// Per-session bookmarks, kept in the order they were added.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Favorites {
  slugs: Vec<String>,
}

impl Favorites {
  /// Add `slug` if absent, remove it if present. Returns whether the app is
  /// a favorite afterwards.
  pub fn toggle(&mut self, slug: &str) -> Result<bool> {
    if apps::find(slug).is_none() {
      return Err(Error::UnknownApp(slug.to_owned()));
    }
    if let Some(pos) = self.slugs.iter().position(|s| s == slug) {
      self.slugs.remove(pos);
      Ok(false)
    } else {
      self.slugs.push(slug.to_owned());
      Ok(true)
    }
  }

  pub fn contains(&self, slug: &str) -> bool {
    self.slugs.iter().any(|s| s == slug)
  }

  pub fn is_empty(&self) -> bool { self.slugs.is_empty() }

  /// Favorite apps in insertion order.
  pub fn apps(&self) -> Vec<&'static AppInfo> {
    self
      .slugs
      .iter()
      .filter_map(|s| apps::find(s))
      .map(|def| &def.info)
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn blank_query_lists_everything() {
    assert_eq!(search("   ").len(), all().count());
  }

  #[test]
  fn search_is_case_insensitive_over_name_and_description() {
    let hits = search("KILLSHOT");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].slug, "killshot");

    let by_description: Vec<_> =
      search("contract").iter().map(|i| i.slug).collect();
    assert!(by_description.contains(&"clearpact"), "{by_description:?}");
  }

  #[test]
  fn search_without_hits_is_empty() {
    assert!(search("no app is called this").is_empty());
  }

  #[test]
  fn toggle_adds_then_removes() {
    let mut favs = Favorites::default();
    assert!(favs.toggle("verdict").unwrap());
    assert!(favs.toggle("mindgames").unwrap());
    assert!(favs.contains("verdict"));
    let order: Vec<_> = favs.apps().iter().map(|i| i.slug).collect();
    assert_eq!(order, ["verdict", "mindgames"]);

    assert!(!favs.toggle("verdict").unwrap());
    assert!(!favs.contains("verdict"));
  }

  #[test]
  fn toggle_rejects_unknown_slug() {
    let mut favs = Favorites::default();
    assert!(matches!(favs.toggle("nope"), Err(Error::UnknownApp(_))));
    assert!(favs.is_empty());
  }
}
