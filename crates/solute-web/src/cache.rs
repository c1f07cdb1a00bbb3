//! Cache of background-removal results.
//!
//! Keys are the hex SHA-256 of the uploaded bytes, so re-submitting the same
//! image within the TTL does not spend another remove.bg credit.

use std::{
  sync::Arc,
  time::{Duration, Instant},
};

use dashmap::DashMap;
use sha2::{Digest, Sha256};

pub const TTL: Duration = Duration::from_secs(60 * 60);

/// Content hash used as the cache key.
pub fn content_key(bytes: &[u8]) -> String { hex::encode(Sha256::digest(bytes)) }

#[derive(Default)]
pub struct CutoutCache {
  entries: DashMap<String, (Instant, Arc<Vec<u8>>)>,
}

impl CutoutCache {
  /// The cached PNG for `key`, if stored less than [`TTL`] before `now`.
  pub fn get(&self, key: &str, now: Instant) -> Option<Arc<Vec<u8>>> {
    let entry = self.entries.get(key)?;
    let (stored, png) = entry.value();
    (now.saturating_duration_since(*stored) < TTL).then(|| png.clone())
  }

  /// Store `png` and drop every expired entry.
  pub fn insert(&self, key: String, png: Vec<u8>, now: Instant) -> Arc<Vec<u8>> {
    self
      .entries
      .retain(|_, (stored, _)| now.saturating_duration_since(*stored) < TTL);
    let png = Arc::new(png);
    self.entries.insert(key, (now, png.clone()));
    png
  }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn key_is_hex_sha256() {
    assert_eq!(
      content_key(b"abc"),
      "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
  }

  #[test]
  fn entries_expire_after_the_ttl() {
    let cache = CutoutCache::default();
    let t0 = Instant::now();
    cache.insert("k".into(), vec![1, 2], t0);

    assert_eq!(cache.get("k", t0 + Duration::from_secs(59 * 60)).as_deref(), Some(&vec![1, 2]));
    assert!(cache.get("k", t0 + TTL).is_none());
    assert!(cache.get("other", t0).is_none());
  }

  #[test]
  fn insert_evicts_expired_entries() {
    let cache = CutoutCache::default();
    let t0 = Instant::now();
    cache.insert("old".into(), vec![0], t0);
    cache.insert("new".into(), vec![1], t0 + TTL + Duration::from_secs(1));
    assert_eq!(cache.len(), 1);
  }
}
