//! Memo tables for resolved guide content.

use std::sync::Arc;

use dashmap::DashMap;

use crate::guide::{Guide, GuideMeta, Locale};

/// Process-lifetime memo of resolved metadata and guide bodies.
///
/// `None` records a resolved not-found so repeated misses skip the disk.
/// Entries are never invalidated; content is assumed immutable for the
/// lifetime of the cache. Concurrent inserts of one key are last-writer-wins.
#[derive(Debug, Default)]
pub struct ContentCache {
    metadata: DashMap<String, Option<Arc<GuideMeta>>>,
    guides: DashMap<(String, Locale), Option<Arc<Guide>>>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_metadata(&self, slug: &str) -> Option<Option<Arc<GuideMeta>>> {
        self.metadata.get(slug).map(|entry| entry.value().clone())
    }

    pub fn set_metadata(&self, slug: &str, meta: Option<Arc<GuideMeta>>) {
        self.metadata.insert(slug.to_string(), meta);
    }

    pub fn get_guide(&self, slug: &str, locale: Locale) -> Option<Option<Arc<Guide>>> {
        self.guides
            .get(&(slug.to_string(), locale))
            .map(|entry| entry.value().clone())
    }

    pub fn set_guide(&self, slug: &str, locale: Locale, guide: Option<Arc<Guide>>) {
        self.guides.insert((slug.to_string(), locale), guide);
    }

    /// Number of cached metadata outcomes, hits and misses alike.
    pub fn metadata_len(&self) -> usize {
        self.metadata.len()
    }

    pub fn guide_len(&self) -> usize {
        self.guides.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_negative_entries() {
        let cache = ContentCache::new();

        assert_eq!(cache.get_metadata("missing"), None);

        cache.set_metadata("missing", None);

        assert_eq!(cache.get_metadata("missing"), Some(None));
        assert_eq!(cache.metadata_len(), 1);
    }

    #[test]
    fn guide_entries_are_keyed_by_locale() {
        let cache = ContentCache::new();

        cache.set_guide("gcp-vision-setup", Locale::En, None);

        assert_eq!(cache.get_guide("gcp-vision-setup", Locale::En), Some(None));
        assert_eq!(cache.get_guide("gcp-vision-setup", Locale::Ko), None);
        assert_eq!(cache.guide_len(), 1);
    }
}
