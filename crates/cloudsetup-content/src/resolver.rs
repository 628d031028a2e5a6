//! Content resolution with publication gating and memoization.
//!
//! Content root layout:
//!
//! ```text
//! content/guides/
//! └── gcp-vision-setup/
//!     ├── meta.json
//!     ├── ko.mdx
//!     └── en.mdx
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;

use crate::cache::ContentCache;
use crate::frontmatter::strip_frontmatter;
use crate::guide::{Category, Guide, GuideMeta, Locale, Platform};

/// File holding a guide's metadata record.
pub const META_FILE: &str = "meta.json";

/// Body file extensions, in lookup order.
const BODY_EXTENSIONS: [&str; 2] = ["mdx", "md"];

/// Configuration for a content resolver.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Directory holding one subdirectory per guide
    pub content_root: PathBuf,

    /// Memoize lookups for the lifetime of the resolver's cache
    pub caching_enabled: bool,

    /// Surface malformed content as `Resolution::Malformed` instead of not-found
    pub strict_validation: bool,
}

impl ResolverConfig {
    /// Interactive authoring: every call re-reads disk and authoring errors surface.
    pub fn authoring(content_root: impl Into<PathBuf>) -> Self {
        Self {
            content_root: content_root.into(),
            caching_enabled: false,
            strict_validation: true,
        }
    }

    /// Site builds: content is immutable for the run, so lookups are memoized.
    pub fn build(content_root: impl Into<PathBuf>, strict_validation: bool) -> Self {
        Self {
            content_root: content_root.into(),
            caching_enabled: true,
            strict_validation,
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::build("content/guides", true)
    }
}

/// Outcome of resolving a piece of content.
#[derive(Debug)]
pub enum Resolution<T> {
    Found(T),

    /// Absent, unpublished, or (in lenient mode) malformed
    NotFound,

    /// Only produced under strict validation
    Malformed(ContentError),
}

impl<T> Resolution<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_found(&self) -> Option<&T> {
        match self {
            Self::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }

    /// Collapse into a `Result` for callers that abort on malformed content.
    pub fn into_result(self) -> Result<Option<T>, ContentError> {
        match self {
            Self::Found(value) => Ok(Some(value)),
            Self::NotFound => Ok(None),
            Self::Malformed(err) => Err(err),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolution<U> {
        match self {
            Self::Found(value) => Resolution::Found(f(value)),
            Self::NotFound => Resolution::NotFound,
            Self::Malformed(err) => Resolution::Malformed(err),
        }
    }
}

/// Content that exists on disk but cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Malformed metadata for guide '{slug}': {message}")]
    MalformedMeta { slug: String, message: String },

    #[error("Malformed {locale} body for guide '{slug}': {message}")]
    MalformedBody {
        slug: String,
        locale: Locale,
        message: String,
    },
}

impl ContentError {
    pub fn slug(&self) -> &str {
        match self {
            Self::MalformedMeta { slug, .. } | Self::MalformedBody { slug, .. } => slug,
        }
    }
}

/// Raw outcome of reading a metadata record, before mode policy applies.
enum MetaLoad {
    Published(GuideMeta),
    Unpublished,
    Missing,
    Malformed(ContentError),
}

/// Resolves guide slugs to metadata and localized bodies.
pub struct ContentResolver {
    config: ResolverConfig,
    cache: Arc<ContentCache>,
}

impl ContentResolver {
    /// Create a resolver with its own, empty cache.
    pub fn new(config: ResolverConfig) -> Self {
        Self::with_cache(config, Arc::new(ContentCache::new()))
    }

    /// Create a resolver sharing an existing cache.
    pub fn with_cache(config: ResolverConfig, cache: Arc<ContentCache>) -> Self {
        Self { config, cache }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<ContentCache> {
        &self.cache
    }

    /// List guide slugs, one per subdirectory of the content root.
    ///
    /// A missing or unreadable root yields an empty set.
    pub fn list_slugs(&self) -> BTreeSet<String> {
        let root = &self.config.content_root;

        let entries = match fs::read_dir(root) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Content root {} unavailable: {}", root.display(), e);
                return BTreeSet::new();
            }
        };

        let mut slugs = BTreeSet::new();

        for entry in entries.filter_map(|e| e.ok()) {
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if !is_dir {
                continue;
            }

            match entry.file_name().into_string() {
                Ok(name) => {
                    slugs.insert(name);
                }
                Err(name) => {
                    tracing::warn!("Skipping non UTF-8 guide directory {:?}", name);
                }
            }
        }

        slugs
    }

    /// Resolve the metadata record of a published guide.
    pub fn resolve_metadata(&self, slug: &str) -> Resolution<Arc<GuideMeta>> {
        if self.config.caching_enabled {
            if let Some(hit) = self.cache.get_metadata(slug) {
                return hit.map_or(Resolution::NotFound, Resolution::Found);
            }
        }

        match self.load_metadata(slug) {
            MetaLoad::Published(meta) => {
                let meta = Arc::new(meta);
                self.remember_metadata(slug, Some(Arc::clone(&meta)));
                Resolution::Found(meta)
            }
            MetaLoad::Unpublished => {
                tracing::debug!("Guide \"{}\" exists but is not published", slug);
                self.remember_metadata(slug, None);
                Resolution::NotFound
            }
            MetaLoad::Missing => {
                tracing::debug!("No metadata for guide \"{}\"", slug);
                self.remember_metadata(slug, None);
                Resolution::NotFound
            }
            MetaLoad::Malformed(err) => self.malformed(err),
        }
    }

    /// Resolve a guide body in one locale.
    ///
    /// Not-found when the guide is unknown or unpublished, or when no body
    /// exists for this locale even if other locales have one.
    pub fn resolve_guide(&self, slug: &str, locale: Locale) -> Resolution<Arc<Guide>> {
        if self.config.caching_enabled {
            if let Some(hit) = self.cache.get_guide(slug, locale) {
                return hit.map_or(Resolution::NotFound, Resolution::Found);
            }
        }

        let meta = match self.resolve_metadata(slug) {
            Resolution::Found(meta) => meta,
            Resolution::NotFound => {
                self.remember_guide(slug, locale, None);
                return Resolution::NotFound;
            }
            Resolution::Malformed(err) => return Resolution::Malformed(err),
        };

        let source = match self.read_body(slug, locale) {
            Ok(Some(source)) => source,
            Ok(None) => {
                tracing::debug!("No {} body for guide \"{}\"", locale, slug);
                self.remember_guide(slug, locale, None);
                return Resolution::NotFound;
            }
            Err(e) => {
                return self.malformed(ContentError::MalformedBody {
                    slug: slug.to_string(),
                    locale,
                    message: e.to_string(),
                })
            }
        };

        let content = match strip_frontmatter(&source) {
            Ok(content) => content.to_string(),
            Err(e) => {
                return self.malformed(ContentError::MalformedBody {
                    slug: slug.to_string(),
                    locale,
                    message: e.to_string(),
                })
            }
        };

        let guide = Arc::new(Guide {
            meta,
            content,
            locale,
        });
        self.remember_guide(slug, locale, Some(Arc::clone(&guide)));

        Resolution::Found(guide)
    }

    /// Metadata of every published guide, ordered by slug.
    ///
    /// Listings are locale-independent; no bodies are read. Under strict
    /// validation the first malformed record fails the listing.
    pub fn list_all(&self, locale: Locale) -> Result<Vec<Arc<GuideMeta>>, ContentError> {
        let slugs: Vec<String> = self.list_slugs().into_iter().collect();

        let resolved: Vec<Resolution<Arc<GuideMeta>>> = slugs
            .par_iter()
            .map(|slug| self.resolve_metadata(slug))
            .collect();

        let mut guides = Vec::with_capacity(resolved.len());
        for resolution in resolved {
            if let Some(meta) = resolution.into_result()? {
                guides.push(meta);
            }
        }

        tracing::debug!(locale = %locale, count = guides.len(), "Listed published guides");

        Ok(guides)
    }

    /// Published guides for one platform.
    pub fn list_by_platform(
        &self,
        platform: Platform,
        locale: Locale,
    ) -> Result<Vec<Arc<GuideMeta>>, ContentError> {
        let mut guides = self.list_all(locale)?;
        guides.retain(|meta| meta.platform == platform);
        Ok(guides)
    }

    /// Published guides in one category.
    pub fn list_by_category(
        &self,
        category: Category,
        locale: Locale,
    ) -> Result<Vec<Arc<GuideMeta>>, ContentError> {
        let mut guides = self.list_all(locale)?;
        guides.retain(|meta| meta.category == category);
        Ok(guides)
    }

    /// Resolve slug references such as prerequisites, keeping their order.
    ///
    /// Dangling and unpublished references are skipped. A reference to a guide
    /// with malformed metadata is an error under strict validation.
    pub fn resolve_links(&self, slugs: &[String]) -> Result<Vec<Arc<GuideMeta>>, ContentError> {
        let mut links = Vec::with_capacity(slugs.len());
        for slug in slugs {
            if let Some(meta) = self.resolve_metadata(slug).into_result()? {
                links.push(meta);
            }
        }
        Ok(links)
    }

    fn guide_dir(&self, slug: &str) -> Option<PathBuf> {
        is_valid_slug(slug).then(|| self.config.content_root.join(slug))
    }

    fn load_metadata(&self, slug: &str) -> MetaLoad {
        let Some(dir) = self.guide_dir(slug) else {
            return MetaLoad::Missing;
        };
        let path = dir.join(META_FILE);

        let source = match fs::read_to_string(&path) {
            Ok(source) => source,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return MetaLoad::Missing,
            Err(e) => {
                return MetaLoad::Malformed(ContentError::MalformedMeta {
                    slug: slug.to_string(),
                    message: format!("{}: {}", path.display(), e),
                })
            }
        };

        let meta: GuideMeta = match serde_json::from_str(&source) {
            Ok(meta) => meta,
            Err(e) => {
                return MetaLoad::Malformed(ContentError::MalformedMeta {
                    slug: slug.to_string(),
                    message: e.to_string(),
                })
            }
        };

        if meta.slug != slug {
            return MetaLoad::Malformed(ContentError::MalformedMeta {
                slug: slug.to_string(),
                message: format!("slug field \"{}\" does not match directory name", meta.slug),
            });
        }

        if meta.published {
            MetaLoad::Published(meta)
        } else {
            MetaLoad::Unpublished
        }
    }

    /// Read the first existing body file for a locale.
    fn read_body(&self, slug: &str, locale: Locale) -> io::Result<Option<String>> {
        let Some(dir) = self.guide_dir(slug) else {
            return Ok(None);
        };

        for ext in BODY_EXTENSIONS {
            let path = body_path(&dir, locale, ext);
            match fs::read_to_string(&path) {
                Ok(source) => return Ok(Some(source)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(None)
    }

    /// Apply the mode policy to malformed content.
    fn malformed<T>(&self, err: ContentError) -> Resolution<T> {
        if self.config.strict_validation {
            tracing::error!("{}", err);
            Resolution::Malformed(err)
        } else {
            tracing::warn!("{} (treating as not found)", err);
            Resolution::NotFound
        }
    }

    fn remember_metadata(&self, slug: &str, meta: Option<Arc<GuideMeta>>) {
        if self.config.caching_enabled {
            self.cache.set_metadata(slug, meta);
        }
    }

    fn remember_guide(&self, slug: &str, locale: Locale, guide: Option<Arc<Guide>>) {
        if self.config.caching_enabled {
            self.cache.set_guide(slug, locale, guide);
        }
    }
}

fn body_path(dir: &Path, locale: Locale, ext: &str) -> PathBuf {
    dir.join(format!("{}.{}", locale.as_str(), ext))
}

/// A slug must name a single directory entry inside the content root.
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && !slug.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::{tempdir, TempDir};

    fn meta_json(slug: &str, platform: &str, category: &str, published: bool) -> String {
        format!(
            r#"{{
  "slug": "{slug}",
  "platform": "{platform}",
  "service": "Test Service",
  "category": "{category}",
  "difficulty": "beginner",
  "estimatedMinutes": 10,
  "totalSteps": 3,
  "prerequisites": [],
  "nextGuides": ["missing-guide"],
  "seo": {{
    "ko": {{ "title": "{slug} 가이드", "description": "설명", "keywords": ["ko"] }},
    "en": {{ "title": "{slug} guide", "description": "Description", "keywords": ["en"] }}
  }},
  "createdAt": "2025-01-01",
  "updatedAt": "2025-01-02",
  "lastVerified": "2025-01-02",
  "published": {published}
}}"#
        )
    }

    fn write_guide(root: &Path, slug: &str, meta: &str, bodies: &[(&str, &str)]) {
        let dir = root.join(slug);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(META_FILE), meta).unwrap();
        for (name, body) in bodies {
            fs::write(dir.join(name), body).unwrap();
        }
    }

    /// Content root with the guides used across these tests.
    fn fixture() -> TempDir {
        let temp = tempdir().unwrap();
        let root = temp.path();

        write_guide(
            root,
            "gcp-vision-setup",
            &meta_json("gcp-vision-setup", "gcp", "ai-ml", true),
            &[("ko.mdx", "---\ntitle: ignored\n---\n## 프로젝트 생성\n")],
        );
        write_guide(
            root,
            "gcp-maps-setup",
            &meta_json("gcp-maps-setup", "gcp", "maps", true),
            &[("ko.mdx", "## 시작\n"), ("en.md", "## Start\n")],
        );
        write_guide(
            root,
            "aws-s3-setup",
            &meta_json("aws-s3-setup", "aws", "storage", true),
            &[("en.mdx", "## Bucket\n")],
        );
        write_guide(
            root,
            "azure-draft",
            &meta_json("azure-draft", "azure", "compute", false),
            &[("ko.mdx", "## 초안\n"), ("en.mdx", "## Draft\n")],
        );
        write_guide(
            root,
            "broken-meta",
            "{ \"slug\": \"broken-meta\", \"platform\": ",
            &[("ko.mdx", "## Broken\n")],
        );

        temp
    }

    fn resolver(root: &Path, caching: bool, strict: bool) -> ContentResolver {
        ContentResolver::new(ResolverConfig {
            content_root: root.to_path_buf(),
            caching_enabled: caching,
            strict_validation: strict,
        })
    }

    #[test]
    fn lists_every_directory() {
        let temp = fixture();
        fs::write(temp.path().join("README.md"), "not a guide").unwrap();

        let slugs = resolver(temp.path(), true, false).list_slugs();

        let expected: BTreeSet<String> = [
            "aws-s3-setup",
            "azure-draft",
            "broken-meta",
            "gcp-maps-setup",
            "gcp-vision-setup",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        assert_eq!(slugs, expected);
    }

    #[test]
    fn missing_root_lists_nothing() {
        let temp = tempdir().unwrap();
        let resolver = resolver(&temp.path().join("nope"), true, true);

        assert!(resolver.list_slugs().is_empty());
        assert!(resolver.list_all(Locale::Ko).unwrap().is_empty());
    }

    #[test]
    fn resolves_guide_in_available_locale_only() {
        let temp = fixture();
        let resolver = resolver(temp.path(), true, true);

        let guide = resolver
            .resolve_guide("gcp-vision-setup", Locale::Ko)
            .found()
            .unwrap();
        assert_eq!(guide.meta.slug, "gcp-vision-setup");
        assert_eq!(guide.locale, Locale::Ko);
        assert_eq!(guide.content, "## 프로젝트 생성\n");

        assert!(resolver
            .resolve_guide("gcp-vision-setup", Locale::En)
            .is_not_found());
    }

    #[test]
    fn falls_back_to_md_extension() {
        let temp = fixture();
        let resolver = resolver(temp.path(), false, true);

        let guide = resolver
            .resolve_guide("gcp-maps-setup", Locale::En)
            .found()
            .unwrap();
        assert_eq!(guide.content, "## Start\n");
    }

    #[test]
    fn unpublished_guide_is_invisible() {
        let temp = fixture();
        let resolver = resolver(temp.path(), true, true);

        assert!(resolver.list_slugs().contains("azure-draft"));
        assert!(resolver.resolve_metadata("azure-draft").is_not_found());
        for locale in Locale::ALL {
            assert!(resolver.resolve_guide("azure-draft", locale).is_not_found());
        }
        assert!(resolver
            .list_by_platform(Platform::Azure, Locale::Ko)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn absent_slug_is_not_found() {
        let temp = fixture();
        let resolver = resolver(temp.path(), true, true);

        assert!(resolver.resolve_metadata("nonexistent").is_not_found());
        assert!(resolver
            .resolve_guide("nonexistent", Locale::Ko)
            .is_not_found());
        assert!(!resolver.list_slugs().contains("nonexistent"));
    }

    #[test]
    fn rejects_path_like_slugs() {
        let temp = fixture();
        let resolver = resolver(temp.path(), false, true);

        assert!(resolver.resolve_metadata("../gcp-vision-setup").is_not_found());
        assert!(resolver.resolve_metadata("").is_not_found());
        assert!(resolver.resolve_guide("..", Locale::Ko).is_not_found());
    }

    #[test]
    fn malformed_meta_is_fatal_in_strict_mode() {
        let temp = fixture();
        let resolver = resolver(temp.path(), true, true);

        let resolution = resolver.resolve_metadata("broken-meta");
        assert!(matches!(
            resolution,
            Resolution::Malformed(ContentError::MalformedMeta { ref slug, .. }) if slug == "broken-meta"
        ));
        assert!(resolver.resolve_guide("broken-meta", Locale::Ko).is_malformed());
        assert!(resolver.list_by_platform(Platform::Gcp, Locale::Ko).is_err());
    }

    #[test]
    fn malformed_meta_is_not_found_in_lenient_mode() {
        let temp = fixture();
        let resolver = resolver(temp.path(), true, false);

        assert!(resolver.resolve_metadata("broken-meta").is_not_found());
        assert!(resolver.resolve_guide("broken-meta", Locale::Ko).is_not_found());

        let all = resolver.list_all(Locale::Ko).unwrap();
        let slugs: Vec<&str> = all.iter().map(|m| m.slug.as_str()).collect();
        assert_eq!(slugs, vec!["aws-s3-setup", "gcp-maps-setup", "gcp-vision-setup"]);
    }

    #[test]
    fn slug_mismatch_is_malformed() {
        let temp = tempdir().unwrap();
        write_guide(
            temp.path(),
            "renamed-dir",
            &meta_json("original-name", "gcp", "general", true),
            &[],
        );
        let resolver = resolver(temp.path(), false, true);

        assert!(resolver.resolve_metadata("renamed-dir").is_malformed());
    }

    #[test]
    fn unclosed_front_matter_is_malformed_body() {
        let temp = tempdir().unwrap();
        write_guide(
            temp.path(),
            "bad-body",
            &meta_json("bad-body", "gcp", "general", true),
            &[("ko.mdx", "---\ntitle: open\n## Step\n")],
        );

        let strict = resolver(temp.path(), false, true);
        assert!(matches!(
            strict.resolve_guide("bad-body", Locale::Ko),
            Resolution::Malformed(ContentError::MalformedBody { locale: Locale::Ko, .. })
        ));

        let lenient = resolver(temp.path(), false, false);
        assert!(lenient.resolve_guide("bad-body", Locale::Ko).is_not_found());
        assert!(lenient.resolve_metadata("bad-body").found().is_some());
    }

    #[test]
    fn repeated_resolution_is_stable() {
        let temp = fixture();
        let resolver = resolver(temp.path(), true, true);

        let first = resolver.resolve_metadata("gcp-vision-setup").found().unwrap();
        let second = resolver.resolve_metadata("gcp-vision-setup").found().unwrap();

        assert_eq!(first, second);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn caches_not_found_results() {
        let temp = fixture();
        let resolver = resolver(temp.path(), true, true);

        assert!(resolver.resolve_metadata("late-guide").is_not_found());

        write_guide(
            temp.path(),
            "late-guide",
            &meta_json("late-guide", "gcp", "general", true),
            &[("ko.mdx", "## Hi\n")],
        );

        assert!(resolver.resolve_metadata("late-guide").is_not_found());
        assert_eq!(resolver.cache().get_metadata("late-guide"), Some(None));
    }

    #[test]
    fn does_not_cache_malformed_results() {
        let temp = fixture();
        let resolver = resolver(temp.path(), true, true);

        assert!(resolver.resolve_metadata("broken-meta").is_malformed());
        assert_eq!(resolver.cache().get_metadata("broken-meta"), None);
    }

    #[test]
    fn authoring_mode_sees_edits() {
        let temp = fixture();
        let resolver = resolver(temp.path(), false, true);

        assert!(resolver.resolve_metadata("azure-draft").is_not_found());

        fs::write(
            temp.path().join("azure-draft").join(META_FILE),
            meta_json("azure-draft", "azure", "compute", true),
        )
        .unwrap();

        assert!(resolver.resolve_metadata("azure-draft").found().is_some());
        assert_eq!(resolver.cache().metadata_len(), 0);
    }

    #[test]
    fn shared_cache_serves_other_resolvers() {
        let temp = fixture();
        let cache = Arc::new(ContentCache::new());
        let config = ResolverConfig::build(temp.path(), true);

        let first = ContentResolver::with_cache(config.clone(), Arc::clone(&cache));
        first.resolve_guide("gcp-vision-setup", Locale::Ko);

        fs::remove_dir_all(temp.path().join("gcp-vision-setup")).unwrap();

        let second = ContentResolver::with_cache(config, cache);
        assert!(second
            .resolve_guide("gcp-vision-setup", Locale::Ko)
            .found()
            .is_some());
    }

    #[test]
    fn platform_listing_partitions_published_set() {
        let temp = fixture();
        let resolver = resolver(temp.path(), true, false);

        let all = resolver.list_all(Locale::En).unwrap();

        let mut union: Vec<String> = Vec::new();
        for platform in Platform::ALL {
            let listed = resolver.list_by_platform(platform, Locale::En).unwrap();
            assert!(listed.iter().all(|m| m.platform == platform));
            union.extend(listed.iter().map(|m| m.slug.clone()));
        }
        union.sort();

        let published: Vec<String> = all.iter().map(|m| m.slug.clone()).collect();
        assert_eq!(union, published);

        let gcp = resolver.list_by_platform(Platform::Gcp, Locale::Ko).unwrap();
        let gcp: Vec<&str> = gcp.iter().map(|m| m.slug.as_str()).collect();
        assert_eq!(gcp, vec!["gcp-maps-setup", "gcp-vision-setup"]);
    }

    #[test]
    fn lists_by_category() {
        let temp = fixture();
        let resolver = resolver(temp.path(), true, false);

        let maps = resolver.list_by_category(Category::Maps, Locale::Ko).unwrap();
        assert_eq!(maps.len(), 1);
        assert_eq!(maps[0].slug, "gcp-maps-setup");

        assert!(resolver
            .list_by_category(Category::Database, Locale::Ko)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn resolve_links_skips_dangling_references() {
        let temp = fixture();
        let resolver = resolver(temp.path(), true, false);

        let links = resolver.resolve_links(&[
            "missing-guide".to_string(),
            "aws-s3-setup".to_string(),
            "azure-draft".to_string(),
            "gcp-vision-setup".to_string(),
        ])
        .unwrap();

        let slugs: Vec<&str> = links.iter().map(|m| m.slug.as_str()).collect();
        assert_eq!(slugs, vec!["aws-s3-setup", "gcp-vision-setup"]);
    }

    #[test]
    fn resolve_links_surfaces_malformed_references() {
        let temp = fixture();
        let links = vec!["gcp-vision-setup".to_string(), "broken-meta".to_string()];

        let strict = ContentResolver::new(ResolverConfig::authoring(temp.path()));
        let err = strict.resolve_links(&links).unwrap_err();
        assert_eq!(err.slug(), "broken-meta");

        let lenient = resolver(temp.path(), false, false);
        let slugs: Vec<String> = lenient
            .resolve_links(&links)
            .unwrap()
            .iter()
            .map(|m| m.slug.clone())
            .collect();
        assert_eq!(slugs, vec!["gcp-vision-setup".to_string()]);
    }
}
