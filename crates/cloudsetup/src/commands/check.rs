//! Content validation command.

use anyhow::Result;
use cloudsetup_content::{ContentError, ContentResolver, Locale, Resolution, ResolverConfig};

use crate::config::SiteConfig;

/// Outcome of validating every guide under the content root.
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Guides with valid, published metadata
    pub published: usize,

    /// Directories whose metadata is unpublished or absent
    pub unpublished: Vec<String>,

    /// Published guides lacking a body for a locale
    pub missing_bodies: Vec<(String, Locale)>,

    pub malformed: Vec<ContentError>,
}

/// Resolve every slug and locale with strict validation.
pub fn check(resolver: &ContentResolver) -> CheckReport {
    let mut report = CheckReport::default();

    for slug in resolver.list_slugs() {
        match resolver.resolve_metadata(&slug) {
            Resolution::Found(_) => report.published += 1,
            Resolution::NotFound => {
                report.unpublished.push(slug);
                continue;
            }
            Resolution::Malformed(e) => {
                report.malformed.push(e);
                continue;
            }
        }

        for locale in Locale::ALL {
            match resolver.resolve_guide(&slug, locale) {
                Resolution::Found(_) => {}
                Resolution::NotFound => report.missing_bodies.push((slug.clone(), locale)),
                Resolution::Malformed(e) => report.malformed.push(e),
            }
        }
    }

    report
}

/// Run the check command.
pub fn run(file_config: &SiteConfig) -> Result<()> {
    let resolver = ContentResolver::new(ResolverConfig::build(file_config.content.dir.clone(), true));

    tracing::info!("Checking guides in {}", file_config.content.dir.display());

    let report = check(&resolver);

    for slug in &report.unpublished {
        tracing::info!("Unpublished: {}", slug);
    }
    for (slug, locale) in &report.missing_bodies {
        tracing::warn!("Missing {} body: {}", locale, slug);
    }
    for err in &report.malformed {
        tracing::error!("{}", err);
    }

    tracing::info!(
        "{} published, {} unpublished, {} missing bodies, {} malformed",
        report.published,
        report.unpublished.len(),
        report.missing_bodies.len(),
        report.malformed.len()
    );

    if !report.malformed.is_empty() {
        anyhow::bail!("Found {} malformed content files", report.malformed.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_meta(root: &Path, slug: &str, published: bool) {
        let dir = root.join(slug);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("meta.json"),
            format!(
                r#"{{
  "slug": "{slug}",
  "platform": "azure",
  "category": "ai-ml",
  "difficulty": "intermediate",
  "estimatedMinutes": 20,
  "totalSteps": 4,
  "seo": {{
    "ko": {{ "title": "t", "description": "d", "keywords": [] }},
    "en": {{ "title": "t", "description": "d", "keywords": [] }}
  }},
  "createdAt": "2025-01-01",
  "updatedAt": "2025-01-01",
  "lastVerified": "2025-01-01",
  "published": {published}
}}"#
            ),
        )
        .unwrap();
    }

    #[test]
    fn reports_content_state() {
        let temp = tempdir().unwrap();
        let root = temp.path();

        write_meta(root, "gcp-vision-setup", true);
        fs::write(root.join("gcp-vision-setup/ko.mdx"), "## 단계").unwrap();
        write_meta(root, "azure-draft", false);
        fs::create_dir_all(root.join("broken-meta")).unwrap();
        fs::write(root.join("broken-meta/meta.json"), "{ not json").unwrap();

        let report = check(&ContentResolver::new(ResolverConfig::build(root, true)));

        assert_eq!(report.published, 1);
        assert_eq!(report.unpublished, vec!["azure-draft".to_string()]);
        assert_eq!(
            report.missing_bodies,
            vec![("gcp-vision-setup".to_string(), Locale::En)]
        );
        assert_eq!(report.malformed.len(), 1);
        assert_eq!(report.malformed[0].slug(), "broken-meta");
    }

    #[test]
    fn run_fails_on_malformed_content() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("broken-meta")).unwrap();
        fs::write(temp.path().join("broken-meta/meta.json"), "[]").unwrap();

        let mut config = SiteConfig::default();
        config.content.dir = temp.path().to_path_buf();

        assert!(run(&config).is_err());
    }
}
