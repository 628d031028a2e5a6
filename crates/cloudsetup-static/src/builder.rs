//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use cloudsetup_content::{
    Category, ContentError, ContentResolver, Guide, Locale, Platform, Resolution, ResolverConfig,
};

use crate::assets::AssetPipeline;
use crate::origin::SiteOrigin;
use crate::pages::{self, PageError};
use crate::render::{SiteRenderer, SiteSettings};
use crate::routes;
use crate::search::SearchEntry;

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Guide content root
    pub content_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Directory copied verbatim into the output (screenshots)
    pub public_dir: Option<PathBuf>,

    /// Minify CSS output
    pub minify: bool,

    /// Fail on malformed content instead of skipping it
    pub strict: bool,

    /// Site name
    pub site_name: String,

    /// Canonical origin for SEO links, sitemap and robots.txt
    pub origin: SiteOrigin,
}

impl BuildConfig {
    pub fn new(origin: SiteOrigin) -> Self {
        Self {
            content_dir: PathBuf::from("content/guides"),
            output_dir: PathBuf::from("dist"),
            public_dir: Some(PathBuf::from("public")),
            minify: true,
            strict: true,
            site_name: "CloudSetup.guide".to_string(),
            origin,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of HTML pages generated
    pub pages: usize,

    /// Number of guide pages generated
    pub guides: usize,

    /// Guide/locale pairs that did not resolve
    pub skipped: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write {path}: {message}")]
    WriteError { path: String, message: String },
}

impl From<PageError> for BuildError {
    fn from(err: PageError) -> Self {
        match err {
            PageError::Content(e) => BuildError::Content(e),
            PageError::Template(e) => BuildError::TemplateError(e.to_string()),
        }
    }
}

/// A rendered guide page, kept for the sitemap and search index.
struct GuidePage {
    guide: Arc<Guide>,
    path: String,
    html: String,
}

/// A sitemap `<url>` entry.
struct SitemapUrl {
    path: String,
    priority: &'static str,
    changefreq: &'static str,
    lastmod: Option<String>,
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    resolver: ContentResolver,
    renderer: SiteRenderer,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Self {
        let resolver = ContentResolver::new(ResolverConfig::build(
            config.content_dir.clone(),
            config.strict,
        ));

        let renderer = SiteRenderer::new(SiteSettings {
            name: config.site_name.clone(),
            origin: config.origin.clone(),
            live_reload: false,
        });

        Self {
            config,
            resolver,
            renderer,
        }
    }

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        if !self.config.content_dir.is_dir() {
            tracing::warn!(
                "Content directory not found: {}",
                self.config.content_dir.display()
            );
        }

        create_dir(&self.config.output_dir)?;

        let slugs: Vec<String> = self.resolver.list_slugs().into_iter().collect();
        let pairs: Vec<(&str, Locale)> = slugs
            .iter()
            .flat_map(|slug| Locale::ALL.iter().map(move |locale| (slug.as_str(), *locale)))
            .collect();

        // Render guide pages in parallel
        let rendered: Vec<Result<Option<GuidePage>, BuildError>> = pairs
            .par_iter()
            .map(|(slug, locale)| self.render_guide(slug, *locale))
            .collect();

        let mut guides = Vec::new();
        for result in rendered {
            if let Some(page) = result? {
                guides.push(page);
            }
        }
        let skipped = pairs.len() - guides.len();

        for page in &guides {
            write_file(&routes::output_file(&self.config.output_dir, &page.path), &page.html)?;
        }

        let mut total_pages = guides.len();
        total_pages += self.build_listings()?;
        total_pages += self.build_fallback_pages()?;

        self.generate_assets()?;
        self.generate_search_index(&guides)?;
        self.generate_sitemap(&guides)?;
        self.copy_public_dir()?;

        let duration = start.elapsed();

        tracing::debug!(
            pages = total_pages,
            guides = guides.len(),
            skipped,
            "Build complete"
        );

        Ok(BuildResult {
            pages: total_pages,
            guides: guides.len(),
            skipped,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    fn render_guide(&self, slug: &str, locale: Locale) -> Result<Option<GuidePage>, BuildError> {
        let guide = match self.resolver.resolve_guide(slug, locale) {
            Resolution::Found(guide) => guide,
            Resolution::NotFound => {
                tracing::debug!(slug, locale = %locale, "Skipping guide page");
                return Ok(None);
            }
            Resolution::Malformed(e) => return Err(e.into()),
        };

        let html = pages::render_guide(&self.renderer, &self.resolver, &guide)?;

        Ok(Some(GuidePage {
            path: routes::guide(locale, slug),
            guide,
            html,
        }))
    }

    /// Locale homes plus every platform and category listing.
    fn build_listings(&self) -> Result<usize, BuildError> {
        let out = &self.config.output_dir;
        let mut count = 0;

        for locale in Locale::ALL {
            let html = pages::home_page(&self.renderer, &self.resolver, locale)?;
            write_file(&routes::output_file(out, &routes::home(locale)), &html)?;
            count += 1;

            for platform in Platform::ALL {
                let html = pages::platform_page(&self.renderer, &self.resolver, platform, locale)?;
                write_file(&routes::output_file(out, &routes::platform(locale, platform)), &html)?;
                count += 1;
            }

            for category in Category::ALL {
                let html = pages::category_page(&self.renderer, &self.resolver, category, locale)?;
                write_file(&routes::output_file(out, &routes::category(locale, category)), &html)?;
                count += 1;
            }
        }

        Ok(count)
    }

    /// Per-locale and root 404 pages plus the root redirect.
    fn build_fallback_pages(&self) -> Result<usize, BuildError> {
        let out = &self.config.output_dir;
        let mut count = 0;

        for locale in Locale::ALL {
            let html = self
                .renderer
                .render_not_found(locale)
                .map_err(|e| BuildError::TemplateError(e.to_string()))?;
            write_file(&out.join(locale.as_str()).join("404.html"), &html)?;

            if locale == Locale::default() {
                write_file(&out.join("404.html"), &html)?;
                count += 1;
            }
            count += 1;
        }

        write_file(&out.join("index.html"), &self.root_redirect())?;
        count += 1;

        Ok(count)
    }

    fn root_redirect(&self) -> String {
        let target = routes::home(Locale::default());
        format!(
            r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
  <meta charset="utf-8">
  <title>{name}</title>
  <meta http-equiv="refresh" content="0; url={target}">
  <link rel="canonical" href="{canonical}">
</head>
<body>
  <a href="{target}">{name}</a>
</body>
</html>"#,
            lang = Locale::default(),
            name = escape_xml(&self.config.site_name),
            target = target,
            canonical = self.config.origin.join(&target),
        )
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");

        write_file(
            &assets_dir.join("main.css"),
            &AssetPipeline::stylesheet(self.config.minify),
        )?;
        write_file(&assets_dir.join("main.js"), &AssetPipeline::generate_js())?;

        Ok(())
    }

    /// Generate search index.
    fn generate_search_index(&self, guides: &[GuidePage]) -> Result<(), BuildError> {
        let index: Vec<SearchEntry> = guides.iter().map(|page| SearchEntry::new(&page.guide)).collect();

        let path = self.config.output_dir.join("search-index.json");
        let json = serde_json::to_string(&index).map_err(|e| BuildError::WriteError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        write_file(&path, &json)
    }

    /// Generate sitemap and robots.txt.
    fn generate_sitemap(&self, guides: &[GuidePage]) -> Result<(), BuildError> {
        let mut entries = Vec::new();

        for locale in Locale::ALL {
            entries.push(SitemapUrl {
                path: routes::home(locale),
                priority: "1.0",
                changefreq: "daily",
                lastmod: None,
            });
        }

        for page in guides {
            entries.push(SitemapUrl {
                path: page.path.clone(),
                priority: "0.8",
                changefreq: "weekly",
                lastmod: Some(page.guide.meta.updated_at.clone()),
            });
        }

        for locale in Locale::ALL {
            for platform in Platform::ALL {
                entries.push(SitemapUrl {
                    path: routes::platform(locale, platform),
                    priority: "0.7",
                    changefreq: "weekly",
                    lastmod: None,
                });
            }
        }

        let urls: Vec<String> = entries
            .iter()
            .map(|entry| {
                let lastmod = entry
                    .lastmod
                    .as_ref()
                    .map(|date| format!("\n    <lastmod>{}</lastmod>", escape_xml(date)))
                    .unwrap_or_default();
                format!(
                    "  <url>\n    <loc>{}</loc>{}\n    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>",
                    escape_xml(&self.config.origin.join(&entry.path)),
                    lastmod,
                    entry.changefreq,
                    entry.priority
                )
            })
            .collect();

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>
"#,
            urls.join("\n")
        );

        write_file(&self.config.output_dir.join("sitemap.xml"), &sitemap)?;

        let robots = format!(
            "User-agent: *\nAllow: /\n\nSitemap: {}\n",
            self.config.origin.join("/sitemap.xml")
        );
        write_file(&self.config.output_dir.join("robots.txt"), &robots)
    }

    /// Copy the public directory into the output root.
    fn copy_public_dir(&self) -> Result<(), BuildError> {
        let Some(public_dir) = &self.config.public_dir else {
            return Ok(());
        };
        if !public_dir.is_dir() {
            return Ok(());
        }

        let mut copied = 0;
        for entry in WalkDir::new(public_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let Ok(relative) = path.strip_prefix(public_dir) else {
                continue;
            };
            let target = self.config.output_dir.join(relative);
            if let Some(parent) = target.parent() {
                create_dir(parent)?;
            }

            fs::copy(path, &target).map_err(|e| BuildError::WriteError {
                path: target.display().to_string(),
                message: e.to_string(),
            })?;
            copied += 1;
        }

        tracing::info!("Copied {} public files from {}", copied, public_dir.display());

        Ok(())
    }
}

fn create_dir(path: &Path) -> Result<(), BuildError> {
    fs::create_dir_all(path).map_err(|e| BuildError::WriteError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        create_dir(parent)?;
    }

    fs::write(path, contents).map_err(|e| BuildError::WriteError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
