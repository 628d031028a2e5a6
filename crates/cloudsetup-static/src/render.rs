//! Page rendering shared by the static builder and the dev server.

use std::sync::Arc;

use serde::Serialize;

use cloudsetup_content::{
    Category, FreeTierInfo, Guide, GuideMeta, Locale, Platform, RenderedDocument, TocEntry,
};

use crate::i18n::Messages;
use crate::origin::SiteOrigin;
use crate::routes;
use crate::seo::PageSeo;
use crate::templates::{Layout, LocaleLink, NavItem, TemplateEngine};

/// Site-wide settings for rendering.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    /// Display name of the site
    pub name: String,

    /// Canonical origin used for SEO links
    pub origin: SiteOrigin,

    /// Include the dev server reload client in every page
    pub live_reload: bool,
}

/// A guide summary for cards and link lists.
#[derive(Debug, Clone, Serialize)]
pub struct GuideCard {
    pub slug: String,
    pub path: String,
    pub title: String,
    pub description: String,
    pub platform_name: &'static str,
    pub difficulty: &'static str,
    pub difficulty_key: &'static str,
    pub minutes: u32,
}

impl GuideCard {
    pub fn new(meta: &GuideMeta, locale: Locale) -> Self {
        let seo = meta.seo.get(locale);
        Self {
            slug: meta.slug.clone(),
            path: routes::guide(locale, &meta.slug),
            title: seo.title.clone(),
            description: seo.description.clone(),
            platform_name: meta.platform.display_name(),
            difficulty: meta.difficulty.label(locale),
            difficulty_key: difficulty_key(meta),
            minutes: meta.estimated_minutes.get(),
        }
    }
}

fn difficulty_key(meta: &GuideMeta) -> &'static str {
    match meta.difficulty {
        cloudsetup_content::Difficulty::Beginner => "beginner",
        cloudsetup_content::Difficulty::Intermediate => "intermediate",
        cloudsetup_content::Difficulty::Advanced => "advanced",
    }
}

fn cards(guides: &[Arc<GuideMeta>], locale: Locale) -> Vec<GuideCard> {
    guides.iter().map(|m| GuideCard::new(m, locale)).collect()
}

#[derive(Debug, Serialize)]
struct CountedLink {
    name: &'static str,
    path: String,
    count: usize,
}

#[derive(Debug, Serialize)]
struct HomePage {
    guides: Vec<GuideCard>,
    platforms: Vec<CountedLink>,
    categories: Vec<CountedLink>,
}

#[derive(Debug, Serialize)]
struct FreeTierView<'a> {
    service: &'a str,
    limit: &'a str,
    amount: Option<&'a str>,
    period: &'a str,
    status: &'a str,
    conditions: &'a [String],
}

impl<'a> FreeTierView<'a> {
    fn new(info: &'a FreeTierInfo) -> Self {
        use cloudsetup_content::{FreeTierPeriod, FreeTierStatus};

        Self {
            service: &info.service,
            limit: &info.limit,
            amount: info.amount.as_deref(),
            period: match info.period {
                FreeTierPeriod::Month => "month",
                FreeTierPeriod::Year => "year",
                FreeTierPeriod::Forever => "forever",
                FreeTierPeriod::Trial => "trial",
            },
            status: match info.status {
                FreeTierStatus::Generous => "generous",
                FreeTierStatus::Moderate => "moderate",
                FreeTierStatus::Limited => "limited",
                FreeTierStatus::None => "none",
            },
            conditions: &info.conditions,
        }
    }
}

#[derive(Debug, Serialize)]
struct GuidePage<'a> {
    title: &'a str,
    description: &'a str,
    platform_name: &'static str,
    platform_path: String,
    difficulty: &'static str,
    difficulty_key: &'static str,
    minutes: u32,
    service: &'a str,
    total_steps: u32,
    free_tier: Option<FreeTierView<'a>>,
    toc: Vec<&'a TocEntry>,
    content: &'a str,
    prerequisites: Vec<GuideCard>,
    next_guides: Vec<GuideCard>,
    last_verified: &'a str,
}

#[derive(Debug, Serialize)]
struct ListingPage<'a> {
    heading: &'a str,
    description: Option<&'a str>,
    guides: Vec<GuideCard>,
    empty_message: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorPage<'a> {
    message: &'a str,
}

#[derive(Debug, Serialize)]
struct EmptyPage {}

/// Renders every kind of site page.
pub struct SiteRenderer {
    settings: SiteSettings,
    templates: TemplateEngine,
}

impl SiteRenderer {
    pub fn new(settings: SiteSettings) -> Self {
        Self {
            settings,
            templates: TemplateEngine::new(),
        }
    }

    pub fn settings(&self) -> &SiteSettings {
        &self.settings
    }

    /// Locale home: every published guide plus platform and category links.
    pub fn render_home(
        &self,
        locale: Locale,
        guides: &[Arc<GuideMeta>],
    ) -> Result<String, minijinja::Error> {
        let messages = Messages::for_locale(locale);
        let seo = PageSeo::page(
            &self.settings.origin,
            &self.settings.name,
            locale,
            &self.settings.name,
            messages.tagline,
            routes::home,
        );

        let page = HomePage {
            guides: cards(guides, locale),
            platforms: Platform::ALL
                .iter()
                .map(|p| CountedLink {
                    name: p.display_name(),
                    path: routes::platform(locale, *p),
                    count: guides.iter().filter(|g| g.platform == *p).count(),
                })
                .collect(),
            categories: Category::ALL
                .iter()
                .map(|c| CountedLink {
                    name: c.label(locale),
                    path: routes::category(locale, *c),
                    count: guides.iter().filter(|g| g.category == *c).count(),
                })
                .collect(),
        };

        let layout = self.layout(locale, seo, routes::home, None);
        self.templates.render_page("home.html", &layout, &page)
    }

    /// Guide detail page.
    pub fn render_guide(
        &self,
        guide: &Guide,
        document: &RenderedDocument,
        prerequisites: &[Arc<GuideMeta>],
        next_guides: &[Arc<GuideMeta>],
    ) -> Result<String, minijinja::Error> {
        let locale = guide.locale;
        let meta = &guide.meta;
        let seo_entry = meta.seo.get(locale);

        let page = GuidePage {
            title: &seo_entry.title,
            description: &seo_entry.description,
            platform_name: meta.platform.display_name(),
            platform_path: routes::platform(locale, meta.platform),
            difficulty: meta.difficulty.label(locale),
            difficulty_key: difficulty_key(meta),
            minutes: meta.estimated_minutes.get(),
            service: &meta.service,
            total_steps: meta.total_steps.get(),
            free_tier: meta.free_tier.as_ref().map(FreeTierView::new),
            toc: document.toc.iter().filter(|e| e.step.is_some()).collect(),
            content: &document.html,
            prerequisites: cards(prerequisites, locale),
            next_guides: cards(next_guides, locale),
            last_verified: &meta.last_verified,
        };

        let seo = PageSeo::guide(&self.settings.origin, &self.settings.name, meta, locale);
        let slug = meta.slug.clone();
        let layout = self.layout(
            locale,
            seo,
            move |l| routes::guide(l, &slug),
            Some(routes::platform(locale, meta.platform)),
        );

        self.templates.render_page("guide.html", &layout, &page)
    }

    /// Guides for one platform; an empty list renders the "coming soon" message.
    pub fn render_platform(
        &self,
        platform: Platform,
        locale: Locale,
        guides: &[Arc<GuideMeta>],
    ) -> Result<String, minijinja::Error> {
        let messages = Messages::for_locale(locale);
        let heading = platform.display_name();
        let seo = PageSeo::page(
            &self.settings.origin,
            &self.settings.name,
            locale,
            heading,
            messages.available_guides,
            |l| routes::platform(l, platform),
        );

        let page = ListingPage {
            heading,
            description: None,
            guides: cards(guides, locale),
            empty_message: messages.no_platform_guides,
        };

        let layout = self.layout(
            locale,
            seo,
            |l| routes::platform(l, platform),
            Some(routes::platform(locale, platform)),
        );
        self.templates.render_page("listing.html", &layout, &page)
    }

    /// Guides in one category.
    pub fn render_category(
        &self,
        category: Category,
        locale: Locale,
        guides: &[Arc<GuideMeta>],
    ) -> Result<String, minijinja::Error> {
        let messages = Messages::for_locale(locale);
        let heading = category.label(locale);
        let seo = PageSeo::page(
            &self.settings.origin,
            &self.settings.name,
            locale,
            heading,
            messages.available_guides,
            |l| routes::category(l, category),
        );

        let page = ListingPage {
            heading,
            description: Some(messages.categories),
            guides: cards(guides, locale),
            empty_message: messages.no_category_guides,
        };

        let layout = self.layout(locale, seo, |l| routes::category(l, category), None);
        self.templates.render_page("listing.html", &layout, &page)
    }

    /// "Guide not found" page with a link back to the catalog.
    pub fn render_not_found(&self, locale: Locale) -> Result<String, minijinja::Error> {
        let messages = Messages::for_locale(locale);
        let seo = PageSeo::page(
            &self.settings.origin,
            &self.settings.name,
            locale,
            messages.not_found_title,
            messages.not_found_body,
            routes::home,
        )
        .noindex();

        let layout = self.layout(locale, seo, routes::home, None);
        self.templates
            .render_page("not_found.html", &layout, &EmptyPage {})
    }

    /// Authoring error page shown by the dev server for malformed content.
    pub fn render_error(&self, locale: Locale, message: &str) -> Result<String, minijinja::Error> {
        let messages = Messages::for_locale(locale);
        let seo = PageSeo::page(
            &self.settings.origin,
            &self.settings.name,
            locale,
            messages.error_title,
            message,
            routes::home,
        )
        .noindex();

        let layout = self.layout(locale, seo, routes::home, None);
        self.templates
            .render_page("error.html", &layout, &ErrorPage { message })
    }

    fn layout(
        &self,
        locale: Locale,
        seo: PageSeo,
        path_for: impl Fn(Locale) -> String,
        active_path: Option<String>,
    ) -> Layout {
        let nav = Platform::ALL
            .iter()
            .map(|p| {
                let path = routes::platform(locale, *p);
                NavItem {
                    title: p.display_name().to_string(),
                    active: active_path.as_deref() == Some(path.as_str()),
                    path,
                }
            })
            .collect();

        let locales = Locale::ALL
            .iter()
            .map(|l| LocaleLink {
                code: l.as_str(),
                label: Messages::for_locale(*l).language_name,
                path: path_for(*l),
                active: *l == locale,
            })
            .collect();

        Layout {
            lang: locale.as_str(),
            site_name: self.settings.name.clone(),
            home_path: routes::home(locale),
            seo,
            messages: Messages::for_locale(locale),
            nav,
            locales,
            stylesheet: routes::STYLESHEET,
            script: routes::SCRIPT,
            live_reload: self.settings.live_reload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudsetup_content::render_document;

    fn renderer() -> SiteRenderer {
        SiteRenderer::new(SiteSettings {
            name: "CloudSetup.guide".to_string(),
            origin: SiteOrigin::parse("https://cloudsetup.guide").unwrap(),
            live_reload: false,
        })
    }

    fn meta(slug: &str, platform: &str) -> Arc<GuideMeta> {
        Arc::new(
            serde_json::from_value(serde_json::json!({
                "slug": slug,
                "platform": platform,
                "service": "Cloud Vision API",
                "category": "ai-ml",
                "difficulty": "beginner",
                "estimatedMinutes": 15,
                "totalSteps": 2,
                "freeTier": {
                    "service": "Cloud Vision",
                    "limit": "1,000 units",
                    "period": "month",
                    "status": "generous",
                    "conditions": ["Billing account required"]
                },
                "seo": {
                    "ko": { "title": format!("{} 설정", slug), "description": "설명", "keywords": [] },
                    "en": { "title": format!("{} setup", slug), "description": "Description", "keywords": [] }
                },
                "createdAt": "2025-01-01",
                "updatedAt": "2025-01-10",
                "lastVerified": "2025-01-10",
                "published": true
            }))
            .unwrap(),
        )
    }

    #[test]
    fn renders_guide_page() {
        let guide = Guide {
            meta: meta("gcp-vision-setup", "gcp"),
            content: "## 프로젝트 생성\n\n콘솔을 엽니다.\n\n## API 활성화\n".to_string(),
            locale: Locale::Ko,
        };
        let document = render_document(&guide.content);
        let next = vec![meta("gcp-maps-setup", "gcp")];

        let html = renderer()
            .render_guide(&guide, &document, &[], &next)
            .unwrap();

        assert!(html.contains("<html lang=\"ko\">"));
        assert!(html.contains("<h1>gcp-vision-setup 설정</h1>"));
        assert!(html.contains("data-total-steps=\"2\""));
        assert!(html.contains("href=\"#step-2\""));
        assert!(html.contains("1. 프로젝트 생성"));
        assert!(html.contains("<h2 id=\"step-1\">프로젝트 생성</h2>"));
        assert!(html.contains("Billing account required"));
        assert!(html.contains("href=\"/ko/guides/gcp-maps-setup\""));
        assert!(html.contains("href=\"/en/guides/gcp-vision-setup\""));
        assert!(html.contains("application/ld+json"));
        assert!(html.contains("15 분"));
        assert!(html.contains("class=\"active\">Google Cloud</a>"));
    }

    #[test]
    fn renders_home_with_counts() {
        let guides = vec![meta("aws-s3-setup", "aws"), meta("gcp-vision-setup", "gcp")];

        let html = renderer().render_home(Locale::En, &guides).unwrap();

        assert!(html.contains("gcp-vision-setup setup"));
        assert!(html.contains("aws-s3-setup setup"));
        assert!(html.contains("href=\"/en/platforms/azure\""));
        assert!(html.contains("(2)"));
    }

    #[test]
    fn renders_empty_platform() {
        let html = renderer()
            .render_platform(Platform::Azure, Locale::Ko, &[])
            .unwrap();

        assert!(html.contains("아직 이 플랫폼의 가이드가 없습니다"));
    }

    #[test]
    fn renders_category() {
        let guides = vec![meta("gcp-vision-setup", "gcp")];

        let html = renderer()
            .render_category(Category::AiMl, Locale::En, &guides)
            .unwrap();

        assert!(html.contains("<h1>AI &amp; ML</h1>"));
        assert!(html.contains("gcp-vision-setup setup"));
    }

    #[test]
    fn not_found_page_is_not_indexed() {
        let html = renderer().render_not_found(Locale::En).unwrap();

        assert!(html.contains("Guide not found"));
        assert!(html.contains("noindex"));
        assert!(html.contains("Back to all guides"));
    }
}
