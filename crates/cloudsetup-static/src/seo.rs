//! SEO metadata and structured data.

use cloudsetup_content::{GuideMeta, Locale};
use serde::Serialize;
use serde_json::json;

use crate::origin::SiteOrigin;
use crate::routes;

/// An alternate-language link of a page.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Alternate {
    /// `ko`, `en` or `x-default`
    pub hreflang: String,
    pub href: String,
}

/// Head metadata of a rendered page.
#[derive(Debug, Clone, Serialize)]
pub struct PageSeo {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub canonical: String,
    pub alternates: Vec<Alternate>,
    pub site_name: String,
    /// Open Graph type: `article` for guides, `website` otherwise
    pub og_type: &'static str,
    pub og_locale: &'static str,
    pub twitter_card: &'static str,
    /// Serialized JSON-LD, safe to embed in a `<script>` element
    pub json_ld: Option<String>,
    /// Keep the page out of search indexes
    pub noindex: bool,
}

impl PageSeo {
    /// Metadata for a page that exists under the same path in every locale.
    pub fn page(
        origin: &SiteOrigin,
        site_name: &str,
        locale: Locale,
        title: &str,
        description: &str,
        path_for: impl Fn(Locale) -> String,
    ) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            keywords: Vec::new(),
            canonical: origin.join(&path_for(locale)),
            alternates: alternates(origin, &path_for),
            site_name: site_name.to_string(),
            og_type: "website",
            og_locale: locale.og_locale(),
            twitter_card: "summary",
            json_ld: None,
            noindex: false,
        }
    }

    /// Metadata for a guide page.
    pub fn guide(origin: &SiteOrigin, site_name: &str, meta: &GuideMeta, locale: Locale) -> Self {
        let seo = meta.seo.get(locale);
        let path_for = |l: Locale| routes::guide(l, &meta.slug);

        Self {
            title: seo.title.clone(),
            description: seo.description.clone(),
            keywords: seo.keywords.clone(),
            canonical: origin.join(&path_for(locale)),
            alternates: alternates(origin, &path_for),
            site_name: site_name.to_string(),
            og_type: "article",
            og_locale: locale.og_locale(),
            twitter_card: "summary_large_image",
            json_ld: Some(embed_json(&guide_json_ld(meta, locale))),
            noindex: false,
        }
    }

    /// Exclude the page from indexing (not-found and error pages).
    pub fn noindex(mut self) -> Self {
        self.noindex = true;
        self
    }
}

fn alternates(origin: &SiteOrigin, path_for: &impl Fn(Locale) -> String) -> Vec<Alternate> {
    let mut links: Vec<Alternate> = Locale::ALL
        .iter()
        .map(|l| Alternate {
            hreflang: l.as_str().to_string(),
            href: origin.join(&path_for(*l)),
        })
        .collect();

    links.push(Alternate {
        hreflang: "x-default".to_string(),
        href: origin.join(&path_for(Locale::default())),
    });

    links
}

/// schema.org `HowTo` description of a guide.
pub fn guide_json_ld(meta: &GuideMeta, locale: Locale) -> serde_json::Value {
    let seo = meta.seo.get(locale);
    let steps: Vec<serde_json::Value> = (1..=meta.total_steps.get())
        .map(|position| {
            json!({
                "@type": "HowToStep",
                "position": position,
                "name": format!("Step {}", position),
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "HowTo",
        "name": seo.title,
        "description": seo.description,
        "inLanguage": locale.as_str(),
        "estimatedCost": {
            "@type": "MonetaryAmount",
            "currency": "USD",
            "value": "0",
        },
        "totalTime": format!("PT{}M", meta.estimated_minutes),
        "dateModified": meta.updated_at,
        "step": steps,
    })
}

/// Serialize JSON for a `<script>` element without allowing `</script>` breakout.
fn embed_json(value: &serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn meta() -> GuideMeta {
        serde_json::from_value(json!({
            "slug": "gcp-vision-setup",
            "platform": "gcp",
            "category": "ai-ml",
            "difficulty": "beginner",
            "estimatedMinutes": 15,
            "totalSteps": 3,
            "seo": {
                "ko": { "title": "Vision API 설정", "description": "설명", "keywords": ["vision"] },
                "en": { "title": "Vision API </script> setup", "description": "Description", "keywords": [] }
            },
            "createdAt": "2025-01-01",
            "updatedAt": "2025-01-10",
            "lastVerified": "2025-01-10",
            "published": true
        }))
        .unwrap()
    }

    fn origin() -> SiteOrigin {
        SiteOrigin::parse("https://cloudsetup.guide").unwrap()
    }

    #[test]
    fn builds_guide_metadata() {
        let seo = PageSeo::guide(&origin(), "CloudSetup.guide", &meta(), Locale::Ko);

        assert_eq!(seo.title, "Vision API 설정");
        assert_eq!(seo.keywords, vec!["vision".to_string()]);
        assert_eq!(
            seo.canonical,
            "https://cloudsetup.guide/ko/guides/gcp-vision-setup"
        );
        assert_eq!(seo.og_type, "article");
        assert_eq!(seo.og_locale, "ko_KR");
        assert_eq!(
            seo.alternates,
            vec![
                Alternate {
                    hreflang: "ko".to_string(),
                    href: "https://cloudsetup.guide/ko/guides/gcp-vision-setup".to_string(),
                },
                Alternate {
                    hreflang: "en".to_string(),
                    href: "https://cloudsetup.guide/en/guides/gcp-vision-setup".to_string(),
                },
                Alternate {
                    hreflang: "x-default".to_string(),
                    href: "https://cloudsetup.guide/ko/guides/gcp-vision-setup".to_string(),
                },
            ]
        );
    }

    #[test]
    fn builds_how_to_json_ld() {
        let value = guide_json_ld(&meta(), Locale::Ko);

        assert_eq!(value["@type"], "HowTo");
        assert_eq!(value["totalTime"], "PT15M");
        assert_eq!(value["step"].as_array().unwrap().len(), 3);
        assert_eq!(value["step"][2]["position"], 3);
        assert_eq!(value["estimatedCost"]["value"], "0");
    }

    #[test]
    fn escapes_script_breakout() {
        let seo = PageSeo::guide(&origin(), "CloudSetup.guide", &meta(), Locale::En);
        let json_ld = seo.json_ld.unwrap();

        assert!(!json_ld.contains("</script>"));
        assert!(json_ld.contains("<\\/script>"));
    }

    #[test]
    fn page_metadata_has_no_structured_data() {
        let seo = PageSeo::page(
            &origin(),
            "CloudSetup.guide",
            Locale::En,
            "Google Cloud",
            "Guides",
            |l| routes::platform(l, cloudsetup_content::Platform::Gcp),
        )
        .noindex();

        assert_eq!(seo.canonical, "https://cloudsetup.guide/en/platforms/gcp");
        assert_eq!(seo.og_type, "website");
        assert!(seo.json_ld.is_none());
        assert!(seo.noindex);
    }
}
