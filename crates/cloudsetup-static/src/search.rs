//! Client-side search index.

use serde::Serialize;

use cloudsetup_content::{plain_text, ContentError, ContentResolver, Guide, Locale, Resolution};

use crate::routes;

/// Maximum excerpt length in characters.
const EXCERPT_CHARS: usize = 200;

/// One searchable guide page.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchEntry {
    pub locale: &'static str,
    pub slug: String,
    pub url: String,
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub platform: &'static str,
    pub excerpt: String,
}

impl SearchEntry {
    pub fn new(guide: &Guide) -> Self {
        let meta = &guide.meta;
        let seo = meta.seo.get(guide.locale);

        Self {
            locale: guide.locale.as_str(),
            slug: meta.slug.clone(),
            url: routes::guide(guide.locale, &meta.slug),
            title: seo.title.clone(),
            description: seo.description.clone(),
            keywords: seo.keywords.clone(),
            platform: meta.platform.display_name(),
            excerpt: excerpt(&plain_text(&guide.content)),
        }
    }
}

/// Entries for every guide page that resolves, ordered by slug then locale.
pub fn build_index(resolver: &ContentResolver) -> Result<Vec<SearchEntry>, ContentError> {
    let mut entries = Vec::new();

    for slug in resolver.list_slugs() {
        for locale in Locale::ALL {
            match resolver.resolve_guide(&slug, locale) {
                Resolution::Found(guide) => entries.push(SearchEntry::new(&guide)),
                Resolution::NotFound => {}
                Resolution::Malformed(e) => return Err(e),
            }
        }
    }

    Ok(entries)
}

fn excerpt(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");

    match collapsed.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}…", collapsed[..cut].trim_end()),
        None => collapsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn guide(content: &str) -> Guide {
        let meta = serde_json::from_value(serde_json::json!({
            "slug": "aws-s3-setup",
            "platform": "aws",
            "category": "storage",
            "difficulty": "beginner",
            "estimatedMinutes": 10,
            "totalSteps": 1,
            "seo": {
                "ko": { "title": "S3 설정", "description": "버킷 만들기", "keywords": ["s3"] },
                "en": { "title": "S3 setup", "description": "Create a bucket", "keywords": ["s3", "bucket"] }
            },
            "createdAt": "2025-01-01",
            "updatedAt": "2025-01-02",
            "lastVerified": "2025-01-02",
            "published": true
        }))
        .unwrap();

        Guide {
            meta: Arc::new(meta),
            content: content.to_string(),
            locale: Locale::En,
        }
    }

    #[test]
    fn builds_entry_from_guide() {
        let entry = SearchEntry::new(&guide("## Create a bucket\n\nOpen the **S3** console."));

        assert_eq!(entry.locale, "en");
        assert_eq!(entry.url, "/en/guides/aws-s3-setup");
        assert_eq!(entry.title, "S3 setup");
        assert_eq!(entry.keywords, vec!["s3".to_string(), "bucket".to_string()]);
        assert_eq!(entry.platform, "AWS");
        assert!(entry.excerpt.contains("Open the S3 console."));
        assert!(!entry.excerpt.contains("**"));
    }

    #[test]
    fn truncates_long_excerpts() {
        let long = "단어 ".repeat(300);
        let text = excerpt(&long);

        assert!(text.ends_with('…'));
        assert!(text.chars().count() <= EXCERPT_CHARS + 1);
    }

    #[test]
    fn keeps_short_excerpts() {
        assert_eq!(excerpt("  one\n two  "), "one two");
    }
}
