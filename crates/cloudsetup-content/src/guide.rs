//! Guide data model.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A supported site locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ko,
    En,
}

impl Locale {
    /// Every locale the site is rendered in, default first.
    pub const ALL: [Locale; 2] = [Locale::Ko, Locale::En];

    /// Two-letter code used in paths and file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ko => "ko",
            Self::En => "en",
        }
    }

    /// Language tag for `<html lang>` and Open Graph.
    pub fn og_locale(&self) -> &'static str {
        match self {
            Self::Ko => "ko_KR",
            Self::En => "en_US",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ko" => Ok(Self::Ko),
            "en" => Ok(Self::En),
            other => Err(UnknownVariant::new("locale", other)),
        }
    }
}

/// Returned when a path segment does not name a known locale, platform or category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Cloud provider a guide targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    Gcp,
    Aws,
    Azure,
    Supabase,
    Vercel,
    Cloudflare,
    Firebase,
}

impl Platform {
    pub const ALL: [Platform; 7] = [
        Platform::Gcp,
        Platform::Aws,
        Platform::Azure,
        Platform::Supabase,
        Platform::Vercel,
        Platform::Cloudflare,
        Platform::Firebase,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gcp => "gcp",
            Self::Aws => "aws",
            Self::Azure => "azure",
            Self::Supabase => "supabase",
            Self::Vercel => "vercel",
            Self::Cloudflare => "cloudflare",
            Self::Firebase => "firebase",
        }
    }

    /// Display name used in page headings and cards.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Gcp => "Google Cloud",
            Self::Aws => "AWS",
            Self::Azure => "Microsoft Azure",
            Self::Supabase => "Supabase",
            Self::Vercel => "Vercel",
            Self::Cloudflare => "Cloudflare",
            Self::Firebase => "Firebase",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("platform", s))
    }
}

/// Topical category of a guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    AiMl,
    Compute,
    Database,
    Storage,
    Auth,
    Maps,
    Cdn,
    Monitoring,
    General,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::AiMl,
        Category::Compute,
        Category::Database,
        Category::Storage,
        Category::Auth,
        Category::Maps,
        Category::Cdn,
        Category::Monitoring,
        Category::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AiMl => "ai-ml",
            Self::Compute => "compute",
            Self::Database => "database",
            Self::Storage => "storage",
            Self::Auth => "auth",
            Self::Maps => "maps",
            Self::Cdn => "cdn",
            Self::Monitoring => "monitoring",
            Self::General => "general",
        }
    }

    /// Localized category label.
    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::AiMl, Locale::Ko) => "AI/머신러닝",
            (Self::AiMl, Locale::En) => "AI & ML",
            (Self::Compute, Locale::Ko) => "컴퓨팅",
            (Self::Compute, Locale::En) => "Compute",
            (Self::Database, Locale::Ko) => "데이터베이스",
            (Self::Database, Locale::En) => "Database",
            (Self::Storage, Locale::Ko) => "스토리지",
            (Self::Storage, Locale::En) => "Storage",
            (Self::Auth, Locale::Ko) => "인증",
            (Self::Auth, Locale::En) => "Authentication",
            (Self::Maps, Locale::Ko) => "지도",
            (Self::Maps, Locale::En) => "Maps",
            (Self::Cdn, Locale::Ko) => "CDN",
            (Self::Cdn, Locale::En) => "CDN",
            (Self::Monitoring, Locale::Ko) => "모니터링",
            (Self::Monitoring, Locale::En) => "Monitoring",
            (Self::General, Locale::Ko) => "일반",
            (Self::General, Locale::En) => "General",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("category", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Beginner, Locale::Ko) => "초급",
            (Self::Beginner, Locale::En) => "Beginner",
            (Self::Intermediate, Locale::Ko) => "중급",
            (Self::Intermediate, Locale::En) => "Intermediate",
            (Self::Advanced, Locale::Ko) => "고급",
            (Self::Advanced, Locale::En) => "Advanced",
        }
    }
}

/// How generous a free tier is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FreeTierStatus {
    Generous,
    Moderate,
    Limited,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FreeTierPeriod {
    Month,
    Year,
    Forever,
    Trial,
}

/// Free usage allowance of the service a guide sets up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeTierInfo {
    pub service: String,
    pub limit: String,
    pub period: FreeTierPeriod,
    #[serde(default)]
    pub amount: Option<String>,
    pub status: FreeTierStatus,
    #[serde(default)]
    pub conditions: Vec<String>,
}

/// Search-engine metadata for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideSeo {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// SEO entries for every supported locale; all are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedSeo {
    pub ko: GuideSeo,
    pub en: GuideSeo,
}

impl LocalizedSeo {
    pub fn get(&self, locale: Locale) -> &GuideSeo {
        match locale {
            Locale::Ko => &self.ko,
            Locale::En => &self.en,
        }
    }
}

/// Locale-independent metadata record of a guide, read from `meta.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideMeta {
    /// Stable identifier; equals the guide's directory name
    pub slug: String,

    pub platform: Platform,

    /// Name of the cloud service being set up
    #[serde(default)]
    pub service: String,

    pub category: Category,

    pub difficulty: Difficulty,

    pub estimated_minutes: NonZeroU32,

    pub total_steps: NonZeroU32,

    #[serde(default)]
    pub free_tier: Option<FreeTierInfo>,

    /// Slugs to read first. Dangling references are tolerated.
    #[serde(default)]
    pub prerequisites: Vec<String>,

    /// Slugs to read next. Dangling references are tolerated.
    #[serde(default)]
    pub next_guides: Vec<String>,

    pub seo: LocalizedSeo,

    pub created_at: String,

    pub updated_at: String,

    pub last_verified: String,

    /// Must be explicitly `true` for the guide to be visible
    #[serde(default)]
    pub published: bool,
}

/// A published guide body in one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guide {
    pub meta: std::sync::Arc<GuideMeta>,

    /// Body markdown with any front-matter header removed
    pub content: String,

    pub locale: Locale,
}
