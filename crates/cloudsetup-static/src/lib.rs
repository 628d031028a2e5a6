//! Static site generation for localized cloud setup guides.
//!
//! Renders every published guide, locale home, platform and category page,
//! along with the SEO metadata, sitemap, robots.txt, search index and assets.

pub mod assets;
pub mod builder;
pub mod i18n;
pub mod origin;
pub mod pages;
pub mod render;
pub mod routes;
pub mod search;
pub mod seo;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
pub use origin::{OriginError, SiteOrigin, SITE_URL_ENV};
pub use pages::PageError;
pub use render::{SiteRenderer, SiteSettings};
pub use search::SearchEntry;
