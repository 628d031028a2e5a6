//! Guide content for the CloudSetup site.
//!
//! This crate owns the on-disk content contract: the guide metadata model,
//! front-matter stripping, body rendering, and the resolver that turns slugs
//! into published guides with optional memoization.

pub mod cache;
pub mod components;
pub mod document;
pub mod frontmatter;
pub mod guide;
pub mod resolver;

pub use cache::ContentCache;
pub use components::{expand_components, Component, PropValue};
pub use document::{plain_text, render_document, render_localized, RenderedDocument, TocEntry};
pub use frontmatter::{strip_frontmatter, FrontmatterError};
pub use guide::{
    Category, Difficulty, FreeTierInfo, FreeTierPeriod, FreeTierStatus, Guide, GuideMeta,
    GuideSeo, Locale, LocalizedSeo, Platform, UnknownVariant,
};
pub use resolver::{ContentError, ContentResolver, Resolution, ResolverConfig, META_FILE};
