//! Resolve content and render it into complete pages.

use cloudsetup_content::{
    render_localized, Category, ContentError, ContentResolver, Guide, Locale, Platform, Resolution,
};

use crate::render::SiteRenderer;

/// Failure to produce a page.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("Failed to render template: {0}")]
    Template(#[from] minijinja::Error),
}

/// Render a guide page, or `None` when the slug/locale pair does not resolve.
pub fn guide_page(
    renderer: &SiteRenderer,
    resolver: &ContentResolver,
    slug: &str,
    locale: Locale,
) -> Result<Option<String>, PageError> {
    match resolver.resolve_guide(slug, locale) {
        Resolution::Found(guide) => render_guide(renderer, resolver, &guide).map(Some),
        Resolution::NotFound => Ok(None),
        Resolution::Malformed(e) => Err(e.into()),
    }
}

/// Render an already resolved guide with its linked guides.
pub fn render_guide(
    renderer: &SiteRenderer,
    resolver: &ContentResolver,
    guide: &Guide,
) -> Result<String, PageError> {
    let document = render_localized(&guide.content, guide.locale);
    let prerequisites = resolver.resolve_links(&guide.meta.prerequisites)?;
    let next_guides = resolver.resolve_links(&guide.meta.next_guides)?;

    Ok(renderer.render_guide(guide, &document, &prerequisites, &next_guides)?)
}

pub fn home_page(
    renderer: &SiteRenderer,
    resolver: &ContentResolver,
    locale: Locale,
) -> Result<String, PageError> {
    let guides = resolver.list_all(locale)?;
    Ok(renderer.render_home(locale, &guides)?)
}

pub fn platform_page(
    renderer: &SiteRenderer,
    resolver: &ContentResolver,
    platform: Platform,
    locale: Locale,
) -> Result<String, PageError> {
    let guides = resolver.list_by_platform(platform, locale)?;
    Ok(renderer.render_platform(platform, locale, &guides)?)
}

pub fn category_page(
    renderer: &SiteRenderer,
    resolver: &ContentResolver,
    category: Category,
    locale: Locale,
) -> Result<String, PageError> {
    let guides = resolver.list_by_category(category, locale)?;
    Ok(renderer.render_category(category, locale, &guides)?)
}
