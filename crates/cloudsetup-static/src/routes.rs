//! Site-relative URL paths, shared by the builder and the dev server.

use std::path::{Path, PathBuf};

use cloudsetup_content::{Category, Locale, Platform};

pub fn home(locale: Locale) -> String {
    format!("/{}", locale)
}

pub fn guide(locale: Locale, slug: &str) -> String {
    format!("/{}/guides/{}", locale, slug)
}

pub fn platform(locale: Locale, platform: Platform) -> String {
    format!("/{}/platforms/{}", locale, platform)
}

pub fn category(locale: Locale, category: Category) -> String {
    format!("/{}/categories/{}", locale, category)
}

pub const SEARCH_INDEX: &str = "/search-index.json";
pub const STYLESHEET: &str = "/assets/main.css";
pub const SCRIPT: &str = "/assets/main.js";

/// Output file for a site path: `/ko/guides/x` becomes `<out>/ko/guides/x/index.html`.
pub fn output_file(output_dir: &Path, path: &str) -> PathBuf {
    let relative = path.trim_matches('/');
    if relative.is_empty() {
        output_dir.join("index.html")
    } else {
        output_dir.join(relative).join("index.html")
    }
}
