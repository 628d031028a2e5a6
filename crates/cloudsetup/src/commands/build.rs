//! Static site build command.

use std::path::PathBuf;

use anyhow::Result;
use cloudsetup_static::{BuildConfig, SiteOrigin, StaticBuilder};

use crate::config::SiteConfig;

/// Command-line overrides of the config file.
#[derive(Debug, Default)]
pub struct BuildOptions {
    pub output: Option<PathBuf>,
    pub minify: Option<bool>,
    pub strict: Option<bool>,
}

fn build_config(file_config: &SiteConfig, origin: SiteOrigin, options: BuildOptions) -> BuildConfig {
    BuildConfig {
        content_dir: file_config.content.dir.clone(),
        output_dir: options
            .output
            .unwrap_or_else(|| file_config.build.output.clone()),
        public_dir: file_config.public_dir(),
        minify: options.minify.unwrap_or(file_config.build.minify),
        strict: options.strict.unwrap_or(file_config.content.strict),
        site_name: file_config.site.name.clone(),
        origin,
    }
}

/// Run the build command.
pub async fn run(file_config: &SiteConfig, origin: SiteOrigin, options: BuildOptions) -> Result<()> {
    tracing::info!("Building static site for {}...", origin);

    if origin.is_localhost() {
        tracing::warn!(
            "SITE_URL points at {}; canonical links and the sitemap will not work in production",
            origin
        );
    }

    let config = build_config(file_config, origin, options);
    if !config.strict {
        tracing::warn!("Lenient build: malformed guides will be skipped");
    }

    let result = StaticBuilder::new(config).build().await?;

    tracing::info!(
        "Built {} pages ({} guide pages, {} skipped) in {}ms",
        result.pages,
        result.guides,
        result.skipped,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn origin() -> SiteOrigin {
        SiteOrigin::parse("https://cloudsetup.guide").unwrap()
    }

    #[test]
    fn uses_config_file_values() {
        let file_config = SiteConfig::parse(
            "[content]\ndir = \"guides\"\nstrict = false\n[build]\noutput = \"out\"\nminify = false\n",
        )
        .unwrap();

        let config = build_config(&file_config, origin(), BuildOptions::default());

        assert_eq!(config.content_dir, PathBuf::from("guides"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert!(!config.strict);
        assert!(!config.minify);
    }

    #[test]
    fn flags_override_config() {
        let config = build_config(
            &SiteConfig::default(),
            origin(),
            BuildOptions {
                output: Some(PathBuf::from("public_html")),
                minify: Some(false),
                strict: Some(false),
            },
        );

        assert_eq!(config.output_dir, PathBuf::from("public_html"));
        assert!(!config.minify);
        assert!(!config.strict);
    }

    #[test]
    fn strict_by_default() {
        let config = build_config(&SiteConfig::default(), origin(), BuildOptions::default());

        assert!(config.strict);
        assert!(config.minify);
    }
}
