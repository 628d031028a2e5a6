//! Site configuration (site.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub content: ContentSection,
    #[serde(default)]
    pub build: BuildSection,
}

#[derive(Debug, Deserialize)]
pub struct SiteSection {
    #[serde(default = "default_name")]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ContentSection {
    #[serde(default = "default_content_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_public_dir")]
    pub public: PathBuf,
    /// Fail builds on malformed content
    #[serde(default = "default_true")]
    pub strict: bool,
}

#[derive(Debug, Deserialize)]
pub struct BuildSection {
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_true")]
    pub minify: bool,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            name: default_name(),
        }
    }
}

impl Default for ContentSection {
    fn default() -> Self {
        Self {
            dir: default_content_dir(),
            public: default_public_dir(),
            strict: true,
        }
    }
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            output: default_output(),
            minify: true,
        }
    }
}

fn default_name() -> String {
    "CloudSetup.guide".to_string()
}
fn default_content_dir() -> PathBuf {
    PathBuf::from("content/guides")
}
fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}
fn default_output() -> PathBuf {
    PathBuf::from("dist")
}
fn default_true() -> bool {
    true
}

impl SiteConfig {
    /// Load configuration if the file exists.
    /// Returns an error if the config file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        tracing::info!("Loaded config from {}", path.display());

        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Public directory, if it exists.
    pub fn public_dir(&self) -> Option<PathBuf> {
        self.content
            .public
            .is_dir()
            .then(|| self.content.public.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_full_config() {
        let config = SiteConfig::parse(
            r#"
[site]
name = "My Guides"

[content]
dir = "guides"
public = "static"
strict = false

[build]
output = "out"
minify = false
"#,
        )
        .unwrap();

        assert_eq!(config.site.name, "My Guides");
        assert_eq!(config.content.dir, PathBuf::from("guides"));
        assert_eq!(config.content.public, PathBuf::from("static"));
        assert!(!config.content.strict);
        assert_eq!(config.build.output, PathBuf::from("out"));
        assert!(!config.build.minify);
    }

    #[test]
    fn fills_defaults() {
        let config = SiteConfig::parse("[site]\nname = \"Guides\"\n").unwrap();

        assert_eq!(config.content.dir, PathBuf::from("content/guides"));
        assert!(config.content.strict);
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert!(config.build.minify);
    }

    #[test]
    fn rejects_malformed_config() {
        assert!(SiteConfig::parse("[content]\nstrict = \"yes\"\n").is_err());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let config = SiteConfig::load(Path::new("/nonexistent/site.toml")).unwrap();

        assert_eq!(config.site.name, "CloudSetup.guide");
    }
}
