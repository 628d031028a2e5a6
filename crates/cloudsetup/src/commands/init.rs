//! Scaffold a new guide site.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

const SAMPLE_SLUG: &str = "gcp-vision-setup";

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing cloudsetup site...");

    scaffold(Path::new("."), config_path, yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'SITE_URL=http://localhost:7777 cloudsetup dev' to start the development server.");

    Ok(())
}

fn scaffold(root: &Path, config_path: &Path, yes: bool) -> Result<()> {
    let guide_dir = root.join("content/guides").join(SAMPLE_SLUG);

    if guide_dir.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            guide_dir.display()
        );
        return Ok(());
    }

    fs::create_dir_all(&guide_dir).context("Failed to create content directory")?;
    fs::create_dir_all(root.join("public/screenshots")).context("Failed to create public directory")?;

    write_file(&root.join(config_path), DEFAULT_CONFIG, yes)?;
    write_file(&guide_dir.join("meta.json"), SAMPLE_META, yes)?;
    write_file(&guide_dir.join("ko.mdx"), SAMPLE_KO, yes)?;
    write_file(&guide_dir.join("en.mdx"), SAMPLE_EN, yes)?;

    Ok(())
}

fn write_file(path: &Path, contents: &str, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        return Ok(());
    }

    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created {}", path.display());

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# cloudsetup configuration

[site]
name = "CloudSetup.guide"

[content]
# One directory per guide: meta.json, ko.mdx, en.mdx
dir = "content/guides"

# Copied verbatim into the output (screenshots)
public = "public"

# Fail the build on malformed guides
strict = true

[build]
output = "dist"
minify = true
"#;

const SAMPLE_META: &str = r#"{
  "slug": "gcp-vision-setup",
  "platform": "gcp",
  "service": "Cloud Vision API",
  "category": "ai-ml",
  "difficulty": "beginner",
  "estimatedMinutes": 15,
  "totalSteps": 3,
  "freeTier": {
    "service": "Cloud Vision API",
    "limit": "1,000 units",
    "period": "month",
    "status": "generous",
    "conditions": ["A billing account must be linked"]
  },
  "prerequisites": [],
  "nextGuides": [],
  "seo": {
    "ko": {
      "title": "Google Cloud Vision API 설정 가이드",
      "description": "Cloud Vision API를 활성화하고 API 키를 발급받는 방법",
      "keywords": ["vision api", "google cloud", "api 키"]
    },
    "en": {
      "title": "Google Cloud Vision API Setup Guide",
      "description": "Enable the Cloud Vision API and create an API key",
      "keywords": ["vision api", "google cloud", "api key"]
    }
  },
  "createdAt": "2025-01-01",
  "updatedAt": "2025-01-01",
  "lastVerified": "2025-01-01",
  "published": true
}
"#;

const SAMPLE_KO: &str = r#"---
title: Google Cloud Vision API 설정
---

## 프로젝트 만들기

[Google Cloud 콘솔](https://console.cloud.google.com)에서 새 프로젝트를 만듭니다.

## API 활성화

**API 및 서비스 > 라이브러리**에서 `Cloud Vision API`를 검색하고 **사용**을 누릅니다.

## API 키 발급

**사용자 인증 정보 > 사용자 인증 정보 만들기 > API 키**를 선택합니다.

```bash
curl "https://vision.googleapis.com/v1/images:annotate?key=YOUR_API_KEY"
```
"#;

const SAMPLE_EN: &str = r#"---
title: Google Cloud Vision API setup
---

## Create a project

Create a new project in the [Google Cloud console](https://console.cloud.google.com).

## Enable the API

Search for `Cloud Vision API` under **APIs & Services > Library** and click **Enable**.

## Create an API key

Choose **Credentials > Create credentials > API key**.

```bash
curl "https://vision.googleapis.com/v1/images:annotate?key=YOUR_API_KEY"
```
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use cloudsetup_content::{ContentResolver, Locale, ResolverConfig};
    use tempfile::tempdir;

    #[test]
    fn scaffolds_a_valid_guide() {
        let temp = tempdir().unwrap();

        scaffold(temp.path(), Path::new("site.toml"), false).unwrap();

        assert!(temp.path().join("site.toml").exists());
        assert!(temp.path().join("public/screenshots").is_dir());

        let resolver = ContentResolver::new(ResolverConfig::build(
            temp.path().join("content/guides"),
            true,
        ));
        for locale in Locale::ALL {
            let guide = resolver.resolve_guide(SAMPLE_SLUG, locale).found().unwrap();
            assert_eq!(guide.meta.total_steps.get(), 3);
        }
    }

    #[test]
    fn keeps_existing_files_without_yes() {
        let temp = tempdir().unwrap();
        scaffold(temp.path(), Path::new("site.toml"), false).unwrap();
        fs::write(temp.path().join("site.toml"), "# edited").unwrap();

        scaffold(temp.path(), Path::new("site.toml"), false).unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join("site.toml")).unwrap(),
            "# edited"
        );
    }

    #[test]
    fn sample_config_parses() {
        let config = crate::config::SiteConfig::parse(DEFAULT_CONFIG).unwrap();
        assert!(config.content.strict);
    }
}
