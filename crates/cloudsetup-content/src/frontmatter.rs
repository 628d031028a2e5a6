//! Front-matter handling for guide bodies.
//!
//! A body may begin with a YAML header between `---` fences. The header is
//! checked for well-formedness and then discarded: guide metadata comes only
//! from `meta.json`.

/// Strip a leading front-matter block from a body document.
///
/// Returns the remaining content after the header, or the source unchanged
/// when there is no header.
pub fn strip_frontmatter(source: &str) -> Result<&str, FrontmatterError> {
    let trimmed = source.trim_start_matches('\u{feff}').trim_start();

    if !trimmed.starts_with("---") {
        return Ok(source);
    }

    let after_open = &trimmed[3..];
    let Some(close_pos) = after_open.find("\n---") else {
        return Err(FrontmatterError::Unclosed);
    };

    let yaml_content = after_open[..close_pos].trim();
    let remaining = &after_open[close_pos + 4..];

    if !yaml_content.is_empty() {
        serde_yaml::from_str::<serde_yaml::Value>(yaml_content)
            .map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?;
    }

    Ok(remaining.trim_start())
}

/// Errors that can occur when reading a front-matter header.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed front-matter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in front-matter: {0}")]
    InvalidYaml(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_header() {
        let source = r#"---
title: Vision API 설정
order: 1
---

## 프로젝트 생성
"#;

        let content = strip_frontmatter(source).unwrap();

        assert!(content.starts_with("## 프로젝트 생성"));
        assert!(!content.contains("title:"));
    }

    #[test]
    fn handles_no_header() {
        let source = "## Just Markdown\n\nNo header here.";

        let content = strip_frontmatter(source).unwrap();

        assert_eq!(content, source);
    }

    #[test]
    fn handles_empty_header() {
        let content = strip_frontmatter("---\n---\nBody").unwrap();

        assert_eq!(content, "Body");
    }

    #[test]
    fn errors_on_unclosed_header() {
        let result = strip_frontmatter("---\ntitle: Test\n# No closing");

        assert!(matches!(result, Err(FrontmatterError::Unclosed)));
    }

    #[test]
    fn errors_on_invalid_yaml() {
        let result = strip_frontmatter("---\ntitle: [invalid yaml\n---\n");

        assert!(matches!(result, Err(FrontmatterError::InvalidYaml(_))));
    }
}
