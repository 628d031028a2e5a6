//! Canonical site origin.

use std::fmt;

use url::Url;

/// Environment variable holding the canonical site origin.
pub const SITE_URL_ENV: &str = "SITE_URL";

/// Validated absolute origin the site is published under, without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOrigin {
    base: String,
    host: String,
}

/// Errors from validating the site origin.
#[derive(Debug, thiserror::Error)]
pub enum OriginError {
    #[error("Missing required environment variable {0} (e.g. https://cloudsetup.guide)")]
    Missing(&'static str),

    #[error("Invalid SITE_URL: \"{value}\": {message}. Must be a valid URL (e.g. https://cloudsetup.guide)")]
    Invalid { value: String, message: String },
}

impl SiteOrigin {
    /// Validate a raw origin value.
    pub fn parse(raw: &str) -> Result<Self, OriginError> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(OriginError::Missing(SITE_URL_ENV));
        }

        let invalid = |message: String| OriginError::Invalid {
            value: value.to_string(),
            message,
        };

        let parsed = Url::parse(value).map_err(|e| invalid(e.to_string()))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!(
                "scheme '{}' not supported, must be http or https",
                parsed.scheme()
            )));
        }

        let Some(host) = parsed.host_str() else {
            return Err(invalid("URL must have a host".to_string()));
        };
        let host = host.to_string();

        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(invalid("URL must not carry a query or fragment".to_string()));
        }

        let base = parsed.as_str().trim_end_matches('/').to_string();

        Ok(Self { base, host })
    }

    /// Validate an optional value, as read from the environment.
    pub fn from_value(value: Option<&str>) -> Result<Self, OriginError> {
        match value {
            Some(raw) => Self::parse(raw),
            None => Err(OriginError::Missing(SITE_URL_ENV)),
        }
    }

    /// Read and validate [`SITE_URL_ENV`].
    pub fn from_env() -> Result<Self, OriginError> {
        Self::from_value(std::env::var(SITE_URL_ENV).ok().as_deref())
    }

    pub fn as_str(&self) -> &str {
        &self.base
    }

    pub fn is_localhost(&self) -> bool {
        matches!(self.host.as_str(), "localhost" | "127.0.0.1" | "[::1]")
    }

    /// Absolute URL for a site-relative path.
    pub fn join(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            self.base.clone()
        } else {
            format!("{}/{}", self.base, path)
        }
    }
}

impl fmt::Display for SiteOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}
