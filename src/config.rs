//! Resolver configuration
//!
//! Endpoints of the two external services plus the HTTP timeout, read from
//! the environment with sensible public defaults.

use anyhow::{Context, Result};
use std::time::Duration;
use url::Url;

pub const DEFAULT_DIRECTORY_URL: &str = "https://www.india-location-hub.in/api";
pub const DEFAULT_POSTAL_URL: &str = "https://api.postalpincode.in";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DIRECTORY_URL_VAR: &str = "LOCATION_HUB_API_URL";
const POSTAL_URL_VAR: &str = "POSTAL_PINCODE_API_URL";
const TIMEOUT_VAR: &str = "LOCATION_HTTP_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Base URL of the administrative directory, without trailing slash.
    pub directory_base_url: String,
    /// Base URL of the postal lookup service, without trailing slash.
    pub postal_base_url: String,
    /// `None` leaves outbound requests unbounded.
    pub request_timeout: Option<Duration>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            directory_base_url: DEFAULT_DIRECTORY_URL.to_string(),
            postal_base_url: DEFAULT_POSTAL_URL.to_string(),
            request_timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

impl ResolverConfig {
    /// Build from environment variables, falling back to defaults for unset ones.
    ///
    /// `LOCATION_HTTP_TIMEOUT_SECS=0` disables the timeout.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(DIRECTORY_URL_VAR) {
            config = config
                .with_directory_url(&url)
                .with_context(|| format!("{} is not a valid URL", DIRECTORY_URL_VAR))?;
        }
        if let Ok(url) = std::env::var(POSTAL_URL_VAR) {
            config = config
                .with_postal_url(&url)
                .with_context(|| format!("{} is not a valid URL", POSTAL_URL_VAR))?;
        }
        if let Ok(secs) = std::env::var(TIMEOUT_VAR) {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds", TIMEOUT_VAR))?;
            config = config.with_timeout_secs(secs);
        }

        Ok(config)
    }

    pub fn with_directory_url(mut self, url: &str) -> Result<Self> {
        self.directory_base_url = normalize_base_url(url)?;
        Ok(self)
    }

    pub fn with_postal_url(mut self, url: &str) -> Result<Self> {
        self.postal_base_url = normalize_base_url(url)?;
        Ok(self)
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        self
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    Url::parse(trimmed).with_context(|| format!("Invalid base URL '{}'", raw))?;
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ResolverConfig::default();
        assert_eq!(config.directory_base_url, DEFAULT_DIRECTORY_URL);
        assert_eq!(config.postal_base_url, DEFAULT_POSTAL_URL);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_base_url_trailing_slash_is_stripped() {
        let config = ResolverConfig::default()
            .with_directory_url("http://127.0.0.1:8080/api/")
            .unwrap();
        assert_eq!(config.directory_base_url, "http://127.0.0.1:8080/api");
    }

    #[test]
    fn test_invalid_url_rejected() {
        assert!(ResolverConfig::default().with_postal_url("not a url").is_err());
    }

    #[test]
    fn test_zero_timeout_disables() {
        let config = ResolverConfig::default().with_timeout_secs(0);
        assert_eq!(config.request_timeout, None);
        let config = config.with_timeout_secs(5);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
    }
}
