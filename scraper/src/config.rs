use std::env;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_LISTING_URL: &str = "https://remote.com/jobs/all";
pub const LISTING_URL_VAR: &str = "REMOTE_JOBS_URL";

/// Where listings are fetched from and what relative links resolve against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScraperConfig {
    pub listing_url: Url,
    pub origin: Url,
}

impl ScraperConfig {
    pub fn new(listing_url: Url) -> Result<Self, ConfigError> {
        let origin = listing_url
            .join("/")
            .map_err(|source| ConfigError::InvalidUrl {
                var: LISTING_URL_VAR,
                source,
            })?;
        Ok(Self {
            listing_url,
            origin,
        })
    }

    /// Reads `REMOTE_JOBS_URL` (a `.env` file is honoured), falling back to remote.com.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let raw = env::var(LISTING_URL_VAR).unwrap_or_else(|_| DEFAULT_LISTING_URL.to_string());
        let listing_url = Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl {
            var: LISTING_URL_VAR,
            source,
        })?;
        Self::new(listing_url)
    }
}
