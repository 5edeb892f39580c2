//! Transport configuration.
//!
//! Configuration is resolved once at startup and passed into the client,
//! rather than read from the environment during request handling. The base
//! URL is validated eagerly so that a constructed [`ApiConfig`] always
//! yields well-formed endpoints.

use crate::error::{ApiError, ApiResult};
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    base_url: String,
    timeout: Duration,
}

impl ApiConfig {
    /// Creates a configuration for the given backend base URL.
    ///
    /// The URL must use `http://` or `https://`; a trailing slash is
    /// stripped so that endpoint paths join cleanly.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] for a blank URL or an unsupported
    /// scheme.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let base_url = base_url.into();
        let trimmed = base_url.trim();

        if trimmed.is_empty() {
            return Err(ApiError::Config("base URL cannot be empty".into()));
        }
        if !trimmed.starts_with("https://") && !trimmed.starts_with("http://") {
            return Err(ApiError::Config(format!(
                "base URL must use http:// or https:// (got {trimmed})"
            )));
        }

        Ok(Self {
            base_url: trimmed.trim_end_matches('/').to_owned(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The backend base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
