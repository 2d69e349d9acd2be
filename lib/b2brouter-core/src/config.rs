//! Client configuration types.

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::{Error, Result};

/// Default API version sent in `X-B2B-API-Version`.
pub const DEFAULT_API_VERSION: &str = "2025-10-13";

/// Default API base URL.
pub const DEFAULT_API_BASE: &str = "https://app.b2brouter.net";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(80);

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "B2B_API_KEY";
/// Environment variable holding the API version.
pub const ENV_API_VERSION: &str = "B2B_API_VERSION";
/// Environment variable holding the API base URL.
pub const ENV_API_BASE: &str = "B2B_API_BASE";
/// Environment variable holding the request timeout, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "B2B_TIMEOUT_SECS";

/// Immutable configuration shared by every call made through one client.
///
/// Built once with [`ClientConfig::builder`] (or [`ClientConfig::from_env`])
/// and never mutated afterwards, so clients configured differently can live
/// side by side in one process.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_key: String,
    api_version: String,
    api_base: Url,
    timeout: Duration,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("api_base", &self.api_base.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Configuration with defaults for everything but the API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Read the configuration from `B2B_API_KEY`, `B2B_API_VERSION`,
    /// `B2B_API_BASE` and `B2B_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or a value is malformed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ClientConfig::from_env`] with a custom variable source.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or a value is malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let mut builder = Self::builder();
        if let Some(api_key) = lookup(ENV_API_KEY) {
            builder = builder.api_key(api_key);
        }
        if let Some(api_version) = lookup(ENV_API_VERSION) {
            builder = builder.api_version(api_version);
        }
        if let Some(api_base) = lookup(ENV_API_BASE) {
            builder = builder.api_base(api_base);
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            let secs = timeout.trim().parse::<u64>().map_err(|e| {
                Error::config(format!("{ENV_TIMEOUT_SECS} must be a number of seconds: {e}"))
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build()
    }

    /// API key sent in `X-B2B-API-Key`.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// API version sent in `X-B2B-API-Version`.
    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Base URL every resource path is appended to.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Timeout applied to every request.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve a resource-relative path against the API base.
    ///
    /// The path is appended verbatim, so a base with a path prefix
    /// (`https://host/api/v1`) keeps it.
    ///
    /// # Errors
    ///
    /// Returns an error if the result is not a valid URL.
    pub fn url_for(&self, path: &str) -> Result<Url> {
        let base = self.api_base.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Url::parse(&format!("{base}/{path}")).map_err(Error::InvalidUrl)
    }
}

/// Builder for [`ClientConfig`].
#[derive(Clone, Default)]
pub struct ClientConfigBuilder {
    api_key: Option<String>,
    api_version: Option<String>,
    api_base: Option<String>,
    timeout: Option<Duration>,
}

impl fmt::Debug for ClientConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfigBuilder")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_version", &self.api_version)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfigBuilder {
    /// Set the API key.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the API version.
    #[must_use]
    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    /// Set the API base URL.
    #[must_use]
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or empty, the base URL does
    /// not parse, or the timeout is zero.
    pub fn build(self) -> Result<ClientConfig> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::config(format!("an API key is required (set {ENV_API_KEY})")))?;

        let api_base = self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE);
        let api_base = Url::parse(api_base)
            .map_err(|e| Error::config(format!("invalid API base URL '{api_base}': {e}")))?;
        if api_base.cannot_be_a_base() {
            return Err(Error::config(format!(
                "API base URL '{api_base}' cannot be used as a base"
            )));
        }

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(Error::config("timeout must be greater than zero"));
        }

        Ok(ClientConfig {
            api_key,
            api_version: self
                .api_version
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            api_base,
            timeout,
        })
    }
}
