//! Client configuration
//!
//! Values come from three places, highest precedence first:
//!
//! 1. explicit values ([`ConfigOverrides`], e.g. CLI flags or a host
//!    configuration block)
//! 2. environment variables (`AUTODNS_ENDPOINT`, `AUTODNS_CONTEXT`,
//!    `AUTODNS_USERNAME`, `AUTODNS_PASSWORD`)
//! 3. defaults ([`DEFAULT_ENDPOINT`], [`DEFAULT_CONTEXT`])
//!
//! Empty strings count as unset at every level.

use crate::error::{Error, Result};

/// Production API endpoint (host and version path, no scheme)
pub const DEFAULT_ENDPOINT: &str = "api.autodns.com/v1";

/// Live system context
///
/// Context `1` is the demo system; `4` or a PersonalAutoDNS context number
/// targets the live system.
pub const DEFAULT_CONTEXT: &str = "4";

pub const ENV_ENDPOINT: &str = "AUTODNS_ENDPOINT";
pub const ENV_CONTEXT: &str = "AUTODNS_CONTEXT";
pub const ENV_USERNAME: &str = "AUTODNS_USERNAME";
pub const ENV_PASSWORD: &str = "AUTODNS_PASSWORD";

/// Explicitly supplied configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub endpoint: Option<String>,
    pub context: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Resolved configuration for one API client
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API endpoint, e.g. `api.autodns.com/v1`
    pub endpoint: String,

    /// Value of the `X-Domainrobot-Context` header
    pub context: String,

    /// Basic-auth user
    pub username: String,

    /// Basic-auth password
    /// ⚠️ NEVER log this value
    pub password: String,
}

// Custom Debug implementation that hides the password
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("context", &self.context)
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .finish()
    }
}

impl ClientConfig {
    /// Create a configuration with the default endpoint and context
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            context: DEFAULT_CONTEXT.to_string(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Set the endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the context
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Resolve against the process environment
    pub fn resolve(overrides: &ConfigOverrides) -> Result<Self> {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve against an arbitrary environment lookup
    pub fn resolve_with<F>(overrides: &ConfigOverrides, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |explicit: &Option<String>, key: &str| -> Option<String> {
            explicit
                .clone()
                .filter(|v| !v.is_empty())
                .or_else(|| env(key).filter(|v| !v.is_empty()))
        };

        let endpoint = pick(&overrides.endpoint, ENV_ENDPOINT)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let context = pick(&overrides.context, ENV_CONTEXT)
            .unwrap_or_else(|| DEFAULT_CONTEXT.to_string());
        let username = pick(&overrides.username, ENV_USERNAME);
        let password = pick(&overrides.password, ENV_PASSWORD);

        let mut missing = Vec::new();
        if username.is_none() {
            missing.push(format!(
                "unknown AutoDNS API username: set it in the configuration or use the {} environment variable",
                ENV_USERNAME
            ));
        }
        if password.is_none() {
            missing.push(format!(
                "unknown AutoDNS API password: set it in the configuration or use the {} environment variable",
                ENV_PASSWORD
            ));
        }
        if !missing.is_empty() {
            return Err(Error::config(missing.join("; ")));
        }

        let config = Self {
            endpoint,
            context,
            username: username.unwrap_or_default(),
            password: password.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.username.is_empty() {
            return Err(Error::config("AutoDNS username cannot be empty"));
        }
        if self.password.is_empty() {
            return Err(Error::config("AutoDNS password cannot be empty"));
        }
        if self.endpoint.trim_end_matches('/').is_empty() {
            return Err(Error::config("AutoDNS endpoint cannot be empty"));
        }
        if self.endpoint.chars().any(char::is_whitespace) {
            return Err(Error::config(format!(
                "AutoDNS endpoint contains whitespace: '{}'",
                self.endpoint
            )));
        }
        if self.context.is_empty() {
            return Err(Error::config("AutoDNS context cannot be empty"));
        }
        Ok(())
    }

    /// Base URL requests are built from
    ///
    /// An endpoint without a scheme gets `https://`; one that already names
    /// `http://` or `https://` is used as-is.
    pub fn base_url(&self) -> String {
        let endpoint = self.endpoint.trim_end_matches('/');
        if endpoint.starts_with("https://") || endpoint.starts_with("http://") {
            endpoint.to_string()
        } else {
            format!("https://{}", endpoint)
        }
    }
}
