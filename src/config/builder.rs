//! Client configuration and builder.
//!
//! This module provides the builder pattern for configuring the Scholar
//! Compass client.
//!
//! # Example
//!
//! ```ignore
//! use scholar_compass::config::ClientConfig;
//! use std::time::Duration;
//!
//! let config = ClientConfig::builder()
//!     .base_url("https://compass.example.edu")
//!     .timeout(Duration::from_secs(120))
//!     .build()?;
//! ```

use std::time::Duration;

use reqwest::Url;

use crate::{Error, Result};

/// Default backend base URL (the development server address).
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Configuration for the Scholar Compass client.
///
/// Use [`ClientConfig::builder()`] to create a new configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // Backend location
    pub(crate) base_url: Url,

    // Request options
    pub(crate) timeout: Option<Duration>,
    pub(crate) user_agent: Option<String>,
}

impl ClientConfig {
    /// Create a new builder for ClientConfig.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Get the backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the timeout if set.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Get the user agent if set.
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// Resolve an endpoint path against the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::InvalidConfig(format!("bad endpoint path {path}: {e}")))
    }
}

/// Builder for [`ClientConfig`].
///
/// The builder validates the configuration when
/// [`build()`](ClientConfigBuilder::build) is called, ensuring the base URL
/// is well-formed.
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            user_agent: None,
        }
    }
}

impl ClientConfigBuilder {
    /// Set the backend base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the timeout applied to collect-style requests.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the User-Agent header sent with every request.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the base URL does not parse or
    /// cannot serve as a base (e.g. a relative URL).
    pub fn build(self) -> Result<ClientConfig> {
        let base_url: Url = self
            .base_url
            .parse()
            .map_err(|e| Error::InvalidConfig(format!("bad base URL {:?}: {e}", self.base_url)))?;

        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidConfig(format!(
                "base URL {:?} cannot serve as a base",
                self.base_url
            )));
        }

        Ok(ClientConfig {
            base_url,
            timeout: self.timeout,
            user_agent: self.user_agent,
        })
    }
}
