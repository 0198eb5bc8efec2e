//! High-level client for the Scholar Compass backend.
//!
//! This module provides [`ScholarClient`], the main entry point for
//! fetching a scholar's visuals and streaming their analysis.
//!
//! # Example
//!
//! ```ignore
//! use scholar_compass::{AnalyzeRequest, Result, ScholarClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ScholarClient::builder()
//!         .base_url("http://localhost:5000")
//!         .build()?;
//!
//!     let visuals = client.fetch_visuals("Jane Doe").await?;
//!     let analysis = client
//!         .analyze_and_collect(&AnalyzeRequest::new("Jane Doe", visuals))
//!         .await?;
//!     println!("{analysis}");
//!     Ok(())
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::config::{endpoints, ClientConfig, ClientConfigBuilder, ScholarName};
use crate::protocol::{
    AnalyzeRequest, ApiEnvelope, CollaborationNetwork, ScholarVisuals, TopicCount, VenueStats,
    VisualsQuery,
};
use crate::stream::{with_timeout, AnalysisStream};
use crate::{Error, Result};

/// A client for the Scholar Compass backend.
///
/// `ScholarClient` wraps an HTTP client and the backend location. It
/// provides:
/// - Individual visuals fetches ([`collaboration_network`](Self::collaboration_network),
///   [`topic_evolution`](Self::topic_evolution), [`venue_stats`](Self::venue_stats))
/// - The joined fetch ([`fetch_visuals`](Self::fetch_visuals))
/// - Streamed analysis ([`analyze`](Self::analyze),
///   [`analyze_and_collect`](Self::analyze_and_collect))
///
/// # Thread Safety
///
/// `ScholarClient` is `Send + Sync` and cheap to clone; clones share the
/// underlying connection pool. Concurrent requests are supported.
#[derive(Debug, Clone)]
pub struct ScholarClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl ScholarClient {
    /// Create a new client with the default configuration
    /// (`http://localhost:5000`, no timeout).
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::builder().build()?)
    }

    /// Create a new client with the given configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(agent) = config.user_agent() {
            builder = builder.user_agent(agent.to_string());
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Create a builder for configuring a new client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Fetch the collaboration network for a scholar.
    pub async fn collaboration_network(
        &self,
        scholar: impl Into<ScholarName>,
    ) -> Result<CollaborationNetwork> {
        let scholar = scholar.into();
        self.post_visuals(endpoints::COLLABORATION_NETWORK, &scholar)
            .await
    }

    /// Fetch the per-year topic counts for a scholar.
    pub async fn topic_evolution(
        &self,
        scholar: impl Into<ScholarName>,
    ) -> Result<Vec<TopicCount>> {
        let scholar = scholar.into();
        self.post_visuals(endpoints::TOPIC_EVOLUTION, &scholar).await
    }

    /// Fetch the venue statistics for a scholar.
    pub async fn venue_stats(&self, scholar: impl Into<ScholarName>) -> Result<VenueStats> {
        let scholar = scholar.into();
        self.post_visuals(endpoints::VENUE_STATS, &scholar).await
    }

    /// Fetch all three visuals for a scholar concurrently.
    ///
    /// All-or-nothing: the three requests run in parallel and the first
    /// failure aborts the whole fetch, so the caller never sees partial
    /// data. A backend `error` field on any response surfaces as
    /// [`Error::ScholarNotFound`] (or [`Error::Backend`]).
    pub async fn fetch_visuals(&self, scholar: impl Into<ScholarName>) -> Result<ScholarVisuals> {
        let scholar = scholar.into();
        if scholar.is_empty() {
            return Err(Error::InvalidConfig("scholar name is empty".to_string()));
        }

        tracing::debug!(scholar = %scholar, "fetching visuals");

        let (network, topics, venues) = tokio::try_join!(
            self.collaboration_network(scholar.clone()),
            self.topic_evolution(scholar.clone()),
            self.venue_stats(scholar.clone()),
        )?;

        Ok(ScholarVisuals {
            network,
            topics,
            venues,
        })
    }

    /// Request a streamed analysis, returning an [`AnalysisStream`] with
    /// its own cancellation token.
    ///
    /// This is the low-level streaming API. For simple use cases, prefer
    /// [`analyze_and_collect`](Self::analyze_and_collect).
    pub async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisStream> {
        self.analyze_with_token(request, CancellationToken::new())
            .await
    }

    /// Request a streamed analysis cancelled by an external token.
    ///
    /// Keep the token to abort the stream mid-flight, e.g. when starting
    /// a new analysis while this one is still running.
    pub async fn analyze_with_token(
        &self,
        request: &AnalyzeRequest,
        token: CancellationToken,
    ) -> Result<AnalysisStream> {
        let url = self.config.endpoint(endpoints::ANALYZE)?;

        tracing::debug!(scholar = %request.scholar_name, "starting analysis stream");

        let response = self.http.post(url).json(request).send().await?;

        // A non-2xx answer carries a plain JSON error body, not an event
        // stream; feeding it to the decoder would lose the message.
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await?;
            let envelope: ApiEnvelope<serde_json::Value> = serde_json::from_slice(&body)
                .map_err(|e| Error::json_parse(e, &String::from_utf8_lossy(&body)))?;
            return match envelope.into_result(request.scholar_name.as_str()) {
                Err(e) => Err(e),
                Ok(_) => Err(Error::Backend {
                    message: format!("analyze request failed with status {status}"),
                }),
            };
        }

        Ok(AnalysisStream::with_token(response.bytes_stream(), token))
    }

    /// Request an analysis and collect the full text.
    ///
    /// The configured timeout, if any, bounds the whole operation: sending
    /// the request, waiting for the response, and draining the stream.
    ///
    /// # Errors
    ///
    /// - [`Error::Analysis`] if the backend sent an error frame.
    /// - [`Error::Truncated`] if the stream ended without a terminal frame.
    /// - [`Error::Timeout`] if the configured timeout elapsed first.
    pub async fn analyze_and_collect(&self, request: &AnalyzeRequest) -> Result<String> {
        let collect = async {
            let stream = self.analyze(request).await?;
            stream.collect_text().await
        };

        if let Some(timeout) = self.config.timeout() {
            with_timeout(timeout, collect).await
        } else {
            collect.await
        }
    }

    /// Get a reference to the client's configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// POST one visuals endpoint and unwrap its envelope.
    async fn post_visuals<T: DeserializeOwned>(
        &self,
        path: &str,
        scholar: &ScholarName,
    ) -> Result<T> {
        if scholar.is_empty() {
            return Err(Error::InvalidConfig("scholar name is empty".to_string()));
        }

        let url = self.config.endpoint(path)?;
        let response = self
            .http
            .post(url)
            .json(&VisualsQuery::new(scholar.clone()))
            .send()
            .await?;

        // The error detail lives in the body even on non-2xx statuses, so
        // the body is decoded unconditionally.
        let body = response.bytes().await?;
        let envelope: ApiEnvelope<T> = serde_json::from_slice(&body)
            .map_err(|e| Error::json_parse(e, &String::from_utf8_lossy(&body)))?;
        envelope.into_result(scholar.as_str())
    }
}

/// Builder for [`ScholarClient`].
///
/// This wraps [`ClientConfigBuilder`] and builds directly into a client.
///
/// # Example
///
/// ```ignore
/// let client = ScholarClient::builder()
///     .base_url("https://compass.example.edu")
///     .timeout(std::time::Duration::from_secs(120))
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    inner: ClientConfigBuilder,
}

impl ClientBuilder {
    /// Create a new client builder with default settings.
    pub fn new() -> Self {
        Self {
            inner: ClientConfigBuilder::default(),
        }
    }

    /// Set the backend base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.inner = self.inner.base_url(url);
        self
    }

    /// Set the timeout applied to collect-style requests.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.inner = self.inner.timeout(duration);
        self
    }

    /// Set the User-Agent header sent with every request.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.inner = self.inner.user_agent(agent);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client
    /// cannot be constructed.
    pub fn build(self) -> Result<ScholarClient> {
        ScholarClient::with_config(self.inner.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ScholarClient>();
        assert_send_sync::<ClientBuilder>();
    }

    #[test]
    fn client_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<ScholarClient>();
    }

    #[test]
    fn builder_builds_with_defaults() {
        let client = ScholarClient::builder().build().unwrap();
        assert_eq!(
            client.config().base_url().as_str(),
            "http://localhost:5000/"
        );
    }

    #[test]
    fn builder_chains_options() {
        let client = ScholarClient::builder()
            .base_url("http://compass.test:9000")
            .timeout(Duration::from_secs(45))
            .user_agent("compass-tests")
            .build()
            .unwrap();
        assert_eq!(client.config().timeout(), Some(Duration::from_secs(45)));
        assert_eq!(client.config().user_agent(), Some("compass-tests"));
    }

    #[test]
    fn builder_rejects_bad_base_url() {
        let result = ScholarClient::builder().base_url("::::").build();
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn empty_scholar_name_rejected_before_any_request() {
        let client = ScholarClient::builder().build().unwrap();
        let result = client.fetch_visuals("   ").await;
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn client_clone_shares_config() {
        let client1 = ScholarClient::builder()
            .base_url("http://compass.test")
            .build()
            .unwrap();
        let client2 = client1.clone();
        assert_eq!(
            client1.config().base_url(),
            client2.config().base_url()
        );
    }
}
