//! HTTP Client
//!
//! Features:
//! - TLS via rustls, HTTP/2 when negotiated
//! - Brotli, Gzip, Deflate compression (auto-negotiated)
//! - Cookie store shared between page, API and playlist requests
//! - Realistic desktop browser headers

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use crate::config::HttpConfig;
use crate::error::{Result, StreamError};
use crate::fingerprint::{random_profile, BrowserProfile};

/// GET capability used by providers and the playlist loader.
///
/// Transport failures and non-success statuses are both reported as fetch
/// errors (see [`StreamError::is_fetch`]).
#[async_trait]
pub trait HttpFetch: Send + Sync {
    /// Fetch `url` and return the decoded body.
    async fn get_text(&self, url: &Url) -> Result<String>;
}

/// HTTP client for broadcaster pages, content APIs and playlists
pub struct HttpClient {
    client: Client,
    profile: BrowserProfile,
}

impl HttpClient {
    /// Create a client with default settings
    pub fn new() -> Result<Self> {
        Self::from_config(&HttpConfig::default())
    }

    /// Create a client from the `[http]` config section
    pub fn from_config(config: &HttpConfig) -> Result<Self> {
        let mut profile = random_profile().with_accept_language(&config.accept_language);
        if let Some(ua) = &config.user_agent {
            profile = profile.with_user_agent(ua);
        }
        Self::with_profile(profile, config.connect_timeout(), config.timeout())
    }

    /// Create client with specific browser profile
    pub fn with_profile(
        profile: BrowserProfile,
        connect_timeout: Duration,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            // ═══════════════════════════════════════════════════════════════
            // CONNECTIONS
            // ═══════════════════════════════════════════════════════════════
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .use_rustls_tls()
            // ═══════════════════════════════════════════════════════════════
            // COMPRESSION (auto-negotiated via Accept-Encoding)
            // ═══════════════════════════════════════════════════════════════
            .brotli(true)
            .gzip(true)
            .deflate(true)
            // ═══════════════════════════════════════════════════════════════
            // BROWSER FINGERPRINTING
            // ═══════════════════════════════════════════════════════════════
            .default_headers(profile.to_headers())
            // ═══════════════════════════════════════════════════════════════
            // TIMEOUTS
            // ═══════════════════════════════════════════════════════════════
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            // ═══════════════════════════════════════════════════════════════
            // REDIRECTS & COOKIES
            // ═══════════════════════════════════════════════════════════════
            .redirect(reqwest::redirect::Policy::limited(10))
            .cookie_store(true)
            .build()
            .map_err(StreamError::Client)?;

        Ok(Self { client, profile })
    }

    /// Get the browser profile the client sends
    pub fn profile(&self) -> &BrowserProfile {
        &self.profile
    }
}

#[async_trait]
impl HttpFetch for HttpClient {
    #[instrument(skip(self), fields(url = %url))]
    async fn get_text(&self, url: &Url) -> Result<String> {
        let fetch_err = |source| StreamError::Fetch {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(fetch_err)?;

        let status = response.status();
        debug!(status = %status, version = ?response.version(), "Response received");

        if !status.is_success() {
            return Err(StreamError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(fetch_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::firefox_profile;

    #[test]
    fn test_client_from_default_config() {
        let client = HttpClient::new().unwrap();
        assert!(!client.profile().user_agent.is_empty());
    }

    #[test]
    fn test_configured_user_agent_wins() {
        let config = HttpConfig {
            user_agent: Some("dogan-live-test".to_string()),
            ..HttpConfig::default()
        };
        let client = HttpClient::from_config(&config).unwrap();
        assert_eq!(client.profile().user_agent, "dogan-live-test");
    }

    #[test]
    fn test_with_profile() {
        let client = HttpClient::with_profile(
            firefox_profile(),
            Duration::from_secs(1),
            Duration::from_secs(2),
        )
        .unwrap();
        assert!(client.profile().user_agent.contains("Firefox"));
    }

    #[tokio::test]
    async fn test_connection_failure_is_fetch_error() {
        let client = HttpClient::with_profile(
            firefox_profile(),
            Duration::from_secs(1),
            Duration::from_secs(2),
        )
        .unwrap();
        // Port 9 (discard) on localhost is closed on test machines.
        let url = Url::parse("http://127.0.0.1:9/canli-yayin").unwrap();
        let err = client.get_text(&url).await.unwrap_err();
        assert!(err.is_fetch());
    }
}
