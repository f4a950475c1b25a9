//! In-memory [`HttpFetch`] for tests and offline runs.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use reqwest::StatusCode;
use url::Url;

use crate::error::{Result, StreamError};
use crate::http_client::HttpFetch;

/// Serves canned bodies by exact URL and records every request.
/// Unknown URLs answer 404 unless [`MockFetch::with_missing_status`] says
/// otherwise.
pub struct MockFetch {
    responses: HashMap<String, String>,
    missing_status: StatusCode,
    requests: Mutex<Vec<String>>,
}

impl Default for MockFetch {
    fn default() -> Self {
        Self {
            responses: HashMap::new(),
            missing_status: StatusCode::NOT_FOUND,
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl MockFetch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, url: &str, body: &str) -> Self {
        self.responses.insert(url.to_string(), body.to_string());
        self
    }

    /// Status returned for URLs without a canned body.
    pub fn with_missing_status(mut self, status: StatusCode) -> Self {
        self.missing_status = status;
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl HttpFetch for MockFetch {
    async fn get_text(&self, url: &Url) -> Result<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_string());
        self.responses
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| StreamError::Status {
                url: url.to_string(),
                status: self.missing_status,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_status_is_configurable() {
        let http = MockFetch::new().with_missing_status(StatusCode::SERVICE_UNAVAILABLE);
        let url = Url::parse("https://www.kanald.com.tr/canli-yayin").unwrap();

        let err = http.get_text(&url).await.unwrap_err();
        assert!(matches!(
            err,
            StreamError::Status { status, .. } if status == StatusCode::SERVICE_UNAVAILABLE
        ));
        assert_eq!(http.requests(), vec![url.to_string()]);
    }
}
