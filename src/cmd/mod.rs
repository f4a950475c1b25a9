pub mod check;
pub mod streams;
pub mod url;

use anyhow::{anyhow, bail, Result};

use dogan_live::{Config, DoganProvider, HttpClient, StreamProvider, StreamSet};

/// Resolve a page URL with the configured HTTP client.
pub async fn resolve(url: &str, config: &Config) -> Result<StreamSet> {
    let provider = DoganProvider::new();
    if !provider.matches(url) {
        bail!("Unsupported URL: {url}");
    }

    let client = HttpClient::from_config(&config.http)?;
    provider
        .resolve_streams(url, &client)
        .await?
        .ok_or_else(|| anyhow!("No content id found on {url}"))
}
