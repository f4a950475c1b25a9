//! Stream provider trait and common types.
//!
//! A [`StreamProvider`] knows how to turn a broadcaster page URL into the
//! HLS master playlist behind it, and from there into a [`StreamSet`] of
//! named variants.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::http_client::HttpFetch;

/// Quality selection strategy for stream variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamQuality {
    /// Highest available bitrate.
    Best,
    /// Lowest available bitrate.
    Worst,
    /// Closest match to the given height in pixels (e.g., 720, 1080).
    Specific(u32),
}

impl StreamQuality {
    /// Parse `best`, `worst`, `720` or `720p`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "best" => Some(Self::Best),
            "worst" => Some(Self::Worst),
            q => q
                .strip_suffix('p')
                .unwrap_or(q)
                .parse::<u32>()
                .ok()
                .map(Self::Specific),
        }
    }
}

/// A single rendition listed in a master playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HlsVariant {
    /// Display name (`720p`, `1500k`, `720p_alt`, `live`).
    pub name: String,
    /// Bitrate in bits per second (0 if not declared).
    pub bandwidth: u64,
    /// Vertical resolution in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Codec string (e.g., `"avc1.4d401f,mp4a.40.2"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codecs: Option<String>,
    /// Absolute URL of the media playlist.
    pub url: String,
}

/// Variants resolved from one master playlist, highest bandwidth first.
#[derive(Debug, Clone, Serialize)]
pub struct StreamSet {
    /// URL of the master (or single media) playlist.
    pub manifest_url: String,
    pub variants: Vec<HlsVariant>,
}

impl StreamSet {
    /// Look up a variant by name.
    pub fn get(&self, name: &str) -> Option<&HlsVariant> {
        self.variants.iter().find(|v| v.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|v| v.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Pick a variant for the given quality.
    ///
    /// `Specific` picks the closest declared height; when no variant
    /// declares a resolution it falls back to the best one.
    pub fn select(&self, quality: StreamQuality) -> Option<&HlsVariant> {
        match quality {
            StreamQuality::Best => self.variants.first(),
            StreamQuality::Worst => self.variants.last(),
            StreamQuality::Specific(height) => self
                .variants
                .iter()
                .filter_map(|v| v.height.map(|h| (h.abs_diff(height), v)))
                .min_by_key(|(diff, _)| *diff)
                .map(|(_, v)| v)
                .or_else(|| self.variants.first()),
        }
    }
}

/// Trait for broadcaster stream providers.
///
/// Providers only decide whether they handle a URL and how to resolve it;
/// routing between providers is the caller's job.
#[async_trait]
pub trait StreamProvider: Send + Sync {
    /// Short lowercase provider name (e.g., `"dogan"`).
    fn name(&self) -> &'static str;

    /// Returns `true` if this provider can handle the given page URL.
    fn matches(&self, url: &str) -> bool;

    /// Resolve the streams behind a page URL.
    ///
    /// Returns `Ok(None)` when the page carries no stream reference; fetch
    /// and validation failures are errors.
    async fn resolve_streams(&self, url: &str, http: &dyn HttpFetch) -> Result<Option<StreamSet>>;
}
