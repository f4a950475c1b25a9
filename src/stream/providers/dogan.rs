//! Doğan Media Group live and on-demand streams
//!
//! Covers teve2, Kanal D, CNN Türk, Dream TV and Dream Türk. The player page
//! embeds a content id; the site's content API maps it to a media host and a
//! secure path that together form the HLS master playlist URL.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::{Captures, Regex};
use serde::Deserialize;
use tracing::{debug, error};
use url::Url;

use crate::error::{Result, StreamError};
use crate::http_client::HttpFetch;
use crate::stream::hls;
use crate::stream::provider::{StreamProvider, StreamSet};

/// Supported page URLs. Scheme and host are case-insensitive, paths are not.
pub static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?i:https?://(?:www\.)?)(?:(?i:teve2\.com\.tr)/(?:canli-yayin|filmler/|programlar/)|(?i:kanald\.com\.tr)/|(?i:cnnturk\.com)/canli-yayin|(?i:dreamtv\.com\.tr)/canli-yayin|(?i:dreamturk\.com\.tr)/canli)",
    )
    .unwrap()
});

/// Opening tag of the player container, one pattern per quote style.
static PLAYER_CTRL_REGEXES: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r#"(?s)<div[^>]*?ng-controller="(?:Live)?PlayerCtrl".*?>"#).unwrap(),
        Regex::new(r"(?s)<div[^>]*?ng-controller='(?:Live)?PlayerCtrl'.*?>").unwrap(),
    ]
});

static DATA_ID_REGEXES: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r#"data-id="(\w+)""#).unwrap(),
        Regex::new(r"data-id='(\w+)'").unwrap(),
    ]
});

static CONTENT_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""contentId", "(\w+)""#).unwrap());

static DIV_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<(/?)div\b").unwrap());

const CONTENT_API: &str = "/actions/content/media/";
/// CNN Türk serves the same payload from a shorter path.
const ALT_CONTENT_API: &str = "/action/media/";

/// Stream provider for the Doğan broadcaster sites.
#[derive(Debug, Default, Clone, Copy)]
pub struct DoganProvider;

impl DoganProvider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Returns `true` for the supported teve2, Kanal D, CNN Türk, Dream TV
    /// and Dream Türk page URLs.
    pub fn can_handle(url: &str) -> bool {
        URL_REGEX.is_match(url)
    }

    /// Fetch the page and extract its content id.
    pub async fn content_id(&self, http: &dyn HttpFetch, page_url: &Url) -> Result<Option<String>> {
        let html = http.get_text(page_url).await?;
        Ok(Self::extract_content_id(&html))
    }

    /// Extract the content id from page markup.
    ///
    /// The `data-id` of the `PlayerCtrl`/`LivePlayerCtrl` container is
    /// preferred; otherwise a `"contentId", "<id>"` script marker anywhere
    /// in the page is used.
    pub fn extract_content_id(html: &str) -> Option<String> {
        Self::player_ctrl_data_id(html).or_else(|| {
            CONTENT_ID_REGEX
                .captures(html)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
        })
    }

    fn player_ctrl_data_id(html: &str) -> Option<String> {
        let tag = leftmost(PLAYER_CTRL_REGEXES.as_slice(), html)?.get(0)?;

        // The id sits on the container itself or on one of its descendants.
        let body = &html[tag.end()..element_end(html, tag.end())];
        [tag.as_str(), body].into_iter().find_map(|scope| {
            leftmost(DATA_ID_REGEXES.as_slice(), scope)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
        })
    }

    /// Content API URL for `content_id`, relative to the page's origin.
    pub fn api_url(page_url: &Url, content_id: &str) -> Result<Url> {
        let template = if page_url.host_str().is_some_and(|h| h.contains("cnnturk")) {
            debug!("Using alternative content API url");
            ALT_CONTENT_API
        } else {
            CONTENT_API
        };
        Ok(page_url.join(&format!("{template}{content_id}"))?)
    }

    /// Query the content API and build the master playlist URL.
    pub async fn hls_url(
        &self,
        http: &dyn HttpFetch,
        page_url: &Url,
        content_id: &str,
    ) -> Result<Url> {
        let api_url = Self::api_url(page_url, content_id)?;
        let body = http.get_text(&api_url).await?;
        MediaLinkRecord::from_json(&body)?.stream_url()
    }
}

#[async_trait]
impl StreamProvider for DoganProvider {
    fn name(&self) -> &'static str {
        "dogan"
    }

    fn matches(&self, url: &str) -> bool {
        Self::can_handle(url)
    }

    async fn resolve_streams(&self, url: &str, http: &dyn HttpFetch) -> Result<Option<StreamSet>> {
        let page_url = Url::parse(url)?;

        let Some(content_id) = self.content_id(http, &page_url).await? else {
            error!(url = %page_url, "Could not find the contentId for this stream");
            return Ok(None);
        };

        debug!(content_id = %content_id, "Loading content");
        let hls_url = self.hls_url(http, &page_url, &content_id).await?;
        hls::parse_variant_playlist(http, &hls_url).await.map(Some)
    }
}

/// Validated content API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaLinkRecord {
    pub id: String,
    pub default_service_url: Url,
    /// Preferred media host; `None` when absent, null or empty.
    pub service_url: Option<Url>,
    pub secure_path: String,
}

impl MediaLinkRecord {
    /// Parse and validate a content API body.
    pub fn from_json(body: &str) -> Result<Self> {
        let response: ContentApiResponse = serde_json::from_str(body)?;
        let link = response.media.link;

        let default_service_url = parse_service_url("DefaultServiceUrl", &link.default_service_url)?;
        let service_url = match link.service_url.as_deref() {
            None | Some("") => None,
            Some(s) => Some(parse_service_url("ServiceUrl", s)?),
        };

        Ok(Self {
            id: response.id,
            default_service_url,
            service_url,
            secure_path: link.secure_path,
        })
    }

    /// Join the secure path onto the preferred service URL.
    pub fn stream_url(&self) -> Result<Url> {
        let base = self.service_url.as_ref().unwrap_or(&self.default_service_url);
        base.join(&self.secure_path).map_err(|e| {
            StreamError::Validation(format!("cannot join SecurePath {:?}: {e}", self.secure_path))
        })
    }
}

fn parse_service_url(field: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value)
        .map_err(|e| StreamError::Validation(format!("{field} {value:?} is not a URL: {e}")))?;
    if !url.has_host() {
        return Err(StreamError::Validation(format!(
            "{field} {value:?} has no host"
        )));
    }
    Ok(url)
}

/// Leftmost match across alternative patterns; earlier patterns win ties.
fn leftmost<'h>(patterns: &[Regex], haystack: &'h str) -> Option<Captures<'h>> {
    patterns
        .iter()
        .filter_map(|re| re.captures(haystack))
        .min_by_key(|c| c.get(0).map_or(usize::MAX, |m| m.start()))
}

/// Byte offset of the `</div>` closing the element whose opening tag ends
/// at `start`, or the end of the document if it is never closed.
fn element_end(html: &str, start: usize) -> usize {
    let mut depth = 1usize;
    for caps in DIV_TAG_REGEX.captures_iter(&html[start..]) {
        let Some(tag) = caps.get(0) else { continue };
        if caps.get(1).is_some_and(|m| m.as_str() == "/") {
            depth -= 1;
            if depth == 0 {
                return start + tag.start();
            }
        } else {
            depth += 1;
        }
    }
    html.len()
}

// ============================================================================
// Content API Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ContentApiResponse {
    #[serde(rename = "Id")]
    id: String,
    #[serde(rename = "Media")]
    media: ApiMedia,
}

#[derive(Debug, Deserialize)]
struct ApiMedia {
    #[serde(rename = "Link")]
    link: ApiLink,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiLink {
    default_service_url: String,
    #[serde(default)]
    service_url: Option<String>,
    secure_path: String,
}
