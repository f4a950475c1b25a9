//! HLS variant playlist loading
//!
//! Turns a master playlist into a [`StreamSet`]:
//! - `#EXT-X-STREAM-INF` entries become named variants (`720p`, `1500k`)
//! - relative URIs are resolved against the playlist URL
//! - a plain media playlist becomes a single `live` variant

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};
use url::Url;

use super::provider::{HlsVariant, StreamSet};
use crate::error::{Result, StreamError};
use crate::http_client::HttpFetch;

const STREAM_INF: &str = "#EXT-X-STREAM-INF:";

/// Fetch `url` and parse it as a variant playlist.
pub async fn parse_variant_playlist(http: &dyn HttpFetch, url: &Url) -> Result<StreamSet> {
    let content = http.get_text(url).await?;
    let set = parse_playlist(&content, url)?;
    debug!(
        manifest = %url,
        variants = set.variants.len(),
        "Parsed variant playlist"
    );
    Ok(set)
}

/// Parse playlist text fetched from `url`.
pub fn parse_playlist(content: &str, url: &Url) -> Result<StreamSet> {
    let content = content.trim_start_matches('\u{feff}').trim_start();
    if !content.starts_with("#EXTM3U") {
        return Err(StreamError::Playlist {
            url: url.to_string(),
            reason: "missing #EXTM3U header".to_string(),
        });
    }

    let mut variants = if content.contains(STREAM_INF) {
        let variants = parse_master(content, url);
        if variants.is_empty() {
            return Err(StreamError::Playlist {
                url: url.to_string(),
                reason: "no playable variants".to_string(),
            });
        }
        variants
    } else {
        vec![HlsVariant {
            name: "live".to_string(),
            bandwidth: 0,
            height: None,
            codecs: None,
            url: url.to_string(),
        }]
    };

    // Sort by bandwidth (quality) descending; stable so equal rates keep
    // playlist order.
    variants.sort_by(|a, b| b.bandwidth.cmp(&a.bandwidth));

    Ok(StreamSet {
        manifest_url: url.to_string(),
        variants,
    })
}

fn parse_master(content: &str, base: &Url) -> Vec<HlsVariant> {
    let mut variants = Vec::new();
    let mut taken = HashSet::new();
    let mut lines = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .peekable();

    while let Some(line) = lines.next() {
        let Some(rest) = line.strip_prefix(STREAM_INF) else {
            continue;
        };

        let attrs = parse_attributes(rest);
        let Some(uri_line) = lines.next_if(|l| !l.starts_with('#')) else {
            warn!(attributes = rest, "Stream entry without URI, skipping");
            continue;
        };

        let uri = match base.join(uri_line) {
            Ok(uri) => uri,
            Err(e) => {
                warn!(uri = uri_line, error = %e, "Unresolvable variant URI, skipping");
                continue;
            }
        };

        let bandwidth = attrs
            .get("BANDWIDTH")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        let height = attrs
            .get("RESOLUTION")
            .and_then(|r| r.split('x').nth(1))
            .and_then(|h| h.parse().ok());
        let codecs = attrs.get("CODECS").cloned();

        let name = unique_name(&mut taken, variant_name(height, bandwidth));
        variants.push(HlsVariant {
            name,
            bandwidth,
            height,
            codecs,
            url: uri.to_string(),
        });
    }

    variants
}

fn variant_name(height: Option<u32>, bandwidth: u64) -> String {
    match height {
        Some(h) => format!("{h}p"),
        None if bandwidth > 0 => format!("{}k", bandwidth / 1000),
        None => "live".to_string(),
    }
}

/// `720p`, `720p_alt`, `720p_alt2`, ...
fn unique_name(taken: &mut HashSet<String>, base: String) -> String {
    let mut name = base.clone();
    let mut n = 1;
    while taken.contains(&name) {
        name = if n == 1 {
            format!("{base}_alt")
        } else {
            format!("{base}_alt{n}")
        };
        n += 1;
    }
    taken.insert(name.clone());
    name
}

/// Split an `#EXT-X-STREAM-INF` attribute list.
///
/// Quoted values keep their commas. Text between a closing quote and the
/// next comma is dropped.
fn parse_attributes(list: &str) -> HashMap<String, String> {
    let mut attrs = HashMap::new();
    let mut rest = list;

    while let Some((key, tail)) = rest.split_once('=') {
        let tail = tail.trim_start();
        let (value, next) = match tail.strip_prefix('"') {
            Some(quoted) => {
                let (value, after) = quoted.split_once('"').unwrap_or((quoted, ""));
                (value, after.split_once(',').map_or("", |(_, next)| next))
            }
            None => tail.split_once(',').unwrap_or((tail, "")),
        };

        let key = key.trim();
        if !key.is_empty() {
            attrs.insert(key.to_string(), value.trim().to_string());
        }
        rest = next;
    }

    attrs
}
