//! Stream resolution for Doğan Media Group broadcasters
//!
//! A provider maps a page URL to an HLS master playlist; the [`hls`]
//! loader turns that playlist into named variants.

pub mod hls;
pub mod provider;
pub mod providers;

pub use provider::{HlsVariant, StreamProvider, StreamQuality, StreamSet};
