//! `dogan-live` - HLS stream resolver for Doğan Media Group channels
//!
//! Resolves the live and on-demand streams behind teve2, Kanal D,
//! CNN Türk, Dream TV and Dream Türk pages.
//!
//! # Example
//!
//! ```rust,no_run
//! use dogan_live::{DoganProvider, HttpClient, StreamProvider, StreamQuality};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = HttpClient::new()?;
//!     let provider = DoganProvider::new();
//!
//!     let url = "https://www.kanald.com.tr/canli-yayin";
//!     if let Some(streams) = provider.resolve_streams(url, &client).await? {
//!         if let Some(best) = streams.select(StreamQuality::Best) {
//!             println!("{} {}", best.name, best.url);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod fingerprint;
pub mod http_client;
pub mod stream;
pub mod testing;

pub use config::Config;
pub use error::{Result, StreamError};
pub use http_client::{HttpClient, HttpFetch};
pub use stream::providers::{DoganProvider, MediaLinkRecord};
pub use stream::{HlsVariant, StreamProvider, StreamQuality, StreamSet};

/// Version of dogan-live
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
