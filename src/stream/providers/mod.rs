//! Broadcaster stream providers

pub mod dogan;

pub use dogan::{DoganProvider, MediaLinkRecord};
