//! Service layer for the feed archiver.
//!
//! This module contains the business logic for:
//! - Talking to the feed endpoint (`FeedClient`, `FeedEndpoint`)
//! - Normalizing raw posts into stored posts (`normalizer`)

mod feed;
pub mod normalizer;

pub use feed::{FeedClient, FeedEndpoint, FeedSource};
pub use normalizer::{normalize, normalize_all, strip_html};
