// src/models/mod.rs

//! Domain models for the feed archiver.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod post;
mod stats;

// Re-export all public types
pub use config::{Config, DisplayConfig, FeedConfig, FetchConfig, PathsConfig};
pub use post::{Card, Post, PostId, RawAccount, RawCard, RawMedia, RawPost};
pub use stats::{StatsHistory, StatsSample};
