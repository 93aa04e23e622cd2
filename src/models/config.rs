//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Which feed to follow
    #[serde(default)]
    pub feed: FeedConfig,

    /// HTTP pacing and identity
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Where local state lives
    #[serde(default)]
    pub paths: PathsConfig,

    /// Terminal presentation
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.feed.account_id.trim().is_empty() {
            return Err(AppError::validation("feed.account_id is empty"));
        }
        url::Url::parse(&self.feed.base_url)
            .map_err(|e| AppError::validation(format!("feed.base_url is invalid: {e}")))?;
        if self.feed.page_size == 0 {
            return Err(AppError::validation("feed.page_size must be > 0"));
        }
        if self.fetch.user_agents.iter().all(|ua| ua.trim().is_empty()) {
            return Err(AppError::validation("fetch.user_agents has no usable entry"));
        }
        if self.fetch.min_delay_ms > self.fetch.max_delay_ms {
            return Err(AppError::validation(
                "fetch.min_delay_ms must not exceed fetch.max_delay_ms",
            ));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(AppError::validation("fetch.timeout_secs must be > 0"));
        }
        if self.display.chart_width == 0 {
            return Err(AppError::validation("display.chart_width must be > 0"));
        }
        Ok(())
    }
}

/// Feed endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Instance root, e.g. `https://truthsocial.com`
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Account whose statuses are followed
    #[serde(default = "defaults::account_id")]
    pub account_id: String,

    /// Posts requested per page for fresh and older fetches
    #[serde(default = "defaults::page_size")]
    pub page_size: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            account_id: defaults::account_id(),
            page_size: defaults::page_size(),
        }
    }
}

/// HTTP client behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User-Agent headers, one picked at random per request
    #[serde(default = "defaults::user_agents")]
    pub user_agents: Vec<String>,

    /// Lower bound of the pause before each request
    #[serde(default = "defaults::min_delay")]
    pub min_delay_ms: u64,

    /// Upper bound of the pause before each request
    #[serde(default = "defaults::max_delay")]
    pub max_delay_ms: u64,

    /// Pause after an HTTP 429 before the single retry
    #[serde(default = "defaults::rate_limit_pause")]
    pub rate_limit_pause_secs: u64,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agents: defaults::user_agents(),
            min_delay_ms: defaults::min_delay(),
            max_delay_ms: defaults::max_delay(),
            rate_limit_pause_secs: defaults::rate_limit_pause(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Local file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "defaults::data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "defaults::posts_file")]
    pub posts_file: String,

    #[serde(default = "defaults::stats_file")]
    pub stats_file: String,

    #[serde(default = "defaults::last_check_file")]
    pub last_check_file: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: defaults::data_dir(),
            posts_file: defaults::posts_file(),
            stats_file: defaults::stats_file(),
            last_check_file: defaults::last_check_file(),
        }
    }
}

/// Presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Emit ANSI colour codes
    #[serde(default = "defaults::color")]
    pub color: bool,

    /// Ask before listing more unseen posts than this
    #[serde(default = "defaults::unseen_confirm_threshold")]
    pub unseen_confirm_threshold: usize,

    /// Graphemes of content shown next to a record
    #[serde(default = "defaults::snippet_length")]
    pub snippet_length: usize,

    /// Width of the longest bar in the trend chart
    #[serde(default = "defaults::chart_width")]
    pub chart_width: usize,

    /// Image rendered as the startup banner, relative to the data dir
    #[serde(default = "defaults::art_image")]
    pub art_image: String,

    /// Banner width in terminal cells
    #[serde(default = "defaults::art_width")]
    pub art_width: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: defaults::color(),
            unseen_confirm_threshold: defaults::unseen_confirm_threshold(),
            snippet_length: defaults::snippet_length(),
            chart_width: defaults::chart_width(),
            art_image: defaults::art_image(),
            art_width: defaults::art_width(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Feed defaults
    pub fn base_url() -> String {
        "https://truthsocial.com".into()
    }
    pub fn account_id() -> String {
        "107780257626128497".into()
    }
    pub fn page_size() -> u32 {
        40
    }

    // Fetch defaults
    pub fn user_agents() -> Vec<String> {
        vec![
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/109.0.0.0 Safari/537.36".into(),
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/109.0.0.0 Safari/537.36".into(),
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36".into(),
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.1 Safari/605.1.15".into(),
            "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36".into(),
        ]
    }
    pub fn min_delay() -> u64 {
        500
    }
    pub fn max_delay() -> u64 {
        1500
    }
    pub fn rate_limit_pause() -> u64 {
        30
    }
    pub fn timeout() -> u64 {
        30
    }

    // Path defaults
    pub fn data_dir() -> PathBuf {
        PathBuf::from(".")
    }
    pub fn posts_file() -> String {
        "truths.json".into()
    }
    pub fn stats_file() -> String {
        "stats_history.json".into()
    }
    pub fn last_check_file() -> String {
        ".last_check".into()
    }

    // Display defaults
    pub fn color() -> bool {
        true
    }
    pub fn unseen_confirm_threshold() -> usize {
        10
    }
    pub fn snippet_length() -> usize {
        50
    }
    pub fn chart_width() -> usize {
        50
    }
    pub fn art_image() -> String {
        "trump_blocky.png".into()
    }
    pub fn art_width() -> u32 {
        50
    }
}
