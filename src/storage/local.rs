//! Local filesystem storage implementation.
//!
//! ## Storage Layout
//!
//! ```text
//! {data_dir}/
//! ├── truths.json           # Posts, newest first
//! ├── stats_history.json    # {"account_history": [...]}
//! └── .last_check           # Timestamp of the last unseen-posts review
//! ```
//!
//! Every write replaces the whole file: the bytes go to a temp file which is
//! then renamed over the target.

use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{LoadError, Result};
use crate::models::{PathsConfig, Post, RawAccount, StatsHistory, StatsSample};
use crate::storage::{MergeMode, MergeSummary, merge_posts};

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    posts_key: String,
    stats_key: String,
    marker_key: String,
}

impl LocalStorage {
    /// Create a LocalStorage with the configured file names.
    pub fn new(paths: &PathsConfig) -> Self {
        Self {
            root_dir: paths.data_dir.clone(),
            posts_key: paths.posts_file.clone(),
            stats_key: paths.stats_file.clone(),
            marker_key: paths.last_check_file.clone(),
        }
    }

    /// Create a LocalStorage with default file names under `root_dir`.
    pub fn in_dir(root_dir: impl Into<PathBuf>) -> Self {
        Self::new(&PathsConfig {
            data_dir: root_dir.into(),
            ..PathsConfig::default()
        })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp = path.with_file_name(tmp_name);

        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Write JSON data, pretty-printed with two-space indentation.
    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, distinguishing a missing file from other I/O failures.
    async fn read_bytes(&self, key: &str) -> std::result::Result<Vec<u8>, LoadError> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(LoadError::NotFound(path)),
            Err(e) => Err(LoadError::Io(e)),
        }
    }

    /// Read JSON data.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> std::result::Result<T, LoadError> {
        let bytes = self.read_bytes(key).await?;
        serde_json::from_slice(&bytes).map_err(|source| LoadError::Parse {
            path: self.path(key),
            source,
        })
    }

    // --- Posts ---

    /// Load the stored posts in file order.
    pub async fn load_posts(&self) -> std::result::Result<Vec<Post>, LoadError> {
        self.read_json(&self.posts_key).await
    }

    /// Load the stored posts, treating a missing or corrupt file as empty.
    pub async fn existing_posts(&self) -> Result<Vec<Post>> {
        match self.load_posts().await {
            Ok(posts) => Ok(posts),
            Err(e @ LoadError::NotFound(_)) => {
                log::info!("{}, starting fresh", e);
                Ok(Vec::new())
            }
            Err(e @ LoadError::Parse { .. }) => {
                log::warn!("Treating unreadable posts file as empty, the next fetch replaces it: {}", e);
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Merge a normalized batch into the posts file and rewrite it.
    ///
    /// An empty batch leaves the file untouched.
    pub async fn merge_posts(&self, incoming: Vec<Post>, mode: MergeMode) -> Result<MergeSummary> {
        let fetched = incoming.len();
        if incoming.is_empty() {
            log::info!("No posts to {}, leaving {} as is", mode, self.posts_key);
            return Ok(MergeSummary {
                mode,
                fetched,
                added: 0,
                total: self.existing_posts().await?.len(),
            });
        }

        let existing = match mode {
            MergeMode::Overwrite => Vec::new(),
            MergeMode::Append | MergeMode::Prepend => self.existing_posts().await?,
        };

        let (merged, added) = merge_posts(existing, incoming, mode);
        self.write_json(&self.posts_key, &merged).await?;
        log::info!(
            "{}: {} of {} fetched posts written, {} total",
            mode,
            added,
            fetched,
            merged.len()
        );

        Ok(MergeSummary {
            mode,
            fetched,
            added,
            total: merged.len(),
        })
    }

    // --- Stats history ---

    /// Load the account history.
    pub async fn load_stats(&self) -> std::result::Result<StatsHistory, LoadError> {
        self.read_json(&self.stats_key).await
    }

    /// Append one sample taken from `account` and rewrite the history.
    pub async fn record_stats(&self, account: &RawAccount, timestamp: String) -> Result<StatsHistory> {
        let mut history = match self.load_stats().await {
            Ok(history) => history,
            Err(e) if e.is_absent_or_corrupt() => {
                log::info!("No usable stats history ({}), starting a new one", e);
                StatsHistory::default()
            }
            Err(e) => return Err(e.into()),
        };

        history.push(StatsSample {
            timestamp,
            followers_count: account.followers_count,
            statuses_count: account.statuses_count,
        });
        self.write_json(&self.stats_key, &history).await?;
        Ok(history)
    }

    // --- Last check marker ---

    /// Read the last review timestamp, `None` if never reviewed.
    pub async fn read_marker(&self) -> Result<Option<String>> {
        match self.read_bytes(&self.marker_key).await {
            Ok(bytes) => {
                let text = String::from_utf8_lossy(&bytes).trim().to_string();
                Ok((!text.is_empty()).then_some(text))
            }
            Err(LoadError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite the last review timestamp.
    pub async fn write_marker(&self, timestamp: &str) -> Result<()> {
        self.write_bytes(&self.marker_key, timestamp.as_bytes()).await
    }
}
