// src/pipeline/sync.rs

//! Incremental sync of the remote feed into local storage.
//!
//! Three operations decide which range of the feed to request:
//! - `fresh`: newest page, replacing everything stored
//! - `older`: the page before the oldest stored post, appended
//! - `newer`: everything after the newest stored post, prepended
//!
//! Newest and oldest are found by comparing ids across the whole
//! collection, so the result does not depend on the file's order.

use crate::error::Result;
use crate::models::{Post, PostId, RawAccount, RawPost};
use crate::services::{FeedEndpoint, FeedSource, normalize_all};
use crate::storage::{LocalStorage, MergeMode, MergeSummary};
use crate::utils::now_timestamp;

/// Result of one sync operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// A batch was fetched and merged.
    Merged(MergeSummary),
    /// The endpoint returned nothing usable.
    NoData,
    /// There is nothing newer than what is stored.
    UpToDate,
    /// Nothing stored to page back from.
    NothingToPaginate,
}

/// Id of the most recent post in a collection.
pub fn newest_id(posts: &[Post]) -> Option<&PostId> {
    posts.iter().map(|p| &p.id).max()
}

/// Id of the earliest post in a collection.
pub fn oldest_id(posts: &[Post]) -> Option<&PostId> {
    posts.iter().map(|p| &p.id).min()
}

/// Drives fetches against a [`FeedSource`] and merges into [`LocalStorage`].
pub struct SyncEngine<S> {
    source: S,
    endpoint: FeedEndpoint,
    storage: LocalStorage,
}

impl<S: FeedSource> SyncEngine<S> {
    pub fn new(source: S, endpoint: FeedEndpoint, storage: LocalStorage) -> Self {
        Self {
            source,
            endpoint,
            storage,
        }
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    /// Fetch the newest page and overwrite the local store.
    pub async fn fresh(&self) -> Result<SyncOutcome> {
        log::info!("Fresh fetch of the latest {} posts", self.endpoint.page_size());
        match self.source.fetch_page(&self.endpoint.latest()).await? {
            Some(raw) if !raw.is_empty() => {
                Ok(SyncOutcome::Merged(self.ingest(&raw, MergeMode::Overwrite).await?))
            }
            _ => Ok(SyncOutcome::NoData),
        }
    }

    /// Fetch the page just before the oldest stored post and append it.
    pub async fn older(&self) -> Result<SyncOutcome> {
        let posts = self.storage.existing_posts().await?;
        let Some(oldest) = oldest_id(&posts) else {
            return Ok(SyncOutcome::NothingToPaginate);
        };

        log::info!("Fetching posts older than {}", oldest);
        match self.source.fetch_page(&self.endpoint.older_than(oldest)).await? {
            Some(raw) if !raw.is_empty() => {
                Ok(SyncOutcome::Merged(self.ingest(&raw, MergeMode::Append).await?))
            }
            _ => Ok(SyncOutcome::NoData),
        }
    }

    /// Fetch everything newer than the newest stored post and prepend it.
    ///
    /// With nothing stored this is a fresh fetch.
    pub async fn newer(&self) -> Result<SyncOutcome> {
        let posts = self.storage.existing_posts().await?;
        let Some(newest) = newest_id(&posts) else {
            log::info!("Local store is empty, falling back to a fresh fetch");
            return self.fresh().await;
        };

        log::info!("Fetching posts newer than {}", newest);
        match self.source.fetch_page(&self.endpoint.newer_than(newest)).await? {
            Some(raw) if !raw.is_empty() => {
                Ok(SyncOutcome::Merged(self.ingest(&raw, MergeMode::Prepend).await?))
            }
            _ => Ok(SyncOutcome::UpToDate),
        }
    }

    /// Status code of a minimal request to the feed.
    pub async fn probe(&self) -> Result<u16> {
        self.source.probe(&self.endpoint.probe()).await
    }

    /// Record account stats from the batch, then normalize and merge it.
    async fn ingest(&self, raw: &[RawPost], mode: MergeMode) -> Result<MergeSummary> {
        let account = raw
            .first()
            .and_then(|p| p.account.clone())
            .unwrap_or_default();
        self.record_stats(&account).await?;

        let posts = normalize_all(raw);
        self.storage.merge_posts(posts, mode).await
    }

    async fn record_stats(&self, account: &RawAccount) -> Result<()> {
        let history = self.storage.record_stats(account, now_timestamp()).await?;
        log::debug!("Stats history now has {} samples", history.len());
        Ok(())
    }
}
