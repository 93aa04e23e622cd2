// src/services/feed.rs

//! Feed client.
//!
//! Thin HTTP layer over the account statuses endpoint. Requests are paced
//! with a short random pause and a rotating User-Agent; a rate-limited
//! request is retried exactly once after a fixed pause.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use rand::seq::SliceRandom;
use reqwest::{Client, Response, StatusCode};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{FeedConfig, FetchConfig, PostId, RawPost};

/// Source of feed pages.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch one page of posts.
    ///
    /// `Ok(None)` means the endpoint answered with something other than 200
    /// (after the single rate-limit retry).
    async fn fetch_page(&self, url: &Url) -> Result<Option<Vec<RawPost>>>;

    /// Issue one request and report only its status code.
    async fn probe(&self, url: &Url) -> Result<u16>;
}

/// Builds statuses URLs for one account.
#[derive(Debug, Clone)]
pub struct FeedEndpoint {
    statuses: Url,
    page_size: u32,
}

impl FeedEndpoint {
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)?;
        let statuses = base.join(&format!(
            "api/v1/accounts/{}/statuses",
            config.account_id.trim()
        ))?;
        Ok(Self {
            statuses,
            page_size: config.page_size,
        })
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Newest page, replies excluded.
    pub fn latest(&self) -> Url {
        self.with_query(&[
            ("exclude_replies", "true".to_string()),
            ("limit", self.page_size.to_string()),
        ])
    }

    /// Page of posts strictly older than `max_id`, replies excluded.
    pub fn older_than(&self, max_id: &PostId) -> Url {
        self.with_query(&[
            ("exclude_replies", "true".to_string()),
            ("limit", self.page_size.to_string()),
            ("max_id", max_id.to_string()),
        ])
    }

    /// Every post strictly newer than `since_id`.
    pub fn newer_than(&self, since_id: &PostId) -> Url {
        self.with_query(&[("since_id", since_id.to_string())])
    }

    /// Cheapest possible request, for connectivity checks.
    pub fn probe(&self) -> Url {
        self.with_query(&[("limit", "1".to_string())])
    }

    fn with_query(&self, pairs: &[(&str, String)]) -> Url {
        let mut url = self.statuses.clone();
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in pairs {
                query.append_pair(key, value);
            }
        }
        url
    }
}

/// HTTP implementation of [`FeedSource`].
pub struct FeedClient {
    client: Client,
    config: FetchConfig,
}

impl FeedClient {
    /// Create a client with the configured timeout.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        if config.user_agents.iter().all(|ua| ua.trim().is_empty()) {
            return Err(AppError::config("no user agents configured"));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn pick_user_agent(&self) -> &str {
        self.config
            .user_agents
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
            .unwrap_or_default()
    }

    async fn pace(&self) {
        let (low, high) = (self.config.min_delay_ms, self.config.max_delay_ms);
        let delay = if high > low {
            rand::thread_rng().gen_range(low..=high)
        } else {
            low
        };
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
    }

    async fn send(&self, url: &Url) -> Result<Response> {
        log::debug!("Fetching {}", url);
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::USER_AGENT, self.pick_user_agent())
            .send()
            .await?;
        Ok(response)
    }

    /// Paced request.
    async fn get(&self, url: &Url) -> Result<Response> {
        self.pace().await;
        self.send(url).await
    }
}

#[async_trait]
impl FeedSource for FeedClient {
    async fn fetch_page(&self, url: &Url) -> Result<Option<Vec<RawPost>>> {
        let mut response = self.get(url).await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            log::warn!(
                "Received HTTP 429 from {}; pausing {}s before one retry",
                url,
                self.config.rate_limit_pause_secs
            );
            tokio::time::sleep(Duration::from_secs(self.config.rate_limit_pause_secs)).await;
            response = self.send(url).await?;
        }

        if response.status() != StatusCode::OK {
            log::warn!("No data from {}: HTTP {}", url, response.status());
            return Ok(None);
        }

        Ok(Some(response.json::<Vec<RawPost>>().await?))
    }

    async fn probe(&self, url: &Url) -> Result<u16> {
        Ok(self.get(url).await?.status().as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> FeedEndpoint {
        FeedEndpoint::new(&FeedConfig {
            base_url: "https://social.example.com".into(),
            account_id: "1234".into(),
            page_size: 40,
        })
        .unwrap()
    }

    #[test]
    fn test_latest_url() {
        assert_eq!(
            endpoint().latest().as_str(),
            "https://social.example.com/api/v1/accounts/1234/statuses?exclude_replies=true&limit=40"
        );
    }

    #[test]
    fn test_older_than_url() {
        assert_eq!(
            endpoint().older_than(&PostId::new("99")).as_str(),
            "https://social.example.com/api/v1/accounts/1234/statuses?exclude_replies=true&limit=40&max_id=99"
        );
    }

    #[test]
    fn test_newer_than_url_is_unbounded() {
        let url = endpoint().newer_than(&PostId::new("100"));
        assert_eq!(url.query(), Some("since_id=100"));
    }

    #[test]
    fn test_probe_url() {
        assert_eq!(endpoint().probe().query(), Some("limit=1"));
    }

    #[test]
    fn test_client_requires_user_agent() {
        let config = FetchConfig {
            user_agents: vec![" ".into()],
            ..FetchConfig::default()
        };
        assert!(FeedClient::new(&config).is_err());
    }
}
