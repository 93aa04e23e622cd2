//! Post data structures, stored and raw.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a post in the source system.
///
/// The feed hands these out as numeric strings that grow with creation time,
/// but some mirrors send bare integers. Both forms are accepted and kept as
/// text. Ordering is numeric when both sides are digit strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_numeric(&self) -> bool {
        !self.0.is_empty() && self.0.bytes().all(|b| b.is_ascii_digit())
    }
}

/// Numeric ids sort before any other id; ties on value fall back to the
/// raw text so that `Equal` means identical.
impl Ord for PostId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_numeric(), other.is_numeric()) {
            (true, true) => {
                let a = self.0.trim_start_matches('0');
                let b = other.0.trim_start_matches('0');
                a.len()
                    .cmp(&b.len())
                    .then_with(|| a.cmp(b))
                    .then_with(|| self.0.cmp(&other.0))
            }
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for PostId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PostId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Number(u64),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Text(s) => Self(s),
            Repr::Number(n) => Self(n.to_string()),
        })
    }
}

/// A shared link preview attached to a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// A normalized post as kept in the posts file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,

    /// ISO-8601 creation time, comparable as a string
    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    /// Content with markup stripped
    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub media_urls: Vec<String>,

    #[serde(default)]
    pub card: Option<Card>,

    #[serde(default, deserialize_with = "null_as_zero")]
    pub replies_count: u64,

    #[serde(default, deserialize_with = "null_as_zero")]
    pub reblogs_count: u64,

    #[serde(default, deserialize_with = "null_as_zero")]
    pub favourites_count: u64,
}

impl Post {
    /// Creation time, or the empty string when unknown.
    pub fn created_at_str(&self) -> &str {
        self.created_at.as_deref().unwrap_or("")
    }
}

/// Older posts files wrote `null` for absent counters.
fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or(0))
}

// --- Raw feed records ---

/// Account metadata embedded in every post of the feed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAccount {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub followers_count: Option<u64>,
    #[serde(default)]
    pub statuses_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMedia {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCard {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// A post exactly as the feed endpoint returns it.
///
/// Every field is optional; unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPost {
    #[serde(default)]
    pub id: Option<PostId>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub account: Option<RawAccount>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub media_attachments: Vec<RawMedia>,
    #[serde(default)]
    pub card: Option<RawCard>,
    #[serde(default)]
    pub replies_count: Option<u64>,
    #[serde(default)]
    pub reblogs_count: Option<u64>,
    #[serde(default)]
    pub favourites_count: Option<u64>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<RawMedia>, D::Error> {
    Ok(Option::<Vec<RawMedia>>::deserialize(deserializer)?.unwrap_or_default())
}
