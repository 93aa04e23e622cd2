// src/services/normalizer.rs

//! Post normalizer.
//!
//! Turns raw feed records into the compact form kept in the posts file.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Card, Post, RawPost};

/// Anything between a `<` and the next `>`, without nesting.
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^<]+?>").expect("valid tag regex"));

/// Remove markup with a flat `<...>` rule.
///
/// This is not an HTML parser. Each `<...>` segment is removed on its own,
/// entities are left untouched, and a stray `<` without a closing `>` stays.
pub fn strip_html(text: &str) -> String {
    TAG.replace_all(text, "").into_owned()
}

/// Normalize one raw post.
///
/// Returns `None` only when the post carries no id; every other missing
/// field becomes absent, empty, or zero.
pub fn normalize(raw: &RawPost) -> Option<Post> {
    let Some(id) = raw.id.clone() else {
        log::warn!(
            "Skipping post without id (created_at: {:?})",
            raw.created_at
        );
        return None;
    };

    Some(Post {
        id,
        created_at: raw.created_at.clone(),
        url: raw.url.clone(),
        content: strip_html(raw.content.as_deref().unwrap_or("")),
        username: raw.account.as_ref().and_then(|a| a.username.clone()),
        media_urls: raw
            .media_attachments
            .iter()
            .filter_map(|m| m.url.clone())
            .collect(),
        card: raw.card.as_ref().map(|c| Card {
            title: c.title.clone(),
            url: c.url.clone(),
        }),
        replies_count: raw.replies_count.unwrap_or(0),
        reblogs_count: raw.reblogs_count.unwrap_or(0),
        favourites_count: raw.favourites_count.unwrap_or(0),
    })
}

/// Normalize a batch, preserving the feed's order.
pub fn normalize_all(raw_posts: &[RawPost]) -> Vec<Post> {
    raw_posts.iter().filter_map(normalize).collect()
}
