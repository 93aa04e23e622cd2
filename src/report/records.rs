//! Superlative records across posts and stats samples.

use crate::models::{Post, StatsHistory, StatsSample};

/// The top post for each engagement counter.
#[derive(Debug, Clone, Copy)]
pub struct PostRecords<'a> {
    pub most_replies: &'a Post,
    pub most_reblogs: &'a Post,
    pub most_favourites: &'a Post,
}

/// Top posts by replies, reblogs and favourites, each chosen independently.
///
/// Ties go to the post that comes first in stored order.
pub fn post_records(posts: &[Post]) -> Option<PostRecords<'_>> {
    Some(PostRecords {
        most_replies: first_max_by_key(posts, |p| p.replies_count)?,
        most_reblogs: first_max_by_key(posts, |p| p.reblogs_count)?,
        most_favourites: first_max_by_key(posts, |p| p.favourites_count)?,
    })
}

/// The sample with the highest follower count; absent counts rank as zero.
pub fn peak_followers(history: &StatsHistory) -> Option<&StatsSample> {
    first_max_by_key(&history.account_history, |s| s.followers_count.unwrap_or(0))
}

/// Like `Iterator::max_by_key`, but keeps the first of equal maxima.
fn first_max_by_key<T, K: Ord>(items: &[T], key: impl Fn(&T) -> K) -> Option<&T> {
    let mut iter = items.iter();
    let mut best = iter.next()?;
    let mut best_key = key(best);
    for item in iter {
        let k = key(item);
        if k > best_key {
            best = item;
            best_key = k;
        }
    }
    Some(best)
}
