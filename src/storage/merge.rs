//! Merge of freshly fetched posts into the stored collection.

use std::collections::HashSet;
use std::fmt;

use crate::models::{Post, PostId};

/// How a fetched batch is combined with what is already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Replace the whole collection with the batch.
    Overwrite,
    /// Add unseen posts after the existing ones (older pages).
    Append,
    /// Add unseen posts before the existing ones (newer posts).
    Prepend,
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MergeMode::Overwrite => "overwrite",
            MergeMode::Append => "append",
            MergeMode::Prepend => "prepend",
        })
    }
}

/// What a merge did to the posts file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeSummary {
    pub mode: MergeMode,
    /// Posts in the incoming batch
    pub fetched: usize,
    /// Posts actually written that were not stored before
    pub added: usize,
    /// Size of the collection after the merge
    pub total: usize,
}

/// Combine `incoming` with `existing` according to `mode`.
///
/// Existing posts keep their relative order and no id appears twice.
/// Returns the merged collection and how many incoming posts made it in.
pub fn merge_posts(existing: Vec<Post>, incoming: Vec<Post>, mode: MergeMode) -> (Vec<Post>, usize) {
    let seen: HashSet<PostId> = match mode {
        MergeMode::Overwrite => HashSet::new(),
        MergeMode::Append | MergeMode::Prepend => existing.iter().map(|p| p.id.clone()).collect(),
    };
    let fresh = dedup(incoming, seen);
    let added = fresh.len();

    let merged = match mode {
        MergeMode::Overwrite => fresh,
        MergeMode::Append => existing.into_iter().chain(fresh).collect(),
        MergeMode::Prepend => fresh.into_iter().chain(existing).collect(),
    };
    (merged, added)
}

/// Keep the first occurrence of every id not already in `seen`.
fn dedup(posts: Vec<Post>, mut seen: HashSet<PostId>) -> Vec<Post> {
    posts
        .into_iter()
        .filter(|p| seen.insert(p.id.clone()))
        .collect()
}
