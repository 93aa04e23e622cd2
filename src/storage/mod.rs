//! Storage for the local post archive.
//!
//! Three JSON-ish files make up the whole state:
//! - the posts file, an ordered array of normalized posts, newest first
//! - the stats history, an append-only series of account counters
//! - the last-check marker, a single timestamp line
//!
//! Files are read fully, changed in memory and rewritten whole. There is no
//! locking; one session at a time is assumed.

pub mod local;
mod merge;

// Re-export for convenience
pub use local::LocalStorage;
pub use merge::{MergeMode, MergeSummary, merge_posts};
