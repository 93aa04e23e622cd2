//! Pipeline entry points for feed operations.
//!
//! - `SyncEngine::fresh`: replace the local store with the newest page
//! - `SyncEngine::older`: page back past the oldest stored post
//! - `SyncEngine::newer`: catch up on everything since the newest stored post

pub mod sync;

pub use sync::{SyncEngine, SyncOutcome, newest_id, oldest_id};
