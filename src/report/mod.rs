//! Read-only queries over the local archive.

mod records;
mod search;
mod trend;
mod unseen;

pub use records::{PostRecords, peak_followers, post_records};
pub use search::search;
pub use trend::{MonthlyCount, monthly_counts};
pub use unseen::{UnseenCheck, review_unseen, select_unseen};
