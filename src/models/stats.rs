//! Account growth history.

use serde::{Deserialize, Serialize};

/// One snapshot of the account counters, taken per successful fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsSample {
    pub timestamp: String,
    #[serde(default)]
    pub followers_count: Option<u64>,
    #[serde(default)]
    pub statuses_count: Option<u64>,
}

/// Append-only series of samples, as stored in the stats file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsHistory {
    #[serde(default)]
    pub account_history: Vec<StatsSample>,
}

impl StatsHistory {
    pub fn push(&mut self, sample: StatsSample) {
        self.account_history.push(sample);
    }

    pub fn len(&self) -> usize {
        self.account_history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.account_history.is_empty()
    }
}
