//! Engine configuration

use serde::{Deserialize, Serialize};

/// What to do when two in-window transactions share an id
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep the later transaction in feed order and report the id in the summary
    #[default]
    LastWriteWins,
    /// Abort the run with `DuplicateTransactionId`
    Reject,
}

/// Settings for a reconciliation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconciliationConfig {
    pub duplicate_policy: DuplicatePolicy,
    /// Log and skip statement feeds that fail to load instead of aborting
    pub skip_unreadable_feeds: bool,
}

impl ReconciliationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    pub fn with_skip_unreadable_feeds(mut self, skip: bool) -> Self {
        self.skip_unreadable_feeds = skip;
        self
    }
}
