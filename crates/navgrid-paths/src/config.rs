//! Per-search options shared by both executors.

/// What to do when the start cell itself is blocked.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockedStartPolicy {
    /// Search out of the blocked cell as if it were walkable. An agent that
    /// ends up standing in a freshly blocked cell can still leave it.
    #[default]
    Allow,
    /// Fail the query with [`PathError::StartBlocked`](crate::PathError::StartBlocked).
    Reject,
}

/// Search options.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Emit a `debug` log record with the elapsed time, endpoints and path
    /// length of every search.
    pub log_timing: bool,
    pub blocked_start: BlockedStartPolicy,
}

impl SearchConfig {
    /// Enable or disable timing logs (builder).
    pub fn with_log_timing(mut self, on: bool) -> Self {
        self.log_timing = on;
        self
    }

    /// Set the blocked-start policy (builder).
    pub fn with_blocked_start(mut self, policy: BlockedStartPolicy) -> Self {
        self.blocked_start = policy;
        self
    }
}
