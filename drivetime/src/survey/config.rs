//! Survey run configuration.

use std::time::Duration;

use crate::domain::DEFAULT_RESERVED_SLOTS;
use crate::row::OutputMode;

/// Configuration parameters for a survey run.
#[derive(Debug, Clone)]
pub struct SurveyConfig {
    /// Which route fields each row carries.
    pub mode: OutputMode,

    /// Empty candidate slots appended after the real ones.
    pub reserved_slots: usize,

    /// Pause between consecutive queries (seconds).
    /// Querying too often trips the provider's automation checks.
    pub delay_secs: u64,
}

impl SurveyConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(mode: OutputMode, reserved_slots: usize, delay_secs: u64) -> Self {
        Self {
            mode,
            reserved_slots,
            delay_secs,
        }
    }

    /// Returns the inter-query delay as a Duration.
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            mode: OutputMode::Optimal,
            reserved_slots: DEFAULT_RESERVED_SLOTS,
            delay_secs: 10,
        }
    }
}
