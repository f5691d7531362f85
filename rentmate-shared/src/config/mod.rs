//! # Configuration
//!
//! Tunables for the tag prompt. The web crate embeds [`PromptConfig`] in its
//! frontend configuration; native tests build it directly.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::prompt::PollSchedule;

const DEFAULT_POLL_INTERVAL_MS: u32 = 500;
const DEFAULT_POLL_TIMEOUT_MS: u32 = 5_000;

/// Timing of the trigger poller that covers the gap between a login
/// navigation and the user record arriving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Delay between two trigger checks.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u32,
    /// Total time after which polling gives up silently.
    #[serde(default = "default_poll_timeout_ms")]
    pub poll_timeout_ms: u32,
}

const fn default_poll_interval_ms() -> u32 {
    DEFAULT_POLL_INTERVAL_MS
}

const fn default_poll_timeout_ms() -> u32 {
    DEFAULT_POLL_TIMEOUT_MS
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            poll_timeout_ms: DEFAULT_POLL_TIMEOUT_MS,
        }
    }
}

impl PromptConfig {
    /// Poll schedule for these settings; a zero interval falls back to the
    /// default schedule.
    pub fn schedule(&self) -> PollSchedule {
        PollSchedule::new(
            Duration::from_millis(u64::from(self.poll_interval_ms)),
            Duration::from_millis(u64::from(self.poll_timeout_ms)),
        )
        .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompt_config() {
        let config = PromptConfig::default();
        assert_eq!(config.poll_interval_ms, 500);
        assert_eq!(config.poll_timeout_ms, 5_000);
        let schedule = config.schedule();
        assert_eq!(schedule.interval(), Duration::from_millis(500));
        assert_eq!(schedule.timeout(), Duration::from_secs(5));
        assert_eq!(schedule.max_ticks(), 10);
    }

    #[test]
    fn test_partial_config_uses_field_defaults() {
        let config: PromptConfig = serde_json::from_str(r#"{"poll_timeout_ms":2000}"#).unwrap();
        assert_eq!(config.poll_interval_ms, 500);
        assert_eq!(config.schedule().max_ticks(), 4);
    }

    #[test]
    fn test_zero_interval_falls_back_to_default_schedule() {
        let config = PromptConfig {
            poll_interval_ms: 0,
            poll_timeout_ms: 1_000,
        };
        assert_eq!(config.schedule(), PollSchedule::default());
    }
}
