//! Frontend configuration module
//!
//! Settings are baked in at build time through `option_env!`, since the
//! bundle has no runtime environment to read.

use log::LevelFilter;
use shared::config::PromptConfig;

/// Frontend configuration for the API endpoint, logging and the tag prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontendConfig {
    /// Base URL of the marketplace REST API.
    pub api_base_url: String,
    /// Most verbose level written to the console.
    pub log_level: LevelFilter,
    /// Trigger poll timing.
    pub prompt: PromptConfig,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self::from_values(
            option_env!("RENTMATE_API_URL"),
            option_env!("RENTMATE_LOG"),
            option_env!("RENTMATE_TAG_POLL_INTERVAL_MS"),
            option_env!("RENTMATE_TAG_POLL_TIMEOUT_MS"),
        )
    }
}

impl FrontendConfig {
    /// Create a new frontend configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    fn from_values(
        api_base_url: Option<&str>,
        log_level: Option<&str>,
        poll_interval_ms: Option<&str>,
        poll_timeout_ms: Option<&str>,
    ) -> Self {
        let defaults = PromptConfig::default();
        Self {
            api_base_url: api_base_url
                .filter(|url| !url.is_empty())
                .unwrap_or("/api")
                .trim_end_matches('/')
                .to_string(),
            log_level: log_level
                .and_then(|level| level.parse().ok())
                .unwrap_or(LevelFilter::Info),
            prompt: PromptConfig {
                poll_interval_ms: poll_interval_ms
                    .and_then(|value| value.parse().ok())
                    .unwrap_or(defaults.poll_interval_ms),
                poll_timeout_ms: poll_timeout_ms
                    .and_then(|value| value.parse().ok())
                    .unwrap_or(defaults.poll_timeout_ms),
            },
        }
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_overrides() {
        let config = FrontendConfig::from_values(None, None, None, None);
        assert_eq!(config.api_base_url(), "/api");
        assert_eq!(config.log_level(), LevelFilter::Info);
        assert_eq!(config.prompt, PromptConfig::default());
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = FrontendConfig::from_values(
            Some("https://rentmate.example/api/"),
            Some("debug"),
            Some("250"),
            Some("3000"),
        );
        assert_eq!(config.api_base_url(), "https://rentmate.example/api");
        assert_eq!(config.log_level(), LevelFilter::Debug);
        assert_eq!(config.prompt.poll_interval_ms, 250);
        assert_eq!(config.prompt.schedule().max_ticks(), 12);
    }

    #[test]
    fn test_unparsable_overrides_fall_back() {
        let config = FrontendConfig::from_values(Some(""), Some("loud"), Some("soon"), None);
        assert_eq!(config.api_base_url(), "/api");
        assert_eq!(config.log_level(), LevelFilter::Info);
        assert_eq!(config.prompt.poll_interval_ms, 500);
    }
}
