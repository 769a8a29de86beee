//! Client configuration

use std::path::PathBuf;
use std::time::Duration;

/// Client configuration for connecting to the employee directory API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root (e.g., "http://localhost:5000/api"); `employees` and `health` live under it
    pub base_url: String,

    /// Request timeout in seconds, applied to every call
    pub timeout: u64,

    /// Image host upload endpoint
    pub image_host_url: String,

    /// Image host API key, sent as the `key` query parameter
    pub image_host_key: Option<String>,

    /// Where the session record is persisted (None = memory only)
    pub session_path: Option<PathBuf>,

    /// Delay before a search keystroke triggers a fetch (0 = immediate)
    pub search_debounce_ms: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            image_host_url: "https://api.imgbb.com/1/upload".to_string(),
            image_host_key: None,
            session_path: None,
            search_debounce_ms: 0,
        }
    }

    /// Load configuration from `ROSTER_*` environment variables
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("ROSTER_API_URL").unwrap_or_else(|_| "http://localhost:5000/api".into()),
        );
        if let Some(timeout) = env_parse("ROSTER_TIMEOUT_SECS") {
            config.timeout = timeout;
        }
        if let Ok(url) = std::env::var("ROSTER_IMAGE_HOST_URL")
            && !url.is_empty()
        {
            config.image_host_url = url;
        }
        config.image_host_key = std::env::var("ROSTER_IMAGE_HOST_KEY").ok().filter(|s| !s.is_empty());
        config.session_path = std::env::var("ROSTER_SESSION_PATH")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
        if let Some(ms) = env_parse("ROSTER_SEARCH_DEBOUNCE_MS") {
            config.search_debounce_ms = ms;
        }
        config
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the image host endpoint and key
    pub fn with_image_host(mut self, url: impl Into<String>, key: Option<String>) -> Self {
        self.image_host_url = url.into();
        self.image_host_key = key;
        self
    }

    /// Persist the session at `path`
    pub fn with_session_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_path = Some(path.into());
        self
    }

    /// Debounce search keystrokes
    pub fn with_search_debounce_ms(mut self, ms: u64) -> Self {
        self.search_debounce_ms = ms;
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn search_debounce(&self) -> Option<Duration> {
        (self.search_debounce_ms > 0).then(|| Duration::from_millis(self.search_debounce_ms))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000/api")
    }
}

fn env_parse(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = ClientConfig::new("http://api.test")
            .with_timeout(5)
            .with_search_debounce_ms(250);

        assert_eq!(config.timeout_duration(), Duration::from_secs(5));
        assert_eq!(config.search_debounce(), Some(Duration::from_millis(250)));
        assert!(config.session_path.is_none());
        assert_eq!(ClientConfig::default().search_debounce(), None);
    }
}
