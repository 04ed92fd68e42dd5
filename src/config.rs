//! Client configuration.
//!
//! Defaults, overridden by environment variables, overridden by CLI flags.

use std::path::PathBuf;
use std::time::Duration;

/// Server used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Connect timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Environment variable overriding the server base URL.
pub const ENV_BASE_URL: &str = "RAGCHAT_BASE_URL";
/// Environment variable overriding the state directory.
pub const ENV_STATE_DIR: &str = "RAGCHAT_STATE_DIR";
/// Environment variable overriding the connect timeout, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "RAGCHAT_TIMEOUT_SECS";

/// Directory name under the platform data dir.
const STATE_DIR_NAME: &str = "ragchat";

/// Configuration for the chat client.
///
/// Use the builder pattern to customize.
///
/// # Example
///
/// ```ignore
/// use ragchat::config::ClientConfig;
///
/// let config = ClientConfig::from_env()
///     .with_base_url("http://chat.internal:8080")
///     .with_request_timeout_secs(5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Server base URL, without a trailing slash
    pub base_url: String,
    /// Where the conversation id is kept
    pub state_dir: PathBuf,
    /// Connect timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            state_dir: default_state_dir(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// `dirs::data_dir()/ragchat`, or `./.ragchat` when the platform has none.
pub fn default_state_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(STATE_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(format!(".{}", STATE_DIR_NAME)))
}

impl ClientConfig {
    /// Create a new ClientConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Set the state directory.
    pub fn with_state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.state_dir = dir.into();
        self
    }

    /// Set the connect timeout in seconds.
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Connect timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Create config from `RAGCHAT_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    ///
    /// Empty values are ignored; an unparsable timeout keeps the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_BASE_URL) {
            config = config.with_base_url(url.trim());
        }
        if let Some(dir) = get(ENV_STATE_DIR) {
            config = config.with_state_dir(dir);
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => config = config.with_request_timeout_secs(secs),
                Err(_) => {
                    tracing::warn!("ignoring invalid {}={:?}", ENV_TIMEOUT_SECS, raw);
                }
            }
        }

        config
    }
}
