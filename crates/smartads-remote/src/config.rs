//! Remote authority configuration.

/// Configuration for the backend HTTP client.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL of the backend (e.g. `http://127.0.0.1:5000`).
    pub base_url: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".into(),
            timeout_ms: 5_000,
        }
    }
}

impl RemoteConfig {
    /// Build from the environment: `SMARTADS_API_URL` selects the
    /// backend, defaulting to the local loopback address when unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("SMARTADS_API_URL") {
            if !url.is_empty() {
                config.base_url = url;
            }
        }
        config
    }
}
