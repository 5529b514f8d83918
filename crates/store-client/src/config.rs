use std::time::Duration;

use anyhow::{Context, Result};

/// Connection settings for the hosted record store.
///
/// Constructed explicitly and handed to [`crate::StoreClient::new`] so tests
/// can point a client at a mock endpoint; nothing here is process-global.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Service root, e.g. `https://abcdefgh.supabase.co`. The REST prefix
    /// (`/rest/v1`) is appended per request.
    pub base_url: String,
    /// Publishable API key, sent as both `apikey` header and bearer token.
    pub api_key: String,
    /// Per-request timeout. Expiry surfaces as a transport error so a hung
    /// store cannot block a page render indefinitely.
    pub timeout: Duration,
}

impl StoreConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load from `WISHLINK_STORE_URL` / `WISHLINK_STORE_KEY`, with an
    /// optional `WISHLINK_STORE_TIMEOUT_SECS` override.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("WISHLINK_STORE_URL").context("WISHLINK_STORE_URL not set")?;
        let api_key =
            std::env::var("WISHLINK_STORE_KEY").context("WISHLINK_STORE_KEY not set")?;

        let timeout = std::env::var("WISHLINK_STORE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Self::DEFAULT_TIMEOUT);

        Ok(Self::new(base_url, api_key).with_timeout(timeout))
    }
}
