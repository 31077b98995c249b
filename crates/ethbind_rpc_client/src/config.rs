use std::{collections::HashMap, time::Duration};

use serde::{Deserialize, Serialize};

const DEFAULT_MIN_RETRY_INTERVAL_MS: u64 = 1_000;
const DEFAULT_MAX_RETRY_INTERVAL_MS: u64 = 32_000;
const DEFAULT_MAX_RETRIES: u32 = 9;

/// Configuration of an [`crate::HttpRequestManager`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpConfig {
    /// The node's JSON-RPC endpoint
    pub url: String,
    /// Headers sent with every request, e.g. API keys
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Overrides the default user agent
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Retry policy for transient HTTP failures
    #[serde(default)]
    pub retry: RetryConfig,
}

impl HttpConfig {
    /// Constructs a configuration with default headers and retry policy.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            user_agent: None,
            retry: RetryConfig::default(),
        }
    }
}

/// Exponential backoff for transient HTTP failures, e.g. rate limiting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RetryConfig {
    /// Lower bound of the interval between retries, in milliseconds
    pub min_interval_ms: u64,
    /// Upper bound of the interval between retries, in milliseconds
    pub max_interval_ms: u64,
    /// Maximum number of retries. Zero disables retrying.
    pub max_retries: u32,
}

impl RetryConfig {
    /// Lower bound of the interval between retries
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    /// Upper bound of the interval between retries
    pub fn max_interval(&self) -> Duration {
        Duration::from_millis(self.max_interval_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: DEFAULT_MIN_RETRY_INTERVAL_MS,
            max_interval_ms: DEFAULT_MAX_RETRY_INTERVAL_MS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_with_defaults() -> anyhow::Result<()> {
        let config: HttpConfig = serde_json::from_str(
            r#"{
                "url": "http://localhost:8545",
                "headers": { "x-api-key": "secret" },
                "retry": { "maxRetries": 2 }
            }"#,
        )?;

        assert_eq!(config.url, "http://localhost:8545");
        assert_eq!(
            config.headers.get("x-api-key").map(String::as_str),
            Some("secret")
        );
        assert_eq!(config.user_agent, None);
        assert_eq!(
            config.retry,
            RetryConfig {
                max_retries: 2,
                ..RetryConfig::default()
            }
        );

        Ok(())
    }
}
