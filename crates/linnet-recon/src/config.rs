//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the reconciliation orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcilerConfig {
    /// Number of conversations whose decisions are applied concurrently
    /// once the batch lookup has answered.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_concurrency() -> usize {
    4
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
        }
    }
}

/// Configuration for the background refresh scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// How often to poll for stale conversations (in seconds).
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Maximum conversations per refresh pass.
    #[serde(default = "default_batch_limit")]
    pub batch_limit: usize,
}

fn default_poll_interval_secs() -> u64 {
    3600
}

fn default_batch_limit() -> usize {
    50
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            batch_limit: default_batch_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconciler_config_default() {
        let config = ReconcilerConfig::default();
        assert_eq!(config.concurrency, 4);
    }

    #[test]
    fn test_refresh_config_default() {
        let config = RefreshConfig::default();
        assert_eq!(config.poll_interval_secs, 3600);
        assert_eq!(config.batch_limit, 50);
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: ReconcilerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.concurrency, 4);

        let config: RefreshConfig = serde_json::from_str("{\"batch_limit\": 10}").unwrap();
        assert_eq!(config.batch_limit, 10);
        assert_eq!(config.poll_interval_secs, 3600);
    }
}
