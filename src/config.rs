use crate::collector::CollectorSettings;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub collection: CollectionConfig,
    #[serde(default)]
    pub sampler: SamplerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    /// Directory with the static UI, served at "/" when set.
    #[serde(default)]
    pub web_root: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Deadline for one /api/all pass.
    pub aggregate_timeout_ms: u64,
    /// Rows returned by /api/processes when ?top is missing or invalid.
    pub default_top_n: usize,
    /// Rows kept in the processes field of /api/all.
    pub aggregate_top_n: usize,
    /// Max concurrent per-process queries.
    pub process_concurrency: usize,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            aggregate_timeout_ms: 3000,
            default_top_n: 15,
            aggregate_top_n: 15,
            process_concurrency: 32,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    pub interval_secs: u64,
    /// SHA-256 iterations per entropy hash sample.
    pub hash_rounds: u32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval_secs: 10,
            hash_rounds: 100_000,
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("read config {}: {}", path, e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn collector_settings(&self) -> CollectorSettings {
        CollectorSettings {
            aggregate_timeout: Duration::from_millis(self.collection.aggregate_timeout_ms),
            aggregate_top_n: self.collection.aggregate_top_n,
            process_concurrency: self.collection.process_concurrency,
            hash_rounds: self.sampler.hash_rounds,
        }
    }

    pub fn sampler_interval(&self) -> Duration {
        Duration::from_secs(self.sampler.interval_secs)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(!self.server.host.is_empty(), "server.host must be non-empty");
        if let Some(root) = &self.server.web_root {
            anyhow::ensure!(!root.is_empty(), "server.web_root must be non-empty when set");
        }
        anyhow::ensure!(
            self.collection.aggregate_timeout_ms > 0,
            "collection.aggregate_timeout_ms must be > 0, got {}",
            self.collection.aggregate_timeout_ms
        );
        anyhow::ensure!(
            self.collection.default_top_n > 0,
            "collection.default_top_n must be > 0, got {}",
            self.collection.default_top_n
        );
        anyhow::ensure!(
            self.collection.aggregate_top_n > 0,
            "collection.aggregate_top_n must be > 0, got {}",
            self.collection.aggregate_top_n
        );
        anyhow::ensure!(
            self.collection.process_concurrency > 0,
            "collection.process_concurrency must be > 0, got {}",
            self.collection.process_concurrency
        );
        anyhow::ensure!(
            self.sampler.interval_secs > 0,
            "sampler.interval_secs must be > 0, got {}",
            self.sampler.interval_secs
        );
        anyhow::ensure!(
            self.sampler.hash_rounds > 0,
            "sampler.hash_rounds must be > 0, got {}",
            self.sampler.hash_rounds
        );
        Ok(())
    }
}
