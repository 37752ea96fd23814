use anyhow::{Context, Result};
use model::fixtures::Dataset;
use moka::future::Cache;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::remote::RemoteClient;
use crate::schemas::AppState;

/// Name of the optional configuration file, looked up in the working directory.
const CONFIG_FILE: &str = "salesdash";
const ENV_PREFIX: &str = "SALESDASH";

/// Runtime configuration of the service and the CLI.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind_address: String,
    /// Directory whose fixture files replace the embedded ones
    pub fixtures_dir: Option<PathBuf>,
    /// Base URL of the detail table and budget predictor service
    pub remote_base_url: String,
    /// Timeout for outbound requests
    pub request_timeout_secs: u64,
    /// Lifetime of cached page payloads
    pub cache_ttl_secs: u64,
}

impl AppConfig {
    /// Layers `salesdash.toml` and `SALESDASH_*` variables over the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Same as [`AppConfig::load`] with an explicit config file (extension optional).
    pub fn load_from(file: &Path) -> Result<Self> {
        let config = config::Config::builder()
            .set_default("bind_address", "0.0.0.0:3000")?
            .set_default("remote_base_url", "http://localhost:8080")?
            .set_default("request_timeout_secs", 30)?
            .set_default("cache_ttl_secs", 300)?
            .add_source(config::File::from(file).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("Failed to read configuration")?;

        let app_config: Self = config
            .try_deserialize()
            .context("Invalid configuration")?;
        debug!("Loaded configuration: {:?}", app_config);
        Ok(app_config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Initialize application state from the configuration
pub fn initialize_app_state(config: &AppConfig) -> Result<AppState> {
    let dataset = Dataset::load(config.fixtures_dir.as_deref()).context("Failed to load dataset")?;

    let remote = RemoteClient::new(&config.remote_base_url, config.request_timeout())
        .context("Failed to build HTTP client")?;
    info!("Remote service at {}", config.remote_base_url);

    // Initialize cache
    let cache = Cache::builder()
        .max_capacity(1000)
        .time_to_live(Duration::from_secs(config.cache_ttl_secs))
        .build();

    Ok(AppState {
        dataset: Arc::new(dataset),
        remote,
        cache,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_values_override_defaults() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("salesdash.toml");
        std::fs::write(
            &file,
            "bind_address = \"127.0.0.1:9000\"\ncache_ttl_secs = 60\nfixtures_dir = \"/srv/fixtures\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&file).unwrap();

        assert_eq!(config.bind_address, "127.0.0.1:9000");
        assert_eq!(config.cache_ttl_secs, 60);
        assert_eq!(config.fixtures_dir, Some(PathBuf::from("/srv/fixtures")));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(config.remote_base_url, "http://localhost:8080");
        assert_eq!(config.fixtures_dir, None);
    }
}
