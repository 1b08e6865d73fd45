use anyhow::{Context, Result};
use confyg::{env, Confygery};
use encore_core::LeavePolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::provider::ProviderKind;

/// Configuration for encore.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (ENCORE_* prefix)
/// 3. Config file (~/.config/encore/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where recommendations come from: `stub` (offline, fixed list) or
    /// `http` (the recommendation service).
    ///
    /// Can be set via:
    /// - CLI: --provider http
    /// - ENV: ENCORE_PROVIDER
    /// - Config: provider = "http"
    #[serde(default)]
    pub provider: ProviderKind,

    /// Base URL of the recommendation service.
    ///
    /// Can be set via:
    /// - CLI: --service-url http://host:port
    /// - ENV: ENCORE_SERVICE_URL
    /// - Config: service_url = "..."
    /// - Default: http://localhost:5000
    #[serde(default = "default_service_url")]
    pub service_url: String,

    /// Seconds to wait for the recommendation service before giving up.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Artificial delay of the stub provider, in milliseconds.
    #[serde(default = "default_stub_delay_ms")]
    pub stub_delay_ms: u64,

    /// What happens to wizard progress when navigating away from it.
    #[serde(default)]
    pub leave_policy: LeavePolicy,

    /// Log level: trace, debug, info, warn or error.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Colourise log output.
    #[serde(default = "default_log_coloured")]
    pub log_coloured: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            service_url: default_service_url(),
            request_timeout_secs: default_request_timeout_secs(),
            stub_delay_ms: default_stub_delay_ms(),
            leave_policy: LeavePolicy::default(),
            log_level: default_log_level(),
            log_coloured: default_log_coloured(),
        }
    }
}

impl Config {
    /// Load configuration from the default config file and environment
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from `config_path` (if it exists) and environment
    /// variables with the ENCORE_ prefix.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("encore");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;
        log::debug!("Loaded configuration: {:?}", config);

        Ok(config)
    }

    /// Apply CLI overrides on top of the loaded configuration.
    #[must_use]
    pub fn with_overrides(
        mut self,
        provider: Option<ProviderKind>,
        service_url: Option<String>,
    ) -> Self {
        if let Some(provider) = provider {
            self.provider = provider;
        }
        if let Some(url) = service_url {
            self.service_url = url;
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn stub_delay(&self) -> Duration {
        Duration::from_millis(self.stub_delay_ms)
    }
}

fn default_service_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_stub_delay_ms() -> u64 {
    1500
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_coloured() -> bool {
    true
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/encore/config.toml
/// - macOS: ~/Library/Application Support/encore/config.toml
/// - Windows: %APPDATA%\encore\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("encore")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Encore Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (ENCORE_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Recommendation provider: "stub" serves a fixed list offline,
# "http" calls the recommendation service.
#
# Can also be set via:
# - CLI: encore --provider http
# - Environment: ENCORE_PROVIDER=http
provider = "stub"

# Base URL of the recommendation service (used by the http provider and
# by `encore search`).
service_url = "http://localhost:5000"

# Give up on the recommendation service after this many seconds.
request_timeout_secs = 30

# Artificial delay of the stub provider, in milliseconds.
stub_delay_ms = 1500

# What to do with a wizard's progress when you navigate away from it:
# "confirm" asks first and then starts the wizard over,
# "preserve" keeps it for when you come back.
leave_policy = "confirm"

# Logging
log_level = "info"
log_coloured = true
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    ensure_config_file_at(&config_file_path())
}

pub fn ensure_config_file_at(config_path: &Path) -> Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.provider, ProviderKind::Stub);
        assert_eq!(config.service_url, "http://localhost:5000");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.stub_delay(), Duration::from_millis(1500));
        assert_eq!(config.leave_policy, LeavePolicy::Confirm);
    }

    #[test]
    fn test_config_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = Config::load_from(&dir.path().join("absent.toml"));
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "provider = \"http\"\nservice_url = \"http://recs.local:9000\"\nleave_policy = \"preserve\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.provider, ProviderKind::Http);
        assert_eq!(config.service_url, "http://recs.local:9000");
        assert_eq!(config.leave_policy, LeavePolicy::Preserve);
        assert_eq!(config.stub_delay_ms, 1500);
    }

    #[test]
    fn test_example_config_parses_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        assert!(ensure_config_file_at(&path).unwrap());
        assert!(!ensure_config_file_at(&path).unwrap());

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.provider, ProviderKind::Stub);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_with_overrides() {
        let config = Config::default()
            .with_overrides(Some(ProviderKind::Http), Some("http://x:1".to_string()));
        assert_eq!(config.provider, ProviderKind::Http);
        assert_eq!(config.service_url, "http://x:1");

        let unchanged = Config::default().with_overrides(None, None);
        assert_eq!(unchanged, Config::default());
    }
}
