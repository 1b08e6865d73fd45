use std::path::Path;

use anyhow::{bail, Context, Result};
use encore_client::{config, Config, ProviderKind};
use encore_core::LeavePolicy;
use toml_edit::{value, DocumentMut};

const VALID_KEYS: &str = "provider, service_url, request_timeout_secs, stub_delay_ms, \
                          leave_policy, log_level, log_coloured";

/// Show the current effective configuration.
pub fn show_config(config_path: &Path, config: &Config) {
    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config_path.display());
    let exists = config_path.exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    println!("Settings:");
    println!("  provider: {}", config.provider);
    println!("  service_url: {}", config.service_url);
    println!("  request_timeout_secs: {}", config.request_timeout_secs);
    println!("  stub_delay_ms: {}", config.stub_delay_ms);
    println!("  leave_policy: {}", config.leave_policy);
    println!("  log_level: {}", config.log_level);
    println!("  log_coloured: {}", config.log_coloured);

    println!("\nPriority: CLI args > ENV vars (ENCORE_*) > Config file > Defaults");
}

/// Print a single effective config value.
pub fn get_config(config: &Config, key: &str) -> Result<()> {
    println!("{}", lookup(config, key)?);
    Ok(())
}

fn lookup(config: &Config, key: &str) -> Result<String> {
    let table = toml::Value::try_from(config).context("Failed to serialize configuration")?;
    match table.get(key) {
        Some(toml::Value::String(s)) => Ok(s.clone()),
        Some(other) => Ok(other.to_string()),
        None => bail!("Unknown config key: {}\n\nValid keys: {}", key, VALID_KEYS),
    }
}

/// Set a config value, keeping the rest of the file (comments included)
/// intact.
pub fn set_config(config_path: &Path, key: &str, raw: &str) -> Result<()> {
    config::ensure_config_file_at(config_path)?;

    let contents =
        std::fs::read_to_string(config_path).context("Failed to read config file")?;
    let updated = apply_setting(&contents, key, raw)?;

    std::fs::write(config_path, updated).context("Failed to write config file")?;

    println!("✓ Updated {} = {}", key, raw);
    println!("  in {}", config_path.display());

    Ok(())
}

/// Validate `raw` for `key` and write it into the TOML document `contents`.
fn apply_setting(contents: &str, key: &str, raw: &str) -> Result<String> {
    let mut doc: DocumentMut = contents.parse().context("Config file is not valid TOML")?;

    match key {
        "provider" => {
            let kind: ProviderKind = raw.parse().map_err(anyhow::Error::msg)?;
            doc[key] = value(kind.to_string());
        }
        "leave_policy" => {
            let policy: LeavePolicy = raw.parse().map_err(anyhow::Error::msg)?;
            doc[key] = value(policy.to_string());
        }
        "service_url" | "log_level" => {
            doc[key] = value(raw.trim());
        }
        "request_timeout_secs" | "stub_delay_ms" => {
            let n: i64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a non-negative integer", key))?;
            if n < 0 {
                bail!("{} must be a non-negative integer", key);
            }
            doc[key] = value(n);
        }
        "log_coloured" => {
            let flag: bool = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be true or false", key))?;
            doc[key] = value(flag);
        }
        _ => bail!("Unknown config key: {}\n\nValid keys: {}", key, VALID_KEYS),
    }

    let updated = doc.to_string();
    toml::from_str::<Config>(&updated).context("Updated configuration would be invalid")?;
    Ok(updated)
}

/// Show the config file path.
pub fn show_path(config_path: &Path) {
    println!("{}", config_path.display());
}

/// Show example configuration.
pub fn show_example() {
    print!("{}", config::example_config());
}

/// Initialize config file with defaults.
pub fn init_config(config_path: &Path) -> Result<()> {
    let created = config::ensure_config_file_at(config_path)?;

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure encore.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_apply_setting_keeps_comments() {
        let updated = apply_setting(config::example_config(), "provider", "HTTP").unwrap();
        assert!(updated.contains("provider = \"http\""));
        assert!(updated.contains("# Encore Configuration File"));

        let config: Config = toml::from_str(&updated).unwrap();
        assert_eq!(config.provider, ProviderKind::Http);
    }

    #[test]
    fn test_apply_setting_adds_missing_key() {
        let updated = apply_setting("", "stub_delay_ms", "250").unwrap();
        let config: Config = toml::from_str(&updated).unwrap();
        assert_eq!(config.stub_delay_ms, 250);
    }

    #[test]
    fn test_apply_setting_rejects_bad_values() {
        assert!(apply_setting("", "leave_policy", "forget").is_err());
        assert!(apply_setting("", "request_timeout_secs", "-3").is_err());
        assert!(apply_setting("", "log_coloured", "maybe").is_err());
        assert!(apply_setting("", "colour", "true").is_err());
    }

    #[test]
    fn test_lookup() {
        let config = Config::default();
        assert_eq!(lookup(&config, "service_url").unwrap(), "http://localhost:5000");
        assert_eq!(lookup(&config, "stub_delay_ms").unwrap(), "1500");
        assert_eq!(lookup(&config, "leave_policy").unwrap(), "confirm");
        assert!(lookup(&config, "nope").is_err());
    }

    #[test]
    fn test_set_config_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("encore").join("config.toml");

        set_config(&path, "leave_policy", "preserve").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.leave_policy, LeavePolicy::Preserve);
    }
}
