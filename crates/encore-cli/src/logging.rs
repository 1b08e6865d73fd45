use anyhow::{anyhow, Result};
use encore_client::Config;

/// Set up the logger from `config`.
///
/// The terminal UI draws over the whole screen, so while it runs log output
/// is switched off entirely; failures surface in the UI instead.
pub fn init(config: &Config, interactive: bool) -> Result<()> {
    let opts = twyg::OptsBuilder::new()
        .coloured(config.log_coloured)
        .level(parse_level(&config.log_level)?)
        .build()
        .map_err(|e| anyhow!("invalid logging options: {e}"))?;
    twyg::setup(opts).map_err(|e| anyhow!("failed to set up logging: {e}"))?;

    if interactive {
        log::set_max_level(log::LevelFilter::Off);
    }
    Ok(())
}

fn parse_level(level: &str) -> Result<twyg::LogLevel> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok(twyg::LogLevel::Trace),
        "debug" => Ok(twyg::LogLevel::Debug),
        "info" => Ok(twyg::LogLevel::Info),
        "warn" | "warning" => Ok(twyg::LogLevel::Warn),
        "error" => Ok(twyg::LogLevel::Error),
        other => Err(anyhow!(
            "unknown log level '{other}' (expected trace, debug, info, warn or error)"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert!(matches!(parse_level("INFO"), Ok(twyg::LogLevel::Info)));
        assert!(matches!(parse_level("warning"), Ok(twyg::LogLevel::Warn)));
        assert!(parse_level("loud").is_err());
    }
}
