// src/config/validate.rs

use anyhow::{anyhow, Result};

use crate::config::model::WatchConfig;

/// Run basic sanity checks against an assembled configuration.
///
/// This catches plainly broken values before the loop starts; filesystem
/// checks (project dir, console binary) happen later in the bootstrap,
/// where they can be reported with more context.
pub fn validate_config(config: &WatchConfig) -> Result<()> {
    ensure_interval(config)?;
    ensure_exclude_fragments(config)?;
    ensure_vendor_list(config)?;
    ensure_env(config)?;
    Ok(())
}

fn ensure_interval(config: &WatchConfig) -> Result<()> {
    if config.poll_interval.as_millis() == 0 {
        return Err(anyhow!("poll interval must be at least 1 millisecond"));
    }
    Ok(())
}

fn ensure_exclude_fragments(config: &WatchConfig) -> Result<()> {
    // An empty fragment matches every path and would exclude everything.
    if config.exclude_dirs.iter().any(|f| f.trim().is_empty()) {
        return Err(anyhow!("exclusion list contains an empty fragment"));
    }
    Ok(())
}

fn ensure_vendor_list(config: &WatchConfig) -> Result<()> {
    if config.vendor_watch && config.vendor_list.is_empty() {
        return Err(anyhow!(
            "vendor watching is enabled but no vendor sub-paths are listed"
        ));
    }
    if config.vendor_list.iter().any(|v| v.trim().is_empty()) {
        return Err(anyhow!("vendor list contains an empty entry"));
    }
    Ok(())
}

fn ensure_env(config: &WatchConfig) -> Result<()> {
    if config.env.trim().is_empty() {
        return Err(anyhow!("environment name must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    fn base() -> WatchConfig {
        WatchConfig::new(PathBuf::from("/tmp/project"))
    }

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&base()).is_ok());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let mut config = base();
        config.poll_interval = Duration::from_millis(0);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn empty_exclude_fragment_is_rejected() {
        let mut config = base();
        config.exclude_dirs.push("  ".to_string());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn vendor_watch_without_list_is_rejected() {
        let mut config = base();
        config.vendor_watch = true;
        assert!(validate_config(&config).is_err());

        config.vendor_list.push("acme/widget".to_string());
        assert!(validate_config(&config).is_ok());
    }
}
