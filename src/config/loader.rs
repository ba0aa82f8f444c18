// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::cli::CliArgs;
use crate::config::model::{Overrides, WatchConfig};
use crate::config::validate::validate_config;

/// Name of the optional project-local override file.
pub const OVERRIDE_FILE: &str = ".cachewatch.toml";

/// Build the effective configuration for a run.
///
/// Layering, lowest to highest precedence:
/// 1. Flex-layout defaults (`WatchConfig::new`).
/// 2. `.cachewatch.toml` at the project root, if present.
/// 3. Command-line flags.
///
/// The result is validated before being handed to the loop.
pub fn load(project_dir: PathBuf, args: &CliArgs) -> Result<WatchConfig> {
    let mut config = WatchConfig::new(project_dir);

    if let Some(overrides) = read_overrides(&config.project_dir.join(OVERRIDE_FILE))? {
        apply_overrides(&mut config, overrides);
    }
    apply_cli(&mut config, args);

    validate_config(&config)?;
    Ok(config)
}

/// Read and parse the override file; `Ok(None)` when it does not exist.
///
/// A file that exists but fails to parse is a startup error — silently
/// ignoring it would watch the wrong directories.
fn read_overrides(path: &Path) -> Result<Option<Overrides>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading override file at {:?}", path))?;
    let overrides: Overrides = toml::from_str(&contents)
        .with_context(|| format!("parsing TOML overrides from {:?}", path))?;

    Ok(Some(overrides))
}

fn apply_overrides(config: &mut WatchConfig, overrides: Overrides) {
    let Overrides {
        console_path,
        config_dir,
        src_dir,
        templates_dir,
        translations_dir,
        migrations_dir,
        vendor_dir,
        exclude,
        vendor,
        poll_interval_ms,
    } = overrides;

    if let Some(v) = console_path {
        config.console_path = v;
    }
    if let Some(v) = config_dir {
        config.config_dir = v;
    }
    if let Some(v) = src_dir {
        config.src_dir = v;
    }
    if let Some(v) = templates_dir {
        config.templates_dir = v;
    }
    if let Some(v) = translations_dir {
        config.translations_dir = v;
    }
    if let Some(v) = migrations_dir {
        config.migrations_dir = v;
    }
    if let Some(v) = vendor_dir {
        config.vendor_dir = v;
    }
    config.exclude_dirs.extend(exclude);
    if !vendor.is_empty() {
        config.vendor_watch = true;
        config.vendor_list = vendor;
    }
    if let Some(ms) = poll_interval_ms {
        config.poll_interval = Duration::from_millis(ms);
    }
}

fn apply_cli(config: &mut WatchConfig, args: &CliArgs) {
    config.env = args.env.clone();
    config.debug = !args.no_debug;
    config.clear_cache = args.cache;

    // --force wins over --cache: the cache dir is removed instead of cleared.
    if args.force {
        config.clear_cache = false;
        config.force_clear_cache = true;
    }

    let vendors = args.vendor_list();
    if !vendors.is_empty() {
        config.vendor_watch = true;
        config.vendor_list = vendors;
    }

    config.exclude_dirs.extend(args.exclude_list());

    if let Some(pools) = args.pool_list() {
        config.pools_provided = true;
        config.pools = pools;
    }

    if let Some(ms) = args.interval_ms {
        config.poll_interval = Duration::from_millis(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn default_args() -> CliArgs {
        CliArgs::for_project(".")
    }

    #[test]
    fn defaults_when_no_override_file() {
        let dir = tempdir().unwrap();
        let config = load(dir.path().to_path_buf(), &default_args()).unwrap();

        assert_eq!(config.src_dir, "src");
        assert_eq!(config.poll_interval, Duration::from_millis(30));
        assert!(!config.vendor_watch);
        assert!(config.exclude_dirs.contains(&".git".to_string()));
    }

    #[test]
    fn override_file_is_applied() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(OVERRIDE_FILE),
            "src_dir = \"lib\"\nexclude = [\"fixtures\"]\nvendor = [\"acme/widget\"]\npoll_interval_ms = 100\n",
        )
        .unwrap();

        let config = load(dir.path().to_path_buf(), &default_args()).unwrap();

        assert_eq!(config.src_dir, "lib");
        assert!(config.exclude_dirs.contains(&"fixtures".to_string()));
        assert!(config.exclude_dirs.contains(&".git".to_string()));
        assert!(config.vendor_watch);
        assert_eq!(config.vendor_list, vec!["acme/widget".to_string()]);
        assert_eq!(config.poll_interval, Duration::from_millis(100));
    }

    #[test]
    fn malformed_override_file_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(OVERRIDE_FILE), "src_dir = [not toml").unwrap();

        assert!(load(dir.path().to_path_buf(), &default_args()).is_err());
    }

    #[test]
    fn cli_flags_win_over_override_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(OVERRIDE_FILE), "poll_interval_ms = 100\n").unwrap();

        let mut args = default_args();
        args.interval_ms = Some(250);
        args.env = "prod".to_string();
        args.no_debug = true;

        let config = load(dir.path().to_path_buf(), &args).unwrap();

        assert_eq!(config.poll_interval, Duration::from_millis(250));
        assert_eq!(config.env, "prod");
        assert!(!config.debug);
    }
}
