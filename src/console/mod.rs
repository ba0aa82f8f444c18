// src/console/mod.rs

//! The Symfony console collaborator.
//!
//! Everything here is synchronous: the watch loop blocks on the console
//! process until it exits. Overlapping warm-ups would trample the cache the
//! console itself maintains, so serialization is required.

use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::debug;

use crate::config::model::WatchConfig;

const VERSION_OPTION: &str = "--version";
const CACHE_WARMUP: &str = "cache:warmup";
const CACHE_CLEAR: &str = "cache:clear";
const CACHE_POOL_CLEAR: &str = "cache:pool:clear";

/// Failure modes of a console invocation.
///
/// Launch failures and non-zero exits are distinct: the former usually means
/// a broken setup (missing binary, bad permissions), the latter a broken
/// application.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("failed to launch the Symfony console: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("symfony command failed with exit code {code}: {output}")]
    Exit { code: i32, output: String },
}

/// Absolute path to the console binary for this configuration.
pub fn console_path(config: &WatchConfig) -> PathBuf {
    config.project_dir.join(&config.console_path)
}

/// Startup check that the console binary exists; fatal when it does not.
pub fn check_console(config: &WatchConfig) -> Result<()> {
    let path = console_path(config);
    if !path.exists() {
        anyhow::bail!("symfony console not found at {:?}", path);
    }
    Ok(())
}

/// Run one console command with the configured env/debug flags.
///
/// `argument` is the console argument or option (e.g. `cache:warmup`,
/// `--version`, `cache:pool:clear app.cache`). Returns the combined
/// stdout/stderr output on success.
pub fn run_command(config: &WatchConfig, argument: &str) -> Result<String, ConsoleError> {
    let mut args: Vec<String> = argument.split_whitespace().map(str::to_string).collect();
    args.push(format!("--env={}", config.env));
    if !config.debug {
        args.push("--no-debug".to_string());
    }

    debug!(console = ?console_path(config), ?args, "running console command");

    let output = Command::new(console_path(config))
        .args(&args)
        .current_dir(&config.project_dir)
        .output()
        .map_err(ConsoleError::Spawn)?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    if !output.status.success() {
        return Err(ConsoleError::Exit {
            code: output.status.code().unwrap_or(-1),
            output: combined,
        });
    }

    Ok(combined)
}

/// The console's `--version` banner, probed once at startup.
pub fn version(config: &WatchConfig) -> Result<String, ConsoleError> {
    run_command(config, VERSION_OPTION)
}

/// Refresh the project cache according to the configuration.
///
/// Optional steps in order: `cache:clear`, forced removal of `var/cache`,
/// `cache:pool:clear` per configured pool; then always `cache:warmup`.
pub fn warm_cache(config: &WatchConfig) -> Result<String> {
    if config.clear_cache {
        run_command(config, CACHE_CLEAR).context("failed to clear cache")?;
    }

    if config.force_clear_cache {
        remove_cache(config).context("failed to remove cache")?;
    }

    if config.pools_provided {
        for pool in &config.pools {
            run_command(config, &format!("{CACHE_POOL_CLEAR} {pool}"))
                .with_context(|| format!("failed to clear pool {pool}"))?;
        }
    }

    Ok(run_command(config, CACHE_WARMUP).context("failed to warm up cache")?)
}

/// Remove `var/cache` under the project directory.
///
/// The target is rebuilt from the project dir and checked to stay inside it.
fn remove_cache(config: &WatchConfig) -> Result<()> {
    let cache_dir = config.project_dir.join("var").join("cache");

    if !cache_dir.starts_with(&config.project_dir) {
        anyhow::bail!("{:?} is not within the project directory", cache_dir);
    }

    if cache_dir.exists() {
        std::fs::remove_dir_all(&cache_dir)
            .with_context(|| format!("removing cache directory {:?}", cache_dir))?;
    }

    Ok(())
}
