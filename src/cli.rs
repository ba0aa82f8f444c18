// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! NOTE: this expects `clap` to be built with the `derive` feature, e.g.:
//! `clap = { version = "4.5.53", features = ["derive"] }` in `Cargo.toml`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `cachewatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cachewatch",
    version,
    about = "Watch a Symfony project and refresh its cache on change.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the Symfony project directory.
    #[arg(value_name = "PROJECT_DIR")]
    pub path: String,

    /// Comma-separated vendor sub-paths to watch (enables vendor watching).
    #[arg(long, value_name = "LIST")]
    pub vendor: Option<String>,

    /// Comma-separated directory name fragments not to watch.
    #[arg(long, value_name = "LIST")]
    pub exclude: Option<String>,

    /// Run cache:clear before warming up.
    #[arg(long)]
    pub cache: bool,

    /// Remove var/cache outright before warming up (overrides --cache).
    #[arg(long)]
    pub force: bool,

    /// Pass --no-debug to the Symfony console.
    #[arg(long)]
    pub no_debug: bool,

    /// APP_ENV value passed to the Symfony console.
    #[arg(long, value_name = "ENV", default_value = "dev")]
    pub env: String,

    /// Comma-separated cache pools to clear before warming.
    ///
    /// Given without a value, all pools are cleared.
    #[arg(
        long,
        value_name = "LIST",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = ""
    )]
    pub pools: Option<String>,

    /// Poll interval in milliseconds.
    ///
    /// If omitted, the override file or the built-in default (30 ms) applies.
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CACHEWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

impl CliArgs {
    /// Vendor sub-paths from `--vendor`, empty when the flag was not given.
    pub fn vendor_list(&self) -> Vec<String> {
        self.vendor.as_deref().map(parse_comma_separated).unwrap_or_default()
    }

    /// Extra exclusion fragments from `--exclude`.
    pub fn exclude_list(&self) -> Vec<String> {
        self.exclude.as_deref().map(parse_comma_separated).unwrap_or_default()
    }

    /// Pools from `--pools`; `None` when the flag was absent.
    ///
    /// A bare `--pools` means "clear everything", expressed as the console's
    /// own `--all` option.
    pub fn pool_list(&self) -> Option<Vec<String>> {
        let raw = self.pools.as_deref()?;
        let pools = parse_comma_separated(raw);
        if pools.is_empty() {
            Some(vec!["--all".to_string()])
        } else {
            Some(pools)
        }
    }

    /// Arguments as if only the project path had been given.
    ///
    /// Mostly useful in tests that build configurations directly.
    pub fn for_project(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            vendor: None,
            exclude: None,
            cache: false,
            force: false,
            no_debug: false,
            env: "dev".to_string(),
            pools: None,
            interval_ms: None,
            log_level: None,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Split a comma-separated list, dropping empty items.
fn parse_comma_separated(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_lists_are_split_and_trimmed() {
        let mut args = CliArgs::for_project(".");
        args.vendor = Some("acme/widget, other/pkg,".to_string());
        assert_eq!(args.vendor_list(), vec!["acme/widget", "other/pkg"]);
        assert!(args.exclude_list().is_empty());
    }

    #[test]
    fn bare_pools_flag_means_all() {
        let mut args = CliArgs::for_project(".");
        assert_eq!(args.pool_list(), None);

        args.pools = Some(String::new());
        assert_eq!(args.pool_list(), Some(vec!["--all".to_string()]));

        args.pools = Some("app.cache,doctrine".to_string());
        assert_eq!(
            args.pool_list(),
            Some(vec!["app.cache".to_string(), "doctrine".to_string()])
        );
    }
}
