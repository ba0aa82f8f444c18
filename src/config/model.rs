// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Symfony/Flex directory layout and watcher defaults.
pub const CONSOLE_PATH: &str = "bin/console";
pub const CONFIG_DIR: &str = "config";
pub const SRC_DIR: &str = "src";
pub const TEMPLATES_DIR: &str = "templates";
pub const TRANSLATIONS_DIR: &str = "translations";
pub const MIGRATIONS_DIR: &str = "migrations";
pub const VENDOR_DIR: &str = "vendor";
pub const ENV_DEFAULT: &str = "dev";

/// Sleep time between filesystem polls.
pub const POLL_INTERVAL: Duration = Duration::from_millis(30);

/// Directory name fragments excluded from watching by default.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[".git", ".github", "node_modules"];

/// Glob matched against top-level project entries (environment overrides).
pub const ENV_FILE_GLOB: &str = ".env*";

/// All settings for one watcher run.
///
/// Built once at startup from defaults, then the optional `.cachewatch.toml`
/// override file, then CLI flags — in that order. Never mutated after the
/// watch loop starts.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// The Symfony project root directory (absolute).
    pub project_dir: PathBuf,
    /// Relative path to the Symfony console binary.
    pub console_path: String,

    pub config_dir: String,
    pub src_dir: String,
    pub templates_dir: String,
    pub translations_dir: String,
    pub migrations_dir: String,
    pub vendor_dir: String,

    /// Directory name fragments to exclude (substring match).
    pub exclude_dirs: Vec<String>,
    /// Whether any vendor sub-paths are watched at all.
    pub vendor_watch: bool,
    /// Vendor sub-paths (relative to the vendor dir) to watch.
    pub vendor_list: Vec<String>,

    /// Sleep time between polls.
    pub poll_interval: Duration,

    /// APP_ENV passed to the console.
    pub env: String,
    /// APP_DEBUG; when false, `--no-debug` is passed to the console.
    pub debug: bool,
    /// Run `cache:clear` before warming.
    pub clear_cache: bool,
    /// Remove `var/cache` outright before warming.
    pub force_clear_cache: bool,
    /// Whether `--pools` was given on the command line.
    pub pools_provided: bool,
    /// Cache pools to clear before warming.
    pub pools: Vec<String>,
}

impl WatchConfig {
    /// Defaults for a Flex-layout project rooted at `project_dir`.
    pub fn new(project_dir: PathBuf) -> Self {
        Self {
            project_dir,
            console_path: CONSOLE_PATH.to_string(),
            config_dir: CONFIG_DIR.to_string(),
            src_dir: SRC_DIR.to_string(),
            templates_dir: TEMPLATES_DIR.to_string(),
            translations_dir: TRANSLATIONS_DIR.to_string(),
            migrations_dir: MIGRATIONS_DIR.to_string(),
            vendor_dir: VENDOR_DIR.to_string(),
            exclude_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            vendor_watch: false,
            vendor_list: Vec::new(),
            poll_interval: POLL_INTERVAL,
            env: ENV_DEFAULT.to_string(),
            debug: true,
            clear_cache: false,
            force_clear_cache: false,
            pools_provided: false,
            pools: Vec::new(),
        }
    }

    /// The directory roots scanned on every cycle, excluding vendor roots.
    pub fn watch_roots(&self) -> Vec<PathBuf> {
        [
            &self.config_dir,
            &self.src_dir,
            &self.templates_dir,
            &self.translations_dir,
            &self.migrations_dir,
        ]
        .iter()
        .map(|dir| self.project_dir.join(dir))
        .collect()
    }

    /// The allow-listed vendor roots, one per `vendor_list` entry.
    ///
    /// Empty unless vendor watching is enabled.
    pub fn vendor_roots(&self) -> Vec<PathBuf> {
        if !self.vendor_watch {
            return Vec::new();
        }
        self.vendor_list
            .iter()
            .map(|sub| self.project_dir.join(&self.vendor_dir).join(sub))
            .collect()
    }
}

/// Project-local overrides as read from `.cachewatch.toml`.
///
/// Every field is optional; anything absent keeps its default. Example:
///
/// ```toml
/// src_dir = "lib"
/// templates_dir = "views"
/// exclude = ["fixtures"]
/// poll_interval_ms = 100
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Overrides {
    #[serde(default)]
    pub console_path: Option<String>,
    #[serde(default)]
    pub config_dir: Option<String>,
    #[serde(default)]
    pub src_dir: Option<String>,
    #[serde(default)]
    pub templates_dir: Option<String>,
    #[serde(default)]
    pub translations_dir: Option<String>,
    #[serde(default)]
    pub migrations_dir: Option<String>,
    #[serde(default)]
    pub vendor_dir: Option<String>,

    /// Extra exclusion fragments, appended to the defaults.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Vendor sub-paths to watch; a non-empty list enables vendor watching.
    #[serde(default)]
    pub vendor: Vec<String>,

    #[serde(default)]
    pub poll_interval_ms: Option<u64>,
}
