// src/watch/scanner.rs

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::Glob;
use tracing::debug;
use walkdir::WalkDir;

use crate::config::model::{WatchConfig, ENV_FILE_GLOB};
use crate::watch::filter::PathFilter;

/// Recursively collect the files under `root` that pass `filter`.
///
/// Pruned directories are never entered. Any traversal error aborts the whole
/// scan: a partial result would make the next comparison conclude "no change"
/// for files it simply failed to see. A missing root is likewise a hard error
/// so that misconfiguration is reported instead of silently watching nothing.
pub fn scan(root: &Path, filter: &PathFilter) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        anyhow::bail!("watch root {:?} does not exist or is not a directory", root);
    }

    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !entry.file_type().is_dir() || filter.allows_dir(entry.path()));

    for entry in walker {
        let entry = entry.with_context(|| format!("walking watch root {:?}", root))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Assemble the full watch set for one poll cycle.
///
/// Unions the configured directory roots, the allow-listed vendor roots (when
/// vendor watching is on), and the top-level `.env*` files at the project
/// root. Derived fresh every cycle and superseded entirely by the next one.
pub fn collect_watch_set(config: &WatchConfig) -> Result<Vec<PathBuf>> {
    let filter = PathFilter::from_config(config);
    let mut files = env_files(&config.project_dir)?;

    for root in config.watch_roots() {
        files.extend(scan(&root, &filter)?);
    }

    for root in config.vendor_roots() {
        files.extend(scan(&root, &filter)?);
    }

    debug!(count = files.len(), "collected watch set");
    Ok(files)
}

/// Top-level project entries matching `.env*` (environment override files).
fn env_files(project_dir: &Path) -> Result<Vec<PathBuf>> {
    let matcher = Glob::new(ENV_FILE_GLOB)
        .with_context(|| format!("invalid glob pattern: {ENV_FILE_GLOB}"))?
        .compile_matcher();

    let entries = std::fs::read_dir(project_dir)
        .with_context(|| format!("reading project directory {:?}", project_dir))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("reading entry in {:?}", project_dir))?;
        let path = entry.path();
        if path.is_file() && matcher.is_match(entry.file_name()) {
            files.push(path);
        }
    }

    Ok(files)
}
