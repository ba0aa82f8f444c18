// src/lib.rs

pub mod cli;
pub mod config;
pub mod console;
pub mod engine;
pub mod logging;
pub mod watch;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use tracing::info;

use crate::cli::CliArgs;
use crate::config::loader::OVERRIDE_FILE;
use crate::engine::{CancelToken, CycleEvent, WatchLoop};
use crate::watch::take_fingerprints;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - project dir resolution
/// - config loading (defaults → override file → CLI flags)
/// - console existence check and version probe
/// - the initial scan that establishes the baseline
/// - Ctrl-C handling
/// - the watch loop
pub fn run(args: CliArgs) -> Result<()> {
    welcome();

    let project_dir = resolve_project_dir(&args.path)?;
    let config = config::load(project_dir, &args)?;

    println!(
        " > Project directory: {}",
        config.project_dir.display().to_string().green()
    );

    console::check_console(&config)
        .context("symfony console not found")?;
    println!(
        " > Symfony console path: {}",
        config.console_path.green()
    );

    let version = console::version(&config)
        .context("error while running the Symfony version command")?;
    println!(" > Symfony version: {}", version.trim().green());

    // First scan only establishes the baseline; it never triggers a warm-up.
    let start = Instant::now();
    let watch_set = watch::collect_watch_set(&config)?;
    let baseline = take_fingerprints(&watch_set)?;
    let elapsed = start.elapsed();

    if baseline.is_empty() {
        return Err(nothing_to_watch());
    }

    println!(
        " > {} file(s) watched in {} in {} millisecond(s).",
        baseline.len().to_string().yellow(),
        config.project_dir.display().to_string().yellow(),
        elapsed.as_millis().to_string().yellow()
    );
    println!(
        " > {} to stop watching (pid {}).",
        "CTRL+C".green(),
        std::process::id().to_string().green()
    );

    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        ctrlc::set_handler(move || cancel.cancel())
            .context("installing Ctrl-C handler")?;
    }

    info!(watched = baseline.len(), "entering watch loop");
    WatchLoop::new(config, cancel, print_cycle_event).run(baseline)
}

/// Resolve the project path argument into an existing absolute directory.
fn resolve_project_dir(raw: &str) -> Result<PathBuf> {
    let mut path = PathBuf::from(raw);
    if path.is_relative() {
        let cwd = std::env::current_dir().context("reading current directory")?;
        path = cwd.join(path);
    }

    if !path.is_dir() {
        return Err(anyhow!("project directory not found at {:?}", path));
    }

    Ok(path)
}

/// Per-cycle console output for the operator.
fn print_cycle_event(event: &CycleEvent) {
    match event {
        CycleEvent::Unchanged => {}
        CycleEvent::Warmed {
            watched,
            elapsed,
            warmup_failed,
        } => {
            if *warmup_failed {
                println!(
                    " {} cache warm-up failed; still watching.",
                    "/!\\".red()
                );
            } else {
                println!(
                    "  {} in {} second(s).",
                    "Done!".green(),
                    format!("{:.2}", elapsed.as_secs_f64()).yellow()
                );
            }
            println!(" > {} file(s) watched.", watched.to_string().yellow());
        }
        CycleEvent::CycleFailed { message } => {
            println!(" {} {} {}", "/!\\".red(), message, "/!\\".red());
        }
    }
}

fn welcome() {
    let separator = "-".repeat(80);
    println!("{separator}");
    println!(
        "  {} watches your Symfony project and refreshes its cache on change.",
        "cachewatch".bold().green()
    );
    println!("{separator}");
}

/// Fatal startup error for an empty initial watch set.
fn nothing_to_watch() -> anyhow::Error {
    anyhow!(
        "no file to watch found; if the project uses a non-standard directory \
         layout, configure the watched directories in a {} file at the project \
         root",
        OVERRIDE_FILE
    )
}
