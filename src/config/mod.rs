// src/config/mod.rs

//! Watcher configuration: defaults, the optional `.cachewatch.toml` override
//! file, CLI flag overlay and validation.
//!
//! The rest of the crate only ever sees an immutable [`WatchConfig`]; all
//! layering happens in [`loader::load`] before the loop starts.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load, OVERRIDE_FILE};
pub use model::{Overrides, WatchConfig};
pub use validate::validate_config;
