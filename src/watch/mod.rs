// src/watch/mod.rs

//! Change detection over a filtered project tree.
//!
//! This module is responsible for:
//! - Deciding which directories are traversed ([`filter::PathFilter`]).
//! - Walking the configured roots into a flat watch set ([`scanner`]).
//! - Fingerprinting each watched file by modification time and comparing
//!   successive fingerprint maps ([`fingerprint`]).
//!
//! It does **not** know about the Symfony console or the poll loop; it only
//! answers "which files?" and "did anything change?".

pub mod filter;
pub mod fingerprint;
pub mod scanner;

pub use filter::PathFilter;
pub use fingerprint::{maps_differ, take_fingerprints, Fingerprint, FingerprintMap};
pub use scanner::{collect_watch_set, scan};
