// src/engine/mod.rs

//! The poll loop.
//!
//! Single-threaded and fully sequential: scan, fingerprint, compare, maybe
//! warm, sleep. The only state carried between cycles is the baseline
//! fingerprint map, owned exclusively by the loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::config::model::WatchConfig;
use crate::console;
use crate::watch::{collect_watch_set, maps_differ, take_fingerprints, FingerprintMap};

/// Cooperative cancellation flag for the loop.
///
/// Checked at the top of each cycle and while sleeping. In production it is
/// set from the Ctrl-C handler; tests set it directly.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// What one poll cycle observed, for logging and presentation.
#[derive(Debug, Clone)]
pub enum CycleEvent {
    /// Nothing changed; the loop will sleep.
    Unchanged,
    /// A change was detected and the warm-up ran.
    Warmed {
        watched: usize,
        elapsed: Duration,
        warmup_failed: bool,
    },
    /// The cycle failed on a transient I/O error and will be retried.
    CycleFailed { message: String },
}

/// The scheduling core: rescan, compare, trigger, adopt baseline, sleep.
pub struct WatchLoop<F>
where
    F: FnMut(&CycleEvent),
{
    config: WatchConfig,
    cancel: CancelToken,
    /// Presentation callback invoked once per noteworthy cycle outcome.
    on_event: F,
}

impl<F> WatchLoop<F>
where
    F: FnMut(&CycleEvent),
{
    pub fn new(config: WatchConfig, cancel: CancelToken, on_event: F) -> Self {
        Self {
            config,
            cancel,
            on_event,
        }
    }

    /// Run until cancelled, starting from an established baseline.
    ///
    /// The baseline comes from the startup scan; the first cycle never
    /// triggers a warm-up by itself. Transient cycle errors are reported and
    /// retried after the normal sleep — the next rescan self-heals. A failed
    /// warm-up is reported but the baseline still advances; the watcher must
    /// outlive a broken build.
    pub fn run(mut self, mut baseline: FingerprintMap) -> Result<()> {
        info!(
            watched = baseline.len(),
            interval_ms = self.config.poll_interval.as_millis() as u64,
            "watch loop started"
        );

        while !self.cancel.is_cancelled() {
            let current = match self.rescan() {
                Ok(map) => map,
                Err(err) => {
                    warn!(error = %format!("{err:#}"), "poll cycle failed; retrying next interval");
                    (self.on_event)(&CycleEvent::CycleFailed {
                        message: format!("{err:#}"),
                    });
                    self.sleep();
                    continue;
                }
            };

            if maps_differ(&baseline, &current) {
                debug!(
                    old = baseline.len(),
                    new = current.len(),
                    "change detected"
                );

                let start = Instant::now();
                let warmup_failed = match console::warm_cache(&self.config) {
                    Ok(_) => false,
                    Err(err) => {
                        warn!(error = %format!("{err:#}"), "cache warm-up failed");
                        true
                    }
                };
                let elapsed = start.elapsed();

                info!(
                    watched = current.len(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    failed = warmup_failed,
                    "cache warm-up finished"
                );
                (self.on_event)(&CycleEvent::Warmed {
                    watched: current.len(),
                    elapsed,
                    warmup_failed,
                });

                baseline = current;
            } else {
                (self.on_event)(&CycleEvent::Unchanged);
                self.sleep();
            }
        }

        info!("watch loop stopped");
        Ok(())
    }

    /// One scan + fingerprint pass; any I/O error fails the cycle.
    fn rescan(&self) -> Result<FingerprintMap> {
        let watch_set = collect_watch_set(&self.config)?;
        take_fingerprints(watch_set)
    }

    /// Sleep the poll interval in slices so cancellation is observed promptly.
    fn sleep(&self) {
        const SLICE: Duration = Duration::from_millis(10);

        let mut remaining = self.config.poll_interval;
        while !remaining.is_zero() {
            if self.cancel.is_cancelled() {
                return;
            }
            let nap = remaining.min(SLICE);
            std::thread::sleep(nap);
            remaining -= nap;
        }
    }
}
