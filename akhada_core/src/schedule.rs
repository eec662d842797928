//! Periodic refresh of the body intelligence card.
//!
//! The schedule runs on the calling thread: it fires immediately, then once
//! per interval. Each tick runs to completion before the next sleep, so the
//! snapshot owned by the caller is never shared.

use crate::Result;
use std::time::Duration;

/// Default refresh interval (5 minutes)
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Fixed-interval refresh schedule
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefreshSchedule {
    pub interval: Duration,
    /// Stop after this many ticks; `None` runs until the process exits
    pub max_ticks: Option<u64>,
}

impl Default for RefreshSchedule {
    fn default() -> Self {
        Self {
            interval: DEFAULT_REFRESH_INTERVAL,
            max_ticks: None,
        }
    }
}

impl RefreshSchedule {
    pub fn new(interval: Duration, max_ticks: Option<u64>) -> Self {
        Self { interval, max_ticks }
    }

    /// Run `tick` on schedule, returning the number of completed ticks
    ///
    /// Stops at the first tick error and returns it.
    pub fn run<F>(&self, mut tick: F) -> Result<u64>
    where
        F: FnMut(u64) -> Result<()>,
    {
        self.run_with_sleep(&mut tick, std::thread::sleep)
    }

    fn run_with_sleep<F, S>(&self, tick: &mut F, mut sleep: S) -> Result<u64>
    where
        F: FnMut(u64) -> Result<()>,
        S: FnMut(Duration),
    {
        let mut completed = 0;

        loop {
            if self.max_ticks.is_some_and(|max| completed >= max) {
                break;
            }

            tick(completed)?;
            completed += 1;
            tracing::debug!("Refresh tick {} complete", completed);

            if self.max_ticks.is_some_and(|max| completed >= max) {
                break;
            }
            sleep(self.interval);
        }

        tracing::info!("Refresh schedule stopped after {} ticks", completed);
        Ok(completed)
    }
}
