//! Bounded-retry polling of live process handles.
//!
//! A poll makes one non-blocking status pass over every handle, then, while
//! some are still running and tries remain, sleeps for a fixed interval and
//! passes again:
//!
//! ```text
//! pass -> all terminal?  ---------------------> return Complete
//!      -> tries == 0?    ---------------------> return Exhausted { pending }
//!      -> sleep(wait), tries -= 1, pass again
//! ```
//!
//! The first pass always happens, so `max_tries = 0` is a single check with no
//! sleep. Exhaustion is not an error; callers inspect the [`PollReport`] or opt
//! into [`ProcError::IncompleteBatch`] with [`PollReport::into_result`].
//! A poll cannot be interrupted mid-sleep.

mod sleeper;


pub use sleeper::{Sleeper, ThreadSleeper};

use crate::error::{ProcError, Result};
use crate::process::ProcessHandle;
use std::time::Duration;
use tracing::debug;

/// Default wait between passes, in seconds.
pub const DEFAULT_WAIT_SECONDS: f64 = 3.0;

/// Default number of retries after the first pass.
pub const DEFAULT_MAX_TRIES: u32 = 3;

/// How a poll ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Every handle reached a terminal status.
    Complete,
    /// Tries ran out; `pending` holds indices of handles still running.
    Exhausted { pending: Vec<usize> },
}

/// Summary of a finished poll. Handle statuses are updated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollReport {
    passes: u32,
    sleeps: u32,
    pending: Vec<usize>,
}

impl PollReport {
    /// Number of status passes made (always at least one).
    pub fn passes(&self) -> u32 {
        self.passes
    }

    /// Number of times the poller slept.
    pub fn sleeps(&self) -> u32 {
        self.sleeps
    }

    /// Indices of handles without a terminal status at the final pass.
    pub fn pending(&self) -> &[usize] {
        &self.pending
    }

    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn outcome(&self) -> PollOutcome {
        if self.is_complete() {
            PollOutcome::Complete
        } else {
            PollOutcome::Exhausted {
                pending: self.pending.clone(),
            }
        }
    }

    /// Turn an exhausted poll into [`ProcError::IncompleteBatch`].
    ///
    /// `handles` must be the slice that was polled.
    pub fn into_result(self, handles: &[ProcessHandle]) -> Result<Self> {
        if self.is_complete() {
            return Ok(self);
        }

        let pending = self
            .pending
            .iter()
            .filter_map(|&i| handles.get(i))
            .map(|h| h.command().to_string())
            .collect();

        Err(ProcError::IncompleteBatch { pending })
    }
}

/// Polls handles with a fixed wait and a bounded number of retries.
#[derive(Debug, Clone)]
pub struct Poller<S = ThreadSleeper> {
    wait: Duration,
    max_tries: u32,
    sleeper: S,
}

impl Poller {
    pub fn new(wait: Duration, max_tries: u32) -> Self {
        Self {
            wait,
            max_tries,
            sleeper: ThreadSleeper,
        }
    }
}

impl Default for Poller {
    fn default() -> Self {
        Self::new(
            Duration::from_secs_f64(DEFAULT_WAIT_SECONDS),
            DEFAULT_MAX_TRIES,
        )
    }
}

impl<S: Sleeper> Poller<S> {
    /// Replace the sleep primitive.
    pub fn with_sleeper<T: Sleeper>(self, sleeper: T) -> Poller<T> {
        Poller {
            wait: self.wait,
            max_tries: self.max_tries,
            sleeper,
        }
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    pub fn max_tries(&self) -> u32 {
        self.max_tries
    }

    /// Poll `handles` until all have terminated or tries run out.
    ///
    /// Only re-checks the given handles; nothing is ever re-spawned.
    ///
    /// # Errors
    ///
    /// [`ProcError::Io`] if the OS fails a status check. Running out of tries
    /// is reported through [`PollReport`], not as an error.
    pub fn poll(&mut self, handles: &mut [ProcessHandle]) -> Result<PollReport> {
        let mut remaining = self.max_tries;
        let mut passes = 0;
        let mut sleeps = 0;

        loop {
            passes += 1;
            let pending = check_all(handles)?;
            debug!(pass = passes, pending = pending.len(), "polled processes");

            if pending.is_empty() || remaining == 0 {
                return Ok(PollReport {
                    passes,
                    sleeps,
                    pending,
                });
            }

            debug!(
                wait_secs = self.wait.as_secs_f64(),
                remaining, "some processes not finished, sleeping"
            );
            self.sleeper.sleep(self.wait);
            sleeps += 1;
            remaining -= 1;
        }
    }
}

/// Poll with the thread sleeper. See [`Poller::poll`].
pub fn poll(handles: &mut [ProcessHandle], wait: Duration, max_tries: u32) -> Result<PollReport> {
    Poller::new(wait, max_tries).poll(handles)
}

/// One non-blocking pass; returns indices still running.
fn check_all(handles: &mut [ProcessHandle]) -> Result<Vec<usize>> {
    let mut pending = Vec::new();
    for (index, handle) in handles.iter_mut().enumerate() {
        if handle.try_status()?.is_none() {
            pending.push(index);
        }
    }
    Ok(pending)
}
