//! Configuration sections and defaults for procpoll.

use crate::error::{ProcError, Result};
use crate::guarded::DEFAULT_CONFIRM_PROMPT;
use crate::poll::{DEFAULT_MAX_TRIES, DEFAULT_WAIT_SECONDS, Poller};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Polling defaults used when the CLI does not override them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Seconds to sleep between status passes.
    #[serde(default = "default_wait_seconds")]
    pub wait_seconds: f64,

    /// Retries after the first pass. Zero means a single check.
    #[serde(default = "default_max_tries")]
    pub max_tries: u32,
}

impl PollConfig {
    /// The wait as a `Duration`.
    ///
    /// Fails for negative or non-finite values and for values too large to
    /// represent as a `Duration`.
    pub fn wait(&self) -> Result<Duration> {
        Duration::try_from_secs_f64(self.wait_seconds).map_err(|e| {
            ProcError::UserError(format!(
                "poll.wait_seconds must be a non-negative number of seconds (found {}): {}",
                self.wait_seconds, e
            ))
        })
    }

    pub fn poller(&self) -> Result<Poller> {
        Ok(Poller::new(self.wait()?, self.max_tries))
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            wait_seconds: default_wait_seconds(),
            max_tries: default_max_tries(),
        }
    }
}

/// Defaults for guarded and dangerous runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardedConfig {
    /// Message written to stderr when a guarded command fails.
    pub error_message: String,

    /// Prompt shown before a dangerous command runs.
    #[serde(default = "default_confirm_prompt")]
    pub confirm_prompt: String,
}

impl Default for GuardedConfig {
    fn default() -> Self {
        Self {
            error_message: String::new(),
            confirm_prompt: default_confirm_prompt(),
        }
    }
}

pub fn default_wait_seconds() -> f64 {
    DEFAULT_WAIT_SECONDS
}

pub fn default_max_tries() -> u32 {
    DEFAULT_MAX_TRIES
}

pub fn default_confirm_prompt() -> String {
    DEFAULT_CONFIRM_PROMPT.to_string()
}
