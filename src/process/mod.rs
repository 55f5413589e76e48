//! Single-process lifecycle: spawn, check, collect.
//!
//! - **Spawner**: command string -> running [`ProcessHandle`]
//! - **Handle**: pid, non-blocking status, background-drained pipes
//! - **Collector**: blocking wait -> cached [`ProcessResult`]
//!
//! [`process`] and [`pipe_string`] compose these for the one-shot case.

mod collector;
mod handle;
mod result;
mod spawner;

#[cfg(all(test, unix))]
mod tests;

pub use collector::collect;
pub use handle::ProcessHandle;
pub use result::ProcessResult;
pub use spawner::{StdinSource, spawn};

use crate::error::Result;

/// Spawn `command`, wait for it, and return its result.
///
/// ```no_run
/// use procpoll::process::{StdinSource, process};
///
/// let result = process("echo 1 2", StdinSource::Null)?;
/// assert_eq!(result.stdout(), b"1 2\n");
/// # Ok::<(), procpoll::error::ProcError>(())
/// ```
pub fn process(command: &str, stdin: StdinSource) -> Result<ProcessResult> {
    spawn(command, stdin)?.wait()
}

/// Run `command` with `input` fed to its standard input.
pub fn pipe_string(command: &str, input: &str) -> Result<ProcessResult> {
    process(command, StdinSource::from(input))
}
