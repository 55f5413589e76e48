//! Exit code constants for the procpoll CLI.
//!
//! - 0: Success
//! - 1: User error (invalid command, bad config)
//! - 2: Spawn failure (OS refused to start a process)
//! - 3: Incomplete batch (polling gave up with processes still running)
//! - 4: Batch failure (a batch command failed to spawn or exited nonzero)
//!
//! Guarded runs that fail exit with the child's own code instead.

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: invalid command string, bad arguments or configuration.
pub const USER_ERROR: i32 = 1;

/// The OS could not start a process.
pub const SPAWN_FAILURE: i32 = 2;

/// Polling exhausted its tries while processes were still running.
pub const INCOMPLETE_BATCH: i32 = 3;

/// At least one command in a batch failed.
pub const BATCH_FAILURE: i32 = 4;
