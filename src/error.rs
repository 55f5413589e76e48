//! Error types for procpoll.
//!
//! Uses thiserror for derive macros. A nonzero child exit code is normal data
//! everywhere except the guarded path, where it becomes [`ProcError::ChildFailure`].

use crate::exit_codes;
use thiserror::Error;

/// Main error type for procpoll operations.
#[derive(Error, Debug)]
pub enum ProcError {
    /// Command string was empty or could not be tokenized.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// The OS refused to start the process.
    #[error("failed to spawn '{program}': {source}")]
    SpawnFailure {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Status check, wait, or stream capture failed on a live process.
    #[error("process I/O failed: {0}")]
    Io(String),

    /// Polling exhausted its tries with processes still running.
    #[error("{} process(es) still running after polling: {}", pending.len(), pending.join(", "))]
    IncompleteBatch { pending: Vec<String> },

    /// Some commands in a batch failed to spawn or exited nonzero.
    #[error("{failed} of {total} command(s) failed")]
    BatchFailure { failed: usize, total: usize },

    /// A guarded command exited nonzero.
    #[error("command '{command}' failed with exit code {code}")]
    ChildFailure { command: String, code: i32 },

    /// Invalid configuration or CLI usage.
    #[error("{0}")]
    UserError(String),
}

impl ProcError {
    /// Returns the exit code the CLI uses for this error.
    ///
    /// For [`ProcError::ChildFailure`] this is the child's own code, so exit
    /// semantics propagate up the call chain.
    pub fn exit_code(&self) -> i32 {
        match self {
            ProcError::InvalidCommand(_) => exit_codes::USER_ERROR,
            ProcError::UserError(_) => exit_codes::USER_ERROR,
            ProcError::SpawnFailure { .. } => exit_codes::SPAWN_FAILURE,
            ProcError::Io(_) => exit_codes::SPAWN_FAILURE,
            ProcError::IncompleteBatch { .. } => exit_codes::INCOMPLETE_BATCH,
            ProcError::BatchFailure { .. } => exit_codes::BATCH_FAILURE,
            ProcError::ChildFailure { code, .. } => *code,
        }
    }
}

/// Result type alias for procpoll operations.
pub type Result<T> = std::result::Result<T, ProcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_command_is_a_user_error() {
        let err = ProcError::InvalidCommand("empty".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn spawn_failure_has_correct_exit_code() {
        let err = ProcError::SpawnFailure {
            program: "nope".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.exit_code(), exit_codes::SPAWN_FAILURE);
        assert!(err.to_string().contains("failed to spawn 'nope'"));
    }

    #[test]
    fn incomplete_batch_lists_pending_commands() {
        let err = ProcError::IncompleteBatch {
            pending: vec!["sleep 5".to_string(), "sleep 6".to_string()],
        };
        assert_eq!(err.exit_code(), exit_codes::INCOMPLETE_BATCH);
        assert_eq!(
            err.to_string(),
            "2 process(es) still running after polling: sleep 5, sleep 6"
        );
    }

    #[test]
    fn batch_failure_has_correct_exit_code() {
        let err = ProcError::BatchFailure {
            failed: 1,
            total: 3,
        };
        assert_eq!(err.exit_code(), exit_codes::BATCH_FAILURE);
        assert_eq!(err.to_string(), "1 of 3 command(s) failed");
    }

    #[test]
    fn child_failure_propagates_child_exit_code() {
        let err = ProcError::ChildFailure {
            command: "false".to_string(),
            code: 7,
        };
        assert_eq!(err.exit_code(), 7);
    }
}
