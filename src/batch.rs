//! Batch spawning and collection.
//!
//! Spawning is best-effort: a command that fails to tokenize or start is
//! recorded as a [`BatchFailure`] and the rest of the batch still starts.
//! Callers that want all-or-nothing use [`Batch::into_handles`].

use crate::error::{ProcError, Result};
use crate::process::{ProcessHandle, ProcessResult, StdinSource, spawn};
use tracing::warn;

/// A command from a batch that could not be started.
#[derive(Debug)]
pub struct BatchFailure {
    /// Position of the command in the input.
    pub index: usize,
    pub command: String,
    pub error: ProcError,
}

/// Live handles from [`spawn_all`], in input order, plus any spawn failures.
#[derive(Debug, Default)]
pub struct Batch {
    handles: Vec<ProcessHandle>,
    failures: Vec<BatchFailure>,
}

impl Batch {
    pub fn handles(&self) -> &[ProcessHandle] {
        &self.handles
    }

    pub fn handles_mut(&mut self) -> &mut [ProcessHandle] {
        &mut self.handles
    }

    pub fn failures(&self) -> &[BatchFailure] {
        &self.failures
    }

    /// True when every command started.
    pub fn all_spawned(&self) -> bool {
        self.failures.is_empty()
    }

    /// The handles, or the first spawn failure if any command did not start.
    ///
    /// On failure every process that did start is waited on before the error
    /// is returned, so none is left unreaped. Their results are discarded.
    pub fn into_handles(self) -> Result<Vec<ProcessHandle>> {
        let Some(failure) = self.failures.into_iter().next() else {
            return Ok(self.handles);
        };

        for mut handle in self.handles {
            if let Err(e) = handle.wait() {
                warn!(command = handle.command(), error = %e, "failed to reap batch process");
            }
        }
        Err(failure.error)
    }

    /// Wait on every live handle in order.
    pub fn wait_all(&mut self) -> Vec<Result<ProcessResult>> {
        self.handles.iter_mut().map(ProcessHandle::wait).collect()
    }
}

/// Spawn every command without waiting, preserving input order.
pub fn spawn_all<S: AsRef<str>>(commands: &[S]) -> Batch {
    let mut batch = Batch::default();

    for (index, result) in spawn_each(commands).into_iter().enumerate() {
        match result {
            Ok(handle) => batch.handles.push(handle),
            Err(error) => batch.failures.push(BatchFailure {
                index,
                command: commands[index].as_ref().to_string(),
                error,
            }),
        }
    }

    batch
}

/// Spawn every command, then wait on each in input order.
///
/// One entry per input command, in input order, regardless of which process
/// finishes first. Spawn failures appear in place.
pub fn run_all<S: AsRef<str>>(commands: &[S]) -> Vec<Result<ProcessResult>> {
    spawn_each(commands)
        .into_iter()
        .map(|spawned| spawned.and_then(|mut handle| handle.wait()))
        .collect()
}

fn spawn_each<S: AsRef<str>>(commands: &[S]) -> Vec<Result<ProcessHandle>> {
    commands
        .iter()
        .map(|command| {
            let command = command.as_ref();
            spawn(command, StdinSource::Null).inspect_err(|e| {
                warn!(command, error = %e, "batch command failed to spawn");
            })
        })
        .collect()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_run_all_preserves_input_order() {
        let results = run_all(&["echo a", "echo b"]);
        let results: Vec<ProcessResult> = results.into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(
            results,
            vec![
                ProcessResult::new(0, b"a\n".to_vec(), Vec::new()),
                ProcessResult::new(0, b"b\n".to_vec(), Vec::new()),
            ]
        );
    }

    #[test]
    fn test_run_all_orders_by_input_not_completion() {
        let results = run_all(&["sh -c \"sleep 0.3; echo slow\"", "echo fast"]);
        assert_eq!(results[0].as_ref().unwrap().stdout(), b"slow\n");
        assert_eq!(results[1].as_ref().unwrap().stdout(), b"fast\n");
    }

    #[test]
    fn test_run_all_reports_spawn_failures_in_place() {
        let results = run_all(&["echo first", "nonexistent_command_xyz_123", "", "echo last"]);
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].as_ref().unwrap().stdout(), b"first\n");
        assert!(matches!(results[1], Err(ProcError::SpawnFailure { .. })));
        assert!(matches!(results[2], Err(ProcError::InvalidCommand(_))));
        assert_eq!(results[3].as_ref().unwrap().stdout(), b"last\n");
    }

    #[test]
    fn test_nonzero_exit_is_data_not_error() {
        let results = run_all(&["false"]);
        assert_eq!(results[0].as_ref().unwrap().exit_code(), 1);
    }

    #[test]
    fn test_spawn_all_continues_past_failures() {
        let mut batch = spawn_all(&["echo one", "nonexistent_command_xyz_123", "echo two"]);

        assert!(!batch.all_spawned());
        assert_eq!(batch.handles().len(), 2);
        assert_eq!(batch.handles()[0].command(), "echo one");
        assert_eq!(batch.handles()[1].command(), "echo two");

        let failure = &batch.failures()[0];
        assert_eq!(failure.index, 1);
        assert_eq!(failure.command, "nonexistent_command_xyz_123");

        let results = batch.wait_all();
        assert_eq!(results[0].as_ref().unwrap().stdout(), b"one\n");
        assert_eq!(results[1].as_ref().unwrap().stdout(), b"two\n");
    }

    #[test]
    fn test_spawn_all_accepts_owned_strings() {
        let commands = vec!["echo x".to_string()];
        let mut handles = spawn_all(&commands).into_handles().unwrap();
        assert_eq!(handles[0].wait().unwrap().stdout(), b"x\n");
    }

    #[test]
    fn test_into_handles_returns_first_failure() {
        let batch = spawn_all(&["true", "   ", "nonexistent_command_xyz_123"]);
        let err = batch.into_handles().unwrap_err();
        assert!(matches!(err, ProcError::InvalidCommand(_)));
    }

    #[test]
    fn test_into_handles_reaps_started_processes_on_failure() {
        let dir = tempfile::TempDir::new().unwrap();
        let marker = dir.path().join("done");
        let slow = format!("sh -c \"sleep 0.2; touch {}\"", marker.display());

        let batch = spawn_all(&[slow.as_str(), "   "]);
        assert!(batch.into_handles().is_err());
        assert!(marker.exists());
    }
}
