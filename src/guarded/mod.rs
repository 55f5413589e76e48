//! Guarded runs: captured output routed to sinks, nonzero exit escalated.
//!
//! [`GuardedRunner::run_guarded`] returns [`ProcError::ChildFailure`] on a
//! nonzero exit so embedding code keeps control. The `*_or_exit` variants
//! terminate the calling program with the child's exit code instead.
//!
//! Dangerous commands go through [`GuardedRunner::run_dangerous`], which
//! announces the command, asks a [`Confirm`] provider, and optionally runs a
//! [`PrivilegeValidator`] before executing.

mod confirm;
mod sinks;


pub use confirm::{
    Confirm, DEFAULT_CONFIRM_PROMPT, PrivilegeValidator, SudoValidator, TerminalConfirm,
    is_affirmative,
};
pub use sinks::OutputSinks;

use crate::error::{ProcError, Result};
use crate::process::{ProcessResult, StdinSource, process};
use std::io::Write;
use tracing::{debug, info};

/// Runs commands with output routing, failure policy and a confirmation gate.
pub struct GuardedRunner<'a> {
    sinks: OutputSinks<'a>,
    confirm: Box<dyn Confirm + 'a>,
    privilege: Box<dyn PrivilegeValidator + 'a>,
}

impl GuardedRunner<'static> {
    /// Standard streams, terminal confirmation, `sudo -v`.
    pub fn standard() -> Self {
        Self::new(OutputSinks::standard())
    }
}

impl<'a> GuardedRunner<'a> {
    pub fn new(sinks: OutputSinks<'a>) -> Self {
        Self {
            sinks,
            confirm: Box::new(TerminalConfirm::default()),
            privilege: Box::new(SudoValidator),
        }
    }

    pub fn with_confirm(mut self, confirm: impl Confirm + 'a) -> Self {
        self.confirm = Box::new(confirm);
        self
    }

    pub fn with_privilege_validator(mut self, validator: impl PrivilegeValidator + 'a) -> Self {
        self.privilege = Box::new(validator);
        self
    }

    /// Run `command`, write its stderr then stdout to the sinks.
    ///
    /// On a nonzero exit, `error_message` is written to the error sink and
    /// [`ProcError::ChildFailure`] carries the child's exit code. A non-empty
    /// message without a trailing newline gets one appended; an empty message
    /// writes nothing.
    pub fn run_guarded(
        &mut self,
        command: &str,
        stdin: StdinSource,
        error_message: &str,
    ) -> Result<ProcessResult> {
        let result = process(command, stdin)?;

        self.sinks
            .stderr()
            .write_all(result.stderr())
            .and_then(|_| self.sinks.stdout().write_all(result.stdout()))
            .map_err(sink_error)?;

        if !result.success() {
            debug!(command, exit_code = result.exit_code(), "guarded command failed");
            if !error_message.is_empty() {
                let stderr = self.sinks.stderr();
                stderr.write_all(error_message.as_bytes()).map_err(sink_error)?;
                if !error_message.ends_with('\n') {
                    stderr.write_all(b"\n").map_err(sink_error)?;
                }
            }
            self.sinks.flush().map_err(sink_error)?;

            return Err(ProcError::ChildFailure {
                command: command.to_string(),
                code: result.exit_code(),
            });
        }

        self.sinks.flush().map_err(sink_error)?;
        Ok(result)
    }

    /// [`run_guarded`](Self::run_guarded), but a nonzero exit terminates the
    /// calling program with the child's exit code.
    pub fn run_guarded_or_exit(
        &mut self,
        command: &str,
        stdin: StdinSource,
        error_message: &str,
    ) -> Result<ProcessResult> {
        let outcome = self.run_guarded(command, stdin, error_message);
        self.exit_on_child_failure(outcome)
    }

    /// Announce `command`, ask for confirmation, then run it guarded.
    ///
    /// Returns `Ok(None)` without running anything when confirmation is
    /// declined. With `requires_privilege`, the privilege validator runs after
    /// confirmation and before the command.
    pub fn run_dangerous(
        &mut self,
        command: &str,
        stdin: StdinSource,
        error_message: &str,
        requires_privilege: bool,
    ) -> Result<Option<ProcessResult>> {
        let out = self.sinks.stdout();
        writeln!(out, "Running: {}", command)
            .and_then(|_| out.flush())
            .map_err(sink_error)?;

        if !self.confirm.confirm(command)? {
            info!(command, "dangerous command declined");
            return Ok(None);
        }

        if requires_privilege {
            debug!("validating privileges");
            self.privilege.validate()?;
        }

        self.run_guarded(command, stdin, error_message).map(Some)
    }

    /// [`run_dangerous`](Self::run_dangerous) with the terminating failure path.
    pub fn run_dangerous_or_exit(
        &mut self,
        command: &str,
        stdin: StdinSource,
        error_message: &str,
        requires_privilege: bool,
    ) -> Result<Option<ProcessResult>> {
        let outcome = self.run_dangerous(command, stdin, error_message, requires_privilege);
        self.exit_on_child_failure(outcome)
    }

    fn exit_on_child_failure<T>(&mut self, outcome: Result<T>) -> Result<T> {
        match outcome {
            Err(ProcError::ChildFailure { code, .. }) => {
                let _ = self.sinks.flush();
                std::process::exit(code)
            }
            other => other,
        }
    }
}

fn sink_error(e: std::io::Error) -> ProcError {
    ProcError::Io(format!("failed to write to output sink: {}", e))
}
