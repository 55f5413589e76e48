//! Confirmation and privilege hooks for dangerous commands.

use crate::error::{ProcError, Result};
use std::io::{self, BufRead, Write};
use std::process::Command;
use tracing::warn;

/// Default prompt shown by [`TerminalConfirm`].
pub const DEFAULT_CONFIRM_PROMPT: &str = "Confirm [y/N]:";

/// Decides whether a dangerous command may run.
pub trait Confirm {
    fn confirm(&mut self, command: &str) -> Result<bool>;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, command: &str) -> Result<bool> {
        Ok(self(command))
    }
}

/// Asks on the terminal: prints a prompt and reads one line from stdin.
#[derive(Debug, Clone)]
pub struct TerminalConfirm {
    prompt: String,
}

impl TerminalConfirm {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

impl Default for TerminalConfirm {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIRM_PROMPT)
    }
}

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, _command: &str) -> Result<bool> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", self.prompt)
            .and_then(|_| stdout.flush())
            .map_err(|e| ProcError::Io(format!("failed to write confirmation prompt: {}", e)))?;

        let mut answer = String::new();
        io::stdin()
            .lock()
            .read_line(&mut answer)
            .map_err(|e| ProcError::Io(format!("failed to read confirmation: {}", e)))?;

        Ok(is_affirmative(&answer))
    }
}

/// An answer is affirmative when its first character is `y` or `Y`.
pub fn is_affirmative(answer: &str) -> bool {
    answer
        .chars()
        .next()
        .is_some_and(|c| c.eq_ignore_ascii_case(&'y'))
}

/// Refreshes elevated credentials before a privileged command runs.
pub trait PrivilegeValidator {
    fn validate(&mut self) -> Result<()>;
}

impl<F> PrivilegeValidator for F
where
    F: FnMut() -> Result<()>,
{
    fn validate(&mut self) -> Result<()> {
        self()
    }
}

/// Runs `sudo -v` attached to the terminal so it can prompt for a password.
#[derive(Debug, Clone, Copy, Default)]
pub struct SudoValidator;

impl PrivilegeValidator for SudoValidator {
    fn validate(&mut self) -> Result<()> {
        let status = Command::new("sudo")
            .arg("-v")
            .status()
            .map_err(|source| ProcError::SpawnFailure {
                program: "sudo".to_string(),
                source,
            })?;

        // The guarded command reports its own failure if credentials are missing.
        if !status.success() {
            warn!(status = %status, "sudo -v did not succeed");
        }

        Ok(())
    }
}
