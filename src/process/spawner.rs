//! Non-blocking process creation.

use super::handle::ProcessHandle;
use crate::command::tokenize;
use crate::error::{ProcError, Result};
use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::process::{Command, Stdio};
use tracing::debug;

/// What the child sees on its standard input.
#[derive(Debug, Default)]
pub enum StdinSource {
    /// Empty, closed stdin.
    #[default]
    Null,
    /// Share the caller's stdin.
    Inherit,
    /// Feed these bytes, then EOF.
    Bytes(Vec<u8>),
    /// Read from an open file.
    File(File),
}

impl StdinSource {
    fn into_stdio(self) -> Result<Stdio> {
        match self {
            StdinSource::Null => Ok(Stdio::null()),
            StdinSource::Inherit => Ok(Stdio::inherit()),
            StdinSource::File(file) => Ok(Stdio::from(file)),
            StdinSource::Bytes(bytes) => {
                // Spool through an unlinked temp file so the write can never
                // block on a child that is not reading yet.
                let file = tempfile::tempfile()
                    .and_then(|mut file| {
                        file.write_all(&bytes)?;
                        file.seek(SeekFrom::Start(0))?;
                        Ok(file)
                    })
                    .map_err(|e| ProcError::Io(format!("failed to spool stdin: {}", e)))?;
                Ok(Stdio::from(file))
            }
        }
    }
}

impl From<&str> for StdinSource {
    fn from(input: &str) -> Self {
        StdinSource::Bytes(input.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for StdinSource {
    fn from(input: Vec<u8>) -> Self {
        StdinSource::Bytes(input)
    }
}

impl From<File> for StdinSource {
    fn from(file: File) -> Self {
        StdinSource::File(file)
    }
}

/// Start `command` with stdout and stderr captured. Does not wait.
///
/// # Errors
///
/// * [`ProcError::InvalidCommand`] - the string tokenizes to nothing or is malformed
/// * [`ProcError::SpawnFailure`] - the OS refused to start the program
pub fn spawn(command: &str, stdin: StdinSource) -> Result<ProcessHandle> {
    let spec = tokenize(command)?;
    let stdin = stdin.into_stdio()?;

    let child = Command::new(spec.program())
        .args(spec.args())
        .stdin(stdin)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ProcError::SpawnFailure {
            program: spec.program().to_string(),
            source,
        })?;

    debug!(pid = child.id(), command, "spawned process");

    ProcessHandle::new(command.to_string(), child)
}
