//! Terminal results of a collected process.

use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::process::ExitStatus;

/// Exit code and fully captured output of a terminated process.
///
/// Only built once the process has exited and both pipes reached EOF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessResult {
    exit_code: i32,
    #[serde(serialize_with = "serialize_lossy")]
    stdout: Vec<u8>,
    #[serde(serialize_with = "serialize_lossy")]
    stderr: Vec<u8>,
}

impl ProcessResult {
    pub fn new(exit_code: i32, stdout: Vec<u8>, stderr: Vec<u8>) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn stdout(&self) -> &[u8] {
        &self.stdout
    }

    pub fn stderr(&self) -> &[u8] {
        &self.stderr
    }

    /// Stdout decoded as UTF-8, replacing invalid sequences.
    pub fn stdout_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    /// Stderr decoded as UTF-8, replacing invalid sequences.
    pub fn stderr_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }

    /// True when the exit code is zero.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

fn serialize_lossy<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(bytes))
}

/// Integer exit code for a terminated process.
///
/// A process killed by a signal reports the negated signal number on Unix.
/// `-1` is used when the platform reports neither.
pub(crate) fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }

    -1
}
