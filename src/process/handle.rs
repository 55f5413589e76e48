//! Live process handles.

use super::result::{ProcessResult, exit_code_of};
use crate::error::{ProcError, Result};
use chrono::{DateTime, Utc};
use std::io::{self, Read};
use std::process::Child;
use std::thread::{self, JoinHandle};

pub(crate) type Reader = JoinHandle<io::Result<Vec<u8>>>;

/// A spawned OS process.
///
/// Stdout and stderr are drained by background reader threads from spawn
/// time on, so a child can never block on a full pipe, whether it is being
/// waited on or only polled.
///
/// The terminal status starts as `None` and is set exactly once, by
/// [`ProcessHandle::try_status`] or [`ProcessHandle::wait`].
#[derive(Debug)]
pub struct ProcessHandle {
    command: String,
    pid: u32,
    started_at: DateTime<Utc>,
    pub(crate) child: Child,
    pub(crate) stdout: Option<Reader>,
    pub(crate) stderr: Option<Reader>,
    pub(crate) status: Option<i32>,
    pub(crate) result: Option<ProcessResult>,
}

impl ProcessHandle {
    /// Take ownership of a freshly spawned child and start draining its pipes.
    pub(crate) fn new(command: String, mut child: Child) -> Result<Self> {
        let pid = child.id();
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let readers = drain(stdout, pid, "stdout").and_then(|out| {
            let err = drain(stderr, pid, "stderr")?;
            Ok((out, err))
        });

        let (stdout, stderr) = match readers {
            Ok(readers) => readers,
            Err(e) => {
                // Nobody would ever reap or drain this child.
                let _ = child.kill();
                let _ = child.wait();
                return Err(ProcError::Io(format!(
                    "failed to start output readers for pid {}: {}",
                    pid, e
                )));
            }
        };

        Ok(Self {
            command,
            pid,
            started_at: Utc::now(),
            child,
            stdout,
            stderr,
            status: None,
            result: None,
        })
    }

    /// The command string this handle was spawned from.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// OS process identifier.
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// When the process was spawned.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Last observed terminal status, without touching the OS.
    pub fn status(&self) -> Option<i32> {
        self.status
    }

    /// Returns true once a terminal status has been observed.
    pub fn is_terminated(&self) -> bool {
        self.status.is_some()
    }

    /// The collected result, if [`ProcessHandle::wait`] has completed.
    pub fn result(&self) -> Option<&ProcessResult> {
        self.result.as_ref()
    }

    /// Non-blocking status check.
    ///
    /// Records the exit code the first time the process is seen terminated.
    pub fn try_status(&mut self) -> Result<Option<i32>> {
        if self.status.is_some() {
            return Ok(self.status);
        }

        match self.child.try_wait() {
            Ok(Some(status)) => {
                let code = exit_code_of(status);
                self.status = Some(code);
                Ok(Some(code))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(ProcError::Io(format!(
                "failed to check status of pid {} ('{}'): {}",
                self.pid, self.command, e
            ))),
        }
    }

    /// Block until the process exits and return its result.
    ///
    /// Repeated calls return the cached result.
    pub fn wait(&mut self) -> Result<ProcessResult> {
        super::collector::collect(self)
    }
}

fn drain<R>(pipe: Option<R>, pid: u32, stream: &str) -> io::Result<Option<Reader>>
where
    R: Read + Send + 'static,
{
    let Some(mut pipe) = pipe else {
        return Ok(None);
    };

    let reader = thread::Builder::new()
        .name(format!("procpoll-{}-{}", pid, stream))
        .spawn(move || {
            let mut buf = Vec::new();
            pipe.read_to_end(&mut buf)?;
            Ok(buf)
        })?;

    Ok(Some(reader))
}
