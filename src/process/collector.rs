//! Blocking result collection.

use super::handle::{ProcessHandle, Reader};
use super::result::{ProcessResult, exit_code_of};
use crate::error::{ProcError, Result};
use tracing::debug;

/// Wait for `handle` to exit and return its exit code and captured output.
///
/// The first successful call caches the result on the handle; later calls
/// return the cached copy without blocking or re-reading the pipes.
pub fn collect(handle: &mut ProcessHandle) -> Result<ProcessResult> {
    if let Some(result) = &handle.result {
        return Ok(result.clone());
    }

    let code = match handle.status {
        Some(code) => code,
        None => {
            let status = handle.child.wait().map_err(|e| {
                ProcError::Io(format!(
                    "failed to wait for pid {} ('{}'): {}",
                    handle.pid(),
                    handle.command(),
                    e
                ))
            })?;
            exit_code_of(status)
        }
    };
    handle.status = Some(code);

    let stdout = join_reader(handle.stdout.take(), handle, "stdout")?;
    let stderr = join_reader(handle.stderr.take(), handle, "stderr")?;

    debug!(
        pid = handle.pid(),
        exit_code = code,
        stdout_bytes = stdout.len(),
        stderr_bytes = stderr.len(),
        "collected process"
    );

    let result = ProcessResult::new(code, stdout, stderr);
    handle.result = Some(result.clone());
    Ok(result)
}

fn join_reader(reader: Option<Reader>, handle: &ProcessHandle, stream: &str) -> Result<Vec<u8>> {
    let Some(reader) = reader else {
        return Ok(Vec::new());
    };

    reader
        .join()
        .map_err(|_| {
            ProcError::Io(format!(
                "{} reader for pid {} panicked",
                stream,
                handle.pid()
            ))
        })?
        .map_err(|e| {
            ProcError::Io(format!(
                "failed to read {} of pid {} ('{}'): {}",
                stream,
                handle.pid(),
                handle.command(),
                e
            ))
        })
}
