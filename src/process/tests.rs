//! Tests for spawning and collecting single processes.

use super::*;
use crate::error::ProcError;
use std::io::{Seek, SeekFrom, Write};
use std::time::{Duration, Instant};

#[test]
fn test_process_captures_stdout() {
    let result = process("echo 1 2", StdinSource::Null).unwrap();
    assert_eq!(result, ProcessResult::new(0, b"1 2\n".to_vec(), Vec::new()));
}

#[test]
fn test_process_captures_stderr_and_exit_code() {
    let result = process("sh -c \"echo oops >&2; exit 3\"", StdinSource::Null).unwrap();
    assert_eq!(result.exit_code(), 3);
    assert_eq!(result.stdout(), b"");
    assert_eq!(result.stderr(), b"oops\n");
}

#[test]
fn test_pipe_string_feeds_stdin() {
    let result = pipe_string("grep 2", "1\n2\n3\n").unwrap();
    assert_eq!(result, ProcessResult::new(0, b"2\n".to_vec(), Vec::new()));
}

#[test]
fn test_stdin_from_file() {
    let mut file = tempfile::tempfile().unwrap();
    file.write_all(b"alpha\nbeta\n").unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();

    let result = process("grep beta", StdinSource::from(file)).unwrap();
    assert_eq!(result.stdout(), b"beta\n");
}

#[test]
fn test_null_stdin_reads_eof() {
    let result = process("cat", StdinSource::Null).unwrap();
    assert_eq!(result.exit_code(), 0);
    assert!(result.stdout().is_empty());
}

#[test]
fn test_large_output_does_not_deadlock() {
    // Well past any OS pipe buffer on both streams.
    let result = process(
        "sh -c \"head -c 1000000 /dev/zero; head -c 1000000 /dev/zero >&2\"",
        StdinSource::Null,
    )
    .unwrap();
    assert_eq!(result.exit_code(), 0);
    assert_eq!(result.stdout().len(), 1_000_000);
    assert_eq!(result.stderr().len(), 1_000_000);
}

#[test]
fn test_wait_is_idempotent() {
    let mut handle = spawn("echo once", StdinSource::Null).unwrap();
    let first = handle.wait().unwrap();
    let second = handle.wait().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.stdout(), b"once\n");
    assert_eq!(handle.result(), Some(&first));
    assert_eq!(handle.status(), Some(0));
}

#[test]
fn test_spawn_does_not_block() {
    let start = Instant::now();
    let mut handle = spawn("sleep 1", StdinSource::Null).unwrap();
    assert!(start.elapsed() < Duration::from_millis(900));
    assert_eq!(handle.try_status().unwrap(), None);
    assert!(!handle.is_terminated());

    assert_eq!(handle.wait().unwrap().exit_code(), 0);
    assert!(handle.is_terminated());
}

#[test]
fn test_try_status_records_exit_code() {
    let mut handle = spawn("sh -c \"exit 5\"", StdinSource::Null).unwrap();
    let deadline = Instant::now() + Duration::from_secs(5);
    while handle.try_status().unwrap().is_none() {
        assert!(Instant::now() < deadline, "process never exited");
        std::thread::sleep(Duration::from_millis(10));
    }
    assert_eq!(handle.status(), Some(5));

    // Output is still collectable after a poll observed the exit.
    let result = handle.wait().unwrap();
    assert_eq!(result.exit_code(), 5);
}

#[test]
fn test_handle_reports_identity() {
    let mut handle = spawn("echo id", StdinSource::Null).unwrap();
    assert_eq!(handle.command(), "echo id");
    assert!(handle.pid() > 0);
    assert!(handle.started_at() <= chrono::Utc::now());
    handle.wait().unwrap();
}

#[test]
fn test_signal_exit_code_is_negative() {
    let result = process("sh -c \"kill -9 $$\"", StdinSource::Null).unwrap();
    assert_eq!(result.exit_code(), -9);
}

#[test]
fn test_empty_command_is_invalid() {
    let err = spawn("   ", StdinSource::Null).unwrap_err();
    assert!(matches!(err, ProcError::InvalidCommand(_)));
}

#[test]
fn test_missing_executable_is_spawn_failure() {
    let err = spawn("nonexistent_command_xyz_123", StdinSource::Null).unwrap_err();
    match err {
        ProcError::SpawnFailure { program, .. } => {
            assert_eq!(program, "nonexistent_command_xyz_123");
        }
        other => panic!("expected SpawnFailure, got {:?}", other),
    }
}
