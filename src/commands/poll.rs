//! Implementation of the `procpoll poll` command.
//!
//! Starts every command, polls with bounded retries, then prints one status
//! line per command in input order. Commands still running when polling
//! gives up are left running.

use crate::cli::PollArgs;
use procpoll::batch::{Batch, BatchFailure, spawn_all};
use procpoll::config::Config;
use procpoll::error::{ProcError, Result};
use procpoll::poll::Poller;
use procpoll::process::ProcessHandle;
use serde_json::{Value, json};
use std::time::Duration;

/// One input command after spawning.
enum Row<'a> {
    Spawned(&'a ProcessHandle),
    Failed(&'a BatchFailure),
}

pub fn cmd_poll(args: PollArgs, config: &Config) -> Result<()> {
    let wait = match args.wait {
        Some(seconds) => Duration::try_from_secs_f64(seconds).map_err(|e| {
            ProcError::UserError(format!(
                "--wait must be a non-negative number of seconds (found {}): {}",
                seconds, e
            ))
        })?,
        None => config.poll.wait()?,
    };
    let max_tries = args.tries.unwrap_or(config.poll.max_tries);

    let mut batch = spawn_all(&args.commands);
    let report = Poller::new(wait, max_tries).poll(batch.handles_mut())?;

    let rows = rows(&batch, args.commands.len());
    if args.json {
        let processes: Vec<Value> = rows.iter().map(row_json).collect();
        let rendered = serde_json::to_string_pretty(&json!({
            "passes": report.passes(),
            "sleeps": report.sleeps(),
            "complete": report.is_complete(),
            "processes": processes,
        }))
        .map_err(|e| ProcError::Io(format!("failed to render JSON: {}", e)))?;
        println!("{}", rendered);
    } else {
        for row in &rows {
            println!("{}", row_line(row));
        }
    }

    report.into_result(batch.handles())?;

    let nonzero = batch
        .handles()
        .iter()
        .filter(|h| h.status().is_some_and(|code| code != 0))
        .count();
    let failed = nonzero + batch.failures().len();
    if failed > 0 {
        return Err(ProcError::BatchFailure {
            failed,
            total: args.commands.len(),
        });
    }
    Ok(())
}

fn rows(batch: &Batch, total: usize) -> Vec<Row<'_>> {
    let mut handles = batch.handles().iter();
    (0..total)
        .filter_map(|index| {
            match batch.failures().iter().find(|f| f.index == index) {
                Some(failure) => Some(Row::Failed(failure)),
                None => handles.next().map(Row::Spawned),
            }
        })
        .collect()
}

fn row_line(row: &Row<'_>) -> String {
    match row {
        Row::Spawned(handle) => {
            let status = match handle.status() {
                Some(code) => format!("exit {}", code),
                None => "running".to_string(),
            };
            format!("{:>8}  {:<8}  {}", handle.pid(), status, handle.command())
        }
        Row::Failed(failure) => {
            format!("{:>8}  {:<8}  {} ({})", "-", "error", failure.command, failure.error)
        }
    }
}

fn row_json(row: &Row<'_>) -> Value {
    match row {
        Row::Spawned(handle) => json!({
            "command": handle.command(),
            "pid": handle.pid(),
            "started_at": handle.started_at().to_rfc3339(),
            "exit_code": handle.status(),
            "running": !handle.is_terminated(),
        }),
        Row::Failed(failure) => json!({
            "command": failure.command,
            "error": failure.error.to_string(),
        }),
    }
}
