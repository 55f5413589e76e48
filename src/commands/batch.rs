//! Implementation of the `procpoll batch` command.

use crate::cli::BatchArgs;
use procpoll::batch::run_all;
use procpoll::error::{ProcError, Result};
use serde_json::{Value, json};
use std::io::{self, Write};

pub fn cmd_batch(args: BatchArgs) -> Result<()> {
    let results = run_all(&args.commands);
    let total = results.len();
    let failed = results
        .iter()
        .filter(|outcome| !matches!(outcome, Ok(result) if result.success()))
        .count();

    if args.json {
        let entries: Vec<Value> = args
            .commands
            .iter()
            .zip(&results)
            .map(|(command, outcome)| match outcome {
                Ok(result) => json!({
                    "command": command,
                    "exit_code": result.exit_code(),
                    "stdout": result.stdout_text(),
                    "stderr": result.stderr_text(),
                }),
                Err(e) => json!({
                    "command": command,
                    "error": e.to_string(),
                }),
            })
            .collect();
        let rendered = serde_json::to_string_pretty(&entries)
            .map_err(|e| ProcError::Io(format!("failed to render JSON: {}", e)))?;
        println!("{}", rendered);
    } else {
        let mut stdout = io::stdout().lock();
        let mut stderr = io::stderr().lock();
        for (command, outcome) in args.commands.iter().zip(&results) {
            let written = match outcome {
                Ok(result) => writeln!(stdout, "==> {} (exit {})", command, result.exit_code())
                    .and_then(|_| stdout.write_all(result.stdout()))
                    .and_then(|_| stderr.write_all(result.stderr())),
                Err(e) => writeln!(stdout, "==> {} (error: {})", command, e),
            };
            written.map_err(|e| ProcError::Io(format!("failed to write output: {}", e)))?;
        }
    }

    if failed > 0 {
        return Err(ProcError::BatchFailure { failed, total });
    }
    Ok(())
}
