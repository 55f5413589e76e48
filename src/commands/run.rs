//! Implementation of the `procpoll run` command.

use crate::cli::RunArgs;
use procpoll::config::Config;
use procpoll::error::Result;
use procpoll::guarded::GuardedRunner;
use procpoll::process::StdinSource;

pub fn cmd_run(args: RunArgs, config: &Config) -> Result<()> {
    let stdin = match args.input {
        Some(input) => StdinSource::from(input.as_str()),
        None => StdinSource::Null,
    };
    let message = args
        .message
        .as_deref()
        .unwrap_or(&config.guarded.error_message);

    GuardedRunner::standard().run_guarded_or_exit(&args.command, stdin, message)?;
    Ok(())
}
