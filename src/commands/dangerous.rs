//! Implementation of the `procpoll dangerous` command.

use crate::cli::DangerousArgs;
use procpoll::config::Config;
use procpoll::error::Result;
use procpoll::guarded::{GuardedRunner, TerminalConfirm};
use procpoll::process::StdinSource;

pub fn cmd_dangerous(args: DangerousArgs, config: &Config) -> Result<()> {
    let message = args
        .message
        .as_deref()
        .unwrap_or(&config.guarded.error_message);

    // stdin is reserved for the confirmation answer.
    GuardedRunner::standard()
        .with_confirm(TerminalConfirm::new(config.guarded.confirm_prompt.clone()))
        .run_dangerous_or_exit(&args.command, StdinSource::Null, message, args.sudo)?;
    Ok(())
}
