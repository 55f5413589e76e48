//! Command implementations for procpoll.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Each command resolves the effective config first, so
//! flags override `procpoll.yaml`, which overrides built-in defaults.

mod batch;
mod dangerous;
mod poll;
mod run;

use crate::cli::{Cli, Command};
use procpoll::config::Config;
use procpoll::error::Result;
use tracing::debug;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::resolve(cli.config.as_deref())?;
    debug!(?config, "resolved config");

    match cli.command {
        Command::Run(args) => run::cmd_run(args, &config),
        Command::Dangerous(args) => dangerous::cmd_dangerous(args, &config),
        Command::Batch(args) => batch::cmd_batch(args),
        Command::Poll(args) => poll::cmd_poll(args, &config),
    }
}
