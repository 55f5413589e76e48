//! CLI argument parsing for procpoll.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Procpoll: spawn, collect and poll external commands.
///
/// Command strings are split like a POSIX shell would split words, but no
/// other shell syntax is interpreted: each string runs exactly one program.
#[derive(Parser, Debug)]
#[command(name = "procpoll")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to a procpoll.yaml config file (default: $PROCPOLL_CONFIG).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for procpoll.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one command with its output passed through.
    ///
    /// On a nonzero exit, prints the failure message and exits with the
    /// command's own exit code.
    Run(RunArgs),

    /// Confirm interactively, then run one command like `run`.
    Dangerous(DangerousArgs),

    /// Run several commands concurrently and wait for all of them.
    ///
    /// Results are reported in the order the commands were given.
    Batch(BatchArgs),

    /// Start several commands and poll them with bounded retries.
    ///
    /// Exits with status 3 if any command is still running when the
    /// retries run out.
    Poll(PollArgs),
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Command string to run (quote it as one argument).
    pub command: String,

    /// Text to feed to the command's standard input.
    #[arg(long)]
    pub input: Option<String>,

    /// Message printed to stderr when the command fails.
    #[arg(short, long)]
    pub message: Option<String>,
}

/// Arguments for the `dangerous` command.
#[derive(Parser, Debug)]
pub struct DangerousArgs {
    /// Command string to run after confirmation.
    pub command: String,

    /// Message printed to stderr when the command fails.
    #[arg(short, long)]
    pub message: Option<String>,

    /// Refresh sudo credentials (`sudo -v`) before running.
    #[arg(long)]
    pub sudo: bool,
}

/// Arguments for the `batch` command.
#[derive(Parser, Debug)]
pub struct BatchArgs {
    /// Command strings to run.
    #[arg(required = true)]
    pub commands: Vec<String>,

    /// Print results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `poll` command.
#[derive(Parser, Debug)]
pub struct PollArgs {
    /// Command strings to start.
    #[arg(required = true)]
    pub commands: Vec<String>,

    /// Seconds to wait between polls (default from config: 3).
    #[arg(short, long)]
    pub wait: Option<f64>,

    /// Retries after the first poll (default from config: 3).
    #[arg(short, long)]
    pub tries: Option<u32>,

    /// Print statuses as JSON.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_run_minimal() {
        let cli = Cli::try_parse_from(["procpoll", "run", "echo 1 2"]).unwrap();
        if let Command::Run(args) = cli.command {
            assert_eq!(args.command, "echo 1 2");
            assert!(args.input.is_none());
            assert!(args.message.is_none());
        } else {
            panic!("Expected Run command");
        }
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
    }

    #[test]
    fn parse_run_full() {
        let cli = Cli::try_parse_from([
            "procpoll",
            "-vv",
            "--config",
            "procpoll.yaml",
            "run",
            "grep 2",
            "--input",
            "1\n2\n",
            "-m",
            "grep failed",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("procpoll.yaml")));
        if let Command::Run(args) = cli.command {
            assert_eq!(args.input.as_deref(), Some("1\n2\n"));
            assert_eq!(args.message.as_deref(), Some("grep failed"));
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn parse_dangerous_with_sudo() {
        let cli = Cli::try_parse_from(["procpoll", "dangerous", "rm -rf build", "--sudo"]).unwrap();
        if let Command::Dangerous(args) = cli.command {
            assert_eq!(args.command, "rm -rf build");
            assert!(args.sudo);
        } else {
            panic!("Expected Dangerous command");
        }
    }

    #[test]
    fn parse_batch() {
        let cli = Cli::try_parse_from(["procpoll", "batch", "echo a", "echo b", "--json"]).unwrap();
        if let Command::Batch(args) = cli.command {
            assert_eq!(args.commands, vec!["echo a", "echo b"]);
            assert!(args.json);
        } else {
            panic!("Expected Batch command");
        }
    }

    #[test]
    fn parse_batch_requires_commands() {
        assert!(Cli::try_parse_from(["procpoll", "batch"]).is_err());
    }

    #[test]
    fn parse_poll_overrides() {
        let cli = Cli::try_parse_from([
            "procpoll", "poll", "sleep 1", "--wait", "0.5", "--tries", "0",
        ])
        .unwrap();
        if let Command::Poll(args) = cli.command {
            assert_eq!(args.commands, vec!["sleep 1"]);
            assert_eq!(args.wait, Some(0.5));
            assert_eq!(args.tries, Some(0));
            assert!(!args.json);
        } else {
            panic!("Expected Poll command");
        }
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["procpoll", "poll", "true", "-v"]).unwrap();
        assert_eq!(cli.verbose, 1);
    }
}
