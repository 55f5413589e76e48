//! Procpoll: spawn external commands, collect their results, and poll
//! batches of them with bounded retries.
//!
//! - [`process`]: spawn one command, check it without blocking, collect it
//! - [`batch`]: spawn many commands at once, or run them all to completion
//! - [`poll`]: bounded-retry polling of live handles
//! - [`guarded`]: output routing, nonzero-exit escalation, confirmation gate
//!
//! ```no_run
//! use procpoll::batch::spawn_all;
//! use procpoll::poll::poll;
//! use std::time::Duration;
//!
//! let mut batch = spawn_all(&["make -C a", "make -C b"]);
//! let report = poll(batch.handles_mut(), Duration::from_secs(3), 3)?;
//! if !report.is_complete() {
//!     eprintln!("still running: {:?}", report.pending());
//! }
//! # Ok::<(), procpoll::error::ProcError>(())
//! ```

pub mod batch;
pub mod command;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod guarded;
pub mod poll;
pub mod process;
