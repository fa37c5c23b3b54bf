// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words termios passphrase ECHONL

//! # r3bl_ttyio
//!
//! Blocking console I/O for command line tools that have to ask a human for input,
//! including secrets, on POSIX terminals and the Windows console.
//!
//! - The controlling terminal is opened lazily, once, on the first interactive call
//!   ([`TtySession::ensure_console_open()`]). In batch mode prompts go to stderr.
//! - [`TtySession::read_line()`] reads a line byte by byte, dropping control bytes, or
//!   hands off to a [`LineEditor`] (history, completion) when one is registered.
//! - [`TtySession::read_hidden_line()`] turns echo off (`-echo -echoe -echok -echonl`,
//!   canonical mode stays on) and collects the secret into a [`SensitiveBuffer`] that
//!   erases every block it ever used. The terminal is restored on every exit path: RAII
//!   guard, process exit hook, and signal cleanup, all sharing one idempotent restore.
//! - Everything written to the console is measured so [`TtySession::erase_prompt()`]
//!   can blank the prompt afterwards.
//!
//! ```no_run
//! use r3bl_ttyio::{TtyConfig, TtySession};
//!
//! fn main() -> miette::Result<()> {
//!     let session = TtySession::new(TtyConfig::default());
//!     let secret = session.read_hidden_line("Passphrase: ")?;
//!     session.emit(format_args!("\n"))?;
//!     if secret.is_eof() {
//!         return Ok(());
//!     }
//!     println!("read {} bytes", secret.len());
//!     Ok(())
//! }
//! ```
//!
//! Errors are [`TtyError`]s. None of them is recoverable for the operation that
//! produced it; hosts report the diagnostic and exit with [`TtyError::exit_code()`].
//! End of input is not an error, see [`CONTROL_D`].

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules (re-exported below to provide clean public API).
pub mod common;
pub mod console;
pub mod line_reader;
pub mod log;
pub mod prompt;
pub mod raw_mode;
pub mod secure_buffer;
pub mod session;
pub mod test_fixtures;

// Re-export stable public API using glob imports for ergonomic, flat API surface.
pub use common::*;
pub use console::*;
pub use line_reader::*;
pub use log::*;
pub use prompt::*;
pub use raw_mode::*;
pub use secure_buffer::*;
pub use session::*;
pub use test_fixtures::*;
