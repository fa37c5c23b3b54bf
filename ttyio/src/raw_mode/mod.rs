// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words ECHOE ECHOK ECHONL TCSAFLUSH

//! Hidden input mode: echo off while a secret is typed, guaranteed restoration after.
//!
//! ## Hidden mode vs raw mode
//!
//! Unlike a full raw mode (see `stty raw`), hidden mode keeps the line discipline
//! intact. The kernel still buffers the line and handles erase/kill, only the echo
//! flags are cleared:
//!
//! ```bash
//! stty -echo -echoe -echok -echonl   # what hidden mode does
//! stty "$saved"                      # what restoration does
//! ```
//!
//! ## State machine
//!
//! ```text
//! Normal --enter_hidden_mode()--> HiddenInputActive --exit_hidden_mode()--> Normal
//!                                         |
//!                                         +--restore_after_signal()-------> Normal
//! ```
//!
//! Entering snapshots the current attributes and sets `restore_pending`. Every path
//! back to `Normal` first swaps `restore_pending` to `false` and only restores if it
//! was `true`, so the normal path, the process exit hook and a signal handler can all
//! race to restore without ever applying the snapshot twice.
//!
//! ## Platform support
//!
//! - **Unix/Linux/macOS**: termios via rustix, applied with `TCSAFLUSH`.
//! - **Windows**: console input mode via winapi (`ENABLE_ECHO_INPUT` cleared, line
//!   input and processed input kept).
//!
//! ## Usage example
//!
//! ```no_run
//! use r3bl_ttyio::{HiddenModeControl, HiddenModeController, HiddenModeGuard,
//!                  TermiosAttributes};
//! use std::sync::Arc;
//!
//! let tty = std::fs::File::options().read(true).write(true).open("/dev/tty").unwrap();
//! let control: Arc<dyn HiddenModeControl> =
//!     Arc::new(HiddenModeController::new(TermiosAttributes::try_from_file(&tty).unwrap()));
//! {
//!     let _guard = HiddenModeGuard::new(Arc::clone(&control)).unwrap();
//!     // Typed characters are not echoed here.
//! } // Echo restored when the guard is dropped.
//! ```

// Private modules (hide internal structure).
mod cleanup_hooks;
mod hidden_mode_core;

#[cfg(unix)]
mod hidden_mode_unix;

#[cfg(windows)]
mod hidden_mode_windows;

// Re-export the public API (flat, ergonomic surface).
pub use cleanup_hooks::*;
pub use hidden_mode_core::*;

#[cfg(unix)]
pub use hidden_mode_unix::*;

#[cfg(windows)]
pub use hidden_mode_windows::*;
