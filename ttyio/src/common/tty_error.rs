// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words batchmode tcgetattr tcsetattr

//! Errors from console operations. See [`TtyError`] for details.

use std::{io, path::PathBuf};

/// Exit status used by the host process when a [`TtyError`] terminates it.
pub const TTY_FATAL_EXIT_CODE: i32 = 2;

/// Errors that stop an interactive console operation.
///
/// Every variant is terminal for the operation that produced it: there are no retries.
/// The library never exits the process itself; the host (see the `ttyio` binary) reports
/// the diagnostic and exits with [`Self::exit_code()`].
///
/// | Variant               | Cause                                              |
/// | :-------------------- | :------------------------------------------------- |
/// | [`BatchModeRefusal`]  | Input requested while batch mode is on             |
/// | [`NoTerminalRefusal`] | Input requested while the terminal is disabled     |
/// | [`DeviceOpen`]        | The controlling terminal or console can't be opened |
/// | [`SaveAttributes`]    | Terminal attributes can't be read before hiding    |
/// | [`ApplyAttributes`]   | Terminal attributes can't be applied               |
/// | [`Write`]             | Writing a prompt or message to the console failed  |
/// | [`SignalHandler`]     | A signal cleanup handler can't be registered       |
///
/// End of input is not an error, it is reported in band (see
/// [`crate::CONTROL_D`]). Failing to *restore* attributes is not an error either, it is
/// logged and swallowed.
///
/// [`BatchModeRefusal`]: Self::BatchModeRefusal
/// [`NoTerminalRefusal`]: Self::NoTerminalRefusal
/// [`DeviceOpen`]: Self::DeviceOpen
/// [`SaveAttributes`]: Self::SaveAttributes
/// [`ApplyAttributes`]: Self::ApplyAttributes
/// [`Write`]: Self::Write
/// [`SignalHandler`]: Self::SignalHandler
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum TtyError {
    #[error("Sorry, we are in batchmode - can't get input")]
    #[diagnostic(
        code(r3bl_ttyio::batch_mode_refusal),
        help("Remove the batch flag, or supply the answer non-interactively.")
    )]
    BatchModeRefusal,

    #[error("Sorry, no terminal at all requested - can't get input")]
    #[diagnostic(
        code(r3bl_ttyio::no_terminal_refusal),
        help("Remove the no-terminal flag to allow interactive prompts.")
    )]
    NoTerminalRefusal,

    #[error("cannot open '{}'", .path.display())]
    #[diagnostic(
        code(r3bl_ttyio::device_open),
        help("Run the program from an interactive terminal, or pass an explicit tty path.")
    )]
    DeviceOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("tcgetattr() failed")]
    #[diagnostic(code(r3bl_ttyio::save_attributes))]
    SaveAttributes(#[source] io::Error),

    #[error("tcsetattr() failed")]
    #[diagnostic(code(r3bl_ttyio::apply_attributes))]
    ApplyAttributes(#[source] io::Error),

    #[error("writing to the console failed")]
    #[diagnostic(code(r3bl_ttyio::write))]
    Write(#[source] io::Error),

    #[error("installing the signal cleanup handler failed")]
    #[diagnostic(code(r3bl_ttyio::signal_handler))]
    SignalHandler(#[source] io::Error),
}

impl TtyError {
    /// Process exit status for this error. All console errors are fatal to an
    /// interactive tool, so this is always [`TTY_FATAL_EXIT_CODE`].
    #[must_use]
    pub fn exit_code(&self) -> i32 { TTY_FATAL_EXIT_CODE }
}
