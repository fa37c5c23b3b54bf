// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words winapi wincon consoleapi minwindef winnt conin conout

//! Windows attribute backend. The console has no termios, the same effect is achieved
//! by switching the input mode flags of the console input handle with
//! `GetConsoleMode()` / `SetConsoleMode()`.

use crate::TerminalAttributes;
use std::{fs::File, io, os::windows::io::AsRawHandle};
use winapi::{shared::minwindef::DWORD,
             um::{consoleapi::{GetConsoleMode, SetConsoleMode},
                  wincon::{ENABLE_ECHO_INPUT, ENABLE_LINE_INPUT, ENABLE_PROCESSED_INPUT,
                           ENABLE_PROCESSED_OUTPUT, ENABLE_WRAP_AT_EOL_OUTPUT},
                  winnt::HANDLE}};

/// Input mode applied when the console is opened: line input with echo.
pub const DEFAULT_INPUT_MODE: DWORD =
    ENABLE_LINE_INPUT | ENABLE_ECHO_INPUT | ENABLE_PROCESSED_INPUT;

/// Output mode applied when the console is opened.
pub const DEFAULT_OUTPUT_MODE: DWORD = ENABLE_WRAP_AT_EOL_OUTPUT | ENABLE_PROCESSED_OUTPUT;

fn get_console_mode(file: &File) -> io::Result<DWORD> {
    let mut mode: DWORD = 0;
    // SAFETY: the handle is owned by `file` and stays open for the duration of the call,
    // `mode` is a valid out pointer.
    let ok = unsafe { GetConsoleMode(file.as_raw_handle() as HANDLE, &raw mut mode) };
    if ok == 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(mode)
    }
}

fn set_console_mode(file: &File, mode: DWORD) -> io::Result<()> {
    // SAFETY: the handle is owned by `file` and stays open for the duration of the call.
    let ok = unsafe { SetConsoleMode(file.as_raw_handle() as HANDLE, mode) };
    if ok == 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}

/// Put freshly opened `CONIN$` / `CONOUT$` handles into their default modes.
///
/// # Errors
///
/// Returns the OS error if either mode can't be applied.
pub fn apply_default_console_modes(input: &File, output: &File) -> io::Result<()> {
    set_console_mode(input, DEFAULT_INPUT_MODE)?;
    set_console_mode(output, DEFAULT_OUTPUT_MODE)
}

/// Console input mode of an open `CONIN$` handle.
#[derive(Debug)]
pub struct ConsoleModeAttributes {
    input: File,
}

impl ConsoleModeAttributes {
    #[must_use]
    pub fn new(input: File) -> Self { Self { input } }

    /// Duplicate the handle of `file`.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle can't be duplicated.
    pub fn try_from_file(file: &File) -> io::Result<Self> { Ok(Self::new(file.try_clone()?)) }
}

impl TerminalAttributes for ConsoleModeAttributes {
    type Snapshot = DWORD;

    fn get_attributes(&self) -> io::Result<DWORD> { get_console_mode(&self.input) }

    fn set_attributes(&self, snapshot: &DWORD) -> io::Result<()> {
        set_console_mode(&self.input, *snapshot)
    }

    fn hide_echo(snapshot: &DWORD) -> DWORD {
        (*snapshot | ENABLE_LINE_INPUT | ENABLE_PROCESSED_INPUT) & !ENABLE_ECHO_INPUT
    }
}
