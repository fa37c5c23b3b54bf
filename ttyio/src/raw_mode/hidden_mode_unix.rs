// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words ECHOE ECHOK ECHONL TCSAFLUSH NOCTTY openpt grantpt unlockpt ptsname

//! Unix/Linux/macOS attribute backend using rustix's safe termios API.

use crate::TerminalAttributes;
use rustix::termios::{self, LocalModes, OptionalActions, Termios};
use std::{fs::File, io, os::fd::OwnedFd};

/// Local mode flags cleared while hidden input is active. `ICANON` is deliberately
/// absent: the kernel keeps doing line editing.
pub const HIDDEN_INPUT_CLEARED_FLAGS: LocalModes = LocalModes::ECHO
    .union(LocalModes::ECHOE)
    .union(LocalModes::ECHOK)
    .union(LocalModes::ECHONL);

/// termios attributes of an open terminal file descriptor.
#[derive(Debug)]
pub struct TermiosAttributes {
    fd: OwnedFd,
}

impl TermiosAttributes {
    #[must_use]
    pub fn new(fd: impl Into<OwnedFd>) -> Self { Self { fd: fd.into() } }

    /// Duplicate the descriptor of `file`, so the backend can outlive the stream that
    /// reads and writes the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor can't be duplicated.
    pub fn try_from_file(file: &File) -> io::Result<Self> { Ok(Self::new(file.try_clone()?)) }
}

impl TerminalAttributes for TermiosAttributes {
    type Snapshot = Termios;

    fn get_attributes(&self) -> io::Result<Termios> {
        termios::tcgetattr(&self.fd).map_err(io::Error::from)
    }

    /// `TCSAFLUSH`: pending output is drained and unread input discarded before the
    /// change takes effect, so nothing typed before the prompt leaks into the secret.
    fn set_attributes(&self, snapshot: &Termios) -> io::Result<()> {
        termios::tcsetattr(&self.fd, OptionalActions::Flush, snapshot).map_err(io::Error::from)
    }

    fn hide_echo(snapshot: &Termios) -> Termios {
        let mut hidden = snapshot.clone();
        hidden.local_modes.remove(HIDDEN_INPUT_CLEARED_FLAGS);
        hidden
    }
}
