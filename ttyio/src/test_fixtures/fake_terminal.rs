// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words ECHOE ECHOK ECHONL ICANON

use crate::{StdMutex, TerminalAttributes, lock_ignore_poison};
use std::{io, sync::Arc};

/// Local mode bits of the fake terminal, with the same meaning as their termios
/// namesakes.
pub mod fake_flags {
    pub const ISIG: u32 = 0o1;
    pub const ICANON: u32 = 0o2;
    pub const ECHO: u32 = 0o10;
    pub const ECHOE: u32 = 0o20;
    pub const ECHOK: u32 = 0o40;
    pub const ECHONL: u32 = 0o100;

    /// What hidden mode clears.
    pub const ALL_ECHO: u32 = ECHO | ECHOE | ECHOK | ECHONL;

    /// A typical interactive terminal.
    pub const COOKED: u32 = ISIG | ICANON | ECHO | ECHOE | ECHOK;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FakeTerminalState {
    pub local_flags: u32,
    /// Successful `set_attributes` calls.
    pub set_count: usize,
    pub fail_get: bool,
    pub fail_set: bool,
}

/// In-memory terminal. Clones share state, so a test keeps one clone to inspect what
/// the controller did with the other.
#[derive(Debug, Clone, Default)]
pub struct FakeTerminalAttributes {
    pub state: Arc<StdMutex<FakeTerminalState>>,
}

impl FakeTerminalAttributes {
    #[must_use]
    pub fn new(local_flags: u32) -> Self {
        Self {
            state: Arc::new(StdMutex::new(FakeTerminalState {
                local_flags,
                ..Default::default()
            })),
        }
    }

    #[must_use]
    pub fn local_flags(&self) -> u32 { lock_ignore_poison(&self.state).local_flags }

    #[must_use]
    pub fn set_count(&self) -> usize { lock_ignore_poison(&self.state).set_count }

    pub fn fail_get(&self, fail: bool) { lock_ignore_poison(&self.state).fail_get = fail; }

    pub fn fail_set(&self, fail: bool) { lock_ignore_poison(&self.state).fail_set = fail; }
}

impl TerminalAttributes for FakeTerminalAttributes {
    type Snapshot = u32;

    fn get_attributes(&self) -> io::Result<u32> {
        let state = lock_ignore_poison(&self.state);
        if state.fail_get {
            return Err(io::Error::other("fake tcgetattr failure"));
        }
        Ok(state.local_flags)
    }

    fn set_attributes(&self, snapshot: &u32) -> io::Result<()> {
        let mut state = lock_ignore_poison(&self.state);
        if state.fail_set {
            return Err(io::Error::other("fake tcsetattr failure"));
        }
        state.local_flags = *snapshot;
        state.set_count += 1;
        Ok(())
    }

    fn hide_echo(snapshot: &u32) -> u32 { snapshot & !fake_flags::ALL_ECHO }
}
