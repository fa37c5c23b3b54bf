// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::TtyError;
use std::sync::atomic::{AtomicBool, Ordering};

/// The two session mode flags. Normally set once at startup; atomics make a late
/// change from another thread well defined, nothing more.
#[derive(Debug, Default)]
pub struct SessionMode {
    batch: AtomicBool,
    no_terminal: AtomicBool,
}

impl SessionMode {
    #[must_use]
    pub fn new(batch: bool, no_terminal: bool) -> Self {
        Self {
            batch: AtomicBool::new(batch),
            no_terminal: AtomicBool::new(no_terminal),
        }
    }

    /// Set batch mode and return the previous value. `None` only queries.
    pub fn set_batch(&self, on_off: Option<bool>) -> bool {
        match on_off {
            Some(value) => self.batch.swap(value, Ordering::SeqCst),
            None => self.is_batch(),
        }
    }

    /// Set no-terminal mode and return the previous value.
    pub fn set_no_terminal(&self, on_off: bool) -> bool {
        self.no_terminal.swap(on_off, Ordering::SeqCst)
    }

    #[must_use]
    pub fn is_batch(&self) -> bool { self.batch.load(Ordering::SeqCst) }

    #[must_use]
    pub fn is_no_terminal(&self) -> bool { self.no_terminal.load(Ordering::SeqCst) }

    /// Whether an interactive read may proceed. Batch mode is checked first.
    ///
    /// # Errors
    ///
    /// [`TtyError::BatchModeRefusal`] or [`TtyError::NoTerminalRefusal`].
    pub fn check_interactive(&self) -> Result<(), TtyError> {
        if self.is_batch() {
            return Err(TtyError::BatchModeRefusal);
        }
        if self.is_no_terminal() {
            return Err(TtyError::NoTerminalRefusal);
        }
        Ok(())
    }

    /// Both flags off: the line editor may be used.
    #[must_use]
    pub fn is_interactive(&self) -> bool { !self.is_batch() && !self.is_no_terminal() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_set_batch_returns_previous() {
        let mode = SessionMode::default();
        assert!(!mode.set_batch(Some(true)));
        assert!(mode.set_batch(None));
        assert!(mode.is_batch());
        assert!(mode.set_batch(Some(false)));
        assert!(!mode.is_batch());
    }

    #[test]
    fn test_set_no_terminal_returns_previous() {
        let mode = SessionMode::default();
        assert!(!mode.set_no_terminal(true));
        assert!(mode.set_no_terminal(false));
    }

    #[test_case(false, false => None; "interactive")]
    #[test_case(true, false => Some("batch"); "batch only")]
    #[test_case(false, true => Some("no_terminal"); "no terminal only")]
    #[test_case(true, true => Some("batch"); "batch wins")]
    fn test_check_interactive(batch: bool, no_terminal: bool) -> Option<&'static str> {
        match SessionMode::new(batch, no_terminal).check_interactive() {
            Ok(()) => None,
            Err(TtyError::BatchModeRefusal) => Some("batch"),
            Err(TtyError::NoTerminalRefusal) => Some("no_terminal"),
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }
}
