// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Platform independent hidden mode state machine, and the `HiddenModeGuard` RAII
//! wrapper. Platform backends only provide [`TerminalAttributes`].

use crate::{StdMutex, TtyError, TtyResult, lock_ignore_poison};
use std::{fmt, io,
          sync::{Arc, TryLockError,
                 atomic::{AtomicBool, Ordering}}};
use strum_macros::{Display, EnumString};

/// Where the controller is in the `Normal -> HiddenInputActive -> Normal` cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum HiddenModeState {
    Normal,
    HiddenInputActive,
}

/// Primitive get/set access to a terminal's attributes. Each platform implements this
/// once; the state machine in [`HiddenModeController`] is shared.
pub trait TerminalAttributes: Send + Sync {
    /// Opaque copy of the terminal configuration.
    type Snapshot: Send;

    /// Read the current attributes.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the device is not a terminal or can't be queried.
    fn get_attributes(&self) -> io::Result<Self::Snapshot>;

    /// Apply `snapshot` immediately, discarding unread input (flush-on-apply).
    ///
    /// # Errors
    ///
    /// Returns the OS error if the attributes can't be applied.
    fn set_attributes(&self, snapshot: &Self::Snapshot) -> io::Result<()>;

    /// Derive the hidden input configuration from `snapshot`: echo flags cleared,
    /// everything else (canonical line editing in particular) left alone.
    fn hide_echo(snapshot: &Self::Snapshot) -> Self::Snapshot;
}

/// Object safe view of a [`HiddenModeController`], so that the console, the exit hook
/// registry and signal handlers can share one controller without knowing the backend.
pub trait HiddenModeControl: Send + Sync {
    /// Snapshot the attributes and turn echo off.
    ///
    /// # Errors
    ///
    /// - [`TtyError::SaveAttributes`] if the snapshot can't be taken. Nothing was
    ///   changed.
    /// - [`TtyError::ApplyAttributes`] if the hidden attributes can't be applied.
    ///   Nothing is owed in that case.
    fn enter_hidden_mode(&self) -> TtyResult<()>;

    /// Restore the snapshot if a restoration is owed. Failures are logged. Returns
    /// `true` if the snapshot was applied by this call.
    fn exit_hidden_mode(&self) -> bool;

    /// Same as [`Self::exit_hidden_mode()`] but never blocks on the snapshot lock and
    /// never logs. This is the entry point for signal handlers and the process exit
    /// hook.
    fn restore_after_signal(&self) -> bool;

    fn is_restore_pending(&self) -> bool;

    fn state(&self) -> HiddenModeState {
        if self.is_restore_pending() {
            HiddenModeState::HiddenInputActive
        } else {
            HiddenModeState::Normal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RestoreContext {
    Normal,
    Signal,
}

/// Owns the saved attribute snapshot and the `restore_pending` flag for one terminal.
pub struct HiddenModeController<T: TerminalAttributes> {
    terminal: T,
    saved: StdMutex<Option<T::Snapshot>>,
    restore_pending: AtomicBool,
}

impl<T: TerminalAttributes> fmt::Debug for HiddenModeController<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HiddenModeController")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl<T: TerminalAttributes> HiddenModeController<T> {
    #[must_use]
    pub fn new(terminal: T) -> Self {
        Self {
            terminal,
            saved: StdMutex::new(None),
            restore_pending: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn terminal(&self) -> &T { &self.terminal }

    fn restore(&self, context: RestoreContext) -> bool {
        // Cleared before the device is touched, so that a signal arriving while this
        // restore runs finds nothing owed.
        if !self.restore_pending.swap(false, Ordering::SeqCst) {
            return false;
        }

        let maybe_snapshot = match context {
            RestoreContext::Normal => lock_ignore_poison(&self.saved).take(),
            RestoreContext::Signal => match self.saved.try_lock() {
                Ok(mut guard) => guard.take(),
                Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner().take(),
                Err(TryLockError::WouldBlock) => None,
            },
        };

        let Some(snapshot) = maybe_snapshot else {
            return false;
        };

        match self.terminal.set_attributes(&snapshot) {
            Ok(()) => true,
            Err(error) => {
                if context == RestoreContext::Normal {
                    // % is Display, ? is Debug.
                    tracing::error!(message = "tcsetattr() failed", error = %error);
                }
                false
            }
        }
    }
}

impl<T: TerminalAttributes> HiddenModeControl for HiddenModeController<T> {
    fn enter_hidden_mode(&self) -> TtyResult<()> {
        // Entering twice keeps the first (echoing) snapshot.
        if self.is_restore_pending() {
            return Ok(());
        }

        let snapshot = self
            .terminal
            .get_attributes()
            .map_err(TtyError::SaveAttributes)?;
        let hidden = T::hide_echo(&snapshot);

        // The snapshot must be in place before the flag says a restore is owed.
        *lock_ignore_poison(&self.saved) = Some(snapshot);
        self.restore_pending.store(true, Ordering::SeqCst);

        if let Err(error) = self.terminal.set_attributes(&hidden) {
            self.restore_pending.store(false, Ordering::SeqCst);
            lock_ignore_poison(&self.saved).take();
            return Err(TtyError::ApplyAttributes(error));
        }

        tracing::debug!(message = "hidden input mode entered");
        Ok(())
    }

    fn exit_hidden_mode(&self) -> bool {
        let restored = self.restore(RestoreContext::Normal);
        if restored {
            tracing::debug!(message = "hidden input mode exited");
        }
        restored
    }

    fn restore_after_signal(&self) -> bool { self.restore(RestoreContext::Signal) }

    fn is_restore_pending(&self) -> bool { self.restore_pending.load(Ordering::SeqCst) }
}

/// RAII guard that keeps the terminal in hidden mode for its lifetime.
///
/// Restoration on drop covers normal completion, early returns (`?`) and panics. A
/// signal cleanup that already restored the terminal turns the drop into a no-op.
#[must_use = "hidden mode ends as soon as the guard is dropped"]
pub struct HiddenModeGuard {
    control: Arc<dyn HiddenModeControl>,
}

impl fmt::Debug for HiddenModeGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HiddenModeGuard")
            .field("state", &self.control.state())
            .finish()
    }
}

impl HiddenModeGuard {
    /// Enter hidden mode and return the guard.
    ///
    /// # Errors
    ///
    /// See [`HiddenModeControl::enter_hidden_mode()`].
    pub fn new(control: Arc<dyn HiddenModeControl>) -> TtyResult<Self> {
        control.enter_hidden_mode()?;
        Ok(Self { control })
    }
}

impl Drop for HiddenModeGuard {
    fn drop(&mut self) { self.control.exit_hidden_mode(); }
}

/// Attribute backend for consoles bound in batch mode (stdin and stderr). There is no
/// terminal whose echo could be turned off, so taking a snapshot always fails and a
/// hidden read on this binding fails with [`TtyError::SaveAttributes`] instead of
/// reading with echo on.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedTerminal;

impl TerminalAttributes for DetachedTerminal {
    type Snapshot = ();

    fn get_attributes(&self) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "console is bound to standard streams, echo can't be turned off",
        ))
    }

    fn set_attributes(&self, _snapshot: &()) -> io::Result<()> { Ok(()) }

    fn hide_echo(_snapshot: &()) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{FakeTerminalAttributes, fake_flags};
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn new_controller() -> (HiddenModeController<FakeTerminalAttributes>, FakeTerminalAttributes)
    {
        let terminal = FakeTerminalAttributes::new(fake_flags::COOKED);
        (HiddenModeController::new(terminal.clone()), terminal)
    }

    #[test]
    fn test_enter_clears_only_echo_flags() {
        let (controller, terminal) = new_controller();
        controller.enter_hidden_mode().unwrap();

        let flags = terminal.local_flags();
        assert_eq!(flags & fake_flags::ALL_ECHO, 0);
        assert_eq!(flags & fake_flags::ICANON, fake_flags::ICANON);
        assert_eq!(flags & fake_flags::ISIG, fake_flags::ISIG);
        assert_eq!(controller.state(), HiddenModeState::HiddenInputActive);
    }

    #[test]
    fn test_exit_restores_snapshot_exactly() {
        let (controller, terminal) = new_controller();
        controller.enter_hidden_mode().unwrap();
        assert!(controller.exit_hidden_mode());

        assert_eq!(terminal.local_flags(), fake_flags::COOKED);
        assert_eq!(terminal.set_count(), 2);
        assert_eq!(controller.state(), HiddenModeState::Normal);
    }

    #[test]
    fn test_signal_restore_then_normal_restore_is_noop() {
        let (controller, terminal) = new_controller();
        controller.enter_hidden_mode().unwrap();

        assert!(controller.restore_after_signal());
        assert_eq!(terminal.set_count(), 2);

        assert!(!controller.exit_hidden_mode());
        assert!(!controller.restore_after_signal());
        assert_eq!(terminal.set_count(), 2);
        assert_eq!(terminal.local_flags(), fake_flags::COOKED);
    }

    #[test]
    fn test_exit_without_enter_writes_nothing() {
        let (controller, terminal) = new_controller();
        assert!(!controller.exit_hidden_mode());
        assert_eq!(terminal.set_count(), 0);
    }

    #[test]
    fn test_save_failure_changes_nothing() {
        let (controller, terminal) = new_controller();
        terminal.fail_get(true);

        let result = controller.enter_hidden_mode();
        assert!(matches!(result, Err(TtyError::SaveAttributes(_))));
        assert!(!controller.is_restore_pending());
        assert_eq!(terminal.set_count(), 0);
    }

    #[test]
    fn test_apply_failure_owes_no_restore() {
        let (controller, terminal) = new_controller();
        terminal.fail_set(true);

        let result = controller.enter_hidden_mode();
        assert!(matches!(result, Err(TtyError::ApplyAttributes(_))));
        assert!(!controller.is_restore_pending());
    }

    #[test]
    fn test_restore_failure_is_swallowed() {
        let (controller, terminal) = new_controller();
        controller.enter_hidden_mode().unwrap();
        terminal.fail_set(true);

        assert!(!controller.exit_hidden_mode());
        assert!(!controller.is_restore_pending());
    }

    #[test]
    fn test_nested_enter_keeps_first_snapshot() {
        let (controller, terminal) = new_controller();
        controller.enter_hidden_mode().unwrap();
        controller.enter_hidden_mode().unwrap();
        controller.exit_hidden_mode();
        assert_eq!(terminal.local_flags(), fake_flags::COOKED);
    }

    #[test]
    fn test_guard_restores_on_drop() {
        let terminal = FakeTerminalAttributes::new(fake_flags::COOKED);
        let control: Arc<dyn HiddenModeControl> =
            Arc::new(HiddenModeController::new(terminal.clone()));
        {
            let _guard = HiddenModeGuard::new(Arc::clone(&control)).unwrap();
            assert_eq!(terminal.local_flags() & fake_flags::ECHO, 0);
        }
        assert_eq!(terminal.local_flags(), fake_flags::COOKED);
        assert_eq!(control.state(), HiddenModeState::Normal);
    }

    #[test]
    fn test_guard_restores_on_panic() {
        let terminal = FakeTerminalAttributes::new(fake_flags::COOKED);
        let control: Arc<dyn HiddenModeControl> =
            Arc::new(HiddenModeController::new(terminal.clone()));

        let control_clone = Arc::clone(&control);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _guard = HiddenModeGuard::new(control_clone).unwrap();
            panic!("interrupted while reading");
        }));

        assert!(result.is_err());
        assert_eq!(terminal.local_flags(), fake_flags::COOKED);
    }

    #[test]
    fn test_state_display_round_trip() {
        assert_eq!(HiddenModeState::HiddenInputActive.to_string(), "HiddenInputActive");
        assert_eq!(
            HiddenModeState::from_str("Normal").unwrap(),
            HiddenModeState::Normal
        );
    }

    #[test]
    fn test_detached_terminal_refuses_hidden_mode() {
        let controller = HiddenModeController::new(DetachedTerminal);
        assert!(matches!(
            controller.enter_hidden_mode(),
            Err(TtyError::SaveAttributes(_))
        ));
        assert!(!controller.is_restore_pending());
        assert!(!controller.exit_hidden_mode());
    }
}
