// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words atexit signo SIGHUP SIGQUIT

//! Process-level restoration hooks.
//!
//! Two paths run outside the normal control flow of a hidden read:
//!
//! 1. **Process exit**: every controller passed to [`register_exit_restore`] is
//!    restored from a `libc::atexit()` callback (POSIX), so `std::process::exit()` in
//!    the middle of a read still leaves the terminal usable.
//! 2. **Signals**: [`install_signal_cleanup`] registers a low level handler for the
//!    termination signals. It runs a [`SignalCleanup`] (terminal first, then the line
//!    editor) and then exits with `128 + signo`, the status a shell reports for a
//!    signal death.
//!
//! Both call [`HiddenModeControl::restore_after_signal`], which never logs and never
//! blocks on a lock, and which is a no-op when nothing is owed.

use crate::{HiddenModeControl, SharedLineEditor, StdMutex,
            cleanup_line_editor_after_signal, lock_ignore_poison};
use std::{fmt, sync::Arc};

static EXIT_RESTORE_REGISTRY: StdMutex<Vec<Arc<dyn HiddenModeControl>>> =
    StdMutex::new(Vec::new());

#[cfg(unix)]
static INSTALL_EXIT_HOOK: std::sync::Once = std::sync::Once::new();

/// Restore `control` when the process exits normally. Registering the same controller
/// twice is harmless since restoration is idempotent.
pub fn register_exit_restore(control: Arc<dyn HiddenModeControl>) {
    lock_ignore_poison(&EXIT_RESTORE_REGISTRY).push(control);
    install_exit_hook();
}

#[cfg(unix)]
fn install_exit_hook() {
    INSTALL_EXIT_HOOK.call_once(|| {
        // SAFETY: `run_exit_hook` is a plain `extern "C"` function with no arguments
        // that never unwinds across the FFI boundary.
        let rc = unsafe { libc::atexit(run_exit_hook) };
        if rc != 0 {
            tracing::error!(message = "atexit() registration failed", rc);
        }
    });
}

#[cfg(not(unix))]
fn install_exit_hook() {}

#[cfg(unix)]
extern "C" fn run_exit_hook() {
    drop(std::panic::catch_unwind(run_exit_restore));
}

/// Run every registered exit restoration now. Returns how many controllers actually
/// had a restoration pending. Uses `try_lock` so it can't deadlock if the exit happens
/// while another thread holds the registry.
pub fn run_exit_restore() -> usize {
    let Ok(registry) = EXIT_RESTORE_REGISTRY.try_lock() else {
        return 0;
    };
    registry
        .iter()
        .filter(|control| control.restore_after_signal())
        .count()
}

/// What a signal handler undoes before the process dies: the hidden mode of one
/// console, then the terminal state of the line editor, if one is attached.
#[derive(Clone)]
pub struct SignalCleanup {
    control: Arc<dyn HiddenModeControl>,
    line_editor: Option<SharedLineEditor>,
}

impl fmt::Debug for SignalCleanup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalCleanup")
            .field("hidden_mode", &self.control.state())
            .field("has_line_editor", &self.line_editor.is_some())
            .finish()
    }
}

impl SignalCleanup {
    #[must_use]
    pub fn new(control: Arc<dyn HiddenModeControl>) -> Self {
        Self {
            control,
            line_editor: None,
        }
    }

    #[must_use]
    pub fn with_line_editor(mut self, line_editor: SharedLineEditor) -> Self {
        self.line_editor = Some(line_editor);
        self
    }

    /// Restore the terminal, then let the editor clean up. Never logs, never waits on
    /// a lock. Returns `true` if the terminal was restored by this call.
    pub fn run(&self) -> bool {
        let restored = self.control.restore_after_signal();
        if let Some(line_editor) = &self.line_editor {
            cleanup_line_editor_after_signal(line_editor);
        }
        restored
    }
}

/// Signals that trigger a restoration before the process terminates.
#[cfg(unix)]
pub const CLEANUP_SIGNALS: [std::ffi::c_int; 4] = [
    signal_hook::consts::SIGINT,
    signal_hook::consts::SIGTERM,
    signal_hook::consts::SIGHUP,
    signal_hook::consts::SIGQUIT,
];

/// Install handlers for [`CLEANUP_SIGNALS`] that run `cleanup` and then terminate the
/// process with `128 + signo`.
///
/// # Errors
///
/// Returns the OS error if any handler can't be registered. Handlers registered before
/// the failure stay installed.
#[cfg(unix)]
pub fn install_signal_cleanup(
    cleanup: SignalCleanup,
) -> std::io::Result<Vec<signal_hook::SigId>> {
    let mut ids = Vec::with_capacity(CLEANUP_SIGNALS.len());
    for signo in CLEANUP_SIGNALS {
        let cleanup = cleanup.clone();
        // SAFETY: the action only touches atomic flags, `try_lock`s, the
        // `tcsetattr()` syscall, the editor's own cleanup and `_exit()`. No logging.
        let id = unsafe {
            signal_hook::low_level::register(signo, move || {
                cleanup.run();
                signal_hook::low_level::exit(128 + signo);
            })
        }?;
        ids.push(id);
    }
    tracing::debug!(message = "signal cleanup installed", signals = ?CLEANUP_SIGNALS);
    Ok(ids)
}
