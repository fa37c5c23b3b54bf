// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{AnswerPredicate, ConsoleHandle, ConsoleOpener, EnglishAnswers, LineEditor,
            NativeConsoleOpener, PromptTracker, SessionMode, SharedLineEditor,
            SignalCleanup, StdMutex, TtyConfig, TtyResult, cleanup_line_editor_after_signal,
            lock_ignore_poison, register_exit_restore};
use std::{fmt,
          sync::{Arc, OnceLock}};

/// One console session: the mode flags, the prompt length, the lazily opened console,
/// the optional line editor and the yes/no predicate.
///
/// Build one at startup and pass it by reference. All operations take `&self`. The
/// operations themselves live next to their components:
///
/// | Component        | Operations                                                    |
/// | :--------------- | :------------------------------------------------------------ |
/// | Prompt writer    | `emit`, `emit_to`, `print_filtered`, `print_utf8`, `erase_prompt` |
/// | Line reader      | `read_line`, `read_line_fmt`, `ask_yes_no`, completion toggles |
/// | Sensitive buffer | `read_hidden_line`, `read_hidden_line_in`                     |
///
/// Dropping the session restores the terminal if a hidden read is still owed a
/// restoration.
pub struct TtySession {
    pub(crate) mode: SessionMode,
    pub(crate) prompt: PromptTracker,
    console: OnceLock<ConsoleHandle>,
    open_lock: StdMutex<()>,
    opener: Box<dyn ConsoleOpener>,
    pub(crate) line_editor: SharedLineEditor,
    pub(crate) answers: Box<dyn AnswerPredicate + Send + Sync>,
}

impl fmt::Debug for TtySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtySession")
            .field("mode", &self.mode)
            .field("prompt", &self.prompt)
            .field("console", &self.console.get())
            .field("has_line_editor", &lock_ignore_poison(&self.line_editor).is_some())
            .finish_non_exhaustive()
    }
}

impl Default for TtySession {
    fn default() -> Self { Self::new(TtyConfig::default()) }
}

impl TtySession {
    /// Session bound to the real controlling terminal (or `config.tty_path`).
    #[must_use]
    pub fn new(config: TtyConfig) -> Self {
        let opener = NativeConsoleOpener::new(config.tty_path.clone());
        Self::new_with_opener(config, opener)
    }

    /// Session with a custom [`ConsoleOpener`]. Tests use this to inject mocks.
    #[must_use]
    pub fn new_with_opener(config: TtyConfig, opener: impl ConsoleOpener + 'static) -> Self {
        Self {
            mode: SessionMode::new(config.batch, config.no_terminal),
            prompt: PromptTracker::default(),
            console: OnceLock::new(),
            open_lock: StdMutex::new(()),
            opener: Box::new(opener),
            line_editor: Arc::new(StdMutex::new(None)),
            answers: Box::new(EnglishAnswers::default()),
        }
    }

    /// Replace the predicate used by [`Self::ask_yes_no()`].
    #[must_use]
    pub fn with_answer_predicate(
        mut self,
        answers: impl AnswerPredicate + Send + Sync + 'static,
    ) -> Self {
        self.answers = Box::new(answers);
        self
    }

    /// Set batch mode and return the previous value. `None` only queries.
    pub fn set_batch_mode(&self, on_off: Option<bool>) -> bool { self.mode.set_batch(on_off) }

    /// Set no-terminal mode and return the previous value.
    pub fn set_no_terminal(&self, on_off: bool) -> bool { self.mode.set_no_terminal(on_off) }

    #[must_use]
    pub fn is_batch_mode(&self) -> bool { self.mode.is_batch() }

    #[must_use]
    pub fn is_no_terminal(&self) -> bool { self.mode.is_no_terminal() }

    /// Display width of everything written since the last reset.
    #[must_use]
    pub fn last_prompt_length(&self) -> usize { self.prompt.get() }

    #[must_use]
    pub fn is_console_open(&self) -> bool { self.console.get().is_some() }

    /// Install the line editor. If the console is already open the editor is attached
    /// to it right away, otherwise when it opens.
    pub fn register_line_editor(&self, mut editor: Box<dyn LineEditor>) {
        let _open_guard = lock_ignore_poison(&self.open_lock);
        if let Some(handle) = self.console.get() {
            editor.init_stream(&handle.input, &handle.output);
        }
        *lock_ignore_poison(&self.line_editor) = Some(editor);
        tracing::debug!(message = "line editor registered");
    }

    /// Open the console on first use and return it. Later calls return the same
    /// handle; it is never reopened.
    ///
    /// In batch mode the binding writes to standard error.
    ///
    /// # Errors
    ///
    /// [`crate::TtyError::DeviceOpen`] if the device can't be opened. The next call
    /// tries again.
    pub fn ensure_console_open(&self) -> TtyResult<&ConsoleHandle> {
        if let Some(handle) = self.console.get() {
            return Ok(handle);
        }

        let _open_guard = lock_ignore_poison(&self.open_lock);
        if let Some(handle) = self.console.get() {
            return Ok(handle);
        }

        let opened = self.opener.open(self.mode.is_batch())?;
        if !opened.is_mock {
            register_exit_restore(Arc::clone(&opened.hidden_mode));
        }
        let handle = self.console.get_or_init(|| opened);

        if let Some(editor) = lock_ignore_poison(&self.line_editor).as_mut() {
            editor.init_stream(&handle.input, &handle.output);
        }
        Ok(handle)
    }

    /// Restore the terminal if a hidden read was interrupted. Safe to call from a
    /// signal handler path and more than once. Returns `true` if it restored.
    pub fn cleanup_after_signal(&self) -> bool {
        self.console
            .get()
            .is_some_and(|handle| handle.hidden_mode.restore_after_signal())
    }

    /// Let the line editor clean up its own terminal state after a signal. Returns
    /// `false` if there is no editor or it is busy.
    pub fn cleanup_editor_after_signal(&self) -> bool {
        cleanup_line_editor_after_signal(&self.line_editor)
    }

    /// The cleanup a signal handler runs for this session: the console's hidden mode,
    /// then whichever line editor is registered at the time of the signal. Opens the
    /// console if needed.
    ///
    /// # Errors
    ///
    /// [`crate::TtyError::DeviceOpen`] if the console can't be opened.
    pub fn signal_cleanup(&self) -> TtyResult<SignalCleanup> {
        let handle = self.ensure_console_open()?;
        Ok(SignalCleanup::new(Arc::clone(&handle.hidden_mode))
            .with_line_editor(Arc::clone(&self.line_editor)))
    }

    /// On SIGINT/SIGTERM/SIGHUP/SIGQUIT run [`Self::signal_cleanup()`], then terminate
    /// with `128 + signo`.
    ///
    /// # Errors
    ///
    /// [`crate::TtyError::DeviceOpen`] if the console can't be opened, or
    /// [`crate::TtyError::SignalHandler`] if a handler can't be registered.
    #[cfg(unix)]
    pub fn install_signal_cleanup(&self) -> TtyResult<Vec<signal_hook::SigId>> {
        crate::install_signal_cleanup(self.signal_cleanup()?)
            .map_err(crate::TtyError::SignalHandler)
    }

    /// Fail fast if input is impossible. The refusal is logged before it's returned.
    pub(crate) fn refuse_if_not_interactive(&self) -> TtyResult<()> {
        self.mode.check_interactive().inspect_err(|error| {
            tracing::error!(message = "input refused", error = %error);
        })
    }
}

impl Drop for TtySession {
    fn drop(&mut self) {
        if let Some(handle) = self.console.get() {
            handle.hidden_mode.exit_hidden_mode();
        }
    }
}
