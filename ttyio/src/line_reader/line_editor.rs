// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{InputDevice, OutputDevice, StdMutex};
use std::sync::{Arc, TryLockError};

/// Completion callback handed to the editor: `(text, start, end)` of the word under the
/// cursor in, candidates out.
pub type CompletionFn = Arc<dyn Fn(&str, usize, usize) -> Vec<String> + Send + Sync>;

/// The registered editor, shared between the session and the signal cleanup.
pub type SharedLineEditor = Arc<StdMutex<Option<Box<dyn LineEditor>>>>;

/// Run [`LineEditor::cleanup_after_signal()`] on the registered editor, if any. Never
/// waits for the lock: a signal may have interrupted the editor's own read, in which
/// case nothing is done.
pub fn cleanup_line_editor_after_signal(line_editor: &SharedLineEditor) -> bool {
    let mut guard = match line_editor.try_lock() {
        Ok(guard) => guard,
        Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
        Err(TryLockError::WouldBlock) => return false,
    };
    match guard.as_mut() {
        Some(editor) => {
            editor.cleanup_after_signal();
            true
        }
        None => false,
    }
}

/// An optional line editing capability (history, completion), supplied by the host
/// application. Only [`Self::read_line()`] and [`Self::add_history()`] are required.
///
/// The session uses the editor for [`crate::TtySession::read_line()`] when neither
/// batch nor no-terminal mode is on. Hidden reads never go through the editor.
pub trait LineEditor: Send {
    /// Called once the console is open, with its devices.
    fn init_stream(&mut self, _input: &InputDevice, _output: &OutputDevice) {}

    /// Install `completer`, or remove it with `None`. Also lifts a previous
    /// [`Self::inhibit_completion()`].
    fn set_completer(&mut self, _completer: Option<CompletionFn>) {}

    fn inhibit_completion(&mut self, _inhibit: bool) {}

    /// Undo whatever terminal state the editor changed, after a signal.
    fn cleanup_after_signal(&mut self) {}

    /// Show `prompt` and read a line. `None` is end of input.
    fn read_line(&mut self, prompt: &str) -> Option<String>;

    fn add_history(&mut self, line: &str);
}
