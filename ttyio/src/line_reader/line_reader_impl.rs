// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{CompletionFn, InputLine, TtyResult, TtySession, lock_ignore_poison,
            new_plain_line_buffer, read_filtered_line};
use std::fmt;

/// Lines whose trimmed text is this long or shorter are not worth keeping in history.
const MIN_HISTORY_LEN: usize = 2;

impl TtySession {
    /// Show `prompt` and read one line.
    ///
    /// With a registered [`crate::LineEditor`] (and neither batch nor no-terminal mode)
    /// the editor reads the line; the result is trimmed and added to the history if
    /// longer than two bytes. Otherwise the built-in reader reads byte by byte, see
    /// [`crate::byte_filter`] for what is kept.
    ///
    /// End of input returns [`InputLine::eof()`].
    ///
    /// # Errors
    ///
    /// - [`crate::TtyError::BatchModeRefusal`] / [`crate::TtyError::NoTerminalRefusal`].
    /// - [`crate::TtyError::DeviceOpen`] on first use.
    /// - [`crate::TtyError::Write`] if the prompt can't be written.
    pub fn read_line(&self, prompt: &str) -> TtyResult<InputLine> {
        if let Some(line) = self.read_line_with_editor(prompt)? {
            return Ok(line);
        }

        self.refuse_if_not_interactive()?;
        let handle = self.ensure_console_open()?;

        self.prompt.reset();
        self.emit(format_args!("{prompt}"))?;

        // Every byte typed is echoed, so a later erase has to cover it too.
        let mut buffer = new_plain_line_buffer();
        read_filtered_line(&handle.input, &mut buffer, |_| self.prompt.add(1));
        Ok(InputLine::from(buffer))
    }

    /// [`Self::read_line()`] with a formatted prompt.
    ///
    /// # Errors
    ///
    /// See [`Self::read_line()`].
    pub fn read_line_fmt(&self, prompt: fmt::Arguments<'_>) -> TtyResult<InputLine> {
        self.read_line(&prompt.to_string())
    }

    /// `Ok(None)` when the built-in reader has to be used.
    fn read_line_with_editor(&self, prompt: &str) -> TtyResult<Option<InputLine>> {
        if !self.mode.is_interactive() || lock_ignore_poison(&self.line_editor).is_none() {
            return Ok(None);
        }

        // Opened before the editor lock is taken, opening attaches the editor.
        self.ensure_console_open()?;

        let mut maybe_editor = lock_ignore_poison(&self.line_editor);
        let Some(editor) = maybe_editor.as_mut() else {
            return Ok(None);
        };

        self.prompt.reset();
        let line = match editor.read_line(prompt) {
            Some(line) => {
                let trimmed = line.trim();
                if trimmed.len() > MIN_HISTORY_LEN {
                    editor.add_history(trimmed);
                }
                InputLine::from(trimmed.as_bytes().to_vec())
            }
            None => InputLine::eof(),
        };
        Ok(Some(line))
    }

    /// Hand `completer` to the line editor. Does nothing without an editor or in
    /// no-terminal mode.
    ///
    /// # Errors
    ///
    /// [`crate::TtyError::DeviceOpen`] on first use.
    pub fn enable_completion(&self, completer: CompletionFn) -> TtyResult<()> {
        self.with_editor(|editor| editor.set_completer(Some(completer)))
    }

    /// Tell the line editor to stop completing. Does nothing without an editor or in
    /// no-terminal mode.
    ///
    /// # Errors
    ///
    /// [`crate::TtyError::DeviceOpen`] on first use.
    pub fn disable_completion(&self) -> TtyResult<()> {
        self.with_editor(|editor| editor.inhibit_completion(true))
    }

    fn with_editor(&self, action: impl FnOnce(&mut dyn crate::LineEditor)) -> TtyResult<()> {
        if self.mode.is_no_terminal() || lock_ignore_poison(&self.line_editor).is_none() {
            return Ok(());
        }
        self.ensure_console_open()?;
        if let Some(editor) = lock_ignore_poison(&self.line_editor).as_mut() {
            action(&mut **editor);
        }
        Ok(())
    }
}
