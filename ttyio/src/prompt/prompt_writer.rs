// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{TtyError, TtyResult, TtySession, escape_control_bytes, escape_utf8_lossy,
            lock_output_device_as_mut, truncate_bytes};
use std::{fmt,
          io::{self, Write},
          sync::atomic::{AtomicUsize, Ordering}};
use unicode_width::UnicodeWidthStr;

/// Visible width of everything written to the console since the last reset, so the
/// prompt (and the echoed answer) can be blanked out.
#[derive(Debug, Default)]
pub struct PromptTracker {
    length: AtomicUsize,
}

impl PromptTracker {
    #[must_use]
    pub fn get(&self) -> usize { self.length.load(Ordering::SeqCst) }

    pub fn reset(&self) { self.length.store(0, Ordering::SeqCst); }

    pub fn add(&self, width: usize) { self.length.fetch_add(width, Ordering::SeqCst); }

    /// Write `bytes`, flush, and count their display width. Bytes that are not UTF-8
    /// count one column each.
    ///
    /// # Errors
    ///
    /// The write or flush error. Nothing is counted in that case.
    pub fn write_tracked(&self, out: &mut dyn Write, bytes: &[u8]) -> io::Result<()> {
        out.write_all(bytes)?;
        out.flush()?;
        self.add(display_width(bytes));
        Ok(())
    }

    /// Overwrite the tracked width with blanks: `\r`, spaces, `\r`. Writes nothing when
    /// the width is 0. Resets to 0.
    ///
    /// # Errors
    ///
    /// The write or flush error.
    pub fn erase(&self, out: &mut dyn Write) -> io::Result<()> {
        let width = self.length.swap(0, Ordering::SeqCst);
        if width == 0 {
            return Ok(());
        }
        let mut blank = Vec::with_capacity(width + 2);
        blank.push(b'\r');
        blank.resize(width + 1, b' ');
        blank.push(b'\r');
        out.write_all(&blank)?;
        out.flush()
    }
}

fn display_width(bytes: &[u8]) -> usize {
    bytes
        .utf8_chunks()
        .map(|chunk| chunk.valid().width() + chunk.invalid().len())
        .sum()
}

/// Write formatted text to the session's console, tracking the prompt length. Expands
/// to a call to [`TtySession::emit()`].
///
/// ```no_run
/// use r3bl_ttyio::{TtyConfig, TtySession, tty_emit};
/// let session = TtySession::new(TtyConfig::default());
/// tty_emit!(session, "{} of {}: ", 1, 3).unwrap();
/// ```
#[macro_export]
macro_rules! tty_emit {
    ($session:expr, $($arg:tt)*) => {
        $session.emit(format_args!($($arg)*))
    };
}

impl TtySession {
    /// Write formatted text to the console and add its width to the prompt length.
    /// Does nothing when no-terminal mode is on.
    ///
    /// # Errors
    ///
    /// [`TtyError::DeviceOpen`] on first use, [`TtyError::Write`] if the write fails.
    pub fn emit(&self, args: fmt::Arguments<'_>) -> TtyResult<()> {
        self.emit_bytes_to(None, args.to_string().as_bytes())
    }

    /// Write formatted text to `sink` if given: a plain write that leaves the prompt
    /// length alone and works in no-terminal mode. Without a sink this is
    /// [`Self::emit()`].
    ///
    /// # Errors
    ///
    /// See [`Self::emit()`].
    pub fn emit_to(&self, sink: Option<&mut dyn Write>, args: fmt::Arguments<'_>) -> TtyResult<()> {
        match sink {
            Some(sink) => sink.write_fmt(args).map_err(TtyError::Write),
            None => self.emit(args),
        }
    }

    fn emit_bytes_to(&self, sink: Option<&mut dyn Write>, bytes: &[u8]) -> TtyResult<()> {
        if let Some(sink) = sink {
            return sink.write_all(bytes).map_err(TtyError::Write);
        }
        if self.mode.is_no_terminal() {
            return Ok(());
        }
        let handle = self.ensure_console_open()?;
        let out = lock_output_device_as_mut!(handle.output);
        self.prompt
            .write_tracked(out, bytes)
            .map_err(TtyError::Write)
    }

    /// Write `bytes` with control bytes escaped, cut to `max_length` bytes first.
    ///
    /// # Errors
    ///
    /// See [`Self::emit()`].
    pub fn print_filtered(&self, bytes: &[u8], max_length: Option<usize>) -> TtyResult<()> {
        self.print_escaped_to(None, truncate_bytes(bytes, max_length))
    }

    /// Write UTF-8 `bytes` to the console with control characters escaped.
    ///
    /// # Errors
    ///
    /// See [`Self::emit()`].
    pub fn print_utf8(&self, bytes: &[u8]) -> TtyResult<()> { self.print_utf8_to(None, bytes, None) }

    /// Write UTF-8 `bytes` with control characters escaped, to `sink` or the console.
    ///
    /// Pure ASCII is escaped byte by byte. Anything with the high bit set is decoded
    /// first and escaped per character, then cut to `max_length` bytes on a char
    /// boundary.
    ///
    /// # Errors
    ///
    /// See [`Self::emit()`].
    pub fn print_utf8_to(
        &self,
        sink: Option<&mut dyn Write>,
        bytes: &[u8],
        max_length: Option<usize>,
    ) -> TtyResult<()> {
        if bytes.is_ascii() {
            self.print_escaped_to(sink, truncate_bytes(bytes, max_length))
        } else {
            let text = escape_utf8_lossy(bytes, max_length);
            self.emit_bytes_to(sink, text.as_bytes())
        }
    }

    fn print_escaped_to(&self, sink: Option<&mut dyn Write>, bytes: &[u8]) -> TtyResult<()> {
        self.emit_bytes_to(sink, &escape_control_bytes(bytes))
    }

    /// Blank out the last prompt: carriage return, one space per tracked column,
    /// carriage return. A no-op when nothing was written since the last erase. In
    /// batch mode the length is only reset, nothing is written.
    ///
    /// # Errors
    ///
    /// See [`Self::emit()`].
    pub fn erase_prompt(&self) -> TtyResult<()> {
        if self.mode.is_no_terminal() {
            return Ok(());
        }
        let handle = self.ensure_console_open()?;
        if self.mode.is_batch() {
            self.prompt.reset();
            return Ok(());
        }
        let out = lock_output_device_as_mut!(handle.output);
        self.prompt.erase(out).map_err(TtyError::Write)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MockConsoleOpener, StdoutMock, TtyConfig};
    use pretty_assertions::assert_eq;

    fn new_session(config: TtyConfig) -> (TtySession, MockConsoleOpener) {
        let opener = MockConsoleOpener::new(b"");
        (TtySession::new_with_opener(config, opener.clone()), opener)
    }

    #[test]
    fn test_emit_tracks_length() {
        let (session, opener) = new_session(TtyConfig::default());
        crate::tty_emit!(session, "{}: ", "Name").unwrap();
        assert_eq!(opener.stdout().get_copy_of_buffer_as_string(), "Name: ");
        assert_eq!(session.last_prompt_length(), 6);
    }

    #[test]
    fn test_emit_counts_display_width() {
        let (session, _opener) = new_session(TtyConfig::default());
        session.emit(format_args!("caf\u{e9}")).unwrap();
        assert_eq!(session.last_prompt_length(), 4);
    }

    #[test]
    fn test_erase_after_emit_then_noop() {
        let (session, opener) = new_session(TtyConfig::default());
        session.emit(format_args!("abc")).unwrap();
        opener.stdout().clear();

        session.erase_prompt().unwrap();
        assert_eq!(opener.stdout().get_copy_of_buffer_as_string(), "\r   \r");
        assert_eq!(session.last_prompt_length(), 0);

        session.erase_prompt().unwrap();
        assert_eq!(opener.stdout().get_copy_of_buffer_as_string(), "\r   \r");
    }

    #[test]
    fn test_erase_in_batch_mode_only_resets() {
        let (session, opener) = new_session(TtyConfig::default().batch(true));
        session.emit(format_args!("abc")).unwrap();
        opener.stdout().clear();

        session.erase_prompt().unwrap();
        assert_eq!(opener.stdout().get_copy_of_buffer_as_string(), "");
        assert_eq!(session.last_prompt_length(), 0);
    }

    #[test]
    fn test_no_terminal_writes_nothing() {
        let (session, opener) = new_session(TtyConfig::default().no_terminal(true));
        session.emit(format_args!("hidden")).unwrap();
        session.print_filtered(b"x", None).unwrap();
        session.erase_prompt().unwrap();
        assert_eq!(opener.open_count(), 0);
        assert_eq!(session.last_prompt_length(), 0);
    }

    #[test]
    fn test_emit_to_sink_leaves_prompt_state() {
        let (session, opener) = new_session(TtyConfig::default().no_terminal(true));
        let mut sink = StdoutMock::default();
        session.emit_to(Some(&mut sink), format_args!("to sink")).unwrap();
        assert_eq!(sink.get_copy_of_buffer_as_string(), "to sink");
        assert_eq!(session.last_prompt_length(), 0);
        assert_eq!(opener.open_count(), 0);
    }

    #[test]
    fn test_print_filtered_escapes_and_truncates() {
        let (session, opener) = new_session(TtyConfig::default());
        session.print_filtered(b"a\nb\x00c", None).unwrap();
        assert_eq!(opener.stdout().get_copy_of_buffer_as_string(), "a\\nb\\0c");
        assert_eq!(session.last_prompt_length(), 7);

        opener.stdout().clear();
        session.print_filtered(b"a\nb\x00c", Some(2)).unwrap();
        assert_eq!(opener.stdout().get_copy_of_buffer_as_string(), "a\\n");
    }

    #[test]
    fn test_print_utf8_slow_path() {
        let (session, opener) = new_session(TtyConfig::default());
        session.print_utf8("J\u{fc}rgen\n".as_bytes()).unwrap();
        assert_eq!(opener.stdout().get_copy_of_buffer_as_string(), "J\u{fc}rgen\\n");
    }

    #[test]
    fn test_print_utf8_to_sink_truncates() {
        let (session, _opener) = new_session(TtyConfig::default());
        let mut sink = StdoutMock::default();
        session
            .print_utf8_to(Some(&mut sink), "\u{e9}t\u{e9}".as_bytes(), Some(3))
            .unwrap();
        assert_eq!(sink.get_copy_of_buffer_as_string(), "\u{e9}t");
    }
}
