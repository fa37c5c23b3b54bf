// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{HiddenModeGuard, SecureAllocator, SensitiveBuffer, TtyResult, TtySession,
            ZeroizingAllocator, read_filtered_line};
use std::sync::Arc;

impl TtySession {
    /// Show `prompt` and read one line with echo off, into a [`SensitiveBuffer`].
    ///
    /// The filter is the same as [`TtySession::read_line()`]. The line editor is never
    /// used. The terminal is restored before this returns, and the newline the user
    /// typed is not echoed, so callers usually emit one themselves.
    ///
    /// # Errors
    ///
    /// - [`crate::TtyError::BatchModeRefusal`] / [`crate::TtyError::NoTerminalRefusal`].
    /// - [`crate::TtyError::DeviceOpen`] on first use.
    /// - [`crate::TtyError::SaveAttributes`] / [`crate::TtyError::ApplyAttributes`] if
    ///   echo can't be turned off. Nothing is read in that case.
    pub fn read_hidden_line(&self, prompt: &str) -> TtyResult<SensitiveBuffer> {
        self.read_hidden_line_in(prompt, ZeroizingAllocator)
    }

    /// [`Self::read_hidden_line()`] with a caller supplied allocator.
    ///
    /// # Errors
    ///
    /// See [`Self::read_hidden_line()`].
    pub fn read_hidden_line_in<A: SecureAllocator>(
        &self,
        prompt: &str,
        allocator: A,
    ) -> TtyResult<SensitiveBuffer<A>> {
        self.refuse_if_not_interactive()?;
        let handle = self.ensure_console_open()?;

        self.prompt.reset();
        self.emit(format_args!("{prompt}"))?;

        let mut buffer = SensitiveBuffer::new_in(allocator);
        {
            let _hidden = HiddenModeGuard::new(Arc::clone(&handle.hidden_mode))?;
            // Nothing is echoed, so nothing is added to the prompt length.
            read_filtered_line(&handle.input, &mut buffer, |_| {});
        }
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HiddenModeControl, HiddenModeState, InstrumentedAllocator, MockConsoleOpener,
                TtyConfig, TtyError, fake_flags};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hidden_read_restores_attributes() {
        let opener = MockConsoleOpener::new(b"s3cr\tt\n");
        let session = TtySession::new_with_opener(TtyConfig::default(), opener.clone());

        let secret = session.read_hidden_line("Passphrase: ").unwrap();
        assert_eq!(secret.as_bytes(), b"s3cr t");
        assert_eq!(opener.terminal().local_flags(), fake_flags::COOKED);
        assert_eq!(opener.terminal().set_count(), 2);
        assert_eq!(opener.hidden_mode().state(), HiddenModeState::Normal);
        assert_eq!(session.last_prompt_length(), 12);
    }

    #[test]
    fn test_echo_is_off_while_reading() {
        let opener = MockConsoleOpener::new(b"x\n");
        let terminal = opener.terminal();
        let seen_flags = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let seen_flags_clone = Arc::clone(&seen_flags);
        opener.on_read(move || {
            seen_flags_clone.lock().unwrap().push(terminal.local_flags());
        });
        let session = TtySession::new_with_opener(TtyConfig::default(), opener);

        session.read_hidden_line("> ").unwrap();
        let seen_flags = seen_flags.lock().unwrap();
        assert!(!seen_flags.is_empty());
        assert!(seen_flags.iter().all(|flags| flags & fake_flags::ALL_ECHO == 0));
    }

    #[test]
    fn test_hidden_eof_is_sentinel() {
        let opener = MockConsoleOpener::new(b"abc");
        let session = TtySession::new_with_opener(TtyConfig::default(), opener.clone());
        let secret = session.read_hidden_line("> ").unwrap();
        assert!(secret.is_eof());
        assert_eq!(opener.terminal().local_flags(), fake_flags::COOKED);
    }

    #[test]
    fn test_save_failure_reads_nothing() {
        let opener = MockConsoleOpener::new(b"abc\n");
        opener.terminal().fail_get(true);
        let session = TtySession::new_with_opener(TtyConfig::default(), opener.clone());
        assert!(matches!(
            session.read_hidden_line("> "),
            Err(TtyError::SaveAttributes(_))
        ));
        assert_eq!(opener.input().read_byte().unwrap(), Some(b'a'));
    }

    #[test]
    fn test_batch_refuses_hidden_read() {
        let opener = MockConsoleOpener::new(b"abc\n");
        let session = TtySession::new_with_opener(TtyConfig::default().batch(true), opener.clone());
        assert!(matches!(
            session.read_hidden_line("> "),
            Err(TtyError::BatchModeRefusal)
        ));
        assert_eq!(opener.open_count(), 0);
    }

    #[test]
    fn test_batch_binding_kept_after_batch_cleared_refuses_hidden_read() {
        let opener = MockConsoleOpener::new(b"abc\n");
        let session = TtySession::new_with_opener(TtyConfig::default().batch(true), opener.clone());
        session.emit(format_args!("working\n")).unwrap();
        assert_eq!(opener.last_open_was_batch(), Some(true));

        assert!(session.set_batch_mode(Some(false)));
        assert!(matches!(
            session.read_hidden_line("Passphrase: "),
            Err(TtyError::SaveAttributes(_))
        ));
        assert_eq!(opener.open_count(), 1);
        assert_eq!(opener.terminal().set_count(), 0);
        assert_eq!(opener.input().read_byte().unwrap(), Some(b'a'));
    }

    #[test]
    fn test_long_secret_with_custom_allocator() {
        let input: Vec<u8> = std::iter::repeat_n(b'k', 100).chain([b'\n']).collect();
        let allocator = InstrumentedAllocator::default();
        let session = TtySession::new_with_opener(TtyConfig::default(), MockConsoleOpener::new(input.as_slice()));

        let secret = session.read_hidden_line_in("> ", allocator.clone()).unwrap();
        assert_eq!(secret.len(), 100);
        assert_eq!(secret.capacity(), 150);
        drop(secret);

        assert_eq!(allocator.allocation_count(), 3);
        assert!(
            allocator
                .released_blocks()
                .iter()
                .all(|block| block.iter().all(|&byte| byte == 0))
        );
    }
}
