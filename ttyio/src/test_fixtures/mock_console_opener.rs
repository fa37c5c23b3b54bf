// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ConsoleHandle, ConsoleOpener, DetachedTerminal, FakeTerminalAttributes,
            HiddenModeControl, HiddenModeController, InputDevice, InputDeviceExt, OutputDevice, OutputDeviceExt, ReadHookSlot,
            StdMutex, StdoutMock, TtyError, TtyResult, fake_flags, lock_ignore_poison};
use std::{io, path::PathBuf, sync::Arc};

#[derive(Debug, Default)]
pub struct MockOpenerLog {
    pub open_count: usize,
    pub last_open_was_batch: Option<bool>,
    pub fail_next_open: bool,
}

/// [`ConsoleOpener`] over canned input, a [`StdoutMock`] and a cooked
/// [`FakeTerminalAttributes`]. A batch open gets a [`DetachedTerminal`] instead, like
/// the native batch binding. Clones share everything, so a test keeps one clone and
/// hands the other to [`crate::TtySession::new_with_opener()`].
#[derive(Clone)]
#[allow(missing_debug_implementations)]
pub struct MockConsoleOpener {
    input: InputDevice,
    output: OutputDevice,
    stdout: StdoutMock,
    terminal: FakeTerminalAttributes,
    hidden_mode: Arc<HiddenModeController<FakeTerminalAttributes>>,
    read_hook: ReadHookSlot,
    log: Arc<StdMutex<MockOpenerLog>>,
}

impl MockConsoleOpener {
    #[must_use]
    pub fn new(input: impl Into<Vec<u8>>) -> Self {
        let read_hook = ReadHookSlot::default();
        let (output, stdout) = OutputDevice::new_mock();
        let terminal = FakeTerminalAttributes::new(fake_flags::COOKED);
        Self {
            input: InputDevice::new_mock_with_hook(input, Arc::clone(&read_hook)),
            output,
            stdout,
            hidden_mode: Arc::new(HiddenModeController::new(terminal.clone())),
            terminal,
            read_hook,
            log: Arc::default(),
        }
    }

    /// Run `hook` before every read from the console input.
    pub fn on_read(&self, hook: impl FnMut() + Send + 'static) {
        *lock_ignore_poison(&self.read_hook) = Some(Box::new(hook));
    }

    /// The next [`ConsoleOpener::open()`] fails with [`TtyError::DeviceOpen`].
    pub fn fail_next_open(&self) { lock_ignore_poison(&self.log).fail_next_open = true; }

    #[must_use]
    pub fn stdout(&self) -> StdoutMock { self.stdout.clone() }

    #[must_use]
    pub fn input(&self) -> InputDevice { self.input.clone() }

    #[must_use]
    pub fn terminal(&self) -> FakeTerminalAttributes { self.terminal.clone() }

    #[must_use]
    pub fn hidden_mode(&self) -> Arc<HiddenModeController<FakeTerminalAttributes>> {
        Arc::clone(&self.hidden_mode)
    }

    /// Successful opens.
    #[must_use]
    pub fn open_count(&self) -> usize { lock_ignore_poison(&self.log).open_count }

    #[must_use]
    pub fn last_open_was_batch(&self) -> Option<bool> {
        lock_ignore_poison(&self.log).last_open_was_batch
    }
}

impl ConsoleOpener for MockConsoleOpener {
    fn open(&self, is_batch: bool) -> TtyResult<ConsoleHandle> {
        let mut log = lock_ignore_poison(&self.log);
        if log.fail_next_open {
            log.fail_next_open = false;
            return Err(TtyError::DeviceOpen {
                path: PathBuf::from("/dev/mock-tty"),
                source: io::Error::from(io::ErrorKind::NotFound),
            });
        }
        log.open_count += 1;
        log.last_open_was_batch = Some(is_batch);

        let hidden_mode: Arc<dyn HiddenModeControl> = if is_batch {
            Arc::new(HiddenModeController::new(DetachedTerminal))
        } else {
            self.hidden_mode.clone()
        };

        Ok(ConsoleHandle {
            input: self.input.clone(),
            output: self.output.clone(),
            hidden_mode,
            is_mock: true,
        })
    }
}
