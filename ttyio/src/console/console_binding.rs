// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words conin conout

use crate::{DetachedTerminal, HiddenModeControl, HiddenModeController, InputDevice,
            OutputDevice, TtyError, TtyResult, tty_name};
use std::{fmt, fs::File,
          path::{Path, PathBuf},
          sync::Arc};

/// The open console: where prompts are written, where input is read from, and the
/// hidden mode controller for the input device.
///
/// Opened once per session, on the first interactive operation, and never closed. The
/// OS reclaims it at process exit.
#[derive(Clone)]
pub struct ConsoleHandle {
    pub input: InputDevice,
    pub output: OutputDevice,
    pub hidden_mode: Arc<dyn HiddenModeControl>,
    pub is_mock: bool,
}

impl fmt::Debug for ConsoleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleHandle")
            .field("hidden_mode", &self.hidden_mode.state())
            .field("is_mock", &self.is_mock)
            .finish_non_exhaustive()
    }
}

impl ConsoleHandle {
    /// Batch binding: prompts go to standard error, nothing is ever hidden.
    #[must_use]
    pub fn new_batch() -> Self {
        Self {
            input: InputDevice::new_stdin(),
            output: OutputDevice::new_stderr(),
            hidden_mode: Arc::new(HiddenModeController::new(DetachedTerminal)),
            is_mock: false,
        }
    }
}

/// Strategy that produces the [`ConsoleHandle`]. The session calls it at most once.
pub trait ConsoleOpener: Send + Sync {
    /// Open the console. `is_batch` asks for the batch binding.
    ///
    /// # Errors
    ///
    /// [`TtyError::DeviceOpen`] if the device can't be opened.
    fn open(&self, is_batch: bool) -> TtyResult<ConsoleHandle>;
}

/// Opens the real controlling terminal (or the Windows console).
#[derive(Debug, Clone, Default)]
pub struct NativeConsoleOpener {
    /// Overrides [`tty_name()`].
    pub tty_path: Option<PathBuf>,
}

impl NativeConsoleOpener {
    #[must_use]
    pub fn new(tty_path: Option<PathBuf>) -> Self { Self { tty_path } }

    fn device_path(&self) -> &Path { self.tty_path.as_deref().unwrap_or(tty_name()) }
}

fn open_read_write(path: &Path) -> TtyResult<File> {
    File::options()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|source| TtyError::DeviceOpen {
            path: path.to_path_buf(),
            source,
        })
}

impl ConsoleOpener for NativeConsoleOpener {
    #[cfg(unix)]
    fn open(&self, is_batch: bool) -> TtyResult<ConsoleHandle> {
        if is_batch {
            tracing::debug!(message = "console bound to stderr (batch mode)");
            return Ok(ConsoleHandle::new_batch());
        }

        let path = self.device_path();
        let tty = open_read_write(path)?;
        let attributes =
            crate::TermiosAttributes::try_from_file(&tty).map_err(|source| {
                TtyError::DeviceOpen {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
        let output = tty.try_clone().map_err(|source| TtyError::DeviceOpen {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(message = "console opened", path = %path.display());
        Ok(ConsoleHandle {
            input: InputDevice::new(tty),
            output: OutputDevice::new(output),
            hidden_mode: Arc::new(HiddenModeController::new(attributes)),
            is_mock: false,
        })
    }

    #[cfg(windows)]
    fn open(&self, is_batch: bool) -> TtyResult<ConsoleHandle> {
        if is_batch {
            tracing::debug!(message = "console bound to stderr (batch mode)");
            return Ok(ConsoleHandle::new_batch());
        }

        let input_path = self.device_path();
        let output_path = Path::new(crate::CONSOLE_OUTPUT_NAME);
        let input = open_read_write(input_path)?;
        let output = open_read_write(output_path)?;

        crate::apply_default_console_modes(&input, &output).map_err(|source| {
            TtyError::DeviceOpen {
                path: input_path.to_path_buf(),
                source,
            }
        })?;
        let attributes =
            crate::ConsoleModeAttributes::try_from_file(&input).map_err(|source| {
                TtyError::DeviceOpen {
                    path: input_path.to_path_buf(),
                    source,
                }
            })?;

        tracing::debug!(message = "console opened", path = %input_path.display());
        Ok(ConsoleHandle {
            input: InputDevice::new(input),
            output: OutputDevice::new(output),
            hidden_mode: Arc::new(HiddenModeController::new(attributes)),
            is_mock: false,
        })
    }
}
