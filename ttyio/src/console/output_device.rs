// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{SafeRawTerminal, SendRawTerminal, StdMutex, lock_ignore_poison};
use std::sync::{Arc, MutexGuard};

pub type LockedOutputDevice<'a> = &'a mut dyn std::io::Write;

/// Macro to simplify locking and getting a mutable reference to the output device.
/// Don't call this again in the same scope, it will deadlock! A safe approach is
/// to use this macro in a separate block scope.
///
/// Usage example:
/// ```
/// use r3bl_ttyio::{lock_output_device_as_mut, OutputDevice, LockedOutputDevice};
/// let device = OutputDevice::new_stderr();
/// { // Start a new block scope to avoid deadlock.
///     let mut_ref: LockedOutputDevice<'_> = lock_output_device_as_mut!(device);
///     let _ = mut_ref.write_all(b"Hello, world!\n");
/// } // The lock is released here.
/// ```
#[macro_export]
macro_rules! lock_output_device_as_mut {
    ($device:expr) => {
        &mut *$device.lock()
    };
}

/// Where prompts go: the terminal file, standard error in batch mode, or a mock.
/// - It is safe to clone.
/// - To write to it, see [`Self::lock()`] or the [`lock_output_device_as_mut`] macro.
#[derive(Clone)]
#[allow(missing_debug_implementations)]
pub struct OutputDevice {
    pub resource: SafeRawTerminal,
    pub is_mock: bool,
}

impl OutputDevice {
    #[must_use]
    pub fn new_stdout() -> Self { Self::new(std::io::stdout()) }

    #[must_use]
    pub fn new_stderr() -> Self { Self::new(std::io::stderr()) }

    /// Wrap any writer, for example an opened terminal [`std::fs::File`].
    #[must_use]
    pub fn new(writer: impl std::io::Write + Send + 'static) -> Self {
        Self {
            resource: Arc::new(StdMutex::new(writer)),
            is_mock: false,
        }
    }

    /// Locks the output device for writing. A poisoned lock is recovered, since a
    /// half-written prompt is no reason to lose the terminal.
    pub fn lock(&self) -> MutexGuard<'_, SendRawTerminal> { lock_ignore_poison(&self.resource) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OutputDeviceExt, StdoutMock};

    #[test]
    fn test_stderr_output_device_is_not_mock() {
        let device = OutputDevice::new_stderr();
        assert!(!device.is_mock);
    }

    #[test]
    fn test_wrapped_writer_receives_bytes() {
        let mock = StdoutMock::default();
        let device = OutputDevice::new(mock.clone());
        {
            let mut_ref: LockedOutputDevice<'_> = lock_output_device_as_mut!(device);
            mut_ref.write_all(b"Passphrase: ").unwrap();
        }
        assert_eq!(mock.get_copy_of_buffer_as_string(), "Passphrase: ");
    }

    #[test]
    fn test_mock_output_device_is_mock() {
        let (device, _) = OutputDevice::new_mock();
        assert!(device.is_mock);
    }
}
