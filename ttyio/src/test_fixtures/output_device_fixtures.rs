// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{OutputDevice, StdMutex, lock_ignore_poison};
use std::{io::{Result, Write},
          sync::Arc};

/// You can safely clone this struct, since it only contains an `Arc<StdMutex<Vec<u8>>>`.
/// The inner `buffer` will not be cloned, just the [Arc] will be cloned.
///
/// The main constructors are:
/// - [`StdoutMock::default`]
/// - [`OutputDeviceExt::new_mock()`]
#[derive(Clone, Debug, Default)]
pub struct StdoutMock {
    pub buffer: Arc<StdMutex<Vec<u8>>>,
}

impl StdoutMock {
    #[must_use]
    pub fn get_copy_of_buffer(&self) -> Vec<u8> { lock_ignore_poison(&self.buffer).clone() }

    #[must_use]
    pub fn get_copy_of_buffer_as_string(&self) -> String {
        String::from_utf8_lossy(&lock_ignore_poison(&self.buffer)).into_owned()
    }

    pub fn clear(&self) { lock_ignore_poison(&self.buffer).clear(); }
}

impl Write for StdoutMock {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        lock_ignore_poison(&self.buffer).extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<()> { Ok(()) }
}

pub trait OutputDeviceExt {
    fn new_mock() -> (OutputDevice, StdoutMock);
}

impl OutputDeviceExt for OutputDevice {
    fn new_mock() -> (OutputDevice, StdoutMock) {
        let stdout_mock = StdoutMock::default();
        let this = OutputDevice {
            resource: Arc::new(StdMutex::new(stdout_mock.clone())),
            is_mock: true,
        };
        (this, stdout_mock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LockedOutputDevice, lock_output_device_as_mut};

    #[test]
    fn test_mock_output_device() {
        let (device, mock) = OutputDevice::new_mock();
        let mut_ref: LockedOutputDevice<'_> = lock_output_device_as_mut!(device);
        mut_ref.write_all(b"Hello, world!\n").ok();
        assert_eq!(mock.get_copy_of_buffer_as_string(), "Hello, world!\n");
    }

    #[test]
    fn test_clones_share_buffer() {
        let mut stdout_mock = StdoutMock::default();
        let stdout_mock_clone = stdout_mock.clone();
        stdout_mock.write_all(b"hello world").unwrap();
        assert_eq!(stdout_mock_clone.get_copy_of_buffer(), b"hello world");
        stdout_mock_clone.clear();
        assert!(stdout_mock.get_copy_of_buffer().is_empty());
    }
}
