// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{SafeRawInput, SendRawInput, StdMutex, lock_ignore_poison};
use std::{io::{self, ErrorKind, Read},
          sync::{Arc, MutexGuard}};

/// Byte source for the line readers: the terminal file, standard input in batch mode,
/// or a mock. Reads are unbuffered, one byte at a time, so nothing typed after the
/// newline is consumed.
#[derive(Clone)]
#[allow(missing_debug_implementations)]
pub struct InputDevice {
    pub resource: SafeRawInput,
    pub is_mock: bool,
}

impl InputDevice {
    #[must_use]
    pub fn new_stdin() -> Self { Self::new(io::stdin()) }

    #[must_use]
    pub fn new(reader: impl Read + Send + 'static) -> Self {
        Self {
            resource: Arc::new(StdMutex::new(reader)),
            is_mock: false,
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, SendRawInput> { lock_ignore_poison(&self.resource) }

    /// Read exactly one byte. `Ok(None)` is end of input. Interrupted reads
    /// (`EINTR`) are retried.
    ///
    /// # Errors
    ///
    /// Any read error other than [`ErrorKind::Interrupted`].
    pub fn read_byte(&self) -> io::Result<Option<u8>> {
        let mut reader = self.lock();
        read_one_byte(&mut *reader)
    }
}

/// Read exactly one byte from `reader`, retrying on `EINTR`.
///
/// # Errors
///
/// Any read error other than [`ErrorKind::Interrupted`].
pub fn read_one_byte(reader: &mut (impl Read + ?Sized)) -> io::Result<Option<u8>> {
    let mut byte = [0_u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(error) if error.kind() == ErrorKind::Interrupted => {}
            Err(error) => return Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InputDeviceExt;

    /// Fails with `EINTR` a fixed number of times before yielding its bytes.
    struct InterruptingReader {
        interrupts_left: usize,
        inner: io::Cursor<Vec<u8>>,
    }

    impl Read for InterruptingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.interrupts_left > 0 {
                self.interrupts_left -= 1;
                return Err(io::Error::from(ErrorKind::Interrupted));
            }
            self.inner.read(buf)
        }
    }

    #[test]
    fn test_read_byte_until_eof() {
        let device = InputDevice::new_mock(b"ok");
        assert_eq!(device.read_byte().unwrap(), Some(b'o'));
        assert_eq!(device.read_byte().unwrap(), Some(b'k'));
        assert_eq!(device.read_byte().unwrap(), None);
        assert!(device.is_mock);
    }

    #[test]
    fn test_interrupted_read_is_retried() {
        let device = InputDevice::new(InterruptingReader {
            interrupts_left: 3,
            inner: io::Cursor::new(b"x".to_vec()),
        });
        assert_eq!(device.read_byte().unwrap(), Some(b'x'));
    }

    #[test]
    fn test_other_errors_are_returned() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::from(ErrorKind::BrokenPipe))
            }
        }
        let device = InputDevice::new(Broken);
        assert_eq!(
            device.read_byte().unwrap_err().kind(),
            ErrorKind::BrokenPipe
        );
    }
}
