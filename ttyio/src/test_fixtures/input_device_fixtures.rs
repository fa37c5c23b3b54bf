// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{InputDevice, StdMutex, lock_ignore_poison};
use std::{io::{self, Cursor, Read},
          sync::Arc};

/// Callback run before every read of a [`HookedReader`].
pub type ReadHook = Box<dyn FnMut() + Send>;

/// Shared slot for a [`ReadHook`], so it can be installed after the reader is built.
pub type ReadHookSlot = Arc<StdMutex<Option<ReadHook>>>;

/// Reader over fixed bytes that runs a hook before each read. Tests use the hook to
/// observe or disturb terminal state in the middle of a line.
#[allow(missing_debug_implementations)]
pub struct HookedReader {
    pub cursor: Cursor<Vec<u8>>,
    pub hook: ReadHookSlot,
}

impl Read for HookedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(hook) = lock_ignore_poison(&self.hook).as_mut() {
            hook();
        }
        self.cursor.read(buf)
    }
}

pub trait InputDeviceExt {
    /// Input device that yields `bytes`, then end of input.
    fn new_mock(bytes: impl Into<Vec<u8>>) -> InputDevice;

    /// Same, with a hook slot run before every read.
    fn new_mock_with_hook(bytes: impl Into<Vec<u8>>, hook: ReadHookSlot) -> InputDevice;
}

impl InputDeviceExt for InputDevice {
    fn new_mock(bytes: impl Into<Vec<u8>>) -> InputDevice {
        Self::new_mock_with_hook(bytes, ReadHookSlot::default())
    }

    fn new_mock_with_hook(bytes: impl Into<Vec<u8>>, hook: ReadHookSlot) -> InputDevice {
        let reader = HookedReader {
            cursor: Cursor::new(bytes.into()),
            hook,
        };
        InputDevice {
            resource: Arc::new(StdMutex::new(reader)),
            is_mock: true,
        }
    }
}
