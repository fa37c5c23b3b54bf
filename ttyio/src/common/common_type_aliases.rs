// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::{Arc, MutexGuard, PoisonError};

/// Disambiguate the type of `StdMutex` from stdlib and other mutex crates.
pub type StdMutex<T> = std::sync::Mutex<T>;

/// Type alias for a `Send`-able output stream (terminal file, stderr, mock, etc).
pub type SendRawTerminal = dyn std::io::Write + Send;
/// Type alias for a `Send`-able output stream wrapped in an `Arc<StdMutex>`.
pub type SafeRawTerminal = Arc<StdMutex<SendRawTerminal>>;

/// Type alias for a `Send`-able input stream (terminal file, console handle, mock, etc).
pub type SendRawInput = dyn std::io::Read + Send;
/// Type alias for a `Send`-able input stream wrapped in an `Arc<StdMutex>`.
pub type SafeRawInput = Arc<StdMutex<SendRawInput>>;

/// Every operation in this crate returns this.
pub type TtyResult<T> = Result<T, crate::TtyError>;

/// Lock a [`StdMutex`], recovering the guard if a previous holder panicked.
pub fn lock_ignore_poison<T: ?Sized>(mutex: &StdMutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
