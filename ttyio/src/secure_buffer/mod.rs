// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Hidden input and the memory it lands in.
//!
//! A passphrase is typed with echo off (see [`crate::HiddenModeGuard`]) and collected
//! into a [`SensitiveBuffer`]. Every block the buffer ever owned, including the ones it
//! grew out of, is overwritten with zeros before it goes back to the allocator.

// Attach. `hidden_line_reader` only adds methods to `TtySession`.
mod hidden_line_reader;
pub mod secure_allocator;
pub mod sensitive_buffer;

// Re-export.
pub use secure_allocator::*;
pub use sensitive_buffer::*;
