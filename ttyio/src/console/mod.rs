// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Binding to the controlling terminal (or the native console): device wrappers, the
//! terminal name lookup and the lazily opened [`ConsoleHandle`].

// Attach.
pub mod console_binding;
pub mod input_device;
pub mod output_device;
pub mod tty_name;

// Re-export.
pub use console_binding::*;
pub use input_device::*;
pub use output_device::*;
pub use tty_name::*;
