// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The session context that every console operation runs against. It replaces the
//! process-wide flags (batch mode, no terminal, prompt length) with one object built at
//! startup and shared by reference.

// Attach.
pub mod session_mode;
pub mod tty_config;
pub mod tty_session;

// Re-export.
pub use session_mode::*;
pub use tty_config::*;
pub use tty_session::*;
