// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod common_type_aliases;
pub mod miette_setup_global_report_handler;
pub mod tty_error;

// Re-export.
pub use common_type_aliases::*;
pub use miette_setup_global_report_handler::*;
pub use tty_error::*;
