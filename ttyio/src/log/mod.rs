// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Logging for the console layer. Diagnostics (refusals, restore failures, end of input
//! markers) go through [`tracing`]; prompts never do. Hosts choose where log output lands
//! with [`TracingConfig`] and [`try_initialize_logging`]. Since the console itself is
//! usually a terminal, logging to a file keeps diagnostics from clobbering prompts.

// Attach sources.
pub mod rolling_file_appender_impl;
pub mod tracing_config;
pub mod tracing_init;

// Re-export.
pub use rolling_file_appender_impl::*;
pub use tracing_config::*;
pub use tracing_init::*;
