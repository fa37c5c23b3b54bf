// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Mocks and fakes for tests, in this crate and in crates that embed a [`crate::TtySession`].
//! Nothing here touches a real terminal.

// Attach sources.
pub mod fake_terminal;
pub mod input_device_fixtures;
pub mod instrumented_allocator;
pub mod mock_console_opener;
pub mod mock_line_editor;
pub mod output_device_fixtures;

// Re-export.
pub use fake_terminal::*;
pub use input_device_fixtures::*;
pub use instrumented_allocator::*;
pub use mock_console_opener::*;
pub use mock_line_editor::*;
pub use output_device_fixtures::*;
