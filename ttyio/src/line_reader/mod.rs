// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Reading a line from the console: the byte filter shared with hidden reads, the
//! built-in byte-at-a-time reader, the optional [`LineEditor`] capability and the
//! yes/no helper built on top.

// Attach. `line_reader_impl` only adds methods to `TtySession`.
mod line_reader_impl;
pub mod byte_filter;
pub mod input_line;
pub mod line_editor;
pub mod line_sink;
pub mod yes_no;

// Re-export.
pub use byte_filter::*;
pub use input_line::*;
pub use line_editor::*;
pub use line_sink::*;
pub use yes_no::*;
