// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Writing prompts and messages to the console, with prompt length tracking so the
//! prompt can be erased later, and control byte escaping for untrusted text.

// Attach.
pub mod control_char_escape;
pub mod prompt_writer;

// Re-export.
pub use control_char_escape::*;
pub use prompt_writer::*;
