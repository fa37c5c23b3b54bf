// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The input byte filter and the read loop shared by plain and hidden reads.
//!
//! | Byte                 | Action                          |
//! | :------------------- | :------------------------------ |
//! | `\n`                 | ends the line (not stored)      |
//! | `\t`                 | stored as a space               |
//! | `0xA0` (no-break space) | dropped                      |
//! | other ASCII control  | dropped (including CONTROL-D)   |
//! | anything else        | stored                          |
//!
//! End of input before a newline replaces the whole line with the single byte
//! [`CONTROL_D`]. Since the filter drops every real `0x04`, a one byte line holding
//! it can only mean "end of input".

use crate::{InputDevice, LineSink};

/// In-band end of input marker: ASCII 4, what the terminal sends for Ctrl+D.
pub const CONTROL_D: u8 = b'D' - b'A' + 1;

/// Dropped from input. It looks like a space but isn't one.
pub const NO_BREAK_SPACE: u8 = 0xA0;

pub const INITIAL_LINE_CAPACITY: usize = 50;
pub const LINE_CAPACITY_STEP: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilteredByte {
    EndOfLine,
    Keep(u8),
    Drop,
}

#[must_use]
pub fn filter_input_byte(byte: u8) -> FilteredByte {
    match byte {
        b'\n' => FilteredByte::EndOfLine,
        b'\t' => FilteredByte::Keep(b' '),
        NO_BREAK_SPACE => FilteredByte::Drop,
        it if it.is_ascii_control() => FilteredByte::Drop,
        it => FilteredByte::Keep(it),
    }
}

/// How a line read ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Newline,
    /// The sink now holds exactly [`CONTROL_D`].
    EndOfInput,
}

/// Read bytes from `input` into `sink` until a newline or the end of input.
///
/// `on_byte` sees every consumed byte except the newline, before filtering. A read
/// error other than `EINTR` is logged and ends the line like end of input.
pub fn read_filtered_line<S: LineSink + ?Sized>(
    input: &InputDevice,
    sink: &mut S,
    mut on_byte: impl FnMut(u8),
) -> LineEnding {
    loop {
        let byte = match input.read_byte() {
            Ok(Some(byte)) => byte,
            Ok(None) => break,
            Err(error) => {
                tracing::error!(message = "reading from the console failed", error = %error);
                break;
            }
        };

        if byte == CONTROL_D {
            tracing::info!(message = "control d found");
        }

        match filter_input_byte(byte) {
            FilteredByte::EndOfLine => return LineEnding::Newline,
            FilteredByte::Keep(it) => {
                on_byte(byte);
                sink.push_byte(it);
            }
            FilteredByte::Drop => on_byte(byte),
        }
    }

    sink.clear();
    sink.push_byte(CONTROL_D);
    LineEnding::EndOfInput
}
