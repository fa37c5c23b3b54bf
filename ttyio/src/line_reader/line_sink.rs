// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{INITIAL_LINE_CAPACITY, LINE_CAPACITY_STEP};

/// Destination of the filtered bytes of one line. Implemented by the plain buffer
/// (`Vec<u8>`) and by [`crate::SensitiveBuffer`], so the read loop exists once.
pub trait LineSink {
    fn push_byte(&mut self, byte: u8);

    /// Drop everything pushed so far. Sensitive sinks erase it.
    fn clear(&mut self);
}

/// Plain line buffer. Grows in steps of [`LINE_CAPACITY_STEP`] whenever only the slot
/// for a terminator is left.
impl LineSink for Vec<u8> {
    fn push_byte(&mut self, byte: u8) {
        if self.len() + 1 >= self.capacity() {
            self.reserve_exact(LINE_CAPACITY_STEP);
        }
        self.push(byte);
    }

    fn clear(&mut self) { Vec::clear(self); }
}

/// A plain line buffer with the initial capacity.
#[must_use]
pub fn new_plain_line_buffer() -> Vec<u8> { Vec::with_capacity(INITIAL_LINE_CAPACITY) }
