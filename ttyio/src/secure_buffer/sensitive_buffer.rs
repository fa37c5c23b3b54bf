// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{CONTROL_D, INITIAL_LINE_CAPACITY, LINE_CAPACITY_STEP, LineSink,
            SecureAllocator, ZeroizingAllocator, erase_bytes};
use std::fmt;

/// Growable byte buffer for secrets.
///
/// Starts at 50 bytes and grows by 50 whenever only the terminator slot is left. Each
/// growth goes through [`SecureAllocator::grow()`], which erases the old block. Drop
/// erases the current one. The bytes are never copied anywhere else by this type.
///
/// `Debug` prints the length only.
pub struct SensitiveBuffer<A: SecureAllocator = ZeroizingAllocator> {
    /// Always `Some` outside of `grow` and `drop`.
    block: Option<Box<[u8]>>,
    len: usize,
    allocator: A,
}

impl SensitiveBuffer {
    #[must_use]
    pub fn new() -> Self { Self::new_in(ZeroizingAllocator) }
}

impl Default for SensitiveBuffer {
    fn default() -> Self { Self::new() }
}

impl<A: SecureAllocator> SensitiveBuffer<A> {
    #[must_use]
    pub fn new_in(allocator: A) -> Self {
        let block = allocator.allocate(INITIAL_LINE_CAPACITY);
        Self {
            block: Some(block),
            len: 0,
            allocator,
        }
    }

    fn block(&self) -> &[u8] { self.block.as_deref().unwrap_or_default() }

    #[must_use]
    pub fn len(&self) -> usize { self.len }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.len == 0 }

    #[must_use]
    pub fn capacity(&self) -> usize { self.block().len() }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] { &self.block()[..self.len] }

    /// The content followed by a NUL, for callers that want a C string. There is always
    /// room for it.
    #[must_use]
    pub fn as_bytes_with_nul(&self) -> &[u8] { &self.block()[..=self.len] }

    /// `true` if the read ended without a newline.
    #[must_use]
    pub fn is_eof(&self) -> bool { self.as_bytes() == [CONTROL_D] }

    #[must_use]
    pub fn allocator(&self) -> &A { &self.allocator }

    fn grow(&mut self) {
        if let Some(block) = self.block.take() {
            let new_len = block.len() + LINE_CAPACITY_STEP;
            self.block = Some(self.allocator.grow(block, new_len));
        }
    }
}

impl<A: SecureAllocator> LineSink for SensitiveBuffer<A> {
    fn push_byte(&mut self, byte: u8) {
        if self.len + 1 >= self.capacity() {
            self.grow();
        }
        if let Some(block) = self.block.as_mut() {
            block[self.len] = byte;
            self.len += 1;
        }
    }

    fn clear(&mut self) {
        if let Some(block) = self.block.as_mut() {
            erase_bytes(&mut block[..self.len]);
        }
        self.len = 0;
    }
}

impl<A: SecureAllocator> Drop for SensitiveBuffer<A> {
    fn drop(&mut self) {
        if let Some(mut block) = self.block.take() {
            erase_bytes(&mut block);
            self.allocator.release_and_erase(block);
        }
    }
}

impl<A: SecureAllocator> fmt::Debug for SensitiveBuffer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SensitiveBuffer")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}
