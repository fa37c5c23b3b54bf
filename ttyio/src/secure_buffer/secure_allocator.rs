// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::atomic::{Ordering, compiler_fence};

/// Source of the blocks backing a [`crate::SensitiveBuffer`].
///
/// Implementors only have to say how a block is released. The defaults allocate zero
/// filled blocks and, on growth, erase and release the old block.
pub trait SecureAllocator {
    /// A zero filled block of `len` bytes.
    fn allocate(&self, len: usize) -> Box<[u8]> { vec![0_u8; len].into_boxed_slice() }

    /// Move `block` into a new block of `new_len` bytes. The old block is erased before
    /// it is released.
    fn grow(&self, mut block: Box<[u8]>, new_len: usize) -> Box<[u8]> {
        let mut grown = self.allocate(new_len);
        let kept = block.len().min(new_len);
        grown[..kept].copy_from_slice(&block[..kept]);
        erase_bytes(&mut block);
        self.release_and_erase(block);
        grown
    }

    /// Overwrite `block` with zeros, then give it back.
    fn release_and_erase(&self, block: Box<[u8]>);
}

/// Zero `bytes` with volatile writes, so the stores can't be optimized away even though
/// the memory is about to be freed.
pub fn erase_bytes(bytes: &mut [u8]) {
    for byte in bytes.iter_mut() {
        // SAFETY: `byte` is a valid, aligned, exclusive reference.
        unsafe { std::ptr::write_volatile(byte, 0) };
    }
    compiler_fence(Ordering::SeqCst);
}

/// Default allocator: the global allocator, with [`erase_bytes()`] before every free.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroizingAllocator;

impl SecureAllocator for ZeroizingAllocator {
    fn release_and_erase(&self, mut block: Box<[u8]>) {
        erase_bytes(&mut block);
        drop(std::hint::black_box(block));
    }
}
