// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{SecureAllocator, StdMutex, lock_ignore_poison};
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct AllocatorLog {
    pub allocation_count: usize,
    /// Released blocks, kept alive and untouched so a test can look for remnants.
    pub released: Vec<Vec<u8>>,
}

/// [`SecureAllocator`] that counts allocations and keeps every released block instead
/// of freeing it. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct InstrumentedAllocator {
    pub log: Arc<StdMutex<AllocatorLog>>,
}

impl InstrumentedAllocator {
    #[must_use]
    pub fn allocation_count(&self) -> usize { lock_ignore_poison(&self.log).allocation_count }

    #[must_use]
    pub fn released_blocks(&self) -> Vec<Vec<u8>> { lock_ignore_poison(&self.log).released.clone() }
}

impl SecureAllocator for InstrumentedAllocator {
    fn allocate(&self, len: usize) -> Box<[u8]> {
        lock_ignore_poison(&self.log).allocation_count += 1;
        vec![0_u8; len].into_boxed_slice()
    }

    /// Keeps the block exactly as it arrived: whatever erasing happened was done by the
    /// caller.
    fn release_and_erase(&self, block: Box<[u8]>) {
        lock_ignore_poison(&self.log).released.push(block.into_vec());
    }
}
