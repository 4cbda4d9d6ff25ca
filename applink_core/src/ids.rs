use std::sync::atomic::{AtomicU32, Ordering};

// Strictly increasing bus message ids. Ids are never reused within a process
// lifetime; u32 wraparound after 2^32 allocations is out of contract.
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self {
            next: AtomicU32::new(1),
        }
    }

    pub fn next_id(&self) -> u32 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
