//! Monotonic node/edge identity, scoped to a single `TranslationResult`.
//!
//! Per §4.A identity is "assigned at construction (monotonic counter scoped
//! to the `TranslationResult`)" — not content-hashed, since two structurally
//! identical nodes in different locations must still be distinguishable.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }

    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic_and_unique() {
        let alloc = IdAllocator::new();
        let a = alloc.next_id();
        let b = alloc.next_id();
        let c = alloc.next_id();
        assert_eq!([a, b, c], [0, 1, 2]);
    }
}
