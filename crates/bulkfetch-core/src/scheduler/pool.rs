//! Counting pool of slot ids.
//!
//! `acquire` blocks while all K slots are leased; dropping a lease returns the
//! slot and wakes one waiter.

use std::sync::{Arc, Condvar, Mutex, PoisonError};

#[derive(Debug)]
pub struct SlotPool {
    size: usize,
    free: Mutex<Vec<usize>>,
    available: Condvar,
}

impl SlotPool {
    /// Pool of slots `0..size`. Size is clamped to at least 1.
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            size,
            // Popped from the back, so slot 0 is handed out first.
            free: Mutex::new((0..size).rev().collect()),
            available: Condvar::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Slots not currently leased.
    #[cfg(test)]
    fn available(&self) -> usize {
        self.free.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Blocks until a slot is free and leases it.
    pub fn acquire(self: &Arc<Self>) -> SlotLease {
        let mut free = self.free.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            if let Some(slot) = free.pop() {
                return SlotLease {
                    pool: Arc::clone(self),
                    slot,
                };
            }
            free = self
                .available
                .wait(free)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Leases a slot if one is free right now.
    #[cfg(test)]
    fn try_acquire(self: &Arc<Self>) -> Option<SlotLease> {
        let slot = self
            .free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()?;
        Some(SlotLease {
            pool: Arc::clone(self),
            slot,
        })
    }

    fn release(&self, slot: usize) {
        self.free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(slot);
        self.available.notify_one();
    }
}

/// Exclusive use of one slot; returned to the pool on drop.
#[derive(Debug)]
pub struct SlotLease {
    pool: Arc<SlotPool>,
    slot: usize,
}

impl SlotLease {
    pub fn slot(&self) -> usize {
        self.slot
    }
}

impl Drop for SlotLease {
    fn drop(&mut self) {
        self.pool.release(self.slot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn leases_distinct_slots_until_exhausted() {
        let pool = Arc::new(SlotPool::new(2));
        let a = pool.acquire();
        let b = pool.acquire();
        assert_eq!(a.slot(), 0);
        assert_eq!(b.slot(), 1);
        assert_eq!(pool.available(), 0);
        assert!(pool.try_acquire().is_none());
        drop(a);
        assert_eq!(pool.available(), 1);
        assert_eq!(pool.try_acquire().map(|l| l.slot()), Some(0));
    }

    #[test]
    fn acquire_blocks_until_release() {
        let pool = Arc::new(SlotPool::new(1));
        let held = pool.acquire();

        let waiter = {
            let pool = Arc::clone(&pool);
            thread::spawn(move || pool.acquire().slot())
        };
        thread::sleep(Duration::from_millis(50));
        assert!(!waiter.is_finished());

        drop(held);
        assert_eq!(waiter.join().unwrap(), 0);
    }

    #[test]
    fn zero_size_is_clamped() {
        let pool = Arc::new(SlotPool::new(0));
        assert_eq!(pool.size(), 1);
        assert!(pool.try_acquire().is_some());
    }
}
