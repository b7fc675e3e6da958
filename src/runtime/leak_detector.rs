//! Per-thread counters for refcount traffic and object lifetimes.
//!
//! The host runtime is single-threaded, so counters are thread-local: a test
//! observes only the objects it created itself.

use std::cell::Cell;

#[cfg_attr(feature = "leak-json", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeakStats {
    pub allocations: usize,
    pub deallocations: usize,
    pub increfs: usize,
    pub decrefs: usize,
}

impl LeakStats {
    /// Objects allocated but not yet deallocated.
    pub fn live_objects(&self) -> isize {
        self.allocations as isize - self.deallocations as isize
    }

    /// Counter growth between `earlier` and `self`.
    pub fn since(&self, earlier: &LeakStats) -> LeakStats {
        LeakStats {
            allocations: self.allocations - earlier.allocations,
            deallocations: self.deallocations - earlier.deallocations,
            increfs: self.increfs - earlier.increfs,
            decrefs: self.decrefs - earlier.decrefs,
        }
    }

    #[cfg(feature = "leak-json")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

thread_local! {
    static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
    static DEALLOCATIONS: Cell<usize> = const { Cell::new(0) };
    static INCREFS: Cell<usize> = const { Cell::new(0) };
    static DECREFS: Cell<usize> = const { Cell::new(0) };
}

fn bump(counter: &'static std::thread::LocalKey<Cell<usize>>) {
    counter.with(|c| c.set(c.get() + 1));
}

pub fn record_alloc() {
    bump(&ALLOCATIONS);
}

pub fn record_dealloc() {
    bump(&DEALLOCATIONS);
}

pub fn record_incref() {
    bump(&INCREFS);
}

pub fn record_decref() {
    bump(&DECREFS);
}

pub fn snapshot() -> LeakStats {
    LeakStats {
        allocations: ALLOCATIONS.with(Cell::get),
        deallocations: DEALLOCATIONS.with(Cell::get),
        increfs: INCREFS.with(Cell::get),
        decrefs: DECREFS.with(Cell::get),
    }
}
