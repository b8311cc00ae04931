use std::sync::atomic::{AtomicU64, Ordering};

// ===========================================================================
// ** Counter **
//
// A monotonically increasing statistic shared between threads.
// ===========================================================================

#[derive(Debug, Default)]
pub struct Counter {
    count: AtomicU64,
}

impl Counter {
    // -----------------------------------------------------------------------

    pub const fn new() -> Self {
        Counter {
            count: AtomicU64::new(0),
        }
    }

    // -----------------------------------------------------------------------
    // returns the value before the increment

    pub fn increment(&self) -> u64 {
        self.count.fetch_add(1, Ordering::AcqRel)
    }

    // -----------------------------------------------------------------------

    pub fn get(&self) -> u64 {
        self.count.load(Ordering::Acquire)
    }
}

// ===========================================================================
// ** TESTS **
// ===========================================================================
