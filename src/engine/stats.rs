use std::sync::atomic::{AtomicU64, Ordering};

static ALLOCATED: AtomicU64 = AtomicU64::new(0);
static RELEASED: AtomicU64 = AtomicU64::new(0);

/// Process-wide count of engine graph allocations and releases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub allocated: u64,
    pub released: u64,
}

impl EngineStats {
    pub fn live(&self) -> u64 {
        self.allocated.saturating_sub(self.released)
    }

    pub fn since(&self, earlier: &EngineStats) -> EngineStats {
        EngineStats {
            allocated: self.allocated - earlier.allocated,
            released: self.released - earlier.released,
        }
    }
}

pub fn snapshot() -> EngineStats {
    EngineStats {
        allocated: ALLOCATED.load(Ordering::SeqCst),
        released: RELEASED.load(Ordering::SeqCst),
    }
}

pub(crate) fn record_allocation() {
    ALLOCATED.fetch_add(1, Ordering::SeqCst);
}

pub(crate) fn record_release() {
    RELEASED.fetch_add(1, Ordering::SeqCst);
}
