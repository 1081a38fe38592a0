use std::sync::OnceLock;

use ahash::AHashMap;
use parking_lot::Mutex;

use crate::engine::{EngineFailure, ErrorCode};

/// Places where a failure can be forced for atomicity tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaultPoint {
    EngineAllocate,
    AddVertices,
    AddEdges,
    DeleteVertices,
    DeleteEdges,
    HostAllocate,
    SnapshotLoadBeforeCommit,
}

impl FaultPoint {
    fn code(self) -> ErrorCode {
        match self {
            FaultPoint::EngineAllocate | FaultPoint::HostAllocate => ErrorCode::NoMemory,
            _ => ErrorCode::Failure,
        }
    }
}

struct FaultEntry {
    remaining: usize,
}

fn registry() -> &'static Mutex<AHashMap<FaultPoint, FaultEntry>> {
    static REGISTRY: OnceLock<Mutex<AHashMap<FaultPoint, FaultEntry>>> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(AHashMap::new()))
}

pub fn reset_faults() {
    registry().lock().clear();
}

/// Makes the next `failures` passes through `point` fail.
pub fn configure_fault(point: FaultPoint, failures: usize) {
    let mut guard = registry().lock();
    if failures == 0 {
        guard.remove(&point);
    } else {
        guard.insert(
            point,
            FaultEntry {
                remaining: failures,
            },
        );
    }
}

pub(crate) fn check_fault(point: FaultPoint) -> Result<(), EngineFailure> {
    let mut guard = registry().lock();
    if let Some(entry) = guard.get_mut(&point)
        && entry.remaining > 0
    {
        entry.remaining -= 1;
        if entry.remaining == 0 {
            guard.remove(&point);
        }
        return Err(EngineFailure::new(
            point.code(),
            format!("injected fault at {point:?}"),
        ));
    }
    Ok(())
}
