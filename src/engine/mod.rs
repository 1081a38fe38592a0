//! In-process graph engine.
//!
//! The binding layer treats this module as an opaque native library: every
//! call takes flat index buffers, returns an [`EngineResult`], and owns its
//! [`NativeGraph`] allocations. Deletions and other renumbering calls report
//! the surviving old indices so callers can realign their own per-element data.

pub mod formats;
pub mod generators;
pub mod isoclass;
pub mod layout;
pub mod measures;
pub mod ops;
pub mod stats;
pub mod traversal;
pub mod types;

pub use generators::{AdjacencyMode, StarMode, TreeMode};
pub use stats::EngineStats;
pub use types::{
    EngineFailure, EngineResult, ErrorCode, MAX_VERTICES, NativeGraph, NeighborMode, Renumbering,
};
