//! Graph handles with attached attribute storage over an in-process engine.
//!
//! A [`Graph`] owns one engine graph plus the graph, vertex and edge
//! attributes that ride along with it. Host values cross into the engine
//! through [`conversion`], engine failures come back through
//! [`error_bridge`], and every structural change keeps attribute arrays
//! aligned with the renumbered elements.
//! Run Criterion benchmarks with `cargo bench` to inspect reports under `target/criterion`.

pub mod attributes;
pub mod bench_utils;
pub mod cli;
pub mod config;
pub mod conversion;
pub mod engine;
pub mod error_bridge;
pub mod errors;
pub mod fault_injection;
pub mod graph;
pub mod integrity;
pub mod sequence;
pub mod snapshot;
pub mod value;

pub use crate::attributes::{AttrScope, AttributeStore, ElementKind};
pub use crate::config::{AttributeConfig, EngineConfig, GraphConfig};
pub use crate::conversion::{EdgeList, GraphOperands, Matrix, Reply, Selector};
pub use crate::engine::{AdjacencyMode, EngineStats, NeighborMode, StarMode, TreeMode};
pub use crate::errors::{ConversionError, EngineErrorKind, ErrorClass, GraphError, GraphResult};
pub use crate::graph::{
    AdjacencyPart, BfsResult, Capacity, Connectedness, DimacsData, ErdosRenyi, Finalizer, Graph,
    GraphFactory, GraphId, HostCallable, HostRef, OutDegrees, PageRankOptions, WeakGraph,
    disjoint_union, intersection, union,
};
pub use crate::integrity::{IntegrityError, IntegrityReport};
pub use crate::sequence::{BfsIter, BfsVisit, EdgeSeq, SeqHandle, SeqMut, VertexSeq};
pub use crate::value::{AttrValue, OpaqueValue};
