//! The graph handle: one engine graph plus its attribute store.

mod attributes;
mod generators;
mod io;
mod lifecycle;
mod mutation;
mod operators;
mod queries;

use std::{
    cell::OnceCell,
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use tracing::debug;

use crate::attributes::{AttributeStore, ElementKind};
use crate::config::GraphConfig;
use crate::conversion::buffer::check_vertex_bound;
use crate::conversion::{EdgeList, vertex_count_arg};
use crate::engine::{NativeGraph, ops};
use crate::error_bridge::check;
use crate::errors::{GraphError, GraphResult};
use crate::sequence::ViewState;

pub use generators::{ErdosRenyi, GraphFactory, OutDegrees};
pub use io::DimacsData;
pub use lifecycle::{Finalizer, HostCallable, HostRef, WeakGraph};
pub use operators::{disjoint_union, intersection, union};
pub use queries::{AdjacencyPart, BfsResult, Capacity, Connectedness, PageRankOptions};

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a graph handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphId(u64);

impl GraphId {
    fn next() -> Self {
        GraphId(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "graph#{}", self.0)
    }
}

/// Owns exactly one engine graph and the attributes describing it.
///
/// Handles only exist fully constructed: every constructor either returns a
/// live handle or an error with nothing allocated. Structural mutations are
/// all-or-nothing and bump [`Graph::generation`]. The engine graph is
/// released exactly once, by [`Graph::destroy`] or on drop.
pub struct Graph {
    id: GraphId,
    native: Option<NativeGraph>,
    attrs: AttributeStore,
    config: GraphConfig,
    generation: u64,
    finalizer: Option<Finalizer>,
    views: [OnceCell<Arc<ViewState>>; 2],
    liveness: Option<Arc<()>>,
}

impl Graph {
    /// Empty graph with `vertex_count` vertices.
    pub fn new(vertex_count: i64, directed: bool) -> GraphResult<Self> {
        Self::with_config(vertex_count, directed, &GraphConfig::default())
    }

    pub fn with_config(vertex_count: i64, directed: bool, config: &GraphConfig) -> GraphResult<Self> {
        let vertices = vertex_count_arg(vertex_count)?;
        let native = check(ops::create(
            vertices,
            directed,
            &[],
            config.engine.reserve_edge_capacity.unwrap_or(0),
        ))?;
        Ok(Self::from_native(native, config.clone()))
    }

    /// Graph from vertex pairs. The vertex count grows to cover every endpoint.
    pub fn from_edges<E: Into<EdgeList>>(
        edges: E,
        vertex_count: i64,
        directed: bool,
    ) -> GraphResult<Self> {
        Self::from_edges_with_config(edges, vertex_count, directed, &GraphConfig::default())
    }

    pub fn from_edges_with_config<E: Into<EdgeList>>(
        edges: E,
        vertex_count: i64,
        directed: bool,
        config: &GraphConfig,
    ) -> GraphResult<Self> {
        let vertices = vertex_count_arg(vertex_count)?;
        let edges = edges.into();
        if let Some(max) = edges.max_vertex() {
            check_vertex_bound(max.saturating_add(1))?;
        }
        let flat = edges.to_flat()?;
        let native = check(ops::create(
            vertices,
            directed,
            &flat,
            config.engine.reserve_edge_capacity.unwrap_or(0),
        ))?;
        Ok(Self::from_native(native, config.clone()))
    }

    pub(crate) fn from_native(native: NativeGraph, config: GraphConfig) -> Self {
        let id = GraphId::next();
        debug!(
            graph = %id,
            vertices = native.vcount(),
            edges = native.ecount(),
            directed = native.is_directed(),
            "graph created"
        );
        Self {
            id,
            attrs: AttributeStore::new(native.vcount(), native.ecount()),
            native: Some(native),
            config,
            generation: 0,
            finalizer: None,
            views: [OnceCell::new(), OnceCell::new()],
            liveness: Some(Arc::new(())),
        }
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    pub fn vcount(&self) -> usize {
        self.attrs.vertex_count()
    }

    pub fn ecount(&self) -> usize {
        self.attrs.edge_count()
    }

    pub fn is_directed(&self) -> bool {
        self.native.as_ref().is_some_and(NativeGraph::is_directed)
    }

    /// Structural generation; changes on every vertex or edge mutation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Independent copy with its own engine graph and a deep copy of the
    /// attributes. Finalizers and views are not copied.
    pub fn copy(&self) -> GraphResult<Graph> {
        let native = check(ops::copy(self.native()?))?;
        let mut copy = Graph::from_native(native, self.config.clone());
        copy.attrs = self.attrs.clone();
        Ok(copy)
    }

    pub(crate) fn native(&self) -> GraphResult<&NativeGraph> {
        self.native
            .as_ref()
            .ok_or_else(|| GraphError::validation("graph has already been released"))
    }

    pub(crate) fn native_mut(&mut self) -> GraphResult<&mut NativeGraph> {
        self.native
            .as_mut()
            .ok_or_else(|| GraphError::validation("graph has already been released"))
    }

    /// Invalidates cached views after a committed structural change.
    fn structure_changed(&mut self) {
        self.generation += 1;
        for cell in &mut self.views {
            cell.take();
        }
    }

    /// Takes over the structure and attributes of `other`; `other` is
    /// dropped with this graph's previous contents.
    pub(crate) fn adopt(&mut self, mut other: Graph) {
        std::mem::swap(&mut self.native, &mut other.native);
        std::mem::swap(&mut self.attrs, &mut other.attrs);
        self.structure_changed();
        debug!(graph = %self.id, from = %other.id, "graph contents replaced");
    }

    pub(crate) fn view_state(&self, kind: ElementKind) -> Arc<ViewState> {
        let slot = match kind {
            ElementKind::Vertex => 0,
            ElementKind::Edge => 1,
        };
        self.views[slot]
            .get_or_init(|| Arc::new(ViewState::new(self.id, kind, self.generation)))
            .clone()
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_directed() { "Directed" } else { "Undirected" };
        write!(f, "{kind} graph (|V| = {}, |E| = {})", self.vcount(), self.ecount())
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("id", &self.id)
            .field("vertices", &self.vcount())
            .field("edges", &self.ecount())
            .field("directed", &self.is_directed())
            .field("generation", &self.generation)
            .field("has_finalizer", &self.finalizer.is_some())
            .finish()
    }
}
