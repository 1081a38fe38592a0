//! Read-only structural queries and algorithm wrappers.
//!
//! Selector-driven queries answer with [`Reply`]: a scalar for a single
//! index, a list for anything else.

use super::Graph;
use crate::conversion::{Matrix, Reply, ResolvedSelector, Selector, float_buffer};
use crate::engine::{NeighborMode, isoclass, layout, measures, ops, traversal};
use crate::errors::{GraphError, GraphResult};

/// Which connectivity `is_connected` and `clusters` use on directed graphs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Connectedness {
    Weak,
    #[default]
    Strong,
}

/// Part of an undirected adjacency matrix to fill.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AdjacencyPart {
    Upper,
    Lower,
    #[default]
    Both,
}

/// Edge capacities for flow queries.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Capacity {
    #[default]
    Unit,
    /// Numeric edge attribute.
    Attribute(String),
    /// One value per edge.
    Values(Vec<f64>),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageRankOptions {
    pub directed: bool,
    pub niter: usize,
    pub eps: f64,
    pub damping: f64,
}

impl Default for PageRankOptions {
    fn default() -> Self {
        Self {
            directed: true,
            niter: 1000,
            eps: 0.001,
            damping: 0.85,
        }
    }
}

/// Eager breadth-first search result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BfsResult {
    /// Vertices in visit order.
    pub vids: Vec<usize>,
    /// Start offset of each layer in `vids`, followed by `vids.len()`.
    pub layers: Vec<usize>,
    /// Parent of every vertex; the root and unreached vertices have none.
    pub parents: Vec<Option<usize>>,
}

impl Graph {
    pub(crate) fn check_vertex(&self, vid: usize) -> GraphResult<()> {
        if vid < self.vcount() {
            Ok(())
        } else {
            Err(GraphError::validation(format!(
                "vertex index {vid} out of range (count {})",
                self.vcount()
            )))
        }
    }

    fn resolve_vertices(&self, selector: Selector) -> GraphResult<ResolvedSelector> {
        selector.resolve(self.vcount(), "vertex")
    }

    pub fn degree<S: Into<Selector>>(
        &self,
        selector: S,
        mode: NeighborMode,
        loops: bool,
    ) -> GraphResult<Reply<usize>> {
        let resolved = self.resolve_vertices(selector.into())?;
        let degrees = ops::degree(self.native()?, resolved.indices(), mode, loops)?;
        Ok(resolved.reply(degrees))
    }

    /// Largest degree in the selection; zero for an empty selection.
    pub fn maxdegree<S: Into<Selector>>(
        &self,
        selector: S,
        mode: NeighborMode,
        loops: bool,
    ) -> GraphResult<usize> {
        let resolved = self.resolve_vertices(selector.into())?;
        let degrees = ops::degree(self.native()?, resolved.indices(), mode, loops)?;
        Ok(degrees.into_iter().max().unwrap_or(0))
    }

    pub fn neighbors(&self, vid: usize, mode: NeighborMode) -> GraphResult<Vec<usize>> {
        self.check_vertex(vid)?;
        Ok(ops::neighbors(self.native()?, vid, mode)?)
    }

    pub fn successors(&self, vid: usize) -> GraphResult<Vec<usize>> {
        self.neighbors(vid, NeighborMode::Out)
    }

    pub fn predecessors(&self, vid: usize) -> GraphResult<Vec<usize>> {
        self.neighbors(vid, NeighborMode::In)
    }

    /// Id of the first edge from `a` to `b`. With `directed` unset the edge
    /// may run either way.
    pub fn get_eid(&self, a: usize, b: usize, directed: bool) -> GraphResult<usize> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;
        Ok(ops::get_eid(self.native()?, a, b, directed)?)
    }

    pub fn are_connected(&self, a: usize, b: usize) -> GraphResult<bool> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;
        Ok(ops::get_eid(self.native()?, a, b, true).is_ok())
    }

    pub fn get_edgelist(&self) -> Vec<(usize, usize)> {
        self.native
            .as_ref()
            .map(|native| native.edges().collect())
            .unwrap_or_default()
    }

    /// Edge multiplicities. `part` applies to undirected graphs only.
    pub fn get_adjacency(&self, part: AdjacencyPart) -> GraphResult<Matrix<i64>> {
        let native = self.native()?;
        let n = native.vcount();
        let mut data = ops::adjacency_matrix(native)?;
        if !native.is_directed() && part != AdjacencyPart::Both {
            for i in 0..n {
                for j in 0..n {
                    let drop = match part {
                        AdjacencyPart::Upper => j < i,
                        AdjacencyPart::Lower => j > i,
                        AdjacencyPart::Both => false,
                    };
                    if drop {
                        data[i * n + j] = 0;
                    }
                }
            }
        }
        Ok(Matrix::from_parts(n, n, data))
    }

    pub fn laplacian(&self, normalized: bool) -> GraphResult<Matrix<f64>> {
        let native = self.native()?;
        let n = native.vcount();
        Ok(Matrix::from_parts(n, n, ops::laplacian(native, normalized)?))
    }

    /// The null graph counts as connected.
    pub fn is_connected(&self, mode: Connectedness) -> GraphResult<bool> {
        let membership = self.clusters(mode)?;
        Ok(membership.iter().all(|&c| c == 0))
    }

    /// Component id of every vertex, numbered by lowest member.
    pub fn clusters(&self, mode: Connectedness) -> GraphResult<Vec<usize>> {
        Ok(traversal::components(
            self.native()?,
            mode == Connectedness::Strong,
        ))
    }

    pub fn subcomponent(&self, vid: usize, mode: NeighborMode) -> GraphResult<Vec<usize>> {
        self.check_vertex(vid)?;
        Ok(traversal::subcomponent(self.native()?, vid, mode)?)
    }

    /// Geodesic lengths from each selected vertex to every vertex;
    /// unreachable pairs are `None`.
    pub fn shortest_paths<S: Into<Selector>>(
        &self,
        selector: S,
        mode: NeighborMode,
    ) -> GraphResult<Matrix<Option<usize>>> {
        let resolved = self.resolve_vertices(selector.into())?;
        let rows = traversal::shortest_paths(self.native()?, resolved.indices(), mode)?;
        let cols = self.vcount();
        Ok(Matrix::from_parts(
            rows.len(),
            cols,
            rows.into_iter().flatten().collect(),
        ))
    }

    pub fn diameter(&self, directed: bool, unconn: bool) -> GraphResult<usize> {
        Ok(traversal::diameter(self.native()?, directed, unconn))
    }

    pub fn average_path_length(&self, directed: bool, unconn: bool) -> GraphResult<f64> {
        Ok(traversal::average_path_length(self.native()?, directed, unconn))
    }

    pub fn closeness<S: Into<Selector>>(
        &self,
        selector: S,
        mode: NeighborMode,
    ) -> GraphResult<Reply<f64>> {
        let resolved = self.resolve_vertices(selector.into())?;
        let scores = traversal::closeness(self.native()?, resolved.indices(), mode)?;
        Ok(resolved.reply(scores))
    }

    pub fn betweenness<S: Into<Selector>>(
        &self,
        selector: S,
        directed: bool,
    ) -> GraphResult<Reply<f64>> {
        let resolved = self.resolve_vertices(selector.into())?;
        let scores = traversal::betweenness(self.native()?, resolved.indices(), directed)?;
        Ok(resolved.reply(scores))
    }

    pub fn pagerank<S: Into<Selector>>(
        &self,
        selector: S,
        options: &PageRankOptions,
    ) -> GraphResult<Reply<f64>> {
        let resolved = self.resolve_vertices(selector.into())?;
        let scores = traversal::pagerank(
            self.native()?,
            resolved.indices(),
            options.directed,
            options.niter,
            options.eps,
            options.damping,
        )?;
        Ok(resolved.reply(scores))
    }

    pub fn density(&self, loops: bool) -> GraphResult<f64> {
        Ok(measures::density(self.native()?, loops))
    }

    pub fn reciprocity(&self, ignore_loops: bool) -> GraphResult<f64> {
        Ok(measures::reciprocity(self.native()?, ignore_loops))
    }

    pub fn transitivity_undirected(&self) -> GraphResult<f64> {
        Ok(measures::transitivity_undirected(self.native()?))
    }

    /// Isomorphism class of the subgraph induced by the selection (3 or 4 vertices).
    pub fn isoclass_of<S: Into<Selector>>(&self, selector: S) -> GraphResult<usize> {
        let resolved = self.resolve_vertices(selector.into())?;
        Ok(isoclass::isoclass_of(self.native()?, resolved.indices())?)
    }

    pub fn isomorphic(&self, other: &Graph) -> GraphResult<bool> {
        Ok(isoclass::isomorphic(self.native()?, other.native()?)?)
    }

    pub(super) fn capacities(&self, capacity: &Capacity) -> GraphResult<Vec<f64>> {
        match capacity {
            Capacity::Unit => Ok(vec![1.0; self.ecount()]),
            Capacity::Attribute(key) => Ok(float_buffer(self.edge_attr(key)?)?),
            Capacity::Values(values) if values.len() == self.ecount() => Ok(values.clone()),
            Capacity::Values(values) => Err(GraphError::validation(format!(
                "capacity needs {} values, got {}",
                self.ecount(),
                values.len()
            ))),
        }
    }

    pub fn maxflow_value(&self, source: usize, target: usize, capacity: &Capacity) -> GraphResult<f64> {
        self.check_vertex(source)?;
        self.check_vertex(target)?;
        let capacity = self.capacities(capacity)?;
        Ok(traversal::maxflow_value(self.native()?, source, target, &capacity)?)
    }

    /// Minimum cut value. A missing endpoint is minimized over.
    pub fn mincut_value(
        &self,
        source: Option<usize>,
        target: Option<usize>,
        capacity: &Capacity,
    ) -> GraphResult<f64> {
        for vid in source.iter().chain(target.iter()) {
            self.check_vertex(*vid)?;
        }
        let capacity = self.capacities(capacity)?;
        Ok(traversal::mincut_value(self.native()?, source, target, &capacity)?)
    }

    pub fn layout_circle(&self) -> GraphResult<Matrix<f64>> {
        Ok(Matrix::from_parts(self.vcount(), 2, layout::circle(self.native()?)))
    }

    /// Uniform positions in `[-1, 1]²`, drawn from the configured seed.
    pub fn layout_random(&self) -> GraphResult<Matrix<f64>> {
        let mut rng = self.config.engine.rng();
        Ok(Matrix::from_parts(
            self.vcount(),
            2,
            layout::random(self.native()?, &mut rng),
        ))
    }

    /// Grid placement; `width` zero picks a square-ish grid.
    pub fn layout_grid(&self, width: usize) -> GraphResult<Matrix<f64>> {
        Ok(Matrix::from_parts(self.vcount(), 2, layout::grid(self.native()?, width)))
    }

    pub fn bfs(&self, root: usize, mode: NeighborMode) -> GraphResult<BfsResult> {
        self.check_vertex(root)?;
        let tree = traversal::bfs(self.native()?, root, mode)?;
        Ok(BfsResult {
            vids: tree.order,
            layers: tree.layers,
            parents: tree.parents,
        })
    }
}
