//! Structural mutations.
//!
//! Each call validates host input first, then runs one engine call, then
//! realigns the attribute store from the engine's renumbering. Nothing is
//! touched when any step before the attribute update fails.

use tracing::debug;

use super::Graph;
use crate::attributes::ElementKind;
use crate::conversion::{EdgeList, Selector, vertex_count_arg};
use crate::engine::ops;
use crate::errors::{GraphError, GraphResult};

impl Graph {
    pub fn add_vertices(&mut self, count: i64) -> GraphResult<()> {
        let count = vertex_count_arg(count)?;
        ops::add_vertices(self.native_mut()?, count)?;
        self.attrs.grow(ElementKind::Vertex, count);
        self.structure_changed();
        debug!(graph = %self.id, added = count, vertices = self.vcount(), "vertices added");
        Ok(())
    }

    /// Deletes the selected vertices and every incident edge. Remaining
    /// vertices and edges keep their relative order.
    pub fn delete_vertices<S: Into<Selector>>(&mut self, selector: S) -> GraphResult<()> {
        let resolved = selector.into().resolve(self.vcount(), "vertex")?;
        let renumbering = ops::delete_vertices(self.native_mut()?, resolved.indices())?;
        self.attrs.remap(ElementKind::Vertex, &renumbering.vertices);
        self.attrs.remap(ElementKind::Edge, &renumbering.edges);
        self.structure_changed();
        debug!(
            graph = %self.id,
            deleted = resolved.len(),
            vertices = self.vcount(),
            edges = self.ecount(),
            "vertices deleted"
        );
        Ok(())
    }

    /// Appends edges; new edge attributes start as null.
    pub fn add_edges<E: Into<EdgeList>>(&mut self, edges: E) -> GraphResult<()> {
        let edges = edges.into();
        let vcount = self.vcount();
        if let Some(&(a, b)) = edges.pairs().iter().find(|&&(a, b)| a >= vcount || b >= vcount) {
            return Err(GraphError::validation(format!(
                "edge ({a}, {b}) refers to a vertex outside 0..{vcount}"
            )));
        }
        let flat = edges.to_flat()?;
        ops::add_edges(self.native_mut()?, &flat)?;
        self.attrs.grow(ElementKind::Edge, edges.len());
        self.structure_changed();
        debug!(graph = %self.id, added = edges.len(), edges = self.ecount(), "edges added");
        Ok(())
    }

    pub fn delete_edges<S: Into<Selector>>(&mut self, selector: S) -> GraphResult<()> {
        let resolved = selector.into().resolve(self.ecount(), "edge")?;
        self.delete_edge_ids(resolved.indices())
    }

    /// Deletes one edge per listed vertex pair; a pair listed twice removes
    /// two parallel edges. Fails without changes when any pair runs out of
    /// edges.
    pub fn delete_edges_by_pairs<E: Into<EdgeList>>(&mut self, pairs: E) -> GraphResult<()> {
        let pairs = pairs.into();
        let eids = ops::get_eids(self.native()?, pairs.pairs(), true)?;
        self.delete_edge_ids(&eids)
    }

    fn delete_edge_ids(&mut self, eids: &[usize]) -> GraphResult<()> {
        let origin = ops::delete_edges(self.native_mut()?, eids)?;
        self.attrs.remap(ElementKind::Edge, &origin);
        self.structure_changed();
        debug!(graph = %self.id, edges = self.ecount(), "edges deleted");
        Ok(())
    }

    /// Removes multi-edges and/or loops. A merged edge keeps the attributes
    /// of its first occurrence.
    pub fn simplify(&mut self, multiple: bool, loops: bool) -> GraphResult<()> {
        let origin = ops::simplify(self.native_mut()?, multiple, loops);
        self.apply_edge_origin(&origin, "simplified");
        Ok(())
    }

    /// With `mutual`, each undirected edge becomes a pair of opposite arcs
    /// that both carry the original edge's attributes.
    pub fn to_directed(&mut self, mutual: bool) -> GraphResult<()> {
        let origin = ops::to_directed(self.native_mut()?, mutual);
        self.apply_edge_origin(&origin, "converted to directed");
        Ok(())
    }

    pub fn to_undirected(&mut self, collapse: bool) -> GraphResult<()> {
        let origin = ops::to_undirected(self.native_mut()?, collapse);
        self.apply_edge_origin(&origin, "converted to undirected");
        Ok(())
    }

    fn apply_edge_origin(&mut self, origin: &[usize], what: &str) {
        self.attrs.remap(ElementKind::Edge, origin);
        self.structure_changed();
        debug!(graph = %self.id, edges = self.ecount(), "graph {what}");
    }

    /// Induced subgraph on the selected vertices, attributes included.
    pub fn subgraph<S: Into<Selector>>(&self, selector: S) -> GraphResult<Graph> {
        let resolved = selector.into().resolve(self.vcount(), "vertex")?;
        let mut keep = vec![false; self.vcount()];
        for &vid in resolved.indices() {
            keep[vid] = true;
        }
        let dropped: Vec<usize> = (0..self.vcount()).filter(|&v| !keep[v]).collect();
        let mut sub = self.copy()?;
        sub.delete_vertices(dropped)?;
        Ok(sub)
    }
}
