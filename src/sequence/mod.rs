//! Vertex and edge sequence views.
//!
//! A view borrows its graph, so the borrow checker already rules out a live
//! view across a structural mutation. Views that must outlive the borrow are
//! detached into a [`SeqHandle`], which only binds again while the graph's
//! generation is unchanged.

mod bfs_iter;

use std::sync::Arc;

use crate::attributes::ElementKind;
use crate::conversion::{Reply, Selector};
use crate::engine::{NeighborMode, ops};
use crate::errors::{GraphError, GraphResult};
use crate::graph::{Graph, GraphId};
use crate::value::AttrValue;

pub use bfs_iter::{BfsIter, BfsVisit};

/// Per-scope view identity shared by every view created within one generation.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ViewState {
    graph: GraphId,
    kind: ElementKind,
    generation: u64,
}

impl ViewState {
    pub(crate) fn new(graph: GraphId, kind: ElementKind, generation: u64) -> Self {
        Self {
            graph,
            kind,
            generation,
        }
    }

    fn handle(&self) -> SeqHandle {
        SeqHandle {
            graph: self.graph,
            kind: self.kind,
            generation: self.generation,
        }
    }
}

/// Detached view: remembers which graph, scope and generation it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeqHandle {
    graph: GraphId,
    kind: ElementKind,
    generation: u64,
}

impl SeqHandle {
    pub fn graph(&self) -> GraphId {
        self.graph
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

macro_rules! shared_view_methods {
    ($kind:expr) => {
        pub fn graph(&self) -> &'g Graph {
            self.graph
        }

        pub fn len(&self) -> usize {
            self.graph.attributes().count($kind)
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        /// Whole attribute array.
        pub fn attribute(&self, key: &str) -> GraphResult<&'g [AttrValue]> {
            self.graph.attributes().get_array($kind, key)
        }

        pub fn get<S: Into<Selector>>(&self, key: &str, selector: S) -> GraphResult<Reply<AttrValue>> {
            self.graph.element_attr_at($kind, key, selector.into())
        }

        pub fn attribute_names(&self) -> Vec<&'g str> {
            self.graph.attributes().keys($kind)
        }

        pub fn detach(&self) -> SeqHandle {
            self.state.handle()
        }

        /// True when both views share the same cached state.
        pub fn same_view(&self, other: &Self) -> bool {
            Arc::ptr_eq(&self.state, &other.state)
        }
    };
}

#[derive(Clone, Debug)]
pub struct VertexSeq<'g> {
    graph: &'g Graph,
    state: Arc<ViewState>,
}

impl<'g> VertexSeq<'g> {
    shared_view_methods!(ElementKind::Vertex);

    pub fn degree<S: Into<Selector>>(
        &self,
        selector: S,
        mode: NeighborMode,
        loops: bool,
    ) -> GraphResult<Reply<usize>> {
        self.graph.degree(selector, mode, loops)
    }
}

#[derive(Clone, Debug)]
pub struct EdgeSeq<'g> {
    graph: &'g Graph,
    state: Arc<ViewState>,
}

impl<'g> EdgeSeq<'g> {
    shared_view_methods!(ElementKind::Edge);

    /// `(source, target)` of the selected edges.
    pub fn endpoints<S: Into<Selector>>(&self, selector: S) -> GraphResult<Reply<(usize, usize)>> {
        let resolved = selector.into().resolve(self.len(), "edge")?;
        let native = self.graph.native()?;
        let pairs = resolved
            .indices()
            .iter()
            .map(|&eid| native.edge(eid))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(resolved.reply(pairs))
    }

    /// First edge id joining `a` and `b` in either direction.
    pub fn find(&self, a: usize, b: usize) -> GraphResult<usize> {
        self.graph.check_vertex(a)?;
        self.graph.check_vertex(b)?;
        Ok(ops::get_eid(self.graph.native()?, a, b, false)?)
    }
}

/// Attribute-writing view over one scope.
#[derive(Debug)]
pub struct SeqMut<'g> {
    graph: &'g mut Graph,
    kind: ElementKind,
}

impl SeqMut<'_> {
    pub fn len(&self) -> usize {
        self.graph.attributes().count(self.kind)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn set<K: Into<String>, S: Into<Selector>>(
        &mut self,
        key: K,
        selector: S,
        values: Vec<AttrValue>,
    ) -> GraphResult<()> {
        self.graph
            .set_element_attr_at(self.kind, key.into(), selector.into(), values)
    }

    /// Replaces the whole array.
    pub fn set_all<K: Into<String>>(&mut self, key: K, values: Vec<AttrValue>) -> GraphResult<()> {
        self.graph.replace_element_attr(self.kind, key.into(), values)
    }

    pub fn delete(&mut self, key: &str) -> GraphResult<Vec<AttrValue>> {
        match self.kind {
            ElementKind::Vertex => self.graph.delete_vertex_attr(key),
            ElementKind::Edge => self.graph.delete_edge_attr(key),
        }
    }
}

impl Graph {
    pub fn vs(&self) -> VertexSeq<'_> {
        VertexSeq {
            graph: self,
            state: self.view_state(ElementKind::Vertex),
        }
    }

    pub fn es(&self) -> EdgeSeq<'_> {
        EdgeSeq {
            graph: self,
            state: self.view_state(ElementKind::Edge),
        }
    }

    pub fn vs_mut(&mut self) -> SeqMut<'_> {
        SeqMut {
            graph: self,
            kind: ElementKind::Vertex,
        }
    }

    pub fn es_mut(&mut self) -> SeqMut<'_> {
        SeqMut {
            graph: self,
            kind: ElementKind::Edge,
        }
    }

    fn check_handle(&self, handle: &SeqHandle, kind: ElementKind) -> GraphResult<()> {
        if handle.kind != kind {
            return Err(GraphError::stale_view(format!(
                "handle is a {} sequence, not a {} sequence",
                handle.kind.name(),
                kind.name()
            )));
        }
        if handle.graph != self.id() {
            return Err(GraphError::stale_view(format!(
                "handle belongs to {}, not {}",
                handle.graph,
                self.id()
            )));
        }
        if handle.generation != self.generation() {
            return Err(GraphError::stale_view(format!(
                "{} changed structure since the view was taken (generation {} -> {})",
                self.id(),
                handle.generation,
                self.generation()
            )));
        }
        Ok(())
    }

    pub fn bind_vertices(&self, handle: &SeqHandle) -> GraphResult<VertexSeq<'_>> {
        self.check_handle(handle, ElementKind::Vertex)?;
        Ok(self.vs())
    }

    pub fn bind_edges(&self, handle: &SeqHandle) -> GraphResult<EdgeSeq<'_>> {
        self.check_handle(handle, ElementKind::Edge)?;
        Ok(self.es())
    }
}
