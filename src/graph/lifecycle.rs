//! Release, finalizers and reference traversal for graph handles.

use std::{
    ops::ControlFlow,
    sync::{Arc, Weak},
};

use tracing::{debug, trace};

use super::{Graph, GraphId};
use crate::errors::{GraphError, GraphResult};
use crate::value::{AttrValue, OpaqueValue};

/// Runs once with the id of the graph being released.
pub type Finalizer = Box<dyn FnOnce(GraphId) + Send>;

/// Host callable that can be stored inside an [`OpaqueValue`] and registered
/// as a finalizer.
pub type HostCallable = Arc<dyn Fn(GraphId) + Send + Sync>;

/// A host reference held by a graph, as reported by [`Graph::traverse`].
#[derive(Debug, Clone, Copy)]
pub enum HostRef<'a> {
    Finalizer,
    GraphAttribute { key: &'a str, value: &'a OpaqueValue },
}

/// Non-owning back-reference to a graph handle.
///
/// Finalizers receive a [`GraphId`], never the graph itself; code that needs
/// to remember a graph without keeping it alive holds one of these.
#[derive(Clone, Debug)]
pub struct WeakGraph {
    id: GraphId,
    alive: Weak<()>,
}

impl WeakGraph {
    pub fn id(&self) -> GraphId {
        self.id
    }

    /// False once the graph has been destroyed or dropped.
    pub fn is_alive(&self) -> bool {
        self.alive.strong_count() > 0
    }
}

impl Graph {
    pub fn downgrade(&self) -> WeakGraph {
        WeakGraph {
            id: self.id,
            alive: self.liveness.as_ref().map_or_else(Weak::new, Arc::downgrade),
        }
    }

    /// Installs `finalizer` to run after the engine graph is released. Weak
    /// handles still report the graph alive while it runs.
    /// Returns the previously installed finalizer without running it.
    pub fn register_finalizer<F>(&mut self, finalizer: F) -> Option<Finalizer>
    where
        F: FnOnce(GraphId) + Send + 'static,
    {
        self.finalizer.replace(Box::new(finalizer))
    }

    /// Host-value form of [`Graph::register_finalizer`]: the value must be an
    /// opaque [`HostCallable`].
    pub fn register_finalizer_value(&mut self, value: &AttrValue) -> GraphResult<Option<Finalizer>> {
        let callable = value
            .as_opaque()
            .and_then(|opaque| opaque.downcast_ref::<HostCallable>())
            .cloned()
            .ok_or_else(|| {
                GraphError::validation(format!(
                    "finalizer must be callable, got {}",
                    value.type_name()
                ))
            })?;
        Ok(self.register_finalizer(move |id| callable(id)))
    }

    pub fn has_finalizer(&self) -> bool {
        self.finalizer.is_some()
    }

    /// Reports every host reference the graph holds: the finalizer and the
    /// opaque values in graph-scope attributes. Stops early on `Break`.
    pub fn traverse<'a, B>(
        &'a self,
        mut visit: impl FnMut(HostRef<'a>) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        if self.finalizer.is_some() {
            visit(HostRef::Finalizer)?;
        }
        for (key, value) in self.attrs.graph_opaques() {
            visit(HostRef::GraphAttribute { key, value })?;
        }
        ControlFlow::Continue(())
    }

    /// Drops every host reference the graph holds so reference cycles
    /// through it can be collected. Safe to call repeatedly.
    pub fn clear(&mut self) {
        if self.finalizer.take().is_some() {
            trace!(graph = %self.id, "finalizer cleared");
        }
        self.attrs.clear_graph_scope();
    }

    /// Releases the engine graph now and runs the finalizer. Returns whether a
    /// finalizer ran.
    pub fn destroy(mut self) -> bool {
        self.release()
    }

    pub fn is_released(&self) -> bool {
        self.native.is_none()
    }

    fn release(&mut self) -> bool {
        let Some(native) = self.native.take() else {
            return false;
        };
        drop(native);
        debug!(graph = %self.id, "engine graph released");
        let finalizer = self.finalizer.take();
        let ran = finalizer.is_some();
        if let Some(finalizer) = finalizer {
            finalizer(self.id);
        }
        for cell in &mut self.views {
            cell.take();
        }
        self.liveness = None;
        ran
    }
}

impl Drop for Graph {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn destroy_runs_finalizer_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let mut graph = Graph::new(3, false).expect("graph");
        graph.register_finalizer(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        assert!(graph.destroy());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn destroy_without_finalizer_reports_false() {
        let graph = Graph::new(1, false).expect("graph");
        assert!(!graph.destroy());
    }

    #[test]
    fn replaced_finalizer_is_returned_not_run() {
        let mut graph = Graph::new(1, false).expect("graph");
        assert!(graph.register_finalizer(|_| {}).is_none());
        assert!(graph.register_finalizer(|_| {}).is_some());
    }

    #[test]
    fn weak_handle_tracks_liveness() {
        let graph = Graph::new(2, true).expect("graph");
        let weak = graph.downgrade();
        assert!(weak.is_alive());
        drop(graph);
        assert!(!weak.is_alive());
    }
}
