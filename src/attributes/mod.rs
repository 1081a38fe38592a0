//! Graph-, vertex- and edge-scoped attribute storage.
//!
//! Keys keep insertion order. Every vertex array holds exactly one value per
//! vertex and every edge array one value per edge; the store is resized and
//! realigned only through [`AttributeStore::grow`] and
//! [`AttributeStore::remap`], which the graph handle calls after the engine
//! reported success.

mod remap;

use std::fmt;

use ahash::RandomState;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::conversion::{Reply, ResolvedSelector};
use crate::errors::{GraphError, GraphResult};
use crate::value::{AttrValue, OpaqueValue};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttrScope {
    Graph,
    Vertex,
    Edge,
}

impl fmt::Display for AttrScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AttrScope::Graph => "graph",
            AttrScope::Vertex => "vertex",
            AttrScope::Edge => "edge",
        })
    }
}

/// Scopes holding one value per element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Vertex,
    Edge,
}

impl ElementKind {
    pub fn scope(self) -> AttrScope {
        match self {
            ElementKind::Vertex => AttrScope::Vertex,
            ElementKind::Edge => AttrScope::Edge,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Vertex => "vertex",
            ElementKind::Edge => "edge",
        }
    }
}

type OrderedMap<V> = IndexMap<String, V, RandomState>;

#[derive(Clone, Debug, Default)]
pub struct AttributeStore {
    graph: OrderedMap<AttrValue>,
    vertex: OrderedMap<Vec<AttrValue>>,
    edge: OrderedMap<Vec<AttrValue>>,
    vertex_count: usize,
    edge_count: usize,
}

impl AttributeStore {
    pub fn new(vertex_count: usize, edge_count: usize) -> Self {
        Self {
            vertex_count,
            edge_count,
            ..Self::default()
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn count(&self, kind: ElementKind) -> usize {
        match kind {
            ElementKind::Vertex => self.vertex_count,
            ElementKind::Edge => self.edge_count,
        }
    }

    /// True when no scope holds a key.
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty() && self.vertex.is_empty() && self.edge.is_empty()
    }

    fn arrays(&self, kind: ElementKind) -> &OrderedMap<Vec<AttrValue>> {
        match kind {
            ElementKind::Vertex => &self.vertex,
            ElementKind::Edge => &self.edge,
        }
    }

    fn arrays_mut(&mut self, kind: ElementKind) -> &mut OrderedMap<Vec<AttrValue>> {
        match kind {
            ElementKind::Vertex => &mut self.vertex,
            ElementKind::Edge => &mut self.edge,
        }
    }

    pub fn get_graph(&self, key: &str) -> GraphResult<&AttrValue> {
        self.graph
            .get(key)
            .ok_or_else(|| GraphError::key_not_found(AttrScope::Graph, key))
    }

    pub fn set_graph<K: Into<String>>(&mut self, key: K, value: AttrValue) {
        self.graph.insert(key.into(), value);
    }

    pub fn delete_graph(&mut self, key: &str) -> GraphResult<AttrValue> {
        self.graph
            .shift_remove(key)
            .ok_or_else(|| GraphError::key_not_found(AttrScope::Graph, key))
    }

    pub fn graph_keys(&self) -> Vec<&str> {
        self.graph.keys().map(String::as_str).collect()
    }

    pub fn get_array(&self, kind: ElementKind, key: &str) -> GraphResult<&[AttrValue]> {
        self.arrays(kind)
            .get(key)
            .map(Vec::as_slice)
            .ok_or_else(|| GraphError::key_not_found(kind.scope(), key))
    }

    /// Replaces the whole array; `values` must hold one entry per element.
    pub fn set_array<K: Into<String>>(
        &mut self,
        kind: ElementKind,
        key: K,
        values: Vec<AttrValue>,
    ) -> GraphResult<()> {
        let expected = self.count(kind);
        if values.len() != expected {
            return Err(GraphError::validation(format!(
                "{} attribute needs {expected} values, got {}",
                kind.name(),
                values.len()
            )));
        }
        self.arrays_mut(kind).insert(key.into(), values);
        Ok(())
    }

    pub fn delete_array(&mut self, kind: ElementKind, key: &str) -> GraphResult<Vec<AttrValue>> {
        self.arrays_mut(kind)
            .shift_remove(key)
            .ok_or_else(|| GraphError::key_not_found(kind.scope(), key))
    }

    pub fn keys(&self, kind: ElementKind) -> Vec<&str> {
        self.arrays(kind).keys().map(String::as_str).collect()
    }

    pub fn get_many(
        &self,
        kind: ElementKind,
        key: &str,
        selection: &ResolvedSelector,
    ) -> GraphResult<Reply<AttrValue>> {
        let values = self.get_array(kind, key)?;
        Ok(selection.reply(
            selection
                .indices()
                .iter()
                .map(|&i| values[i].clone())
                .collect(),
        ))
    }

    /// Assigns `values` to the selected elements, creating the key filled with
    /// nulls if needed. A single value is broadcast when `broadcast` is set.
    pub fn set_many<K: Into<String>>(
        &mut self,
        kind: ElementKind,
        key: K,
        selection: &ResolvedSelector,
        values: Vec<AttrValue>,
        broadcast: bool,
    ) -> GraphResult<()> {
        let single = match values.len() {
            n if n == selection.len() => None,
            1 if broadcast => values.first().cloned(),
            n => {
                return Err(GraphError::validation(format!(
                    "{} selection has {} elements, got {n} values",
                    kind.name(),
                    selection.len()
                )));
            }
        };
        let count = self.count(kind);
        let array = self
            .arrays_mut(kind)
            .entry(key.into())
            .or_insert_with(|| vec![AttrValue::Null; count]);
        match single {
            Some(value) => {
                for &i in selection.indices() {
                    array[i] = value.clone();
                }
            }
            None => {
                for (&i, value) in selection.indices().iter().zip(values) {
                    array[i] = value;
                }
            }
        }
        Ok(())
    }

    /// Appends `additional` null entries to every array of the scope.
    pub fn grow(&mut self, kind: ElementKind, additional: usize) {
        for values in self.arrays_mut(kind).values_mut() {
            remap::grow_array(values, additional);
        }
        match kind {
            ElementKind::Vertex => self.vertex_count += additional,
            ElementKind::Edge => self.edge_count += additional,
        }
    }

    /// Realigns every array of the scope to the engine's origin map.
    pub fn remap(&mut self, kind: ElementKind, origin: &[usize]) {
        for values in self.arrays_mut(kind).values_mut() {
            *values = remap::remap_array(values, origin);
        }
        match kind {
            ElementKind::Vertex => self.vertex_count = origin.len(),
            ElementKind::Edge => self.edge_count = origin.len(),
        }
    }

    /// Drops every graph-scope value.
    pub fn clear_graph_scope(&mut self) {
        self.graph.clear();
    }

    pub(crate) fn graph_entries(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.graph.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn array_entries(
        &self,
        kind: ElementKind,
    ) -> impl Iterator<Item = (&str, &[AttrValue])> {
        self.arrays(kind)
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Graph-scope opaque values, the only attribute entries that can hold host references.
    pub(crate) fn graph_opaques(&self) -> Vec<(&str, &OpaqueValue)> {
        let mut found = Vec::new();
        for (key, value) in &self.graph {
            value.for_each_opaque(&mut |opaque| found.push((key.as_str(), opaque)));
        }
        found
    }

    /// Keys whose array length disagrees with the element count.
    pub fn misaligned(&self, kind: ElementKind) -> Vec<String> {
        let expected = self.count(kind);
        self.arrays(kind)
            .iter()
            .filter(|(_, values)| values.len() != expected)
            .map(|(key, _)| key.clone())
            .collect()
    }
}
