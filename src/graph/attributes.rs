use super::Graph;
use crate::attributes::{AttributeStore, ElementKind};
use crate::conversion::{Reply, Selector};
use crate::errors::GraphResult;
use crate::value::AttrValue;

impl Graph {
    /// Read-only view of every attribute scope.
    pub fn attributes(&self) -> &AttributeStore {
        &self.attrs
    }

    pub fn graph_attr(&self, key: &str) -> GraphResult<&AttrValue> {
        self.attrs.get_graph(key)
    }

    pub fn set_graph_attr<K: Into<String>, V: Into<AttrValue>>(&mut self, key: K, value: V) {
        self.attrs.set_graph(key, value.into());
    }

    pub fn delete_graph_attr(&mut self, key: &str) -> GraphResult<AttrValue> {
        self.attrs.delete_graph(key)
    }

    pub fn graph_attr_names(&self) -> Vec<&str> {
        self.attrs.graph_keys()
    }

    pub fn vertex_attr(&self, key: &str) -> GraphResult<&[AttrValue]> {
        self.attrs.get_array(ElementKind::Vertex, key)
    }

    pub fn edge_attr(&self, key: &str) -> GraphResult<&[AttrValue]> {
        self.attrs.get_array(ElementKind::Edge, key)
    }

    /// Values for the selected vertices, shaped like the selection.
    pub fn vertex_attr_at<S: Into<Selector>>(
        &self,
        key: &str,
        selector: S,
    ) -> GraphResult<Reply<AttrValue>> {
        self.element_attr_at(ElementKind::Vertex, key, selector.into())
    }

    pub fn edge_attr_at<S: Into<Selector>>(
        &self,
        key: &str,
        selector: S,
    ) -> GraphResult<Reply<AttrValue>> {
        self.element_attr_at(ElementKind::Edge, key, selector.into())
    }

    /// Replaces the whole vertex array; one value per vertex.
    pub fn set_vertex_attr<K: Into<String>>(
        &mut self,
        key: K,
        values: Vec<AttrValue>,
    ) -> GraphResult<()> {
        self.attrs.set_array(ElementKind::Vertex, key, values)
    }

    pub fn set_edge_attr<K: Into<String>>(
        &mut self,
        key: K,
        values: Vec<AttrValue>,
    ) -> GraphResult<()> {
        self.attrs.set_array(ElementKind::Edge, key, values)
    }

    pub fn set_vertex_attr_at<K: Into<String>, S: Into<Selector>>(
        &mut self,
        key: K,
        selector: S,
        values: Vec<AttrValue>,
    ) -> GraphResult<()> {
        self.set_element_attr_at(ElementKind::Vertex, key.into(), selector.into(), values)
    }

    pub fn set_edge_attr_at<K: Into<String>, S: Into<Selector>>(
        &mut self,
        key: K,
        selector: S,
        values: Vec<AttrValue>,
    ) -> GraphResult<()> {
        self.set_element_attr_at(ElementKind::Edge, key.into(), selector.into(), values)
    }

    pub fn delete_vertex_attr(&mut self, key: &str) -> GraphResult<Vec<AttrValue>> {
        self.attrs.delete_array(ElementKind::Vertex, key)
    }

    pub fn delete_edge_attr(&mut self, key: &str) -> GraphResult<Vec<AttrValue>> {
        self.attrs.delete_array(ElementKind::Edge, key)
    }

    pub fn vertex_attr_names(&self) -> Vec<&str> {
        self.attrs.keys(ElementKind::Vertex)
    }

    pub fn edge_attr_names(&self) -> Vec<&str> {
        self.attrs.keys(ElementKind::Edge)
    }

    pub(crate) fn element_attr_at(
        &self,
        kind: ElementKind,
        key: &str,
        selector: Selector,
    ) -> GraphResult<Reply<AttrValue>> {
        let resolved = selector.resolve(self.attrs.count(kind), kind.name())?;
        self.attrs.get_many(kind, key, &resolved)
    }

    pub(crate) fn set_element_attr_at(
        &mut self,
        kind: ElementKind,
        key: String,
        selector: Selector,
        values: Vec<AttrValue>,
    ) -> GraphResult<()> {
        let resolved = selector.resolve(self.attrs.count(kind), kind.name())?;
        let broadcast = self.config.attributes.broadcast_single_value;
        self.attrs.set_many(kind, key, &resolved, values, broadcast)
    }

    pub(crate) fn replace_element_attr(
        &mut self,
        kind: ElementKind,
        key: String,
        values: Vec<AttrValue>,
    ) -> GraphResult<()> {
        self.attrs.set_array(kind, key, values)
    }
}
