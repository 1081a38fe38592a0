//! File readers and writers.
//!
//! The path is opened here; failures to open or create it are resource
//! errors. Parsing and formatting happen in the engine on the opened stream.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use tracing::info;

use super::{Capacity, Graph};
use crate::attributes::ElementKind;
use crate::config::GraphConfig;
use crate::conversion::{float_buffer, floats_to_values};
use crate::engine::{
    NativeGraph,
    formats::{self, GraphmlDomain, GraphmlKey, GraphmlType, NamedGraph},
};
use crate::error_bridge::resource_error;
use crate::errors::GraphResult;
use crate::value::AttrValue;

/// A flow problem read from a DIMACS file.
#[derive(Debug)]
pub struct DimacsData {
    pub graph: Graph,
    pub source: usize,
    pub target: usize,
    pub capacity: Vec<f64>,
}

fn open_reader(path: &Path) -> GraphResult<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| resource_error(path, e))
}

fn create_writer(path: &Path) -> GraphResult<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| resource_error(path, e))
}

fn text_values(names: Vec<String>) -> Vec<AttrValue> {
    names.into_iter().map(AttrValue::Text).collect()
}

impl Graph {
    fn from_file(native: NativeGraph, path: &Path, format: &str) -> Graph {
        let graph = Graph::from_native(native, GraphConfig::default());
        info!(
            path = %path.display(),
            format,
            vertices = graph.vcount(),
            edges = graph.ecount(),
            "graph read"
        );
        graph
    }

    fn from_named(named: NamedGraph, path: &Path, format: &str, name_key: &str) -> GraphResult<Graph> {
        let mut graph = Graph::from_file(named.graph, path, format);
        if let Some(names) = named.names {
            graph.replace_element_attr(ElementKind::Vertex, name_key.to_string(), text_values(names))?;
        }
        if let Some(weights) = named.weights {
            graph.replace_element_attr(
                ElementKind::Edge,
                "weight".to_string(),
                floats_to_values(&weights),
            )?;
        }
        Ok(graph)
    }

    /// Whitespace-separated zero-based vertex pairs.
    pub fn read_edgelist<P: AsRef<Path>>(path: P, directed: bool) -> GraphResult<Graph> {
        let path = path.as_ref();
        let native = formats::read_edgelist(open_reader(path)?, directed)?;
        Ok(Graph::from_file(native, path, "edgelist"))
    }

    /// Symbolic names go to the `name` vertex attribute and weights to the
    /// `weight` edge attribute, each only when requested.
    pub fn read_ncol<P: AsRef<Path>>(
        path: P,
        names: bool,
        weights: bool,
        directed: bool,
    ) -> GraphResult<Graph> {
        let path = path.as_ref();
        let named = formats::read_ncol(open_reader(path)?, names, weights, directed)?;
        Graph::from_named(named, path, "ncol", "name")
    }

    pub fn read_lgl<P: AsRef<Path>>(path: P, names: bool, weights: bool) -> GraphResult<Graph> {
        let path = path.as_ref();
        let named = formats::read_lgl(open_reader(path)?, names, weights)?;
        Graph::from_named(named, path, "lgl", "name")
    }

    /// Vertex labels, when present, are stored under `id`.
    pub fn read_pajek<P: AsRef<Path>>(path: P) -> GraphResult<Graph> {
        let path = path.as_ref();
        let named = formats::read_pajek(open_reader(path)?)?;
        Graph::from_named(named, path, "pajek", "id")
    }

    pub fn read_graphml<P: AsRef<Path>>(path: P, index: usize) -> GraphResult<Graph> {
        let path = path.as_ref();
        let native = formats::read_graphml(open_reader(path)?, index)?;
        Ok(Graph::from_file(native, path, "graphml"))
    }

    pub fn read_dimacs<P: AsRef<Path>>(path: P, directed: bool) -> GraphResult<DimacsData> {
        let path = path.as_ref();
        let dimacs = formats::read_dimacs(open_reader(path)?, directed)?;
        Ok(DimacsData {
            graph: Graph::from_file(dimacs.graph, path, "dimacs"),
            source: dimacs.source,
            target: dimacs.target,
            capacity: dimacs.capacity,
        })
    }

    fn name_column(&self, key: Option<&str>) -> GraphResult<Option<Vec<String>>> {
        key.map(|key| {
            self.vertex_attr(key).map(|values| {
                values
                    .iter()
                    .map(|value| match value {
                        AttrValue::Text(text) => text.clone(),
                        other => other.to_string(),
                    })
                    .collect()
            })
        })
        .transpose()
    }

    fn weight_column(&self, key: Option<&str>) -> GraphResult<Option<Vec<f64>>> {
        match key {
            Some(key) => Ok(Some(float_buffer(self.edge_attr(key)?)?)),
            None => Ok(None),
        }
    }

    fn wrote(&self, path: &Path, format: &str) {
        info!(
            graph = %self.id,
            path = %path.display(),
            format,
            vertices = self.vcount(),
            edges = self.ecount(),
            "graph written"
        );
    }

    pub fn write_edgelist<P: AsRef<Path>>(&self, path: P) -> GraphResult<()> {
        let path = path.as_ref();
        formats::write_edgelist(self.native()?, create_writer(path)?)?;
        self.wrote(path, "edgelist");
        Ok(())
    }

    /// `names` and `weights` name the vertex and edge attributes to write.
    pub fn write_ncol<P: AsRef<Path>>(
        &self,
        path: P,
        names: Option<&str>,
        weights: Option<&str>,
    ) -> GraphResult<()> {
        let path = path.as_ref();
        let names = self.name_column(names)?;
        let weights = self.weight_column(weights)?;
        formats::write_ncol(
            self.native()?,
            names.as_deref(),
            weights.as_deref(),
            create_writer(path)?,
        )?;
        self.wrote(path, "ncol");
        Ok(())
    }

    pub fn write_lgl<P: AsRef<Path>>(
        &self,
        path: P,
        names: Option<&str>,
        weights: Option<&str>,
        isolates: bool,
    ) -> GraphResult<()> {
        let path = path.as_ref();
        let names = self.name_column(names)?;
        let weights = self.weight_column(weights)?;
        formats::write_lgl(
            self.native()?,
            names.as_deref(),
            weights.as_deref(),
            isolates,
            create_writer(path)?,
        )?;
        self.wrote(path, "lgl");
        Ok(())
    }

    pub fn write_dimacs<P: AsRef<Path>>(
        &self,
        path: P,
        source: usize,
        target: usize,
        capacity: &Capacity,
    ) -> GraphResult<()> {
        let path = path.as_ref();
        self.check_vertex(source)?;
        self.check_vertex(target)?;
        let capacity = self.capacities(capacity)?;
        formats::write_dimacs(self.native()?, source, target, &capacity, create_writer(path)?)?;
        self.wrote(path, "dimacs");
        Ok(())
    }

    /// Writes every attribute scope. Opaque values are skipped.
    pub fn write_graphml<P: AsRef<Path>>(&self, path: P) -> GraphResult<()> {
        let path = path.as_ref();
        let mut keys = Vec::new();
        for (name, value) in self.attrs.graph_entries() {
            keys.push(graphml_key(name, GraphmlDomain::Graph, std::slice::from_ref(value)));
        }
        for (name, values) in self.attrs.array_entries(ElementKind::Vertex) {
            keys.push(graphml_key(name, GraphmlDomain::Node, values));
        }
        for (name, values) in self.attrs.array_entries(ElementKind::Edge) {
            keys.push(graphml_key(name, GraphmlDomain::Edge, values));
        }
        formats::write_graphml(self.native()?, &keys, create_writer(path)?)?;
        self.wrote(path, "graphml");
        Ok(())
    }
}

fn graphml_type(values: &[AttrValue]) -> GraphmlType {
    let present = || values.iter().filter(|v| !v.is_null());
    if present().all(|v| matches!(v, AttrValue::Bool(_))) {
        GraphmlType::Boolean
    } else if present().all(|v| matches!(v, AttrValue::Int(_))) {
        GraphmlType::Long
    } else if present().all(|v| matches!(v, AttrValue::Int(_) | AttrValue::Float(_))) {
        GraphmlType::Double
    } else {
        GraphmlType::String
    }
}

fn graphml_key(name: &str, domain: GraphmlDomain, values: &[AttrValue]) -> GraphmlKey {
    GraphmlKey {
        name: name.to_string(),
        domain,
        kind: graphml_type(values),
        values: values
            .iter()
            .map(|value| match value {
                AttrValue::Null | AttrValue::Opaque(_) => None,
                other => Some(other.to_string()),
            })
            .collect(),
    }
}
