//! JSON-lines dump and restore of a graph with all of its attributes.
//!
//! Opaque attribute values cannot be persisted and are written as null.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::attributes::ElementKind;
use crate::config::GraphConfig;
use crate::engine::ops;
use crate::error_bridge::{check, resource_error};
use crate::errors::{GraphError, GraphResult};
use crate::fault_injection::{self, FaultPoint};
use crate::graph::Graph;
use crate::value::AttrValue;

#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum SnapshotRecord {
    Header {
        vertices: usize,
        directed: bool,
    },
    Edge {
        id: usize,
        from: usize,
        to: usize,
    },
    GraphAttr {
        key: String,
        value: AttrValue,
    },
    VertexAttr {
        key: String,
        values: Vec<AttrValue>,
    },
    EdgeAttr {
        key: String,
        values: Vec<AttrValue>,
    },
}

fn persistable(value: &AttrValue) -> AttrValue {
    match value {
        AttrValue::Opaque(_) => AttrValue::Null,
        AttrValue::List(items) => AttrValue::List(items.iter().map(persistable).collect()),
        other => other.clone(),
    }
}

fn stream_error(source: io::Error) -> GraphError {
    GraphError::resource(PathBuf::from("<stream>"), source)
}

pub fn dump_graph_to_path<P: AsRef<Path>>(graph: &Graph, path: P) -> GraphResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| resource_error(path, e))?;
    dump_graph_to_writer(graph, BufWriter::new(file))?;
    info!(graph = %graph.id(), path = %path.display(), "snapshot written");
    Ok(())
}

pub fn dump_graph_to_writer<W: Write>(graph: &Graph, mut writer: W) -> GraphResult<()> {
    write_record(
        &mut writer,
        &SnapshotRecord::Header {
            vertices: graph.vcount(),
            directed: graph.is_directed(),
        },
    )?;
    for (id, (from, to)) in graph.get_edgelist().into_iter().enumerate() {
        write_record(&mut writer, &SnapshotRecord::Edge { id, from, to })?;
    }
    let store = graph.attributes();
    for (key, value) in store.graph_entries() {
        write_record(
            &mut writer,
            &SnapshotRecord::GraphAttr {
                key: key.to_string(),
                value: persistable(value),
            },
        )?;
    }
    for (key, values) in store.array_entries(ElementKind::Vertex) {
        write_record(
            &mut writer,
            &SnapshotRecord::VertexAttr {
                key: key.to_string(),
                values: values.iter().map(persistable).collect(),
            },
        )?;
    }
    for (key, values) in store.array_entries(ElementKind::Edge) {
        write_record(
            &mut writer,
            &SnapshotRecord::EdgeAttr {
                key: key.to_string(),
                values: values.iter().map(persistable).collect(),
            },
        )?;
    }
    writer.flush().map_err(stream_error)?;
    Ok(())
}

pub fn load_graph_from_path<P: AsRef<Path>>(path: P, config: &GraphConfig) -> GraphResult<Graph> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| resource_error(path, e))?;
    let graph = load_graph_from_reader(BufReader::new(file), config)?;
    info!(graph = %graph.id(), path = %path.display(), "snapshot loaded");
    Ok(graph)
}

/// Builds a new graph from a dump. Nothing is returned unless every record
/// was applied.
pub fn load_graph_from_reader<R: BufRead>(reader: R, config: &GraphConfig) -> GraphResult<Graph> {
    let mut header = None;
    let mut edges: Vec<(usize, usize, usize)> = Vec::new();
    let mut graph_attrs = Vec::new();
    let mut vertex_attrs = Vec::new();
    let mut edge_attrs = Vec::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line.map_err(stream_error)?;
        if line.trim().is_empty() {
            continue;
        }
        let record: SnapshotRecord = serde_json::from_str(&line).map_err(|e| {
            GraphError::validation(format!("snapshot line {}: {e}", number + 1))
        })?;
        match record {
            SnapshotRecord::Header { vertices, directed } => {
                if header.replace((vertices, directed)).is_some() {
                    return Err(GraphError::validation("snapshot has more than one header"));
                }
            }
            SnapshotRecord::Edge { id, from, to } => edges.push((id, from, to)),
            SnapshotRecord::GraphAttr { key, value } => graph_attrs.push((key, value)),
            SnapshotRecord::VertexAttr { key, values } => vertex_attrs.push((key, values)),
            SnapshotRecord::EdgeAttr { key, values } => edge_attrs.push((key, values)),
        }
    }

    let (vertices, directed) =
        header.ok_or_else(|| GraphError::validation("snapshot has no header"))?;
    edges.sort_unstable_by_key(|&(id, _, _)| id);
    let mut flat = Vec::with_capacity(edges.len() * 2);
    for (position, &(id, from, to)) in edges.iter().enumerate() {
        if id != position {
            return Err(GraphError::validation(format!(
                "snapshot edge ids are not contiguous at {id}"
            )));
        }
        if from >= vertices || to >= vertices {
            return Err(GraphError::validation(format!(
                "snapshot edge {id} refers to a vertex outside 0..{vertices}"
            )));
        }
        flat.push(from);
        flat.push(to);
    }

    let native = check(ops::create(
        vertices,
        directed,
        &flat,
        config.engine.reserve_edge_capacity.unwrap_or(0),
    ))?;
    let mut graph = Graph::from_native(native, config.clone());
    for (key, value) in graph_attrs {
        graph.set_graph_attr(key, value);
    }
    for (key, values) in vertex_attrs {
        graph.set_vertex_attr(key, values)?;
    }
    for (key, values) in edge_attrs {
        graph.set_edge_attr(key, values)?;
    }
    fault_injection::check_fault(FaultPoint::SnapshotLoadBeforeCommit)?;
    Ok(graph)
}

/// Replaces the contents of `graph` with a dump. On failure `graph` is left
/// exactly as it was.
pub fn restore_graph_from_reader<R: BufRead>(graph: &mut Graph, reader: R) -> GraphResult<()> {
    let loaded = load_graph_from_reader(reader, graph.config())?;
    graph.adopt(loaded);
    Ok(())
}

fn write_record<W: Write>(writer: &mut W, record: &SnapshotRecord) -> GraphResult<()> {
    let line = serde_json::to_string(record)
        .map_err(|e| GraphError::validation(format!("cannot serialize snapshot record: {e}")))?;
    writer.write_all(line.as_bytes()).map_err(stream_error)?;
    writer.write_all(b"\n").map_err(stream_error)?;
    Ok(())
}
