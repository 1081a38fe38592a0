//! Text format readers and writers working on already-opened streams.

use std::io::{BufRead, Write};

use ahash::AHashMap;

use super::ops::create;
use super::types::{EngineFailure, EngineResult, NativeGraph};

/// Graph read from a format with symbolic vertex names and optional weights.
#[derive(Debug)]
pub struct NamedGraph {
    pub graph: NativeGraph,
    pub names: Option<Vec<String>>,
    pub weights: Option<Vec<f64>>,
}

#[derive(Debug)]
pub struct DimacsGraph {
    pub graph: NativeGraph,
    pub source: usize,
    pub target: usize,
    pub capacity: Vec<f64>,
}

#[derive(Default)]
struct NameTable {
    index: AHashMap<String, usize>,
    names: Vec<String>,
}

impl NameTable {
    fn id(&mut self, name: &str) -> usize {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = self.names.len();
        self.index.insert(name.to_string(), id);
        self.names.push(name.to_string());
        id
    }
}

fn parse_index(token: &str, line: usize) -> EngineResult<usize> {
    token
        .parse::<usize>()
        .map_err(|_| EngineFailure::parse(line, format!("expected vertex index, found {token:?}")))
}

fn parse_weight(token: &str, line: usize) -> EngineResult<f64> {
    token
        .parse::<f64>()
        .map_err(|_| EngineFailure::parse(line, format!("expected number, found {token:?}")))
}

fn one_based(token: &str, line: usize) -> EngineResult<usize> {
    match parse_index(token, line)? {
        0 => Err(EngineFailure::parse(line, "vertex ids start at 1")),
        id => Ok(id - 1),
    }
}

pub fn read_edgelist<R: BufRead>(reader: R, directed: bool) -> EngineResult<NativeGraph> {
    let mut edges = Vec::new();
    let mut last_line = 0;
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        last_line = number + 1;
        for token in line.split_whitespace() {
            edges.push(parse_index(token, last_line)?);
        }
    }
    if edges.len() % 2 != 0 {
        return Err(EngineFailure::parse(
            last_line,
            "edge list ends in the middle of an edge",
        ));
    }
    create(0, directed, &edges, 0)
}

pub fn read_ncol<R: BufRead>(
    reader: R,
    names: bool,
    weights: bool,
    directed: bool,
) -> EngineResult<NamedGraph> {
    let mut table = NameTable::default();
    let mut edges = Vec::new();
    let mut edge_weights = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [] => continue,
            [a, b] => {
                edges.extend([table.id(a), table.id(b)]);
                edge_weights.push(0.0);
            }
            [a, b, w] => {
                edges.extend([table.id(a), table.id(b)]);
                edge_weights.push(parse_weight(w, number + 1)?);
            }
            _ => {
                return Err(EngineFailure::parse(
                    number + 1,
                    "expected two vertex names and an optional weight",
                ));
            }
        }
    }
    let graph = create(table.names.len(), directed, &edges, 0)?;
    Ok(NamedGraph {
        graph,
        names: names.then_some(table.names),
        weights: weights.then_some(edge_weights),
    })
}

pub fn read_lgl<R: BufRead>(reader: R, names: bool, weights: bool) -> EngineResult<NamedGraph> {
    let mut table = NameTable::default();
    let mut edges = Vec::new();
    let mut edge_weights = Vec::new();
    let mut current = None;
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(name) = trimmed.strip_prefix('#') {
            let name = name.trim();
            if name.is_empty() {
                return Err(EngineFailure::parse(number + 1, "vertex name missing after '#'"));
            }
            current = Some(table.id(name));
            continue;
        }
        let from = current.ok_or_else(|| {
            EngineFailure::parse(number + 1, "neighbor listed before any '#' vertex line")
        })?;
        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        let weight = match tokens.as_slice() {
            [_] => 0.0,
            [_, w] => parse_weight(w, number + 1)?,
            _ => {
                return Err(EngineFailure::parse(
                    number + 1,
                    "expected a vertex name and an optional weight",
                ));
            }
        };
        edges.extend([from, table.id(tokens[0])]);
        edge_weights.push(weight);
    }
    let graph = create(table.names.len(), false, &edges, 0)?;
    Ok(NamedGraph {
        graph,
        names: names.then_some(table.names),
        weights: weights.then_some(edge_weights),
    })
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum PajekSection {
    None,
    Vertices,
    Arcs,
    Edges,
}

/// Pajek `*Vertices`, `*Arcs` and `*Edges` sections. Labels come back as `names`.
pub fn read_pajek<R: BufRead>(reader: R) -> EngineResult<NamedGraph> {
    let mut section = PajekSection::None;
    let mut vertices = 0usize;
    let mut labels: Vec<Option<String>> = Vec::new();
    let mut links: Vec<(usize, usize, bool, Option<f64>)> = Vec::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = number + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            continue;
        }
        if let Some(header) = trimmed.strip_prefix('*') {
            let mut parts = header.split_whitespace();
            let keyword = parts.next().unwrap_or_default().to_ascii_lowercase();
            section = match keyword.as_str() {
                "vertices" => {
                    let count = parts
                        .next()
                        .ok_or_else(|| EngineFailure::parse(line_no, "missing vertex count"))?;
                    vertices = parse_index(count, line_no)?;
                    labels = vec![None; vertices];
                    PajekSection::Vertices
                }
                "arcs" => PajekSection::Arcs,
                "edges" => PajekSection::Edges,
                other => {
                    return Err(EngineFailure::unimplemented(format!(
                        "pajek section *{other} is not supported"
                    )));
                }
            };
            continue;
        }
        match section {
            PajekSection::None => {
                return Err(EngineFailure::parse(line_no, "data before *Vertices"));
            }
            PajekSection::Vertices => {
                let (id, rest) = trimmed.split_once(char::is_whitespace).unwrap_or((trimmed, ""));
                let id = one_based(id, line_no)?;
                if id >= vertices {
                    return Err(EngineFailure::parse(line_no, "vertex id exceeds *Vertices count"));
                }
                let rest = rest.trim();
                let label = match rest.strip_prefix('"') {
                    Some(quoted) => quoted.split('"').next().unwrap_or_default(),
                    None => rest.split_whitespace().next().unwrap_or_default(),
                };
                if !label.is_empty() {
                    labels[id] = Some(label.to_string());
                }
            }
            PajekSection::Arcs | PajekSection::Edges => {
                let tokens: Vec<&str> = trimmed.split_whitespace().collect();
                if tokens.len() < 2 {
                    return Err(EngineFailure::parse(line_no, "expected two vertex ids"));
                }
                let a = one_based(tokens[0], line_no)?;
                let b = one_based(tokens[1], line_no)?;
                if a >= vertices || b >= vertices {
                    return Err(EngineFailure::parse(line_no, "vertex id exceeds *Vertices count"));
                }
                let weight = tokens
                    .get(2)
                    .map(|w| parse_weight(w, line_no))
                    .transpose()?;
                links.push((a, b, section == PajekSection::Arcs, weight));
            }
        }
    }

    let directed = links.iter().any(|&(_, _, arc, _)| arc);
    let mut edges = Vec::with_capacity(links.len() * 2);
    let mut weights = Vec::with_capacity(links.len());
    for &(a, b, arc, weight) in &links {
        edges.extend([a, b]);
        weights.push(weight.unwrap_or(1.0));
        if directed && !arc {
            edges.extend([b, a]);
            weights.push(weight.unwrap_or(1.0));
        }
    }
    let has_weights = links.iter().any(|&(_, _, _, w)| w.is_some());
    let has_labels = labels.iter().any(Option::is_some);
    let graph = create(vertices, directed, &edges, 0)?;
    Ok(NamedGraph {
        graph,
        names: has_labels.then(|| {
            labels
                .into_iter()
                .enumerate()
                .map(|(i, label)| label.unwrap_or_else(|| (i + 1).to_string()))
                .collect()
        }),
        weights: has_weights.then_some(weights),
    })
}

pub fn read_dimacs<R: BufRead>(reader: R, directed: bool) -> EngineResult<DimacsGraph> {
    let mut vertices = None;
    let mut source = None;
    let mut target = None;
    let mut edges = Vec::new();
    let mut capacity = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = number + 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [] | ["c", ..] => {}
            ["p", _kind, n, _m] => vertices = Some(parse_index(n, line_no)?),
            ["n", id, "s"] => source = Some(one_based(id, line_no)?),
            ["n", id, "t"] => target = Some(one_based(id, line_no)?),
            ["a", u, v, cap] => {
                edges.extend([one_based(u, line_no)?, one_based(v, line_no)?]);
                capacity.push(parse_weight(cap, line_no)?);
            }
            _ => return Err(EngineFailure::parse(line_no, format!("unrecognized line {line:?}"))),
        }
    }
    let vertices = vertices.ok_or_else(|| EngineFailure::parse(0, "missing problem line"))?;
    let source = source.ok_or_else(|| EngineFailure::parse(0, "missing source vertex"))?;
    let target = target.ok_or_else(|| EngineFailure::parse(0, "missing target vertex"))?;
    if edges.iter().chain([&source, &target]).any(|&v| v >= vertices) {
        return Err(EngineFailure::parse(0, "vertex id exceeds problem line count"));
    }
    let graph = create(vertices, directed, &edges, 0)?;
    Ok(DimacsGraph {
        graph,
        source,
        target,
        capacity,
    })
}

pub fn read_graphml<R: BufRead>(_reader: R, _index: usize) -> EngineResult<NativeGraph> {
    Err(EngineFailure::unimplemented(
        "GraphML reading is not supported by this engine",
    ))
}

pub fn write_edgelist<W: Write>(graph: &NativeGraph, mut writer: W) -> EngineResult<()> {
    for (a, b) in graph.edges() {
        writeln!(writer, "{a} {b}")?;
    }
    writer.flush()?;
    Ok(())
}

fn check_names(graph: &NativeGraph, names: Option<&[String]>) -> EngineResult<()> {
    match names {
        Some(names) if names.len() != graph.vcount() => Err(EngineFailure::invalid_value(
            "name vector length must match the vertex count",
        )),
        _ => Ok(()),
    }
}

fn check_weights(graph: &NativeGraph, weights: Option<&[f64]>) -> EngineResult<()> {
    match weights {
        Some(weights) if weights.len() != graph.ecount() => Err(EngineFailure::invalid_value(
            "weight vector length must match the edge count",
        )),
        _ => Ok(()),
    }
}

fn label(names: Option<&[String]>, vid: usize) -> String {
    names.map_or_else(|| vid.to_string(), |names| names[vid].clone())
}

pub fn write_ncol<W: Write>(
    graph: &NativeGraph,
    names: Option<&[String]>,
    weights: Option<&[f64]>,
    mut writer: W,
) -> EngineResult<()> {
    check_names(graph, names)?;
    check_weights(graph, weights)?;
    for (eid, (a, b)) in graph.edges().enumerate() {
        write!(writer, "{} {}", label(names, a), label(names, b))?;
        if let Some(weights) = weights {
            write!(writer, " {}", weights[eid])?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Each edge is listed under its first endpoint.
pub fn write_lgl<W: Write>(
    graph: &NativeGraph,
    names: Option<&[String]>,
    weights: Option<&[f64]>,
    isolates: bool,
    mut writer: W,
) -> EngineResult<()> {
    check_names(graph, names)?;
    check_weights(graph, weights)?;
    let mut grouped: Vec<Vec<usize>> = vec![Vec::new(); graph.vcount()];
    let mut touched = vec![false; graph.vcount()];
    for (eid, (a, b)) in graph.edges().enumerate() {
        grouped[a].push(eid);
        touched[a] = true;
        touched[b] = true;
    }
    for (v, eids) in grouped.iter().enumerate() {
        if eids.is_empty() && !(isolates && !touched[v]) {
            continue;
        }
        writeln!(writer, "# {}", label(names, v))?;
        for &eid in eids {
            let (_, b) = graph.edge(eid)?;
            write!(writer, "{}", label(names, b))?;
            if let Some(weights) = weights {
                write!(writer, " {}", weights[eid])?;
            }
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn write_dimacs<W: Write>(
    graph: &NativeGraph,
    source: usize,
    target: usize,
    capacity: &[f64],
    mut writer: W,
) -> EngineResult<()> {
    graph.check_vertex(source)?;
    graph.check_vertex(target)?;
    check_weights(graph, Some(capacity))?;
    writeln!(writer, "c created by graphbind")?;
    writeln!(writer, "p max {} {}", graph.vcount(), graph.ecount())?;
    writeln!(writer, "n {} s", source + 1)?;
    writeln!(writer, "n {} t", target + 1)?;
    for ((a, b), cap) in graph.edges().zip(capacity) {
        writeln!(writer, "a {} {} {}", a + 1, b + 1, cap)?;
    }
    writer.flush()?;
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphmlDomain {
    Graph,
    Node,
    Edge,
}

impl GraphmlDomain {
    fn as_str(self) -> &'static str {
        match self {
            GraphmlDomain::Graph => "graph",
            GraphmlDomain::Node => "node",
            GraphmlDomain::Edge => "edge",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphmlType {
    Boolean,
    Long,
    Double,
    String,
}

impl GraphmlType {
    fn as_str(self) -> &'static str {
        match self {
            GraphmlType::Boolean => "boolean",
            GraphmlType::Long => "long",
            GraphmlType::Double => "double",
            GraphmlType::String => "string",
        }
    }
}

/// One attribute column; graph-domain keys carry a single value.
#[derive(Clone, Debug)]
pub struct GraphmlKey {
    pub name: String,
    pub domain: GraphmlDomain,
    pub kind: GraphmlType,
    pub values: Vec<Option<String>>,
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

pub fn write_graphml<W: Write>(
    graph: &NativeGraph,
    keys: &[GraphmlKey],
    mut writer: W,
) -> EngineResult<()> {
    writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        writer,
        r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns">"#
    )?;
    for (index, key) in keys.iter().enumerate() {
        let prefix = &key.domain.as_str()[..1];
        writeln!(
            writer,
            r#"  <key id="{prefix}{index}" for="{}" attr.name="{}" attr.type="{}"/>"#,
            key.domain.as_str(),
            escape_xml(&key.name),
            key.kind.as_str()
        )?;
    }
    let edgedefault = if graph.is_directed() { "directed" } else { "undirected" };
    writeln!(writer, r#"  <graph id="G" edgedefault="{edgedefault}">"#)?;

    let write_data = |writer: &mut W, domain: GraphmlDomain, element: usize| -> EngineResult<()> {
        for (index, key) in keys.iter().enumerate() {
            if key.domain != domain {
                continue;
            }
            if let Some(Some(value)) = key.values.get(element) {
                let prefix = &domain.as_str()[..1];
                writeln!(
                    writer,
                    r#"      <data key="{prefix}{index}">{}</data>"#,
                    escape_xml(value)
                )?;
            }
        }
        Ok(())
    };

    write_data(&mut writer, GraphmlDomain::Graph, 0)?;
    for v in 0..graph.vcount() {
        writeln!(writer, r#"    <node id="n{v}">"#)?;
        write_data(&mut writer, GraphmlDomain::Node, v)?;
        writeln!(writer, "    </node>")?;
    }
    for (eid, (a, b)) in graph.edges().enumerate() {
        writeln!(writer, r#"    <edge source="n{a}" target="n{b}">"#)?;
        write_data(&mut writer, GraphmlDomain::Edge, eid)?;
        writeln!(writer, "    </edge>")?;
    }
    writeln!(writer, "  </graph>")?;
    writeln!(writer, "</graphml>")?;
    writer.flush()?;
    Ok(())
}
