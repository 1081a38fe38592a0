//! Argument parsing and command execution for the `graphbind` binary.

use std::{io::Write, path::PathBuf};

use crate::{
    AttrValue, Capacity, Graph, GraphError, GraphResult, NeighborMode, conversion::Selector,
    integrity,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    Edgelist,
    Ncol,
    Lgl,
    Pajek,
    Dimacs,
}

impl InputFormat {
    fn parse(value: &str) -> Result<Self, String> {
        match value {
            "edgelist" => Ok(Self::Edgelist),
            "ncol" => Ok(Self::Ncol),
            "lgl" => Ok(Self::Lgl),
            "pajek" => Ok(Self::Pajek),
            "dimacs" => Ok(Self::Dimacs),
            other => Err(format!("unsupported input format {other}")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Edgelist,
    Ncol,
    Lgl,
    Graphml,
    Dimacs,
}

impl OutputFormat {
    fn parse(value: &str) -> Result<Self, String> {
        match value {
            "edgelist" => Ok(Self::Edgelist),
            "ncol" => Ok(Self::Ncol),
            "lgl" => Ok(Self::Lgl),
            "graphml" => Ok(Self::Graphml),
            "dimacs" => Ok(Self::Dimacs),
            other => Err(format!("unsupported output format {other}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Summary,
    Degrees,
    Convert { output: PathBuf, to: OutputFormat },
    Integrity,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLineConfig {
    pub input: PathBuf,
    pub format: InputFormat,
    pub directed: bool,
    pub command: Command,
}

impl CommandLineConfig {
    pub fn from_args(args: &[&str]) -> Result<Self, String> {
        let mut input = None;
        let mut format = InputFormat::Edgelist;
        let mut directed = false;
        let mut command = String::from("summary");
        let mut output = None;
        let mut to = None;
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            let mut value = |flag: &str| {
                iter.next()
                    .map(|v| v.to_string())
                    .ok_or_else(|| format!("{flag} requires a value"))
            };
            match *arg {
                "--input" | "-i" => input = Some(PathBuf::from(value("--input")?)),
                "--format" => format = InputFormat::parse(&value("--format")?)?,
                "--directed" => directed = true,
                "--command" => command = value("--command")?,
                "--output" | "-o" => output = Some(PathBuf::from(value("--output")?)),
                "--to" => to = Some(OutputFormat::parse(&value("--to")?)?),
                other if other.starts_with('-') => {
                    return Err(format!("unknown flag {other}"));
                }
                other => command = other.to_string(),
            }
        }
        let input = input.ok_or_else(|| "--input is required".to_string())?;
        let command = match command.as_str() {
            "summary" => Command::Summary,
            "degrees" => Command::Degrees,
            "integrity" => Command::Integrity,
            "convert" => Command::Convert {
                output: output.ok_or_else(|| "convert requires --output".to_string())?,
                to: to.ok_or_else(|| "convert requires --to".to_string())?,
            },
            other => return Err(format!("unknown command {other}")),
        };
        Ok(Self {
            input,
            format,
            directed,
            command,
        })
    }

    pub fn help() -> &'static str {
        "Usage: graphbind --input PATH [--format edgelist|ncol|lgl|pajek|dimacs] [--directed]\n\
         \x20      [--command summary|degrees|integrity|convert] [--output PATH --to edgelist|ncol|lgl|graphml|dimacs]\n"
    }
}

/// Reads the input graph. DIMACS source, target and capacities are kept as
/// graph and edge attributes so a later conversion can write them back.
pub fn load_input(config: &CommandLineConfig) -> GraphResult<Graph> {
    let path = &config.input;
    match config.format {
        InputFormat::Edgelist => Graph::read_edgelist(path, config.directed),
        InputFormat::Ncol => Graph::read_ncol(path, true, true, config.directed),
        InputFormat::Lgl => Graph::read_lgl(path, true, true),
        InputFormat::Pajek => Graph::read_pajek(path),
        InputFormat::Dimacs => {
            let data = Graph::read_dimacs(path, config.directed)?;
            let mut graph = data.graph;
            graph.set_graph_attr("source", data.source as i64);
            graph.set_graph_attr("target", data.target as i64);
            graph.set_edge_attr("capacity", data.capacity.into_iter().map(AttrValue::Float).collect())?;
            Ok(graph)
        }
    }
}

fn has_key(keys: &[&str], key: &str) -> bool {
    keys.contains(&key)
}

fn endpoint(graph: &Graph, key: &str, fallback: usize) -> usize {
    graph
        .graph_attr(key)
        .ok()
        .and_then(AttrValue::as_int)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(fallback)
}

pub fn run<W: Write>(config: &CommandLineConfig, out: &mut W) -> GraphResult<()> {
    let graph = load_input(config)?;
    let io_err = |e| GraphError::resource("<stdout>", e);
    match &config.command {
        Command::Summary => {
            writeln!(out, "{graph}").map_err(io_err)?;
            writeln!(
                out,
                "vertices={} edges={} directed={}",
                graph.vcount(),
                graph.ecount(),
                graph.is_directed()
            )
            .map_err(io_err)?;
            writeln!(out, "vertex_attributes={}", graph.vertex_attr_names().join(","))
                .map_err(io_err)?;
            writeln!(out, "edge_attributes={}", graph.edge_attr_names().join(","))
                .map_err(io_err)?;
        }
        Command::Degrees => {
            let degrees = graph
                .degree(Selector::All, NeighborMode::All, true)?
                .into_vec();
            for (vid, degree) in degrees.into_iter().enumerate() {
                writeln!(out, "{vid} {degree}").map_err(io_err)?;
            }
        }
        Command::Integrity => {
            let report = integrity::check_consistency(&graph)?;
            let json = serde_json::to_string(&report)
                .map_err(|e| GraphError::validation(format!("cannot encode report: {e}")))?;
            writeln!(out, "{json}").map_err(io_err)?;
        }
        Command::Convert { output, to } => {
            let vertex_keys = graph.vertex_attr_names();
            let edge_keys = graph.edge_attr_names();
            let names = has_key(&vertex_keys, "name").then_some("name");
            let weights = has_key(&edge_keys, "weight").then_some("weight");
            match to {
                OutputFormat::Edgelist => graph.write_edgelist(output)?,
                OutputFormat::Ncol => graph.write_ncol(output, names, weights)?,
                OutputFormat::Lgl => graph.write_lgl(output, names, weights, true)?,
                OutputFormat::Graphml => graph.write_graphml(output)?,
                OutputFormat::Dimacs => {
                    let capacity = if has_key(&edge_keys, "capacity") {
                        Capacity::Attribute("capacity".to_string())
                    } else {
                        Capacity::Unit
                    };
                    let source = endpoint(&graph, "source", 0);
                    let target = endpoint(&graph, "target", graph.vcount().saturating_sub(1));
                    graph.write_dimacs(output, source, target, &capacity)?;
                }
            }
            writeln!(out, "wrote {}", output.display()).map_err(io_err)?;
        }
    }
    Ok(())
}
