use std::fmt;

use thiserror::Error;

use super::stats;

/// Status codes reported by engine calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Failure,
    NoMemory,
    InvalidValue,
    InvalidVertex,
    InvalidEdge,
    InvalidMode,
    ParseError,
    FileError,
    Unimplemented,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Failure => "failure",
            ErrorCode::NoMemory => "no_memory",
            ErrorCode::InvalidValue => "invalid_value",
            ErrorCode::InvalidVertex => "invalid_vertex",
            ErrorCode::InvalidEdge => "invalid_edge",
            ErrorCode::InvalidMode => "invalid_mode",
            ErrorCode::ParseError => "parse_error",
            ErrorCode::FileError => "file_error",
            ErrorCode::Unimplemented => "unimplemented",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure returned by an engine call, produced at the call site.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct EngineFailure {
    pub code: ErrorCode,
    pub message: String,
}

impl EngineFailure {
    pub fn new<T: Into<String>>(code: ErrorCode, message: T) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_value<T: Into<String>>(message: T) -> Self {
        Self::new(ErrorCode::InvalidValue, message)
    }

    pub fn invalid_vertex(id: usize, vertex_count: usize) -> Self {
        Self::new(
            ErrorCode::InvalidVertex,
            format!("vertex {id} out of range (vertex count {vertex_count})"),
        )
    }

    pub fn invalid_edge(id: usize, edge_count: usize) -> Self {
        Self::new(
            ErrorCode::InvalidEdge,
            format!("edge {id} out of range (edge count {edge_count})"),
        )
    }

    pub fn parse<T: Into<String>>(line: usize, message: T) -> Self {
        Self::new(
            ErrorCode::ParseError,
            format!("line {line}: {}", message.into()),
        )
    }

    pub fn unimplemented<T: Into<String>>(message: T) -> Self {
        Self::new(ErrorCode::Unimplemented, message)
    }
}

impl From<std::io::Error> for EngineFailure {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorCode::FileError, err.to_string())
    }
}

pub type EngineResult<T> = Result<T, EngineFailure>;

/// Largest vertex count the engine accepts. Per-vertex buffers stay far from
/// the allocator's size limit below it.
pub const MAX_VERTICES: usize = 1 << 30;

pub(crate) fn check_vertex_limit(count: usize) -> EngineResult<()> {
    if count > MAX_VERTICES {
        Err(EngineFailure::invalid_value(format!(
            "vertex count {count} exceeds the engine limit of {MAX_VERTICES}"
        )))
    } else {
        Ok(())
    }
}

/// Which incident edges a neighborhood query follows. Ignored on undirected graphs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NeighborMode {
    Out,
    In,
    #[default]
    All,
}

/// Surviving old indices, in new index order, after a renumbering operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Renumbering {
    pub vertices: Vec<usize>,
    pub edges: Vec<usize>,
}

/// Engine-owned graph structure.
///
/// Every instance is created through [`super::ops::create`] or
/// [`super::ops::copy`] and counted by [`super::stats`]; dropping it is
/// the release.
#[derive(Debug)]
pub struct NativeGraph {
    pub(crate) vertices: usize,
    pub(crate) directed: bool,
    pub(crate) from: Vec<usize>,
    pub(crate) to: Vec<usize>,
}

impl NativeGraph {
    pub(crate) fn allocate(vertices: usize, directed: bool, edge_capacity: usize) -> Self {
        stats::record_allocation();
        Self {
            vertices,
            directed,
            from: Vec::with_capacity(edge_capacity),
            to: Vec::with_capacity(edge_capacity),
        }
    }

    pub fn vcount(&self) -> usize {
        self.vertices
    }

    pub fn ecount(&self) -> usize {
        self.from.len()
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn edge(&self, eid: usize) -> EngineResult<(usize, usize)> {
        match (self.from.get(eid), self.to.get(eid)) {
            (Some(&a), Some(&b)) => Ok((a, b)),
            _ => Err(EngineFailure::invalid_edge(eid, self.ecount())),
        }
    }

    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.from.iter().copied().zip(self.to.iter().copied())
    }

    pub(crate) fn check_vertex(&self, vid: usize) -> EngineResult<()> {
        if vid < self.vertices {
            Ok(())
        } else {
            Err(EngineFailure::invalid_vertex(vid, self.vertices))
        }
    }

    pub(crate) fn effective_mode(&self, mode: NeighborMode) -> NeighborMode {
        if self.directed {
            mode
        } else {
            NeighborMode::All
        }
    }

    /// Neighbor lists in edge order. A loop appears twice under `All`.
    pub(crate) fn neighbor_lists(&self, mode: NeighborMode) -> Vec<Vec<usize>> {
        let mut lists = vec![Vec::new(); self.vertices];
        let mode = self.effective_mode(mode);
        for (a, b) in self.edges() {
            match mode {
                NeighborMode::Out => lists[a].push(b),
                NeighborMode::In => lists[b].push(a),
                NeighborMode::All => {
                    lists[a].push(b);
                    lists[b].push(a);
                }
            }
        }
        lists
    }
}

impl Drop for NativeGraph {
    fn drop(&mut self) {
        stats::record_release();
    }
}
