//! Isomorphism classes of graphs with three or four vertices.
//!
//! Classes are numbered by the ascending order of their canonical adjacency
//! code, where the canonical code is the smallest code over all vertex
//! permutations. Multi-edges and loops are ignored.

use std::sync::OnceLock;

use super::types::{EngineFailure, EngineResult, NativeGraph};

struct ClassTable {
    n: usize,
    directed: bool,
    slots: Vec<(usize, usize)>,
    slot_index: Vec<Option<usize>>,
    permutations: Vec<Vec<usize>>,
    canonical: Vec<u32>,
}

impl ClassTable {
    fn build(n: usize, directed: bool) -> Self {
        let mut slots = Vec::new();
        for i in 0..n {
            for j in 0..n {
                if i != j && (directed || i < j) {
                    slots.push((i, j));
                }
            }
        }
        let mut slot_index = vec![None; n * n];
        for (k, &(i, j)) in slots.iter().enumerate() {
            slot_index[i * n + j] = Some(k);
            if !directed {
                slot_index[j * n + i] = Some(k);
            }
        }
        let mut table = Self {
            n,
            directed,
            slots,
            slot_index,
            permutations: permutations(n),
            canonical: Vec::new(),
        };
        let mut canonical: Vec<u32> = (0..1u32 << table.slots.len())
            .map(|code| table.canonical_code(code))
            .collect();
        canonical.sort_unstable();
        canonical.dedup();
        table.canonical = canonical;
        table
    }

    fn canonical_code(&self, code: u32) -> u32 {
        self.permutations
            .iter()
            .map(|perm| {
                let mut permuted = 0u32;
                for (k, &(i, j)) in self.slots.iter().enumerate() {
                    if code & (1 << k) != 0
                        && let Some(target) = self.slot_index[perm[i] * self.n + perm[j]]
                    {
                        permuted |= 1 << target;
                    }
                }
                permuted
            })
            .min()
            .unwrap_or(code)
    }

    fn class_of(&self, code: u32) -> EngineResult<usize> {
        self.canonical
            .binary_search(&self.canonical_code(code))
            .map_err(|_| EngineFailure::invalid_value("adjacency code has no class"))
    }
}

fn permutations(n: usize) -> Vec<Vec<usize>> {
    fn extend(prefix: &mut Vec<usize>, n: usize, out: &mut Vec<Vec<usize>>) {
        if prefix.len() == n {
            out.push(prefix.clone());
            return;
        }
        for v in 0..n {
            if !prefix.contains(&v) {
                prefix.push(v);
                extend(prefix, n, out);
                prefix.pop();
            }
        }
    }
    let mut out = Vec::new();
    extend(&mut Vec::with_capacity(n), n, &mut out);
    out
}

fn table(n: usize, directed: bool) -> EngineResult<&'static ClassTable> {
    static UNDIRECTED_3: OnceLock<ClassTable> = OnceLock::new();
    static UNDIRECTED_4: OnceLock<ClassTable> = OnceLock::new();
    static DIRECTED_3: OnceLock<ClassTable> = OnceLock::new();
    static DIRECTED_4: OnceLock<ClassTable> = OnceLock::new();
    let cell = match (n, directed) {
        (3, false) => &UNDIRECTED_3,
        (4, false) => &UNDIRECTED_4,
        (3, true) => &DIRECTED_3,
        (4, true) => &DIRECTED_4,
        _ => {
            return Err(EngineFailure::unimplemented(
                "isoclass is only implemented for graphs with 3 or 4 vertices",
            ));
        }
    };
    Ok(cell.get_or_init(|| ClassTable::build(n, directed)))
}

pub fn class_count(n: usize, directed: bool) -> EngineResult<usize> {
    Ok(table(n, directed)?.canonical.len())
}

/// Class of the subgraph induced by `vids`, in the graph's directedness.
pub fn isoclass_of(graph: &NativeGraph, vids: &[usize]) -> EngineResult<usize> {
    let table = table(vids.len(), graph.is_directed())?;
    let mut position = vec![None; graph.vcount()];
    for (pos, &vid) in vids.iter().enumerate() {
        graph.check_vertex(vid)?;
        if position[vid].is_some() {
            return Err(EngineFailure::invalid_value(format!(
                "vertex {vid} listed more than once"
            )));
        }
        position[vid] = Some(pos);
    }
    let mut code = 0u32;
    for (a, b) in graph.edges() {
        if let (Some(i), Some(j)) = (position[a], position[b])
            && let Some(slot) = table.slot_index[i * table.n + j]
        {
            code |= 1 << slot;
        }
    }
    table.class_of(code)
}

/// Flat edge vector of the representative graph of a class.
pub fn class_edges(n: usize, class: usize, directed: bool) -> EngineResult<Vec<usize>> {
    let table = table(n, directed)?;
    let code = *table.canonical.get(class).ok_or_else(|| {
        EngineFailure::invalid_value(format!(
            "isoclass {class} out of range ({} classes for {n} {} vertices)",
            table.canonical.len(),
            if table.directed { "directed" } else { "undirected" }
        ))
    })?;
    let mut edges = Vec::new();
    for (k, &(i, j)) in table.slots.iter().enumerate() {
        if code & (1 << k) != 0 {
            edges.push(i);
            edges.push(j);
        }
    }
    Ok(edges)
}

pub fn isomorphic(left: &NativeGraph, right: &NativeGraph) -> EngineResult<bool> {
    if left.is_directed() != right.is_directed() {
        return Err(EngineFailure::invalid_value(
            "cannot compare directed and undirected graphs",
        ));
    }
    if left.vcount() != right.vcount() || left.ecount() != right.ecount() {
        return Ok(false);
    }
    let all: Vec<usize> = (0..left.vcount()).collect();
    Ok(isoclass_of(left, &all)? == isoclass_of(right, &all)?)
}
