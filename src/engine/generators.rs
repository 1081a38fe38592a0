//! Deterministic and random graph constructors.

use std::collections::VecDeque;

use ahash::AHashSet;
use rand::{Rng, rngs::StdRng, seq::SliceRandom};

use super::isoclass;
use super::ops::create;
use super::traversal::distances_from;
use super::types::{EngineFailure, EngineResult, NativeGraph, NeighborMode, check_vertex_limit};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AdjacencyMode {
    #[default]
    Directed,
    Undirected,
    Max,
    Min,
    Plus,
    Upper,
    Lower,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StarMode {
    Out,
    In,
    #[default]
    Undirected,
    Mutual,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TreeMode {
    Out,
    In,
    #[default]
    Undirected,
}

fn check_probability(p: f64, what: &str) -> EngineResult<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(EngineFailure::invalid_value(format!(
            "{what} must be in [0, 1], got {p}"
        )))
    }
}

fn pick_weighted(rng: &mut StdRng, weights: &[f64]) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return Some(rng.gen_range(0..weights.len()));
    }
    let mut target = rng.gen_range(0.0..total);
    for (index, &weight) in weights.iter().enumerate() {
        if target < weight {
            return Some(index);
        }
        target -= weight;
    }
    weights.iter().rposition(|&w| w > 0.0)
}

fn sample_types(rng: &mut StdRng, n: usize, type_dist: &[f64]) -> EngineResult<Vec<usize>> {
    if type_dist.iter().any(|&w| w < 0.0) {
        return Err(EngineFailure::invalid_value(
            "type distribution weights must be non-negative",
        ));
    }
    (0..n)
        .map(|_| {
            pick_weighted(rng, type_dist)
                .ok_or_else(|| EngineFailure::invalid_value("type distribution is empty"))
        })
        .collect()
}

pub fn adjacency(matrix: &[i64], n: usize, mode: AdjacencyMode) -> EngineResult<NativeGraph> {
    if matrix.len() != n * n {
        return Err(EngineFailure::invalid_value("adjacency matrix must be square"));
    }
    if matrix.iter().any(|&v| v < 0) {
        return Err(EngineFailure::invalid_value(
            "adjacency matrix entries must be non-negative",
        ));
    }
    let at = |i: usize, j: usize| matrix[i * n + j] as usize;
    let mut edges = Vec::new();
    let mut push = |a: usize, b: usize, count: usize| {
        for _ in 0..count {
            edges.push(a);
            edges.push(b);
        }
    };
    let directed = mode == AdjacencyMode::Directed;
    for i in 0..n {
        let start = if directed { 0 } else { i };
        for j in start..n {
            let count = match mode {
                AdjacencyMode::Directed => at(i, j),
                AdjacencyMode::Undirected | AdjacencyMode::Max => at(i, j).max(at(j, i)),
                AdjacencyMode::Min => at(i, j).min(at(j, i)),
                AdjacencyMode::Plus if i == j => at(i, i),
                AdjacencyMode::Plus => at(i, j) + at(j, i),
                AdjacencyMode::Upper => at(i, j),
                AdjacencyMode::Lower => at(j, i),
            };
            push(i, j, count);
        }
    }
    create(n, directed, &edges, 0)
}

const ATLAS: &[(usize, &[usize])] = &[
    (0, &[]),
    (1, &[]),
    (2, &[]),
    (2, &[0, 1]),
    (3, &[]),
    (3, &[1, 2]),
    (3, &[0, 1, 0, 2]),
    (3, &[0, 1, 0, 2, 1, 2]),
];

/// Graphs from "An Atlas of Graphs"; only the entries with at most three vertices are bundled.
pub fn atlas(index: usize) -> EngineResult<NativeGraph> {
    let (n, edges) = ATLAS.get(index).ok_or_else(|| {
        EngineFailure::invalid_value(format!(
            "atlas index {index} out of range (0..{})",
            ATLAS.len()
        ))
    })?;
    create(*n, false, edges, 0)
}

/// Preferential attachment; `out_degrees[v]` edges leave vertex `v` (entry 0 is ignored).
pub fn barabasi(
    rng: &mut StdRng,
    out_degrees: &[usize],
    outpref: bool,
    directed: bool,
    power: f64,
    zero_appeal: f64,
) -> EngineResult<NativeGraph> {
    if zero_appeal < 0.0 {
        return Err(EngineFailure::invalid_value("zero appeal must be non-negative"));
    }
    let n = out_degrees.len();
    let mut degree = vec![0f64; n];
    let mut edges = Vec::new();
    for v in 1..n {
        let mut weights: Vec<f64> = degree[..v]
            .iter()
            .map(|&d| d.powf(power) + zero_appeal)
            .collect();
        for _ in 0..out_degrees[v].min(v) {
            let Some(target) = pick_weighted(rng, &weights) else {
                break;
            };
            weights[target] = 0.0;
            edges.push(v);
            edges.push(target);
            degree[target] += 1.0;
            if outpref || !directed {
                degree[v] += 1.0;
            }
        }
    }
    create(n, directed, &edges, 0)
}

pub fn erdos_renyi_gnp(
    rng: &mut StdRng,
    n: usize,
    p: f64,
    directed: bool,
    loops: bool,
) -> EngineResult<NativeGraph> {
    check_probability(p, "edge probability")?;
    let mut edges = Vec::new();
    for i in 0..n {
        let start = if directed { 0 } else { i };
        for j in start..n {
            if i == j && !loops {
                continue;
            }
            if rng.gen_bool(p) {
                edges.push(i);
                edges.push(j);
            }
        }
    }
    create(n, directed, &edges, 0)
}

fn all_pairs(n: usize, directed: bool, loops: bool) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..n {
        let start = if directed { 0 } else { i };
        for j in start..n {
            if i != j || loops {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

pub fn erdos_renyi_gnm(
    rng: &mut StdRng,
    n: usize,
    m: usize,
    directed: bool,
    loops: bool,
) -> EngineResult<NativeGraph> {
    let nf = n as u128;
    let max = match (directed, loops) {
        (true, true) => nf * nf,
        (true, false) => nf * nf.saturating_sub(1),
        (false, true) => nf * (nf + 1) / 2,
        (false, false) => nf * nf.saturating_sub(1) / 2,
    };
    if m as u128 > max {
        return Err(EngineFailure::invalid_value(format!(
            "too many edges requested: {m} (at most {max})"
        )));
    }
    let mut edges = Vec::with_capacity(m * 2);
    if (m as u128) * 2 > max {
        let mut pairs = all_pairs(n, directed, loops);
        let (chosen, _) = pairs.partial_shuffle(rng, m);
        for &(a, b) in chosen.iter() {
            edges.push(a);
            edges.push(b);
        }
    } else {
        let mut seen = AHashSet::with_capacity(m);
        while seen.len() < m {
            let a = rng.gen_range(0..n);
            let b = rng.gen_range(0..n);
            if a == b && !loops {
                continue;
            }
            let key = if directed || a <= b { (a, b) } else { (b, a) };
            if seen.insert(key) {
                edges.push(key.0);
                edges.push(key.1);
            }
        }
    }
    create(n, directed, &edges, 0)
}

/// Returns the graph and the type of every vertex.
pub fn establishment(
    rng: &mut StdRng,
    n: usize,
    k: usize,
    type_dist: &[f64],
    pref_matrix: &[f64],
    directed: bool,
) -> EngineResult<(NativeGraph, Vec<usize>)> {
    let types = type_dist.len();
    if pref_matrix.len() != types * types {
        return Err(EngineFailure::invalid_value(
            "preference matrix must be types x types",
        ));
    }
    for &p in pref_matrix {
        check_probability(p, "preference")?;
    }
    let vertex_types = sample_types(rng, n, type_dist)?;
    let mut edges = Vec::new();
    let mut existing: Vec<usize> = Vec::with_capacity(n);
    for v in 0..n {
        let tried = k.min(existing.len());
        let (candidates, _) = existing.partial_shuffle(rng, tried);
        for &other in candidates.iter() {
            let p = pref_matrix[vertex_types[v] * types + vertex_types[other]];
            if rng.gen_bool(p) {
                edges.push(v);
                edges.push(other);
            }
        }
        existing.push(v);
    }
    let graph = create(n, directed, &edges, 0)?;
    Ok((graph, vertex_types))
}

pub fn full(n: usize, directed: bool, loops: bool) -> EngineResult<NativeGraph> {
    let mut edges = Vec::new();
    for (a, b) in all_pairs(n, directed, loops) {
        edges.push(a);
        edges.push(b);
    }
    create(n, directed, &edges, 0)
}

/// Geometric random graph on the unit square.
pub fn grg(rng: &mut StdRng, n: usize, radius: f64, torus: bool) -> EngineResult<NativeGraph> {
    if radius < 0.0 {
        return Err(EngineFailure::invalid_value("radius must be non-negative"));
    }
    let points: Vec<(f64, f64)> = (0..n).map(|_| (rng.r#gen(), rng.r#gen())).collect();
    let axis = |a: f64, b: f64| {
        let d = (a - b).abs();
        if torus { d.min(1.0 - d) } else { d }
    };
    let mut edges = Vec::new();
    for i in 0..n {
        for j in i + 1..n {
            let dx = axis(points[i].0, points[j].0);
            let dy = axis(points[i].1, points[j].1);
            if dx * dx + dy * dy < radius * radius {
                edges.push(i);
                edges.push(j);
            }
        }
    }
    create(n, false, &edges, 0)
}

pub fn growing_random(
    rng: &mut StdRng,
    n: usize,
    m: usize,
    directed: bool,
    citation: bool,
) -> EngineResult<NativeGraph> {
    let mut edges = Vec::with_capacity(n.saturating_sub(1) * m * 2);
    for v in 1..n {
        for _ in 0..m {
            if citation {
                edges.push(v);
                edges.push(rng.gen_range(0..v));
            } else {
                edges.push(rng.gen_range(0..=v));
                edges.push(rng.gen_range(0..=v));
            }
        }
    }
    create(n, directed, &edges, 0)
}

/// Returns the graph and the type of every vertex.
pub fn preference(
    rng: &mut StdRng,
    n: usize,
    type_dist: &[f64],
    pref_matrix: &[f64],
    directed: bool,
    loops: bool,
) -> EngineResult<(NativeGraph, Vec<usize>)> {
    let types = type_dist.len();
    if pref_matrix.len() != types * types {
        return Err(EngineFailure::invalid_value(
            "preference matrix must be types x types",
        ));
    }
    for &p in pref_matrix {
        check_probability(p, "preference")?;
    }
    let vertex_types = sample_types(rng, n, type_dist)?;
    let mut edges = Vec::new();
    for (i, j) in all_pairs(n, directed, loops) {
        if rng.gen_bool(pref_matrix[vertex_types[i] * types + vertex_types[j]]) {
            edges.push(i);
            edges.push(j);
        }
    }
    let graph = create(n, directed, &edges, 0)?;
    Ok((graph, vertex_types))
}

/// Directed preference model with joint `(out_type, in_type)` vertex types.
pub fn asymmetric_preference(
    rng: &mut StdRng,
    n: usize,
    out_types: usize,
    in_types: usize,
    type_dist: &[f64],
    pref_matrix: &[f64],
    loops: bool,
) -> EngineResult<(NativeGraph, Vec<(usize, usize)>)> {
    if type_dist.len() != out_types * in_types || pref_matrix.len() != out_types * in_types {
        return Err(EngineFailure::invalid_value(
            "type distribution and preference matrices must both be out_types x in_types",
        ));
    }
    for &p in pref_matrix {
        check_probability(p, "preference")?;
    }
    let cells = sample_types(rng, n, type_dist)?;
    let vertex_types: Vec<(usize, usize)> = cells
        .into_iter()
        .map(|cell| (cell / in_types, cell % in_types))
        .collect();
    let mut edges = Vec::new();
    for (i, j) in all_pairs(n, true, loops) {
        let p = pref_matrix[vertex_types[i].0 * in_types + vertex_types[j].1];
        if rng.gen_bool(p) {
            edges.push(i);
            edges.push(j);
        }
    }
    let graph = create(n, true, &edges, 0)?;
    Ok((graph, vertex_types))
}

/// Preferential attachment on degree gained during the last `window` steps.
#[allow(clippy::too_many_arguments)]
pub fn recent_degree(
    rng: &mut StdRng,
    n: usize,
    m: usize,
    window: usize,
    outpref: bool,
    directed: bool,
    power: f64,
    zero_appeal: f64,
) -> EngineResult<NativeGraph> {
    if zero_appeal < 0.0 {
        return Err(EngineFailure::invalid_value("zero appeal must be non-negative"));
    }
    let mut recent = vec![0f64; n];
    let mut history: VecDeque<Vec<usize>> = VecDeque::with_capacity(window + 1);
    let mut edges = Vec::new();
    for v in 1..n {
        let mut weights: Vec<f64> = recent[..v]
            .iter()
            .map(|&d| d.powf(power) + zero_appeal)
            .collect();
        let mut gained = Vec::new();
        for _ in 0..m.min(v) {
            let Some(target) = pick_weighted(rng, &weights) else {
                break;
            };
            weights[target] = 0.0;
            edges.push(v);
            edges.push(target);
            gained.push(target);
            if outpref || !directed {
                gained.push(v);
            }
        }
        for &u in &gained {
            recent[u] += 1.0;
        }
        history.push_back(gained);
        if history.len() > window {
            if let Some(expired) = history.pop_front() {
                for u in expired {
                    recent[u] -= 1.0;
                }
            }
        }
    }
    create(n, directed, &edges, 0)
}

pub fn star(n: usize, mode: StarMode, center: usize) -> EngineResult<NativeGraph> {
    if n > 0 && center >= n {
        return Err(EngineFailure::invalid_vertex(center, n));
    }
    let mut edges = Vec::new();
    for v in (0..n).filter(|&v| v != center) {
        match mode {
            StarMode::Out | StarMode::Undirected => edges.extend([center, v]),
            StarMode::In => edges.extend([v, center]),
            StarMode::Mutual => edges.extend([center, v, v, center]),
        }
    }
    create(n, mode != StarMode::Undirected, &edges, 0)
}

pub fn ring(n: usize, directed: bool, mutual: bool, circular: bool) -> EngineResult<NativeGraph> {
    let mut edges = Vec::new();
    let mut link = |a: usize, b: usize| {
        edges.extend([a, b]);
        if directed && mutual {
            edges.extend([b, a]);
        }
    };
    for v in 1..n {
        link(v - 1, v);
    }
    if circular && n > 2 {
        link(n - 1, 0);
    }
    create(n, directed, &edges, 0)
}

/// Square lattice; the first dimension varies fastest in vertex numbering.
pub fn lattice(
    dims: &[usize],
    nei: usize,
    directed: bool,
    mutual: bool,
    circular: bool,
) -> EngineResult<NativeGraph> {
    if dims.is_empty() {
        return Err(EngineFailure::invalid_value("lattice needs at least one dimension"));
    }
    if nei == 0 {
        return Err(EngineFailure::invalid_value("neighborhood size must be positive"));
    }
    let n = dims
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(|| EngineFailure::invalid_value("lattice is too large"))?;
    check_vertex_limit(n)?;
    let mut edges = Vec::new();
    for v in 0..n {
        let mut stride = 1;
        for &size in dims {
            let coord = (v / stride) % size;
            let next = if coord + 1 < size {
                Some(v + stride)
            } else if circular && size > 2 {
                Some(v - coord * stride)
            } else {
                None
            };
            if let Some(u) = next {
                edges.extend([v, u]);
                if directed && mutual {
                    edges.extend([u, v]);
                }
            }
            stride *= size;
        }
    }
    let mut graph = create(n, directed, &edges, 0)?;
    if nei > 1 {
        connect_neighborhood(&mut graph, nei)?;
    }
    Ok(graph)
}

fn connect_neighborhood(graph: &mut NativeGraph, order: usize) -> EngineResult<()> {
    let mode = if graph.is_directed() {
        NeighborMode::Out
    } else {
        NeighborMode::All
    };
    let lists = graph.neighbor_lists(mode);
    let mut extra = Vec::new();
    for v in 0..graph.vcount() {
        for (u, dist) in distances_from(&lists, v).into_iter().enumerate() {
            let Some(d) = dist else { continue };
            if d >= 2 && d <= order && (graph.is_directed() || v < u) {
                extra.extend([v, u]);
            }
        }
    }
    super::ops::add_edges(graph, &extra)
}

pub fn tree(n: usize, children: usize, mode: TreeMode) -> EngineResult<NativeGraph> {
    if children == 0 {
        return Err(EngineFailure::invalid_value("number of children must be positive"));
    }
    let mut edges = Vec::with_capacity(n.saturating_sub(1) * 2);
    for v in 1..n {
        let parent = (v - 1) / children;
        match mode {
            TreeMode::In => edges.extend([v, parent]),
            TreeMode::Out | TreeMode::Undirected => edges.extend([parent, v]),
        }
    }
    create(n, mode != TreeMode::Undirected, &edges, 0)
}

/// Configuration model by random stub matching.
pub fn degree_sequence(
    rng: &mut StdRng,
    out_degrees: &[usize],
    in_degrees: Option<&[usize]>,
) -> EngineResult<NativeGraph> {
    let stubs = |degrees: &[usize]| -> Vec<usize> {
        degrees
            .iter()
            .enumerate()
            .flat_map(|(v, &d)| std::iter::repeat_n(v, d))
            .collect()
    };
    let n = out_degrees.len();
    match in_degrees {
        None => {
            let mut all = stubs(out_degrees);
            if all.len() % 2 != 0 {
                return Err(EngineFailure::invalid_value(
                    "sum of degrees must be even for an undirected graph",
                ));
            }
            all.shuffle(rng);
            create(n, false, &all, 0)
        }
        Some(in_degrees) => {
            if in_degrees.len() != n {
                return Err(EngineFailure::invalid_value(
                    "in- and out-degree sequences must have the same length",
                ));
            }
            let out_stubs = stubs(out_degrees);
            let mut in_stubs = stubs(in_degrees);
            if out_stubs.len() != in_stubs.len() {
                return Err(EngineFailure::invalid_value(
                    "sum of in-degrees must equal sum of out-degrees",
                ));
            }
            in_stubs.shuffle(rng);
            let mut edges = Vec::with_capacity(out_stubs.len() * 2);
            for (a, b) in out_stubs.into_iter().zip(in_stubs) {
                edges.extend([a, b]);
            }
            create(n, true, &edges, 0)
        }
    }
}

pub fn isoclass_graph(n: usize, class: usize, directed: bool) -> EngineResult<NativeGraph> {
    let edges = isoclass::class_edges(n, class, directed)?;
    create(n, directed, &edges, 0)
}
