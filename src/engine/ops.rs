//! Structural engine calls: creation, mutation, renumbering and set operators.

use ahash::AHashSet;

use super::types::{
    EngineFailure, EngineResult, ErrorCode, NativeGraph, NeighborMode, Renumbering,
    check_vertex_limit,
};
use crate::fault_injection::{self, FaultPoint};

/// Allocates a graph with at least `vertices` vertices and the given flat edge vector.
pub fn create(
    vertices: usize,
    directed: bool,
    edges: &[usize],
    edge_capacity: usize,
) -> EngineResult<NativeGraph> {
    fault_injection::check_fault(FaultPoint::EngineAllocate)?;
    if edges.len() % 2 != 0 {
        return Err(EngineFailure::invalid_value(
            "edge vector must contain an even number of endpoints",
        ));
    }
    let vertices = match edges.iter().copied().max() {
        Some(max) => max
            .checked_add(1)
            .map(|needed| vertices.max(needed))
            .ok_or_else(|| EngineFailure::invalid_value(format!("vertex id {max} is too large")))?,
        None => vertices,
    };
    check_vertex_limit(vertices)?;
    let mut graph =
        NativeGraph::allocate(vertices, directed, edge_capacity.max(edges.len() / 2));
    for pair in edges.chunks_exact(2) {
        graph.from.push(pair[0]);
        graph.to.push(pair[1]);
    }
    Ok(graph)
}

pub fn copy(graph: &NativeGraph) -> EngineResult<NativeGraph> {
    fault_injection::check_fault(FaultPoint::EngineAllocate)?;
    let mut copy = NativeGraph::allocate(graph.vertices, graph.directed, graph.ecount());
    copy.from.extend_from_slice(&graph.from);
    copy.to.extend_from_slice(&graph.to);
    Ok(copy)
}

pub fn add_vertices(graph: &mut NativeGraph, count: usize) -> EngineResult<()> {
    fault_injection::check_fault(FaultPoint::AddVertices)?;
    let total = graph
        .vertices
        .checked_add(count)
        .ok_or_else(|| EngineFailure::invalid_value("vertex count overflow"))?;
    check_vertex_limit(total)?;
    graph.vertices = total;
    Ok(())
}

pub fn add_edges(graph: &mut NativeGraph, edges: &[usize]) -> EngineResult<()> {
    fault_injection::check_fault(FaultPoint::AddEdges)?;
    if edges.len() % 2 != 0 {
        return Err(EngineFailure::invalid_value(
            "edge vector must contain an even number of endpoints",
        ));
    }
    for &vid in edges {
        graph.check_vertex(vid)?;
    }
    let count = edges.len() / 2;
    graph
        .from
        .try_reserve(count)
        .and_then(|_| graph.to.try_reserve(count))
        .map_err(|e| EngineFailure::new(ErrorCode::NoMemory, e.to_string()))?;
    for pair in edges.chunks_exact(2) {
        graph.from.push(pair[0]);
        graph.to.push(pair[1]);
    }
    Ok(())
}

/// Removes the vertices and every incident edge, compacting indices in order.
pub fn delete_vertices(graph: &mut NativeGraph, vids: &[usize]) -> EngineResult<Renumbering> {
    fault_injection::check_fault(FaultPoint::DeleteVertices)?;
    let mut removed = vec![false; graph.vertices];
    for &vid in vids {
        graph.check_vertex(vid)?;
        removed[vid] = true;
    }

    let mut new_index = vec![usize::MAX; graph.vertices];
    let mut vertices = Vec::with_capacity(graph.vertices);
    for (old, gone) in removed.iter().enumerate() {
        if !gone {
            new_index[old] = vertices.len();
            vertices.push(old);
        }
    }

    let mut edges = Vec::with_capacity(graph.ecount());
    let mut from = Vec::with_capacity(graph.ecount());
    let mut to = Vec::with_capacity(graph.ecount());
    for (eid, (a, b)) in graph.edges().enumerate() {
        if !removed[a] && !removed[b] {
            edges.push(eid);
            from.push(new_index[a]);
            to.push(new_index[b]);
        }
    }

    graph.vertices = vertices.len();
    graph.from = from;
    graph.to = to;
    Ok(Renumbering { vertices, edges })
}

/// Removes edges by id. Returns the surviving old edge ids in new order.
pub fn delete_edges(graph: &mut NativeGraph, eids: &[usize]) -> EngineResult<Vec<usize>> {
    fault_injection::check_fault(FaultPoint::DeleteEdges)?;
    let mut removed = vec![false; graph.ecount()];
    for &eid in eids {
        if eid >= removed.len() {
            return Err(EngineFailure::invalid_edge(eid, removed.len()));
        }
        removed[eid] = true;
    }
    let origin: Vec<usize> = (0..graph.ecount()).filter(|&e| !removed[e]).collect();
    retain_edges(graph, &origin);
    Ok(origin)
}

fn retain_edges(graph: &mut NativeGraph, origin: &[usize]) {
    let from = origin.iter().map(|&e| graph.from[e]).collect();
    let to = origin.iter().map(|&e| graph.to[e]).collect();
    graph.from = from;
    graph.to = to;
}

pub fn get_eid(graph: &NativeGraph, a: usize, b: usize, directed: bool) -> EngineResult<usize> {
    graph.check_vertex(a)?;
    graph.check_vertex(b)?;
    let both_ways = !graph.directed || !directed;
    graph
        .edges()
        .position(|(x, y)| (x == a && y == b) || (both_ways && x == b && y == a))
        .ok_or_else(|| EngineFailure::invalid_value(format!("no edge between {a} and {b}")))
}

/// One distinct edge id per pair. Repeated pairs resolve to further parallel
/// edges, in edge order.
pub fn get_eids(
    graph: &NativeGraph,
    pairs: &[(usize, usize)],
    directed: bool,
) -> EngineResult<Vec<usize>> {
    let both_ways = !graph.directed || !directed;
    let mut taken = AHashSet::with_capacity(pairs.len());
    let mut eids = Vec::with_capacity(pairs.len());
    for &(a, b) in pairs {
        graph.check_vertex(a)?;
        graph.check_vertex(b)?;
        let eid = graph
            .edges()
            .enumerate()
            .find(|&(eid, (x, y))| {
                !taken.contains(&eid) && ((x == a && y == b) || (both_ways && x == b && y == a))
            })
            .map(|(eid, _)| eid)
            .ok_or_else(|| {
                EngineFailure::invalid_value(format!("no unused edge between {a} and {b}"))
            })?;
        taken.insert(eid);
        eids.push(eid);
    }
    Ok(eids)
}

pub fn degree(
    graph: &NativeGraph,
    vids: &[usize],
    mode: NeighborMode,
    loops: bool,
) -> EngineResult<Vec<usize>> {
    for &vid in vids {
        graph.check_vertex(vid)?;
    }
    let lists = graph.neighbor_lists(mode);
    Ok(vids
        .iter()
        .map(|&vid| {
            let list = &lists[vid];
            if loops {
                list.len()
            } else {
                list.iter().filter(|&&other| other != vid).count()
            }
        })
        .collect())
}

pub fn neighbors(graph: &NativeGraph, vid: usize, mode: NeighborMode) -> EngineResult<Vec<usize>> {
    graph.check_vertex(vid)?;
    let mode = graph.effective_mode(mode);
    let mut result = Vec::new();
    for (a, b) in graph.edges() {
        if a == vid && mode != NeighborMode::In {
            result.push(b);
        }
        if b == vid && mode != NeighborMode::Out {
            result.push(a);
        }
    }
    result.sort_unstable();
    Ok(result)
}

pub fn edgelist(graph: &NativeGraph) -> Vec<usize> {
    let mut flat = Vec::with_capacity(graph.ecount() * 2);
    for (a, b) in graph.edges() {
        flat.push(a);
        flat.push(b);
    }
    flat
}

/// Row-major edge multiplicity matrix. Undirected loops are counted once.
pub fn adjacency_matrix(graph: &NativeGraph) -> EngineResult<Vec<i64>> {
    let n = graph.vertices;
    let mut matrix = dense(n, 0i64)?;
    for (a, b) in graph.edges() {
        matrix[a * n + b] += 1;
        if !graph.directed && a != b {
            matrix[b * n + a] += 1;
        }
    }
    Ok(matrix)
}

/// Row-major Laplacian ignoring loops. Directed graphs use out-degrees.
pub fn laplacian(graph: &NativeGraph, normalized: bool) -> EngineResult<Vec<f64>> {
    let n = graph.vertices;
    let mut adjacency = dense(n, 0f64)?;
    let mut degree = vec![0f64; n];
    for (a, b) in graph.edges() {
        if a == b {
            continue;
        }
        adjacency[a * n + b] += 1.0;
        degree[a] += 1.0;
        if !graph.directed {
            adjacency[b * n + a] += 1.0;
            degree[b] += 1.0;
        }
    }

    let mut result = dense(n, 0f64)?;
    for i in 0..n {
        for j in 0..n {
            let a = adjacency[i * n + j];
            result[i * n + j] = if !normalized {
                if i == j { degree[i] - a } else { -a }
            } else if i == j {
                if degree[i] > 0.0 { 1.0 } else { 0.0 }
            } else if a == 0.0 {
                0.0
            } else if graph.directed {
                -a / degree[i]
            } else {
                -a / (degree[i] * degree[j]).sqrt()
            };
        }
    }
    Ok(result)
}

/// `n` by `n` buffer filled with `fill`; an oversized request is reported as
/// out of memory.
fn dense<T: Clone>(n: usize, fill: T) -> EngineResult<Vec<T>> {
    let len = n
        .checked_mul(n)
        .ok_or_else(|| EngineFailure::new(ErrorCode::NoMemory, format!("{n} x {n} matrix")))?;
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|e| EngineFailure::new(ErrorCode::NoMemory, e.to_string()))?;
    buffer.resize(len, fill);
    Ok(buffer)
}

fn edge_key(directed: bool, a: usize, b: usize) -> (usize, usize) {
    if directed || a <= b { (a, b) } else { (b, a) }
}

/// Drops multi-edges and/or loops in place. Returns the origin of each kept edge.
pub fn simplify(graph: &mut NativeGraph, multiple: bool, loops: bool) -> Vec<usize> {
    let mut seen = AHashSet::new();
    let mut origin = Vec::with_capacity(graph.ecount());
    for (eid, (a, b)) in graph.edges().enumerate() {
        if loops && a == b {
            continue;
        }
        if multiple && !seen.insert(edge_key(graph.directed, a, b)) {
            continue;
        }
        origin.push(eid);
    }
    retain_edges(graph, &origin);
    origin
}

/// With `mutual`, every edge gains a reversed twin appended after the originals.
pub fn to_directed(graph: &mut NativeGraph, mutual: bool) -> Vec<usize> {
    let m = graph.ecount();
    if graph.directed {
        return (0..m).collect();
    }
    graph.directed = true;
    if !mutual {
        return (0..m).collect();
    }
    let from = graph.from.clone();
    let to = graph.to.clone();
    graph.from.extend_from_slice(&to);
    graph.to.extend_from_slice(&from);
    (0..m).chain(0..m).collect()
}

/// With `collapse`, edges joining the same vertex pair merge into the first one.
pub fn to_undirected(graph: &mut NativeGraph, collapse: bool) -> Vec<usize> {
    let m = graph.ecount();
    if !graph.directed {
        return (0..m).collect();
    }
    graph.directed = false;
    if !collapse {
        return (0..m).collect();
    }
    simplify(graph, true, false)
}

pub fn complementer(graph: &NativeGraph, loops: bool) -> EngineResult<NativeGraph> {
    let present: AHashSet<(usize, usize)> = graph
        .edges()
        .map(|(a, b)| edge_key(graph.directed, a, b))
        .collect();
    let n = graph.vertices;
    let mut edges = Vec::new();
    for i in 0..n {
        let start = if graph.directed { 0 } else { i };
        for j in start..n {
            if i == j && !loops {
                continue;
            }
            if !present.contains(&(i, j)) {
                edges.push(i);
                edges.push(j);
            }
        }
    }
    create(n, graph.directed, &edges, 0)
}

fn common_directedness(graphs: &[&NativeGraph]) -> EngineResult<bool> {
    let directed = graphs.first().is_some_and(|g| g.directed);
    if graphs.iter().any(|g| g.directed != directed) {
        return Err(EngineFailure::invalid_value(
            "cannot combine directed and undirected graphs",
        ));
    }
    Ok(directed)
}

pub fn disjoint_union(graphs: &[&NativeGraph]) -> EngineResult<NativeGraph> {
    let directed = common_directedness(graphs)?;
    let mut offset = 0;
    let mut edges = Vec::with_capacity(graphs.iter().map(|g| g.ecount() * 2).sum());
    for graph in graphs {
        for (a, b) in graph.edges() {
            edges.push(a + offset);
            edges.push(b + offset);
        }
        offset += graph.vertices;
    }
    create(offset, directed, &edges, 0)
}

pub fn union(graphs: &[&NativeGraph]) -> EngineResult<NativeGraph> {
    let directed = common_directedness(graphs)?;
    let vertices = graphs.iter().map(|g| g.vertices).max().unwrap_or(0);
    let mut seen = AHashSet::new();
    let mut edges = Vec::new();
    for graph in graphs {
        for (a, b) in graph.edges() {
            let key = edge_key(directed, a, b);
            if seen.insert(key) {
                edges.push(key.0);
                edges.push(key.1);
            }
        }
    }
    create(vertices, directed, &edges, 0)
}

pub fn intersection(graphs: &[&NativeGraph]) -> EngineResult<NativeGraph> {
    let directed = common_directedness(graphs)?;
    let vertices = graphs.iter().map(|g| g.vertices).max().unwrap_or(0);
    let sets: Vec<AHashSet<(usize, usize)>> = graphs
        .iter()
        .map(|g| g.edges().map(|(a, b)| edge_key(directed, a, b)).collect())
        .collect();
    let mut emitted = AHashSet::new();
    let mut edges = Vec::new();
    if let Some(first) = graphs.first() {
        for (a, b) in first.edges() {
            let key = edge_key(directed, a, b);
            if sets.iter().all(|set| set.contains(&key)) && emitted.insert(key) {
                edges.push(key.0);
                edges.push(key.1);
            }
        }
    }
    create(vertices, directed, &edges, 0)
}

pub fn difference(left: &NativeGraph, right: &NativeGraph) -> EngineResult<NativeGraph> {
    let directed = common_directedness(&[left, right])?;
    let removed: AHashSet<(usize, usize)> = right
        .edges()
        .map(|(a, b)| edge_key(directed, a, b))
        .collect();
    let mut edges = Vec::new();
    for (a, b) in left.edges() {
        if !removed.contains(&edge_key(directed, a, b)) {
            edges.push(a);
            edges.push(b);
        }
    }
    create(left.vertices, directed, &edges, 0)
}

/// Relational composition: `(i, j)` whenever `(i, k)` is in `left` and `(k, j)` in `right`.
pub fn compose(left: &NativeGraph, right: &NativeGraph) -> EngineResult<NativeGraph> {
    let directed = common_directedness(&[left, right])?;
    let vertices = left.vertices.max(right.vertices);
    let right_out = right.neighbor_lists(NeighborMode::Out);
    let mut seen = AHashSet::new();
    let mut edges = Vec::new();
    for (a, b) in left.edges() {
        let steps: &[(usize, usize)] = if directed { &[(a, b)] } else { &[(a, b), (b, a)] };
        for &(i, k) in steps {
            for &j in right_out.get(k).into_iter().flatten() {
                let key = edge_key(directed, i, j);
                if seen.insert(key) {
                    edges.push(key.0);
                    edges.push(key.1);
                }
            }
        }
    }
    create(vertices, directed, &edges, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MAX_VERTICES;

    fn triangle() -> NativeGraph {
        create(3, false, &[0, 1, 1, 2, 2, 0], 0).expect("create")
    }

    #[test]
    fn create_grows_to_fit_edges() {
        let graph = create(2, true, &[0, 4], 0).expect("create");
        assert_eq!(graph.vcount(), 5);
        assert_eq!(graph.ecount(), 1);
    }

    #[test]
    fn create_rejects_odd_edge_vector() {
        let err = create(3, false, &[0, 1, 2], 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidValue);
    }

    #[test]
    fn create_rejects_endpoint_overflow() {
        let err = create(0, true, &[0, usize::MAX], 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidValue);
        let err = create(MAX_VERTICES + 1, true, &[], 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidValue);
    }

    #[test]
    fn get_eids_picks_distinct_parallel_edges() {
        let graph = create(2, true, &[0, 1, 1, 0, 0, 1], 0).expect("create");
        assert_eq!(get_eids(&graph, &[(0, 1), (0, 1)], true).expect("eids"), vec![0, 2]);
        assert_eq!(get_eids(&graph, &[(0, 1), (0, 1)], false).expect("eids"), vec![0, 1]);
        let err = get_eids(&graph, &[(1, 0), (1, 0)], true).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidValue);
    }

    #[test]
    fn dense_reports_oversized_matrix_as_no_memory() {
        let err = dense(usize::MAX, 0u8).unwrap_err();
        assert_eq!(err.code, ErrorCode::NoMemory);
        assert_eq!(dense(2, 1i64).expect("small"), vec![1; 4]);
    }

    #[test]
    fn delete_vertices_reports_surviving_indices() {
        let mut graph = triangle();
        let renumbering = delete_vertices(&mut graph, &[1]).expect("delete");
        assert_eq!(renumbering.vertices, vec![0, 2]);
        assert_eq!(renumbering.edges, vec![2]);
        assert_eq!(edgelist(&graph), vec![1, 0]);
    }

    #[test]
    fn delete_vertices_rejects_out_of_range_without_change() {
        let mut graph = triangle();
        let err = delete_vertices(&mut graph, &[0, 9]).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidVertex);
        assert_eq!(graph.vcount(), 3);
        assert_eq!(graph.ecount(), 3);
    }

    #[test]
    fn undirected_loop_counts_twice_in_degree() {
        let graph = create(1, false, &[0, 0], 0).expect("create");
        assert_eq!(degree(&graph, &[0], NeighborMode::All, true).expect("degree"), vec![2]);
        assert_eq!(degree(&graph, &[0], NeighborMode::All, false).expect("degree"), vec![0]);
    }

    #[test]
    fn to_directed_mutual_duplicates_edges() {
        let mut graph = triangle();
        let origin = to_directed(&mut graph, true);
        assert_eq!(origin, vec![0, 1, 2, 0, 1, 2]);
        assert!(graph.is_directed());
        assert_eq!(graph.edge(3).expect("edge"), (1, 0));
    }

    #[test]
    fn simplify_keeps_first_of_parallel_edges() {
        let mut graph = create(2, false, &[0, 1, 1, 0, 1, 1], 0).expect("create");
        let origin = simplify(&mut graph, true, true);
        assert_eq!(origin, vec![0]);
    }

    #[test]
    fn compose_follows_two_steps() {
        let left = create(3, true, &[0, 1], 0).expect("left");
        let right = create(3, true, &[1, 2], 0).expect("right");
        let composed = compose(&left, &right).expect("compose");
        assert_eq!(edgelist(&composed), vec![0, 2]);
    }
}
