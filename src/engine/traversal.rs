use std::collections::VecDeque;

use super::types::{EngineFailure, EngineResult, NativeGraph, NeighborMode};

/// Breadth-first visit order plus layer boundaries and parents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BfsTree {
    pub order: Vec<usize>,
    /// Start offset of each layer in `order`, followed by `order.len()`.
    pub layers: Vec<usize>,
    pub parents: Vec<Option<usize>>,
}

pub fn bfs(graph: &NativeGraph, root: usize, mode: NeighborMode) -> EngineResult<BfsTree> {
    graph.check_vertex(root)?;
    let lists = graph.neighbor_lists(mode);
    let mut visited = vec![false; graph.vcount()];
    let mut parents = vec![None; graph.vcount()];
    let mut order = Vec::new();
    let mut layers = Vec::new();
    let mut queue = VecDeque::new();
    let mut current_layer = usize::MAX;

    visited[root] = true;
    queue.push_back((root, 0usize));
    while let Some((vertex, depth)) = queue.pop_front() {
        if depth != current_layer {
            layers.push(order.len());
            current_layer = depth;
        }
        order.push(vertex);
        for &next in &lists[vertex] {
            if !visited[next] {
                visited[next] = true;
                parents[next] = Some(vertex);
                queue.push_back((next, depth + 1));
            }
        }
    }
    layers.push(order.len());
    Ok(BfsTree {
        order,
        layers,
        parents,
    })
}

pub(crate) fn distances_from(lists: &[Vec<usize>], source: usize) -> Vec<Option<usize>> {
    let mut dist = vec![None; lists.len()];
    let mut queue = VecDeque::new();
    dist[source] = Some(0);
    queue.push_back(source);
    while let Some(vertex) = queue.pop_front() {
        let next_dist = dist[vertex].map(|d| d + 1);
        for &next in &lists[vertex] {
            if dist[next].is_none() {
                dist[next] = next_dist;
                queue.push_back(next);
            }
        }
    }
    dist
}

/// Component membership; components are numbered by their lowest vertex.
pub fn components(graph: &NativeGraph, strong: bool) -> Vec<usize> {
    if strong && graph.is_directed() {
        strong_components(graph)
    } else {
        weak_components(graph)
    }
}

fn weak_components(graph: &NativeGraph) -> Vec<usize> {
    let lists = graph.neighbor_lists(NeighborMode::All);
    let mut membership = vec![usize::MAX; graph.vcount()];
    let mut next_id = 0;
    for start in 0..graph.vcount() {
        if membership[start] != usize::MAX {
            continue;
        }
        let mut queue = VecDeque::from([start]);
        membership[start] = next_id;
        while let Some(vertex) = queue.pop_front() {
            for &next in &lists[vertex] {
                if membership[next] == usize::MAX {
                    membership[next] = next_id;
                    queue.push_back(next);
                }
            }
        }
        next_id += 1;
    }
    membership
}

fn strong_components(graph: &NativeGraph) -> Vec<usize> {
    let n = graph.vcount();
    let out = graph.neighbor_lists(NeighborMode::Out);
    let incoming = graph.neighbor_lists(NeighborMode::In);

    // First pass: finishing order via an explicit stack.
    let mut visited = vec![false; n];
    let mut finished = Vec::with_capacity(n);
    for start in 0..n {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let mut stack = vec![(start, 0usize)];
        while let Some(top) = stack.last_mut() {
            let vertex = top.0;
            if let Some(&next) = out[vertex].get(top.1) {
                top.1 += 1;
                if !visited[next] {
                    visited[next] = true;
                    stack.push((next, 0));
                }
            } else {
                finished.push(vertex);
                stack.pop();
            }
        }
    }

    let mut raw = vec![usize::MAX; n];
    let mut count = 0;
    for &start in finished.iter().rev() {
        if raw[start] != usize::MAX {
            continue;
        }
        let mut stack = vec![start];
        raw[start] = count;
        while let Some(vertex) = stack.pop() {
            for &next in &incoming[vertex] {
                if raw[next] == usize::MAX {
                    raw[next] = count;
                    stack.push(next);
                }
            }
        }
        count += 1;
    }

    let mut relabel = vec![usize::MAX; count];
    let mut next_id = 0;
    raw.iter()
        .map(|&c| {
            if relabel[c] == usize::MAX {
                relabel[c] = next_id;
                next_id += 1;
            }
            relabel[c]
        })
        .collect()
}

pub fn subcomponent(graph: &NativeGraph, vid: usize, mode: NeighborMode) -> EngineResult<Vec<usize>> {
    Ok(bfs(graph, vid, mode)?.order)
}

pub fn shortest_paths(
    graph: &NativeGraph,
    sources: &[usize],
    mode: NeighborMode,
) -> EngineResult<Vec<Vec<Option<usize>>>> {
    for &source in sources {
        graph.check_vertex(source)?;
    }
    let lists = graph.neighbor_lists(mode);
    Ok(sources
        .iter()
        .map(|&source| distances_from(&lists, source))
        .collect())
}

fn path_mode(graph: &NativeGraph, directed: bool) -> NeighborMode {
    if directed && graph.is_directed() {
        NeighborMode::Out
    } else {
        NeighborMode::All
    }
}

/// Longest geodesic. Without `unconn`, a disconnected graph reports its vertex count.
pub fn diameter(graph: &NativeGraph, directed: bool, unconn: bool) -> usize {
    let lists = graph.neighbor_lists(path_mode(graph, directed));
    let mut longest = 0;
    for source in 0..graph.vcount() {
        for dist in distances_from(&lists, source) {
            match dist {
                Some(d) => longest = longest.max(d),
                None if !unconn => return graph.vcount(),
                None => {}
            }
        }
    }
    longest
}

/// Mean geodesic length over ordered pairs. Without `unconn`, missing paths count as the vertex count.
pub fn average_path_length(graph: &NativeGraph, directed: bool, unconn: bool) -> f64 {
    let lists = graph.neighbor_lists(path_mode(graph, directed));
    let n = graph.vcount();
    let mut total = 0f64;
    let mut pairs = 0f64;
    for source in 0..n {
        for (target, dist) in distances_from(&lists, source).into_iter().enumerate() {
            if target == source {
                continue;
            }
            match dist {
                Some(d) => {
                    total += d as f64;
                    pairs += 1.0;
                }
                None if !unconn => {
                    total += n as f64;
                    pairs += 1.0;
                }
                None => {}
            }
        }
    }
    total / pairs
}

pub fn closeness(graph: &NativeGraph, vids: &[usize], mode: NeighborMode) -> EngineResult<Vec<f64>> {
    for &vid in vids {
        graph.check_vertex(vid)?;
    }
    let n = graph.vcount();
    let lists = graph.neighbor_lists(mode);
    Ok(vids
        .iter()
        .map(|&vid| {
            let sum: usize = distances_from(&lists, vid)
                .into_iter()
                .map(|d| d.unwrap_or(n))
                .sum();
            if sum == 0 {
                0.0
            } else {
                (n - 1) as f64 / sum as f64
            }
        })
        .collect())
}

/// Brandes betweenness on unweighted geodesics.
pub fn betweenness(graph: &NativeGraph, vids: &[usize], directed: bool) -> EngineResult<Vec<f64>> {
    for &vid in vids {
        graph.check_vertex(vid)?;
    }
    let n = graph.vcount();
    let mode = path_mode(graph, directed);
    let lists = graph.neighbor_lists(mode);
    let mut score = vec![0f64; n];

    for source in 0..n {
        let mut stack = Vec::with_capacity(n);
        let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut sigma = vec![0f64; n];
        let mut dist: Vec<Option<usize>> = vec![None; n];
        sigma[source] = 1.0;
        dist[source] = Some(0);
        let mut queue = VecDeque::from([source]);
        while let Some(v) = queue.pop_front() {
            stack.push(v);
            let dv = dist[v].unwrap_or(0);
            for &w in &lists[v] {
                if w == v {
                    continue;
                }
                if dist[w].is_none() {
                    dist[w] = Some(dv + 1);
                    queue.push_back(w);
                }
                if dist[w] == Some(dv + 1) {
                    sigma[w] += sigma[v];
                    preds[w].push(v);
                }
            }
        }
        let mut delta = vec![0f64; n];
        while let Some(w) = stack.pop() {
            for &v in &preds[w] {
                delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
            }
            if w != source {
                score[w] += delta[w];
            }
        }
    }

    if mode == NeighborMode::All {
        for value in &mut score {
            *value /= 2.0;
        }
    }
    Ok(vids.iter().map(|&vid| score[vid]).collect())
}

pub fn pagerank(
    graph: &NativeGraph,
    vids: &[usize],
    directed: bool,
    niter: usize,
    eps: f64,
    damping: f64,
) -> EngineResult<Vec<f64>> {
    if !(0.0..=1.0).contains(&damping) {
        return Err(EngineFailure::invalid_value(format!(
            "damping factor must be in [0, 1], got {damping}"
        )));
    }
    for &vid in vids {
        graph.check_vertex(vid)?;
    }
    let n = graph.vcount();
    if n == 0 {
        return Ok(Vec::new());
    }
    let out = graph.neighbor_lists(path_mode(graph, directed));
    let uniform = 1.0 / n as f64;
    let mut rank = vec![uniform; n];
    for _ in 0..niter {
        let dangling: f64 = (0..n).filter(|&v| out[v].is_empty()).map(|v| rank[v]).sum();
        let mut next = vec![(1.0 - damping) * uniform + damping * dangling * uniform; n];
        for (v, targets) in out.iter().enumerate() {
            if targets.is_empty() {
                continue;
            }
            let share = damping * rank[v] / targets.len() as f64;
            for &w in targets {
                next[w] += share;
            }
        }
        let change: f64 = next.iter().zip(&rank).map(|(a, b)| (a - b).abs()).sum();
        rank = next;
        if change < eps {
            break;
        }
    }
    let total: f64 = rank.iter().sum();
    Ok(vids.iter().map(|&vid| rank[vid] / total).collect())
}

struct FlowArc {
    to: usize,
    residual: f64,
    reverse: usize,
}

fn residual_network(graph: &NativeGraph, capacity: &[f64]) -> EngineResult<Vec<Vec<FlowArc>>> {
    if capacity.len() != graph.ecount() {
        return Err(EngineFailure::invalid_value(format!(
            "capacity vector has {} entries, graph has {} edges",
            capacity.len(),
            graph.ecount()
        )));
    }
    let mut network: Vec<Vec<FlowArc>> = (0..graph.vcount()).map(|_| Vec::new()).collect();
    for ((a, b), &cap) in graph.edges().zip(capacity) {
        if cap < 0.0 || cap.is_nan() {
            return Err(EngineFailure::invalid_value("capacities must be non-negative"));
        }
        if a == b {
            continue;
        }
        let back = if graph.is_directed() { 0.0 } else { cap };
        let forward_index = network[a].len();
        let reverse_index = network[b].len();
        network[a].push(FlowArc {
            to: b,
            residual: cap,
            reverse: reverse_index,
        });
        network[b].push(FlowArc {
            to: a,
            residual: back,
            reverse: forward_index,
        });
    }
    Ok(network)
}

/// Edmonds-Karp maximum flow value.
pub fn maxflow_value(
    graph: &NativeGraph,
    source: usize,
    target: usize,
    capacity: &[f64],
) -> EngineResult<f64> {
    graph.check_vertex(source)?;
    graph.check_vertex(target)?;
    if source == target {
        return Err(EngineFailure::invalid_value(
            "source and target vertices are the same",
        ));
    }
    let mut network = residual_network(graph, capacity)?;
    let mut flow = 0.0;
    loop {
        let mut via: Vec<Option<(usize, usize)>> = vec![None; network.len()];
        let mut queue = VecDeque::from([source]);
        let mut reached = false;
        while let Some(v) = queue.pop_front() {
            for (index, arc) in network[v].iter().enumerate() {
                if arc.residual > 0.0 && via[arc.to].is_none() && arc.to != source {
                    via[arc.to] = Some((v, index));
                    if arc.to == target {
                        reached = true;
                        break;
                    }
                    queue.push_back(arc.to);
                }
            }
            if reached {
                break;
            }
        }
        if !reached {
            return Ok(flow);
        }

        let mut bottleneck = f64::INFINITY;
        let mut v = target;
        while let Some((prev, index)) = via[v] {
            bottleneck = bottleneck.min(network[prev][index].residual);
            v = prev;
        }
        let mut v = target;
        while let Some((prev, index)) = via[v] {
            network[prev][index].residual -= bottleneck;
            let reverse = network[prev][index].reverse;
            network[v][reverse].residual += bottleneck;
            v = prev;
        }
        flow += bottleneck;
    }
}

/// Minimum cut value. A missing endpoint means the minimum over every choice of it.
pub fn mincut_value(
    graph: &NativeGraph,
    source: Option<usize>,
    target: Option<usize>,
    capacity: &[f64],
) -> EngineResult<f64> {
    let n = graph.vcount();
    match (source, target) {
        (Some(s), Some(t)) => maxflow_value(graph, s, t, capacity),
        (None, None) => {
            let mut best: Option<f64> = None;
            for t in 1..n {
                let mut value = maxflow_value(graph, 0, t, capacity)?;
                if graph.is_directed() {
                    value = value.min(maxflow_value(graph, t, 0, capacity)?);
                }
                best = Some(best.map_or(value, |b| b.min(value)));
            }
            Ok(best.unwrap_or(0.0))
        }
        (None, Some(t)) => {
            graph.check_vertex(t)?;
            let mut best: Option<f64> = None;
            for s in (0..n).filter(|&s| s != t) {
                let value = maxflow_value(graph, s, t, capacity)?;
                best = Some(best.map_or(value, |b| b.min(value)));
            }
            Ok(best.unwrap_or(0.0))
        }
        (Some(s), None) => {
            graph.check_vertex(s)?;
            let mut best: Option<f64> = None;
            for t in (0..n).filter(|&t| t != s) {
                let value = maxflow_value(graph, s, t, capacity)?;
                best = Some(best.map_or(value, |b| b.min(value)));
            }
            Ok(best.unwrap_or(0.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ops::create;

    #[test]
    fn bfs_records_layers_and_parents() {
        let graph = create(4, false, &[0, 1, 0, 2, 2, 3], 0).expect("create");
        let tree = bfs(&graph, 0, NeighborMode::All).expect("bfs");
        assert_eq!(tree.order, vec![0, 1, 2, 3]);
        assert_eq!(tree.layers, vec![0, 1, 3, 4]);
        assert_eq!(tree.parents, vec![None, Some(0), Some(0), Some(2)]);
    }

    #[test]
    fn strong_components_split_one_way_link() {
        let graph = create(4, true, &[0, 1, 1, 0, 1, 2, 2, 3, 3, 2], 0).expect("create");
        assert_eq!(components(&graph, true), vec![0, 0, 1, 1]);
        assert_eq!(components(&graph, false), vec![0, 0, 0, 0]);
    }

    #[test]
    fn diameter_of_disconnected_graph_depends_on_unconn() {
        let graph = create(4, false, &[0, 1, 1, 2], 0).expect("create");
        assert_eq!(diameter(&graph, false, true), 2);
        assert_eq!(diameter(&graph, false, false), 4);
    }

    #[test]
    fn maxflow_on_parallel_paths() {
        let graph = create(4, true, &[0, 1, 1, 3, 0, 2, 2, 3], 0).expect("create");
        let flow = maxflow_value(&graph, 0, 3, &[1.0, 2.0, 3.0, 1.5]).expect("flow");
        assert!((flow - 2.5).abs() < 1e-9);
    }

    #[test]
    fn betweenness_of_path_center() {
        let graph = create(3, false, &[0, 1, 1, 2], 0).expect("create");
        let scores = betweenness(&graph, &[0, 1, 2], true).expect("betweenness");
        assert_eq!(scores, vec![0.0, 1.0, 0.0]);
    }
}
