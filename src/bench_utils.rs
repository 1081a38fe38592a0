//! Deterministic graph datasets for the criterion benches.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::conversion::EdgeList;
use crate::errors::GraphResult;
use crate::graph::Graph;
use crate::value::AttrValue;

#[derive(Clone, Debug)]
pub struct GraphDataset {
    pub vertices: usize,
    pub pairs: Vec<(usize, usize)>,
    pub weights: Vec<f64>,
}

impl GraphDataset {
    pub fn nodes(&self) -> usize {
        self.vertices
    }

    pub fn edges(&self) -> usize {
        self.pairs.len()
    }

    pub fn degrees(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.vertices];
        for &(from, to) in &self.pairs {
            counts[from] += 1;
            counts[to] += 1;
        }
        counts
    }

    pub fn hub_index(&self) -> usize {
        let mut best = (0usize, 0usize);
        for (idx, deg) in self.degrees().into_iter().enumerate() {
            if deg > best.0 {
                best = (deg, idx);
            }
        }
        best.1
    }

    pub fn edge_list(&self) -> EdgeList {
        EdgeList::new(self.pairs.clone())
    }

    /// The edge list as a host would hand it over: a list of two-int lists.
    pub fn host_edges(&self) -> AttrValue {
        AttrValue::List(
            self.pairs
                .iter()
                .map(|&(a, b)| AttrValue::List(vec![AttrValue::Int(a as i64), AttrValue::Int(b as i64)]))
                .collect(),
        )
    }

    /// Builds the graph with a `weight` edge attribute.
    pub fn build(&self, directed: bool) -> GraphResult<Graph> {
        let mut graph = Graph::from_edges(self.edge_list(), self.vertices as i64, directed)?;
        graph.set_edge_attr(
            "weight",
            self.weights.iter().copied().map(AttrValue::Float).collect(),
        )?;
        Ok(graph)
    }
}

#[derive(Clone, Debug)]
pub enum GraphShape {
    Line,
    Star,
    Grid2D { width: usize, height: usize },
    RandomErdosRenyi { edges: usize },
    ScaleFree { m: usize },
}

pub fn generate_graph(shape: GraphShape, node_count: usize, seed: u64) -> GraphDataset {
    assert!(node_count > 1, "node_count must exceed 1");
    let mut pairs = match shape {
        GraphShape::Line => (0..node_count - 1).map(|idx| (idx, idx + 1)).collect(),
        GraphShape::Star => (1..node_count).map(|leaf| (0, leaf)).collect(),
        GraphShape::Grid2D { width, height } => generate_grid_pairs(width, height, node_count),
        GraphShape::RandomErdosRenyi { edges } => generate_random_pairs(node_count, edges, seed),
        GraphShape::ScaleFree { m } => generate_scale_free_pairs(node_count, m, seed),
    };
    pairs.sort_unstable();
    let mut rng = StdRng::seed_from_u64(seed ^ 0x5EED);
    let weights = pairs.iter().map(|_| rng.r#gen::<f64>()).collect();
    GraphDataset {
        vertices: node_count,
        pairs,
        weights,
    }
}

fn generate_grid_pairs(width: usize, height: usize, node_count: usize) -> Vec<(usize, usize)> {
    assert_eq!(
        width * height,
        node_count,
        "grid dimensions must match node count"
    );
    let mut pairs = Vec::with_capacity(width * height * 2);
    for y in 0..height {
        for x in 0..width {
            let base = y * width + x;
            if x + 1 < width {
                pairs.push((base, base + 1));
            }
            if y + 1 < height {
                pairs.push((base, base + width));
            }
        }
    }
    pairs
}

fn generate_random_pairs(node_count: usize, edge_count: usize, seed: u64) -> Vec<(usize, usize)> {
    let total_pairs = pair_count(node_count);
    assert!(
        edge_count as u128 <= total_pairs,
        "edge_count exceeds possible pairs"
    );
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pairs = Vec::with_capacity(edge_count);
    let mut idx = 0u64;
    let mut remaining = edge_count as u64;
    while remaining > 0 && idx < total_pairs as u64 {
        let p = remaining as f64 / (total_pairs as u64 - idx) as f64;
        idx += sample_geometric(&mut rng, p);
        if idx >= total_pairs as u64 {
            break;
        }
        pairs.push(pair_from_index(idx, node_count as u64));
        idx += 1;
        remaining -= 1;
    }
    pairs
}

fn generate_scale_free_pairs(node_count: usize, m: usize, seed: u64) -> Vec<(usize, usize)> {
    assert!(m > 0, "m must be positive");
    assert!(node_count > m + 1, "node_count must exceed m + 1");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut degrees = vec![0usize; node_count];
    let mut pairs = Vec::new();
    let seed_nodes = m + 1;
    for u in 0..seed_nodes {
        for v in (u + 1)..seed_nodes {
            pairs.push((u, v));
            degrees[u] += 1;
            degrees[v] += 1;
        }
    }
    let mut total_degree: usize = degrees.iter().sum();
    for new_node in seed_nodes..node_count {
        let mut targets: Vec<usize> = Vec::with_capacity(m);
        while targets.len() < m {
            let pick = rng.gen_range(0..total_degree);
            let mut cumulative = 0usize;
            for (candidate, &degree) in degrees.iter().enumerate().take(new_node) {
                cumulative += degree;
                if pick < cumulative {
                    if !targets.contains(&candidate) {
                        targets.push(candidate);
                    }
                    break;
                }
            }
        }
        for target in targets {
            pairs.push((target, new_node));
            degrees[target] += 1;
            degrees[new_node] += 1;
            total_degree += 2;
        }
    }
    pairs
}

fn pair_count(nodes: usize) -> u128 {
    let n = nodes as u128;
    n * (n - 1) / 2
}

fn sample_geometric(rng: &mut StdRng, p: f64) -> u64 {
    let u = rng.r#gen::<f64>().max(f64::MIN_POSITIVE);
    ((u.ln() / (1.0 - p).ln()).floor().max(0.0)) as u64
}

fn pair_from_index(idx: u64, nodes: u64) -> (usize, usize) {
    let mut left = 0;
    let mut start = 0u64;
    while left < nodes - 1 {
        let remaining = nodes - left - 1;
        if idx < start + remaining {
            return (left as usize, (left + 1 + (idx - start)) as usize);
        }
        start += remaining;
        left += 1;
    }
    ((nodes - 2) as usize, (nodes - 1) as usize)
}
