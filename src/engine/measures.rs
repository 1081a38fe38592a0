use ahash::AHashSet;

use super::types::NativeGraph;

pub fn density(graph: &NativeGraph, loops: bool) -> f64 {
    let n = graph.vcount() as f64;
    let m = graph.ecount() as f64;
    let possible = match (graph.is_directed(), loops) {
        (true, false) => n * (n - 1.0),
        (true, true) => n * n,
        (false, false) => n * (n - 1.0) / 2.0,
        (false, true) => n * (n + 1.0) / 2.0,
    };
    m / possible
}

/// Fraction of directed edges whose reverse is also present. Undirected graphs are fully reciprocal.
pub fn reciprocity(graph: &NativeGraph, ignore_loops: bool) -> f64 {
    if !graph.is_directed() {
        return 1.0;
    }
    let present: AHashSet<(usize, usize)> = graph.edges().collect();
    let mut total = 0usize;
    let mut mutual = 0usize;
    for (a, b) in graph.edges() {
        if a == b && ignore_loops {
            continue;
        }
        total += 1;
        if present.contains(&(b, a)) {
            mutual += 1;
        }
    }
    mutual as f64 / total as f64
}

/// Global clustering coefficient of the underlying simple undirected graph.
pub fn transitivity_undirected(graph: &NativeGraph) -> f64 {
    let n = graph.vcount();
    let mut neighbors: Vec<AHashSet<usize>> = vec![AHashSet::new(); n];
    for (a, b) in graph.edges() {
        if a != b {
            neighbors[a].insert(b);
            neighbors[b].insert(a);
        }
    }
    let mut triples = 0f64;
    let mut closed = 0f64;
    for set in &neighbors {
        let list: Vec<usize> = set.iter().copied().collect();
        let d = list.len() as f64;
        triples += d * (d - 1.0) / 2.0;
        for (i, &u) in list.iter().enumerate() {
            for &w in &list[i + 1..] {
                if neighbors[u].contains(&w) {
                    closed += 1.0;
                }
            }
        }
    }
    closed / triples
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ops::create;

    #[test]
    fn triangle_is_fully_transitive() {
        let graph = create(3, false, &[0, 1, 1, 2, 2, 0], 0).expect("create");
        assert!((transitivity_undirected(&graph) - 1.0).abs() < 1e-12);
        assert!((density(&graph, false) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn reciprocity_counts_mutual_pairs() {
        let graph = create(3, true, &[0, 1, 1, 0, 1, 2], 0).expect("create");
        assert!((reciprocity(&graph, true) - 2.0 / 3.0).abs() < 1e-12);
    }
}
