use std::f64::consts::TAU;

use rand::{Rng, rngs::StdRng};

use super::types::NativeGraph;

/// Vertices evenly spaced on the unit circle, as flat `(x, y)` rows.
pub fn circle(graph: &NativeGraph) -> Vec<f64> {
    let n = graph.vcount();
    let mut coords = Vec::with_capacity(n * 2);
    for i in 0..n {
        let angle = TAU * i as f64 / n as f64;
        coords.push(angle.cos());
        coords.push(angle.sin());
    }
    coords
}

pub fn random(graph: &NativeGraph, rng: &mut StdRng) -> Vec<f64> {
    (0..graph.vcount() * 2)
        .map(|_| rng.gen_range(-1.0..=1.0))
        .collect()
}

/// Row-by-row grid placement. `width` of zero picks a square-ish grid.
pub fn grid(graph: &NativeGraph, width: usize) -> Vec<f64> {
    let n = graph.vcount();
    let width = if width == 0 {
        (n as f64).sqrt().ceil().max(1.0) as usize
    } else {
        width
    };
    let mut coords = Vec::with_capacity(n * 2);
    for i in 0..n {
        coords.push((i % width) as f64);
        coords.push((i / width) as f64);
    }
    coords
}
