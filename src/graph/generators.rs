//! Graph constructors backed by engine generators.
//!
//! Every constructor follows the same path: validate host arguments, convert
//! buffers, call the engine, then wrap the result (plus any side output) in a
//! new handle. A failed engine call allocates nothing.

use rand::rngs::StdRng;

use super::Graph;
use crate::attributes::ElementKind;
use crate::config::GraphConfig;
use crate::conversion::{Matrix, count_arg, vertex_count_arg};
use crate::engine::{
    AdjacencyMode, EngineResult, NativeGraph, StarMode, TreeMode, generators as engine,
};
use crate::errors::{GraphError, GraphResult};
use crate::value::AttrValue;

/// Random graph model for [`Graph::erdos_renyi`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ErdosRenyi {
    /// Each possible edge independently with probability `p`.
    Gnp(f64),
    /// Exactly `m` edges drawn uniformly.
    Gnm(i64),
}

/// Edges added per step in [`Graph::barabasi`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutDegrees {
    Constant(usize),
    /// One entry per vertex; the first entry is ignored.
    Sequence(Vec<usize>),
}

/// Runs constructors with a fixed configuration, including its random seed.
///
/// ```rust
/// use graphbind::{ErdosRenyi, GraphConfig, GraphFactory};
///
/// let factory = GraphFactory::new(GraphConfig::seeded(9));
/// let g = factory.erdos_renyi(10, ErdosRenyi::Gnm(12), false, false)?;
/// assert_eq!(g.ecount(), 12);
/// # Ok::<(), graphbind::GraphError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct GraphFactory {
    config: GraphConfig,
}

impl GraphFactory {
    pub fn new(config: GraphConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    fn build(&self, native: EngineResult<NativeGraph>) -> GraphResult<Graph> {
        Ok(Graph::from_native(native?, self.config.clone()))
    }

    fn build_random<T>(
        &self,
        generate: impl FnOnce(&mut StdRng) -> EngineResult<T>,
    ) -> GraphResult<T> {
        let mut rng = self.config.engine.rng();
        Ok(generate(&mut rng)?)
    }

    pub fn adjacency(&self, matrix: &Matrix<i64>, mode: AdjacencyMode) -> GraphResult<Graph> {
        if !matrix.is_square() {
            return Err(GraphError::validation(format!(
                "adjacency matrix must be square, got {}x{}",
                matrix.rows(),
                matrix.cols()
            )));
        }
        self.build(engine::adjacency(matrix.data(), matrix.rows(), mode))
    }

    pub fn atlas(&self, index: usize) -> GraphResult<Graph> {
        self.build(engine::atlas(index))
    }

    pub fn barabasi(
        &self,
        n: i64,
        m: &OutDegrees,
        outpref: bool,
        directed: bool,
        power: f64,
        zero_appeal: f64,
    ) -> GraphResult<Graph> {
        let n = vertex_count_arg(n)?;
        let out_degrees = match m {
            OutDegrees::Constant(k) => vec![*k; n],
            OutDegrees::Sequence(seq) if seq.len() == n => seq.clone(),
            OutDegrees::Sequence(seq) => {
                return Err(GraphError::validation(format!(
                    "out-degree sequence needs {n} entries, got {}",
                    seq.len()
                )));
            }
        };
        let native = self.build_random(|rng| {
            engine::barabasi(rng, &out_degrees, outpref, directed, power, zero_appeal)
        })?;
        self.build(Ok(native))
    }

    pub fn erdos_renyi(
        &self,
        n: i64,
        model: ErdosRenyi,
        directed: bool,
        loops: bool,
    ) -> GraphResult<Graph> {
        let n = vertex_count_arg(n)?;
        let native = match model {
            ErdosRenyi::Gnp(p) => {
                if !(0.0..=1.0).contains(&p) {
                    return Err(GraphError::validation(format!(
                        "edge probability must be in [0, 1], got {p}"
                    )));
                }
                self.build_random(|rng| engine::erdos_renyi_gnp(rng, n, p, directed, loops))?
            }
            ErdosRenyi::Gnm(m) => {
                let m = count_arg(m, "edge count")?;
                self.build_random(|rng| engine::erdos_renyi_gnm(rng, n, m, directed, loops))?
            }
        };
        self.build(Ok(native))
    }

    pub fn establishment(
        &self,
        n: i64,
        k: usize,
        type_dist: &[f64],
        pref_matrix: &Matrix<f64>,
        directed: bool,
    ) -> GraphResult<Graph> {
        let n = vertex_count_arg(n)?;
        check_type_matrix(type_dist.len(), pref_matrix)?;
        let (native, _types) = self.build_random(|rng| {
            engine::establishment(rng, n, k, type_dist, pref_matrix.data(), directed)
        })?;
        self.build(Ok(native))
    }

    pub fn full(&self, n: i64, directed: bool, loops: bool) -> GraphResult<Graph> {
        let n = vertex_count_arg(n)?;
        self.build(engine::full(n, directed, loops))
    }

    pub fn grg(&self, n: i64, radius: f64, torus: bool) -> GraphResult<Graph> {
        let n = vertex_count_arg(n)?;
        let native = self.build_random(|rng| engine::grg(rng, n, radius, torus))?;
        self.build(Ok(native))
    }

    pub fn growing_random(
        &self,
        n: i64,
        m: usize,
        directed: bool,
        citation: bool,
    ) -> GraphResult<Graph> {
        let n = vertex_count_arg(n)?;
        let native =
            self.build_random(|rng| engine::growing_random(rng, n, m, directed, citation))?;
        self.build(Ok(native))
    }

    /// Vertex types are stored under `attribute` when given.
    pub fn preference(
        &self,
        n: i64,
        type_dist: &[f64],
        pref_matrix: &Matrix<f64>,
        attribute: Option<&str>,
        directed: bool,
        loops: bool,
    ) -> GraphResult<Graph> {
        let n = vertex_count_arg(n)?;
        check_type_matrix(type_dist.len(), pref_matrix)?;
        let (native, types) = self.build_random(|rng| {
            engine::preference(rng, n, type_dist, pref_matrix.data(), directed, loops)
        })?;
        let mut graph = self.build(Ok(native))?;
        if let Some(key) = attribute {
            let values = types.into_iter().map(|t| AttrValue::Int(t as i64)).collect();
            graph.replace_element_attr(ElementKind::Vertex, key.to_string(), values)?;
        }
        Ok(graph)
    }

    /// `type_dist` and `pref_matrix` are both out-types x in-types. Each
    /// vertex's `[out_type, in_type]` pair is stored under `attribute` when given.
    pub fn asymmetric_preference(
        &self,
        n: i64,
        type_dist: &Matrix<f64>,
        pref_matrix: &Matrix<f64>,
        attribute: Option<&str>,
        loops: bool,
    ) -> GraphResult<Graph> {
        let n = vertex_count_arg(n)?;
        if type_dist.rows() != pref_matrix.rows() || type_dist.cols() != pref_matrix.cols() {
            return Err(GraphError::validation(format!(
                "type distribution is {}x{} but preference matrix is {}x{}",
                type_dist.rows(),
                type_dist.cols(),
                pref_matrix.rows(),
                pref_matrix.cols()
            )));
        }
        let (native, types) = self.build_random(|rng| {
            engine::asymmetric_preference(
                rng,
                n,
                type_dist.rows(),
                type_dist.cols(),
                type_dist.data(),
                pref_matrix.data(),
                loops,
            )
        })?;
        let mut graph = self.build(Ok(native))?;
        if let Some(key) = attribute {
            let values = types
                .into_iter()
                .map(|(out_type, in_type)| {
                    AttrValue::List(vec![
                        AttrValue::Int(out_type as i64),
                        AttrValue::Int(in_type as i64),
                    ])
                })
                .collect();
            graph.replace_element_attr(ElementKind::Vertex, key.to_string(), values)?;
        }
        Ok(graph)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn recent_degree(
        &self,
        n: i64,
        m: usize,
        window: usize,
        outpref: bool,
        directed: bool,
        power: f64,
        zero_appeal: f64,
    ) -> GraphResult<Graph> {
        let n = vertex_count_arg(n)?;
        let native = self.build_random(|rng| {
            engine::recent_degree(rng, n, m, window, outpref, directed, power, zero_appeal)
        })?;
        self.build(Ok(native))
    }

    pub fn star(&self, n: i64, mode: StarMode, center: usize) -> GraphResult<Graph> {
        let n = vertex_count_arg(n)?;
        if n > 0 && center >= n {
            return Err(GraphError::validation(format!(
                "star center {center} out of range (count {n})"
            )));
        }
        self.build(engine::star(n, mode, center))
    }

    pub fn lattice(
        &self,
        dims: &[usize],
        nei: usize,
        directed: bool,
        mutual: bool,
        circular: bool,
    ) -> GraphResult<Graph> {
        self.build(engine::lattice(dims, nei, directed, mutual, circular))
    }

    pub fn ring(&self, n: i64, directed: bool, mutual: bool, circular: bool) -> GraphResult<Graph> {
        let n = vertex_count_arg(n)?;
        self.build(engine::ring(n, directed, mutual, circular))
    }

    pub fn tree(&self, n: i64, children: usize, mode: TreeMode) -> GraphResult<Graph> {
        let n = vertex_count_arg(n)?;
        self.build(engine::tree(n, children, mode))
    }

    pub fn degree_sequence(
        &self,
        out_degrees: &[usize],
        in_degrees: Option<&[usize]>,
    ) -> GraphResult<Graph> {
        let native =
            self.build_random(|rng| engine::degree_sequence(rng, out_degrees, in_degrees))?;
        self.build(Ok(native))
    }

    /// Representative graph of an isomorphism class on 3 or 4 vertices.
    pub fn isoclass(&self, n: usize, class: usize, directed: bool) -> GraphResult<Graph> {
        if !(3..=4).contains(&n) {
            return Err(GraphError::validation(format!(
                "isoclass graphs have 3 or 4 vertices, got {n}"
            )));
        }
        self.build(engine::isoclass_graph(n, class, directed))
    }
}

fn check_type_matrix(types: usize, pref_matrix: &Matrix<f64>) -> GraphResult<()> {
    if pref_matrix.rows() != types || pref_matrix.cols() != types {
        return Err(GraphError::validation(format!(
            "preference matrix must be {types}x{types}, got {}x{}",
            pref_matrix.rows(),
            pref_matrix.cols()
        )));
    }
    Ok(())
}

fn defaults() -> GraphFactory {
    GraphFactory::default()
}

/// Constructors with the default configuration; see [`GraphFactory`] for
/// seeded variants.
impl Graph {
    pub fn adjacency(matrix: &Matrix<i64>, mode: AdjacencyMode) -> GraphResult<Graph> {
        defaults().adjacency(matrix, mode)
    }

    pub fn atlas(index: usize) -> GraphResult<Graph> {
        defaults().atlas(index)
    }

    pub fn barabasi(
        n: i64,
        m: &OutDegrees,
        outpref: bool,
        directed: bool,
        power: f64,
        zero_appeal: f64,
    ) -> GraphResult<Graph> {
        defaults().barabasi(n, m, outpref, directed, power, zero_appeal)
    }

    pub fn erdos_renyi(n: i64, model: ErdosRenyi, directed: bool, loops: bool) -> GraphResult<Graph> {
        defaults().erdos_renyi(n, model, directed, loops)
    }

    pub fn establishment(
        n: i64,
        k: usize,
        type_dist: &[f64],
        pref_matrix: &Matrix<f64>,
        directed: bool,
    ) -> GraphResult<Graph> {
        defaults().establishment(n, k, type_dist, pref_matrix, directed)
    }

    pub fn full(n: i64, directed: bool, loops: bool) -> GraphResult<Graph> {
        defaults().full(n, directed, loops)
    }

    pub fn grg(n: i64, radius: f64, torus: bool) -> GraphResult<Graph> {
        defaults().grg(n, radius, torus)
    }

    pub fn growing_random(n: i64, m: usize, directed: bool, citation: bool) -> GraphResult<Graph> {
        defaults().growing_random(n, m, directed, citation)
    }

    pub fn preference(
        n: i64,
        type_dist: &[f64],
        pref_matrix: &Matrix<f64>,
        attribute: Option<&str>,
        directed: bool,
        loops: bool,
    ) -> GraphResult<Graph> {
        defaults().preference(n, type_dist, pref_matrix, attribute, directed, loops)
    }

    pub fn asymmetric_preference(
        n: i64,
        type_dist: &Matrix<f64>,
        pref_matrix: &Matrix<f64>,
        attribute: Option<&str>,
        loops: bool,
    ) -> GraphResult<Graph> {
        defaults().asymmetric_preference(n, type_dist, pref_matrix, attribute, loops)
    }

    pub fn recent_degree(
        n: i64,
        m: usize,
        window: usize,
        outpref: bool,
        directed: bool,
        power: f64,
        zero_appeal: f64,
    ) -> GraphResult<Graph> {
        defaults().recent_degree(n, m, window, outpref, directed, power, zero_appeal)
    }

    pub fn star(n: i64, mode: StarMode, center: usize) -> GraphResult<Graph> {
        defaults().star(n, mode, center)
    }

    pub fn lattice(
        dims: &[usize],
        nei: usize,
        directed: bool,
        mutual: bool,
        circular: bool,
    ) -> GraphResult<Graph> {
        defaults().lattice(dims, nei, directed, mutual, circular)
    }

    pub fn ring(n: i64, directed: bool, mutual: bool, circular: bool) -> GraphResult<Graph> {
        defaults().ring(n, directed, mutual, circular)
    }

    pub fn tree(n: i64, children: usize, mode: TreeMode) -> GraphResult<Graph> {
        defaults().tree(n, children, mode)
    }

    pub fn degree_sequence(out_degrees: &[usize], in_degrees: Option<&[usize]>) -> GraphResult<Graph> {
        defaults().degree_sequence(out_degrees, in_degrees)
    }

    pub fn isoclass(n: usize, class: usize, directed: bool) -> GraphResult<Graph> {
        defaults().isoclass(n, class, directed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_vertex_count_never_reaches_engine() {
        let err = Graph::full(-1, false, false).unwrap_err();
        assert!(matches!(err, GraphError::Validation(_)));
    }

    #[test]
    fn seeded_factory_is_repeatable() {
        let factory = GraphFactory::new(GraphConfig::seeded(3));
        let a = factory.grg(30, 0.3, false).expect("grg");
        let b = factory.grg(30, 0.3, false).expect("grg");
        assert_eq!(a.get_edgelist(), b.get_edgelist());
    }

    #[test]
    fn out_degree_sequence_length_is_checked() {
        let err = Graph::barabasi(4, &OutDegrees::Sequence(vec![0, 1]), false, false, 1.0, 1.0)
            .unwrap_err();
        assert!(matches!(err, GraphError::Validation(_)));
    }
}
