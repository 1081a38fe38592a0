//! Graph operators. Results are new handles with empty attribute stores.

use tracing::debug;

use super::Graph;
use crate::conversion::GraphOperands;
use crate::engine::{EngineResult, NativeGraph, ops};
use crate::errors::{GraphError, GraphResult};

fn natives<'a>(operands: &GraphOperands<'a>) -> GraphResult<(Vec<&'a NativeGraph>, &'a Graph)> {
    let graphs = operands.graphs();
    let first = *graphs
        .first()
        .ok_or_else(|| GraphError::validation("operator needs at least one graph"))?;
    let natives = graphs
        .iter()
        .map(|&graph| graph.native())
        .collect::<GraphResult<Vec<_>>>()?;
    Ok((natives, first))
}

fn combine<'a, O>(
    operands: O,
    name: &str,
    op: fn(&[&NativeGraph]) -> EngineResult<NativeGraph>,
) -> GraphResult<Graph>
where
    O: Into<GraphOperands<'a>>,
{
    let operands = operands.into();
    let (natives, first) = natives(&operands)?;
    let result = Graph::from_native(op(&natives)?, first.config.clone());
    debug!(operator = name, operands = natives.len(), result = %result.id, "operator applied");
    Ok(result)
}

/// Vertex sets placed side by side; counts add up.
pub fn disjoint_union<'a, O: Into<GraphOperands<'a>>>(operands: O) -> GraphResult<Graph> {
    combine(operands, "disjoint_union", ops::disjoint_union)
}

/// Edges present in any operand, on the largest vertex set.
pub fn union<'a, O: Into<GraphOperands<'a>>>(operands: O) -> GraphResult<Graph> {
    combine(operands, "union", ops::union)
}

/// Edges present in every operand.
pub fn intersection<'a, O: Into<GraphOperands<'a>>>(operands: O) -> GraphResult<Graph> {
    combine(operands, "intersection", ops::intersection)
}

impl Graph {
    pub fn disjoint_union_with(&self, other: &Graph) -> GraphResult<Graph> {
        disjoint_union([self, other])
    }

    pub fn union_with(&self, other: &Graph) -> GraphResult<Graph> {
        union([self, other])
    }

    pub fn intersection_with(&self, other: &Graph) -> GraphResult<Graph> {
        intersection([self, other])
    }

    /// Edges of `self` absent from `other`.
    pub fn difference(&self, other: &Graph) -> GraphResult<Graph> {
        let native = ops::difference(self.native()?, other.native()?)?;
        Ok(Graph::from_native(native, self.config.clone()))
    }

    /// Relational composition of `self` followed by `other`.
    pub fn compose(&self, other: &Graph) -> GraphResult<Graph> {
        let native = ops::compose(self.native()?, other.native()?)?;
        Ok(Graph::from_native(native, self.config.clone()))
    }

    pub fn complementer(&self, loops: bool) -> GraphResult<Graph> {
        let native = ops::complementer(self.native()?, loops)?;
        Ok(Graph::from_native(native, self.config.clone()))
    }
}
