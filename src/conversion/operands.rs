use std::any::Any;

use crate::errors::ConversionError;
use crate::graph::Graph;

/// Operand of an n-ary operator: one graph or a collection of graphs.
#[derive(Clone, Debug)]
pub enum GraphOperands<'a> {
    One(&'a Graph),
    Many(Vec<&'a Graph>),
}

impl<'a> GraphOperands<'a> {
    /// Dynamic form. Collections are tried before a single graph.
    pub fn from_any(value: &'a dyn Any) -> Result<Self, ConversionError> {
        if let Some(graphs) = value.downcast_ref::<Vec<Graph>>() {
            return Ok(GraphOperands::Many(graphs.iter().collect()));
        }
        if let Some(graphs) = value.downcast_ref::<Box<[Graph]>>() {
            return Ok(GraphOperands::Many(graphs.iter().collect()));
        }
        if let Some(graph) = value.downcast_ref::<Graph>() {
            return Ok(GraphOperands::One(graph));
        }
        Err(ConversionError::TypeMismatch(
            "expected a graph or a collection of graphs".to_string(),
        ))
    }

    pub fn graphs(&self) -> Vec<&'a Graph> {
        match self {
            GraphOperands::One(graph) => vec![*graph],
            GraphOperands::Many(graphs) => graphs.clone(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            GraphOperands::One(_) => 1,
            GraphOperands::Many(graphs) => graphs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> From<&'a Graph> for GraphOperands<'a> {
    fn from(graph: &'a Graph) -> Self {
        GraphOperands::One(graph)
    }
}

impl<'a> From<&'a [Graph]> for GraphOperands<'a> {
    fn from(graphs: &'a [Graph]) -> Self {
        GraphOperands::Many(graphs.iter().collect())
    }
}

impl<'a> From<&'a Vec<Graph>> for GraphOperands<'a> {
    fn from(graphs: &'a Vec<Graph>) -> Self {
        GraphOperands::Many(graphs.iter().collect())
    }
}

impl<'a> From<Vec<&'a Graph>> for GraphOperands<'a> {
    fn from(graphs: Vec<&'a Graph>) -> Self {
        GraphOperands::Many(graphs)
    }
}

impl<'a> From<&'a [&'a Graph]> for GraphOperands<'a> {
    fn from(graphs: &'a [&'a Graph]) -> Self {
        GraphOperands::Many(graphs.to_vec())
    }
}

impl<'a, const N: usize> From<[&'a Graph; N]> for GraphOperands<'a> {
    fn from(graphs: [&'a Graph; N]) -> Self {
        GraphOperands::Many(graphs.to_vec())
    }
}
