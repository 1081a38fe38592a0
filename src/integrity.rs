use std::{fmt, result};

use serde::Serialize;

use crate::attributes::ElementKind;
use crate::errors::GraphError;
use crate::graph::Graph;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub misaligned_vertex_attrs: Vec<String>,
    pub misaligned_edge_attrs: Vec<String>,
    pub dangling_edge_endpoints: usize,
    pub count_mismatches: usize,
}

impl IntegrityReport {
    pub fn merge(&mut self, other: &IntegrityReport) {
        self.vertex_count = self.vertex_count.max(other.vertex_count);
        self.edge_count = self.edge_count.max(other.edge_count);
        self.misaligned_vertex_attrs
            .extend(other.misaligned_vertex_attrs.iter().cloned());
        self.misaligned_edge_attrs
            .extend(other.misaligned_edge_attrs.iter().cloned());
        self.dangling_edge_endpoints += other.dangling_edge_endpoints;
        self.count_mismatches += other.count_mismatches;
    }

    pub fn has_issues(&self) -> bool {
        !self.misaligned_vertex_attrs.is_empty()
            || !self.misaligned_edge_attrs.is_empty()
            || self.dangling_edge_endpoints > 0
            || self.count_mismatches > 0
    }
}

#[derive(Debug)]
pub struct IntegrityError {
    pub report: IntegrityReport,
    pub source: Option<GraphError>,
}

impl fmt::Display for IntegrityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "graph integrity violations detected")
    }
}

impl std::error::Error for IntegrityError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|err| err as &dyn std::error::Error)
    }
}

/// Attribute arrays whose length disagrees with the element count.
pub fn validate_attribute_alignment(graph: &Graph) -> IntegrityReport {
    let store = graph.attributes();
    IntegrityReport {
        misaligned_vertex_attrs: store.misaligned(ElementKind::Vertex),
        misaligned_edge_attrs: store.misaligned(ElementKind::Edge),
        ..base_report(graph)
    }
}

/// Engine structure against the handle's bookkeeping.
pub fn validate_structure(graph: &Graph) -> Result<IntegrityReport, GraphError> {
    let native = graph.native()?;
    let mut report = base_report(graph);
    report.dangling_edge_endpoints = native
        .edges()
        .map(|(a, b)| usize::from(a >= native.vcount()) + usize::from(b >= native.vcount()))
        .sum();
    report.count_mismatches = usize::from(native.vcount() != graph.vcount())
        + usize::from(native.ecount() != graph.ecount());
    Ok(report)
}

pub fn check_consistency(graph: &Graph) -> Result<IntegrityReport, GraphError> {
    let mut report = IntegrityReport::default();
    report.merge(&validate_attribute_alignment(graph));
    report.merge(&validate_structure(graph)?);
    Ok(report)
}

pub fn check_consistency_strict(graph: &Graph) -> result::Result<(), IntegrityError> {
    let report = check_consistency(graph).map_err(|err| IntegrityError {
        report: IntegrityReport::default(),
        source: Some(err),
    })?;
    if report.has_issues() {
        Err(IntegrityError {
            report,
            source: None,
        })
    } else {
        Ok(())
    }
}

fn base_report(graph: &Graph) -> IntegrityReport {
    IntegrityReport {
        vertex_count: graph.vcount(),
        edge_count: graph.ecount(),
        ..IntegrityReport::default()
    }
}
