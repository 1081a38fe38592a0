use graphbind::{AttrValue, Graph, integrity};

#[test]
fn test_clean_graph_has_no_issues() {
    let mut graph = Graph::from_edges([(0, 1), (1, 2)], 3, false).expect("graph");
    graph
        .set_edge_attr("w", vec![AttrValue::Int(1), AttrValue::Int(2)])
        .expect("weights");
    graph.delete_vertices(0).expect("delete");

    let report = integrity::check_consistency(&graph).expect("report");
    assert!(!report.has_issues());
    assert_eq!(report.vertex_count, 2);
    assert_eq!(report.edge_count, 1);
    integrity::check_consistency_strict(&graph).expect("strict");
}

#[test]
fn test_report_serializes_to_json() {
    let graph = Graph::new(3, true).expect("graph");
    let report = integrity::check_consistency(&graph).expect("report");
    let json = serde_json::to_value(&report).expect("json");
    assert_eq!(json["vertex_count"], 3);
    assert_eq!(json["dangling_edge_endpoints"], 0);
}

#[test]
fn test_alignment_report_lists_no_keys_after_mutations() {
    let mut graph = Graph::new(2, false).expect("graph");
    graph
        .set_vertex_attr("name", vec!["a".into(), "b".into()])
        .expect("names");
    graph.add_vertices(3).expect("grow");
    graph.add_edges([(0, 4)]).expect("edge");
    graph.es_mut().set("w", 0, vec![AttrValue::Float(1.0)]).expect("weight");
    let report = integrity::validate_attribute_alignment(&graph);
    assert!(report.misaligned_vertex_attrs.is_empty());
    assert!(report.misaligned_edge_attrs.is_empty());

    let structure = integrity::validate_structure(&graph).expect("structure");
    assert_eq!(structure.count_mismatches, 0);
    assert_eq!(structure.vertex_count, 5);
}
