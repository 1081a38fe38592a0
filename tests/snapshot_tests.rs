use graphbind::{AttrValue, ErrorClass, Graph, GraphConfig, OpaqueValue, snapshot};
use tempfile::tempdir;

fn annotated() -> Graph {
    let mut graph = Graph::from_edges([(0, 1), (1, 2)], 4, true).expect("graph");
    graph.set_graph_attr("title", "chain");
    graph
        .set_vertex_attr(
            "label",
            vec!["a".into(), "b".into(), AttrValue::Null, "d".into()],
        )
        .expect("labels");
    graph
        .set_edge_attr("weight", vec![AttrValue::Float(0.5), AttrValue::Int(2)])
        .expect("weights");
    graph
}

#[test]
fn test_dump_and_load_preserve_structure_and_attributes() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("graph.jsonl");
    let graph = annotated();
    snapshot::dump_graph_to_path(&graph, &path).expect("dump");

    let loaded = snapshot::load_graph_from_path(&path, &GraphConfig::default()).expect("load");
    assert_eq!(loaded.vcount(), 4);
    assert!(loaded.is_directed());
    assert_eq!(loaded.get_edgelist(), graph.get_edgelist());
    assert_eq!(loaded.graph_attr("title").expect("title"), &AttrValue::from("chain"));
    assert_eq!(
        loaded.vertex_attr("label").expect("labels"),
        graph.vertex_attr("label").expect("labels")
    );
    assert_eq!(
        loaded.edge_attr("weight").expect("weights"),
        &[AttrValue::Float(0.5), AttrValue::Int(2)]
    );
    assert_ne!(loaded.id(), graph.id());
}

#[test]
fn test_dump_writes_one_tagged_record_per_line() {
    let mut out = Vec::new();
    snapshot::dump_graph_to_writer(&annotated(), &mut out).expect("dump");
    let text = String::from_utf8(out).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();
    // header, two edges, one graph attr, one vertex attr, one edge attr
    assert_eq!(lines.len(), 6);
    assert!(lines[0].contains(r#""type":"header""#));
    assert!(lines[1].contains(r#""type":"edge""#));
}

#[test]
fn test_opaque_values_are_dumped_as_null() {
    let mut graph = Graph::new(1, false).expect("graph");
    graph.set_graph_attr("handle", OpaqueValue::new(7u32));
    let mut out = Vec::new();
    snapshot::dump_graph_to_writer(&graph, &mut out).expect("dump");
    let loaded =
        snapshot::load_graph_from_reader(out.as_slice(), &GraphConfig::default()).expect("load");
    assert_eq!(loaded.graph_attr("handle").expect("handle"), &AttrValue::Null);
}

#[test]
fn test_restore_replaces_contents_and_bumps_generation() {
    let mut out = Vec::new();
    snapshot::dump_graph_to_writer(&annotated(), &mut out).expect("dump");

    let mut graph = Graph::new(2, false).expect("graph");
    let id = graph.id();
    let generation = graph.generation();
    snapshot::restore_graph_from_reader(&mut graph, out.as_slice()).expect("restore");
    assert_eq!(graph.id(), id);
    assert!(graph.generation() > generation);
    assert_eq!(graph.vcount(), 4);
    assert_eq!(graph.edge_attr("weight").expect("weights").len(), 2);
}

#[test]
fn test_edge_outside_vertex_range_is_rejected() {
    let data = concat!(
        r#"{"type":"header","vertices":2,"directed":false}"#,
        "\n",
        r#"{"type":"edge","id":0,"from":0,"to":5}"#,
        "\n"
    );
    let err = snapshot::load_graph_from_reader(data.as_bytes(), &GraphConfig::default())
        .expect_err("dangling endpoint");
    assert_eq!(err.class(), ErrorClass::Validation);
}

#[test]
fn test_misaligned_attribute_array_is_rejected() {
    let data = concat!(
        r#"{"type":"header","vertices":2,"directed":false}"#,
        "\n",
        r#"{"type":"vertex_attr","key":"x","values":[1]}"#,
        "\n"
    );
    let err = snapshot::load_graph_from_reader(data.as_bytes(), &GraphConfig::default())
        .expect_err("short array");
    assert_eq!(err.class(), ErrorClass::Validation);
}

#[test]
fn test_missing_snapshot_file_is_resource_error() {
    let dir = tempdir().expect("tempdir");
    let err = snapshot::load_graph_from_path(dir.path().join("none.jsonl"), &GraphConfig::default())
        .expect_err("missing");
    assert_eq!(err.class(), ErrorClass::Resource);
}

#[test]
fn test_header_vertex_count_beyond_limit_is_rejected() {
    let data = concat!(
        r#"{"type":"header","vertices":1099511627776,"directed":true}"#,
        "\n"
    );
    let err = snapshot::load_graph_from_reader(data.as_bytes(), &GraphConfig::default())
        .expect_err("header too large");
    assert_eq!(err.class(), ErrorClass::Engine);
}
