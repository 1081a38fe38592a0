use std::fs;

use graphbind::{AttrValue, Capacity, ErrorClass, Graph};
use tempfile::tempdir;

#[test]
fn test_edgelist_round_trip() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("graph.txt");
    let graph = Graph::from_edges([(0, 1), (1, 2), (2, 0)], 3, true).expect("graph");
    graph.write_edgelist(&path).expect("write");
    assert_eq!(fs::read_to_string(&path).expect("read"), "0 1\n1 2\n2 0\n");

    let loaded = Graph::read_edgelist(&path, true).expect("load");
    assert_eq!(loaded.get_edgelist(), graph.get_edgelist());
    assert!(loaded.is_directed());
}

#[test]
fn test_missing_file_is_resource_error() {
    let dir = tempdir().expect("tempdir");
    let err = Graph::read_edgelist(dir.path().join("absent.txt"), false).expect_err("absent");
    assert_eq!(err.class(), ErrorClass::Resource);
}

#[test]
fn test_malformed_edgelist_is_engine_parse_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("bad.txt");
    fs::write(&path, "0 1\n2\n").expect("write");
    let err = Graph::read_edgelist(&path, false).expect_err("odd endpoints");
    assert_eq!(err.class(), ErrorClass::Engine);
}

#[test]
fn test_ncol_names_and_weights_become_attributes() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("graph.ncol");
    fs::write(&path, "alice bob 2.5\nbob carol\n").expect("write");
    let graph = Graph::read_ncol(&path, true, true, false).expect("ncol");
    assert_eq!(graph.vcount(), 3);
    assert_eq!(
        graph.vertex_attr("name").expect("names"),
        &[
            AttrValue::from("alice"),
            AttrValue::from("bob"),
            AttrValue::from("carol")
        ]
    );
    assert_eq!(
        graph.edge_attr("weight").expect("weights"),
        &[AttrValue::Float(2.5), AttrValue::Float(0.0)]
    );

    let out = dir.path().join("copy.ncol");
    graph.write_ncol(&out, Some("name"), Some("weight")).expect("write");
    assert_eq!(fs::read_to_string(&out).expect("read"), "alice bob 2.5\nbob carol 0\n");
}

#[test]
fn test_ncol_without_names_skips_attributes() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("graph.ncol");
    fs::write(&path, "a b 1\n").expect("write");
    let graph = Graph::read_ncol(&path, false, false, true).expect("ncol");
    assert!(graph.vertex_attr_names().is_empty());
    assert!(graph.edge_attr_names().is_empty());
}

#[test]
fn test_lgl_groups_edges_by_source() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("graph.lgl");
    let graph = Graph::from_edges([(0, 1), (0, 2), (1, 2)], 4, false).expect("graph");
    graph.write_lgl(&path, None, None, true).expect("write");
    assert_eq!(
        fs::read_to_string(&path).expect("read"),
        "# 0\n1\n2\n# 1\n2\n# 3\n"
    );
}

#[test]
fn test_dimacs_round_trip_keeps_capacities() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("flow.dimacs");
    let graph = Graph::from_edges([(0, 1), (1, 2)], 3, true).expect("graph");
    graph
        .write_dimacs(&path, 0, 2, &Capacity::Values(vec![4.0, 7.0]))
        .expect("write");
    let data = Graph::read_dimacs(&path, true).expect("read");
    assert_eq!(data.source, 0);
    assert_eq!(data.target, 2);
    assert_eq!(data.capacity, vec![4.0, 7.0]);
    assert_eq!(data.graph.get_edgelist(), vec![(0, 1), (1, 2)]);
}

#[test]
fn test_graphml_writer_emits_attribute_keys() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("graph.graphml");
    let mut graph = Graph::from_edges([(0, 1)], 2, false).expect("graph");
    graph
        .set_vertex_attr("label", vec!["a".into(), "b".into()])
        .expect("labels");
    graph.set_edge_attr("w", vec![AttrValue::Float(1.5)]).expect("weights");
    graph.write_graphml(&path).expect("write");
    let text = fs::read_to_string(&path).expect("read");
    assert!(text.contains("<graphml"));
    assert!(text.contains("attr.name=\"label\""));
    assert!(text.contains("attr.name=\"w\""));
    assert!(text.contains("edgedefault=\"undirected\""));
}

#[test]
fn test_graphml_reading_is_unsupported() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("graph.graphml");
    fs::write(&path, "<graphml/>").expect("write");
    let err = Graph::read_graphml(&path, 0).expect_err("unsupported");
    assert_eq!(err.class(), ErrorClass::Engine);
}

#[test]
fn test_pajek_labels_are_stored_under_id() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("graph.net");
    fs::write(
        &path,
        "*Vertices 3\n1 \"first\"\n2 \"second\"\n*Arcs\n1 2\n2 3 0.5\n",
    )
    .expect("write");
    let graph = Graph::read_pajek(&path).expect("pajek");
    assert!(graph.is_directed());
    assert_eq!(graph.get_edgelist(), vec![(0, 1), (1, 2)]);
    assert_eq!(
        graph.vertex_attr("id").expect("labels"),
        &[
            AttrValue::from("first"),
            AttrValue::from("second"),
            AttrValue::from("3")
        ]
    );
    assert_eq!(
        graph.edge_attr("weight").expect("weights"),
        &[AttrValue::Float(1.0), AttrValue::Float(0.5)]
    );
}

#[test]
fn test_edgelist_with_oversized_vertex_id_is_engine_error() {
    let dir = tempdir().expect("tempdir");
    for (name, text) in [
        ("max.txt", "0 18446744073709551615\n"),
        ("limit.txt", "0 1073741824\n"),
    ] {
        let path = dir.path().join(name);
        fs::write(&path, text).expect("write");
        let err = Graph::read_edgelist(&path, false).expect_err("vertex id too large");
        assert_eq!(err.class(), ErrorClass::Engine, "{name}");
    }
}
