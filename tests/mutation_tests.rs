use graphbind::{AttrValue, ErrorClass, Graph, Selector};

fn ints(values: &[i64]) -> Vec<AttrValue> {
    values.iter().copied().map(AttrValue::Int).collect()
}

fn labelled_square() -> Graph {
    let mut graph = Graph::from_edges([(0, 1), (1, 2), (2, 3), (3, 0)], 4, false).expect("graph");
    graph.set_vertex_attr("id", ints(&[10, 11, 12, 13])).expect("vertex ids");
    graph.set_edge_attr("id", ints(&[100, 101, 102, 103])).expect("edge ids");
    graph
}

#[test]
fn test_add_vertices_extends_arrays_with_null() {
    let mut graph = labelled_square();
    graph.add_vertices(2).expect("add");
    assert_eq!(graph.vcount(), 6);
    let ids = graph.vertex_attr("id").expect("ids");
    assert_eq!(&ids[4..], &[AttrValue::Null, AttrValue::Null]);
}

#[test]
fn test_negative_vertex_count_is_rejected() {
    let mut graph = labelled_square();
    let err = graph.add_vertices(-1).expect_err("negative");
    assert_eq!(err.class(), ErrorClass::Validation);
    assert_eq!(graph.vcount(), 4);
    assert!(Graph::new(-5, false).is_err());
}

#[test]
fn test_add_edges_appends_null_edge_attributes() {
    let mut graph = labelled_square();
    graph.add_edges([(0, 2), (1, 3)]).expect("add");
    assert_eq!(graph.ecount(), 6);
    assert_eq!(graph.get_edgelist()[4..], [(0, 2), (1, 3)]);
    let ids = graph.edge_attr("id").expect("ids");
    assert_eq!(ids[4], AttrValue::Null);
    assert_eq!(ids[0], AttrValue::Int(100));
}

#[test]
fn test_delete_vertices_realigns_vertex_and_edge_attributes() {
    let mut graph = labelled_square();
    graph.delete_vertices(1).expect("delete");
    assert_eq!(graph.vcount(), 3);
    assert_eq!(graph.vertex_attr("id").expect("ids"), ints(&[10, 12, 13]).as_slice());
    // edges 0-1 and 1-2 are gone; 2-3 and 3-0 survive, renumbered
    assert_eq!(graph.get_edgelist(), vec![(1, 2), (2, 0)]);
    assert_eq!(graph.edge_attr("id").expect("ids"), ints(&[102, 103]).as_slice());
}

#[test]
fn test_failed_delete_vertices_leaves_graph_unchanged() {
    let mut graph = labelled_square();
    let generation = graph.generation();
    let err = graph.delete_vertices(vec![999]).expect_err("out of range");
    assert_eq!(err.class(), ErrorClass::Validation);
    assert_eq!(graph.vcount(), 4);
    assert_eq!(graph.ecount(), 4);
    assert_eq!(graph.vertex_attr("id").expect("ids"), ints(&[10, 11, 12, 13]).as_slice());
    assert_eq!(graph.generation(), generation);
}

#[test]
fn test_delete_edges_by_id_keeps_survivor_attributes() {
    let mut graph = labelled_square();
    graph.delete_edges(vec![0, 2]).expect("delete");
    assert_eq!(graph.get_edgelist(), vec![(1, 2), (3, 0)]);
    assert_eq!(graph.edge_attr("id").expect("ids"), ints(&[101, 103]).as_slice());
}

#[test]
fn test_delete_edges_by_pairs_is_all_or_nothing() {
    let mut graph = labelled_square();
    let err = graph
        .delete_edges_by_pairs([(0, 1), (0, 2)])
        .expect_err("0-2 does not exist");
    assert_eq!(err.class(), ErrorClass::Engine);
    assert_eq!(graph.ecount(), 4);

    graph.delete_edges_by_pairs([(1, 0)]).expect("undirected pair");
    assert_eq!(graph.ecount(), 3);
    assert_eq!(graph.edge_attr("id").expect("ids"), ints(&[101, 102, 103]).as_slice());
}

#[test]
fn test_simplify_keeps_first_occurrence_attributes() {
    let mut graph = Graph::from_edges([(0, 1), (1, 0), (1, 1), (1, 2)], 3, false).expect("graph");
    graph.set_edge_attr("id", ints(&[1, 2, 3, 4])).expect("ids");
    graph.simplify(true, true).expect("simplify");
    assert_eq!(graph.get_edgelist(), vec![(0, 1), (1, 2)]);
    assert_eq!(graph.edge_attr("id").expect("ids"), ints(&[1, 4]).as_slice());
}

#[test]
fn test_to_undirected_collapse_merges_reciprocal_arcs() {
    let mut graph = Graph::from_edges([(0, 1), (1, 0), (1, 2)], 3, true).expect("graph");
    graph.set_edge_attr("id", ints(&[1, 2, 3])).expect("ids");
    graph.to_undirected(true).expect("to_undirected");
    assert!(!graph.is_directed());
    assert_eq!(graph.ecount(), 2);
    assert_eq!(graph.edge_attr("id").expect("ids"), ints(&[1, 3]).as_slice());
}

#[test]
fn test_subgraph_keeps_selected_vertices_and_attributes() {
    let graph = labelled_square();
    let sub = graph.subgraph(vec![0, 1, 3]).expect("subgraph");
    assert_eq!(sub.vcount(), 3);
    assert_eq!(sub.vertex_attr("id").expect("ids"), ints(&[10, 11, 13]).as_slice());
    assert_eq!(sub.get_edgelist(), vec![(0, 1), (2, 0)]);
    assert_eq!(sub.edge_attr("id").expect("ids"), ints(&[100, 103]).as_slice());
    assert_eq!(graph.vcount(), 4);
}

#[test]
fn test_structural_change_bumps_generation() {
    let mut graph = labelled_square();
    let start = graph.generation();
    graph.add_vertices(0).expect("noop add");
    graph.delete_edges(Selector::Many(Vec::new())).expect("empty delete");
    graph.add_edges([(0, 2)]).expect("add");
    assert!(graph.generation() > start);
}

#[test]
fn test_add_vertices_beyond_limit_leaves_graph_unchanged() {
    let mut graph = labelled_square();
    let generation = graph.generation();
    let err = graph
        .add_vertices(graphbind::engine::MAX_VERTICES as i64)
        .expect_err("over the limit");
    assert_eq!(err.class(), ErrorClass::Engine);
    assert_eq!(graph.vcount(), 4);
    assert_eq!(graph.generation(), generation);
    assert_eq!(graph.vertex_attr("id").expect("ids"), ints(&[10, 11, 12, 13]).as_slice());
}

#[test]
fn test_repeated_pair_deletes_parallel_edges() {
    let mut graph = Graph::from_edges([(0, 1), (1, 2), (1, 0)], 3, false).expect("graph");
    graph.set_edge_attr("id", ints(&[7, 8, 9])).expect("edge ids");
    graph.delete_edges_by_pairs(vec![(0, 1), (0, 1)]).expect("both parallel edges");
    assert_eq!(graph.get_edgelist(), vec![(1, 2)]);
    assert_eq!(graph.edge_attr("id").expect("ids"), ints(&[8]).as_slice());
}

#[test]
fn test_pair_listed_more_often_than_edges_exist_changes_nothing() {
    let mut graph = Graph::from_edges([(0, 1), (0, 1), (1, 2)], 3, true).expect("graph");
    let generation = graph.generation();
    let err = graph
        .delete_edges_by_pairs(vec![(0, 1), (0, 1), (0, 1)])
        .expect_err("only two 0->1 edges");
    assert_eq!(err.class(), ErrorClass::Engine);
    assert_eq!(graph.ecount(), 3);
    assert_eq!(graph.generation(), generation);
}
