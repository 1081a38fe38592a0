use graphbind::{ErrorClass, Graph, GraphConfig, disjoint_union, intersection, union};

fn graph(edges: &[(usize, usize)], n: i64) -> Graph {
    Graph::from_edges(edges, n, false).expect("graph")
}

#[test]
fn test_disjoint_union_offsets_vertices() {
    let a = graph(&[(0, 1)], 2);
    let b = graph(&[(0, 1), (1, 2)], 3);
    let result = disjoint_union([&a, &b]).expect("disjoint union");
    assert_eq!(result.vcount(), 5);
    assert_eq!(result.get_edgelist(), vec![(0, 1), (2, 3), (3, 4)]);
}

#[test]
fn test_union_accepts_slice_of_graphs() {
    let graphs = vec![graph(&[(0, 1)], 2), graph(&[(1, 0), (1, 2)], 3)];
    let result = union(&graphs).expect("union");
    assert_eq!(result.vcount(), 3);
    assert_eq!(result.ecount(), 2);
}

#[test]
fn test_intersection_keeps_common_edges() {
    let a = graph(&[(0, 1), (1, 2)], 3);
    let b = graph(&[(2, 1), (0, 2)], 3);
    let result = a.intersection_with(&b).expect("intersection");
    assert_eq!(result.ecount(), 1);
    assert!(result.are_connected(1, 2).expect("connected"));
}

#[test]
fn test_single_graph_operand_is_accepted() {
    let a = graph(&[(0, 1)], 2);
    let result = intersection(&a).expect("intersection of one");
    assert_eq!(result.get_edgelist(), a.get_edgelist());
}

#[test]
fn test_mixed_directedness_is_engine_error() {
    let a = graph(&[(0, 1)], 2);
    let b = Graph::from_edges([(0, 1)], 2, true).expect("directed");
    let err = a.union_with(&b).expect_err("mixed");
    assert_eq!(err.class(), ErrorClass::Engine);
}

#[test]
fn test_difference_and_complementer() {
    let full = Graph::full(4, false, false).expect("full");
    let path = graph(&[(0, 1), (1, 2), (2, 3)], 4);
    let diff = full.difference(&path).expect("difference");
    assert_eq!(diff.ecount(), 3);
    assert!(diff.isomorphic(&path.complementer(false).expect("complement")).expect("iso"));
}

#[test]
fn test_compose_follows_paths_of_length_two() {
    let a = Graph::from_edges([(0, 1)], 3, true).expect("a");
    let b = Graph::from_edges([(1, 2)], 3, true).expect("b");
    let result = a.compose(&b).expect("compose");
    assert_eq!(result.get_edgelist(), vec![(0, 2)]);
}

#[test]
fn test_operator_result_has_fresh_attributes_and_inherits_config() {
    let config = GraphConfig::seeded(77);
    let mut a = Graph::from_edges_with_config([(0, 1)], 2, false, &config).expect("a");
    a.set_graph_attr("name", "left");
    let b = graph(&[(0, 1)], 2);
    let result = a.union_with(&b).expect("union");
    assert!(result.graph_attr_names().is_empty());
    assert_eq!(result.config().engine.seed, Some(77));
    assert_ne!(result.id(), a.id());
}
