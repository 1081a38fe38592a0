use graphbind::{AttrValue, ElementKind, ErrorClass, Graph, NeighborMode, Reply, Selector};

fn path() -> Graph {
    Graph::from_edges([(0, 1), (1, 2), (2, 3)], 4, false).expect("graph")
}

#[test]
fn test_views_report_scope_sizes() {
    let graph = path();
    assert_eq!(graph.vs().len(), 4);
    assert_eq!(graph.es().len(), 3);
    assert!(Graph::new(0, false).expect("empty").vs().is_empty());
}

#[test]
fn test_views_within_one_generation_are_shared() {
    let graph = path();
    let a = graph.vs();
    let b = graph.vs();
    assert!(a.same_view(&b));
    assert!(graph.es().same_view(&graph.es()));
}

#[test]
fn test_structural_change_produces_a_fresh_view() {
    let mut graph = path();
    let before = graph.vs().detach();
    graph.add_vertices(1).expect("add");
    let after = graph.vs().detach();
    assert_ne!(before, after);
    assert!(after.generation() > before.generation());
}

#[test]
fn test_detached_handle_binds_while_generation_is_unchanged() {
    let mut graph = path();
    let handle = graph.es().detach();
    assert_eq!(handle.kind(), ElementKind::Edge);
    assert_eq!(handle.graph(), graph.id());

    graph
        .es_mut()
        .set_all("w", vec![AttrValue::Int(1), AttrValue::Int(2), AttrValue::Int(3)])
        .expect("attribute writes keep the structure");
    let bound = graph.bind_edges(&handle).expect("still valid");
    assert_eq!(bound.len(), 3);

    graph.delete_edges(0).expect("delete");
    let err = graph.bind_edges(&handle).expect_err("stale");
    assert_eq!(err.class(), ErrorClass::StaleView);
}

#[test]
fn test_handle_from_other_graph_or_scope_is_stale() {
    let graph = path();
    let other = path();
    let handle = other.vs().detach();
    assert_eq!(
        graph.bind_vertices(&handle).expect_err("other graph").class(),
        ErrorClass::StaleView
    );
    let own = graph.vs().detach();
    assert_eq!(
        graph.bind_edges(&own).expect_err("wrong scope").class(),
        ErrorClass::StaleView
    );
}

#[test]
fn test_seq_mut_writes_selected_elements() {
    let mut graph = path();
    graph
        .vs_mut()
        .set("color", vec![1, 3], vec!["red".into(), "blue".into()])
        .expect("partial set");
    let colors = graph.vs().attribute("color").expect("colors").to_vec();
    assert_eq!(
        colors,
        vec![
            AttrValue::Null,
            AttrValue::from("red"),
            AttrValue::Null,
            AttrValue::from("blue")
        ]
    );
    assert_eq!(
        graph.vs().get("color", 1).expect("single"),
        Reply::Single(AttrValue::from("red"))
    );

    let removed = graph.vs_mut().delete("color").expect("delete");
    assert_eq!(removed.len(), 4);
    assert!(graph.vs().attribute_names().is_empty());
}

#[test]
fn test_seq_mut_set_all_checks_length() {
    let mut graph = path();
    let err = graph
        .es_mut()
        .set_all("w", vec![AttrValue::Int(1)])
        .expect_err("length mismatch");
    assert_eq!(err.class(), ErrorClass::Validation);
}

#[test]
fn test_edge_seq_endpoints_and_find() {
    let graph = path();
    let es = graph.es();
    assert_eq!(es.endpoints(1).expect("single"), Reply::Single((1, 2)));
    assert_eq!(
        es.endpoints(Selector::All).expect("all"),
        Reply::Many(vec![(0, 1), (1, 2), (2, 3)])
    );
    assert_eq!(es.find(3, 2).expect("either direction"), 2);
    assert_eq!(es.find(0, 3).expect_err("absent").class(), ErrorClass::Engine);
    assert_eq!(es.find(0, 9).expect_err("bad vertex").class(), ErrorClass::Validation);
}

#[test]
fn test_vertex_seq_degree_delegates_to_graph() {
    let graph = path();
    assert_eq!(
        graph.vs().degree(Selector::All, NeighborMode::All, true).expect("degrees"),
        Reply::Many(vec![1, 2, 2, 1])
    );
}

#[test]
fn test_bfs_iter_visits_reachable_vertices_in_order() {
    let graph = Graph::from_edges([(0, 1), (0, 2), (1, 3)], 5, false).expect("graph");
    let order: Vec<usize> = graph
        .bfs_iter(0, NeighborMode::All, false)
        .expect("iter")
        .map(|visit| visit.vertex)
        .collect();
    assert_eq!(order, vec![0, 1, 2, 3]);

    let deepest = graph
        .bfs_iter(0, NeighborMode::All, true)
        .expect("iter")
        .last()
        .expect("last");
    assert_eq!(deepest.distance, Some(2));
    assert_eq!(deepest.parent, Some(1));

    assert_eq!(
        graph.bfs_iter(5, NeighborMode::All, false).expect_err("root").class(),
        ErrorClass::Validation
    );
}

#[test]
fn test_directed_bfs_follows_mode() {
    let graph = Graph::from_edges([(1, 0), (1, 2)], 3, true).expect("graph");
    assert_eq!(graph.bfs_iter(0, NeighborMode::Out, false).expect("out").count(), 1);
    assert_eq!(graph.bfs_iter(0, NeighborMode::In, false).expect("in").count(), 2);
    assert_eq!(graph.bfs_iter(0, NeighborMode::All, false).expect("all").count(), 3);
}
