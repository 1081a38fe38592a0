use graphbind::{
    AttrValue, Capacity, Connectedness, ErrorClass, Graph, GraphConfig, NeighborMode,
    PageRankOptions, Reply, Selector,
};

fn path(n: usize) -> Graph {
    let edges: Vec<(usize, usize)> = (1..n).map(|v| (v - 1, v)).collect();
    Graph::from_edges(edges, n as i64, false).expect("path")
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn test_degree_reply_shape_follows_selector() {
    let graph = path(4);
    assert_eq!(
        graph.degree(1, NeighborMode::All, true).expect("single"),
        Reply::Single(2)
    );
    assert_eq!(
        graph.degree(Selector::All, NeighborMode::All, true).expect("all"),
        Reply::Many(vec![1, 2, 2, 1])
    );
    assert_eq!(graph.maxdegree(Selector::All, NeighborMode::All, true).expect("max"), 2);
}

#[test]
fn test_degree_out_of_range_is_validation_error() {
    let graph = path(3);
    let err = graph
        .degree(vec![0, 7], NeighborMode::All, true)
        .expect_err("out of range");
    assert_eq!(err.class(), ErrorClass::Validation);
}

#[test]
fn test_directed_neighbor_modes() {
    let graph = Graph::from_edges([(0, 1), (2, 1)], 3, true).expect("graph");
    assert_eq!(graph.successors(0).expect("out"), vec![1]);
    assert_eq!(graph.predecessors(1).expect("in"), vec![0, 2]);
    assert!(graph.are_connected(0, 1).expect("0->1"));
    assert!(!graph.are_connected(1, 0).expect("1->0"));
    assert_eq!(graph.get_eid(1, 2, false).expect("undirected lookup"), 1);
    assert_eq!(graph.get_eid(1, 2, true).expect_err("directed").class(), ErrorClass::Engine);
}

#[test]
fn test_connectivity_modes() {
    let graph = Graph::from_edges([(0, 1), (1, 2)], 3, true).expect("graph");
    assert!(graph.is_connected(Connectedness::Weak).expect("weak"));
    assert!(!graph.is_connected(Connectedness::Strong).expect("strong"));

    let split = Graph::from_edges([(0, 1)], 4, false).expect("split");
    assert_eq!(split.clusters(Connectedness::Weak).expect("clusters"), vec![0, 0, 1, 2]);
    assert!(Graph::new(0, false).expect("null").is_connected(Connectedness::Weak).expect("null graph"));
}

#[test]
fn test_shortest_paths_mark_unreachable_as_none() {
    let graph = Graph::from_edges([(0, 1)], 3, false).expect("graph");
    let paths = graph.shortest_paths(0, NeighborMode::All).expect("paths");
    assert_eq!(paths.rows(), 1);
    assert_eq!(paths.row(0).expect("row"), &[Some(0), Some(1), None]);
}

#[test]
fn test_diameter_and_average_path_length() {
    let graph = path(4);
    assert_eq!(graph.diameter(false, true).expect("diameter"), 3);
    // pairs: three at distance 1, two at 2, one at 3
    assert!(approx(graph.average_path_length(false, true).expect("apl"), 10.0 / 6.0));

    let split = Graph::from_edges([(0, 1)], 3, false).expect("split");
    assert_eq!(split.diameter(false, false).expect("unconnected"), 3);
    assert_eq!(split.diameter(false, true).expect("connected part"), 1);
}

#[test]
fn test_centrality_scores() {
    let graph = path(3);
    let betweenness = graph.betweenness(Selector::All, false).expect("betweenness").into_vec();
    assert_eq!(betweenness, vec![0.0, 1.0, 0.0]);

    let closeness = graph.closeness(1, NeighborMode::All).expect("closeness");
    assert_eq!(closeness, Reply::Single(1.0));
}

#[test]
fn test_pagerank_is_uniform_on_a_cycle() {
    let graph = Graph::from_edges([(0, 1), (1, 2), (2, 0)], 3, true).expect("cycle");
    let ranks = graph
        .pagerank(Selector::All, &PageRankOptions::default())
        .expect("pagerank")
        .into_vec();
    assert!(ranks.iter().all(|&r| approx(r, 1.0 / 3.0)));

    let bad = PageRankOptions {
        damping: 1.5,
        ..PageRankOptions::default()
    };
    assert_eq!(graph.pagerank(0, &bad).expect_err("damping").class(), ErrorClass::Engine);
}

#[test]
fn test_structural_measures() {
    let triangle = Graph::full(3, false, false).expect("triangle");
    assert!(approx(triangle.density(false).expect("density"), 1.0));
    assert!(approx(triangle.transitivity_undirected().expect("transitivity"), 1.0));

    let arcs = Graph::from_edges([(0, 1), (1, 0), (1, 2)], 3, true).expect("arcs");
    assert!(approx(arcs.reciprocity(true).expect("reciprocity"), 2.0 / 3.0));
}

#[test]
fn test_adjacency_counts_undirected_loop_once() {
    let graph = Graph::from_edges([(0, 0), (0, 1)], 2, false).expect("graph");
    let matrix = graph.get_adjacency(Default::default()).expect("adjacency");
    assert_eq!(matrix.to_rows(), vec![vec![1, 1], vec![1, 0]]);
}

#[test]
fn test_laplacian_of_single_edge() {
    let graph = path(2);
    let laplacian = graph.laplacian(false).expect("laplacian");
    assert_eq!(laplacian.to_rows(), vec![vec![1.0, -1.0], vec![-1.0, 1.0]]);
}

#[test]
fn test_flow_with_attribute_capacity() {
    let mut graph = Graph::from_edges([(0, 1), (1, 2), (0, 2)], 3, true).expect("graph");
    graph
        .set_edge_attr(
            "cap",
            vec![AttrValue::Float(2.0), AttrValue::Float(1.0), AttrValue::Int(3)],
        )
        .expect("capacity");
    let flow = graph
        .maxflow_value(0, 2, &Capacity::Attribute("cap".to_string()))
        .expect("flow");
    assert!(approx(flow, 4.0));

    let err = graph
        .maxflow_value(0, 2, &Capacity::Values(vec![1.0]))
        .expect_err("short capacity");
    assert_eq!(err.class(), ErrorClass::Validation);

    let err = graph
        .maxflow_value(0, 2, &Capacity::Attribute("missing".to_string()))
        .expect_err("missing key");
    assert_eq!(err.class(), ErrorClass::KeyNotFound);
}

#[test]
fn test_global_mincut_of_path_is_one() {
    let graph = path(4);
    assert!(approx(graph.mincut_value(None, None, &Capacity::Unit).expect("mincut"), 1.0));
}

#[test]
fn test_bfs_layers_and_parents() {
    let graph = Graph::from_edges([(0, 1), (0, 2), (1, 3)], 4, false).expect("graph");
    let result = graph.bfs(0, NeighborMode::All).expect("bfs");
    assert_eq!(result.vids, vec![0, 1, 2, 3]);
    assert_eq!(result.layers, vec![0, 1, 3, 4]);
    assert_eq!(result.parents, vec![None, Some(0), Some(0), Some(1)]);
    assert_eq!(graph.subcomponent(3, NeighborMode::All).expect("component").len(), 4);
}

#[test]
fn test_layouts_have_one_row_per_vertex() {
    let graph = path(5);
    let circle = graph.layout_circle().expect("circle");
    assert_eq!((circle.rows(), circle.cols()), (5, 2));
    assert!(approx(*circle.get(0, 0).expect("x0"), 1.0));

    let grid = graph.layout_grid(2).expect("grid");
    assert_eq!(grid.row(3).expect("row"), &[1.0, 1.0]);

    let seeded = Graph::from_edges_with_config([(0, 1)], 2, false, &GraphConfig::seeded(5))
        .expect("seeded");
    assert_eq!(
        seeded.layout_random().expect("a"),
        seeded.layout_random().expect("b")
    );
}
