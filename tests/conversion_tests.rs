use std::any::Any;

use graphbind::{
    AttrValue, ConversionError, EdgeList, ErrorClass, Graph, GraphOperands, Matrix, Selector,
    conversion::{float_buffer, index_buffer, int_buffer},
};

fn list(values: Vec<AttrValue>) -> AttrValue {
    AttrValue::List(values)
}

#[test]
fn test_int_buffer_rejects_floats_and_bools() {
    let err = int_buffer(&[AttrValue::Int(1), AttrValue::Float(2.0)]).expect_err("float");
    assert_eq!(
        err,
        ConversionError::WrongType {
            expected: "int",
            found: "float",
            index: 1
        }
    );
    let err = int_buffer(&[AttrValue::Bool(true)]).expect_err("bool");
    assert!(matches!(err, ConversionError::WrongType { found: "bool", .. }));
}

#[test]
fn test_index_buffer_rejects_negative_values() {
    let err = index_buffer(&[AttrValue::Int(0), AttrValue::Int(-3)]).expect_err("negative");
    assert_eq!(err, ConversionError::NegativeIndex { value: -3, index: 1 });
}

#[test]
fn test_float_buffer_widens_integers() {
    let values = float_buffer(&[AttrValue::Int(2), AttrValue::Float(0.5)]).expect("floats");
    assert_eq!(values, vec![2.0, 0.5]);
    assert!(float_buffer(&[AttrValue::from("x")]).is_err());
}

#[test]
fn test_selector_from_host_forms() {
    assert_eq!(Selector::from_host(&AttrValue::Null).expect("null"), Selector::All);
    assert_eq!(Selector::from_host(&AttrValue::Int(4)).expect("int"), Selector::Single(4));
    assert_eq!(
        Selector::from_host(&list(vec![AttrValue::Int(1), AttrValue::Int(3)])).expect("list"),
        Selector::Many(vec![1, 3])
    );
    assert!(Selector::from_host(&AttrValue::from("all")).is_err());
    assert!(matches!(
        Selector::from_host(&AttrValue::Int(-1)),
        Err(ConversionError::NegativeIndex { value: -1, .. })
    ));
}

#[test]
fn test_edge_list_accepts_pairs_or_flat_list() {
    let pairs = list(vec![
        list(vec![AttrValue::Int(0), AttrValue::Int(1)]),
        list(vec![AttrValue::Int(1), AttrValue::Int(2)]),
    ]);
    let flat = list(vec![
        AttrValue::Int(0),
        AttrValue::Int(1),
        AttrValue::Int(1),
        AttrValue::Int(2),
    ]);
    let expected = EdgeList::new(vec![(0, 1), (1, 2)]);
    assert_eq!(EdgeList::from_host(&pairs).expect("pairs"), expected);
    assert_eq!(EdgeList::from_host(&flat).expect("flat"), expected);
    assert_eq!(expected.to_host(), pairs);
}

#[test]
fn test_odd_flat_edge_list_is_rejected() {
    let err = EdgeList::from_flat(&[0, 1, 2]).expect_err("odd");
    assert_eq!(err, ConversionError::OddPairList { len: 3 });
}

#[test]
fn test_malformed_edge_list_never_reaches_engine() {
    let mut graph = Graph::new(3, false).expect("graph");
    let bad = list(vec![list(vec![AttrValue::Int(0)])]);
    let err = EdgeList::from_host(&bad)
        .map_err(graphbind::GraphError::from)
        .and_then(|edges| graph.add_edges(edges))
        .expect_err("malformed pair");
    assert_eq!(err.class(), ErrorClass::Conversion);
    assert_eq!(graph.ecount(), 0);
}

#[test]
fn test_ragged_matrix_is_rejected() {
    let ragged = list(vec![
        list(vec![AttrValue::Int(1), AttrValue::Int(2)]),
        list(vec![AttrValue::Int(3)]),
    ]);
    let err = Matrix::<i64>::from_host(&ragged).expect_err("ragged");
    assert_eq!(
        err,
        ConversionError::RaggedMatrix {
            row: 1,
            expected: 2,
            found: 1
        }
    );
}

#[test]
fn test_float_matrix_round_trips_through_host_form() {
    let host = list(vec![
        list(vec![AttrValue::Float(0.5), AttrValue::Float(1.0)]),
        list(vec![AttrValue::Float(0.0), AttrValue::Float(2.5)]),
    ]);
    let matrix = Matrix::<f64>::from_host(&host).expect("matrix");
    assert_eq!(matrix.rows(), 2);
    assert_eq!(matrix.get(1, 1), Some(&2.5));
    assert_eq!(matrix.to_host(), host);
}

#[test]
fn test_operands_prefer_collections() {
    let graphs = vec![
        Graph::new(1, false).expect("a"),
        Graph::new(2, false).expect("b"),
    ];
    let any: &dyn Any = &graphs;
    let operands = GraphOperands::from_any(any).expect("collection");
    assert_eq!(operands.len(), 2);

    let single: &dyn Any = &graphs[0];
    assert_eq!(GraphOperands::from_any(single).expect("single").len(), 1);

    let wrong: &dyn Any = &5u8;
    assert!(GraphOperands::from_any(wrong).is_err());
}

#[test]
fn test_endpoint_at_usize_max_is_rejected() {
    let err = Graph::from_edges([(0usize, usize::MAX)], 1, false).expect_err("endpoint overflow");
    assert_eq!(err.class(), ErrorClass::Validation);
}

#[test]
fn test_host_vertex_id_beyond_limit_fails_before_allocation() {
    let edges = EdgeList::from_host(&list(vec![AttrValue::Int(0), AttrValue::Int(i64::MAX)]))
        .expect("ids are non-negative");
    let err = Graph::from_edges(edges, 0, true).expect_err("id beyond limit");
    assert_eq!(err.class(), ErrorClass::Validation);
    assert!(err.to_string().contains("exceeds"));
}

#[test]
fn test_vertex_count_beyond_limit_is_validation_error() {
    let limit = graphbind::engine::MAX_VERTICES as i64;
    for count in [limit + 1, i64::MAX] {
        let err = Graph::new(count, false).expect_err("too many vertices");
        assert_eq!(err.class(), ErrorClass::Validation, "{count}");
    }
}
