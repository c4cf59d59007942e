use kasane_core::{
    GraphError, GraphErrorCode, LocalBiconnectedMerger, MergerError, MergerErrorCode,
    MultilevelGraph,
};
use rstest::rstest;

#[rstest]
#[case(&[(0, 5)], GraphErrorCode::InvalidNodeId)]
#[case(&[(2, 2)], GraphErrorCode::SelfLoop)]
fn graph_construction_reports_stable_codes(
    #[case] edges: &[(usize, usize)],
    #[case] expected: GraphErrorCode,
) {
    let err = MultilevelGraph::from_edges(3, edges).expect_err("edges are malformed");
    assert_eq!(err.code(), expected);
    assert_eq!(err.code().as_str(), expected.as_str());
}

#[test]
fn invalid_length_reports_both_endpoints() {
    let err = MultilevelGraph::from_weighted_edges(3, &[(0, 2, f64::INFINITY)])
        .expect_err("infinite lengths are invalid");
    assert_eq!(err.code().as_str(), "GRAPH_INVALID_LENGTH");
    assert!(matches!(
        err,
        GraphError::InvalidLength {
            source_node: 0,
            target_node: 2,
            ..
        }
    ));
}

#[rstest]
#[case(0.0)]
#[case(1.0)]
#[case(f64::NEG_INFINITY)]
fn shrink_factor_errors_carry_the_rejected_value(#[case] factor: f64) {
    let err = LocalBiconnectedMerger::builder()
        .with_shrink_factor(factor)
        .build()
        .expect_err("factor cannot shrink the graph");
    assert_eq!(err.code(), MergerErrorCode::InvalidShrinkFactor);
    assert!(err.to_string().contains("greater than 1.0"));
    let MergerError::InvalidShrinkFactor { got } = err else {
        panic!("unexpected variant: {err:?}");
    };
    assert!(got == factor);
}
