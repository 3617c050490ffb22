mod common;

use proptest::prelude::*;
use roadroute_lib::{build_graph, Coordinate, Graph, NodeLocator, SpatialIndex};

use common::{clustered_network_strategy, coordinate_strategy, network_strategy};

/// Many nodes stacked on one point, more than a single kiddo bucket holds.
fn stacked_graph(stacked: i64) -> Graph {
    let mut builder = Graph::builder();
    builder.add_node(1, 47.05, 15.05).expect("valid node");
    for id in 0..stacked {
        builder.add_node(500 + id, 47.0, 15.0).expect("valid node");
    }
    builder.add_node(2, 47.01, 15.0).expect("valid node");
    builder.build().expect("graph builds")
}

#[test]
fn co_located_nodes_resolve_to_the_first_inserted() {
    let graph = stacked_graph(40);
    let index = SpatialIndex::build(&graph);
    assert_eq!(index.len(), 3);

    let at = Coordinate::new(47.0, 15.0).expect("valid coordinate");
    let from_scan = graph.nearest_node(47.0, 15.0).expect("non-empty graph");
    let from_index = index.nearest(at).expect("non-empty index");
    assert_eq!(from_scan, 500);
    assert_eq!(from_index, 500);

    for id in [from_scan, from_index] {
        let position = graph.node(id).unwrap().position;
        assert_eq!(position.planar_distance(&at), 0.0);
    }

    let nearest = index.nearest_n(at, 10);
    assert_eq!(nearest.len(), 3);
    assert_eq!(nearest[0], (500, 0.0));
}

#[test]
fn nearest_n_is_sorted_and_bounded() {
    let graph = stacked_graph(0);
    let index = SpatialIndex::build(&graph);
    let query = Coordinate::new(47.04, 15.04).expect("valid coordinate");

    let nearest = index.nearest_n(query, 2);
    assert_eq!(nearest.len(), 2);
    assert!(nearest.windows(2).all(|pair| pair[0].1 <= pair[1].1));
    assert_eq!(nearest[0].0, graph.nearest_node(47.04, 15.04).unwrap());

    assert_eq!(index.nearest_n(query, 500).len(), 2);
    assert!(index.nearest_n(query, 0).is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn index_agrees_with_linear_scan(
        network in network_strategy(1..200, 0),
        queries in prop::collection::vec(coordinate_strategy(), 1..20),
    ) {
        let graph = build_graph(&network).expect("graph builds");
        let index = SpatialIndex::build(&graph);
        prop_assert!(index.len() <= graph.node_count());

        for query in queries {
            let from_index = index.locate(query).expect("non-empty index");
            let from_scan = graph.locate(query).expect("non-empty graph");
            if from_index != from_scan {
                // Only an exact distance tie may disagree.
                let a = graph.node(from_index).unwrap().position.planar_distance(&query);
                let b = graph.node(from_scan).unwrap().position.planar_distance(&query);
                prop_assert_eq!(a, b, "index picked {}, scan picked {}", from_index, from_scan);
            }
        }
    }

    #[test]
    fn node_positions_resolve_identically(network in clustered_network_strategy(1..120, 0)) {
        let graph = build_graph(&network).expect("graph builds");
        let index = SpatialIndex::build(&graph);
        prop_assert!(index.len() <= 16);

        for node in graph.nodes() {
            let from_index = index.locate(node.position).expect("non-empty index");
            let from_scan = graph.locate(node.position).expect("non-empty graph");
            prop_assert_eq!(from_index, from_scan);

            let snapped = graph.node(from_index).unwrap().position;
            prop_assert_eq!(snapped.planar_distance(&node.position), 0.0);
        }
    }
}
