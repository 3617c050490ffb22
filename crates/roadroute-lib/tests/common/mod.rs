//! Common test utilities and fixture helpers.
//!
//! This module provides shared test infrastructure for integration tests:
//! fixture paths, the worked example graph and proptest strategies for
//! random road networks.

use std::ops::Range;
use std::path::PathBuf;

use proptest::prelude::*;
use proptest::sample::Index;
use roadroute_lib::{build_graph, Coordinate, Graph, NodeId, RawEdge, RawNode, RoadNetwork};

/// Directory holding the checked-in fixture networks.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// CSV form of the Graz fixture network (a directory).
#[allow(dead_code)]
pub fn csv_fixture_path() -> PathBuf {
    fixtures_dir().join("graz_small")
}

/// JSON form of the same Graz fixture network.
#[allow(dead_code)]
pub fn json_fixture_path() -> PathBuf {
    fixtures_dir().join("graz_small.json")
}

/// A(0,0) B(0,1) C(0,2) with edges A→B 5, B→C 3, A→C 10, using ids 1, 2, 3.
#[allow(dead_code)]
pub fn triangle_graph() -> Graph {
    let network = RoadNetwork {
        nodes: vec![
            RawNode { id: 1, lat: 0.0, lon: 0.0 },
            RawNode { id: 2, lat: 0.0, lon: 1.0 },
            RawNode { id: 3, lat: 0.0, lon: 2.0 },
        ],
        edges: vec![
            RawEdge::directed(1, 2, 5.0),
            RawEdge::directed(2, 3, 3.0),
            RawEdge::directed(1, 3, 10.0),
        ],
    };
    build_graph(&network).expect("triangle graph builds")
}

/// Node id of the `i`-th generated node; offset so ids never equal indices.
#[allow(dead_code)]
pub fn generated_id(i: usize) -> NodeId {
    i as NodeId * 7 + 3
}

/// Directed networks with `nodes` nodes spread over a ~10 km square and up
/// to `max_edges` edges. Integer weights in `0..5` give many equal-cost paths.
#[allow(dead_code)]
pub fn network_strategy(
    nodes: Range<usize>,
    max_edges: usize,
) -> impl Strategy<Value = RoadNetwork> {
    network_over((47.0..47.1f64, 15.0..15.1f64), nodes, max_edges)
}

/// Like [`network_strategy`] but nodes sit on a 4x4 grid of positions, so
/// most positions are shared by several nodes.
#[allow(dead_code)]
pub fn clustered_network_strategy(
    nodes: Range<usize>,
    max_edges: usize,
) -> impl Strategy<Value = RoadNetwork> {
    let grid = (0u8..4, 0u8..4).prop_map(|(row, col)| {
        (47.0 + f64::from(row) * 0.01, 15.0 + f64::from(col) * 0.01)
    });
    network_over(grid, nodes, max_edges)
}

/// A network together with `(start, goal)` id pairs drawn from its nodes.
#[allow(dead_code)]
pub fn network_with_queries(
    nodes: Range<usize>,
    max_edges: usize,
    queries: Range<usize>,
) -> impl Strategy<Value = (RoadNetwork, Vec<(NodeId, NodeId)>)> {
    let picks = prop::collection::vec(any::<(Index, Index)>(), queries);
    (network_strategy(nodes, max_edges), picks).prop_map(|(network, picks)| {
        let len = network.nodes.len();
        let pairs = picks
            .into_iter()
            .map(|(start, goal)| {
                (
                    network.nodes[start.index(len)].id,
                    network.nodes[goal.index(len)].id,
                )
            })
            .collect();
        (network, pairs)
    })
}

/// Query points covering the generated networks and a margin around them.
#[allow(dead_code)]
pub fn coordinate_strategy() -> impl Strategy<Value = Coordinate> {
    (46.95..47.15f64, 14.95..15.15f64)
        .prop_map(|(lat, lon)| Coordinate::new(lat, lon).expect("query in range"))
}

#[allow(dead_code)]
fn network_over<S>(
    positions: S,
    nodes: Range<usize>,
    max_edges: usize,
) -> impl Strategy<Value = RoadNetwork>
where
    S: Strategy<Value = (f64, f64)> + Clone,
{
    nodes
        .prop_flat_map(move |count| {
            (
                prop::collection::vec(positions.clone(), count),
                prop::collection::vec((0..count, 0..count, 0u8..5), 0..=max_edges),
            )
        })
        .prop_map(|(positions, edges)| RoadNetwork {
            nodes: positions
                .into_iter()
                .enumerate()
                .map(|(i, (lat, lon))| RawNode {
                    id: generated_id(i),
                    lat,
                    lon,
                })
                .collect(),
            edges: edges
                .into_iter()
                .map(|(source, target, weight)| {
                    let (source, target) = (generated_id(source), generated_id(target));
                    RawEdge::directed(source, target, f64::from(weight))
                })
                .collect(),
        })
}
