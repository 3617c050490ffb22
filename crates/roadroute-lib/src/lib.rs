//! roadroute library entry points.
//!
//! This crate loads a road network into an immutable directed graph, snaps
//! geographic coordinates to the nearest graph node and runs Dijkstra's
//! shortest-path search between them. Higher-level consumers (the CLI) should
//! only depend on the functions exported here instead of reimplementing
//! behavior.
//!

#![deny(warnings)]

pub mod coord;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod network;
pub mod output;
pub mod path;
pub mod routing;
pub mod spatial;

pub use coord::Coordinate;
pub use dataset::{default_network_path, resolve_network_path, NETWORK_ENV_VAR};
pub use error::{Error, Result};
pub use graph::{build_graph, Edge, Graph, GraphBuilder, Node, NodeIndex};
pub use network::{
    load_network, CsvNetwork, JsonNetwork, NetworkSource, NodeId, RawEdge, RawNode, RoadNetwork,
};
pub use output::{RouteEndpoint, RouteRenderMode, RouteStatus, RouteStep, RouteSummary};
pub use path::{shortest_path, shortest_path_heap, PathOutcome, Route};
pub use routing::{
    plan_route, plan_route_from_network, RouteAlgorithm, RoutePlan, RouteRequest, SnapMethod,
    SnappedPoint,
};
pub use spatial::{NodeLocator, SpatialIndex};
