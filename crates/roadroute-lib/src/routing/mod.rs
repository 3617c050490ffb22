//! Route planning between two geographic points.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported shortest-path engines
//! - [`SnapMethod`] - How query points are resolved to graph nodes
//! - [`RouteRequest`] - High-level route planning request
//! - [`RoutePlan`] - Planned route result
//! - [`plan_route`] - Main entry point for computing routes
//!
//! # Example
//!
//! ```no_run
//! use roadroute_lib::{build_graph, load_network, plan_route, Coordinate, RouteRequest};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let network = load_network(std::path::Path::new("network.json"))?;
//! let graph = build_graph(&network)?;
//! let request = RouteRequest::new(
//!     Coordinate::new(47.06497, 15.45847)?,
//!     Coordinate::new(47.07110, 15.47676)?,
//! );
//! let plan = plan_route(&graph, &request)?;
//! if let Some(route) = plan.outcome.route() {
//!     println!("{:.2} m over {} hops", route.rounded_distance(), route.hop_count());
//! }
//! # Ok(())
//! # }
//! ```

mod planner;

pub use planner::{select_planner, HeapPlanner, RoutePlanner, ScanPlanner};

use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use crate::coord::Coordinate;
use crate::error::Result;
use crate::graph::{build_graph, Graph};
use crate::network::{NodeId, RoadNetwork};
use crate::path::PathOutcome;
use crate::spatial::{NodeLocator, SpatialIndex};

/// Supported shortest-path engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// Dijkstra selecting the next node by scanning all unvisited nodes.
    #[default]
    Dijkstra,
    /// Dijkstra selecting the next node from a binary heap.
    #[serde(rename = "dijkstra-heap")]
    DijkstraHeap,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::DijkstraHeap => "dijkstra-heap",
        };
        f.write_str(value)
    }
}

/// How query points are snapped to graph nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SnapMethod {
    /// Scan every node.
    #[default]
    Linear,
    /// Build a KD-tree over the graph and query it.
    #[serde(rename = "kd-tree")]
    KdTree,
}

impl fmt::Display for SnapMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SnapMethod::Linear => "linear",
            SnapMethod::KdTree => "kd-tree",
        };
        f.write_str(value)
    }
}

/// High-level route planning request.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub start: Coordinate,
    pub goal: Coordinate,
    pub algorithm: RouteAlgorithm,
    pub snap: SnapMethod,
}

impl RouteRequest {
    /// Request using the canonical engine and linear snapping.
    pub fn new(start: Coordinate, goal: Coordinate) -> Self {
        Self {
            start,
            goal,
            algorithm: RouteAlgorithm::default(),
            snap: SnapMethod::default(),
        }
    }

    pub fn with_algorithm(mut self, algorithm: RouteAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_snap(mut self, snap: SnapMethod) -> Self {
        self.snap = snap;
        self
    }
}

/// A query point and the graph node it was resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SnappedPoint {
    pub query: Coordinate,
    pub node: NodeId,
    pub position: Coordinate,
    /// Great-circle distance between the query point and the node, in metres.
    pub offset_m: f64,
}

impl SnappedPoint {
    /// Snap `query` using `locator` and record where it landed.
    pub fn resolve(graph: &Graph, locator: &dyn NodeLocator, query: Coordinate) -> Result<Self> {
        let node = locator.locate(query)?;
        let position = graph.node(node)?.position;
        Ok(Self {
            query,
            node,
            position,
            offset_m: query.haversine_distance(&position),
        })
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub start: SnappedPoint,
    pub goal: SnappedPoint,
    pub outcome: PathOutcome,
}

impl RoutePlan {
    /// Number of hops in the route, or `None` when unreachable.
    pub fn hop_count(&self) -> Option<usize> {
        self.outcome.route().map(|route| route.hop_count())
    }
}

/// Snap both request points to `graph` and search for the shortest path.
pub fn plan_route(graph: &Graph, request: &RouteRequest) -> Result<RoutePlan> {
    let index;
    let locator: &dyn NodeLocator = match request.snap {
        SnapMethod::Linear => graph,
        SnapMethod::KdTree => {
            index = SpatialIndex::build(graph);
            &index
        }
    };

    let start = SnappedPoint::resolve(graph, locator, request.start)?;
    let goal = SnappedPoint::resolve(graph, locator, request.goal)?;
    debug!(
        start_node = start.node,
        goal_node = goal.node,
        snap = %request.snap,
        "snapped query points"
    );

    let planner = select_planner(request.algorithm);
    let outcome = planner.find_path(graph, start.node, goal.node)?;

    match outcome.route() {
        Some(route) => info!(
            algorithm = %planner.algorithm(),
            distance_m = route.rounded_distance(),
            hops = route.hop_count(),
            "route found"
        ),
        None => info!(
            algorithm = %planner.algorithm(),
            start_node = start.node,
            goal_node = goal.node,
            "goal unreachable from start"
        ),
    }

    Ok(RoutePlan {
        algorithm: planner.algorithm(),
        start,
        goal,
        outcome,
    })
}

/// Build a fresh graph from `network` and plan a single route on it.
///
/// The graph lives only for this call.
pub fn plan_route_from_network(network: &RoadNetwork, request: &RouteRequest) -> Result<RoutePlan> {
    let graph = build_graph(network)?;
    plan_route(&graph, request)
}
