//! Shortest-path strategies implementing the Strategy pattern.
//!
//! This module provides the `RoutePlanner` trait and one implementation per
//! search engine. Both engines return identical results; they differ only in
//! how the next node to finalize is selected.

use crate::error::Result;
use crate::graph::Graph;
use crate::network::NodeId;
use crate::path::{shortest_path, shortest_path_heap, PathOutcome};

use super::RouteAlgorithm;

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Search for the shortest path from `start` to `goal`.
    fn find_path(&self, graph: &Graph, start: NodeId, goal: NodeId) -> Result<PathOutcome>;
}

/// Canonical Dijkstra scanning every unvisited node per round.
#[derive(Debug, Clone, Default)]
pub struct ScanPlanner;

impl RoutePlanner for ScanPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn find_path(&self, graph: &Graph, start: NodeId, goal: NodeId) -> Result<PathOutcome> {
        shortest_path(graph, start, goal)
    }
}

/// Dijkstra with a binary-heap frontier, for larger graphs.
#[derive(Debug, Clone, Default)]
pub struct HeapPlanner;

impl RoutePlanner for HeapPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::DijkstraHeap
    }

    fn find_path(&self, graph: &Graph, start: NodeId, goal: NodeId) -> Result<PathOutcome> {
        shortest_path_heap(graph, start, goal)
    }
}

/// Select the planner for a given algorithm.
pub fn select_planner(algorithm: RouteAlgorithm) -> Box<dyn RoutePlanner> {
    match algorithm {
        RouteAlgorithm::Dijkstra => Box::new(ScanPlanner),
        RouteAlgorithm::DijkstraHeap => Box::new(HeapPlanner),
    }
}
