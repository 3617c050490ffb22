use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::Serialize;
use tracing::trace;

use crate::error::Result;
use crate::graph::{Graph, NodeIndex};
use crate::network::NodeId;

/// Shortest path between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// Sum of edge weights along `path`, in metres.
    pub distance: f64,
    /// Node ids from start to goal, both inclusive.
    pub path: Vec<NodeId>,
}

impl Route {
    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Distance rounded to two decimal places for display.
    pub fn rounded_distance(&self) -> f64 {
        round_to_centimetres(self.distance)
    }
}

pub(crate) fn round_to_centimetres(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Result of a shortest-path search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PathOutcome {
    Found(Route),
    /// No directed path leads from the start to the goal.
    Unreachable,
}

impl PathOutcome {
    pub fn route(&self) -> Option<&Route> {
        match self {
            PathOutcome::Found(route) => Some(route),
            PathOutcome::Unreachable => None,
        }
    }

    pub fn distance(&self) -> Option<f64> {
        self.route().map(|route| route.distance)
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, PathOutcome::Found(_))
    }
}

/// Per-run search state indexed by [`NodeIndex`].
struct SearchState {
    distance: Vec<f64>,
    predecessor: Vec<Option<NodeIndex>>,
    finalized: Vec<bool>,
}

impl SearchState {
    fn new(node_count: usize, start: NodeIndex) -> Self {
        let mut distance = vec![f64::INFINITY; node_count];
        distance[start.index()] = 0.0;
        Self {
            distance,
            predecessor: vec![None; node_count],
            finalized: vec![false; node_count],
        }
    }

    /// Relax every outgoing edge of `node`, reporting each target whose
    /// tentative distance dropped to `improved`.
    fn relax(&mut self, graph: &Graph, node: NodeIndex, mut improved: impl FnMut(NodeIndex, f64)) {
        let base = self.distance[node.index()];
        for edge in graph.edges_from(node) {
            let candidate = base + edge.weight;
            if candidate < self.distance[edge.target.index()] {
                self.distance[edge.target.index()] = candidate;
                self.predecessor[edge.target.index()] = Some(node);
                improved(edge.target, candidate);
            }
        }
    }

    fn into_outcome(self, graph: &Graph, start: NodeIndex, goal: NodeIndex) -> PathOutcome {
        let distance = self.distance[goal.index()];
        if distance.is_infinite() {
            return PathOutcome::Unreachable;
        }

        let mut path = vec![graph.node_at(goal).id];
        let mut current = goal;
        while current != start {
            let Some(previous) = self.predecessor[current.index()] else {
                break;
            };
            path.push(graph.node_at(previous).id);
            current = previous;
        }
        path.reverse();

        PathOutcome::Found(Route { distance, path })
    }
}

/// Dijkstra's algorithm with a linear scan over unvisited nodes.
///
/// Each round finalizes the unvisited node with the smallest tentative
/// distance; among equal distances the lowest [`NodeIndex`] (earliest
/// inserted node) is chosen. The search stops as soon as `goal` is selected
/// or when every remaining node is unreachable. O(V²) overall.
pub fn shortest_path(graph: &Graph, start: NodeId, goal: NodeId) -> Result<PathOutcome> {
    let start = graph.index_of(start)?;
    let goal = graph.index_of(goal)?;

    let mut state = SearchState::new(graph.node_count(), start);
    let mut remaining = graph.node_count();
    let mut finalized = 0usize;

    while remaining > 0 {
        let mut selected: Option<NodeIndex> = None;
        let mut best = f64::INFINITY;
        for (idx, &distance) in state.distance.iter().enumerate() {
            if !state.finalized[idx] && distance < best {
                best = distance;
                selected = Some(NodeIndex::from_index(idx));
            }
        }

        let Some(node) = selected else {
            break;
        };
        if node == goal {
            break;
        }

        state.finalized[node.index()] = true;
        remaining -= 1;
        finalized += 1;
        state.relax(graph, node, |_, _| {});
    }

    trace!(finalized, "linear-scan dijkstra finished");
    Ok(state.into_outcome(graph, start, goal))
}

/// Dijkstra's algorithm backed by a binary heap.
///
/// Entries are ordered by `(distance, NodeIndex)`, so nodes are finalized in
/// exactly the order [`shortest_path`] selects them and both return the same
/// distance and path. O((V + E) log V).
pub fn shortest_path_heap(graph: &Graph, start: NodeId, goal: NodeId) -> Result<PathOutcome> {
    let start = graph.index_of(start)?;
    let goal = graph.index_of(goal)?;

    let mut state = SearchState::new(graph.node_count(), start);
    let mut queue = BinaryHeap::new();
    queue.push(QueueEntry::new(start, 0.0));
    let mut finalized = 0usize;

    while let Some(entry) = queue.pop() {
        let node = entry.node;
        if state.finalized[node.index()] || entry.cost.0 > state.distance[node.index()] {
            continue;
        }
        if node == goal {
            break;
        }

        state.finalized[node.index()] = true;
        finalized += 1;
        state.relax(graph, node, |target, cost| {
            queue.push(QueueEntry::new(target, cost));
        });
    }

    trace!(finalized, "binary-heap dijkstra finished");
    Ok(state.into_outcome(graph, start, goal))
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: NodeIndex,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: NodeIndex, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost, then index.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
