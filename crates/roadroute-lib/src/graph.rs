use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::coord::Coordinate;
use crate::error::{Error, Result};
use crate::network::{NodeId, RoadNetwork};

/// Dense position of a node inside a [`Graph`].
///
/// Indices follow node insertion order and are only meaningful for the graph
/// that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex(usize);

impl NodeIndex {
    pub(crate) fn from_index(idx: usize) -> Self {
        Self(idx)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Road network node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub position: Coordinate,
}

/// Outgoing road segment stored in the adjacency array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: NodeIndex,
    /// Segment length in metres. Always finite and non-negative.
    pub weight: f64,
}

/// Immutable directed road graph.
///
/// Nodes live in an arena addressed by [`NodeIndex`]; outgoing edges are kept
/// in one compressed array sliced by per-node offsets, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    index: HashMap<NodeId, NodeIndex>,
    offsets: Vec<usize>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Start building a graph.
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Resolve a node id to its dense index.
    pub fn index_of(&self, id: NodeId) -> Result<NodeIndex> {
        self.index
            .get(&id)
            .copied()
            .ok_or(Error::UnknownNode { id })
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.index_of(id).map(|idx| &self.nodes[idx.0])
    }

    pub(crate) fn node_at(&self, idx: NodeIndex) -> &Node {
        &self.nodes[idx.0]
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Outgoing edges of the node at `idx`.
    pub fn edges_from(&self, idx: NodeIndex) -> &[Edge] {
        &self.edges[self.offsets[idx.0]..self.offsets[idx.0 + 1]]
    }

    /// Outgoing `(target id, weight)` pairs of a node.
    ///
    /// Nodes without outgoing edges yield nothing; ids outside the node set
    /// fail with [`Error::UnknownNode`].
    pub fn neighbours(&self, id: NodeId) -> Result<impl Iterator<Item = (NodeId, f64)> + '_> {
        let idx = self.index_of(id)?;
        Ok(self
            .edges_from(idx)
            .iter()
            .map(|edge| (self.nodes[edge.target.0].id, edge.weight)))
    }

    /// Snap a coordinate to the closest node by planar distance.
    ///
    /// Scans every node; on ties the node inserted first wins.
    pub fn nearest_node(&self, lat: f64, lon: f64) -> Result<NodeId> {
        let query = Coordinate::new(lat, lon)?;
        self.nearest_to(&query).map(|node| node.id)
    }

    pub(crate) fn nearest_to(&self, query: &Coordinate) -> Result<&Node> {
        let mut best: Option<(&Node, f64)> = None;
        for node in &self.nodes {
            let distance = node.position.planar_distance_squared(query);
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((node, distance)),
            }
        }
        best.map(|(node, _)| node).ok_or(Error::EmptyGraph)
    }
}

/// Incrementally assembles a [`Graph`], validating input as it goes.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    index: HashMap<NodeId, NodeIndex>,
    edges: Vec<(NodeId, NodeId, f64)>,
}

impl GraphBuilder {
    /// Add a node. Ids must be unique and coordinates valid.
    pub fn add_node(&mut self, id: NodeId, lat: f64, lon: f64) -> Result<&mut Self> {
        let position = Coordinate::new(lat, lon)?;
        if self.index.contains_key(&id) {
            return Err(Error::DuplicateNode { id });
        }
        self.index.insert(id, NodeIndex(self.nodes.len()));
        self.nodes.push(Node { id, position });
        Ok(self)
    }

    /// Add a directed edge. Endpoints are checked when the graph is built, so
    /// edges may be added before their nodes.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: f64) -> Result<&mut Self> {
        if !weight.is_finite() {
            return Err(Error::NonFiniteWeight { from, to, weight });
        }
        if weight < 0.0 {
            return Err(Error::NegativeWeight { from, to, weight });
        }
        self.edges.push((from, to, weight));
        Ok(self)
    }

    /// Resolve edge endpoints and lay out the adjacency array.
    pub fn build(self) -> Result<Graph> {
        let GraphBuilder {
            nodes,
            index,
            edges,
        } = self;

        let resolve = |id: NodeId, from: NodeId, to: NodeId| {
            index.get(&id).copied().ok_or(Error::DanglingEdge {
                from,
                to,
                missing: id,
            })
        };

        let mut resolved = Vec::with_capacity(edges.len());
        let mut out_degree = vec![0usize; nodes.len()];
        for (from, to, weight) in edges {
            let source = resolve(from, from, to)?;
            let target = resolve(to, from, to)?;
            out_degree[source.0] += 1;
            resolved.push((source, Edge { target, weight }));
        }

        let mut offsets = Vec::with_capacity(nodes.len() + 1);
        offsets.push(0);
        for degree in &out_degree {
            let last = offsets[offsets.len() - 1];
            offsets.push(last + degree);
        }

        // Stable placement keeps each node's edges in insertion order.
        let mut cursor = offsets[..nodes.len()].to_vec();
        let mut placed: Vec<Option<Edge>> = vec![None; resolved.len()];
        for (source, edge) in resolved {
            placed[cursor[source.0]] = Some(edge);
            cursor[source.0] += 1;
        }
        let edges: Vec<Edge> = placed.into_iter().flatten().collect();

        debug!(nodes = nodes.len(), edges = edges.len(), "built road graph");

        Ok(Graph {
            nodes,
            index,
            offsets,
            edges,
        })
    }
}

/// Build a graph from raw network records.
///
/// Two-way records (`oneway == false`) contribute one edge per direction.
pub fn build_graph(network: &RoadNetwork) -> Result<Graph> {
    let mut builder = Graph::builder();
    for node in &network.nodes {
        builder.add_node(node.id, node.lat, node.lon)?;
    }
    for edge in &network.edges {
        builder.add_edge(edge.source, edge.target, edge.length)?;
        if !edge.oneway {
            builder.add_edge(edge.target, edge.source, edge.length)?;
        }
    }
    builder.build()
}
