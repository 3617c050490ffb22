//! KD-tree node locator for snapping coordinates to the road graph.
//!
//! [`Graph::nearest_node`] answers the same question with a linear scan. The
//! index trades an up-front build for O(log n) average queries, which matters
//! once many points are snapped against the same graph. Both use planar
//! Euclidean distance in degree space and agree on every query that does not
//! land exactly between two nodes; on exact ties the linear scan returns the
//! node inserted first while the index makes no ordering promise.
//!
//! Nodes sharing one exact position are indexed once, under the id inserted
//! first, so co-located nodes resolve the same way as the linear scan.

use std::collections::HashSet;

use kiddo::float::kdtree::KdTree;
use kiddo::SquaredEuclidean;
use tracing::debug;

use crate::coord::Coordinate;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::network::NodeId;

/// KD-tree bucket size (kiddo default).
const BUCKET_SIZE: usize = 32;

/// Resolves a coordinate to the closest graph node.
pub trait NodeLocator {
    /// Id of the node closest to `at`.
    fn locate(&self, at: Coordinate) -> Result<NodeId>;
}

impl NodeLocator for Graph {
    fn locate(&self, at: Coordinate) -> Result<NodeId> {
        self.nearest_to(&at).map(|node| node.id)
    }
}

/// Static 2-D KD-tree over the node coordinates of one graph.
pub struct SpatialIndex {
    /// Item is the position in `ids`.
    tree: KdTree<f64, usize, 2, BUCKET_SIZE, u32>,
    ids: Vec<NodeId>,
}

impl SpatialIndex {
    /// Index every distinct node position of `graph`.
    pub fn build(graph: &Graph) -> Self {
        let mut tree: KdTree<f64, usize, 2, BUCKET_SIZE, u32> = KdTree::new();
        let mut ids = Vec::with_capacity(graph.node_count());
        let mut seen = HashSet::with_capacity(graph.node_count());

        for node in graph.nodes() {
            // kiddo cannot split a bucket holding more identical points than it fits.
            if !seen.insert(position_key(&node.position)) {
                continue;
            }
            tree.add(&node.position.as_array(), ids.len());
            ids.push(node.id);
        }

        debug!(
            node_count = graph.node_count(),
            indexed = ids.len(),
            "built spatial index"
        );

        Self { tree, ids }
    }

    /// Number of indexed positions; co-located nodes count once.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Closest node to `at`.
    pub fn nearest(&self, at: Coordinate) -> Result<NodeId> {
        if self.ids.is_empty() {
            return Err(Error::EmptyGraph);
        }
        let neighbour = self.tree.nearest_one::<SquaredEuclidean>(&at.as_array());
        Ok(self.ids[neighbour.item])
    }

    /// Up to `k` closest positions as `(id, planar distance)` pairs, nearest first.
    pub fn nearest_n(&self, at: Coordinate, k: usize) -> Vec<(NodeId, f64)> {
        if k == 0 || self.ids.is_empty() {
            return Vec::new();
        }

        self.tree
            .nearest_n::<SquaredEuclidean>(&at.as_array(), k)
            .into_iter()
            .map(|neighbour| (self.ids[neighbour.item], neighbour.distance.sqrt()))
            .collect()
    }
}

/// Exact bit pattern of a position, with `-0.0` folded into `0.0`.
fn position_key(position: &Coordinate) -> (u64, u64) {
    ((position.lat + 0.0).to_bits(), (position.lon + 0.0).to_bits())
}

impl NodeLocator for SpatialIndex {
    fn locate(&self, at: Coordinate) -> Result<NodeId> {
        self.nearest(at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_graph() -> Graph {
        let mut builder = Graph::builder();
        let mut id = 0;
        for row in 0..5 {
            for col in 0..5 {
                builder
                    .add_node(id, 47.0 + f64::from(row) * 0.01, 15.0 + f64::from(col) * 0.01)
                    .expect("valid node");
                id += 1;
            }
        }
        builder.build().expect("graph builds")
    }

    #[test]
    fn empty_index_reports_empty_graph() {
        let index = SpatialIndex::build(&Graph::default());
        assert!(index.is_empty());
        let at = Coordinate::new(0.0, 0.0).unwrap();
        assert!(matches!(index.nearest(at), Err(Error::EmptyGraph)));
        assert!(index.nearest_n(at, 3).is_empty());
    }

    #[test]
    fn nearest_agrees_with_linear_scan() {
        let graph = grid_graph();
        let index = SpatialIndex::build(&graph);
        assert_eq!(index.len(), 25);

        for (lat, lon) in [
            (47.0031, 15.0122),
            (46.9, 14.9),
            (47.0388, 15.0411),
            (47.0219, 15.0007),
        ] {
            let at = Coordinate::new(lat, lon).unwrap();
            assert_eq!(index.nearest(at).unwrap(), graph.nearest_node(lat, lon).unwrap());
        }
    }

    #[test]
    fn nearest_n_is_sorted_by_distance() {
        let graph = grid_graph();
        let index = SpatialIndex::build(&graph);
        let at = Coordinate::new(47.0, 15.0).unwrap();

        let results = index.nearest_n(at, 3);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0], (0, 0.0));
        assert!(results.windows(2).all(|pair| pair[0].1 <= pair[1].1));
    }

    #[test]
    fn co_located_nodes_are_indexed_once() {
        let mut builder = Graph::builder();
        for id in 0..40 {
            builder.add_node(100 + id, 47.0, 15.0).expect("valid node");
        }
        builder.add_node(7, -0.0, 0.0).expect("valid node");
        builder.add_node(8, 0.0, -0.0).expect("valid node");
        let graph = builder.build().expect("graph builds");

        let index = SpatialIndex::build(&graph);
        assert_eq!(index.len(), 2);

        let at = Coordinate::new(47.0, 15.0).unwrap();
        assert_eq!(index.nearest(at).unwrap(), 100);
        assert_eq!(index.nearest_n(at, 5)[0], (100, 0.0));
        assert_eq!(index.nearest(Coordinate::new(0.0, 0.0).unwrap()).unwrap(), 7);
    }
}
