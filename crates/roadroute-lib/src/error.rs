use std::path::PathBuf;

use thiserror::Error;

use crate::network::NodeId;

/// Convenient result alias for the roadroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// A missing route is not represented here: an unreachable goal is a valid
/// outcome and is reported through [`crate::PathOutcome::Unreachable`].
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when snapping a coordinate against a graph with no nodes.
    #[error("graph contains no nodes to snap to")]
    EmptyGraph,

    /// Raised when a node identifier is not part of the graph's node set.
    #[error("unknown node id: {id}")]
    UnknownNode { id: NodeId },

    /// Raised when a coordinate is non-finite or outside the valid range.
    #[error("invalid coordinate ({lat}, {lon}): {reason}")]
    InvalidCoordinate {
        lat: f64,
        lon: f64,
        reason: &'static str,
    },

    /// Raised at construction time for edges with a negative length.
    #[error("edge {from} -> {to} has negative weight {weight}")]
    NegativeWeight {
        from: NodeId,
        to: NodeId,
        weight: f64,
    },

    /// Raised at construction time for edges whose length is NaN or infinite.
    #[error("edge {from} -> {to} has non-finite weight {weight}")]
    NonFiniteWeight {
        from: NodeId,
        to: NodeId,
        weight: f64,
    },

    /// Raised when the same node id is inserted twice.
    #[error("duplicate node id: {id}")]
    DuplicateNode { id: NodeId },

    /// Raised when an edge references a node that was never added.
    #[error("edge {from} -> {to} references missing node {missing}")]
    DanglingEdge {
        from: NodeId,
        to: NodeId,
        missing: NodeId,
    },

    /// Road network source could not be located at the resolved path.
    #[error("road network not found at {path}")]
    NetworkNotFound { path: PathBuf },

    /// Road network path exists but is neither a CSV directory nor a JSON file.
    #[error("unsupported road network format at {path}; expected a CSV directory or .json file")]
    UnsupportedNetworkFormat { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the default network location")]
    ProjectDirsUnavailable,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
