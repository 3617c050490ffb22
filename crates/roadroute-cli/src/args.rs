//! Value parsers and clap-facing enums for command-line arguments.

use clap::ValueEnum;

use roadroute_lib::{Coordinate, RouteAlgorithm, SnapMethod};

/// Parse a `"LAT,LON"` pair into a validated [`Coordinate`].
///
/// Whitespace around either number is ignored. Range checking is left to
/// [`Coordinate::new`] so the CLI reports the same reasons as the library.
pub fn parse_coordinate(value: &str) -> Result<Coordinate, String> {
    let (lat, lon) = value
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON but got '{}'", value))?;

    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude '{}'", lat.trim()))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude '{}'", lon.trim()))?;

    Coordinate::new(lat, lon).map_err(|err| err.to_string())
}

/// Shortest-path engine selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AlgorithmArg {
    /// Canonical Dijkstra scanning all unvisited nodes each round.
    #[default]
    Dijkstra,
    /// Dijkstra backed by a binary heap.
    DijkstraHeap,
}

impl From<AlgorithmArg> for RouteAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Dijkstra => RouteAlgorithm::Dijkstra,
            AlgorithmArg::DijkstraHeap => RouteAlgorithm::DijkstraHeap,
        }
    }
}

/// Nearest-node lookup strategy selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SnapArg {
    /// Scan every node.
    #[default]
    Linear,
    /// Build a KD-tree over the node coordinates first.
    KdTree,
}

impl From<SnapArg> for SnapMethod {
    fn from(value: SnapArg) -> Self {
        match value {
            SnapArg::Linear => SnapMethod::Linear,
            SnapArg::KdTree => SnapMethod::KdTree,
        }
    }
}
