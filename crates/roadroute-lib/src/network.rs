//! Raw road network records and the sources that supply them.
//!
//! The graph store only needs two flat collections: nodes with coordinates and
//! directed edges with a length. How those were fetched is up to the caller;
//! this module ships two file based sources:
//!
//! - [`CsvNetwork`]: a directory with `nodes.csv` (`id,lat,lon`) and
//!   `edges.csv` (`source,target,length[,oneway]`).
//! - [`JsonNetwork`]: a single `{ "nodes": [...], "edges": [...] }` document.
//!
//! Use [`load_network`] to pick the right source from a path.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Identifier for a road network node as supplied by the data provider.
pub type NodeId = i64;

/// Filename of the node table inside a CSV network directory.
pub const NODES_CSV: &str = "nodes.csv";

/// Filename of the edge table inside a CSV network directory.
pub const EDGES_CSV: &str = "edges.csv";

/// Node record as supplied by the data provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawNode {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
}

/// Edge record as supplied by the data provider.
///
/// `length` is in metres. Edges are directed unless `oneway` is `false`, in
/// which case the graph receives both directions with the same length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub length: f64,
    #[serde(default = "default_oneway")]
    pub oneway: bool,
}

fn default_oneway() -> bool {
    true
}

impl RawEdge {
    /// A one-way edge from `source` to `target`.
    pub fn directed(source: NodeId, target: NodeId, length: f64) -> Self {
        Self {
            source,
            target,
            length,
            oneway: true,
        }
    }

    /// A two-way edge between `source` and `target`.
    pub fn two_way(source: NodeId, target: NodeId, length: f64) -> Self {
        Self {
            oneway: false,
            ..Self::directed(source, target, length)
        }
    }
}

/// Flat node and edge collections making up a road network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadNetwork {
    pub nodes: Vec<RawNode>,
    pub edges: Vec<RawEdge>,
}

impl RoadNetwork {
    /// Parse a network from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Anything able to supply a [`RoadNetwork`].
pub trait NetworkSource {
    /// Read the node and edge collections.
    fn load(&self) -> Result<RoadNetwork>;
}

/// Network stored as `nodes.csv` and `edges.csv` inside one directory.
#[derive(Debug, Clone)]
pub struct CsvNetwork {
    dir: PathBuf,
}

impl CsvNetwork {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl NetworkSource for CsvNetwork {
    fn load(&self) -> Result<RoadNetwork> {
        let nodes = read_csv::<RawNode>(&self.dir.join(NODES_CSV))?;
        let edges = read_csv::<RawEdge>(&self.dir.join(EDGES_CSV))?;
        debug!(
            dir = %self.dir.display(),
            nodes = nodes.len(),
            edges = edges.len(),
            "loaded csv road network"
        );
        Ok(RoadNetwork { nodes, edges })
    }
}

fn read_csv<T>(path: &Path) -> Result<Vec<T>>
where
    T: for<'de> Deserialize<'de>,
{
    if !path.is_file() {
        return Err(Error::NetworkNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let mut records = Vec::new();
    for record in reader.deserialize() {
        records.push(record?);
    }
    Ok(records)
}

/// Network stored as a single JSON document.
#[derive(Debug, Clone)]
pub struct JsonNetwork {
    path: PathBuf,
}

impl JsonNetwork {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl NetworkSource for JsonNetwork {
    fn load(&self) -> Result<RoadNetwork> {
        let reader = BufReader::new(File::open(&self.path)?);
        let network: RoadNetwork = serde_json::from_reader(reader)?;
        debug!(
            path = %self.path.display(),
            nodes = network.nodes.len(),
            edges = network.edges.len(),
            "loaded json road network"
        );
        Ok(network)
    }
}

/// Load a road network, choosing the source from the shape of `path`.
///
/// Directories are read as CSV networks, `.json` files as JSON networks.
pub fn load_network(path: &Path) -> Result<RoadNetwork> {
    if !path.exists() {
        return Err(Error::NetworkNotFound {
            path: path.to_path_buf(),
        });
    }

    if path.is_dir() {
        return CsvNetwork::new(path).load();
    }

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        return JsonNetwork::new(path).load();
    }

    Err(Error::UnsupportedNetworkFormat {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_edges_default_to_oneway() {
        let network = RoadNetwork::from_json_str(
            r#"{
                "nodes": [{"id": 1, "lat": 0.0, "lon": 0.0}, {"id": 2, "lat": 0.0, "lon": 1.0}],
                "edges": [
                    {"source": 1, "target": 2, "length": 5.0},
                    {"source": 2, "target": 1, "length": 7.5, "oneway": false}
                ]
            }"#,
        )
        .expect("valid json");

        assert_eq!(network.nodes.len(), 2);
        assert!(network.edges[0].oneway);
        assert!(!network.edges[1].oneway);
    }

    #[test]
    fn csv_network_reads_both_tables() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join(NODES_CSV), "id,lat,lon\n1, 0.0, 0.0\n2,0.0,1.0\n")
            .expect("write nodes");
        std::fs::write(
            dir.path().join(EDGES_CSV),
            "source,target,length\n1,2,5.0\n",
        )
        .expect("write edges");

        let network = load_network(dir.path()).expect("csv loads");
        assert_eq!(network.nodes[0], RawNode { id: 1, lat: 0.0, lon: 0.0 });
        assert_eq!(network.edges, vec![RawEdge::directed(1, 2, 5.0)]);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("network.osm");
        std::fs::write(&path, "").expect("write file");

        let err = load_network(&path).expect_err("unsupported format");
        assert!(matches!(err, Error::UnsupportedNetworkFormat { .. }));
    }

    #[test]
    fn missing_path_is_reported() {
        let err = load_network(Path::new("/definitely/not/here.json")).expect_err("missing");
        assert!(matches!(err, Error::NetworkNotFound { .. }));
    }
}
