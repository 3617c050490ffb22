// Handlers for the CLI subcommands.
//
// main.rs parses arguments and dispatches here; each module owns one
// subcommand. Network loading is shared.

pub mod info;
pub mod route;
pub mod snap;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use roadroute_lib::{build_graph, load_network, resolve_network_path, Graph};

/// Resolve, load and build the road network graph.
pub fn load_graph(explicit: Option<&Path>) -> Result<(PathBuf, Graph)> {
    let path = resolve_network_path(explicit).context("failed to locate the road network")?;
    let network = load_network(&path)
        .with_context(|| format!("failed to load road network from {}", path.display()))?;
    let graph = build_graph(&network)
        .with_context(|| format!("invalid road network in {}", path.display()))?;
    debug!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "road network ready"
    );
    Ok((path, graph))
}
