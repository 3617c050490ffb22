//! Info command handler: size of the loaded road network.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use roadroute_cli::output::{NetworkInfo, OutputFormat};
use roadroute_cli::terminal::ColorPalette;

use super::load_graph;

/// Handle the info subcommand.
pub fn handle_info_command(network: Option<&Path>, format: OutputFormat) -> Result<()> {
    let (path, graph) = load_graph(network)?;
    let info = NetworkInfo {
        path: path.display().to_string(),
        nodes: graph.node_count(),
        edges: graph.edge_count(),
    };

    let mut stdout = io::stdout().lock();
    format
        .write_info(&mut stdout, &info, graph.nodes(), ColorPalette::detect())
        .context("failed to write network info")?;
    stdout.flush()?;
    Ok(())
}
