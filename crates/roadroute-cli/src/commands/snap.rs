//! Snap command handler: nearest network node to a single coordinate.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use roadroute_lib::{Coordinate, RouteEndpoint, SnapMethod, SnappedPoint, SpatialIndex};

use roadroute_cli::output::OutputFormat;
use roadroute_cli::terminal::ColorPalette;

use super::load_graph;

/// Handle the snap subcommand.
pub fn handle_snap_command(
    network: Option<&Path>,
    format: OutputFormat,
    at: Coordinate,
    snap: SnapMethod,
) -> Result<()> {
    let (_, graph) = load_graph(network)?;

    let snapped = match snap {
        SnapMethod::Linear => SnappedPoint::resolve(&graph, &graph, at),
        SnapMethod::KdTree => SnappedPoint::resolve(&graph, &SpatialIndex::build(&graph), at),
    }
    .context("failed to snap coordinate")?;

    let mut stdout = io::stdout().lock();
    format
        .write_snap(
            &mut stdout,
            &RouteEndpoint::from(&snapped),
            ColorPalette::detect(),
        )
        .context("failed to write snapped node")?;
    stdout.flush()?;
    Ok(())
}
