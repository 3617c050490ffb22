//! Route command handler for computing paths between two coordinates.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use roadroute_lib::{plan_route, Coordinate, RouteAlgorithm, RouteRequest, RouteSummary, SnapMethod};

use roadroute_cli::output::OutputFormat;
use roadroute_cli::terminal::ColorPalette;

use super::load_graph;

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting point.
    pub from: Coordinate,
    /// Destination point.
    pub to: Coordinate,
    /// Algorithm to use when planning the route.
    pub algorithm: RouteAlgorithm,
    /// How query points are snapped to nodes.
    pub snap: SnapMethod,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        RouteRequest::new(self.from, self.to)
            .with_algorithm(self.algorithm)
            .with_snap(self.snap)
    }
}

/// Handle the route subcommand.
///
/// An unreachable goal is printed like any other result and is not an error.
pub fn handle_route_command(
    network: Option<&Path>,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let (_, graph) = load_graph(network)?;

    let plan = plan_route(&graph, &args.to_request()).context("failed to plan route")?;
    let summary = RouteSummary::from_plan(&graph, &plan)?;

    let mut stdout = io::stdout().lock();
    format
        .write_route(&mut stdout, &summary, ColorPalette::detect())
        .context("failed to write route")?;
    stdout.flush()?;
    Ok(())
}
