//! Output formatting for route, snap and network reports.
//!
//! Every renderer writes into a caller supplied [`Write`] so commands print to
//! stdout while tests capture into a buffer.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;
use serde_json::{json, Value};

use roadroute_lib::{Node, RouteEndpoint, RouteRenderMode, RouteStatus, RouteSummary};

use crate::terminal::{group_thousands, ColorPalette};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-friendly listing.
    #[default]
    Text,
    /// Minimal machine-friendly lines.
    Basic,
    /// Pretty-printed JSON.
    Json,
    /// GeoJSON for map renderers.
    Geojson,
}

/// Counts reported by the `info` command.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NetworkInfo {
    pub path: String,
    pub nodes: usize,
    pub edges: usize,
}

impl OutputFormat {
    /// Write a route summary.
    ///
    /// An unreachable goal is reported in every format without failing.
    pub fn write_route<W: Write>(
        self,
        out: &mut W,
        summary: &RouteSummary,
        palette: ColorPalette,
    ) -> io::Result<()> {
        match self {
            OutputFormat::Text => write_route_text(out, summary, palette),
            OutputFormat::Basic => out.write_all(summary.render(RouteRenderMode::Basic).as_bytes()),
            OutputFormat::Json => write_json(out, summary),
            OutputFormat::Geojson => write_json(out, &summary.to_geojson()),
        }
    }

    /// Write the node a single point snapped to.
    pub fn write_snap<W: Write>(
        self,
        out: &mut W,
        snapped: &RouteEndpoint,
        palette: ColorPalette,
    ) -> io::Result<()> {
        match self {
            OutputFormat::Text => writeln!(
                out,
                "Nearest node {} at {} {}",
                palette.paint(palette.white_bold, &snapped.node.to_string()),
                snapped.position,
                palette.paint(
                    palette.gray,
                    &format!("({:.2} m from {})", snapped.offset_m, snapped.query)
                ),
            ),
            OutputFormat::Basic => writeln!(out, "{}", snapped.node),
            OutputFormat::Json => write_json(out, snapped),
            OutputFormat::Geojson => write_json(
                out,
                &json!({
                    "type": "Feature",
                    "geometry": point(snapped.position.lat, snapped.position.lon),
                    "properties": {
                        "node": snapped.node,
                        "offset_m": snapped.offset_m,
                    },
                }),
            ),
        }
    }

    /// Write network statistics; GeoJSON lists every node as a point.
    pub fn write_info<W: Write>(
        self,
        out: &mut W,
        info: &NetworkInfo,
        nodes: &[Node],
        palette: ColorPalette,
    ) -> io::Result<()> {
        match self {
            OutputFormat::Text => {
                writeln!(out, "Network: {}", palette.paint(palette.white_bold, &info.path))?;
                writeln!(out, "Nodes: {}", group_thousands(info.nodes))?;
                writeln!(out, "Edges: {}", group_thousands(info.edges))
            }
            OutputFormat::Basic => writeln!(out, "{} {}", info.nodes, info.edges),
            OutputFormat::Json => write_json(out, info),
            OutputFormat::Geojson => {
                let features: Vec<Value> = nodes
                    .iter()
                    .map(|node| {
                        json!({
                            "type": "Feature",
                            "geometry": point(node.position.lat, node.position.lon),
                            "properties": { "id": node.id },
                        })
                    })
                    .collect();
                write_json(
                    out,
                    &json!({ "type": "FeatureCollection", "features": features }),
                )
            }
        }
    }
}

fn point(lat: f64, lon: f64) -> Value {
    json!({ "type": "Point", "coordinates": [lon, lat] })
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(io::Error::other)?;
    out.write_all(b"\n")
}

/// Library plain-text rendering with the heading and total highlighted.
fn write_route_text<W: Write>(
    out: &mut W,
    summary: &RouteSummary,
    palette: ColorPalette,
) -> io::Result<()> {
    let text = summary.render(RouteRenderMode::PlainText);

    if summary.status == RouteStatus::Unreachable {
        for line in text.lines() {
            writeln!(out, "{}", palette.paint(palette.yellow, line))?;
        }
        return Ok(());
    }

    let lines: Vec<&str> = text.lines().collect();
    let last = lines.len().saturating_sub(1);
    for (i, line) in lines.iter().enumerate() {
        let color = if i == 0 {
            palette.white_bold
        } else if i == last {
            palette.green
        } else {
            ""
        };
        writeln!(out, "{}", palette.paint(color, line))?;
    }
    Ok(())
}
