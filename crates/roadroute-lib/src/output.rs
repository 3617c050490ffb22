use std::fmt::Write;

use serde::Serialize;
use serde_json::{json, Value};

use crate::coord::Coordinate;
use crate::error::Result;
use crate::graph::Graph;
use crate::network::NodeId;
use crate::path::{round_to_centimetres, PathOutcome};
use crate::routing::{RouteAlgorithm, RoutePlan, SnappedPoint};

/// Whether a route was found.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    Found,
    Unreachable,
}

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    /// Human-readable listing of every node.
    PlainText,
    /// Distance followed by the node ids on one line.
    Basic,
}

/// Endpoint within a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteEndpoint {
    pub query: Coordinate,
    pub node: NodeId,
    pub position: Coordinate,
    pub offset_m: f64,
}

impl From<&SnappedPoint> for RouteEndpoint {
    fn from(point: &SnappedPoint) -> Self {
        Self {
            query: point.query,
            node: point.node,
            position: point.position,
            offset_m: round_to_centimetres(point.offset_m),
        }
    }
}

/// Node visited along a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub status: RouteStatus,
    pub algorithm: RouteAlgorithm,
    /// Total length in metres rounded to two decimals; absent when unreachable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_m: Option<f64>,
    pub hops: usize,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a summary with node positions resolved.
    pub fn from_plan(graph: &Graph, plan: &RoutePlan) -> Result<Self> {
        let (status, distance_m, steps) = match &plan.outcome {
            PathOutcome::Found(route) => {
                let steps = route
                    .path
                    .iter()
                    .enumerate()
                    .map(|(index, &id)| -> Result<RouteStep> {
                        let position = graph.node(id)?.position;
                        Ok(RouteStep {
                            index,
                            id,
                            lat: position.lat,
                            lon: position.lon,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                (RouteStatus::Found, Some(route.rounded_distance()), steps)
            }
            PathOutcome::Unreachable => (RouteStatus::Unreachable, None, Vec::new()),
        };

        Ok(Self {
            status,
            algorithm: plan.algorithm,
            distance_m,
            hops: steps.len().saturating_sub(1),
            start: RouteEndpoint::from(&plan.start),
            goal: RouteEndpoint::from(&plan.goal),
            steps,
        })
    }

    /// Render the summary as text.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::Basic => self.render_basic(),
        }
    }

    fn render_plain(&self) -> String {
        let mut out = String::new();
        let Some(distance) = self.distance_m else {
            let _ = writeln!(
                out,
                "No route from node {} to node {} (algorithm: {}).",
                self.start.node, self.goal.node, self.algorithm
            );
            return out;
        };

        let _ = writeln!(
            out,
            "Route from node {} to node {} ({} hops; algorithm: {}):",
            self.start.node, self.goal.node, self.hops, self.algorithm
        );
        for step in &self.steps {
            let _ = writeln!(
                out,
                "  {:>3}. {} ({:.6}, {:.6})",
                step.index, step.id, step.lat, step.lon
            );
        }
        let _ = writeln!(out, "Total distance: {:.2} m", distance);
        out
    }

    fn render_basic(&self) -> String {
        match self.distance_m {
            Some(distance) => {
                let ids: Vec<String> = self.steps.iter().map(|step| step.id.to_string()).collect();
                format!("{:.2}\n{}\n", distance, ids.join(" "))
            }
            None => "unreachable\n".to_string(),
        }
    }

    /// GeoJSON `Feature` with a `LineString` of the route in lon/lat order.
    ///
    /// Unreachable routes yield a feature with a `null` geometry so renderers
    /// can still show the snapped endpoints from the properties.
    pub fn to_geojson(&self) -> Value {
        let geometry = match self.status {
            RouteStatus::Found => json!({
                "type": "LineString",
                "coordinates": self
                    .steps
                    .iter()
                    .map(|step| [step.lon, step.lat])
                    .collect::<Vec<_>>(),
            }),
            RouteStatus::Unreachable => Value::Null,
        };

        json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "status": self.status,
                "algorithm": self.algorithm,
                "distance_m": self.distance_m,
                "hops": self.hops,
                "start_node": self.start.node,
                "goal_node": self.goal.node,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Route;

    fn sample_graph() -> Graph {
        let mut builder = Graph::builder();
        builder.add_node(1, 47.0, 15.0).unwrap();
        builder.add_node(2, 47.001, 15.0).unwrap();
        builder.add_edge(1, 2, 111.1949).unwrap();
        builder.build().unwrap()
    }

    fn snapped(graph: &Graph, id: NodeId) -> SnappedPoint {
        let position = graph.node(id).unwrap().position;
        SnappedPoint {
            query: position,
            node: id,
            position,
            offset_m: 0.0,
        }
    }

    fn plan(graph: &Graph, outcome: PathOutcome) -> RoutePlan {
        RoutePlan {
            algorithm: RouteAlgorithm::Dijkstra,
            start: snapped(graph, 1),
            goal: snapped(graph, 2),
            outcome,
        }
    }

    #[test]
    fn found_summary_rounds_distance_and_lists_steps() {
        let graph = sample_graph();
        let plan = plan(
            &graph,
            PathOutcome::Found(Route {
                distance: 111.1949,
                path: vec![1, 2],
            }),
        );

        let summary = RouteSummary::from_plan(&graph, &plan).unwrap();
        assert_eq!(summary.status, RouteStatus::Found);
        assert_eq!(summary.distance_m, Some(111.19));
        assert_eq!(summary.hops, 1);
        assert_eq!(summary.steps[1].lat, 47.001);

        let text = summary.render(RouteRenderMode::PlainText);
        assert!(text.contains("Total distance: 111.19 m"));
        assert_eq!(summary.render(RouteRenderMode::Basic), "111.19\n1 2\n");

        let geojson = summary.to_geojson();
        assert_eq!(geojson["geometry"]["type"], "LineString");
        assert_eq!(geojson["geometry"]["coordinates"][0][0], 15.0);
    }

    #[test]
    fn unreachable_summary_has_no_distance() {
        let graph = sample_graph();
        let plan = plan(&graph, PathOutcome::Unreachable);
        let summary = RouteSummary::from_plan(&graph, &plan).unwrap();

        assert_eq!(summary.status, RouteStatus::Unreachable);
        assert!(summary.steps.is_empty());

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["status"], "unreachable");
        assert!(json.get("distance_m").is_none());
        assert!(summary.render(RouteRenderMode::PlainText).starts_with("No route"));
        assert!(summary.to_geojson()["geometry"].is_null());
    }
}
