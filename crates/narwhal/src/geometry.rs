//! Edge geometry measured between the owning vertices of the edge's two ports.

use crate::error::Result;
use nalgebra::Vector2;
use narwhal_graph::{Edge, Graph, Point, PortRef};

/// Signed delta `to - from`.
pub(crate) fn delta(from: Point, to: Point) -> Vector2<f64> {
    Vector2::new(to.x - from.x, to.y - from.y)
}

fn endpoint(graph: &Graph, port: &PortRef) -> Result<Point> {
    graph
        .vertex(&port.vertex)
        .map(|v| v.position)
        .ok_or_else(|| {
            narwhal_graph::Error::UnknownVertex {
                vertex: port.vertex.clone(),
            }
            .into()
        })
}

pub fn edge_delta(graph: &Graph, edge: &Edge) -> Result<Vector2<f64>> {
    let from = endpoint(graph, &edge.from)?;
    let to = endpoint(graph, &edge.to)?;
    Ok(delta(from, to))
}

/// Euclidean distance between the two owning vertices.
pub fn edge_length(graph: &Graph, edge: &Edge) -> Result<f64> {
    Ok(edge_delta(graph, edge)?.norm())
}

pub fn edge_x_length(graph: &Graph, edge: &Edge) -> Result<f64> {
    Ok(edge_delta(graph, edge)?.x)
}

pub fn edge_y_length(graph: &Graph, edge: &Edge) -> Result<f64> {
    Ok(edge_delta(graph, edge)?.y)
}
