//! Spring force for a single edge.

use crate::error::{Error, Result};
use crate::geometry;
use crate::jitter::Jitter;
use crate::options::LayoutOptions;
use nalgebra::Vector2;
use narwhal_graph::{Graph, Point};

/// An edge with both endpoints resolved to vertex indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResolvedEdge {
    pub(crate) index: usize,
    pub(crate) from: usize,
    pub(crate) to: usize,
    pub(crate) self_loop: bool,
}

impl ResolvedEdge {
    pub(crate) fn resolve(graph: &Graph, edge_index: usize) -> Result<Self> {
        let Some(edge) = graph.edges().get(edge_index) else {
            return Err(Error::UnknownEdge { edge_index });
        };
        let lookup = |vertex: &str| {
            graph
                .vertex_index(vertex)
                .ok_or_else(|| Error::MissingEndpoint {
                    edge_index,
                    vertex: vertex.to_string(),
                })
        };
        Ok(Self {
            index: edge_index,
            from: lookup(&edge.from.vertex)?,
            to: lookup(&edge.to.vertex)?,
            self_loop: edge.is_self_loop(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpringOutcome {
    /// Both endpoints are pinned, or the edge is a self-loop; nothing moved.
    Skipped,
    Applied {
        /// Displacement before one-sided doubling: `to` moves by `+d`, `from` by `-d`.
        displacement: Vector2<f64>,
        /// Whether `displacement` exceeds the movement threshold on either axis.
        changed: bool,
    },
}

impl SpringOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, SpringOutcome::Applied { changed: true, .. })
    }
}

#[derive(Debug, Clone, Copy)]
enum Pinning {
    Free,
    FromPinned,
    ToPinned,
}

/// Applies the spring force of `graph.edges()[edge_index]` to its endpoint vertices.
pub fn apply_spring_force<J: Jitter + ?Sized>(
    graph: &mut Graph,
    edge_index: usize,
    opts: &LayoutOptions,
    jitter: &mut J,
) -> Result<SpringOutcome> {
    opts.validate()?;
    let edge = ResolvedEdge::resolve(graph, edge_index)?;
    spring_force(graph, edge, opts, jitter)
}

/// Fails with [`Error::NonFiniteDisplacement`], leaving both endpoints where they were, when the
/// edge is too long for its length or displacement to be represented.
pub(crate) fn spring_force<J: Jitter + ?Sized>(
    graph: &mut Graph,
    edge: ResolvedEdge,
    opts: &LayoutOptions,
    jitter: &mut J,
) -> Result<SpringOutcome> {
    if edge.self_loop {
        return Ok(SpringOutcome::Skipped);
    }
    // Unreachable while `edge` comes from `ResolvedEdge::resolve` on this same graph.
    let (Some(from), Some(to)) = (graph.vertex_at(edge.from), graph.vertex_at(edge.to)) else {
        return Err(Error::UnknownEdge {
            edge_index: edge.index,
        });
    };

    let pinning = match (from.is_pinned, to.is_pinned) {
        (true, true) => return Ok(SpringOutcome::Skipped),
        (false, false) => Pinning::Free,
        (true, false) => Pinning::FromPinned,
        (false, true) => Pinning::ToPinned,
    };

    let delta = geometry::delta(from.position, to.position);
    let mut length = delta.norm();
    if length == 0.0 {
        length = opts.degenerate_length;
    }

    let degree_sum = i32::try_from(from.degree() + to.degree()).unwrap_or(i32::MAX);
    let damping = opts.stretch_factor.powi(degree_sum.saturating_sub(4));
    let force = opts.force_strength * (opts.ideal_length - length) / length * damping;
    let repulsion = delta * force;

    let mut attraction = if length < 1.0 {
        let x = jitter.next_unit() * 10.0 + 1.0;
        let y = jitter.next_unit() * 10.0 + 1.0;
        Vector2::new(x, y)
    } else {
        delta / (length * length)
    };
    let magnitude = attraction.norm_squared();
    if magnitude > 0.0 {
        attraction /= magnitude.sqrt();
    }

    let d = repulsion - attraction;
    let (to_by, from_by) = match pinning {
        Pinning::Free => (d, -d),
        Pinning::ToPinned => (Vector2::zeros(), -2.0 * d),
        Pinning::FromPinned => (2.0 * d, Vector2::zeros()),
    };
    let lands_finite = |p: Point, by: Vector2<f64>| Point::new(p.x + by.x, p.y + by.y).is_finite();
    if !(length.is_finite()
        && lands_finite(to.position, to_by)
        && lands_finite(from.position, from_by))
    {
        return Err(Error::NonFiniteDisplacement {
            edge_index: edge.index,
        });
    }

    match pinning {
        Pinning::Free => {
            move_vertex(graph, edge.to, to_by);
            move_vertex(graph, edge.from, from_by);
        }
        Pinning::ToPinned => move_vertex(graph, edge.from, from_by),
        Pinning::FromPinned => move_vertex(graph, edge.to, to_by),
    }

    let t = opts.min_movement_threshold;
    Ok(SpringOutcome::Applied {
        displacement: d,
        changed: d.x > t || d.y > t || d.x < -t || d.y < -t,
    })
}

/// `index` must come from a lookup in `graph`.
fn move_vertex(graph: &mut Graph, index: usize, by: Vector2<f64>) {
    let vertex = graph.vertex_at_mut(index);
    debug_assert!(vertex.is_some(), "vertex index {index} out of range");
    if let Some(v) = vertex {
        v.move_by(by.x, by.y);
    }
}
