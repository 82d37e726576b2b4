//! Convergence driver: repeats full passes over the edge list until a pass moves nothing.

use crate::error::{Error, Result};
use crate::jitter::{Jitter, XorShift64Star};
use crate::options::LayoutOptions;
use crate::ports::default_port_positions;
use crate::spring::{ResolvedEdge, spring_force};
use narwhal_graph::Graph;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutStats {
    /// Full passes over the edge list, including the final pass that moved nothing.
    pub passes: usize,
    /// Ports that received a default position after convergence.
    pub defaulted_ports: usize,
}

#[derive(Debug, Clone, Copy)]
struct Convergence {
    passes: usize,
    converged: bool,
    moved_edges_last_pass: usize,
}

/// State owned by a single layout call.
struct LayoutSession<'a, J: ?Sized> {
    graph: &'a mut Graph,
    edges: Vec<ResolvedEdge>,
    opts: &'a LayoutOptions,
    jitter: &'a mut J,
}

impl<'a, J: Jitter + ?Sized> LayoutSession<'a, J> {
    fn new(graph: &'a mut Graph, opts: &'a LayoutOptions, jitter: &'a mut J) -> Result<Self> {
        opts.validate()?;
        if let Some(v) = graph.vertices().find(|v| !v.position.is_finite()) {
            return Err(Error::NonFinitePosition {
                vertex: v.id().to_string(),
            });
        }
        let shared: &Graph = graph;
        let edges = (0..shared.edge_count())
            .map(|idx| ResolvedEdge::resolve(shared, idx))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            graph,
            edges,
            opts,
            jitter,
        })
    }

    /// One pass over every edge in graph order; returns how many edges signalled movement.
    fn run_pass(&mut self) -> Result<usize> {
        let mut moved = 0;
        for &edge in &self.edges {
            if spring_force(self.graph, edge, self.opts, self.jitter)?.changed() {
                moved += 1;
            }
        }
        Ok(moved)
    }

    fn converge(&mut self) -> Result<Convergence> {
        let mut passes = 0usize;
        loop {
            passes += 1;
            let moved = self.run_pass()?;
            tracing::trace!(pass = passes, moved_edges = moved, "layout pass");

            if moved == 0 {
                return Ok(Convergence {
                    passes,
                    converged: true,
                    moved_edges_last_pass: 0,
                });
            }
            if self.opts.max_passes.is_some_and(|cap| passes >= cap) {
                return Ok(Convergence {
                    passes,
                    converged: false,
                    moved_edges_last_pass: moved,
                });
            }
        }
    }
}

/// Lays out `graph` in place using the seeded default jitter source.
pub fn layout_graph(graph: &mut Graph, opts: &LayoutOptions) -> Result<LayoutStats> {
    let mut jitter = XorShift64Star::new(opts.random_seed);
    layout_graph_with(graph, opts, &mut jitter)
}

/// Lays out `graph` in place, drawing jitter for (near-)coincident endpoints from `jitter`.
///
/// Fails before moving anything if an edge names a missing vertex, a position is non-finite, or
/// the options are invalid. A spring force that would push a vertex to a non-finite position
/// stops the layout with [`Error::NonFiniteDisplacement`] and leaves ports untouched.
///
/// When `max_passes` is reached without converging, unset ports are still defaulted and
/// [`Error::DidNotConverge`] is returned; the graph keeps the positions reached so far.
pub fn layout_graph_with<J: Jitter + ?Sized>(
    graph: &mut Graph,
    opts: &LayoutOptions,
    jitter: &mut J,
) -> Result<LayoutStats> {
    let span = tracing::debug_span!(
        "layout_graph",
        vertices = graph.vertex_count(),
        edges = graph.edge_count()
    );
    let _guard = span.enter();

    let convergence = LayoutSession::new(graph, opts, jitter)?.converge()?;
    let defaulted_ports = default_port_positions(graph);

    if !convergence.converged {
        tracing::warn!(
            passes = convergence.passes,
            moved_edges = convergence.moved_edges_last_pass,
            "layout stopped at the pass cap before converging"
        );
        return Err(Error::DidNotConverge {
            passes: convergence.passes,
        });
    }

    tracing::debug!(
        passes = convergence.passes,
        defaulted_ports,
        "layout converged"
    );
    Ok(LayoutStats {
        passes: convergence.passes,
        defaulted_ports,
    })
}
