use crate::error::{Error, Result};
use crate::id::validate_id;
use crate::port::{Port, PortRole};
use indexmap::IndexMap;
use indexmap::map::Entry;
use rustc_hash::FxBuildHasher;

#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vertex {
    id: String,
    pub position: Point,
    /// Pinned vertices are anchors: layout never moves them.
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    inputs: Vec<Port>,
    #[serde(default)]
    outputs: Vec<Port>,
}

impl Vertex {
    pub fn new(id: impl Into<String>, position: Point) -> Self {
        Self {
            id: id.into(),
            position,
            is_pinned: false,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn pinned(mut self, is_pinned: bool) -> Self {
        self.is_pinned = is_pinned;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn inputs(&self) -> &[Port] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Port] {
        &self.outputs
    }

    pub fn inputs_mut(&mut self) -> &mut [Port] {
        &mut self.inputs
    }

    pub fn outputs_mut(&mut self) -> &mut [Port] {
        &mut self.outputs
    }

    /// Number of ports (inputs plus outputs), connected or not.
    pub fn degree(&self) -> usize {
        self.inputs.len() + self.outputs.len()
    }

    pub fn add_input(&mut self, port: Port) -> Result<&mut Port> {
        self.add_port(PortRole::Input, port)
    }

    pub fn add_output(&mut self, port: Port) -> Result<&mut Port> {
        self.add_port(PortRole::Output, port)
    }

    pub fn port(&self, id: &str) -> Option<(PortRole, &Port)> {
        if let Some(p) = self.inputs.iter().find(|p| p.id() == id) {
            return Some((PortRole::Input, p));
        }
        self.outputs
            .iter()
            .find(|p| p.id() == id)
            .map(|p| (PortRole::Output, p))
    }

    pub fn ports(&self) -> impl Iterator<Item = (PortRole, &Port)> {
        self.inputs
            .iter()
            .map(|p| (PortRole::Input, p))
            .chain(self.outputs.iter().map(|p| (PortRole::Output, p)))
    }

    pub fn move_by(&mut self, dx: f64, dy: f64) {
        self.position.x += dx;
        self.position.y += dy;
    }

    fn add_port(&mut self, role: PortRole, port: Port) -> Result<&mut Port> {
        port.validate()?;
        if self.port(port.id()).is_some() {
            return Err(Error::DuplicatePort {
                vertex: self.id.clone(),
                port: port.id().to_string(),
            });
        }
        let list = match role {
            PortRole::Input => &mut self.inputs,
            PortRole::Output => &mut self.outputs,
        };
        list.push(port);
        let idx = list.len() - 1;
        Ok(&mut list[idx])
    }

    fn validate(&self) -> Result<()> {
        validate_id(&self.id)?;
        let mut seen: Vec<&str> = Vec::with_capacity(self.degree());
        for (_, port) in self.ports() {
            port.validate()?;
            if seen.contains(&port.id()) {
                return Err(Error::DuplicatePort {
                    vertex: self.id.clone(),
                    port: port.id().to_string(),
                });
            }
            seen.push(port.id());
        }
        Ok(())
    }
}

/// One end of an edge: a port on an owning vertex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PortRef {
    pub vertex: String,
    pub port: String,
}

impl PortRef {
    pub fn new(vertex: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            port: port.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Edge {
    pub from: PortRef,
    pub to: PortRef,
}

impl Edge {
    pub fn new(from: PortRef, to: PortRef) -> Self {
        Self { from, to }
    }

    pub fn is_self_loop(&self) -> bool {
        self.from.vertex == self.to.vertex
    }
}

/// Serialized form of a [`Graph`]: plain vertex and edge lists.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct GraphDocument {
    pub vertices: Vec<Vertex>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

/// Insertion-ordered vertices with O(1) lookup by id, plus ordered edges.
///
/// Every edge endpoint names an existing vertex and one of its ports. The invariant is checked
/// on insertion and kept by [`Graph::remove_vertex`], which drops incident edges.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "GraphDocument", into = "GraphDocument")]
pub struct Graph {
    vertices: IndexMap<String, Vertex, FxBuildHasher>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn has_vertex(&self, id: &str) -> bool {
        self.vertices.contains_key(id)
    }

    pub fn add_vertex(&mut self, vertex: Vertex) -> Result<&mut Vertex> {
        vertex.validate()?;
        match self.vertices.entry(vertex.id.clone()) {
            Entry::Occupied(_) => Err(Error::DuplicateVertex { id: vertex.id }),
            Entry::Vacant(slot) => Ok(slot.insert(vertex)),
        }
    }

    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        self.check_port_ref(&edge.from)?;
        self.check_port_ref(&edge.to)?;
        self.edges.push(edge);
        Ok(())
    }

    /// Removes a vertex together with every edge touching it.
    pub fn remove_vertex(&mut self, id: &str) -> Option<Vertex> {
        let removed = self.vertices.shift_remove(id)?;
        self.edges
            .retain(|e| e.from.vertex != removed.id && e.to.vertex != removed.id);
        Some(removed)
    }

    pub fn vertex(&self, id: &str) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    pub fn vertex_mut(&mut self, id: &str) -> Option<&mut Vertex> {
        self.vertices.get_mut(id)
    }

    /// Position of the vertex in insertion order.
    pub fn vertex_index(&self, id: &str) -> Option<usize> {
        self.vertices.get_index_of(id)
    }

    pub fn vertex_at(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get_index(index).map(|(_, v)| v)
    }

    pub fn vertex_at_mut(&mut self, index: usize) -> Option<&mut Vertex> {
        self.vertices.get_index_mut(index).map(|(_, v)| v)
    }

    pub fn vertices(&self) -> impl ExactSizeIterator<Item = &Vertex> {
        self.vertices.values()
    }

    pub fn vertices_mut(&mut self) -> impl ExactSizeIterator<Item = &mut Vertex> {
        self.vertices.values_mut()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Re-checks the endpoint invariant for every edge.
    pub fn validate(&self) -> Result<()> {
        for e in &self.edges {
            self.check_port_ref(&e.from)?;
            self.check_port_ref(&e.to)?;
        }
        Ok(())
    }

    fn check_port_ref(&self, port_ref: &PortRef) -> Result<()> {
        let Some(vertex) = self.vertices.get(port_ref.vertex.as_str()) else {
            return Err(Error::UnknownVertex {
                vertex: port_ref.vertex.clone(),
            });
        };
        if vertex.port(&port_ref.port).is_none() {
            return Err(Error::UnknownPort {
                vertex: port_ref.vertex.clone(),
                port: port_ref.port.clone(),
            });
        }
        Ok(())
    }
}

impl TryFrom<GraphDocument> for Graph {
    type Error = Error;

    fn try_from(doc: GraphDocument) -> Result<Self> {
        let mut graph = Graph::new();
        graph.vertices.reserve(doc.vertices.len());
        for v in doc.vertices {
            graph.add_vertex(v)?;
        }
        graph.edges.reserve(doc.edges.len());
        for e in doc.edges {
            graph.add_edge(e)?;
        }
        Ok(graph)
    }
}

impl From<Graph> for GraphDocument {
    fn from(graph: Graph) -> Self {
        Self {
            vertices: graph.vertices.into_values().collect(),
            edges: graph.edges,
        }
    }
}
