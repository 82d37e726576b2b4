#![forbid(unsafe_code)]

//! Graph model for node-graph editors: vertices with ordered input/output ports, edges
//! between ports, and cardinal placement of ports along a vertex outline.
//!
//! `narwhal` lays these graphs out; the editor owns them before and after a layout run.

pub mod direction;
pub mod error;
pub mod graph;
pub mod id;
pub mod port;

pub use direction::CardinalDirection;
pub use error::{Error, Result};
pub use graph::{Edge, Graph, GraphDocument, Point, PortRef, Vertex};
pub use port::{CardinalPortPosition, Port, PortRole};
