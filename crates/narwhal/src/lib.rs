#![forbid(unsafe_code)]

//! Headless force-directed layout for node graphs.
//!
//! Each edge acts as a spring with an ideal length; forces are damped by the degree of the
//! endpoints and pinned vertices never move. Passes over the edge list repeat until no edge moves
//! its endpoints by more than the stability threshold, then every unplaced port gets a default
//! cardinal position.

pub mod driver;
pub mod error;
pub mod geometry;
pub mod jitter;
pub mod options;
pub mod ports;
pub mod spring;

pub use driver::{LayoutStats, layout_graph, layout_graph_with};
pub use error::{Error, Result};
pub use jitter::{Jitter, XorShift64Star};
pub use options::LayoutOptions;
pub use ports::default_port_positions;
pub use spring::{SpringOutcome, apply_spring_force};
