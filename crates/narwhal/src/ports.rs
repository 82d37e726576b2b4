//! Default placement for ports the user never positioned.

use narwhal_graph::{CardinalDirection, CardinalPortPosition, Graph, Port};

/// Inputs sit on the East side.
pub const INPUT_DEFAULT: CardinalPortPosition =
    CardinalPortPosition::centered(CardinalDirection::East);
/// Outputs sit on the West side.
pub const OUTPUT_DEFAULT: CardinalPortPosition =
    CardinalPortPosition::centered(CardinalDirection::West);

/// Fills every unset port position and returns how many ports were filled.
///
/// Positioned ports are left untouched, so running this twice is the same as running it once.
pub fn default_port_positions(graph: &mut Graph) -> usize {
    let mut filled = 0;
    for vertex in graph.vertices_mut() {
        filled += fill_unset(vertex.inputs_mut(), INPUT_DEFAULT);
        filled += fill_unset(vertex.outputs_mut(), OUTPUT_DEFAULT);
    }
    filled
}

fn fill_unset(ports: &mut [Port], default: CardinalPortPosition) -> usize {
    let mut filled = 0;
    for port in ports.iter_mut().filter(|p| p.position.is_none()) {
        port.position = Some(default);
        filled += 1;
    }
    filled
}
