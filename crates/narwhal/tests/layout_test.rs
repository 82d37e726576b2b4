use narwhal::{
    Error, Jitter, LayoutOptions, XorShift64Star, apply_spring_force, layout_graph,
    layout_graph_with,
};
use narwhal_graph::{CardinalDirection, Edge, Graph, Point, Port, PortRef, Vertex};

fn vertex(id: &str, x: f64, y: f64, inputs: usize, outputs: usize) -> Vertex {
    let mut v = Vertex::new(id, Point::new(x, y));
    for i in 0..inputs {
        v.add_input(Port::new(format!("in{i}"))).unwrap();
    }
    for i in 0..outputs {
        v.add_output(Port::new(format!("out{i}"))).unwrap();
    }
    v
}

fn connect(g: &mut Graph, from: &str, from_port: &str, to: &str, to_port: &str) {
    g.add_edge(Edge::new(
        PortRef::new(from, from_port),
        PortRef::new(to, to_port),
    ))
    .unwrap();
}

fn stretched_pair() -> Graph {
    let mut g = Graph::new();
    g.add_vertex(vertex("a", 0.0, 0.0, 1, 1)).unwrap();
    g.add_vertex(vertex("b", 1000.0, 0.0, 1, 1)).unwrap();
    connect(&mut g, "a", "out0", "b", "in0");
    g
}

fn pos(g: &Graph, id: &str) -> Point {
    g.vertex(id).unwrap().position
}

#[test]
fn stretched_pair_converges_near_the_ideal_length() {
    let mut g = stretched_pair();
    let stats = layout_graph(&mut g, &LayoutOptions::default()).unwrap();

    assert_eq!(stats.passes, 8);
    let (a, b) = (pos(&g, "a"), pos(&g, "b"));
    let distance = a.distance_to(b);
    // The unit attraction term settles the spring slightly short of 500.
    assert!((distance - 497.0).abs() < 0.2, "distance: {distance}");
    assert!(((a.x + b.x) / 2.0 - 500.0).abs() < 1e-9);
    assert_eq!(a.y, 0.0);
    assert_eq!(b.y, 0.0);
}

#[test]
fn stretched_pair_contracts_monotonically_until_still() {
    let mut g = stretched_pair();
    let opts = LayoutOptions::default();
    let mut rng = XorShift64Star::new(0);

    let mut last = pos(&g, "a").distance_to(pos(&g, "b"));
    let mut passes = 0;
    loop {
        passes += 1;
        let outcome = apply_spring_force(&mut g, 0, &opts, &mut rng).unwrap();
        let distance = pos(&g, "a").distance_to(pos(&g, "b"));
        assert!(distance < last, "pass {passes}: {distance} >= {last}");
        last = distance;
        if !outcome.changed() {
            break;
        }
        assert!(passes < 100, "did not settle");
    }
    assert!((last - 500.0).abs() < 5.0, "{last}");
}

#[test]
fn pinned_pair_at_ideal_length_stops_after_one_pass() {
    let mut g = Graph::new();
    g.add_vertex(vertex("a", 0.0, 0.0, 1, 1).pinned(true))
        .unwrap();
    g.add_vertex(vertex("b", 500.0, 0.0, 1, 1).pinned(true))
        .unwrap();
    connect(&mut g, "a", "out0", "b", "in0");

    let stats = layout_graph(&mut g, &LayoutOptions::default()).unwrap();
    assert_eq!(stats.passes, 1);
    assert_eq!(pos(&g, "a"), Point::new(0.0, 0.0));
    assert_eq!(pos(&g, "b"), Point::new(500.0, 0.0));
}

#[test]
fn pinned_hub_never_moves() {
    let mut g = Graph::new();
    g.add_vertex(vertex("hub", 0.0, 0.0, 0, 4).pinned(true))
        .unwrap();
    let leaves = [(100.0, 0.0), (0.0, 900.0), (-300.0, -300.0), (50.0, -1200.0)];
    for (i, (x, y)) in leaves.iter().enumerate() {
        let id = format!("leaf{i}");
        g.add_vertex(vertex(&id, *x, *y, 1, 0)).unwrap();
        connect(&mut g, "hub", &format!("out{i}"), &id, "in0");
    }

    let stats = layout_graph(&mut g, &LayoutOptions::default()).unwrap();
    assert_eq!(stats.passes, 13);
    assert_eq!(pos(&g, "hub"), Point::new(0.0, 0.0));
    for i in 0..leaves.len() {
        let d = pos(&g, &format!("leaf{i}")).distance_to(Point::default());
        assert!((d - 495.7).abs() < 0.5, "leaf{i} at distance {d}");
    }
    // A leaf on the x axis stays on it.
    assert_eq!(pos(&g, "leaf0").y, 0.0);
}

#[test]
fn chain_converges_and_fills_ports() {
    let mut g = Graph::new();
    for i in 0..4 {
        let y = if i % 2 == 1 { 50.0 } else { 0.0 };
        g.add_vertex(vertex(&format!("v{i}"), i as f64 * 100.0, y, 1, 1))
            .unwrap();
    }
    for i in 0..3 {
        connect(&mut g, &format!("v{i}"), "out0", &format!("v{}", i + 1), "in0");
    }

    let stats = layout_graph(&mut g, &LayoutOptions::default()).unwrap();
    assert_eq!(stats.defaulted_ports, 8);
    for v in g.vertices() {
        assert!(v.position.is_finite());
        assert_eq!(
            v.inputs()[0].position.map(|p| p.direction()),
            Some(CardinalDirection::East)
        );
        assert_eq!(
            v.outputs()[0].position.map(|p| p.direction()),
            Some(CardinalDirection::West)
        );
    }
}

#[test]
fn same_seed_gives_the_same_layout() {
    fn coincident() -> Graph {
        let mut g = Graph::new();
        g.add_vertex(vertex("a", 10.0, 10.0, 1, 1)).unwrap();
        g.add_vertex(vertex("b", 10.0, 10.0, 1, 1)).unwrap();
        connect(&mut g, "a", "out0", "b", "in0");
        g
    }

    let opts = LayoutOptions::default().with_seed(42);
    let mut first = coincident();
    let mut second = coincident();
    layout_graph(&mut first, &opts).unwrap();
    layout_graph(&mut second, &opts).unwrap();

    assert_eq!(pos(&first, "a"), pos(&second, "a"));
    assert_eq!(pos(&first, "b"), pos(&second, "b"));
    let distance = pos(&first, "a").distance_to(pos(&first, "b"));
    assert!((distance - 497.0).abs() < 0.5, "{distance}");
}

#[test]
fn injected_jitter_is_used_for_coincident_vertices() {
    struct CountingJitter {
        draws: usize,
    }
    impl Jitter for CountingJitter {
        fn next_unit(&mut self) -> f64 {
            self.draws += 1;
            0.25
        }
    }

    let mut g = Graph::new();
    g.add_vertex(vertex("a", 0.0, 0.0, 1, 1)).unwrap();
    g.add_vertex(vertex("b", 0.0, 0.0, 1, 1)).unwrap();
    connect(&mut g, "a", "out0", "b", "in0");

    let mut jitter = CountingJitter { draws: 0 };
    layout_graph_with(&mut g, &LayoutOptions::default(), &mut jitter).unwrap();
    // Only the first pass sees a sub-unit edge; one draw per axis.
    assert_eq!(jitter.draws, 2);
    // Equal jitter on both axes separates the pair along the diagonal.
    let (a, b) = (pos(&g, "a"), pos(&g, "b"));
    assert!(((b.x - a.x) - (b.y - a.y)).abs() < 1e-9);
}

#[test]
fn pass_cap_reports_non_convergence() {
    let mut g = stretched_pair();
    let opts = LayoutOptions::default().with_max_passes(2);
    let err = layout_graph(&mut g, &opts).unwrap_err();
    assert!(matches!(err, Error::DidNotConverge { passes: 2 }), "{err}");

    // Positions reached so far are kept and ports are still defaulted.
    assert!(pos(&g, "a").x > 0.0);
    assert!(g.vertex("a").unwrap().inputs()[0].position.is_some());
}

#[test]
fn unbounded_layout_matches_the_capped_one_when_it_converges() {
    let mut capped = stretched_pair();
    let mut unbounded = stretched_pair();
    layout_graph(&mut capped, &LayoutOptions::default()).unwrap();
    layout_graph(&mut unbounded, &LayoutOptions::default().unbounded()).unwrap();
    assert_eq!(pos(&capped, "a"), pos(&unbounded, "a"));
    assert_eq!(pos(&capped, "b"), pos(&unbounded, "b"));
}

#[test]
fn non_finite_positions_fail_before_anything_moves() {
    let mut g = stretched_pair();
    g.add_vertex(vertex("c", f64::NAN, 0.0, 1, 0)).unwrap();
    connect(&mut g, "a", "out0", "c", "in0");

    let err = layout_graph(&mut g, &LayoutOptions::default()).unwrap_err();
    assert!(matches!(err, Error::NonFinitePosition { ref vertex } if vertex == "c"));
    assert_eq!(pos(&g, "a"), Point::new(0.0, 0.0));
    assert!(g.vertex("a").unwrap().inputs()[0].position.is_none());
}

#[test]
fn overflowing_spring_stops_the_layout_instead_of_converging() {
    let mut g = Graph::new();
    g.add_vertex(vertex("a", 0.0, 0.0, 1, 1)).unwrap();
    g.add_vertex(vertex("b", 1e200, 0.0, 1, 1)).unwrap();
    connect(&mut g, "a", "out0", "b", "in0");

    let err = layout_graph(&mut g, &LayoutOptions::default()).unwrap_err();
    assert!(matches!(err, Error::NonFiniteDisplacement { edge_index: 0 }));
    assert_eq!(pos(&g, "a"), Point::new(0.0, 0.0));
    assert_eq!(pos(&g, "b"), Point::new(1e200, 0.0));
    assert!(g.vertices().all(|v| v.position.is_finite()));
    assert!(g.vertex("a").unwrap().outputs()[0].position.is_none());
}

#[test]
fn invalid_options_are_rejected() {
    let mut g = stretched_pair();
    let opts = LayoutOptions {
        ideal_length: -1.0,
        ..Default::default()
    };
    let err = layout_graph(&mut g, &opts).unwrap_err();
    assert!(matches!(err, Error::InvalidOptions { .. }));
    assert_eq!(pos(&g, "b"), Point::new(1000.0, 0.0));
}

#[test]
fn empty_graph_converges_immediately() {
    let mut g = Graph::new();
    let stats = layout_graph(&mut g, &LayoutOptions::default()).unwrap();
    assert_eq!(stats.passes, 1);
    assert_eq!(stats.defaulted_ports, 0);
}
