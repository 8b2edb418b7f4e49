use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec2;
use neural_stack_canvas::Error;
use neural_stack_canvas::network::{
	EventSource, Highlight, LayerSizes, LayeredTopology, ManualSource, PlaneEdge, PlaneGraph,
	PlaneLayout, PlaneNode, Sizing, Viewport, ViewportAdapter,
};

#[test]
fn default_network_shape() {
	let topology = LayeredTopology::generate(&LayerSizes::default()).unwrap();
	assert_eq!(topology.nodes().len(), 44);

	let from_layer = |layer: usize| {
		topology
			.links()
			.iter()
			.filter(|l| topology.nodes()[l.source].layer == layer)
			.count()
	};
	assert_eq!(from_layer(0), 24);
	assert_eq!(from_layer(3), 24);
	assert_eq!(from_layer(4), 0);
}

#[test]
fn generation_is_repeatable() {
	let sizes: LayerSizes = "5,7,2".parse().unwrap();
	assert_eq!(
		LayeredTopology::generate(&sizes).unwrap(),
		LayeredTopology::generate(&sizes).unwrap()
	);
}

#[test]
fn unknown_edge_endpoint_is_rejected_up_front() {
	let nodes = vec![
		PlaneNode::new("a", "A", "#ffffff", 0.1, 0.1),
		PlaneNode::new("b", "B", "#ffffff", 0.5, 0.5),
		PlaneNode::new("c", "C", "#ffffff", 0.9, 0.9),
	];
	let edges = [
		PlaneEdge::new("a", "b"),
		PlaneEdge::new("b", "c"),
		PlaneEdge::new("c", "d"),
	];
	assert_eq!(
		PlaneGraph::new(nodes, &edges),
		Err(Error::UnknownNode {
			from: "c".into(),
			to: "d".into(),
			missing: "d".into(),
		})
	);
}

#[test]
fn resize_keeps_topology_and_moves_pixels() {
	let graph = PlaneGraph::new(
		vec![
			PlaneNode::new("genai", "GenAI", "#10b981", 0.5, 0.15),
			PlaneNode::new("python", "Python", "#facc15", 0.5, 0.5),
		],
		&[PlaneEdge::new("python", "genai")],
	)
	.unwrap();

	let source = ManualSource::<Viewport>::new();
	let adapter = Rc::new(RefCell::new(ViewportAdapter::new(Sizing::Container)));
	let layout = Rc::new(RefCell::new(PlaneLayout::default()));
	let (a, l, g) = (adapter.clone(), layout.clone(), graph.clone());
	let subscription = source
		.subscribe(Box::new(move |measured| {
			let mut adapter = a.borrow_mut();
			if adapter.observe(measured) {
				l.borrow_mut().relayout(&g, adapter.viewport());
			}
		}))
		.unwrap();

	source.emit(Viewport::new(800.0, 400.0));
	assert_eq!(layout.borrow().position(0), Some(DVec2::new(400.0, 60.0)));
	source.emit(Viewport::new(600.0, 300.0));
	assert_eq!(layout.borrow().position(0), Some(DVec2::new(300.0, 45.0)));
	assert_eq!(adapter.borrow().revision(), 2);

	// nothing arrives after the subscription is released
	subscription.cancel();
	assert_eq!(source.listeners(), 0);
	source.emit(Viewport::new(100.0, 100.0));
	assert_eq!(layout.borrow().viewport(), Viewport::new(600.0, 300.0));
	assert_eq!(graph.edges(), &[(1, 0)]);
}

#[test]
fn many_resizes_leave_the_last_one() {
	let graph =
		PlaneGraph::new(vec![PlaneNode::new("n", "N", "#ffffff", 0.25, 0.75)], &[]).unwrap();
	let mut adapter = ViewportAdapter::new(Sizing::Container);
	let mut layout = PlaneLayout::new(&graph, adapter.viewport());
	for (w, h) in [(1024.0, 768.0), (320.0, 640.0), (1280.0, 720.0)] {
		if adapter.observe(Viewport::new(w, h)) {
			layout.relayout(&graph, adapter.viewport());
		}
	}
	assert_eq!(layout.position(0), Some(DVec2::new(320.0, 540.0)));
}

#[test]
fn only_one_node_is_ever_active() {
	let mut highlight = Highlight::Idle;
	highlight.pointer_enter(1, 0.0);
	highlight.pointer_enter(7, 0.2);
	// a stale leave from the previous node does not clear the highlight
	assert!(!highlight.pointer_leave(1));
	assert_eq!(highlight.active(), Some(7));
	assert!(highlight.pointer_leave(7));
	assert_eq!(highlight.active(), None);
}
