use glam::DVec2;
use log::debug;

use crate::network::animation::ease_out_cubic;
use crate::network::{
	EdgeFlow, FrameClock, Highlight, ParticleField, PlaneGraph, PlaneLayout, Sizing, Stagger,
	Viewport, ViewportAdapter,
};

pub struct TechStackState {
	pub graph: PlaneGraph,
	pub layout: PlaneLayout,
	pub highlight: Highlight,
	pub particles: ParticleField,
	pub flow: EdgeFlow,
	pub node_radius: f64,
	pub time: f64,
	adapter: ViewportAdapter,
	clock: FrameClock,
}

impl TechStackState {
	pub fn new(
		graph: PlaneGraph,
		sizing: Sizing,
		node_radius: f64,
		particles: usize,
		seed: u64,
	) -> Self {
		let adapter = ViewportAdapter::new(sizing);
		Self {
			layout: PlaneLayout::new(&graph, adapter.viewport()),
			graph,
			highlight: Highlight::Idle,
			particles: ParticleField::seeded(particles, seed),
			flow: EdgeFlow::default(),
			node_radius,
			time: 0.0,
			adapter,
			clock: FrameClock::new(),
		}
	}

	pub fn viewport(&self) -> Viewport {
		self.adapter.viewport()
	}

	/// Apply a measurement. Node positions are recomputed only when the
	/// derived viewport actually changed.
	pub fn resize(&mut self, measured: Viewport) -> Option<Viewport> {
		if !self.adapter.observe(measured) {
			return None;
		}
		let viewport = self.adapter.viewport();
		debug!(
			"Tech stack resized to {}x{} (revision {})",
			viewport.width,
			viewport.height,
			self.adapter.revision()
		);
		self.layout.relayout(&self.graph, viewport);
		Some(viewport)
	}

	pub fn tick(&mut self, now_ms: f64) {
		self.time = self.clock.elapsed(now_ms);
	}

	/// Draw-in progress of edge `index`, eased.
	pub fn edge_progress(&self, index: usize) -> f64 {
		ease_out_cubic(Stagger::EDGES.progress(index, self.time))
	}

	/// Entrance `(scale, opacity)` of node `index`.
	pub fn node_reveal(&self, index: usize) -> (f64, f64) {
		Stagger::NODES.reveal(index, self.time)
	}

	pub fn node_at_position(&self, point: DVec2) -> Option<usize> {
		self.layout.node_at(point, self.node_radius)
	}

	pub fn pointer_moved(&mut self, point: DVec2) {
		let hovered = self.node_at_position(point);
		if self.highlight.track(hovered, self.time) {
			let label = self
				.highlight
				.active()
				.and_then(|i| self.graph.nodes().get(i))
				.map(|n| n.label.as_str());
			debug!("Tech stack highlight: {label:?}");
		}
	}

	pub fn pointer_left(&mut self) {
		if self.highlight.reset() {
			debug!("Tech stack highlight cleared");
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::network::{FitRule, PlaneEdge, PlaneNode};

	fn graph() -> PlaneGraph {
		PlaneGraph::new(
			vec![
				PlaneNode::percent("django", "Django", "#22c55e", 15.0, 30.0),
				PlaneNode::percent("react", "React", "#38bdf8", 50.0, 15.0),
				PlaneNode::percent("sql", "SQL", "#f59e0b", 85.0, 30.0),
			],
			&[PlaneEdge::new("django", "react"), PlaneEdge::new("react", "sql")],
		)
		.unwrap()
	}

	#[test]
	fn relayout_only_on_change() {
		let mut s = TechStackState::new(graph(), Sizing::Container, 36.0, 0, 0);
		assert_eq!(s.layout.position(1), Some(DVec2::ZERO));
		assert!(s.resize(Viewport::new(800.0, 400.0)).is_some());
		assert_eq!(s.layout.position(1), Some(DVec2::new(400.0, 60.0)));
		assert!(s.resize(Viewport::new(800.0, 400.0)).is_none());
		s.resize(Viewport::new(600.0, 300.0));
		assert_eq!(s.layout.position(1), Some(DVec2::new(300.0, 45.0)));
	}

	#[test]
	fn fit_sizing_derives_from_window_width() {
		let mut s = TechStackState::new(graph(), Sizing::Fit(FitRule::default()), 8.0, 0, 0);
		assert_eq!(
			s.resize(Viewport::new(1920.0, 1080.0)),
			Some(Viewport::new(800.0, 400.0))
		);
	}

	#[test]
	fn entrance_is_staggered() {
		let mut s = TechStackState::new(graph(), Sizing::Container, 36.0, 0, 0);
		s.tick(0.0);
		s.tick(200.0);
		assert!(s.node_reveal(0).1 > 0.0);
		assert_eq!(s.node_reveal(2), (0.0, 0.0));
		assert!(s.edge_progress(0) > 0.0 && s.edge_progress(0) < 1.0);
		s.tick(10_000.0);
		assert_eq!(s.edge_progress(1), 1.0);
	}

	#[test]
	fn hover_switches_between_nodes() {
		let mut s = TechStackState::new(graph(), Sizing::Container, 36.0, 0, 0);
		s.resize(Viewport::new(800.0, 400.0));
		s.pointer_moved(DVec2::new(120.0, 120.0));
		assert_eq!(s.highlight.active(), Some(0));
		s.pointer_moved(DVec2::new(400.0, 70.0));
		assert_eq!(s.highlight.active(), Some(1));
		s.pointer_moved(DVec2::new(400.0, 300.0));
		assert_eq!(s.highlight.active(), None);
		s.pointer_moved(DVec2::new(680.0, 120.0));
		s.pointer_left();
		assert_eq!(s.highlight, Highlight::Idle);
	}
}
