use glam::{DVec2, Vec3};
use log::debug;

use crate::network::animation::DustCloud;
use crate::network::{
	FrameClock, Highlight, LayeredTopology, OrbitCamera, Projector, RingLayout, SceneSpin,
	ScreenPoint, Sizing, Viewport, ViewportAdapter,
};

/// Node radius in world units.
pub const NODE_SIZE: f64 = 0.08;
/// Minimum hit radius in pixels, so far-away nodes stay hoverable.
pub const HIT_RADIUS: f64 = 10.0;
/// Side of the cube the dust is scattered in.
pub const DUST_EXTENT: f32 = 20.0;

const TONES: [&str; 2] = ["#00ffff", "#ff00ff"];

/// Node colour by layer parity.
pub fn tone(layer: usize) -> &'static str {
	TONES[layer % TONES.len()]
}

pub struct NeuralNetState {
	pub topology: LayeredTopology,
	pub positions: Vec<Vec3>,
	pub camera: OrbitCamera,
	pub spin: SceneSpin,
	pub dust: DustCloud,
	pub highlight: Highlight,
	pub time: f64,
	adapter: ViewportAdapter,
	clock: FrameClock,
	projected: Vec<Option<ScreenPoint>>,
}

impl NeuralNetState {
	pub fn new(topology: LayeredTopology, layout: &RingLayout, dust: usize, seed: u64) -> Self {
		let positions = layout.place(&topology);
		Self {
			projected: vec![None; positions.len()],
			topology,
			positions,
			camera: OrbitCamera::default(),
			spin: SceneSpin::default(),
			dust: DustCloud::seeded(dust, DUST_EXTENT, seed),
			highlight: Highlight::Idle,
			time: 0.0,
			adapter: ViewportAdapter::new(Sizing::Container),
			clock: FrameClock::new(),
		}
	}

	pub fn viewport(&self) -> Viewport {
		self.adapter.viewport()
	}

	/// Apply a container measurement. Returns the new viewport if it changed.
	pub fn resize(&mut self, measured: Viewport) -> Option<Viewport> {
		if !self.adapter.observe(measured) {
			return None;
		}
		let viewport = self.adapter.viewport();
		debug!("Neural net resized to {}x{}", viewport.width, viewport.height);
		self.project();
		Some(viewport)
	}

	/// Advance to host time `now_ms`.
	pub fn tick(&mut self, now_ms: f64) {
		self.time = self.clock.elapsed(now_ms);
		self.project();
	}

	pub fn toggle_pause(&mut self, now_ms: f64) {
		if self.clock.is_paused() {
			self.clock.resume(now_ms);
		} else {
			self.clock.pause(now_ms);
		}
		debug!("Neural net paused: {}", self.clock.is_paused());
	}

	/// Camera and spinning network for the current frame.
	pub fn projector(&self) -> Projector {
		Projector::new(&self.camera, self.time, self.spin.model(self.time), self.viewport())
	}

	/// Camera and slowly turning dust for the current frame.
	pub fn dust_projector(&self) -> Projector {
		Projector::new(&self.camera, self.time, self.dust.model(self.time), self.viewport())
	}

	fn project(&mut self) {
		if !self.viewport().is_measured() {
			self.projected.iter_mut().for_each(|p| *p = None);
			return;
		}
		let projector = self.projector();
		self.projected.clear();
		self.projected
			.extend(self.positions.iter().map(|p| projector.project(*p)));
	}

	/// Screen positions of every node for the last tick; `None` when culled.
	pub fn projected(&self) -> &[Option<ScreenPoint>] {
		&self.projected
	}

	pub fn node_at_position(&self, point: DVec2) -> Option<usize> {
		self.projected
			.iter()
			.enumerate()
			.filter_map(|(i, p)| {
				let p = p.as_ref()?;
				let d = DVec2::new(p.x, p.y).distance(point);
				(d <= (NODE_SIZE * p.scale).max(HIT_RADIUS)).then_some((i, d))
			})
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(i, _)| i)
	}

	pub fn pointer_moved(&mut self, point: DVec2) {
		let hovered = self.node_at_position(point);
		if self.highlight.track(hovered, self.time) {
			debug!("Neural net highlight: {:?}", self.highlight.active());
		}
	}

	pub fn pointer_left(&mut self) {
		if self.highlight.reset() {
			debug!("Neural net highlight cleared");
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::network::LayerSizes;

	fn state() -> NeuralNetState {
		let topology = LayeredTopology::generate(&LayerSizes::default()).unwrap();
		NeuralNetState::new(topology, &RingLayout::default(), 50, 1)
	}

	#[test]
	fn nothing_is_projected_before_measurement() {
		let mut s = state();
		s.tick(0.0);
		assert_eq!(s.projected().len(), 44);
		assert!(s.projected().iter().all(Option::is_none));
		assert_eq!(s.node_at_position(DVec2::ZERO), None);
	}

	#[test]
	fn resize_reports_changes_only() {
		let mut s = state();
		assert_eq!(
			s.resize(Viewport::new(800.0, 600.0)),
			Some(Viewport::new(800.0, 600.0))
		);
		assert_eq!(s.resize(Viewport::new(800.0, 600.0)), None);
		assert!(s.projected().iter().all(Option::is_some));
	}

	#[test]
	fn hover_follows_projected_nodes() {
		let mut s = state();
		s.resize(Viewport::new(800.0, 600.0));
		s.tick(1000.0);
		let Some(p) = s.projected()[0] else {
			panic!("node 0 should be visible");
		};
		s.pointer_moved(DVec2::new(p.x, p.y));
		assert_eq!(s.highlight.active(), Some(0));
		s.pointer_left();
		assert_eq!(s.highlight, Highlight::Idle);
	}

	#[test]
	fn pausing_freezes_scene_time() {
		let mut s = state();
		s.tick(0.0);
		s.tick(2000.0);
		s.toggle_pause(2000.0);
		s.tick(9000.0);
		assert!((s.time - 2.0).abs() < 1e-9);
		s.toggle_pause(9000.0);
		s.tick(10_000.0);
		assert!((s.time - 3.0).abs() < 1e-9);
	}

	#[test]
	fn layers_alternate_tone() {
		assert_eq!(tone(0), "#00ffff");
		assert_eq!(tone(1), "#ff00ff");
		assert_eq!(tone(4), tone(0));
	}
}
