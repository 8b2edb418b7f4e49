//! Spatial placement for both graph variants.
//!
//! The layered variant is placed once in world space as one ring per layer.
//! The flat variant keeps normalized coordinates and is re-resolved to pixels
//! whenever the viewport changes.

use std::f32::consts::TAU;

use glam::{DVec2, Vec3};

use super::plane::PlaneGraph;
use super::topology::{LayerNode, LayeredTopology};
use super::viewport::Viewport;

/// Ring-per-layer placement along the depth axis.
#[derive(Clone, Debug, PartialEq)]
pub struct RingLayout {
	/// Ring radius for ordinary layers.
	pub radius: f32,
	/// Extra radius for hidden layers.
	pub hidden_boost: f32,
	/// Layers drawn on the wider ring.
	pub hidden_layers: Vec<usize>,
	/// Depth distance between consecutive layers.
	pub layer_spacing: f32,
}

impl Default for RingLayout {
	fn default() -> Self {
		Self {
			radius: 1.5,
			hidden_boost: 0.5,
			hidden_layers: vec![1, 2],
			layer_spacing: 2.5,
		}
	}
}

impl RingLayout {
	/// Ring radius of `layer`.
	pub fn layer_radius(&self, layer: usize) -> f32 {
		if self.hidden_layers.contains(&layer) {
			self.radius + self.hidden_boost
		} else {
			self.radius
		}
	}

	/// Depth of `layer`: `(layer - layer_count / 2) * layer_spacing`.
	pub fn layer_depth(&self, layer: usize, layer_count: usize) -> f32 {
		(layer as f32 - layer_count as f32 / 2.0) * self.layer_spacing
	}

	/// World position of a single node.
	pub fn position(&self, node: &LayerNode, topology: &LayeredTopology) -> Vec3 {
		let count = topology.sizes().as_slice()[node.layer];
		let angle = node.slot as f32 * (TAU / count as f32);
		let radius = self.layer_radius(node.layer);
		Vec3::new(
			angle.cos() * radius,
			angle.sin() * radius,
			self.layer_depth(node.layer, topology.layer_count()),
		)
	}

	/// World positions for every node, indexed like [`LayeredTopology::nodes`].
	pub fn place(&self, topology: &LayeredTopology) -> Vec<Vec3> {
		topology
			.nodes()
			.iter()
			.map(|node| self.position(node, topology))
			.collect()
	}
}

/// Resolve a normalized point against a viewport. Unmeasured sides give zero.
pub fn to_pixels(x: f64, y: f64, viewport: Viewport) -> DVec2 {
	DVec2::new(x * viewport.width, y * viewport.height)
}

/// Pixel positions of a [`PlaneGraph`] for one viewport.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaneLayout {
	viewport: Viewport,
	pixels: Vec<DVec2>,
}

impl PlaneLayout {
	/// Lay out `graph` for `viewport`.
	pub fn new(graph: &PlaneGraph, viewport: Viewport) -> Self {
		let mut layout = Self::default();
		layout.relayout(graph, viewport);
		layout
	}

	/// Recompute every pixel position for a new viewport. The topology is
	/// untouched.
	pub fn relayout(&mut self, graph: &PlaneGraph, viewport: Viewport) {
		self.viewport = viewport;
		self.pixels.clear();
		self.pixels.extend(
			graph
				.nodes()
				.iter()
				.map(|node| to_pixels(node.x, node.y, viewport)),
		);
	}

	/// Viewport the positions were computed for.
	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	/// Pixel position of node `index`.
	pub fn position(&self, index: usize) -> Option<DVec2> {
		self.pixels.get(index).copied()
	}

	/// All pixel positions.
	pub fn positions(&self) -> &[DVec2] {
		&self.pixels
	}

	/// Endpoints of an edge given as node indices.
	pub fn endpoints(&self, (source, target): (usize, usize)) -> Option<(DVec2, DVec2)> {
		Some((self.position(source)?, self.position(target)?))
	}

	/// Nearest node within `radius` pixels of `point`.
	pub fn node_at(&self, point: DVec2, radius: f64) -> Option<usize> {
		self.pixels
			.iter()
			.enumerate()
			.map(|(i, p)| (i, p.distance(point)))
			.filter(|&(_, d)| d <= radius)
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(i, _)| i)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::network::plane::{PlaneEdge, PlaneNode};
	use crate::network::topology::LayerSizes;

	fn close(a: Vec3, b: Vec3) -> bool {
		(a - b).length() < 1e-5
	}

	#[test]
	fn rings_per_layer() {
		let topo = LayeredTopology::generate(&LayerSizes::default()).unwrap();
		let layout = RingLayout::default();
		let positions = layout.place(&topo);
		assert_eq!(positions.len(), 44);

		// first node of layer 0 sits on the +x axis at depth (0 - 2.5) * 2.5
		assert!(close(positions[0], Vec3::new(1.5, 0.0, -6.25)));
		// layer 1 is hidden: wider ring
		let first_hidden = topo.layer(1)[0].index;
		assert!(close(positions[first_hidden], Vec3::new(2.0, 0.0, -3.75)));
		// quarter turn in a 4-node layer
		let last = topo.layer(4)[1].index;
		assert!(close(positions[last], Vec3::new(0.0, 1.5, 3.75)));
	}

	#[test]
	fn no_two_nodes_in_a_layer_coincide() {
		let topo = LayeredTopology::generate(&LayerSizes::default()).unwrap();
		let positions = RingLayout::default().place(&topo);
		for layer in 0..topo.layer_count() {
			let nodes = topo.layer(layer);
			for (i, a) in nodes.iter().enumerate() {
				for b in &nodes[i + 1..] {
					assert!(positions[a.index].distance(positions[b.index]) > 0.1);
				}
			}
		}
	}

	fn stack() -> PlaneGraph {
		PlaneGraph::new(
			vec![
				PlaneNode::new("genai", "GenAI", "#10b981", 0.5, 0.15),
				PlaneNode::new("python", "Python", "#38bdf8", 0.5, 0.5),
			],
			&[PlaneEdge::new("python", "genai")],
		)
		.unwrap()
	}

	#[test]
	fn pixels_follow_viewport() {
		let graph = stack();
		let mut layout = PlaneLayout::new(&graph, Viewport::new(800.0, 400.0));
		assert_eq!(layout.position(0), Some(DVec2::new(400.0, 60.0)));
		layout.relayout(&graph, Viewport::new(600.0, 300.0));
		assert_eq!(layout.position(0), Some(DVec2::new(300.0, 45.0)));
		assert_eq!(
			layout.endpoints(graph.edges()[0]),
			Some((DVec2::new(300.0, 150.0), DVec2::new(300.0, 45.0)))
		);
	}

	#[test]
	fn unmeasured_collapses_to_origin() {
		let layout = PlaneLayout::new(&stack(), Viewport::default());
		assert!(layout.positions().iter().all(|p| *p == DVec2::ZERO));
	}

	#[test]
	fn hit_test_picks_nearest() {
		let layout = PlaneLayout::new(&stack(), Viewport::new(800.0, 400.0));
		assert_eq!(layout.node_at(DVec2::new(405.0, 62.0), 20.0), Some(0));
		assert_eq!(layout.node_at(DVec2::new(400.0, 195.0), 20.0), Some(1));
		assert_eq!(layout.node_at(DVec2::new(10.0, 10.0), 20.0), None);
	}
}
