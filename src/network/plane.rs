//! Named nodes with designer-authored normalized coordinates.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// A node of the flat graph, positioned on the unit square.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaneNode {
	/// Stable id referenced by edges.
	pub id: String,
	/// Display label.
	pub label: String,
	/// Accent colour as a CSS hex string.
	pub color: String,
	/// Normalized x in `[0, 1]`.
	pub x: f64,
	/// Normalized y in `[0, 1]`.
	pub y: f64,
}

impl PlaneNode {
	/// A node from normalized coordinates.
	pub fn new(id: &str, label: &str, color: &str, x: f64, y: f64) -> Self {
		Self {
			id: id.into(),
			label: label.into(),
			color: color.into(),
			x,
			y,
		}
	}

	/// A node from percentage coordinates in `[0, 100]`.
	pub fn percent(id: &str, label: &str, color: &str, x: f64, y: f64) -> Self {
		Self::new(id, label, color, x / 100.0, y / 100.0)
	}
}

/// An edge between two named nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaneEdge {
	/// Source id.
	pub source: String,
	/// Target id.
	pub target: String,
}

impl PlaneEdge {
	/// Edge from `source` to `target`.
	pub fn new(source: &str, target: &str) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
		}
	}
}

/// A validated flat graph. Edges are resolved to node indices up front.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaneGraph {
	nodes: Vec<PlaneNode>,
	edges: Vec<(usize, usize)>,
	index: HashMap<String, usize>,
}

impl PlaneGraph {
	/// Validate ids, coordinates and edge references.
	pub fn new(nodes: Vec<PlaneNode>, edges: &[PlaneEdge]) -> Result<Self> {
		let mut index = HashMap::with_capacity(nodes.len());
		for (i, node) in nodes.iter().enumerate() {
			let in_range = |v: f64| (0.0..=1.0).contains(&v);
			if !in_range(node.x) || !in_range(node.y) {
				return Err(Error::CoordinateOutOfRange {
					id: node.id.clone(),
					x: node.x,
					y: node.y,
				});
			}
			if index.insert(node.id.clone(), i).is_some() {
				return Err(Error::DuplicateNode(node.id.clone()));
			}
		}

		let resolved = edges
			.iter()
			.map(|edge| {
				let lookup = |id: &str| {
					index.get(id).copied().ok_or_else(|| Error::UnknownNode {
						from: edge.source.clone(),
						to: edge.target.clone(),
						missing: id.to_string(),
					})
				};
				Ok((lookup(&edge.source)?, lookup(&edge.target)?))
			})
			.collect::<Result<Vec<_>>>()?;

		Ok(Self {
			nodes,
			edges: resolved,
			index,
		})
	}

	/// Nodes in declaration order.
	pub fn nodes(&self) -> &[PlaneNode] {
		&self.nodes
	}

	/// Edges as `(source, target)` node indices.
	pub fn edges(&self) -> &[(usize, usize)] {
		&self.edges
	}

	/// Index of the node with the given id.
	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	/// Indices of nodes sharing an edge with `node`.
	pub fn neighbors(&self, node: usize) -> Vec<usize> {
		self.edges
			.iter()
			.filter_map(|&(s, t)| match (s == node, t == node) {
				(true, _) => Some(t),
				(_, true) => Some(s),
				_ => None,
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn abc() -> Vec<PlaneNode> {
		vec![
			PlaneNode::new("a", "A", "#fff", 0.1, 0.1),
			PlaneNode::new("b", "B", "#fff", 0.5, 0.5),
			PlaneNode::new("c", "C", "#fff", 0.9, 0.9),
		]
	}

	#[test]
	fn resolves_edges() {
		let graph = PlaneGraph::new(
			abc(),
			&[PlaneEdge::new("a", "b"), PlaneEdge::new("b", "c")],
		)
		.unwrap();
		assert_eq!(graph.edges(), &[(0, 1), (1, 2)]);
		assert_eq!(graph.index_of("c"), Some(2));
		assert_eq!(graph.neighbors(1), vec![0, 2]);
	}

	#[test]
	fn unknown_node_rejected_at_construction() {
		let err = PlaneGraph::new(
			abc(),
			&[PlaneEdge::new("a", "b"), PlaneEdge::new("c", "d")],
		)
		.unwrap_err();
		assert_eq!(
			err,
			Error::UnknownNode {
				from: "c".into(),
				to: "d".into(),
				missing: "d".into(),
			}
		);
	}

	#[test]
	fn duplicate_ids_rejected() {
		let mut nodes = abc();
		nodes.push(PlaneNode::new("a", "again", "#000", 0.2, 0.2));
		assert_eq!(
			PlaneGraph::new(nodes, &[]),
			Err(Error::DuplicateNode("a".into()))
		);
	}

	#[test]
	fn coordinates_must_be_normalized() {
		let nodes = vec![PlaneNode::new("x", "X", "#000", 20.0, 30.0)];
		assert!(matches!(
			PlaneGraph::new(nodes, &[]),
			Err(Error::CoordinateOutOfRange { .. })
		));
		let nodes = vec![PlaneNode::percent("x", "X", "#000", 20.0, 30.0)];
		let graph = PlaneGraph::new(nodes, &[]).unwrap();
		assert!((graph.nodes()[0].x - 0.2).abs() < 1e-12);
	}
}
