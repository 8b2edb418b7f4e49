//! Layered topology generation.
//!
//! Nodes are laid out layer by layer and every node links forward into the
//! next layer using a modular stripe, so a given layer-size sequence always
//! yields the same node and link lists.

use std::fmt;
use std::str::FromStr;

use log::info;

use crate::error::{Error, Result};

/// Upper bound on links leaving a single node.
pub const MAX_FAN_OUT: usize = 3;

/// Upper bound on nodes in a single layer.
pub const MAX_LAYER_SIZE: usize = 1024;

/// A validated, non-empty sequence of strictly positive layer sizes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LayerSizes(Vec<usize>);

impl LayerSizes {
	/// Validate a raw size sequence.
	pub fn new<I>(sizes: I) -> Result<Self>
	where
		I: IntoIterator<Item = i64>,
	{
		let mut out = Vec::new();
		for (layer, size) in sizes.into_iter().enumerate() {
			if size <= 0 {
				return Err(Error::InvalidLayerSize { layer, size });
			}
			let count = usize::try_from(size)
				.ok()
				.filter(|&count| count <= MAX_LAYER_SIZE)
				.ok_or(Error::LayerTooLarge { layer, size })?;
			out.push(count);
		}
		if out.is_empty() {
			return Err(Error::EmptyLayers);
		}
		Ok(Self(out))
	}

	/// Sizes in layer order.
	pub fn as_slice(&self) -> &[usize] {
		&self.0
	}

	/// Number of layers.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Always false; an empty sequence is rejected on construction.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Total node count across all layers.
	pub fn total(&self) -> usize {
		self.0.iter().sum()
	}
}

impl Default for LayerSizes {
	fn default() -> Self {
		Self(vec![8, 12, 12, 8, 4])
	}
}

impl FromStr for LayerSizes {
	type Err = Error;

	/// Parses a comma separated list such as `8,12,12,8,4`. Blank input is
	/// an empty sequence; a blank entry between commas is malformed.
	fn from_str(s: &str) -> Result<Self> {
		if s.trim().is_empty() {
			return Err(Error::EmptyLayers);
		}
		let sizes = s
			.split(',')
			.map(|part| {
				part.trim()
					.parse::<i64>()
					.map_err(|_| Error::MalformedLayers(s.to_string()))
			})
			.collect::<Result<Vec<_>>>()?;
		Self::new(sizes)
	}
}

impl fmt::Display for LayerSizes {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let parts: Vec<String> = self.0.iter().map(|n| n.to_string()).collect();
		write!(f, "{}", parts.join(","))
	}
}

/// A node placed in the layered topology.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerNode {
	/// Position in the flat node list.
	pub index: usize,
	/// Owning layer.
	pub layer: usize,
	/// Position within the owning layer.
	pub slot: usize,
}

/// A directed link from one layer into the next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Link {
	/// Source node index.
	pub source: usize,
	/// Target node index.
	pub target: usize,
}

impl Link {
	/// True when `node` is either endpoint.
	pub fn touches(&self, node: usize) -> bool {
		self.source == node || self.target == node
	}
}

/// Immutable layered node/link set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayeredTopology {
	sizes: LayerSizes,
	layer_starts: Vec<usize>,
	nodes: Vec<LayerNode>,
	links: Vec<Link>,
}

impl LayeredTopology {
	/// Build the topology with the default fan-out of [`MAX_FAN_OUT`].
	pub fn generate(sizes: &LayerSizes) -> Result<Self> {
		Self::with_fan_out(sizes, MAX_FAN_OUT)
	}

	/// Build the topology, linking each node to at most `fan_out` nodes of the
	/// following layer.
	///
	/// For source slot `j` in a layer of `n` nodes feeding a layer of `n'`
	/// nodes, the `m`-th target slot is `(j * n' / n + m) mod n'`.
	pub fn with_fan_out(sizes: &LayerSizes, fan_out: usize) -> Result<Self> {
		if fan_out == 0 {
			return Err(Error::InvalidFanOut);
		}

		let mut layer_starts = Vec::with_capacity(sizes.len());
		let mut nodes = Vec::with_capacity(sizes.total());
		for (layer, &count) in sizes.as_slice().iter().enumerate() {
			layer_starts.push(nodes.len());
			for slot in 0..count {
				nodes.push(LayerNode {
					index: nodes.len(),
					layer,
					slot,
				});
			}
		}

		let mut links = Vec::new();
		for (layer, pair) in sizes.as_slice().windows(2).enumerate() {
			let (count, next_count) = (pair[0], pair[1]);
			let (start, next_start) = (layer_starts[layer], layer_starts[layer + 1]);
			for slot in 0..count {
				let stripe = slot * next_count / count;
				for m in 0..fan_out.min(next_count) {
					links.push(Link {
						source: start + slot,
						target: next_start + (stripe + m) % next_count,
					});
				}
			}
		}

		let topology = Self {
			sizes: sizes.clone(),
			layer_starts,
			nodes,
			links,
		};
		topology.validate()?;
		info!(
			"Generated topology [{}]: {} nodes, {} links",
			topology.sizes,
			topology.nodes.len(),
			topology.links.len()
		);
		Ok(topology)
	}

	fn validate(&self) -> Result<()> {
		let count = self.nodes.len();
		match self
			.links
			.iter()
			.find(|l| l.source >= count || l.target >= count)
		{
			Some(l) => Err(Error::DanglingLink {
				from: l.source,
				to: l.target,
			}),
			None => Ok(()),
		}
	}

	/// The sizes this topology was generated from.
	pub fn sizes(&self) -> &LayerSizes {
		&self.sizes
	}

	/// Number of layers.
	pub fn layer_count(&self) -> usize {
		self.sizes.len()
	}

	/// All nodes, in ascending layer order.
	pub fn nodes(&self) -> &[LayerNode] {
		&self.nodes
	}

	/// All links.
	pub fn links(&self) -> &[Link] {
		&self.links
	}

	/// Nodes of a single layer, empty when the layer does not exist.
	pub fn layer(&self, layer: usize) -> &[LayerNode] {
		match (self.layer_starts.get(layer), self.sizes.as_slice().get(layer)) {
			(Some(&start), Some(&count)) => &self.nodes[start..start + count],
			_ => &[],
		}
	}

	/// Links leaving `node`.
	pub fn outgoing(&self, node: usize) -> impl Iterator<Item = &Link> {
		self.links.iter().filter(move |l| l.source == node)
	}
}
