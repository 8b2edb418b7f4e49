//! Error types for graph construction and host subscriptions.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Result type for graph and viewport operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a topology or attaching to the host page.
///
/// Everything except [`Error::Host`] is a configuration error and is raised
/// by constructors, never while a frame is being produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
	/// The layer-size sequence has no entries.
	#[error("layer sequence is empty")]
	EmptyLayers,

	/// A layer was configured with zero or negative nodes.
	#[error("layer {layer} has invalid size {size}")]
	InvalidLayerSize {
		/// Position of the offending layer.
		layer: usize,
		/// The configured size.
		size: i64,
	},

	/// A layer is larger than the per-layer node limit.
	#[error(
		"layer {layer} has {size} nodes, more than the limit of {max}",
		max = crate::network::topology::MAX_LAYER_SIZE
	)]
	LayerTooLarge {
		/// Position of the offending layer.
		layer: usize,
		/// The configured size.
		size: i64,
	},

	/// A fan-out of zero would leave every layer disconnected.
	#[error("fan-out must be at least 1")]
	InvalidFanOut,

	/// A textual layer list could not be parsed.
	#[error("malformed layer list: {0}")]
	MalformedLayers(String),

	/// Two named nodes share an id.
	#[error("duplicate node id: {0}")]
	DuplicateNode(String),

	/// An edge references a node id that was never declared.
	#[error("edge {from} -> {to} references unknown node {missing}")]
	UnknownNode {
		/// Edge source id.
		from: String,
		/// Edge target id.
		to: String,
		/// The id that could not be resolved.
		missing: String,
	},

	/// A normalized coordinate lies outside the unit square.
	#[error("node {id} has coordinate ({x}, {y}) outside [0, 1]")]
	CoordinateOutOfRange {
		/// Node id.
		id: String,
		/// Normalized x.
		x: f64,
		/// Normalized y.
		y: f64,
	},

	/// A generated link points outside the node set.
	#[error("link {from} -> {to} is outside the node set")]
	DanglingLink {
		/// Source node index.
		from: usize,
		/// Target node index.
		to: usize,
	},

	/// The browser refused a frame, timer, listener or observer registration.
	#[error("host error: {0}")]
	Host(String),
}

impl From<JsValue> for Error {
	fn from(value: JsValue) -> Self {
		Error::Host(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}
