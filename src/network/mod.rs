//! DOM-free core: topology, layout, viewport, animation and highlight state.
//!
//! The widgets under `components` feed this module host events and draw what
//! it returns; nothing here touches the browser.

pub mod animation;
pub mod events;
pub mod interaction;
pub mod layout;
pub mod plane;
pub mod projection;
pub mod topology;
pub mod viewport;

pub use animation::{EdgeFlow, FrameClock, ParticleField, SceneSpin, Stagger, Typewriter};
pub use events::{EventSource, ManualSource, Subscription};
pub use interaction::{ActiveEffects, EdgeStyle, Highlight};
pub use layout::{PlaneLayout, RingLayout};
pub use plane::{PlaneEdge, PlaneGraph, PlaneNode};
pub use projection::{OrbitCamera, Projector, ScreenPoint};
pub use topology::{LayerNode, LayerSizes, LayeredTopology, Link, MAX_FAN_OUT, MAX_LAYER_SIZE};
pub use viewport::{FitRule, Sizing, Viewport, ViewportAdapter};
