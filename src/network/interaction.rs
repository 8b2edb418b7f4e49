//! Single-node highlight state and the effects it drives.

use std::f64::consts::TAU;

use super::animation::{Breath, cycle, ease_in_out_sine, ease_out_cubic, keyframes, swell, turns};

/// Number of sparks in the radial burst around the active node.
pub const BURST_SPARKS: usize = 8;

/// Which node, if any, the pointer is resting on.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Highlight {
	/// Nothing highlighted.
	#[default]
	Idle,
	/// Exactly one node highlighted since scene time `since`.
	Active {
		/// Highlighted node.
		node: usize,
		/// Scene time the highlight began.
		since: f64,
	},
}

impl Highlight {
	/// Pointer entered `node`. Replaces any other active node. Returns true
	/// when the state changed.
	pub fn pointer_enter(&mut self, node: usize, now: f64) -> bool {
		if self.active() == Some(node) {
			return false;
		}
		*self = Highlight::Active { node, since: now };
		true
	}

	/// Pointer left `node`. Only the active node can return the state to
	/// idle; leaving any other node is ignored.
	pub fn pointer_leave(&mut self, node: usize) -> bool {
		if self.active() != Some(node) {
			return false;
		}
		*self = Highlight::Idle;
		true
	}

	/// Turn a hit test under the moving pointer into enter/leave transitions.
	/// A hit enters that node; a miss leaves whichever node is active.
	pub fn track(&mut self, hovered: Option<usize>, now: f64) -> bool {
		match (hovered, self.active()) {
			(Some(node), _) => self.pointer_enter(node, now),
			(None, Some(active)) => self.pointer_leave(active),
			(None, None) => false,
		}
	}

	/// Drop any highlight, e.g. when the pointer leaves the whole surface.
	pub fn reset(&mut self) -> bool {
		let was_active = self.active().is_some();
		*self = Highlight::Idle;
		was_active
	}

	/// The highlighted node.
	pub fn active(&self) -> Option<usize> {
		match *self {
			Highlight::Idle => None,
			Highlight::Active { node, .. } => Some(node),
		}
	}

	/// True when `node` is the highlighted one.
	pub fn is_active(&self, node: usize) -> bool {
		self.active() == Some(node)
	}

	/// Stroke style for an edge between `source` and `target`.
	pub fn edge_style(&self, source: usize, target: usize) -> EdgeStyle {
		if self.is_active(source) || self.is_active(target) {
			EdgeStyle::ACTIVE
		} else {
			EdgeStyle::IDLE
		}
	}

	/// Effects on `node` at scene time `now`, or `None` if it is not active.
	pub fn effects(&self, node: usize, now: f64) -> Option<ActiveEffects> {
		match *self {
			Highlight::Active {
				node: active,
				since,
			} if active == node => {
				Some(ActiveEffects::at((now - since).max(0.0)))
			}
			_ => None,
		}
	}
}

/// Stroke parameters for an edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStyle {
	/// Line width in pixels.
	pub width: f64,
	/// Stroke opacity.
	pub opacity: f64,
	/// Shadow blur in pixels.
	pub glow: f64,
}

impl EdgeStyle {
	/// Edge not touching the active node.
	pub const IDLE: EdgeStyle = EdgeStyle {
		width: 1.8,
		opacity: 0.5,
		glow: 6.0,
	};

	/// Edge touching the active node.
	pub const ACTIVE: EdgeStyle = EdgeStyle {
		width: 3.0,
		opacity: 1.0,
		glow: 10.0,
	};

	/// Share of the stroke opacity left at the target end of an edge.
	pub const TAIL: f64 = 0.3;

	/// `(offset, opacity)` gradient stops in the source node's colour, fading
	/// from full stroke opacity at the source to [`EdgeStyle::TAIL`] of it.
	pub fn fade_stops(&self) -> [(f64, f64); 2] {
		[(0.0, self.opacity), (1.0, self.opacity * Self::TAIL)]
	}
}

/// One spark of the radial burst.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spark {
	/// Direction in radians.
	pub angle: f64,
	/// Distance from the node centre, in node radii.
	pub distance: f64,
	/// Opacity.
	pub opacity: f64,
}

/// Everything drawn around the active node for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveEffects {
	/// Body rotation in radians, swinging `0, 5, -5, 0` degrees.
	pub wobble: f64,
	/// Body scale, `1 -> 1.05 -> 1`.
	pub body_scale: f64,
	/// Pulsing ring scale, `1 -> 1.3 -> 1`.
	pub ring_scale: f64,
	/// Pulsing ring opacity, `0.3 -> 0.5 -> 0.3`.
	pub ring_opacity: f64,
	/// Rotation of the dashed halo in radians.
	pub halo_angle: f64,
	/// Radial burst.
	pub sparks: [Spark; BURST_SPARKS],
}

impl ActiveEffects {
	/// Loop length of the body and ring pulses.
	pub const PULSE_PERIOD: f64 = 2.0;
	/// Loop length of the burst.
	pub const BURST_PERIOD: f64 = 1.2;
	/// Halo revolutions per second.
	pub const HALO_SPEED: f64 = 0.25;

	/// Effects `local` seconds after the node became active.
	pub fn at(local: f64) -> Self {
		let phase = cycle(local, Self::PULSE_PERIOD, 0.0);
		let wobble = keyframes(
			&[0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0],
			&[0.0, 5.0, -5.0, 0.0],
			phase,
			ease_in_out_sine,
		)
		.to_radians();
		let ring_opacity = Breath {
			period: Self::PULSE_PERIOD,
			from: 0.3,
			to: 0.5,
		};

		let burst = cycle(local, Self::BURST_PERIOD, 0.0);
		let sparks = std::array::from_fn(|i| Spark {
			angle: i as f64 * TAU / BURST_SPARKS as f64,
			distance: 1.0 + 1.5 * ease_out_cubic(burst),
			opacity: 1.0 - burst,
		});

		Self {
			wobble,
			body_scale: 1.0 + 0.05 * swell(phase),
			ring_scale: 1.0 + 0.3 * swell(phase),
			ring_opacity: ring_opacity.at(local),
			halo_angle: turns(local, Self::HALO_SPEED),
			sparks,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn enter_and_leave() {
		let mut h = Highlight::default();
		assert!(h.pointer_enter(3, 1.0));
		assert_eq!(h.active(), Some(3));
		assert!(!h.pointer_enter(3, 2.0));
		// re-entering keeps the first start time
		assert_eq!(h, Highlight::Active {
			node: 3,
			since: 1.0,
		});
		assert!(h.pointer_leave(3));
		assert_eq!(h, Highlight::Idle);
	}

	#[test]
	fn entering_another_node_switches_directly() {
		let mut h = Highlight::Idle;
		h.pointer_enter(1, 0.0);
		h.pointer_enter(2, 0.5);
		assert_eq!(h.active(), Some(2));
		assert!(!h.is_active(1));
	}

	#[test]
	fn leaving_a_non_active_node_is_ignored() {
		let mut h = Highlight::Idle;
		h.pointer_enter(1, 0.0);
		h.pointer_enter(2, 0.1);
		assert!(!h.pointer_leave(1));
		assert_eq!(h.active(), Some(2));
		let mut idle = Highlight::Idle;
		assert!(!idle.pointer_leave(0));
	}

	#[test]
	fn tracking_hit_tests() {
		let mut h = Highlight::Idle;
		assert!(!h.track(None, 0.0));
		assert!(h.track(Some(5), 0.0));
		assert!(!h.track(Some(5), 0.1));
		assert!(h.track(Some(6), 0.2));
		assert_eq!(h, Highlight::Active {
			node: 6,
			since: 0.2,
		});
		assert!(h.track(None, 0.3));
		assert_eq!(h, Highlight::Idle);
	}

	#[test]
	fn reset_goes_idle() {
		let mut h = Highlight::Active {
			node: 4,
			since: 0.0,
		};
		assert!(h.reset());
		assert!(!h.reset());
	}

	#[test]
	fn edges_touching_active_node_are_emphasised() {
		let mut h = Highlight::Idle;
		assert_eq!(h.edge_style(0, 1), EdgeStyle::IDLE);
		h.pointer_enter(1, 0.0);
		assert_eq!(h.edge_style(0, 1), EdgeStyle::ACTIVE);
		assert_eq!(h.edge_style(1, 5), EdgeStyle::ACTIVE);
		assert_eq!(h.edge_style(0, 2), EdgeStyle::IDLE);
	}

	#[test]
	fn edges_fade_towards_the_target() {
		assert_eq!(EdgeStyle::ACTIVE.fade_stops(), [(0.0, 1.0), (1.0, 0.3)]);
		let [(_, head), (_, tail)] = EdgeStyle::IDLE.fade_stops();
		assert_eq!(head, 0.5);
		assert!((tail - 0.15).abs() < 1e-12);
	}

	#[test]
	fn effects_only_for_active_node() {
		let h = Highlight::Active {
			node: 2,
			since: 10.0,
		};
		assert!(h.effects(1, 11.0).is_none());
		let fx = h.effects(2, 10.0).unwrap();
		assert_eq!(fx.wobble, 0.0);
		assert_eq!(fx.body_scale, 1.0);
		assert!((fx.ring_opacity - 0.3).abs() < 1e-9);
		assert!(fx.sparks.iter().all(|s| s.distance == 1.0 && s.opacity == 1.0));
	}

	#[test]
	fn effects_depend_only_on_time_since_activation() {
		let a = Highlight::Active {
			node: 0,
			since: 0.0,
		}
		.effects(0, 0.75);
		let b = Highlight::Active {
			node: 0,
			since: 5.0,
		}
		.effects(0, 5.75);
		assert_eq!(a, b);
		let mid = ActiveEffects::at(1.0);
		assert!((mid.ring_scale - 1.3).abs() < 1e-9);
		assert!((mid.halo_angle - TAU * 0.25).abs() < 1e-9);
	}
}
