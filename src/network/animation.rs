//! Frame-time driven procedural motion.
//!
//! Everything here is a function of elapsed seconds. Nothing accumulates
//! deltas, so any frame can be recomputed from its timestamp alone and a
//! paused scene resumes exactly where it stopped.

use std::f64::consts::{PI, TAU};

use glam::{EulerRot, Mat4, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Converts host timestamps (milliseconds) into elapsed scene seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameClock {
	origin: Option<f64>,
	paused_at: Option<f64>,
	paused_ms: f64,
}

impl FrameClock {
	/// A clock that starts on its first reading.
	pub fn new() -> Self {
		Self::default()
	}

	/// Elapsed seconds at host time `now_ms`, excluding paused spans.
	pub fn elapsed(&mut self, now_ms: f64) -> f64 {
		let origin = *self.origin.get_or_insert(now_ms);
		let now = self.paused_at.unwrap_or(now_ms);
		((now - origin - self.paused_ms) / 1000.0).max(0.0)
	}

	/// Freeze the clock at `now_ms`.
	pub fn pause(&mut self, now_ms: f64) {
		if self.paused_at.is_none() {
			self.paused_at = Some(now_ms);
		}
	}

	/// Continue from where [`FrameClock::pause`] stopped.
	pub fn resume(&mut self, now_ms: f64) {
		if let Some(at) = self.paused_at.take() {
			self.paused_ms += (now_ms - at).max(0.0);
		}
	}

	/// True while paused.
	pub fn is_paused(&self) -> bool {
		self.paused_at.is_some()
	}
}

/// Identity easing.
pub fn linear(t: f64) -> f64 {
	t
}

/// Cubic ease-out.
pub fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

/// Sinusoidal ease-in-out.
pub fn ease_in_out_sine(t: f64) -> f64 {
	-((PI * t).cos() - 1.0) / 2.0
}

/// Ease-out with a small overshoot, a stand-in for a stiff spring.
pub fn ease_out_back(t: f64) -> f64 {
	const C1: f64 = 1.70158;
	const C3: f64 = C1 + 1.0;
	if t <= 0.0 {
		return 0.0;
	}
	if t >= 1.0 {
		return 1.0;
	}
	1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
}

/// Sample a keyframe track at progress `p` in `[0, 1]`. `times` must be
/// ascending and the same length as `values`; `ease` shapes each segment.
pub fn keyframes(times: &[f64], values: &[f64], p: f64, ease: fn(f64) -> f64) -> f64 {
	debug_assert_eq!(times.len(), values.len());
	let Some((&first, &last)) = values.first().zip(values.last()) else {
		return 0.0;
	};
	if p <= times[0] {
		return first;
	}
	for (i, pair) in times.windows(2).enumerate() {
		if p <= pair[1] {
			let span = pair[1] - pair[0];
			let local = if span > 0.0 { (p - pair[0]) / span } else { 1.0 };
			return values[i] + (values[i + 1] - values[i]) * ease(local);
		}
	}
	last
}

/// Cycle progress in `[0, 1)` for a loop of `period` seconds that starts after
/// `delay`. Zero before the loop starts.
pub fn cycle(t: f64, period: f64, delay: f64) -> f64 {
	if t <= delay || period <= 0.0 {
		return 0.0;
	}
	((t - delay) / period).fract()
}

/// `0 -> 1 -> 0` over one cycle, eased in and out on both halves.
pub fn swell(phase: f64) -> f64 {
	ease_in_out_sine(1.0 - (2.0 * phase - 1.0).abs())
}

/// Continuous scene rotation: `ry = t * yaw_rate`,
/// `rx = sin(t * tilt_rate) * tilt_amplitude`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneSpin {
	/// Radians per second about Y.
	pub yaw_rate: f64,
	/// Angular frequency of the tilt wobble.
	pub tilt_rate: f64,
	/// Peak tilt in radians.
	pub tilt_amplitude: f64,
}

impl Default for SceneSpin {
	fn default() -> Self {
		Self {
			yaw_rate: 0.2,
			tilt_rate: 0.1,
			tilt_amplitude: 0.1,
		}
	}
}

impl SceneSpin {
	/// `(rotation_x, rotation_y)` at time `t`. The yaw is wrapped to one turn
	/// so it keeps full precision once narrowed to `f32`.
	pub fn rotation(&self, t: f64) -> (f64, f64) {
		(
			(t * self.tilt_rate).sin() * self.tilt_amplitude,
			(t * self.yaw_rate).rem_euclid(TAU),
		)
	}

	/// Model matrix at time `t` (X then Y, applied as a single XYZ Euler).
	pub fn model(&self, t: f64) -> Mat4 {
		let (rx, ry) = self.rotation(t);
		Mat4::from_euler(EulerRot::XYZ, rx as f32, ry as f32, 0.0)
	}
}

/// A marker travelling along an edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
	/// Position along the edge, 0 at the source.
	pub progress: f64,
	/// Opacity.
	pub opacity: f64,
}

/// Flow markers: a loop of `base_period + index * period_step` seconds with
/// opacity keyed `0, 1, 1, 0` at `0, fade, 1 - fade, 1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeFlow {
	/// Period of the first edge.
	pub base_period: f64,
	/// Extra period per edge index.
	pub period_step: f64,
	/// Length of the fade at either end, as a share of the cycle.
	pub fade: f64,
}

impl Default for EdgeFlow {
	fn default() -> Self {
		Self {
			base_period: 3.0,
			period_step: 0.3,
			fade: 0.2,
		}
	}
}

impl EdgeFlow {
	/// Loop length for edge `index`.
	pub fn period(&self, index: usize) -> f64 {
		self.base_period + index as f64 * self.period_step
	}

	/// Marker state for edge `index` at time `t`.
	pub fn marker(&self, index: usize, t: f64) -> Marker {
		let progress = cycle(t, self.period(index), 0.0);
		let opacity = keyframes(
			&[0.0, self.fade, 1.0 - self.fade, 1.0],
			&[0.0, 1.0, 1.0, 0.0],
			progress,
			linear,
		);
		Marker { progress, opacity }
	}
}

/// One-shot staggered reveal: item `i` starts at `i * delay_step + offset` and
/// runs for `duration` seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stagger {
	/// Delay before the first item.
	pub offset: f64,
	/// Delay added per item.
	pub delay_step: f64,
	/// Length of each item's animation.
	pub duration: f64,
}

impl Stagger {
	/// Node entrance timing.
	pub const NODES: Stagger = Stagger {
		offset: 0.0,
		delay_step: 0.12,
		duration: 0.5,
	};

	/// Edge draw-in timing.
	pub const EDGES: Stagger = Stagger {
		offset: 0.0,
		delay_step: 0.05,
		duration: 1.5,
	};

	/// Raw progress of item `index`, clamped to `[0, 1]`.
	pub fn progress(&self, index: usize, t: f64) -> f64 {
		let start = self.offset + index as f64 * self.delay_step;
		if self.duration <= 0.0 {
			return if t >= start { 1.0 } else { 0.0 };
		}
		((t - start) / self.duration).clamp(0.0, 1.0)
	}

	/// `(scale, opacity)` of a popping-in item.
	pub fn reveal(&self, index: usize, t: f64) -> (f64, f64) {
		let p = self.progress(index, t);
		(ease_out_back(p), ease_out_cubic(p))
	}

	/// True once every one of `count` items has finished.
	pub fn finished(&self, count: usize, t: f64) -> bool {
		count == 0 || self.progress(count - 1, t) >= 1.0
	}
}

/// Looping swell between two values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Breath {
	/// Loop length in seconds.
	pub period: f64,
	/// Value at the start and end of each loop.
	pub from: f64,
	/// Value at the middle of each loop.
	pub to: f64,
}

impl Breath {
	/// Value at time `t`.
	pub fn at(&self, t: f64) -> f64 {
		self.from + (self.to - self.from) * swell(cycle(t, self.period, 0.0))
	}
}

/// Background glow blob whose scale and opacity swell together.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
	/// Scale of the blob.
	pub scale: Breath,
	/// Opacity of the blob.
	pub opacity: Breath,
}

impl Glow {
	/// Grows on an 8 second loop.
	pub const RISING: Glow = Glow {
		scale: Breath {
			period: 8.0,
			from: 1.0,
			to: 1.3,
		},
		opacity: Breath {
			period: 8.0,
			from: 0.2,
			to: 0.4,
		},
	};

	/// Shrinks on an 8 second loop, opposite to [`Glow::RISING`].
	pub const FALLING: Glow = Glow {
		scale: Breath {
			period: 8.0,
			from: 1.3,
			to: 1.0,
		},
		opacity: Breath {
			period: 8.0,
			from: 0.2,
			to: 0.4,
		},
	};

	/// Large, faint and slower, on a 10 second loop.
	pub const CENTRE: Glow = Glow {
		scale: Breath {
			period: 10.0,
			from: 1.0,
			to: 1.2,
		},
		opacity: Breath {
			period: 10.0,
			from: 0.15,
			to: 0.3,
		},
	};

	/// `(scale, opacity)` at time `t`.
	pub fn at(&self, t: f64) -> (f64, f64) {
		(self.scale.at(t), self.opacity.at(t))
	}
}

/// Colours particles are drawn in.
pub const PARTICLE_PALETTE: [&str; 5] = [
	"#06b6d4", "#0ea5e9", "#38bdf8", "#3b82f6", "#60a5fa",
];

/// A decorative drifting particle. Coordinates are percentages of the viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Particle number; also sets the horizontal sway.
	pub id: usize,
	/// Anchor x in percent.
	pub x: f64,
	/// Anchor y in percent.
	pub y: f64,
	/// Diameter in pixels.
	pub size: f64,
	/// Loop length in seconds.
	pub duration: f64,
	/// Start delay in seconds.
	pub delay: f64,
	/// Fill colour.
	pub color: &'static str,
}

/// Offset and opacity of a particle at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drift {
	/// Horizontal offset in pixels.
	pub dx: f64,
	/// Vertical offset in pixels.
	pub dy: f64,
	/// Opacity.
	pub opacity: f64,
}

/// Independently seeded particles drifting on looping paths.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleField {
	particles: Vec<Particle>,
}

impl ParticleField {
	/// Rise height of each loop, in pixels.
	pub const RISE: f64 = 100.0;
	/// Peak horizontal sway, in pixels.
	pub const SWAY: f64 = 50.0;

	/// `count` particles drawn from a generator seeded with `seed`.
	pub fn seeded(count: usize, seed: u64) -> Self {
		let mut rng = StdRng::seed_from_u64(seed);
		let particles = (0..count)
			.map(|id| Particle {
				id,
				x: rng.gen_range(0.0..100.0),
				y: rng.gen_range(0.0..100.0),
				size: rng.gen_range(1.0..4.0),
				duration: rng.gen_range(10.0..20.0),
				delay: rng.gen_range(0.0..5.0),
				color: PARTICLE_PALETTE[rng.gen_range(0..PARTICLE_PALETTE.len())],
			})
			.collect();
		Self { particles }
	}

	/// All particles.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Where `particle` is at time `t`.
	pub fn drift(particle: &Particle, t: f64) -> Drift {
		let s = swell(cycle(t, particle.duration, particle.delay));
		Drift {
			dx: (particle.id as f64).sin() * Self::SWAY * s,
			dy: -Self::RISE * s,
			opacity: 0.2 + 0.6 * s,
		}
	}
}

/// Static point cloud around the 3D network, spun slowly about Y.
#[derive(Clone, Debug, PartialEq)]
pub struct DustCloud {
	points: Vec<Vec3>,
	/// Radians per second about Y.
	pub spin_rate: f64,
}

impl DustCloud {
	/// `count` points uniform in a cube of side `extent` centred on the origin.
	pub fn seeded(count: usize, extent: f32, seed: u64) -> Self {
		let mut rng = StdRng::seed_from_u64(seed);
		let half = extent / 2.0;
		let points = (0..count)
			.map(|_| {
				Vec3::new(
					rng.gen_range(-half..half),
					rng.gen_range(-half..half),
					rng.gen_range(-half..half),
				)
			})
			.collect();
		Self {
			points,
			spin_rate: 0.05,
		}
	}

	/// Points in the cloud's own frame.
	pub fn points(&self) -> &[Vec3] {
		&self.points
	}

	/// Model matrix at time `t`.
	pub fn model(&self, t: f64) -> Mat4 {
		Mat4::from_rotation_y((t * self.spin_rate).rem_euclid(TAU) as f32)
	}
}

/// Headline that types itself one character per interval.
#[derive(Clone, Debug, PartialEq)]
pub struct Typewriter {
	text: String,
	/// Seconds per character.
	pub char_interval: f64,
	/// Seconds per cursor blink phase.
	pub blink_interval: f64,
}

impl Typewriter {
	/// Type `text` at ten characters a second with a half-second blink.
	pub fn new(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			char_interval: 0.1,
			blink_interval: 0.5,
		}
	}

	/// Visible prefix at time `t`.
	pub fn visible(&self, t: f64) -> &str {
		let count = steps(t, self.char_interval) as usize;
		match self.text.char_indices().nth(count) {
			Some((end, _)) => &self.text[..end],
			None => &self.text,
		}
	}

	/// True once the whole text is showing.
	pub fn is_complete(&self, t: f64) -> bool {
		self.visible(t).len() == self.text.len()
	}

	/// Cursor blink state at time `t`.
	pub fn cursor_visible(&self, t: f64) -> bool {
		steps(t, self.blink_interval) % 2 == 0
	}
}

/// Whole `interval`s elapsed by `t`. Tolerates the rounding in quotients such
/// as `0.3 / 0.1`, so a tick landing exactly on a boundary counts.
fn steps(t: f64, interval: f64) -> u64 {
	const SLACK: f64 = 1e-9;
	(t.max(0.0) / interval + SLACK).floor() as u64
}

/// Angle after `t` seconds turning at `per_second` revolutions, wrapped to
/// one revolution.
pub fn turns(t: f64, per_second: f64) -> f64 {
	(t * per_second * TAU) % TAU
}
