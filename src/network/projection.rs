//! Orbit camera and world-to-canvas projection for the layered variant.

use std::f64::consts::TAU;

use glam::{Mat4, Vec3};

use super::viewport::Viewport;

/// Camera circling the origin in the horizontal plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
	/// Distance from the origin.
	pub distance: f32,
	/// Vertical field of view in radians.
	pub fov_y: f32,
	/// Auto-orbit speed; one unit is a full turn per 60 seconds.
	pub orbit_speed: f32,
	/// Near clip distance.
	pub near: f32,
	/// Far clip distance.
	pub far: f32,
}

impl Default for OrbitCamera {
	fn default() -> Self {
		Self {
			distance: 12.0,
			fov_y: 60f32.to_radians(),
			orbit_speed: 0.5,
			near: 0.1,
			far: 100.0,
		}
	}
}

impl OrbitCamera {
	/// Azimuth after `t` seconds of auto-orbit, wrapped to `[0, TAU)`.
	pub fn azimuth(&self, t: f64) -> f32 {
		let rate = TAU / 60.0 * f64::from(self.orbit_speed);
		(t * rate).rem_euclid(TAU) as f32
	}

	/// Eye position after `t` seconds.
	pub fn eye(&self, t: f64) -> Vec3 {
		let a = self.azimuth(t);
		Vec3::new(a.sin() * self.distance, 0.0, a.cos() * self.distance)
	}
}

/// A projected point in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
	/// Canvas x.
	pub x: f64,
	/// Canvas y, growing downwards.
	pub y: f64,
	/// Pixels per world unit at this depth.
	pub scale: f64,
}

/// Precomputed camera and model transform for one frame.
#[derive(Clone, Copy, Debug)]
pub struct Projector {
	clip: Mat4,
	viewport: Viewport,
	focal: f64,
	near: f32,
}

impl Projector {
	/// Build the frame transform: `model` first, then the orbiting camera.
	pub fn new(camera: &OrbitCamera, t: f64, model: Mat4, viewport: Viewport) -> Self {
		let view = Mat4::look_at_rh(camera.eye(t), Vec3::ZERO, Vec3::Y);
		let projection = Mat4::perspective_rh(
			camera.fov_y,
			viewport.aspect() as f32,
			camera.near,
			camera.far,
		);
		let focal = viewport.height * 0.5 / (camera.fov_y as f64 * 0.5).tan();
		Self {
			clip: projection * view * model,
			viewport,
			focal,
			near: camera.near,
		}
	}

	/// Project a world point, or `None` when it is behind the near plane.
	pub fn project(&self, point: Vec3) -> Option<ScreenPoint> {
		let clip = self.clip * point.extend(1.0);
		if clip.w <= self.near {
			return None;
		}
		let ndc = clip.truncate() / clip.w;
		Some(ScreenPoint {
			x: (ndc.x as f64 + 1.0) * 0.5 * self.viewport.width,
			y: (1.0 - ndc.y as f64) * 0.5 * self.viewport.height,
			scale: self.focal / clip.w as f64,
		})
	}
}
