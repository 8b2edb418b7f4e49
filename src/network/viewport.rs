//! Measured container dimensions and the responsive sizing rules applied to
//! them.

/// Width/height pair in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
	/// Width in pixels.
	pub width: f64,
	/// Height in pixels.
	pub height: f64,
}

impl Viewport {
	/// Build a viewport. Negative or non-finite sides collapse to zero.
	pub fn new(width: f64, height: f64) -> Self {
		let clean = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
		Self {
			width: clean(width),
			height: clean(height),
		}
	}

	/// True once both sides are non-zero.
	pub fn is_measured(&self) -> bool {
		self.width > 0.0 && self.height > 0.0
	}

	/// Width over height, or 1 before measurement.
	pub fn aspect(&self) -> f64 {
		if self.is_measured() {
			self.width / self.height
		} else {
			1.0
		}
	}
}

/// Clamp rule: `width = min(available * fill, max_width)`,
/// `height = min(width * aspect, max_height)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitRule {
	/// Share of the available width to use.
	pub fill: f64,
	/// Upper bound on width.
	pub max_width: f64,
	/// Height as a fraction of width.
	pub aspect: f64,
	/// Upper bound on height.
	pub max_height: f64,
}

impl Default for FitRule {
	fn default() -> Self {
		Self {
			fill: 0.9,
			max_width: 800.0,
			aspect: 0.5,
			max_height: 400.0,
		}
	}
}

impl FitRule {
	/// Derived size for the given available width.
	pub fn fit(&self, available_width: f64) -> Viewport {
		let width = (available_width * self.fill).min(self.max_width);
		let height = (width * self.aspect).min(self.max_height);
		Viewport::new(width, height)
	}
}

/// How a measured box becomes the drawing viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Sizing {
	/// Use the measured box as is.
	#[default]
	Container,
	/// Derive from the available width with a [`FitRule`].
	Fit(FitRule),
}

impl Sizing {
	/// Apply the rule to a measurement.
	pub fn derive(&self, measured: Viewport) -> Viewport {
		match self {
			Sizing::Container => measured,
			Sizing::Fit(rule) => rule.fit(measured.width),
		}
	}
}

/// Single writer of the current viewport. The latest observation wins.
#[derive(Clone, Debug, Default)]
pub struct ViewportAdapter {
	sizing: Sizing,
	current: Viewport,
	revision: u64,
}

impl ViewportAdapter {
	/// An unmeasured adapter.
	pub fn new(sizing: Sizing) -> Self {
		Self {
			sizing,
			current: Viewport::default(),
			revision: 0,
		}
	}

	/// Feed a measurement. Returns true when the derived viewport changed.
	pub fn observe(&mut self, measured: Viewport) -> bool {
		let next = self.sizing.derive(measured);
		if next == self.current {
			return false;
		}
		self.current = next;
		self.revision += 1;
		true
	}

	/// Current derived viewport; zero-sized until the first measurement.
	pub fn viewport(&self) -> Viewport {
		self.current
	}

	/// Bumped on every change, so consumers can tell a stale layout.
	pub fn revision(&self) -> u64 {
		self.revision
	}

	/// The sizing rule in use.
	pub fn sizing(&self) -> Sizing {
		self.sizing
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	#[test]
	fn fit_rule_clamps() {
		let rule = FitRule::default();
		assert_eq!(rule.fit(1920.0), Viewport::new(800.0, 400.0));
		assert_eq!(rule.fit(500.0), Viewport::new(450.0, 225.0));
		assert_eq!(rule.fit(0.0), Viewport::default());
	}

	#[test]
	fn unmeasured_defaults_to_zero() {
		let adapter = ViewportAdapter::new(Sizing::Container);
		assert!(!adapter.viewport().is_measured());
		assert_eq!(adapter.viewport().aspect(), 1.0);
		assert_eq!(Viewport::new(-3.0, f64::NAN), Viewport::default());
	}

	#[test]
	fn repeated_measurement_is_not_a_change() {
		let mut adapter = ViewportAdapter::new(Sizing::Container);
		assert!(adapter.observe(Viewport::new(800.0, 400.0)));
		assert!(!adapter.observe(Viewport::new(800.0, 400.0)));
		assert_eq!(adapter.revision(), 1);
	}

	#[test]
	fn fit_sizing_uses_width_only() {
		let mut adapter = ViewportAdapter::new(Sizing::Fit(FitRule::default()));
		adapter.observe(Viewport::new(600.0, 10.0));
		assert_eq!(adapter.viewport(), Viewport::new(540.0, 270.0));
	}

	proptest! {
		#[test]
		fn last_measurement_wins(
			sizes in prop::collection::vec((1.0f64..4000.0, 1.0f64..4000.0), 1..20),
		) {
			let mut adapter = ViewportAdapter::new(Sizing::Container);
			for &(w, h) in &sizes {
				adapter.observe(Viewport::new(w, h));
			}
			let &(w, h) = sizes.last().unwrap();
			prop_assert_eq!(adapter.viewport(), Viewport::new(w, h));
		}

		#[test]
		fn fit_never_exceeds_bounds(avail in 0.0f64..10_000.0) {
			let rule = FitRule::default();
			let v = rule.fit(avail);
			prop_assert!(v.width <= rule.max_width);
			prop_assert!(v.height <= rule.max_height);
			prop_assert!(v.width <= avail * rule.fill + 1e-9);
		}
	}
}
