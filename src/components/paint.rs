use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::network::ActiveEffects;

/// `#rrggbb` plus an alpha as a CSS `rgba(...)` string. Anything that is not a
/// six digit hex colour falls back to white.
pub fn rgba(hex: &str, alpha: f64) -> String {
	let channel = |i: usize| {
		hex.get(i..i + 2)
			.and_then(|c| u8::from_str_radix(c, 16).ok())
			.unwrap_or(255)
	};
	let (r, g, b) = match hex.strip_prefix('#') {
		Some(digits) if digits.len() == 6 => (channel(1), channel(3), channel(5)),
		_ => (255, 255, 255),
	};
	format!("rgba({r}, {g}, {b}, {})", alpha.clamp(0.0, 1.0))
}

pub fn circle(ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64) {
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius.max(0.0), 0.0, TAU);
}

/// Ring, halo and spark burst around an active node of the given radius.
pub fn draw_active_effects(
	ctx: &CanvasRenderingContext2d,
	(x, y): (f64, f64),
	radius: f64,
	color: &str,
	fx: &ActiveEffects,
) {
	ctx.save();

	// Outer pulse
	ctx.set_shadow_blur(8.0);
	ctx.set_shadow_color(color);
	circle(ctx, x, y, radius * 1.2 * fx.ring_scale);
	ctx.set_stroke_style_str(&rgba(color, fx.ring_opacity));
	ctx.set_line_width(2.0);
	ctx.stroke();

	// Rotating dashed halo
	ctx.set_shadow_blur(0.0);
	let _ = ctx.translate(x, y);
	let _ = ctx.rotate(fx.halo_angle);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(6.0),
		&JsValue::from_f64(5.0),
	));
	circle(ctx, 0.0, 0.0, radius * 1.45);
	ctx.set_stroke_style_str(&rgba(color, 0.6));
	ctx.set_line_width(1.2);
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());

	// Burst
	for spark in &fx.sparks {
		let d = radius * spark.distance;
		circle(ctx, spark.angle.cos() * d, spark.angle.sin() * d, 2.0);
		ctx.set_fill_style_str(&rgba(color, spark.opacity));
		ctx.fill();
	}

	ctx.restore();
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hex_to_rgba() {
		assert_eq!(rgba("#38bdf8", 0.5), "rgba(56, 189, 248, 0.5)");
		assert_eq!(rgba("cyan", 2.0), "rgba(255, 255, 255, 1)");
	}
}
