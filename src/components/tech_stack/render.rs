use web_sys::CanvasRenderingContext2d;

use super::state::TechStackState;
use crate::components::paint::{circle, draw_active_effects, rgba};
use crate::network::ParticleField;
use crate::network::animation::Glow;

/// `(x, y, colour, radius, breathing)` with position and radius as fractions of
/// the viewport.
const GLOWS: [(f64, f64, &str, f64, Glow); 3] = [
	(0.25, 0.25, "#3b82f6", 0.3, Glow::RISING),
	(0.75, 0.75, "#06b6d4", 0.3, Glow::FALLING),
	(0.5, 0.5, "#0ea5e9", 0.36, Glow::CENTRE),
];

pub fn render(state: &TechStackState, ctx: &CanvasRenderingContext2d) {
	let viewport = state.viewport();
	ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);
	if !viewport.is_measured() {
		return;
	}
	draw_glows(state, ctx);
	draw_particles(state, ctx);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
}

fn draw_glows(state: &TechStackState, ctx: &CanvasRenderingContext2d) {
	let v = state.viewport();
	for (fx, fy, color, size, breathing) in GLOWS {
		let (scale, opacity) = breathing.at(state.time);
		let (x, y) = (fx * v.width, fy * v.height);
		let radius = size * v.width.min(v.height) * scale;
		let Ok(gradient) = ctx.create_radial_gradient(x, y, 0.0, x, y, radius) else {
			continue;
		};
		let _ = gradient.add_color_stop(0.0, &rgba(color, opacity));
		let _ = gradient.add_color_stop(1.0, &rgba(color, 0.0));
		circle(ctx, x, y, radius);
		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
		ctx.fill();
	}
}

fn draw_particles(state: &TechStackState, ctx: &CanvasRenderingContext2d) {
	let v = state.viewport();
	for particle in state.particles.particles() {
		let drift = ParticleField::drift(particle, state.time);
		let (x, y) = (
			particle.x / 100.0 * v.width + drift.dx,
			particle.y / 100.0 * v.height + drift.dy,
		);
		circle(ctx, x, y, particle.size / 2.0);
		ctx.set_fill_style_str(&rgba(particle.color, drift.opacity));
		ctx.fill();
	}
}

fn draw_edges(state: &TechStackState, ctx: &CanvasRenderingContext2d) {
	let nodes = state.graph.nodes();
	for (i, &(source, target)) in state.graph.edges().iter().enumerate() {
		let Some((a, b)) = state.layout.endpoints((source, target)) else {
			continue;
		};
		let progress = state.edge_progress(i);
		if progress <= 0.0 {
			continue;
		}
		let end = a + (b - a) * progress;
		let style = state.highlight.edge_style(source, target);
		let color = &nodes[source].color;

		let gradient = ctx.create_linear_gradient(a.x, a.y, b.x, b.y);
		for (offset, opacity) in style.fade_stops() {
			let _ = gradient.add_color_stop(offset as f32, &rgba(color, opacity));
		}
		ctx.set_shadow_blur(style.glow);
		ctx.set_shadow_color(color);
		#[allow(deprecated)]
		ctx.set_stroke_style(&gradient);
		ctx.set_line_width(style.width);
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(end.x, end.y);
		ctx.stroke();

		if progress >= 1.0 {
			let marker = state.flow.marker(i, state.time);
			let at = a + (b - a) * marker.progress;
			circle(ctx, at.x, at.y, 3.0);
			ctx.set_shadow_blur(4.0);
			ctx.set_fill_style_str(&rgba(color, marker.opacity));
			ctx.fill();
		}
	}
	ctx.set_shadow_blur(0.0);
}

fn draw_nodes(state: &TechStackState, ctx: &CanvasRenderingContext2d) {
	let large = state.node_radius >= 20.0;
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_font(&format!(
		"600 {}px sans-serif",
		if large { (state.node_radius * 0.33).round() } else { 11.0 }
	));

	for (i, node) in state.graph.nodes().iter().enumerate() {
		let Some(p) = state.layout.position(i) else {
			continue;
		};
		let (scale, opacity) = state.node_reveal(i);
		if opacity <= 0.0 {
			continue;
		}
		let effects = state.highlight.effects(i, state.time);
		let radius = state.node_radius * scale;

		ctx.save();
		let _ = ctx.translate(p.x, p.y);
		if let Some(fx) = effects {
			let _ = ctx.rotate(fx.wobble);
			let _ = ctx.scale(fx.body_scale, fx.body_scale);
		}
		ctx.set_global_alpha(opacity);
		ctx.set_shadow_blur(12.0);
		ctx.set_shadow_color(&node.color);
		circle(ctx, 0.0, 0.0, radius);
		ctx.set_fill_style_str(&rgba(&node.color, 0.18));
		ctx.fill();
		ctx.set_stroke_style_str(&node.color);
		ctx.set_line_width(2.0);
		ctx.stroke();
		ctx.set_shadow_blur(0.0);

		ctx.set_fill_style_str("#e2e8f0");
		let label_y = if large { 0.0 } else { radius + 12.0 };
		let _ = ctx.fill_text(&node.label, 0.0, label_y);
		ctx.restore();

		if let Some(fx) = effects {
			draw_active_effects(ctx, (p.x, p.y), radius, &node.color, &fx);
		}
	}
}
