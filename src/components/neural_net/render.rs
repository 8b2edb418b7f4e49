use web_sys::CanvasRenderingContext2d;

use super::state::{NODE_SIZE, NeuralNetState, tone};
use crate::components::paint::{circle, draw_active_effects, rgba};

pub fn render(state: &NeuralNetState, ctx: &CanvasRenderingContext2d) {
	let viewport = state.viewport();
	ctx.set_fill_style_str("#05060f");
	ctx.fill_rect(0.0, 0.0, viewport.width, viewport.height);
	if !viewport.is_measured() {
		return;
	}
	draw_dust(state, ctx);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
}

fn draw_dust(state: &NeuralNetState, ctx: &CanvasRenderingContext2d) {
	let projector = state.dust_projector();
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.35)");
	for point in state.dust.points() {
		if let Some(p) = projector.project(*point) {
			let size = (0.02 * p.scale).clamp(0.5, 2.0);
			ctx.fill_rect(p.x, p.y, size, size);
		}
	}
}

fn draw_links(state: &NeuralNetState, ctx: &CanvasRenderingContext2d) {
	let projected = state.projected();
	let nodes = state.topology.nodes();
	for link in state.topology.links() {
		let (Some(a), Some(b)) = (projected[link.source], projected[link.target]) else {
			continue;
		};
		let style = state.highlight.edge_style(link.source, link.target);
		let color = tone(nodes[link.source].layer);
		let active =
			state.highlight.is_active(link.source) || state.highlight.is_active(link.target);

		ctx.set_shadow_blur(if active { style.glow } else { 0.0 });
		ctx.set_shadow_color(color);
		ctx.set_stroke_style_str(&rgba(color, style.opacity * 0.4));
		ctx.set_line_width(style.width / 1.8);
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();
	}
	ctx.set_shadow_blur(0.0);
}

fn draw_nodes(state: &NeuralNetState, ctx: &CanvasRenderingContext2d) {
	// Painter's order: far nodes first
	let mut order: Vec<_> = state
		.projected()
		.iter()
		.enumerate()
		.filter_map(|(i, p)| p.map(|p| (i, p)))
		.collect();
	order.sort_by(|a, b| a.1.scale.total_cmp(&b.1.scale));

	let nodes = state.topology.nodes();
	for (i, p) in order {
		let color = tone(nodes[i].layer);
		let effects = state.highlight.effects(i, state.time);
		let radius = (NODE_SIZE * p.scale).max(1.5);
		let body = effects.map_or(radius, |fx| radius * fx.body_scale);

		ctx.set_shadow_blur(radius * 1.5);
		ctx.set_shadow_color(color);
		circle(ctx, p.x, p.y, body);
		ctx.set_fill_style_str(color);
		ctx.fill();
		ctx.set_shadow_blur(0.0);

		if let Some(fx) = effects {
			draw_active_effects(ctx, (p.x, p.y), radius, color, &fx);
		}
	}
}
