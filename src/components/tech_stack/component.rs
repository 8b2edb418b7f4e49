use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use web_sys::{HtmlCanvasElement, MouseEvent};

use super::render;
use super::state::TechStackState;
use crate::components::host::{
	self, AnimationFrames, ElementResize, Held, WindowResize, hold, release_on_cleanup,
};
use crate::error::Error;
use crate::network::events::Handler;
use crate::network::{EventSource, PlaneGraph, Sizing, Viewport};

/// Flat graph of named nodes over a particle field.
///
/// With [`Sizing::Container`] the canvas tracks its parent element; with
/// [`Sizing::Fit`] it derives its size from the window width.
#[component]
pub fn TechStackCanvas(
	graph: PlaneGraph,
	#[prop(optional)] sizing: Sizing,
	#[prop(default = 36.0)] node_radius: f64,
	#[prop(default = 40)] particles: usize,
	#[prop(default = 0)] seed: u64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<TechStackState>>> = Rc::new(RefCell::new(None));
	let held: Held = Rc::default();
	let (state_init, held_init) = (state.clone(), held.clone());
	let mut pending = Some(graph);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(graph) = pending.take() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(ctx) = host::context_2d(&canvas) else {
			warn!("Tech stack canvas has no 2d context");
			return;
		};
		info!(
			"Mounting tech stack: {} nodes, {} edges",
			graph.nodes().len(),
			graph.edges().len()
		);
		let initial = TechStackState::new(graph, sizing, node_radius, particles, seed);
		*state_init.borrow_mut() = Some(initial);

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		let on_resize: Handler<Viewport> = Box::new(move |measured| {
			let mut guard = state_resize.borrow_mut();
			let Some(v) = guard.as_mut().and_then(|s| s.resize(measured)) else {
				return;
			};
			canvas_resize.set_width(v.width as u32);
			canvas_resize.set_height(v.height as u32);
			if let Sizing::Fit(_) = sizing {
				let style = web_sys::HtmlElement::style(&canvas_resize);
				let _ = style.set_property("width", &format!("{}px", v.width));
				let _ = style.set_property("height", &format!("{}px", v.height));
			}
		});
		let resize = match sizing {
			Sizing::Container => match canvas.parent_element() {
				Some(parent) => ElementResize { element: parent }.subscribe(on_resize),
				None => Err(Error::Host("canvas has no parent element".into())),
			},
			Sizing::Fit(_) => WindowResize.subscribe(on_resize),
		};
		hold(&held_init, "resize", resize);

		let state_anim = state_init.clone();
		let frames = AnimationFrames.subscribe(Box::new(move |now| {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(now);
				render::render(s, &ctx);
			}
		}));
		hold(&held_init, "animation frames", frames);
	});
	release_on_cleanup(held);

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let point = host::pointer_position(&canvas, &ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_moved(point);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_left();
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="tech-stack-canvas"
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			style="display: block; width: 100%; height: 100%; margin: 0 auto;"
		/>
	}
}
