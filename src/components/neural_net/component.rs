use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use web_sys::{HtmlCanvasElement, MouseEvent};

use super::render;
use super::state::NeuralNetState;
use crate::components::host::{
	self, AnimationFrames, ElementResize, Held, hold, release_on_cleanup,
};
use crate::network::{EventSource, LayeredTopology, RingLayout};

/// Rotating 3D layered network filling its parent element.
#[component]
pub fn NeuralNetCanvas(
	topology: LayeredTopology,
	#[prop(optional)] layout: RingLayout,
	#[prop(default = 1000)] dust: usize,
	#[prop(default = 0)] seed: u64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<NeuralNetState>>> = Rc::new(RefCell::new(None));
	let held: Held = Rc::default();
	let (state_init, held_init) = (state.clone(), held.clone());
	let mut pending = Some((topology, layout));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some((topology, layout)) = pending.take() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(ctx) = host::context_2d(&canvas) else {
			warn!("Neural net canvas has no 2d context");
			return;
		};
		info!(
			"Mounting neural net: {} nodes, {} links",
			topology.nodes().len(),
			topology.links().len()
		);
		*state_init.borrow_mut() = Some(NeuralNetState::new(topology, &layout, dust, seed));

		match canvas.parent_element() {
			Some(parent) => {
				let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
				let resize = ElementResize { element: parent }.subscribe(Box::new(move |measured| {
					if let Some(ref mut s) = *state_resize.borrow_mut() {
						if let Some(v) = s.resize(measured) {
							canvas_resize.set_width(v.width as u32);
							canvas_resize.set_height(v.height as u32);
						}
					}
				}));
				hold(&held_init, "container resize", resize);
			}
			None => warn!("Neural net canvas is detached; it will stay unmeasured"),
		}

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

	// Click freezes and resumes the scene
	let state_click = state.clone();
	let on_click = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_click.borrow_mut() {
			s.toggle_pause(host::now_ms());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="neural-net-canvas"
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			on:click=on_click
			style="display: block; width: 100%; height: 100%; cursor: pointer;"
		/>
	}
}
