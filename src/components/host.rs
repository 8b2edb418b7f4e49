//! Browser-backed event sources and small canvas helpers.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::DVec2;
use leptos::prelude::on_cleanup;
use log::{info, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Element, HtmlCanvasElement, MouseEvent, ResizeObserver, Window,
};

use crate::error::{Error, Result};
use crate::network::events::{EventSource, Handler, Subscription};
use crate::network::Viewport;

/// Subscriptions owned by one mounted widget.
pub type Held = Rc<RefCell<Vec<Subscription>>>;

fn window() -> Result<Window> {
	web_sys::window().ok_or_else(|| Error::Host("no window".into()))
}

/// High resolution host time in milliseconds.
pub fn now_ms() -> f64 {
	web_sys::window()
		.and_then(|w| w.performance())
		.map(|p| p.now())
		.unwrap_or(0.0)
}

/// Release everything in `held` when the current reactive owner is torn down.
pub fn release_on_cleanup(held: Held) {
	let held = SendWrapper::new(held);
	on_cleanup(move || {
		let released = held.borrow_mut().drain(..).count();
		if released > 0 {
			info!("Released {released} subscriptions");
		}
	});
}

/// Keep a subscription alive in `held`, logging failures.
pub fn hold(held: &Held, what: &str, subscription: Result<Subscription>) {
	match subscription {
		Ok(sub) => held.borrow_mut().push(sub),
		Err(err) => warn!("Could not subscribe to {what}: {err}"),
	}
}

/// The 2D drawing context of a canvas.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

/// Mouse position relative to the canvas' top-left corner.
pub fn pointer_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> DVec2 {
	let rect = canvas.get_bounding_client_rect();
	DVec2::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// `requestAnimationFrame` loop emitting frame timestamps in milliseconds.
pub struct AnimationFrames;

impl EventSource<f64> for AnimationFrames {
	fn subscribe(&self, mut handler: Handler<f64>) -> Result<Subscription> {
		let window = window()?;
		let callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
		let handle = Rc::new(Cell::new(0));
		let (callback_inner, handle_inner) = (callback.clone(), handle.clone());

		*callback.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
			handler(timestamp);
			let Some(win) = web_sys::window() else {
				return;
			};
			if let Some(ref cb) = *callback_inner.borrow() {
				match win.request_animation_frame(cb.as_ref().unchecked_ref()) {
					Ok(id) => handle_inner.set(id),
					Err(err) => warn!("Animation frame request failed: {err:?}"),
				}
			}
		}));
		if let Some(ref cb) = *callback.borrow() {
			handle.set(window.request_animation_frame(cb.as_ref().unchecked_ref())?);
		}

		Ok(Subscription::new(move || {
			let _ = window.cancel_animation_frame(handle.get());
			// Breaks the self-reference held by the frame closure.
			callback.borrow_mut().take();
		}))
	}
}

/// `setInterval` timer emitting the host time of each tick.
pub struct Interval {
	/// Milliseconds between ticks.
	pub period_ms: i32,
}

impl EventSource<f64> for Interval {
	fn subscribe(&self, mut handler: Handler<f64>) -> Result<Subscription> {
		let window = window()?;
		let callback = Closure::<dyn FnMut()>::new(move || handler(now_ms()));
		let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
			callback.as_ref().unchecked_ref(),
			self.period_ms,
		)?;
		Ok(Subscription::new(move || {
			window.clear_interval_with_handle(id);
			drop(callback);
		}))
	}
}

/// `ResizeObserver` on one element, emitting its bounding box. Measures once
/// immediately on subscribe.
pub struct ElementResize {
	/// Observed element.
	pub element: Element,
}

impl EventSource<Viewport> for ElementResize {
	fn subscribe(&self, mut handler: Handler<Viewport>) -> Result<Subscription> {
		let element = self.element.clone();
		let measure = move || {
			let rect = element.get_bounding_client_rect();
			Viewport::new(rect.width(), rect.height())
		};
		handler(measure());

		let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |_entries: js_sys::Array| {
			handler(measure());
		});
		let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())?;
		observer.observe(&self.element);
		Ok(Subscription::new(move || {
			observer.disconnect();
			drop(callback);
		}))
	}
}

/// Window `resize` events, emitting the inner window size. Measures once
/// immediately on subscribe.
pub struct WindowResize;

fn inner_size(window: &Window) -> Viewport {
	let read = |v: std::result::Result<JsValue, JsValue>| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
	};
	Viewport::new(read(window.inner_width()), read(window.inner_height()))
}

impl EventSource<Viewport> for WindowResize {
	fn subscribe(&self, mut handler: Handler<Viewport>) -> Result<Subscription> {
		let window = window()?;
		handler(inner_size(&window));

		let win = window.clone();
		let callback = Closure::<dyn FnMut()>::new(move || handler(inner_size(&win)));
		window.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())?;
		Ok(Subscription::new(move || {
			let _ = window
				.remove_event_listener_with_callback("resize", callback.as_ref().unchecked_ref());
		}))
	}
}
