//! Subscribe/unsubscribe seam between the core and its event sources.
//!
//! Frame ticks, interval ticks and resize notifications all reach the core
//! through [`EventSource`]. Registrations are held by a [`Subscription`]
//! guard, which releases them when cancelled or dropped.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::error::Result;

/// Boxed event handler.
pub type Handler<E> = Box<dyn FnMut(E)>;

/// Something that can deliver events of type `E` to a handler.
pub trait EventSource<E> {
	/// Register `handler`. The registration lives as long as the returned guard.
	fn subscribe(&self, handler: Handler<E>) -> Result<Subscription>;
}

/// Guard for a live registration. Releases it exactly once.
#[must_use = "dropping a subscription releases it immediately"]
pub struct Subscription {
	release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
	/// Wrap the release action for a registration.
	pub fn new(release: impl FnOnce() + 'static) -> Self {
		Self {
			release: Some(Box::new(release)),
		}
	}

	/// Release now instead of at drop.
	pub fn cancel(mut self) {
		self.release_now();
	}

	fn release_now(&mut self) {
		if let Some(release) = self.release.take() {
			release();
		}
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		self.release_now();
	}
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription")
			.field("live", &self.release.is_some())
			.finish()
	}
}

type Slot<E> = (u64, Rc<RefCell<Handler<E>>>);

/// In-process source that emits events on request. Used to drive the core
/// with synthetic frames and resizes.
pub struct ManualSource<E> {
	handlers: Rc<RefCell<Vec<Slot<E>>>>,
	next_id: Cell<u64>,
}

impl<E> Default for ManualSource<E> {
	fn default() -> Self {
		Self {
			handlers: Rc::new(RefCell::new(Vec::new())),
			next_id: Cell::new(0),
		}
	}
}

impl<E: Clone> ManualSource<E> {
	/// A source with no listeners.
	pub fn new() -> Self {
		Self::default()
	}

	/// Deliver `event` to every current listener.
	pub fn emit(&self, event: E) {
		// Snapshot so handlers may unsubscribe while being called.
		let snapshot: Vec<_> = self
			.handlers
			.borrow()
			.iter()
			.map(|(_, h)| h.clone())
			.collect();
		for handler in snapshot {
			let mut call = handler.borrow_mut();
			(*call)(event.clone());
		}
	}

	/// Number of live registrations.
	pub fn listeners(&self) -> usize {
		self.handlers.borrow().len()
	}
}

impl<E: Clone + 'static> EventSource<E> for ManualSource<E> {
	fn subscribe(&self, handler: Handler<E>) -> Result<Subscription> {
		let id = self.next_id.get();
		self.next_id.set(id + 1);
		self.handlers
			.borrow_mut()
			.push((id, Rc::new(RefCell::new(handler))));

		let handlers = Rc::downgrade(&self.handlers);
		Ok(Subscription::new(move || {
			if let Some(handlers) = handlers.upgrade() {
				handlers.borrow_mut().retain(|(slot, _)| *slot != id);
			}
		}))
	}
}
