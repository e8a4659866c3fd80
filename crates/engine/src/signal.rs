//! Single-threaded signals with RAII subscriptions.
//!
//! A [`Signal`] holds a list of handlers. [`Signal::connect`] returns a
//! [`Subscription`] that removes the handler when dropped or disposed, so a
//! component releases everything it listens to by dropping its handles.
//!
//! Emission snapshots the handler list first. Handlers may therefore connect,
//! disconnect (including themselves) or emit again without tripping a borrow;
//! a handler removed mid-emission still runs for the emission in progress.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Handler<T> = Rc<dyn Fn(&T)>;

struct Handlers<T> {
	list: RefCell<Vec<(u64, Handler<T>)>>,
	next_id: Cell<u64>,
}

pub struct Signal<T> {
	handlers: Rc<Handlers<T>>,
}

impl<T: 'static> Default for Signal<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: 'static> Signal<T> {
	pub fn new() -> Self {
		Self {
			handlers: Rc::new(Handlers {
				list: RefCell::new(Vec::new()),
				next_id: Cell::new(0),
			}),
		}
	}

	/// Adds a handler. It stays connected until the returned handle goes away.
	#[must_use = "dropping the subscription disconnects the handler"]
	pub fn connect(&self, handler: impl Fn(&T) + 'static) -> Subscription {
		let id = self.handlers.next_id.get();
		self.handlers.next_id.set(id + 1);
		self.handlers.list.borrow_mut().push((id, Rc::new(handler)));

		let weak: Weak<Handlers<T>> = Rc::downgrade(&self.handlers);
		Subscription::new(move || {
			if let Some(handlers) = weak.upgrade() {
				handlers.list.borrow_mut().retain(|(handler_id, _)| *handler_id != id);
			}
		})
	}

	/// Calls every connected handler in connection order.
	pub fn emit(&self, value: &T) {
		let snapshot: Vec<Handler<T>> = self.handlers.list.borrow().iter().map(|(_, h)| h.clone()).collect();
		for handler in snapshot {
			handler(value);
		}
	}

	pub fn handler_count(&self) -> usize {
		self.handlers.list.borrow().len()
	}
}

impl<T> fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("handlers", &self.handlers.list.borrow().len())
			.finish()
	}
}

/// Connection handle. Disconnects exactly once: on [`Subscription::dispose`]
/// or on drop, whichever comes first.
pub struct Subscription {
	disconnect: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
	pub fn new(disconnect: impl FnOnce() + 'static) -> Self {
		Self {
			disconnect: Some(Box::new(disconnect)),
		}
	}

	pub fn dispose(mut self) {
		self.release();
	}

	fn release(&mut self) {
		if let Some(disconnect) = self.disconnect.take() {
			disconnect();
		}
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		self.release();
	}
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription")
			.field("active", &self.disconnect.is_some())
			.finish()
	}
}

/// A group of subscriptions released together.
#[derive(Debug, Default)]
pub struct SubscriptionSet {
	subscriptions: Vec<Subscription>,
	disposed: bool,
}

impl SubscriptionSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a subscription. Adding to a disposed set releases it immediately.
	pub fn push(&mut self, subscription: Subscription) {
		if self.disposed {
			subscription.dispose();
		} else {
			self.subscriptions.push(subscription);
		}
	}

	pub fn len(&self) -> usize {
		self.subscriptions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.subscriptions.is_empty()
	}

	pub fn is_disposed(&self) -> bool {
		self.disposed
	}

	/// Releases every subscription. Later calls are no-ops.
	pub fn dispose_all(&mut self) {
		self.disposed = true;
		for subscription in self.subscriptions.drain(..) {
			subscription.dispose();
		}
	}
}
