//! Synchronous, single-threaded change notification.
//!
//! An [`Emitter`] delivers each event to its handlers in subscription order before [`Emitter::emit`] returns.
//! Handlers are free to subscribe, unsubscribe or emit again while a delivery is in progress:
//! the handler list is snapshotted first, and a handler that is unsubscribed before its turn comes up is skipped.

use core::{
	cell::{Cell, RefCell},
	fmt::{self, Debug, Formatter},
};
use std::rc::{Rc, Weak};
use tracing::trace;

type Handler<E> = Rc<dyn Fn(&E)>;

struct Registry<E> {
	next_key: Cell<u64>,
	handlers: RefCell<Vec<(u64, Handler<E>)>>,
}
impl<E> Registry<E> {
	fn contains(&self, key: u64) -> bool {
		self.handlers.borrow().iter().any(|&(k, _)| k == key)
	}

	fn remove(&self, key: u64) {
		// The removed handler is dropped only after the borrow ends, as its captures may own further subscriptions.
		let removed = {
			let mut handlers = self.handlers.borrow_mut();
			handlers.iter().position(|&(k, _)| k == key).map(|i| handlers.remove(i))
		};
		if removed.is_some() {
			trace!(key, "Unsubscribed.");
		}
	}
}

/// A list of event handlers.
pub struct Emitter<E: 'static> {
	registry: Rc<Registry<E>>,
}
impl<E: 'static> Default for Emitter<E> {
	fn default() -> Self {
		Self::new()
	}
}
impl<E: 'static> Debug for Emitter<E> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Emitter").field("handlers", &self.len()).finish()
	}
}
impl<E: 'static> Emitter<E> {
	#[must_use]
	pub fn new() -> Self {
		Self {
			registry: Rc::new(Registry {
				next_key: Cell::new(0),
				handlers: RefCell::new(Vec::new()),
			}),
		}
	}

	/// Appends `handler` to the delivery order.
	///
	/// The handler stays registered until the returned [`Subscription`] is dropped or [`Emitter::clear`] is called.
	pub fn subscribe(&self, handler: impl Fn(&E) + 'static) -> Subscription {
		let key = self.registry.next_key.get();
		self.registry.next_key.set(key + 1);
		let handler: Handler<E> = Rc::new(handler);
		self.registry.handlers.borrow_mut().push((key, handler));
		trace!(key, "Subscribed.");

		let registry: Weak<Registry<E>> = Rc::downgrade(&self.registry);
		Subscription {
			release: Some(Box::new(move || {
				if let Some(registry) = registry.upgrade() {
					registry.remove(key);
				}
			})),
		}
	}

	pub fn emit(&self, event: &E) {
		let snapshot: Vec<(u64, Handler<E>)> = self.registry.handlers.borrow().iter().map(|(k, h)| (*k, Rc::clone(h))).collect();
		trace!(handlers = snapshot.len(), "Emitting.");
		for (key, handler) in snapshot {
			if self.registry.contains(key) {
				handler(event);
			}
		}
	}

	/// Drops all handlers. Outstanding [`Subscription`]s become no-ops.
	pub fn clear(&self) {
		let handlers = self.registry.handlers.take();
		trace!(handlers = handlers.len(), "Cleared handlers.");
		drop(handlers);
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.registry.handlers.borrow().len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Keeps a handler registered with its [`Emitter`]. Dropping it unsubscribes.
#[must_use = "Dropping a `Subscription` unsubscribes its handler immediately."]
pub struct Subscription {
	release: Option<Box<dyn FnOnce()>>,
}
impl Debug for Subscription {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription").field("active", &self.release.is_some()).finish()
	}
}
impl Subscription {
	pub fn unsubscribe(mut self) {
		self.release();
	}

	fn release(&mut self) {
		if let Some(release) = self.release.take() {
			release();
		}
	}
}
impl Drop for Subscription {
	fn drop(&mut self) {
		self.release();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn delivers_in_subscription_order() {
		let emitter = Emitter::<u8>::new();
		let log = Rc::new(RefCell::new(Vec::new()));

		let _a = emitter.subscribe({
			let log = Rc::clone(&log);
			move |e: &u8| log.borrow_mut().push(("a", *e))
		});
		let _b = emitter.subscribe({
			let log = Rc::clone(&log);
			move |e: &u8| log.borrow_mut().push(("b", *e))
		});

		emitter.emit(&1);
		emitter.emit(&2);
		assert_eq!(*log.borrow(), [("a", 1), ("b", 1), ("a", 2), ("b", 2)]);
	}

	#[test]
	fn dropping_the_subscription_unsubscribes() {
		let emitter = Emitter::<()>::new();
		let count = Rc::new(Cell::new(0));
		let subscription = emitter.subscribe({
			let count = Rc::clone(&count);
			move |_: &()| count.set(count.get() + 1)
		});

		emitter.emit(&());
		drop(subscription);
		emitter.emit(&());

		assert_eq!(count.get(), 1);
		assert!(emitter.is_empty());
	}

	#[test]
	fn handler_unsubscribed_mid_delivery_is_skipped() {
		let emitter = Emitter::<()>::new();
		let later: Rc<RefCell<Option<Subscription>>> = Rc::default();
		let later_ran = Rc::new(Cell::new(false));

		let _first = emitter.subscribe({
			let later = Rc::clone(&later);
			move |_: &()| drop(later.borrow_mut().take())
		});
		*later.borrow_mut() = Some(emitter.subscribe({
			let later_ran = Rc::clone(&later_ran);
			move |_: &()| later_ran.set(true)
		}));

		emitter.emit(&());
		assert!(!later_ran.get());
		assert_eq!(emitter.len(), 1);
	}

	#[test]
	fn subscription_may_outlive_its_emitter() {
		let emitter = Emitter::<()>::new();
		let subscription = emitter.subscribe(|_: &()| ());
		drop(emitter);
		subscription.unsubscribe();
	}
}
