//! A single to-do entry and its change notifications.

use crate::observer::{Emitter, Subscription};
use core::{
	cell::{Cell, RefCell},
	fmt::{self, Debug, Display, Formatter},
};
use std::rc::Rc;
use tracing::{debug, instrument, trace, warn};

thread_local! {
	static NEXT_ID: Cell<u64> = Cell::new(1);
}

/// Stable identity of an [`Item`], independent of its attributes.
///
/// Displayed as `c1`, `c2` and so on, in allocation order per thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);
impl ItemId {
	fn next() -> Self {
		NEXT_ID.with(|next| {
			let id = next.get();
			next.set(id + 1);
			Self(id)
		})
	}
}
impl Display for ItemId {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "c{}", self.0)
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemAttributes {
	pub title: String,
	pub completed: bool,
}
impl ItemAttributes {
	/// Attributes for a new, not yet completed item.
	#[must_use]
	pub fn new(title: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			completed: false,
		}
	}

	#[must_use]
	pub fn with_completed(self, completed: bool) -> Self {
		Self { completed, ..self }
	}
}

/// A partial update for [`Item::save`]. `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
	pub title: Option<String>,
	pub completed: Option<bool>,
}
impl ItemPatch {
	#[must_use]
	pub fn title(title: impl Into<String>) -> Self {
		Self {
			title: Some(title.into()),
			..Self::default()
		}
	}

	#[must_use]
	pub fn completed(completed: bool) -> Self {
		Self {
			completed: Some(completed),
			..Self::default()
		}
	}
}

/// Which attributes a [`Item::save`] call actually changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemChange {
	pub title: bool,
	pub completed: bool,
}
impl ItemChange {
	#[must_use]
	pub fn any(self) -> bool {
		self.title || self.completed
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEvent {
	Changed(ItemChange),
	/// Emitted exactly once. The item emits nothing afterwards.
	Destroyed,
}

/// A to-do entry.
///
/// This is a cheap handle: clones refer to the same entry, and equality is identity.
#[derive(Clone)]
pub struct Item(Rc<Inner>);

struct Inner {
	id: ItemId,
	attributes: RefCell<ItemAttributes>,
	destroyed: Cell<bool>,
	events: Emitter<ItemEvent>,
}

impl Item {
	#[must_use]
	pub fn new(attributes: ItemAttributes) -> Self {
		let item = Self(Rc::new(Inner {
			id: ItemId::next(),
			attributes: RefCell::new(attributes),
			destroyed: Cell::new(false),
			events: Emitter::new(),
		}));
		trace!(item = %item.id(), "Created item.");
		item
	}

	#[must_use]
	pub fn id(&self) -> ItemId {
		self.0.id
	}

	/// A snapshot of the current attributes.
	#[must_use]
	pub fn attributes(&self) -> ItemAttributes {
		self.0.attributes.borrow().clone()
	}

	#[must_use]
	pub fn title(&self) -> String {
		self.0.attributes.borrow().title.clone()
	}

	#[must_use]
	pub fn is_completed(&self) -> bool {
		self.0.attributes.borrow().completed
	}

	#[must_use]
	pub fn is_destroyed(&self) -> bool {
		self.0.destroyed.get()
	}

	/// Applies `patch` and notifies subscribers with [`ItemEvent::Changed`] if any value differs.
	///
	/// This is the only way attributes change. There is no backing store, so "saving" is in-memory only.
	/// Saving a destroyed item has no effect.
	#[instrument(skip(self, patch), fields(item = %self.id()))]
	pub fn save(&self, patch: ItemPatch) {
		if self.is_destroyed() {
			return warn!("Ignored save on a destroyed item.");
		}

		let change = {
			let mut attributes = self.0.attributes.borrow_mut();
			let mut change = ItemChange::default();
			if let Some(title) = patch.title {
				if attributes.title != title {
					attributes.title = title;
					change.title = true;
				}
			}
			if let Some(completed) = patch.completed {
				if attributes.completed != completed {
					attributes.completed = completed;
					change.completed = true;
				}
			}
			change
		};

		if change.any() {
			trace!(?change, "Changed.");
			self.0.events.emit(&ItemEvent::Changed(change));
		}
	}

	pub fn toggle(&self) {
		self.save(ItemPatch::completed(!self.is_completed()));
	}

	/// Notifies subscribers with [`ItemEvent::Destroyed`], then releases all of them.
	///
	/// Repeated calls do nothing.
	#[instrument(skip(self), fields(item = %self.id()))]
	pub fn destroy(&self) {
		if self.0.destroyed.replace(true) {
			return trace!("Already destroyed.");
		}
		debug!("Destroying.");
		self.0.events.emit(&ItemEvent::Destroyed);
		self.0.events.clear();
	}

	pub fn subscribe(&self, handler: impl Fn(&ItemEvent) + 'static) -> Subscription {
		if self.is_destroyed() {
			trace!(item = %self.id(), "Subscribed to a destroyed item. The handler will never be called.");
		}
		self.0.events.subscribe(handler)
	}

	pub fn on_change(&self, handler: impl Fn(ItemChange) + 'static) -> Subscription {
		self.subscribe(move |event| {
			if let &ItemEvent::Changed(change) = event {
				handler(change);
			}
		})
	}

	pub fn on_destroy(&self, handler: impl Fn() + 'static) -> Subscription {
		self.subscribe(move |event| {
			if let ItemEvent::Destroyed = event {
				handler();
			}
		})
	}

	/// Number of live handlers, including the owning list's.
	#[must_use]
	pub fn subscriber_count(&self) -> usize {
		self.0.events.len()
	}
}

impl PartialEq for Item {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}
}
impl Eq for Item {}

impl Debug for Item {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let attributes = self.0.attributes.borrow();
		let mut debug = f.debug_struct("Item");
		debug.field("id", &self.0.id);
		if cfg!(feature = "dangerous-logging") {
			debug.field("title", &attributes.title);
		}
		debug
			.field("completed", &attributes.completed)
			.field("destroyed", &self.0.destroyed.get())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn completed_defaults_to_false() {
		let item = Item::new(ItemAttributes::new("Buy milk"));
		assert_eq!(item.title(), "Buy milk");
		assert!(!item.is_completed());
		assert_eq!(ItemAttributes::default(), ItemAttributes::new(""));
	}

	#[test]
	fn ids_are_distinct_and_formatted_like_client_ids() {
		let a = Item::new(ItemAttributes::default());
		let b = Item::new(ItemAttributes::default());
		assert_ne!(a.id(), b.id());
		assert!(a.id().to_string().starts_with('c'));
		assert_ne!(a, b);
		assert_eq!(a, a.clone());
	}

	#[test]
	fn save_without_difference_does_not_notify() {
		let item = Item::new(ItemAttributes::new("A"));
		let changes = Rc::new(Cell::new(0));
		let _subscription = item.on_change({
			let changes = Rc::clone(&changes);
			move |_| changes.set(changes.get() + 1)
		});

		item.save(ItemPatch::title("A"));
		assert_eq!(changes.get(), 0);
		item.save(ItemPatch::title("B"));
		assert_eq!(changes.get(), 1);
		assert_eq!(item.title(), "B");
	}
}
