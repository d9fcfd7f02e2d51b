//! The ordered list of [`Item`]s.

use crate::{
	model::{Item, ItemAttributes, ItemId},
	observer::{Emitter, Subscription},
};
use core::{
	cell::RefCell,
	fmt::{self, Debug, Formatter},
};
use hashbrown::HashMap;
use std::rc::{Rc, Weak};
use tracing::{debug, instrument, trace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
	Added(Item),
	/// The item was destroyed and is no longer a member.
	Removed(Item),
}

/// An ordered, mutable collection of [`Item`]s.
///
/// Cloning yields another handle to the same list.
/// Members are removed automatically when they are [destroyed](`Item::destroy`).
#[derive(Clone, Default)]
pub struct ItemList(Rc<Inner>);

#[derive(Default)]
struct Inner {
	items: RefCell<Vec<Item>>,
	memberships: RefCell<HashMap<ItemId, Subscription>>,
	events: Emitter<ListEvent>,
}

impl ItemList {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an [`Item`] from `attributes`, appends it and emits [`ListEvent::Added`].
	///
	/// All `Added` handlers have returned by the time this method does.
	#[instrument(skip(self, attributes))]
	pub fn add(&self, attributes: ItemAttributes) -> Item {
		let item = Item::new(attributes);

		let list: Weak<Inner> = Rc::downgrade(&self.0);
		let id = item.id();
		let membership = item.on_destroy(move || {
			if let Some(list) = list.upgrade() {
				ItemList(list).remove(id);
			}
		});
		self.0.memberships.borrow_mut().insert(id, membership);
		self.0.items.borrow_mut().push(item.clone());

		debug!(item = %id, len = self.len(), "Added item.");
		self.0.events.emit(&ListEvent::Added(item.clone()));
		item
	}

	fn remove(&self, id: ItemId) {
		let removed = {
			let mut items = self.0.items.borrow_mut();
			items.iter().position(|item| item.id() == id).map(|i| items.remove(i))
		};
		let membership = self.0.memberships.borrow_mut().remove(&id);
		drop(membership);

		match removed {
			Some(item) => {
				debug!(item = %id, len = self.len(), "Removed item.");
				self.0.events.emit(&ListEvent::Removed(item));
			}
			None => trace!(item = %id, "Destroyed item was not a member."),
		}
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.items.borrow().len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// The current members, in insertion order.
	#[must_use]
	pub fn items(&self) -> Vec<Item> {
		self.0.items.borrow().clone()
	}

	#[must_use]
	pub fn get(&self, id: ItemId) -> Option<Item> {
		self.0.items.borrow().iter().find(|item| item.id() == id).cloned()
	}

	#[must_use]
	pub fn titles(&self) -> Vec<String> {
		self.0.items.borrow().iter().map(Item::title).collect()
	}

	#[must_use]
	pub fn completed_count(&self) -> usize {
		self.0.items.borrow().iter().filter(|item| item.is_completed()).count()
	}

	#[must_use]
	pub fn remaining_count(&self) -> usize {
		self.len() - self.completed_count()
	}

	pub fn subscribe(&self, handler: impl Fn(&ListEvent) + 'static) -> Subscription {
		self.0.events.subscribe(handler)
	}

	pub fn on_add(&self, handler: impl Fn(&Item) + 'static) -> Subscription {
		self.subscribe(move |event| {
			if let ListEvent::Added(item) = event {
				handler(item);
			}
		})
	}

	pub fn on_remove(&self, handler: impl Fn(&Item) + 'static) -> Subscription {
		self.subscribe(move |event| {
			if let ListEvent::Removed(item) = event {
				handler(item);
			}
		})
	}
}

impl Debug for ItemList {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("ItemList")
			.field("items", &*self.0.items.borrow())
			.field("subscribers", &self.0.events.len())
			.finish()
	}
}
