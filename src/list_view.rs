//! The top-level controller: the new-item input and the list of rows.

use crate::{
	collection::ItemList,
	config::AppConfig,
	dom::{Dom, ENTER_KEY},
	error::SetupError,
	item_view::ItemView,
	model::{Item, ItemAttributes, ItemId},
	observer::Subscription,
	template::{ItemTemplate, Template},
};
use core::{
	cell::RefCell,
	fmt::{self, Debug, Formatter},
};
use hashbrown::HashMap;
use std::rc::{Rc, Weak};
use tracing::{debug, info, instrument, trace, warn};

/// Owns the [`ItemList`] and keeps exactly one [`ItemView`] per live item, in list order.
pub struct ListView<D: Dom>(Rc<Inner<D>>);

struct Inner<D: Dom> {
	dom: D,
	config: AppConfig,
	items: ItemList,
	template: Rc<dyn Template>,
	input: D::Node,
	list: D::Node,
	views: RefCell<HashMap<ItemId, ItemView<D>>>,
	bindings: RefCell<Option<Bindings<D>>>,
}

struct Bindings<D: Dom> {
	_added: Subscription,
	_removed: Subscription,
	_key_press: D::Listener,
}

impl<D: Dom> Debug for ListView<D> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("ListView")
			.field("items", &self.0.items)
			.field("views", &self.0.views.borrow().len())
			.finish()
	}
}

impl<D: Dom> ListView<D> {
	/// Sets up the view on the document's existing root, input and list elements, rendering rows with [`ItemTemplate`].
	///
	/// # Errors
	///
	/// Iff one of the elements named in `config` can't be found.
	pub fn new(dom: D, config: AppConfig) -> Result<Self, SetupError> {
		Self::with_template(dom, config, Rc::new(ItemTemplate))
	}

	/// Like [`ListView::new`], but rendering rows with `template`.
	///
	/// # Errors
	///
	/// Iff one of the elements named in `config` can't be found.
	#[instrument(skip(dom, template))]
	pub fn with_template(dom: D, config: AppConfig, template: Rc<dyn Template>) -> Result<Self, SetupError> {
		let root = dom.query_selector(None, &config.root_selector).ok_or_else(|| SetupError::MissingElement {
			role: "root",
			selector: config.root_selector.clone(),
		})?;
		let input = dom.query_selector(Some(&root), &config.input_selector).ok_or_else(|| SetupError::MissingElement {
			role: "input",
			selector: config.input_selector.clone(),
		})?;
		let list = dom.query_selector(Some(&root), &config.list_selector).ok_or_else(|| SetupError::MissingElement {
			role: "list",
			selector: config.list_selector.clone(),
		})?;

		let view = Self(Rc::new(Inner {
			dom,
			config,
			items: ItemList::new(),
			template,
			input,
			list,
			views: RefCell::default(),
			bindings: RefCell::new(None),
		}));

		let weak = Rc::downgrade(&view.0);
		let bindings = Bindings {
			_added: view.0.items.on_add({
				let weak = Weak::clone(&weak);
				move |item: &Item| {
					if let Some(view) = Self::upgrade(&weak) {
						view.add_one(item);
					}
				}
			}),
			_removed: view.0.items.on_remove({
				let weak = Weak::clone(&weak);
				move |item: &Item| {
					if let Some(view) = Self::upgrade(&weak) {
						view.remove_one(item);
					}
				}
			}),
			_key_press: view.0.dom.on_key_press(
				&view.0.input,
				Box::new(move |key: &str| {
					if let Some(view) = Self::upgrade(&weak) {
						view.handle_submit(key);
					}
				}),
			),
		};
		*view.0.bindings.borrow_mut() = Some(bindings);

		info!("List view is ready.");
		Ok(view)
	}

	/// Handles a key press in the input.
	///
	/// Only the Enter key with non-blank input submits: the trimmed text becomes a new item and the input is cleared.
	/// Anything else is ignored.
	#[instrument(skip(self))]
	pub fn handle_submit(&self, key: &str) {
		if key != ENTER_KEY {
			return;
		}

		let value = self.0.dom.value(&self.0.input);
		let title = value.trim();
		if title.is_empty() {
			return trace!("Ignored blank submission.");
		}

		if cfg!(feature = "dangerous-logging") {
			debug!(title, "Submitting.");
		}
		self.0.items.add(ItemAttributes::new(title));
		self.0.dom.set_value(&self.0.input, "");
	}

	/// Creates, renders and appends the row for a newly added `item`.
	///
	/// Only live members of [`ListView::items`] get a row, and only one each.
	/// Anything else is ignored.
	#[instrument(skip(self, item), fields(item = %item.id()))]
	pub fn add_one(&self, item: &Item) {
		if item.is_destroyed() {
			return warn!("Item is destroyed.");
		}
		if self.0.items.get(item.id()).is_none() {
			return warn!("Item is not in this list.");
		}
		if self.0.views.borrow().contains_key(&item.id()) {
			return warn!("Item already has a view.");
		}

		let view = ItemView::new(self.0.dom.clone(), item.clone(), Rc::clone(&self.0.template), &self.0.config);
		view.render();
		self.0.dom.append_child(&self.0.list, view.root());
		self.0.views.borrow_mut().insert(item.id(), view);
	}

	fn remove_one(&self, item: &Item) {
		let view = self.0.views.borrow_mut().remove(&item.id());
		match view {
			Some(view) => view.remove(),
			None => trace!(item = %item.id(), "Removed item had no view."),
		}
	}

	#[must_use]
	pub fn items(&self) -> &ItemList {
		&self.0.items
	}

	#[must_use]
	pub fn view(&self, id: ItemId) -> Option<ItemView<D>> {
		self.0.views.borrow().get(&id).cloned()
	}

	/// The rows of the current items, in list order.
	#[must_use]
	pub fn views(&self) -> Vec<ItemView<D>> {
		let views = self.0.views.borrow();
		self.0.items.items().iter().filter_map(|item| views.get(&item.id()).cloned()).collect()
	}

	#[must_use]
	pub fn view_count(&self) -> usize {
		self.0.views.borrow().len()
	}

	#[must_use]
	pub fn input(&self) -> &D::Node {
		&self.0.input
	}

	#[must_use]
	pub fn list(&self) -> &D::Node {
		&self.0.list
	}

	fn upgrade(weak: &Weak<Inner<D>>) -> Option<Self> {
		weak.upgrade().map(Self)
	}
}
