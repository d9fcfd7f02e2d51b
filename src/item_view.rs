//! One rendered row per [`Item`].

use crate::{config::AppConfig, dom::Dom, model::Item, observer::Subscription, template::Template};
use core::{
	cell::{Cell, RefCell},
	fmt::{self, Debug, Formatter},
};
use std::rc::{Rc, Weak};
use tracing::{debug, instrument, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
	/// Subscribed to the item and present in the document once appended.
	Mounted,
	/// Terminal: detached, with all subscriptions and listeners released.
	Removed,
}

/// Renders one [`Item`] into its own root element and relays row gestures back onto the item.
///
/// The view re-renders on every change of its item and removes itself when the item is destroyed.
/// Gesture handlers never touch the document directly: they only mutate the item.
pub struct ItemView<D: Dom>(Rc<Inner<D>>);

struct Inner<D: Dom> {
	dom: D,
	item: Item,
	root: D::Node,
	template: Rc<dyn Template>,
	completed_class: String,
	state: Cell<ViewState>,
	bindings: RefCell<Option<Bindings<D>>>,
}

struct Bindings<D: Dom> {
	_changed: Subscription,
	_destroyed: Subscription,
	_toggle: D::Listener,
	_delete: D::Listener,
}

impl<D: Dom> Clone for ItemView<D> {
	fn clone(&self) -> Self {
		Self(Rc::clone(&self.0))
	}
}

impl<D: Dom> Debug for ItemView<D> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("ItemView").field("item", &self.0.item).field("state", &self.0.state.get()).finish()
	}
}

impl<D: Dom> ItemView<D> {
	/// Creates the row's root element and binds the view to `item`.
	///
	/// The row stays empty until [`ItemView::render`] is called and detached until the caller appends [`ItemView::root`].
	#[instrument(skip(dom, item, template, config), fields(item = %item.id()))]
	pub fn new(dom: D, item: Item, template: Rc<dyn Template>, config: &AppConfig) -> Self {
		let root = dom.create_element(&config.row_tag);
		let view = Self(Rc::new(Inner {
			dom,
			item,
			root,
			template,
			completed_class: config.completed_class.clone(),
			state: Cell::new(ViewState::Mounted),
			bindings: RefCell::new(None),
		}));

		if view.0.item.is_destroyed() {
			debug!("Item is already destroyed. The view starts out removed.");
			view.0.state.set(ViewState::Removed);
			return view;
		}

		let weak = Rc::downgrade(&view.0);
		let bindings = Bindings {
			_changed: view.0.item.on_change({
				let weak = Weak::clone(&weak);
				move |_| {
					if let Some(view) = Self::upgrade(&weak) {
						view.render();
					}
				}
			}),
			_destroyed: view.0.item.on_destroy({
				let weak = Weak::clone(&weak);
				move || {
					if let Some(view) = Self::upgrade(&weak) {
						view.remove();
					}
				}
			}),
			_toggle: view.0.dom.on_click(&view.0.root, &config.toggle_selector, {
				let weak = Weak::clone(&weak);
				Box::new(move || {
					if let Some(view) = Self::upgrade(&weak) {
						view.handle_toggle_gesture();
					}
				})
			}),
			_delete: view.0.dom.on_click(
				&view.0.root,
				&config.destroy_selector,
				Box::new(move || {
					if let Some(view) = Self::upgrade(&weak) {
						view.handle_delete_gesture();
					}
				}),
			),
		};
		*view.0.bindings.borrow_mut() = Some(bindings);
		view
	}

	/// Regenerates the row from the item's current attributes.
	///
	/// Idempotent. Rendering a removed view does nothing.
	pub fn render(&self) -> &Self {
		if self.state() == ViewState::Removed {
			trace!(item = %self.0.item.id(), "Skipped rendering a removed view.");
			return self;
		}

		let attributes = self.0.item.attributes();
		let markup = self.0.template.render(&attributes);
		self.0.dom.set_inner_html(&self.0.root, &markup);
		self.0.dom.set_class(&self.0.root, &self.0.completed_class, attributes.completed);
		trace!(item = %self.0.item.id(), completed = attributes.completed, "Rendered.");
		self
	}

	pub fn handle_toggle_gesture(&self) {
		self.0.item.toggle();
	}

	pub fn handle_delete_gesture(&self) {
		self.0.item.destroy();
	}

	/// Detaches the row and releases the view's subscriptions and listeners.
	///
	/// Called when the item is destroyed. Repeated calls do nothing.
	pub fn remove(&self) {
		if self.0.state.replace(ViewState::Removed) == ViewState::Removed {
			return;
		}
		self.0.dom.remove(&self.0.root);
		let bindings = self.0.bindings.borrow_mut().take();
		drop(bindings);
		debug!(item = %self.0.item.id(), "Removed view.");
	}

	#[must_use]
	pub fn root(&self) -> &D::Node {
		&self.0.root
	}

	#[must_use]
	pub fn item(&self) -> &Item {
		&self.0.item
	}

	#[must_use]
	pub fn state(&self) -> ViewState {
		self.0.state.get()
	}

	fn upgrade(weak: &Weak<Inner<D>>) -> Option<Self> {
		weak.upgrade().map(Self)
	}
}
