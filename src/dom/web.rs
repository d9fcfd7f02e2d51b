//! The browser document, through [`web_sys`].

use super::Dom;
use crate::{config::AppConfig, error::SetupError};
use js_sys::Function;
use tracing::{error, info, trace, warn};
use wasm_bindgen::{closure::Closure, prelude::wasm_bindgen, JsCast, JsValue, UnwrapThrowExt};
use web_sys::{Document, Element, EventTarget, HtmlInputElement, KeyboardEvent};

/// A [`Dom`] over a [`web_sys::Document`].
#[derive(Debug, Clone)]
pub struct WebDom {
	document: Document,
}

impl WebDom {
	/// Uses the current window's document.
	///
	/// # Errors
	///
	/// Iff there is no window or it has no document.
	pub fn new() -> Result<Self, SetupError> {
		let document = web_sys::window().and_then(|window| window.document()).ok_or(SetupError::NoDocument)?;
		Ok(Self::from_document(document))
	}

	#[must_use]
	pub fn from_document(document: Document) -> Self {
		Self { document }
	}

	#[must_use]
	pub fn document(&self) -> &Document {
		&self.document
	}
}

/// Removes its event listener when dropped.
///
/// Dropping this while its handler runs is fine: `wasm-bindgen` defers releasing the closure until the call returns.
#[derive(Debug)]
pub struct WebListener {
	target: EventTarget,
	event_type: &'static str,
	closure: Closure<dyn Fn(web_sys::Event)>,
}

impl Drop for WebListener {
	fn drop(&mut self) {
		let function: &Function = self.closure.as_ref().unchecked_ref();
		match self.target.remove_event_listener_with_callback(self.event_type, function) {
			Ok(()) => trace!(event_type = self.event_type, "Removed event listener."),
			Err(error) => error!(event_type = self.event_type, ?error, "Failed to remove event listener."),
		}
	}
}

fn listen(node: &Element, event_type: &'static str, closure: Closure<dyn Fn(web_sys::Event)>) -> WebListener {
	let target: EventTarget = node.clone().into();
	let function: &Function = closure.as_ref().unchecked_ref();
	if let Err(error) = target.add_event_listener_with_callback(event_type, function) {
		error!(event_type, ?error, "Failed to add event listener.");
	}
	WebListener { target, event_type, closure }
}

impl Dom for WebDom {
	type Node = Element;
	type Listener = WebListener;

	fn query_selector(&self, scope: Option<&Element>, selector: &str) -> Option<Element> {
		let found = match scope {
			Some(scope) => scope.query_selector(selector),
			None => self.document.query_selector(selector),
		};
		found.unwrap_or_else(|error| {
			error!(selector, ?error, "Invalid selector.");
			None
		})
	}

	fn create_element(&self, tag: &str) -> Element {
		self.document.create_element(tag).expect_throw("todo-dom: Failed to create element.")
	}

	fn set_inner_html(&self, node: &Element, markup: &str) {
		node.set_inner_html(markup);
	}

	fn set_class(&self, node: &Element, class: &str, present: bool) {
		if let Err(error) = node.class_list().toggle_with_force(class, present) {
			error!(class, ?error, "Failed to update class list.");
		}
	}

	fn append_child(&self, parent: &Element, child: &Element) {
		if let Err(error) = parent.append_child(child) {
			error!(?error, "Failed to append child.");
		}
	}

	fn remove(&self, node: &Element) {
		node.remove();
	}

	fn value(&self, input: &Element) -> String {
		match input.dyn_ref::<HtmlInputElement>() {
			Some(input) => input.value(),
			None => {
				warn!(tag = %input.tag_name(), "Expected <input>. Treating its value as empty.");
				String::new()
			}
		}
	}

	fn set_value(&self, input: &Element, value: &str) {
		match input.dyn_ref::<HtmlInputElement>() {
			Some(input) => input.set_value(value),
			None => warn!(tag = %input.tag_name(), "Expected <input>. Not setting its value."),
		}
	}

	fn on_key_press(&self, node: &Element, handler: Box<dyn Fn(&str)>) -> WebListener {
		let closure = Closure::wrap(Box::new(move |event: web_sys::Event| match event.dyn_ref::<KeyboardEvent>() {
			Some(event) => handler(&event.key()),
			None => warn!("Expected KeyboardEvent for keypress."),
		}) as Box<dyn Fn(web_sys::Event)>);
		listen(node, "keypress", closure)
	}

	fn on_click(&self, node: &Element, selector: &str, handler: Box<dyn Fn()>) -> WebListener {
		let root: web_sys::Node = node.clone().into();
		let selector = selector.to_owned();
		let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
			let target = match event.target().and_then(|target| target.dyn_into::<Element>().ok()) {
				Some(target) => target,
				None => return,
			};
			match target.closest(&selector) {
				Ok(Some(control)) => {
					let control: &web_sys::Node = &control;
					if root.contains(Some(control)) {
						handler();
					}
				}
				Ok(None) => (),
				Err(error) => error!(selector = %selector, ?error, "Invalid delegation selector."),
			}
		}) as Box<dyn Fn(web_sys::Event)>);
		listen(node, "click", closure)
	}
}

/// Starts the to-do application on the current page with the default [`AppConfig`] and keeps it running.
///
/// # Errors
///
/// Iff the page lacks the `#app`, `#new-todo` or `#todo-list` elements.
#[wasm_bindgen]
pub fn run() -> Result<(), JsValue> {
	let dom = WebDom::new()?;
	info!("Starting.");
	crate::start(dom, AppConfig::default())?.forget();
	Ok(())
}
