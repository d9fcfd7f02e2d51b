//! The document operations the views need, implemented for the browser ([`web`]) and in memory ([`memory`]).

pub mod memory;
pub mod web;

/// [***KeyboardEvent.key***](https://developer.mozilla.org/en-US/docs/Web/API/KeyboardEvent/key) of the Enter/Return key.
pub const ENTER_KEY: &str = "Enter";

/// A document that rows can be rendered into.
///
/// All calls happen on the thread that owns the document, and handlers run to completion one at a time.
pub trait Dom: Clone + 'static {
	type Node: Clone + 'static;
	/// Keeps an event handler bound. Dropping it unbinds the handler.
	type Listener: 'static;

	/// Finds the first element matching `selector` within `scope`, or within the whole document if `scope` is [`None`].
	fn query_selector(&self, scope: Option<&Self::Node>, selector: &str) -> Option<Self::Node>;
	/// Creates a detached element.
	fn create_element(&self, tag: &str) -> Self::Node;
	fn set_inner_html(&self, node: &Self::Node, markup: &str);
	/// Adds `class` to or removes it from `node`'s class list.
	fn set_class(&self, node: &Self::Node, class: &str, present: bool);
	fn append_child(&self, parent: &Self::Node, child: &Self::Node);
	/// Detaches `node` from its parent.
	fn remove(&self, node: &Self::Node);
	/// The current text of an input element.
	fn value(&self, input: &Self::Node) -> String;
	fn set_value(&self, input: &Self::Node, value: &str);
	/// Calls `handler` with the key name of each key press on `node`.
	fn on_key_press(&self, node: &Self::Node, handler: Box<dyn Fn(&str)>) -> Self::Listener;
	/// Calls `handler` for each click on a descendant of `node` that matches `selector`.
	fn on_click(&self, node: &Self::Node, selector: &str, handler: Box<dyn Fn()>) -> Self::Listener;
}
