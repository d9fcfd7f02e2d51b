//! A headless document.
//!
//! [`MemoryDom`] keeps a tree of elements with ids, classes, inner markup and input values,
//! and simulates the gestures the application reacts to ([`MemoryDom::type_text`], [`MemoryDom::press_key`] and [`MemoryDom::click`]).
//! Inner markup is stored as text and not parsed into child nodes.
//!
//! Selectors are limited to a single `#id`, `.class` or tag name.

use super::Dom;
use core::{
	cell::RefCell,
	fmt::{self, Debug, Formatter},
};
use std::rc::{Rc, Weak};
use tracing::{trace, warn};

/// An element in a [`MemoryDom`]. Only meaningful for the document that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

const BODY: NodeId = NodeId(0);

enum Binding {
	KeyPress(Rc<dyn Fn(&str)>),
	Click { selector: String, handler: Rc<dyn Fn()> },
}

struct NodeData {
	tag: String,
	id: Option<String>,
	classes: Vec<String>,
	inner_html: String,
	value: String,
	parent: Option<NodeId>,
	children: Vec<NodeId>,
	bindings: Vec<(u64, Binding)>,
}
impl NodeData {
	fn new(tag: &str) -> Self {
		Self {
			tag: tag.to_ascii_lowercase(),
			id: None,
			classes: Vec::new(),
			inner_html: String::new(),
			value: String::new(),
			parent: None,
			children: Vec::new(),
			bindings: Vec::new(),
		}
	}

	fn matches(&self, selector: &str) -> bool {
		if let Some(id) = selector.strip_prefix('#') {
			self.id.as_deref() == Some(id)
		} else if let Some(class) = selector.strip_prefix('.') {
			self.classes.iter().any(|c| c == class)
		} else {
			self.tag.eq_ignore_ascii_case(selector)
		}
	}
}

struct Document {
	nodes: Vec<NodeData>,
	next_binding: u64,
}
impl Document {
	fn node(&self, node: NodeId) -> &NodeData {
		&self.nodes[node.0]
	}

	fn node_mut(&mut self, node: NodeId) -> &mut NodeData {
		&mut self.nodes[node.0]
	}

	fn find(&self, scope: NodeId, selector: &str) -> Option<NodeId> {
		for &child in &self.node(scope).children {
			if self.node(child).matches(selector) {
				return Some(child);
			}
			if let Some(found) = self.find(child, selector) {
				return Some(found);
			}
		}
		None
	}

	fn detach(&mut self, node: NodeId) {
		if let Some(parent) = self.node_mut(node).parent.take() {
			self.node_mut(parent).children.retain(|&child| child != node);
		}
	}

	/// `node` followed by its ancestors.
	fn path(&self, node: NodeId) -> Vec<NodeId> {
		let mut path = vec![node];
		let mut current = node;
		while let Some(parent) = self.node(current).parent {
			path.push(parent);
			current = parent;
		}
		path
	}

	fn is_attached(&self, node: NodeId) -> bool {
		self.path(node).last() == Some(&BODY)
	}
}

/// An in-memory document with a `body` element at its root. Clones share the document.
#[derive(Clone)]
pub struct MemoryDom(Rc<RefCell<Document>>);

impl Default for MemoryDom {
	fn default() -> Self {
		Self::new()
	}
}

impl Debug for MemoryDom {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemoryDom").field("nodes", &self.0.borrow().nodes.len()).finish()
	}
}

impl MemoryDom {
	#[must_use]
	pub fn new() -> Self {
		Self(Rc::new(RefCell::new(Document {
			nodes: vec![NodeData::new("body")],
			next_binding: 0,
		})))
	}

	#[must_use]
	pub fn body(&self) -> NodeId {
		BODY
	}

	/// Creates a detached element with the given `id` attribute.
	#[must_use]
	pub fn create_element_with_id(&self, tag: &str, id: &str) -> NodeId {
		let node = self.create_element(tag);
		self.0.borrow_mut().node_mut(node).id = Some(id.to_owned());
		node
	}

	#[must_use]
	pub fn tag(&self, node: NodeId) -> String {
		self.0.borrow().node(node).tag.clone()
	}

	#[must_use]
	pub fn children(&self, node: NodeId) -> Vec<NodeId> {
		self.0.borrow().node(node).children.clone()
	}

	#[must_use]
	pub fn inner_html(&self, node: NodeId) -> String {
		self.0.borrow().node(node).inner_html.clone()
	}

	#[must_use]
	pub fn has_class(&self, node: NodeId, class: &str) -> bool {
		self.0.borrow().node(node).classes.iter().any(|c| c == class)
	}

	/// Whether `node` is (transitively) a child of the body.
	#[must_use]
	pub fn is_attached(&self, node: NodeId) -> bool {
		self.0.borrow().is_attached(node)
	}

	/// Number of handlers bound directly on `node`.
	#[must_use]
	pub fn listener_count(&self, node: NodeId) -> usize {
		self.0.borrow().node(node).bindings.len()
	}

	/// Replaces the text of an input element, as typing would.
	pub fn type_text(&self, input: NodeId, text: &str) {
		self.set_value(&input, text);
	}

	/// Dispatches a key press to `node`, bubbling through its ancestors.
	pub fn press_key(&self, node: NodeId, key: &str) {
		let handlers: Vec<Rc<dyn Fn(&str)>> = {
			let document = self.0.borrow();
			let handlers = document
				.path(node)
				.into_iter()
				.flat_map(|n| document.node(n).bindings.iter())
				.filter_map(|(_, binding)| match binding {
					Binding::KeyPress(handler) => Some(Rc::clone(handler)),
					Binding::Click { .. } => None,
				})
				.collect();
			handlers
		};
		trace!(?node, key, handlers = handlers.len(), "Pressing key.");
		for handler in handlers {
			handler(key);
		}
	}

	/// Clicks the control matching `selector` inside `node`'s markup.
	///
	/// The click is delivered to delegated handlers on `node` and its ancestors that were bound for `selector`.
	/// Returns `false` without dispatching if `node` is detached or its markup has no such control.
	pub fn click(&self, node: NodeId, selector: &str) -> bool {
		let handlers: Vec<Rc<dyn Fn()>> = {
			let document = self.0.borrow();
			if !document.is_attached(node) {
				trace!(?node, selector, "Not clicking a detached node.");
				return false;
			}
			if !markup_contains(&document.node(node).inner_html, selector) {
				warn!(?node, selector, "No such control in the node's markup.");
				return false;
			}
			let handlers = document
				.path(node)
				.into_iter()
				.flat_map(|n| document.node(n).bindings.iter())
				.filter_map(|(_, binding)| match binding {
					Binding::Click { selector: s, handler } if s == selector => Some(Rc::clone(handler)),
					_ => None,
				})
				.collect();
			handlers
		};
		trace!(?node, selector, handlers = handlers.len(), "Clicking.");
		for handler in handlers {
			handler();
		}
		true
	}

	fn bind(&self, node: NodeId, binding: Binding) -> MemoryListener {
		let mut document = self.0.borrow_mut();
		let key = document.next_binding;
		document.next_binding += 1;
		document.node_mut(node).bindings.push((key, binding));
		MemoryListener {
			document: Rc::downgrade(&self.0),
			node,
			key,
		}
	}
}

/// Whether `markup` contains an element matching a single `.class`, `#id` or tag `selector`.
fn markup_contains(markup: &str, selector: &str) -> bool {
	fn attribute_values<'a>(markup: &'a str, name: &str) -> Vec<&'a str> {
		let pattern = format!("{}=\"", name);
		markup
			.match_indices(pattern.as_str())
			.filter(|&(i, _)| i == 0 || markup[..i].ends_with(char::is_whitespace))
			.filter_map(|(i, m)| {
				let rest = &markup[i + m.len()..];
				rest.find('"').map(|end| &rest[..end])
			})
			.collect()
	}

	if let Some(class) = selector.strip_prefix('.') {
		attribute_values(markup, "class").into_iter().any(|classes| classes.split_whitespace().any(|c| c == class))
	} else if let Some(id) = selector.strip_prefix('#') {
		attribute_values(markup, "id").into_iter().any(|value| value == id)
	} else {
		markup.to_ascii_lowercase().contains(&format!("<{}", selector.to_ascii_lowercase()))
	}
}

impl Dom for MemoryDom {
	type Node = NodeId;
	type Listener = MemoryListener;

	fn query_selector(&self, scope: Option<&NodeId>, selector: &str) -> Option<NodeId> {
		self.0.borrow().find(scope.copied().unwrap_or(BODY), selector)
	}

	fn create_element(&self, tag: &str) -> NodeId {
		let mut document = self.0.borrow_mut();
		document.nodes.push(NodeData::new(tag));
		NodeId(document.nodes.len() - 1)
	}

	fn set_inner_html(&self, node: &NodeId, markup: &str) {
		self.0.borrow_mut().node_mut(*node).inner_html = markup.to_owned();
	}

	fn set_class(&self, node: &NodeId, class: &str, present: bool) {
		let mut document = self.0.borrow_mut();
		let classes = &mut document.node_mut(*node).classes;
		let position = classes.iter().position(|c| c == class);
		match (present, position) {
			(true, None) => classes.push(class.to_owned()),
			(false, Some(i)) => {
				classes.remove(i);
			}
			_ => (),
		}
	}

	fn append_child(&self, parent: &NodeId, child: &NodeId) {
		let mut document = self.0.borrow_mut();
		document.detach(*child);
		document.node_mut(*child).parent = Some(*parent);
		document.node_mut(*parent).children.push(*child);
	}

	fn remove(&self, node: &NodeId) {
		self.0.borrow_mut().detach(*node);
	}

	fn value(&self, input: &NodeId) -> String {
		self.0.borrow().node(*input).value.clone()
	}

	fn set_value(&self, input: &NodeId, value: &str) {
		self.0.borrow_mut().node_mut(*input).value = value.to_owned();
	}

	fn on_key_press(&self, node: &NodeId, handler: Box<dyn Fn(&str)>) -> MemoryListener {
		self.bind(*node, Binding::KeyPress(handler.into()))
	}

	fn on_click(&self, node: &NodeId, selector: &str, handler: Box<dyn Fn()>) -> MemoryListener {
		self.bind(
			*node,
			Binding::Click {
				selector: selector.to_owned(),
				handler: handler.into(),
			},
		)
	}
}

/// Unbinds its handler from the [`MemoryDom`] when dropped.
pub struct MemoryListener {
	document: Weak<RefCell<Document>>,
	node: NodeId,
	key: u64,
}

impl Debug for MemoryListener {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemoryListener").field("node", &self.node).field("key", &self.key).finish()
	}
}

impl Drop for MemoryListener {
	fn drop(&mut self) {
		if let Some(document) = self.document.upgrade() {
			let removed = {
				let mut document = document.borrow_mut();
				let bindings = &mut document.node_mut(self.node).bindings;
				bindings.iter().position(|&(k, _)| k == self.key).map(|i| bindings.remove(i))
			};
			drop(removed);
			trace!(node = ?self.node, key = self.key, "Unbound listener.");
		}
	}
}
