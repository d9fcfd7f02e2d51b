#![allow(dead_code)]

use todo_dom::{dom::memory::NodeId, start, App, AppConfig, Dom, MemoryDom, ENTER_KEY};

pub struct Page {
	pub dom: MemoryDom,
	pub app: NodeId,
	pub input: NodeId,
	pub list: NodeId,
}

/// `<section id="app"><input id="new-todo"><ul id="todo-list"></ul></section>`
pub fn page() -> Page {
	let dom = MemoryDom::new();
	let app = dom.create_element_with_id("section", "app");
	let input = dom.create_element_with_id("input", "new-todo");
	let list = dom.create_element_with_id("ul", "todo-list");
	dom.append_child(&dom.body(), &app);
	dom.append_child(&app, &input);
	dom.append_child(&app, &list);
	Page { dom, app, input, list }
}

pub fn running() -> (Page, App<MemoryDom>) {
	let page = page();
	let app = start(page.dom.clone(), AppConfig::default()).unwrap();
	(page, app)
}

impl Page {
	pub fn submit(&self, text: &str) {
		self.dom.type_text(self.input, text);
		self.dom.press_key(self.input, ENTER_KEY);
	}

	pub fn rows(&self) -> Vec<NodeId> {
		self.dom.children(self.list)
	}

	/// The label text of each row, in document order.
	pub fn row_titles(&self) -> Vec<String> {
		self.rows().into_iter().map(|row| label(&self.dom.inner_html(row))).collect()
	}

	pub fn completed_flags(&self) -> Vec<bool> {
		self.rows().into_iter().map(|row| self.dom.has_class(row, "completed")).collect()
	}
}

fn label(markup: &str) -> String {
	let start = markup.find("<label>").map_or(0, |i| i + "<label>".len());
	let end = markup[start..].find("</label>").map_or(markup.len(), |i| start + i);
	markup[start..end].to_owned()
}
