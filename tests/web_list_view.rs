#![cfg(target_arch = "wasm32")]

use std::sync::Once;
use todo_dom::{start, App, AppConfig, WebDom};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{window, Document, Element, HtmlElement, HtmlInputElement, KeyboardEvent, KeyboardEventInit};

wasm_bindgen_test_configure!(run_in_browser);

static LOG_INITIALIZED: Once = Once::new();

fn document() -> Document {
	window().unwrap().document().unwrap()
}

fn app() -> App<WebDom> {
	LOG_INITIALIZED.call_once(tracing_wasm::set_as_global_default);

	document()
		.body()
		.unwrap()
		.set_inner_html(r#"<section id="app"><input id="new-todo"><ul id="todo-list"></ul></section>"#);
	start(WebDom::new().unwrap(), AppConfig::default()).unwrap()
}

fn element(selector: &str) -> Element {
	document().query_selector(selector).unwrap().unwrap()
}

fn submit(text: &str, key: &str) {
	let input: HtmlInputElement = element("#new-todo").dyn_into().unwrap();
	input.set_value(text);

	let init = KeyboardEventInit::new();
	init.set_key(key);
	let event = KeyboardEvent::new_with_keyboard_event_init_dict("keypress", &init).unwrap();
	input.dispatch_event(&event).unwrap();
}

fn click(selector: &str) {
	element(selector).dyn_into::<HtmlElement>().unwrap().click();
}

fn row_count() -> u32 {
	element("#todo-list").child_element_count()
}

#[wasm_bindgen_test]
fn enter_adds_a_row() {
	let app = app();

	submit("  Buy milk ", "Enter");

	assert_eq!(row_count(), 1);
	assert_eq!(element("#todo-list li label").text_content().unwrap(), "Buy milk");
	assert_eq!(element("#new-todo").dyn_into::<HtmlInputElement>().unwrap().value(), "");
	assert_eq!(app.items().titles(), ["Buy milk"]);
}

#[wasm_bindgen_test]
fn blank_input_and_other_keys_are_ignored() {
	let app = app();

	submit("   ", "Enter");
	submit("Buy milk", "a");

	assert_eq!(row_count(), 0);
	assert!(app.items().is_empty());
}

#[wasm_bindgen_test]
fn toggle_and_delete() {
	let app = app();
	submit("Buy milk", "Enter");

	click("#todo-list li .toggle");
	assert!(element("#todo-list li").class_list().contains("completed"));

	click("#todo-list li .toggle");
	assert!(!element("#todo-list li").class_list().contains("completed"));

	click("#todo-list li .destroy");
	assert_eq!(row_count(), 0);
	assert!(app.items().is_empty());
}

#[wasm_bindgen_test]
fn rows_follow_submission_order() {
	let app = app();
	submit("A", "Enter");
	submit("B", "Enter");

	click("#todo-list li:first-child .destroy");

	assert_eq!(row_count(), 1);
	assert_eq!(element("#todo-list li label").text_content().unwrap(), "B");
	assert_eq!(app.items().titles(), ["B"]);
}
