mod common;

use common::running;
use todo_dom::{Dom, Item, ItemAttributes, ViewState};

#[test]
fn submitting_appends_one_item_and_one_row() {
	let (page, app) = running();

	page.submit("Buy milk");

	let items = app.items().items();
	assert_eq!(items.len(), 1);
	assert_eq!(items[0].title(), "Buy milk");
	assert!(!items[0].is_completed());
	assert_eq!(page.row_titles(), ["Buy milk"]);
	assert_eq!(page.dom.value(&page.input), "");
}

#[test]
fn submitted_text_is_trimmed() {
	let (page, app) = running();

	page.submit("  Walk the dog\t");

	assert_eq!(app.items().titles(), ["Walk the dog"]);
	assert_eq!(page.row_titles(), ["Walk the dog"]);
}

#[test]
fn rows_follow_submission_order() {
	let (page, app) = running();

	for title in ["A", "B", "C"] {
		page.submit(title);
	}

	assert_eq!(app.items().titles(), ["A", "B", "C"]);
	assert_eq!(page.row_titles(), ["A", "B", "C"]);
	assert_eq!(app.list_view().view_count(), 3);
}

#[test]
fn blank_submissions_are_ignored() {
	let (page, app) = running();

	for blank in ["", " ", "  \t\n "] {
		page.submit(blank);
	}

	assert!(app.items().is_empty());
	assert!(page.rows().is_empty());
	assert_eq!(page.dom.value(&page.input), "  \t\n ", "The input keeps ignored text.");
}

#[test]
fn other_keys_are_ignored() {
	let (page, app) = running();

	page.dom.type_text(page.input, "Buy milk");
	for key in ["a", "Tab", "Escape", "enter", " "] {
		page.dom.press_key(page.input, key);
	}

	assert!(app.items().is_empty());
	assert!(page.rows().is_empty());
	assert_eq!(page.dom.value(&page.input), "Buy milk");
}

#[test]
fn toggling_flips_only_that_row() {
	let (page, _app) = running();
	page.submit("A");
	page.submit("B");
	page.submit("C");
	let rows = page.rows();

	assert!(page.dom.click(rows[1], ".toggle"));
	assert_eq!(page.completed_flags(), [false, true, false]);
	assert!(page.dom.inner_html(rows[1]).contains("checked"));

	assert!(page.dom.click(rows[1], ".toggle"));
	assert_eq!(page.completed_flags(), [false, false, false]);
	assert!(!page.dom.inner_html(rows[1]).contains("checked"));
}

#[test]
fn deleting_removes_exactly_that_row_and_item() {
	let (page, app) = running();
	for title in ["A", "B", "C"] {
		page.submit(title);
	}
	let ids: Vec<_> = app.items().items().iter().map(Item::id).collect();
	let rows = page.rows();

	assert!(page.dom.click(rows[1], ".destroy"));

	assert_eq!(page.rows(), [rows[0], rows[2]]);
	assert_eq!(page.row_titles(), ["A", "C"]);
	assert_eq!(app.items().items().iter().map(Item::id).collect::<Vec<_>>(), [ids[0], ids[2]]);
	assert_eq!(app.list_view().view_count(), 2);
	assert!(app.list_view().view(ids[1]).is_none());
	assert!(!page.dom.is_attached(rows[1]));
}

#[test]
fn buy_milk_scenario() {
	let (page, app) = running();

	page.submit("Buy milk");
	assert_eq!(page.row_titles(), ["Buy milk"]);
	assert_eq!(page.completed_flags(), [false]);

	page.submit("  ");
	assert_eq!(page.rows().len(), 1);

	let row = page.rows()[0];
	page.dom.click(row, ".toggle");
	assert_eq!(page.completed_flags(), [true]);

	page.dom.click(row, ".toggle");
	assert_eq!(page.completed_flags(), [false]);

	page.dom.click(row, ".destroy");
	assert!(page.rows().is_empty());
	assert!(app.items().is_empty());
}

#[test]
fn delete_first_of_two_scenario() {
	let (page, app) = running();

	page.submit("A");
	page.submit("B");
	assert_eq!(page.row_titles(), ["A", "B"]);

	let first = page.rows()[0];
	page.dom.click(first, ".destroy");

	assert_eq!(page.row_titles(), ["B"]);
	assert_eq!(app.items().titles(), ["B"]);
}

#[test]
fn items_added_directly_get_rows_too() {
	let (page, app) = running();

	let item = app.items().add(ItemAttributes::new("From code"));

	assert_eq!(page.row_titles(), ["From code"]);
	let view = app.list_view().view(item.id()).unwrap();
	assert_eq!(view.root(), &page.rows()[0]);
	assert_eq!(view.state(), ViewState::Mounted);
}

#[test]
fn adding_a_mounted_item_again_does_not_duplicate_its_row() {
	let (page, app) = running();
	page.submit("Once");
	let item = app.items().items()[0].clone();

	app.list_view().add_one(&item);

	assert_eq!(page.rows().len(), 1);
	assert_eq!(app.list_view().view_count(), 1);
}

#[test]
fn destroyed_items_get_no_row() {
	let (page, app) = running();
	let item = Item::new(ItemAttributes::new("Gone"));
	item.destroy();

	app.list_view().add_one(&item);

	assert!(page.rows().is_empty());
	assert_eq!(app.list_view().view_count(), 0);
	assert!(app.list_view().view(item.id()).is_none());
}

#[test]
fn items_outside_the_list_get_no_row() {
	let (page, app) = running();
	let stranger = Item::new(ItemAttributes::new("Elsewhere"));

	app.list_view().add_one(&stranger);
	assert!(page.rows().is_empty());
	assert_eq!(app.list_view().view_count(), app.items().len());

	stranger.destroy();
	assert!(page.rows().is_empty());
	assert_eq!(app.list_view().view_count(), app.items().len());
	assert_eq!(stranger.subscriber_count(), 0);
}

#[test]
fn destroying_from_code_removes_the_row() {
	let (page, app) = running();
	page.submit("A");
	page.submit("B");

	let b = app.items().items()[1].clone();
	b.destroy();

	assert_eq!(page.row_titles(), ["A"]);
	assert!(b.is_destroyed());
}

#[test]
fn views_are_listed_in_item_order() {
	let (page, app) = running();
	page.submit("A");
	page.submit("B");

	let titles: Vec<_> = app.list_view().views().iter().map(|view| view.item().title()).collect();
	assert_eq!(titles, ["A", "B"]);
}

#[test]
fn dropping_the_app_unbinds_the_input() {
	let (page, app) = running();
	assert_eq!(page.dom.listener_count(page.input), 1);

	drop(app);

	assert_eq!(page.dom.listener_count(page.input), 0);
	page.submit("Too late");
	assert!(page.rows().is_empty());
}
