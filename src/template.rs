//! Row markup.

use crate::model::ItemAttributes;

/// Turns an item's attributes into the inner markup of its row.
///
/// Implementations must be pure: the same attributes always produce the same markup.
pub trait Template {
	fn render(&self, attributes: &ItemAttributes) -> String;
}

impl<F> Template for F
where
	F: Fn(&ItemAttributes) -> String,
{
	fn render(&self, attributes: &ItemAttributes) -> String {
		self(attributes)
	}
}

/// The default row: a toggle checkbox, the title and a destroy button.
///
/// Its controls carry the `toggle` and `destroy` classes that [`AppConfig`](`crate::AppConfig`) selects by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemTemplate;
impl Template for ItemTemplate {
	fn render(&self, attributes: &ItemAttributes) -> String {
		let mut markup = String::from(r#"<div class="view"><input class="toggle" type="checkbox""#);
		if attributes.completed {
			markup.push_str(" checked");
		}
		markup.push_str("><label>");
		escape_into(&mut markup, &attributes.title);
		markup.push_str(r#"</label><button class="destroy"></button></div>"#);
		markup
	}
}

/// Appends `text` to `markup` with HTML special characters replaced by entities.
pub fn escape_into(markup: &mut String, text: &str) {
	for c in text.chars() {
		match c {
			'&' => markup.push_str("&amp;"),
			'<' => markup.push_str("&lt;"),
			'>' => markup.push_str("&gt;"),
			'"' => markup.push_str("&quot;"),
			'\'' => markup.push_str("&#x27;"),
			c => markup.push(c),
		}
	}
}

#[must_use]
pub fn escape(text: &str) -> String {
	let mut escaped = String::with_capacity(text.len());
	escape_into(&mut escaped, text);
	escaped
}
