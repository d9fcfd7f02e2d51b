//! Runtime configuration.

/// Where the application finds its elements, and how rows are marked up.
///
/// The defaults match the classic to-do page: a `#app` root containing a `#new-todo` input and a `#todo-list` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
	pub root_selector: String,
	/// Looked up inside the root.
	pub input_selector: String,
	/// Looked up inside the root. Rows are appended here.
	pub list_selector: String,
	pub row_tag: String,
	/// Present on a row's root element while its item is completed.
	pub completed_class: String,
	pub toggle_selector: String,
	pub destroy_selector: String,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			root_selector: "#app".to_owned(),
			input_selector: "#new-todo".to_owned(),
			list_selector: "#todo-list".to_owned(),
			row_tag: "li".to_owned(),
			completed_class: "completed".to_owned(),
			toggle_selector: ".toggle".to_owned(),
			destroy_selector: ".destroy".to_owned(),
		}
	}
}
