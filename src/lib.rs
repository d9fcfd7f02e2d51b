#![doc(html_root_url = "https://docs.rs/todo-dom/0.0.1")]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod collection;
mod config;
pub mod dom;
mod error;
pub mod item_view;
pub mod list_view;
pub mod model;
pub mod observer;
pub mod template;

pub use collection::{ItemList, ListEvent};
pub use config::AppConfig;
pub use dom::{memory::MemoryDom, web::WebDom, Dom, ENTER_KEY};
pub use error::SetupError;
pub use item_view::{ItemView, ViewState};
pub use list_view::ListView;
pub use model::{Item, ItemAttributes, ItemChange, ItemEvent, ItemId, ItemPatch};
pub use template::{ItemTemplate, Template};

use tracing::instrument;

/// A running application. Dropping it unbinds all of its handlers.
#[derive(Debug)]
pub struct App<D: Dom> {
	list_view: ListView<D>,
}

impl<D: Dom> App<D> {
	#[must_use]
	pub fn list_view(&self) -> &ListView<D> {
		&self.list_view
	}

	#[must_use]
	pub fn items(&self) -> &ItemList {
		self.list_view.items()
	}

	/// Keeps the application running for the rest of the page's lifetime.
	pub fn forget(self) {
		core::mem::forget(self);
	}
}

/// Sets up the application on `dom`'s existing elements.
///
/// # Errors
///
/// Iff `dom` lacks one of the elements named in `config`.
#[instrument(skip(dom))]
pub fn start<D: Dom>(dom: D, config: AppConfig) -> Result<App<D>, SetupError> {
	Ok(App {
		list_view: ListView::new(dom, config)?,
	})
}
