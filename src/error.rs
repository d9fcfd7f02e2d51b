//! Setup errors.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// The document does not satisfy the application's expectations at setup time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
	#[error("No document is available.")]
	NoDocument,
	#[error("Missing {role} element `{selector}`.")]
	MissingElement { role: &'static str, selector: String },
}

impl From<SetupError> for JsValue {
	fn from(error: SetupError) -> Self {
		JsValue::from_str(&error.to_string())
	}
}
