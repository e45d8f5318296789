//! Error objects and error collection.
//!
//! Peers report failures as an `errors` array of error objects. The
//! [`collect_errors`] helper folds that array into a map keyed the way form
//! layers address fields: by the last segment of each error's
//! `source.pointer`, falling back to the error's position in the array.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::Document;

/// Reference to the source of an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSource {
	/// JSON pointer to the offending document member.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pointer: Option<String>,
	/// Name of the offending query parameter.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parameter: Option<String>,
}

/// One member of a document's `errors` array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
	/// Unique identifier for this occurrence.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// HTTP status code as a string.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status: Option<String>,
	/// Application-specific error code.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub code: Option<String>,
	/// Short, occurrence-independent summary.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	/// Occurrence-specific explanation.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub detail: Option<String>,
	/// Where in the request the error originated.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub source: Option<ErrorSource>,
	/// Error-level meta object.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub meta: Option<Map<String, Value>>,
	/// Error-level links object.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub links: Option<Map<String, Value>>,
}

impl ErrorObject {
	/// An error carrying a title and a detail message.
	pub fn new(title: impl Into<String>, detail: impl Into<String>) -> Self {
		Self {
			title: Some(title.into()),
			detail: Some(detail.into()),
			..Default::default()
		}
	}

	/// Attach a `source.pointer` reference.
	pub fn with_pointer(mut self, pointer: impl Into<String>) -> Self {
		self.source = Some(ErrorSource {
			pointer: Some(pointer.into()),
			parameter: None,
		});
		self
	}
}

/// Collect a document's errors into a map keyed by source member.
///
/// An error with `source.pointer` lands under the pointer's last segment,
/// so `/data/attributes/first-name` keys as `first-name`. Errors without a
/// usable pointer key by their array position. Later errors overwrite
/// earlier ones under the same key.
pub fn collect_errors(document: &Document) -> BTreeMap<String, ErrorObject> {
	let mut collected = BTreeMap::new();
	let Some(errors) = &document.errors else {
		return collected;
	};
	for (index, error) in errors.iter().enumerate() {
		let key = error
			.source
			.as_ref()
			.and_then(|source| source.pointer.as_deref())
			.and_then(pointer_field)
			.unwrap_or_else(|| index.to_string());
		collected.insert(key, error.clone());
	}
	collected
}

/// Last non-empty segment of a JSON pointer.
fn pointer_field(pointer: &str) -> Option<String> {
	pointer
		.rsplit('/')
		.find(|segment| !segment.is_empty())
		.map(str::to_string)
}
