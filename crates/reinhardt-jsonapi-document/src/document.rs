//! Top-level document envelope.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ErrorObject;
use crate::resource::{Resource, explicit_null};

/// Primary data of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
	/// A single resource.
	One(Resource),
	/// A resource collection.
	Many(Vec<Resource>),
	/// An explicit JSON `null`, the empty to-one response.
	None,
}

/// A JSON:API document.
///
/// Every member is optional on the wire. Error documents carry `errors`
/// instead of `data`; this type does not enforce the exclusion, it carries
/// whatever the peer sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
	/// Primary data. A present `"data": null` parses as
	/// [`PrimaryData::None`]; an absent member parses as `None`.
	#[serde(
		default,
		deserialize_with = "explicit_null",
		skip_serializing_if = "Option::is_none"
	)]
	pub data: Option<PrimaryData>,
	/// Side-loaded resources referenced from the primary data.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub included: Option<Vec<Resource>>,
	/// Document-level meta object.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub meta: Option<Map<String, Value>>,
	/// Document-level links object.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub links: Option<Map<String, Value>>,
	/// Error objects.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub errors: Option<Vec<ErrorObject>>,
}

impl Document {
	/// A document holding one primary resource.
	pub fn single(resource: Resource) -> Self {
		Self {
			data: Some(PrimaryData::One(resource)),
			..Default::default()
		}
	}

	/// A document holding a resource collection.
	pub fn collection(resources: Vec<Resource>) -> Self {
		Self {
			data: Some(PrimaryData::Many(resources)),
			..Default::default()
		}
	}

	/// A document whose primary data is an explicit `null`.
	pub fn empty() -> Self {
		Self {
			data: Some(PrimaryData::None),
			..Default::default()
		}
	}

	/// A document carrying only errors.
	pub fn from_errors(errors: Vec<ErrorObject>) -> Self {
		Self {
			errors: Some(errors),
			..Default::default()
		}
	}

	/// Attach side-loaded resources.
	pub fn with_included(mut self, included: Vec<Resource>) -> Self {
		self.included = Some(included);
		self
	}

	/// Attach a document-level meta object.
	pub fn with_meta(mut self, meta: Map<String, Value>) -> Self {
		self.meta = Some(meta);
		self
	}

	/// The side-loaded resources, empty when the member is absent.
	pub fn included_resources(&self) -> &[Resource] {
		self.included.as_deref().unwrap_or(&[])
	}

	/// Whether the document carries at least one error object.
	pub fn has_errors(&self) -> bool {
		self.errors.as_ref().is_some_and(|errors| !errors.is_empty())
	}
}
