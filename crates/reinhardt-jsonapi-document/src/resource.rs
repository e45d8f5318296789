//! Resource objects and resource identifiers.
//!
//! These types mirror the JSON:API wire shape member for member. Optional
//! members are `Option` so that absence survives a serde round-trip, and
//! [`IdentifierData::None`] models an explicit `"data": null`, which is a
//! different wire state from the `data` member being absent.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A `{id, type}` pair referencing a resource from a relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceIdentifier {
	/// Resource id. Always a string on the wire.
	pub id: String,
	/// Resource type.
	#[serde(rename = "type")]
	pub kind: String,
}

impl ResourceIdentifier {
	/// Build an identifier from an id and a type.
	pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			kind: kind.into(),
		}
	}
}

/// Resource linkage: the `data` member of a relationship object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdentifierData {
	/// A to-one reference.
	One(ResourceIdentifier),
	/// A to-many reference list.
	Many(Vec<ResourceIdentifier>),
	/// An explicit JSON `null`, the empty to-one linkage.
	None,
}

/// A relationship object.
///
/// `data: None` means the member was absent on the wire;
/// `data: Some(IdentifierData::None)` means it was an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipData {
	/// Resource linkage. A present `"data": null` parses as
	/// [`IdentifierData::None`]; an absent member parses as `None`.
	#[serde(
		default,
		deserialize_with = "explicit_null",
		skip_serializing_if = "Option::is_none"
	)]
	pub data: Option<IdentifierData>,
	/// Relationship-level meta object.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub meta: Option<Map<String, Value>>,
	/// Relationship-level links object.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub links: Option<Map<String, Value>>,
}

impl RelationshipData {
	/// A to-one relationship pointing at `identifier`.
	pub fn one(identifier: ResourceIdentifier) -> Self {
		Self {
			data: Some(IdentifierData::One(identifier)),
			..Default::default()
		}
	}

	/// A to-many relationship pointing at `identifiers`.
	pub fn many(identifiers: Vec<ResourceIdentifier>) -> Self {
		Self {
			data: Some(IdentifierData::Many(identifiers)),
			..Default::default()
		}
	}

	/// The empty to-one relationship, `{"data": null}`.
	pub fn null() -> Self {
		Self {
			data: Some(IdentifierData::None),
			..Default::default()
		}
	}
}

/// One resource in wire form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
	/// Resource id. Absent on resources that have not been assigned one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Resource type.
	#[serde(rename = "type")]
	pub kind: String,
	/// Scalar attribute members.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub attributes: Option<Map<String, Value>>,
	/// Relationship objects keyed by relationship name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub relationships: Option<BTreeMap<String, RelationshipData>>,
	/// Resource-level meta object.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub meta: Option<Map<String, Value>>,
	/// Resource-level links object.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub links: Option<Map<String, Value>>,
}

impl Resource {
	/// An empty resource of the given type.
	pub fn new(kind: impl Into<String>) -> Self {
		Self {
			kind: kind.into(),
			..Default::default()
		}
	}

	/// Set the id.
	pub fn with_id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	/// Set the attributes object.
	pub fn with_attributes(mut self, attributes: Map<String, Value>) -> Self {
		self.attributes = Some(attributes);
		self
	}

	/// Add one relationship object under `name`.
	pub fn with_relationship(mut self, name: impl Into<String>, data: RelationshipData) -> Self {
		self.relationships
			.get_or_insert_with(BTreeMap::new)
			.insert(name.into(), data);
		self
	}

	/// The identifier form of this resource, when it carries an id.
	pub fn identifier(&self) -> Option<ResourceIdentifier> {
		self.id
			.as_ref()
			.map(|id| ResourceIdentifier::new(id.clone(), self.kind.clone()))
	}

	/// One attribute value, when the attributes object carries it.
	pub fn attribute(&self, name: &str) -> Option<&Value> {
		self.attributes.as_ref().and_then(|map| map.get(name))
	}

	/// One relationship object, when the relationships member carries it.
	pub fn relationship(&self, name: &str) -> Option<&RelationshipData> {
		self.relationships.as_ref().and_then(|map| map.get(name))
	}
}

/// Deserializer for optional members whose JSON `null` carries meaning.
///
/// Serde turns a `null` into `Option::None` before the member's type is
/// consulted, which would collapse `{"data": null}` into an absent member.
/// Present members therefore deserialize through the payload type itself, so
/// the `null` lands on its untagged `None` variant. Absent members never
/// reach this function and fall back to the `#[serde(default)]`.
pub(crate) fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
	D: Deserializer<'de>,
	T: Deserialize<'de>,
{
	T::deserialize(deserializer).map(Some)
}
