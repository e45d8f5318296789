//! Model definitions.
//!
//! A model describes how one resource type maps between its wire form and a
//! flat application object: which members are scalar attributes, which are
//! relationships and of what cardinality, which attributes never serialize,
//! and whether a custom codec replaces the default algorithms for the type.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use reinhardt_jsonapi_document::Resource;

use crate::error::CodecResult;

/// Relationship cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
	/// To-one.
	HasOne,
	/// To-many.
	HasMany,
}

/// Schema entry for a relationship attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipDef {
	/// To-one or to-many.
	pub cardinality: Cardinality,
	/// Wire type of the target resources. `None` makes the relationship
	/// polymorphic: each linked instance supplies its own type.
	pub kind: Option<String>,
	/// Attribute equality predicate narrowing which side-loaded resources
	/// qualify during resolution.
	pub filter: Option<Map<String, Value>>,
}

impl RelationshipDef {
	/// A to-one relationship targeting the given wire type.
	pub fn has_one(kind: impl Into<String>) -> Self {
		Self {
			cardinality: Cardinality::HasOne,
			kind: Some(kind.into()),
			filter: None,
		}
	}

	/// A to-many relationship targeting the given wire type.
	pub fn has_many(kind: impl Into<String>) -> Self {
		Self {
			cardinality: Cardinality::HasMany,
			kind: Some(kind.into()),
			filter: None,
		}
	}

	/// A polymorphic to-one relationship.
	pub fn polymorphic_one() -> Self {
		Self {
			cardinality: Cardinality::HasOne,
			kind: None,
			filter: None,
		}
	}

	/// A polymorphic to-many relationship.
	pub fn polymorphic_many() -> Self {
		Self {
			cardinality: Cardinality::HasMany,
			kind: None,
			filter: None,
		}
	}

	/// Restrict resolution to side-loaded resources whose attributes equal
	/// every member of `filter`.
	pub fn with_filter(mut self, filter: Map<String, Value>) -> Self {
		self.filter = Some(filter);
		self
	}
}

/// Schema entry for one model attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeKind {
	/// A plain value copied verbatim between instance and wire.
	Scalar,
	/// A reference to other resources.
	Relationship(RelationshipDef),
}

impl AttributeKind {
	/// Whether this entry is a relationship.
	pub fn is_relationship(&self) -> bool {
		matches!(self, Self::Relationship(_))
	}
}

/// Custom serializer hook: instance in, wire resource out.
pub type SerializeFn = dyn Fn(&Value) -> CodecResult<Resource> + Send + Sync;

/// Custom deserializer hook: wire resource and side-loaded resources in,
/// flat instance out.
pub type DeserializeFn = dyn Fn(&Resource, &[Resource]) -> CodecResult<Value> + Send + Sync;

/// Custom codec capability for one model.
///
/// A present hook replaces the whole default algorithm for its direction;
/// the model's attribute schema is not consulted.
#[derive(Clone, Default)]
pub struct CustomCodec {
	serialize: Option<Arc<SerializeFn>>,
	deserialize: Option<Arc<DeserializeFn>>,
}

impl CustomCodec {
	/// A capability with no hooks; combine with the `*_with` builders.
	pub fn new() -> Self {
		Self::default()
	}

	/// Replace the default serializer for this model.
	pub fn serialize_with<F>(mut self, hook: F) -> Self
	where
		F: Fn(&Value) -> CodecResult<Resource> + Send + Sync + 'static,
	{
		self.serialize = Some(Arc::new(hook));
		self
	}

	/// Replace the default deserializer for this model.
	pub fn deserialize_with<F>(mut self, hook: F) -> Self
	where
		F: Fn(&Resource, &[Resource]) -> CodecResult<Value> + Send + Sync + 'static,
	{
		self.deserialize = Some(Arc::new(hook));
		self
	}

	/// The serializer hook, when present.
	pub fn serializer(&self) -> Option<&SerializeFn> {
		self.serialize.as_deref()
	}

	/// The deserializer hook, when present.
	pub fn deserializer(&self) -> Option<&DeserializeFn> {
		self.deserialize.as_deref()
	}
}

impl fmt::Debug for CustomCodec {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CustomCodec")
			.field("serialize", &self.serialize.is_some())
			.field("deserialize", &self.deserialize.is_some())
			.finish()
	}
}

/// Per-model options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelOptions {
	/// Wire type override. Defaults to the pluralized model name.
	pub kind: Option<String>,
	/// URL collection segment override. Defaults to the pluralized model
	/// name.
	pub collection_path: Option<String>,
	/// Attribute names skipped during serialization.
	pub read_only: Vec<String>,
}

impl ModelOptions {
	/// Options with every default.
	pub fn new() -> Self {
		Self::default()
	}

	/// Override the wire type stamped on serialized resources.
	pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
		self.kind = Some(kind.into());
		self
	}

	/// Override the URL collection segment.
	pub fn with_collection_path(mut self, path: impl Into<String>) -> Self {
		self.collection_path = Some(path.into());
		self
	}

	/// Mark attributes as read-only.
	pub fn with_read_only<I, S>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.read_only = names.into_iter().map(Into::into).collect();
		self
	}
}

/// One registered model: attribute schema, options, and an optional custom
/// codec capability.
#[derive(Debug, Clone, Default)]
pub struct ModelDef {
	/// Attribute schema keyed by member name.
	pub attributes: BTreeMap<String, AttributeKind>,
	/// Per-model options.
	pub options: ModelOptions,
	/// Custom codec hooks.
	pub codec: Option<CustomCodec>,
}

impl ModelDef {
	/// An empty definition: no attributes, default options, no hooks.
	pub fn new() -> Self {
		Self::default()
	}

	/// Declare a scalar attribute.
	pub fn scalar(mut self, name: impl Into<String>) -> Self {
		self.attributes.insert(name.into(), AttributeKind::Scalar);
		self
	}

	/// Declare a to-one relationship targeting `kind`.
	pub fn has_one(self, name: impl Into<String>, kind: impl Into<String>) -> Self {
		self.relationship(name, RelationshipDef::has_one(kind))
	}

	/// Declare a to-many relationship targeting `kind`.
	pub fn has_many(self, name: impl Into<String>, kind: impl Into<String>) -> Self {
		self.relationship(name, RelationshipDef::has_many(kind))
	}

	/// Declare a relationship from a full descriptor.
	pub fn relationship(mut self, name: impl Into<String>, def: RelationshipDef) -> Self {
		self.attributes
			.insert(name.into(), AttributeKind::Relationship(def));
		self
	}

	/// Attach options.
	pub fn with_options(mut self, options: ModelOptions) -> Self {
		self.options = options;
		self
	}

	/// Attach a custom codec capability.
	pub fn with_codec(mut self, codec: CustomCodec) -> Self {
		self.codec = Some(codec);
		self
	}

	/// The relationship descriptor for `name`, when declared as one.
	pub fn relationship_def(&self, name: &str) -> Option<&RelationshipDef> {
		match self.attributes.get(name) {
			Some(AttributeKind::Relationship(def)) => Some(def),
			_ => None,
		}
	}

	/// Whether `name` is a read-only attribute.
	pub fn is_read_only(&self, name: &str) -> bool {
		self.options.read_only.iter().any(|entry| entry == name)
	}

	/// The serializer hook, when the model carries one.
	pub fn custom_serializer(&self) -> Option<&SerializeFn> {
		self.codec.as_ref().and_then(CustomCodec::serializer)
	}

	/// The deserializer hook, when the model carries one.
	pub fn custom_deserializer(&self) -> Option<&DeserializeFn> {
		self.codec.as_ref().and_then(CustomCodec::deserializer)
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	// ==========================================================================
	// Builder tests
	// ==========================================================================

	#[test]
	fn test_model_builder() {
		let model = ModelDef::new()
			.scalar("title")
			.has_one("company", "companies")
			.has_many("tags", "tags");
		assert_eq!(model.attributes.len(), 3);
		assert_eq!(model.attributes["title"], AttributeKind::Scalar);
		assert!(model.attributes["company"].is_relationship());
		assert_eq!(
			model.relationship_def("tags").map(|def| def.cardinality),
			Some(Cardinality::HasMany)
		);
		assert_eq!(model.relationship_def("title"), None);
	}

	#[test]
	fn test_polymorphic_relationship_has_no_target_kind() {
		let def = RelationshipDef::polymorphic_one();
		assert_eq!(def.cardinality, Cardinality::HasOne);
		assert_eq!(def.kind, None);
	}

	#[test]
	fn test_relationship_filter() {
		let filter = json!({"published": true}).as_object().cloned().unwrap();
		let def = RelationshipDef::has_many("posts").with_filter(filter.clone());
		assert_eq!(def.filter, Some(filter));
	}

	#[test]
	fn test_read_only_options() {
		let model = ModelDef::new()
			.scalar("title")
			.scalar("url")
			.with_options(ModelOptions::new().with_read_only(["url"]));
		assert!(model.is_read_only("url"));
		assert!(!model.is_read_only("title"));
	}

	// ==========================================================================
	// Custom codec tests
	// ==========================================================================

	#[test]
	fn test_custom_codec_hooks_are_optional() {
		let model = ModelDef::new();
		assert!(model.custom_serializer().is_none());
		assert!(model.custom_deserializer().is_none());

		let model = model.with_codec(
			CustomCodec::new().serialize_with(|_| Ok(Resource::new("custom"))),
		);
		assert!(model.custom_serializer().is_some());
		assert!(model.custom_deserializer().is_none());
	}

	#[test]
	fn test_custom_codec_debug_shows_presence() {
		let codec = CustomCodec::new().serialize_with(|_| Ok(Resource::new("custom")));
		let rendered = format!("{codec:?}");
		assert!(rendered.contains("serialize: true"));
		assert!(rendered.contains("deserialize: false"));
	}
}
