//! Serialization of flat application objects into wire resources.
//!
//! The model's attribute schema drives the walk: scalar attributes copy
//! verbatim, relationship attributes collapse linked instances into
//! `{id, type}` identifiers, and read-only attributes never serialize.
//! Instance members the model does not declare are ignored.
//!
//! Absence is preserved. An attribute missing from the instance produces no
//! wire member, while an explicit `null` or empty list on a relationship
//! keeps its meaning as empty linkage.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use reinhardt_jsonapi_document::{Document, RelationshipData, Resource, ResourceIdentifier};

use crate::error::CodecResult;
use crate::model::{AttributeKind, Cardinality, RelationshipDef};
use crate::registry::ModelRegistry;

/// Policy switches for serialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerializerConfig {
	/// Attach `"attributes": {}` when no attribute has a value. The default
	/// omits the member entirely.
	pub keep_empty_attributes: bool,
}

/// Serializes application objects into wire resources.
///
/// The registry is injected explicitly; the serializer itself holds no
/// state of its own, so one can be constructed per call site.
#[derive(Debug)]
pub struct Serializer<'a> {
	registry: &'a ModelRegistry,
	config: SerializerConfig,
}

impl<'a> Serializer<'a> {
	/// A serializer over `registry` with the default policy.
	pub fn new(registry: &'a ModelRegistry) -> Self {
		Self {
			registry,
			config: SerializerConfig::default(),
		}
	}

	/// A serializer with an explicit policy.
	pub fn with_config(registry: &'a ModelRegistry, config: SerializerConfig) -> Self {
		Self { registry, config }
	}

	/// Serialize one application object as a resource of `model_name`.
	///
	/// Fails when the model lookup fails under the registry's policy or when
	/// the model's custom serializer hook fails. Malformed pieces of the
	/// instance itself degrade with a logged warning instead of an error.
	pub fn serialize_resource(&self, model_name: &str, instance: &Value) -> CodecResult<Resource> {
		let model = self.registry.model_for(model_name)?;
		if let Some(hook) = model.custom_serializer() {
			return hook(instance);
		}

		let kind = model
			.options
			.kind
			.clone()
			.unwrap_or_else(|| self.registry.inflector().pluralize(model_name));
		let mut resource = Resource::new(kind);

		let mut attributes = Map::new();
		let mut relationships = BTreeMap::new();
		for (name, attribute) in &model.attributes {
			if model.is_read_only(name) {
				continue;
			}
			let Some(value) = member(instance, name) else {
				continue;
			};
			match attribute {
				AttributeKind::Scalar => {
					attributes.insert(name.clone(), value.clone());
				}
				AttributeKind::Relationship(def) => {
					if let Some(data) = serialize_relationship(name, def, value) {
						relationships.insert(name.clone(), data);
					}
				}
			}
		}

		if !attributes.is_empty() || self.config.keep_empty_attributes {
			resource.attributes = Some(attributes);
		}
		if !relationships.is_empty() {
			resource.relationships = Some(relationships);
		}
		resource.id = member(instance, "id").and_then(truthy_id);
		resource.meta = member(instance, "meta").and_then(Value::as_object).cloned();
		resource.links = member(instance, "links").and_then(Value::as_object).cloned();
		Ok(resource)
	}

	/// Serialize a collection element-wise under the same model.
	pub fn serialize_collection(
		&self,
		model_name: &str,
		instances: &[Value],
	) -> CodecResult<Vec<Resource>> {
		instances
			.iter()
			.map(|instance| self.serialize_resource(model_name, instance))
			.collect()
	}

	/// Serialize one object wrapped in a `{"data": ...}` document.
	pub fn serialize_document(&self, model_name: &str, instance: &Value) -> CodecResult<Document> {
		Ok(Document::single(self.serialize_resource(model_name, instance)?))
	}

	/// Serialize a collection wrapped in a `{"data": [...]}` document.
	pub fn serialize_collection_document(
		&self,
		model_name: &str,
		instances: &[Value],
	) -> CodecResult<Document> {
		Ok(Document::collection(
			self.serialize_collection(model_name, instances)?,
		))
	}
}

fn member<'v>(instance: &'v Value, name: &str) -> Option<&'v Value> {
	instance.as_object().and_then(|object| object.get(name))
}

/// Resource ids only serialize when truthy: a missing id, an empty string,
/// or a zero produces no `id` member. Numbers coerce to strings, since
/// identifiers are strings on the wire.
fn truthy_id(value: &Value) -> Option<String> {
	match value {
		Value::String(id) if !id.is_empty() => Some(id.clone()),
		Value::Number(id) if id.as_f64().is_some_and(|n| n != 0.0) => Some(id.to_string()),
		_ => None,
	}
}

/// Identifier ids inside relationship linkage are copied as long as they
/// are strings or numbers; linkage entries keep falsy ids.
fn identifier_id(value: &Value) -> Option<String> {
	match value {
		Value::String(id) => Some(id.clone()),
		Value::Number(id) => Some(id.to_string()),
		_ => None,
	}
}

fn serialize_relationship(
	name: &str,
	def: &RelationshipDef,
	value: &Value,
) -> Option<RelationshipData> {
	match def.cardinality {
		Cardinality::HasOne => serialize_has_one(name, def, value),
		Cardinality::HasMany => serialize_has_many(name, def, value),
	}
}

/// `null` serializes as empty linkage; anything else must yield an
/// identifier or the relationship member is dropped.
fn serialize_has_one(name: &str, def: &RelationshipDef, value: &Value) -> Option<RelationshipData> {
	if value.is_null() {
		return Some(RelationshipData::null());
	}
	match linked_identifier(def, value) {
		Some(identifier) => Some(RelationshipData::one(identifier)),
		None => {
			tracing::warn!(
				"has-one relationship \"{}\" has no usable id and type, dropped",
				name
			);
			None
		}
	}
}

/// `null` and `[]` both serialize as empty linkage. Entries that yield no
/// identifier are dropped individually.
fn serialize_has_many(
	name: &str,
	def: &RelationshipDef,
	value: &Value,
) -> Option<RelationshipData> {
	let entries: &[Value] = match value {
		Value::Array(entries) => entries,
		Value::Null => &[],
		_ => {
			tracing::warn!(
				"has-many relationship \"{}\" is neither an array nor null, dropped",
				name
			);
			return None;
		}
	};
	let mut identifiers = Vec::with_capacity(entries.len());
	for entry in entries {
		match linked_identifier(def, entry) {
			Some(identifier) => identifiers.push(identifier),
			None => tracing::warn!(
				"entry of has-many relationship \"{}\" has no usable id and type, dropped",
				name
			),
		}
	}
	Some(RelationshipData::many(identifiers))
}

/// Identifier for one linked instance. The declared target type wins; a
/// polymorphic declaration reads the type from the instance itself.
fn linked_identifier(def: &RelationshipDef, entry: &Value) -> Option<ResourceIdentifier> {
	let id = member(entry, "id").and_then(identifier_id)?;
	let kind = match &def.kind {
		Some(kind) => kind.clone(),
		None => member(entry, "type")?.as_str()?.to_string(),
	};
	Some(ResourceIdentifier::new(id, kind))
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::model::{ModelDef, ModelOptions};

	fn registry() -> ModelRegistry {
		let registry = ModelRegistry::new();
		registry.define("product", ModelDef::new().scalar("title").scalar("about"));
		registry
	}

	// ==========================================================================
	// Id handling tests
	// ==========================================================================

	#[test]
	fn test_truthy_string_id_is_kept() {
		let registry = registry();
		let serializer = Serializer::new(&registry);
		let resource = serializer
			.serialize_resource("product", &json!({"id": "5", "title": "hello"}))
			.unwrap();
		assert_eq!(resource.id.as_deref(), Some("5"));
	}

	#[test]
	fn test_numeric_id_coerces_to_string() {
		let registry = registry();
		let serializer = Serializer::new(&registry);
		let resource = serializer
			.serialize_resource("product", &json!({"id": 5, "title": "hello"}))
			.unwrap();
		assert_eq!(resource.id.as_deref(), Some("5"));
	}

	#[test]
	fn test_falsy_ids_are_omitted() {
		let registry = registry();
		let serializer = Serializer::new(&registry);
		for instance in [json!({"title": "x"}), json!({"id": "", "title": "x"}), json!({"id": 0, "title": "x"})] {
			let resource = serializer.serialize_resource("product", &instance).unwrap();
			assert_eq!(resource.id, None, "instance: {instance}");
		}
	}

	// ==========================================================================
	// Attributes policy tests
	// ==========================================================================

	#[test]
	fn test_empty_attributes_omitted_by_default() {
		let registry = registry();
		let serializer = Serializer::new(&registry);
		let resource = serializer
			.serialize_resource("product", &json!({"id": "1"}))
			.unwrap();
		assert_eq!(resource.attributes, None);
	}

	#[test]
	fn test_empty_attributes_kept_when_configured() {
		let registry = registry();
		let serializer = Serializer::with_config(
			&registry,
			SerializerConfig {
				keep_empty_attributes: true,
			},
		);
		let resource = serializer
			.serialize_resource("product", &json!({"id": "1"}))
			.unwrap();
		assert_eq!(resource.attributes, Some(Map::new()));
	}

	#[test]
	fn test_defined_subset_is_kept() {
		let registry = registry();
		let serializer = Serializer::new(&registry);
		let resource = serializer
			.serialize_resource("product", &json!({"title": "hello"}))
			.unwrap();
		let attributes = resource.attributes.unwrap();
		assert_eq!(attributes.len(), 1);
		assert_eq!(attributes["title"], json!("hello"));
	}

	// ==========================================================================
	// Relationship edge tests
	// ==========================================================================

	#[test]
	fn test_null_has_many_serializes_as_empty_linkage() {
		let registry = ModelRegistry::new();
		registry.define("product", ModelDef::new().has_many("tags", "tags"));
		let serializer = Serializer::new(&registry);
		let resource = serializer
			.serialize_resource("product", &json!({"tags": null}))
			.unwrap();
		assert_eq!(
			serde_json::to_value(resource.relationship("tags").unwrap()).unwrap(),
			json!({"data": []})
		);
	}

	#[test]
	fn test_non_array_has_many_is_dropped() {
		let registry = ModelRegistry::new();
		registry.define("product", ModelDef::new().has_many("tags", "tags"));
		let serializer = Serializer::new(&registry);
		let resource = serializer
			.serialize_resource("product", &json!({"tags": "oops"}))
			.unwrap();
		assert_eq!(resource.relationships, None);
	}

	#[test]
	fn test_linkage_keeps_falsy_entry_ids() {
		let registry = ModelRegistry::new();
		registry.define("product", ModelDef::new().has_many("tags", "tags"));
		let serializer = Serializer::new(&registry);
		let resource = serializer
			.serialize_resource("product", &json!({"tags": [{"id": ""}, {"id": 0}]}))
			.unwrap();
		assert_eq!(
			serde_json::to_value(resource.relationship("tags").unwrap()).unwrap(),
			json!({"data": [{"id": "", "type": "tags"}, {"id": "0", "type": "tags"}]})
		);
	}

	// ==========================================================================
	// Instance shape tests
	// ==========================================================================

	#[test]
	fn test_non_object_instance_degrades_to_typed_resource() {
		let registry = registry();
		let serializer = Serializer::new(&registry);
		let resource = serializer.serialize_resource("product", &json!(null)).unwrap();
		assert_eq!(serde_json::to_value(&resource).unwrap(), json!({"type": "products"}));
	}

	#[test]
	fn test_wire_type_override() {
		let registry = ModelRegistry::new();
		registry.define(
			"order",
			ModelDef::new()
				.scalar("total")
				.with_options(ModelOptions::new().with_kind("purchase-orders")),
		);
		let serializer = Serializer::new(&registry);
		let resource = serializer
			.serialize_resource("order", &json!({"total": 9.99}))
			.unwrap();
		assert_eq!(resource.kind, "purchase-orders");
	}
}
