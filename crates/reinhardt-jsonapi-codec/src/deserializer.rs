//! Deserialization of wire resources into flat application objects.
//!
//! A wire document is a normalized graph: relationships carry `{id, type}`
//! identifiers and the referenced resources travel side-loaded under
//! `included`. Deserialization walks that graph back into nested flat
//! objects, recursing through `included` and breaking reference cycles with
//! a call-scoped [`ResolutionCache`]: every resource is cached before its
//! relationships resolve, so a cycle edge receives the cached, possibly
//! still partial, object.
//!
//! The model schema names the output members. Wire members arriving in
//! kebab-case fall back to a camelCase lookup, so `snake-case-description`
//! lands on a model attribute `snakeCaseDescription`. Members the model
//! does not know are dropped with a logged warning rather than an error.

use serde_json::{Map, Value, json};

use reinhardt_jsonapi_document::{
	Document, ErrorObject, IdentifierData, PrimaryData, RelationshipData, Resource,
	ResourceIdentifier,
};

use crate::cache::ResolutionCache;
use crate::error::CodecResult;
use crate::inflect::kebab_to_camel;
use crate::model::{AttributeKind, Cardinality, ModelDef, RelationshipDef};
use crate::registry::ModelRegistry;

/// Treatment of a relationship identifier with no match in `included`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnresolvedPolicy {
	/// Keep the bare `{id, type}` identifier in place of a resolved object.
	#[default]
	Identifier,
	/// Drop the identifier: to-one resolves to `null` and to-many entries
	/// are skipped.
	Omit,
}

/// Policy switches for deserialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeserializerConfig {
	/// Treatment of identifiers that resolve to nothing.
	pub unresolved: UnresolvedPolicy,
}

/// Deserialized primary data of a document.
#[derive(Debug, Clone, PartialEq)]
pub enum DeserializedData {
	/// A single flat object.
	One(Value),
	/// A collection of flat objects.
	Many(Vec<Value>),
}

/// A deserialized document: flat primary data plus the envelope members
/// carried over verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeserializedDocument {
	/// Deserialized primary data. `None` for both an absent `data` member
	/// and an explicit `null`.
	pub data: Option<DeserializedData>,
	/// Document-level meta object.
	pub meta: Option<Map<String, Value>>,
	/// Document-level links object.
	pub links: Option<Map<String, Value>>,
	/// Document-level error objects.
	pub errors: Option<Vec<ErrorObject>>,
}

/// Deserializes wire resources into flat application objects.
#[derive(Debug)]
pub struct Deserializer<'a> {
	registry: &'a ModelRegistry,
	config: DeserializerConfig,
}

/// Where an incoming relationship member lands on the model schema.
enum RelationshipTarget<'m> {
	Declared(String, &'m RelationshipDef),
	Scalar,
	Unknown,
}

impl<'a> Deserializer<'a> {
	/// A deserializer over `registry` with the default policy.
	pub fn new(registry: &'a ModelRegistry) -> Self {
		Self {
			registry,
			config: DeserializerConfig::default(),
		}
	}

	/// A deserializer with an explicit policy.
	pub fn with_config(registry: &'a ModelRegistry, config: DeserializerConfig) -> Self {
		Self { registry, config }
	}

	/// Deserialize one resource against its side-loaded resources.
	///
	/// A fresh resolution cache spans exactly this call and is dropped when
	/// it returns.
	pub fn deserialize_resource(
		&self,
		resource: &Resource,
		included: &[Resource],
	) -> CodecResult<Value> {
		let mut cache = ResolutionCache::new();
		self.resource_value(resource, included, &mut cache, false)
	}

	/// Deserialize a collection; all elements share one resolution cache.
	pub fn deserialize_collection(
		&self,
		resources: &[Resource],
		included: &[Resource],
	) -> CodecResult<Vec<Value>> {
		let mut cache = ResolutionCache::new();
		resources
			.iter()
			.map(|resource| self.resource_value(resource, included, &mut cache, false))
			.collect()
	}

	/// Deserialize a whole document: primary data against the document's
	/// `included`, with `meta`, `links`, and `errors` carried verbatim.
	pub fn deserialize_document(&self, document: &Document) -> CodecResult<DeserializedDocument> {
		let included = document.included_resources();
		let data = match &document.data {
			Some(PrimaryData::One(resource)) => Some(DeserializedData::One(
				self.deserialize_resource(resource, included)?,
			)),
			Some(PrimaryData::Many(resources)) => Some(DeserializedData::Many(
				self.deserialize_collection(resources, included)?,
			)),
			Some(PrimaryData::None) | None => None,
		};
		Ok(DeserializedDocument {
			data,
			meta: document.meta.clone(),
			links: document.links.clone(),
			errors: document.errors.clone(),
		})
	}

	fn resource_value(
		&self,
		item: &Resource,
		included: &[Resource],
		cache: &mut ResolutionCache,
		use_cache: bool,
	) -> CodecResult<Value> {
		let id = item.id.clone().unwrap_or_default();
		if use_cache {
			if let Some(cached) = cache.get(&item.kind, &id) {
				return Ok(cached.clone());
			}
		}

		let model_name = self.registry.inflector().singularize(&item.kind);
		let model = self.registry.model_for_strict(&model_name)?;
		if let Some(hook) = model.custom_deserializer() {
			return hook(item, included);
		}

		let mut object = Map::new();
		if let Some(id) = &item.id {
			object.insert("id".to_string(), Value::String(id.clone()));
		}
		object.insert("type".to_string(), Value::String(item.kind.clone()));

		if let Some(attributes) = &item.attributes {
			for (name, value) in attributes {
				match attribute_target(&model, name) {
					Some(target) => {
						object.insert(target, value.clone());
					}
					None => tracing::warn!(
						"resource of type \"{}\" carries attribute \"{}\" that is not on the model definition, dropped",
						item.kind,
						name
					),
				}
			}
		}

		// Cache before resolving relationships so that a reference cycle
		// terminates on the partially built object.
		cache.set(&item.kind, &id, Value::Object(object.clone()));

		if let Some(relationships) = &item.relationships {
			for (name, relationship) in relationships {
				match relationship_target(&model, name) {
					RelationshipTarget::Declared(target, def) => {
						let resolved =
							self.resolve_relationship(def, relationship, included, cache)?;
						object.insert(target, resolved);
					}
					RelationshipTarget::Scalar => tracing::warn!(
						"resource of type \"{}\" carries relationship \"{}\" that the model declares as a plain attribute, dropped",
						item.kind,
						name
					),
					RelationshipTarget::Unknown => tracing::warn!(
						"resource of type \"{}\" carries relationship \"{}\" that is not on the model definition, dropped",
						item.kind,
						name
					),
				}
			}
		}

		if let Some(meta) = &item.meta {
			object.insert("meta".to_string(), Value::Object(meta.clone()));
		}
		if let Some(links) = &item.links {
			object.insert("links".to_string(), Value::Object(links.clone()));
		}

		Ok(Value::Object(object))
	}

	fn resolve_relationship(
		&self,
		def: &RelationshipDef,
		relationship: &RelationshipData,
		included: &[Resource],
		cache: &mut ResolutionCache,
	) -> CodecResult<Value> {
		match def.cardinality {
			Cardinality::HasOne => self.resolve_has_one(def, relationship, included, cache),
			Cardinality::HasMany => self.resolve_has_many(def, relationship, included, cache),
		}
	}

	/// Empty linkage resolves to `null`. An identifier resolves to its
	/// first side-loaded match, deserialized; an identifier with no match
	/// degrades per policy.
	fn resolve_has_one(
		&self,
		def: &RelationshipDef,
		relationship: &RelationshipData,
		included: &[Resource],
		cache: &mut ResolutionCache,
	) -> CodecResult<Value> {
		let identifiers = linkage_identifiers(relationship);
		for identifier in &identifiers {
			if let Some(found) = included
				.iter()
				.find(|candidate| is_match(def, identifier, candidate))
			{
				return self.resource_value(found, included, cache, true);
			}
		}
		match (identifiers.first(), self.config.unresolved) {
			(Some(identifier), UnresolvedPolicy::Identifier) => {
				tracing::debug!(
					"relationship target \"{}:{}\" is not side-loaded, keeping the identifier",
					identifier.kind,
					identifier.id
				);
				Ok(identifier_value(identifier))
			}
			(Some(identifier), UnresolvedPolicy::Omit) => {
				tracing::warn!(
					"relationship target \"{}:{}\" is not side-loaded, dropped",
					identifier.kind,
					identifier.id
				);
				Ok(Value::Null)
			}
			(None, _) => Ok(Value::Null),
		}
	}

	/// Empty linkage resolves to an empty list. Every identifier resolves
	/// to all of its side-loaded matches, deserialized; an identifier with
	/// no match degrades per policy.
	fn resolve_has_many(
		&self,
		def: &RelationshipDef,
		relationship: &RelationshipData,
		included: &[Resource],
		cache: &mut ResolutionCache,
	) -> CodecResult<Value> {
		let identifiers = linkage_identifiers(relationship);
		let mut items = Vec::with_capacity(identifiers.len());
		for identifier in &identifiers {
			let matches: Vec<&Resource> = included
				.iter()
				.filter(|candidate| is_match(def, identifier, candidate))
				.collect();
			if matches.is_empty() {
				match self.config.unresolved {
					UnresolvedPolicy::Identifier => {
						tracing::debug!(
							"relationship target \"{}:{}\" is not side-loaded, keeping the identifier",
							identifier.kind,
							identifier.id
						);
						items.push(identifier_value(identifier));
					}
					UnresolvedPolicy::Omit => tracing::warn!(
						"relationship target \"{}:{}\" is not side-loaded, dropped",
						identifier.kind,
						identifier.id
					),
				}
			} else {
				for found in matches {
					items.push(self.resource_value(found, included, cache, true)?);
				}
			}
		}
		Ok(Value::Array(items))
	}
}

/// The output member an incoming attribute lands on: the wire name when the
/// model declares it, the camelized name as a kebab-case fallback, `None`
/// when the model knows neither. An `id` attribute always passes through.
fn attribute_target(model: &ModelDef, name: &str) -> Option<String> {
	if name == "id" || model.attributes.contains_key(name) {
		return Some(name.to_string());
	}
	let camel = kebab_to_camel(name);
	if model.attributes.contains_key(&camel) {
		return Some(camel);
	}
	None
}

/// Same lookup for relationship members, discriminating on what the model
/// declares under the resolved name.
fn relationship_target<'m>(model: &'m ModelDef, name: &str) -> RelationshipTarget<'m> {
	let (target, attribute) = match model.attributes.get(name) {
		Some(attribute) => (name.to_string(), attribute),
		None => {
			let camel = kebab_to_camel(name);
			match model.attributes.get(&camel) {
				Some(attribute) => (camel, attribute),
				None => return RelationshipTarget::Unknown,
			}
		}
	};
	match attribute {
		AttributeKind::Relationship(def) => RelationshipTarget::Declared(target, def),
		AttributeKind::Scalar => RelationshipTarget::Scalar,
	}
}

/// The identifiers carried by a relationship's linkage, for any shape.
/// Absent `data`, explicit `null`, and an empty list all yield none.
fn linkage_identifiers(relationship: &RelationshipData) -> Vec<&ResourceIdentifier> {
	match &relationship.data {
		Some(IdentifierData::One(identifier)) => vec![identifier],
		Some(IdentifierData::Many(identifiers)) => identifiers.iter().collect(),
		Some(IdentifierData::None) | None => Vec::new(),
	}
}

/// Exact id and type equality, narrowed by the descriptor's filter when one
/// is declared: every filter member must equal the candidate's attribute of
/// the same name.
fn is_match(def: &RelationshipDef, identifier: &ResourceIdentifier, candidate: &Resource) -> bool {
	if candidate.id.as_deref() != Some(identifier.id.as_str()) || candidate.kind != identifier.kind
	{
		return false;
	}
	match &def.filter {
		Some(filter) => filter
			.iter()
			.all(|(name, expected)| candidate.attribute(name) == Some(expected)),
		None => true,
	}
}

fn identifier_value(identifier: &ResourceIdentifier) -> Value {
	json!({"id": identifier.id, "type": identifier.kind})
}
