//! # Reinhardt JSON:API
//!
//! A schema-driven JSON:API codec for Rust, mapping between wire documents
//! and flat application objects.
//!
//! The wire format normalizes a resource graph: resources reference each
//! other through `{id, type}` identifiers and the referenced resources
//! travel side-loaded under `included`. This crate serializes flat objects
//! into that shape and resolves the shape back into nested flat objects,
//! driven by per-model attribute schemas held in a [`ModelRegistry`].
//!
//! ## Core Principles
//!
//! - **Absence is meaningful**: an absent member, an explicit `null`, and an
//!   empty collection are three different wire states and survive the codec
//!   unchanged in both directions
//! - **Explicit wiring**: the registry is injected into each codec and the
//!   resolution cache is scoped to one call; there is no global state
//! - **Tolerant reader**: schema mismatches in incoming documents degrade
//!   with a logged warning instead of failing the whole response
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use reinhardt_jsonapi::prelude::*;
//!
//! // Describe the resource types once
//! let registry = ModelRegistry::new();
//! registry.define(
//!     "product",
//!     ModelDef::new().scalar("title").has_many("tags", "tags"),
//! );
//! registry.define("tag", ModelDef::new().scalar("name"));
//!
//! // Flat object -> wire document
//! let serializer = Serializer::new(&registry);
//! let request = serializer.serialize_document(
//!     "product",
//!     &json!({"id": "1", "title": "Some Title", "tags": [{"id": "5"}]}),
//! )?;
//!
//! // Wire document -> nested flat objects
//! let response: Document = serde_json::from_str(body)?;
//! let deserializer = Deserializer::new(&registry);
//! let flat = deserializer.deserialize_document(&response)?;
//! ```

// Module re-exports mirroring the two member crates
pub mod codec;
pub mod document;

// Re-export wire document types
pub use reinhardt_jsonapi_document::{
	Document, ErrorObject, ErrorSource, IdentifierData, PrimaryData, RelationshipData, Resource,
	ResourceIdentifier, collect_errors,
};

// Re-export codec types
pub use reinhardt_jsonapi_codec::{
	AttributeKind, Cardinality, CodecError, CodecResult, CustomCodec, DeserializedData,
	DeserializedDocument, Deserializer, DeserializerConfig, ModelDef, ModelOptions, ModelRegistry,
	RegistryConfig, RelationshipDef, ResolutionCache, Serializer, SerializerConfig,
	UnresolvedPolicy,
};

// Re-export inflection
pub use reinhardt_jsonapi_codec::{DefaultInflector, IdentityInflector, Inflector, kebab_to_camel};

// Re-export common external dependencies
pub use serde_json::{Map, Value, json};

pub mod prelude {
	//! Commonly used types, importable in one line.

	// Wire documents
	pub use crate::{
		Document, ErrorObject, IdentifierData, PrimaryData, RelationshipData, Resource,
		ResourceIdentifier, collect_errors,
	};

	// Codec
	pub use crate::{
		CodecError, CodecResult, CustomCodec, DeserializedData, DeserializedDocument,
		Deserializer, DeserializerConfig, ModelDef, ModelOptions, ModelRegistry, RegistryConfig,
		RelationshipDef, Serializer, SerializerConfig, UnresolvedPolicy,
	};

	// External
	pub use serde_json::{Map, Value, json};
}
