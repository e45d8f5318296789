//! # Reinhardt JSON:API Codec
//!
//! Schema-driven mapping between JSON:API wire documents and flat
//! application objects.
//!
//! A [`ModelRegistry`] holds one [`ModelDef`] per resource type: scalar
//! attributes, relationships with cardinality, read-only members, name
//! overrides, and optional custom codec hooks. A [`Serializer`] walks a flat
//! object into a wire resource under that schema, and a [`Deserializer`]
//! walks a wire resource (plus its side-loaded `included` resources) back
//! into a nested flat object, breaking reference cycles with a call-scoped
//! [`ResolutionCache`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use reinhardt_jsonapi_codec::{Deserializer, ModelDef, ModelRegistry, Serializer};
//! use serde_json::json;
//!
//! let registry = ModelRegistry::new();
//! registry.define("product", ModelDef::new().scalar("title").has_many("tags", "tags"));
//! registry.define("tag", ModelDef::new().scalar("name"));
//!
//! let serializer = Serializer::new(&registry);
//! let resource = serializer.serialize_resource(
//!     "product",
//!     &json!({"id": "1", "title": "Some Title", "tags": [{"id": "5"}]}),
//! )?;
//!
//! let deserializer = Deserializer::new(&registry);
//! let document: reinhardt_jsonapi_document::Document = serde_json::from_str(body)?;
//! let flat = deserializer.deserialize_document(&document)?;
//! ```

#![warn(missing_docs)]

pub mod cache;
pub mod deserializer;
pub mod error;
pub mod inflect;
pub mod model;
pub mod registry;
pub mod serializer;

pub use cache::ResolutionCache;
pub use deserializer::{
	DeserializedData, DeserializedDocument, Deserializer, DeserializerConfig, UnresolvedPolicy,
};
pub use error::{CodecError, CodecResult};
pub use inflect::{DefaultInflector, IdentityInflector, Inflector, kebab_to_camel};
pub use model::{
	AttributeKind, Cardinality, CustomCodec, DeserializeFn, ModelDef, ModelOptions,
	RelationshipDef, SerializeFn,
};
pub use registry::{ModelRegistry, RegistryConfig};
pub use serializer::{Serializer, SerializerConfig};
