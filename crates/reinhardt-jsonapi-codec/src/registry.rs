//! Model registry.
//!
//! Holds the model definitions a codec operates against and answers the
//! name-derivation questions that depend on them: the wire type for a model
//! and the URL collection segment. Registries are shared state; interior
//! locking keeps `define` usable behind a plain shared reference.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{CodecError, CodecResult};
use crate::inflect::{DefaultInflector, Inflector};
use crate::model::{ModelDef, RelationshipDef};

/// Lookup policy for model names that were never registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
	/// When `true`, lookups of unknown models fail with
	/// [`CodecError::ModelNotFound`]. When `false`, they log a warning and
	/// hand back an empty stub definition instead.
	pub strict: bool,
}

impl Default for RegistryConfig {
	fn default() -> Self {
		Self { strict: true }
	}
}

impl RegistryConfig {
	/// The permissive policy: unknown models degrade to empty stubs.
	pub fn permissive() -> Self {
		Self { strict: false }
	}
}

/// Registry of model definitions keyed by model name.
pub struct ModelRegistry {
	models: RwLock<BTreeMap<String, ModelDef>>,
	inflector: Arc<dyn Inflector>,
	config: RegistryConfig,
}

impl ModelRegistry {
	/// An empty registry with strict lookups and default inflection.
	pub fn new() -> Self {
		Self {
			models: RwLock::new(BTreeMap::new()),
			inflector: Arc::new(DefaultInflector),
			config: RegistryConfig::default(),
		}
	}

	/// Replace the inflector.
	pub fn with_inflector(mut self, inflector: Arc<dyn Inflector>) -> Self {
		self.inflector = inflector;
		self
	}

	/// Replace the lookup policy.
	pub fn with_config(mut self, config: RegistryConfig) -> Self {
		self.config = config;
		self
	}

	/// Register a model definition under `name`, replacing any previous
	/// definition of the same name.
	pub fn define(&self, name: impl Into<String>, model: ModelDef) {
		self.models.write().insert(name.into(), model);
	}

	/// Look up a model under the configured policy.
	///
	/// Strict registries fail with [`CodecError::ModelNotFound`]. Permissive
	/// registries log a warning and return an empty stub, which serializes
	/// the instance as a bare typed resource.
	pub fn model_for(&self, name: &str) -> CodecResult<ModelDef> {
		match self.model_for_opt(name) {
			Some(model) => Ok(model),
			None if self.config.strict => Err(self.model_not_found(name)),
			None => {
				tracing::warn!(
					"model definition for \"{}\" not found, using an empty stub",
					name
				);
				Ok(ModelDef::new())
			}
		}
	}

	/// Look up a model, failing on a miss regardless of policy.
	///
	/// Deserialization resolves models through this lookup.
	pub fn model_for_strict(&self, name: &str) -> CodecResult<ModelDef> {
		self.model_for_opt(name)
			.ok_or_else(|| self.model_not_found(name))
	}

	/// Look up a model without applying any policy.
	pub fn model_for_opt(&self, name: &str) -> Option<ModelDef> {
		self.models.read().get(name).cloned()
	}

	/// The relationship descriptor declared on `model` under `relationship`.
	///
	/// Fails when the model is unknown, when the attribute is missing, and
	/// when the attribute is declared as a scalar.
	pub fn relationship_for(
		&self,
		model: &str,
		relationship: &str,
	) -> CodecResult<RelationshipDef> {
		let def = self.model_for_strict(model)?;
		match def.relationship_def(relationship) {
			Some(rel) => Ok(rel.clone()),
			None => Err(CodecError::RelationshipNotFound {
				model: model.to_string(),
				relationship: relationship.to_string(),
				available: def.attributes.keys().cloned().collect::<Vec<_>>().join(", "),
			}),
		}
	}

	/// The wire type stamped on serialized resources of `name`: the model's
	/// type override when one is registered, else the pluralized name.
	pub fn type_name_for(&self, name: &str) -> String {
		self.model_for_opt(name)
			.and_then(|model| model.options.kind)
			.unwrap_or_else(|| self.inflector.pluralize(name))
	}

	/// The URL collection segment for `name`: the model's path override when
	/// one is registered, else the pluralized name.
	pub fn collection_path_for(&self, name: &str) -> String {
		self.model_for_opt(name)
			.and_then(|model| model.options.collection_path)
			.unwrap_or_else(|| self.inflector.pluralize(name))
	}

	/// The active inflector.
	pub fn inflector(&self) -> &dyn Inflector {
		self.inflector.as_ref()
	}

	/// Names of every registered model.
	pub fn model_names(&self) -> Vec<String> {
		self.models.read().keys().cloned().collect()
	}

	/// Whether `name` is registered.
	pub fn contains(&self, name: &str) -> bool {
		self.models.read().contains_key(name)
	}

	fn model_not_found(&self, name: &str) -> CodecError {
		CodecError::ModelNotFound {
			name: name.to_string(),
			available: self.model_names().join(", "),
		}
	}
}

impl Default for ModelRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for ModelRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ModelRegistry")
			.field("models", &self.model_names())
			.field("config", &self.config)
			.finish()
	}
}
