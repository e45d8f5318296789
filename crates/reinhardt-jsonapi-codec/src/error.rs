//! Codec error types.
//!
//! Only two conditions abort a codec operation: looking up a model that
//! was never registered, and looking up a relationship the model does not
//! declare. Everything else the codec tolerates by degrading the output
//! and logging a warning.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors raised by the registry, serializer, and deserializer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodecError {
	/// Model lookup failed.
	#[error("model definition for \"{name}\" not found (defined models: [{available}])")]
	ModelNotFound {
		/// The model name that was looked up.
		name: String,
		/// Comma-separated names of the registered models.
		available: String,
	},

	/// Relationship lookup failed on an existing model.
	#[error("relationship \"{relationship}\" on model \"{model}\" not found (defined attributes: [{available}])")]
	RelationshipNotFound {
		/// The model that was consulted.
		model: String,
		/// The relationship name that was looked up.
		relationship: String,
		/// Comma-separated names of the model's attributes.
		available: String,
	},

	/// Failure raised inside a custom serializer or deserializer hook.
	#[error("{0}")]
	Custom(String),
}
