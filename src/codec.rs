//! Registry-driven serializer and deserializer.

pub use reinhardt_jsonapi_codec::*;
