//! Wire document types: resources, identifiers, linkage, envelope, errors.

pub use reinhardt_jsonapi_document::*;
