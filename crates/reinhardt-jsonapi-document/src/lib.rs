//! # Reinhardt JSON:API Document
//!
//! Typed JSON:API wire documents: resources, resource identifiers,
//! relationship linkage, the top-level envelope, and error objects.
//!
//! The types here are deliberately schema-free. They model exactly what is
//! on the wire, including the states JSON makes easy to conflate: an absent
//! member, an explicit `null`, and an empty collection all survive a
//! serde round-trip unchanged. Schema-aware mapping between these documents
//! and flat application objects lives in `reinhardt-jsonapi-codec`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use reinhardt_jsonapi_document::{Document, PrimaryData};
//!
//! let document: Document = serde_json::from_str(body)?;
//! if let Some(PrimaryData::One(resource)) = &document.data {
//!     println!("{} {}", resource.kind, resource.id.as_deref().unwrap_or("-"));
//! }
//! for included in document.included_resources() {
//!     println!("included {}", included.kind);
//! }
//! ```

#![warn(missing_docs)]

pub mod document;
pub mod errors;
pub mod resource;

pub use document::{Document, PrimaryData};
pub use errors::{ErrorObject, ErrorSource, collect_errors};
pub use resource::{IdentifierData, RelationshipData, Resource, ResourceIdentifier};
