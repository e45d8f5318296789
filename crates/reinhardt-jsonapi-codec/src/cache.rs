//! Resolution cache.
//!
//! Deserialization resolves relationship identifiers by recursing through
//! the document's side-loaded resources, and a reference cycle would recurse
//! forever. The cache breaks the cycle: every resource is recorded here
//! before its relationships resolve, so a cycle edge lands on the cached,
//! possibly still partial, object instead of recursing.
//!
//! A cache instance spans exactly one top-level deserialize call. Nothing
//! outlives the call, so one response can never leak stale objects into the
//! next.

use serde_json::Value;

#[derive(Debug)]
struct CacheEntry {
	kind: String,
	id: String,
	value: Value,
}

/// Call-scoped cache of deserialized resources keyed by `(type, id)`.
#[derive(Debug, Default)]
pub struct ResolutionCache {
	entries: Vec<CacheEntry>,
}

impl ResolutionCache {
	/// An empty cache.
	pub fn new() -> Self {
		Self::default()
	}

	/// Record a deserialized resource under `(kind, id)`.
	pub fn set(&mut self, kind: &str, id: &str, value: Value) {
		self.entries.push(CacheEntry {
			kind: kind.to_string(),
			id: id.to_string(),
			value,
		});
	}

	/// The first value recorded under `(kind, id)`, when one exists.
	pub fn get(&self, kind: &str, id: &str) -> Option<&Value> {
		self.entries
			.iter()
			.find(|entry| entry.kind == kind && entry.id == id)
			.map(|entry| &entry.value)
	}

	/// Drop every entry.
	pub fn clear(&mut self) {
		self.entries.clear();
	}

	/// Number of recorded resources.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the cache holds no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
