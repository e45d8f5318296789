//! Wire-format tests for JSON:API documents.
//!
//! Parses documents the way servers actually send them and checks that
//! re-serialization reproduces the input byte for byte at the JSON level,
//! with absent, `null`, and empty members kept distinct throughout.

use assert_json_diff::assert_json_eq;
use reinhardt_jsonapi_document::{Document, IdentifierData, PrimaryData, Resource, collect_errors};
use serde_json::{Value, json};

fn product_document() -> Value {
	json!({
		"data": {
			"id": "1",
			"type": "products",
			"attributes": {
				"about": "Some about",
				"title": "Some Title"
			},
			"relationships": {
				"category": {
					"data": null
				},
				"company": {
					"data": {"id": "42", "type": "companies"}
				},
				"tags": {
					"data": [
						{"id": "5", "type": "tags"},
						{"id": "6", "type": "tags"}
					]
				}
			},
			"links": {
				"self": "http://example.com/products/1"
			},
			"meta": {
				"info": "Some meta data"
			}
		},
		"included": [
			{"id": "5", "type": "tags", "attributes": {"name": "one"}},
			{"id": "6", "type": "tags", "attributes": {"name": "two"}}
		],
		"meta": {
			"totalObjects": 1
		}
	})
}

// Test: a full single-resource document survives a parse and re-serialize
#[test]
fn test_single_resource_document_round_trip() {
	let wire = product_document();
	let document: Document = serde_json::from_value(wire.clone()).unwrap();
	assert_json_eq!(serde_json::to_value(&document).unwrap(), wire);
}

// Test: relationship linkage parses into typed identifiers
#[test]
fn test_relationship_linkage_parses() {
	let document: Document = serde_json::from_value(product_document()).unwrap();
	let Some(PrimaryData::One(resource)) = &document.data else {
		panic!("expected single primary data");
	};

	let company = resource.relationship("company").unwrap();
	match &company.data {
		Some(IdentifierData::One(identifier)) => {
			assert_eq!(identifier.id, "42");
			assert_eq!(identifier.kind, "companies");
		}
		other => panic!("expected to-one linkage, got {other:?}"),
	}

	let tags = resource.relationship("tags").unwrap();
	match &tags.data {
		Some(IdentifierData::Many(identifiers)) => {
			assert_eq!(identifiers.len(), 2);
			assert_eq!(identifiers[0].id, "5");
			assert_eq!(identifiers[1].kind, "tags");
		}
		other => panic!("expected to-many linkage, got {other:?}"),
	}

	let category = resource.relationship("category").unwrap();
	assert_eq!(category.data, Some(IdentifierData::None));
}

// Test: included resources are reachable whether or not the member exists
#[test]
fn test_included_resources() {
	let document: Document = serde_json::from_value(product_document()).unwrap();
	let included = document.included_resources();
	assert_eq!(included.len(), 2);
	assert_eq!(included[0].attribute("name"), Some(&json!("one")));

	let bare: Document = serde_json::from_value(json!({"data": null})).unwrap();
	assert!(bare.included_resources().is_empty());
}

// Test: an empty to-one response keeps its explicit null through a round trip
#[test]
fn test_null_primary_data_round_trip() {
	let wire = json!({"data": null});
	let document: Document = serde_json::from_value(wire.clone()).unwrap();
	assert_eq!(document.data, Some(PrimaryData::None));
	assert_json_eq!(serde_json::to_value(&document).unwrap(), wire);
}

// Test: a collection of bare identifiers parses without attributes
#[test]
fn test_bare_identifier_collection() {
	let document: Document = serde_json::from_value(json!({
		"data": [
			{"id": "1", "type": "products"},
			{"id": "2", "type": "products"}
		]
	}))
	.unwrap();
	let Some(PrimaryData::Many(resources)) = &document.data else {
		panic!("expected collection primary data");
	};
	assert!(resources.iter().all(|resource| resource.attributes.is_none()));
	assert_eq!(resources[1].id.as_deref(), Some("2"));
}

// Test: an error response keys by pointer field and by index when absent
#[test]
fn test_error_document_collection() {
	let wire = json!({
		"errors": [
			{
				"status": "422",
				"title": "Invalid Attribute",
				"detail": "First name must contain at least two characters.",
				"source": {"pointer": "/data/attributes/first-name"}
			},
			{
				"status": "500",
				"title": "Server Error"
			}
		]
	});
	let document: Document = serde_json::from_value(wire.clone()).unwrap();
	assert!(document.has_errors());

	let collected = collect_errors(&document);
	assert_eq!(collected.len(), 2);
	assert_eq!(collected["first-name"].status.as_deref(), Some("422"));
	assert_eq!(collected["1"].title.as_deref(), Some("Server Error"));

	assert_json_eq!(serde_json::to_value(&document).unwrap(), wire);
}

// Test: builder constructors produce the same wire shape as hand-written JSON
#[test]
fn test_document_builders_match_wire_shape() {
	let resource = Resource::new("products")
		.with_id("1")
		.with_attributes(
			json!({"title": "Some Title"})
				.as_object()
				.cloned()
				.unwrap(),
		);
	let document = Document::collection(vec![resource]).with_included(vec![
		Resource::new("tags").with_id("5"),
	]);
	assert_json_eq!(
		serde_json::to_value(&document).unwrap(),
		json!({
			"data": [{
				"id": "1",
				"type": "products",
				"attributes": {"title": "Some Title"}
			}],
			"included": [{"id": "5", "type": "tags"}]
		})
	);
}
