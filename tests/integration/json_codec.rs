//! JSON resource documents.

use crate::common::fixtures::scim_examples;
use crate::common::{
    TEST_CORE, TEST_EXTENSION, minimal_user_descriptor, overlapping_descriptor, read_json, to_json,
    user_descriptor,
};
use scim_sdk::marshal::{JsonMarshaller, JsonUnmarshaller};
use scim_sdk::resource::GenericResource;
use scim_sdk::schema::{SCHEMA_URI_CORE, SCHEMA_URI_ENTERPRISE_EXTENSION};
use scim_sdk::{Format, Marshaller, ScimError, ScimResource, Unmarshaller};
use serde_json::json;

#[test]
fn test_single_schema_document_is_read_flat() {
    let descriptor = minimal_user_descriptor();
    let user = read_json(
        r#"{
            "schemas": ["urn:core"],
            "id": "u1",
            "name": { "givenName": "Barbara", "familyName": "Jensen" },
            "emails": [ { "value": "b@x.com", "type": "work", "primary": true } ]
        }"#,
        &descriptor,
    );

    let object = user.scim_object();
    assert_eq!(object.get_attributes(TEST_CORE).len(), 3);
    assert_eq!(object.get_attribute(TEST_CORE, "id").unwrap().as_str(), Some("u1"));

    let name = object.get_attribute(TEST_CORE, "name").unwrap();
    assert_eq!(name.value().unwrap().sub_value("givenName").unwrap().as_str(), "Barbara");
    assert_eq!(name.value().unwrap().sub_value("familyName").unwrap().as_str(), "Jensen");

    let emails = object.get_attribute(TEST_CORE, "emails").unwrap();
    assert_eq!(emails.values().len(), 1);
    let email = emails.values()[0].as_complex().unwrap();
    assert_eq!(email.len(), 3);
    assert_eq!(email.get("primary").unwrap().value().unwrap().as_simple().unwrap().as_bool().unwrap(), true);

    // Simple values go back out as strings; key order is free.
    assert_eq!(
        JsonMarshaller::new().with_bare_schema_uris(true).to_value(&user),
        json!({
            "schemas": ["urn:core"],
            "id": "u1",
            "name": { "familyName": "Jensen", "givenName": "Barbara" },
            "emails": [ { "primary": "true", "type": "work", "value": "b@x.com" } ]
        })
    );
}

#[test]
fn test_missing_schemas_defaults_to_primary() {
    let descriptor = minimal_user_descriptor();
    let user = read_json(r#"{"id": "abc"}"#, &descriptor);
    assert!(user.scim_object().get_attribute(TEST_CORE, "id").is_some());
}

#[test]
fn test_unknown_keys_are_skipped() {
    let descriptor = minimal_user_descriptor();
    let user = read_json(
        r#"{"id": "abc", "nickName": "Babs", "name": {"givenName": "Ann", "suffix": "III"}}"#,
        &descriptor,
    );
    let object = user.scim_object();
    assert_eq!(object.get_attributes(TEST_CORE).len(), 2);
    assert_eq!(
        object.get_attribute(TEST_CORE, "name").unwrap().value().unwrap().as_complex().unwrap().len(),
        1
    );
}

#[test]
fn test_extension_shares_local_names_with_core() {
    let descriptor = overlapping_descriptor();
    let user = read_json(
        &json!({
            "schemas": [TEST_CORE, TEST_EXTENSION],
            "userName": "ann",
            "title": "Engineer",
            TEST_EXTENSION: { "title": "Staff Engineer", "department": "R&D" }
        })
        .to_string(),
        &descriptor,
    );

    let object = user.scim_object();
    assert_eq!(object.get_attribute(TEST_CORE, "title").unwrap().as_str(), Some("Engineer"));
    assert_eq!(
        object.get_attribute(TEST_EXTENSION, "title").unwrap().as_str(),
        Some("Staff Engineer")
    );

    let written = to_json(&user);
    assert_eq!(written["title"], "Engineer");
    assert_eq!(written[TEST_EXTENSION]["title"], "Staff Engineer");
    assert_eq!(written[TEST_EXTENSION]["department"], "R&D");
}

#[test]
fn test_primary_schema_nested_under_its_urn() {
    let descriptor = minimal_user_descriptor();
    let nested = read_json(r#"{"schemas": ["urn:core"], "urn:core": {"id": "abc"}}"#, &descriptor);
    let flat = read_json(r#"{"schemas": ["urn:core"], "id": "abc"}"#, &descriptor);
    assert_eq!(nested.scim_object(), flat.scim_object());
}

#[test]
fn test_enterprise_user_document() {
    let descriptor = user_descriptor();
    let user = read_json(&scim_examples::user_enterprise().to_string(), &descriptor);
    let object = user.scim_object();

    assert_eq!(
        object.get_attribute(SCHEMA_URI_CORE, "userName").unwrap().as_str(),
        Some("bjensen@example.com")
    );
    assert_eq!(object.get_attribute(SCHEMA_URI_CORE, "emails").unwrap().values().len(), 2);
    let manager = object.get_attribute(SCHEMA_URI_ENTERPRISE_EXTENSION, "manager").unwrap();
    assert_eq!(
        manager.value().unwrap().sub_value("displayName").unwrap().as_str(),
        "John Smith"
    );

    let written = to_json(&user);
    assert_eq!(
        written["schemas"],
        json!([{ "uri": SCHEMA_URI_CORE }, { "uri": SCHEMA_URI_ENTERPRISE_EXTENSION }])
    );
    assert_eq!(written["active"], "true");
    assert_eq!(written[SCHEMA_URI_ENTERPRISE_EXTENSION]["department"], "Tour Operations");
}

#[test]
fn test_native_types_option() {
    let descriptor = user_descriptor();
    let user = read_json(&scim_examples::user_enterprise().to_string(), &descriptor);
    let text = JsonMarshaller::new()
        .with_native_types(true)
        .with_bare_schema_uris(true)
        .marshal_to_string(&user)
        .unwrap();
    let written: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(written["active"], json!(true));
    assert_eq!(written["emails"][0]["primary"], json!(true));
    assert_eq!(written["schemas"][0], SCHEMA_URI_CORE);
}

#[test]
fn test_malformed_document_is_reported() {
    let descriptor = minimal_user_descriptor();
    let error = JsonUnmarshaller::new()
        .unmarshal::<GenericResource, _, _>(&b"{\"id\": "[..], &descriptor, &GenericResource::from_parts)
        .unwrap_err();
    assert!(matches!(error, ScimError::MalformedWireFormat { format: Format::Json, .. }));
}

#[test]
fn test_shape_errors_are_invalid_resource() {
    let descriptor = minimal_user_descriptor();
    for document in [r#"{"name": "Ann"}"#, r#"[1, 2]"#, r#"{"emails": [[{"value": "a"}]]}"#] {
        let error = JsonUnmarshaller::new()
            .unmarshal::<GenericResource, _, _>(document.as_bytes(), &descriptor, &GenericResource::from_parts)
            .unwrap_err();
        assert!(
            matches!(error, ScimError::InvalidResource { .. }),
            "{} gave {:?}",
            document,
            error
        );
    }
}

#[test]
fn test_format_dispatch() {
    let descriptor = minimal_user_descriptor();
    let format = Format::from_media_type("application/scim+json; charset=utf-8").unwrap();
    assert_eq!(format, Format::Json);

    let user: GenericResource = format
        .unmarshal(&br#"{"id": "abc"}"#[..], &descriptor, &GenericResource::from_parts)
        .unwrap();
    let mut out = Vec::new();
    format.marshal(&user, &mut out).unwrap();
    let written: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(written["id"], "abc");
}
