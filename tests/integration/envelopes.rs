//! Listing and error responses in both formats.

use crate::common::fixtures::scim_examples;
use crate::common::{read_json, user_descriptor};
use scim_sdk::marshal::{JsonMarshaller, JsonUnmarshaller, XmlMarshaller, XmlUnmarshaller};
use scim_sdk::resource::GenericResource;
use scim_sdk::schema::{SCHEMA_URI_CORE, SCHEMA_URI_ENTERPRISE_EXTENSION};
use scim_sdk::{ErrorKind, Format, Marshaller, Resources, ScimErrorResponse, ScimResource, Unmarshaller};
use serde_json::json;

fn listing() -> Resources<GenericResource> {
    let descriptor = user_descriptor();
    let first = read_json(&scim_examples::user_enterprise().to_string(), &descriptor);
    let second = read_json(&scim_examples::user_minimal().to_string(), &descriptor);
    Resources::with_paging(vec![first, second], 12, 3)
}

fn write_listing(format: Format, resources: &Resources<GenericResource>) -> Vec<u8> {
    let mut out = Vec::new();
    match format {
        Format::Json => JsonMarshaller::new().marshal_resources(resources, &mut out).unwrap(),
        Format::Xml => XmlMarshaller::new().marshal_resources(resources, &mut out).unwrap(),
    }
    out
}

fn read_listing(format: Format, bytes: &[u8]) -> Resources<GenericResource> {
    let descriptor = user_descriptor();
    match format {
        Format::Json => JsonUnmarshaller::new()
            .unmarshal_resources(bytes, &descriptor, &GenericResource::from_parts)
            .unwrap(),
        Format::Xml => XmlUnmarshaller::new()
            .unmarshal_resources(bytes, &descriptor, &GenericResource::from_parts)
            .unwrap(),
    }
}

#[test]
fn test_json_listing_shape() {
    let mut out = Vec::new();
    JsonMarshaller::new().marshal_resources(&listing(), &mut out).unwrap();
    let written: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(written["totalResults"], 12);
    assert_eq!(written["itemsPerPage"], 2);
    assert_eq!(written["startIndex"], 3);
    assert_eq!(
        written["schemas"],
        json!([{ "uri": SCHEMA_URI_CORE }, { "uri": SCHEMA_URI_ENTERPRISE_EXTENSION }])
    );
    let resources = written["Resources"].as_array().unwrap();
    assert_eq!(resources.len(), 2);
    assert!(resources[0].get("schemas").is_none());
    assert_eq!(resources[0][SCHEMA_URI_ENTERPRISE_EXTENSION]["employeeNumber"], "701984");
}

#[test]
fn test_xml_listing_shape() {
    let mut out = Vec::new();
    XmlMarshaller::new().marshal_resources(&listing(), &mut out).unwrap();
    let written = String::from_utf8(out).unwrap();

    assert!(written.contains(&format!("<scim:Response xmlns:scim=\"{}\"", SCHEMA_URI_CORE)));
    assert!(written.contains("<scim:totalResults>12</scim:totalResults>"));
    assert!(written.contains("<scim:itemsPerPage>2</scim:itemsPerPage>"));
    assert!(written.contains("<scim:startIndex>3</scim:startIndex>"));
    assert_eq!(written.matches("xsi:type=\"scim:User\"").count(), 2);
}

#[test]
fn test_listings_round_trip() {
    let original = listing();
    for format in [Format::Json, Format::Xml] {
        let read = read_listing(format, &write_listing(format, &original));
        assert_eq!(read.total_results(), 12, "{}", format);
        assert_eq!(read.items_per_page(), 2, "{}", format);
        assert_eq!(read.start_index(), 3, "{}", format);
        assert_eq!(read.len(), 2, "{}", format);
        for (left, right) in original.items().iter().zip(read.items()) {
            assert_eq!(left.scim_object(), right.scim_object(), "{}", format);
        }
    }
}

#[test]
fn test_empty_listing() {
    for format in [Format::Json, Format::Xml] {
        let read = read_listing(format, &write_listing(format, &Resources::new(Vec::new())));
        assert!(read.is_empty(), "{}", format);
        assert_eq!(read.total_results(), 0, "{}", format);
        assert_eq!(read.start_index(), 1, "{}", format);
    }
}

#[test]
fn test_listing_counts_default_when_absent() {
    let read = read_listing(Format::Json, br#"{"Resources": [{"userName": "ann"}]}"#);
    assert_eq!(read.len(), 1);
    assert_eq!(read.total_results(), 0);
    assert_eq!(read.items_per_page(), 1);
    assert_eq!(read.start_index(), 1);
}

#[test]
fn test_error_responses_round_trip() {
    let errors = [
        ScimErrorResponse::new(404, Some("Resource 2819c223 not found".to_string())),
        ScimErrorResponse::new(500, None),
    ];
    for error in &errors {
        let mut json = Vec::new();
        JsonMarshaller::new().marshal_error(error, &mut json).unwrap();
        assert_eq!(&JsonUnmarshaller::new().unmarshal_error(json.as_slice()).unwrap(), error);

        let mut xml = Vec::new();
        XmlMarshaller::new().marshal_error(error, &mut xml).unwrap();
        assert_eq!(&XmlUnmarshaller::new().unmarshal_error(xml.as_slice()).unwrap(), error);
    }
}

#[test]
fn test_error_response_wire_shapes() {
    let error = ScimErrorResponse::new(409, Some("userName taken".to_string()));

    let mut out = Vec::new();
    JsonMarshaller::new().marshal_error(&error, &mut out).unwrap();
    let written: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(written, json!({ "Errors": [{ "code": 409, "description": "userName taken" }] }));

    let read = JsonUnmarshaller::new()
        .unmarshal_error(&br#"{"Errors": [{"code": "409", "description": "userName taken"}]}"#[..])
        .unwrap();
    assert_eq!(read, error);
    assert_eq!(read.kind(), ErrorKind::ResourceConflict);

    let mut out = Vec::new();
    XmlMarshaller::new().marshal_error(&error, &mut out).unwrap();
    let written = String::from_utf8(out).unwrap();
    assert!(written.contains(
        "<scim:Errors><scim:Error><scim:code>409</scim:code><scim:description>userName taken</scim:description></scim:Error></scim:Errors>"
    ));
}

#[test]
fn test_error_without_code_is_rejected() {
    assert!(JsonUnmarshaller::new().unmarshal_error(&br#"{"Errors": []}"#[..]).is_err());
    assert!(
        XmlUnmarshaller::new()
            .unmarshal_error(&b"<Response><Errors><Error><description>x</description></Error></Errors></Response>"[..])
            .is_err()
    );
}

struct FailingWriter;

impl std::io::Write for FailingWriter {
    fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_stream_failures_surface_as_io() {
    let listing = listing();
    let error = JsonMarshaller::new()
        .marshal_resources(&listing, FailingWriter)
        .unwrap_err();
    assert!(matches!(error, scim_sdk::ScimError::Io(_)), "{:?}", error);

    let error = XmlMarshaller::new()
        .marshal(&listing.items()[0], FailingWriter)
        .unwrap_err();
    assert!(matches!(error, scim_sdk::ScimError::Io(_)), "{:?}", error);
}
