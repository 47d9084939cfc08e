//! Common test utilities for marshalling tests.
//!
//! Descriptors are built in code so each test states exactly which
//! attributes the codecs may resolve.

use scim_sdk::resource::GenericResource;
use scim_sdk::schema::{AttributeDescriptor, DataType, ResourceDescriptor, SchemaRegistry};
use scim_sdk::{Marshaller, ScimResource, Unmarshaller};
use std::sync::Arc;

pub mod fixtures;

pub const TEST_CORE: &str = "urn:core";
pub const TEST_EXTENSION: &str = "urn:test:ext";

/// Route codec logging to the test harness; `RUST_LOG=trace` shows it.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Registry with the embedded User and Group resources.
pub fn registry() -> SchemaRegistry {
    init_logging();
    SchemaRegistry::new().expect("embedded schemas load")
}

pub fn user_descriptor() -> Arc<ResourceDescriptor> {
    registry().user_descriptor().expect("User descriptor")
}

pub fn group_descriptor() -> Arc<ResourceDescriptor> {
    registry().group_descriptor().expect("Group descriptor")
}

/// A small User: `id`, `name{givenName,familyName}` and
/// `emails{value,type,primary}` under `urn:core`.
pub fn minimal_user_descriptor() -> Arc<ResourceDescriptor> {
    init_logging();
    let attributes = vec![
        AttributeDescriptor::simple(TEST_CORE, "id", DataType::String),
        AttributeDescriptor::complex(
            TEST_CORE,
            "name",
            vec![
                AttributeDescriptor::simple(TEST_CORE, "givenName", DataType::String),
                AttributeDescriptor::simple(TEST_CORE, "familyName", DataType::String),
            ],
        ),
        AttributeDescriptor::complex_multi_valued(
            TEST_CORE,
            "emails",
            vec![
                AttributeDescriptor::simple(TEST_CORE, "value", DataType::String),
                AttributeDescriptor::simple(TEST_CORE, "type", DataType::String),
                AttributeDescriptor::simple(TEST_CORE, "primary", DataType::Boolean),
            ],
        ),
    ];
    Arc::new(ResourceDescriptor::new("User", TEST_CORE, "Users", attributes).expect("valid descriptor"))
}

/// A resource whose extension schema reuses local names of its core schema:
/// `title` is declared in both, and `displayName` exists at the top level
/// and inside `manager`.
pub fn overlapping_descriptor() -> Arc<ResourceDescriptor> {
    init_logging();
    let attributes = vec![
        AttributeDescriptor::simple(TEST_CORE, "userName", DataType::String),
        AttributeDescriptor::simple(TEST_CORE, "title", DataType::String),
        AttributeDescriptor::simple(TEST_CORE, "displayName", DataType::String),
        AttributeDescriptor::simple(TEST_EXTENSION, "title", DataType::String),
        AttributeDescriptor::simple(TEST_EXTENSION, "department", DataType::String),
        AttributeDescriptor::complex(
            TEST_EXTENSION,
            "manager",
            vec![
                AttributeDescriptor::simple(TEST_EXTENSION, "managerId", DataType::String),
                AttributeDescriptor::simple(TEST_EXTENSION, "displayName", DataType::String),
            ],
        ),
    ];
    Arc::new(
        ResourceDescriptor::new("Employee", TEST_CORE, "Employees", attributes)
            .expect("valid descriptor"),
    )
}

pub fn read_json(json: &str, descriptor: &Arc<ResourceDescriptor>) -> GenericResource {
    scim_sdk::marshal::JsonUnmarshaller::new()
        .unmarshal(json.as_bytes(), descriptor, &GenericResource::from_parts)
        .expect("JSON document unmarshals")
}

pub fn read_xml(xml: &str, descriptor: &Arc<ResourceDescriptor>) -> GenericResource {
    scim_sdk::marshal::XmlUnmarshaller::new()
        .unmarshal(xml.as_bytes(), descriptor, &GenericResource::from_parts)
        .expect("XML document unmarshals")
}

pub fn to_json<R: ScimResource>(resource: &R) -> serde_json::Value {
    let text = scim_sdk::marshal::JsonMarshaller::new()
        .marshal_to_string(resource)
        .expect("resource marshals");
    serde_json::from_str(&text).expect("marshaller writes valid JSON")
}

pub fn to_xml<R: ScimResource>(resource: &R) -> String {
    scim_sdk::marshal::XmlMarshaller::new()
        .marshal_to_string(resource)
        .expect("resource marshals")
}
