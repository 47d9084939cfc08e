use super::{CODE, DESCRIPTION, ERRORS, ITEMS_PER_PAGE, RESOURCES, START_INDEX, TOTAL_RESULTS};
use crate::attribute::{ScimAttribute, ScimAttributeValue, SimpleValue};
use crate::error::{ScimError, ScimResult};
use crate::marshal::{Format, Marshaller, ordered_children, output_schemas};
use crate::resource::ScimResource;
use crate::response::{Resources, ScimErrorResponse};
use crate::schema::{AttributeDescriptor, DataType, SCHEMAS_ATTRIBUTE_NAME, SCHEMAS_ATTRIBUTE_URI_NAME};

use log::trace;
use serde_json::{Map, Value, json};
use std::io::Write;

/// Writes SCIM resources as JSON.
///
/// By default every simple value is written as a JSON string and every
/// `schemas` entry as `{"uri": ...}`; both can be switched.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMarshaller {
    native_types: bool,
    bare_schema_uris: bool,
}

impl JsonMarshaller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write boolean and integer values as JSON booleans and numbers.
    ///
    /// Values whose text does not parse as their type stay strings.
    pub fn with_native_types(mut self, native_types: bool) -> Self {
        self.native_types = native_types;
        self
    }

    /// Write `schemas` as an array of URN strings instead of objects.
    pub fn with_bare_schema_uris(mut self, bare_schema_uris: bool) -> Self {
        self.bare_schema_uris = bare_schema_uris;
        self
    }

    /// Render a resource as a JSON value.
    pub fn to_value<R: ScimResource>(&self, resource: &R) -> Value {
        Value::Object(self.resource_object(resource, true))
    }

    fn resource_object<R: ScimResource>(&self, resource: &R, include_schemas: bool) -> Map<String, Value> {
        let descriptor = resource.descriptor();
        let object = resource.scim_object();
        let schemas = output_schemas(descriptor, object);
        let mut map = Map::new();

        if include_schemas {
            map.insert(SCHEMAS_ATTRIBUTE_NAME.to_string(), self.schemas_value(&schemas));
        }

        for attribute in object.get_attributes(descriptor.schema()) {
            map.insert(attribute.name().to_string(), self.attribute_value(attribute));
        }

        for schema in schemas.iter().filter(|s| !descriptor.is_primary_schema(s)) {
            let nested: Map<String, Value> = object
                .get_attributes(schema)
                .iter()
                .map(|a| (a.name().to_string(), self.attribute_value(a)))
                .collect();
            map.insert((*schema).to_string(), Value::Object(nested));
        }
        map
    }

    fn schemas_value(&self, schemas: &[&str]) -> Value {
        schemas
            .iter()
            .map(|uri| {
                if self.bare_schema_uris {
                    Value::String((*uri).to_string())
                } else {
                    json!({ SCHEMAS_ATTRIBUTE_URI_NAME: uri })
                }
            })
            .collect()
    }

    fn attribute_value(&self, attribute: &ScimAttribute) -> Value {
        let descriptor = attribute.descriptor();
        if attribute.is_plural() {
            attribute
                .values()
                .iter()
                .map(|value| self.value(descriptor, value))
                .collect()
        } else {
            attribute
                .value()
                .map(|value| self.value(descriptor, value))
                .unwrap_or(Value::Null)
        }
    }

    fn value(&self, descriptor: &AttributeDescriptor, value: &ScimAttributeValue) -> Value {
        match value {
            ScimAttributeValue::Simple(simple) => self.simple_value(simple),
            ScimAttributeValue::Complex(complex) => Value::Object(
                ordered_children(descriptor, complex)
                    .map(|child| (child.name().to_string(), self.attribute_value(child)))
                    .collect(),
            ),
        }
    }

    fn simple_value(&self, value: &SimpleValue) -> Value {
        if self.native_types {
            match value.data_type() {
                DataType::Boolean => {
                    if let Ok(b) = value.as_bool() {
                        return Value::Bool(b);
                    }
                }
                DataType::Integer => {
                    if let Ok(i) = value.as_i64() {
                        return Value::from(i);
                    }
                }
                _ => {}
            }
        }
        Value::String(value.as_str().to_string())
    }

    fn write<W: Write>(&self, value: &Value, writer: W) -> ScimResult<()> {
        serde_json::to_writer(writer, value).map_err(|e| {
            if e.is_io() {
                ScimError::Io(e.into())
            } else {
                ScimError::Json(e)
            }
        })
    }
}

impl Marshaller for JsonMarshaller {
    fn format(&self) -> Format {
        Format::Json
    }

    fn marshal<R, W>(&self, resource: &R, writer: W) -> ScimResult<()>
    where
        R: ScimResource,
        W: Write,
    {
        trace!("Marshalling {} resource as JSON", resource.descriptor().name());
        self.write(&self.to_value(resource), writer)
    }

    fn marshal_resources<R, W>(&self, resources: &Resources<R>, writer: W) -> ScimResult<()>
    where
        R: ScimResource,
        W: Write,
    {
        trace!("Marshalling listing of {} resources as JSON", resources.len());
        let mut schemas: Vec<&str> = Vec::new();
        for resource in resources.items() {
            for schema in output_schemas(resource.descriptor(), resource.scim_object()) {
                if !schemas.iter().any(|s| s.eq_ignore_ascii_case(schema)) {
                    schemas.push(schema);
                }
            }
        }

        let mut map = Map::new();
        map.insert(TOTAL_RESULTS.to_string(), Value::from(resources.total_results()));
        map.insert(ITEMS_PER_PAGE.to_string(), Value::from(resources.items_per_page()));
        map.insert(START_INDEX.to_string(), Value::from(resources.start_index()));
        map.insert(SCHEMAS_ATTRIBUTE_NAME.to_string(), self.schemas_value(&schemas));
        map.insert(
            RESOURCES.to_string(),
            resources
                .items()
                .iter()
                .map(|r| Value::Object(self.resource_object(r, false)))
                .collect(),
        );
        self.write(&Value::Object(map), writer)
    }

    fn marshal_error<W>(&self, error: &ScimErrorResponse, writer: W) -> ScimResult<()>
    where
        W: Write,
    {
        let mut entry = Map::new();
        entry.insert(CODE.to_string(), Value::from(error.code));
        if let Some(description) = &error.description {
            entry.insert(DESCRIPTION.to_string(), Value::String(description.clone()));
        }
        self.write(&json!({ ERRORS: [entry] }), writer)
    }
}
