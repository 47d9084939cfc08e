use super::{CODE, DESCRIPTION, ERRORS, ITEMS_PER_PAGE, RESOURCES, START_INDEX, TOTAL_RESULTS, get_ignore_case};
use crate::attribute::{ScimAttribute, ScimAttributeValue, SimpleValue};
use crate::error::{ScimError, ScimResult};
use crate::marshal::{Format, Unmarshaller};
use crate::object::ScimObject;
use crate::resource::ResourceFactory;
use crate::response::{Resources, ScimErrorResponse};
use crate::schema::{AttributeDescriptor, ResourceDescriptor, SCHEMAS_ATTRIBUTE_NAME, SCHEMAS_ATTRIBUTE_URI_NAME};

use log::{debug, trace, warn};
use serde_json::{Map, Value};
use std::io::Read;
use std::sync::Arc;

const ERROR_RESOURCE: &str = "Error";

/// Reads SCIM resources from JSON.
///
/// Keys that resolve to no attribute descriptor are skipped, not rejected.
/// `null` stands for an absent attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonUnmarshaller;

impl JsonUnmarshaller {
    pub fn new() -> Self {
        Self
    }

    /// Read a resource from an already parsed JSON value.
    pub fn unmarshal_value<T, F>(
        &self,
        value: &Value,
        descriptor: &Arc<ResourceDescriptor>,
        factory: &F,
    ) -> ScimResult<T>
    where
        F: ResourceFactory<T>,
    {
        self.read_resource(value, descriptor, None, factory)
            .map_err(|e| e.into_resource_error(Format::Json, descriptor.name()))
    }

    fn parse<R: Read>(reader: R) -> ScimResult<Value> {
        Ok(serde_json::from_reader(reader)?)
    }

    fn read_resource<T, F>(
        &self,
        value: &Value,
        descriptor: &Arc<ResourceDescriptor>,
        default_schemas: Option<&[String]>,
        factory: &F,
    ) -> ScimResult<T>
    where
        F: ResourceFactory<T>,
    {
        let object = self.read_object(value, descriptor, default_schemas)?;
        factory.create_resource(descriptor, object)
    }

    fn read_object(
        &self,
        value: &Value,
        descriptor: &ResourceDescriptor,
        default_schemas: Option<&[String]>,
    ) -> ScimResult<ScimObject> {
        let json = value.as_object().ok_or_else(|| {
            ScimError::invalid_resource(descriptor.name(), "expected a JSON object")
        })?;

        let schemas = match json.get(SCHEMAS_ATTRIBUTE_NAME) {
            Some(declared) => read_schemas(declared, descriptor)?,
            None => match default_schemas {
                Some(defaults) if !defaults.is_empty() => defaults.to_vec(),
                _ => vec![descriptor.schema().to_string()],
            },
        };
        let schemas = distinct_schemas(schemas);

        let mut object = ScimObject::new();
        if let [schema] = schemas.as_slice() {
            match get_ignore_case(json, schema) {
                Some(Value::Object(nested)) => {
                    trace!("Reading attributes of {} from nested object", schema);
                    self.read_schema_object(nested, schema, descriptor, &mut object)?;
                }
                _ => self.read_flat(json, schema, descriptor, &mut object)?,
            }
        } else {
            for schema in &schemas {
                match get_ignore_case(json, schema) {
                    Some(Value::Object(nested)) if descriptor.recognizes_schema(schema) => {
                        self.read_schema_object(nested, schema, descriptor, &mut object)?;
                    }
                    _ if descriptor.is_primary_schema(schema) => {
                        self.probe_top_level(json, schema, descriptor, &mut object)?;
                    }
                    _ => debug!("Skipping schema {} of {}", schema, descriptor.name()),
                }
            }
        }
        Ok(object)
    }

    /// Every key of a single-schema document is an attribute of that schema.
    ///
    /// A key naming another schema of the resource holds that schema's
    /// attributes, so extension objects survive a short `schemas` list.
    fn read_flat(
        &self,
        json: &Map<String, Value>,
        schema: &str,
        descriptor: &ResourceDescriptor,
        object: &mut ScimObject,
    ) -> ScimResult<()> {
        for (key, value) in json {
            if key == SCHEMAS_ATTRIBUTE_NAME {
                continue;
            }
            match descriptor.get_attribute(schema, key) {
                Some(attribute) => {
                    if let Some(attribute) = create(attribute, value)? {
                        object.add_attribute(attribute)?;
                    }
                }
                None => match value {
                    Value::Object(nested) if descriptor.recognizes_schema(key) => {
                        self.read_schema_object(nested, key, descriptor, object)?;
                    }
                    _ => debug!("Skipping unknown attribute '{}' of {}", key, descriptor.name()),
                },
            }
        }
        Ok(())
    }

    /// Look up each known attribute of `schema` at the top level. Unknown
    /// top-level keys are never visited.
    fn probe_top_level(
        &self,
        json: &Map<String, Value>,
        schema: &str,
        descriptor: &ResourceDescriptor,
        object: &mut ScimObject,
    ) -> ScimResult<()> {
        for attribute in descriptor.attributes_for(schema) {
            if let Some(value) = get_ignore_case(json, attribute.name()) {
                if let Some(attribute) = create(attribute, value)? {
                    object.add_attribute(attribute)?;
                }
            }
        }
        Ok(())
    }

    fn read_schema_object(
        &self,
        nested: &Map<String, Value>,
        schema: &str,
        descriptor: &ResourceDescriptor,
        object: &mut ScimObject,
    ) -> ScimResult<()> {
        for (key, value) in nested {
            match descriptor.get_attribute(schema, key) {
                Some(attribute) => {
                    if let Some(attribute) = create(attribute, value)? {
                        object.add_attribute(attribute)?;
                    }
                }
                None => debug!("Skipping unknown attribute '{}' of schema {}", key, schema),
            }
        }
        Ok(())
    }

    fn read_resources<T, F>(
        &self,
        value: &Value,
        descriptor: &Arc<ResourceDescriptor>,
        factory: &F,
    ) -> ScimResult<Resources<T>>
    where
        F: ResourceFactory<T>,
    {
        let json = value.as_object().ok_or_else(|| {
            ScimError::invalid_resource(descriptor.name(), "expected a JSON listing object")
        })?;

        let schemas = json
            .get(SCHEMAS_ATTRIBUTE_NAME)
            .map(|s| read_schemas(s, descriptor))
            .transpose()?;

        let items = match get_ignore_case(json, RESOURCES) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(entries)) => entries
                .iter()
                .map(|entry| self.read_resource(entry, descriptor, schemas.as_deref(), factory))
                .collect::<ScimResult<Vec<_>>>()?,
            Some(_) => {
                return Err(ScimError::invalid_resource(
                    descriptor.name(),
                    "'Resources' must be an array",
                ));
            }
        };

        let total_results = read_count(json, TOTAL_RESULTS).unwrap_or(0);
        let start_index = read_count(json, START_INDEX).unwrap_or(1);
        let mut resources = Resources::with_paging(items, total_results, start_index);
        if let Some(items_per_page) = read_count(json, ITEMS_PER_PAGE) {
            resources.set_items_per_page(items_per_page);
        }
        Ok(resources)
    }

    fn read_error(&self, value: &Value) -> ScimResult<ScimErrorResponse> {
        let entry = value
            .get(ERRORS)
            .and_then(Value::as_array)
            .and_then(|errors| errors.first())
            .and_then(Value::as_object)
            .ok_or_else(|| {
                ScimError::invalid_resource(ERROR_RESOURCE, "expected a non-empty 'Errors' array")
            })?;

        let code = match entry.get(CODE) {
            Some(Value::Number(n)) => n.as_u64().and_then(|c| u16::try_from(c).ok()),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
        .ok_or_else(|| ScimError::invalid_resource(ERROR_RESOURCE, "missing or invalid 'code'"))?;

        let description = match entry.get(DESCRIPTION) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        };
        Ok(ScimErrorResponse::new(code, description))
    }
}

impl Unmarshaller for JsonUnmarshaller {
    fn format(&self) -> Format {
        Format::Json
    }

    fn unmarshal<T, R, F>(
        &self,
        reader: R,
        descriptor: &Arc<ResourceDescriptor>,
        factory: &F,
    ) -> ScimResult<T>
    where
        R: Read,
        F: ResourceFactory<T>,
    {
        trace!("Unmarshalling {} resource from JSON", descriptor.name());
        Self::parse(reader)
            .and_then(|value| self.read_resource(&value, descriptor, None, factory))
            .map_err(|e| e.into_resource_error(Format::Json, descriptor.name()))
    }

    fn unmarshal_resources<T, R, F>(
        &self,
        reader: R,
        descriptor: &Arc<ResourceDescriptor>,
        factory: &F,
    ) -> ScimResult<Resources<T>>
    where
        R: Read,
        F: ResourceFactory<T>,
    {
        trace!("Unmarshalling {} listing from JSON", descriptor.name());
        Self::parse(reader)
            .and_then(|value| self.read_resources(&value, descriptor, factory))
            .map_err(|e| e.into_resource_error(Format::Json, descriptor.name()))
    }

    fn unmarshal_error<R>(&self, reader: R) -> ScimResult<ScimErrorResponse>
    where
        R: Read,
    {
        Self::parse(reader)
            .and_then(|value| self.read_error(&value))
            .map_err(|e| e.into_resource_error(Format::Json, ERROR_RESOURCE))
    }
}

/// Read a `schemas` array whose entries are URN strings or `{"uri": ..}`
/// objects.
fn read_schemas(value: &Value, descriptor: &ResourceDescriptor) -> ScimResult<Vec<String>> {
    let entries = value.as_array().ok_or_else(|| {
        ScimError::invalid_resource(descriptor.name(), "'schemas' must be an array")
    })?;
    entries
        .iter()
        .map(|entry| {
            let uri = match entry {
                Value::String(uri) => Some(uri.as_str()),
                Value::Object(object) => {
                    get_ignore_case(object, SCHEMAS_ATTRIBUTE_URI_NAME).and_then(Value::as_str)
                }
                _ => None,
            };
            uri.map(str::to_string).ok_or_else(|| {
                ScimError::invalid_resource(
                    descriptor.name(),
                    format!("invalid 'schemas' entry {}", entry),
                )
            })
        })
        .collect()
}

/// Drop repeated URNs, keeping the first spelling of each.
fn distinct_schemas(schemas: Vec<String>) -> Vec<String> {
    let mut distinct: Vec<String> = Vec::with_capacity(schemas.len());
    for schema in schemas {
        if !distinct.iter().any(|seen| seen.eq_ignore_ascii_case(&schema)) {
            distinct.push(schema);
        }
    }
    distinct
}

/// A listing count given as a JSON number or numeric string.
fn read_count(json: &Map<String, Value>, key: &str) -> Option<u64> {
    let value = get_ignore_case(json, key)?;
    let count = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Null => return None,
        _ => None,
    };
    if count.is_none() {
        warn!("Ignoring malformed listing count {}: {}", key, value);
    }
    count
}

/// Convert one wire value into an attribute of `descriptor`.
///
/// Returns `None` for `null`.
fn create(descriptor: &Arc<AttributeDescriptor>, value: &Value) -> ScimResult<Option<ScimAttribute>> {
    if value.is_null() {
        return Ok(None);
    }

    let attribute = if descriptor.is_plural() {
        let elements = match value {
            Value::Array(elements) => elements.as_slice(),
            scalar => std::slice::from_ref(scalar),
        };
        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            match element {
                Value::Null => continue,
                Value::Object(object) => values.push(create_complex(descriptor, object)?),
                Value::Array(_) => {
                    return Err(ScimError::invalid_attribute(
                        descriptor.name(),
                        "nested arrays are not allowed in a plural attribute",
                    ));
                }
                scalar => {
                    let text = scalar_text(descriptor, scalar)?;
                    values.push(ScimAttribute::wrap_as_value(
                        descriptor,
                        SimpleValue::new(descriptor.data_type(), text),
                    )?);
                }
            }
        }
        ScimAttribute::plural(Arc::clone(descriptor), values)?
    } else if descriptor.is_complex() {
        let object = value.as_object().ok_or_else(|| {
            ScimError::invalid_attribute(descriptor.name(), "expected a JSON object")
        })?;
        ScimAttribute::singular(Arc::clone(descriptor), create_complex(descriptor, object)?)?
    } else {
        let text = scalar_text(descriptor, value)?;
        ScimAttribute::simple(Arc::clone(descriptor), SimpleValue::new(descriptor.data_type(), text))?
    };
    Ok(Some(attribute))
}

fn create_complex(
    descriptor: &AttributeDescriptor,
    object: &Map<String, Value>,
) -> ScimResult<ScimAttributeValue> {
    let mut children = Vec::with_capacity(object.len());
    for (key, value) in object {
        match descriptor.sub_attribute(key) {
            Some(sub) => {
                if let Some(child) = create(sub, value)? {
                    children.push(child);
                }
            }
            None => debug!("Skipping unknown sub-attribute '{}' of {}", key, descriptor),
        }
    }
    ScimAttributeValue::complex(children)
}

/// The string form of a JSON scalar.
fn scalar_text(descriptor: &AttributeDescriptor, value: &Value) -> ScimResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(ScimError::invalid_attribute(
            descriptor.name(),
            "expected a simple value",
        )),
    }
}
