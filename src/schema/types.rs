//! Core schema type definitions for SCIM resources.
//!
//! This module contains the descriptors that tell the codecs which attributes
//! a resource type has, which schema URN each one belongs to, and whether it
//! is simple, complex, or plural. Descriptors are built once when a schema is
//! loaded and are shared read-only (behind [`Arc`]) by every marshal and
//! unmarshal call afterwards.

use crate::error::{ScimError, ScimResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// SCIM attribute data types.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum DataType {
    /// String value
    #[default]
    String,
    /// Boolean value
    Boolean,
    /// DateTime in xsd:dateTime format
    DateTime,
    /// Integer number
    Integer,
    /// Binary data (base64 encoded)
    Binary,
    /// Complex attribute with sub-attributes
    Complex,
}

impl DataType {
    /// Parse a data type name, ignoring case.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "string" => Some(Self::String),
            "boolean" => Some(Self::Boolean),
            "datetime" => Some(Self::DateTime),
            "integer" => Some(Self::Integer),
            "binary" => Some(Self::Binary),
            "complex" => Some(Self::Complex),
            _ => None,
        }
    }
}

const DATA_TYPE_NAMES: &[&str] = &["string", "boolean", "dateTime", "integer", "binary", "complex"];

// Schema files spell types inconsistently ("dateTime", "datetime", "String").
impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::parse(&name)
            .ok_or_else(|| serde::de::Error::unknown_variant(&name, DATA_TYPE_NAMES))
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::DateTime => "dateTime",
            Self::Integer => "integer",
            Self::Binary => "binary",
            Self::Complex => "complex",
        };
        f.write_str(name)
    }
}

/// Metadata for one attribute: its schema, wire name, type and shape.
///
/// A descriptor is either *simple* (data type other than
/// [`DataType::Complex`], no sub-attributes) or *complex/plural* (has
/// sub-attributes). For plural descriptors the sub-attributes describe the
/// shape of each element.
#[derive(Debug, Clone)]
pub struct AttributeDescriptor {
    schema: String,
    name: String,
    description: String,
    data_type: DataType,
    plural: bool,
    required: bool,
    read_only: bool,
    case_exact: bool,
    canonical_values: Vec<String>,
    sub_attributes: Vec<Arc<AttributeDescriptor>>,
}

impl AttributeDescriptor {
    /// Create a singular simple attribute descriptor.
    pub fn simple(schema: impl Into<String>, name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            description: String::new(),
            data_type,
            plural: false,
            required: false,
            read_only: false,
            case_exact: false,
            canonical_values: Vec::new(),
            sub_attributes: Vec::new(),
        }
    }

    /// Create a singular complex attribute descriptor.
    ///
    /// The sub-attributes are re-homed under `schema`.
    pub fn complex(
        schema: impl Into<String>,
        name: impl Into<String>,
        sub_attributes: Vec<AttributeDescriptor>,
    ) -> Self {
        let schema = schema.into();
        let sub_attributes = Self::adopt(&schema, sub_attributes);
        Self {
            sub_attributes,
            ..Self::simple(schema, name, DataType::Complex)
        }
    }

    /// Create a plural attribute whose elements carry a single simple `value`.
    ///
    /// Elements also get the common `type`, `primary`, `display` and
    /// `operation` sub-attributes.
    pub fn simple_multi_valued(
        schema: impl Into<String>,
        name: impl Into<String>,
        data_type: DataType,
    ) -> Self {
        let schema = schema.into();
        let mut value = Self::simple(schema.clone(), "value", data_type);
        value.required = true;
        let mut sub_attributes = vec![value];
        sub_attributes.extend(Self::common_multi_valued(&schema));
        let sub_attributes = Self::adopt(&schema, sub_attributes);
        Self {
            plural: true,
            sub_attributes,
            ..Self::simple(schema, name, data_type)
        }
    }

    /// Create a plural attribute whose elements are complex values.
    ///
    /// The common multi-valued sub-attributes are appended unless already
    /// declared.
    pub fn complex_multi_valued(
        schema: impl Into<String>,
        name: impl Into<String>,
        sub_attributes: Vec<AttributeDescriptor>,
    ) -> Self {
        let schema = schema.into();
        let mut sub_attributes = sub_attributes;
        for common in Self::common_multi_valued(&schema) {
            if !sub_attributes
                .iter()
                .any(|a| a.name.eq_ignore_ascii_case(&common.name))
            {
                sub_attributes.push(common);
            }
        }
        let sub_attributes = Self::adopt(&schema, sub_attributes);
        Self {
            plural: true,
            sub_attributes,
            ..Self::simple(schema, name, DataType::Complex)
        }
    }

    fn common_multi_valued(schema: &str) -> Vec<AttributeDescriptor> {
        let mut display = Self::simple(schema, "display", DataType::String);
        display.read_only = true;
        vec![
            Self::simple(schema, "type", DataType::String),
            Self::simple(schema, "primary", DataType::Boolean),
            display,
            Self::simple(schema, "operation", DataType::String),
        ]
    }

    fn adopt(schema: &str, sub_attributes: Vec<AttributeDescriptor>) -> Vec<Arc<AttributeDescriptor>> {
        sub_attributes
            .into_iter()
            .map(|mut sub| {
                sub.rehome(schema);
                Arc::new(sub)
            })
            .collect()
    }

    fn rehome(&mut self, schema: &str) {
        self.schema = schema.to_string();
        self.sub_attributes = self
            .sub_attributes
            .iter()
            .map(|sub| {
                let mut sub = (**sub).clone();
                sub.rehome(schema);
                Arc::new(sub)
            })
            .collect();
    }

    /// Mark the attribute as required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Mark the attribute as read-only.
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Mark string comparison as case-exact.
    pub fn case_exact(mut self, case_exact: bool) -> Self {
        self.case_exact = case_exact;
        self
    }

    /// Attach a human readable description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attach the allowed values of the `type` sub-attribute.
    pub fn canonical_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.canonical_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Schema URN this attribute belongs to.
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// External (wire) name, case preserved.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_description(&self) -> &str {
        &self.description
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn is_plural(&self) -> bool {
        self.plural
    }

    /// Whether values of this attribute are complex (non-plural).
    pub fn is_complex(&self) -> bool {
        !self.plural && self.data_type == DataType::Complex
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn is_case_exact(&self) -> bool {
        self.case_exact
    }

    pub fn get_canonical_values(&self) -> &[String] {
        &self.canonical_values
    }

    /// Sub-attributes in declaration order.
    pub fn sub_attributes(&self) -> &[Arc<AttributeDescriptor>] {
        &self.sub_attributes
    }

    /// Look up a sub-attribute by name, ignoring case.
    ///
    /// Returns `None` for unknown names and for simple descriptors; callers
    /// decide whether that is an error.
    pub fn sub_attribute(&self, name: &str) -> Option<&Arc<AttributeDescriptor>> {
        self.sub_attributes
            .iter()
            .find(|sub| sub.name.eq_ignore_ascii_case(name))
    }

    /// Whether this descriptor names `(schema, name)`, ignoring case.
    pub fn matches(&self, schema: &str, name: &str) -> bool {
        self.schema.eq_ignore_ascii_case(schema) && self.name.eq_ignore_ascii_case(name)
    }
}

impl PartialEq for AttributeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.schema, &other.name)
    }
}

impl Eq for AttributeDescriptor {}

impl fmt::Display for AttributeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.schema, self.name)
    }
}

/// Schema metadata for one resource type (e.g. `User`).
///
/// Attribute lookup is case-insensitive on the name and keyed by schema URN,
/// so extension schemas may reuse local names of the core schema.
#[derive(Debug, Clone)]
pub struct ResourceDescriptor {
    name: String,
    schema: String,
    endpoint: String,
    description: String,
    attributes: Vec<Arc<AttributeDescriptor>>,
    index: HashMap<(String, String), usize>,
}

impl ResourceDescriptor {
    /// Build a descriptor, rejecting duplicate top-level `(schema, name)` pairs.
    pub fn new(
        name: impl Into<String>,
        schema: impl Into<String>,
        endpoint: impl Into<String>,
        attributes: Vec<AttributeDescriptor>,
    ) -> ScimResult<Self> {
        let name = name.into();
        let mut index = HashMap::with_capacity(attributes.len());
        let mut stored = Vec::with_capacity(attributes.len());
        for attribute in attributes {
            let key = Self::key(&attribute.schema, &attribute.name);
            if index.insert(key, stored.len()).is_some() {
                return Err(ScimError::schema_definition(format!(
                    "resource '{}' declares attribute '{}' twice",
                    name, attribute
                )));
            }
            stored.push(Arc::new(attribute));
        }
        Ok(Self {
            name,
            schema: schema.into(),
            endpoint: endpoint.into(),
            description: String::new(),
            attributes: stored,
            index,
        })
    }

    fn key(schema: &str, name: &str) -> (String, String) {
        (schema.to_ascii_lowercase(), name.to_ascii_lowercase())
    }

    /// Attach a human readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Resource type name, e.g. `User`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Primary schema URN of the resource.
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Query endpoint, e.g. `Users`.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// All attributes in declaration order.
    pub fn attributes(&self) -> &[Arc<AttributeDescriptor>] {
        &self.attributes
    }

    /// Attributes belonging to one schema, in declaration order.
    pub fn attributes_for<'a>(
        &'a self,
        schema: &'a str,
    ) -> impl Iterator<Item = &'a Arc<AttributeDescriptor>> + 'a {
        self.attributes
            .iter()
            .filter(move |a| a.schema.eq_ignore_ascii_case(schema))
    }

    /// Look up a top-level attribute, ignoring case on both schema and name.
    pub fn get_attribute(&self, schema: &str, name: &str) -> Option<&Arc<AttributeDescriptor>> {
        self.index
            .get(&Self::key(schema, name))
            .map(|&position| &self.attributes[position])
    }

    /// Schema URNs used by this resource's attributes, primary schema first.
    pub fn attribute_schemas(&self) -> Vec<&str> {
        let mut schemas: Vec<&str> = vec![self.schema.as_str()];
        for attribute in &self.attributes {
            if !schemas.iter().any(|s| s.eq_ignore_ascii_case(&attribute.schema)) {
                schemas.push(&attribute.schema);
            }
        }
        schemas
    }

    /// Whether any attribute of this resource belongs to `schema`.
    pub fn recognizes_schema(&self, schema: &str) -> bool {
        self.attribute_schemas()
            .iter()
            .any(|s| s.eq_ignore_ascii_case(schema))
    }

    /// Whether `schema` is this resource's primary schema.
    pub fn is_primary_schema(&self, schema: &str) -> bool {
        self.schema.eq_ignore_ascii_case(schema)
    }
}
