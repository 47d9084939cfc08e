//! Serialized resource definitions and their conversion into descriptors.
//!
//! Resource definitions are the JSON documents the registry loads at startup
//! (embedded or from a schema directory). They are plain serde structs; the
//! conversion into [`ResourceDescriptor`] fills in schema inheritance and the
//! common multi-valued sub-attributes.

use super::types::{AttributeDescriptor, DataType, ResourceDescriptor};
use crate::error::{ScimError, ScimResult};
use serde::{Deserialize, Serialize};

/// A resource type as written in a definition file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDefinition {
    /// Resource type name, e.g. `User`
    pub name: String,
    /// Primary schema URN
    pub schema: String,
    /// Query endpoint, e.g. `Users`
    #[serde(default)]
    pub endpoint: String,
    /// Human readable description
    #[serde(default)]
    pub description: String,
    /// Attribute definitions
    #[serde(default)]
    pub attributes: Vec<AttributeDefinition>,
}

/// An attribute as written in a definition file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDefinition {
    /// Attribute name
    pub name: String,
    /// Schema URN, defaults to the owning resource's (or parent's) schema
    #[serde(default)]
    pub schema: Option<String>,
    /// Data type of the attribute
    #[serde(rename = "type", default)]
    pub data_type: DataType,
    /// Whether this attribute can have multiple values
    #[serde(default)]
    pub multi_valued: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub case_exact: bool,
    #[serde(default)]
    pub description: String,
    /// Allowed values for the `type` sub-attribute
    #[serde(default)]
    pub canonical_values: Vec<String>,
    /// Sub-attributes for complex and multi-valued types
    #[serde(default)]
    pub sub_attributes: Vec<AttributeDefinition>,
}

impl ResourceDefinition {
    /// Parse a definition from its JSON text.
    pub fn from_json_str(content: &str) -> ScimResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Convert into an immutable resource descriptor.
    pub fn into_descriptor(self) -> ScimResult<ResourceDescriptor> {
        if self.name.is_empty() {
            return Err(ScimError::schema_definition("resource name is empty"));
        }
        if self.schema.is_empty() {
            return Err(ScimError::schema_definition(format!(
                "resource '{}' has no schema URN",
                self.name
            )));
        }

        let attributes = self
            .attributes
            .into_iter()
            .map(|attribute| attribute.into_descriptor(&self.schema))
            .collect::<ScimResult<Vec<_>>>()?;

        Ok(
            ResourceDescriptor::new(self.name, self.schema, self.endpoint, attributes)?
                .with_description(self.description),
        )
    }
}

impl AttributeDefinition {
    /// Convert into a descriptor, inheriting `default_schema` when no schema
    /// is declared.
    pub fn into_descriptor(self, default_schema: &str) -> ScimResult<AttributeDescriptor> {
        if self.name.is_empty() {
            return Err(ScimError::schema_definition(format!(
                "attribute without a name in schema '{default_schema}'"
            )));
        }
        let schema = self.schema.unwrap_or_else(|| default_schema.to_string());

        let descriptor = match (self.multi_valued, self.data_type) {
            (true, DataType::Complex) => {
                let subs = Self::convert_all(self.sub_attributes, &schema)?;
                AttributeDescriptor::complex_multi_valued(schema, self.name, subs)
            }
            (true, data_type) => {
                if !self.sub_attributes.is_empty() {
                    return Err(ScimError::schema_definition(format!(
                        "simple multi-valued attribute '{}' declares sub-attributes",
                        self.name
                    )));
                }
                AttributeDescriptor::simple_multi_valued(schema, self.name, data_type)
            }
            (false, DataType::Complex) => {
                if self.sub_attributes.is_empty() {
                    return Err(ScimError::schema_definition(format!(
                        "complex attribute '{}' has no sub-attributes",
                        self.name
                    )));
                }
                let subs = Self::convert_all(self.sub_attributes, &schema)?;
                AttributeDescriptor::complex(schema, self.name, subs)
            }
            (false, data_type) => {
                if !self.sub_attributes.is_empty() {
                    return Err(ScimError::schema_definition(format!(
                        "simple attribute '{}' declares sub-attributes",
                        self.name
                    )));
                }
                AttributeDescriptor::simple(schema, self.name, data_type)
            }
        };

        Ok(descriptor
            .required(self.required)
            .read_only(self.read_only)
            .case_exact(self.case_exact)
            .description(self.description)
            .canonical_values(self.canonical_values))
    }

    fn convert_all(
        definitions: Vec<AttributeDefinition>,
        schema: &str,
    ) -> ScimResult<Vec<AttributeDescriptor>> {
        definitions
            .into_iter()
            .map(|definition| definition.into_descriptor(schema))
            .collect()
    }
}
