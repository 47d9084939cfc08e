//! Schema model for SCIM resources.
//!
//! This module describes resource types as ordered collections of attribute
//! descriptors and provides the registry the codecs consult to learn which
//! attributes to expect and what shape each one has.
//!
//! # Key Types
//!
//! - [`SchemaRegistry`] - Immutable registry of resource descriptors
//! - [`ResourceDescriptor`] - Attribute metadata for one resource type
//! - [`AttributeDescriptor`] - Name, schema, type and shape of one attribute
//!
//! # Examples
//!
//! ```rust
//! use scim_sdk::schema::{SchemaRegistry, SCHEMA_URI_CORE};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SchemaRegistry::new()?;
//! let user = registry.user_descriptor().expect("embedded User descriptor");
//! assert!(user.get_attribute(SCHEMA_URI_CORE, "USERNAME").is_some());
//! # Ok(())
//! # }
//! ```

pub mod definition;
pub mod embedded;
pub mod registry;
pub mod types;


pub use definition::{AttributeDefinition, ResourceDefinition};
pub use registry::SchemaRegistry;
pub use types::{AttributeDescriptor, DataType, ResourceDescriptor};

/// The SCIM core schema URN.
pub const SCHEMA_URI_CORE: &str = "urn:scim:schemas:core:1.0";

/// The SCIM enterprise user extension schema URN.
pub const SCHEMA_URI_ENTERPRISE_EXTENSION: &str = "urn:scim:schemas:extension:enterprise:1.0";

/// Name of the wire attribute listing the schemas of a resource.
pub const SCHEMAS_ATTRIBUTE_NAME: &str = "schemas";

/// Key holding the schema URN when `schemas` entries are written as objects.
pub const SCHEMAS_ATTRIBUTE_URI_NAME: &str = "uri";

/// XML namespace prefix reserved for the resource's primary schema.
pub const DEFAULT_SCHEMA_PREFIX: &str = "scim";

pub const RESOURCE_NAME_USER: &str = "User";
pub const RESOURCE_NAME_GROUP: &str = "Group";
