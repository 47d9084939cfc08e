//! Schema-driven SCIM resource marshalling for Rust.
//!
//! Converts identity resources between a generic, schema-described
//! in-memory form and their JSON or XML wire representation.
//!
//! # Core Components
//!
//! - [`SchemaRegistry`] - Immutable registry of resource descriptors
//! - [`ScimObject`] - Attributes of one resource grouped by schema URN
//! - [`ScimAttribute`] - A singular or plural attribute bound to its descriptor
//! - [`marshal`] - JSON and XML codecs
//! - [`resource`] - Typed resources and the factory seam used by the codecs
//!
//! # Quick Start
//!
//! ```rust
//! use scim_sdk::marshal::{JsonUnmarshaller, Unmarshaller, XmlMarshaller, Marshaller};
//! use scim_sdk::resource::UserResource;
//! use scim_sdk::SchemaRegistry;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SchemaRegistry::new()?;
//! let descriptor = registry.user_descriptor().expect("User");
//!
//! let json = br#"{"userName": "bjensen", "name": {"givenName": "Barbara"}}"#;
//! let user: UserResource =
//!     JsonUnmarshaller::new().unmarshal(&json[..], &descriptor, &UserResource::from_parts)?;
//!
//! let xml = XmlMarshaller::new().marshal_to_string(&user)?;
//! assert!(xml.contains("<scim:userName>bjensen</scim:userName>"));
//! # Ok(())
//! # }
//! ```

pub mod attribute;
pub mod error;
pub mod marshal;
pub mod object;
pub mod resource;
pub mod response;
pub mod schema;

// Re-export commonly used types for convenience
pub use attribute::{ComplexValue, ScimAttribute, ScimAttributeValue, SimpleValue};
pub use error::{ScimError, ScimResult};
pub use marshal::{Format, Marshaller, Unmarshaller};
pub use object::ScimObject;
pub use resource::{GenericResource, GroupResource, ResourceFactory, ScimResource, UserResource};
pub use response::{ErrorKind, Resources, ScimErrorResponse};
pub use schema::{AttributeDescriptor, DataType, ResourceDescriptor, SchemaRegistry};
