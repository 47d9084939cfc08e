//! Wire codecs for SCIM resources.
//!
//! A codec is a [`Marshaller`] (resource container to bytes) and an
//! [`Unmarshaller`] (bytes to typed resource) for one [`Format`]. Both are
//! stateless apart from their options, so one instance can serve concurrent
//! calls as long as every call has its own stream.
//!
//! # Examples
//!
//! ```rust
//! use scim_sdk::marshal::{Format, JsonMarshaller, Marshaller, JsonUnmarshaller, Unmarshaller};
//! use scim_sdk::resource::{UserResource, ScimResource};
//! use scim_sdk::schema::SchemaRegistry;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SchemaRegistry::new()?;
//! let descriptor = registry.user_descriptor().expect("User");
//!
//! let input = br#"{"schemas":["urn:scim:schemas:core:1.0"],"userName":"bjensen"}"#;
//! let user: UserResource = JsonUnmarshaller::new().unmarshal(&input[..], &descriptor, &UserResource::from_parts)?;
//! assert_eq!(user.user_name(), Some("bjensen"));
//!
//! let mut output = Vec::new();
//! JsonMarshaller::new().marshal(&user, &mut output)?;
//! assert_eq!(Format::from_media_type("application/json"), Some(Format::Json));
//! # Ok(())
//! # }
//! ```

pub mod json;
pub mod xml;

pub use json::{JsonMarshaller, JsonUnmarshaller};
pub use xml::{XmlMarshaller, XmlUnmarshaller};

use crate::attribute::{ComplexValue, ScimAttribute};
use crate::error::ScimResult;
use crate::object::ScimObject;
use crate::resource::{ResourceFactory, ScimResource};
use crate::response::{Resources, ScimErrorResponse};
use crate::schema::{AttributeDescriptor, ResourceDescriptor};

use std::fmt;
use std::io::{Read, Write};
use std::sync::Arc;

/// Wire formats supported by the codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Xml,
}

impl Format {
    /// Pick a format from a media type such as `application/json` or
    /// `text/xml; charset=utf-8`.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "application/json" | "text/json" => Some(Self::Json),
            "application/xml" | "text/xml" => Some(Self::Xml),
            other if other.ends_with("+json") => Some(Self::Json),
            other if other.ends_with("+xml") => Some(Self::Xml),
            _ => None,
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Xml => "application/xml",
        }
    }

    /// Write a resource with this format's default marshaller.
    pub fn marshal<R, W>(&self, resource: &R, writer: W) -> ScimResult<()>
    where
        R: ScimResource,
        W: Write,
    {
        match self {
            Self::Json => JsonMarshaller::new().marshal(resource, writer),
            Self::Xml => XmlMarshaller::new().marshal(resource, writer),
        }
    }

    /// Read a resource with this format's unmarshaller.
    pub fn unmarshal<T, R, F>(
        &self,
        reader: R,
        descriptor: &Arc<ResourceDescriptor>,
        factory: &F,
    ) -> ScimResult<T>
    where
        R: Read,
        F: ResourceFactory<T>,
    {
        match self {
            Self::Json => JsonUnmarshaller::new().unmarshal(reader, descriptor, factory),
            Self::Xml => XmlUnmarshaller::new().unmarshal(reader, descriptor, factory),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("JSON"),
            Self::Xml => f.write_str("XML"),
        }
    }
}

/// Writes resources, listings and error responses to a byte stream.
///
/// Stream failures surface as [`crate::ScimError::Io`].
pub trait Marshaller {
    fn format(&self) -> Format;

    fn marshal<R, W>(&self, resource: &R, writer: W) -> ScimResult<()>
    where
        R: ScimResource,
        W: Write;

    fn marshal_resources<R, W>(&self, resources: &Resources<R>, writer: W) -> ScimResult<()>
    where
        R: ScimResource,
        W: Write;

    fn marshal_error<W>(&self, error: &ScimErrorResponse, writer: W) -> ScimResult<()>
    where
        W: Write;

    /// Marshal a resource into an in-memory string.
    fn marshal_to_string<R>(&self, resource: &R) -> ScimResult<String>
    where
        R: ScimResource,
    {
        let mut buffer = Vec::new();
        self.marshal(resource, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

/// Reads resources, listings and error responses from a byte stream.
///
/// Every failure is normalized to [`crate::ScimError::MalformedWireFormat`],
/// [`crate::ScimError::InvalidResource`] or [`crate::ScimError::Io`].
pub trait Unmarshaller {
    fn format(&self) -> Format;

    fn unmarshal<T, R, F>(
        &self,
        reader: R,
        descriptor: &Arc<ResourceDescriptor>,
        factory: &F,
    ) -> ScimResult<T>
    where
        R: Read,
        F: ResourceFactory<T>;

    fn unmarshal_resources<T, R, F>(
        &self,
        reader: R,
        descriptor: &Arc<ResourceDescriptor>,
        factory: &F,
    ) -> ScimResult<Resources<T>>
    where
        R: Read,
        F: ResourceFactory<T>;

    /// Read the first entry of an error response.
    fn unmarshal_error<R>(&self, reader: R) -> ScimResult<ScimErrorResponse>
    where
        R: Read;
}

/// Children of a complex value in the order the descriptor declares its
/// sub-attributes. Children without a matching sub-attribute are skipped.
pub(crate) fn ordered_children<'a>(
    descriptor: &'a AttributeDescriptor,
    value: &'a ComplexValue,
) -> impl Iterator<Item = &'a ScimAttribute> + 'a {
    descriptor
        .sub_attributes()
        .iter()
        .filter_map(move |sub| value.get(sub.name()))
}

/// Schemas a resource is written with: the primary schema first, then every
/// other schema holding attributes, in descriptor order.
pub(crate) fn output_schemas<'a>(
    descriptor: &'a ResourceDescriptor,
    object: &'a ScimObject,
) -> Vec<&'a str> {
    let mut schemas = vec![descriptor.schema()];
    let declared = descriptor.attribute_schemas();
    let present = object.schemas();
    for schema in declared.into_iter().chain(present) {
        if object.has_schema(schema) && !schemas.iter().any(|s| s.eq_ignore_ascii_case(schema)) {
            schemas.push(schema);
        }
    }
    schemas
}
