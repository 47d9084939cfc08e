//! Error types for SCIM marshalling operations.
//!
//! The public unmarshal entry points only ever surface three kinds of failure:
//! [`ScimError::MalformedWireFormat`] when the input is not JSON/XML at all,
//! [`ScimError::InvalidResource`] when the input parses but does not have the
//! shape of the expected resource, and [`ScimError::Io`] when the underlying
//! stream fails. The remaining variants are produced by the building blocks
//! (schema model, value tree, resource container) and are normalized at the
//! codec boundary by [`ScimError::into_resource_error`].

use crate::marshal::Format;
use crate::schema::DataType;

/// Main error type for SCIM marshalling operations.
#[derive(Debug, thiserror::Error)]
pub enum ScimError {
    /// The input stream is not valid JSON or XML
    #[error("Malformed {format} input: {message}")]
    MalformedWireFormat { format: Format, message: String },

    /// The input parses but violates the expected resource shape
    #[error("Resource '{resource}' is malformed: {message}")]
    InvalidResource { resource: String, message: String },

    /// A wire key has no matching attribute descriptor
    #[error("Unknown attribute '{attribute}' in schema '{schema}'")]
    UnknownAttribute { schema: String, attribute: String },

    /// Two attributes with the same (schema, name) were added to one container
    #[error("Attribute '{attribute}' is already present in schema '{schema}'")]
    DuplicateAttribute { schema: String, attribute: String },

    /// An attribute value does not agree with its descriptor
    #[error("Invalid attribute '{attribute}': {message}")]
    InvalidAttribute { attribute: String, message: String },

    /// The text of a simple value cannot be read as its declared data type
    #[error("Value '{value}' is not a valid {data_type}")]
    InvalidValue { data_type: DataType, value: String },

    /// A resource definition could not be turned into a descriptor
    #[error("Invalid schema definition: {message}")]
    SchemaDefinition { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML reader/writer errors
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Failure of the underlying byte stream
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

impl ScimError {
    /// Create an invalid resource error
    pub fn invalid_resource(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidResource {
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// Create an invalid attribute error
    pub fn invalid_attribute(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            attribute: attribute.into(),
            message: message.into(),
        }
    }

    /// Create an unknown attribute error
    pub fn unknown_attribute(schema: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::UnknownAttribute {
            schema: schema.into(),
            attribute: attribute.into(),
        }
    }

    /// Create a schema definition error
    pub fn schema_definition(message: impl Into<String>) -> Self {
        Self::SchemaDefinition {
            message: message.into(),
        }
    }

    /// Create a malformed wire format error
    pub fn malformed(format: Format, message: impl Into<String>) -> Self {
        Self::MalformedWireFormat {
            format,
            message: message.into(),
        }
    }

    /// Whether this error came from the underlying stream.
    pub fn is_io(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::Json(e) => e.is_io(),
            Self::Xml(quick_xml::Error::Io(_)) => true,
            _ => false,
        }
    }

    /// Normalize an internal failure into the error surfaced by `unmarshal`.
    ///
    /// Stream failures become [`ScimError::Io`], syntax failures become
    /// [`ScimError::MalformedWireFormat`], and everything else is rewrapped
    /// as [`ScimError::InvalidResource`] carrying the resource name.
    pub fn into_resource_error(self, format: Format, resource: &str) -> Self {
        match self {
            Self::MalformedWireFormat { .. } | Self::InvalidResource { .. } | Self::Io(_) => self,
            Self::Json(e) if e.is_io() => Self::Io(e.into()),
            Self::Json(e) if e.is_syntax() || e.is_eof() => Self::malformed(format, e.to_string()),
            Self::Xml(quick_xml::Error::Io(e)) => {
                Self::Io(std::io::Error::new(e.kind(), e.to_string()))
            }
            Self::Xml(e) => Self::malformed(format, e.to_string()),
            other => Self::invalid_resource(resource, other.to_string()),
        }
    }
}

// Result type alias for convenience
pub type ScimResult<T> = Result<T, ScimError>;
