//! Entry value object for elements of plural attributes.
//!
//! Most plural SCIM attributes (`emails`, `phoneNumbers`, `groups`,
//! `members`, ...) share one element shape: a `value` plus the common
//! `type`, `primary`, `display` and `operation` sub-attributes.

use super::{build_complex, text_of};
use crate::attribute::ScimAttributeValue;
use crate::error::ScimResult;
use crate::schema::AttributeDescriptor;

/// One element of a plural attribute with the common sub-attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub value: Option<String>,
    pub entry_type: Option<String>,
    pub primary: Option<bool>,
    pub display: Option<String>,
    pub operation: Option<String>,
}

impl Entry {
    /// Create an entry holding only a value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Set the `type` sub-attribute.
    pub fn with_type(mut self, entry_type: impl Into<String>) -> Self {
        self.entry_type = Some(entry_type.into());
        self
    }

    /// Set the `primary` sub-attribute.
    pub fn with_primary(mut self, primary: bool) -> Self {
        self.primary = Some(primary);
        self
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Read an entry from a plural element. A `primary` that is not a
    /// boolean is treated as absent.
    pub fn from_value(value: &ScimAttributeValue) -> Self {
        Self {
            value: text_of(value, "value"),
            entry_type: text_of(value, "type"),
            primary: value.sub_value("primary").and_then(|v| v.as_bool().ok()),
            display: text_of(value, "display"),
            operation: text_of(value, "operation"),
        }
    }

    /// Render as an element of the plural attribute `descriptor`.
    pub fn to_value(&self, descriptor: &AttributeDescriptor) -> ScimResult<ScimAttributeValue> {
        build_complex(
            descriptor,
            [
                ("value", self.value.clone()),
                ("type", self.entry_type.clone()),
                ("primary", self.primary.map(|p| p.to_string())),
                ("display", self.display.clone()),
                ("operation", self.operation.clone()),
            ],
        )
    }

    pub fn is_primary(&self) -> bool {
        self.primary.unwrap_or(false)
    }
}
