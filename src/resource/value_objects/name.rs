//! Name value object for the components of a user's real name.

use super::{build_complex, text_of};
use crate::attribute::ScimAttributeValue;
use crate::error::ScimResult;
use crate::schema::AttributeDescriptor;
use std::fmt;

/// The components of a user's real name.
///
/// ## Examples
///
/// ```rust
/// use scim_sdk::resource::value_objects::Name;
///
/// let name = Name::new_simple("Barbara", "Jensen");
/// assert_eq!(name.display_name().as_deref(), Some("Barbara Jensen"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Name {
    pub formatted: Option<String>,
    pub family_name: Option<String>,
    pub given_name: Option<String>,
    pub middle_name: Option<String>,
    pub honorific_prefix: Option<String>,
    pub honorific_suffix: Option<String>,
}

impl Name {
    /// Create a Name with just given and family names.
    pub fn new_simple(given_name: impl Into<String>, family_name: impl Into<String>) -> Self {
        Self {
            given_name: Some(given_name.into()),
            family_name: Some(family_name.into()),
            ..Self::default()
        }
    }

    /// Create a Name with a formatted display name only.
    pub fn new_formatted(formatted: impl Into<String>) -> Self {
        Self {
            formatted: Some(formatted.into()),
            ..Self::default()
        }
    }

    /// Read a Name from a complex attribute value. Missing components stay
    /// `None`; a simple value yields an empty Name.
    pub fn from_value(value: &ScimAttributeValue) -> Self {
        Self {
            formatted: text_of(value, "formatted"),
            family_name: text_of(value, "familyName"),
            given_name: text_of(value, "givenName"),
            middle_name: text_of(value, "middleName"),
            honorific_prefix: text_of(value, "honorificPrefix"),
            honorific_suffix: text_of(value, "honorificSuffix"),
        }
    }

    /// Render as a complex value shaped by the `name` descriptor.
    pub fn to_value(&self, descriptor: &AttributeDescriptor) -> ScimResult<ScimAttributeValue> {
        build_complex(
            descriptor,
            [
                ("formatted", self.formatted.clone()),
                ("familyName", self.family_name.clone()),
                ("givenName", self.given_name.clone()),
                ("middleName", self.middle_name.clone()),
                ("honorificPrefix", self.honorific_prefix.clone()),
                ("honorificSuffix", self.honorific_suffix.clone()),
            ],
        )
    }

    /// The formatted name, or one built from the components.
    pub fn display_name(&self) -> Option<String> {
        if let Some(ref formatted) = self.formatted {
            return Some(formatted.clone());
        }

        let parts: Vec<&str> = [
            &self.honorific_prefix,
            &self.given_name,
            &self.middle_name,
            &self.family_name,
            &self.honorific_suffix,
        ]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name().as_deref().unwrap_or(""))
    }
}
