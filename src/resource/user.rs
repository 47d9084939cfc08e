//! Typed accessors for the core `User` resource.

use super::{core_attribute, entries, set_entries, set_simple, Entry, Name, ScimResource};
use crate::attribute::{ScimAttribute, SimpleValue};
use crate::error::ScimResult;
use crate::object::ScimObject;
use crate::schema::{ResourceDescriptor, SCHEMA_URI_ENTERPRISE_EXTENSION};
use std::sync::Arc;

/// A SCIM `User`.
///
/// ```rust
/// use scim_sdk::resource::{Entry, Name, ScimResource, UserResource};
/// use scim_sdk::schema::SchemaRegistry;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let registry = SchemaRegistry::new()?;
/// let mut user = UserResource::new(registry.user_descriptor().expect("User"));
/// user.set_user_name("bjensen")?;
/// user.set_name(&Name::new_simple("Barbara", "Jensen"))?;
/// user.set_emails(&[Entry::new("bjensen@example.com").with_type("work")])?;
/// assert_eq!(user.user_name(), Some("bjensen"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct UserResource {
    descriptor: Arc<ResourceDescriptor>,
    object: ScimObject,
}

impl UserResource {
    /// An empty user of the given resource type.
    pub fn new(descriptor: Arc<ResourceDescriptor>) -> Self {
        Self {
            descriptor,
            object: ScimObject::new(),
        }
    }

    /// Factory function for the unmarshallers.
    pub fn from_parts(descriptor: &Arc<ResourceDescriptor>, object: ScimObject) -> ScimResult<Self> {
        Ok(Self {
            descriptor: Arc::clone(descriptor),
            object,
        })
    }

    fn core_str(&self, name: &str) -> Option<&str> {
        self.simple_value(self.descriptor.schema(), name)
            .map(SimpleValue::as_str)
    }

    pub fn set_id(&mut self, id: &str) -> ScimResult<()> {
        set_simple(&self.descriptor, &mut self.object, "id", Some(SimpleValue::string(id)))
    }

    pub fn external_id(&self) -> Option<&str> {
        self.core_str("externalId")
    }

    pub fn user_name(&self) -> Option<&str> {
        self.core_str("userName")
    }

    pub fn set_user_name(&mut self, user_name: &str) -> ScimResult<()> {
        set_simple(
            &self.descriptor,
            &mut self.object,
            "userName",
            Some(SimpleValue::string(user_name)),
        )
    }

    pub fn display_name(&self) -> Option<&str> {
        self.core_str("displayName")
    }

    /// Set or clear `displayName`.
    pub fn set_display_name(&mut self, display_name: Option<&str>) -> ScimResult<()> {
        set_simple(
            &self.descriptor,
            &mut self.object,
            "displayName",
            display_name.map(SimpleValue::string),
        )
    }

    pub fn name(&self) -> Option<Name> {
        self.object
            .get_attribute(self.descriptor.schema(), "name")
            .and_then(ScimAttribute::value)
            .map(Name::from_value)
    }

    /// Replace the `name` attribute; an empty name removes it.
    pub fn set_name(&mut self, name: &Name) -> ScimResult<()> {
        if name.is_empty() {
            self.object.remove_attribute(self.descriptor.schema(), "name");
            return Ok(());
        }
        let attribute = core_attribute(&self.descriptor, "name")?;
        let value = name.to_value(attribute)?;
        self.object
            .set_attribute(ScimAttribute::singular(Arc::clone(attribute), value)?);
        Ok(())
    }

    /// `active`, or `None` if absent. Fails if the wire text is not a boolean.
    pub fn active(&self) -> ScimResult<Option<bool>> {
        self.simple_value(self.descriptor.schema(), "active")
            .map(SimpleValue::as_bool)
            .transpose()
    }

    pub fn set_active(&mut self, active: bool) -> ScimResult<()> {
        set_simple(
            &self.descriptor,
            &mut self.object,
            "active",
            Some(SimpleValue::boolean(active)),
        )
    }

    pub fn emails(&self) -> Vec<Entry> {
        entries(&self.descriptor, &self.object, "emails")
    }

    pub fn set_emails(&mut self, emails: &[Entry]) -> ScimResult<()> {
        set_entries(&self.descriptor, &mut self.object, "emails", emails)
    }

    pub fn phone_numbers(&self) -> Vec<Entry> {
        entries(&self.descriptor, &self.object, "phoneNumbers")
    }

    pub fn groups(&self) -> Vec<Entry> {
        entries(&self.descriptor, &self.object, "groups")
    }

    /// The primary email, or the first one if none is marked primary.
    pub fn primary_email(&self) -> Option<String> {
        let emails = self.emails();
        emails
            .iter()
            .find(|e| e.is_primary())
            .or_else(|| emails.first())
            .and_then(|e| e.value.clone())
    }

    /// A simple attribute of the enterprise user extension.
    pub fn enterprise_attribute(&self, name: &str) -> Option<&str> {
        self.simple_value(SCHEMA_URI_ENTERPRISE_EXTENSION, name)
            .map(SimpleValue::as_str)
    }

    pub fn scim_object_mut(&mut self) -> &mut ScimObject {
        &mut self.object
    }
}

impl ScimResource for UserResource {
    fn descriptor(&self) -> &Arc<ResourceDescriptor> {
        &self.descriptor
    }

    fn scim_object(&self) -> &ScimObject {
        &self.object
    }
}

impl PartialEq for UserResource {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor.name().eq_ignore_ascii_case(other.descriptor.name())
            && self.object == other.object
    }
}
