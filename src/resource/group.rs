//! Typed accessors for the core `Group` resource.

use super::{entries, set_entries, set_simple, Entry, ScimResource};
use crate::attribute::SimpleValue;
use crate::error::ScimResult;
use crate::object::ScimObject;
use crate::schema::ResourceDescriptor;
use std::sync::Arc;

/// A SCIM `Group`.
#[derive(Debug, Clone)]
pub struct GroupResource {
    descriptor: Arc<ResourceDescriptor>,
    object: ScimObject,
}

impl GroupResource {
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

    pub fn display_name(&self) -> Option<&str> {
        self.simple_value(self.descriptor.schema(), "displayName")
            .map(SimpleValue::as_str)
    }

    pub fn set_display_name(&mut self, display_name: &str) -> ScimResult<()> {
        set_simple(
            &self.descriptor,
            &mut self.object,
            "displayName",
            Some(SimpleValue::string(display_name)),
        )
    }

    /// Members; each entry's `value` is the member id and `display` its name.
    pub fn members(&self) -> Vec<Entry> {
        entries(&self.descriptor, &self.object, "members")
    }

    pub fn set_members(&mut self, members: &[Entry]) -> ScimResult<()> {
        set_entries(&self.descriptor, &mut self.object, "members", members)
    }

    pub fn scim_object_mut(&mut self) -> &mut ScimObject {
        &mut self.object
    }
}

impl ScimResource for GroupResource {
    fn descriptor(&self) -> &Arc<ResourceDescriptor> {
        &self.descriptor
    }

    fn scim_object(&self) -> &ScimObject {
        &self.object
    }
}

impl PartialEq for GroupResource {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor.name().eq_ignore_ascii_case(other.descriptor.name())
            && self.object == other.object
    }
}
