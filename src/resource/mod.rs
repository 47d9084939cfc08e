//! Typed resources built on top of the resource container.
//!
//! Codecs never know concrete resource types. On read they hand the parsed
//! [`ScimObject`] to a caller supplied [`ResourceFactory`]; on write they walk
//! the container exposed through [`ScimResource`].
//!
//! # Key Types
//!
//! - [`ScimResource`] - Anything backed by a descriptor and a container
//! - [`ResourceFactory`] - Builds a typed resource from a parsed container
//! - [`GenericResource`] - Schema-agnostic resource
//! - [`UserResource`], [`GroupResource`] - Typed accessors for the core types

pub mod group;
pub mod user;
pub mod value_objects;

pub use group::GroupResource;
pub use user::UserResource;
pub use value_objects::{Entry, Name};

use crate::attribute::{ScimAttribute, ScimAttributeValue, SimpleValue};
use crate::error::{ScimError, ScimResult};
use crate::object::ScimObject;
use crate::schema::{AttributeDescriptor, ResourceDescriptor};
use std::sync::Arc;

/// A resource backed by a descriptor and a [`ScimObject`].
pub trait ScimResource {
    fn descriptor(&self) -> &Arc<ResourceDescriptor>;

    fn scim_object(&self) -> &ScimObject;

    /// The `id` attribute of the primary schema.
    fn id(&self) -> Option<&str> {
        self.simple_value(self.descriptor().schema(), "id")
            .map(SimpleValue::as_str)
    }

    /// Value of a singular simple attribute.
    fn simple_value(&self, schema: &str, name: &str) -> Option<&SimpleValue> {
        self.scim_object()
            .get_attribute(schema, name)
            .and_then(ScimAttribute::value)
            .and_then(ScimAttributeValue::as_simple)
    }
}

/// Builds a typed resource from a parsed container.
///
/// Any `Fn(&Arc<ResourceDescriptor>, ScimObject) -> ScimResult<T>` is a
/// factory, so `GenericResource::from_parts` can be passed directly.
pub trait ResourceFactory<T> {
    fn create_resource(
        &self,
        descriptor: &Arc<ResourceDescriptor>,
        object: ScimObject,
    ) -> ScimResult<T>;
}

impl<T, F> ResourceFactory<T> for F
where
    F: Fn(&Arc<ResourceDescriptor>, ScimObject) -> ScimResult<T>,
{
    fn create_resource(
        &self,
        descriptor: &Arc<ResourceDescriptor>,
        object: ScimObject,
    ) -> ScimResult<T> {
        self(descriptor, object)
    }
}

/// A resource with no typed accessors.
#[derive(Debug, Clone)]
pub struct GenericResource {
    descriptor: Arc<ResourceDescriptor>,
    object: ScimObject,
}

impl GenericResource {
    pub fn new(descriptor: Arc<ResourceDescriptor>, object: ScimObject) -> Self {
        Self { descriptor, object }
    }

    /// Factory function form of [`GenericResource::new`].
    pub fn from_parts(descriptor: &Arc<ResourceDescriptor>, object: ScimObject) -> ScimResult<Self> {
        Ok(Self::new(Arc::clone(descriptor), object))
    }

    pub fn scim_object_mut(&mut self) -> &mut ScimObject {
        &mut self.object
    }

    pub fn into_scim_object(self) -> ScimObject {
        self.object
    }
}

impl ScimResource for GenericResource {
    fn descriptor(&self) -> &Arc<ResourceDescriptor> {
        &self.descriptor
    }

    fn scim_object(&self) -> &ScimObject {
        &self.object
    }
}

impl PartialEq for GenericResource {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor.name().eq_ignore_ascii_case(other.descriptor.name())
            && self.object == other.object
    }
}

/// Resolve a top-level attribute of the primary schema.
pub(crate) fn core_attribute<'a>(
    descriptor: &'a ResourceDescriptor,
    name: &str,
) -> ScimResult<&'a Arc<AttributeDescriptor>> {
    descriptor
        .get_attribute(descriptor.schema(), name)
        .ok_or_else(|| ScimError::unknown_attribute(descriptor.schema(), name))
}

/// Set or clear a singular simple attribute of the primary schema.
pub(crate) fn set_simple(
    descriptor: &ResourceDescriptor,
    object: &mut ScimObject,
    name: &str,
    value: Option<SimpleValue>,
) -> ScimResult<()> {
    let attribute = core_attribute(descriptor, name)?;
    match value {
        Some(value) => {
            let value = SimpleValue::new(attribute.data_type(), value.into_string());
            object.set_attribute(ScimAttribute::simple(Arc::clone(attribute), value)?);
        }
        None => {
            object.remove_attribute(descriptor.schema(), name);
        }
    }
    Ok(())
}

/// Read a plural attribute of the primary schema as entries.
pub(crate) fn entries(descriptor: &ResourceDescriptor, object: &ScimObject, name: &str) -> Vec<Entry> {
    object
        .get_attribute(descriptor.schema(), name)
        .map(|a| a.values().iter().map(Entry::from_value).collect())
        .unwrap_or_default()
}

/// Replace a plural attribute of the primary schema; an empty slice removes it.
pub(crate) fn set_entries(
    descriptor: &ResourceDescriptor,
    object: &mut ScimObject,
    name: &str,
    entries: &[Entry],
) -> ScimResult<()> {
    if entries.is_empty() {
        object.remove_attribute(descriptor.schema(), name);
        return Ok(());
    }
    let attribute = core_attribute(descriptor, name)?;
    let values = entries
        .iter()
        .map(|e| e.to_value(attribute))
        .collect::<ScimResult<Vec<_>>>()?;
    object.set_attribute(ScimAttribute::plural(Arc::clone(attribute), values)?);
    Ok(())
}
