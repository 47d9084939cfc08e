//! Typed views over complex attribute values.
//!
//! These value objects convert to and from the generic [`ScimAttributeValue`]
//! tree so typed resources can expose plain Rust structs for the common
//! complex attributes.

pub mod entry;
pub mod name;

pub use entry::Entry;
pub use name::Name;

use crate::attribute::{ScimAttribute, ScimAttributeValue, SimpleValue};
use crate::error::{ScimError, ScimResult};
use crate::schema::AttributeDescriptor;
use std::sync::Arc;

/// Build a complex value from named fields, skipping `None`s.
///
/// Every field name must be a sub-attribute of `descriptor`; each value is
/// re-tagged with the sub-attribute's data type.
pub(crate) fn build_complex<'a, I>(
    descriptor: &AttributeDescriptor,
    fields: I,
) -> ScimResult<ScimAttributeValue>
where
    I: IntoIterator<Item = (&'a str, Option<String>)>,
{
    let mut children = Vec::new();
    for (name, text) in fields {
        let Some(text) = text else { continue };
        let sub = descriptor
            .sub_attribute(name)
            .ok_or_else(|| ScimError::unknown_attribute(descriptor.schema(), name))?;
        children.push(ScimAttribute::simple(
            Arc::clone(sub),
            SimpleValue::new(sub.data_type(), text),
        )?);
    }
    ScimAttributeValue::complex(children)
}

/// String form of a simple child of a complex value.
pub(crate) fn text_of(value: &ScimAttributeValue, name: &str) -> Option<String> {
    value.sub_value(name).map(|v| v.as_str().to_string())
}
