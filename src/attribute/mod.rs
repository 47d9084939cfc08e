//! The attribute value tree.
//!
//! A [`ScimAttribute`] pairs a shared [`AttributeDescriptor`] with either one
//! value (singular) or an ordered sequence of complex values (plural). Values
//! are [`ScimAttributeValue`]s: simple tagged text or a [`ComplexValue`] whose
//! children are attributes again.

pub mod value;

pub use value::{ComplexValue, ScimAttributeValue, SimpleValue};

use crate::error::{ScimError, ScimResult};
use crate::schema::AttributeDescriptor;
use std::sync::Arc;

/// Values held by an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValues {
    Singular(ScimAttributeValue),
    Plural(Vec<ScimAttributeValue>),
}

/// An attribute value (or values) bound to its descriptor.
///
/// The attribute is plural exactly when its descriptor is; the constructors
/// enforce this along with the simple/complex shape.
#[derive(Debug, Clone)]
pub struct ScimAttribute {
    descriptor: Arc<AttributeDescriptor>,
    values: AttributeValues,
}

impl ScimAttribute {
    /// Create a singular attribute.
    pub fn singular(
        descriptor: Arc<AttributeDescriptor>,
        value: impl Into<ScimAttributeValue>,
    ) -> ScimResult<Self> {
        let value = value.into();
        if descriptor.is_plural() {
            return Err(ScimError::invalid_attribute(
                descriptor.name(),
                "plural attribute given a single value",
            ));
        }
        if descriptor.is_complex() != value.is_complex() {
            return Err(ScimError::invalid_attribute(
                descriptor.name(),
                if descriptor.is_complex() {
                    "complex attribute given a simple value"
                } else {
                    "simple attribute given a complex value"
                },
            ));
        }
        Ok(Self {
            descriptor,
            values: AttributeValues::Singular(value),
        })
    }

    /// Create a singular simple attribute.
    pub fn simple(descriptor: Arc<AttributeDescriptor>, value: SimpleValue) -> ScimResult<Self> {
        Self::singular(descriptor, value)
    }

    /// Create a singular complex attribute from its children.
    pub fn complex<I>(descriptor: Arc<AttributeDescriptor>, children: I) -> ScimResult<Self>
    where
        I: IntoIterator<Item = ScimAttribute>,
    {
        Self::singular(descriptor, ScimAttributeValue::complex(children)?)
    }

    /// Create a plural attribute; every element must be a complex value.
    pub fn plural(
        descriptor: Arc<AttributeDescriptor>,
        values: Vec<ScimAttributeValue>,
    ) -> ScimResult<Self> {
        if !descriptor.is_plural() {
            return Err(ScimError::invalid_attribute(
                descriptor.name(),
                "singular attribute given multiple values",
            ));
        }
        if values.iter().any(|v| !v.is_complex()) {
            return Err(ScimError::invalid_attribute(
                descriptor.name(),
                "plural attribute elements must be complex values",
            ));
        }
        Ok(Self {
            descriptor,
            values: AttributeValues::Plural(values),
        })
    }

    /// Create a plural attribute from simple values, each wrapped as the
    /// `value` sub-attribute of one element.
    pub fn plural_simple<I>(descriptor: Arc<AttributeDescriptor>, values: I) -> ScimResult<Self>
    where
        I: IntoIterator<Item = SimpleValue>,
    {
        let elements = values
            .into_iter()
            .map(|value| Self::wrap_as_value(&descriptor, value))
            .collect::<ScimResult<Vec<_>>>()?;
        Self::plural(descriptor, elements)
    }

    /// Wrap a simple value as a plural element holding only `value`.
    pub fn wrap_as_value(
        descriptor: &AttributeDescriptor,
        value: SimpleValue,
    ) -> ScimResult<ScimAttributeValue> {
        let value_descriptor = descriptor.sub_attribute("value").ok_or_else(|| {
            ScimError::invalid_attribute(
                descriptor.name(),
                "no 'value' sub-attribute to hold a simple element",
            )
        })?;
        let value = SimpleValue::new(value_descriptor.data_type(), value.into_string());
        ScimAttributeValue::complex([Self::simple(Arc::clone(value_descriptor), value)?])
    }

    pub fn descriptor(&self) -> &Arc<AttributeDescriptor> {
        &self.descriptor
    }

    /// External name, as declared by the descriptor.
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    pub fn schema(&self) -> &str {
        self.descriptor.schema()
    }

    pub fn is_plural(&self) -> bool {
        matches!(self.values, AttributeValues::Plural(_))
    }

    pub fn values_ref(&self) -> &AttributeValues {
        &self.values
    }

    /// The value of a singular attribute.
    pub fn value(&self) -> Option<&ScimAttributeValue> {
        match &self.values {
            AttributeValues::Singular(value) => Some(value),
            AttributeValues::Plural(_) => None,
        }
    }

    /// All values; a singular attribute yields one.
    pub fn values(&self) -> &[ScimAttributeValue] {
        match &self.values {
            AttributeValues::Singular(value) => std::slice::from_ref(value),
            AttributeValues::Plural(values) => values,
        }
    }

    /// String form of a singular simple attribute.
    pub fn as_str(&self) -> Option<&str> {
        self.value().and_then(ScimAttributeValue::as_str)
    }
}

impl PartialEq for ScimAttribute {
    fn eq(&self, other: &Self) -> bool {
        *self.descriptor == *other.descriptor && self.values == other.values
    }
}
