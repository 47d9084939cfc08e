//! Attribute values: simple tagged text and complex child maps.
//!
//! Simple values keep their wire text verbatim together with a data type tag.
//! No range or format checks happen when a value is built from wire text;
//! the typed readers (`as_bool`, `as_date_time`, ...) validate on access.

use super::ScimAttribute;
use crate::error::{ScimError, ScimResult};
use crate::schema::DataType;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;

/// A simple (non-complex) attribute value.
///
/// Equality compares the string form only, so `"true"` read from XML equals
/// `true` built with [`SimpleValue::boolean`].
#[derive(Debug, Clone, Eq)]
pub struct SimpleValue {
    data_type: DataType,
    text: String,
}

impl SimpleValue {
    /// Create a value of `data_type` from its wire text.
    ///
    /// [`DataType::Complex`] is not a simple type; such values are tagged as
    /// strings.
    pub fn new(data_type: DataType, text: impl Into<String>) -> Self {
        let data_type = match data_type {
            DataType::Complex => DataType::String,
            other => other,
        };
        Self {
            data_type,
            text: text.into(),
        }
    }

    pub fn string(text: impl Into<String>) -> Self {
        Self::new(DataType::String, text)
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(DataType::Boolean, value.to_string())
    }

    pub fn integer(value: i64) -> Self {
        Self::new(DataType::Integer, value.to_string())
    }

    /// A datetime value rendered as RFC 3339 in UTC with millisecond precision.
    pub fn date_time(value: DateTime<Utc>) -> Self {
        Self::new(
            DataType::DateTime,
            value.to_rfc3339_opts(SecondsFormat::Millis, true),
        )
    }

    /// A binary value rendered as standard base64.
    pub fn binary(bytes: &[u8]) -> Self {
        Self::new(DataType::Binary, STANDARD.encode(bytes))
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// The string form of the value, exactly as read or built.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn as_bool(&self) -> ScimResult<bool> {
        if self.text.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if self.text.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(self.invalid(DataType::Boolean))
        }
    }

    pub fn as_i64(&self) -> ScimResult<i64> {
        self.text
            .trim()
            .parse()
            .map_err(|_| self.invalid(DataType::Integer))
    }

    pub fn as_date_time(&self) -> ScimResult<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(self.text.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| self.invalid(DataType::DateTime))
    }

    pub fn as_bytes(&self) -> ScimResult<Vec<u8>> {
        STANDARD
            .decode(self.text.trim())
            .map_err(|_| self.invalid(DataType::Binary))
    }

    fn invalid(&self, data_type: DataType) -> ScimError {
        ScimError::InvalidValue {
            data_type,
            value: self.text.clone(),
        }
    }
}

impl PartialEq for SimpleValue {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl fmt::Display for SimpleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Named child attributes of a complex value.
///
/// Names are unique ignoring case; iteration follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct ComplexValue {
    attributes: Vec<ScimAttribute>,
}

impl ComplexValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a child attribute, rejecting a second child with the same name.
    pub fn insert(&mut self, attribute: ScimAttribute) -> ScimResult<()> {
        if self.get(attribute.name()).is_some() {
            return Err(ScimError::DuplicateAttribute {
                schema: attribute.schema().to_string(),
                attribute: attribute.name().to_string(),
            });
        }
        self.attributes.push(attribute);
        Ok(())
    }

    /// Look up a child by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&ScimAttribute> {
        self.attributes
            .iter()
            .find(|a| a.name().eq_ignore_ascii_case(name))
    }

    /// Remove and return a child by name, ignoring case.
    pub fn remove(&mut self, name: &str) -> Option<ScimAttribute> {
        let position = self
            .attributes
            .iter()
            .position(|a| a.name().eq_ignore_ascii_case(name))?;
        Some(self.attributes.remove(position))
    }

    /// Children keyed by lower-cased external name, in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (String, &ScimAttribute)> {
        self.attributes
            .iter()
            .map(|a| (a.name().to_ascii_lowercase(), a))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScimAttribute> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl PartialEq for ComplexValue {
    /// Set equality over the children.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .attributes
                .iter()
                .all(|a| other.get(a.name()).is_some_and(|b| a == b))
    }
}

impl<'a> IntoIterator for &'a ComplexValue {
    type Item = &'a ScimAttribute;
    type IntoIter = std::slice::Iter<'a, ScimAttribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A single attribute value: simple tagged text or a complex child map.
#[derive(Debug, Clone, PartialEq)]
pub enum ScimAttributeValue {
    Simple(SimpleValue),
    Complex(ComplexValue),
}

impl ScimAttributeValue {
    /// Build a complex value from its children.
    pub fn complex<I>(attributes: I) -> ScimResult<Self>
    where
        I: IntoIterator<Item = ScimAttribute>,
    {
        let mut value = ComplexValue::new();
        for attribute in attributes {
            value.insert(attribute)?;
        }
        Ok(Self::Complex(value))
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, Self::Complex(_))
    }

    pub fn as_simple(&self) -> Option<&SimpleValue> {
        match self {
            Self::Simple(value) => Some(value),
            Self::Complex(_) => None,
        }
    }

    pub fn as_complex(&self) -> Option<&ComplexValue> {
        match self {
            Self::Complex(value) => Some(value),
            Self::Simple(_) => None,
        }
    }

    /// String form of a simple value.
    pub fn as_str(&self) -> Option<&str> {
        self.as_simple().map(SimpleValue::as_str)
    }

    /// Child attribute of a complex value, ignoring case.
    pub fn attribute(&self, name: &str) -> Option<&ScimAttribute> {
        self.as_complex().and_then(|c| c.get(name))
    }

    /// Simple value of a singular child of a complex value.
    pub fn sub_value(&self, name: &str) -> Option<&SimpleValue> {
        self.attribute(name)
            .and_then(ScimAttribute::value)
            .and_then(ScimAttributeValue::as_simple)
    }
}

impl From<SimpleValue> for ScimAttributeValue {
    fn from(value: SimpleValue) -> Self {
        Self::Simple(value)
    }
}

impl From<ComplexValue> for ScimAttributeValue {
    fn from(value: ComplexValue) -> Self {
        Self::Complex(value)
    }
}
