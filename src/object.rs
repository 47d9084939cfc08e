//! The resource container.
//!
//! A [`ScimObject`] groups the attributes of one resource by schema URN. It
//! is created fresh by every unmarshal call, filled as wire attributes are
//! parsed, and then handed to a resource factory. Marshalling only reads it.

use crate::attribute::ScimAttribute;
use crate::error::{ScimError, ScimResult};

/// Attributes of one resource, grouped by schema URN.
///
/// Schema groups keep the order in which they were first used; codecs put
/// the resource's primary schema first on output regardless.
#[derive(Debug, Clone, Default)]
pub struct ScimObject {
    groups: Vec<SchemaGroup>,
}

#[derive(Debug, Clone)]
struct SchemaGroup {
    schema: String,
    attributes: Vec<ScimAttribute>,
}

impl ScimObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute under its descriptor's schema.
    ///
    /// Fails with [`ScimError::DuplicateAttribute`] if the container already
    /// holds an attribute with the same (schema, name).
    pub fn add_attribute(&mut self, attribute: ScimAttribute) -> ScimResult<()> {
        if self
            .get_attribute(attribute.schema(), attribute.name())
            .is_some()
        {
            return Err(ScimError::DuplicateAttribute {
                schema: attribute.schema().to_string(),
                attribute: attribute.name().to_string(),
            });
        }
        self.group_mut(attribute.schema()).attributes.push(attribute);
        Ok(())
    }

    /// Insert an attribute, replacing any existing one with the same
    /// (schema, name). Returns the replaced attribute.
    pub fn set_attribute(&mut self, attribute: ScimAttribute) -> Option<ScimAttribute> {
        let group = self.group_mut(attribute.schema());
        match group
            .attributes
            .iter()
            .position(|a| a.name().eq_ignore_ascii_case(attribute.name()))
        {
            Some(index) => Some(std::mem::replace(&mut group.attributes[index], attribute)),
            None => {
                group.attributes.push(attribute);
                None
            }
        }
    }

    /// Attributes of one schema in insertion order; empty if none.
    pub fn get_attributes(&self, schema: &str) -> &[ScimAttribute] {
        self.group(schema)
            .map(|g| g.attributes.as_slice())
            .unwrap_or(&[])
    }

    /// Look up one attribute, ignoring case on schema and name.
    pub fn get_attribute(&self, schema: &str, name: &str) -> Option<&ScimAttribute> {
        self.get_attributes(schema)
            .iter()
            .find(|a| a.name().eq_ignore_ascii_case(name))
    }

    /// Remove and return one attribute.
    ///
    /// A schema left without attributes is no longer reported by
    /// [`ScimObject::schemas`].
    pub fn remove_attribute(&mut self, schema: &str, name: &str) -> Option<ScimAttribute> {
        let group_index = self
            .groups
            .iter()
            .position(|g| g.schema.eq_ignore_ascii_case(schema))?;
        let group = &mut self.groups[group_index];
        let index = group
            .attributes
            .iter()
            .position(|a| a.name().eq_ignore_ascii_case(name))?;
        let removed = group.attributes.remove(index);
        if group.attributes.is_empty() {
            self.groups.remove(group_index);
        }
        Some(removed)
    }

    /// Schema URNs that currently hold at least one attribute.
    pub fn schemas(&self) -> Vec<&str> {
        self.groups
            .iter()
            .filter(|g| !g.attributes.is_empty())
            .map(|g| g.schema.as_str())
            .collect()
    }

    pub fn has_schema(&self, schema: &str) -> bool {
        !self.get_attributes(schema).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.attributes.is_empty())
    }

    /// Every attribute, grouped by schema.
    pub fn iter(&self) -> impl Iterator<Item = &ScimAttribute> {
        self.groups.iter().flat_map(|g| g.attributes.iter())
    }

    fn group(&self, schema: &str) -> Option<&SchemaGroup> {
        self.groups
            .iter()
            .find(|g| g.schema.eq_ignore_ascii_case(schema))
    }

    fn group_mut(&mut self, schema: &str) -> &mut SchemaGroup {
        let position = match self
            .groups
            .iter()
            .position(|g| g.schema.eq_ignore_ascii_case(schema))
        {
            Some(position) => position,
            None => {
                self.groups.push(SchemaGroup {
                    schema: schema.to_string(),
                    attributes: Vec::new(),
                });
                self.groups.len() - 1
            }
        };
        &mut self.groups[position]
    }
}

impl PartialEq for ScimObject {
    /// Same schema set, and per schema the same set of attributes.
    fn eq(&self, other: &Self) -> bool {
        let schemas = self.schemas();
        schemas.len() == other.schemas().len()
            && schemas.iter().all(|schema| {
                let mine = self.get_attributes(schema);
                let theirs = other.get_attributes(schema);
                mine.len() == theirs.len()
                    && mine.iter().all(|a| {
                        other
                            .get_attribute(schema, a.name())
                            .is_some_and(|b| a == b)
                    })
            })
    }
}
