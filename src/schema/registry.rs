//! Schema registry for loading and accessing resource descriptors.
//!
//! The registry is built once (from the embedded definitions, a schema
//! directory, or in-memory definitions) and then frozen: it hands out
//! descriptors behind [`Arc`] and offers no way to mutate them. Share the
//! registry itself the same way, e.g. as `Arc<SchemaRegistry>`.

use super::definition::ResourceDefinition;
use super::embedded;
use super::types::ResourceDescriptor;
use crate::error::{ScimError, ScimResult};

use log::{debug, warn};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Registry of resource descriptors keyed by resource name.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    resources: Vec<Arc<ResourceDescriptor>>,
}

impl SchemaRegistry {
    /// Create a registry with the embedded core `User` and `Group` descriptors.
    pub fn new() -> ScimResult<Self> {
        Self::with_embedded_schemas()
    }

    /// Create a registry with the embedded core `User` and `Group` descriptors.
    pub fn with_embedded_schemas() -> ScimResult<Self> {
        let mut registry = Self::empty();
        registry.add_definition_str(embedded::core_user_definition())?;
        registry.add_definition_str(embedded::core_group_definition())?;
        Ok(registry)
    }

    /// Create a registry with no resource types.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a registry from already parsed definitions.
    pub fn from_definitions<I>(definitions: I) -> ScimResult<Self>
    where
        I: IntoIterator<Item = ResourceDefinition>,
    {
        let mut registry = Self::empty();
        for definition in definitions {
            registry.add_descriptor(definition.into_descriptor()?)?;
        }
        Ok(registry)
    }

    /// Create a registry by loading every `*.json` definition in a directory.
    ///
    /// Files with other extensions are ignored.
    pub fn from_schema_dir<P: AsRef<Path>>(schema_dir: P) -> ScimResult<Self> {
        let mut registry = Self::empty();
        let mut paths: Vec<_> = fs::read_dir(schema_dir.as_ref())?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<_, _>>()?;
        paths.sort();

        for path in paths {
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                warn!("Ignoring non-JSON schema file {}", path.display());
                continue;
            }
            debug!("Loading resource definition from {}", path.display());
            let content = fs::read_to_string(&path)?;
            registry.add_definition_str(&content).map_err(|e| {
                ScimError::schema_definition(format!("{}: {}", path.display(), e))
            })?;
        }
        Ok(registry)
    }

    /// Parse a JSON definition and register the resulting descriptor.
    pub fn add_definition_str(&mut self, content: &str) -> ScimResult<Arc<ResourceDescriptor>> {
        let descriptor = ResourceDefinition::from_json_str(content)?.into_descriptor()?;
        self.add_descriptor(descriptor)
    }

    /// Register a descriptor; resource names must be unique (ignoring case).
    pub fn add_descriptor(
        &mut self,
        descriptor: ResourceDescriptor,
    ) -> ScimResult<Arc<ResourceDescriptor>> {
        if self.get_resource_descriptor(descriptor.name()).is_some() {
            return Err(ScimError::schema_definition(format!(
                "resource '{}' is already registered",
                descriptor.name()
            )));
        }
        let descriptor = Arc::new(descriptor);
        self.resources.push(Arc::clone(&descriptor));
        Ok(descriptor)
    }

    /// Look up a resource descriptor by resource name, ignoring case.
    pub fn get_resource_descriptor(&self, name: &str) -> Option<Arc<ResourceDescriptor>> {
        self.resources
            .iter()
            .find(|d| d.name().eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Look up a resource descriptor by its query endpoint, ignoring case.
    pub fn get_resource_descriptor_by_endpoint(
        &self,
        endpoint: &str,
    ) -> Option<Arc<ResourceDescriptor>> {
        self.resources
            .iter()
            .find(|d| d.endpoint().eq_ignore_ascii_case(endpoint))
            .cloned()
    }

    /// All registered descriptors in registration order.
    pub fn resource_descriptors(&self) -> &[Arc<ResourceDescriptor>] {
        &self.resources
    }

    /// The core `User` descriptor, if registered.
    pub fn user_descriptor(&self) -> Option<Arc<ResourceDescriptor>> {
        self.get_resource_descriptor(super::RESOURCE_NAME_USER)
    }

    /// The core `Group` descriptor, if registered.
    pub fn group_descriptor(&self) -> Option<Arc<ResourceDescriptor>> {
        self.get_resource_descriptor(super::RESOURCE_NAME_GROUP)
    }
}
