use super::dom::{self, Element};
use super::{CODE, DESCRIPTION, ERROR, ERRORS, ITEMS_PER_PAGE, RESOURCE, RESOURCES, START_INDEX, TOTAL_RESULTS};
use crate::attribute::{ScimAttribute, ScimAttributeValue, SimpleValue};
use crate::error::{ScimError, ScimResult};
use crate::marshal::{Format, Unmarshaller};
use crate::object::ScimObject;
use crate::resource::ResourceFactory;
use crate::response::{Resources, ScimErrorResponse};
use crate::schema::{AttributeDescriptor, ResourceDescriptor};

use log::{debug, trace, warn};
use std::io::Read;
use std::sync::Arc;

const ERROR_RESOURCE: &str = "Error";

/// Reads SCIM resources from XML.
///
/// Elements that resolve to no attribute descriptor are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlUnmarshaller;

impl XmlUnmarshaller {
    pub fn new() -> Self {
        Self
    }

    fn read_resource<T, F>(
        &self,
        element: &Element,
        document_namespace: Option<&str>,
        descriptor: &Arc<ResourceDescriptor>,
        factory: &F,
    ) -> ScimResult<T>
    where
        F: ResourceFactory<T>,
    {
        let object = read_object(element, document_namespace, descriptor)?;
        factory.create_resource(descriptor, object)
    }

    fn read_resources<T, F>(
        &self,
        root: &Element,
        descriptor: &Arc<ResourceDescriptor>,
        factory: &F,
    ) -> ScimResult<Resources<T>>
    where
        F: ResourceFactory<T>,
    {
        let items = match root.child(RESOURCES) {
            Some(list) => list
                .child_elements()
                .filter(|e| e.local_name().eq_ignore_ascii_case(RESOURCE))
                .map(|e| self.read_resource(e, root.namespace(), descriptor, factory))
                .collect::<ScimResult<Vec<_>>>()?,
            None => Vec::new(),
        };

        let total_results = read_count(root, TOTAL_RESULTS).unwrap_or(0);
        let start_index = read_count(root, START_INDEX).unwrap_or(1);
        let mut resources = Resources::with_paging(items, total_results, start_index);
        if let Some(items_per_page) = read_count(root, ITEMS_PER_PAGE) {
            resources.set_items_per_page(items_per_page);
        }
        Ok(resources)
    }

    fn read_error(&self, root: &Element) -> ScimResult<ScimErrorResponse> {
        let errors = if root.local_name().eq_ignore_ascii_case(ERRORS) {
            Some(root)
        } else {
            root.child(ERRORS)
        };
        let entry = errors
            .and_then(|e| e.child(ERROR))
            .ok_or_else(|| ScimError::invalid_resource(ERROR_RESOURCE, "no 'Error' element"))?;

        let code = entry
            .child(CODE)
            .and_then(|c| c.text().trim().parse().ok())
            .ok_or_else(|| ScimError::invalid_resource(ERROR_RESOURCE, "missing or invalid 'code'"))?;
        let description = entry.child(DESCRIPTION).map(Element::text);
        Ok(ScimErrorResponse::new(code, description))
    }
}

impl Unmarshaller for XmlUnmarshaller {
    fn format(&self) -> Format {
        Format::Xml
    }

    fn unmarshal<T, R, F>(
        &self,
        reader: R,
        descriptor: &Arc<ResourceDescriptor>,
        factory: &F,
    ) -> ScimResult<T>
    where
        R: Read,
        F: ResourceFactory<T>,
    {
        trace!("Unmarshalling {} resource from XML", descriptor.name());
        dom::parse(reader)
            .and_then(|root| {
                if !root.local_name().eq_ignore_ascii_case(descriptor.name()) {
                    debug!(
                        "Reading <{}> element as a {} resource",
                        root.local_name(),
                        descriptor.name()
                    );
                }
                self.read_resource(&root, root.namespace(), descriptor, factory)
            })
            .map_err(|e| e.into_resource_error(Format::Xml, descriptor.name()))
    }

    fn unmarshal_resources<T, R, F>(
        &self,
        reader: R,
        descriptor: &Arc<ResourceDescriptor>,
        factory: &F,
    ) -> ScimResult<Resources<T>>
    where
        R: Read,
        F: ResourceFactory<T>,
    {
        trace!("Unmarshalling {} listing from XML", descriptor.name());
        dom::parse(reader)
            .and_then(|root| self.read_resources(&root, descriptor, factory))
            .map_err(|e| e.into_resource_error(Format::Xml, descriptor.name()))
    }

    fn unmarshal_error<R>(&self, reader: R) -> ScimResult<ScimErrorResponse>
    where
        R: Read,
    {
        dom::parse(reader)
            .and_then(|root| self.read_error(&root))
            .map_err(|e| e.into_resource_error(Format::Xml, ERROR_RESOURCE))
    }
}

/// Build a container from the direct children of a resource element.
///
/// Each child is resolved by (namespace, local name); unqualified children
/// take `document_namespace`.
fn read_object(
    element: &Element,
    document_namespace: Option<&str>,
    descriptor: &ResourceDescriptor,
) -> ScimResult<ScimObject> {
    let mut object = ScimObject::new();
    for child in element.child_elements() {
        let namespace = child
            .namespace()
            .or(document_namespace)
            .unwrap_or(descriptor.schema());
        match descriptor.get_attribute(namespace, child.local_name()) {
            Some(attribute) => object.add_attribute(create(attribute, child)?)?,
            None => debug!(
                "Skipping unknown element {{{}}}{} of {}",
                namespace,
                child.local_name(),
                descriptor.name()
            ),
        }
    }
    Ok(object)
}

fn create(descriptor: &Arc<AttributeDescriptor>, element: &Element) -> ScimResult<ScimAttribute> {
    if descriptor.is_plural() {
        let values = element
            .child_elements()
            .map(|entry| {
                if entry.has_child_elements() {
                    create_complex(descriptor, entry)
                } else {
                    let text = entry.text();
                    if text.trim().is_empty() {
                        Ok(ScimAttributeValue::Complex(Default::default()))
                    } else {
                        ScimAttribute::wrap_as_value(
                            descriptor,
                            SimpleValue::new(descriptor.data_type(), text),
                        )
                    }
                }
            })
            .collect::<ScimResult<Vec<_>>>()?;
        ScimAttribute::plural(Arc::clone(descriptor), values)
    } else if descriptor.is_complex() {
        ScimAttribute::singular(Arc::clone(descriptor), create_complex(descriptor, element)?)
    } else {
        ScimAttribute::simple(
            Arc::clone(descriptor),
            SimpleValue::new(descriptor.data_type(), element.text()),
        )
    }
}

/// Child elements resolved by local name against the sub-attributes; text
/// directly inside the element is ignored.
fn create_complex(descriptor: &AttributeDescriptor, element: &Element) -> ScimResult<ScimAttributeValue> {
    let mut children = Vec::new();
    for child in element.child_elements() {
        match descriptor.sub_attribute(child.local_name()) {
            Some(sub) => children.push(create(sub, child)?),
            None => debug!(
                "Skipping unknown sub-element {} of {}",
                child.local_name(),
                descriptor
            ),
        }
    }
    ScimAttributeValue::complex(children)
}

fn read_count(root: &Element, name: &str) -> Option<u64> {
    let text = root.child(name)?.text();
    let count = text.trim().parse().ok();
    if count.is_none() {
        warn!("Ignoring malformed listing count {}: {}", name, text);
    }
    count
}
