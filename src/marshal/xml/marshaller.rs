use super::{
    CODE, DESCRIPTION, ERROR, ERRORS, ITEMS_PER_PAGE, RESOURCE, RESOURCES, RESPONSE, START_INDEX,
    TOTAL_RESULTS, XSI_NAMESPACE, plural_entry_name,
};
use crate::attribute::{ScimAttribute, ScimAttributeValue};
use crate::error::{ScimError, ScimResult};
use crate::marshal::{Format, Marshaller, ordered_children};
use crate::object::ScimObject;
use crate::resource::ScimResource;
use crate::response::{Resources, ScimErrorResponse};
use crate::schema::{DEFAULT_SCHEMA_PREFIX, ResourceDescriptor, SCHEMA_URI_CORE};

use log::trace;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Write;

/// Writes SCIM resources as XML.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlMarshaller;

impl XmlMarshaller {
    pub fn new() -> Self {
        Self
    }
}

impl Marshaller for XmlMarshaller {
    fn format(&self) -> Format {
        Format::Xml
    }

    fn marshal<R, W>(&self, resource: &R, writer: W) -> ScimResult<()>
    where
        R: ScimResource,
        W: Write,
    {
        let descriptor = resource.descriptor();
        trace!("Marshalling {} resource as XML", descriptor.name());
        let namespaces = Namespaces::for_resource(descriptor, resource.scim_object());
        let root = qualified(DEFAULT_SCHEMA_PREFIX, descriptor.name());

        let mut xml = XmlWriter::new(writer);
        xml.declaration()?;
        xml.start(&root, namespaces.declarations())?;
        write_attributes(&mut xml, &namespaces, descriptor, resource.scim_object())?;
        xml.end(&root)?;
        xml.finish()
    }

    fn marshal_resources<R, W>(&self, resources: &Resources<R>, writer: W) -> ScimResult<()>
    where
        R: ScimResource,
        W: Write,
    {
        trace!("Marshalling listing of {} resources as XML", resources.len());
        let response = qualified(DEFAULT_SCHEMA_PREFIX, RESPONSE);
        let list = qualified(DEFAULT_SCHEMA_PREFIX, RESOURCES);
        let item = qualified(DEFAULT_SCHEMA_PREFIX, RESOURCE);

        let mut xml = XmlWriter::new(writer);
        xml.declaration()?;
        xml.start(&response, response_declarations())?;
        xml.text_element(
            &qualified(DEFAULT_SCHEMA_PREFIX, TOTAL_RESULTS),
            &resources.total_results().to_string(),
        )?;
        xml.text_element(
            &qualified(DEFAULT_SCHEMA_PREFIX, ITEMS_PER_PAGE),
            &resources.items_per_page().to_string(),
        )?;
        xml.text_element(
            &qualified(DEFAULT_SCHEMA_PREFIX, START_INDEX),
            &resources.start_index().to_string(),
        )?;

        xml.start(&list, Vec::new())?;
        for resource in resources.items() {
            let descriptor = resource.descriptor();
            let namespaces = Namespaces::for_resource(descriptor, resource.scim_object());
            let mut attributes: Vec<(String, String)> = namespaces
                .declarations()
                .into_iter()
                .filter(|(_, uri)| {
                    // the response already binds the core schema to the default prefix
                    !(uri.eq_ignore_ascii_case(SCHEMA_URI_CORE)
                        && descriptor.is_primary_schema(SCHEMA_URI_CORE))
                })
                .collect();
            attributes.push((
                "xsi:type".to_string(),
                qualified(DEFAULT_SCHEMA_PREFIX, descriptor.name()),
            ));

            xml.start(&item, attributes)?;
            write_attributes(&mut xml, &namespaces, descriptor, resource.scim_object())?;
            xml.end(&item)?;
        }
        xml.end(&list)?;
        xml.end(&response)?;
        xml.finish()
    }

    fn marshal_error<W>(&self, error: &ScimErrorResponse, writer: W) -> ScimResult<()>
    where
        W: Write,
    {
        let response = qualified(DEFAULT_SCHEMA_PREFIX, RESPONSE);
        let errors = qualified(DEFAULT_SCHEMA_PREFIX, ERRORS);
        let entry = qualified(DEFAULT_SCHEMA_PREFIX, ERROR);

        let mut xml = XmlWriter::new(writer);
        xml.declaration()?;
        xml.start(&response, response_declarations())?;
        xml.start(&errors, Vec::new())?;
        xml.start(&entry, Vec::new())?;
        xml.text_element(&qualified(DEFAULT_SCHEMA_PREFIX, CODE), &error.code.to_string())?;
        if let Some(description) = &error.description {
            xml.text_element(&qualified(DEFAULT_SCHEMA_PREFIX, DESCRIPTION), description)?;
        }
        xml.end(&entry)?;
        xml.end(&errors)?;
        xml.end(&response)?;
        xml.finish()
    }
}

/// Prefix bindings for the schemas of one resource.
struct Namespaces {
    bindings: Vec<(String, String)>,
}

impl Namespaces {
    /// `scim` for the primary schema, `n0`, `n1`, ... for the rest.
    fn for_resource(descriptor: &ResourceDescriptor, object: &ScimObject) -> Self {
        let mut schemas: Vec<&str> = descriptor.attribute_schemas();
        for schema in object.schemas() {
            if !schemas.iter().any(|s| s.eq_ignore_ascii_case(schema)) {
                schemas.push(schema);
            }
        }

        let mut bindings = Vec::with_capacity(schemas.len());
        let mut next = 0;
        for schema in schemas {
            let prefix = if descriptor.is_primary_schema(schema) {
                DEFAULT_SCHEMA_PREFIX.to_string()
            } else {
                next += 1;
                format!("n{}", next - 1)
            };
            bindings.push((schema.to_string(), prefix));
        }
        Self { bindings }
    }

    fn prefix(&self, schema: &str) -> &str {
        self.bindings
            .iter()
            .find(|(uri, _)| uri.eq_ignore_ascii_case(schema))
            .map(|(_, prefix)| prefix.as_str())
            .unwrap_or(DEFAULT_SCHEMA_PREFIX)
    }

    /// `xmlns:<prefix>` attributes declaring every binding.
    fn declarations(&self) -> Vec<(String, String)> {
        self.bindings
            .iter()
            .map(|(uri, prefix)| (format!("xmlns:{}", prefix), uri.clone()))
            .collect()
    }
}

fn response_declarations() -> Vec<(String, String)> {
    vec![
        (
            format!("xmlns:{}", DEFAULT_SCHEMA_PREFIX),
            SCHEMA_URI_CORE.to_string(),
        ),
        ("xmlns:xsi".to_string(), XSI_NAMESPACE.to_string()),
    ]
}

fn qualified(prefix: &str, local_name: &str) -> String {
    format!("{}:{}", prefix, local_name)
}

/// Write every attribute of the container, schema by schema, each schema's
/// attributes in descriptor order.
fn write_attributes<W: Write>(
    xml: &mut XmlWriter<W>,
    namespaces: &Namespaces,
    descriptor: &ResourceDescriptor,
    object: &ScimObject,
) -> ScimResult<()> {
    for (schema, _) in &namespaces.bindings {
        let declared = descriptor
            .attributes_for(schema)
            .filter_map(|d| object.get_attribute(schema, d.name()));
        let undeclared = object
            .get_attributes(schema)
            .iter()
            .filter(|a| descriptor.get_attribute(schema, a.name()).is_none());
        for attribute in declared.chain(undeclared) {
            write_attribute(xml, namespaces, attribute)?;
        }
    }
    Ok(())
}

fn write_attribute<W: Write>(
    xml: &mut XmlWriter<W>,
    namespaces: &Namespaces,
    attribute: &ScimAttribute,
) -> ScimResult<()> {
    let prefix = namespaces.prefix(attribute.schema());
    let name = qualified(prefix, attribute.name());

    if attribute.is_plural() {
        let entry = qualified(prefix, plural_entry_name(attribute.name()));
        xml.start(&name, Vec::new())?;
        for value in attribute.values() {
            xml.start(&entry, Vec::new())?;
            write_value_content(xml, namespaces, attribute, value)?;
            xml.end(&entry)?;
        }
        return xml.end(&name);
    }

    match attribute.value() {
        Some(ScimAttributeValue::Simple(simple)) => xml.text_element(&name, simple.as_str()),
        Some(complex) => {
            xml.start(&name, Vec::new())?;
            write_value_content(xml, namespaces, attribute, complex)?;
            xml.end(&name)
        }
        None => Ok(()),
    }
}

fn write_value_content<W: Write>(
    xml: &mut XmlWriter<W>,
    namespaces: &Namespaces,
    attribute: &ScimAttribute,
    value: &ScimAttributeValue,
) -> ScimResult<()> {
    match value {
        ScimAttributeValue::Simple(simple) => xml.text(simple.as_str()),
        ScimAttributeValue::Complex(complex) => {
            for child in ordered_children(attribute.descriptor(), complex) {
                write_attribute(xml, namespaces, child)?;
            }
            Ok(())
        }
    }
}

/// Thin event writer over [`quick_xml::Writer`].
struct XmlWriter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> XmlWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            writer: Writer::new(inner),
        }
    }

    /// Stream failures come back as [`ScimError::Io`].
    fn write(&mut self, event: Event<'_>) -> ScimResult<()> {
        self.writer
            .write_event(event)
            .map_err(|e| match ScimError::from(e) {
                ScimError::Xml(quick_xml::Error::Io(io)) => {
                    ScimError::Io(std::io::Error::new(io.kind(), io.to_string()))
                }
                other => other,
            })
    }

    fn declaration(&mut self) -> ScimResult<()> {
        self.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
    }

    fn start(&mut self, name: &str, attributes: Vec<(String, String)>) -> ScimResult<()> {
        let mut start = BytesStart::new(name);
        for (key, value) in &attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }
        self.write(Event::Start(start))
    }

    fn end(&mut self, name: &str) -> ScimResult<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    fn text(&mut self, text: &str) -> ScimResult<()> {
        self.write(Event::Text(BytesText::new(text)))
    }

    fn text_element(&mut self, name: &str, text: &str) -> ScimResult<()> {
        self.start(name, Vec::new())?;
        self.text(text)?;
        self.end(name)
    }

    fn finish(self) -> ScimResult<()> {
        self.writer.into_inner().flush()?;
        Ok(())
    }
}
