//! A minimal namespace-aware element tree.
//!
//! The XML reader builds the whole document in memory before conversion;
//! resource documents are small and the tree keeps lookups scoped to a
//! parent element.

use crate::error::{ScimError, ScimResult};
use crate::marshal::Format;

use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use std::io::{BufReader, Read};

/// Deepest element nesting accepted, the same limit serde_json applies.
pub(crate) const MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Element(Element),
    Text(String),
}

/// An element with its resolved namespace and local name.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Element {
    namespace: Option<String>,
    local_name: String,
    children: Vec<Node>,
}

impl Element {
    fn new(namespace: Option<String>, local_name: String) -> Self {
        Self {
            namespace,
            local_name,
            children: Vec::new(),
        }
    }

    pub(crate) fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub(crate) fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Direct child elements; text nodes are skipped.
    pub(crate) fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    pub(crate) fn has_child_elements(&self) -> bool {
        self.child_elements().next().is_some()
    }

    /// First direct child element with the given local name, ignoring case
    /// and namespace.
    pub(crate) fn child(&self, local_name: &str) -> Option<&Element> {
        self.child_elements()
            .find(|e| e.local_name.eq_ignore_ascii_case(local_name))
    }

    /// Concatenated text of this element and all descendants.
    pub(crate) fn text(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }
}

/// Parse a document and return its root element.
pub(crate) fn parse<R: Read>(input: R) -> ScimResult<Element> {
    let mut reader = NsReader::from_reader(BufReader::new(input));
    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root = None;

    loop {
        let (resolved, event) = reader.read_resolved_event_into(&mut buf)?;
        let namespace = namespace_of(resolved)?;
        match event {
            Event::Start(start) => {
                if stack.len() >= MAX_DEPTH {
                    return Err(ScimError::malformed(Format::Xml, "nesting too deep"));
                }
                stack.push(element(namespace, &start)?);
            }
            Event::Empty(start) => {
                let element = element(namespace, &start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| ScimError::malformed(Format::Xml, "unbalanced end tag"))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Text(text.unescape()?.into_owned()));
                }
            }
            Event::CData(data) => {
                if let Some(parent) = stack.last_mut() {
                    let text = utf8(&data.into_inner())?;
                    parent.children.push(Node::Text(text));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(ScimError::malformed(Format::Xml, "unexpected end of document"));
    }
    root.ok_or_else(|| ScimError::malformed(Format::Xml, "document has no root element"))
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> ScimResult<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(ScimError::malformed(
                Format::Xml,
                "document has more than one root element",
            ));
        }
    }
    Ok(())
}

fn element(namespace: Option<String>, start: &BytesStart<'_>) -> ScimResult<Element> {
    let local_name = utf8(start.local_name().as_ref())?;
    Ok(Element::new(namespace, local_name))
}

fn namespace_of(resolved: ResolveResult<'_>) -> ScimResult<Option<String>> {
    match resolved {
        ResolveResult::Bound(ns) => Ok(Some(utf8(ns.as_ref())?)),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(ScimError::malformed(
            Format::Xml,
            format!("unknown namespace prefix '{}'", String::from_utf8_lossy(&prefix)),
        )),
    }
}

fn utf8(bytes: &[u8]) -> ScimResult<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| ScimError::malformed(Format::Xml, e.to_string()))
}
