use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};
use std::io::BufRead;

use super::error;

pub const WSDL: &str = "http://schemas.xmlsoap.org/wsdl/";
pub const SOAP: &str = "http://schemas.xmlsoap.org/wsdl/soap/";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema";

/// An owned element of the parsed document.
///
/// Attribute keys are kept as written (`xmlns:tns`, `targetNamespace`), while
/// the element itself is identified by its resolved namespace URI and local
/// name so that `xsd:schema`, `s:schema` and a default-namespaced `schema`
/// all compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub namespace: Option<String>,
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    /// Character data of this element and its descendants, CDATA included.
    pub text: String,
}

pub fn split_namespaced_name(prefixed_name: &str) -> (Option<&str>, &str) {
    match prefixed_name.split_once(':') {
        Some((prefix, name)) => (Some(prefix), name),
        None => (None, prefixed_name),
    }
}

pub fn local_name(prefixed_name: &str) -> &str {
    split_namespaced_name(prefixed_name).1
}

impl Element {
    pub fn is(&self, namespace: &str, name: &str) -> bool {
        self.name == name && self.namespace.as_deref() == Some(namespace)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Like [`Element::attr`], but an empty value counts as missing.
    pub fn non_empty_attr(&self, name: &str) -> Option<&str> {
        self.attr(name).filter(|value| !value.is_empty())
    }

    pub fn children<'a>(
        &'a self,
        namespace: &'a str,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.children
            .iter()
            .filter(move |child| child.is(namespace, name))
    }

    pub fn child(&self, namespace: &str, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.is(namespace, name))
    }

    /// First matching descendant in document order.
    pub fn descendant(&self, namespace: &str, name: &str) -> Option<&Element> {
        self.children.iter().find_map(|child| {
            if child.is(namespace, name) {
                Some(child)
            } else {
                child.descendant(namespace, name)
            }
        })
    }

    /// `<doc> a <b>x</b> c </doc>` reads `a x c`.
    pub fn text(&self) -> &str {
        self.text.trim()
    }
}

fn open_element<B: BufRead>(
    reader: &Reader<B>,
    namespace: Option<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<Element, error::Error> {
    let (_, local_name) = split_namespaced_name(reader.decode(start.name())?);

    let namespace = match namespace {
        Some(namespace) => Some(reader.decode(namespace)?.to_owned()),
        None => None,
    };

    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute?;
        let key = reader.decode(attribute.key)?.to_owned();
        let value = attribute.unescaped_value()?;
        let value = reader.decode(value.as_ref())?.to_owned();

        attributes.push((key, value));
    }

    Ok(Element {
        namespace,
        name: local_name.to_owned(),
        attributes,
        children: Vec::new(),
        text: String::new(),
    })
}

fn close_element(
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), error::Error> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => return Err(error::Error::MultipleRoots(element.name)),
        None => *root = Some(element),
    }

    Ok(())
}

fn append_text(stack: &mut [Element], text: &str) -> Result<(), error::Error> {
    if stack.is_empty() && !text.trim().is_empty() {
        return Err(error::Error::TextOutsideRoot);
    }

    for element in stack {
        element.text.push_str(text);
    }

    Ok(())
}

/// Reads the whole document into an element tree.
pub fn parse_document(document: &str) -> Result<Element, error::Error> {
    let mut reader = Reader::from_str(document);

    let mut stack = Vec::new();
    let mut root = None;
    let mut buffer = Vec::new();
    let mut namespace_buffer = Vec::new();

    loop {
        let (namespace, event) =
            reader.read_namespaced_event(&mut buffer, &mut namespace_buffer)?;

        match event {
            Event::Start(start) => stack.push(open_element(&reader, namespace, &start)?),

            Event::Empty(start) => {
                let element = open_element(&reader, namespace, &start)?;
                close_element(&mut stack, &mut root, element)?;
            }

            Event::End(..) => {
                if let Some(element) = stack.pop() {
                    close_element(&mut stack, &mut root, element)?;
                }
            }

            Event::Text(text) => {
                let unescaped = text.unescaped()?;
                append_text(&mut stack, reader.decode(unescaped.as_ref())?)?;
            }

            Event::CData(text) => append_text(&mut stack, reader.decode(text.escaped())?)?,

            Event::Eof => break,

            _ => (),
        }

        buffer.clear();
    }

    if let Some(open) = stack.pop() {
        return Err(error::Error::UnclosedElement(open.name));
    }

    root.ok_or(error::Error::MissingRoot)
}
