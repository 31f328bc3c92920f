//! Generic XML tree used as the intermediate form in both directions.
//!
//! ```text
//! Document
//! └── root: Node
//!     ├── name
//!     ├── attributes: IndexMap<String, String>  (preserves document order)
//!     ├── text
//!     └── children: Vec<Node>
//! ```
//!
//! Text is kept verbatim on read. Whitespace between child elements ends up in
//! the parent's text, which nothing in the bug collection format looks at.

use std::fmt::Display;
use std::io::{BufReader, Read, Write};
use std::str::FromStr;

use indexmap::IndexMap;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::CollectionError;

/// A named element with attributes, text and child elements.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    name: String,
    attributes: IndexMap<String, String>,
    text: String,
    children: Vec<Node>,
}

impl Node {
    /// Create an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set an attribute (builder style).
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Set the text content (builder style).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Element name, as written in the tag.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unescaped value of one attribute, if present.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Attributes in document order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Character data directly inside this element, unescaped and untrimmed.
    ///
    /// Empty when the element only holds children.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the element's text. Written inline when the node has no children.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Child elements in document order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Append a new empty child element and return it for population.
    pub fn add_child(&mut self, name: impl Into<String>) -> &mut Node {
        let index = self.children.len();
        self.children.push(Node::new(name));
        &mut self.children[index]
    }

    /// Append an already-built child element.
    pub fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Get an attribute that must be present.
    pub fn required_attribute(&self, key: &str) -> Result<&str, CollectionError> {
        self.attribute(key).ok_or_else(|| {
            CollectionError::missing_attribute(format!("{key} on <{}>", self.name))
        })
    }

    /// Parse an optional attribute. Absent gives `None`, unparsable is an error.
    pub fn parse_attribute<T>(&self, key: &str) -> Result<Option<T>, CollectionError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.attribute(key)
            .map(|raw| {
                raw.parse::<T>().map_err(|e| {
                    CollectionError::invalid_attribute(format!(
                        "{key}=\"{raw}\" on <{}>: {e}",
                        self.name
                    ))
                })
            })
            .transpose()
    }

    /// Boolean attribute; only a case-insensitive `true` counts, anything else is false.
    pub fn bool_attribute(&self, key: &str) -> bool {
        self.attribute(key)
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }
}

/// A parsed XML document with a single root element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    root: Node,
}

impl Document {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    pub fn into_root(self) -> Node {
        self.root
    }

    /// Parse a complete document from a byte stream.
    pub fn parse<R: Read>(input: R) -> Result<Self, CollectionError> {
        let mut reader = Reader::from_reader(BufReader::new(input));
        let mut buf = Vec::new();
        let mut stack: Vec<Node> = Vec::new();
        let mut root: Option<Node> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    stack.push(open_node(e)?);
                }
                Ok(Event::Empty(ref e)) => {
                    let node = open_node(e)?;
                    close_node(node, &mut stack, &mut root)?;
                }
                Ok(Event::End(_)) => {
                    let node = stack
                        .pop()
                        .ok_or_else(|| CollectionError::xml("Unmatched end tag"))?;
                    close_node(node, &mut stack, &mut root)?;
                }
                Ok(Event::Text(e)) => {
                    let text = e
                        .unescape()
                        .map_err(|e| CollectionError::xml(format!("Text error: {e}")))?;
                    append_text(&mut stack, &text)?;
                }
                Ok(Event::CData(e)) => {
                    let bytes = e.into_inner();
                    let text = std::str::from_utf8(&bytes)
                        .map_err(|e| CollectionError::xml(format!("Invalid UTF-8 in CDATA: {e}")))?;
                    append_text(&mut stack, text)?;
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(CollectionError::xml(format!(
                        "XML parse error at position {}: {e}",
                        reader.error_position()
                    )));
                }
                // Declarations, comments, processing instructions, doctype
                _ => {}
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(CollectionError::xml(format!(
                "Unexpected end of document inside <{}>",
                open.name
            )));
        }

        root.map(Document::new)
            .ok_or_else(|| CollectionError::xml("Document has no root element"))
    }

    /// Serialize with an XML declaration and two-space indentation.
    pub fn write_to<W: Write>(&self, sink: W) -> Result<(), CollectionError> {
        let mut writer = Writer::new_with_indent(sink, b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        write_node(&mut writer, &self.root)?;

        let mut sink = writer.into_inner();
        sink.write_all(b"\n")?;
        Ok(())
    }

    /// Serialize into a fresh buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CollectionError> {
        let mut output = Vec::new();
        self.write_to(&mut output)?;
        Ok(output)
    }
}

fn open_node(e: &BytesStart<'_>) -> Result<Node, CollectionError> {
    let name_bytes = e.name();
    let name = std::str::from_utf8(name_bytes.as_ref())
        .map_err(|e| CollectionError::xml(format!("Invalid tag name: {e}")))?;
    let mut node = Node::new(name);

    for attr_result in e.attributes() {
        let attr =
            attr_result.map_err(|e| CollectionError::xml(format!("Attribute error: {e}")))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| CollectionError::xml(format!("Attribute key error: {e}")))?;
        let value = attr
            .unescape_value()
            .map_err(|e| CollectionError::xml(format!("Attribute value error: {e}")))?;
        node.set_attribute(key, value.as_ref());
    }

    Ok(node)
}

fn close_node(
    node: Node,
    stack: &mut [Node],
    root: &mut Option<Node>,
) -> Result<(), CollectionError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else if root.is_some() {
        return Err(CollectionError::xml(format!(
            "Second root element <{}>",
            node.name
        )));
    } else {
        *root = Some(node);
    }
    Ok(())
}

fn append_text(stack: &mut [Node], text: &str) -> Result<(), CollectionError> {
    match stack.last_mut() {
        Some(node) => node.text.push_str(text),
        None if text.trim().is_empty() => {}
        None => return Err(CollectionError::xml("Text outside of the root element")),
    }
    Ok(())
}

fn write_node<W: Write>(writer: &mut Writer<W>, node: &Node) -> Result<(), CollectionError> {
    let mut start = BytesStart::new(node.name.as_str());
    for (key, value) in &node.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if node.children.is_empty() && node.text.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if node.children.is_empty() {
        writer.write_event(Event::Text(BytesText::new(&node.text)))?;
    } else {
        for child in &node.children {
            write_node(writer, child)?;
        }
    }
    writer.write_event(Event::End(BytesEnd::new(node.name.as_str())))?;

    Ok(())
}
