//! Annotation variants attached to a [`BugInstance`](super::BugInstance).
//!
//! Each variant knows its own element name and how to convert to and from a
//! [`Node`]. Decoding a finding goes through the
//! [`TranslatorRegistry`](crate::xml::TranslatorRegistry) so new variants can
//! be plugged in; encoding is always self-describing.

use crate::xml::{CollectionError, Node};

/// Element names of the built-in annotation variants.
pub mod element {
    pub const CLASS: &str = "Class";
    pub const FIELD: &str = "Field";
    pub const METHOD: &str = "Method";
    pub const SOURCE_LINE: &str = "SourceLine";
    pub const INT: &str = "Int";
}

/// A typed piece of context attached to a finding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BugAnnotation {
    Class(ClassAnnotation),
    Field(FieldAnnotation),
    Method(MethodAnnotation),
    SourceLine(SourceLineAnnotation),
    Int(IntAnnotation),
}

impl BugAnnotation {
    pub fn to_node(&self) -> Node {
        match self {
            BugAnnotation::Class(a) => a.to_node(),
            BugAnnotation::Field(a) => a.to_node(),
            BugAnnotation::Method(a) => a.to_node(),
            BugAnnotation::SourceLine(a) => a.to_node(),
            BugAnnotation::Int(a) => a.to_node(),
        }
    }
}

impl From<ClassAnnotation> for BugAnnotation {
    fn from(a: ClassAnnotation) -> Self {
        BugAnnotation::Class(a)
    }
}

impl From<FieldAnnotation> for BugAnnotation {
    fn from(a: FieldAnnotation) -> Self {
        BugAnnotation::Field(a)
    }
}

impl From<MethodAnnotation> for BugAnnotation {
    fn from(a: MethodAnnotation) -> Self {
        BugAnnotation::Method(a)
    }
}

impl From<SourceLineAnnotation> for BugAnnotation {
    fn from(a: SourceLineAnnotation) -> Self {
        BugAnnotation::SourceLine(a)
    }
}

impl From<IntAnnotation> for BugAnnotation {
    fn from(a: IntAnnotation) -> Self {
        BugAnnotation::Int(a)
    }
}

// ============================================================================
// CLASS
// ============================================================================

/// A class involved in the finding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassAnnotation {
    pub class_name: String,
}

impl ClassAnnotation {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
        }
    }

    pub fn from_node(node: &Node) -> Result<Self, CollectionError> {
        Ok(Self::new(node.required_attribute("classname")?))
    }

    pub fn to_node(&self) -> Node {
        Node::new(element::CLASS).with_attribute("classname", &self.class_name)
    }
}

// ============================================================================
// FIELD
// ============================================================================

/// A field involved in the finding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldAnnotation {
    pub class_name: String,
    pub field_name: String,
    pub signature: String,
    pub is_static: bool,
}

impl FieldAnnotation {
    pub fn new(
        class_name: impl Into<String>,
        field_name: impl Into<String>,
        signature: impl Into<String>,
        is_static: bool,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            field_name: field_name.into(),
            signature: signature.into(),
            is_static,
        }
    }

    pub fn from_node(node: &Node) -> Result<Self, CollectionError> {
        Ok(Self::new(
            node.required_attribute("classname")?,
            node.required_attribute("name")?,
            node.required_attribute("signature")?,
            node.bool_attribute("isStatic"),
        ))
    }

    pub fn to_node(&self) -> Node {
        Node::new(element::FIELD)
            .with_attribute("classname", &self.class_name)
            .with_attribute("name", &self.field_name)
            .with_attribute("signature", &self.signature)
            .with_attribute("isStatic", self.is_static.to_string())
    }
}

// ============================================================================
// METHOD
// ============================================================================

/// A method involved in the finding, optionally with the lines it spans.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodAnnotation {
    pub class_name: String,
    pub method_name: String,
    pub signature: String,
    pub is_static: bool,
    /// Where the method is defined.
    pub source_lines: Option<SourceLineAnnotation>,
}

impl MethodAnnotation {
    pub fn new(
        class_name: impl Into<String>,
        method_name: impl Into<String>,
        signature: impl Into<String>,
        is_static: bool,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            method_name: method_name.into(),
            signature: signature.into(),
            is_static,
            source_lines: None,
        }
    }

    pub fn with_source_lines(mut self, source_lines: SourceLineAnnotation) -> Self {
        self.source_lines = Some(source_lines);
        self
    }

    pub fn from_node(node: &Node) -> Result<Self, CollectionError> {
        let mut method = Self::new(
            node.required_attribute("classname")?,
            node.required_attribute("name")?,
            node.required_attribute("signature")?,
            node.bool_attribute("isStatic"),
        );

        for child in node.children() {
            if child.name() != element::SOURCE_LINE {
                return Err(CollectionError::unknown_element(child.name()));
            }
            method.source_lines = Some(SourceLineAnnotation::from_node(child)?);
        }

        Ok(method)
    }

    pub fn to_node(&self) -> Node {
        let mut node = Node::new(element::METHOD)
            .with_attribute("classname", &self.class_name)
            .with_attribute("name", &self.method_name)
            .with_attribute("signature", &self.signature)
            .with_attribute("isStatic", self.is_static.to_string());
        if let Some(lines) = &self.source_lines {
            node.push_child(lines.to_node());
        }
        node
    }
}

// ============================================================================
// SOURCE LINE
// ============================================================================

/// A range of source lines (and bytecode offsets) within a class.
///
/// `source_file` is `None` when the file is unknown; older documents carried
/// that information in separate `SrcMap` elements instead.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceLineAnnotation {
    pub class_name: String,
    pub source_file: Option<String>,
    pub start_line: Option<u32>,
    pub end_line: Option<u32>,
    pub start_bytecode: Option<u32>,
    pub end_bytecode: Option<u32>,
}

impl SourceLineAnnotation {
    /// A source line annotation for a class with no location information.
    pub fn unknown(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            ..Self::default()
        }
    }

    pub fn with_lines(mut self, start: u32, end: u32) -> Self {
        self.start_line = Some(start);
        self.end_line = Some(end);
        self
    }

    pub fn with_bytecode(mut self, start: u32, end: u32) -> Self {
        self.start_bytecode = Some(start);
        self.end_bytecode = Some(end);
        self
    }

    pub fn with_source_file(mut self, source_file: impl Into<String>) -> Self {
        self.source_file = Some(source_file.into());
        self
    }

    pub fn is_source_file_known(&self) -> bool {
        self.source_file.is_some()
    }

    pub fn set_source_file(&mut self, source_file: impl Into<String>) {
        self.source_file = Some(source_file.into());
    }

    pub fn from_node(node: &Node) -> Result<Self, CollectionError> {
        Ok(Self {
            class_name: node.required_attribute("classname")?.to_string(),
            source_file: node.attribute("sourcefile").map(str::to_string),
            start_line: node.parse_attribute("start")?,
            end_line: node.parse_attribute("end")?,
            start_bytecode: node.parse_attribute("startBytecode")?,
            end_bytecode: node.parse_attribute("endBytecode")?,
        })
    }

    pub fn to_node(&self) -> Node {
        let mut node = Node::new(element::SOURCE_LINE).with_attribute("classname", &self.class_name);
        let optional = [
            ("start", self.start_line),
            ("end", self.end_line),
            ("startBytecode", self.start_bytecode),
            ("endBytecode", self.end_bytecode),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                node.set_attribute(key, value.to_string());
            }
        }
        if let Some(file) = &self.source_file {
            node.set_attribute("sourcefile", file);
        }
        node
    }
}

// ============================================================================
// INT
// ============================================================================

/// An integer value attached to a finding (counts, offsets, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntAnnotation {
    pub value: i64,
}

impl IntAnnotation {
    pub fn new(value: i64) -> Self {
        Self { value }
    }

    pub fn from_node(node: &Node) -> Result<Self, CollectionError> {
        let value = node
            .parse_attribute("value")?
            .ok_or_else(|| CollectionError::missing_attribute("value on <Int>"))?;
        Ok(Self::new(value))
    }

    pub fn to_node(&self) -> Node {
        Node::new(element::INT).with_attribute("value", self.value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_line_unknown_file_omits_attribute() {
        let node = SourceLineAnnotation::unknown("com.example.Foo")
            .with_lines(10, 12)
            .to_node();
        assert_eq!(node.attribute("classname"), Some("com.example.Foo"));
        assert_eq!(node.attribute("start"), Some("10"));
        assert_eq!(node.attribute("end"), Some("12"));
        assert_eq!(node.attribute("sourcefile"), None);
        assert_eq!(node.attribute("startBytecode"), None);
    }

    #[test]
    fn test_source_line_from_node() {
        let node = Node::new("SourceLine")
            .with_attribute("classname", "a.B")
            .with_attribute("start", "3")
            .with_attribute("endBytecode", "17")
            .with_attribute("sourcefile", "B.java");
        let lines = SourceLineAnnotation::from_node(&node).expect("decode");
        assert_eq!(lines.class_name, "a.B");
        assert_eq!(lines.start_line, Some(3));
        assert_eq!(lines.end_line, None);
        assert_eq!(lines.end_bytecode, Some(17));
        assert_eq!(lines.source_file.as_deref(), Some("B.java"));
        assert!(lines.is_source_file_known());
    }

    #[test]
    fn test_source_line_requires_classname() {
        let err = SourceLineAnnotation::from_node(&Node::new("SourceLine")).unwrap_err();
        assert!(matches!(err, CollectionError::Missing { .. }));
    }

    #[test]
    fn test_method_with_nested_source_lines() {
        let method = MethodAnnotation::new("a.B", "run", "()V", false)
            .with_source_lines(SourceLineAnnotation::unknown("a.B").with_lines(5, 9));
        let node = method.to_node();
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.children()[0].name(), "SourceLine");

        let decoded = MethodAnnotation::from_node(&node).expect("decode");
        assert_eq!(decoded, method);
    }

    #[test]
    fn test_method_rejects_unknown_child() {
        let mut node = MethodAnnotation::new("a.B", "run", "()V", true).to_node();
        node.add_child("Bogus");
        let err = MethodAnnotation::from_node(&node).unwrap_err();
        assert!(matches!(err, CollectionError::UnknownElement(ref n) if n == "Bogus"));
    }

    #[test]
    fn test_field_static_flag() {
        let field = FieldAnnotation::new("a.B", "count", "I", true);
        let node = field.to_node();
        assert_eq!(node.attribute("isStatic"), Some("true"));
        assert_eq!(FieldAnnotation::from_node(&node).unwrap(), field);
    }

    #[test]
    fn test_int_requires_value() {
        assert!(IntAnnotation::from_node(&Node::new("Int")).is_err());
        let node = Node::new("Int").with_attribute("value", "-7");
        assert_eq!(IntAnnotation::from_node(&node).unwrap().value, -7);
    }

    #[test]
    fn test_enum_to_node_uses_variant_element() {
        let annotations: [BugAnnotation; 2] = [
            ClassAnnotation::new("a.B").into(),
            IntAnnotation::new(4).into(),
        ];
        let nodes: Vec<Node> = annotations.iter().map(BugAnnotation::to_node).collect();
        let names: Vec<&str> = nodes.iter().map(Node::name).collect();
        assert_eq!(names, ["Class", "Int"]);
    }
}
