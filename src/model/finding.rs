//! A single reported finding and its priority.

use std::fmt;

use super::annotation::{
    BugAnnotation, ClassAnnotation, FieldAnnotation, IntAnnotation, MethodAnnotation,
    SourceLineAnnotation,
};
use crate::xml::{CollectionError, Node, TranslatorRegistry};

/// Element name of a serialized [`BugInstance`].
pub const BUG_INSTANCE_ELEMENT: &str = "BugInstance";

/// How urgent a finding is. Serialized as its numeric value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    High,
    Normal,
    Low,
    Experimental,
    Ignore,
}

impl Priority {
    pub fn value(self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Normal => 2,
            Priority::Low => 3,
            Priority::Experimental => 4,
            Priority::Ignore => 5,
        }
    }

    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Priority::High),
            2 => Some(Priority::Normal),
            3 => Some(Priority::Low),
            4 => Some(Priority::Experimental),
            5 => Some(Priority::Ignore),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// A single finding with its ordered annotations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BugInstance {
    pub bug_type: String,
    pub priority: Priority,
    pub abbrev: Option<String>,
    pub category: Option<String>,
    annotations: Vec<BugAnnotation>,
}

impl BugInstance {
    pub fn new(bug_type: impl Into<String>, priority: Priority) -> Self {
        Self {
            bug_type: bug_type.into(),
            priority,
            abbrev: None,
            category: None,
            annotations: Vec::new(),
        }
    }

    pub fn with_abbrev(mut self, abbrev: impl Into<String>) -> Self {
        self.abbrev = Some(abbrev.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_annotation(mut self, annotation: impl Into<BugAnnotation>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    pub fn add_annotation(&mut self, annotation: impl Into<BugAnnotation>) {
        self.annotations.push(annotation.into());
    }

    // ── Builders for the common annotation kinds ────────────────────

    pub fn with_class(self, class_name: impl Into<String>) -> Self {
        self.with_annotation(ClassAnnotation::new(class_name))
    }

    pub fn with_field(
        self,
        class_name: impl Into<String>,
        field_name: impl Into<String>,
        signature: impl Into<String>,
        is_static: bool,
    ) -> Self {
        self.with_annotation(FieldAnnotation::new(class_name, field_name, signature, is_static))
    }

    pub fn with_method(self, method: MethodAnnotation) -> Self {
        self.with_annotation(method)
    }

    pub fn with_source_lines(self, lines: SourceLineAnnotation) -> Self {
        self.with_annotation(lines)
    }

    pub fn with_int(self, value: i64) -> Self {
        self.with_annotation(IntAnnotation::new(value))
    }

    // ── Access ──────────────────────────────────────────────────────

    pub fn annotations(&self) -> &[BugAnnotation] {
        &self.annotations
    }

    pub fn annotations_mut(&mut self) -> &mut [BugAnnotation] {
        &mut self.annotations
    }

    // ── XML ─────────────────────────────────────────────────────────

    /// Decode a `BugInstance` element, resolving each annotation child through `registry`.
    pub fn from_node(node: &Node, registry: &TranslatorRegistry) -> Result<Self, CollectionError> {
        let raw_priority: u8 = node
            .parse_attribute("priority")?
            .ok_or_else(|| CollectionError::missing_attribute("priority on <BugInstance>"))?;
        let priority = Priority::from_value(raw_priority).ok_or_else(|| {
            CollectionError::invalid_attribute(format!("priority=\"{raw_priority}\" is out of range"))
        })?;

        let mut bug = Self::new(node.required_attribute("type")?, priority);
        bug.abbrev = node.attribute("abbrev").map(str::to_string);
        bug.category = node.attribute("category").map(str::to_string);

        for child in node.children() {
            let translator = registry
                .annotation_translator(child.name())
                .ok_or_else(|| CollectionError::unknown_element(child.name()))?;
            bug.annotations.push(translator.from_node(child, registry)?);
        }

        Ok(bug)
    }

    pub fn to_node(&self) -> Node {
        let mut node = Node::new(BUG_INSTANCE_ELEMENT)
            .with_attribute("type", &self.bug_type)
            .with_attribute("priority", self.priority.to_string());
        if let Some(abbrev) = &self.abbrev {
            node.set_attribute("abbrev", abbrev);
        }
        if let Some(category) = &self.category {
            node.set_attribute("category", category);
        }
        for annotation in &self.annotations {
            node.push_child(annotation.to_node());
        }
        node
    }
}
