//! Element-name dispatch for decoding findings and annotations.
//!
//! The reader only knows the fixed bookkeeping elements of a saved
//! collection. Every other top-level element is handed to the
//! [`FindingTranslator`] registered under its name, and every child of a
//! finding to the matching [`AnnotationTranslator`].
//!
//! The registry starts empty. Hosts call [`TranslatorRegistry::register_builtins`]
//! (or build with [`TranslatorRegistry::with_builtins`]) once before the first
//! read, then add their own translators as needed.

use indexmap::IndexMap;

use super::{CollectionError, Node};
use crate::model::annotation::element;
use crate::model::{
    BUG_INSTANCE_ELEMENT, BugAnnotation, BugInstance, ClassAnnotation, FieldAnnotation,
    IntAnnotation, MethodAnnotation, SourceLineAnnotation,
};

/// Decodes a top-level element into a finding.
pub trait FindingTranslator: Send + Sync {
    /// Element name this translator handles.
    fn element_name(&self) -> &'static str;

    /// Decode `node`. The registry is passed through for annotation children.
    fn from_node(
        &self,
        node: &Node,
        registry: &TranslatorRegistry,
    ) -> Result<BugInstance, CollectionError>;
}

/// Decodes a finding's child element into an annotation.
pub trait AnnotationTranslator: Send + Sync {
    /// Element name this translator handles.
    fn element_name(&self) -> &'static str;

    fn from_node(
        &self,
        node: &Node,
        registry: &TranslatorRegistry,
    ) -> Result<BugAnnotation, CollectionError>;
}

/// Lookup table from element name to translator.
#[derive(Default)]
pub struct TranslatorRegistry {
    findings: IndexMap<&'static str, Box<dyn FindingTranslator>>,
    annotations: IndexMap<&'static str, Box<dyn AnnotationTranslator>>,
    builtins_registered: bool,
}

impl TranslatorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in finding and annotation translators.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_builtins();
        registry
    }

    /// Register the built-in translators. Calling this more than once is a no-op.
    pub fn register_builtins(&mut self) {
        if self.builtins_registered {
            return;
        }
        self.register_finding(BugInstanceTranslator);
        self.register_annotation(ClassTranslator);
        self.register_annotation(FieldTranslator);
        self.register_annotation(MethodTranslator);
        self.register_annotation(SourceLineTranslator);
        self.register_annotation(IntTranslator);
        self.builtins_registered = true;
    }

    /// Register a finding translator, replacing any previous one for the same element.
    pub fn register_finding(&mut self, translator: impl FindingTranslator + 'static) {
        let name = translator.element_name();
        tracing::trace!("registering finding translator for <{name}>");
        self.findings.insert(name, Box::new(translator));
    }

    /// Register an annotation translator, replacing any previous one for the same element.
    pub fn register_annotation(&mut self, translator: impl AnnotationTranslator + 'static) {
        let name = translator.element_name();
        tracing::trace!("registering annotation translator for <{name}>");
        self.annotations.insert(name, Box::new(translator));
    }

    /// Finding translator for a top-level element name.
    pub fn get_translator(&self, element_name: &str) -> Option<&dyn FindingTranslator> {
        self.findings.get(element_name).map(|t| t.as_ref())
    }

    /// Annotation translator for a finding child element name.
    pub fn annotation_translator(&self, element_name: &str) -> Option<&dyn AnnotationTranslator> {
        self.annotations.get(element_name).map(|t| t.as_ref())
    }

    /// Registered finding element names, in registration order.
    pub fn finding_elements(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.findings.keys().copied()
    }

    /// Registered annotation element names, in registration order.
    pub fn annotation_elements(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.annotations.keys().copied()
    }
}

impl std::fmt::Debug for TranslatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslatorRegistry")
            .field("findings", &self.findings.keys().collect::<Vec<_>>())
            .field("annotations", &self.annotations.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ============================================================================
// BUILT-IN TRANSLATORS
// ============================================================================

/// Translator for `<BugInstance>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BugInstanceTranslator;

impl FindingTranslator for BugInstanceTranslator {
    fn element_name(&self) -> &'static str {
        BUG_INSTANCE_ELEMENT
    }

    fn from_node(
        &self,
        node: &Node,
        registry: &TranslatorRegistry,
    ) -> Result<BugInstance, CollectionError> {
        BugInstance::from_node(node, registry)
    }
}

macro_rules! annotation_translator {
    ($translator:ident, $element:expr, $annotation:ty) => {
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $translator;

        impl AnnotationTranslator for $translator {
            fn element_name(&self) -> &'static str {
                $element
            }

            fn from_node(
                &self,
                node: &Node,
                _registry: &TranslatorRegistry,
            ) -> Result<BugAnnotation, CollectionError> {
                <$annotation>::from_node(node).map(BugAnnotation::from)
            }
        }
    };
}

annotation_translator!(ClassTranslator, element::CLASS, ClassAnnotation);
annotation_translator!(FieldTranslator, element::FIELD, FieldAnnotation);
annotation_translator!(MethodTranslator, element::METHOD, MethodAnnotation);
annotation_translator!(SourceLineTranslator, element::SOURCE_LINE, SourceLineAnnotation);
annotation_translator!(IntTranslator, element::INT, IntAnnotation);
