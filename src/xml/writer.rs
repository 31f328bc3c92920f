//! Saving a bug collection.
//!
//! Children of the root are always written in the same order: the project,
//! application classes, findings, then errors. Legacy `<SrcMap>` elements are
//! never written; source files live on the `SourceLine` annotations.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::element;
use super::{CollectionError, Document, Node};
use crate::collection::BugCollection;
use crate::project::ProjectHandle;

/// Writes `<BugCollection>` documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionWriter;

impl CollectionWriter {
    pub fn new() -> Self {
        Self
    }

    /// Build the document tree without serializing it.
    pub fn to_document(
        &self,
        collection: &dyn BugCollection,
        project: &dyn ProjectHandle,
    ) -> Document {
        let mut root = Node::new(element::ROOT);

        project.write_node(root.add_child(element::PROJECT));

        for class_name in collection.application_classes() {
            let child = root.add_child(element::APP_CLASS);
            if collection.is_interface(class_name) {
                child.set_attribute(element::INTERFACE_ATTR, "true");
            }
            child.set_text(class_name);
        }

        for bug in collection.iter() {
            root.push_child(bug.to_node());
        }

        let errors = root.add_child(element::ERRORS);
        for message in collection.errors() {
            errors.add_child(element::ANALYSIS_ERROR).set_text(message);
        }
        for class_name in collection.missing_classes() {
            errors.add_child(element::MISSING_CLASS).set_text(class_name);
        }

        Document::new(root)
    }

    /// Serialize to `sink`. On error the sink may hold a partial document.
    pub fn write<W: Write>(
        &self,
        collection: &dyn BugCollection,
        project: &dyn ProjectHandle,
        sink: W,
    ) -> Result<(), CollectionError> {
        let document = self.to_document(collection, project);
        document.write_to(sink)?;
        tracing::debug!(
            "wrote bug collection: {} root elements",
            document.root().children().len()
        );
        Ok(())
    }

    pub fn to_bytes(
        &self,
        collection: &dyn BugCollection,
        project: &dyn ProjectHandle,
    ) -> Result<Vec<u8>, CollectionError> {
        let mut output = Vec::new();
        self.write(collection, project, &mut output)?;
        Ok(output)
    }

    /// Create (or truncate) a file and write to it.
    pub fn write_path(
        &self,
        path: impl AsRef<Path>,
        collection: &dyn BugCollection,
        project: &dyn ProjectHandle,
    ) -> Result<(), CollectionError> {
        let file = File::create(path.as_ref())?;
        let mut out = BufWriter::new(file);
        self.write(collection, project, &mut out)?;
        out.flush()?;
        Ok(())
    }
}
