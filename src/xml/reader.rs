//! Loading a saved bug collection.
//!
//! Reading runs in two phases. Dispatch walks the root's children and stages
//! everything it decodes; nothing reaches the collection or the project until
//! the whole document has been accepted. Commit then hands the staged data to
//! the [`ProjectHandle`] and the [`BugCollection`], applies the legacy source
//! map, and marks the project unmodified.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::element;
use super::srcmap::{LegacySourceMap, reconcile};
use super::{CollectionError, Document, Node, TranslatorRegistry, precheck};
use crate::collection::BugCollection;
use crate::model::BugInstance;
use crate::project::ProjectHandle;

/// Reads `<BugCollection>` documents, decoding findings through a registry.
#[derive(Debug, Clone, Copy)]
pub struct CollectionReader<'r> {
    registry: &'r TranslatorRegistry,
}

/// Everything decoded from one document, not yet applied.
#[derive(Default)]
struct Staged<'d> {
    projects: Vec<&'d Node>,
    bugs: Vec<BugInstance>,
    errors: Vec<String>,
    missing_classes: Vec<String>,
    app_classes: Vec<(String, bool)>,
    source_map: LegacySourceMap,
}

impl<'r> CollectionReader<'r> {
    pub fn new(registry: &'r TranslatorRegistry) -> Self {
        Self { registry }
    }

    /// Precheck the header of any byte stream, then read it.
    ///
    /// The header window is buffered and replayed, so pipes work as well as files.
    pub fn read<R: Read>(
        &self,
        source: R,
        collection: &mut dyn BugCollection,
        project: &mut dyn ProjectHandle,
    ) -> Result<(), CollectionError> {
        let source = precheck(source)?;
        self.read_unchecked(source, collection, project)
    }

    /// Read from any byte stream without the header precheck.
    pub fn read_unchecked<R: Read>(
        &self,
        source: R,
        collection: &mut dyn BugCollection,
        project: &mut dyn ProjectHandle,
    ) -> Result<(), CollectionError> {
        let document = Document::parse(source)?;
        let root = document.root();
        if root.name() != element::ROOT {
            return Err(CollectionError::unknown_element(root.name()));
        }

        let staged = self.dispatch(root)?;

        for node in &staged.projects {
            project.read_node(node)?;
        }

        let mut added = 0;
        for bug in staged.bugs {
            if collection.add(bug) {
                added += 1;
            }
        }
        for message in staged.errors {
            collection.add_error(message);
        }
        for class_name in staged.missing_classes {
            collection.add_missing_class(class_name);
        }
        let app_class_count = staged.app_classes.len();
        for (class_name, is_interface) in staged.app_classes {
            collection.add_application_class(class_name, is_interface);
        }

        let filled = reconcile(collection, &staged.source_map);
        project.set_modified(false);

        tracing::debug!(
            "read bug collection: {added} findings, {app_class_count} app classes, {} legacy source map entries ({filled} source files filled)",
            staged.source_map.len()
        );
        Ok(())
    }

    /// Open, precheck and read a file.
    pub fn read_path(
        &self,
        path: impl AsRef<Path>,
        collection: &mut dyn BugCollection,
        project: &mut dyn ProjectHandle,
    ) -> Result<(), CollectionError> {
        let file = File::open(path.as_ref())?;
        self.read(BufReader::new(file), collection, project)
    }

    /// Precheck and read an in-memory document.
    pub fn read_bytes(
        &self,
        input: &[u8],
        collection: &mut dyn BugCollection,
        project: &mut dyn ProjectHandle,
    ) -> Result<(), CollectionError> {
        self.read(input, collection, project)
    }

    fn dispatch<'d>(&self, root: &'d Node) -> Result<Staged<'d>, CollectionError> {
        let mut staged = Staged::default();

        for child in root.children() {
            match child.name() {
                element::SRCMAP => {
                    let class_name = child.attribute(element::SRCMAP_CLASSNAME_ATTR);
                    let source_file = child.attribute(element::SRCMAP_SRCFILE_ATTR);
                    match (class_name, source_file) {
                        (Some(class_name), Some(source_file)) => {
                            staged.source_map.insert(class_name, source_file)
                        }
                        _ => tracing::trace!("ignoring incomplete <SrcMap> entry"),
                    }
                }
                element::PROJECT => staged.projects.push(child),
                element::ERRORS => Self::read_errors(child, &mut staged)?,
                element::APP_CLASS => staged.app_classes.push((
                    child.text().to_string(),
                    child.bool_attribute(element::INTERFACE_ATTR),
                )),
                name => {
                    let translator = self
                        .registry
                        .get_translator(name)
                        .ok_or_else(|| CollectionError::unknown_element(name))?;
                    staged.bugs.push(translator.from_node(child, self.registry)?);
                }
            }
        }

        Ok(staged)
    }

    fn read_errors(errors: &Node, staged: &mut Staged<'_>) -> Result<(), CollectionError> {
        for child in errors.children() {
            match child.name() {
                element::ANALYSIS_ERROR => staged.errors.push(child.text().to_string()),
                element::MISSING_CLASS => staged.missing_classes.push(child.text().to_string()),
                other => return Err(CollectionError::unknown_element(other)),
            }
        }
        Ok(())
    }
}
