//! Project metadata stored alongside the findings.
//!
//! The bug collection format embeds one `<Project>` element but does not own
//! its contents: the reader hands the element to a [`ProjectHandle`] and the
//! writer asks the handle to fill an empty one. [`Project`] is the standard
//! handle.
//!
//! ```xml
//! <Project filename="app.fbp">
//!   <Jar>build/app.jar</Jar>
//!   <AuxClasspathEntry>lib/dep.jar</AuxClasspathEntry>
//!   <SrcDir>src/main/java</SrcDir>
//! </Project>
//! ```

use crate::xml::{CollectionError, Node};

const JAR_ELEMENT: &str = "Jar";
const AUX_CLASSPATH_ELEMENT: &str = "AuxClasspathEntry";
const SRC_DIR_ELEMENT: &str = "SrcDir";
const FILENAME_ATTRIBUTE: &str = "filename";

/// Reads and writes the `<Project>` element and tracks unsaved changes.
pub trait ProjectHandle {
    /// Load state from a `<Project>` element.
    fn read_node(&mut self, node: &Node) -> Result<(), CollectionError>;

    /// Populate an empty `<Project>` element.
    fn write_node(&self, node: &mut Node);

    fn is_modified(&self) -> bool;

    fn set_modified(&mut self, modified: bool);
}

/// Analyzed archives, auxiliary classpath and source directories.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Project {
    filename: Option<String>,
    jars: Vec<String>,
    aux_classpath: Vec<String>,
    src_dirs: Vec<String>,
    modified: bool,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn set_filename(&mut self, filename: impl Into<String>) {
        self.filename = Some(filename.into());
        self.modified = true;
    }

    pub fn jars(&self) -> &[String] {
        &self.jars
    }

    pub fn aux_classpath(&self) -> &[String] {
        &self.aux_classpath
    }

    pub fn src_dirs(&self) -> &[String] {
        &self.src_dirs
    }

    /// Add an archive to analyze. Returns `false` if it was already listed.
    pub fn add_jar(&mut self, path: impl Into<String>) -> bool {
        Self::add_unique(&mut self.jars, path.into(), &mut self.modified)
    }

    pub fn add_aux_classpath_entry(&mut self, path: impl Into<String>) -> bool {
        Self::add_unique(&mut self.aux_classpath, path.into(), &mut self.modified)
    }

    pub fn add_src_dir(&mut self, path: impl Into<String>) -> bool {
        Self::add_unique(&mut self.src_dirs, path.into(), &mut self.modified)
    }

    fn add_unique(list: &mut Vec<String>, path: String, modified: &mut bool) -> bool {
        if list.contains(&path) {
            return false;
        }
        list.push(path);
        *modified = true;
        true
    }
}

impl ProjectHandle for Project {
    fn read_node(&mut self, node: &Node) -> Result<(), CollectionError> {
        if let Some(filename) = node.attribute(FILENAME_ATTRIBUTE) {
            self.filename = Some(filename.to_string());
        }

        for child in node.children() {
            let path = child.text().trim();
            match child.name() {
                JAR_ELEMENT => {
                    self.add_jar(path);
                }
                AUX_CLASSPATH_ELEMENT => {
                    self.add_aux_classpath_entry(path);
                }
                SRC_DIR_ELEMENT => {
                    self.add_src_dir(path);
                }
                other => tracing::warn!("skipping unrecognized project element <{other}>"),
            }
        }

        Ok(())
    }

    fn write_node(&self, node: &mut Node) {
        if let Some(filename) = &self.filename {
            node.set_attribute(FILENAME_ATTRIBUTE, filename);
        }
        for jar in &self.jars {
            node.add_child(JAR_ELEMENT).set_text(jar);
        }
        for entry in &self.aux_classpath {
            node.add_child(AUX_CLASSPATH_ELEMENT).set_text(entry);
        }
        for dir in &self.src_dirs {
            node.add_child(SRC_DIR_ELEMENT).set_text(dir);
        }
    }

    fn is_modified(&self) -> bool {
        self.modified
    }

    fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }
}
