//! The collection surface the reader fills and the writer drains.
//!
//! [`BugCollection`] is the abstract set of operations the XML layer needs.
//! [`MemoryBugCollection`] is a plain in-memory implementation that keeps
//! everything in insertion order.

use indexmap::IndexMap;

use crate::model::BugInstance;

/// Findings, analysis errors, missing classes and application classes.
pub trait BugCollection {
    /// Add a finding. Returns `false` if the collection declined it.
    fn add(&mut self, bug: BugInstance) -> bool;

    /// Findings in collection order.
    fn iter(&self) -> Box<dyn Iterator<Item = &BugInstance> + '_>;

    /// Mutable access to the findings, in collection order.
    fn iter_mut(&mut self) -> Box<dyn Iterator<Item = &mut BugInstance> + '_>;

    fn add_error(&mut self, message: String);

    fn add_missing_class(&mut self, class_name: String);

    fn errors(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    fn missing_classes(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    fn add_application_class(&mut self, class_name: String, is_interface: bool);

    fn application_classes(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    /// Whether an application class was registered as an interface.
    fn is_interface(&self, class_name: &str) -> bool;

    fn len(&self) -> usize {
        self.iter().count()
    }

    fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// In-memory [`BugCollection`].
///
/// Exact duplicate findings are rejected. Registering an application class a
/// second time updates its interface flag without moving it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryBugCollection {
    bugs: Vec<BugInstance>,
    errors: Vec<String>,
    missing_classes: Vec<String>,
    app_classes: IndexMap<String, bool>,
}

impl MemoryBugCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bugs(&self) -> &[BugInstance] {
        &self.bugs
    }
}

impl BugCollection for MemoryBugCollection {
    fn add(&mut self, bug: BugInstance) -> bool {
        if self.bugs.contains(&bug) {
            return false;
        }
        self.bugs.push(bug);
        true
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &BugInstance> + '_> {
        Box::new(self.bugs.iter())
    }

    fn iter_mut(&mut self) -> Box<dyn Iterator<Item = &mut BugInstance> + '_> {
        Box::new(self.bugs.iter_mut())
    }

    fn add_error(&mut self, message: String) {
        self.errors.push(message);
    }

    fn add_missing_class(&mut self, class_name: String) {
        self.missing_classes.push(class_name);
    }

    fn errors(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.errors.iter().map(String::as_str))
    }

    fn missing_classes(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.missing_classes.iter().map(String::as_str))
    }

    fn add_application_class(&mut self, class_name: String, is_interface: bool) {
        self.app_classes.insert(class_name, is_interface);
    }

    fn application_classes(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.app_classes.keys().map(String::as_str))
    }

    fn is_interface(&self, class_name: &str) -> bool {
        self.app_classes.get(class_name).copied().unwrap_or(false)
    }

    fn len(&self) -> usize {
        self.bugs.len()
    }
}
