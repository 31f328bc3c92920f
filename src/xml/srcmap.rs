//! Legacy `<SrcMap classname=".." srcfile=".."/>` support.
//!
//! Older documents recorded source files in a separate class-to-file table
//! instead of on each `SourceLine`. The reader collects that table while it
//! dispatches, then fills in the source file of every annotation that is
//! still missing one. Known source files are never overwritten.

use rustc_hash::FxHashMap;

use crate::collection::BugCollection;
use crate::model::{BugAnnotation, SourceLineAnnotation};

/// Class name to source file table, only alive for the duration of one read.
#[derive(Clone, Debug, Default)]
pub struct LegacySourceMap {
    entries: FxHashMap<String, String>,
}

impl LegacySourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an entry. A later entry for the same class replaces the earlier one.
    pub fn insert(&mut self, class_name: impl Into<String>, source_file: impl Into<String>) {
        self.entries.insert(class_name.into(), source_file.into());
    }

    pub fn get(&self, class_name: &str) -> Option<&str> {
        self.entries.get(class_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fill in an unknown source file from the map. Returns `true` if the annotation changed.
pub fn update_source_file(annotation: &mut SourceLineAnnotation, map: &LegacySourceMap) -> bool {
    if annotation.is_source_file_known() {
        return false;
    }
    match map.get(&annotation.class_name) {
        Some(source_file) => {
            tracing::trace!(
                "filled source file {source_file} for {} from legacy map",
                annotation.class_name
            );
            annotation.set_source_file(source_file);
            true
        }
        None => false,
    }
}

/// Apply the map to every `SourceLine` and method-owned `SourceLine` in the collection.
///
/// Returns the number of annotations updated.
pub fn reconcile(collection: &mut dyn BugCollection, map: &LegacySourceMap) -> usize {
    if map.is_empty() {
        return 0;
    }

    let mut updated = 0;
    for bug in collection.iter_mut() {
        for annotation in bug.annotations_mut() {
            let lines = match annotation {
                BugAnnotation::SourceLine(lines) => Some(lines),
                BugAnnotation::Method(method) => method.source_lines.as_mut(),
                _ => None,
            };
            if let Some(lines) = lines {
                if update_source_file(lines, map) {
                    updated += 1;
                }
            }
        }
    }
    updated
}
