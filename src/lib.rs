//! # bugcollection
//!
//! Saving and loading static-analysis results: findings, the application
//! classes that were analyzed, analysis errors, and the project that produced
//! them, all in one `<BugCollection>` XML document.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! xml         → Document model, translator registry, precheck, reader, writer
//!   ↓
//! collection  → BugCollection trait + in-memory implementation
//! project     → ProjectHandle trait + Project
//!   ↓
//! model       → BugInstance, Priority, annotation variants
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use bugcollection::{CollectionReader, CollectionWriter, MemoryBugCollection, Project, TranslatorRegistry};
//!
//! let registry = TranslatorRegistry::with_builtins();
//! let mut bugs = MemoryBugCollection::new();
//! let mut project = Project::new();
//!
//! CollectionReader::new(&registry).read_path("results.xml", &mut bugs, &mut project)?;
//! CollectionWriter::new().write_path("copy.xml", &bugs, &project)?;
//! ```

// ============================================================================
// MODULES (dependency order: model → collection/project → xml)
// ============================================================================

/// Findings and annotations
pub mod model;

/// Collection surface the reader fills and the writer drains
pub mod collection;

/// Embedded project metadata
pub mod project;

/// XML document model and the bug collection format
pub mod xml;

pub use collection::{BugCollection, MemoryBugCollection};
pub use model::{
    BugAnnotation, BugInstance, ClassAnnotation, FieldAnnotation, IntAnnotation,
    MethodAnnotation, Priority, SourceLineAnnotation,
};
pub use project::{Project, ProjectHandle};
pub use xml::{
    CollectionError, CollectionReader, CollectionWriter, Document, LegacySourceMap, Node,
    TranslatorRegistry,
};
