//! XML persistence for bug collections.
//!
//! ## Document shape
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <BugCollection>
//!   <Project>...</Project>
//!   <AppClass interface="true">com.example.Service</AppClass>
//!   <AppClass>com.example.ServiceImpl</AppClass>
//!   <BugInstance type="NP_NULL_ON_SOME_PATH" priority="1">...</BugInstance>
//!   <Errors>
//!     <AnalysisError>Could not read class file</AnalysisError>
//!     <MissingClass>org.example.Dependency</MissingClass>
//!   </Errors>
//! </BugCollection>
//! ```
//!
//! On write the children always come in that order. On read any order is
//! accepted, plus legacy `<SrcMap>` entries, and every element not listed
//! above is decoded through the [`TranslatorRegistry`].
//!
//! ```text
//! bytes ──precheck──▶ Document ──dispatch──▶ staged ──commit──▶ BugCollection
//!                                              │                    ▲
//!                                              └── LegacySourceMap ─┘ reconcile
//! ```

mod document;
mod error;
pub mod precheck;
mod reader;
pub mod srcmap;
mod translator;
mod writer;

pub use document::{Document, Node};
pub use error::CollectionError;
pub use precheck::{HEADER_WINDOW, ROOT_SIGNATURE, precheck};
pub use reader::CollectionReader;
pub use srcmap::{LegacySourceMap, reconcile, update_source_file};
pub use translator::{
    AnnotationTranslator, BugInstanceTranslator, ClassTranslator, FieldTranslator,
    FindingTranslator, IntTranslator, MethodTranslator, SourceLineTranslator, TranslatorRegistry,
};
pub use writer::CollectionWriter;

/// Element and attribute names of the bug collection format.
pub mod element {
    pub const ROOT: &str = "BugCollection";
    pub const PROJECT: &str = "Project";
    pub const APP_CLASS: &str = "AppClass";
    pub const ERRORS: &str = "Errors";
    pub const ANALYSIS_ERROR: &str = "AnalysisError";
    pub const MISSING_CLASS: &str = "MissingClass";
    /// Legacy only, never written.
    pub const SRCMAP: &str = "SrcMap";

    pub const INTERFACE_ATTR: &str = "interface";
    pub const SRCMAP_CLASSNAME_ATTR: &str = "classname";
    pub const SRCMAP_SRCFILE_ATTR: &str = "srcfile";
}
