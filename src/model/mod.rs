//! Findings and the annotations that give them context.

pub mod annotation;
mod finding;

pub use annotation::{
    BugAnnotation, ClassAnnotation, FieldAnnotation, IntAnnotation, MethodAnnotation,
    SourceLineAnnotation,
};
pub use finding::{BUG_INSTANCE_ELEMENT, BugInstance, Priority};
