//! Serialized layout of saved collections.

use bugcollection::{
    BugCollection, BugInstance, CollectionError, CollectionWriter, MemoryBugCollection, Priority,
    Project, SourceLineAnnotation,
};

fn write(collection: &MemoryBugCollection, project: &Project) -> String {
    let bytes = CollectionWriter::new()
        .to_bytes(collection, project)
        .expect("write");
    String::from_utf8(bytes).expect("utf8")
}

/// Test that sections come out in fixed order regardless of insertion order.
#[test]
fn test_section_order_independent_of_insertion() {
    let mut collection = MemoryBugCollection::new();
    collection.add_missing_class("m.Gone".to_string());
    collection.add_error("late error".to_string());
    collection.add(BugInstance::new("B1", Priority::High).with_class("a.A"));
    collection.add_application_class("a.A".to_string(), false);
    collection.add(BugInstance::new("B2", Priority::Low).with_class("a.B"));
    collection.add_application_class("a.B".to_string(), true);

    let mut project = Project::new();
    project.add_jar("a.jar");
    let text = write(&collection, &project);

    let project_at = text.find("<Project>").expect("project");
    let last_app_class = text.rfind("<AppClass").expect("app class");
    let first_app_class = text.find("<AppClass").expect("app class");
    let first_bug = text.find("<BugInstance").expect("bug");
    let last_bug = text.rfind("<BugInstance").expect("bug");
    let errors_at = text.find("<Errors>").expect("errors");

    assert!(project_at < first_app_class);
    assert!(last_app_class < first_bug);
    assert!(last_bug < errors_at);
    assert!(text.trim_end().ends_with("</Errors>\n</BugCollection>"));
}

/// Test that the root element sits alone on a line inside the first 60 bytes.
#[test]
fn test_header_passes_precheck() {
    let text = write(&MemoryBugCollection::new(), &Project::new());
    let window = &text.as_bytes()[..60];
    assert!(bugcollection::xml::precheck::check_header(window).is_ok());
}

/// Test interface flag fidelity on AppClass elements.
#[test]
fn test_interface_flag_serialization() {
    let mut collection = MemoryBugCollection::new();
    collection.add_application_class("a.Api".to_string(), true);
    collection.add_application_class("a.Impl".to_string(), false);
    let text = write(&collection, &Project::new());

    assert!(text.contains(r#"<AppClass interface="true">a.Api</AppClass>"#));
    assert!(text.contains("<AppClass>a.Impl</AppClass>"));
}

/// Test that unknown source files are omitted and known ones written.
#[test]
fn test_source_file_attribute() {
    let mut collection = MemoryBugCollection::new();
    collection.add(
        BugInstance::new("X", Priority::Normal)
            .with_source_lines(SourceLineAnnotation::unknown("a.Unknown").with_lines(1, 2))
            .with_source_lines(
                SourceLineAnnotation::unknown("a.Known")
                    .with_lines(3, 4)
                    .with_source_file("Known.java"),
            ),
    );
    let text = write(&collection, &Project::new());

    assert!(text.contains(r#"<SourceLine classname="a.Unknown" start="1" end="2"/>"#));
    assert!(text.contains(r#"<SourceLine classname="a.Known" start="3" end="4" sourcefile="Known.java"/>"#));
}

/// Test that error text is escaped on write.
#[test]
fn test_error_text_escaped() {
    let mut collection = MemoryBugCollection::new();
    collection.add_error("a < b && c".to_string());
    let text = write(&collection, &Project::new());
    assert!(text.contains("<AnalysisError>a &lt; b &amp;&amp; c</AnalysisError>"));
}

/// Test that write reports a failing sink as an I/O error.
#[test]
fn test_failing_sink() {
    struct Broken;

    impl std::io::Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let result = CollectionWriter::new().write(&MemoryBugCollection::new(), &Project::new(), Broken);
    let err = result.unwrap_err();
    assert!(matches!(err, CollectionError::Io(_)), "got {err:?}");
    assert!(err.to_string().contains("disk full"), "got {err}");
}
