//! Write-then-read round trips over collections of different shapes.

use bugcollection::{
    BugCollection, BugInstance, CollectionReader, CollectionWriter, MemoryBugCollection,
    MethodAnnotation, Priority, Project, ProjectHandle, SourceLineAnnotation, TranslatorRegistry,
};
use rstest::rstest;

fn build(findings: usize, app_classes: usize, errors: usize, missing: usize) -> MemoryBugCollection {
    let mut collection = MemoryBugCollection::new();

    for i in 0..findings {
        let class_name = format!("com.example.C{i}");
        let bug = BugInstance::new(format!("TYPE_{i}"), Priority::from_value((i % 5) as u8 + 1).unwrap())
            .with_category("CORRECTNESS")
            .with_class(&class_name)
            .with_method(
                MethodAnnotation::new(&class_name, "run", "(I)V", i % 2 == 0).with_source_lines(
                    SourceLineAnnotation::unknown(&class_name)
                        .with_lines(10, 20)
                        .with_source_file(format!("C{i}.java")),
                ),
            )
            .with_field(&class_name, "count", "I", false)
            .with_source_lines(SourceLineAnnotation::unknown(&class_name).with_bytecode(3, 9))
            .with_int(i as i64 - 2);
        assert!(collection.add(bug));
    }
    for i in 0..app_classes {
        collection.add_application_class(format!("com.example.App{i}"), i % 2 == 1);
    }
    for i in 0..errors {
        collection.add_error(format!("Error <{i}> & \"quoted\""));
    }
    for i in 0..missing {
        collection.add_missing_class(format!("org.missing.M{i}"));
    }
    collection
}

fn app_classes(collection: &MemoryBugCollection) -> Vec<(String, bool)> {
    collection
        .application_classes()
        .map(|name| (name.to_string(), collection.is_interface(name)))
        .collect()
}

#[rstest]
#[case::empty(0, 0, 0, 0)]
#[case::one_each(1, 1, 1, 1)]
#[case::many_each(7, 4, 3, 5)]
#[case::findings_only(5, 0, 0, 0)]
#[case::bookkeeping_only(0, 6, 2, 1)]
fn test_write_then_read_restores_collection(
    #[case] findings: usize,
    #[case] app_class_count: usize,
    #[case] errors: usize,
    #[case] missing: usize,
) {
    let original = build(findings, app_class_count, errors, missing);
    let mut project = Project::new();
    project.add_jar("build/app.jar");

    let bytes = CollectionWriter::new()
        .to_bytes(&original, &project)
        .expect("write");

    let registry = TranslatorRegistry::with_builtins();
    let mut restored = MemoryBugCollection::new();
    let mut restored_project = Project::new();
    CollectionReader::new(&registry)
        .read_bytes(&bytes, &mut restored, &mut restored_project)
        .expect("read");

    assert_eq!(restored.bugs(), original.bugs());
    assert_eq!(app_classes(&restored), app_classes(&original));
    assert_eq!(
        restored.errors().collect::<Vec<_>>(),
        original.errors().collect::<Vec<_>>()
    );
    assert_eq!(
        restored.missing_classes().collect::<Vec<_>>(),
        original.missing_classes().collect::<Vec<_>>()
    );
    assert_eq!(restored_project.jars(), ["build/app.jar"]);
    assert!(!restored_project.is_modified());
}

#[test]
fn test_second_write_is_identical() {
    let original = build(3, 2, 1, 1);
    let project = Project::new();
    let first = CollectionWriter::new().to_bytes(&original, &project).expect("write");

    let registry = TranslatorRegistry::with_builtins();
    let mut restored = MemoryBugCollection::new();
    let mut restored_project = Project::new();
    CollectionReader::new(&registry)
        .read_bytes(&first, &mut restored, &mut restored_project)
        .expect("read");
    let second = CollectionWriter::new()
        .to_bytes(&restored, &restored_project)
        .expect("write");

    assert_eq!(String::from_utf8_lossy(&first), String::from_utf8_lossy(&second));
}

#[test]
fn test_file_roundtrip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("results.xml");

    let original = build(2, 1, 1, 0);
    CollectionWriter::new()
        .write_path(&path, &original, &Project::new())
        .expect("write file");

    let registry = TranslatorRegistry::with_builtins();
    let mut restored = MemoryBugCollection::new();
    let mut project = Project::new();
    CollectionReader::new(&registry)
        .read_path(&path, &mut restored, &mut project)
        .expect("read file");
    assert_eq!(restored.bugs(), original.bugs());
}

#[test]
fn test_read_missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let registry = TranslatorRegistry::with_builtins();
    let mut collection = MemoryBugCollection::new();
    let mut project = Project::new();

    let err = CollectionReader::new(&registry)
        .read_path(dir.path().join("absent.xml"), &mut collection, &mut project)
        .unwrap_err();
    assert!(matches!(err, bugcollection::CollectionError::Io(_)));
}
