use nsfgen::Fixture;
use nsfgen::output::{OutputError, write_file, write_to};
use std::fs;

#[test]
fn write_to_memory_sink() {
    let bytes = Fixture::MinimalTest.build().unwrap();
    let mut sink: Vec<u8> = Vec::new();
    write_to(&bytes, &mut sink).unwrap();
    assert_eq!(sink, bytes);
}

#[test]
fn write_file_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spiffs_data").join("nsf").join("minimal_test.nsf");
    let bytes = Fixture::MinimalTest.build().unwrap();

    write_file(&path, &bytes).unwrap();
    assert_eq!(fs::read(&path).unwrap(), bytes);
}

#[test]
fn write_file_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fixture.nsf");

    write_file(&path, &Fixture::ContinuousTone.build().unwrap()).unwrap();
    write_file(&path, &Fixture::MinimalTest.build().unwrap()).unwrap();
    assert_eq!(fs::metadata(&path).unwrap().len(), 135);
}

#[test]
fn write_file_reports_path_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where a directory is expected.
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, b"x").unwrap();
    let path = blocker.join("fixture.nsf");

    let err = write_file(&path, &[0u8]).unwrap_err();
    let OutputError::Io { path: failed, .. } = &err;
    assert!(failed.starts_with(&blocker));
    assert!(err.to_string().starts_with("failed to write "));
    assert!(err.to_string().contains("blocker"));
    assert!(std::error::Error::source(&err).is_some());
}
