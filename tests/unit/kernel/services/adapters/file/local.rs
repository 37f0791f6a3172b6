use super::*;
use std::fs::File;
use tempfile::tempdir;

#[test]
fn write_then_read_is_verbatim() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    let provider = LocalFileProvider::new();

    provider.write(&path, "line one\r\nline two\n\tend").unwrap();
    assert!(provider.exists(&path));
    assert_eq!(
        provider.read_to_string(&path).unwrap(),
        "line one\r\nline two\n\tend"
    );
}

#[test]
fn write_into_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("typo").join("c.txt");
    let err = LocalFileProvider::new().write(&path, "x").unwrap_err();
    assert!(matches!(err, FileError::Io(_)));
    assert!(!dir.path().join("typo").exists());
}

#[test]
fn write_overwrites_existing_content() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("f.txt");
    let provider = LocalFileProvider::new();
    provider.write(&path, "a much longer first version").unwrap();
    provider.write(&path, "short").unwrap();
    assert_eq!(provider.read_to_string(&path).unwrap(), "short");
}

#[test]
fn read_missing_file_is_not_found() {
    let dir = tempdir().unwrap();
    let err = LocalFileProvider::new()
        .read_to_string(&dir.path().join("missing.txt"))
        .unwrap_err();
    assert!(matches!(err, FileError::NotFound(_)));
}

#[test]
fn read_directory_is_not_a_file() {
    let dir = tempdir().unwrap();
    let err = LocalFileProvider::new()
        .read_to_string(dir.path())
        .unwrap_err();
    assert!(matches!(err, FileError::NotAFile(_)));
}

#[test]
fn read_binary_is_invalid_utf8() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("blob.bin");
    fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();
    let err = LocalFileProvider::new().read_to_string(&path).unwrap_err();
    assert!(matches!(err, FileError::InvalidUtf8(_)));
}

#[test]
fn list_dir_puts_directories_first() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("zeta")).unwrap();
    File::create(dir.path().join("Beta.txt")).unwrap();
    File::create(dir.path().join("alpha.txt")).unwrap();

    let entries = LocalFileProvider::new().list_dir(dir.path()).unwrap();
    let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["zeta", "alpha.txt", "Beta.txt"]);
    assert!(entries[0].is_dir);
}
