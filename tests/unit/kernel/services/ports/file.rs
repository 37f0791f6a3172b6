use super::*;

#[test]
fn test_dir_entry_new() {
    let entry = DirEntry::new(PathBuf::from("/test/notes.txt"), false);
    assert_eq!(entry.name, "notes.txt");
    assert!(!entry.is_dir);
}

#[test]
fn test_file_error_display() {
    let err = FileError::NotFound(PathBuf::from("/missing/a.txt"));
    assert!(err.to_string().contains("/missing/a.txt"));

    let err = FileError::InvalidUtf8(PathBuf::from("blob.bin"));
    assert!(err.to_string().contains("UTF-8"));
}

#[test]
fn test_io_error_converts_and_keeps_source() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: FileError = io.into();
    assert!(matches!(err, FileError::Io(_)));
    assert!(std::error::Error::source(&err).is_some());
}
