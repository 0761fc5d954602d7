use std::fs;

use extractor_engine::{probe_file, ProbeError, PDF_MIME_TYPE, UNKNOWN_MIME_TYPE};
use tempfile::TempDir;

#[test]
fn pdf_is_detected_from_content() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("report.PDF");
    fs::write(&path, b"%PDF-1.7\n...").unwrap();

    let probed = probe_file(&path).unwrap();
    assert_eq!(probed.name, "report.PDF");
    assert_eq!(probed.byte_size, 12);
    assert_eq!(probed.mime_type, PDF_MIME_TYPE);
    assert_eq!(probed.path, path);
}

#[test]
fn renamed_non_pdf_is_not_a_pdf() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("fake.pdf");
    fs::write(&path, b"hello world").unwrap();

    assert_eq!(probe_file(&path).unwrap().mime_type, UNKNOWN_MIME_TYPE);
}

#[test]
fn empty_file_is_unknown() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("empty.pdf");
    fs::write(&path, b"").unwrap();

    let probed = probe_file(&path).unwrap();
    assert_eq!(probed.byte_size, 0);
    assert_eq!(probed.mime_type, UNKNOWN_MIME_TYPE);
}

#[test]
fn missing_file_and_directory_are_errors() {
    let temp = TempDir::new().unwrap();

    let missing = probe_file(&temp.path().join("missing.pdf")).unwrap_err();
    assert!(matches!(missing, ProbeError::NotFound));
    assert_eq!(missing.to_string(), "No such file");

    let dir = probe_file(temp.path()).unwrap_err();
    assert!(matches!(dir, ProbeError::NotAFile));
}
