//! Tests for FileStore
//!
//! These tests verify:
//! - Table directory creation
//! - Strict-insert writes vs. overwriting writes
//! - Reads with each encoding, and read failures

use std::fs;
use std::path::PathBuf;

use ohnodb::address::ContentAddress;
use ohnodb::storage::{Encoding, FileStore, Payload};
use ohnodb::DbError;
use serde_json::json;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_files() -> (TempDir, PathBuf, FileStore) {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();
    let files = FileStore::new(&root, false);
    files.create_files_dir().unwrap();
    files.ensure_table_dir("users").unwrap();
    (temp_dir, root, files)
}

// =============================================================================
// Layout Tests
// =============================================================================

#[test]
fn test_ensure_table_dir_idempotent() {
    let (_temp, root, files) = setup_temp_files();

    files.ensure_table_dir("users").unwrap();
    files.ensure_table_dir("users").unwrap();

    assert!(root.join("files/users").is_dir());
}

#[test]
fn test_table_name_with_spaces_is_a_directory() {
    let (_temp, root, files) = setup_temp_files();

    files.ensure_table_dir("my table").unwrap();

    assert!(root.join("files").join("my table").is_dir());
}

// =============================================================================
// Write Tests
// =============================================================================

#[test]
fn test_write_then_read_json() {
    let (_temp, _root, files) = setup_temp_files();
    let address = ContentAddress::of("alice");

    files
        .write("users", &address, &Payload::Json(json!({"age": 30})))
        .unwrap();

    assert!(files.exists("users", &address));
    assert_eq!(
        files.read("users", &address, Encoding::Structured).unwrap(),
        Payload::Json(json!({"age": 30}))
    );
}

#[test]
fn test_write_is_strict_insert() {
    let (_temp, _root, files) = setup_temp_files();
    let address = ContentAddress::of("alice");

    files.write("users", &address, &Payload::text("one")).unwrap();
    let err = files
        .write("users", &address, &Payload::text("two"))
        .unwrap_err();

    assert!(matches!(err, DbError::AlreadyExists(_)));
    assert_eq!(
        files.read("users", &address, Encoding::Text).unwrap(),
        Payload::text("one")
    );
}

#[test]
fn test_write_overwrite_replaces_content() {
    let (_temp, root, files) = setup_temp_files();
    let address = ContentAddress::of("alice");

    files
        .write("users", &address, &Payload::text("a much longer first value"))
        .unwrap();
    files
        .write_overwrite("users", &address, &Payload::text("short"))
        .unwrap();

    assert_eq!(
        fs::read_to_string(files.path_for("users", &address)).unwrap(),
        "short"
    );
    assert!(files.path_for("users", &address).starts_with(root.join("files/users")));
}

#[test]
fn test_write_into_missing_table_dir_is_io_error() {
    let (_temp, _root, files) = setup_temp_files();

    let err = files
        .write("nope", &ContentAddress::of("x"), &Payload::text("x"))
        .unwrap_err();

    assert!(matches!(err, DbError::Io(_)));
}

// =============================================================================
// Read Tests
// =============================================================================

#[test]
fn test_read_missing_file_not_found() {
    let (_temp, _root, files) = setup_temp_files();

    let err = files
        .read("users", &ContentAddress::of("ghost"), Encoding::Text)
        .unwrap_err();

    assert!(matches!(err, DbError::NotFound(_)));
}

#[test]
fn test_read_text_as_structured_invalid_payload() {
    let (_temp, _root, files) = setup_temp_files();
    let address = ContentAddress::of("note");

    files
        .write("users", &address, &Payload::text("hello world"))
        .unwrap();

    let err = files
        .read("users", &address, Encoding::Structured)
        .unwrap_err();
    assert!(matches!(err, DbError::InvalidPayload(_)));
}

#[test]
fn test_read_non_utf8_as_text_invalid_payload() {
    let (_temp, _root, files) = setup_temp_files();
    let address = ContentAddress::of("bin");

    fs::write(files.path_for("users", &address), [0xff, 0xfe, 0x00]).unwrap();

    let err = files.read("users", &address, Encoding::Text).unwrap_err();
    assert!(matches!(err, DbError::InvalidPayload(_)));
}
