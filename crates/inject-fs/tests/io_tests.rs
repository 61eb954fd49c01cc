use assert_fs::prelude::*;
use inject_fs::{Error, NormalizedPath, RobustnessConfig, io};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("index.html"));

    io::write_atomic(&path, b"<html></html>", RobustnessConfig::default()).unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(content, "<html></html>");
}

#[test]
fn test_write_text_overwrites_existing() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("index.html");
    file.write_str("original").unwrap();

    let path = NormalizedPath::new(file.path());
    io::write_text(&path, "updated", RobustnessConfig::default()).unwrap();

    file.assert("updated");
}

#[test]
fn test_write_text_creates_missing_parents() {
    let temp = assert_fs::TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("app").join("views").join("index.html"));

    io::write_text(&path, "deep content", RobustnessConfig::no_retry()).unwrap();

    temp.child("app/views/index.html")
        .assert(predicate::str::contains("deep content"));
}

#[test]
fn test_write_leaves_no_temp_files_behind() {
    let temp = assert_fs::TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("main.css"));

    io::write_text(&path, "body {}", RobustnessConfig::default()).unwrap();

    let names: Vec<String> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["main.css".to_string()]);
}

#[test]
fn test_read_text_existing_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("app.js");
    file.write_str("// bower:js\n// endbower\n").unwrap();

    let content = io::read_text(&NormalizedPath::new(file.path())).unwrap();
    assert_eq!(content, "// bower:js\n// endbower\n");
}

#[test]
fn test_read_text_nonexistent_file_reports_path() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("missing.html"));

    let err = io::read_text(&path).unwrap_err();
    match &err {
        Error::Io { path, source } => {
            assert!(path.ends_with("missing.html"));
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!err.is_transient());
}

#[cfg(unix)]
#[test]
fn test_write_text_keeps_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("main.scss");
    file.write_str("// bower:scss\n// endbower\n").unwrap();
    fs::set_permissions(file.path(), fs::Permissions::from_mode(0o640)).unwrap();

    io::write_text(&NormalizedPath::new(file.path()), "updated", RobustnessConfig::no_retry())
        .unwrap();

    file.assert("updated");
    let mode = fs::metadata(file.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o640);
}

#[cfg(unix)]
#[test]
fn test_write_text_through_symlink_updates_target() {
    use std::os::unix::fs::{PermissionsExt, symlink};

    let temp = assert_fs::TempDir::new().unwrap();
    let target = temp.child("real/index.html");
    target.write_str("<!-- bower:js --><!-- endbower -->").unwrap();
    fs::set_permissions(target.path(), fs::Permissions::from_mode(0o600)).unwrap();
    let link = temp.child("index.html");
    symlink(target.path(), link.path()).unwrap();

    io::write_text(&NormalizedPath::new(link.path()), "injected", RobustnessConfig::no_retry())
        .unwrap();

    assert!(fs::symlink_metadata(link.path()).unwrap().file_type().is_symlink());
    target.assert("injected");
    let mode = fs::metadata(target.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);

    let names: Vec<String> = fs::read_dir(temp.child("real").path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["index.html".to_string()]);
}
