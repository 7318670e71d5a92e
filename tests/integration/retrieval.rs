//! Integration tests for file and directory downloads

use crate::integration::test_utils::{write_file, ShareFixture};
use filete::{ErrorKind, ShareError};
use std::collections::BTreeMap;
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;
use walkdir::WalkDir;
use zip::ZipArchive;

/// Every path below `dir` (prefixed with the directory's own name) mapped to
/// its contents; directories map to `None`.
fn snapshot_dir(dir: &Path) -> BTreeMap<String, Option<Vec<u8>>> {
    let parent = dir.parent().unwrap();
    WalkDir::new(dir)
        .into_iter()
        .map(|entry| entry.unwrap())
        .map(|entry| {
            let name = entry
                .path()
                .strip_prefix(parent)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            let contents = if entry.file_type().is_file() {
                Some(fs::read(entry.path()).unwrap())
            } else {
                None
            };
            (name, contents)
        })
        .collect()
}

fn snapshot_archive(bytes: Vec<u8>) -> BTreeMap<String, Option<Vec<u8>>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut file = archive.by_index(i).unwrap();
            if file.is_dir() {
                (file.name().trim_end_matches('/').to_string(), None)
            } else {
                let mut contents = Vec::new();
                file.read_to_end(&mut contents).unwrap();
                (file.name().to_string(), Some(contents))
            }
        })
        .collect()
}

#[test]
fn fetch_file_streams_exact_bytes() {
    let fixture = ShareFixture::new();
    let mut download = fixture.api.fetch("photos/cat.jpg", &fixture.root_id).unwrap();

    assert!(!download.is_archive);
    assert_eq!(download.file_name, "cat.jpg");

    let on_disk = fs::read(fixture.base().join("photos/cat.jpg")).unwrap();
    let mut bytes = Vec::new();
    download.read_to_end(&mut bytes).unwrap();
    assert_eq!(bytes, on_disk);
    assert_eq!(download.length, on_disk.len() as u64);
}

#[test]
fn fetch_directory_archive_reproduces_tree() {
    let fixture = ShareFixture::new();
    let mut download = fixture.api.fetch("docs", &fixture.root_id).unwrap();

    assert!(download.is_archive);
    assert_eq!(download.file_name, "docs.zip");
    assert_eq!(download.content_type(), "application/zip");

    let mut bytes = Vec::new();
    download.read_to_end(&mut bytes).unwrap();
    assert_eq!(bytes.len() as u64, download.length);

    let archived = snapshot_archive(bytes);
    let expected = snapshot_dir(&fixture.base().join("docs"));
    assert_eq!(archived, expected);
    assert!(archived.contains_key("docs/empty"));
    assert_eq!(
        archived.get("docs/guides/deep/notes.txt"),
        Some(&Some(b"some notes".to_vec()))
    );
}

#[test]
fn fetch_empty_directory_yields_single_entry_archive() {
    let fixture = ShareFixture::new();
    let mut download = fixture.api.fetch("docs/empty", &fixture.root_id).unwrap();
    let mut bytes = Vec::new();
    download.read_to_end(&mut bytes).unwrap();

    let archived = snapshot_archive(bytes);
    assert_eq!(archived.into_keys().collect::<Vec<_>>(), vec!["empty".to_string()]);
}

#[test]
fn fetch_large_file_is_not_truncated() {
    let fixture = ShareFixture::new();
    let contents: Vec<u8> = (0..(3 * 1024 * 1024u32)).map(|i| (i % 251) as u8).collect();
    write_file(fixture.base(), "big/blob.bin", &contents);

    let mut download = fixture.api.fetch("big", &fixture.root_id).unwrap();
    let mut bytes = Vec::new();
    download.read_to_end(&mut bytes).unwrap();

    let archived = snapshot_archive(bytes);
    assert_eq!(archived.get("big/blob.bin"), Some(&Some(contents)));
}

#[test]
fn fetch_errors_map_to_client_errors() {
    let fixture = ShareFixture::new();
    let api = &fixture.api;

    let err = api.fetch("nope.txt", &fixture.root_id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.kind().status_code(), 404);

    let err = api.fetch("todo.txt", "0000").unwrap_err();
    assert!(matches!(err, ShareError::InvalidRoot(ref id) if id == "0000"));
    assert_eq!(err.kind().status_code(), 404);

    let err = api.fetch("../outside", &fixture.root_id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PathEscapesRoot);
    assert!(err.kind().is_client_error());
}

#[test]
fn fetch_path_through_a_file_is_not_found() {
    let fixture = ShareFixture::new();

    let err = fixture.api.fetch("todo.txt/x", &fixture.root_id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.kind().status_code(), 404);

    let err = fixture.api.fetch("photos/cat.jpg/inner", &fixture.root_id).unwrap_err();
    assert!(matches!(err, ShareError::NotFound(ref p) if p == "photos/cat.jpg/inner"));
}

#[cfg(unix)]
#[test]
fn fetch_directory_with_unreadable_file_fails_whole_request() {
    use std::os::unix::fs::PermissionsExt;

    let fixture = ShareFixture::new();
    let locked = fixture.base().join("docs/guides/locked.txt");
    fs::write(&locked, b"private").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    if fs::read(&locked).is_ok() {
        // Permission bits are not enforced for this user (e.g. root)
        return;
    }

    let err = fixture.api.fetch("docs", &fixture.root_id).unwrap_err();
    assert!(matches!(err, ShareError::Io { ref path, .. } if path == "docs/guides/locked.txt"));
    assert_eq!(err.kind(), ErrorKind::IoFailure);
    assert_eq!(err.kind().status_code(), 500);

    // Siblings outside the failing subtree are still served
    assert!(fixture.api.fetch("photos", &fixture.root_id).is_ok());
}

#[test]
fn headers_for_downloads() {
    let fixture = ShareFixture::new();
    let download = fixture.api.fetch("todo.txt", &fixture.root_id).unwrap();
    assert_eq!(download.content_type(), "application/octet-stream");
    assert_eq!(download.content_disposition(), "attachment; filename=\"todo.txt\"");
}
