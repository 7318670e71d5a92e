//! Integration tests for the CLI route table

use crate::integration::test_utils::write_file;
use filete::cli::{Commands, RunContext};
use filete::ApiError;
use std::fs::File;
use std::path::PathBuf;
use tempfile::TempDir;
use zip::ZipArchive;

/// Run context over `share`, loaded through a config file and overridden by `--share`.
fn run_context(workspace: &TempDir, share: &std::path::Path) -> RunContext {
    let config_file = workspace.path().join("filete.toml");
    std::fs::write(&config_file, "shared_directories = [\"/does/not/matter\"]\n").unwrap();
    RunContext::new(
        workspace.path().to_path_buf(),
        Some(config_file),
        &[share.to_path_buf()],
    )
    .unwrap()
    .with_color(false)
}

#[test]
fn share_flag_replaces_configured_directories() {
    let workspace = TempDir::new().unwrap();
    let share = TempDir::new().unwrap();
    let ctx = run_context(&workspace, share.path());

    let roots: Vec<PathBuf> = ctx
        .api()
        .registry()
        .roots()
        .map(|r| r.absolute_path.clone())
        .collect();
    assert_eq!(roots, vec![dunce::canonicalize(share.path()).unwrap()]);
}

#[test]
fn missing_share_flag_directory_fails() {
    let workspace = TempDir::new().unwrap();
    let missing = workspace.path().join("missing");
    let result = RunContext::new(workspace.path().to_path_buf(), None, &[missing]);
    assert!(matches!(result, Err(ApiError::Share(_))));
}

#[test]
fn list_json_output() {
    let workspace = TempDir::new().unwrap();
    let share = TempDir::new().unwrap();
    write_file(share.path(), "dir/file.txt", b"12345");
    let ctx = run_context(&workspace, share.path());

    let out = ctx
        .execute(&Commands::List {
            path: "dir".to_string(),
            root: None,
            depth: None,
            format: "json".to_string(),
        })
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["type"], "directory");
    assert_eq!(value["size"], 5);
    assert_eq!(value["children"][0]["path"], "dir/file.txt");
}

#[test]
fn list_text_output_for_roots() {
    let workspace = TempDir::new().unwrap();
    let share = TempDir::new().unwrap();
    write_file(share.path(), "a/b/c.txt", b"c");
    let ctx = run_context(&workspace, share.path());

    let out = ctx
        .execute(&Commands::List {
            path: String::new(),
            root: None,
            depth: Some(2),
            format: "text".to_string(),
        })
        .unwrap();
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains(&ctx.api().registry().roots().next().unwrap().id));
    assert_eq!(lines[1], "  a/  0 B");
    assert_eq!(lines[2], "    b/…");
}

#[test]
fn fetch_directory_writes_archive() {
    let workspace = TempDir::new().unwrap();
    let share = TempDir::new().unwrap();
    write_file(share.path(), "music/song.mp3", b"la la la");
    let ctx = run_context(&workspace, share.path());

    let destination = workspace.path().join("music.zip");
    let out = ctx
        .execute(&Commands::Fetch {
            path: "music".to_string(),
            root: None,
            output: Some(destination.clone()),
        })
        .unwrap();
    assert!(out.starts_with("Wrote archive music.zip"));

    let mut archive = ZipArchive::new(File::open(&destination).unwrap()).unwrap();
    assert!(archive.by_name("music/song.mp3").is_ok());
}

#[test]
fn fetch_reports_share_errors() {
    let workspace = TempDir::new().unwrap();
    let share = TempDir::new().unwrap();
    let ctx = run_context(&workspace, share.path());

    let err = ctx
        .execute(&Commands::Fetch {
            path: "ghost.txt".to_string(),
            root: None,
            output: Some(workspace.path().join("ghost.txt")),
        })
        .unwrap_err();
    assert!(filete::cli::map_error(&err).starts_with("request error (404)"));
    assert!(!workspace.path().join("ghost.txt").exists());
}
