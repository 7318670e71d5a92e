//! Integration tests for Configuration System

use crate::integration::test_utils::write_file;
use filete::config::{ConfigLoader, FileteConfig};
use filete::{Listing, ShareApi};
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let config_file = dir.path().join("filete.toml");
    std::fs::write(&config_file, contents).unwrap();
    config_file
}

#[test]
fn config_file_drives_share_api() {
    let share = TempDir::new().unwrap();
    write_file(share.path(), "a/b/c.txt", b"c");
    let config_dir = TempDir::new().unwrap();
    let config_file = write_config(
        &config_dir,
        &format!(
            "shared_directories = [{:?}]\n\n[listing]\ndefault_depth = 1\n",
            share.path().display().to_string()
        ),
    );

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    assert!(config.validate().is_ok());

    let api = ShareApi::from_config(&config);
    assert_eq!(api.registry().len(), 1);
    assert_eq!(api.default_depth(), 1);

    let Listing::Roots(roots) = api.list("", "", api.default_depth()).unwrap() else {
        panic!("expected roots listing");
    };
    assert!(roots[0].children().unwrap()[0].is_truncated());
}

#[test]
fn duplicate_configured_roots_collapse() {
    let share = TempDir::new().unwrap();
    let path = share.path().display().to_string();
    let config = FileteConfig {
        shared_directories: vec![path.clone().into(), format!("{}/", path).into()],
        ..Default::default()
    };

    let api = ShareApi::from_config(&config);
    assert_eq!(api.registry().len(), 1);
}

#[test]
fn invalid_configs_are_reported() {
    let config_dir = TempDir::new().unwrap();
    let config_file = write_config(
        &config_dir,
        "shared_directories = [\"relative/share\", \"\"]\n\n[listing]\ndefault_depth = 0\n",
    );

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    let errors = config.validate().unwrap_err();
    assert_eq!(errors.len(), 3);
}

#[test]
fn malformed_config_fails_to_load() {
    let config_dir = TempDir::new().unwrap();
    let config_file = write_config(&config_dir, "[listing]\ndefault_depth = \"deep\"\n");
    assert!(ConfigLoader::load_from_file(&config_file).is_err());
}

#[cfg(unix)]
#[test]
fn follow_symlinks_setting_reaches_listings() {
    let outside = TempDir::new().unwrap();
    write_file(outside.path(), "shared.txt", b"s");
    let share = TempDir::new().unwrap();
    std::os::unix::fs::symlink(outside.path().join("shared.txt"), share.path().join("link.txt"))
        .unwrap();

    let mut config = FileteConfig {
        shared_directories: vec![share.path().to_path_buf()],
        ..Default::default()
    };
    let hidden = ShareApi::from_config(&config);
    let Listing::Roots(roots) = hidden.list("", "", 1).unwrap() else {
        panic!("expected roots listing");
    };
    assert!(roots[0].children().unwrap().is_empty());

    config.listing.follow_symlinks = true;
    let following = ShareApi::from_config(&config);
    let Listing::Roots(roots) = following.list("", "", 1).unwrap() else {
        panic!("expected roots listing");
    };
    assert_eq!(roots[0].children().unwrap()[0].name(), "link.txt");
}
