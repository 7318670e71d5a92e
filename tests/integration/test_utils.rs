//! Shared test utilities for integration tests
//!
//! Builds shared-directory fixtures on disk and a `ShareApi` over them.

use filete::{RootRegistry, ShareApi};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write `contents` at `relative` below `base`, creating parent directories.
pub fn write_file(base: &Path, relative: &str, contents: &[u8]) {
    let path = base.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// A single shared root with a small tree:
///
/// ```text
/// docs/readme.md
/// docs/guides/intro.md
/// docs/guides/deep/notes.txt
/// docs/empty/
/// photos/cat.jpg
/// todo.txt
/// ```
pub struct ShareFixture {
    pub temp_dir: TempDir,
    pub api: ShareApi,
    pub root_id: String,
}

impl ShareFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        write_file(base, "docs/readme.md", b"# Readme\n");
        write_file(base, "docs/guides/intro.md", b"intro");
        write_file(base, "docs/guides/deep/notes.txt", b"some notes");
        fs::create_dir_all(base.join("docs/empty")).unwrap();
        write_file(base, "photos/cat.jpg", &[0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10]);
        write_file(base, "todo.txt", b"- write tests\n");

        Self::over(temp_dir)
    }

    /// Share an already-populated directory.
    pub fn over(temp_dir: TempDir) -> Self {
        let api = ShareApi::new(RootRegistry::register([temp_dir.path()]));
        let root_id = api.registry().roots().next().unwrap().id.clone();
        Self {
            temp_dir,
            api,
            root_id,
        }
    }

    pub fn base(&self) -> &Path {
        self.temp_dir.path()
    }
}
