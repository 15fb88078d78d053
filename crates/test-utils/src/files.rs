//! Temporary files for configuration loading tests.

use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;

/// Write `content` to `name` inside a fresh temporary directory.
///
/// The directory is removed when the returned `TempDir` is dropped, so keep
/// it alive for as long as the path is used.
pub fn write_temp_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("failed to write temp file");
    (dir, path)
}
