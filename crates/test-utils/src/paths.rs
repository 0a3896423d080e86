//! Path utilities for test output files.

use std::path::PathBuf;

use tempfile::TempDir;

/// Returns the workspace root directory.
///
/// This is determined by walking up from the test-utils manifest directory.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// Searches for a test file in the usual locations.
///
/// Checked in order:
/// 1. `TEST_DATA_DIR` (if set)
/// 2. `crates/renderer/testdata/`
/// 3. `testdata/` at the workspace root
/// 4. System TrueType directories (for fonts)
pub fn find_test_file(name: &str) -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(test_data_dir) = std::env::var("TEST_DATA_DIR") {
        candidates.push(PathBuf::from(test_data_dir).join(name));
    }

    let root = workspace_root();
    candidates.extend([
        root.join("crates/renderer/testdata").join(name),
        root.join("testdata").join(name),
        PathBuf::from("/usr/share/fonts/truetype/dejavu").join(name),
        PathBuf::from("/usr/share/fonts/TTF").join(name),
        PathBuf::from("/usr/share/fonts/dejavu").join(name),
    ]);

    candidates.into_iter().find(|path| path.exists())
}

/// A temporary directory holding one output file.
///
/// The directory (and the file) is removed when this value is dropped, so keep
/// it alive for as long as the path is used.
pub struct TempOutput {
    _dir: TempDir,
    pub path: PathBuf,
}

/// Create a fresh temporary directory and return `<dir>/<file_name>`.
pub fn temp_output(file_name: &str) -> TempOutput {
    let dir = match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(e) => panic!("failed to create temp dir: {}", e),
    };
    let path = dir.path().join(file_name);
    TempOutput { _dir: dir, path }
}
