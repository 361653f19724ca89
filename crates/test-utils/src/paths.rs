//! Path utilities for tests that need a local archive root.

use std::path::{Path, PathBuf};

/// Returns the workspace root directory.
///
/// This is determined by walking up from the current crate's manifest directory
/// until we find the workspace Cargo.toml.
pub fn workspace_root() -> PathBuf {
    // Start from the test-utils crate manifest dir
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// Creates a temporary directory to act as an archive root.
///
/// The directory is automatically cleaned up when the returned `TempDir` is dropped.
pub fn temp_archive() -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix("imap_archive_")
        .tempdir()
        .expect("Failed to create temporary archive directory")
}

/// Writes `contents` at `relative` under `root`, creating parent directories.
///
/// Returns the full path of the written file.
pub fn write_archive_file(root: &Path, relative: impl AsRef<Path>, contents: &[u8]) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create archive subdirectory");
    }
    std::fs::write(&path, contents).expect("Failed to write archive file");
    path
}
