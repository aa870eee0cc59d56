use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// Manages a temporary project directory for a test scenario.
/// Cleans up automatically when dropped.
pub struct TestWorkspace {
    pub temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a new empty workspace.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Creates a workspace holding a copy of a fixture project from
    /// [`crate::fixtures_dir`].
    pub fn from_fixture(name: &str) -> Self {
        let workspace = Self::new();
        let source = crate::fixtures_dir().join(name);
        let entries = fs::read_dir(&source)
            .unwrap_or_else(|e| panic!("Failed to read fixture '{}': {}", source.display(), e));
        for entry in entries {
            let entry = entry.expect("Failed to read fixture entry");
            let file_name = entry.file_name();
            fs::copy(entry.path(), workspace.path().join(&file_name)).unwrap_or_else(|e| {
                panic!("Failed to copy fixture file {:?}: {}", file_name, e)
            });
        }
        workspace
    }

    /// Returns the root path of the workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Creates a file with content within the workspace.
    /// Automatically creates parent directories.
    pub fn create_file(&self, rel_path: &str, content: &str) {
        let file_path = self.path().join(rel_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent dirs for '{}': {}", rel_path, e)
            });
        }
        fs::write(&file_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", file_path.display(), e));
    }

    /// Get the absolute path to a file in the workspace.
    pub fn absolute_path(&self, rel_path: &str) -> PathBuf {
        self.path().join(rel_path)
    }

    /// Write `minipack.toml` at the workspace root.
    pub fn create_config(&self, toml: &str) {
        self.create_file("minipack.toml", toml);
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}
