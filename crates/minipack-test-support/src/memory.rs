//! In-memory [`FileReader`].

use minipack_foundation::ModuleId;
use minipack_plugin_api::FileReader;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Files held in a map, keyed by absolute path.
#[derive(Debug, Default, Clone)]
pub struct MemoryReader {
    files: HashMap<PathBuf, String>,
}

impl MemoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

impl FileReader for MemoryReader {
    fn read(&self, id: &ModuleId) -> io::Result<String> {
        self.files.get(id.as_path()).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", id),
            )
        })
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}
