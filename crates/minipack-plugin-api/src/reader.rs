//! Filesystem-backed [`FileReader`].

use crate::FileReader;
use minipack_foundation::ModuleId;
use std::io;
use std::path::Path;
use tracing::trace;

/// Reads modules from the local filesystem as UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReader;

impl FsReader {
    pub fn new() -> Self {
        Self
    }
}

impl FileReader for FsReader {
    fn read(&self, id: &ModuleId) -> io::Result<String> {
        trace!(module = %id, "Reading module from disk");
        std::fs::read_to_string(id.as_path())
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}
