//! Specifier → identity resolution.
//!
//! Identities are absolute, lexically normalized paths. A specifier that
//! does not name a file directly is completed with the configured
//! extensions, then with the configured index files. When nothing matches,
//! the normalized path itself is the identity, so a missing module fails
//! later as a read error naming that path.

use minipack_config::ResolveConfig;
use minipack_foundation::{BuildError, BuildResult, ModuleId};
use minipack_plugin_api::{FileReader, IdentityResolver};
use path_clean::PathClean;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use tracing::trace;

/// Filesystem-path resolver with extension and index-file inference.
pub struct PathResolver<R> {
    reader: R,
    root: PathBuf,
    extensions: Vec<String>,
    index_files: Vec<String>,
    /// Prefix → directory, longest prefix first
    aliases: Vec<(String, PathBuf)>,
}

impl<R: FileReader> PathResolver<R> {
    /// Resolver with the default extension and index-file lists.
    pub fn new(reader: R, root: impl Into<PathBuf>) -> Self {
        Self::from_config(reader, root, &ResolveConfig::default())
    }

    pub fn from_config(reader: R, root: impl Into<PathBuf>, config: &ResolveConfig) -> Self {
        let root = root.into().clean();
        let mut aliases: Vec<(String, PathBuf)> = config
            .alias
            .iter()
            .map(|(prefix, target)| (prefix.clone(), root.join(target)))
            .collect();
        aliases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        Self {
            reader,
            root,
            extensions: config.normalized_extensions(),
            index_files: config.index_files.clone(),
            aliases,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Canonical identity for an already-joined path.
    ///
    /// Used for the entry module as well as for resolved specifiers.
    pub fn locate(&self, path: &Path) -> Option<ModuleId> {
        let normalized = normalize(path)?;
        Some(ModuleId::new(self.complete(normalized)))
    }

    /// The path a specifier denotes before any extension inference.
    fn candidate(&self, specifier: &str, importer: &ModuleId) -> BuildResult<PathBuf> {
        if specifier.is_empty() {
            return Err(BuildError::resolution(
                specifier,
                importer.clone(),
                "empty specifier",
            ));
        }

        if let Some((prefix, target)) = self
            .aliases
            .iter()
            .find(|(prefix, _)| specifier.starts_with(prefix.as_str()))
        {
            let rest = specifier[prefix.len()..].trim_start_matches('/');
            return Ok(target.join(rest));
        }

        if specifier.starts_with('/') {
            return Ok(PathBuf::from(specifier));
        }

        if is_relative(specifier) {
            return Ok(importer.context().join(specifier));
        }

        Err(BuildError::resolution(
            specifier,
            importer.clone(),
            "bare specifiers are not supported; use a relative or absolute path or an alias",
        ))
    }

    /// First existing file among the path, its extension variants and its
    /// index files; the path itself otherwise.
    fn complete(&self, path: PathBuf) -> PathBuf {
        if self.reader.is_file(&path) {
            return path;
        }

        for ext in &self.extensions {
            let mut name = OsString::from(path.as_os_str());
            name.push(".");
            name.push(ext);
            let with_ext = PathBuf::from(name);
            if self.reader.is_file(&with_ext) {
                return with_ext;
            }
        }

        for index in &self.index_files {
            let index_path = path.join(index);
            if self.reader.is_file(&index_path) {
                return index_path;
            }
        }

        path
    }
}

impl<R: FileReader> IdentityResolver for PathResolver<R> {
    fn resolve(&self, specifier: &str, importer: &ModuleId) -> BuildResult<ModuleId> {
        let candidate = self.candidate(specifier, importer)?;
        let resolved = self.locate(&candidate).ok_or_else(|| {
            BuildError::resolution(
                specifier,
                importer.clone(),
                format!(
                    "{} is not an absolute path inside the filesystem root",
                    candidate.display()
                ),
            )
        })?;

        trace!(
            importer = %importer,
            specifier = %specifier,
            resolved = %resolved,
            "Resolved specifier"
        );
        Ok(resolved)
    }
}

fn is_relative(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

/// Lexically normalize an absolute path.
///
/// Returns `None` for relative paths and for paths whose `..` segments climb
/// above the root.
fn normalize(path: &Path) -> Option<PathBuf> {
    let mut depth: usize = 0;
    let mut rooted = false;
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                rooted = true;
                depth = 0;
            }
            Component::CurDir => {}
            Component::ParentDir => depth = depth.checked_sub(1)?,
            Component::Normal(_) => depth += 1,
        }
    }
    rooted.then(|| path.clean())
}
