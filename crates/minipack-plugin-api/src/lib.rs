//! Core Plugin API for the module graph builder
//!
//! The graph builder does not read files, parse source or resolve paths
//! itself. It talks to collaborators through the traits defined here:
//!
//! - [`FileReader`]: storage access
//! - [`LanguageFrontend`]: parse, extract specifiers, transform
//! - [`IdentityResolver`]: specifier + importer → canonical identity
//! - [`AssetLoad`]: identity → loaded [`Asset`]
//!
//! Each trait is `Send + Sync` so one instance can serve parallel loads.

use minipack_foundation::{Asset, BuildResult, ModuleId};
use std::io;
use std::path::Path;

pub mod reader;

pub use reader::FsReader;

// ============================================================================
// Collaborator Traits
// ============================================================================

/// Reads source units from storage.
pub trait FileReader: Send + Sync {
    /// Full text of the unit behind `id`.
    fn read(&self, id: &ModuleId) -> io::Result<String>;

    /// Whether `path` names a readable unit. Used for extension probing.
    fn is_file(&self, path: &Path) -> bool;
}

/// Source parser, specifier extractor and source transformer for one
/// language.
pub trait LanguageFrontend: Send + Sync {
    /// Parsed representation handed between the three stages.
    type Ast;

    /// Parse raw text. Fails with a parse error on malformed syntax.
    fn parse(&self, id: &ModuleId, source: &str) -> BuildResult<Self::Ast>;

    /// Dependency specifiers in source appearance order, duplicates kept.
    fn extract_specifiers(&self, ast: &Self::Ast) -> Vec<String>;

    /// Target code for the module. The output is opaque to the graph.
    fn transform(&self, id: &ModuleId, ast: &Self::Ast) -> BuildResult<String>;
}

/// Maps a raw specifier, as written in `importer`, to a canonical identity.
///
/// Implementations must be deterministic: the same unit reached through
/// different specifiers or from different importers yields the same
/// identity.
pub trait IdentityResolver: Send + Sync {
    fn resolve(&self, specifier: &str, importer: &ModuleId) -> BuildResult<ModuleId>;
}

/// Produces an [`Asset`] with an empty mapping for a module identity.
pub trait AssetLoad: Send + Sync {
    fn load(&self, id: &ModuleId) -> BuildResult<Asset>;
}

impl<T: FileReader + ?Sized> FileReader for &T {
    fn read(&self, id: &ModuleId) -> io::Result<String> {
        (**self).read(id)
    }

    fn is_file(&self, path: &Path) -> bool {
        (**self).is_file(path)
    }
}

impl<T: AssetLoad + ?Sized> AssetLoad for &T {
    fn load(&self, id: &ModuleId) -> BuildResult<Asset> {
        (**self).load(id)
    }
}

impl<T: IdentityResolver + ?Sized> IdentityResolver for &T {
    fn resolve(&self, specifier: &str, importer: &ModuleId) -> BuildResult<ModuleId> {
        (**self).resolve(specifier, importer)
    }
}
