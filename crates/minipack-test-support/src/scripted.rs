//! Graph fixtures that skip parsing.
//!
//! A [`ScriptedLoader`] serves assets from a table of identity → specifiers.
//! Paired with [`DirectResolver`], where every specifier is already an
//! identity, it lets tests describe arbitrary graph shapes directly.

use minipack_foundation::{Asset, BuildError, BuildResult, ModuleId};
use minipack_plugin_api::{AssetLoad, IdentityResolver};
use std::collections::HashMap;
use std::io;
use std::sync::Mutex;

/// Loader over a fixed module table.
#[derive(Debug, Default, Clone)]
pub struct ScriptedLoader {
    modules: HashMap<ModuleId, Vec<String>>,
}

impl ScriptedLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module whose source would import `specifiers`, in order.
    pub fn module<I, S>(mut self, id: &str, specifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modules.insert(
            ModuleId::from(id),
            specifiers.into_iter().map(Into::into).collect(),
        );
        self
    }
}

impl AssetLoad for ScriptedLoader {
    fn load(&self, id: &ModuleId) -> BuildResult<Asset> {
        let specifiers = self.modules.get(id).ok_or_else(|| {
            BuildError::read(
                id.clone(),
                io::Error::new(io::ErrorKind::NotFound, "not in script"),
            )
        })?;
        Ok(Asset::new(
            id.clone(),
            format!("/* {} */", id),
            specifiers.clone(),
        ))
    }
}

/// Treats every specifier as the identity it names.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectResolver;

impl IdentityResolver for DirectResolver {
    fn resolve(&self, specifier: &str, importer: &ModuleId) -> BuildResult<ModuleId> {
        if specifier.is_empty() {
            return Err(BuildError::resolution(
                specifier,
                importer.clone(),
                "empty specifier",
            ));
        }
        Ok(ModuleId::from(specifier))
    }
}

/// Records how many times each identity was loaded.
pub struct CountingLoader<L> {
    inner: L,
    counts: Mutex<HashMap<ModuleId, usize>>,
}

impl<L: AssetLoad> CountingLoader<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            counts: Mutex::new(HashMap::new()),
        }
    }

    pub fn count(&self, id: &ModuleId) -> usize {
        self.counts.lock().unwrap().get(id).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.lock().unwrap().values().sum()
    }

    /// Largest load count of any single identity.
    pub fn max_per_module(&self) -> usize {
        self.counts
            .lock()
            .unwrap()
            .values()
            .copied()
            .max()
            .unwrap_or(0)
    }
}

impl<L: AssetLoad> AssetLoad for CountingLoader<L> {
    fn load(&self, id: &ModuleId) -> BuildResult<Asset> {
        *self.counts.lock().unwrap().entry(id.clone()).or_insert(0) += 1;
        self.inner.load(id)
    }
}
