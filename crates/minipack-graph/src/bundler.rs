//! Filesystem-backed build facade.

use crate::{AssetLoader, GraphBuilder, ParallelGraphBuilder, PathResolver};
use minipack_config::{logging, PackConfig};
use minipack_foundation::{BuildError, BuildResult, ModuleGraph, ModuleId};
use minipack_lang_ecmascript::EcmaFrontend;
use minipack_plugin_api::{AssetLoad, FsReader};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Builds module graphs from files on disk according to a [`PackConfig`].
#[derive(Debug, Clone)]
pub struct Bundler {
    config: PackConfig,
    root: PathBuf,
}

impl Bundler {
    /// Bundler rooted at the configured project root, taken relative to the
    /// current directory.
    pub fn new(config: PackConfig) -> BuildResult<Self> {
        let cwd = std::env::current_dir().map_err(|e| {
            BuildError::config(format!("Cannot determine current directory: {}", e))
        })?;
        let root = config.project_root(&cwd);
        Ok(Self::with_root(config, root))
    }

    pub fn with_root(config: PackConfig, root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &PackConfig {
        &self.config
    }

    fn resolver(&self) -> PathResolver<FsReader> {
        PathResolver::from_config(FsReader::new(), &self.root, &self.config.resolve)
    }

    /// Identity of the entry module: `entry` if given, else the configured
    /// one, joined to the project root when relative.
    pub fn entry_id(&self, entry: Option<&Path>) -> BuildResult<ModuleId> {
        let entry = entry
            .or(self.config.entry.as_deref())
            .ok_or_else(|| BuildError::config("No entry module given and none configured"))?;

        let path = self.root.join(entry);
        self.resolver().locate(&path).ok_or_else(|| {
            BuildError::config(format!(
                "Entry {} is not an absolute path inside the filesystem root",
                path.display()
            ))
        })
    }

    /// Load the entry module and build its complete graph.
    pub fn build(&self, entry: Option<&Path>) -> BuildResult<ModuleGraph> {
        let entry = self.entry_id(entry)?;
        let parallel = self.config.build.parallel;

        let span = logging::build_span(&entry.to_string(), parallel);
        let _guard = span.enter();
        let started = Instant::now();

        let resolver = self.resolver();
        let loader = AssetLoader::new(
            FsReader::new(),
            EcmaFrontend::from_config(&self.config.transform),
        );
        let seed = ModuleGraph::with_entry(loader.load(&entry)?);

        let graph = if parallel {
            let mut builder = ParallelGraphBuilder::new(&loader, &resolver);
            if let Some(threads) = self.config.build.threads {
                builder = builder.with_threads(threads)?;
            }
            builder.build(seed)?
        } else {
            GraphBuilder::new(&loader, &resolver).build(seed)?
        };

        info!(
            modules = graph.len(),
            edges = graph.edge_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Build complete"
        );
        Ok(graph)
    }
}
