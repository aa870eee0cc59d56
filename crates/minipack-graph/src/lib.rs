//! Module graph construction
//!
//! Starting from one entry module, discovers every transitively imported
//! module exactly once and records, per module, which identity each raw
//! specifier resolved to.
//!
//! - [`AssetLoader`]: read → parse → extract → transform for one identity
//! - [`PathResolver`]: specifier + importer → canonical path identity
//! - [`GraphBuilder`]: sequential LIFO worklist traversal
//! - [`ParallelGraphBuilder`]: the same contract with rayon-parallel loads
//! - [`Bundler`]: filesystem wiring driven by a `PackConfig`

pub mod builder;
pub mod bundler;
pub mod loader;
pub mod parallel;
pub mod resolver;

pub use builder::GraphBuilder;
pub use bundler::Bundler;
pub use loader::AssetLoader;
pub use parallel::ParallelGraphBuilder;
pub use resolver::PathResolver;

use minipack_foundation::{BuildResult, ModuleGraph, ModuleId};
use minipack_plugin_api::{AssetLoad, IdentityResolver};
use path_clean::PathClean;

/// Load `entry`, seed a graph with it and expand it sequentially.
///
/// `.` and `..` segments in `entry` are collapsed first, so the entry shares
/// its identity with specifiers that resolve back to it. Extension and index
/// inference is the resolver's job; pass the file itself.
pub fn build<L, Res>(entry: &ModuleId, loader: L, resolver: Res) -> BuildResult<ModuleGraph>
where
    L: AssetLoad,
    Res: IdentityResolver,
{
    let entry = ModuleId::new(entry.as_path().clean());
    let seed = ModuleGraph::with_entry(loader.load(&entry)?);
    GraphBuilder::new(loader, resolver).build(seed)
}
