//! Sequential worklist traversal.

use minipack_foundation::{BuildResult, ModuleGraph, ModuleId};
use minipack_plugin_api::{AssetLoad, IdentityResolver};
use tracing::{debug, trace};

/// Expands a seed graph until it is closed under dependency discovery.
///
/// Modules are expanded from an explicit LIFO stack. A newly discovered
/// module is inserted into the graph before anything is scheduled for it, so
/// the key set doubles as the visited set: cycles and repeated imports stop
/// at the first identity that is already present.
pub struct GraphBuilder<L, Res> {
    loader: L,
    resolver: Res,
}

impl<L: AssetLoad, Res: IdentityResolver> GraphBuilder<L, Res> {
    pub fn new(loader: L, resolver: Res) -> Self {
        Self { loader, resolver }
    }

    /// Consume the seed graph and return it fully populated.
    ///
    /// On error the partially built graph is dropped.
    pub fn build(&self, mut graph: ModuleGraph) -> BuildResult<ModuleGraph> {
        self.expand(&mut graph)?;
        Ok(graph)
    }

    /// Expand every module currently in `graph`, in place.
    ///
    /// After an error the graph holds whatever was discovered so far and
    /// should not be reused.
    pub fn expand(&self, graph: &mut ModuleGraph) -> BuildResult<()> {
        let mut worklist: Vec<ModuleId> = graph.ids().cloned().collect();
        let mut loads = 0usize;

        while let Some(id) = worklist.pop() {
            let specifiers = match graph.get(&id) {
                Some(asset) => asset.dependencies.clone(),
                None => continue,
            };
            trace!(module = %id, specifiers = specifiers.len(), "Expanding module");

            for specifier in &specifiers {
                let dep = self.resolver.resolve(specifier, &id)?;

                if let Some(asset) = graph.get_mut(&id) {
                    asset.mapping.insert(specifier.clone(), dep.clone());
                }

                if graph.contains(&dep) {
                    continue;
                }

                let asset = self
                    .loader
                    .load(&dep)
                    .map_err(|e| e.with_importer(&id, specifier))?;
                loads += 1;

                let expand = asset.has_dependencies();
                graph.insert_new(asset);
                if expand {
                    worklist.push(dep);
                }
            }
        }

        debug!(
            modules = graph.len(),
            loads,
            "Module graph expanded"
        );
        Ok(())
    }
}
