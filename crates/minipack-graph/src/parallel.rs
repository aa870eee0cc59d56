//! Round-based parallel traversal.
//!
//! Each round the coordinating thread resolves every specifier of the
//! frontier, claims each identity the graph does not know yet, and hands the
//! claims to rayon. Loads run concurrently; the graph's key set and every
//! asset's mapping are only ever touched by the coordinator.

use indexmap::IndexMap;
use minipack_foundation::{Asset, BuildError, BuildResult, ModuleGraph, ModuleId};
use minipack_plugin_api::{AssetLoad, IdentityResolver};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, trace};

/// Who first asked for a claimed identity.
struct Claim {
    importer: ModuleId,
    specifier: String,
}

pub struct ParallelGraphBuilder<L, Res> {
    loader: L,
    resolver: Res,
    pool: Option<ThreadPool>,
}

impl<L: AssetLoad, Res: IdentityResolver> ParallelGraphBuilder<L, Res> {
    /// Builder running on rayon's global pool.
    pub fn new(loader: L, resolver: Res) -> Self {
        Self {
            loader,
            resolver,
            pool: None,
        }
    }

    /// Run loads on a dedicated pool of `threads` workers.
    pub fn with_threads(mut self, threads: usize) -> BuildResult<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("minipack-load-{}", index))
            .build()
            .map_err(|e| BuildError::config(format!("Failed to start loader pool: {}", e)))?;
        self.pool = Some(pool);
        Ok(self)
    }

    pub fn build(&self, mut graph: ModuleGraph) -> BuildResult<ModuleGraph> {
        self.expand(&mut graph)?;
        Ok(graph)
    }

    /// Expand every module currently in `graph`, in place.
    ///
    /// When several loads of one round fail, which error is reported is
    /// unspecified.
    pub fn expand(&self, graph: &mut ModuleGraph) -> BuildResult<()> {
        let mut frontier: Vec<ModuleId> = graph.ids().cloned().collect();
        let mut rounds = 0usize;
        let mut loads = 0usize;

        while !frontier.is_empty() {
            rounds += 1;
            let claims = self.claim(graph, &frontier)?;
            trace!(
                round = rounds,
                frontier = frontier.len(),
                claimed = claims.len(),
                "Dispatching loads"
            );

            let assets = self.load_all(claims)?;
            loads += assets.len();

            frontier = Vec::new();
            for asset in assets {
                let id = asset.id().clone();
                let expand = asset.has_dependencies();
                if graph.insert_new(asset) && expand {
                    frontier.push(id);
                }
            }
        }

        debug!(
            modules = graph.len(),
            loads,
            rounds,
            "Module graph expanded"
        );
        Ok(())
    }

    /// Resolve the frontier's specifiers and reserve every unknown identity.
    fn claim(
        &self,
        graph: &mut ModuleGraph,
        frontier: &[ModuleId],
    ) -> BuildResult<Vec<(ModuleId, Claim)>> {
        let mut claims: IndexMap<ModuleId, Claim> = IndexMap::new();

        for id in frontier {
            let specifiers = match graph.get(id) {
                Some(asset) => asset.dependencies.clone(),
                None => continue,
            };

            for specifier in specifiers {
                let dep = self.resolver.resolve(&specifier, id)?;

                if !graph.contains(&dep) && !claims.contains_key(&dep) {
                    claims.insert(
                        dep.clone(),
                        Claim {
                            importer: id.clone(),
                            specifier: specifier.clone(),
                        },
                    );
                }

                if let Some(asset) = graph.get_mut(id) {
                    asset.mapping.insert(specifier, dep);
                }
            }
        }

        Ok(claims.into_iter().collect())
    }

    fn load_all(&self, claims: Vec<(ModuleId, Claim)>) -> BuildResult<Vec<Asset>> {
        let load = || {
            claims
                .par_iter()
                .map(|(dep, claim)| {
                    self.loader
                        .load(dep)
                        .map_err(|e| e.with_importer(&claim.importer, &claim.specifier))
                })
                .collect::<BuildResult<Vec<Asset>>>()
        };

        match &self.pool {
            Some(pool) => pool.install(load),
            None => load(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphBuilder;
    use minipack_foundation::BuildErrorKind;
    use minipack_test_support::{CountingLoader, DirectResolver, ScriptedLoader};
    use pretty_assertions::assert_eq;

    fn wide_fan_in() -> ScriptedLoader {
        // Every leaf is imported by every middle module.
        let leaves: Vec<String> = (0..8).map(|i| format!("/leaf{}", i)).collect();
        let middles: Vec<String> = (0..8).map(|i| format!("/mid{}", i)).collect();

        let mut loader = ScriptedLoader::new().module("/entry", middles.clone());
        for middle in &middles {
            loader = loader.module(middle, leaves.clone());
        }
        for leaf in &leaves {
            loader = loader.module(leaf, ["/entry"]);
        }
        loader
    }

    #[test]
    fn test_each_identity_loaded_once_under_contention() {
        let loader = CountingLoader::new(wide_fan_in());
        let seed = ModuleGraph::with_entry(loader.load(&ModuleId::from("/entry")).unwrap());

        let graph = ParallelGraphBuilder::new(&loader, DirectResolver)
            .with_threads(4)
            .unwrap()
            .build(seed)
            .unwrap();

        assert_eq!(graph.len(), 17);
        assert_eq!(loader.max_per_module(), 1);
        assert!(graph.is_closed());
        assert!(graph.assets().all(Asset::is_fully_mapped));
    }

    #[test]
    fn test_matches_sequential_builder() {
        let loader = wide_fan_in();
        let seed = ModuleGraph::with_entry(loader.load(&ModuleId::from("/entry")).unwrap());

        let sequential = GraphBuilder::new(&loader, DirectResolver)
            .build(seed.clone())
            .unwrap();
        let parallel = ParallelGraphBuilder::new(&loader, DirectResolver)
            .build(seed)
            .unwrap();

        let mut seq_ids: Vec<_> = sequential.ids().collect();
        let mut par_ids: Vec<_> = parallel.ids().collect();
        seq_ids.sort();
        par_ids.sort();
        assert_eq!(seq_ids, par_ids);

        for (id, asset) in &sequential {
            assert_eq!(parallel.get(id).unwrap().mapping, asset.mapping);
        }
    }

    #[test]
    fn test_breadth_first_insertion_order() {
        let loader = ScriptedLoader::new()
            .module("/a", ["/b", "/c"])
            .module("/b", ["/b1"])
            .module("/c", ["/c1"])
            .module("/b1", Vec::<String>::new())
            .module("/c1", Vec::<String>::new());
        let seed = ModuleGraph::with_entry(loader.load(&ModuleId::from("/a")).unwrap());

        let graph = ParallelGraphBuilder::new(&loader, DirectResolver)
            .build(seed)
            .unwrap();

        let order: Vec<String> = graph.ids().map(|id| id.to_string()).collect();
        assert_eq!(order, vec!["/a", "/b", "/c", "/b1", "/c1"]);
    }

    #[test]
    fn test_load_failure_fails_build() {
        let loader = ScriptedLoader::new()
            .module("/a", ["/b", "/missing"])
            .module("/b", Vec::<String>::new());
        let seed = ModuleGraph::with_entry(loader.load(&ModuleId::from("/a")).unwrap());

        let err = ParallelGraphBuilder::new(&loader, DirectResolver)
            .build(seed)
            .unwrap_err();
        assert_eq!(err.kind(), BuildErrorKind::Read);
        assert_eq!(err.module(), Some(&ModuleId::from("/missing")));
        assert_eq!(err.importer().unwrap().module, ModuleId::from("/a"));
    }

    #[test]
    fn test_empty_seed_is_noop() {
        let loader = CountingLoader::new(ScriptedLoader::new());
        let graph = ParallelGraphBuilder::new(&loader, DirectResolver)
            .build(ModuleGraph::new())
            .unwrap();

        assert!(graph.is_empty());
        assert_eq!(loader.total(), 0);
    }
}
