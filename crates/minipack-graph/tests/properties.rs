//! Traversal properties over randomly shaped, possibly cyclic graphs.

use minipack_foundation::{Asset, ModuleGraph, ModuleId};
use minipack_graph::{GraphBuilder, ParallelGraphBuilder};
use minipack_plugin_api::AssetLoad;
use minipack_test_support::{CountingLoader, DirectResolver, ScriptedLoader};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn name(index: usize) -> String {
    format!("/m{}", index)
}

/// Adjacency lists over `n` modules; duplicates and self-edges allowed.
fn adjacency() -> impl Strategy<Value = Vec<Vec<usize>>> {
    (1usize..14).prop_flat_map(|n| {
        prop::collection::vec(prop::collection::vec(0..n, 0..5), n)
    })
}

fn script(edges: &[Vec<usize>]) -> ScriptedLoader {
    edges
        .iter()
        .enumerate()
        .fold(ScriptedLoader::new(), |loader, (from, targets)| {
            loader.module(&name(from), targets.iter().map(|&to| name(to)))
        })
}

fn reachable(edges: &[Vec<usize>]) -> BTreeSet<String> {
    let mut seen = BTreeSet::new();
    let mut stack = vec![0usize];
    while let Some(node) = stack.pop() {
        if seen.insert(name(node)) {
            stack.extend(edges[node].iter().copied());
        }
    }
    seen
}

fn key_set(graph: &ModuleGraph) -> BTreeSet<String> {
    graph.ids().map(|id| id.to_string()).collect()
}

fn seed(loader: &impl AssetLoad) -> ModuleGraph {
    ModuleGraph::with_entry(loader.load(&ModuleId::from(name(0).as_str())).unwrap())
}

proptest! {
    #[test]
    fn sequential_build_is_closed_complete_and_loads_once(edges in adjacency()) {
        let loader = CountingLoader::new(script(&edges));
        let graph = GraphBuilder::new(&loader, DirectResolver)
            .build(seed(&loader))
            .unwrap();

        prop_assert_eq!(key_set(&graph), reachable(&edges));
        prop_assert!(graph.is_closed());
        prop_assert!(graph.assets().all(Asset::is_fully_mapped));
        prop_assert_eq!(loader.max_per_module(), 1);
        prop_assert_eq!(loader.total(), graph.len());
    }

    #[test]
    fn parallel_build_agrees_with_sequential(edges in adjacency()) {
        let plain = script(&edges);
        let sequential = GraphBuilder::new(&plain, DirectResolver)
            .build(seed(&plain))
            .unwrap();

        let loader = CountingLoader::new(script(&edges));
        let parallel = ParallelGraphBuilder::new(&loader, DirectResolver)
            .build(seed(&loader))
            .unwrap();

        prop_assert_eq!(key_set(&parallel), key_set(&sequential));
        prop_assert_eq!(loader.max_per_module(), 1);
        for (id, asset) in &sequential {
            prop_assert_eq!(&parallel.get(id).unwrap().mapping, &asset.mapping);
        }
    }
}
