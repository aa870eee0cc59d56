//! Detects and reports circular imports in a [`ModuleGraph`].
//!
//! Graph construction already survives cycles; this crate only describes
//! them. The graph is projected onto a petgraph `DiGraph` whose edges carry
//! the specifier that created them, and every strongly connected component
//! large enough to matter is reported with one closed import chain.

use minipack_foundation::{ModuleGraph, ModuleId};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Instant;
use thiserror::Error;
use tracing::debug;

/// The primary output of the cycle analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CyclesResult {
    pub cycles: Vec<Cycle>,
    pub summary: Summary,
}

/// One strongly connected group of modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    pub id: usize,
    pub modules: Vec<ModuleId>,
    pub import_chain: Vec<ImportLink>,
}

/// One import along a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportLink {
    pub from: ModuleId,
    pub to: ModuleId,
    /// Specifier as written in `from`
    pub specifier: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_cycles: usize,
    pub total_modules_in_cycles: usize,
    pub largest_cycle_size: usize,
    pub modules_analyzed: usize,
    pub analysis_time_ms: u64,
}

#[derive(Error, Debug)]
pub enum CycleError {
    #[error("Module {from} maps '{specifier}' to {to}, which is not in the graph")]
    Dangling {
        from: ModuleId,
        specifier: String,
        to: ModuleId,
    },
}

type ImportGraph<'g> = DiGraph<&'g ModuleId, &'g str>;

/// Project the module graph's mappings onto a petgraph graph.
///
/// Several specifiers naming the same module produce one edge, labelled with
/// the first of them.
fn project(graph: &ModuleGraph) -> Result<ImportGraph<'_>, CycleError> {
    if let Some((from, specifier, to)) = graph.dangling().into_iter().next() {
        return Err(CycleError::Dangling {
            from: from.clone(),
            specifier: specifier.to_string(),
            to: to.clone(),
        });
    }

    let mut projected = ImportGraph::with_capacity(graph.len(), graph.edge_count());
    let nodes: HashMap<&ModuleId, NodeIndex> = graph
        .ids()
        .map(|id| (id, projected.add_node(id)))
        .collect();

    for (id, asset) in graph {
        let from = nodes[id];
        let mut seen = HashSet::new();
        for (specifier, dep) in &asset.mapping {
            if seen.insert(dep) {
                projected.add_edge(from, nodes[dep], specifier.as_str());
            }
        }
    }

    Ok(projected)
}

/// Find every import cycle of at least `min_size` modules (default 2).
///
/// With `min_size` of 1, modules that import themselves are reported too.
/// Single modules without a self-import never count as cycles.
pub fn find_cycles(
    graph: &ModuleGraph,
    min_size: Option<usize>,
) -> Result<CyclesResult, CycleError> {
    let start = Instant::now();
    let projected = project(graph)?;
    let min_cycle_size = min_size.unwrap_or(2).max(1);

    let components: Vec<Vec<NodeIndex>> = tarjan_scc(&projected)
        .into_iter()
        .filter(|scc| scc.len() >= min_cycle_size)
        .filter(|scc| scc.len() > 1 || projected.contains_edge(scc[0], scc[0]))
        .collect();

    let mut cycles = Vec::new();
    let mut total_modules_in_cycles = 0;
    let mut largest_cycle_size = 0;

    for (i, scc) in components.iter().enumerate() {
        let modules: Vec<ModuleId> = scc.iter().map(|&node| projected[node].clone()).collect();

        total_modules_in_cycles += modules.len();
        largest_cycle_size = largest_cycle_size.max(modules.len());

        cycles.push(Cycle {
            id: i + 1,
            modules,
            import_chain: build_import_chain(&projected, scc),
        });
    }

    let summary = Summary {
        total_cycles: cycles.len(),
        total_modules_in_cycles,
        largest_cycle_size,
        modules_analyzed: graph.len(),
        analysis_time_ms: start.elapsed().as_millis() as u64,
    };
    debug!(
        cycles = summary.total_cycles,
        modules = summary.modules_analyzed,
        "Cycle analysis complete"
    );

    Ok(CyclesResult { cycles, summary })
}

/// Shortest import chain inside the component that leaves its first module
/// and returns to it.
fn build_import_chain(graph: &ImportGraph<'_>, scc: &[NodeIndex]) -> Vec<ImportLink> {
    let Some(&start_node) = scc.first() else {
        return vec![];
    };
    let members: HashSet<NodeIndex> = scc.iter().copied().collect();

    // Breadth-first over member edges; `reached_by` holds the edge each
    // module was first reached through.
    let mut reached_by: HashMap<NodeIndex, EdgeIndex> = HashMap::new();
    let mut queue = VecDeque::from([start_node]);
    let mut closing = None;

    'search: while let Some(current) = queue.pop_front() {
        for edge in graph.edges(current) {
            let target = edge.target();
            if !members.contains(&target) {
                continue;
            }
            if target == start_node {
                closing = Some(edge.id());
                break 'search;
            }
            if !reached_by.contains_key(&target) {
                reached_by.insert(target, edge.id());
                queue.push_back(target);
            }
        }
    }

    let mut chain = Vec::new();
    let mut next = closing;
    while let Some(edge) = next {
        let Some((from, to)) = graph.edge_endpoints(edge) else {
            break;
        };
        chain.push(ImportLink {
            from: graph[from].clone(),
            to: graph[to].clone(),
            specifier: graph[edge].to_string(),
        });
        next = if from == start_node {
            None
        } else {
            reached_by.get(&from).copied()
        };
    }
    chain.reverse();
    chain
}
