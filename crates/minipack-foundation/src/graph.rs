//! The module graph.
//!
//! A [`ModuleGraph`] maps each module identity to its [`Asset`]. It only
//! grows: modules are inserted once and never removed or replaced, which is
//! what lets the builder use key presence as its "already discovered" guard.

use crate::{Asset, ModuleId};
use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Identity → asset map, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleGraph {
    modules: IndexMap<ModuleId, Asset>,
}

/// Serializable overview of a finished graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSummary {
    pub entry: Option<ModuleId>,
    pub module_count: usize,
    pub edge_count: usize,
}

impl ModuleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// A graph holding only the entry asset.
    pub fn with_entry(entry: Asset) -> Self {
        let mut graph = Self::new();
        graph.insert_new(entry);
        graph
    }

    /// Inserts an asset under its own identity.
    ///
    /// Returns `false` and leaves the graph untouched if the identity is
    /// already present.
    pub fn insert_new(&mut self, asset: Asset) -> bool {
        match self.modules.entry(asset.id().clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(asset);
                true
            }
        }
    }

    pub fn contains(&self, id: &ModuleId) -> bool {
        self.modules.contains_key(id)
    }

    pub fn get(&self, id: &ModuleId) -> Option<&Asset> {
        self.modules.get(id)
    }

    /// Mutable access to an asset's bookkeeping.
    pub fn get_mut(&mut self, id: &ModuleId) -> Option<&mut Asset> {
        self.modules.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// The first module inserted, which is the entry for built graphs.
    pub fn entry(&self) -> Option<&ModuleId> {
        self.modules.keys().next()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ModuleId> + '_ {
        self.modules.keys()
    }

    pub fn assets(&self) -> impl Iterator<Item = &Asset> + '_ {
        self.modules.values()
    }

    /// Resolved dependencies of a module, deduplicated, in specifier order.
    pub fn dependencies_of(&self, id: &ModuleId) -> Vec<&ModuleId> {
        let Some(asset) = self.modules.get(id) else {
            return Vec::new();
        };
        let unique: IndexSet<&ModuleId> = asset.mapping.values().collect();
        unique.into_iter().collect()
    }

    /// Modules whose mapping points at `id`.
    pub fn dependents_of(&self, id: &ModuleId) -> Vec<&ModuleId> {
        self.modules
            .iter()
            .filter(|(_, asset)| asset.mapping.values().any(|dep| dep == id))
            .map(|(importer, _)| importer)
            .collect()
    }

    /// Number of distinct importer → dependency edges.
    pub fn edge_count(&self) -> usize {
        self.modules
            .keys()
            .map(|id| self.dependencies_of(id).len())
            .sum()
    }

    /// Mapping targets that are not keys of the graph.
    ///
    /// Empty for every graph a successful build returns.
    pub fn dangling(&self) -> Vec<(&ModuleId, &str, &ModuleId)> {
        self.modules
            .iter()
            .flat_map(|(importer, asset)| {
                asset
                    .mapping
                    .iter()
                    .filter(|(_, dep)| !self.modules.contains_key(*dep))
                    .map(move |(spec, dep)| (importer, spec.as_str(), dep))
            })
            .collect()
    }

    pub fn is_closed(&self) -> bool {
        self.dangling().is_empty()
    }

    pub fn summary(&self) -> GraphSummary {
        GraphSummary {
            entry: self.entry().cloned(),
            module_count: self.len(),
            edge_count: self.edge_count(),
        }
    }
}

impl<'a> IntoIterator for &'a ModuleGraph {
    type Item = (&'a ModuleId, &'a Asset);
    type IntoIter = indexmap::map::Iter<'a, ModuleId, Asset>;

    fn into_iter(self) -> Self::IntoIter {
        self.modules.iter()
    }
}
